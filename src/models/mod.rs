//! Elorus request models.

mod common;
mod contact;
mod email;
mod invoice;
mod record;

pub use common::*;
pub use contact::*;
pub use email::*;
pub use invoice::*;
pub use record::*;
