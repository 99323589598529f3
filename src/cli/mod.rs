//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the elorus binary.

use std::convert::Infallible;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Elorus API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "elorus", about = "Elorus API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Target the demo environment.
    #[arg(
        long,
        global = true,
        env = "ELORUS_DEMO",
        value_parser = demo_flag
    )]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Work with contacts.
    #[command(alias = "contact")]
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },

    /// Work with invoices.
    #[command(alias = "invoice")]
    Invoices {
        #[command(subcommand)]
        action: InvoiceAction,
    },
}

/// Contact operations.
#[derive(Subcommand, Debug)]
pub enum ContactAction {
    /// List contacts.
    List(ListArgs),

    /// Get a single contact by ID.
    Get {
        /// The contact ID.
        id: String,
    },

    /// Delete a contact.
    Delete {
        /// The contact ID.
        id: String,
    },
}

/// Invoice operations.
#[derive(Subcommand, Debug)]
pub enum InvoiceAction {
    /// List invoices.
    List(ListArgs),

    /// Get a single invoice by ID.
    Get {
        /// The invoice ID.
        id: String,
    },

    /// Delete an invoice.
    Delete {
        /// The invoice ID.
        id: String,
    },

    /// Download the invoice PDF.
    Pdf {
        /// The invoice ID.
        id: String,

        /// Directory to write the PDF into.
        #[arg(long, short, default_value = ".")]
        output: PathBuf,
    },

    /// Show the email delivery status of an invoice.
    EmailStatus {
        /// The invoice ID.
        id: String,
    },

    /// Mark an invoice void.
    Void {
        /// The invoice ID.
        id: String,

        /// Restore a voided invoice instead.
        #[arg(long)]
        undo: bool,
    },
}

/// Filtering and pagination shared by list commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Free-text search.
    #[arg(long)]
    pub search: Option<String>,

    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Sort field, prefix with `-` for descending.
    #[arg(long)]
    pub ordering: Option<String>,
}

/// `--demo` and `ELORUS_DEMO` follow the same truthy rule as
/// [`ElorusClient::from_env`](crate::ElorusClient::from_env).
fn demo_flag(value: &str) -> Result<bool, Infallible> {
    Ok(crate::client::parse_flag(value))
}
