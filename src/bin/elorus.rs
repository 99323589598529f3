//! Elorus API CLI binary.
//!
//! A command-line interface for interacting with the Elorus API.

use clap::Parser;
use elorus::cli::{Cli, Command, ContactAction, InvoiceAction, ListArgs};
use elorus::{ContactListQuery, ElorusClient, InvoiceListQuery, Page, Payload};
use serde_json::Value;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ElorusClient::from_env() {
        Ok(c) if cli.demo => c.with_demo(true),
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set ELORUS_API_KEY and ELORUS_ORGANIZATION_ID environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ElorusClient, cli: Cli) -> elorus::Result<()> {
    match cli.command {
        Command::Contacts { action } => handle_contacts(client, action, cli.json).await,
        Command::Invoices { action } => handle_invoices(client, action, cli.json).await,
    }
}

async fn handle_contacts(
    client: &ElorusClient,
    action: ContactAction,
    json: bool,
) -> elorus::Result<()> {
    let contacts = client.contacts();
    match action {
        ContactAction::List(args) => {
            let payload = contacts.list(&contact_query(args)).await?;
            output_page(payload, json, |c| ContactRow::from(c))?;
        }
        ContactAction::Get { id } => output_single(contacts.get(&id).await?)?,
        ContactAction::Delete { id } => {
            contacts.delete(&id).await?;
            println!("Deleted contact {id}");
        }
    }
    Ok(())
}

async fn handle_invoices(
    client: &ElorusClient,
    action: InvoiceAction,
    json: bool,
) -> elorus::Result<()> {
    let invoices = client.invoices();
    match action {
        InvoiceAction::List(args) => {
            let payload = invoices.list(&invoice_query(args)).await?;
            output_page(payload, json, |i| InvoiceRow::from(i))?;
        }
        InvoiceAction::Get { id } => output_single(invoices.get(&id).await?)?,
        InvoiceAction::Delete { id } => {
            invoices.delete(&id).await?;
            println!("Deleted invoice {id}");
        }
        InvoiceAction::Pdf { id, output } => match invoices.get_pdf(&id).await? {
            Payload::File(download) => {
                let path = download.save_to(&output)?;
                println!("Saved {}", path.display());
            }
            other => output_single(other)?,
        },
        InvoiceAction::EmailStatus { id } => output_single(invoices.get_email(&id).await?)?,
        InvoiceAction::Void { id, undo } => output_single(invoices.mark_void(&id, !undo).await?)?,
    }
    Ok(())
}

fn contact_query(args: ListArgs) -> ContactListQuery {
    ContactListQuery {
        search: args.search,
        ordering: args.ordering,
        page: args.page,
        page_size: args.page_size,
        ..Default::default()
    }
}

fn invoice_query(args: ListArgs) -> InvoiceListQuery {
    InvoiceListQuery {
        search: args.search,
        ordering: args.ordering,
        page: args.page,
        page_size: args.page_size,
        ..Default::default()
    }
}

fn output_single(payload: Payload) -> elorus::Result<()> {
    match payload {
        Payload::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Payload::Text(text) => println!("{text}"),
        Payload::File(download) => println!("{} ({} bytes)", download.filename, download.bytes.len()),
    }
    Ok(())
}

fn output_page<R, F>(payload: Payload, json: bool, to_row: F) -> elorus::Result<()>
where
    R: Tabled,
    F: Fn(&Value) -> R,
{
    let page: Page<Value> = Page::from_payload(payload)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&page.results)?);
    } else {
        let rows: Vec<R> = page.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        if page.has_more() {
            println!("\n{} of {} items (more available)", page.len(), page.count);
        } else {
            println!("\n{} of {} items (end)", page.len(), page.count);
        }
    }
    Ok(())
}

fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ContactRow {
    id: String,
    name: String,
    company: String,
    vat_number: String,
}

impl From<&Value> for ContactRow {
    fn from(c: &Value) -> Self {
        let display_name = text(c, "display_name");
        let name = if display_name.is_empty() {
            format!("{} {}", text(c, "first_name"), text(c, "last_name"))
                .trim()
                .to_string()
        } else {
            display_name
        };
        Self {
            id: text(c, "id"),
            name,
            company: text(c, "company"),
            vat_number: text(c, "vat_number"),
        }
    }
}

#[derive(Tabled)]
struct InvoiceRow {
    id: String,
    number: String,
    date: String,
    client: String,
    total: String,
    status: String,
}

impl From<&Value> for InvoiceRow {
    fn from(i: &Value) -> Self {
        Self {
            id: text(i, "id"),
            number: text(i, "number"),
            date: text(i, "date"),
            client: text(i, "client_display_name"),
            total: text(i, "total"),
            status: text(i, "status"),
        }
    }
}
