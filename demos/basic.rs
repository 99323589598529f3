//! Basic example demonstrating the Elorus API client.
//!
//! Run with:
//! ```
//! ELORUS_API_KEY=your-key ELORUS_ORGANIZATION_ID=your-org ELORUS_DEMO=1 cargo run --example basic
//! ```

use elorus::{ContactListQuery, ElorusClient, InvoiceListQuery, Page};
use serde_json::Value;

#[tokio::main]
async fn main() -> elorus::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Elorus client...");
    let client = ElorusClient::from_env()?;
    println!(
        "Connected to: {}{} (organization {})",
        client.base_url(),
        client.api_version(),
        client.credentials().organization_id()
    );

    // List first page of contacts
    println!("\n--- Listing Contacts (first page) ---");
    let query = ContactListQuery {
        page_size: Some(10),
        ..Default::default()
    };
    let contacts: Page<Value> = Page::from_payload(client.contacts().list(&query).await?)?;
    println!("Found {} contacts (total: {})", contacts.len(), contacts.count);

    for contact in &contacts {
        println!("  - {} ({})", text(contact, "display_name"), text(contact, "id"));
    }

    // List recent invoices
    println!("\n--- Listing Invoices (first page) ---");
    let query = InvoiceListQuery {
        ordering: Some("-date".to_string()),
        page_size: Some(10),
        ..Default::default()
    };
    let invoices: Page<Value> = Page::from_payload(client.invoices().list(&query).await?)?;
    println!("Found {} invoices (total: {})", invoices.len(), invoices.count);

    for invoice in &invoices {
        println!(
            "  - {} {} {} [{}]",
            text(invoice, "number"),
            text(invoice, "date"),
            text(invoice, "total"),
            text(invoice, "status")
        );
    }

    // Download the PDF of the most recent invoice
    if let Some(first) = invoices.results.first() {
        let id = text(first, "id");

        println!("\n--- Invoice Email Status ---");
        let status = client.invoices().get_email(&id).await?;
        println!("{}", status.as_json().cloned().unwrap_or_default());

        println!("\n--- Downloading PDF ---");
        if let Some(download) = client.invoices().get_pdf(&id).await?.into_download() {
            let path = download.save_to(std::env::temp_dir())?;
            println!("Saved {} bytes to {}", download.bytes.len(), path.display());
        }
    }

    println!("\nDone!");
    Ok(())
}

fn text(record: &Value, key: &str) -> String {
    match &record[key] {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
