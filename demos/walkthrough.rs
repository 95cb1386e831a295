//! Walkthrough of the contact book
//!
//! Boots the REST API in-process over an in-memory SQLite store, then drives
//! the screen controller and components the way a user session would:
//! add, search, edit, a rejected duplicate, and delete.

use contacts_client::{ContactBook, ContactForm, Field, Notice, NoticeLevel, render_screen};
use contacts_core::config::{ClientConfig, ServerConfig};
use contacts_core::{ContactStore, SqliteContactStore};
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn print_screen(title: &str, book: &ContactBook) {
    println!("--- {} ---", title);
    for line in render_screen(&book.snapshot()) {
        println!("{}", line);
    }
    println!();
}

async fn print_notice(notices: &mut ReceiverStream<Notice>) {
    if let Ok(Some(notice)) = tokio::time::timeout(Duration::from_secs(1), notices.next()).await {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        println!("[{}] {}\n", tag, notice.message);
    }
}

/// Fill and submit the form currently opened on `book`
async fn submit_form(book: &ContactBook, values: &[(Field, &str)]) -> anyhow::Result<bool> {
    let mut form = ContactForm::new();
    form.sync(&book.snapshot());
    println!("{}", form.render().join("\n"));

    for (field, value) in values {
        form.set(*field, *value);
    }

    let mut request = None;
    form.submit(|r| request = Some(r))?;
    match request {
        Some(request) => Ok(book.save(request).await),
        None => Ok(false),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::WARN).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Contact Book Walkthrough ===\n");

    let store: Arc<dyn ContactStore> = Arc::new(SqliteContactStore::in_memory().await?);
    let app = contacts_api::router(store.clone(), &ServerConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(contacts_api::serve(listener, app, async move {
        let _ = shutdown_rx.await;
    }));
    println!("API listening on http://{}/api\n", addr);

    let config = ClientConfig {
        api_base_url: format!("http://{}/api", addr),
        ..ClientConfig::default()
    };
    let (book, mut notices) = ContactBook::connect(&config)?;

    book.load().await;
    print_screen("Empty book", &book);

    book.open_create();
    submit_form(
        &book,
        &[
            (Field::FirstName, "Ada"),
            (Field::LastName, "Lovelace"),
            (Field::Phone, "555-0100"),
            (Field::Email, "ada@example.com"),
        ],
    )
    .await?;
    print_notice(&mut notices).await;

    book.open_create();
    submit_form(
        &book,
        &[
            (Field::FirstName, "Grace"),
            (Field::LastName, "Hopper"),
            (Field::Phone, "555-0102"),
            (Field::Address, "Arlington, Virginia"),
        ],
    )
    .await?;
    print_notice(&mut notices).await;
    print_screen("After adding two contacts", &book);

    // Typing "l", "lo", "lov" quickly triggers one fetch for "lov"
    for text in ["l", "lo", "lov"] {
        book.set_search_text(text);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(config.search_debounce() + Duration::from_millis(100)).await;
    print_screen("Searching \"lov\"", &book);

    if let Some(ada) = book.snapshot().contacts.first().cloned() {
        book.open_edit(ada);
        submit_form(&book, &[(Field::Address, "12 St James's Square, London")]).await?;
        print_notice(&mut notices).await;
    }

    book.open_create();
    submit_form(
        &book,
        &[(Field::FirstName, "Augusta"), (Field::Phone, "555-0100")],
    )
    .await?;
    print_notice(&mut notices).await;

    book.set_search_text("");
    tokio::time::sleep(config.search_debounce() + Duration::from_millis(100)).await;
    if let Some(grace) = book
        .snapshot()
        .contacts
        .iter()
        .find(|c| c.first_name == "Grace")
        .cloned()
    {
        book.delete(grace.id).await;
        print_notice(&mut notices).await;
    }
    print_screen("Final state", &book);

    println!("Store holds {} contact(s)", store.count().await?);

    let _ = shutdown_tx.send(());
    server.await??;
    Ok(())
}
