use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use product_client::{
    load_settings_from, ClientSettings, ProductStore, StoreEvent, SubmitOutcome,
};
use shared::draft::DraftField;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod view;

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "List and add products on a remote catalog")]
struct Args {
    /// Overrides the API base url from settings and environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true, default_value = product_client::config::SETTINGS_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the product list.
    List,
    /// Fetch the list, then submit a new product.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
    },
}

fn build_store(settings: &ClientSettings) -> Result<Arc<ProductStore>> {
    ProductStore::from_settings(settings).with_context(|| {
        format!(
            "failed to build product store for '{}'",
            settings.api_base_url
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config)?;
    if let Some(url) = args.server_url {
        settings.api_base_url = url;
    }
    let store = build_store(&settings)?;
    info!(api = %settings.api_base_url, "product store ready");

    let mut events = store.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                StoreEvent::SubmissionRejected { message } => {
                    warn!(%message, "product was not added")
                }
                other => debug!(event = ?other, "store event"),
            }
        }
    });

    // Mount: the list is always fetched first; a failure still renders.
    let load_result = store.load_products().await;

    let result = match args.command {
        Command::List => load_result.map(|_| ()),
        Command::Add {
            title,
            description,
            price,
        } => {
            store.update_draft_field(DraftField::Title, title).await;
            store
                .update_draft_field(DraftField::Description, description)
                .await;
            store.update_draft_field(DraftField::Price, price).await;
            match store.submit_draft().await {
                Ok(SubmitOutcome::Created(product)) => {
                    println!("Added: {}", view::render_product(&product));
                    println!();
                    Ok(())
                }
                Ok(SubmitOutcome::Rejected { message }) => {
                    println!("Not added: {message}");
                    println!();
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
    };

    print!("{}", view::render(&store.snapshot().await));
    result.map_err(|err| {
        let message = err.user_message();
        anyhow::Error::new(err).context(message)
    })
}
