use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use hub_counter_feed::entities::{AccessPointsFeedRequest, FeedType};
use hub_counter_feed::{FeedApiConfig, FeedClient};

#[derive(Parser, Debug)]
#[command(
    name = "hub-counter-feed",
    about = "Submit and inspect counter access point feeds",
    after_help = "Credentials and endpoints are read from HUB_COUNTER_* environment variables."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List submitted feeds
    Feeds {
        /// Results per page (max 100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Cursor from a previous page
        #[arg(long)]
        next_offset: Option<String>,

        /// Follow the cursor and list every page
        #[arg(long, conflicts_with = "next_offset")]
        all: bool,
    },

    /// Show one feed
    Feed { feed_id: String },

    /// Show a feed's output document (processing outcome)
    OutputDocument { feed_id: String, document_id: String },

    /// Show a feed's input document (submitted access points)
    InputDocument { feed_id: String, document_id: String },

    /// Submit a feed request from a JSON file
    Submit {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Feed type code: 3P or STORE_FEED
        #[arg(long)]
        feed_type: FeedType,
    },

    /// Validate a feed request file without contacting the API
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_request(file: &Path) -> Result<AccessPointsFeedRequest> {
    AccessPointsFeedRequest::from_json_file(file)
        .with_context(|| format!("Failed to load feed request '{}'", file.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Command::Validate { file } = &args.command {
        let request = load_request(file)?;
        println!("{}: {} access points, valid", file.display(), request.len());
        return Ok(());
    }

    let config = FeedApiConfig::from_env().context("Failed to load configuration")?;
    let client = FeedClient::new(config).context("Failed to create feed client")?;

    // Tokens are short-lived; fetch one per invocation
    let token = client
        .get_access_token()
        .await
        .context("Failed to obtain access token")?;

    match args.command {
        Command::Feeds {
            page_size,
            next_offset,
            all,
        } => {
            if all {
                let feeds = client.get_all_feeds(page_size, &token).await?;
                print_json(&feeds)?;
            } else {
                let page = client
                    .get_feeds(next_offset.as_deref(), page_size, &token)
                    .await?;
                print_json(&page)?;
            }
        }
        Command::Feed { feed_id } => {
            let feed = client.get_feed_by_id(&feed_id, &token).await?;
            print_json(&feed)?;
        }
        Command::OutputDocument {
            feed_id,
            document_id,
        } => {
            let document = client
                .get_output_document(&feed_id, &document_id, &token)
                .await?;
            print_json(&document)?;
        }
        Command::InputDocument {
            feed_id,
            document_id,
        } => {
            let request = client
                .get_input_document(&feed_id, &document_id, &token)
                .await?;
            print_json(&request)?;
        }
        Command::Submit { file, feed_type } => {
            let request = load_request(&file)?;
            let feed_id = client.post_feed(&request, feed_type, &token).await?;
            println!("{feed_id}");
        }
        Command::Validate { .. } => unreachable!("handled before login"),
    }

    Ok(())
}
