//! newswire command-line interface.
//!
//! One binary, three subcommands: `serve` runs the API server, `post`
//! submits a post through the API client, and `create-db` prepares the
//! database schema.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use url::Url;

use newswire::client::ApiClient;
use newswire::config::{load_config, ServerConfig};
use newswire::http::HttpServer;
use newswire::lifecycle::Shutdown;
use newswire::model::Post;
use newswire::observability::{logging, metrics};
use newswire::routing::names;
use newswire::store::PgStore;

#[derive(Parser)]
#[command(name = "newswire")]
#[command(about = "newswire is a web news and link server", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server that serves the API
    Serve {
        /// Override the configured HTTP bind address
        #[arg(long)]
        http: Option<String>,
    },
    /// Submit a post
    Post {
        /// Title of the post
        #[arg(long)]
        title: String,

        /// Link URL
        #[arg(long)]
        link: String,

        /// Body of the post
        #[arg(long, default_value = "")]
        body: String,

        /// Base URL of the newswire API
        #[arg(long, default_value = "http://localhost:5000/api/")]
        api: Url,
    },
    /// Create the database tables and indexes
    CreateDb,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    match cli.command {
        Commands::Serve { http } => serve(config, http).await,
        Commands::Post {
            title,
            link,
            body,
            api,
        } => post(title, link, body, api).await,
        Commands::CreateDb => create_db(config).await,
    }
}

async fn serve(mut config: ServerConfig, http_override: Option<String>) -> Result<(), Box<dyn Error>> {
    if let Some(addr) = http_override {
        config.listener.bind_address = addr;
    }

    logging::init(&config.observability.log_level);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(PgStore::connect(&config.database).await?);
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, store);
    server.run(listener, server_shutdown).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn post(title: String, link: String, body: String, api: Url) -> Result<(), Box<dyn Error>> {
    if title.is_empty() {
        return Err(r#"title must not be empty; see "newswire post --help""#.into());
    }
    if link.is_empty() {
        return Err(r#"link must not be empty; see "newswire post --help""#.into());
    }

    let client = ApiClient::new(api);
    let mut post = Post {
        title,
        link_url: link,
        body,
        ..Post::default()
    };
    client.posts().create(&mut post).await?;

    // Print where the created post can be fetched.
    let url = client.url_for(names::POST, &[("ID", post.id.to_string())])?;
    println!("{url}");
    Ok(())
}

async fn create_db(config: ServerConfig) -> Result<(), Box<dyn Error>> {
    let store = PgStore::connect(&config.database).await?;
    store.create_schema().await?;
    println!("database schema created");
    Ok(())
}
