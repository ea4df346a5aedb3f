//! Webtoon Finder - conversational webtoon recommendations
//!
//! Serves the recommendation API and provides a terminal chat client.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use webtoon_finder::{
    api::build_app,
    catalog::Catalog,
    config::AppConfig,
    context::CatalogContext,
    conversation::{render::render_message, ChatTransport, Conversation, HttpChatClient},
    llm::build_client,
    prompt::SystemPrompt,
    service::{RecommendationService, ServiceState},
};

#[derive(Parser)]
#[command(name = "webtoon-finder")]
#[command(version)]
#[command(about = "Conversational webtoon recommendations grounded in a fixed catalog")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WEBTOON_FINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the recommendation server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Chat in the terminal
    Chat {
        /// Recommendation server URL
        #[arg(long, conflicts_with = "local")]
        server: Option<String>,

        /// Call the model in-process instead of a server
        #[arg(long)]
        local: bool,

        /// Catalog JSON file (with --local)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the assembled system prompt
    Prompt {
        /// Catalog JSON file
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Run diagnostics
    Doctor,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("webtoon_finder={},tower_http=debug", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            catalog,
        } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(catalog) = catalog {
                config.catalog.path = catalog;
            }
            run_server(config).await?;
        }
        Commands::Chat {
            server,
            local,
            catalog,
        } => {
            if let Some(catalog) = catalog {
                config.catalog.path = catalog;
            }
            if local {
                let (service, _) = build_service(&config).await?;
                run_chat(&config, service.as_ref()).await?;
            } else {
                let url = server.unwrap_or_else(|| config.chat.server_url.clone());
                let client = HttpChatClient::new(&url, config.model.request_timeout())?;
                run_chat(&config, &client).await?;
            }
        }
        Commands::Prompt { catalog } => {
            if let Some(catalog) = catalog {
                config.catalog.path = catalog;
            }
            show_prompt(&config).await?;
        }
        Commands::Doctor => {
            run_doctor(&config, cli.config.as_deref()).await;
        }
        Commands::Config { default } => {
            show_config(if default { None } else { Some(&config) })?;
        }
    }

    Ok(())
}

async fn build_service(config: &AppConfig) -> Result<(Arc<RecommendationService>, Arc<Catalog>)> {
    let catalog = Arc::new(Catalog::load(&config.catalog.path).await?);
    let llm = build_client(&config.model)?;
    let service = RecommendationService::from_catalog(&catalog, llm, config.model.temperature)?;
    tracing::info!(
        provider = %config.model.provider,
        model = %config.model.model,
        prompt_chars = service.prompt().as_str().chars().count(),
        "Recommendation service ready"
    );
    Ok((Arc::new(service), catalog))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Starting Webtoon Finder server");

    let (service, catalog) = build_service(&config).await?;
    let app = build_app(ServiceState { service, catalog }, &config.server.cors_origins);

    let addr = config.server.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}. Press Ctrl+C to stop.", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}

async fn run_chat<T: ChatTransport + ?Sized>(config: &AppConfig, transport: &T) -> Result<()> {
    let mut conversation = Conversation::new(&config.chat);
    let mut shown = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        for message in &conversation.messages()[shown..] {
            println!("{}", render_message(message));
        }
        shown = conversation.messages().len();

        let Some(line) = lines.next_line().await? else {
            break;
        };
        conversation.set_input(line);
        if conversation.send(transport).await {
            // the user line is already on screen
            shown += 1;
        }
    }

    Ok(())
}

async fn show_prompt(config: &AppConfig) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path).await?;
    let context = CatalogContext::build(&catalog);
    let prompt = SystemPrompt::from_context(&context)?;
    println!("{}", prompt);
    eprintln!(
        "{} entries, {} chars",
        context.len(),
        prompt.as_str().chars().count()
    );
    Ok(())
}

async fn run_doctor(config: &AppConfig, explicit: Option<&std::path::Path>) {
    println!("Webtoon Finder Doctor");
    println!();

    println!("Checking configuration...");
    match explicit.map(PathBuf::from).or_else(AppConfig::default_path) {
        Some(path) if path.exists() => {
            println!("  ✓ Configuration file found: {}", path.display())
        }
        _ => println!("  ℹ No configuration file found (using defaults)"),
    }

    println!();
    println!("Checking catalog...");
    match Catalog::load(&config.catalog.path).await {
        Ok(catalog) if catalog.is_empty() => {
            println!("  ✗ Catalog is empty: {}", config.catalog.path.display())
        }
        Ok(catalog) => println!(
            "  ✓ {} entries in {}",
            catalog.len(),
            config.catalog.path.display()
        ),
        Err(e) => println!("  ✗ {}", e),
    }

    println!();
    println!("Checking model credentials...");
    if config.model.resolve_api_key().is_some() {
        println!(
            "  ✓ {} key found in ${}",
            config.model.provider, config.model.api_key_ref
        );
    } else {
        println!(
            "  ✗ No API key in ${} (or ${})",
            config.model.api_key_ref,
            config.model.api_key_ref.to_uppercase()
        );
    }

    println!();
    println!("Doctor check complete!");
}

fn show_config(config: Option<&AppConfig>) -> Result<()> {
    let config = config.cloned().unwrap_or_default();
    println!("{}", config.to_toml_string()?);
    Ok(())
}
