use anyhow::Context;
use axum::Router;
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_server::{
    Config, ServiceKind, clicks_router, infra::startup, movies_router, random_movies_router,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "marquee-server")]
#[command(about = "Movie catalog, click tracking and random-movie services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the movie catalog (seeding it on first start)
    Movies(ServeArgs),
    /// Count clicks and publish them to the click queue
    Clicks(ServeArgs),
    /// Serve random movie samples with repaired posters
    RandomMovies(ServeArgs),
}

impl Command {
    fn split(self) -> (ServiceKind, ServeArgs) {
        match self {
            Command::Movies(args) => (ServiceKind::Movies, args),
            Command::Clicks(args) => (ServiceKind::Clicks, args),
            Command::RandomMovies(args) => (ServiceKind::RandomMovies, args),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (service, args) = cli.command.split();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env(service).context("failed to load configuration")?;
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(host) = args.host {
        config.server_host = host;
    }
    config.validate()?;

    if config.env_file_loaded {
        info!("loaded .env file");
    }

    let router = build_router(&config).await?;
    run_server(&config, router).await
}

async fn build_router(config: &Config) -> anyhow::Result<Router> {
    Ok(match config.service {
        ServiceKind::Movies => movies_router(startup::movies_state(config).await?),
        ServiceKind::Clicks => clicks_router(startup::clicks_state(config).await?),
        ServiceKind::RandomMovies => random_movies_router(startup::random_movies_state(config)?),
    })
}

async fn run_server(config: &Config, router: Router) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(service = %config.service, "listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
