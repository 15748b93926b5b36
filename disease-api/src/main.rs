use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod adapters;
mod app_state;
mod config;
mod domain;
mod factory;
mod router;
mod routes;

pub use app_state::AppState;

#[derive(Debug, Parser)]
#[command(name = "disease-api")]
#[command(about = "Disease lookup backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Run a one-off data migration against the configured store
    Migrate {
        #[command(subcommand)]
        job: MigrationJob,
    },
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum MigrationJob {
    /// Fill in the derived symptoms text on records missing it
    BackfillSymptomsText,
    /// Convert legacy medicine name lists to structured medicines
    FixMedicines,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,disease_api=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = config::read_config().context("failed to read configuration")?;
    tracing::debug!(backend = %settings.storage.backend, "Configuration loaded");

    let app_state = factory::create_app_state(&settings).await?;

    match cli.command {
        Commands::Serve => serve(app_state, &settings).await,
        Commands::Migrate { job } => migrate(app_state, job).await,
    }
}

async fn serve(app_state: AppState, settings: &config::Settings) -> anyhow::Result<()> {
    let app = router::create(app_state, &settings.application);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, app).await.context("server error")
}

async fn migrate(app_state: AppState, job: MigrationJob) -> anyhow::Result<()> {
    let report = match job {
        MigrationJob::BackfillSymptomsText => {
            serde_json::to_value(app_state.migration_service.backfill_symptoms_text().await?)?
        }
        MigrationJob::FixMedicines => {
            serde_json::to_value(app_state.migration_service.fix_medicines().await?)?
        }
    };

    println!("{report}");
    Ok(())
}
