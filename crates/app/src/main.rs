use engine::{Engine, FilePersistence, Persistence};
use error::AppError;
use settings::Settings;

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    if let Err(err) = run(settings).await {
        tracing::error!("{err}");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: Settings) -> Result<(), AppError> {
    let persistence = match &settings.persistence {
        settings::Persistence::Memory => {
            tracing::warn!("Using in-memory persistence, nothing will survive a restart");
            Persistence::default()
        }
        settings::Persistence::File { path } => {
            tracing::info!("Using event log at {path}");
            Persistence::from(FilePersistence::open(path)?)
        }
    };

    let engine = Engine::builder().persistence(persistence).build().await?;

    let listener = tokio::net::TcpListener::bind(settings.server.address()).await?;
    server::run_with_listener(engine, listener).await?;
    Ok(())
}
