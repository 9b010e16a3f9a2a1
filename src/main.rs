use std::process::ExitCode;

use tracing::{error, info};

use modboard::{seed, Config, Database, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = modboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        modboard::logging::init_console_only(&config.logging.level);
    }

    info!("modboard - moderated bulletin board");

    if let Err(e) = run(config).await {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(config: Config) -> modboard::Result<()> {
    config.validate()?;

    let db = Database::open(&config.database.path).await?;
    seed::seed_defaults(&db, &config.seed).await?;

    let server = WebServer::new(&config, db)?;
    info!("Server configured on {}", server.addr());
    server.run().await
}
