use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use rootstat::{Config, SharedConfig};
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_init();

    let mut first_args = std::env::args().take(2);
    let (program_name, config_file) = (
        first_args.next().unwrap_or("rootstat".to_string()),
        first_args.next(),
    );

    let config = config_init(&program_name, config_file)?;
    let report_store = config.report_store();
    let record_cache = config.record_cache().await?;

    if std::io::stdout().is_terminal() {
        println!("{}", rootstat::banner::ROOTS);
    }

    tracing::info!("reading RSSAC002 reports from {}", &config.data_root);
    tracing::info!("API listening on {}", &config.api_bind_addr);
    let api_server = rootstat::api::new(config, report_store, record_cache);
    let api_handle = tokio::spawn(api_server);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("quitting from signal");
        },
        Ok(api_res) = api_handle => {
            if let Err(err) = api_res {
                return Err(err.into())
            }
        }
    }
    tracing::info!("goodbye");
    Ok(())
}

fn tracing_init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rootstat=info".into()),
        )
        .init();
}

fn config_init(program_name: &str, config_file: Option<String>) -> Result<SharedConfig> {
    match config_file {
        None => Err(anyhow!("usage: {program_name} /path/to/config.json")),
        Some(config_file) => {
            tracing::debug!("loaded config from {config_file}");
            let config = Config::try_from_file(&config_file)?;
            Ok(Arc::new(config))
        }
    }
}
