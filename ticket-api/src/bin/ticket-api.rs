use std::str::FromStr;
use std::time::Duration;

use database::{DocumentCollection, MemoryCollection, MongoCollection, TicketStore};
use sentry::types::Dsn;
use sentry_tracing::EventFilter;
use ticket_api::http::Server;
use ticket_api::{shutdown_signal, Config, Error, Result, StoreBackend};
use tokio::time::timeout;

use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
pub async fn main() -> Result<()> {
    // loaded before logging is up, reported once it is
    let dotenv = dotenvy::dotenv();

    let config = Config::from_envvar()?;
    let _guard = configure_observability(&config)?;

    if let Err(e) = dotenv {
        warn!(error = %e, "failed to load environment file");
    }

    match config.store_backend {
        StoreBackend::Mongo => {
            let uri = config.mongo_uri.clone().ok_or(Error::MissingMongoUri)?;
            let collection =
                MongoCollection::connect(&uri, &config.mongo_database, &config.mongo_collection)
                    .await?;

            run(config, collection).await
        }
        StoreBackend::Memory => {
            warn!("using the in-memory store, tickets will not survive a restart");
            run(config, MemoryCollection::new()).await
        }
    }
}

async fn run<C: DocumentCollection>(config: Config, collection: C) -> Result<()> {
    let store = TicketStore::new(collection);

    info!("Pinging store");
    timeout(STARTUP_TIMEOUT, store.ping()).await??;

    let shutdown = shutdown_signal()?;

    let server = Server::new(config, store);
    server.start(shutdown).await
}

fn configure_observability(config: &Config) -> Result<sentry::ClientInitGuard> {
    let dsn = match config.sentry_dsn.as_deref() {
        Some(dsn) => Some(Dsn::from_str(dsn)?),
        None => None,
    };

    let guard = sentry::init(sentry::ClientOptions {
        dsn,
        debug: config.debug_mode,
        release: sentry::release_name!(),
        ..Default::default()
    });

    let sentry_layer = sentry_tracing::layer().event_filter(|meta| match meta.level() {
        &tracing::Level::ERROR | &tracing::Level::WARN => EventFilter::Exception,
        _ => EventFilter::Ignore,
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(sentry_layer);

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    Ok(guard)
}
