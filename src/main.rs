use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod model;
mod routing;
mod server;
mod store;
mod views;

use config::{AppState, Config};
use store::StudentStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        logger::log_info(&format!("Using {workers} worker threads"));
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    // The store is opened once and lives for the whole process
    let students = match StudentStore::open(cfg.database.collection_path()).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            logger::log_error(&format!("Cannot open student collection: {e}"));
            return Err(e.into());
        }
    };

    let listener = server::create_reusable_listener(addr)?;
    let state = Arc::new(AppState::new(cfg, students));
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    // Connections are served as local tasks, so handlers need not be Send
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(listener, state, shutdown))
        .await
}
