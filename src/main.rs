use std::process::ExitCode;
use std::sync::Arc;

use spa_server::app::AppState;
use spa_server::assets::AssetTree;
use spa_server::config::Config;
use spa_server::{logger, server};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&format!("Fatal: {e}"));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Create Tokio runtime, sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let tree = Arc::new(AssetTree::from_embedded()?);
    if tree.root_document().is_none() {
        logger::log_warning("index.html is missing from the bundle; every request will 404");
    }

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr, cfg.server.backlog)
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    logger::log_server_start(&addr, &cfg, tree.len());

    let state = Arc::new(AppState::new(cfg, tree));
    server::run(listener, state, server::shutdown_signal()).await;
    Ok(())
}
