use std::sync::Arc;

use jserve::config::{AppState, Config};
use jserve::logger;
use jserve::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;

    // Bind failure is fatal: no retry, the error propagates to the operator.
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::new(cfg)?);
    logger::log_server_start(&addr, &state.config);

    // spawn_local keeps per-connection tasks on the accept thread
    let local = tokio::task::LocalSet::new();
    local.run_until(server::run(listener, state)).await
}
