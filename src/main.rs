use std::sync::Arc;

use responder::config::Config;
use responder::server::{self, AppState};
use responder::{logger, response};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;
    logger::init(&cfg)?;

    // Size the Tokio runtime from the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let responder = response::configure_with(response::Responder::from_config(&cfg));
    let state = Arc::new(AppState::new(&cfg, responder));

    logger::log_server_start(&addr, &cfg);

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, peer_addr)) => {
                    server::handle_connection(stream, peer_addr, Arc::clone(&state));
                }
                Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
            },
            _ = tokio::signal::ctrl_c() => {
                logger::log_info("Shutdown requested, no longer accepting connections");
                return Ok(());
            }
        }
    }
}
