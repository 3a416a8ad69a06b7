// Connection handling module
// Serves one accepted TCP connection over HTTP/1.1

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use super::routes::{self, AppState};
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// Headers are written in title case (`Content-Type`, not `content-type`)
/// so names go out exactly as the response builder was given them.
pub fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true).title_case_headers(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let state = Arc::clone(&state);
                async move { routes::handle_request(req, peer_addr, state).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
