// Demo server module
// Listener setup, connection handling and request routing

pub mod connection;
pub mod listener;
pub mod routes;

pub use connection::handle_connection;
pub use listener::create_reusable_listener;
pub use routes::AppState;
