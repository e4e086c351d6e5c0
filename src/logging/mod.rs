//! Logging infrastructure for console output on stderr.

mod logger;
mod subscriber;

pub use logger::Logger;
pub use subscriber::init_subscriber;
