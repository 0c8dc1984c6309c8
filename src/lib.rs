pub mod auth;
pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod state;
pub mod store;

pub use board::ClassBoard;
pub use error::{AppError, Result};
