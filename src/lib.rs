//! Kotoba: English to Japanese translation lookup service.
//!
//! Serves [`kotoba_translate::lookup`] over HTTP:
//! - **Config**: TOML file with server and translate sections
//! - **Server**: axum router exposing `GET /translate` and `GET /healthz`
//! - **Cache**: optional in-memory TTL cache of ranked results

pub mod cache;
pub mod config;
pub mod error;
pub mod server;

pub use config::{AppConfig, ServerConfig};
pub use error::{AppError, Result};
pub use server::{TranslateResponse, TranslateServer};
