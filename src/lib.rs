pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod init;
pub mod library;
pub mod llm;
pub mod models;
pub mod services;

pub use error::MuseError;
