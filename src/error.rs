//! Error handling and custom error types
//!
//! Only `Input` and `Encoding` ever escape a pipeline run; remote failures are
//! absorbed by the stages and turned into diagnostic text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No image provided")]
    Input,

    #[error("Image encoding error: {0}")]
    Encoding(#[from] image::ImageError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
