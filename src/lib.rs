//! Image-to-books finder - turns an uploaded picture into a ranked book list
//!
//! An inference service describes the image and distills the description into
//! one keyword; a bibliographic catalog is then searched with that keyword.

pub mod ai;
pub mod catalog;
pub mod error;
pub mod image;
pub mod models;
pub mod pipeline;
pub mod prompts;

pub use error::{Error, Result};
