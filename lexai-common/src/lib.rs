//! LexAI Common Library
//!
//! Deployment settings for the LexAI document services: loading them from
//! the environment, seeding the environment from a local `.env` file, and the
//! values derived from them (Document AI and Gemini endpoints, Cloud Storage
//! object addresses, model metadata).
//!
//! ```no_run
//! use lexai_common::{Settings, dotenv::load_dotenv};
//!
//! fn main() -> anyhow::Result<()> {
//!     load_dotenv()?;
//!     let settings = Settings::from_env()?;
//!     settings.validate()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dotenv;
pub mod error;
pub mod gcs;
pub mod models;
pub mod tracing;

#[cfg(test)]
mod test_util;

pub use config::Settings;
pub use error::{ConfigError, Error, GcsError, Result};
