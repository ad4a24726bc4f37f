//! Configuration module for loading deployment settings from environment variables.
//!
//! Settings are read once at startup with [`Settings::from_env`] and then
//! passed to whatever needs them. Seeding the environment from a `.env` file
//! is a separate step (see [`crate::dotenv`]) so that callers decide when, and
//! whether, the process environment is touched.

use std::env::VarError;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::gcs::GcsUri;
use crate::models::{EmbeddingModel, GenerationModel, ModelRegistry};

/// Google Cloud project ID.
pub const PROJECT_ID_VAR: &str = "PROJECT_ID";
/// Cloud Storage bucket holding uploaded documents and exports.
pub const BUCKET_NAME_VAR: &str = "BUCKET_NAME";
/// Document AI processor ID.
pub const PROCESSOR_ID_VAR: &str = "PROCESSOR_ID";
/// Document AI processor location (`us`, `eu`, ...).
pub const PROCESSOR_LOCATION_VAR: &str = "PROCESSOR_LOCATION";
/// Embedding model ID.
pub const EMBEDDING_MODEL_ID_VAR: &str = "EMBEDDING_MODEL_ID";
/// Text generation model ID.
pub const GENERATION_MODEL_ID_VAR: &str = "GENERATION_MODEL_ID";
/// Gemini API key.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Variables with no default, expected from the deployment environment.
pub const REQUIRED_VARS: [&str; 4] = [
    PROJECT_ID_VAR,
    BUCKET_NAME_VAR,
    PROCESSOR_ID_VAR,
    PROCESSOR_LOCATION_VAR,
];

/// Used when `EMBEDDING_MODEL_ID` is not set.
pub const DEFAULT_EMBEDDING_MODEL_ID: &str = "text-embedding-004";
/// Used when `GENERATION_MODEL_ID` is not set.
pub const DEFAULT_GENERATION_MODEL_ID: &str = "gemini-2.5-flash-lite";

/// Base URL of the Gemini API.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Deployment settings loaded from environment variables.
///
/// Built once per process and never modified afterwards: there are no
/// setters, only accessors. Required values that were absent at load time
/// are `None`; call [`Settings::validate`] to reject them.
#[derive(Clone)]
pub struct Settings {
    project_id: Option<String>,
    bucket_name: Option<String>,
    processor_id: Option<String>,
    processor_location: Option<String>,
    embedding_model_id: String,
    generation_model_id: String,
    gemini_api_key: Option<SecretString>,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// Missing required variables do not fail loading; they are logged at
    /// `WARN` and left as `None`. The two model IDs fall back to their
    /// defaults only when the variable is absent, not when it is empty.
    ///
    /// This does not read any `.env` file. Call
    /// [`load_dotenv`](crate::dotenv::load_dotenv) first if one should be used.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if a variable is set to a value
    /// that is not valid Unicode.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Self::build(read_env_var)
    }

    /// Load settings from the process environment and require every
    /// required variable to be set.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVars` listing each required variable
    /// that is absent or blank, or any error from [`Settings::from_env`].
    pub fn from_env_strict() -> std::result::Result<Self, ConfigError> {
        let settings = Self::from_env()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Build settings from an arbitrary variable lookup.
    ///
    /// The lookup receives variable names such as `"PROJECT_ID"` and returns
    /// `None` for unset variables. Resolution rules are the same as for
    /// [`Settings::from_env`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use lexai_common::Settings;
    ///
    /// let vars = HashMap::from([("PROJECT_ID", "proj-1"), ("PROCESSOR_LOCATION", "us")]);
    /// let settings = Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
    ///
    /// assert_eq!(settings.project_id(), Some("proj-1"));
    /// assert_eq!(settings.embedding_model_id(), "text-embedding-004");
    /// assert!(settings.validate().is_err());
    /// ```
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        match Self::build(|name| Ok::<_, std::convert::Infallible>(lookup(name))) {
            Ok(settings) => settings,
            Err(never) => match never {},
        }
    }

    fn build<F, E>(mut lookup: F) -> std::result::Result<Self, E>
    where
        F: FnMut(&str) -> std::result::Result<Option<String>, E>,
    {
        let mut required = |name: &str| -> std::result::Result<Option<String>, E> {
            let value = lookup(name)?;
            match &value {
                Some(v) => debug!(var = name, value = %v, "Resolved setting"),
                None => warn!(var = name, "Required environment variable is not set"),
            }
            Ok(value)
        };

        let project_id = required(PROJECT_ID_VAR)?;
        let bucket_name = required(BUCKET_NAME_VAR)?;
        let processor_id = required(PROCESSOR_ID_VAR)?;
        let processor_location = required(PROCESSOR_LOCATION_VAR)?;

        let mut with_default = |name: &str, default: &str| -> std::result::Result<String, E> {
            let value = lookup(name)?;
            let defaulted = value.is_none();
            let value = value.unwrap_or_else(|| default.to_string());
            debug!(var = name, value = %value, defaulted, "Resolved setting");
            Ok(value)
        };

        let embedding_model_id = with_default(EMBEDDING_MODEL_ID_VAR, DEFAULT_EMBEDDING_MODEL_ID)?;
        let generation_model_id =
            with_default(GENERATION_MODEL_ID_VAR, DEFAULT_GENERATION_MODEL_ID)?;

        let gemini_api_key = lookup(GEMINI_API_KEY_VAR)?.map(|v| SecretString::new(v.into()));
        debug!(
            var = GEMINI_API_KEY_VAR,
            configured = gemini_api_key.is_some(),
            "Resolved setting"
        );

        Ok(Self {
            project_id,
            bucket_name,
            processor_id,
            processor_location,
            embedding_model_id,
            generation_model_id,
            gemini_api_key,
        })
    }

    /// Check that every required variable was set to a non-blank value.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVars` naming all offending variables,
    /// in the order of [`REQUIRED_VARS`].
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingEnvVars(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }

    /// Names of required variables that are absent or blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.required_fields()
            .into_iter()
            .filter(|(_, value)| present(*value).is_none())
            .map(|(name, _)| name)
            .collect()
    }

    fn required_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            (PROJECT_ID_VAR, self.project_id()),
            (BUCKET_NAME_VAR, self.bucket_name()),
            (PROCESSOR_ID_VAR, self.processor_id()),
            (PROCESSOR_LOCATION_VAR, self.processor_location()),
        ]
    }

    /// `PROJECT_ID`, if it was set.
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    /// `BUCKET_NAME`, if it was set.
    pub fn bucket_name(&self) -> Option<&str> {
        self.bucket_name.as_deref()
    }

    /// `PROCESSOR_ID`, if it was set.
    pub fn processor_id(&self) -> Option<&str> {
        self.processor_id.as_deref()
    }

    /// `PROCESSOR_LOCATION`, if it was set.
    pub fn processor_location(&self) -> Option<&str> {
        self.processor_location.as_deref()
    }

    /// `EMBEDDING_MODEL_ID`, or `text-embedding-004`.
    pub fn embedding_model_id(&self) -> &str {
        &self.embedding_model_id
    }

    /// `GENERATION_MODEL_ID`, or `gemini-2.5-flash-lite`.
    pub fn generation_model_id(&self) -> &str {
        &self.generation_model_id
    }

    /// `GEMINI_API_KEY`, if it was set.
    pub fn gemini_api_key(&self) -> Option<&SecretString> {
        self.gemini_api_key.as_ref()
    }

    /// `PROJECT_ID`, or an error if it is absent or blank.
    pub fn require_project_id(&self) -> std::result::Result<&str, ConfigError> {
        require(self.project_id(), PROJECT_ID_VAR)
    }

    /// `BUCKET_NAME`, or an error if it is absent or blank.
    pub fn require_bucket_name(&self) -> std::result::Result<&str, ConfigError> {
        require(self.bucket_name(), BUCKET_NAME_VAR)
    }

    /// `PROCESSOR_ID`, or an error if it is absent or blank.
    pub fn require_processor_id(&self) -> std::result::Result<&str, ConfigError> {
        require(self.processor_id(), PROCESSOR_ID_VAR)
    }

    /// `PROCESSOR_LOCATION`, or an error if it is absent or blank.
    pub fn require_processor_location(&self) -> std::result::Result<&str, ConfigError> {
        require(self.processor_location(), PROCESSOR_LOCATION_VAR)
    }

    /// `GEMINI_API_KEY`, or an error if it is absent or blank.
    pub fn require_gemini_api_key(&self) -> std::result::Result<&SecretString, ConfigError> {
        match &self.gemini_api_key {
            Some(key) if !key.expose_secret().trim().is_empty() => Ok(key),
            _ => Err(ConfigError::missing_env_var(GEMINI_API_KEY_VAR)),
        }
    }

    /// Registry entry for the configured embedding model, if it is a known one.
    pub fn embedding_model(&self) -> Option<&'static EmbeddingModel> {
        ModelRegistry::resolve_embedding(&self.embedding_model_id)
    }

    /// Registry entry for the configured generation model, if it is a known one.
    pub fn generation_model(&self) -> Option<&'static GenerationModel> {
        ModelRegistry::resolve_generation(&self.generation_model_id)
    }

    /// Fully qualified Document AI processor resource name.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` for the first of `PROJECT_ID`,
    /// `PROCESSOR_LOCATION` or `PROCESSOR_ID` that is missing.
    pub fn processor_name(&self) -> std::result::Result<String, ConfigError> {
        Ok(format!(
            "projects/{}/locations/{}/processors/{}",
            self.require_project_id()?,
            self.require_processor_location()?,
            self.require_processor_id()?
        ))
    }

    /// Document AI `process` endpoint for the configured processor.
    ///
    /// # Errors
    /// Same as [`Settings::processor_name`].
    pub fn document_ai_endpoint(&self) -> std::result::Result<String, ConfigError> {
        let name = self.processor_name()?;
        Ok(format!(
            "https://{}-documentai.googleapis.com/v1/{}:process",
            self.require_processor_location()?,
            name
        ))
    }

    /// `embedContent` endpoint for the configured embedding model.
    pub fn embed_content_endpoint(&self) -> String {
        gemini_endpoint(&self.embedding_model_id, "embedContent")
    }

    /// `generateContent` endpoint for the configured generation model.
    pub fn generate_content_endpoint(&self) -> String {
        gemini_endpoint(&self.generation_model_id, "generateContent")
    }

    /// Address an object inside the configured bucket.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` if `BUCKET_NAME` is missing, or
    /// `GcsError::InvalidUri` if the object path is empty.
    pub fn object_uri(&self, object: &str) -> Result<GcsUri> {
        let bucket = self.require_bucket_name()?;
        Ok(GcsUri::new(bucket, object)?)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("project_id", &self.project_id)
            .field("bucket_name", &self.bucket_name)
            .field("processor_id", &self.processor_id)
            .field("processor_location", &self.processor_location)
            .field("embedding_model_id", &self.embedding_model_id)
            .field("generation_model_id", &self.generation_model_id)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.project_id == other.project_id
            && self.bucket_name == other.bucket_name
            && self.processor_id == other.processor_id
            && self.processor_location == other.processor_location
            && self.embedding_model_id == other.embedding_model_id
            && self.generation_model_id == other.generation_model_id
            && self.gemini_api_key.as_ref().map(|k| k.expose_secret())
                == other.gemini_api_key.as_ref().map(|k| k.expose_secret())
    }
}

impl Eq for Settings {}

/// Gemini API endpoint for `method` on `model`.
///
/// ```
/// use lexai_common::config::gemini_endpoint;
///
/// assert_eq!(
///     gemini_endpoint("text-embedding-004", "embedContent"),
///     "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004:embedContent"
/// );
/// ```
pub fn gemini_endpoint(model: &str, method: &str) -> String {
    format!("{}/models/{}:{}", GEMINI_API_BASE, model, method)
}

fn read_env_var(name: &str) -> std::result::Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ConfigError::invalid_value(
            name,
            "value is not valid Unicode",
        )),
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn require<'a>(value: Option<&'a str>, name: &str) -> std::result::Result<&'a str, ConfigError> {
    present(value).ok_or_else(|| ConfigError::missing_env_var(name))
}
