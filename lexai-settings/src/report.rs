//! Human- and machine-readable views of the resolved settings.
//!
//! The Gemini API key is reported only as set or not set.

use std::fmt::Write as _;
use std::path::Path;

use lexai_common::Settings;
use lexai_common::config::{
    BUCKET_NAME_VAR, EMBEDDING_MODEL_ID_VAR, GEMINI_API_KEY_VAR, GENERATION_MODEL_ID_VAR,
    PROCESSOR_ID_VAR, PROCESSOR_LOCATION_VAR, PROJECT_ID_VAR,
};
use serde::Serialize;

use crate::args::OutputFormat;

const NOT_SET: &str = "(not set)";

/// Snapshot of a [`Settings`] value that is safe to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsReport {
    /// `.env` file that seeded the environment, if any
    pub env_file: Option<String>,
    pub project_id: Option<String>,
    pub bucket_name: Option<String>,
    pub processor_id: Option<String>,
    pub processor_location: Option<String>,
    pub embedding_model_id: String,
    pub generation_model_id: String,
    pub gemini_api_key_set: bool,
    /// Vector length of the embedding model, when it is a known one
    pub embedding_dimensions: Option<usize>,
    /// Only present when every field it needs is set
    pub document_ai_endpoint: Option<String>,
    pub missing_required: Vec<String>,
}

impl SettingsReport {
    /// Build a report from loaded settings.
    pub fn new(settings: &Settings, env_file: Option<&Path>) -> Self {
        Self {
            env_file: env_file.map(|p| p.display().to_string()),
            project_id: settings.project_id().map(str::to_string),
            bucket_name: settings.bucket_name().map(str::to_string),
            processor_id: settings.processor_id().map(str::to_string),
            processor_location: settings.processor_location().map(str::to_string),
            embedding_model_id: settings.embedding_model_id().to_string(),
            generation_model_id: settings.generation_model_id().to_string(),
            gemini_api_key_set: settings.gemini_api_key().is_some(),
            embedding_dimensions: settings.embedding_model().map(|m| m.dimensions),
            document_ai_endpoint: settings.document_ai_endpoint().ok(),
            missing_required: settings
                .missing_required()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Render in the requested format.
    ///
    /// # Errors
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    fn to_text(&self) -> String {
        let rows: [(&str, &str); 7] = [
            (PROJECT_ID_VAR, self.project_id.as_deref().unwrap_or(NOT_SET)),
            (BUCKET_NAME_VAR, self.bucket_name.as_deref().unwrap_or(NOT_SET)),
            (PROCESSOR_ID_VAR, self.processor_id.as_deref().unwrap_or(NOT_SET)),
            (
                PROCESSOR_LOCATION_VAR,
                self.processor_location.as_deref().unwrap_or(NOT_SET),
            ),
            (EMBEDDING_MODEL_ID_VAR, self.embedding_model_id.as_str()),
            (GENERATION_MODEL_ID_VAR, self.generation_model_id.as_str()),
            (
                GEMINI_API_KEY_VAR,
                if self.gemini_api_key_set { "(set)" } else { NOT_SET },
            ),
        ];

        let mut out = String::new();
        if let Some(path) = &self.env_file {
            let _ = writeln!(out, "# loaded from {}", path);
        }
        for (name, value) in rows {
            let _ = writeln!(out, "{:<21}{}", name, value);
        }
        if !self.missing_required.is_empty() {
            let _ = writeln!(
                out,
                "\nmissing required: {}",
                self.missing_required.join(", ")
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn test_report_of_complete_settings() {
        let report = SettingsReport::new(
            &settings(&[
                ("PROJECT_ID", "proj-1"),
                ("BUCKET_NAME", "bkt-1"),
                ("PROCESSOR_ID", "doc-ai-1"),
                ("PROCESSOR_LOCATION", "us"),
            ]),
            None,
        );

        assert!(report.missing_required.is_empty());
        assert_eq!(report.embedding_dimensions, Some(768));
        assert_eq!(
            report.document_ai_endpoint.as_deref(),
            Some("https://us-documentai.googleapis.com/v1/projects/proj-1/locations/us/processors/doc-ai-1:process")
        );
    }

    #[test]
    fn test_text_marks_missing_values() {
        let report = SettingsReport::new(&settings(&[("PROJECT_ID", "proj-1")]), None);
        let text = report.render(OutputFormat::Text).unwrap();

        assert!(text.contains("PROJECT_ID           proj-1\n"));
        assert!(text.contains("BUCKET_NAME          (not set)\n"));
        assert!(text.contains("GEMINI_API_KEY       (not set)\n"));
        assert!(text.contains("missing required: BUCKET_NAME, PROCESSOR_ID, PROCESSOR_LOCATION"));
    }

    #[test]
    fn test_text_names_env_file() {
        let report = SettingsReport::new(&settings(&[]), Some(Path::new("/srv/app/.env")));
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.starts_with("# loaded from /srv/app/.env\n"));
    }

    #[test]
    fn test_api_key_is_never_rendered() {
        let report = SettingsReport::new(&settings(&[("GEMINI_API_KEY", "AIza-secret")]), None);

        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("GEMINI_API_KEY       (set)\n"));
        assert!(!text.contains("AIza-secret"));

        let json = report.render(OutputFormat::Json).unwrap();
        assert!(!json.contains("AIza-secret"));
    }

    #[test]
    fn test_json_fields() {
        let report = SettingsReport::new(&settings(&[("BUCKET_NAME", "bkt-1")]), None);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();

        assert_eq!(json["bucket_name"], "bkt-1");
        assert!(json["project_id"].is_null());
        assert_eq!(json["embedding_model_id"], "text-embedding-004");
        assert_eq!(json["generation_model_id"], "gemini-2.5-flash-lite");
        assert_eq!(json["gemini_api_key_set"], false);
        assert!(json["document_ai_endpoint"].is_null());
        assert_eq!(json["missing_required"].as_array().unwrap().len(), 3);
    }
}
