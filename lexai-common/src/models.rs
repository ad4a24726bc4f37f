//! Model definitions and registry for Gemini embedding and generation models.
//!
//! The settings loader accepts any model identifier; this registry lets
//! callers look up what is known about the configured ones.

use serde::Serialize;

/// Embedding model definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmbeddingModel {
    /// Full model identifier
    pub id: &'static str,
    /// Model aliases for convenience
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    /// Length of the produced embedding vectors
    pub dimensions: usize,
    /// Maximum input tokens per text
    pub input_token_limit: u32,
}

/// Text generation model definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationModel {
    /// Full model identifier
    pub id: &'static str,
    /// Model aliases for convenience
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    /// Maximum input tokens per request
    pub input_token_limit: u32,
    /// Maximum output tokens per response
    pub output_token_limit: u32,
}

// =============================================================================
// Embedding Model Definitions
// =============================================================================

/// Text Embedding 004 (default)
pub const TEXT_EMBEDDING_004: EmbeddingModel = EmbeddingModel {
    id: "text-embedding-004",
    aliases: &["text-embedding", "embedding-004"],
    dimensions: 768,
    input_token_limit: 2048,
};

/// Text Embedding 005
pub const TEXT_EMBEDDING_005: EmbeddingModel = EmbeddingModel {
    id: "text-embedding-005",
    aliases: &["embedding-005"],
    dimensions: 768,
    input_token_limit: 2048,
};

/// Multilingual text embedding model
pub const TEXT_MULTILINGUAL_EMBEDDING_002: EmbeddingModel = EmbeddingModel {
    id: "text-multilingual-embedding-002",
    aliases: &["multilingual-embedding"],
    dimensions: 768,
    input_token_limit: 2048,
};

/// Gemini Embedding 001
pub const GEMINI_EMBEDDING_001: EmbeddingModel = EmbeddingModel {
    id: "gemini-embedding-001",
    aliases: &["gemini-embedding"],
    dimensions: 3072,
    input_token_limit: 2048,
};

/// All known embedding models
pub const EMBEDDING_MODELS: &[EmbeddingModel] = &[
    TEXT_EMBEDDING_004,
    TEXT_EMBEDDING_005,
    TEXT_MULTILINGUAL_EMBEDDING_002,
    GEMINI_EMBEDDING_001,
];

// =============================================================================
// Generation Model Definitions
// =============================================================================

/// Gemini 2.5 Flash Lite (default)
pub const GEMINI_2_5_FLASH_LITE: GenerationModel = GenerationModel {
    id: "gemini-2.5-flash-lite",
    aliases: &["flash-lite", "gemini-flash-lite"],
    input_token_limit: 1_048_576,
    output_token_limit: 65_536,
};

/// Gemini 2.5 Flash
pub const GEMINI_2_5_FLASH: GenerationModel = GenerationModel {
    id: "gemini-2.5-flash",
    aliases: &["flash", "gemini-flash"],
    input_token_limit: 1_048_576,
    output_token_limit: 65_536,
};

/// Gemini 2.5 Pro
pub const GEMINI_2_5_PRO: GenerationModel = GenerationModel {
    id: "gemini-2.5-pro",
    aliases: &["pro", "gemini-pro"],
    input_token_limit: 1_048_576,
    output_token_limit: 65_536,
};

/// Gemini 2.0 Flash
pub const GEMINI_2_0_FLASH: GenerationModel = GenerationModel {
    id: "gemini-2.0-flash",
    aliases: &["gemini-2-flash"],
    input_token_limit: 1_048_576,
    output_token_limit: 8_192,
};

/// All known generation models
pub const GENERATION_MODELS: &[GenerationModel] = &[
    GEMINI_2_5_FLASH_LITE,
    GEMINI_2_5_FLASH,
    GEMINI_2_5_PRO,
    GEMINI_2_0_FLASH,
];

// =============================================================================
// Model Registry
// =============================================================================

/// Model registry for resolution and listing.
pub struct ModelRegistry;

impl ModelRegistry {
    /// Resolve an embedding model name or alias to its definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexai_common::models::ModelRegistry;
    ///
    /// let model = ModelRegistry::resolve_embedding("text-embedding-004").unwrap();
    /// assert_eq!(model.dimensions, 768);
    ///
    /// let model = ModelRegistry::resolve_embedding("gemini-embedding").unwrap();
    /// assert_eq!(model.id, "gemini-embedding-001");
    /// ```
    pub fn resolve_embedding(name: &str) -> Option<&'static EmbeddingModel> {
        EMBEDDING_MODELS
            .iter()
            .find(|model| model.id == name || model.aliases.contains(&name))
    }

    /// Resolve a generation model name or alias to its definition.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexai_common::models::ModelRegistry;
    ///
    /// assert!(ModelRegistry::resolve_generation("gemini-2.5-flash-lite").is_some());
    /// assert!(ModelRegistry::resolve_generation("flash-lite").is_some());
    /// assert!(ModelRegistry::resolve_generation("gpt-4").is_none());
    /// ```
    pub fn resolve_generation(name: &str) -> Option<&'static GenerationModel> {
        GENERATION_MODELS
            .iter()
            .find(|model| model.id == name || model.aliases.contains(&name))
    }

    /// List all known embedding models.
    pub fn list_embedding_models() -> &'static [EmbeddingModel] {
        EMBEDDING_MODELS
    }

    /// List all known generation models.
    pub fn list_generation_models() -> &'static [GenerationModel] {
        GENERATION_MODELS
    }
}
