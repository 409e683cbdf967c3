use thiserror::Error;

/// Top-level error type for Translatable.
#[derive(Debug, Error)]
pub enum TranslatableError {
    /// Record store I/O or constraint failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Error from the translation-producing service.
    #[error("translation service error: {0}")]
    TranslationService(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The entity does not expose a source value for this field.
    #[error("entity has no translatable field '{0}'")]
    MissingField(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
