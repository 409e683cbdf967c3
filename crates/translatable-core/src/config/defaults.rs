//! Default value functions used by serde for config deserialization.

pub fn default_locale() -> String {
    crate::locale::FALLBACK_LOCALE.to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_store_backend() -> String {
    "sqlite".to_string()
}

pub fn default_db_path() -> String {
    "~/.translatable/data/translations.db".to_string()
}

pub fn default_translator() -> String {
    "openai".to_string()
}

pub fn default_timeout_secs() -> u64 {
    60
}

pub fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

pub fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

pub fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

pub fn default_ollama_model() -> String {
    "llama3".to_string()
}
