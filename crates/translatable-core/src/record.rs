use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Polymorphic reference to the entity that owns a set of translations.
///
/// `kind` names the entity type (e.g. "post"), `id` is its identifier within
/// that type. Together they form the owner part of the store key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OwnerRef {
    pub kind: String,
    pub id: String,
}

impl OwnerRef {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A stored translation for one (owner, field, language) triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    pub id: String,
    pub owner: OwnerRef,
    /// Name of the translatable field (e.g. "title").
    pub field: String,
    /// Language code (e.g. "en", "ru").
    pub language: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TranslationRecord {
    /// Whether this record was written strictly after `instant`.
    pub fn is_fresher_than(&self, instant: DateTime<Utc>) -> bool {
        self.updated_at > instant
    }
}

/// All translations of one owner in a single language.
///
/// Serializes flat: `{"language": "en", "title": "...", "body": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageTranslations {
    pub language: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl LanguageTranslations {
    /// Value of `field` in this language, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}
