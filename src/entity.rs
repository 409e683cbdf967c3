//! Entity described on the command line.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use translatable_core::{record::OwnerRef, traits::Translatable};

/// An owner identified by `<kind> <id>`, with whatever source fields and
/// timestamps the invocation supplied.
pub struct CliEntity {
    owner: OwnerRef,
    fields: HashMap<String, String>,
    updated_at: Option<DateTime<Utc>>,
    default_language: Option<String>,
}

impl CliEntity {
    pub fn new(kind: &str, id: &str) -> Self {
        Self {
            owner: OwnerRef::new(kind, id),
            fields: HashMap::new(),
            updated_at: None,
            default_language: None,
        }
    }

    /// Set the source-language value of `field`.
    pub fn with_field(mut self, field: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.fields.insert(field.to_string(), value);
        }
        self
    }

    pub fn with_updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn with_default_language(mut self, language: Option<String>) -> Self {
        self.default_language = language;
        self
    }
}

impl Translatable for CliEntity {
    fn owner_ref(&self) -> OwnerRef {
        self.owner.clone()
    }

    fn field_value(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn default_language(&self) -> Option<&str> {
        self.default_language.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_entity_capabilities() {
        let at = Utc::now();
        let entity = CliEntity::new("post", "9")
            .with_field("title", Some("Hello".into()))
            .with_field("body", None)
            .with_updated_at(Some(at))
            .with_default_language(Some("en".into()));

        assert_eq!(entity.owner_ref(), OwnerRef::new("post", "9"));
        assert_eq!(entity.field_value("title").as_deref(), Some("Hello"));
        assert!(entity.field_value("body").is_none());
        assert_eq!(entity.last_modified(), at);
        assert_eq!(entity.default_language(), Some("en"));
    }

    #[test]
    fn test_cli_entity_defaults() {
        let entity = CliEntity::new("post", "9");
        assert_eq!(entity.last_modified(), DateTime::<Utc>::MIN_UTC);
        assert!(entity.default_language().is_none());
    }
}
