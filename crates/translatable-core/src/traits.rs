use crate::{
    error::TranslatableError,
    record::{OwnerRef, TranslationRecord},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// An entity whose fields can be translated.
///
/// Implemented by the host application's business objects. Only the owner
/// reference and field access are required; timestamps and the default
/// language are optional capabilities.
pub trait Translatable: Send + Sync {
    /// Reference under which this entity's translations are stored.
    fn owner_ref(&self) -> OwnerRef;

    /// Current source-language value of `field`, or `None` if the entity has
    /// no such field.
    fn field_value(&self, field: &str) -> Option<String>;

    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Language consulted when the requested one has no translation.
    fn default_language(&self) -> Option<&str> {
        None
    }

    /// Effective last edit: `updated_at`, else `created_at`, else the
    /// earliest representable instant.
    fn last_modified(&self) -> DateTime<Utc> {
        self.updated_at()
            .or_else(|| self.created_at())
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Durable translation record storage, keyed by (owner, field, language).
///
/// At most one record exists per (owner, field, language); `upsert` must be
/// atomic so a failed write never leaves a partial record.
#[async_trait]
pub trait TranslationStore: Send + Sync {
    async fn find(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
    ) -> Result<Option<TranslationRecord>, TranslatableError>;

    /// Create the record, or overwrite `value` and `updated_at` if it exists.
    async fn upsert(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
        value: &str,
    ) -> Result<TranslationRecord, TranslatableError>;

    /// Delete the matching record. Returns the number of rows removed (0 or 1).
    async fn delete_matching(
        &self,
        owner: &OwnerRef,
        field: &str,
        language: &str,
    ) -> Result<u64, TranslatableError>;

    /// All records of an owner, in no particular order.
    async fn list_all(&self, owner: &OwnerRef) -> Result<Vec<TranslationRecord>, TranslatableError>;

    /// Delete every record of an owner. Returns the number of rows removed.
    async fn delete_owner(&self, owner: &OwnerRef) -> Result<u64, TranslatableError>;
}

/// Produces a translation for arbitrary source text.
///
/// Every backend (OpenAI, Ollama, etc.) implements this trait. Failures are
/// reported as [`TranslatableError::TranslationService`] and never retried by
/// the caller.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable translator name.
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`.
    async fn produce(&self, text: &str, target_language: &str)
        -> Result<String, TranslatableError>;

    /// Check if the translator is reachable and configured.
    async fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    struct Post {
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    }

    impl Translatable for Post {
        fn owner_ref(&self) -> OwnerRef {
            OwnerRef::new("post", "1")
        }

        fn field_value(&self, _field: &str) -> Option<String> {
            None
        }

        fn created_at(&self) -> Option<DateTime<Utc>> {
            self.created_at
        }

        fn updated_at(&self) -> Option<DateTime<Utc>> {
            self.updated_at
        }
    }

    #[test]
    fn test_last_modified_prefers_updated_at() {
        let created = Utc::now() - Duration::hours(2);
        let updated = Utc::now();
        let post = Post {
            created_at: Some(created),
            updated_at: Some(updated),
        };
        assert_eq!(post.last_modified(), updated);
    }

    #[test]
    fn test_last_modified_falls_back_to_created_at() {
        let created = Utc::now();
        let post = Post {
            created_at: Some(created),
            updated_at: None,
        };
        assert_eq!(post.last_modified(), created);
    }

    #[test]
    fn test_last_modified_without_timestamps_is_min() {
        let post = Post {
            created_at: None,
            updated_at: None,
        };
        assert_eq!(post.last_modified(), DateTime::<Utc>::MIN_UTC);
        assert!(post.default_language().is_none());
    }
}
