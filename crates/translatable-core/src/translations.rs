//! Freshness-aware translation retrieval for translatable entities.
//!
//! [`Translations`] composes a [`TranslationStore`] and a [`Translator`]:
//! reads go to the store, and a translation is regenerated through the
//! translator only when the caller asks for it and the stored one is missing
//! or older than the entity's last edit. Errors from either side are returned
//! unchanged.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::{
    error::TranslatableError,
    locale,
    record::{LanguageTranslations, TranslationRecord},
    traits::{Translatable, TranslationStore, Translator},
};

/// Translation service bound to one store and one translator.
#[derive(Clone)]
pub struct Translations {
    store: Arc<dyn TranslationStore>,
    translator: Arc<dyn Translator>,
}

impl Translations {
    pub fn new(store: Arc<dyn TranslationStore>, translator: Arc<dyn Translator>) -> Self {
        Self { store, translator }
    }

    /// The underlying record store.
    pub fn store(&self) -> &Arc<dyn TranslationStore> {
        &self.store
    }

    /// The translator used to produce missing translations.
    pub fn translator(&self) -> &Arc<dyn Translator> {
        &self.translator
    }

    /// Translate `field` into `language` and store the result.
    ///
    /// With `translation: None` the translator is called with the entity's
    /// current value of `field`; otherwise the given value is stored as-is.
    /// Always overwrites, regardless of freshness.
    pub async fn translate<E>(
        &self,
        entity: &E,
        field: &str,
        language: &str,
        translation: Option<&str>,
    ) -> Result<TranslationRecord, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let value = match translation {
            Some(value) => value.to_string(),
            None => {
                let source = entity
                    .field_value(field)
                    .ok_or_else(|| TranslatableError::MissingField(field.to_string()))?;
                debug!(
                    "translate: {} {field} -> {language} via {}",
                    entity.owner_ref(),
                    self.translator.name()
                );
                self.translator.produce(&source, language).await?
            }
        };

        self.create_translation(entity, field, language, &value).await
    }

    /// Stored translation of `field` in `language`.
    ///
    /// When `create_if_not_fresh` is set and the record is missing or not
    /// strictly newer than the entity's last edit, it is regenerated through
    /// [`translate`](Self::translate) first.
    pub async fn translation<E>(
        &self,
        entity: &E,
        field: &str,
        language: &str,
        create_if_not_fresh: bool,
    ) -> Result<Option<TranslationRecord>, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let owner = entity.owner_ref();
        let record = self.store.find(&owner, field, language).await?;

        if !create_if_not_fresh {
            return Ok(record);
        }

        let last_modified = entity.last_modified();
        match record {
            Some(record) if record.is_fresher_than(last_modified) => Ok(Some(record)),
            stale => {
                debug!(
                    "translation: {owner} {field}/{language} {}, regenerating",
                    if stale.is_some() { "stale" } else { "missing" }
                );
                self.translate(entity, field, language, None).await.map(Some)
            }
        }
    }

    /// Delete the translation of `field` in `language`. Returns the number of
    /// records removed (0 or 1).
    pub async fn delete_translation<E>(
        &self,
        entity: &E,
        field: &str,
        language: &str,
    ) -> Result<u64, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        self.store
            .delete_matching(&entity.owner_ref(), field, language)
            .await
    }

    /// Store `value` as the translation of `field` in `language`.
    pub async fn create_translation<E>(
        &self,
        entity: &E,
        field: &str,
        language: &str,
        value: &str,
    ) -> Result<TranslationRecord, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        self.store
            .upsert(&entity.owner_ref(), field, language, value)
            .await
    }

    /// Every translation record owned by the entity.
    pub async fn translations<E>(&self, entity: &E) -> Result<Vec<TranslationRecord>, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        self.store.list_all(&entity.owner_ref()).await
    }

    /// Remove every translation owned by the entity, e.g. when it is deleted.
    pub async fn delete_all_translations<E>(&self, entity: &E) -> Result<u64, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let owner = entity.owner_ref();
        let removed = self.store.delete_owner(&owner).await?;
        debug!("delete_all_translations: {owner} removed {removed}");
        Ok(removed)
    }

    /// All translations grouped per language.
    pub async fn translations_as_array<E>(
        &self,
        entity: &E,
    ) -> Result<Vec<LanguageTranslations>, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let records = self.translations(entity).await?;
        Ok(group_by_language(records))
    }

    /// Best-effort lookup of a field's translated value.
    ///
    /// `language` defaults to [`locale::current`]. An empty value counts as
    /// missing; the entity's default language is tried next. Never calls the
    /// translator.
    pub async fn translated<E>(
        &self,
        entity: &E,
        field: &str,
        language: Option<&str>,
    ) -> Result<Option<String>, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let language = match language {
            Some(language) => language.to_string(),
            None => locale::current(),
        };

        if let Some(value) = self.non_empty_value(entity, field, &language).await? {
            return Ok(Some(value));
        }

        match entity.default_language() {
            Some(default) if default != language => {
                debug!(
                    "translated: {} {field}/{language} missing, trying {default}",
                    entity.owner_ref()
                );
                self.non_empty_value(entity, field, default).await
            }
            _ => Ok(None),
        }
    }

    async fn non_empty_value<E>(
        &self,
        entity: &E,
        field: &str,
        language: &str,
    ) -> Result<Option<String>, TranslatableError>
    where
        E: Translatable + ?Sized,
    {
        let record = self.translation(entity, field, language, false).await?;
        Ok(record.map(|r| r.value).filter(|v| !v.is_empty()))
    }
}

/// Group records by language, keeping the first value seen per field.
///
/// A field literally named `language` is dropped: the language code owns
/// that key in the exported shape.
pub fn group_by_language(records: Vec<TranslationRecord>) -> Vec<LanguageTranslations> {
    let mut by_language: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();

    for record in records {
        if record.field == "language" {
            debug!(
                "group_by_language: {} has a field named 'language', skipped",
                record.owner
            );
            continue;
        }
        by_language
            .entry(record.language)
            .or_default()
            .entry(record.field)
            .or_insert(record.value);
    }

    by_language
        .into_iter()
        .map(|(language, fields)| LanguageTranslations { language, fields })
        .collect()
}
