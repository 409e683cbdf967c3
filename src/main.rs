mod entity;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use entity::CliEntity;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use translatable_core::{
    config, locale,
    traits::{TranslationStore, Translator},
    Translations,
};
use translatable_providers::{OllamaTranslator, OpenAiTranslator};
use translatable_store::Store;

#[derive(Parser)]
#[command(
    name = "translatable",
    version,
    about = "Per-field, per-language translations for any entity"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

/// The entity a command operates on.
#[derive(Args)]
struct Owner {
    /// Entity type (e.g. "post").
    kind: String,
    /// Entity identifier.
    id: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show configuration, store location, and translator availability.
    Status,
    /// Store an explicit translation.
    Set {
        #[command(flatten)]
        owner: Owner,
        field: String,
        language: String,
        value: String,
    },
    /// Translate a field with the configured translator and store the result.
    Translate {
        #[command(flatten)]
        owner: Owner,
        field: String,
        language: String,
        /// Source-language text of the field.
        #[arg(long)]
        text: String,
    },
    /// Return the stored translation, regenerating it if missing or older
    /// than the entity's last edit.
    Refresh {
        #[command(flatten)]
        owner: Owner,
        field: String,
        language: String,
        /// Source-language text of the field.
        #[arg(long)]
        text: String,
        /// When the entity was last edited (RFC 3339).
        #[arg(long)]
        updated_at: Option<String>,
    },
    /// Print a field's translated value, falling back to a default language.
    Get {
        #[command(flatten)]
        owner: Owner,
        field: String,
        /// Language to look up (defaults to the configured locale).
        #[arg(short, long)]
        language: Option<String>,
        /// Language consulted when the requested one has no value.
        #[arg(short, long)]
        default_language: Option<String>,
    },
    /// Print every translation of an entity as JSON, one object per language.
    Export {
        #[command(flatten)]
        owner: Owner,
    },
    /// Delete one translation.
    Delete {
        #[command(flatten)]
        owner: Owner,
        field: String,
        language: String,
    },
    /// Delete every translation of an entity.
    Purge {
        #[command(flatten)]
        owner: Owner,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.translatable.log_level)),
        )
        .init();

    locale::set_current(&cfg.translatable.default_locale);

    match cli.command {
        Commands::Status => status(&cli.config, &cfg).await?,
        Commands::Set {
            owner,
            field,
            language,
            value,
        } => {
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id);
            let record = translations
                .create_translation(&entity, &field, &language, &value)
                .await?;
            println!("{}", record.value);
        }
        Commands::Translate {
            owner,
            field,
            language,
            text,
        } => {
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id).with_field(&field, Some(text));
            let record = translations
                .translate(&entity, &field, &language, None)
                .await?;
            println!("{}", record.value);
        }
        Commands::Refresh {
            owner,
            field,
            language,
            text,
            updated_at,
        } => {
            let updated_at = updated_at.as_deref().map(parse_timestamp).transpose()?;
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id)
                .with_field(&field, Some(text))
                .with_updated_at(updated_at);
            match translations
                .translation(&entity, &field, &language, true)
                .await?
            {
                Some(record) => println!("{}", record.value),
                None => anyhow::bail!("no translation produced for {field}/{language}"),
            }
        }
        Commands::Get {
            owner,
            field,
            language,
            default_language,
        } => {
            let translations = open(&cfg).await?;
            let entity =
                CliEntity::new(&owner.kind, &owner.id).with_default_language(default_language);
            match translations
                .translated(&entity, &field, language.as_deref())
                .await?
            {
                Some(value) => println!("{value}"),
                None => anyhow::bail!(
                    "no translation of '{field}' for {}:{}",
                    owner.kind,
                    owner.id
                ),
            }
        }
        Commands::Export { owner } => {
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id);
            let exported = translations.translations_as_array(&entity).await?;
            println!("{}", serde_json::to_string_pretty(&exported)?);
        }
        Commands::Delete {
            owner,
            field,
            language,
        } => {
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id);
            let removed = translations
                .delete_translation(&entity, &field, &language)
                .await?;
            println!("{removed}");
        }
        Commands::Purge { owner } => {
            let translations = open(&cfg).await?;
            let entity = CliEntity::new(&owner.kind, &owner.id);
            let removed = translations.delete_all_translations(&entity).await?;
            println!("{removed}");
        }
    }

    Ok(())
}

/// Open the store and wire it to the configured translator.
async fn open(cfg: &config::Config) -> anyhow::Result<Translations> {
    let translator = build_translator(cfg)?;
    let store: Arc<dyn TranslationStore> = Arc::new(Store::new(&cfg.store).await?);
    debug!("Using translator {}", translator.name());
    Ok(Translations::new(store, translator))
}

/// Print configuration and translator health.
async fn status(config_path: &str, cfg: &config::Config) -> anyhow::Result<()> {
    println!("Translatable: status check\n");
    println!("Config: {config_path}");
    println!("Default locale: {}", cfg.translatable.default_locale);
    println!(
        "Store: {} at {}",
        cfg.store.backend,
        config::shellexpand(&cfg.store.db_path)
    );
    println!("Default translator: {}", cfg.translator.default);
    println!();

    match build_translator(cfg) {
        Ok(translator) => {
            let available = translator.is_available().await;
            println!(
                "  {}: {}",
                translator.name(),
                if available { "available" } else { "not available" }
            );
        }
        Err(e) => println!("  {}: {e}", cfg.translator.default),
    }

    Ok(())
}

/// Build the configured translator.
fn build_translator(cfg: &config::Config) -> anyhow::Result<Arc<dyn Translator>> {
    let timeout = Duration::from_secs(cfg.translator.timeout_secs);
    match cfg.translator.default.as_str() {
        "openai" => {
            let openai = cfg.translator.openai.clone().unwrap_or_default();
            if !openai.enabled {
                anyhow::bail!("translator 'openai' is disabled in config");
            }
            Ok(Arc::new(OpenAiTranslator::from_config(&openai, timeout)?))
        }
        "ollama" => {
            let ollama = cfg.translator.ollama.clone().unwrap_or_default();
            if !ollama.enabled {
                anyhow::bail!("translator 'ollama' is disabled in config");
            }
            Ok(Arc::new(OllamaTranslator::from_config(&ollama, timeout)?))
        }
        other => anyhow::bail!("unsupported translator: {other}"),
    }
}

fn parse_timestamp(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| anyhow::anyhow!("invalid --updated-at '{raw}': {e}"))?
        .with_timezone(&Utc))
}
