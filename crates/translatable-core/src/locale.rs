//! Process-wide current locale.
//!
//! Read by [`Translations::translated`](crate::Translations::translated) when
//! no language is given. The host sets it (typically once at startup from
//! `translatable.default_locale`); the translation logic never writes it.

use std::sync::{OnceLock, RwLock};

/// Locale used before the host sets one.
pub const FALLBACK_LOCALE: &str = "en";

fn cell() -> &'static RwLock<String> {
    static CURRENT: OnceLock<RwLock<String>> = OnceLock::new();
    CURRENT.get_or_init(|| RwLock::new(FALLBACK_LOCALE.to_string()))
}

/// The current locale code.
pub fn current() -> String {
    match cell().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Replace the current locale. Empty codes are ignored.
pub fn set_current(code: &str) {
    let code = code.trim();
    if code.is_empty() {
        return;
    }
    match cell().write() {
        Ok(mut guard) => *guard = code.to_string(),
        Err(poisoned) => *poisoned.into_inner() = code.to_string(),
    }
}

