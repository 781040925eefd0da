//! User preferences kept in durable storage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::{KeyValueStorage, LANGUAGE_KEY, StorageError};

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Fr,
    De,
    Pt,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Es,
        Language::En,
        Language::Fr,
        Language::De,
        Language::Pt,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Pt => "pt",
        }
    }

    pub const fn native_name(&self) -> &'static str {
        match self {
            Language::Es => "Español",
            Language::En => "English",
            Language::Fr => "Français",
            Language::De => "Deutsch",
            Language::Pt => "Português",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == code)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

/// Stored language, or `default` when absent, unreadable or unsupported
pub fn load_language(storage: &impl KeyValueStorage, default: Language) -> Language {
    match storage.get(LANGUAGE_KEY) {
        Ok(Some(code)) => code.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring stored language");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read language preference");
            default
        }
    }
}

pub fn save_language(
    storage: &mut impl KeyValueStorage,
    language: Language,
) -> Result<(), StorageError> {
    storage.set(LANGUAGE_KEY, language.code())?;
    tracing::info!(language = %language, "Language preference saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_language_round_trip_through_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_language(&storage, Language::Es), Language::Es);

        save_language(&mut storage, Language::Pt).unwrap();
        assert_eq!(load_language(&storage, Language::Es), Language::Pt);
    }

    #[test]
    fn test_unsupported_stored_language_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set(LANGUAGE_KEY, "klingon").unwrap();
        assert_eq!(load_language(&storage, Language::En), Language::En);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert!("it".parse::<Language>().is_err());
    }
}
