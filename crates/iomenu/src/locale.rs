//! In-memory label catalog.
//!
//! Holds translations keyed by culture and source label and is used as the
//! [`LabelTranslator`] of a menu context.

use std::collections::HashMap;

use tracing::debug;

use crate::context::LabelTranslator;

/// Label translations for any number of cultures.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    /// key = "culture\0source" -> translation
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, culture: &str, source: &str, translation: impl Into<String>) {
        self.entries
            .insert(catalog_key(culture, source), translation.into());
    }

    pub fn with(mut self, culture: &str, source: &str, translation: impl Into<String>) -> Self {
        self.insert(culture, source, translation);
        self
    }

    /// Load every `(source, translation)` pair of one culture.
    pub fn load_culture<I, S, T>(&mut self, culture: &str, pairs: I) -> usize
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut count = 0usize;
        for (source, translation) in pairs {
            self.insert(culture, source.as_ref(), translation);
            count += 1;
        }
        debug!(culture = %culture, count = count, "loaded label translations");
        count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelTranslator for CatalogTranslator {
    /// Falls back to the label itself when no translation is known.
    fn translate(&self, label: &str, culture: &str) -> String {
        self.entries
            .get(&catalog_key(culture, label))
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }
}

/// Null byte separator so labels containing any printable character
/// cannot collide across cultures.
fn catalog_key(culture: &str, source: &str) -> String {
    format!("{culture}\0{source}")
}
