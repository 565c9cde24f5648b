//! # Locale Table
//!
//! Tooltip strings, prompt messages and shortcut labels keyed by
//! language code. Unknown codes fall back to [`DEFAULT_LANGUAGE`];
//! the chosen language persists through the preference store.

use std::collections::HashMap;

/// Fallback language for unknown codes
pub const DEFAULT_LANGUAGE: &str = "en";

/// Preference-store key holding the user's language choice
pub const LANGUAGE_PREF_KEY: &str = "inlay.lang";

/// Injected string table keyed by language code
#[derive(Debug, Clone)]
pub struct Locale {
    tables: HashMap<String, HashMap<String, String>>,
    language: String,
}

impl Locale {
    /// Build from injected tables; the active language starts at the
    /// fallback
    pub fn new(tables: HashMap<String, HashMap<String, String>>) -> Self {
        Self {
            tables,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Built-in tables for the stock toolbar strings
    pub fn with_builtin() -> Self {
        let mut tables = HashMap::new();
        tables.insert(DEFAULT_LANGUAGE.to_string(), table(&[
            ("tooltip.bold", "Bold"),
            ("tooltip.italic", "Italic"),
            ("tooltip.underline", "Underline"),
            ("tooltip.link", "Insert link"),
            ("tooltip.save", "Save changes"),
            ("tooltip.publish", "Publish page"),
            ("prompt.link", "Link address"),
            ("shortcut.bold", "Ctrl+B"),
            ("shortcut.italic", "Ctrl+I"),
            ("shortcut.underline", "Ctrl+U"),
            ("shortcut.link", "Ctrl+K"),
            ("shortcut.save", "Ctrl+S"),
            ("shortcut.publish", "Ctrl+Shift+P"),
        ]));
        tables.insert("de".to_string(), table(&[
            ("tooltip.bold", "Fett"),
            ("tooltip.italic", "Kursiv"),
            ("tooltip.underline", "Unterstrichen"),
            ("tooltip.link", "Link einfügen"),
            ("tooltip.save", "Änderungen speichern"),
            ("tooltip.publish", "Seite veröffentlichen"),
            ("prompt.link", "Linkadresse"),
            ("shortcut.bold", "Strg+B"),
            ("shortcut.italic", "Strg+I"),
            ("shortcut.underline", "Strg+U"),
            ("shortcut.link", "Strg+K"),
            ("shortcut.save", "Strg+S"),
            ("shortcut.publish", "Strg+Umschalt+P"),
        ]));
        Self::new(tables)
    }

    /// Switch language; unknown codes fall back to [`DEFAULT_LANGUAGE`]
    pub fn set_language(&mut self, code: &str) {
        self.language = if self.tables.contains_key(code) {
            code.to_string()
        } else {
            DEFAULT_LANGUAGE.to_string()
        };
    }

    /// Currently active language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Look up a string, falling back to the default-language table
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tables
            .get(&self.language)
            .and_then(|t| t.get(key))
            .or_else(|| self.tables.get(DEFAULT_LANGUAGE).and_then(|t| t.get(key)))
            .map(String::as_str)
    }
}

fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_language_falls_back() {
        let mut locale = Locale::with_builtin();
        locale.set_language("xx");
        assert_eq!(locale.language(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_lookup_in_active_language() {
        let mut locale = Locale::with_builtin();
        locale.set_language("de");
        assert_eq!(locale.get("tooltip.bold"), Some("Fett"));
    }

    #[test]
    fn test_missing_key_falls_back_to_default_table() {
        let mut tables = HashMap::new();
        tables.insert(DEFAULT_LANGUAGE.to_string(), table(&[("only.here", "yes")]));
        tables.insert("de".to_string(), table(&[]));

        let mut locale = Locale::new(tables);
        locale.set_language("de");
        assert_eq!(locale.get("only.here"), Some("yes"));
        assert_eq!(locale.get("nowhere"), None);
    }
}
