//! Localized string resolution for entity names and descriptions.
//!
//! The string table is scoped to a single language for the session. Lookup
//! keys are derived from entity ids: numeric ids (ships) use the
//! `ship_{id}_name` pattern, string ids use `{id}_name`. Resolution always
//! degrades deterministically: localized value, then the provided fallback,
//! then the id itself (names) or nothing (descriptions).

use std::collections::HashMap;

use tracing::warn;

use crate::source::{tables, DataSource};

/// A language-scoped string table.
#[derive(Debug, Clone, Default)]
pub struct Localization {
    strings: HashMap<String, String>,
}

impl Localization {
    /// An empty table; every lookup falls through to its fallback.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the table from raw `localization` rows (`key`, `language`,
    /// `value`), keeping only rows for `language`.
    pub fn from_rows(rows: &[crate::source::RawRow], language: &str) -> Self {
        let mut strings = HashMap::new();
        for row in rows {
            let row_language = row.get("language").and_then(|v| v.as_str());
            if row_language != Some(language) {
                continue;
            }
            if let (Some(key), Some(value)) = (
                row.get("key").and_then(|v| v.as_str()),
                row.get("value").and_then(|v| v.as_str()),
            ) {
                strings.insert(key.to_string(), value.to_string());
            }
        }
        Self { strings }
    }

    /// Fetch the string table for `language` from the row-store.
    ///
    /// A fetch failure must not abort the caller: it degrades to an empty
    /// table so consumers fall back to raw ids and keys.
    pub fn load(source: &dyn DataSource, language: &str) -> Self {
        match source.fetch_rows(tables::LOCALIZATION) {
            Ok(rows) => Self::from_rows(&rows, language),
            Err(err) => {
                warn!(%err, "failed to load localization; falling back to raw keys");
                Self::empty()
            }
        }
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// The mapped value for `key`, or the key itself when absent.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }

    fn resolve(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Display name for a ship (numeric id, `ship_{id}_name` key).
    pub fn ship_name(&self, id: i64, fallback: Option<&str>) -> String {
        let key = format!("ship_{id}_name");
        self.resolve(&key)
            .map(str::to_string)
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| id.to_string())
    }

    /// Display name for a string-keyed entity (`{id}_name` key).
    pub fn name(&self, id: &str, fallback: Option<&str>) -> String {
        let key = format!("{id}_name");
        self.resolve(&key)
            .map(str::to_string)
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| id.to_string())
    }

    /// Description text for a ship, with an arbitrary key suffix such as
    /// `_text`, `_tt`, or `_desc`. Unlike names, an unresolvable
    /// description is `None`, never the id.
    pub fn ship_description(&self, id: i64, suffix: &str, fallback: Option<&str>) -> Option<String> {
        let key = format!("ship_{id}{suffix}");
        self.resolve(&key)
            .map(str::to_string)
            .or_else(|| fallback.map(str::to_string))
    }

    /// Description text for a string-keyed entity; `None` when unresolved.
    pub fn description(&self, id: &str, suffix: &str, fallback: Option<&str>) -> Option<String> {
        let key = format!("{id}{suffix}");
        self.resolve(&key)
            .map(str::to_string)
            .or_else(|| fallback.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Localization {
        let rows: Vec<crate::source::RawRow> = [
            json!({"key": "ship_12_name", "language": "en", "value": "Sea Wolf"}),
            json!({"key": "ship_12_name", "language": "de", "value": "Seewolf"}),
            json!({"key": "unit_special_8_name", "language": "en", "value": "Gunner"}),
            json!({"key": "cball_1_text", "language": "en", "value": "Standard round shot."}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().expect("object"))
        .collect();
        Localization::from_rows(&rows, "en")
    }

    #[test]
    fn keeps_only_session_language() {
        let loc = table();
        assert_eq!(loc.ship_name(12, None), "Sea Wolf");
        assert_eq!(loc.len(), 3);
    }

    #[test]
    fn get_falls_back_to_key() {
        let loc = table();
        assert_eq!(loc.get("missing_key"), "missing_key");
    }

    #[test]
    fn name_fallback_chain_ends_at_id() {
        let loc = table();
        assert_eq!(loc.name("unit_special_8", None), "Gunner");
        assert_eq!(loc.name("unit_x", Some("Deckhand")), "Deckhand");
        assert_eq!(loc.name("unit_x", None), "unit_x");
        assert_eq!(loc.ship_name(99, None), "99");
    }

    #[test]
    fn description_resolves_to_none_not_id() {
        let loc = table();
        assert_eq!(
            loc.description("cball_1", "_text", None).as_deref(),
            Some("Standard round shot.")
        );
        assert_eq!(loc.description("cball_9", "_text", None), None);
        assert_eq!(loc.ship_description(99, "_desc", None), None);
    }
}
