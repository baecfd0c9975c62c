//! Typed `(section, key)` configuration store.
//!
//! Sections do not nest and each address holds exactly one [`Value`]. Typed
//! getters return `None` both for absent entries and for entries of another
//! kind; callers supply their own defaults.
//!
//! Text load/save lives in [`crate::adapters::ini_format`].

use std::collections::BTreeMap;

use crate::domain::color::Color;
use crate::domain::context::ViewContext;
use crate::domain::value::{Value, ValueKind};

#[derive(Debug, Default, PartialEq)]
pub struct Config {
    context: ViewContext,
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_context(context: &ViewContext) -> Self {
        Self {
            context: *context,
            sections: BTreeMap::new(),
        }
    }

    pub fn context(&self) -> &ViewContext {
        &self.context
    }

    /// Untyped lookup.
    pub fn get(&self, section: &str, key: &str) -> Option<&Value> {
        self.sections.get(section).and_then(|s| s.get(key))
    }

    /// Insert or overwrite, replacing whatever kind was stored before.
    pub fn set(&mut self, section: &str, key: &str, value: Value) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Remove the entry at `(section, key)`; no-op when absent.
    pub fn unset(&mut self, section: &str, key: &str) {
        if let Some(entries) = self.sections.get_mut(section) {
            entries.remove(key);
            if entries.is_empty() {
                self.sections.remove(section);
            }
        }
    }

    pub fn unset_section(&mut self, section: &str) {
        self.sections.remove(section);
    }

    pub fn get_color(&self, section: &str, key: &str) -> Option<Color> {
        let found = self.get(section, key).and_then(Value::as_color);
        self.note_miss(section, key, ValueKind::Color, found.is_some());
        found
    }

    pub fn set_color(&mut self, section: &str, key: &str, color: Color) {
        self.set(section, key, Value::Color(color));
    }

    pub fn get_cstr(&self, section: &str, key: &str) -> Option<&str> {
        let found = self.get(section, key).and_then(Value::as_text);
        self.note_miss(section, key, ValueKind::Text, found.is_some());
        found
    }

    pub fn set_cstr(&mut self, section: &str, key: &str, value: &str) {
        self.set(section, key, Value::Text(value.to_string()));
    }

    pub fn get_num(&self, section: &str, key: &str) -> Option<f64> {
        let found = self.get(section, key).and_then(Value::as_number);
        self.note_miss(section, key, ValueKind::Number, found.is_some());
        found
    }

    pub fn set_num(&mut self, section: &str, key: &str, number: f64) {
        self.set(section, key, Value::Number(number));
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Option<bool> {
        let found = self.get(section, key).and_then(Value::as_bool);
        self.note_miss(section, key, ValueKind::Boolean, found.is_some());
        found
    }

    pub fn set_bool(&mut self, section: &str, key: &str, value: bool) {
        self.set(section, key, Value::Boolean(value));
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.get(section, key).is_some()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn keys<'a>(&'a self, section: &str) -> impl Iterator<Item = &'a str> {
        self.sections
            .get(section)
            .into_iter()
            .flat_map(|entries| entries.keys().map(String::as_str))
    }

    /// All entries in `(section, key)` order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Value)> {
        self.sections.iter().flat_map(|(section, entries)| {
            entries
                .iter()
                .map(move |(key, value)| (section.as_str(), key.as_str(), value))
        })
    }

    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Overwrite every given entry, leaving the rest untouched.
    pub(crate) fn merge(&mut self, entries: Vec<(String, String, Value)>) {
        for (section, key, value) in entries {
            self.set(&section, &key, value);
        }
    }

    fn note_miss(&self, section: &str, key: &str, expected: ValueKind, found: bool) {
        if found || !self.context.is_verbose() {
            return;
        }
        match self.get(section, key) {
            Some(other) => tracing::warn!(
                section,
                key,
                "value is a {}, not a {}",
                other.kind(),
                expected
            ),
            None => tracing::warn!(section, key, "no {} value defined", expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let config = Config::new();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
        assert_eq!(config.get_num("gene", "height"), None);
    }

    #[test]
    fn typed_round_trip_through_accessors() {
        let mut config = Config::new();
        config.set_color("exon", "fill", Color::rgb(0.2, 0.4, 0.6));
        config.set_cstr("format", "font", "Sans");
        config.set_num("format", "margins", 30.0);
        config.set_bool("format", "show_grid", true);

        assert_eq!(
            config.get_color("exon", "fill"),
            Some(Color::rgb(0.2, 0.4, 0.6))
        );
        assert_eq!(config.get_cstr("format", "font"), Some("Sans"));
        assert_eq!(config.get_num("format", "margins"), Some(30.0));
        assert_eq!(config.get_bool("format", "show_grid"), Some(true));
        assert_eq!(config.len(), 4);
    }

    #[test]
    fn lookup_is_scoped_to_stored_kind() {
        let mut config = Config::new();
        config.set_color("a", "b", Color::WHITE);
        assert_eq!(config.get_cstr("a", "b"), None);
        assert_eq!(config.get_num("a", "b"), None);
        assert_eq!(config.get_bool("a", "b"), None);
        assert_eq!(config.get_color("a", "b"), Some(Color::WHITE));
    }

    #[test]
    fn last_write_wins_across_kinds() {
        let mut config = Config::new();
        config.set_num("s", "k", 1.0);
        config.set_bool("s", "k", true);
        assert_eq!(config.get_num("s", "k"), None);
        assert_eq!(config.get_bool("s", "k"), Some(true));
        assert_eq!(config.len(), 1);
    }

    #[test]
    fn unset_is_idempotent() {
        let mut config = Config::new();
        config.set_num("s", "k", 1.0);
        config.set_num("s", "other", 2.0);
        config.unset("s", "k");
        config.unset("s", "k");
        config.unset("missing", "k");
        assert!(!config.contains("s", "k"));
        assert_eq!(config.get_num("s", "other"), Some(2.0));
    }

    #[test]
    fn unsetting_last_key_drops_section() {
        let mut config = Config::new();
        config.set_bool("s", "k", false);
        config.unset("s", "k");
        assert!(config.is_empty());
        assert_eq!(config.sections().count(), 0);
    }

    #[test]
    fn set_color_clamps_channels() {
        let mut config = Config::new();
        config.set_color("s", "k", Color::new(1.5, -0.2, 0.5, 1.0));
        let c = config.get_color("s", "k").unwrap();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn sections_and_keys_are_sorted() {
        let mut config = Config::new();
        config.set_num("mRNA", "z", 1.0);
        config.set_num("gene", "b", 1.0);
        config.set_num("gene", "a", 1.0);
        let sections: Vec<&str> = config.sections().collect();
        assert_eq!(sections, vec!["gene", "mRNA"]);
        let keys: Vec<&str> = config.keys("gene").collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(config.keys("absent").count(), 0);
    }

    #[test]
    fn unset_section_removes_all_keys() {
        let mut config = Config::new();
        config.set_num("gene", "a", 1.0);
        config.set_num("gene", "b", 2.0);
        config.set_num("exon", "a", 3.0);
        config.unset_section("gene");
        assert_eq!(config.len(), 1);
        assert!(config.contains("exon", "a"));
    }

    #[test]
    fn merge_overwrites_only_given_entries() {
        let mut config = Config::new();
        config.set_num("gene", "height", 10.0);
        config.set_cstr("gene", "label", "old");
        config.merge(vec![("gene".into(), "label".into(), Value::from("new"))]);
        assert_eq!(config.get_num("gene", "height"), Some(10.0));
        assert_eq!(config.get_cstr("gene", "label"), Some("new"));
    }

    #[test]
    fn context_is_kept() {
        let ctx = ViewContext::new().verbose(true);
        let config = Config::with_context(&ctx);
        assert!(config.context().is_verbose());
        assert_eq!(config.get_bool("format", "missing"), None);
    }
}
