//! INI text format for [`Config`].
//!
//! Parsing goes through `configparser` in case-sensitive mode. Rendering is
//! done here so output is ordered by section then key and stays byte-stable
//! across repeated save/load cycles:
//!
//! ```text
//! [exon]
//! fill = rgba(0.5, 0.5, 1, 1)
//! label = "Exon"
//!
//! [format]
//! margins = 30
//! show_grid = true
//! ```
//!
//! Entries that appear before any `[section]` header belong to `default`.

use std::fs;
use std::path::Path;

use configparser::ini::Ini;

use crate::domain::config::Config;
use crate::domain::error::ConfigError;
use crate::domain::value::{parse_literal, Value};

pub const DEFAULT_SECTION: &str = "default";

/// Parse a whole document into `(section, key, value)` entries, sorted by
/// address. Nothing is returned unless every entry is valid.
pub fn parse_document(text: &str) -> Result<Vec<(String, String, Value)>, ConfigError> {
    let mut ini = Ini::new_cs();
    let map = ini
        .read(text.to_string())
        .map_err(|reason| ConfigError::Parse { reason })?;

    let mut raw: Vec<(String, String, Option<String>)> = map
        .into_iter()
        .flat_map(|(section, entries)| {
            entries
                .into_iter()
                .map(move |(key, value)| (section.clone(), key, value))
        })
        .collect();
    raw.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

    raw.into_iter()
        .map(|(section, key, literal)| {
            let Some(literal) = literal else {
                return Err(ConfigError::Parse {
                    reason: format!("[{section}] {key}: missing '=' and value"),
                });
            };
            match parse_literal(&literal) {
                Ok(value) => Ok((section, key, value)),
                Err(source) => Err(ConfigError::InvalidValue {
                    section,
                    key,
                    source,
                }),
            }
        })
        .collect()
}

/// Render the store as an INI document.
pub fn render_document(config: &Config) -> Result<String, ConfigError> {
    let mut out = String::new();
    let mut current: Option<&str> = None;
    for (section, key, value) in config.entries() {
        check_name(section, key)?;
        if current != Some(section) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("[{section}]\n"));
            current = Some(section);
        }
        out.push_str(&format!("{key} = {value}\n"));
    }
    Ok(out)
}

fn check_name(section: &str, key: &str) -> Result<(), ConfigError> {
    let fail = |reason: &str| {
        Err(ConfigError::Serialization {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.to_string(),
        })
    };
    if section.is_empty() {
        return fail("section name is empty");
    }
    if key.is_empty() {
        return fail("key is empty");
    }
    for name in [section, key] {
        if name.trim() != name {
            return fail("name has leading or trailing whitespace");
        }
        if name.contains(['\n', '\r']) {
            return fail("name contains a line break");
        }
        if name.contains(['#', ';']) {
            return fail("name contains a comment character");
        }
    }
    if key.contains(['=', ':']) {
        return fail("key contains a delimiter");
    }
    if key.starts_with('[') {
        return fail("key starts with '['");
    }
    Ok(())
}

impl Config {
    /// Merge a document into the store. On error the store is left unchanged.
    pub fn load_str(&mut self, text: &str) -> Result<(), ConfigError> {
        let entries = parse_document(text)?;
        tracing::debug!(entries = entries.len(), "merging config text");
        self.merge(entries);
        Ok(())
    }

    /// Like [`Config::load_str`], reading the document from `path`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| ConfigError::Parse {
            reason: format!("{}: {e}", path.display()),
        })?;
        tracing::debug!(path = %path.display(), "loading config file");
        self.load_str(&text)
    }

    pub fn to_str(&self) -> Result<String, ConfigError> {
        render_document(self)
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_str()?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entries = self.len(), "saved config file");
        Ok(())
    }

    /// Independent copy made by rendering this store and loading the text
    /// into a fresh one. Only what survives the text format is copied.
    pub fn try_clone(&self) -> Result<Config, ConfigError> {
        let text = self.to_str()?;
        let mut copy = Config::with_context(self.context());
        copy.load_str(&text)?;
        Ok(copy)
    }
}
