//! Text Resolver: symbolic text keys to localized display strings.
//!
//! Two namespaces are merged from the `text-*.xml` files: the general info
//! table and the help table (files whose name contains `help`). Name fields
//! prefer info text, description fields prefer help text. A stored value may
//! itself be another `TEXT_*` key; resolution follows the chain up to
//! [MAX_CHAIN_DEPTH] and degrades to a prettified fallback instead of
//! failing the run.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::data::xml;

/// Indirection limit when a text value references another text key.
pub const MAX_CHAIN_DEPTH: usize = 5;

/// Outcome of a text lookup. `Fallback` means the key existed but its
/// reference chain broke (depth exhausted or a dangling link); callers log it
/// and keep going. `Missing` means the key was never in either table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Fallback(String),
    Missing,
}

impl Resolution {
    /// The display string, whichever way it was obtained.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Resolved(text) | Self::Fallback(text) => Some(text),
            Self::Missing => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct TextStore {
    info: HashMap<String, String>,
    help: HashMap<String, String>,
}

impl TextStore {
    /// Load every `text-*.xml` file under `dir`. Files that fail to parse are
    /// reported through the returned warning list, never fatally.
    pub fn load(dir: &Path) -> (TextStore, Vec<String>) {
        let mut store = TextStore::default();
        let mut warnings = Vec::new();

        let mut files: Vec<_> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| {
                    p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("text-") && n.ends_with(".xml"))
                })
                .collect(),
            Err(err) => {
                warnings.push(format!("unable to list text files in '{}': {err}", dir.display()));
                return (store, warnings);
            }
        };
        // Stable load order so later duplicates win deterministically.
        files.sort();

        for path in files {
            let is_help = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains("help"));
            match xml::parse_file(&path) {
                Ok(root) => store.absorb(&root, is_help),
                Err(err) => warnings.push(format!("skipping '{}': {err}", path.display())),
            }
        }

        (store, warnings)
    }

    fn absorb(&mut self, root: &xml::XmlElement, is_help: bool) {
        let table = if is_help { &mut self.help } else { &mut self.info };
        for entry in root.children_named("Entry") {
            let (Some(key), Some(value)) = (entry.child_text("zType"), entry.child_text("en-US"))
            else {
                continue;
            };
            table.insert(key.to_string(), value.to_string());
        }
    }

    /// Insert directly into the info table. Test seam.
    pub fn insert_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.info.insert(key.into(), value.into());
    }

    /// Insert directly into the help table. Test seam.
    pub fn insert_help(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.help.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty() && self.help.is_empty()
    }

    /// Resolve a name key: info table first, help table second.
    pub fn name(&self, key: &str) -> Resolution {
        self.resolve(key, &self.info, &self.help)
    }

    /// Resolve a description key: help table first, info table second.
    pub fn description(&self, key: &str) -> Resolution {
        self.resolve(key, &self.help, &self.info)
    }

    fn resolve(
        &self,
        key: &str,
        primary: &HashMap<String, String>,
        secondary: &HashMap<String, String>,
    ) -> Resolution {
        let Some(first) = lookup(primary, secondary, key) else {
            return Resolution::Missing;
        };

        let mut current = first_variant(first);
        for _ in 0..MAX_CHAIN_DEPTH {
            if !is_text_key(current) {
                return Resolution::Resolved(current.to_string());
            }
            match lookup(primary, secondary, current) {
                Some(next) => current = first_variant(next),
                // Dangling link mid-chain.
                None => return Resolution::Fallback(prettify_key(current)),
            }
        }
        // Still pointing at a key after MAX_CHAIN_DEPTH hops.
        Resolution::Fallback(prettify_key(key))
    }
}

fn lookup<'a>(
    primary: &'a HashMap<String, String>,
    secondary: &'a HashMap<String, String>,
    key: &str,
) -> Option<&'a str> {
    primary
        .get(key)
        .or_else(|| secondary.get(key))
        .map(String::as_str)
}

/// Keys in the text tables all carry the TEXT_ prefix; a stored value that
/// does too is an indirection, not a display string.
fn is_text_key(value: &str) -> bool {
    value.starts_with("TEXT_") && !value.contains(char::is_whitespace)
}

/// Text values use `~` to separate gendered/plural variants; display uses the
/// first one.
pub fn first_variant(value: &str) -> &str {
    value.split('~').next().unwrap_or(value)
}

/// Human-readable fallback for an unresolvable key: strip the TEXT_ prefix,
/// break on underscores, title-case each word.
pub fn prettify_key(key: &str) -> String {
    let stripped = key.strip_prefix("TEXT_").unwrap_or(key);
    title_case(stripped)
}

/// Title-case an UPPER_SNAKE identifier body.
pub fn title_case(body: &str) -> String {
    body.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
