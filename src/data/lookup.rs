//! Cross-Reference Index: id -> display name tables for every reference-able
//! category, plus the nation <-> family-class adjacency materialized from
//! family.xml. Lookup misses degrade to prettified ids; a missing category
//! file yields an empty table and one warning, never a failed run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use regex::{Captures, Regex};

use crate::data::text::{title_case, Resolution, TextStore};
use crate::data::xml;

/// Category name -> Infos file that defines it.
pub const CATEGORY_FILES: &[(&str, &str)] = &[
    ("familyClass", "familyClass.xml"),
    ("improvement", "improvement.xml"),
    ("law", "law.xml"),
    ("nation", "nation.xml"),
    ("project", "project.xml"),
    ("religion", "religion.xml"),
    ("specialist", "specialist.xml"),
    ("tech", "tech.xml"),
    ("theology", "theology.xml"),
    ("unit", "unit.xml"),
    ("yield", "yield.xml"),
];

// Longest-match-first: IMPROVEMENTCLASS_ must beat IMPROVEMENT_.
const ID_PREFIXES: &[&str] = &[
    "GOAL_",
    "LAW_",
    "TECH_",
    "IMPROVEMENTCLASS_",
    "IMPROVEMENT_",
    "YIELD_",
    "SPECIALIST_",
    "FAMILYCLASS_",
    "THEOLOGY_",
    "RELIGION_",
    "UNIT_",
    "PROJECT_",
    "DIPLOMACY_",
    "STAT_",
    "EFFECTCITY_",
    "CULTURE_",
    "SUBJECT_",
    "RESOURCE_",
    "OPINIONFAMILY_",
    "NATION_",
];

/// Human-readable fallback for a game id: strip the category prefix and
/// title-case the rest, e.g. `IMPROVEMENT_STONE_QUARRY` -> `Stone Quarry`.
pub fn prettify_id(id: &str) -> String {
    for prefix in ID_PREFIXES {
        if let Some(body) = id.strip_prefix(prefix) {
            return title_case(body);
        }
    }
    title_case(id)
}

#[derive(Debug)]
pub struct CrossRefIndex {
    tables: BTreeMap<&'static str, BTreeMap<String, String>>,
    /// Nation id -> sorted family-class ids available to it.
    pub nation_family_classes: BTreeMap<String, BTreeSet<String>>,
    link_re: Regex,
}

impl CrossRefIndex {
    /// Build every category table plus the nation adjacency from the Infos
    /// directory. Returns warnings for files that were absent or unreadable.
    pub fn build(dir: &Path, texts: &TextStore) -> (CrossRefIndex, Vec<String>) {
        let mut tables = BTreeMap::new();
        let mut warnings = Vec::new();

        for (category, file) in CATEGORY_FILES {
            let path = dir.join(file);
            let mut table = BTreeMap::new();
            if path.is_file() {
                match xml::parse_file(&path) {
                    Ok(root) => {
                        for entry in root.children_named("Entry") {
                            let (Some(id), Some(name_key)) =
                                (entry.child_text("zType"), entry.child_text("Name"))
                            else {
                                continue;
                            };
                            let display = match texts.name(name_key) {
                                Resolution::Resolved(text) | Resolution::Fallback(text) => text,
                                Resolution::Missing => prettify_id(id),
                            };
                            table.insert(id.to_string(), display);
                        }
                    }
                    Err(err) => warnings.push(format!("skipping '{}': {err}", path.display())),
                }
            } else {
                warnings.push(format!(
                    "reference table '{file}' not found; {category} names will use fallbacks"
                ));
            }
            tables.insert(*category, table);
        }

        let (adjacency, mut family_warnings) = build_nation_adjacency(dir);
        warnings.append(&mut family_warnings);

        let index = CrossRefIndex {
            tables,
            nation_family_classes: adjacency,
            link_re: Regex::new(r"link\(([^)]+)\)").expect("link pattern is valid"),
        };
        (index, warnings)
    }

    /// Empty index with no tables. Test seam.
    pub fn empty() -> CrossRefIndex {
        CrossRefIndex {
            tables: BTreeMap::new(),
            nation_family_classes: BTreeMap::new(),
            link_re: Regex::new(r"link\(([^)]+)\)").expect("link pattern is valid"),
        }
    }

    /// Insert one id -> name mapping. Test seam.
    pub fn insert(&mut self, category: &'static str, id: impl Into<String>, name: impl Into<String>) {
        self.tables
            .entry(category)
            .or_default()
            .insert(id.into(), name.into());
    }

    /// Display name for an id within a specific category.
    pub fn name_in(&self, category: &str, id: &str) -> Option<&str> {
        self.tables.get(category)?.get(id).map(String::as_str)
    }

    /// Display name for an id searched across all categories. Deterministic:
    /// categories are scanned in sorted order.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.tables
            .values()
            .find_map(|table| table.get(id))
            .map(String::as_str)
    }

    /// Resolve `link(REF)` / `link(REF,n)` markup inside a localized string.
    /// Known references become their display names, unknown ones degrade to a
    /// prettified id.
    pub fn resolve_links(&self, raw: &str) -> String {
        self.link_re
            .replace_all(raw, |caps: &Captures<'_>| {
                let reference = caps[1].split(',').next().unwrap_or("").trim();
                match self.display_name(reference) {
                    Some(name) => name.to_string(),
                    None => prettify_id(reference),
                }
            })
            .into_owned()
    }
}

/// Join family.xml into nation -> family-class sets: each family declares its
/// class and the nations it appears for as `abNation` boolean pairs.
fn build_nation_adjacency(
    dir: &Path,
) -> (BTreeMap<String, BTreeSet<String>>, Vec<String>) {
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut warnings = Vec::new();

    let path = dir.join("family.xml");
    if !path.is_file() {
        warnings.push("family.xml not found; nation family classes will be empty".to_string());
        return (adjacency, warnings);
    }

    match xml::parse_file(&path) {
        Ok(root) => {
            for entry in root.children_named("Entry") {
                if entry.child_text("zType").is_none() {
                    continue; // template entry
                }
                let Some(family_class) = entry.child_text("FamilyClass") else {
                    continue;
                };
                for nation in xml::true_pair_list(entry.child("abNation")) {
                    adjacency
                        .entry(nation)
                        .or_default()
                        .insert(family_class.to_string());
                }
            }
        }
        Err(err) => warnings.push(format!("skipping '{}': {err}", path.display())),
    }

    (adjacency, warnings)
}
