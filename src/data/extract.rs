//! Ambition Extractor: one normalized record per goal.xml entry, plus the
//! nation and family-class tables the viewer filters on.
//!
//! Failure philosophy: game data and DLC combinations vary, so every
//! per-record problem (unresolvable text, dangling cross-reference, malformed
//! entry) is recovered locally, logged, and tallied in the
//! [ExtractionReport]. The run only fails when the input set is structurally
//! broken: no input directory, unparseable goal.xml, or zero surviving
//! ambitions.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::data::dataset::AmbitionDataset;
use crate::data::lookup::{prettify_id, CrossRefIndex};
use crate::data::model::{
    Ambition, AmbitionFilters, FamilyClass, Nation, Requirements, TypedCount,
};
use crate::data::tables;
use crate::data::text::{Resolution, TextStore};
use crate::data::xml::{self, XmlElement};

#[derive(Debug)]
pub enum ExtractError {
    MissingInput(PathBuf),
    Parse(String),
    NoValidAmbitions,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput(path) => {
                write!(f, "input directory not found: {}", path.display())
            }
            Self::Parse(msg) => write!(f, "{msg}"),
            Self::NoValidAmbitions => {
                write!(f, "no valid ambitions extracted; input set is broken")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Aggregated non-fatal issue counts for one extraction run. Individual
/// warnings go to stderr as they happen; the summary reports totals by kind
/// so a run's health is assessable at a glance.
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub text_fallbacks: u32,
    pub crossref_misses: u32,
    pub malformed_records: Vec<String>,
    pub scenario_skipped: u32,
    pub disabled_skipped: u32,
    pub file_warnings: u32,
    pub ambitions: usize,
    pub nations: usize,
    pub family_classes: usize,
}

impl ExtractionReport {
    fn file_warning(&mut self, message: &str) {
        self.file_warnings += 1;
        eprintln!("warning: {message}");
    }

    fn text_fallback(&mut self, key: &str) {
        self.text_fallbacks += 1;
        eprintln!("warning: text key '{key}' did not resolve; using fallback");
    }

    fn crossref_miss(&mut self, category: &str, id: &str) {
        self.crossref_misses += 1;
        eprintln!("warning: no {category} entry for '{id}'");
    }

    fn malformed(&mut self, id: &str, reason: &str) {
        eprintln!("warning: skipping malformed record '{id}': {reason}");
        self.malformed_records.push(id.to_string());
    }

    pub fn summary(&self) -> String {
        format!(
            "extracted {} ambitions, {} nations, {} family classes\n\
             skipped: {} scenario-only, {} disabled, {} malformed\n\
             non-fatal issues: {} text fallbacks, {} cross-reference misses, {} file warnings",
            self.ambitions,
            self.nations,
            self.family_classes,
            self.scenario_skipped,
            self.disabled_skipped,
            self.malformed_records.len(),
            self.text_fallbacks,
            self.crossref_misses,
            self.file_warnings,
        )
    }
}

/// Run the whole pipeline over a directory of Infos XML files.
pub fn extract_dataset(
    input_dir: &Path,
) -> Result<(AmbitionDataset, ExtractionReport), ExtractError> {
    if !input_dir.is_dir() {
        return Err(ExtractError::MissingInput(input_dir.to_path_buf()));
    }

    let mut report = ExtractionReport::default();

    let (texts, warnings) = TextStore::load(input_dir);
    for warning in &warnings {
        report.file_warning(warning);
    }
    if texts.is_empty() {
        report.file_warning("no text tables loaded; all names will use fallbacks");
    }

    let (xref, warnings) = CrossRefIndex::build(input_dir, &texts);
    for warning in &warnings {
        report.file_warning(warning);
    }

    let goals_path = input_dir.join("goal.xml");
    let root = xml::parse_file(&goals_path)
        .map_err(|err| ExtractError::Parse(format!("{}: {err}", goals_path.display())))?;

    let mut ambitions = Vec::new();
    for entry in root.children_named("Entry") {
        if let Some(ambition) = parse_goal(entry, &texts, &xref, &mut report) {
            ambitions.push(ambition);
        }
    }
    if ambitions.is_empty() {
        return Err(ExtractError::NoValidAmbitions);
    }

    let family_classes = parse_family_classes(input_dir, &texts, &mut report);
    let nations = parse_nations(input_dir, &texts, &xref, &mut report);

    let ambition_classes: BTreeMap<u32, String> = tables::AMBITION_CLASS_NAMES
        .iter()
        .map(|(id, name)| (*id, (*name).to_string()))
        .collect();

    report.ambitions = ambitions.len();
    report.nations = nations.len();
    report.family_classes = family_classes.len();

    let dataset = AmbitionDataset {
        ambitions,
        nations,
        family_classes,
        ambition_classes,
    };
    Ok((dataset, report))
}

/// Resolve a display-name text key, counting fallbacks. `id` supplies the
/// prettified substitute when the key is absent or unresolvable.
fn resolve_name(
    key: Option<&str>,
    id: &str,
    texts: &TextStore,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> String {
    let Some(key) = key else {
        return prettify_id(id);
    };
    match texts.name(key) {
        Resolution::Resolved(text) => xref.resolve_links(&text),
        Resolution::Fallback(text) => {
            report.text_fallback(key);
            text
        }
        Resolution::Missing => {
            report.text_fallback(key);
            prettify_id(id)
        }
    }
}

/// Resolve an optional description key; absent or missing keys yield an
/// empty string.
fn resolve_description(
    key: Option<&str>,
    texts: &TextStore,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> String {
    let Some(key) = key else {
        return String::new();
    };
    match texts.description(key) {
        Resolution::Resolved(text) => xref.resolve_links(&text),
        Resolution::Fallback(text) => {
            report.text_fallback(key);
            text
        }
        Resolution::Missing => {
            report.text_fallback(key);
            String::new()
        }
    }
}

/// Name lookup within one category; a miss is counted and yields None so the
/// reference is emitted without a display name rather than dangling.
fn category_name(
    category: &str,
    id: &str,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> Option<String> {
    match xref.name_in(category, id) {
        Some(name) => Some(name.to_string()),
        None => {
            report.crossref_miss(category, id);
            None
        }
    }
}

/// Name lookup for parallel name lists, where the shape requires a value:
/// misses are counted and degrade to a prettified id.
fn category_name_or_pretty(
    category: &str,
    id: &str,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> String {
    category_name(category, id, xref, report).unwrap_or_else(|| prettify_id(id))
}

/// Typed-count name resolution searches every category, since pair lists
/// reference yields, improvements, units and more.
fn any_name_or_pretty(id: &str, xref: &CrossRefIndex, report: &mut ExtractionReport) -> String {
    match xref.display_name(id) {
        Some(name) => name.to_string(),
        None => {
            report.crossref_miss("reference", id);
            prettify_id(id)
        }
    }
}

fn parse_goal(
    entry: &XmlElement,
    texts: &TextStore,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> Option<Ambition> {
    // The first entry in every Infos file is an empty template.
    let id = entry.child_text("zType")?;

    if entry.child_bool("bScenario") {
        report.scenario_skipped += 1;
        return None;
    }
    if entry.child_bool("bDisabled") {
        report.disabled_skipped += 1;
        return None;
    }

    // A single declared tier stands in for both bounds when they are absent.
    let declared_tier = entry.child_int("iTier");
    let min_tier = entry.child_int("iMinTier").or(declared_tier).unwrap_or(1);
    let max_tier = entry.child_int("iMaxTier").or(declared_tier).unwrap_or(10);
    if !(1..=10).contains(&min_tier) || !(1..=10).contains(&max_tier) || min_tier > max_tier {
        report.malformed(id, &format!("tier bounds {min_tier}..{max_tier} out of range"));
        return None;
    }

    let ambition_class = match entry.child_int("iAmbitionClass").unwrap_or(0) {
        class @ 0.. => class as u32,
        class => {
            report.malformed(id, &format!("negative ambition class {class}"));
            return None;
        }
    };

    let name = resolve_name(entry.child_text("Name"), id, texts, xref, report);
    let short_name = match entry.child_text("ShortName") {
        Some(key) => match texts.name(key) {
            Resolution::Resolved(text) => xref.resolve_links(&text),
            Resolution::Fallback(text) => {
                report.text_fallback(key);
                text
            }
            Resolution::Missing => {
                report.text_fallback(key);
                String::new()
            }
        },
        None => String::new(),
    };
    let help_text = resolve_description(entry.child_text("HelpText"), texts, xref, report);

    Some(Ambition {
        id: id.to_string(),
        name,
        short_name,
        help_text,
        ambition_class,
        ambition_class_name: tables::ambition_class_name(ambition_class),
        min_tier: min_tier as u32,
        max_tier: max_tier as u32,
        victory_eligible: entry.child_bool("bVictoryEligible"),
        dlc: entry.child_text("GameContentRequired").map(str::to_string),
        filters: parse_filters(entry, xref, report),
        requirements: parse_requirements(entry, xref, report),
        event_source: tables::event_source_for(id),
    })
}

fn parse_filters(
    entry: &XmlElement,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> AmbitionFilters {
    let mut filters = AmbitionFilters::default();

    if let Some(nation) = entry.child_text("NationPrereq") {
        filters.nation_prereq = Some(nation.to_string());
        filters.nation_prereq_name = category_name("nation", nation, xref, report);
    }
    if let Some(tech) = entry.child_text("TechPrereq") {
        filters.tech_prereq = Some(tech.to_string());
        filters.tech_prereq_name = category_name("tech", tech, xref, report);
    }
    if let Some(tech) = entry.child_text("TechObsolete") {
        filters.tech_obsolete = Some(tech.to_string());
        filters.tech_obsolete_name = category_name("tech", tech, xref, report);
    }

    let family_classes = xml::value_list(entry.child("aeFamilyClass"));
    filters.family_class_names = family_classes
        .iter()
        .map(|fc| category_name_or_pretty("familyClass", fc, xref, report))
        .collect();
    filters.family_classes = family_classes;

    filters
}

fn parse_requirements(
    entry: &XmlElement,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> Requirements {
    let mut req = Requirements::default();

    if let Some(law) = entry.child_text("StartLaw") {
        req.law = Some(law.to_string());
        req.law_name = category_name("law", law, xref, report);
    }
    if let Some(theology) = entry.child_text("EstablishTheology") {
        req.theology = Some(theology.to_string());
        req.theology_name = category_name("theology", theology, xref, report);
    }
    // No dedicated lookup tables exist for these two; prettify directly.
    if let Some(diplomacy) = entry.child_text("DiplomacyAll") {
        req.diplomacy_all = Some(diplomacy.to_string());
        req.diplomacy_all_name = Some(prettify_id(diplomacy));
    }
    if let Some(opinion) = entry.child_text("MinOpinionFamily") {
        req.min_opinion_family = Some(opinion.to_string());
        req.min_opinion_family_name = Some(prettify_id(opinion));
    }

    // Zero means "not required" in the source data, so absent fields stay
    // absent instead of being zero-filled.
    let scalar = |field: &str| entry.child_int(field).filter(|value| *value > 0);
    req.cities = scalar("iCities");
    req.connected_cities = scalar("iConnectedCities");
    req.population = scalar("iPopulation");
    req.legitimacy = scalar("iLegitimacy");
    req.wonders = scalar("iWonders");
    req.laws = scalar("iLaws");
    req.citizens = scalar("iCitizens");
    req.specialists = scalar("iSpecialists");
    req.luxuries = scalar("iLuxuries");
    req.sent_luxuries = scalar("iSentLuxuries");
    req.military_units = scalar("iMilitaryUnits");
    req.max_level_units = scalar("iMaxLevelUnits");
    req.urban_tiles = scalar("iUrbanTiles");
    req.urban_improvements = scalar("iUrbanImprovements");
    req.reveal_land = scalar("iRevealLand");
    req.reveal_water = scalar("iRevealWater");
    req.generals = scalar("iGeneralCount");
    req.explorers = scalar("iExplorerCount");
    req.governors = scalar("iGovernorCount");
    req.agents = scalar("iAgentCount");
    req.agent_networks = scalar("iAgentNetworks");
    req.holy_cities = scalar("iWorldReligionHolyCities");

    let typed = |field: &str, report: &mut ExtractionReport| -> Vec<TypedCount> {
        xml::pair_list(entry.child(field))
            .into_iter()
            .map(|(type_id, value)| TypedCount {
                type_name: any_name_or_pretty(&type_id, xref, report),
                type_id,
                value,
            })
            .collect()
    };
    req.yield_produced = typed("aiYieldProducedData", report);
    req.yield_sold = typed("aiYieldSoldData", report);
    req.yield_rate = typed("aiYieldRate", report);
    req.yield_stockpile = typed("aiYieldCount", report);
    req.improvements = typed("aiImprovementCount", report);
    req.improvement_classes = typed("aiImprovementClassCount", report);
    req.specialist_counts = typed("aiSpecialistCount", report);
    req.units = typed("aiUnitCount", report);
    req.unit_traits = typed("aiUnitTraitCount", report);
    req.projects = typed("aiProjectCount", report);
    req.luxuries_hooked = typed("aiLuxuryCount", report);
    req.diplomacy = typed("aiDiplomacyCount", report);
    req.stats = typed("aiStatCountData", report);
    req.culture = typed("aiCultureCount", report);
    req.culture_wonders = typed("aiCultureWonders", report);
    req.tribes_killed = typed("aiTribesKilledData", report);
    req.missions_completed = typed("aiMissionsCompletedData", report);

    let techs = xml::value_list(entry.child("aeTechsAcquired"));
    req.tech_names = techs
        .iter()
        .map(|tech| category_name_or_pretty("tech", tech, xref, report))
        .collect();
    req.techs = techs;
    req.sub_goals = xml::value_list(entry.child("aeSubGoals"));

    req.state_religion = entry.child_bool("bStateReligion");
    req.all_holy_cities = entry.child_bool("bAllHolyCities");

    req
}

fn parse_family_classes(
    dir: &Path,
    texts: &TextStore,
    report: &mut ExtractionReport,
) -> BTreeMap<String, FamilyClass> {
    let mut classes = BTreeMap::new();
    let path = dir.join("familyClass.xml");
    let root = match xml::parse_file(&path) {
        Ok(root) => root,
        Err(err) => {
            report.file_warning(&format!("skipping '{}': {err}", path.display()));
            return classes;
        }
    };

    for entry in root.children_named("Entry") {
        let Some(id) = entry.child_text("zType") else {
            continue;
        };
        let name = match entry.child_text("Name") {
            Some(key) => match texts.name(key) {
                Resolution::Resolved(text) | Resolution::Fallback(text) => text,
                Resolution::Missing => {
                    report.text_fallback(key);
                    prettify_id(id)
                }
            },
            None => prettify_id(id),
        };
        classes.insert(
            id.to_string(),
            FamilyClass {
                id: id.to_string(),
                name,
            },
        );
    }
    classes
}

fn parse_nations(
    dir: &Path,
    texts: &TextStore,
    xref: &CrossRefIndex,
    report: &mut ExtractionReport,
) -> BTreeMap<String, Nation> {
    let mut nations = BTreeMap::new();
    let path = dir.join("nation.xml");
    let root = match xml::parse_file(&path) {
        Ok(root) => root,
        Err(err) => {
            report.file_warning(&format!("skipping '{}': {err}", path.display()));
            return nations;
        }
    };

    for entry in root.children_named("Entry") {
        let Some(id) = entry.child_text("zType") else {
            continue;
        };
        if entry.child_bool("bDisabled") {
            report.disabled_skipped += 1;
            continue;
        }

        // Nations display their gendered name; plain Name is the adjective.
        let name_key = entry
            .child_text("GenderedName")
            .or_else(|| entry.child_text("Name"));
        let name = resolve_name(name_key, id, texts, xref, report);

        let family_classes: Vec<String> = xref
            .nation_family_classes
            .get(id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();

        nations.insert(
            id.to_string(),
            Nation {
                id: id.to_string(),
                name,
                dlc: entry.child_text("GameContentRequired").map(str::to_string),
                family_classes,
            },
        );
    }
    nations
}
