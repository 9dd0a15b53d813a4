//! Normalized data model for the ambitions dataset. These types define the
//! wire shape of `ambitions.json`; field order here is emission order.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// One game-defined goal, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambition {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default)]
    pub help_text: String,
    pub ambition_class: u32,
    pub ambition_class_name: String,
    pub min_tier: u32,
    pub max_tier: u32,
    pub victory_eligible: bool,
    /// DLC that introduces this ambition; None means base game.
    pub dlc: Option<String>,
    #[serde(default)]
    pub filters: AmbitionFilters,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_source: Option<EventSource>,
}

/// Offer filters: who can be offered this ambition and when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmbitionFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nation_prereq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nation_prereq_name: Option<String>,
    /// Family classes that prioritize this ambition. Empty means no
    /// family-based preference applies.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub family_class_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_prereq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_prereq_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_obsolete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_obsolete_name: Option<String>,
}

impl AmbitionFilters {
    pub fn is_empty(&self) -> bool {
        self == &AmbitionFilters::default()
    }
}

/// One typed-count requirement: "value of type", e.g. 3 of YIELD_WINE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedCount {
    #[serde(rename = "type")]
    pub type_id: String,
    #[serde(rename = "typeName")]
    pub type_name: String,
    pub value: i64,
}

/// Completion requirements. Heterogeneous by design: scalar thresholds,
/// typed-count lists and name lists, each omitted entirely when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    // Single-target requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub law_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theology_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diplomacy_all: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diplomacy_all_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_opinion_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_opinion_family_name: Option<String>,

    // Scalar thresholds; zero in the source means "not required".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cities: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connected_cities: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legitimacy: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonders: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laws: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizens: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialists: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luxuries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_luxuries: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub military_units: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_level_units: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urban_tiles: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urban_improvements: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_land: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_water: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governors: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_networks: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holy_cities: Option<i64>,

    // Typed-count lists, declaration order preserved.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yield_produced: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yield_sold: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yield_rate: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub yield_stockpile: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvements: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub improvement_classes: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialist_counts: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unit_traits: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub luxuries_hooked: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diplomacy: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub culture: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub culture_wonders: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tribes_killed: Vec<TypedCount>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missions_completed: Vec<TypedCount>,

    // Name-list requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub techs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_goals: Vec<String>,

    // Boolean requirements.
    #[serde(default, skip_serializing_if = "is_false")]
    pub state_religion: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub all_holy_cities: bool,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self == &Requirements::default()
    }
}

/// Static metadata for ambitions only obtainable through scripted events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    pub event_name: Option<String>,
    pub event_dlc: Option<String>,
    pub trigger: String,
}

/// Playable nation, with its available family classes materialized from the
/// family association table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nation {
    pub id: String,
    pub name: String,
    pub dlc: Option<String>,
    /// Sorted for deterministic output.
    pub family_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyClass {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_and_requirements_serialize_as_empty_objects() {
        let ambition = Ambition {
            id: "GOAL_TEST".to_string(),
            name: "Test".to_string(),
            short_name: String::new(),
            help_text: String::new(),
            ambition_class: 3,
            ambition_class_name: "Cities".to_string(),
            min_tier: 1,
            max_tier: 10,
            victory_eligible: false,
            dlc: None,
            filters: AmbitionFilters::default(),
            requirements: Requirements::default(),
            event_source: None,
        };
        let value = serde_json::to_value(&ambition).unwrap();
        assert_eq!(value["filters"], serde_json::json!({}));
        assert_eq!(value["requirements"], serde_json::json!({}));
        assert!(value["dlc"].is_null());
        assert!(value.get("eventSource").is_none());
        assert!(value.get("shortName").is_none());
    }

    #[test]
    fn requirements_omit_absent_fields() {
        let requirements = Requirements {
            cities: Some(4),
            yield_stockpile: vec![TypedCount {
                type_id: "YIELD_WINE".to_string(),
                type_name: "Wine".to_string(),
                value: 200,
            }],
            state_religion: true,
            ..Requirements::default()
        };
        let value = serde_json::to_value(&requirements).unwrap();
        assert_eq!(value["cities"], 4);
        assert_eq!(value["yieldStockpile"][0]["typeName"], "Wine");
        assert_eq!(value["stateReligion"], true);
        assert!(value.get("population").is_none());
        assert!(value.get("allHolyCities").is_none());
        assert!(value.get("yieldProduced").is_none());
    }
}
