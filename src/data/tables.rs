//! Static tables maintained by hand, separate from parsing logic so data
//! updates never touch the extractor.

use crate::data::model::EventSource;

/// Ambition class id -> category name. The ids are game enum values with
/// gaps; unknown classes render as "Class N".
pub const AMBITION_CLASS_NAMES: &[(u32, &str)] = &[
    (1, "Laws"),
    (2, "Theologies"),
    (3, "Cities"),
    (4, "Tribes"),
    (5, "Production"),
    (6, "Stockpiles"),
    (7, "Workers & Rural"),
    (8, "Rural Improvements"),
    (9, "Wonders"),
    (10, "Culture"),
    (11, "Rural Specialists"),
    (12, "Urban Specialists"),
    (13, "Projects"),
    (14, "Diplomacy"),
    (15, "Religion"),
    (16, "Technology"),
    (17, "Combat"),
    (18, "Promotions"),
    (19, "Units"),
    (20, "Unique Units"),
    (21, "Leaders"),
    (22, "Exploration"),
    (23, "Trade"),
    (24, "Luxuries"),
    (25, "Conquest"),
    (26, "Population"),
    (27, "Urban Buildings"),
    (28, "Religious Buildings"),
    (29, "Urban Development"),
    (30, "Espionage"),
    (31, "Defense"),
    (39, "Repairs"),
    (40, "Lifestyle"),
];

pub fn ambition_class_name(class: u32) -> String {
    AMBITION_CLASS_NAMES
        .iter()
        .find(|(id, _)| *id == class)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Class {class}"))
}

struct EventOnlyEntry {
    id: &'static str,
    event_name: Option<&'static str>,
    dlc: Option<&'static str>,
    trigger: &'static str,
}

/// Ambitions with zero random-offer weight, only reachable through scripted
/// events. Sources compiled from in-game event chains.
const EVENT_ONLY_AMBITIONS: &[EventOnlyEntry] = &[
    EventOnlyEntry {
        id: "GOAL_LOSE_A_CITY",
        event_name: Some("Strength and Weakness"),
        dlc: Some("Behind the Throne"),
        trigger: "Leader must be Insane, 3+ upset families",
    },
    EventOnlyEntry {
        id: "GOAL_FURIOUS_FAMILY",
        event_name: Some("Strength and Weakness"),
        dlc: Some("Behind the Throne"),
        trigger: "Leader must be Insane, 3+ upset families",
    },
    EventOnlyEntry {
        id: "GOAL_TO_BE_KING",
        event_name: Some("To Be A King/Queen"),
        dlc: None,
        trigger: "Regent ruling with Rightful Heir alive",
    },
    EventOnlyEntry {
        id: "GOAL_THE_GREAT",
        event_name: Some("The Road to Glory"),
        dlc: None,
        trigger: "Young leader (under 30) with 2+ dead ancestors, on succession",
    },
    EventOnlyEntry {
        id: "GOAL_DESTROY_RIVALS",
        event_name: Some("Rivals event chain (Let the Land Burn / No Surrender)"),
        dlc: None,
        trigger: "At war, breach enemy city, part of Rivals chain",
    },
    EventOnlyEntry {
        id: "GOAL_KILL_CHARACTER",
        event_name: Some("[Character's] Mark"),
        dlc: Some("Behind the Throne"),
        trigger: "Child of leader (teen+), angry foreign leader nearby, have spymaster",
    },
    EventOnlyEntry {
        id: "GOAL_HARVEST_WINE",
        event_name: Some("A Refined Palate"),
        dlc: Some("Behind the Throne"),
        trigger: "Leader has high Charisma, unclaimed wine within 5 tiles",
    },
    EventOnlyEntry {
        id: "GOAL_TAKE_HANGING_GARDENS",
        event_name: Some("The Jewel of [Nation]"),
        dlc: Some("Behind the Throne"),
        trigger: "Another nation owns the Hanging Gardens",
    },
    EventOnlyEntry {
        id: "GOAL_TAKE_CITY",
        event_name: Some("Various conquest/rivalry events"),
        dlc: None,
        trigger: "Rivalry or conquest event chains",
    },
    EventOnlyEntry {
        id: "GOAL_STATE_RELIGION_SPECIFIC",
        event_name: Some("The Tutor Kartir"),
        dlc: Some("Sacred and Profane"),
        trigger: "Character studying, Zoroastrian city, Kartir tutor",
    },
    EventOnlyEntry {
        id: "GOAL_EIGHT_RELIGION_SPREAD_SPECIFIC",
        event_name: Some("In Heaven as on Earth"),
        dlc: Some("Sacred and Profane"),
        trigger: "Augustine character, Christianity, after High Synod mission",
    },
    EventOnlyEntry {
        id: "GOAL_FOUR_RELIGION_SPREAD_SPECIFIC",
        event_name: Some("Religion events"),
        dlc: Some("Sacred and Profane"),
        trigger: "Religion-specific event chains",
    },
    EventOnlyEntry {
        id: "GOAL_2000_EACH_YIELD",
        event_name: None,
        dlc: None,
        trigger: "Unused/placeholder goal",
    },
];

/// Static event metadata for an event-only ambition id, if it has any.
pub fn event_source_for(id: &str) -> Option<EventSource> {
    EVENT_ONLY_AMBITIONS
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| EventSource {
            event_name: entry.event_name.map(str::to_string),
            event_dlc: entry.dlc.map(str::to_string),
            trigger: entry.trigger.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_classes_resolve_and_gaps_render_generically() {
        assert_eq!(ambition_class_name(3), "Cities");
        assert_eq!(ambition_class_name(40), "Lifestyle");
        assert_eq!(ambition_class_name(32), "Class 32");
    }

    #[test]
    fn event_source_only_for_enumerated_ids() {
        let source = event_source_for("GOAL_TO_BE_KING").unwrap();
        assert_eq!(source.event_name.as_deref(), Some("To Be A King/Queen"));
        assert_eq!(source.event_dlc, None);
        assert!(event_source_for("GOAL_SIX_CITIES").is_none());
    }

    #[test]
    fn placeholder_goal_has_no_event_name() {
        let source = event_source_for("GOAL_2000_EACH_YIELD").unwrap();
        assert_eq!(source.event_name, None);
        assert_eq!(source.trigger, "Unused/placeholder goal");
    }
}
