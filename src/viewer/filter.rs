//! Filter/Search Engine: applies a query to the full ambition list and
//! produces the two display lists (regular and National) with availability
//! and summary counts.

use crate::data::dataset::AmbitionDataset;
use crate::data::model::Ambition;
use crate::viewer::availability::{self, Availability};
use crate::viewer::Selection;

/// Viewer query state. The accepted-count bounds are the "ambitions already
/// completed" range (0..=9); an ambition offered at tier N is reachable when
/// N-1 ambitions have been accepted, hence the +1 shift in [tier_overlap].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    pub accepted_min: u32,
    pub accepted_max: u32,
    pub ambition_class: Option<u32>,
    pub search: String,
    pub show_unavailable: bool,
}

impl Default for FilterQuery {
    fn default() -> FilterQuery {
        FilterQuery {
            accepted_min: 0,
            accepted_max: 9,
            ambition_class: None,
            search: String::new(),
            show_unavailable: true,
        }
    }
}

/// One list row: the record plus its evaluated availability.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbitionView<'a> {
    pub ambition: &'a Ambition,
    pub availability: Availability,
}

/// Query outcome. Totals count every record that matched the tier, class and
/// search criteria; the view lists additionally drop unavailable records
/// when `show_unavailable` is off. Totals are therefore the "of M total" in
/// the viewer summary regardless of visibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult<'a> {
    pub regular: Vec<AmbitionView<'a>>,
    pub national: Vec<AmbitionView<'a>>,
    pub regular_total: usize,
    pub regular_available: usize,
    pub national_total: usize,
    pub national_available: usize,
}

impl QueryResult<'_> {
    pub fn summary(&self) -> String {
        format!(
            "{} available of {} total ambitions, {} available of {} National Ambitions",
            self.regular_available, self.regular_total, self.national_available,
            self.national_total
        )
    }
}

/// A National Ambition is victory-eligible and pinned to the final tier.
pub fn is_national_ambition(ambition: &Ambition) -> bool {
    ambition.victory_eligible && ambition.min_tier == 10 && ambition.max_tier == 10
}

/// Tier inclusion is range overlap between the ambition's offer window and
/// the accepted-count range shifted to tiers.
fn tier_overlap(ambition: &Ambition, query: &FilterQuery) -> bool {
    ambition.max_tier >= query.accepted_min + 1 && ambition.min_tier <= query.accepted_max + 1
}

fn matches(ambition: &Ambition, query: &FilterQuery) -> bool {
    if !tier_overlap(ambition, query) {
        return false;
    }
    if let Some(class) = query.ambition_class {
        if ambition.ambition_class != class {
            return false;
        }
    }
    let term = query.search.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    ambition.name.to_lowercase().contains(&term)
        || ambition.ambition_class_name.to_lowercase().contains(&term)
        || ambition.help_text.to_lowercase().contains(&term)
        || ambition
            .filters
            .family_class_names
            .iter()
            .any(|name| name.to_lowercase().contains(&term))
}

/// Run a query against the whole dataset. Regular and National Ambitions are
/// partitioned into separate lists; both get the same criteria, availability
/// evaluation and ordering.
pub fn run_query<'a>(
    dataset: &'a AmbitionDataset,
    selection: &Selection,
    query: &FilterQuery,
) -> QueryResult<'a> {
    let mut result = QueryResult::default();

    for ambition in &dataset.ambitions {
        if !matches(ambition, query) {
            continue;
        }
        let national = is_national_ambition(ambition);
        let evaluated = availability::evaluate(ambition, selection);

        if national {
            result.national_total += 1;
        } else {
            result.regular_total += 1;
        }
        if evaluated.available {
            if national {
                result.national_available += 1;
            } else {
                result.regular_available += 1;
            }
        } else if !query.show_unavailable {
            continue;
        }

        let view = AmbitionView {
            ambition,
            availability: evaluated,
        };
        if national {
            result.national.push(view);
        } else {
            result.regular.push(view);
        }
    }

    order_views(&mut result.regular);
    order_views(&mut result.national);
    result
}

/// Total ordering: available first, then ascending minTier, then name (byte
/// order). Stable sort keeps declaration order for full ties.
fn order_views(views: &mut [AmbitionView<'_>]) {
    views.sort_by(|a, b| {
        b.availability
            .available
            .cmp(&a.availability.available)
            .then(a.ambition.min_tier.cmp(&b.ambition.min_tier))
            .then(a.ambition.name.cmp(&b.ambition.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AmbitionFilters, Requirements};

    fn ambition(id: &str, name: &str, min_tier: u32, max_tier: u32) -> Ambition {
        Ambition {
            id: id.to_string(),
            name: name.to_string(),
            short_name: String::new(),
            help_text: String::new(),
            ambition_class: 3,
            ambition_class_name: "Cities".to_string(),
            min_tier,
            max_tier,
            victory_eligible: false,
            dlc: None,
            filters: AmbitionFilters::default(),
            requirements: Requirements::default(),
            event_source: None,
        }
    }

    fn dataset(ambitions: Vec<Ambition>) -> AmbitionDataset {
        AmbitionDataset {
            ambitions,
            ..AmbitionDataset::default()
        }
    }

    #[test]
    fn tier_overlap_is_inclusive_on_both_ends() {
        // Offer window tiers 3..=5; accepted counts shift by one.
        let a = ambition("GOAL_A", "A", 3, 5);
        let overlap = |min, max| {
            tier_overlap(
                &a,
                &FilterQuery {
                    accepted_min: min,
                    accepted_max: max,
                    ..FilterQuery::default()
                },
            )
        };
        assert!(!overlap(0, 1)); // tiers 1..=2, below the window
        assert!(overlap(0, 2)); // tier 3 touches the lower bound
        assert!(overlap(3, 5)); // tiers 4..=6 overlap
        assert!(overlap(4, 9)); // tier 5 touches the upper bound
        assert!(!overlap(5, 9)); // tiers 6..=10, above the window
    }

    #[test]
    fn ordering_is_min_tier_then_name() {
        let data = dataset(vec![
            ambition("GOAL_1", "B", 2, 10),
            ambition("GOAL_2", "A", 2, 10),
            ambition("GOAL_3", "C", 1, 10),
        ]);
        let result = run_query(&data, &Selection::default(), &FilterQuery::default());
        let names: Vec<_> = result.regular.iter().map(|v| v.ambition.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn unavailable_records_sort_last_but_stay_counted() {
        let mut gated = ambition("GOAL_GATED", "A", 1, 10);
        gated.filters.nation_prereq = Some("NATION_ROME".to_string());
        let data = dataset(vec![gated, ambition("GOAL_OPEN", "Z", 1, 10)]);
        let selection = Selection::with_nation("NATION_EGYPT");

        let shown = run_query(&data, &selection, &FilterQuery::default());
        let names: Vec<_> = shown.regular.iter().map(|v| v.ambition.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A"]);
        assert_eq!((shown.regular_available, shown.regular_total), (1, 2));

        let hidden = run_query(
            &data,
            &selection,
            &FilterQuery {
                show_unavailable: false,
                ..FilterQuery::default()
            },
        );
        assert_eq!(hidden.regular.len(), 1);
        // Hidden records still count toward the total.
        assert_eq!((hidden.regular_available, hidden.regular_total), (1, 2));
    }

    #[test]
    fn national_ambitions_are_partitioned_by_the_iff_rule() {
        let mut national = ambition("GOAL_N", "National", 10, 10);
        national.victory_eligible = true;
        let mut eligible_but_early = ambition("GOAL_E", "Early", 1, 10);
        eligible_but_early.victory_eligible = true;
        let pinned_not_eligible = ambition("GOAL_P", "Pinned", 10, 10);

        assert!(is_national_ambition(&national));
        assert!(!is_national_ambition(&eligible_but_early));
        assert!(!is_national_ambition(&pinned_not_eligible));

        let data = dataset(vec![national, eligible_but_early, pinned_not_eligible]);
        let result = run_query(&data, &Selection::default(), &FilterQuery::default());
        assert_eq!(result.national.len(), 1);
        assert_eq!(result.national[0].ambition.id, "GOAL_N");
        assert_eq!(result.regular.len(), 2);
    }

    #[test]
    fn search_matches_name_class_help_and_family_names() {
        let mut by_help = ambition("GOAL_H", "Plain", 1, 10);
        by_help.help_text = "Stockpile plenty of Wine".to_string();
        let mut by_family = ambition("GOAL_F", "Other", 1, 10);
        by_family.filters.family_class_names = vec!["Sages".to_string()];
        let data = dataset(vec![by_help, by_family]);

        let search = |term: &str| {
            run_query(
                &data,
                &Selection::default(),
                &FilterQuery {
                    search: term.to_string(),
                    ..FilterQuery::default()
                },
            )
            .regular_total
        };
        assert_eq!(search("wine"), 1);
        assert_eq!(search("sages"), 1);
        assert_eq!(search("cities"), 2); // class name matches both
        assert_eq!(search("nothing-matches"), 0);
        assert_eq!(search(""), 2);
    }

    #[test]
    fn class_filter_is_exact() {
        let mut other_class = ambition("GOAL_O", "Other", 1, 10);
        other_class.ambition_class = 7;
        let data = dataset(vec![ambition("GOAL_C", "C", 1, 10), other_class]);
        let result = run_query(
            &data,
            &Selection::default(),
            &FilterQuery {
                ambition_class: Some(3),
                ..FilterQuery::default()
            },
        );
        assert_eq!(result.regular_total, 1);
        assert_eq!(result.regular[0].ambition.id, "GOAL_C");
    }
}
