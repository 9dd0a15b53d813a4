//! Availability Evaluator: can the selected nation/family setup be offered a
//! given ambition? Two gates only, both advisory approximations of the
//! game's offer filters.

use crate::data::model::Ambition;
use crate::viewer::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub available: bool,
    /// Human-readable explanations, one per failed gate. Empty when
    /// available.
    pub reasons: Vec<String>,
}

/// Evaluate both gates. An empty selection field never restricts: no nation
/// picked means the nation gate passes, no families picked means the family
/// gate passes.
pub fn evaluate(ambition: &Ambition, selection: &Selection) -> Availability {
    let mut reasons = Vec::new();

    if let (Some(required), Some(selected)) =
        (&ambition.filters.nation_prereq, &selection.nation)
    {
        if required != selected {
            // Fall back to the raw id when the name never resolved.
            let name = ambition
                .filters
                .nation_prereq_name
                .as_deref()
                .unwrap_or(required);
            reasons.push(format!("Requires {name}"));
        }
    }

    // Family preference is permissive by design: any overlap between the
    // ambition's preferred classes and the selected ones passes.
    let preferred = &ambition.filters.family_classes;
    if !preferred.is_empty() && !selection.family_classes.is_empty() {
        let overlap = preferred
            .iter()
            .any(|fc| selection.family_classes.contains(fc));
        if !overlap {
            let names = if ambition.filters.family_class_names.len() == preferred.len() {
                &ambition.filters.family_class_names
            } else {
                preferred
            };
            reasons.push(format!("Preferred by: {}", names.join(", ")));
        }
    }

    Availability {
        available: reasons.is_empty(),
        reasons,
    }
}
