//! Structural validation of a normalized ambitions document. Errors mean the
//! viewer cannot trust the data; warnings flag dangling references that only
//! degrade display.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::data::dataset::{load_dataset, AmbitionDataset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

pub fn validate_dataset(dataset: &AmbitionDataset) -> ValidationReport {
    let mut report = ValidationReport::default();

    let ambition_ids: HashSet<&str> =
        dataset.ambitions.iter().map(|a| a.id.as_str()).collect();
    let mut seen_ids = HashSet::new();

    for (index, ambition) in dataset.ambitions.iter().enumerate() {
        let context = format!("ambitions[{index}] id='{}'", ambition.id);

        if ambition.id.trim().is_empty() {
            report.push(ValidationSeverity::Error, context.clone(), "empty id");
        } else if !seen_ids.insert(ambition.id.as_str()) {
            report.push(
                ValidationSeverity::Error,
                context.clone(),
                format!("duplicate id '{}'", ambition.id),
            );
        }

        if ambition.name.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.name"),
                "missing non-empty 'name'",
            );
        }

        if !(1..=10).contains(&ambition.min_tier)
            || !(1..=10).contains(&ambition.max_tier)
            || ambition.min_tier > ambition.max_tier
        {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.minTier"),
                format!(
                    "tier bounds {}..{} violate 1 <= min <= max <= 10",
                    ambition.min_tier, ambition.max_tier
                ),
            );
        }

        if !dataset.ambition_classes.contains_key(&ambition.ambition_class) {
            report.push(
                ValidationSeverity::Warning,
                format!("{context}.ambitionClass"),
                format!("unknown ambition class {}", ambition.ambition_class),
            );
        }

        if let Some(nation) = &ambition.filters.nation_prereq {
            if !dataset.nations.contains_key(nation) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.filters.nationPrereq"),
                    format!("references unknown nation '{nation}'"),
                );
            }
        }
        for family_class in &ambition.filters.family_classes {
            if !dataset.family_classes.contains_key(family_class) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.filters.familyClasses"),
                    format!("references unknown family class '{family_class}'"),
                );
            }
        }
        for sub_goal in &ambition.requirements.sub_goals {
            if !ambition_ids.contains(sub_goal.as_str()) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.requirements.subGoals"),
                    format!("references unknown ambition '{sub_goal}'"),
                );
            }
        }
    }

    for (id, nation) in &dataset.nations {
        let context = format!("nations['{id}']");
        if nation.name.trim().is_empty() {
            report.push(
                ValidationSeverity::Error,
                format!("{context}.name"),
                "missing non-empty 'name'",
            );
        }
        for family_class in &nation.family_classes {
            if !dataset.family_classes.contains_key(family_class) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.familyClasses"),
                    format!("references unknown family class '{family_class}'"),
                );
            }
        }
        if nation.family_classes.is_empty() {
            report.push(
                ValidationSeverity::Info,
                context,
                "nation has no family classes",
            );
        }
    }

    report
}

pub fn validate_dataset_file(path: &Path) -> Result<ValidationReport, String> {
    let dataset =
        load_dataset(path).map_err(|err| format!("'{}': {err}", path.display()))?;
    Ok(validate_dataset(&dataset))
}
