//! Viewer-side logic: pure evaluation over an already-loaded dataset. These
//! functions never touch the filesystem and never mutate the records they
//! inspect.

pub mod availability;
pub mod filter;
pub mod page;

use std::collections::BTreeSet;

/// Victory-progress share at which a National Ambition counts as within
/// reach in the viewer. Display constant only, never stored per ambition.
pub const VICTORY_PROGRESS_THRESHOLD: f64 = 0.70;

/// The viewer's current pick: one nation and any number of family classes.
/// Empty fields mean "unknown", which never restricts availability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub nation: Option<String>,
    pub family_classes: BTreeSet<String>,
}

impl Selection {
    pub fn with_nation(nation: impl Into<String>) -> Selection {
        Selection {
            nation: Some(nation.into()),
            family_classes: BTreeSet::new(),
        }
    }

    pub fn add_family_class(&mut self, family_class: impl Into<String>) {
        self.family_classes.insert(family_class.into());
    }
}
