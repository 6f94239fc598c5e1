//! One-time fixes for files written before certain elements existed.
//!
//! A rule is pending when none of the elements it introduced appeared as a
//! top-level line in the file. Pending rules run once, in order, after the
//! whole file has been parsed.

use crate::diagnostics::Diagnostics;
use crate::element::{ELEMENT_COUNT, Icon};
use crate::settings::Settings;

/// Elements whose header line was found while scanning a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenElements([bool; ELEMENT_COUNT]);

impl SeenElements {
    /// Every element present, as in any file the serializer wrote.
    #[must_use]
    pub fn all() -> Self {
        Self([true; ELEMENT_COUNT])
    }

    pub fn insert(&mut self, icon: Icon) {
        self.0[icon.index()] = true;
    }

    #[must_use]
    pub fn contains(&self, icon: Icon) -> bool {
        self.0[icon.index()]
    }
}

/// Resets neighbouring element positions to make room for new elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub name: &'static str,
    /// Elements added by the schema version this rule upgrades to.
    pub introduced: &'static [Icon],
    /// Elements whose positions go back to their defaults.
    pub resets: &'static [Icon],
    pub note: &'static str,
}

/// All rules, oldest first.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "status-icons",
        introduced: &[Icon::Thrusters, Icon::Lights],
        resets: &[Icon::Broadcasting, Icon::Dampeners],
        note: "The broadcasting and dampeners HUD elements' positions have been reset \
               because the lights and thrusters elements were added and required room.",
    },
    Migration {
        name: "hydrogen",
        introduced: &[Icon::Hydrogen],
        resets: &[Icon::Oxygen, Icon::Energy],
        note: "The oxygen and energy HUD elements' positions have been reset \
               because the hydrogen element was added and required room.",
    },
];

impl Migration {
    #[must_use]
    pub fn is_pending(&self, seen: &SeenElements) -> bool {
        !self.introduced.iter().any(|icon| seen.contains(*icon))
    }

    pub fn apply(&self, settings: &mut Settings) {
        for icon in self.resets {
            settings.element_mut(*icon).reset_position();
        }
    }
}

/// Run every pending rule and return the names of those applied.
pub fn apply_pending(
    settings: &mut Settings,
    seen: &SeenElements,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<&'static str> {
    let mut applied = Vec::new();
    for migration in MIGRATIONS.iter().filter(|m| m.is_pending(seen)) {
        migration.apply(settings);
        diagnostics.note(&format!("NOTE: {}", migration.note));
        applied.push(migration.name);
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectedDiagnostics;
    use crate::settings::build_defaults;

    fn moved(settings: &mut Settings, icon: Icon) {
        let element = settings.element_mut(icon);
        element.set_left(0.3);
        element.set_up(0.3);
    }

    #[test]
    fn test_nothing_pending_for_complete_file() {
        let seen = SeenElements::all();
        assert!(MIGRATIONS.iter().all(|m| !m.is_pending(&seen)));
    }

    #[test]
    fn test_any_introduced_element_suppresses_rule() {
        let mut seen = SeenElements::default();
        seen.insert(Icon::Lights);
        assert!(!MIGRATIONS[0].is_pending(&seen));
        assert!(MIGRATIONS[1].is_pending(&seen));
    }

    #[test]
    fn test_status_icons_rule_resets_neighbours() {
        let mut settings = build_defaults();
        moved(&mut settings, Icon::Broadcasting);
        moved(&mut settings, Icon::Dampeners);
        moved(&mut settings, Icon::Health);

        let mut seen = SeenElements::default();
        seen.insert(Icon::Hydrogen);
        let mut sink = CollectedDiagnostics::new();
        let applied = apply_pending(&mut settings, &seen, &mut sink);

        assert_eq!(applied, vec!["status-icons"]);
        assert_eq!(settings.element(Icon::Broadcasting).left(), 0.066);
        assert_eq!(settings.element(Icon::Dampeners).up(), -0.076);
        // Unrelated element keeps its parsed position.
        assert_eq!(settings.element(Icon::Health).left(), 0.3);
        assert_eq!(sink.notes.len(), 1);
        assert!(sink.is_clean());
    }

    #[test]
    fn test_rules_apply_in_order() {
        let mut settings = build_defaults();
        let mut sink = CollectedDiagnostics::new();
        let applied = apply_pending(&mut settings, &SeenElements::default(), &mut sink);
        assert_eq!(applied, vec!["status-icons", "hydrogen"]);
        assert_eq!(settings, build_defaults());
    }
}
