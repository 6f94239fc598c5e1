//! HUD element registry and per-element settings.

use std::sync::LazyLock;

use serde::Serialize;

use crate::bounds::Bounds;
use crate::sections::{CrosshairConfig, DisplayConfig, Extension, MarkerConfig};

/// Number of HUD elements. Adding one means extending [`Icon`] and
/// [`HudElement::template`] together.
pub const ELEMENT_COUNT: usize = 16;

pub const VISIBILITY: Bounds<i32> = Bounds::new(0, 3);
pub const POSITION: Bounds<f64> = Bounds::new(-1.0, 1.0);
pub const WARN_PERCENT: Bounds<i32> = Bounds::new(0, 100);
pub const WARN_MOVE_MODE: Bounds<i32> = Bounds::new(0, 2);
pub const HUD_MODE: Bounds<i32> = Bounds::new(0, 2);

/// Warning threshold value that disables the warning feature.
pub const WARN_DISABLED: i32 = -1;

/// Identity of a HUD element. The discriminant is its index in
/// [`Settings::elements`](crate::Settings::elements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Warning,
    Health,
    Energy,
    Oxygen,
    OxygenEnv,
    Hydrogen,
    Inventory,
    Thrusters,
    Dampeners,
    Lights,
    Broadcasting,
    Vector,
    Display,
    Horizon,
    Crosshair,
    Markers,
}

impl Icon {
    pub const ALL: [Icon; ELEMENT_COUNT] = [
        Icon::Warning,
        Icon::Health,
        Icon::Energy,
        Icon::Oxygen,
        Icon::OxygenEnv,
        Icon::Hydrogen,
        Icon::Inventory,
        Icon::Thrusters,
        Icon::Dampeners,
        Icon::Lights,
        Icon::Broadcasting,
        Icon::Vector,
        Icon::Display,
        Icon::Horizon,
        Icon::Crosshair,
        Icon::Markers,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase key used in the settings file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Icon::Warning => "warning",
            Icon::Health => "health",
            Icon::Energy => "energy",
            Icon::Oxygen => "oxygen",
            Icon::OxygenEnv => "oxygenenv",
            Icon::Hydrogen => "hydrogen",
            Icon::Inventory => "inventory",
            Icon::Thrusters => "thrusters",
            Icon::Dampeners => "dampeners",
            Icon::Lights => "lights",
            Icon::Broadcasting => "broadcasting",
            Icon::Vector => "vector",
            Icon::Display => "display",
            Icon::Horizon => "horizon",
            Icon::Crosshair => "crosshair",
            Icon::Markers => "markers",
        }
    }

    /// Look up an element by its lowercase key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|icon| icon.name() == name)
    }

    /// Which sub-keys this element understands.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Icon::Horizon => Section::Horizon,
            Icon::Crosshair => Section::Crosshair,
            Icon::Markers => Section::Markers,
            Icon::Display => Section::Display,
            _ => Section::Generic,
        }
    }

    /// Texture asset for elements drawn from a single icon.
    #[must_use]
    pub const fn material(self) -> Option<&'static str> {
        match self {
            Icon::Warning => Some("HelmetHUDIcon_Warning"),
            Icon::Thrusters => Some("HelmetHUDIcon_Thrusters"),
            Icon::Dampeners => Some("HelmetHUDIcon_Dampeners"),
            Icon::Lights => Some("HelmetHUDIcon_Lights"),
            Icon::Broadcasting => Some("HelmetHUDIcon_Broadcasting"),
            Icon::Markers => Some("HelmetMarker"),
            _ => None,
        }
    }
}

/// Sub-key grammar of an element's indented block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// `up`, `left`, `hudmode` and the warning keys.
    Generic,
    /// `hudmode` only.
    Horizon,
    /// `hudmode` and the crosshair keys; no position.
    Crosshair,
    /// `hudmode` and the marker keys; no position.
    Markers,
    /// Generic keys plus the display keys.
    Display,
}

impl Section {
    /// Whether `up`/`left` are meaningful.
    #[must_use]
    pub const fn has_position(self) -> bool {
        matches!(self, Section::Generic | Section::Display)
    }
}

/// One HUD icon or indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudElement {
    #[serde(rename = "name")]
    icon: Icon,
    visibility: i32,
    has_bar: bool,
    left: f64,
    up: f64,
    flip_horizontal: bool,
    warn_percent: i32,
    warn_move_mode: i32,
    hud_mode: i32,
    #[serde(skip_serializing_if = "Extension::is_none")]
    extension: Extension,
}

static DEFAULTS: LazyLock<[HudElement; ELEMENT_COUNT]> =
    LazyLock::new(|| Icon::ALL.map(HudElement::template));

/// Immutable per-element defaults, built once per process.
#[must_use]
pub fn defaults() -> &'static [HudElement; ELEMENT_COUNT] {
    &DEFAULTS
}

impl HudElement {
    fn base(icon: Icon) -> Self {
        let extension = match icon.section() {
            Section::Crosshair => Extension::Crosshair(CrosshairConfig::default()),
            Section::Markers => Extension::Markers(MarkerConfig::default()),
            Section::Display => Extension::Display(DisplayConfig::default()),
            Section::Generic | Section::Horizon => Extension::None,
        };
        Self {
            icon,
            visibility: 1,
            has_bar: false,
            left: 0.0,
            up: 0.0,
            flip_horizontal: false,
            warn_percent: WARN_DISABLED,
            warn_move_mode: 0,
            hud_mode: 0,
            extension,
        }
    }

    /// Compiled-in defaults for `icon`.
    #[must_use]
    pub fn template(icon: Icon) -> Self {
        let base = Self::base(icon);
        match icon {
            Icon::Warning => Self { up: 0.035, ..base },
            Icon::Health => Self {
                left: 0.085,
                up: -0.062,
                has_bar: true,
                warn_percent: 15,
                ..base
            },
            Icon::Energy => Self {
                left: -0.085,
                up: -0.058,
                has_bar: true,
                warn_percent: 15,
                flip_horizontal: true,
                ..base
            },
            Icon::Oxygen => Self {
                left: -0.08,
                up: -0.066,
                has_bar: true,
                warn_percent: 15,
                flip_horizontal: true,
                ..base
            },
            Icon::OxygenEnv => Self {
                left: -0.08,
                up: -0.066,
                ..base
            },
            Icon::Hydrogen => Self {
                left: -0.075,
                up: -0.074,
                has_bar: true,
                warn_percent: 20,
                warn_move_mode: 2,
                flip_horizontal: true,
                ..base
            },
            Icon::Inventory => Self {
                left: 0.075,
                up: -0.07,
                has_bar: true,
                ..base
            },
            Icon::Thrusters => Self {
                left: 0.084,
                up: -0.077,
                ..base
            },
            Icon::Dampeners => Self {
                left: 0.078,
                up: -0.076,
                ..base
            },
            Icon::Lights => Self {
                left: 0.072,
                up: -0.075,
                ..base
            },
            Icon::Broadcasting => Self {
                left: 0.066,
                up: -0.074,
                ..base
            },
            Icon::Vector => Self { up: -0.048, ..base },
            Icon::Display => Self {
                visibility: 3,
                hud_mode: 2,
                up: -0.07,
                ..base
            },
            Icon::Horizon => Self {
                hud_mode: 2,
                has_bar: true,
                ..base
            },
            Icon::Crosshair | Icon::Markers => Self {
                hud_mode: 2,
                ..base
            },
        }
    }

    /// The immutable defaults this element was copied from.
    #[must_use]
    pub fn default_template(&self) -> &'static HudElement {
        &defaults()[self.icon.index()]
    }

    #[must_use]
    pub fn icon(&self) -> Icon {
        self.icon
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.icon.name()
    }

    /// 0 never, 1 only with the helmet on, 2 only with the helmet off, 3 always.
    #[must_use]
    pub fn visibility(&self) -> i32 {
        self.visibility
    }

    pub fn set_visibility(&mut self, mode: i32) {
        self.visibility = VISIBILITY.clamp(mode);
    }

    /// Whether a depleting bar is drawn next to the icon.
    #[must_use]
    pub fn has_bar(&self) -> bool {
        self.has_bar
    }

    #[must_use]
    pub fn flip_horizontal(&self) -> bool {
        self.flip_horizontal
    }

    /// Offset from screen center; positive left.
    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn set_left(&mut self, value: f64) {
        self.left = POSITION.clamp(value);
    }

    /// Offset from screen center; positive up.
    #[must_use]
    pub fn up(&self) -> f64 {
        self.up
    }

    pub fn set_up(&mut self, value: f64) {
        self.up = POSITION.clamp(value);
    }

    /// Put the position back to the compiled default.
    pub fn reset_position(&mut self) {
        let template = self.default_template();
        self.left = template.left;
        self.up = template.up;
    }

    /// Whether this element supports a warning threshold at all.
    #[must_use]
    pub fn has_warning(&self) -> bool {
        self.default_template().warn_percent != WARN_DISABLED
    }

    /// Warning threshold in percent, or [`WARN_DISABLED`].
    #[must_use]
    pub fn warn_percent(&self) -> i32 {
        self.warn_percent
    }

    /// Any negative value disables the warning. No-op for elements without
    /// warning support.
    pub fn set_warn_percent(&mut self, value: i32) {
        if !self.has_warning() {
            return;
        }
        self.warn_percent = if value < 0 {
            WARN_DISABLED
        } else {
            WARN_PERCENT.clamp(value)
        };
    }

    /// 0 any movement mode, 1 jetpack off, 2 jetpack on.
    #[must_use]
    pub fn warn_move_mode(&self) -> i32 {
        self.warn_move_mode
    }

    pub fn set_warn_move_mode(&mut self, mode: i32) {
        self.warn_move_mode = WARN_MOVE_MODE.clamp(mode);
    }

    /// 0 any, 1 while the game HUD is shown, 2 while it is hidden.
    #[must_use]
    pub fn hud_mode(&self) -> i32 {
        self.hud_mode
    }

    pub fn set_hud_mode(&mut self, mode: i32) {
        self.hud_mode = HUD_MODE.clamp(mode);
    }

    #[must_use]
    pub fn extension(&self) -> &Extension {
        &self.extension
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<&CrosshairConfig> {
        match &self.extension {
            Extension::Crosshair(c) => Some(c),
            _ => None,
        }
    }

    pub fn crosshair_mut(&mut self) -> Option<&mut CrosshairConfig> {
        match &mut self.extension {
            Extension::Crosshair(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn markers(&self) -> Option<&MarkerConfig> {
        match &self.extension {
            Extension::Markers(m) => Some(m),
            _ => None,
        }
    }

    pub fn markers_mut(&mut self) -> Option<&mut MarkerConfig> {
        match &mut self.extension {
            Extension::Markers(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub fn display(&self) -> Option<&DisplayConfig> {
        match &self.extension {
            Extension::Display(d) => Some(d),
            _ => None,
        }
    }

    pub fn display_mut(&mut self) -> Option<&mut DisplayConfig> {
        match &mut self.extension {
            Extension::Display(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_in_order() {
        for (i, icon) in Icon::ALL.into_iter().enumerate() {
            assert_eq!(icon.index(), i);
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
            assert_eq!(defaults()[i].icon(), icon);
        }
    }

    #[test]
    fn test_names_are_unique_lowercase() {
        let mut names: Vec<_> = Icon::ALL.iter().map(|i| i.name()).collect();
        assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase())));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ELEMENT_COUNT);
    }

    #[test]
    fn test_icon_materials() {
        let textured: Vec<_> = Icon::ALL
            .into_iter()
            .filter_map(|icon| icon.material().map(|m| (icon, m)))
            .collect();
        assert_eq!(
            textured,
            vec![
                (Icon::Warning, "HelmetHUDIcon_Warning"),
                (Icon::Thrusters, "HelmetHUDIcon_Thrusters"),
                (Icon::Dampeners, "HelmetHUDIcon_Dampeners"),
                (Icon::Lights, "HelmetHUDIcon_Lights"),
                (Icon::Broadcasting, "HelmetHUDIcon_Broadcasting"),
                (Icon::Markers, "HelmetMarker"),
            ]
        );
    }

    #[test]
    fn test_defaults_are_in_range() {
        for element in defaults() {
            assert!(VISIBILITY.contains(element.visibility()));
            assert!(POSITION.contains(element.left()));
            assert!(POSITION.contains(element.up()));
            assert!(WARN_MOVE_MODE.contains(element.warn_move_mode()));
            assert!(HUD_MODE.contains(element.hud_mode()));
            let warn = element.warn_percent();
            assert!(warn == WARN_DISABLED || WARN_PERCENT.contains(warn));
        }
    }

    #[test]
    fn test_extension_follows_identity() {
        for element in defaults() {
            let icon = element.icon();
            assert_eq!(element.crosshair().is_some(), icon == Icon::Crosshair);
            assert_eq!(element.markers().is_some(), icon == Icon::Markers);
            assert_eq!(element.display().is_some(), icon == Icon::Display);
        }
    }

    #[test]
    fn test_warn_percent_sentinel() {
        let mut health = HudElement::template(Icon::Health);
        health.set_warn_percent(-42);
        assert_eq!(health.warn_percent(), WARN_DISABLED);
        health.set_warn_percent(250);
        assert_eq!(health.warn_percent(), 100);

        let mut vector = HudElement::template(Icon::Vector);
        vector.set_warn_percent(50);
        assert_eq!(vector.warn_percent(), WARN_DISABLED);
    }

    #[test]
    fn test_reset_position() {
        let mut dampeners = HudElement::template(Icon::Dampeners);
        dampeners.set_left(0.5);
        dampeners.set_up(0.5);
        dampeners.reset_position();
        assert_eq!(dampeners.left(), 0.078);
        assert_eq!(dampeners.up(), -0.076);
    }
}
