//! Root settings aggregate and its compiled-in defaults.

use serde::Serialize;

use crate::bounds::Bounds;
use crate::color::Color;
use crate::element::{ELEMENT_COUNT, HudElement, Icon, defaults};
use crate::sections::{CrosshairConfig, DisplayConfig, MarkerConfig};

pub const DELAYED_ROTATION: Bounds<f32> = Bounds::new(0.0, 1.0);
pub const ANIMATE_TIME: Bounds<f64> = Bounds::new(0.0, 3.0);
pub const VISOR_SCALE: Bounds<f64> = Bounds::new(0.2, 2.0);
pub const SCALE: Bounds<f64> = Bounds::new(-1.0, 1.0);
pub const HUD_SCALE: Bounds<f64> = Bounds::new(-1.0, 1.0);
pub const WARN_BLINK_TIME: Bounds<f32> = Bounds::new(0.05, 5.0);

/// Field of view range considered when deriving the initial scale.
pub const FOV_DEGREES: Bounds<f32> = Bounds::new(40.0, 140.0);
/// FOV at which the derived scale is zero.
pub const REFERENCE_FOV: f32 = 60.0;

const HELMET_MODEL: &str = "vignette";

/// Quality tier for the more expensive HUD elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HudQuality {
    #[value(name = "verylow")]
    VeryLow,
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

impl HudQuality {
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Ultra,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VeryLow => "verylow",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Ultra => "ultra",
        }
    }

    /// Accepts the tier name or its numeric index.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(index) = text.parse::<usize>() {
            return Self::ALL.get(index).copied();
        }
        Self::ALL.into_iter().find(|q| q.name() == text)
    }
}

/// Every persisted setting plus the HUD element array.
///
/// Numeric fields are private and only assignable through setters that
/// clamp to their published [`Bounds`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// Toggles the entire mod.
    pub enabled: bool,
    /// Toggles the HUD.
    pub hud: bool,
    pub hud_quality: HudQuality,
    /// Show non-disabled elements even with the helmet off.
    pub hud_always: bool,
    pub glass_reflections: bool,
    delayed_rotation: f32,
    animate_time: f64,
    /// Re-derive `scale` and `hud_scale` whenever the FOV changes.
    pub auto_fov_scale: bool,
    visor_scale: f64,
    scale: f64,
    hud_scale: f64,
    pub toggle_helmet_in_cockpit: bool,
    warn_blink_time: f32,
    pub status_icon_on_color: Color,
    pub status_icon_set_on_color: Color,
    pub status_icon_off_color: Color,
    pub status_icon_set_off_color: Color,
    elements: [HudElement; ELEMENT_COUNT],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            hud: true,
            hud_quality: HudQuality::High,
            hud_always: false,
            glass_reflections: true,
            delayed_rotation: 0.5,
            animate_time: 0.3,
            auto_fov_scale: false,
            visor_scale: 1.0,
            scale: 0.0,
            hud_scale: 0.0,
            toggle_helmet_in_cockpit: false,
            warn_blink_time: 0.25,
            status_icon_on_color: Color::WHITE,
            status_icon_set_on_color: Color::rgb(0, 255, 0),
            status_icon_off_color: Color::RED,
            status_icon_set_off_color: Color::rgb(255, 120, 0),
            elements: defaults().clone(),
        }
    }
}

/// A fresh, fully populated settings instance.
///
/// Independent of anything previously loaded.
#[must_use]
pub fn build_defaults() -> Settings {
    Settings::default()
}

/// Derive `(scale, hud_scale)` from a field of view in degrees.
///
/// The FOV is clamped to [`FOV_DEGREES`], normalized around
/// [`REFERENCE_FOV`] in 30 degree steps, scaled by 0.65 above the reference
/// and 1.2 below it, rounded to two decimals, then clamped to the scale
/// ranges.
#[must_use]
pub fn scale_for_fov(fov_degrees: f32) -> (f64, f64) {
    let fov = f64::from(FOV_DEGREES.clamp(fov_degrees));
    let mut normalized = (fov - f64::from(REFERENCE_FOV)) / 30.0;

    if normalized > 0.0 {
        normalized *= 0.65;
    } else if normalized < 0.0 {
        normalized *= 1.2;
    }

    let rounded = round_to(normalized, 2);
    (SCALE.clamp(rounded), HUD_SCALE.clamp(rounded))
}

/// Round half to even at `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

impl Settings {
    /// Helmet delay when rotating the view; 1 fully smoothed, 0 disabled.
    #[must_use]
    pub fn delayed_rotation(&self) -> f32 {
        self.delayed_rotation
    }

    pub fn set_delayed_rotation(&mut self, value: f32) {
        self.delayed_rotation = DELAYED_ROTATION.clamp(value);
    }

    /// Helmet on/off animation time in seconds.
    #[must_use]
    pub fn animate_time(&self) -> f64 {
        self.animate_time
    }

    /// Clamped, then rounded to five decimals.
    pub fn set_animate_time(&mut self, value: f64) {
        self.animate_time = round_to(ANIMATE_TIME.clamp(value), 5);
    }

    #[must_use]
    pub fn visor_scale(&self) -> f64 {
        self.visor_scale
    }

    pub fn set_visor_scale(&mut self, value: f64) {
        self.visor_scale = VISOR_SCALE.clamp(value);
    }

    /// Helmet glass scale. Kept for older files; renderers use `visor_scale`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, value: f64) {
        self.scale = SCALE.clamp(value);
    }

    #[must_use]
    pub fn hud_scale(&self) -> f64 {
        self.hud_scale
    }

    pub fn set_hud_scale(&mut self, value: f64) {
        self.hud_scale = HUD_SCALE.clamp(value);
    }

    /// Seconds between each blink of the warning icon.
    #[must_use]
    pub fn warn_blink_time(&self) -> f32 {
        self.warn_blink_time
    }

    pub fn set_warn_blink_time(&mut self, value: f32) {
        self.warn_blink_time = WARN_BLINK_TIME.clamp(value);
    }

    /// Set `scale` and `hud_scale` from a field of view.
    pub fn apply_fov(&mut self, fov_degrees: f32) {
        let (scale, hud_scale) = scale_for_fov(fov_degrees);
        self.scale = scale;
        self.hud_scale = hud_scale;
    }

    /// Model name for the helmet mesh.
    #[must_use]
    pub fn helmet_model(&self) -> String {
        if self.glass_reflections {
            HELMET_MODEL.to_string()
        } else {
            format!("{HELMET_MODEL}NoReflection")
        }
    }

    /// All elements in registry order.
    #[must_use]
    pub fn elements(&self) -> &[HudElement; ELEMENT_COUNT] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, icon: Icon) -> &HudElement {
        &self.elements[icon.index()]
    }

    pub fn element_mut(&mut self, icon: Icon) -> &mut HudElement {
        &mut self.elements[icon.index()]
    }

    #[must_use]
    pub fn crosshair(&self) -> Option<&CrosshairConfig> {
        self.element(Icon::Crosshair).crosshair()
    }

    #[must_use]
    pub fn markers(&self) -> Option<&MarkerConfig> {
        self.element(Icon::Markers).markers()
    }

    #[must_use]
    pub fn display(&self) -> Option<&DisplayConfig> {
        self.element(Icon::Display).display()
    }

    pub fn crosshair_mut(&mut self) -> Option<&mut CrosshairConfig> {
        self.element_mut(Icon::Crosshair).crosshair_mut()
    }

    pub fn markers_mut(&mut self) -> Option<&mut MarkerConfig> {
        self.element_mut(Icon::Markers).markers_mut()
    }

    pub fn display_mut(&mut self) -> Option<&mut DisplayConfig> {
        self.element_mut(Icon::Display).display_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{HUD_MODE, POSITION, VISIBILITY, WARN_DISABLED, WARN_PERCENT};
    use crate::sections::{CROSSHAIR_SCALE, DISPLAY_RESOLUTION, MARKER_POPUP_SCALE};

    #[test]
    fn test_defaults_are_in_range() {
        let s = build_defaults();
        assert!(DELAYED_ROTATION.contains(s.delayed_rotation()));
        assert!(ANIMATE_TIME.contains(s.animate_time()));
        assert!(VISOR_SCALE.contains(s.visor_scale()));
        assert!(SCALE.contains(s.scale()));
        assert!(HUD_SCALE.contains(s.hud_scale()));
        assert!(WARN_BLINK_TIME.contains(s.warn_blink_time()));

        for e in s.elements() {
            assert!(VISIBILITY.contains(e.visibility()));
            assert!(POSITION.contains(e.left()) && POSITION.contains(e.up()));
            assert!(HUD_MODE.contains(e.hud_mode()));
            assert!(e.warn_percent() == WARN_DISABLED || WARN_PERCENT.contains(e.warn_percent()));
        }

        assert!(CROSSHAIR_SCALE.contains(s.crosshair().unwrap().scale()));
        assert!(MARKER_POPUP_SCALE.contains(s.markers().unwrap().popup_scale()));
        assert!(DISPLAY_RESOLUTION.contains(s.display().unwrap().resolution()));
    }

    #[test]
    fn test_defaults_do_not_share_state() {
        let mut a = build_defaults();
        a.element_mut(Icon::Health).set_left(0.5);
        let b = build_defaults();
        assert_eq!(b.element(Icon::Health).left(), 0.085);
        assert_eq!(defaults()[Icon::Health.index()].left(), 0.085);
    }

    #[test]
    fn test_fov_reference_is_zero() {
        assert_eq!(scale_for_fov(REFERENCE_FOV), (0.0, 0.0));
    }

    #[test]
    fn test_fov_slopes_are_asymmetric() {
        // +30 degrees: 1.0 * 0.65
        assert_eq!(scale_for_fov(90.0), (0.65, 0.65));
        // -15 degrees: -0.5 * 1.2
        assert_eq!(scale_for_fov(45.0), (-0.6, -0.6));
    }

    #[test]
    fn test_fov_is_clamped_both_ways() {
        // Below 40 behaves like 40: -20/30 * 1.2 = -0.8
        assert_eq!(scale_for_fov(10.0), (-0.8, -0.8));
        assert_eq!(scale_for_fov(40.0), (-0.8, -0.8));
        // 140 gives 80/30 * 0.65 = 1.73, clamped to the scale range
        assert_eq!(scale_for_fov(170.0), (1.0, 1.0));
    }

    #[test]
    fn test_fov_rounds_to_two_decimals() {
        let (scale, _) = scale_for_fov(70.0);
        // 10/30 * 0.65 = 0.21666...
        assert_eq!(scale, 0.22);
    }

    #[test]
    fn test_setters_clamp() {
        let mut s = build_defaults();
        s.set_scale(999.0);
        assert_eq!(s.scale(), SCALE.max);
        s.set_scale(-999.0);
        assert_eq!(s.scale(), SCALE.min);
        s.set_visor_scale(0.0);
        assert_eq!(s.visor_scale(), 0.2);
        s.set_animate_time(1.234_567_89);
        assert_eq!(s.animate_time(), 1.23457);
    }

    #[test]
    fn test_helmet_model() {
        let mut s = build_defaults();
        assert_eq!(s.helmet_model(), "vignette");
        s.glass_reflections = false;
        assert_eq!(s.helmet_model(), "vignetteNoReflection");
    }

    #[test]
    fn test_hud_quality_parse() {
        assert_eq!(HudQuality::parse("verylow"), Some(HudQuality::VeryLow));
        assert_eq!(HudQuality::parse("4"), Some(HudQuality::Ultra));
        assert_eq!(HudQuality::parse("5"), None);
        assert_eq!(HudQuality::parse("extreme"), None);
    }
}
