//! Extended configuration owned by specific HUD elements.
//!
//! Only the crosshair, markers and display elements carry one of these. They
//! hang off the owning [`HudElement`](crate::HudElement) as its
//! [`Extension`] payload.

use serde::Serialize;

use crate::bounds::Bounds;
use crate::color::Color;

pub const CROSSHAIR_SCALE: Bounds<f32> = Bounds::new(0.0001, 10.0);
pub const CROSSHAIR_SWAY_RATIO: Bounds<f32> = Bounds::new(0.0, 1.0);

pub const MARKER_SCALE: Bounds<f32> = Bounds::new(0.001, 10.0);
pub const MARKER_POPUP_FONT_SIZE: Bounds<f32> = Bounds::new(0.001, 10.0);
pub const MARKER_POPUP_OFFSET: Bounds<f32> = Bounds::new(-1.0, 1.0);
pub const MARKER_POPUP_SCALE: Bounds<f32> = Bounds::new(0.01, 5.0);

pub const DISPLAY_UPDATE_RATE: Bounds<i32> = Bounds::new(1, 60);
pub const DISPLAY_QUALITY: Bounds<i32> = Bounds::new(0, 1);
pub const DISPLAY_RESOLUTION: Bounds<i32> = Bounds::new(128, 4096);

/// Literal stored in place of a border color to mean "use the suit color".
pub const SUIT_COLOR_KEYWORD: &str = "suit";

/// Element-specific payload, selected by the element's identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Extension {
    None,
    Crosshair(CrosshairConfig),
    Markers(MarkerConfig),
    Display(DisplayConfig),
}

impl Extension {
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ── Crosshair ───────────────────────────────────────────────────────

/// Crosshair texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrosshairType {
    Vanilla,
    Extended,
    Dot,
}

impl CrosshairType {
    pub const ALL: [Self; 3] = [Self::Vanilla, Self::Extended, Self::Dot];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vanilla => "vanilla",
            Self::Extended => "extended",
            Self::Dot => "dot",
        }
    }

    /// Texture asset backing this crosshair.
    #[must_use]
    pub const fn material(self) -> &'static str {
        match self {
            Self::Vanilla => "HelmetCrosshairVanilla",
            Self::Extended => "HelmetCrosshairExtended",
            Self::Dot => "HelmetCrosshairDot",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosshairConfig {
    pub kind: CrosshairType,
    pub color: Color,
    scale: f32,
    sway_ratio: f32,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            kind: CrosshairType::Extended,
            color: Color::rgba(0, 55, 255, 255),
            scale: 0.75,
            sway_ratio: 0.1,
        }
    }
}

impl CrosshairConfig {
    /// Size of the crosshair, independent of the HUD scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, value: f32) {
        self.scale = CROSSHAIR_SCALE.clamp(value);
    }

    /// 0 keeps the crosshair locked to the camera, 1 follows the helmet.
    #[must_use]
    pub fn sway_ratio(&self) -> f32 {
        self.sway_ratio
    }

    pub fn set_sway_ratio(&mut self, value: f32) {
        self.sway_ratio = CROSSHAIR_SWAY_RATIO.clamp(value);
    }
}

// ── Markers ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerConfig {
    pub show_gps: bool,
    pub show_antennas: bool,
    pub show_beacons: bool,
    pub show_blocks: bool,
    scale: f32,
    pub color_gps: Color,
    pub color_owned: Color,
    pub color_faction: Color,
    pub color_enemy: Color,
    pub color_neutral: Color,
    pub color_block: Color,
    popup_font_size: f32,
    pub popup_font_color: Color,
    pub popup_bg_color: Color,
    pub popup_edge_color: Color,
    popup_offset: (f32, f32),
    popup_scale: f32,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            show_gps: true,
            show_antennas: true,
            show_beacons: true,
            show_blocks: true,
            scale: 1.0,
            color_gps: Color::PURPLE,
            color_owned: Color::rgb(0, 55, 255),
            color_faction: Color::GREEN,
            color_enemy: Color::RED,
            color_neutral: Color::WHITE,
            color_block: Color::YELLOW,
            popup_font_size: 1.0,
            popup_font_color: Color::rgb(100, 180, 255),
            popup_bg_color: Color::BLACK,
            popup_edge_color: Color::rgb(0, 55, 200),
            popup_offset: (0.045, -0.01),
            popup_scale: 1.0,
        }
    }
}

impl MarkerConfig {
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, value: f32) {
        self.scale = MARKER_SCALE.clamp(value);
    }

    #[must_use]
    pub fn popup_font_size(&self) -> f32 {
        self.popup_font_size
    }

    pub fn set_popup_font_size(&mut self, value: f32) {
        self.popup_font_size = MARKER_POPUP_FONT_SIZE.clamp(value);
    }

    /// Popup offset relative to the crosshair.
    #[must_use]
    pub fn popup_offset(&self) -> (f32, f32) {
        self.popup_offset
    }

    pub fn set_popup_offset(&mut self, x: f32, y: f32) {
        self.popup_offset = (MARKER_POPUP_OFFSET.clamp(x), MARKER_POPUP_OFFSET.clamp(y));
    }

    #[must_use]
    pub fn popup_scale(&self) -> f32 {
        self.popup_scale
    }

    pub fn set_popup_scale(&mut self, value: f32) {
        self.popup_scale = MARKER_POPUP_SCALE.clamp(value);
    }
}

// ── Display ─────────────────────────────────────────────────────────

/// Unit used for speed readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    Mps,
    Kph,
}

impl SpeedUnit {
    pub const ALL: [Self; 2] = [Self::Mps, Self::Kph];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mps => "mps",
            Self::Kph => "kph",
        }
    }

    /// Accepts the unit name or its numeric index.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(index) = text.parse::<usize>() {
            return Self::ALL.get(index).copied();
        }
        Self::ALL.into_iter().find(|u| u.name() == text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayConfig {
    update_rate: i32,
    quality: i32,
    resolution: i32,
    pub font_color: Color,
    pub bg_color: Color,
    /// `None` inherits the suit color.
    pub border_color: Option<Color>,
    pub speed_unit: SpeedUnit,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            update_rate: 20,
            quality: 1,
            resolution: 512,
            font_color: Color::rgb(151, 226, 255),
            bg_color: Color::rgb(1, 2, 3),
            border_color: None,
            speed_unit: SpeedUnit::Mps,
        }
    }
}

impl DisplayConfig {
    /// Updates per second.
    #[must_use]
    pub fn update_rate(&self) -> i32 {
        self.update_rate
    }

    pub fn set_update_rate(&mut self, value: i32) {
        self.update_rate = DISPLAY_UPDATE_RATE.clamp(value);
    }

    /// Model detail: 0 low, 1 normal.
    #[must_use]
    pub fn quality(&self) -> i32 {
        self.quality
    }

    pub fn set_quality(&mut self, value: i32) {
        self.quality = DISPLAY_QUALITY.clamp(value);
    }

    /// Screen texture edge length in pixels.
    #[must_use]
    pub fn resolution(&self) -> i32 {
        self.resolution
    }

    pub fn set_resolution(&mut self, value: i32) {
        self.resolution = DISPLAY_RESOLUTION.clamp(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crosshair_materials() {
        let materials = CrosshairType::ALL.map(CrosshairType::material);
        assert_eq!(
            materials,
            [
                "HelmetCrosshairVanilla",
                "HelmetCrosshairExtended",
                "HelmetCrosshairDot"
            ]
        );
    }

    #[test]
    fn test_crosshair_type_names() {
        for kind in CrosshairType::ALL {
            assert_eq!(CrosshairType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CrosshairType::from_name("circle"), None);
    }

    #[test]
    fn test_speed_unit_accepts_index() {
        assert_eq!(SpeedUnit::parse("kph"), Some(SpeedUnit::Kph));
        assert_eq!(SpeedUnit::parse("1"), Some(SpeedUnit::Kph));
        assert_eq!(SpeedUnit::parse("2"), None);
        assert_eq!(SpeedUnit::parse("mph"), None);
    }

    #[test]
    fn test_setters_clamp() {
        let mut display = DisplayConfig::default();
        display.set_update_rate(0);
        display.set_resolution(100_000);
        assert_eq!(display.update_rate(), 1);
        assert_eq!(display.resolution(), 4096);

        let mut markers = MarkerConfig::default();
        markers.set_popup_offset(5.0, -5.0);
        assert_eq!(markers.popup_offset(), (1.0, -1.0));

        let mut crosshair = CrosshairConfig::default();
        crosshair.set_scale(0.0);
        assert_eq!(crosshair.scale(), 0.0001);
    }
}
