//! Renders [`Settings`] back into the line-oriented text format.
//!
//! Output is deterministic and always valid parser input. Sub-keys are
//! emitted under exactly the conditions the parser accepts them.

use std::fmt;

use crate::color::Color;
use crate::element::{HudElement, Section, VISIBILITY};
use crate::sections::{
    CrosshairConfig, CrosshairType, DISPLAY_RESOLUTION, DISPLAY_UPDATE_RATE, DisplayConfig,
    MarkerConfig, SUIT_COLOR_KEYWORD, SpeedUnit,
};
use crate::settings::{HUD_SCALE, HudQuality, SCALE, Settings, VISOR_SCALE};

/// Render `settings`, optionally annotating each line with its purpose,
/// valid range and default.
#[must_use]
pub fn render(settings: &Settings, comments: bool) -> String {
    Rendered { settings, comments }.to_string()
}

/// Display adapter behind [`render`].
pub struct Rendered<'a> {
    pub settings: &'a Settings,
    pub comments: bool,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.settings;
        let d = Settings::default();

        if self.comments {
            writeln!(
                f,
                "// Helmet settings. This file is rewritten after every load, so custom comments are not kept."
            )?;
            writeln!(f, "// Reload it while the game is running by typing in chat: /helmet reload")?;
            writeln!(f, "// Lines starting with // are comments")?;
            writeln!(f)?;
        }

        self.entry(
            f,
            "Enabled",
            s.enabled,
            format_args!("toggles the entire mod, default: {}", d.enabled),
        )?;
        self.entry(f, "HUD", s.hud, format_args!("toggles the HUD, default: {}", d.hud))?;
        self.entry(
            f,
            "HUDQuality",
            s.hud_quality.name(),
            format_args!(
                "quality of the more expensive HUD elements, currently the vector indicator. Values: {}, default: {}",
                join_names(HudQuality::ALL.map(|q| q.name())),
                d.hud_quality.name()
            ),
        )?;
        self.entry(
            f,
            "HUDAlways",
            s.hud_always,
            format_args!(
                "if true, HUD elements are shown even with the helmet off, except disabled ones (set to 0), default: {}",
                d.hud_always
            ),
        )?;
        self.entry(
            f,
            "GlassReflections",
            s.glass_reflections,
            format_args!("toggles the reflections on the helmet glass, default: {}", d.glass_reflections),
        )?;
        self.entry(
            f,
            "DelayedRotation",
            s.delayed_rotation(),
            format_args!(
                "0.0 to 1.0, how much the helmet lags behind when rotating the view, 1 is fully smoothed and 0 disables it, default: {}",
                d.delayed_rotation()
            ),
        )?;
        self.entry(
            f,
            "AnimateTime",
            s.animate_time(),
            format_args!(
                "helmet on/off animation time in seconds, 0 instantly shows/hides the helmet and HUD, default: {}",
                d.animate_time()
            ),
        )?;
        self.entry(
            f,
            "AutoFOVScale",
            s.auto_fov_scale,
            format_args!(
                "if true, 'scale' and 'hudscale' follow in-game FOV changes, default: {}",
                d.auto_fov_scale
            ),
        )?;
        self.entry(
            f,
            "VisorScale",
            s.visor_scale(),
            format_args!(
                "helmet visor scale regardless of FOV. Values from {VISOR_SCALE}, default: {}",
                d.visor_scale()
            ),
        )?;
        self.entry(
            f,
            "Scale",
            s.scale(),
            format_args!(
                "(no longer used) the helmet glass scale, {SCALE}, default: {}, then set from your FOV on the first run",
                d.scale()
            ),
        )?;
        self.entry(
            f,
            "HUDScale",
            s.hud_scale(),
            format_args!(
                "the entire HUD scale, {HUD_SCALE}, default: {}, then set from your FOV on the first run",
                d.hud_scale()
            ),
        )?;
        self.entry(
            f,
            "ToggleHelmetInCockpit",
            s.toggle_helmet_in_cockpit,
            format_args!(
                "allow toggling the helmet inside a cockpit. The key is also monitored while in menus. Default: {}",
                d.toggle_helmet_in_cockpit
            ),
        )?;
        self.entry(
            f,
            "WarnBlinkTime",
            s.warn_blink_time(),
            format_args!(
                "seconds between each hide/show of the warning icon and its bar, default: {}",
                d.warn_blink_time()
            ),
        )?;

        if self.comments {
            writeln!(f)?;
        }

        self.entry(
            f,
            "StatusIconOnColor",
            s.status_icon_on_color,
            format_args!(
                "status icon color (jetpack, lights, etc.) when on, in RGBA format. Default: {}",
                d.status_icon_on_color
            ),
        )?;
        self.entry(
            f,
            "StatusIconSetOnColor",
            s.status_icon_set_on_color,
            format_args!(
                "status icon color right after turning on, fades to the on color. Default: {}",
                d.status_icon_set_on_color
            ),
        )?;
        self.entry(
            f,
            "StatusIconOffColor",
            s.status_icon_off_color,
            format_args!("status icon color when off. Default: {}", d.status_icon_off_color),
        )?;
        self.entry(
            f,
            "StatusIconSetOffColor",
            s.status_icon_set_off_color,
            format_args!(
                "status icon color right after turning off, fades to the off color. Default: {}",
                d.status_icon_set_off_color
            ),
        )?;

        if self.comments {
            writeln!(f)?;
            writeln!(f, "// Individual HUD element configuration")?;
        }

        for element in s.elements() {
            self.element(f, element)?;
        }
        Ok(())
    }
}

impl Rendered<'_> {
    fn entry(
        &self,
        f: &mut fmt::Formatter<'_>,
        key: &str,
        value: impl fmt::Display,
        comment: fmt::Arguments<'_>,
    ) -> fmt::Result {
        write!(f, "{key}={value}")?;
        if self.comments {
            write!(f, " // {comment}")?;
        }
        writeln!(f)
    }

    fn element(&self, f: &mut fmt::Formatter<'_>, e: &HudElement) -> fmt::Result {
        let d = e.default_template();
        let section = e.icon().section();

        self.entry(
            f,
            &upper_first(e.name()),
            e.visibility(),
            format_args!(
                "when to show this element, {VISIBILITY}: 0 = never, 1 = only when the helmet is on, 2 = only when the helmet is off, 3 = always; default: {}",
                d.visibility()
            ),
        )?;

        if section.has_position() {
            self.entry(
                f,
                "  Up",
                e.up(),
                format_args!("position from the center towards up, negative values go down; default: {}", d.up()),
            )?;
            self.entry(
                f,
                "  Left",
                e.left(),
                format_args!(
                    "position from the center towards left, negative values go right; default: {}",
                    d.left()
                ),
            )?;
        }

        self.entry(
            f,
            "  HudMode",
            e.hud_mode(),
            format_args!(
                "show depending on the game HUD: 0 = any, 1 = only while the HUD is visible, 2 = only while it is hidden; default: {}",
                d.hud_mode()
            ),
        )?;

        match section {
            Section::Horizon => return Ok(()),
            Section::Crosshair => {
                if let (Some(c), Some(dc)) = (e.crosshair(), d.crosshair()) {
                    self.crosshair(f, c, dc)?;
                }
            }
            Section::Markers => {
                if let (Some(m), Some(dm)) = (e.markers(), d.markers()) {
                    self.markers(f, m, dm)?;
                }
            }
            Section::Display => {
                if let (Some(disp), Some(dd)) = (e.display(), d.display()) {
                    self.display(f, disp, dd)?;
                }
            }
            Section::Generic => {}
        }

        if e.has_warning() {
            self.entry(
                f,
                "  WarnPercent",
                e.warn_percent(),
                format_args!("warning threshold in percent, -1 disables the warning; default: {}", d.warn_percent()),
            )?;
            self.entry(
                f,
                "  WarnMoveMode",
                e.warn_move_mode(),
                format_args!(
                    "warn only in a movement mode: 0 = any, 1 = jetpack off, 2 = jetpack on; default: {}",
                    d.warn_move_mode()
                ),
            )?;
        }

        Ok(())
    }

    fn crosshair(
        &self,
        f: &mut fmt::Formatter<'_>,
        c: &CrosshairConfig,
        d: &CrosshairConfig,
    ) -> fmt::Result {
        self.entry(
            f,
            "  Type",
            c.kind.name(),
            format_args!(
                "crosshair texture, default: {}; options: {}",
                d.kind.name(),
                join_names(CrosshairType::ALL.map(|t| t.name()))
            ),
        )?;
        self.entry(
            f,
            "  Color",
            c.color,
            format_args!("crosshair color in RGBA format, default: {}", d.color),
        )?;
        self.entry(
            f,
            "  Scale",
            c.scale(),
            format_args!("size of the crosshair, independent of the HUD scale, default: {}", d.scale()),
        )?;
        self.entry(
            f,
            "  SwayRatio",
            c.sway_ratio(),
            format_args!(
                "0 locks the crosshair to the camera, 1 makes it follow the helmet entirely. Default: {}",
                d.sway_ratio()
            ),
        )
    }

    fn markers(
        &self,
        f: &mut fmt::Formatter<'_>,
        m: &MarkerConfig,
        d: &MarkerConfig,
    ) -> fmt::Result {
        self.entry(
            f,
            "  ShowGPS",
            m.show_gps,
            format_args!("whether GPS markers are shown, default: {}", d.show_gps),
        )?;
        self.entry(
            f,
            "  ShowAntennas",
            m.show_antennas,
            format_args!("whether antenna markers are shown, default: {}", d.show_antennas),
        )?;
        self.entry(
            f,
            "  ShowBeacons",
            m.show_beacons,
            format_args!("whether beacon markers are shown, default: {}", d.show_beacons),
        )?;
        self.entry(
            f,
            "  ShowBlocks",
            m.show_blocks,
            format_args!("whether block markers (show in HUD) are shown, default: {}", d.show_blocks),
        )?;
        self.entry(
            f,
            "  Scale",
            m.scale(),
            format_args!("scales all markers, default: {}", d.scale()),
        )?;

        let colors = [
            ("  ColorGPS", m.color_gps, d.color_gps, "GPS markers"),
            ("  ColorOwned", m.color_owned, d.color_owned, "your own signals"),
            ("  ColorFaction", m.color_faction, d.color_faction, "faction signals"),
            ("  ColorEnemy", m.color_enemy, d.color_enemy, "enemy signals"),
            ("  ColorNeutral", m.color_neutral, d.color_neutral, "neutral signals"),
            ("  ColorBlock", m.color_block, d.color_block, "block signals"),
        ];
        for (key, value, default, what) in colors {
            self.entry(
                f,
                key,
                value,
                format_args!("color of {what} in RGBA format, default: {default}"),
            )?;
        }

        self.entry(
            f,
            "  PopupFontSize",
            m.popup_font_size(),
            format_args!("font size of the marker info popup, default: {}", d.popup_font_size()),
        )?;
        self.entry(
            f,
            "  PopupFontColor",
            m.popup_font_color.display_rgb(),
            format_args!("font color of the marker info popup, default: {}", d.popup_font_color.display_rgb()),
        )?;
        self.entry(
            f,
            "  PopupBGColor",
            m.popup_bg_color.display_rgb(),
            format_args!("background color of the marker info popup, default: {}", d.popup_bg_color.display_rgb()),
        )?;
        self.entry(
            f,
            "  PopupEdgeColor",
            m.popup_edge_color.display_rgb(),
            format_args!(
                "background edge color of the marker info popup, default: {}",
                d.popup_edge_color.display_rgb()
            ),
        )?;
        let (x, y) = m.popup_offset();
        let (dx, dy) = d.popup_offset();
        self.entry(
            f,
            "  PopupOffset",
            format_args!("{x}, {y}"),
            format_args!("offset of the popup relative to the crosshair, default: {dx}, {dy}"),
        )?;
        self.entry(
            f,
            "  PopupScale",
            m.popup_scale(),
            format_args!("scale of the marker info popup, default: {}", d.popup_scale()),
        )
    }

    fn display(
        &self,
        f: &mut fmt::Formatter<'_>,
        disp: &DisplayConfig,
        d: &DisplayConfig,
    ) -> fmt::Result {
        self.entry(
            f,
            "  UpdateRate",
            disp.update_rate(),
            format_args!(
                "updates per second, {} (depends on simulation speed), default: {}",
                DISPLAY_UPDATE_RATE,
                d.update_rate()
            ),
        )?;
        self.entry(
            f,
            "  Quality",
            disp.quality(),
            format_args!("model detail, 1 is normal and 0 is low quality, default: {}", d.quality()),
        )?;
        self.entry(
            f,
            "  Resolution",
            disp.resolution(),
            format_args!(
                "screen texture width and height in pixels, {}, default: {}",
                DISPLAY_RESOLUTION,
                d.resolution()
            ),
        )?;
        self.entry(
            f,
            "  FontColor",
            disp.font_color.display_rgb(),
            format_args!("text color in R,G,B format, default: {}", d.font_color.display_rgb()),
        )?;
        self.entry(
            f,
            "  BGColor",
            disp.bg_color.display_rgb(),
            format_args!("background color in R,G,B format, default: {}", d.bg_color.display_rgb()),
        )?;
        self.entry(
            f,
            "  BorderColor",
            BorderColor(disp.border_color),
            format_args!(
                "frame color in R,G,B format or \"{SUIT_COLOR_KEYWORD}\" to use the suit color, default: {}",
                BorderColor(d.border_color)
            ),
        )?;
        self.entry(
            f,
            "  SpeedUnit",
            disp.speed_unit.name(),
            format_args!(
                "unit for speed readouts, default: {}; options: {}",
                d.speed_unit.name(),
                join_names(SpeedUnit::ALL.map(|u| u.name()))
            ),
        )
    }
}

struct BorderColor(Option<Color>);

impl fmt::Display for BorderColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(color) => write!(f, "{}", color.display_rgb()),
            None => f.write_str(SUIT_COLOR_KEYWORD),
        }
    }
}

fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn join_names<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Icon;
    use crate::settings::build_defaults;

    fn lines_with_key<'a>(text: &'a str, key: &str) -> Vec<&'a str> {
        text.lines().filter(|l| l.trim_start().starts_with(key)).collect()
    }

    #[test]
    fn test_plain_render_has_no_comments() {
        let text = render(&build_defaults(), false);
        assert!(!text.contains("//"));
        assert!(text.starts_with("Enabled=true\nHUD=true\nHUDQuality=high\n"));
    }

    #[test]
    fn test_commented_render_annotates_every_line() {
        let text = render(&build_defaults(), true);
        for line in text.lines().filter(|l| !l.is_empty()) {
            assert!(line.contains("//"), "missing comment: {line}");
        }
        assert!(text.contains("VisorScale=1 // helmet visor scale regardless of FOV. Values from 0.2 to 2, default: 1"));
    }

    #[test]
    fn test_every_element_is_rendered_in_order() {
        let text = render(&build_defaults(), false);
        let headers: Vec<&str> = text
            .lines()
            .filter(|l| !l.starts_with(' '))
            .filter_map(|l| l.split_once('=').map(|(k, _)| k))
            .filter(|k| Icon::from_name(&k.to_lowercase()).is_some())
            .collect();
        let expected: Vec<String> = Icon::ALL.iter().map(|i| upper_first(i.name())).collect();
        assert_eq!(headers, expected);
    }

    #[test]
    fn test_position_suppressed_for_positionless_elements() {
        let text = render(&build_defaults(), false);
        // 13 elements with a position: everything but horizon, crosshair, markers.
        assert_eq!(lines_with_key(&text, "Up=").len(), 13);
        assert_eq!(lines_with_key(&text, "Left=").len(), 13);
    }

    #[test]
    fn test_warning_keys_only_where_supported() {
        let text = render(&build_defaults(), false);
        // health, energy, oxygen, hydrogen
        assert_eq!(lines_with_key(&text, "WarnPercent=").len(), 4);
        assert_eq!(lines_with_key(&text, "WarnMoveMode=").len(), 4);
    }

    #[test]
    fn test_horizon_block_is_hudmode_only() {
        let text = render(&build_defaults(), false);
        let block: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.starts_with("Horizon="))
            .skip(1)
            .take_while(|l| l.starts_with("  "))
            .collect();
        assert_eq!(block, vec!["  HudMode=2"]);
    }

    #[test]
    fn test_border_color_renders_sentinel() {
        let mut settings = build_defaults();
        let text = render(&settings, false);
        assert!(text.contains("  BorderColor=suit\n"));

        settings.display_mut().unwrap().border_color = Some(Color::rgb(1, 2, 3));
        let text = render(&settings, false);
        assert!(text.contains("  BorderColor=1, 2, 3\n"));
    }

    #[test]
    fn test_color_and_pair_formats() {
        let text = render(&build_defaults(), false);
        assert!(text.contains("StatusIconSetOffColor=255, 120, 0, 255\n"));
        assert!(text.contains("  PopupFontColor=100, 180, 255\n"));
        assert!(text.contains("  PopupOffset=0.045, -0.01\n"));
        assert!(text.contains("  Color=0, 55, 255, 255\n"));
    }

    #[test]
    fn test_scale_comments_state_default() {
        let text = render(&build_defaults(), true);
        assert!(text.contains(
            "Scale=0 // (no longer used) the helmet glass scale, -1 to 1, default: 0, then set from your FOV on the first run\n"
        ));
        assert!(text.contains(
            "HUDScale=0 // the entire HUD scale, -1 to 1, default: 0, then set from your FOV on the first run\n"
        ));
    }

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("oxygenenv"), "Oxygenenv");
        assert_eq!(upper_first(""), "");
    }
}
