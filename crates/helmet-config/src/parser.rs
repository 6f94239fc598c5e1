//! Line-oriented settings parser.
//!
//! Grammar, per line:
//! - everything from `//` onwards is a comment; blank lines are skipped
//! - `key=value`, split on the first `=`; key and value are trimmed and
//!   lowercased
//! - a top-level key naming a HUD element opens a sub-block; following lines
//!   indented by at least two spaces configure that element until the next
//!   non-indented line
//!
//! Parsing never fails. Bad lines are reported to the injected
//! [`Diagnostics`] and the affected setting keeps its previous value.

use std::io::BufRead;

use crate::color::Color;
use crate::diagnostics::Diagnostics;
use crate::element::{Icon, Section};
use crate::error::{ConfigError, Diagnostic};
use crate::migration::{self, SeenElements};
use crate::sections::{CrosshairType, SUIT_COLOR_KEYWORD, SpeedUnit};
use crate::serializer;
use crate::settings::{HudQuality, Settings};

const COMMENT: &str = "//";
const INDENT: &str = "  ";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// What happened during a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Lines consumed, including blank and comment lines.
    pub lines: usize,
    /// False if reading stopped early; migrations did not run then.
    pub completed: bool,
    /// Names of the migrations that were applied.
    pub migrations: Vec<&'static str>,
}

/// Parse settings text into `settings`, overwriting only the keys present.
pub fn parse_str(
    settings: &mut Settings,
    text: &str,
    diagnostics: &mut dyn Diagnostics,
) -> ParseReport {
    let mut parser = Parser::new(settings, diagnostics);
    for line in text.lines() {
        parser.line(line);
    }
    parser.finish()
}

/// Parse settings from a reader.
///
/// Bytes that are not valid UTF-8 are replaced and the line is still parsed.
/// An I/O error stops the parse. Values applied before it stay applied.
pub fn parse_reader<R: BufRead>(
    settings: &mut Settings,
    mut reader: R,
    diagnostics: &mut dyn Diagnostics,
) -> ParseReport {
    let mut parser = Parser::new(settings, diagnostics);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                parser.line(line.trim_end_matches(['\n', '\r']));
            }
            Err(source) => return parser.abort(source),
        }
    }
    parser.finish()
}

struct Parser<'a> {
    settings: &'a mut Settings,
    diagnostics: &'a mut dyn Diagnostics,
    block: Option<Icon>,
    seen: SeenElements,
    line_no: usize,
}

impl<'a> Parser<'a> {
    fn new(settings: &'a mut Settings, diagnostics: &'a mut dyn Diagnostics) -> Self {
        Self {
            settings,
            diagnostics,
            block: None,
            seen: SeenElements::default(),
            line_no: 0,
        }
    }

    fn line(&mut self, raw: &str) {
        self.line_no += 1;

        let mut line = raw;
        if self.line_no == 1 {
            line = line.trim_start_matches(BYTE_ORDER_MARK);
        }
        if let Some(at) = line.find(COMMENT) {
            line = &line[..at];
        }
        if line.trim().is_empty() {
            return;
        }

        let Some((raw_key, value)) = line.split_once('=') else {
            self.diagnostics.report(Diagnostic::MalformedLine {
                line: self.line_no,
                text: line.trim().to_string(),
            });
            return;
        };

        let key = raw_key.trim().to_lowercase();
        let value = value.trim().to_lowercase();

        if let Some(icon) = self.block
            && raw_key.starts_with(INDENT)
        {
            self.sub_key(icon, &key, &value);
        } else {
            self.block = None;
            self.top_level(&key, &value);
        }
    }

    fn finish(self) -> ParseReport {
        let migrations = migration::apply_pending(self.settings, &self.seen, self.diagnostics);
        self.diagnostics.note(&format!(
            "Loaded settings:\n{}",
            serializer::render(self.settings, false)
        ));
        ParseReport {
            lines: self.line_no,
            completed: true,
            migrations,
        }
    }

    fn abort(self, source: std::io::Error) -> ParseReport {
        self.diagnostics
            .report(Diagnostic::Storage(ConfigError::ReadAborted {
                line: self.line_no,
                source,
            }));
        ParseReport {
            lines: self.line_no,
            completed: false,
            migrations: Vec::new(),
        }
    }

    // ── Assignment helpers ──────────────────────────────────────────

    fn invalid(&mut self, key: &str, value: &str) {
        self.diagnostics.report(Diagnostic::InvalidValue {
            line: self.line_no,
            key: key.to_string(),
            value: value.to_string(),
        });
    }

    fn assign<T>(
        &mut self,
        key: &str,
        value: &str,
        parsed: Option<T>,
        apply: impl FnOnce(&mut Settings, T),
    ) {
        match parsed {
            Some(v) => apply(self.settings, v),
            None => self.invalid(key, value),
        }
    }

    /// Assign into an element's extended configuration.
    fn assign_in<C, T>(
        &mut self,
        key: &str,
        value: &str,
        parsed: Option<T>,
        section: fn(&mut Settings) -> Option<&mut C>,
        apply: impl FnOnce(&mut C, T),
    ) {
        self.assign(key, value, parsed, |settings, v| {
            if let Some(config) = section(settings) {
                apply(config, v);
            }
        });
    }

    // ── Top level ───────────────────────────────────────────────────

    fn top_level(&mut self, key: &str, value: &str) {
        match key {
            "enabled" => self.assign(key, value, parse_bool(value), |s, v| s.enabled = v),
            "hud" => self.assign(key, value, parse_bool(value), |s, v| s.hud = v),
            "hudquality" => {
                self.assign(key, value, HudQuality::parse(value), |s, v| s.hud_quality = v);
            }
            "hudalways" => self.assign(key, value, parse_bool(value), |s, v| s.hud_always = v),
            "glass" | "glassreflections" => {
                self.assign(key, value, parse_bool(value), |s, v| s.glass_reflections = v);
            }
            "delayedrotation" => {
                self.assign(key, value, parse_f32(value), Settings::set_delayed_rotation);
            }
            "animatespeed" | "animatetime" => {
                self.assign(key, value, parse_f64(value), Settings::set_animate_time);
            }
            "autofovscale" => {
                self.assign(key, value, parse_bool(value), |s, v| s.auto_fov_scale = v);
            }
            "visorscale" => self.assign(key, value, parse_f64(value), Settings::set_visor_scale),
            "scale" => self.assign(key, value, parse_f64(value), Settings::set_scale),
            "hudscale" => self.assign(key, value, parse_f64(value), Settings::set_hud_scale),
            "togglehelmetincockpit" => self.assign(key, value, parse_bool(value), |s, v| {
                s.toggle_helmet_in_cockpit = v;
            }),
            "warnblinktime" => {
                self.assign(key, value, parse_f32(value), Settings::set_warn_blink_time);
            }
            "statusicononcolor" => self.assign(key, value, Color::parse_rgba(value), |s, v| {
                s.status_icon_on_color = v;
            }),
            "statusiconsetoncolor" => self.assign(key, value, Color::parse_rgba(value), |s, v| {
                s.status_icon_set_on_color = v;
            }),
            "statusiconoffcolor" => self.assign(key, value, Color::parse_rgba(value), |s, v| {
                s.status_icon_off_color = v;
            }),
            "statusiconsetoffcolor" => {
                self.assign(key, value, Color::parse_rgba(value), |s, v| {
                    s.status_icon_set_off_color = v;
                });
            }
            _ => {
                if let Some(icon) = Icon::from_name(key) {
                    self.element_header(icon, key, value);
                }
            }
        }
    }

    /// `name=mode` opens the element's sub-block and sets its visibility.
    ///
    /// Older files stored a boolean here; `true` maps to the element's
    /// default mode and `false` to 0.
    fn element_header(&mut self, icon: Icon, key: &str, value: &str) {
        self.block = Some(icon);
        self.seen.insert(icon);

        let default_mode = self.settings.element(icon).default_template().visibility();
        let parsed = parse_int(value)
            .or_else(|| parse_bool(value).map(|on| if on { default_mode } else { 0 }));
        self.assign(key, value, parsed, |s, v| s.element_mut(icon).set_visibility(v));
    }

    // ── Sub-blocks ──────────────────────────────────────────────────

    fn sub_key(&mut self, icon: Icon, key: &str, value: &str) {
        let section = icon.section();
        let handled = match section {
            Section::Horizon => key != "hudmode",
            Section::Crosshair => self.crosshair_key(key, value),
            Section::Markers => self.marker_key(key, value),
            Section::Display => self.display_key(key, value),
            Section::Generic => false,
        };
        if !handled {
            self.element_key(icon, section, key, value);
        }
    }

    /// Keys shared by every element.
    fn element_key(&mut self, icon: Icon, section: Section, key: &str, value: &str) {
        let has_warning = self.settings.element(icon).has_warning();
        match key {
            "up" | "left" if !section.has_position() => {}
            "up" => self.assign(key, value, parse_f64(value), |s, v| {
                s.element_mut(icon).set_up(v);
            }),
            "left" => self.assign(key, value, parse_f64(value), |s, v| {
                s.element_mut(icon).set_left(v);
            }),
            "hudmode" => self.assign(key, value, parse_int(value), |s, v| {
                s.element_mut(icon).set_hud_mode(v);
            }),
            "warnpercent" | "warnmovemode" if !has_warning => {}
            "warnpercent" => self.assign(key, value, parse_int(value), |s, v| {
                s.element_mut(icon).set_warn_percent(v);
            }),
            "warnmovemode" => self.assign(key, value, parse_int(value), |s, v| {
                s.element_mut(icon).set_warn_move_mode(v);
            }),
            _ => {}
        }
    }

    fn crosshair_key(&mut self, key: &str, value: &str) -> bool {
        let crosshair = Settings::crosshair_mut;
        match key {
            "type" => {
                let parsed = CrosshairType::from_name(value);
                self.assign_in(key, value, parsed, crosshair, |c, v| c.kind = v);
            }
            "color" => {
                let parsed = Color::parse_rgba(value);
                self.assign_in(key, value, parsed, crosshair, |c, v| c.color = v);
            }
            "scale" => {
                self.assign_in(key, value, parse_f32(value), crosshair, |c, v| c.set_scale(v));
            }
            "swayratio" => self.assign_in(key, value, parse_f32(value), crosshair, |c, v| {
                c.set_sway_ratio(v);
            }),
            _ => return false,
        }
        true
    }

    fn marker_key(&mut self, key: &str, value: &str) -> bool {
        let markers = Settings::markers_mut;
        match key {
            "showgps" => {
                self.assign_in(key, value, parse_bool(value), markers, |m, v| m.show_gps = v);
            }
            "showantennas" => self.assign_in(key, value, parse_bool(value), markers, |m, v| {
                m.show_antennas = v;
            }),
            "showbeacons" => self.assign_in(key, value, parse_bool(value), markers, |m, v| {
                m.show_beacons = v;
            }),
            "showblocks" => {
                self.assign_in(key, value, parse_bool(value), markers, |m, v| m.show_blocks = v);
            }
            "scale" => {
                self.assign_in(key, value, parse_f32(value), markers, |m, v| m.set_scale(v));
            }
            "colorgps" | "colorowned" | "colorfaction" | "colorenemy" | "colorneutral"
            | "colorblock" => {
                let parsed = Color::parse_rgba(value);
                self.assign_in(key, value, parsed, markers, |m, v| {
                    let slot = match key {
                        "colorgps" => &mut m.color_gps,
                        "colorowned" => &mut m.color_owned,
                        "colorfaction" => &mut m.color_faction,
                        "colorenemy" => &mut m.color_enemy,
                        "colorneutral" => &mut m.color_neutral,
                        _ => &mut m.color_block,
                    };
                    *slot = v;
                });
            }
            "popupfontcolor" | "popupbgcolor" | "popupedgecolor" => {
                let parsed = Color::parse_rgb(value);
                self.assign_in(key, value, parsed, markers, |m, v| {
                    let slot = match key {
                        "popupfontcolor" => &mut m.popup_font_color,
                        "popupbgcolor" => &mut m.popup_bg_color,
                        _ => &mut m.popup_edge_color,
                    };
                    *slot = v;
                });
            }
            "popupoffset" => self.assign_in(key, value, parse_pair(value), markers, |m, (x, y)| {
                m.set_popup_offset(x, y);
            }),
            "popupscale" => self.assign_in(key, value, parse_f32(value), markers, |m, v| {
                m.set_popup_scale(v);
            }),
            "popupfontsize" => self.assign_in(key, value, parse_f32(value), markers, |m, v| {
                m.set_popup_font_size(v);
            }),
            _ => return false,
        }
        true
    }

    fn display_key(&mut self, key: &str, value: &str) -> bool {
        let display = Settings::display_mut;
        match key {
            "update" | "updaterate" => self.assign_in(key, value, parse_int(value), display, |d, v| {
                d.set_update_rate(v);
            }),
            "quality" => {
                self.assign_in(key, value, parse_int(value), display, |d, v| d.set_quality(v));
            }
            "resolution" => self.assign_in(key, value, parse_int(value), display, |d, v| {
                d.set_resolution(v);
            }),
            "speedunit" => {
                let parsed = SpeedUnit::parse(value);
                self.assign_in(key, value, parsed, display, |d, v| d.speed_unit = v);
            }
            "fontcolor" => {
                let parsed = Color::parse_rgb(value);
                self.assign_in(key, value, parsed, display, |d, v| d.font_color = v);
            }
            "bgcolor" => {
                let parsed = Color::parse_rgb(value);
                self.assign_in(key, value, parsed, display, |d, v| d.bg_color = v);
            }
            "bordercolor" => {
                let parsed = if value == SUIT_COLOR_KEYWORD {
                    Some(None)
                } else {
                    Color::parse_rgb(value).map(Some)
                };
                self.assign_in(key, value, parsed, display, |d, v| d.border_color = v);
            }
            _ => return false,
        }
        true
    }
}

// ── Value grammar ───────────────────────────────────────────────────

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_int(value: &str) -> Option<i32> {
    value.parse().ok()
}

fn parse_f64(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_f32(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_pair(value: &str) -> Option<(f32, f32)> {
    let mut parts = value.split(',');
    let x = parse_f32(parts.next()?.trim())?;
    let y = parse_f32(parts.next()?.trim())?;
    Some((x, y))
}
