//! Settings for the helmet HUD.
//!
//! The schema covers the global options and sixteen HUD elements, some of
//! which carry extra data (crosshair, markers, display). Settings persist to
//! a human-editable `key=value` file that tolerates hand edits: unknown or
//! malformed lines are reported and skipped, values are clamped into range,
//! and files from older layouts are migrated on load.

mod bounds;
mod cli;
mod color;
mod diagnostics;
mod element;
mod error;
mod migration;
mod parser;
mod sections;
mod serializer;
mod settings;
mod store;


pub use bounds::Bounds;
pub use cli::CliArgs;
pub use color::Color;
pub use diagnostics::{CollectedDiagnostics, Diagnostics, LogDiagnostics};
pub use element::{
    ELEMENT_COUNT, HUD_MODE, HudElement, Icon, POSITION, Section, VISIBILITY, WARN_DISABLED,
    WARN_MOVE_MODE, WARN_PERCENT, defaults,
};
pub use error::{ConfigError, Diagnostic};
pub use migration::{MIGRATIONS, Migration, SeenElements, apply_pending};
pub use parser::{ParseReport, parse_reader, parse_str};
pub use sections::{
    CROSSHAIR_SCALE, CROSSHAIR_SWAY_RATIO, CrosshairConfig, CrosshairType, DISPLAY_QUALITY,
    DISPLAY_RESOLUTION, DISPLAY_UPDATE_RATE, DisplayConfig, Extension, MARKER_POPUP_FONT_SIZE,
    MARKER_POPUP_OFFSET, MARKER_POPUP_SCALE, MARKER_SCALE, MarkerConfig, SUIT_COLOR_KEYWORD,
    SpeedUnit,
};
pub use serializer::{Rendered, render};
pub use settings::{
    ANIMATE_TIME, DELAYED_ROTATION, FOV_DEGREES, HUD_SCALE, HudQuality, REFERENCE_FOV, SCALE,
    Settings, VISOR_SCALE, WARN_BLINK_TIME, build_defaults, scale_for_fov,
};
pub use store::{ConfigStore, DirStorage, FILE_NAME, LoadOutcome, Storage};
