//! Command-line overrides for the helmet settings.

use std::path::PathBuf;

use clap::Args;

use crate::settings::{HudQuality, Settings};

/// Arguments shared by every helmet tool.
///
/// CLI values override settings loaded from `helmet.cfg` for the current run
/// only; they are applied after loading and are never written back on their
/// own.
#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// Directory holding `helmet.cfg` (overrides the default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Field of view in degrees, used to derive the scales on first run.
    #[arg(long, global = true)]
    pub fov: Option<f32>,

    /// Toggle the entire mod.
    #[arg(long, global = true)]
    pub enabled: Option<bool>,

    /// Toggle the HUD.
    #[arg(long, global = true)]
    pub hud: Option<bool>,

    /// HUD scale, -1.0 to 1.0.
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub hud_scale: Option<f64>,

    /// Visor scale, 0.2 to 2.0.
    #[arg(long, global = true)]
    pub visor_scale: Option<f64>,

    /// HUD texture quality.
    #[arg(long, global = true, value_enum)]
    pub hud_quality: Option<HudQuality>,
}

impl Settings {
    /// Apply CLI overrides to loaded settings.
    ///
    /// Numeric values go through the clamping setters.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(enabled) = args.enabled {
            self.enabled = enabled;
        }
        if let Some(hud) = args.hud {
            self.hud = hud;
        }
        if let Some(scale) = args.hud_scale {
            self.set_hud_scale(scale);
        }
        if let Some(scale) = args.visor_scale {
            self.set_visor_scale(scale);
        }
        if let Some(quality) = args.hud_quality {
            self.hud_quality = quality;
        }
    }
}
