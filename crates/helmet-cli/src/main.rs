//! `helmet`: inspect and maintain the helmet settings file.
//!
//! Every invocation opens the store, which loads, migrates and rewrites the
//! file in its normalized form before the subcommand runs.
//!
//! Run with: `cargo run -p helmet-cli -- show --comments`

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use helmet_config::{
    CliArgs, ConfigStore, DirStorage, FILE_NAME, LoadOutcome, LogDiagnostics, scale_for_fov,
};
use tracing::{error, info};

/// FOV assumed on first run when `--fov` is not given.
const DEFAULT_FOV: f32 = 70.0;

#[derive(Parser, Debug)]
#[command(name = "helmet", about = "Helmet HUD settings tool")]
struct HelmetArgs {
    #[command(flatten)]
    common: CliArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// Print the current settings.
    Show {
        /// Include the per-line comments written to disk.
        #[arg(long, conflicts_with = "json")]
        comments: bool,

        /// Print as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Re-read the settings file from defaults and rewrite it.
    Reload,
    /// Print the settings file location.
    Path,
    /// Print the scale and HUD scale derived from a field of view.
    Fov {
        #[arg(allow_hyphen_values = true)]
        degrees: f32,
    },
}

fn storage_for(args: &CliArgs) -> Option<DirStorage> {
    match &args.config {
        Some(dir) => Some(DirStorage::new(dir)),
        None => DirStorage::default_location(),
    }
}

fn describe_fov(degrees: f32) -> String {
    let (scale, hud_scale) = scale_for_fov(degrees);
    format!("Scale={scale}\nHUDScale={hud_scale}")
}

fn run(store: &mut ConfigStore<DirStorage>, command: Command) -> Result<String, String> {
    match command {
        Command::Show { json: true, .. } => {
            serde_json::to_string_pretty(store.settings()).map_err(|e| e.to_string())
        }
        Command::Show { comments, .. } => Ok(store.render(comments)),
        Command::Reload => match store.reload(&mut LogDiagnostics) {
            LoadOutcome::Loaded(report) => Ok(format!(
                "Reloaded {} lines{}",
                report.lines,
                if report.completed { "" } else { " (incomplete)" }
            )),
            LoadOutcome::Missing => Err(format!("{FILE_NAME} not found, kept current settings")),
            LoadOutcome::Unreadable => Err(format!("{FILE_NAME} could not be read")),
        },
        Command::Path => Ok(store.storage().path_of(FILE_NAME).display().to_string()),
        Command::Fov { degrees } => Ok(describe_fov(degrees)),
    }
}

fn main() -> ExitCode {
    let args = HelmetArgs::parse();
    helmet_log::init_logging(None, cfg!(debug_assertions), Some(&args.common));

    let command = args.command.clone().unwrap_or(Command::Show {
        comments: false,
        json: false,
    });

    // Pure computation, no settings file involved.
    if let Command::Fov { degrees } = command {
        println!("{}", describe_fov(degrees));
        return ExitCode::SUCCESS;
    }

    let Some(storage) = storage_for(&args.common) else {
        error!("No config directory available; pass --config <dir>");
        return ExitCode::FAILURE;
    };

    info!("Settings file: {}", storage.path_of(FILE_NAME).display());
    let fov = args.common.fov.unwrap_or(DEFAULT_FOV);
    let mut store = ConfigStore::open(storage, || fov, &mut LogDiagnostics);
    if store.is_first_load() {
        info!("First run, wrote defaults scaled for a {fov} degree FOV");
    }
    store.settings_mut().apply_cli_overrides(&args.common);

    match run(&mut store, command) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helmet_config::CollectedDiagnostics;

    fn store_in(dir: &std::path::Path) -> ConfigStore<DirStorage> {
        ConfigStore::open(DirStorage::new(dir), || 60.0, &mut CollectedDiagnostics::new())
    }

    #[test]
    fn test_default_command_is_plain_show() {
        let args = HelmetArgs::try_parse_from(["helmet"]).unwrap();
        assert_eq!(args.command, None);
    }

    #[test]
    fn test_parse_subcommands() {
        let args = HelmetArgs::try_parse_from(["helmet", "show", "--json"]).unwrap();
        assert_eq!(
            args.command,
            Some(Command::Show {
                comments: false,
                json: true
            })
        );

        let args =
            HelmetArgs::try_parse_from(["helmet", "--config", "/tmp/h", "fov", "90"]).unwrap();
        assert_eq!(args.command, Some(Command::Fov { degrees: 90.0 }));
        assert_eq!(
            args.common.config.as_deref(),
            Some(std::path::Path::new("/tmp/h"))
        );

        assert!(HelmetArgs::try_parse_from(["helmet", "show", "--json", "--comments"]).is_err());
    }

    #[test]
    fn test_show_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());

        let plain = run(&mut store, Command::Show { comments: false, json: false }).unwrap();
        assert!(plain.starts_with("Enabled=true\n"));
        assert!(!plain.contains("//"));

        let commented = run(&mut store, Command::Show { comments: true, json: false }).unwrap();
        assert!(commented.starts_with("//"));

        let json = run(&mut store, Command::Show { comments: false, json: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["enabled"], true);
        assert_eq!(value["elements"].as_array().unwrap().len(), 16);
    }

    #[test]
    fn test_path_and_fov() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        let path = run(&mut store, Command::Path).unwrap();
        assert!(path.ends_with(FILE_NAME));
        assert_eq!(
            run(&mut store, Command::Fov { degrees: 90.0 }).unwrap(),
            "Scale=0.65\nHUDScale=0.65"
        );
    }

    #[test]
    fn test_reload_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        assert!(run(&mut store, Command::Reload).unwrap().starts_with("Reloaded"));

        std::fs::remove_file(dir.path().join(FILE_NAME)).unwrap();
        assert!(run(&mut store, Command::Reload).is_err());
    }

    #[test]
    fn test_overrides_are_not_written_by_failed_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(dir.path());
        let args = CliArgs {
            hud: Some(false),
            ..CliArgs::default()
        };
        store.settings_mut().apply_cli_overrides(&args);
        std::fs::remove_file(dir.path().join(FILE_NAME)).unwrap();

        assert!(run(&mut store, Command::Reload).is_err());
        assert!(!dir.path().join(FILE_NAME).exists());
        // The session keeps its override.
        let shown = run(&mut store, Command::Show { comments: false, json: false }).unwrap();
        assert!(shown.contains("HUD=false\n"));
    }
}
