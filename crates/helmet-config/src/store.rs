//! Persistence: storage collaborator and the load/merge/save lifecycle.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::error::{ConfigError, Diagnostic};
use crate::parser::{self, ParseReport};
use crate::serializer;
use crate::settings::{Settings, build_defaults};

/// Name of the settings file inside the storage root.
pub const FILE_NAME: &str = "helmet.cfg";

/// Minimal file facility the store needs from its host.
pub trait Storage {
    /// Whether `name` exists.
    fn exists(&self, name: &str) -> bool;

    /// Open `name` for line-by-line reading.
    ///
    /// # Errors
    /// Returns [`ConfigError::ReadError`] if the file cannot be opened.
    fn open_read(&self, name: &str) -> Result<Box<dyn BufRead + '_>, ConfigError>;

    /// Replace the contents of `name`.
    ///
    /// # Errors
    /// Returns [`ConfigError::WriteError`] if the file cannot be written.
    fn write_all(&self, name: &str, contents: &str) -> Result<(), ConfigError>;
}

/// [`Storage`] rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The platform config directory, e.g. `~/.config/helmet` on Linux.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("helmet")))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Storage for DirStorage {
    fn exists(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }

    fn open_read(&self, name: &str) -> Result<Box<dyn BufRead + '_>, ConfigError> {
        let file = File::open(self.path_of(name)).map_err(ConfigError::ReadError)?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn write_all(&self, name: &str, contents: &str) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.root).map_err(ConfigError::WriteError)?;
        let file = File::create(self.path_of(name)).map_err(ConfigError::WriteError)?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents.as_bytes())
            .map_err(ConfigError::WriteError)?;
        writer.flush().map_err(ConfigError::WriteError)?;
        Ok(())
    }
}

/// Result of trying to load the persisted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read; values present in it were applied.
    Loaded(ParseReport),
    /// No file yet.
    Missing,
    /// The file exists but could not be opened.
    Unreadable,
}

/// Owns the live [`Settings`] and keeps them in sync with storage.
#[derive(Debug)]
pub struct ConfigStore<S: Storage> {
    storage: S,
    settings: Settings,
    first_load: bool,
}

impl<S: Storage> ConfigStore<S> {
    /// Seed defaults, load the persisted file, then save the normalized form.
    ///
    /// `fov_degrees` is only queried when no file could be loaded, to derive
    /// an initial scale.
    pub fn open(
        storage: S,
        fov_degrees: impl FnOnce() -> f32,
        diagnostics: &mut dyn Diagnostics,
    ) -> Self {
        let mut store = Self {
            storage,
            settings: build_defaults(),
            first_load: false,
        };

        if !matches!(store.load(diagnostics), LoadOutcome::Loaded(_)) {
            store.first_load = true;
            let fov = fov_degrees();
            store.settings.apply_fov(fov);
            diagnostics.note(&format!(
                "No settings loaded, scale derived from a {fov} degree FOV"
            ));
        }

        store.save(diagnostics);
        store
    }

    /// Parse the persisted file over the current settings.
    pub fn load(&mut self, diagnostics: &mut dyn Diagnostics) -> LoadOutcome {
        if !self.storage.exists(FILE_NAME) {
            return LoadOutcome::Missing;
        }

        match self.storage.open_read(FILE_NAME) {
            Ok(reader) => {
                let report = parser::parse_reader(&mut self.settings, reader, diagnostics);
                LoadOutcome::Loaded(report)
            }
            Err(e) => {
                diagnostics.report(Diagnostic::Storage(e));
                LoadOutcome::Unreadable
            }
        }
    }

    /// Write the commented form of the current settings.
    ///
    /// # Errors
    /// Returns [`ConfigError::WriteError`] if storage rejects the write.
    pub fn try_save(&self) -> Result<(), ConfigError> {
        self.storage
            .write_all(FILE_NAME, &serializer::render(&self.settings, true))
    }

    /// Like [`try_save`](Self::try_save), but reports failures instead of
    /// returning them. Returns whether the write succeeded.
    pub fn save(&self, diagnostics: &mut dyn Diagnostics) -> bool {
        match self.try_save() {
            Ok(()) => true,
            Err(e) => {
                diagnostics.report(Diagnostic::Storage(e));
                false
            }
        }
    }

    /// Re-read storage from a fresh set of defaults, then save.
    ///
    /// A missing or unreadable file leaves the current settings untouched
    /// and nothing is written, so session-only changes stay off disk.
    pub fn reload(&mut self, diagnostics: &mut dyn Diagnostics) -> LoadOutcome {
        let previous = std::mem::replace(&mut self.settings, build_defaults());
        let outcome = self.load(diagnostics);
        if matches!(outcome, LoadOutcome::Loaded(_)) {
            self.save(diagnostics);
        } else {
            self.settings = previous;
        }
        outcome
    }

    /// Re-derive the scales for a new FOV if `auto_fov_scale` is on.
    ///
    /// Returns whether the settings changed.
    pub fn on_fov_changed(&mut self, fov_degrees: f32) -> bool {
        if !self.settings.auto_fov_scale {
            return false;
        }
        let before = (self.settings.scale(), self.settings.hud_scale());
        self.settings.apply_fov(fov_degrees);
        before != (self.settings.scale(), self.settings.hud_scale())
    }

    /// True if no settings could be loaded when the store was opened.
    #[must_use]
    pub fn is_first_load(&self) -> bool {
        self.first_load
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current settings as text; without comments this is the diagnostic dump.
    #[must_use]
    pub fn render(&self, comments: bool) -> String {
        serializer::render(&self.settings, comments)
    }
}
