//! Save files on disk.
//!
//! A save name is sanitized (every character outside `[A-Za-z0-9_-]`
//! becomes `_`) and mapped to `<dir>/<name>.json`. Writes go to a sibling
//! temp file which is then renamed over the target, so a save is replaced
//! whole or not at all.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{SaveError, SaveResult};
use crate::schema::SaveDocument;

/// Directory used when none is configured.
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// File extension of save files, without the dot.
pub const SAVE_EXTENSION: &str = "json";

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Metadata about one save file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    /// Sanitized save name.
    pub name: String,
    /// Full path of the file.
    pub path: PathBuf,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Creation time, where the filesystem records one.
    pub created: Option<DateTime<Utc>>,
    /// File size in bytes.
    pub size: u64,
}

/// Reads and writes save files in one directory.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl Default for SaveManager {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_DIR)
    }
}

impl SaveManager {
    /// A manager for `dir`. The directory is created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The save directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file a save name maps to.
    pub fn path_for(&self, name: &str) -> SaveResult<PathBuf> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SaveError::EmptyName);
        }
        Ok(self
            .dir
            .join(format!("{}.{SAVE_EXTENSION}", sanitize_name(name))))
    }

    /// Write `document` under `name`, replacing any existing save.
    pub fn save(&self, document: &SaveDocument, name: &str) -> SaveResult<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).map_err(SaveError::io(&self.dir))?;

        let json = serde_json::to_string_pretty(document)
            .map_err(|e| SaveError::Encode(e.to_string()))?;
        let temp_path = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        fs::write(&temp_path, json).map_err(SaveError::io(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(SaveError::io(&path))?;

        tracing::info!(path = %path.display(), "game saved");
        Ok(path)
    }

    /// Read the save stored under `name`.
    pub fn load(&self, name: &str) -> SaveResult<SaveDocument> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(SaveError::NotFound(sanitize_name(name.trim())));
        }

        let json = fs::read_to_string(&path).map_err(SaveError::io(&path))?;
        let document: SaveDocument =
            serde_json::from_str(&json).map_err(|e| SaveError::Malformed(e.to_string()))?;
        document.check_version()?;

        tracing::info!(
            path = %path.display(),
            rooms = document.rooms.len(),
            "game loaded"
        );
        Ok(document)
    }

    /// Delete the save stored under `name`. Returns false if there was none.
    pub fn delete(&self, name: &str) -> SaveResult<bool> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(SaveError::io(&path))?;
        tracing::info!(path = %path.display(), "save deleted");
        Ok(true)
    }

    /// Whether a save exists under `name`.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.exists())
    }

    /// Metadata of the save stored under `name`, if any.
    pub fn info(&self, name: &str) -> SaveResult<Option<SaveInfo>> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Ok(None);
        }
        file_info(&path).map(Some)
    }

    /// Every save in the directory, most recently modified first.
    pub fn list(&self) -> SaveResult<Vec<SaveInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut saves = Vec::new();
        let entries = fs::read_dir(&self.dir).map_err(SaveError::io(&self.dir))?;
        for entry in entries {
            let path = entry.map_err(SaveError::io(&self.dir))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SAVE_EXTENSION) {
                saves.push(file_info(&path)?);
            }
        }

        saves.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name)));
        Ok(saves)
    }
}

fn file_info(path: &Path) -> SaveResult<SaveInfo> {
    let metadata = fs::metadata(path).map_err(SaveError::io(path))?;
    let modified = metadata.modified().map_err(SaveError::io(path))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SaveInfo {
        name,
        path: path.to_path_buf(),
        modified: DateTime::<Utc>::from(modified),
        created: metadata.created().ok().map(DateTime::<Utc>::from),
        size: metadata.len(),
    })
}
