//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::{DEFAULT_MEDIA_DIR, DEFAULT_POSE_CATALOG_PATH};
use crate::{EngineError, EngineResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    pose_catalog_path: PathBuf,
    media_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// Both paths are validated eagerly: a missing catalog file or media
    /// directory is a startup failure, not something to discover on the
    /// first request.
    pub fn new(pose_catalog_path: PathBuf, media_dir: PathBuf) -> EngineResult<Self> {
        if !pose_catalog_path.is_file() {
            return Err(EngineError::InvalidInput(format!(
                "pose catalog file does not exist: {}",
                pose_catalog_path.display()
            )));
        }

        if !media_dir.is_dir() {
            return Err(EngineError::InvalidInput(format!(
                "media directory does not exist: {}",
                media_dir.display()
            )));
        }

        Ok(Self {
            pose_catalog_path,
            media_dir,
        })
    }

    pub fn pose_catalog_path(&self) -> &Path {
        &self.pose_catalog_path
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }
}

/// Resolve the pose catalog file without reading environment variables.
///
/// If `override_path` is provided, it must be an existing file. Otherwise
/// this searches for `data/pose_catalog.csv` relative to the current working
/// directory and then walks up from `CARGO_MANIFEST_DIR`.
pub fn resolve_pose_catalog(override_path: Option<PathBuf>) -> EngineResult<PathBuf> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(path);
        }
        return Err(EngineError::InvalidInput(format!(
            "pose catalog override is not a file: {}",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_POSE_CATALOG_PATH);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_POSE_CATALOG_PATH);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(EngineError::InvalidInput(format!(
        "could not locate {} relative to the working directory or workspace",
        DEFAULT_POSE_CATALOG_PATH
    )))
}

/// Resolve the media directory without reading environment variables.
///
/// Same search strategy as [`resolve_pose_catalog`]: explicit override, then
/// the working directory, then ancestors of `CARGO_MANIFEST_DIR`.
pub fn resolve_media_dir(override_dir: Option<PathBuf>) -> EngineResult<PathBuf> {
    if let Some(dir) = override_dir {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(EngineError::InvalidInput(format!(
            "media directory override is not a directory: {}",
            dir.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_MEDIA_DIR);
    if cwd_relative.is_dir() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_MEDIA_DIR);
        if candidate.is_dir() {
            return Ok(candidate);
        }
    }

    Err(EngineError::InvalidInput(format!(
        "could not locate {}/ relative to the working directory or workspace",
        DEFAULT_MEDIA_DIR
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn config_requires_existing_paths() {
        let temp = TempDir::new().unwrap();
        let catalog = temp.path().join("pose_catalog.csv");
        let media = temp.path().join("media");

        assert!(CoreConfig::new(catalog.clone(), media.clone()).is_err());

        fs::write(&catalog, "Pose,Step,Video\n").unwrap();
        assert!(CoreConfig::new(catalog.clone(), media.clone()).is_err());

        fs::create_dir(&media).unwrap();
        let cfg = CoreConfig::new(catalog.clone(), media.clone()).unwrap();
        assert_eq!(cfg.pose_catalog_path(), catalog.as_path());
        assert_eq!(cfg.media_dir(), media.as_path());
    }

    #[test]
    fn override_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.csv");
        assert!(resolve_pose_catalog(Some(missing)).is_err());

        let missing_dir = temp.path().join("nope");
        assert!(resolve_media_dir(Some(missing_dir)).is_err());
    }

    #[test]
    fn override_is_used_when_valid() {
        let temp = TempDir::new().unwrap();
        let catalog = temp.path().join("pose_catalog.csv");
        fs::write(&catalog, "Pose,Step,Video\n").unwrap();

        let resolved = resolve_pose_catalog(Some(catalog.clone())).unwrap();
        assert_eq!(resolved, catalog);
    }
}
