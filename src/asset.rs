// Generated asset type shared by the template engines

use crate::error::AdError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One encoded output image and its relative path
///
/// Paths use `/` separators (`Amazon_ca_FR/Frame_01_Collage.png`) so they
/// can go straight into an archive or be joined onto an output directory.
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl GeneratedAsset {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Leading folder of the path, if any (used to group previews)
    pub fn folder(&self) -> Option<&str> {
        self.filename.rsplit_once('/').map(|(folder, _)| folder)
    }

    /// Write under `out_dir`, creating intermediate folders.
    pub fn write_to(&self, out_dir: &Path) -> Result<PathBuf, AdError> {
        let path = self
            .filename
            .split('/')
            .fold(out_dir.to_path_buf(), |acc, part| acc.join(part));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &self.bytes)?;
        debug!(path = %path.display(), bytes = self.bytes.len(), "Wrote asset");
        Ok(path)
    }
}

impl std::fmt::Debug for GeneratedAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedAsset")
            .field("filename", &self.filename)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Write every asset under `out_dir`; returns the written paths in order.
pub fn write_assets(assets: &[GeneratedAsset], out_dir: &Path) -> Result<Vec<PathBuf>, AdError> {
    assets.iter().map(|asset| asset.write_to(out_dir)).collect()
}
