use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::fs_utils::{create_private_dir_all, remove_path_if_exists};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub sha256: String,
}

pub fn build_archive_command(parent_dir: &Path, archive_path: &Path, source: &Path) -> Command {
    let mut command = Command::new("tar");
    command
        .arg("-C")
        .arg(parent_dir)
        .arg("-czf")
        .arg(archive_path)
        .arg(source);
    command
}

pub fn ensure_archive_destination(dir: &Path) -> Result<()> {
    create_private_dir_all(dir)
        .with_context(|| format!("failed to create archive directory {}", dir.display()))
}

/// Returns whether a previous archive was removed.
pub fn remove_existing_archive(path: &Path) -> Result<bool> {
    remove_path_if_exists(path)
        .with_context(|| format!("failed to remove existing archive {}", path.display()))
}

pub fn summarize_archive(path: &Path) -> Result<ArchiveSummary> {
    let mut file =
        fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let size_bytes = file
        .metadata()
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)
        .with_context(|| format!("failed to hash {}", path.display()))?;

    Ok(ArchiveSummary {
        path: path.to_path_buf(),
        size_bytes,
        sha256: hex::encode(hasher.finalize()),
    })
}
