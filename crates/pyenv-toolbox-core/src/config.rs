use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::layout::{
    default_home_dir, executable_dir, ToolboxLayout, PACKAGE_MANAGER_URL, TOOL_NAME,
};

/// Everything a provisioning run needs, resolved once before the first step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionConfig {
    pub repo_dir: PathBuf,
    pub install_root: PathBuf,
    pub package_manager_root: PathBuf,
    pub package_manager_bin: PathBuf,
    pub receipt_path: PathBuf,
    pub archive_dir: PathBuf,
    pub archive_path: PathBuf,
    pub archive_parent_dir: PathBuf,
    pub archive_entry: PathBuf,
    pub package_manager_url: String,
    pub tool_name: String,
}

impl ProvisionConfig {
    pub fn from_layout(layout: &ToolboxLayout) -> Result<Self> {
        Ok(Self {
            repo_dir: layout.repo_dir().to_path_buf(),
            install_root: layout.install_root(),
            package_manager_root: layout.package_manager_root(),
            package_manager_bin: layout.package_manager_bin(),
            receipt_path: layout.receipt_path(),
            archive_dir: layout.archive_dir(),
            archive_path: layout.archive_path(),
            archive_parent_dir: layout.archive_parent_dir()?,
            archive_entry: layout.archive_entry()?,
            package_manager_url: PACKAGE_MANAGER_URL.to_string(),
            tool_name: TOOL_NAME.to_string(),
        })
    }

    pub fn resolve(repo_dir: &Path, home_dir: &Path) -> Result<Self> {
        Self::from_layout(&ToolboxLayout::new(repo_dir, home_dir))
    }

    pub fn from_environment() -> Result<Self> {
        let repo_dir = executable_dir()?;
        let home_dir = default_home_dir()?;
        Self::resolve(&repo_dir, &home_dir)
    }
}
