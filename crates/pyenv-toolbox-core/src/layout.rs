use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const PACKAGE_MANAGER_URL: &str = "https://github.com/Homebrew/brew/tarball/master";
pub const TOOL_NAME: &str = "pyenv";
pub const INSTALL_ROOT_DIR: &str = "pyenv";
pub const PACKAGE_MANAGER_DIR: &str = "homebrew";
pub const PACKAGE_MANAGER_BIN: &str = "brew";
pub const ARCHIVE_DIR_NAME: &str = ".toolbox-tarballs";
pub const ARCHIVE_FILE_NAME: &str = "pyenv.tgz";
pub const RECEIPT_FILE_NAME: &str = ".toolbox-receipt.json";

/// Paths derived from the executable's directory and the invoking user's home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolboxLayout {
    repo_dir: PathBuf,
    home_dir: PathBuf,
}

impl ToolboxLayout {
    pub fn new(repo_dir: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            home_dir: home_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub fn install_root(&self) -> PathBuf {
        self.repo_dir.join(INSTALL_ROOT_DIR)
    }

    pub fn package_manager_root(&self) -> PathBuf {
        self.install_root().join(PACKAGE_MANAGER_DIR)
    }

    pub fn package_manager_bin(&self) -> PathBuf {
        self.package_manager_root()
            .join("bin")
            .join(PACKAGE_MANAGER_BIN)
    }

    pub fn receipt_path(&self) -> PathBuf {
        self.install_root().join(RECEIPT_FILE_NAME)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.home_dir.join(ARCHIVE_DIR_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.archive_dir().join(ARCHIVE_FILE_NAME)
    }

    /// Directory `tar -C` runs from so entries are stored under the repo dir name.
    pub fn archive_parent_dir(&self) -> Result<PathBuf> {
        self.repo_dir
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                anyhow!(
                    "executable directory has no parent: {}",
                    self.repo_dir.display()
                )
            })
    }

    /// Archive member for the installation root, relative to `archive_parent_dir`.
    pub fn archive_entry(&self) -> Result<PathBuf> {
        let name = self.repo_dir.file_name().ok_or_else(|| {
            anyhow!(
                "executable directory has no name: {}",
                self.repo_dir.display()
            )
        })?;
        Ok(PathBuf::from(name).join(INSTALL_ROOT_DIR))
    }
}

pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to resolve current executable path")?;
    let exe = if exe.is_absolute() {
        exe
    } else {
        std::env::current_dir()
            .context("failed to resolve current directory")?
            .join(exe)
    };
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe.display()))
}

pub fn default_home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("failed to resolve the current user's home directory")
}
