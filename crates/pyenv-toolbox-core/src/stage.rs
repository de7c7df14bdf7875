/// Forward-only progress of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProvisionStage {
    Init,
    RootReset,
    PackageManagerFetched,
    PackageManagerUpdated,
    ToolInstalled,
    ArchiveDirReady,
    OldArchiveRemoved,
    ArchiveBuilt,
}

impl ProvisionStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::RootReset => "root-reset",
            Self::PackageManagerFetched => "package-manager-fetched",
            Self::PackageManagerUpdated => "package-manager-updated",
            Self::ToolInstalled => "tool-installed",
            Self::ArchiveDirReady => "archive-dir-ready",
            Self::OldArchiveRemoved => "old-archive-removed",
            Self::ArchiveBuilt => "archive-built",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    ResetInstallationRoot,
    FetchPackageManager,
    UpdatePackageManager,
    InstallTool,
    EnsureArchiveDestination,
    RemoveExistingArchive,
    BuildArchive,
}

impl ProvisionStep {
    pub const ALL: [Self; 7] = [
        Self::ResetInstallationRoot,
        Self::FetchPackageManager,
        Self::UpdatePackageManager,
        Self::InstallTool,
        Self::EnsureArchiveDestination,
        Self::RemoveExistingArchive,
        Self::BuildArchive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResetInstallationRoot => "reset",
            Self::FetchPackageManager => "fetch",
            Self::UpdatePackageManager => "update",
            Self::InstallTool => "install",
            Self::EnsureArchiveDestination => "prepare",
            Self::RemoveExistingArchive => "clean",
            Self::BuildArchive => "archive",
        }
    }

    pub fn completes(self) -> ProvisionStage {
        match self {
            Self::ResetInstallationRoot => ProvisionStage::RootReset,
            Self::FetchPackageManager => ProvisionStage::PackageManagerFetched,
            Self::UpdatePackageManager => ProvisionStage::PackageManagerUpdated,
            Self::InstallTool => ProvisionStage::ToolInstalled,
            Self::EnsureArchiveDestination => ProvisionStage::ArchiveDirReady,
            Self::RemoveExistingArchive => ProvisionStage::OldArchiveRemoved,
            Self::BuildArchive => ProvisionStage::ArchiveBuilt,
        }
    }

    /// Steps that stream child diagnostics while they run.
    pub fn streams_output(self) -> bool {
        matches!(
            self,
            Self::FetchPackageManager | Self::UpdatePackageManager | Self::InstallTool
        )
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::ResetInstallationRoot => "Error removing pyenv directory",
            Self::FetchPackageManager => "Error installing homebrew",
            Self::UpdatePackageManager => "Error running 'brew update'",
            Self::InstallTool => "Error running 'brew install'",
            Self::EnsureArchiveDestination => "Error creating tarball directory",
            Self::RemoveExistingArchive => "Error removing tarball",
            Self::BuildArchive => "Error tarring pyenv",
        }
    }
}
