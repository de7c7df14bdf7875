mod archive;
mod fetch;
mod fs_utils;
mod package_manager;
mod pipeline;
mod process;
mod receipts;

pub use archive::{
    build_archive_command, ensure_archive_destination, remove_existing_archive,
    summarize_archive, ArchiveSummary,
};
pub use fetch::{build_fetch_command, fetch_script};
pub use fs_utils::{create_private_dir_all, remove_path_if_exists, reset_dir};
pub use package_manager::{build_package_manager_command, package_manager_command_line};
pub use pipeline::{
    provision, reset_installation_root, ProvisionFailure, ProvisionReport, ProvisionReporter,
};
pub use process::{
    command_line, run_command, run_streamed_command, shell_quote, CommandRunner,
    SystemCommandRunner,
};
pub use receipts::write_provision_receipt;
