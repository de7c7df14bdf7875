use std::path::Path;
use std::process::Command;

use pyenv_toolbox_core::PACKAGE_MANAGER_BIN;

pub fn build_package_manager_command(bin: &Path, subcommand: &str, args: &[&str]) -> Command {
    let mut command = Command::new(bin);
    command.arg(subcommand).args(args);
    command
}

/// Location-independent form recorded in the receipt, e.g. `brew install pyenv`.
pub fn package_manager_command_line(subcommand: &str, args: &[&str]) -> String {
    let mut parts = vec![PACKAGE_MANAGER_BIN, subcommand];
    parts.extend_from_slice(args);
    parts.join(" ")
}
