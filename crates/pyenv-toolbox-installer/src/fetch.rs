use std::path::Path;
use std::process::Command;

use crate::process::shell_quote;

pub fn fetch_script(url: &str, dest_dir: &Path) -> String {
    format!(
        "curl -fL {} | tar xz --strip 1 -C {}",
        shell_quote(url),
        shell_quote(&dest_dir.to_string_lossy())
    )
}

/// Download piped straight into extraction; `pipefail` surfaces curl failures.
pub fn build_fetch_command(url: &str, dest_dir: &Path) -> Command {
    let mut command = Command::new("bash");
    command
        .arg("-o")
        .arg("pipefail")
        .arg("-c")
        .arg(fetch_script(url, dest_dir));
    command
}
