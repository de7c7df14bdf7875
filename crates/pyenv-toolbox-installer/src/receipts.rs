use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pyenv_toolbox_core::{ProvisionConfig, ProvisionReceipt};

pub fn write_provision_receipt(
    config: &ProvisionConfig,
    package_manager_commands: &[String],
) -> Result<PathBuf> {
    let receipt = ProvisionReceipt {
        tool: config.tool_name.clone(),
        package_manager_url: config.package_manager_url.clone(),
        package_manager_commands: package_manager_commands.to_vec(),
        archive_entry: config.archive_entry.to_string_lossy().into_owned(),
        created_at_unix: current_unix_timestamp()?,
    };

    let path = config.receipt_path.clone();
    let mut content = receipt.to_json_pretty()?;
    content.push('\n');
    fs::write(&path, content)
        .with_context(|| format!("failed to write provision receipt {}", path.display()))?;
    Ok(path)
}

fn current_unix_timestamp() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system time is before unix epoch")?
        .as_secs())
}
