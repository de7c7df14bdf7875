use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Record of a provisioning run, shipped inside the archive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvisionReceipt {
    pub tool: String,
    pub package_manager_url: String,
    #[serde(default)]
    pub package_manager_commands: Vec<String>,
    pub archive_entry: String,
    pub created_at_unix: u64,
}

impl ProvisionReceipt {
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize provision receipt")
    }

    pub fn from_json_str(input: &str) -> anyhow::Result<Self> {
        let receipt: Self =
            serde_json::from_str(input).context("failed to parse provision receipt")?;
        if receipt.tool.trim().is_empty() {
            return Err(anyhow::anyhow!("provision receipt tool must not be empty"));
        }
        Ok(receipt)
    }
}
