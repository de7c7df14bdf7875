mod config;
mod layout;
mod receipt;
mod stage;

pub use config::ProvisionConfig;
pub use layout::{
    default_home_dir, executable_dir, ToolboxLayout, ARCHIVE_DIR_NAME, ARCHIVE_FILE_NAME,
    INSTALL_ROOT_DIR, PACKAGE_MANAGER_BIN, PACKAGE_MANAGER_DIR, PACKAGE_MANAGER_URL,
    RECEIPT_FILE_NAME, TOOL_NAME,
};
pub use receipt::ProvisionReceipt;
pub use stage::{ProvisionStage, ProvisionStep};
