use anyhow::{anyhow, Context, Result};
use std::fmt;

use pyenv_toolbox_core::{ProvisionConfig, ProvisionStage, ProvisionStep};

use crate::archive::{
    build_archive_command, ensure_archive_destination, remove_existing_archive,
    summarize_archive, ArchiveSummary,
};
use crate::fetch::build_fetch_command;
use crate::fs_utils::{create_private_dir_all, reset_dir};
use crate::package_manager::{build_package_manager_command, package_manager_command_line};
use crate::process::{command_line, CommandRunner};
use crate::receipts::write_provision_receipt;

/// Observer for step progress and child process output.
pub trait ProvisionReporter {
    fn step_started(&mut self, step: ProvisionStep);
    fn command_line(&mut self, line: &str);
    fn diagnostic_line(&mut self, line: &str);
    fn step_finished(&mut self, step: ProvisionStep, stage: ProvisionStage);
    fn step_failed(&mut self, _step: ProvisionStep) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub stage: ProvisionStage,
    pub archive: ArchiveSummary,
}

/// First failure of a run. `reached` is the last stage that completed.
#[derive(Debug)]
pub struct ProvisionFailure {
    pub step: ProvisionStep,
    pub reached: ProvisionStage,
    pub error: anyhow::Error,
}

impl fmt::Display for ProvisionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {:#}", self.step.failure_message(), self.error)
    }
}

impl std::error::Error for ProvisionFailure {}

pub fn provision(
    config: &ProvisionConfig,
    runner: &mut dyn CommandRunner,
    reporter: &mut dyn ProvisionReporter,
) -> Result<ProvisionReport, ProvisionFailure> {
    let mut reached = ProvisionStage::Init;
    let mut package_manager_commands = Vec::new();
    let mut archive = None;

    for step in ProvisionStep::ALL {
        reporter.step_started(step);
        match run_step(
            step,
            config,
            runner,
            reporter,
            &mut package_manager_commands,
        ) {
            Ok(summary) => {
                if summary.is_some() {
                    archive = summary;
                }
            }
            Err(error) => {
                reporter.step_failed(step);
                return Err(ProvisionFailure {
                    step,
                    reached,
                    error,
                });
            }
        }
        reached = step.completes();
        reporter.step_finished(step, reached);
    }

    // BuildArchive is the last step and always yields a summary on success.
    let archive = archive.ok_or_else(|| ProvisionFailure {
        step: ProvisionStep::BuildArchive,
        reached,
        error: anyhow!("archive build finished without a summary"),
    })?;

    Ok(ProvisionReport {
        stage: reached,
        archive,
    })
}

pub fn reset_installation_root(config: &ProvisionConfig) -> Result<()> {
    reset_dir(&config.install_root).with_context(|| {
        format!(
            "failed to reset installation root {}",
            config.install_root.display()
        )
    })?;
    create_private_dir_all(&config.package_manager_root).with_context(|| {
        format!(
            "failed to create package manager root {}",
            config.package_manager_root.display()
        )
    })
}

/// Returns the archive summary for the step that produces one.
fn run_step(
    step: ProvisionStep,
    config: &ProvisionConfig,
    runner: &mut dyn CommandRunner,
    reporter: &mut dyn ProvisionReporter,
    package_manager_commands: &mut Vec<String>,
) -> Result<Option<ArchiveSummary>> {
    match step {
        ProvisionStep::ResetInstallationRoot => reset_installation_root(config).map(|_| None),
        ProvisionStep::FetchPackageManager => {
            let mut command =
                build_fetch_command(&config.package_manager_url, &config.package_manager_root);
            reporter.command_line(&command_line(&command));
            runner.run_streamed(
                &mut command,
                "package manager download failed",
                &mut |line: &str| reporter.diagnostic_line(line),
            )?;
            Ok(None)
        }
        ProvisionStep::UpdatePackageManager => {
            run_package_manager(config, "update", &[], runner, reporter)?;
            package_manager_commands.push(package_manager_command_line("update", &[]));
            Ok(None)
        }
        ProvisionStep::InstallTool => {
            let args = [config.tool_name.as_str()];
            run_package_manager(config, "install", &args, runner, reporter)?;
            package_manager_commands.push(package_manager_command_line("install", &args));
            write_provision_receipt(config, package_manager_commands)?;
            Ok(None)
        }
        ProvisionStep::EnsureArchiveDestination => {
            ensure_archive_destination(&config.archive_dir)?;
            Ok(None)
        }
        ProvisionStep::RemoveExistingArchive => {
            remove_existing_archive(&config.archive_path)?;
            Ok(None)
        }
        ProvisionStep::BuildArchive => {
            let mut command = build_archive_command(
                &config.archive_parent_dir,
                &config.archive_path,
                &config.archive_entry,
            );
            reporter.command_line(&command_line(&command));
            runner.run_captured(&mut command, "tar failed")?;
            summarize_archive(&config.archive_path).map(Some)
        }
    }
}

fn run_package_manager(
    config: &ProvisionConfig,
    subcommand: &str,
    args: &[&str],
    runner: &mut dyn CommandRunner,
    reporter: &mut dyn ProvisionReporter,
) -> Result<()> {
    let mut command = build_package_manager_command(&config.package_manager_bin, subcommand, args);
    let context_message = format!(
        "{} failed",
        package_manager_command_line(subcommand, args)
    );
    runner.run_streamed(&mut command, &context_message, &mut |line: &str| {
        reporter.diagnostic_line(line)
    })
}
