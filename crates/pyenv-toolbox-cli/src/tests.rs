use super::*;
use clap::error::ErrorKind;
use clap::CommandFactory;
use pyenv_toolbox_core::{ProvisionStage, ProvisionStep};
use pyenv_toolbox_installer::{ArchiveSummary, ProvisionReport, ProvisionReporter};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::render::{
    format_elapsed, format_summary_lines, output_style_for, render_command_line,
    render_section_header, render_status_line, step_title,
};

#[derive(Clone, Default)]
struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn replay_fetch_step(style: OutputStyle) -> String {
    let output = SharedOutput::default();
    let mut renderer = TerminalRenderer::with_output(style, Box::new(output.clone()));

    renderer.step_started(ProvisionStep::FetchPackageManager);
    renderer.command_line("curl -fL https://example.test/brew | tar xz --strip 1 -C /tmp/homebrew");
    renderer.diagnostic_line("  % Total    % Received");
    renderer.step_finished(
        ProvisionStep::FetchPackageManager,
        ProvisionStage::PackageManagerFetched,
    );
    renderer.print_summary(&sample_report());

    output.contents()
}

fn sample_report() -> ProvisionReport {
    ProvisionReport {
        stage: ProvisionStage::ArchiveBuilt,
        archive: ArchiveSummary {
            path: PathBuf::from("/home/dev/.toolbox-tarballs/pyenv.tgz"),
            size_bytes: 2048,
            sha256: "ab".repeat(32),
        },
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_accepts_no_arguments() {
    Cli::try_parse_from(["pyenv-toolbox"]).expect("bare invocation must parse");
}

#[test]
fn cli_rejects_unknown_flags() {
    let err = Cli::try_parse_from(["pyenv-toolbox", "--tool", "rbenv"])
        .expect_err("unknown flag must be rejected");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn cli_rejects_positional_arguments() {
    let err = Cli::try_parse_from(["pyenv-toolbox", "install"])
        .expect_err("positional argument must be rejected");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn plain_command_line_matches_transparent_format() {
    assert_eq!(
        render_command_line("tar -C /opt -czf /tmp/pyenv.tgz builder/pyenv"),
        "command: 'tar -C /opt -czf /tmp/pyenv.tgz builder/pyenv'"
    );
}

#[test]
fn plain_status_line_has_no_escape_codes() {
    let line = render_status_line(OutputStyle::Plain, "fetch", "package-manager-fetched in 1.250s");

    assert_eq!(line, "   fetch package-manager-fetched in 1.250s");
    assert!(!line.contains('\u{1b}'));
}

#[test]
fn rich_status_line_is_colored() {
    let line = render_status_line(OutputStyle::Rich, "archive", "archive-built in 0.010s");

    assert!(line.contains('\u{1b}'));
    assert!(line.contains(" archive"));
    assert!(line.ends_with("archive-built in 0.010s"));
}

#[test]
fn section_headers_only_render_in_rich_mode() {
    assert!(render_section_header(OutputStyle::Plain, "Fetch homebrew").is_none());

    let header = render_section_header(OutputStyle::Rich, "Fetch homebrew")
        .expect("rich mode renders headers");
    assert!(header.contains("== Fetch homebrew =="));
}

#[test]
fn plain_failure_line_is_the_message_verbatim() {
    let message = "Error running 'brew update'. brew update failed: status=exit status: 1";

    assert_eq!(render_failure_line(OutputStyle::Plain, message), message);
    assert!(render_failure_line(OutputStyle::Rich, message).contains(message));
}

#[test]
fn format_elapsed_pads_milliseconds() {
    assert_eq!(format_elapsed(Duration::from_millis(1_005)), "1.005s");
    assert_eq!(format_elapsed(Duration::from_secs(62)), "62.000s");
}

#[test]
fn summary_lines_report_path_size_and_digest() {
    let lines = format_summary_lines(&sample_report());

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "tarball: /home/dev/.toolbox-tarballs/pyenv.tgz");
    assert!(
        lines[1].starts_with("size: 2") && lines[1].ends_with("KiB"),
        "unexpected size line: {}",
        lines[1]
    );
    assert_eq!(lines[2], format!("sha256: {}", "ab".repeat(32)));
}

#[test]
fn every_step_has_a_title() {
    for step in ProvisionStep::ALL {
        assert!(!step_title(step).is_empty());
    }
}

#[test]
fn rich_output_requires_both_streams_on_a_terminal() {
    assert_eq!(output_style_for(true, true), OutputStyle::Rich);
    assert_eq!(output_style_for(true, false), OutputStyle::Plain);
    assert_eq!(output_style_for(false, true), OutputStyle::Plain);
    assert_eq!(output_style_for(false, false), OutputStyle::Plain);
}

#[test]
fn rich_renderer_writes_command_and_diagnostics_to_its_output() {
    let contents = replay_fetch_step(OutputStyle::Rich);

    assert!(
        contents.contains(
            "command: 'curl -fL https://example.test/brew | tar xz --strip 1 -C /tmp/homebrew'"
        ),
        "missing command line: {contents}"
    );
    assert!(
        contents.contains("  % Total    % Received"),
        "missing diagnostic: {contents}"
    );
    assert!(contents.contains("== Fetch homebrew =="));
    assert!(contents.contains("package-manager-fetched in "));
    assert!(contents.contains("tarball: /home/dev/.toolbox-tarballs/pyenv.tgz"));
}

#[test]
fn plain_renderer_writes_transparent_lines_in_order() {
    let contents = replay_fetch_step(OutputStyle::Plain);
    let lines = contents.lines().collect::<Vec<_>>();

    assert_eq!(
        lines[0],
        "command: 'curl -fL https://example.test/brew | tar xz --strip 1 -C /tmp/homebrew'"
    );
    assert_eq!(lines[1], "  % Total    % Received");
    assert!(lines[2].starts_with("   fetch package-manager-fetched in "));
    assert_eq!(lines[3], "tarball: /home/dev/.toolbox-tarballs/pyenv.tgz");
    assert!(!contents.contains('\u{1b}'));
}
