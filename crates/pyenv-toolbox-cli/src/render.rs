use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use anstyle::{AnsiColor, Effects, Style};
use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};
use pyenv_toolbox_core::{ProvisionStage, ProvisionStep};
use pyenv_toolbox_installer::{ProvisionReport, ProvisionReporter};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

pub(crate) fn current_output_style() -> OutputStyle {
    output_style_for(std::io::stdout().is_terminal(), std::io::stderr().is_terminal())
}

// indicatif hides a bar whose draw target is not a terminal, so rich output
// needs both streams attached.
pub(crate) fn output_style_for(stdout_is_terminal: bool, stderr_is_terminal: bool) -> OutputStyle {
    if stdout_is_terminal && stderr_is_terminal {
        OutputStyle::Rich
    } else {
        OutputStyle::Plain
    }
}

pub(crate) struct TerminalRenderer {
    style: OutputStyle,
    out: Box<dyn Write>,
    spinner: Option<ProgressBar>,
    step_started_at: Instant,
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self::with_output(style, Box::new(io::stdout()))
    }

    pub(crate) fn with_output(style: OutputStyle, out: Box<dyn Write>) -> Self {
        Self {
            style,
            out,
            spinner: None,
            step_started_at: Instant::now(),
        }
    }

    pub(crate) fn print_summary(&mut self, report: &ProvisionReport) {
        if let Some(line) = render_section_header(self.style, "summary") {
            self.emit("");
            self.emit(&line);
        }
        for line in format_summary_lines(report) {
            self.emit(&line);
        }
    }

    // Lines always go to our own stdout; a running spinner is cleared around
    // each write and redrawn after it.
    fn emit(&mut self, line: &str) {
        let out = &mut self.out;
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| {
                let _ = writeln!(out, "{line}");
            }),
            None => {
                let _ = writeln!(out, "{line}");
            }
        }
    }

    fn start_spinner(&mut self, step: ProvisionStep) {
        if self.style != OutputStyle::Rich || !step.streams_output() {
            return;
        }

        let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan.bold} {msg} {elapsed_precise}")
        {
            spinner.set_style(style.tick_chars(step_tick_chars(step)));
        }
        spinner.set_message(step_title(step).to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl ProvisionReporter for TerminalRenderer {
    fn step_started(&mut self, step: ProvisionStep) {
        self.step_started_at = Instant::now();
        if let Some(line) = render_section_header(self.style, step_title(step)) {
            self.emit("");
            self.emit(&line);
        }
        self.start_spinner(step);
    }

    fn command_line(&mut self, line: &str) {
        self.emit(&render_command_line(line));
    }

    fn diagnostic_line(&mut self, line: &str) {
        self.emit(line);
    }

    fn step_finished(&mut self, step: ProvisionStep, stage: ProvisionStage) {
        self.clear_spinner();
        let line = render_status_line(
            self.style,
            step.as_str(),
            &format!(
                "{} in {}",
                stage.as_str(),
                format_elapsed(self.step_started_at.elapsed())
            ),
        );
        self.emit(&line);
    }

    fn step_failed(&mut self, _step: ProvisionStep) {
        self.clear_spinner();
    }
}

pub(crate) fn step_title(step: ProvisionStep) -> &'static str {
    match step {
        ProvisionStep::ResetInstallationRoot => "Reset installation root",
        ProvisionStep::FetchPackageManager => "Fetch homebrew",
        ProvisionStep::UpdatePackageManager => "Update homebrew",
        ProvisionStep::InstallTool => "Install pyenv",
        ProvisionStep::EnsureArchiveDestination => "Prepare tarball directory",
        ProvisionStep::RemoveExistingArchive => "Remove previous tarball",
        ProvisionStep::BuildArchive => "Build tarball",
    }
}

pub(crate) fn render_command_line(command: &str) -> String {
    format!("command: '{command}'")
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    let label = format!("{status:>8}");
    match style {
        OutputStyle::Plain => format!("{label} {message}"),
        OutputStyle::Rich => format!("{} {message}", colorize(status_style(), &label)),
    }
}

pub(crate) fn render_section_header(style: OutputStyle, title: &str) -> Option<String> {
    match style {
        OutputStyle::Plain => None,
        OutputStyle::Rich => Some(colorize(section_style(), &format!("== {title} =="))),
    }
}

pub(crate) fn render_failure_line(style: OutputStyle, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => colorize(error_style(), message),
    }
}

pub(crate) fn format_summary_lines(report: &ProvisionReport) -> Vec<String> {
    vec![
        format!("tarball: {}", report.archive.path.display()),
        format!("size: {}", HumanBytes(report.archive.size_bytes)),
        format!("sha256: {}", report.archive.sha256),
    ]
}

pub(crate) fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    format!("{secs}.{millis:03}s")
}

fn step_tick_chars(step: ProvisionStep) -> &'static str {
    match step {
        ProvisionStep::FetchPackageManager => "<^>v ",
        ProvisionStep::UpdatePackageManager => ".:;* ",
        ProvisionStep::InstallTool => ".oO@* ",
        _ => "|/-\\ ",
    }
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn status_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightGreen.into()))
        .effects(Effects::BOLD)
}

fn error_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightRed.into()))
        .effects(Effects::BOLD)
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}
