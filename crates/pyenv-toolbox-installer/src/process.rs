use anyhow::{anyhow, Context, Result};
use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

/// Executes the external commands of a provisioning run.
pub trait CommandRunner {
    /// Runs `command`, forwarding each output line to `on_line` as it arrives.
    fn run_streamed(
        &mut self,
        command: &mut Command,
        context_message: &str,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<()>;

    /// Runs `command` to completion, reporting captured output on failure.
    fn run_captured(&mut self, command: &mut Command, context_message: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run_streamed(
        &mut self,
        command: &mut Command,
        context_message: &str,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<()> {
        run_streamed_command(command, context_message, on_line)
    }

    fn run_captured(&mut self, command: &mut Command, context_message: &str) -> Result<()> {
        run_command(command, context_message)
    }
}

pub fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: status={} stdout='{}' stderr='{}'",
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

/// Runs `command` with stdout and stderr merged into one pipe, forwarding
/// each line to `on_line` as it is written.
pub fn run_streamed_command<F>(
    command: &mut Command,
    context_message: &str,
    mut on_line: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let (reader, writer) =
        io::pipe().with_context(|| format!("{context_message}: failed to create output pipe"))?;
    let stdout_writer = writer
        .try_clone()
        .with_context(|| format!("{context_message}: failed to clone output pipe"))?;

    let spawned = command
        .stdout(Stdio::from(stdout_writer))
        .stderr(Stdio::from(writer))
        .spawn();
    // The command keeps the write ends until its stdio is replaced; the reader
    // only sees EOF once every write end is closed.
    command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
    let mut child =
        spawned.with_context(|| format!("{context_message}: command failed to start"))?;

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = match reader.read_until(b'\n', &mut buf) {
            Ok(read) => read,
            Err(err) => {
                let _ = child.wait();
                return Err(err)
                    .with_context(|| format!("{context_message}: failed reading output"));
            }
        };
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        on_line(line.trim_end_matches(|c: char| c == '\n' || c == '\r'));
    }

    let status = child
        .wait()
        .with_context(|| format!("{context_message}: failed waiting for command"))?;
    if status.success() {
        return Ok(());
    }
    Err(anyhow!("{context_message}: status={status}"))
}

/// Human-readable rendering of `command`; shell invocations show their script.
pub fn command_line(command: &Command) -> String {
    let args = command
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>();

    if let [.., flag, script] = args.as_slice() {
        if flag == "-c" {
            return script.clone();
        }
    }

    let mut parts = vec![shell_quote(&command.get_program().to_string_lossy())];
    parts.extend(args.iter().map(|arg| shell_quote(arg)));
    parts.join(" ")
}

pub fn shell_quote(value: &str) -> String {
    let is_safe = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"/._-+:=@%,".contains(&b));
    if is_safe {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', "'\\''"))
}
