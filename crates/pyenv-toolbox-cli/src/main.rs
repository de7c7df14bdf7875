mod render;

use anyhow::{anyhow, Result};
use clap::Parser;
use pyenv_toolbox_core::ProvisionConfig;
use pyenv_toolbox_installer::{provision, SystemCommandRunner};

use render::{current_output_style, render_failure_line, OutputStyle, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "pyenv-toolbox", version)]
#[command(
    about = "Build a self-contained pyenv tarball from a hidden Homebrew install",
    long_about = None
)]
#[command(
    after_help = "OUTPUT:\n  ~/.toolbox-tarballs/pyenv.tgz  Installation root, rooted at this executable's directory name"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    let style = current_output_style();

    if let Err(err) = run(style) {
        println!("{}", render_failure_line(style, &err.to_string()));
        std::process::exit(1);
    }
}

fn run(style: OutputStyle) -> Result<()> {
    let config = ProvisionConfig::from_environment()
        .map_err(|err| anyhow!("Error resolving provisioning paths. {err:#}"))?;

    let mut renderer = TerminalRenderer::from_style(style);
    let mut runner = SystemCommandRunner;
    let report = provision(&config, &mut runner, &mut renderer)?;

    renderer.print_summary(&report);
    Ok(())
}

#[cfg(test)]
mod tests;
