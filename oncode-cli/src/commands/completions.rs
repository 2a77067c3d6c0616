//! Shell completions command - Generate shell completion scripts
//!
//! - bash: Add to ~/.bashrc or ~/.bash_completion
//! - zsh: Add to ~/.zshrc or put in fpath
//! - fish: Add to ~/.config/fish/completions/
//! - powershell: Add to $PROFILE

use std::io;

use clap::Command;
use clap_complete::{generate, shells};
use colored::Colorize;
use serde::Serialize;

use crate::output::{Output, OutputConfig, TableDisplay};

const BIN_NAME: &str = "oncode";

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
        }
    }
}

/// Instructions for installing completions
#[derive(Debug, Serialize)]
pub struct CompletionInstructions {
    pub shell: String,
    pub instructions: Vec<String>,
}

impl TableDisplay for CompletionInstructions {
    fn to_table(&self) -> String {
        let mut output = format!(
            "{} completions for {}\n\n",
            "OnCode".cyan().bold(),
            self.shell.yellow()
        );
        output.push_str(&format!("{}\n", "Installation:".cyan().bold()));
        for instruction in &self.instructions {
            output.push_str(&format!("  {}\n", instruction));
        }
        output
    }
}

fn get_instructions(shell: Shell) -> Vec<String> {
    let lines: &[&str] = match shell {
        Shell::Bash => &[
            "# Add to ~/.bashrc:",
            "eval \"$(oncode completions bash)\"",
            "",
            "# Or save to a file:",
            "oncode completions bash > ~/.local/share/bash-completion/completions/oncode",
        ],
        Shell::Zsh => &[
            "# Save to a file in fpath:",
            "oncode completions zsh > ~/.zfunc/_oncode",
            "# Then add to ~/.zshrc before compinit:",
            "fpath=(~/.zfunc $fpath)",
        ],
        Shell::Fish => &[
            "# Save to fish completions directory:",
            "oncode completions fish > ~/.config/fish/completions/oncode.fish",
        ],
        Shell::PowerShell => &[
            "# Add to $PROFILE:",
            "Invoke-Expression (& oncode completions powershell | Out-String)",
        ],
    };
    lines.iter().map(|l| l.to_string()).collect()
}

/// Write the completion script for `shell` to stdout.
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    let out = &mut io::stdout();
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, out),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, out),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, out),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, out),
    }
}

/// Print installation instructions, or the script itself.
pub fn run(
    shell: Shell,
    show_instructions: bool,
    cmd: &mut Command,
    output: OutputConfig,
) -> anyhow::Result<()> {
    if show_instructions {
        let instructions = CompletionInstructions {
            shell: shell.to_string(),
            instructions: get_instructions(shell),
        };
        Output::new(instructions, output).render()
    } else {
        generate_completions(shell, cmd);
        Ok(())
    }
}
