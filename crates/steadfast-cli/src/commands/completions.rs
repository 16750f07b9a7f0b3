use clap_complete::{generate, Shell};

use super::CliResult;

pub fn run(shell: Shell, cmd: &mut clap::Command) -> CliResult {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, &mut std::io::stdout());
    Ok(())
}
