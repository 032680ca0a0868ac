//! Minimal interactive REPL built on conch-engine.
//!
//! Registers the standard sample commands plus a host-defined `hello`
//! command, then runs the blocking loop over stdin/stdout. Type `help` for
//! the command list, `exit` to quit.

use anyhow::Result;

use conch_engine::{Command, CommandOutput, Environment, Shell, register_builtins};

/// Host-defined command demonstrating the public contract from outside the
/// engine crate.
struct HelloCmd;
impl Command<()> for HelloCmd {
    fn name(&self) -> &str {
        "hello"
    }
    fn description(&self) -> &str {
        "Display hello message"
    }
    fn execute(
        &self,
        _argv: &[&str],
        _env: &mut Environment<'_, ()>,
    ) -> conch_types::error::Result<CommandOutput> {
        Ok(CommandOutput::Text("Hello, world!".to_string()))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut shell = Shell::new("> ", "exit", ())?;
    register_builtins(shell.registry_mut(), "1.0.0")?;
    shell.register_command(Box::new(HelloCmd))?;
    log::info!("registered {} commands", shell.registry().len());

    println!("Interactive CLI. Type 'help' for available commands, 'exit' to quit.");
    shell.run()?;

    log::info!("session ended cleanly");
    Ok(())
}
