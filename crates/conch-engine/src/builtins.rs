//! Standard sample commands: help, echo, version.
//!
//! These are ordinary commands on the public contract, generic over any
//! host context. Hosts register them individually or via
//! [`register_builtins`].

use conch_types::error::{ConchError, Result};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register the standard sample commands into a registry.
///
/// `version` is the string the `version` command reports, captured here at
/// registration time.
pub fn register_builtins<C>(reg: &mut CommandRegistry<C>, version: &str) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(EchoCmd))?;
    reg.register(Box::new(VersionCmd::new(version)))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

/// Lists every registered command with its description.
pub struct HelpCmd;
impl<C> Command<C> for HelpCmd {
    fn name(&self) -> &str {
        "help"
    }
    fn description(&self) -> &str {
        "Display help information"
    }
    fn execute(&self, _argv: &[&str], env: &mut Environment<'_, C>) -> Result<CommandOutput> {
        let mut lines = vec!["Available commands:".to_string()];
        for cmd in env.registry.commands() {
            if cmd.description().is_empty() {
                lines.push(format!("  {}", cmd.name()));
            } else {
                lines.push(format!("  {:<15} - {}", cmd.name(), cmd.description()));
            }
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

/// Reprints its arguments joined by single spaces.
pub struct EchoCmd;
impl<C> Command<C> for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Echo the provided text"
    }
    fn execute(&self, argv: &[&str], _env: &mut Environment<'_, C>) -> Result<CommandOutput> {
        if argv.len() < 2 {
            return Err(ConchError::InvalidArgs("usage: echo <text>".to_string()));
        }
        Ok(CommandOutput::Text(argv[1..].join(" ")))
    }
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

/// Reports a version string fixed at construction time.
pub struct VersionCmd {
    version: String,
}

impl VersionCmd {
    /// Create a version command reporting `version`.
    pub fn new(version: &str) -> Self {
        Self {
            version: version.to_string(),
        }
    }
}

impl<C> Command<C> for VersionCmd {
    fn name(&self) -> &str {
        "version"
    }
    fn description(&self) -> &str {
        "Display version information"
    }
    fn execute(&self, _argv: &[&str], _env: &mut Environment<'_, C>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(format!("Version: {}", self.version)))
    }
}

#[cfg(test)]
mod tests {
    use conch_types::error::ErrorKind;

    use super::*;
    use crate::interpreter::{LineOutcome, Shell};

    fn make_shell() -> Shell<()> {
        let mut shell = Shell::new("> ", "exit", ()).unwrap();
        shell.register_command(Box::new(HelpCmd)).unwrap();
        shell.register_command(Box::new(EchoCmd)).unwrap();
        shell
            .register_command(Box::new(VersionCmd::new("1.0.0")))
            .unwrap();
        shell
    }

    fn text_of(outcome: LineOutcome) -> String {
        match outcome {
            LineOutcome::Continue(CommandOutput::Text(s)) => s,
            other => panic!("expected text output, got {other:?}"),
        }
    }

    #[test]
    fn echo_joins_arguments_with_single_spaces() {
        let mut shell = make_shell();
        let out = text_of(shell.process_line("echo a b").unwrap());
        assert_eq!(out, "a b");
        let out = text_of(shell.process_line("echo   a    b").unwrap());
        assert_eq!(out, "a b");
    }

    #[test]
    fn echo_without_arguments_is_invalid() {
        let mut shell = make_shell();
        let err = shell.process_line("echo").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgs);
    }

    #[test]
    fn version_reports_construction_string() {
        let mut shell = make_shell();
        let out = text_of(shell.process_line("version").unwrap());
        assert!(out.contains("1.0.0"));
    }

    #[test]
    fn help_lists_all_registered_commands() {
        let mut shell = make_shell();
        let out = text_of(shell.process_line("help").unwrap());
        assert!(out.starts_with("Available commands:"));
        for name in ["help", "echo", "version"] {
            assert!(out.contains(name), "help output missing {name}: {out}");
        }
    }

    #[test]
    fn help_reflects_live_registry_state() {
        struct LateCmd;
        impl<C> Command<C> for LateCmd {
            fn name(&self) -> &str {
                "late"
            }
            fn execute(
                &self,
                _argv: &[&str],
                _env: &mut Environment<'_, C>,
            ) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut shell = make_shell();
        let before = text_of(shell.process_line("help").unwrap());
        assert!(!before.contains("late"));
        shell.register_command(Box::new(LateCmd)).unwrap();
        let after = text_of(shell.process_line("help").unwrap());
        assert!(after.contains("late"));
    }

    #[test]
    fn help_omits_dash_for_undescribed_commands() {
        struct BareCmd;
        impl<C> Command<C> for BareCmd {
            fn name(&self) -> &str {
                "bare"
            }
            fn execute(
                &self,
                _argv: &[&str],
                _env: &mut Environment<'_, C>,
            ) -> Result<CommandOutput> {
                Ok(CommandOutput::None)
            }
        }
        let mut shell = make_shell();
        shell.register_command(Box::new(BareCmd)).unwrap();
        let out = text_of(shell.process_line("help").unwrap());
        assert!(out.contains("\n  bare\n") || out.ends_with("\n  bare"));
    }

    #[test]
    fn register_builtins_populates_registry() {
        let mut reg: CommandRegistry<()> = CommandRegistry::new();
        register_builtins(&mut reg, "0.1.0").unwrap();
        assert_eq!(reg.len(), 3);
        assert!(reg.get("help").is_some());
        assert!(reg.get("echo").is_some());
        assert!(reg.get("version").is_some());
    }

    #[test]
    fn register_builtins_twice_is_a_duplicate() {
        let mut reg: CommandRegistry<()> = CommandRegistry::new();
        register_builtins(&mut reg, "0.1.0").unwrap();
        let err = register_builtins(&mut reg, "0.1.0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateCommand);
    }
}
