//! Kiosk commands: time, date, howmuch, sanctions, logout.
//!
//! Every query command is quota-gated: it checks the session user's request
//! quota before doing any work and spends one request on success.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};

use conch_engine::{Command, CommandOutput, CommandRegistry, Environment, HelpCmd};
use conch_types::error::{ConchError, Result};

use crate::app_state::AppState;

/// Code the operator must enter to confirm a sanctions change.
const CONFIRMATION_CODE: u32 = 12345;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 3600;
const SECS_PER_YEAR: i64 = 365 * 24 * 3600;

/// Register the kiosk command set (plus `help`) into a registry.
pub fn register_kiosk_commands(reg: &mut CommandRegistry<AppState>) -> Result<()> {
    reg.register(Box::new(HelpCmd))?;
    reg.register(Box::new(TimeCmd))?;
    reg.register(Box::new(DateCmd))?;
    reg.register(Box::new(HowmuchCmd))?;
    reg.register(Box::new(SanctionsCmd))?;
    reg.register(Box::new(LogoutCmd))?;
    Ok(())
}

fn active_user(state: &AppState) -> Result<usize> {
    state
        .current
        .ok_or_else(|| ConchError::MissingValue("active session".to_string()))
}

fn check_quota(state: &AppState, index: usize) -> Result<()> {
    if state.users.can_request(index) {
        Ok(())
    } else {
        Err(ConchError::InvalidArgs(
            "you have reached your request limit".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// time
// ---------------------------------------------------------------------------

/// Shows the current local time.
pub struct TimeCmd;
impl Command<AppState> for TimeCmd {
    fn name(&self) -> &str {
        "time"
    }
    fn description(&self) -> &str {
        "Show current time"
    }
    fn execute(
        &self,
        _argv: &[&str],
        env: &mut Environment<'_, AppState>,
    ) -> Result<CommandOutput> {
        let idx = active_user(env.context)?;
        check_quota(env.context, idx)?;
        let text = Local::now().format("%H:%M:%S").to_string();
        env.context.users.record_request(idx);
        Ok(CommandOutput::Text(text))
    }
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

/// Shows the current local date.
pub struct DateCmd;
impl Command<AppState> for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Show current date"
    }
    fn execute(
        &self,
        _argv: &[&str],
        env: &mut Environment<'_, AppState>,
    ) -> Result<CommandOutput> {
        let idx = active_user(env.context)?;
        check_quota(env.context, idx)?;
        let text = Local::now().format("%d.%m.%Y").to_string();
        env.context.users.record_request(idx);
        Ok(CommandOutput::Text(text))
    }
}

// ---------------------------------------------------------------------------
// howmuch
// ---------------------------------------------------------------------------

/// Reports the time elapsed since a given date.
pub struct HowmuchCmd;
impl Command<AppState> for HowmuchCmd {
    fn name(&self) -> &str {
        "howmuch"
    }
    fn description(&self) -> &str {
        "Calculate time elapsed since a date"
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_, AppState>) -> Result<CommandOutput> {
        let idx = active_user(env.context)?;
        check_quota(env.context, idx)?;

        if argv.len() != 3 {
            return Err(ConchError::InvalidArgs(
                "usage: howmuch <DD.MM.YYYY> <-s|-m|-h|-y>".to_string(),
            ));
        }

        let date = NaiveDate::parse_from_str(argv[1], "%d.%m.%Y").map_err(|_| {
            ConchError::InvalidArgs(format!("invalid date {:?}, use DD.MM.YYYY", argv[1]))
        })?;
        let target = date.and_time(chrono::NaiveTime::MIN);
        let elapsed = Local::now().naive_local().signed_duration_since(target);
        let secs = elapsed.num_seconds();

        let text = match argv[2] {
            "-s" => format!("{secs} seconds"),
            "-m" => format!("{} minutes", secs / SECS_PER_MINUTE),
            "-h" => format!("{} hours", secs / SECS_PER_HOUR),
            "-y" => format!("{} years", secs / SECS_PER_YEAR),
            flag => {
                return Err(ConchError::InvalidArgs(format!(
                    "invalid flag {flag:?}, use -s, -m, -h, or -y"
                )));
            },
        };

        env.context.users.record_request(idx);
        Ok(CommandOutput::Text(text))
    }
}

// ---------------------------------------------------------------------------
// sanctions
// ---------------------------------------------------------------------------

/// Sets another user's request quota after an interactive confirmation.
pub struct SanctionsCmd;
impl Command<AppState> for SanctionsCmd {
    fn name(&self) -> &str {
        "sanctions"
    }
    fn description(&self) -> &str {
        "Set a user's request limit"
    }
    fn execute(&self, argv: &[&str], env: &mut Environment<'_, AppState>) -> Result<CommandOutput> {
        let idx = active_user(env.context)?;
        check_quota(env.context, idx)?;

        if argv.len() != 3 {
            return Err(ConchError::InvalidArgs(
                "usage: sanctions <username> <limit>".to_string(),
            ));
        }
        let limit: u32 = argv[2]
            .parse()
            .map_err(|_| ConchError::InvalidArgs(format!("invalid limit: {}", argv[2])))?;

        print!("Enter confirmation code ({CONFIRMATION_CODE}): ");
        io::stdout().flush()?;
        let mut code = String::new();
        io::stdin().read_line(&mut code)?;
        if code.trim().parse::<u32>().ok() != Some(CONFIRMATION_CODE) {
            return Err(ConchError::InvalidArgs(
                "invalid confirmation code".to_string(),
            ));
        }

        env.context.users.set_limit(argv[1], limit)?;
        env.context.users.record_request(idx);
        Ok(CommandOutput::Text("Sanctions set successfully".to_string()))
    }
}

// ---------------------------------------------------------------------------
// logout
// ---------------------------------------------------------------------------

/// Ends the current session.
pub struct LogoutCmd;
impl Command<AppState> for LogoutCmd {
    fn name(&self) -> &str {
        "logout"
    }
    fn description(&self) -> &str {
        "Log out of the current session"
    }
    fn execute(
        &self,
        _argv: &[&str],
        env: &mut Environment<'_, AppState>,
    ) -> Result<CommandOutput> {
        env.context.current = None;
        Ok(CommandOutput::Text("Logged out".to_string()))
    }
}
