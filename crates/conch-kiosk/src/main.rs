//! Authenticated time-query terminal.
//!
//! Users log in with a login/PIN pair and spend a per-user request quota on
//! `time`, `date`, and `howmuch` queries. An optional accounts TOML file
//! (`CONCH_KIOSK_ACCOUNTS` env var or first CLI argument) seeds the account
//! table at startup.

mod app_state;
mod commands;
mod config;
mod user;

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use conch_engine::{CommandOutput, LineOutcome, Shell};

use app_state::AppState;

fn accounts_path() -> Option<String> {
    std::env::var("CONCH_KIOSK_ACCOUNTS")
        .ok()
        .or_else(|| std::env::args().nth(1))
}

/// Read one line from stdin. `None` means the stream ended.
fn read_line(stdin: &io::Stdin) -> Result<Option<String>> {
    let mut buf = String::new();
    if stdin.lock().read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

/// Login/register menu shown while nobody is logged in.
///
/// Returns `false` when the user picks Exit or the input stream ends.
fn auth_menu(state: &mut AppState) -> Result<bool> {
    let stdin = io::stdin();
    loop {
        println!();
        println!("1. Login");
        println!("2. Register");
        println!("3. Exit");
        print!("Choice: ");
        io::stdout().flush()?;
        let Some(choice) = read_line(&stdin)? else {
            return Ok(false);
        };

        match choice.trim() {
            "3" => return Ok(false),
            c @ ("1" | "2") => {
                print!("Login (max 6 chars): ");
                io::stdout().flush()?;
                let Some(login) = read_line(&stdin)? else {
                    return Ok(false);
                };
                let login = login.trim().to_string();

                print!("PIN (0-100000): ");
                io::stdout().flush()?;
                let Some(pin_line) = read_line(&stdin)? else {
                    return Ok(false);
                };
                let Ok(pin) = pin_line.trim().parse::<u32>() else {
                    println!("Invalid PIN. Enter a number between 0 and 100000.");
                    continue;
                };

                if c == "1" {
                    match state.users.auth(&login, pin) {
                        Some(idx) => {
                            state.current = Some(idx);
                            println!("Login successful");
                            log::info!("user {login:?} logged in");
                            return Ok(true);
                        },
                        None => println!(
                            "Invalid credentials. Please register first if you haven't already."
                        ),
                    }
                } else {
                    match state.users.register(&login, pin) {
                        Ok(()) => println!("Registration successful. You can now login."),
                        Err(e) => println!("Registration failed: {e}"),
                    }
                }
            },
            _ => println!("Invalid choice. Please select 1, 2, or 3."),
        }
    }
}

fn current_login(shell: &Shell<AppState>) -> String {
    let state = shell.context();
    state
        .current
        .and_then(|idx| state.users.get(idx))
        .map(|u| u.login().to_string())
        .unwrap_or_else(|| "?".to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut state = AppState::new();
    if let Some(path) = accounts_path() {
        let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        let entries = config::parse_accounts(&text)?;
        let count = entries.len();
        for entry in entries {
            state
                .users
                .register(&entry.login, entry.pin)
                .with_context(|| format!("seeding account {:?}", entry.login))?;
            if entry.request_limit > 0 {
                state.users.set_limit(&entry.login, entry.request_limit)?;
            }
        }
        log::info!("seeded {count} accounts from {path}");
    }
    log::info!("account table ready ({} accounts)", state.users.len());
    if state.users.is_empty() {
        log::warn!("no seeded accounts; users must register before logging in");
    }

    let mut shell = Shell::new("> ", "exit", state)?;
    commands::register_kiosk_commands(shell.registry_mut())?;

    println!("Time kiosk. Type 'help' for available commands, 'exit' to quit.");

    let stdin = io::stdin();
    loop {
        if shell.context().current.is_none() && !auth_menu(shell.context_mut())? {
            break;
        }

        print!("{}> ", current_login(&shell));
        io::stdout().flush()?;
        let Some(mut line) = read_line(&stdin)? else {
            break;
        };
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        if line.is_empty() {
            continue;
        }

        match shell.process_line(&line) {
            Ok(LineOutcome::Exit) => break,
            Ok(LineOutcome::Continue(CommandOutput::Text(text))) => println!("{text}"),
            Ok(LineOutcome::Continue(CommandOutput::None)) => {},
            Err(e) => println!("error: {e}"),
        }
    }

    log::info!("kiosk session ended");
    Ok(())
}
