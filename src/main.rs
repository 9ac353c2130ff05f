#![deny(unsafe_code)]
#![deny(missing_docs)]

//! # txtools
//!
//! > _Fast_ TUI tools page for radio transmitter SD cards
//!
//! Lists the Lua tools of `SCRIPTS/TOOLS` under their embedded `TNS|name|TNE`
//! names, plus the built-in panels of the RF modules.

/// CLI parser
mod cli;
/// Config file
mod config;
/// Page state and debug log
mod core;
/// Run modes
mod modes;
/// String helpers
mod strings;
/// Tool discovery
mod tools;
/// UI helpers
mod ui;

use std::io;
use std::process;

use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use eyre::WrapErr;

fn main() {
    match real_main() {
        Ok(code) => {
            crate::core::debug_logger::log_session_end();
            process::exit(code);
        }
        Err(error) => {
            shutdown_terminal();
            crate::core::debug_logger::log_event(&format!("fatal: {error}"));
            crate::core::debug_logger::log_session_end();
            eprintln!("{error:?}");
            process::exit(1);
        }
    }
}

fn setup_terminal() -> eyre::Result<()> {
    enable_raw_mode().wrap_err("Failed to enable raw mode")?;
    io::stderr()
        .execute(EnterAlternateScreen)
        .wrap_err("Failed to enter alternate screen")?;
    Ok(())
}

fn shutdown_terminal() {
    let _ = io::stderr().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn real_main() -> eyre::Result<i32> {
    let cli = cli::parse()?;

    if cli.debug {
        // a missing log is not fatal, init_debug_log already warned
        let _ = crate::core::debug_logger::init_debug_log();
    }
    crate::core::debug_logger::log_startup_info(&cli);

    match cli.command.clone() {
        cli::Command::Name(file) => Ok(modes::tools_page::run_name(&cli, &file)),
        cli::Command::List => modes::tools_page::run_list(cli).map(|_| 0),
        cli::Command::Page => modes::tools_page::run(cli).map(|_| 0),
    }
}
