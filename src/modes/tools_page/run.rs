//! Tools page mode

use crate::cli::Opts;
use eyre::{Result, WrapErr};

use crate::core::debug_logger;
use crate::core::state::{Message, State};
use crate::tools::source::read_tool_name;
use crate::tools::{FsSource, HardwareSession, NameLookup};
use crate::ui::{InputConfig, InputEvent as Event, UI};

use super::build::{build_tools, list_lines, PageOptions};

use crossterm::event::KeyEvent;
use is_terminal::IsTerminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use scopeguard::defer;
use std::io;
use std::path::Path;

/// Print the page without a TUI
pub fn run_list(cli: Opts) -> Result<()> {
    let mut session = HardwareSession::new();
    let mut probe = cli.probe.clone();
    let tools = build_tools(&PageOptions::from_opts(&cli), &FsSource, &mut session, &mut probe);
    for line in list_lines(&tools) {
        println!("{}", line);
    }
    Ok(())
}

/// Look up one file's embedded name, returning the exit status
pub fn run_name(cli: &Opts, file: &Path) -> i32 {
    let lookup = read_tool_name(&FsSource, file, cli.read_window, cli.name_max_len);
    debug_logger::log_name_lookup(file, &lookup);
    match lookup {
        NameLookup::Found(name) => {
            println!("{}", crate::strings::sanitize_label(&name.to_string_lossy()));
            0
        }
        NameLookup::NotFound(miss) => {
            if cli.verbose.unwrap_or(0) > 0 {
                eprintln!("{}: {}", file.display(), miss);
            }
            1
        }
        NameLookup::ReadError(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            2
        }
    }
}

fn message_for(key: &KeyEvent, cli: &Opts) -> Option<Message> {
    let (code, mods) = (key.code, key.modifiers);
    let kb = &cli.keybinds;
    if kb.matches_exit(code, mods) {
        Some(Message::Exit)
    } else if kb.matches_select(code, mods) {
        Some(Message::Select)
    } else if kb.matches_up(code, mods) {
        Some(Message::Up)
    } else if kb.matches_down(code, mods) {
        Some(Message::Down)
    } else if kb.matches_page_up(code, mods) {
        Some(Message::PageUp)
    } else if kb.matches_page_down(code, mods) {
        Some(Message::PageDown)
    } else if kb.matches_first(code, mods) {
        Some(Message::First)
    } else if kb.matches_last(code, mods) {
        Some(Message::Last)
    } else if kb.matches_rescan(code, mods) {
        Some(Message::Rescan)
    } else {
        None
    }
}

/// Run the interactive tools page
pub fn run(cli: Opts) -> Result<()> {
    // No terminal to draw on, behave like --list
    if !io::stderr().is_terminal() {
        return run_list(cli);
    }

    let mut session = HardwareSession::new();
    let mut probe = cli.probe.clone();
    let tools = build_tools(&PageOptions::from_opts(&cli), &FsSource, &mut session, &mut probe);
    let mut state = State::new(tools, cli.hard_stop);

    crate::setup_terminal()?;
    defer! {
        crate::shutdown_terminal();
    }

    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::new(backend).wrap_err("Failed to start crossterm terminal")?;
    terminal.hide_cursor().wrap_err("Failed to hide cursor")?;
    terminal.clear().wrap_err("Failed to clear terminal")?;

    let input = InputConfig::default().init();
    let ui = UI::new();

    loop {
        let size = terminal.size().wrap_err("Failed to read terminal size")?;
        let rows = UI::list_rows(size.height);
        if rows != state.visible_rows {
            state.update(Message::Resize(rows));
        }

        terminal
            .draw(|f| ui.render(f, &state, &cli))
            .wrap_err("Failed to draw tools page")?;

        match input.next()? {
            Event::Input(key) => {
                let before = state.selected;
                if let Some(msg) = message_for(&key, &cli) {
                    state.update(msg);
                }
                if state.selected != before {
                    debug_logger::log_selection_change(
                        state.selected,
                        state.selected_tool().map(|t| t.display_name.as_str()),
                        state.scroll_offset,
                    );
                }
            }
            Event::Tick | Event::Resize => {}
        }

        if state.should_rescan {
            debug_logger::log_event("rescan requested");
            session.invalidate();
            let tools =
                build_tools(&PageOptions::from_opts(&cli), &FsSource, &mut session, &mut probe);
            state.replace_tools(tools);
        }

        if state.should_exit {
            break;
        }
    }

    terminal.show_cursor().wrap_err("Failed to show cursor")?;
    drop(terminal);
    crate::shutdown_terminal();

    if state.should_launch {
        if let Some(tool) = state.selected_tool() {
            debug_logger::log_launch(tool);
            println!("{}", tool.target());
        }
    }

    Ok(())
}
