use crate::tools::{NameLookup, ToolDescriptor};
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Instant;
use time::macros::format_description;

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();
static SESSION_START: OnceLock<Instant> = OnceLock::new();

fn now() -> time::OffsetDateTime {
    time::OffsetDateTime::now_local().unwrap_or_else(|_| time::OffsetDateTime::now_utc())
}

fn timestamp() -> String {
    now()
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"
        ))
        .unwrap_or_default()
}

/// Append to the session log, if one was started
fn append(write: impl FnOnce(&mut std::fs::File) -> std::io::Result<()>) {
    if let Some(path) = LOG_FILE.get() {
        match OpenOptions::new().append(true).open(path) {
            Ok(mut file) => {
                let _ = write(&mut file);
            }
            Err(_) => eprintln!("Warning: Failed to write to log file: {:?}", path),
        }
    }
}

pub fn init_debug_log() -> std::io::Result<()> {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let log_dir = PathBuf::from(home).join(".config/txtools/logs");

    if let Err(e) = create_dir_all(&log_dir) {
        eprintln!(
            "Warning: Failed to create log directory {:?}: {}",
            log_dir, e
        );
        return Err(e);
    }

    let stamp = now()
        .format(format_description!("[year][month][day]-[hour][minute][second]"))
        .unwrap_or_else(|_| "unknown".to_string());
    let pid = std::process::id();
    let path = log_dir.join(format!("txtools-debug-{}-pid{}.log", stamp, pid));

    // Clear the log on start
    let mut file = match OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Failed to create log file {:?}: {}", path, e);
            return Err(e);
        }
    };

    SESSION_START.set(Instant::now()).ok();

    writeln!(file, "=== TXTOOLS DEBUG SESSION STARTED ===")?;
    writeln!(file, "Timestamp: {}", timestamp())?;
    writeln!(file, "PID: {}", pid)?;
    writeln!(file, "Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "Log file: {:?}", path)?;
    writeln!(file)?;

    LOG_FILE.set(path).ok();
    Ok(())
}

pub fn log_startup_info(cli: &crate::cli::Opts) {
    append(|file| {
        writeln!(file, "[STARTUP] Configuration:")?;
        writeln!(file, "  Command: {:?}", cli.command)?;
        writeln!(file, "  Tools dir: {}", cli.tools_dir.display())?;
        writeln!(file, "  Script extension: {}", cli.script_extension)?;
        writeln!(file, "  Name max length: {}", cli.name_max_len)?;
        writeln!(file, "  Read window: {}", cli.read_window)?;
        writeln!(file, "  Pinned: {:?}", cli.pinned)?;
        writeln!(file, "  Modules: {:?}", cli.probe)?;
        writeln!(file)
    });
}

pub fn log_event(event: &str) {
    append(|file| {
        let elapsed = SESSION_START
            .get()
            .map(|start| start.elapsed().as_millis())
            .unwrap_or(0);
        writeln!(file, "[{:>6}ms] EVENT: {}", elapsed, event)
    });
}

pub fn log_name_lookup(path: &Path, lookup: &NameLookup) {
    append(|file| match lookup {
        NameLookup::Found(name) => writeln!(
            file,
            "[NAME] {}: found {:?} ({} bytes)",
            path.display(),
            name.to_string_lossy(),
            name.len()
        ),
        NameLookup::NotFound(miss) => {
            writeln!(file, "[NAME] {}: not found ({})", path.display(), miss)
        }
        NameLookup::ReadError(e) => {
            writeln!(file, "[NAME] {}: read error ({})", path.display(), e)
        }
    });
}

pub fn log_page_built(tools: &[ToolDescriptor], build_time_ms: u64) {
    append(|file| {
        writeln!(file)?;
        writeln!(file, "[PAGE] {} tools in {}ms", tools.len(), build_time_ms)?;
        for (idx, tool) in tools.iter().enumerate() {
            writeln!(
                file,
                "  [{:>3}] {} ({})",
                idx + 1,
                tool.display_name,
                tool.source
            )?;
        }
        writeln!(file)
    });
}

pub fn log_selection_change(selected_idx: Option<usize>, label: Option<&str>, scroll_offset: usize) {
    append(|file| match selected_idx {
        Some(idx) => writeln!(
            file,
            "[SELECTION] Index: {}, Scroll: {}, Tool: {}",
            idx,
            scroll_offset,
            label.unwrap_or("Unknown")
        ),
        None => writeln!(file, "[SELECTION] None (no selection)"),
    });
}

pub fn log_launch(tool: &ToolDescriptor) {
    append(|file| {
        writeln!(file, "[LAUNCH] Tool: \"{}\"", tool.display_name)?;
        writeln!(file, "         Target: {}", tool.target().replace('\t', " "))?;
        writeln!(file, "         Name source: {}", tool.source)
    });
}

pub fn log_session_end() {
    append(|file| {
        let elapsed = SESSION_START
            .get()
            .map(|start| start.elapsed())
            .unwrap_or(std::time::Duration::ZERO);
        writeln!(file)?;
        writeln!(file, "=== TXTOOLS DEBUG SESSION ENDED ===")?;
        writeln!(file, "Duration: {:.3}s", elapsed.as_secs_f64())?;
        writeln!(file, "Timestamp: {}", timestamp())?;
        writeln!(file)
    });
}
