use ratatui::style::Color;
use std::{env, path};

use crate::config::TxConfig;
use crate::tools::ConfiguredProbe;
use crate::ui::Keybinds;

fn usage() -> ! {
    println!(
        "Usage: {} [options]

  -r, --root <dir>       SD card root (tools are read from <dir>/SCRIPTS/TOOLS).
  -d, --dir <dir>        Tools directory, overrides --root.
  -c, --config <config>  Specify a config file.
  -l, --list             Print the tools page instead of opening the TUI.
  -n, --name <file>      Print the embedded name of one tool file.
                         Exit status: 0 found, 1 not found, 2 read error.
  -v, --verbose          Increase verbosity level (multiple).
      --debug            Write a debug log to the config directory.
  -h, --help             Show this help message.
  -V, --version          Show the version number and quit.
",
        &env::args().next().unwrap_or_else(|| "txtools".to_string())
    );
    std::process::exit(0);
}

/// What to do once the options are parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive tools page
    Page,
    /// Print the page and exit
    List,
    /// Look up the embedded name of one file
    Name(path::PathBuf),
}

/// Command line interface.
#[derive(Debug)]
pub struct Opts {
    pub command: Command,
    /// Directory scanned for script tools
    pub tools_dir: path::PathBuf,
    /// Extension of script tools, without the dot
    pub script_extension: String,
    /// Longest embedded name accepted
    pub name_max_len: usize,
    /// Bytes of each file searched for the name markers
    pub read_window: usize,
    /// Tools listed before the scanned ones, relative to `tools_dir`
    pub pinned: Vec<String>,
    /// Answers for the built-in hardware panels
    pub probe: ConfiguredProbe,
    /// Verbosity level
    pub verbose: Option<u64>,
    /// Write the debug log
    pub debug: bool,
    /// Don't scroll past the last/first item
    pub hard_stop: bool,
    /// Use rounded borders
    pub rounded_borders: bool,
    /// Highlight color used in the UI
    pub highlight_color: Color,
    /// Border colors for different panels
    pub main_border_color: Color,
    pub tools_border_color: Color,
    pub status_border_color: Color,
    /// Text colors for different panels
    pub main_text_color: Color,
    pub tools_text_color: Color,
    pub status_text_color: Color,
    /// Color for panel header titles
    pub header_title_color: Color,
    /// Color of the index column
    pub label_color: Color,
    pub keybinds: Keybinds,
}

impl Default for Opts {
    fn default() -> Self {
        Self::from_config(TxConfig::default())
    }
}

impl Opts {
    /// Resolve a loaded config into options, warning about bad values
    pub fn from_config(mut cfg: TxConfig) -> Self {
        for warning in cfg.general.validate() {
            eprintln!("Warning: {}", warning);
        }

        let color = |name: &str, value: &str, fallback: Color| match string_to_color(value) {
            Ok(c) => c,
            Err(_) => {
                eprintln!("Warning: Invalid {} in config", name);
                fallback
            }
        };

        Self {
            command: Command::Page,
            tools_dir: cfg.general.tools_path(),
            highlight_color: color("highlight_color", &cfg.ui.highlight_color, Color::LightBlue),
            main_border_color: color("main_border_color", &cfg.ui.main_border_color, Color::White),
            tools_border_color: color("tools_border_color", &cfg.ui.tools_border_color, Color::White),
            status_border_color: color(
                "status_border_color",
                &cfg.ui.status_border_color,
                Color::White,
            ),
            main_text_color: color("main_text_color", &cfg.ui.main_text_color, Color::White),
            tools_text_color: color("tools_text_color", &cfg.ui.tools_text_color, Color::White),
            status_text_color: color("status_text_color", &cfg.ui.status_text_color, Color::White),
            header_title_color: color(
                "header_title_color",
                &cfg.ui.header_title_color,
                Color::White,
            ),
            label_color: color("label_color", &cfg.ui.label_color, Color::DarkGray),
            script_extension: cfg.general.script_extension,
            name_max_len: cfg.general.name_max_len,
            read_window: cfg.general.read_window,
            pinned: cfg.general.pinned,
            probe: cfg.modules.probe(),
            verbose: None,
            debug: false,
            hard_stop: cfg.ui.hard_stop,
            rounded_borders: cfg.ui.rounded_borders,
            keybinds: cfg.ui.keybinds,
        }
    }
}

/// Raw command line, before the config file is merged in
#[derive(Debug, Default)]
struct Args {
    root: Option<path::PathBuf>,
    dir: Option<path::PathBuf>,
    config: Option<path::PathBuf>,
    list: bool,
    name: Option<path::PathBuf>,
    verbose: Option<u64>,
    debug: bool,
}

fn parse_args(mut parser: lexopt::Parser) -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;
    let mut args = Args::default();

    while let Some(arg) = parser.next()? {
        match arg {
            Short('r') | Long("root") => {
                args.root = Some(path::PathBuf::from(parser.value()?));
            }
            Short('d') | Long("dir") => {
                args.dir = Some(path::PathBuf::from(parser.value()?));
            }
            Short('c') | Long("config") => {
                args.config = Some(path::PathBuf::from(parser.value()?));
            }
            Short('l') | Long("list") => {
                args.list = true;
            }
            Short('n') | Long("name") => {
                args.name = Some(path::PathBuf::from(parser.value()?));
            }
            Short('v') | Long("verbose") => {
                args.verbose = Some(args.verbose.map_or(1, |v| v + 1));
            }
            Long("debug") => {
                args.debug = true;
            }
            Short('h') | Long("help") => {
                usage();
            }
            Short('V') | Long("version") => {
                println!("{}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    if args.list && args.name.is_some() {
        return Err("--list and --name can't be used together".into());
    }

    Ok(args)
}

/// Parses the cli arguments and merges the config file
pub fn parse() -> eyre::Result<Opts> {
    let args = parse_args(lexopt::Parser::from_env())?;

    let mut cfg = TxConfig::new(args.config.clone())?;
    if let Some(root) = args.root {
        cfg.general.sd_root = root;
        cfg.general.tools_dir = None;
    }
    if let Some(dir) = args.dir {
        cfg.general.tools_dir = Some(dir);
    }

    let mut opts = Opts::from_config(cfg);
    opts.verbose = args.verbose;
    opts.debug = args.debug;
    opts.command = match (args.list, args.name) {
        (_, Some(file)) => Command::Name(file),
        (true, None) => Command::List,
        (false, None) => Command::Page,
    };

    Ok(opts)
}

/// Parses a [String] into a ratatui [color]
///
/// Case-insensitive
///
/// [String]: std::string::String
/// [color]: ratatui::style::Color
fn string_to_color<T: Into<String>>(val: T) -> Result<Color, &'static str> {
    let color_str = val.into();
    let color_lower = color_str.to_lowercase();

    // 8-bit color index first, "125" would also read as #RGB
    if let Ok(index) = color_str.parse::<u8>() {
        return Ok(Color::Indexed(index));
    }

    // Hex color (e.g., "#ff0000" or "ff0000")
    if let Some(hex_color) = parse_hex_color(&color_str) {
        return Ok(hex_color);
    }

    // RGB format (e.g., "rgb(255,0,0)")
    if let Some(rgb_color) = parse_rgb_color(&color_str) {
        return Ok(rgb_color);
    }

    match color_lower.as_ref() {
        "black" => Ok(Color::Black),
        "red" => Ok(Color::Red),
        "green" => Ok(Color::Green),
        "yellow" => Ok(Color::Yellow),
        "blue" => Ok(Color::Blue),
        "magenta" => Ok(Color::Magenta),
        "cyan" => Ok(Color::Cyan),
        "gray" | "grey" => Ok(Color::Gray),
        "darkgray" | "darkgrey" => Ok(Color::DarkGray),
        "lightred" => Ok(Color::LightRed),
        "lightgreen" => Ok(Color::LightGreen),
        "lightyellow" => Ok(Color::LightYellow),
        "lightblue" => Ok(Color::LightBlue),
        "lightmagenta" => Ok(Color::LightMagenta),
        "lightcyan" => Ok(Color::LightCyan),
        "white" => Ok(Color::White),
        "reset" => Ok(Color::Reset),
        _ => Err("unknown color format. Use: named colors (red, blue, etc.), hex (#ff0000), RGB (rgb(255,0,0)), or 8-bit index (0-255)"),
    }
}

/// Parse hex color in format #RRGGBB, RRGGBB or #RGB
fn parse_hex_color(color_str: &str) -> Option<Color> {
    let hex = color_str.strip_prefix('#').unwrap_or(color_str);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        // #RGB -> #RRGGBB
        3 => Some(Color::Rgb(
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        )),
        _ => None,
    }
}

/// Parse RGB color in format rgb(r,g,b) or (r,g,b)
fn parse_rgb_color(color_str: &str) -> Option<Color> {
    let rgb_str = color_str.trim();
    let values = rgb_str
        .strip_prefix("rgb(")
        .or_else(|| rgb_str.strip_prefix('('))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = values.split(',').map(|s| s.trim()).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, lexopt::Error> {
        parse_args(lexopt::Parser::from_args(list.iter().copied()))
    }

    #[test]
    fn test_parse_args() {
        let a = args(&["-r", "/sd", "-l", "-vv"]).unwrap();
        assert_eq!(a.root, Some(path::PathBuf::from("/sd")));
        assert!(a.list);
        assert_eq!(a.verbose, Some(2));

        let a = args(&["--name", "SCRIPTS/TOOLS/x.lua", "--debug"]).unwrap();
        assert_eq!(a.name, Some(path::PathBuf::from("SCRIPTS/TOOLS/x.lua")));
        assert!(a.debug);
    }

    #[test]
    fn test_parse_args_rejects_unknown_and_conflicts() {
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["-l", "-n", "x.lua"]).is_err());
        assert!(args(&["-d"]).is_err());
    }

    #[test]
    fn test_string_to_color() {
        assert_eq!(string_to_color("Red"), Ok(Color::Red));
        assert_eq!(string_to_color("#ff8000"), Ok(Color::Rgb(255, 128, 0)));
        assert_eq!(string_to_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(string_to_color("rgb(1, 2, 3)"), Ok(Color::Rgb(1, 2, 3)));
        assert_eq!(string_to_color("(4,5,6)"), Ok(Color::Rgb(4, 5, 6)));
        assert_eq!(string_to_color("125"), Ok(Color::Indexed(125)));
        assert!(string_to_color("chartreuse-ish").is_err());
    }

    #[test]
    fn test_opts_from_config() {
        let cfg = TxConfig::parse("tools_dir = \"/t\"\nhighlight_color = \"nope\"").unwrap();
        let opts = Opts::from_config(cfg);
        assert_eq!(opts.tools_dir, path::PathBuf::from("/t"));
        assert_eq!(opts.highlight_color, Color::LightBlue);
        assert_eq!(opts.command, Command::Page);
        assert_eq!(opts.name_max_len, 16);
    }
}
