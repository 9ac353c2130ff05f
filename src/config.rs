use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::tools::name::{READ_WINDOW, TOOL_NAME_MAXLEN};
use crate::tools::{ConfiguredProbe, ModuleInfo};

/// Error type for config loading
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Toml(e) => write!(f, "TOML parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TxConfig {
    #[serde(flatten)]
    pub general: GeneralConfig,
    #[serde(flatten)]
    pub ui: UiConfig,

    // RF modules live under [modules.internal] / [modules.external]
    #[serde(default)]
    pub modules: ModulesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    /// Root of the SD card
    #[serde(default = "default_sd_root")]
    pub sd_root: PathBuf,
    /// Tools directory, defaults to `<sd_root>/SCRIPTS/TOOLS`
    #[serde(default)]
    pub tools_dir: Option<PathBuf>,
    #[serde(default = "default_script_extension")]
    pub script_extension: String,
    #[serde(default = "default_name_max_len")]
    pub name_max_len: usize,
    #[serde(default = "default_read_window")]
    pub read_window: usize,
    /// Tools listed first, relative to the tools directory
    #[serde(default = "default_pinned")]
    pub pinned: Vec<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            sd_root: default_sd_root(),
            tools_dir: None,
            script_extension: default_script_extension(),
            name_max_len: default_name_max_len(),
            read_window: default_read_window(),
            pinned: default_pinned(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,
    #[serde(default)]
    pub hard_stop: bool,
    #[serde(default = "default_true")]
    pub rounded_borders: bool,
    #[serde(default = "default_white")]
    pub main_border_color: String,
    #[serde(default = "default_white")]
    pub tools_border_color: String,
    #[serde(default = "default_white")]
    pub status_border_color: String,
    #[serde(default = "default_white")]
    pub main_text_color: String,
    #[serde(default = "default_white")]
    pub tools_text_color: String,
    #[serde(default = "default_white")]
    pub status_text_color: String,
    #[serde(default = "default_white")]
    pub header_title_color: String,
    #[serde(default = "default_label_color")]
    pub label_color: String,
    #[serde(default)]
    pub keybinds: crate::ui::Keybinds,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            highlight_color: default_highlight_color(),
            hard_stop: false,
            rounded_borders: true,
            main_border_color: default_white(),
            tools_border_color: default_white(),
            status_border_color: default_white(),
            main_text_color: default_white(),
            tools_text_color: default_white(),
            status_text_color: default_white(),
            header_title_color: default_white(),
            label_color: default_label_color(),
            keybinds: crate::ui::Keybinds::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ModulesConfig {
    pub internal: Option<ModuleInfo>,
    pub external: Option<ModuleInfo>,
}

impl ModulesConfig {
    pub fn probe(&self) -> ConfiguredProbe {
        ConfiguredProbe {
            internal: self.internal,
            external: self.external,
        }
    }
}

// Default value implementations for serde
fn default_sd_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_script_extension() -> String {
    "lua".to_string()
}
fn default_name_max_len() -> usize {
    TOOL_NAME_MAXLEN
}
fn default_read_window() -> usize {
    READ_WINDOW
}
fn default_pinned() -> Vec<String> {
    vec!["CROSSFIRE/crossfire.lua".to_string()]
}
fn default_true() -> bool {
    true
}
fn default_highlight_color() -> String {
    "LightBlue".to_string()
}
fn default_white() -> String {
    "White".to_string()
}
fn default_label_color() -> String {
    "DarkGray".to_string()
}

impl GeneralConfig {
    /// Directory scanned for script tools
    pub fn tools_path(&self) -> PathBuf {
        self.tools_dir
            .clone()
            .unwrap_or_else(|| self.sd_root.join("SCRIPTS").join("TOOLS"))
    }

    /// Reset out-of-range values, returning a warning for each
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(1..=64).contains(&self.name_max_len) {
            warnings.push(format!(
                "name_max_len must be between 1-64, using {}",
                TOOL_NAME_MAXLEN
            ));
            self.name_max_len = TOOL_NAME_MAXLEN;
        }
        if !(8..=65536).contains(&self.read_window) {
            warnings.push(format!(
                "read_window must be between 8-65536 bytes, using {}",
                READ_WINDOW
            ));
            self.read_window = READ_WINDOW;
        }
        let ext = self.script_extension.trim_start_matches('.');
        if ext.is_empty() {
            warnings.push("script_extension is empty, using lua".to_string());
            self.script_extension = default_script_extension();
        } else if ext.len() != self.script_extension.len() {
            self.script_extension = ext.to_string();
        }
        warnings
    }
}

impl TxConfig {
    pub fn new(cli_config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Priority: CLI arg > XDG_CONFIG_HOME > Default fallback
        let cli_provided = cli_config_path.is_some();
        let config_path = if let Some(path) = cli_config_path {
            Some(path)
        } else if let Some(proj_dirs) = ProjectDirs::from("", "", "txtools") {
            let mut p = proj_dirs.config_dir().to_path_buf();
            p.push("config.toml");
            Some(p)
        } else {
            None
        };

        let mut cfg: TxConfig = if let Some(ref path) = config_path {
            if path.exists() {
                let contents = fs::read_to_string(path)?;
                Self::parse(&contents)?
            } else if cli_provided {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Config file not found at {}", path.display()),
                )
                .into());
            } else {
                TxConfig::default()
            }
        } else {
            TxConfig::default()
        };

        cfg.apply_env(|key| env::var(key).ok());
        Ok(cfg)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Override with TXTOOLS_* variables
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("TXTOOLS_SD_ROOT") {
            self.general.sd_root = PathBuf::from(val);
        }
        if let Some(val) = var("TXTOOLS_TOOLS_DIR") {
            self.general.tools_dir = Some(PathBuf::from(val));
        }
        if let Some(val) = var("TXTOOLS_SCRIPT_EXTENSION") {
            self.general.script_extension = val;
        }
        if let Some(val) = var("TXTOOLS_NAME_MAX_LEN") {
            self.general.name_max_len = val.parse().unwrap_or(self.general.name_max_len);
        }
        if let Some(val) = var("TXTOOLS_HARD_STOP") {
            self.ui.hard_stop = val.parse().unwrap_or(self.ui.hard_stop);
        }
        if let Some(val) = var("TXTOOLS_ROUNDED_BORDERS") {
            self.ui.rounded_borders = val.parse().unwrap_or(self.ui.rounded_borders);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = TxConfig::parse("").unwrap();
        assert_eq!(cfg.general.name_max_len, 16);
        assert_eq!(cfg.general.read_window, 1024);
        assert_eq!(cfg.general.script_extension, "lua");
        assert_eq!(cfg.general.pinned, vec!["CROSSFIRE/crossfire.lua"]);
        assert_eq!(
            cfg.general.tools_path(),
            PathBuf::from(".").join("SCRIPTS").join("TOOLS")
        );
        assert!(cfg.ui.rounded_borders);
        assert!(cfg.modules.internal.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let cfg = TxConfig::parse(
            r#"
            sd_root = "/media/radio"
            name_max_len = 12
            pinned = []
            highlight_color = "yellow"
            hard_stop = true

            [keybinds]
            rescan = ["f5"]

            [modules.internal]
            spectrum_analyser = true
            power_meter = true

            [modules.external]
            power_meter = true
            "#,
        )
        .unwrap();

        assert_eq!(cfg.general.sd_root, PathBuf::from("/media/radio"));
        assert_eq!(cfg.general.name_max_len, 12);
        assert!(cfg.general.pinned.is_empty());
        assert_eq!(cfg.ui.highlight_color, "yellow");
        assert!(cfg.ui.hard_stop);
        assert_eq!(
            cfg.modules.external,
            Some(ModuleInfo {
                spectrum_analyser: false,
                power_meter: true
            })
        );
        assert!(cfg.modules.probe().internal.unwrap().spectrum_analyser);
    }

    #[test]
    fn test_tools_dir_override() {
        let cfg = TxConfig::parse("tools_dir = \"/tmp/tools\"").unwrap();
        assert_eq!(cfg.general.tools_path(), PathBuf::from("/tmp/tools"));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            TxConfig::parse("name_max_len = \"sixteen\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_validate_resets_out_of_range() {
        let mut general = GeneralConfig {
            name_max_len: 0,
            read_window: 1,
            script_extension: ".LUA".to_string(),
            ..GeneralConfig::default()
        };
        let warnings = general.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(general.name_max_len, 16);
        assert_eq!(general.read_window, 1024);
        assert_eq!(general.script_extension, "LUA");
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("TXTOOLS_SD_ROOT", "/sd"),
            ("TXTOOLS_NAME_MAX_LEN", "10"),
            ("TXTOOLS_HARD_STOP", "not-a-bool"),
        ]
        .into_iter()
        .collect();

        let mut cfg = TxConfig::default();
        cfg.apply_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(cfg.general.sd_root, PathBuf::from("/sd"));
        assert_eq!(cfg.general.name_max_len, 10);
        assert!(!cfg.ui.hard_stop);
    }

    #[test]
    fn test_missing_cli_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = TxConfig::new(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
