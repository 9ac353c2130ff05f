// Tool descriptors shown on the tools page

use std::fmt;
use std::path::{Path, PathBuf};

use super::hardware::{PanelKind, RfModule};
use super::scan::label_from_filename;
use super::source::{read_tool_name, NameLookup, ToolSource};

/// Where the display name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    EmbeddedMarker,
    FilenameDerived,
    Builtin,
}

impl fmt::Display for NameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameSource::EmbeddedMarker => "embedded",
            NameSource::FilenameDerived => "filename",
            NameSource::Builtin => "builtin",
        })
    }
}

/// What pressing the tool's button opens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Script,
    Panel(PanelKind, RfModule),
}

/// One button on the tools page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub path: Option<PathBuf>,
    pub display_name: String,
    pub source: NameSource,
    pub kind: ToolKind,
}

impl ToolDescriptor {
    /// Describe a script file, preferring its embedded name.
    ///
    /// A file that cannot be read keeps its place on the page under its
    /// filename label; the read error is returned alongside for reporting.
    pub fn from_script(
        source: &impl ToolSource,
        path: &Path,
        window: usize,
        max_len: usize,
    ) -> (Self, NameLookup) {
        let lookup = read_tool_name(source, path, window, max_len);

        let (display_name, name_source) = match lookup.found() {
            Some(name) => (name.to_string_lossy(), NameSource::EmbeddedMarker),
            None => (label_from_filename(path, max_len), NameSource::FilenameDerived),
        };

        let descriptor = Self {
            path: Some(path.to_path_buf()),
            display_name,
            source: name_source,
            kind: ToolKind::Script,
        };
        (descriptor, lookup)
    }

    /// Built-in panel, its label cut to `max_len` characters like a
    /// filename label
    pub fn panel(kind: PanelKind, module: RfModule, max_len: usize) -> Self {
        Self {
            path: None,
            display_name: kind.label(module).chars().take(max_len).collect(),
            source: NameSource::Builtin,
            kind: ToolKind::Panel(kind, module),
        }
    }

    /// Line printed when the tool is selected
    ///
    /// - script: `script\t<path>`
    /// - panel: `panel\t<kind>\t<module>`
    pub fn target(&self) -> String {
        match (self.kind, &self.path) {
            (ToolKind::Script, Some(path)) => format!("script\t{}", path.display()),
            (ToolKind::Script, None) => "script\t".to_string(),
            (ToolKind::Panel(kind, module), _) => {
                format!("panel\t{}\t{}", kind.as_str(), module.as_str())
            }
        }
    }
}
