// Assembling the tools page

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::core::debug_logger;
use crate::tools::scan::scan_tools_dir;
use crate::tools::{HardwareSession, ModuleProbe, NameLookup, ToolDescriptor, ToolSource};

/// Inputs of one page build
#[derive(Debug, Clone)]
pub struct PageOptions<'a> {
    pub tools_dir: &'a Path,
    pub script_extension: &'a str,
    pub pinned: &'a [String],
    pub read_window: usize,
    pub name_max_len: usize,
    pub verbose: bool,
}

impl<'a> PageOptions<'a> {
    pub fn from_opts(cli: &'a crate::cli::Opts) -> Self {
        Self {
            tools_dir: &cli.tools_dir,
            script_extension: &cli.script_extension,
            pinned: &cli.pinned,
            read_window: cli.read_window,
            name_max_len: cli.name_max_len,
            verbose: cli.verbose.unwrap_or(0) > 0,
        }
    }
}

/// Pinned tools that exist, in listed order
fn pinned_paths(page: &PageOptions) -> Vec<PathBuf> {
    page.pinned
        .iter()
        .map(|rel| page.tools_dir.join(rel))
        .filter(|path| path.is_file())
        .collect()
}

fn describe(source: &impl ToolSource, page: &PageOptions, path: &Path) -> ToolDescriptor {
    let (tool, lookup) =
        ToolDescriptor::from_script(source, path, page.read_window, page.name_max_len);
    debug_logger::log_name_lookup(path, &lookup);
    if let NameLookup::ReadError(ref e) = lookup {
        if page.verbose {
            eprintln!("Warning: can't read {}: {}", path.display(), e);
        }
    }
    tool
}

/// Build the page: pinned tools, scripts found in the tools directory,
/// then the panels of the RF modules.
pub fn build_tools(
    page: &PageOptions,
    source: &impl ToolSource,
    session: &mut HardwareSession,
    probe: &mut impl ModuleProbe,
) -> Vec<ToolDescriptor> {
    let build_start = Instant::now();
    let mut tools = Vec::new();
    let mut seen = HashSet::new();

    for path in pinned_paths(page) {
        if seen.insert(path.clone()) {
            tools.push(describe(source, page, &path));
        }
    }

    match scan_tools_dir(page.tools_dir, page.script_extension) {
        Ok(paths) => {
            for path in paths {
                if seen.insert(path.clone()) {
                    tools.push(describe(source, page, &path));
                }
            }
        }
        Err(e) => {
            debug_logger::log_event(&format!("no script tools: {}", e));
            if page.verbose {
                eprintln!("Warning: {}", e);
            }
        }
    }

    tools.extend(
        session
            .panels(probe)
            .into_iter()
            .map(|(kind, module)| ToolDescriptor::panel(kind, module, page.name_max_len)),
    );

    debug_logger::log_page_built(&tools, build_start.elapsed().as_millis() as u64);
    tools
}

/// `--list` output: `<index>\t<label>\t<source>\t<target>`, numbered from 1
pub fn list_lines(tools: &[ToolDescriptor]) -> Vec<String> {
    tools
        .iter()
        .enumerate()
        .map(|(idx, tool)| {
            format!(
                "{}\t{}\t{}\t{}",
                idx + 1,
                crate::strings::sanitize_label(&tool.display_name),
                tool.source,
                tool.target()
            )
        })
        .collect()
}
