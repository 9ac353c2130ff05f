// Tools directory listing

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use jwalk::{Parallelism, WalkDir};

/// Whether `file_name` carries the script extension (ASCII case-insensitive)
pub fn is_script_tool(file_name: &OsStr, ext: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Dot files are hidden
#[inline]
fn is_hidden(file_name: &OsStr) -> bool {
    file_name
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Anything that is not a regular file once links are followed
#[inline]
fn is_system(path: &Path) -> bool {
    !fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

/// List the script tools directly inside `dir`, sorted by file name.
///
/// Sub-folders, hidden files and non-regular files are skipped. A failure
/// while listing stops the scan and keeps what was found so far.
pub fn scan_tools_dir(dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    // An unreadable directory would otherwise look like an empty one
    fs::read_dir(dir)
        .wrap_err_with(|| format!("tools directory {} is not readable", dir.display()))?;

    let mut tools = Vec::new();

    for entry in WalkDir::new(dir)
        .skip_hidden(false)
        .sort(true)
        .parallelism(Parallelism::Serial)
        .min_depth(1)
        .max_depth(1)
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                crate::core::debug_logger::log_event(&format!(
                    "scan of {} stopped: {}",
                    dir.display(),
                    e
                ));
                break;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        if is_hidden(file_name) {
            continue;
        }
        let path = entry.path();
        if is_system(&path) {
            continue;
        }

        if is_script_tool(file_name, ext) {
            tools.push(path);
        }
    }

    Ok(tools)
}

/// Label for a tool without an embedded name: the file name without its
/// extension, cut to `max_len` characters.
///
/// Examples:
/// - "SCRIPTS/TOOLS/Gimbal Setup.lua" -> "Gimbal Setup"
/// - "tools/archive.tar.lua" -> "archive.tar"
pub fn label_from_filename(path: &Path, max_len: usize) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_is_script_tool() {
        assert!(is_script_tool(OsStr::new("gimbal.lua"), "lua"));
        assert!(is_script_tool(OsStr::new("GIMBAL.LUA"), "lua"));
        assert!(is_script_tool(OsStr::new("a.b.Lua"), "lua"));
        assert!(!is_script_tool(OsStr::new("gimbal.luac"), "lua"));
        assert!(!is_script_tool(OsStr::new("lua"), "lua"));
        assert!(!is_script_tool(OsStr::new("readme.txt"), "lua"));
    }

    #[test]
    fn test_scan_filters_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("b_tool.lua"), "return {}").unwrap();
        fs::write(root.join("A_TOOL.LUA"), "return {}").unwrap();
        fs::write(root.join("notes.txt"), "hello").unwrap();
        fs::write(root.join(".hidden.lua"), "return {}").unwrap();
        fs::create_dir(root.join("CROSSFIRE")).unwrap();
        fs::write(root.join("CROSSFIRE").join("crossfire.lua"), "return {}").unwrap();
        fs::create_dir(root.join("folder.lua")).unwrap();

        let tools = scan_tools_dir(root, "lua").unwrap();
        assert_eq!(names(&tools), vec!["A_TOOL.LUA", "b_tool.lua"]);
    }

    #[test]
    fn test_scan_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_tools_dir(&dir.path().join("SCRIPTS/TOOLS"), "lua").is_err());

        let file = dir.path().join("tool.lua");
        fs::write(&file, "return {}").unwrap();
        assert!(scan_tools_dir(&file, "lua").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_unreadable_dir_is_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tools = dir.path().join("TOOLS");
        fs::create_dir(&tools).unwrap();
        fs::write(tools.join("gimbal.lua"), "return {}").unwrap();
        fs::set_permissions(&tools, fs::Permissions::from_mode(0o000)).unwrap();

        // root ignores the mode bits
        let readable = fs::read_dir(&tools).is_ok();
        let result = scan_tools_dir(&tools, "lua");
        fs::set_permissions(&tools, fs::Permissions::from_mode(0o755)).unwrap();

        if !readable {
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_scan_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_tools_dir(dir.path(), "lua").unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_dangling_links() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("real.lua"), "return {}").unwrap();
        std::os::unix::fs::symlink(root.join("gone.lua"), root.join("dangling.lua")).unwrap();

        let tools = scan_tools_dir(root, "lua").unwrap();
        assert_eq!(names(&tools), vec!["real.lua"]);
    }

    #[test]
    fn test_label_from_filename() {
        assert_eq!(
            label_from_filename(Path::new("SCRIPTS/TOOLS/Gimbal Setup.lua"), 16),
            "Gimbal Setup"
        );
        assert_eq!(label_from_filename(Path::new("t/archive.tar.lua"), 16), "archive.tar");
        assert_eq!(
            label_from_filename(Path::new("t/AVeryLongScriptFileName.lua"), 16),
            "AVeryLongScriptF"
        );
        assert_eq!(label_from_filename(Path::new("t/ÜberTool.lua"), 4), "Über");
    }
}
