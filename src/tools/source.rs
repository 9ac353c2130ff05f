// Reading the head of tool files

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use super::name::{self, NameMiss, ToolName};

/// Access to tool files on the card
pub trait ToolSource {
    /// Read at most `limit` bytes from the start of `path`
    fn read_head(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>>;
}

/// Reads straight from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl ToolSource for FsSource {
    fn read_head(&self, path: &Path, limit: usize) -> io::Result<Vec<u8>> {
        let file = File::open(path)?;
        let mut head = Vec::with_capacity(limit);
        file.take(limit as u64).read_to_end(&mut head)?;
        Ok(head)
    }
}

/// Outcome of looking up the embedded name of one file
#[derive(Debug)]
pub enum NameLookup {
    Found(ToolName),
    NotFound(NameMiss),
    /// The file could not be opened or read
    ReadError(io::Error),
}

impl NameLookup {
    /// Found name, if any
    pub fn found(&self) -> Option<&ToolName> {
        match self {
            NameLookup::Found(name) => Some(name),
            _ => None,
        }
    }
}

/// Read the head of `path` and extract its embedded name
pub fn read_tool_name(
    source: &impl ToolSource,
    path: &Path,
    window: usize,
    max_len: usize,
) -> NameLookup {
    match source.read_head(path, window) {
        Ok(head) => match name::extract(&head, max_len) {
            Ok(found) => NameLookup::Found(found),
            Err(miss) => NameLookup::NotFound(miss),
        },
        Err(e) => NameLookup::ReadError(e),
    }
}
