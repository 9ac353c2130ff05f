//! Tool discovery: embedded names, directory listing and built-in panels

pub mod entry;
pub mod hardware;
pub mod name;
pub mod scan;
pub mod source;

pub use entry::{NameSource, ToolDescriptor};
pub use hardware::{ConfiguredProbe, HardwareSession, ModuleInfo, ModuleProbe};
pub use source::{FsSource, NameLookup, ToolSource};
