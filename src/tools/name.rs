// Embedded tool name parsing
//
// A tool file may carry its display name as `TNS|<name>|TNE` somewhere in its
// first READ_WINDOW bytes.

use std::fmt;

/// Longest name accepted between the markers
pub const TOOL_NAME_MAXLEN: usize = 16;

/// How many bytes of a tool file are searched for the markers
pub const READ_WINDOW: usize = 1024;

const START_MARKER: &[u8; 4] = b"TNS|";
const END_MARKER: &[u8; 4] = b"|TNE";

/// Why no embedded name was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMiss {
    /// `TNS|` does not occur in the buffer
    NoStartMarker,
    /// `|TNE` does not occur in the buffer
    NoEndMarker,
    /// The first `|TNE` sits at or before the start of the name
    EndBeforeStart,
    /// The enclosed name is longer than allowed
    TooLong { len: usize, max: usize },
}

impl fmt::Display for NameMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameMiss::NoStartMarker => write!(f, "no TNS| marker"),
            NameMiss::NoEndMarker => write!(f, "no |TNE marker"),
            NameMiss::EndBeforeStart => write!(f, "|TNE marker before name start"),
            NameMiss::TooLong { len, max } => {
                write!(f, "embedded name is {} bytes, limit is {}", len, max)
            }
        }
    }
}

impl std::error::Error for NameMiss {}

/// Name bytes found between the markers, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolName(Vec<u8>);

impl ToolName {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lossy text form for display
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

/// First position of `needle` in `haystack`
#[inline]
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Locate the name inside `contents`, returning its byte range.
///
/// Both markers are searched from the beginning of the buffer, so a `|TNE`
/// that precedes `TNS|` makes the lookup fail even if another `|TNE` follows
/// the name.
fn locate(contents: &[u8], max_len: usize) -> Result<std::ops::Range<usize>, NameMiss> {
    let start = find(contents, START_MARKER).ok_or(NameMiss::NoStartMarker)? + START_MARKER.len();
    let end = find(contents, END_MARKER).ok_or(NameMiss::NoEndMarker)?;

    if end <= start {
        return Err(NameMiss::EndBeforeStart);
    }

    let len = end - start;
    if len > max_len {
        return Err(NameMiss::TooLong { len, max: max_len });
    }

    Ok(start..end)
}

/// Extract the embedded name from the head of a tool file.
///
/// Examples:
/// - `b"junkTNS|Gimbal|TNEjunk"` -> `Gimbal`
/// - `b"TNS||TNE"` -> `EndBeforeStart` (empty names are rejected)
pub fn extract(contents: &[u8], max_len: usize) -> Result<ToolName, NameMiss> {
    let mut buf = NameBuffer::new(max_len);
    buf.fill_from(contents).map(|name| ToolName(name.to_vec()))
}

/// Reusable output buffer of `max_len + 1` bytes.
///
/// A successful fill copies the name and zeroes everything after it, so no
/// bytes of an earlier name survive. A failed fill leaves the buffer as it was.
#[derive(Debug, Clone)]
pub struct NameBuffer {
    buf: Vec<u8>,
    len: usize,
}

impl NameBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: vec![0; max_len + 1],
            len: 0,
        }
    }

    pub fn max_len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn fill_from(&mut self, contents: &[u8]) -> Result<&[u8], NameMiss> {
        let range = locate(contents, self.max_len())?;
        let len = range.len();

        self.buf[..len].copy_from_slice(&contents[range]);
        self.buf[len..].fill(0);
        self.len = len;

        Ok(&self.buf[..len])
    }

    /// Name of the last successful fill
    #[allow(dead_code)]
    pub fn name(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Whole buffer including the zero tail
    #[allow(dead_code)]
    pub fn raw(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_between_markers() {
        let name = extract(b"junkTNS|Gimbal|TNEjunk", TOOL_NAME_MAXLEN).unwrap();
        assert_eq!(name.as_bytes(), b"Gimbal");
        assert_eq!(name.to_string_lossy(), "Gimbal");

        let name = extract(b"-- TNS|abc|TNE\nlocal x = 1", TOOL_NAME_MAXLEN).unwrap();
        assert_eq!(name.as_bytes(), b"abc");
    }

    #[test]
    fn test_extract_name_at_limit() {
        let name = extract(b"TNS|0123456789abcdef|TNE", 16).unwrap();
        assert_eq!(name.len(), 16);
    }

    #[test]
    fn test_extract_too_long() {
        assert_eq!(
            extract(b"TNS|ThisNameIsWayTooLong|TNE", 16),
            Err(NameMiss::TooLong { len: 20, max: 16 })
        );
        assert_eq!(
            extract(b"TNS|abc|TNE", 2),
            Err(NameMiss::TooLong { len: 3, max: 2 })
        );
    }

    #[test]
    fn test_extract_seventeen_bytes_rejected() {
        assert!(matches!(
            extract(b"TNS|0123456789abcdefg|TNE", 16),
            Err(NameMiss::TooLong { len: 17, .. })
        ));
    }

    #[test]
    fn test_extract_no_markers() {
        assert_eq!(extract(b"hello world", 16), Err(NameMiss::NoStartMarker));
        assert_eq!(extract(b"", 16), Err(NameMiss::NoStartMarker));
        assert_eq!(extract(b"abc|TNE", 16), Err(NameMiss::NoStartMarker));
    }

    #[test]
    fn test_extract_missing_end() {
        assert_eq!(extract(b"TNS|abc", 16), Err(NameMiss::NoEndMarker));
        assert_eq!(extract(b"TNS|abc|TN", 16), Err(NameMiss::NoEndMarker));
    }

    #[test]
    fn test_extract_empty_name_rejected() {
        assert_eq!(extract(b"TNS||TNE", 16), Err(NameMiss::EndBeforeStart));
    }

    #[test]
    fn test_extract_end_marker_before_start() {
        assert_eq!(
            extract(b"|TNE TNS|abc", 16),
            Err(NameMiss::EndBeforeStart)
        );
        // the first end marker wins even when a valid one follows the name
        assert_eq!(
            extract(b"|TNE TNS|abc|TNE", 16),
            Err(NameMiss::EndBeforeStart)
        );
    }

    #[test]
    fn test_extract_overlapping_markers() {
        // "TNS|TNE": the end marker starts inside the start marker
        assert_eq!(extract(b"TNS|TNE", 16), Err(NameMiss::EndBeforeStart));
    }

    #[test]
    fn test_extract_binary_passthrough() {
        let name = extract(b"\x00\xffTNS|\x01\xfe\x7f|TNE", 16).unwrap();
        assert_eq!(name.as_bytes(), &[0x01u8, 0xfe, 0x7f]);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let buf = b"xxTNS|Gimbal|TNExx".to_vec();
        let first = extract(&buf, 16);
        let second = extract(&buf, 16);
        assert_eq!(first, second);

        let bad = b"nothing here".to_vec();
        assert_eq!(extract(&bad, 16), extract(&bad, 16));
    }

    #[test]
    fn test_name_buffer_zero_fills_tail() {
        let mut buf = NameBuffer::new(16);
        assert_eq!(buf.raw().len(), 17);

        buf.fill_from(b"TNS|LongerName12|TNE").unwrap();
        assert_eq!(buf.name(), b"LongerName12");

        let name = buf.fill_from(b"TNS|abc|TNE").unwrap();
        assert_eq!(name, b"abc");
        assert_eq!(&buf.raw()[..3], b"abc");
        assert!(buf.raw()[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_name_buffer_untouched_on_miss() {
        let mut buf = NameBuffer::new(16);
        buf.fill_from(b"TNS|Gimbal|TNE").unwrap();
        let before = buf.raw().to_vec();

        assert_eq!(buf.fill_from(b"no markers"), Err(NameMiss::NoStartMarker));
        assert_eq!(
            buf.fill_from(b"TNS|ThisNameIsWayTooLong|TNE"),
            Err(NameMiss::TooLong { len: 20, max: 16 })
        );
        assert_eq!(buf.raw(), before.as_slice());
        assert_eq!(buf.name(), b"Gimbal");
    }

    #[test]
    fn test_name_miss_display() {
        assert_eq!(NameMiss::NoStartMarker.to_string(), "no TNS| marker");
        assert_eq!(
            NameMiss::TooLong { len: 20, max: 16 }.to_string(),
            "embedded name is 20 bytes, limit is 16"
        );
    }
}
