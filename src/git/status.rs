//! Porcelain status parsing.
//!
//! Parses the output of `git status --porcelain -uall`: one change per line,
//! a two-character `XY` status code, a space, then the path. Paths containing
//! whitespace or special bytes are wrapped in double quotes with C-style
//! escapes. Rename and copy entries use `old -> new`.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::StatusParseError;

static STATUS_LINE: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"^([ MADRCUT?!])([ MADRCUT?!]) (.+)$")
        .expect("status line pattern is valid")
});

const RENAME_SEPARATOR: &str = " -> ";

/// The two status columns of a porcelain line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCode {
    /// Index (staged) column.
    pub index: char,
    /// Worktree column.
    pub worktree: char,
}

impl StatusCode {
    pub fn is_untracked(&self) -> bool {
        self.index == '?' && self.worktree == '?'
    }

    pub fn is_rename_or_copy(&self) -> bool {
        matches!(self.index, 'R' | 'C') || matches!(self.worktree, 'R' | 'C')
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.index, self.worktree)
    }
}

/// A single file reported as added, modified, deleted or untracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    /// Unquoted path, relative to the repository root.
    pub path: String,
    pub status: StatusCode,
    /// Source path of a rename or copy.
    pub original_path: Option<String>,
}

impl ChangeEntry {
    /// Final path component, original case.
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Lowercase extension of the basename, without the dot.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(self.basename())
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }
}

/// Result of parsing a whole status report.
#[derive(Debug, Default)]
pub struct StatusReport {
    pub entries: Vec<ChangeEntry>,
    pub anomalies: Vec<StatusParseError>,
}

/// Parse every line of a status report, keeping the reported order.
///
/// Blank lines are ignored. Lines that do not parse are collected as
/// anomalies instead of failing the whole report.
pub fn parse_status_output(output: &str) -> StatusReport {
    let mut report = StatusReport::default();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_status_line(line) {
            Ok(entry) => report.entries.push(entry),
            Err(e) => report.anomalies.push(e),
        }
    }

    report
}

/// Parse a single porcelain line into a [`ChangeEntry`].
pub fn parse_status_line(line: &str) -> Result<ChangeEntry, StatusParseError> {
    let caps = STATUS_LINE
        .captures(line)
        .ok_or_else(|| StatusParseError::Malformed(line.to_string()))?;

    let status = StatusCode {
        index: first_char(caps.get(1).map_or("", |m| m.as_str())),
        worktree: first_char(caps.get(2).map_or("", |m| m.as_str())),
    };
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let (original_path, path) = if status.is_rename_or_copy() {
        let (from, to) = split_rename(rest, line)?;
        (Some(unquote(from)), unquote(to))
    } else {
        (None, unquote(rest))
    };

    if path.is_empty() {
        return Err(StatusParseError::EmptyPath(line.to_string()));
    }

    Ok(ChangeEntry {
        path,
        status,
        original_path,
    })
}

fn first_char(s: &str) -> char {
    s.chars().next().unwrap_or(' ')
}

/// Split `old -> new`, where either side may be quoted.
fn split_rename<'a>(rest: &'a str, line: &str) -> Result<(&'a str, &'a str), StatusParseError> {
    let from_end = if rest.starts_with('"') {
        closing_quote(rest)
            .map(|idx| idx + 1)
            .ok_or_else(|| StatusParseError::UnterminatedQuote(line.to_string()))?
    } else {
        rest.find(RENAME_SEPARATOR)
            .ok_or_else(|| StatusParseError::Malformed(line.to_string()))?
    };

    let (from, tail) = rest.split_at(from_end);
    let to = tail
        .strip_prefix(RENAME_SEPARATOR)
        .ok_or_else(|| StatusParseError::Malformed(line.to_string()))?;

    Ok((from, to))
}

/// Byte index of the quote closing a string that starts with `"`.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (idx, ch) in s.char_indices().skip(1) {
        match ch {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Remove git's C-style quoting from a path.
///
/// Unquoted input is returned unchanged. Octal escapes are raw bytes, so the
/// decoded buffer is read back as UTF-8.
pub fn unquote(raw: &str) -> String {
    let inner = match raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return raw.to_string(),
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 >= bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let next = bytes[i + 1];
        let simple = match next {
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0c),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0b),
            _ => None,
        };

        if let Some(byte) = simple {
            out.push(byte);
            i += 2;
        } else if let Some(byte) = octal_byte(&bytes[i + 1..]) {
            out.push(byte);
            i += 4;
        } else {
            // Unknown escape: keep it verbatim.
            out.push(b'\\');
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    let digits = digits.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
    u8::try_from(value).ok()
}
