// src/filter.rs

//! Line extraction over command output.

use regex::Regex;
use tracing::{error, warn};

/// Scanner buffer size in bytes. A line of this length or more, counting any
/// trailing `\r`, ends the scan.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Lines of `data` that contain `pattern` literally, in order.
///
/// An empty pattern would match everything, so it is refused and yields no
/// lines.
pub fn grep_lines(data: &str, pattern: &str) -> Vec<String> {
    if pattern.is_empty() {
        error!("unable to look for empty pattern");
        return Vec::new();
    }

    scan_lines(data, pattern)
        .filter(|line| line.contains(pattern))
        .map(str::to_string)
        .collect()
}

/// For every line matching `pattern`, the capture groups of its first match.
///
/// Group 0 (the whole match) comes first; groups that did not participate
/// are returned as empty strings. An invalid pattern yields no lines.
pub fn regexp_lines(data: &str, pattern: &str) -> Vec<Vec<String>> {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            error!(pattern = %pattern, error = %e, "unable to compile regexp");
            return Vec::new();
        }
    };

    scan_lines(data, pattern)
        .filter_map(|line| re.captures(line))
        .map(|caps| {
            caps.iter()
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Split into lines (`\n`, optional `\r`), stopping at the first overlong one.
fn scan_lines<'a>(data: &'a str, pattern: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    data.split_terminator('\n').map_while(move |raw| {
        if raw.len() >= MAX_LINE_LEN {
            warn!(
                pattern = %pattern,
                line_len = raw.len(),
                "line too long while scanning; stopping early"
            );
            None
        } else {
            Some(raw.strip_suffix('\r').unwrap_or(raw))
        }
    })
}
