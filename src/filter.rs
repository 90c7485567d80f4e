use std::sync::LazyLock;

use regex_lite::Regex;

use crate::document::LogDocument;

/// A line qualifies when it contains a contiguous run of 5 to 15 repetitions
/// of either 3-character motif, anywhere in the line. Compiled once per
/// process.
static MOTIF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-c][e-g][0-3]|[A-Z][5-9][f-w]){5,15}").expect("motif pattern is valid")
});

/// Scans lines `start..=end` of `doc` and returns the lowercase-hex MD5
/// digest of every motif-matching line, in file order, duplicates kept.
pub fn digest_matches(doc: &LogDocument, start: usize, end: usize) -> Vec<String> {
    (start..=end)
        .filter_map(|index| doc.line(index))
        .filter(|line| MOTIF.is_match(line))
        .map(|line| format!("{:x}", md5::compute(line.as_bytes())))
        .collect()
}
