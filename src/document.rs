use crate::error::AppError;
use crate::timecode::Resolution;

/// In-memory view of one log file, split into lines.
///
/// Precondition: lines are ordered by monotonically non-decreasing timestamp.
/// The boundary search in [`crate::window`] relies on this and never checks
/// it; [`LogDocument::verify_sorted`] offers an O(n) check for tests and for
/// deployments that opt into it.
pub struct LogDocument {
    lines: Vec<String>,
}

impl LogDocument {
    /// Builds a document from raw file bytes: lossy UTF-8 decode, strip every
    /// carriage return, split on newlines, and drop the empty line a trailing
    /// newline produces.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).replace('\r', "");
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Decoded timestamp of line `index`. Out-of-range indices are a caller
    /// bug and reported as an empty malformed prefix.
    pub fn timestamp_at(&self, index: usize, resolution: Resolution) -> Result<u32, AppError> {
        let line = self
            .line(index)
            .ok_or_else(|| AppError::MalformedTimestamp(String::new()))?;
        resolution.line_timestamp(line)
    }

    /// Confirms the ordering precondition, reporting the first line whose
    /// timestamp decreases. Linear; keep off the per-request path unless
    /// explicitly enabled.
    pub fn verify_sorted(&self, resolution: Resolution) -> Result<(), AppError> {
        let mut previous = None;
        for (index, line) in self.lines.iter().enumerate() {
            let current = resolution.line_timestamp(line)?;
            if previous.is_some_and(|prev| current < prev) {
                return Err(AppError::OutOfOrder(index));
            }
            previous = Some(current);
        }
        Ok(())
    }
}

/// First complete line of a head chunk. The chunk may end mid-line; only the
/// portion before the first newline is trusted.
pub fn head_line(bytes: &[u8]) -> Result<String, AppError> {
    let text = String::from_utf8_lossy(bytes).replace('\r', "");
    let first = text.split('\n').next().unwrap_or("");
    if first.is_empty() {
        return Err(AppError::EmptyDocument);
    }
    Ok(first.to_string())
}

/// Last complete line of a tail chunk. The chunk may begin mid-line, but the
/// final line before the trailing newline is always whole, provided the chunk
/// size captured at least one full line.
pub fn tail_line(bytes: &[u8]) -> Result<String, AppError> {
    let text = String::from_utf8_lossy(bytes).replace('\r', "");
    text.split('\n')
        .filter(|line| !line.is_empty())
        .next_back()
        .map(str::to_string)
        .ok_or(AppError::EmptyDocument)
}
