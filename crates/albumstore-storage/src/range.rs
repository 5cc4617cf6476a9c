//! Single byte-range parsing for backends that serve bytes themselves.

/// Inclusive byte range within an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RangeError {
    /// Header is not a single `bytes=` range; callers serve the full object.
    Malformed,
    Unsatisfiable,
}

/// Parse `bytes=a-b`, `bytes=a-` or `bytes=-n` against an object of `size` bytes.
///
/// An end past the last byte is clamped. Multiple ranges count as malformed.
pub(crate) fn parse_range(value: &str, size: u64) -> Result<ByteRange, RangeError> {
    let range = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or(RangeError::Malformed)?;
    if range.contains(',') {
        return Err(RangeError::Malformed);
    }

    let (start_part, end_part) = range.split_once('-').ok_or(RangeError::Malformed)?;
    let (start_part, end_part) = (start_part.trim(), end_part.trim());

    if size == 0 {
        return Err(RangeError::Unsatisfiable);
    }
    let last = size - 1;

    let (start, end) = if start_part.is_empty() {
        let suffix: u64 = end_part.parse().map_err(|_| RangeError::Malformed)?;
        if suffix == 0 {
            return Err(RangeError::Unsatisfiable);
        }
        (size.saturating_sub(suffix), last)
    } else {
        let start: u64 = start_part.parse().map_err(|_| RangeError::Malformed)?;
        let end: u64 = if end_part.is_empty() {
            last
        } else {
            end_part.parse().map_err(|_| RangeError::Malformed)?
        };
        if end < start {
            return Err(RangeError::Malformed);
        }
        (start, end.min(last))
    };

    if start > last {
        return Err(RangeError::Unsatisfiable);
    }

    Ok(ByteRange { start, end })
}
