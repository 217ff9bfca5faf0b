//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range and non-byte
//! units are ignored and the full body is served.

/// A byte range resolved against a known file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position (inclusive).
    pub start: usize,
    /// Last byte position (inclusive), `None` for open-ended ranges.
    pub end: Option<usize>,
}

impl ByteRange {
    /// Resolve the inclusive end position against the file size.
    #[inline]
    #[must_use]
    pub fn end_position(&self, file_size: usize) -> usize {
        self.end.unwrap_or_else(|| file_size.saturating_sub(1))
    }
}

/// Outcome of parsing a `Range` header.
#[derive(Debug)]
pub enum RangeOutcome {
    /// Serve the partial body with 206.
    Satisfiable(ByteRange),
    /// Range starts past the end of the file, answer 416.
    Unsatisfiable,
    /// No header, malformed header, or unsupported form: serve the full body.
    Ignored,
}

/// Parse a `Range` header value against a file of `file_size` bytes.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Ignored;
    };

    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Ignored;
    };

    // Single range only.
    if spec.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Ignored;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        // Suffix form: "-500" means the last 500 bytes.
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        if suffix == 0 || file_size == 0 {
            return RangeOutcome::Unsatisfiable;
        }
        return RangeOutcome::Satisfiable(ByteRange {
            start: file_size.saturating_sub(suffix),
            end: Some(file_size - 1),
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        Some(end.min(file_size - 1))
    };

    RangeOutcome::Satisfiable(ByteRange { start, end })
}
