use crate::error::AppError;

/// Granularity of the fixed-width `HH:MM[:SS]` prefix carried by every log
/// line. Coverage queries operate on minutes, match queries on seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Minutes,
    Seconds,
}

impl Resolution {
    /// Number of leading characters occupied by the timestamp fields.
    pub fn field_width(self) -> usize {
        match self {
            Resolution::Minutes => 5,
            Resolution::Seconds => 8,
        }
    }

    /// Decodes the fixed-offset timestamp prefix of `text` into units since
    /// midnight (minutes or seconds, depending on the resolution).
    ///
    /// Only the layout is validated: two decimal digits per field with `:`
    /// separators at offsets 2 and 5. Field values are not range-checked, so
    /// `27:80` decodes like any other pair of two-digit numbers. Content
    /// after the prefix is ignored.
    pub fn decode_prefix(self, text: &str) -> Option<u32> {
        let bytes = text.as_bytes();
        if bytes.len() < self.field_width() {
            return None;
        }

        let field = |at: usize| -> Option<u32> {
            let (hi, lo) = (bytes[at], bytes[at + 1]);
            if hi.is_ascii_digit() && lo.is_ascii_digit() {
                Some(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
            } else {
                None
            }
        };

        if bytes[2] != b':' {
            return None;
        }
        let hour = field(0)?;
        let minute = field(3)?;

        match self {
            Resolution::Minutes => Some(hour * 60 + minute),
            Resolution::Seconds => {
                if bytes[5] != b':' {
                    return None;
                }
                let second = field(6)?;
                Some(hour * 3600 + minute * 60 + second)
            }
        }
    }

    /// Decodes a log line's timestamp prefix, surfacing failures as
    /// [`AppError::MalformedTimestamp`].
    pub fn line_timestamp(self, line: &str) -> Result<u32, AppError> {
        self.decode_prefix(line).ok_or_else(|| {
            let prefix: String = line.chars().take(self.field_width()).collect();
            AppError::MalformedTimestamp(prefix)
        })
    }
}
