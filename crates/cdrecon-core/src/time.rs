use thiserror::Error;

const SEGMENT_WEIGHTS: [i64; 3] = [3600, 60, 1];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    #[error("time `{value}` has {found} segments, expected HH:MM:SS")]
    SegmentCount { value: String, found: usize },
    #[error("time `{value}` has non-numeric segment `{segment}`")]
    NonNumeric { value: String, segment: String },
    #[error("time `{value}` is out of range")]
    OutOfRange { value: String },
}

/// First row of a batch that failed to parse; the whole batch was zeroed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFallback {
    pub row: usize,
    pub error: TimeParseError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    pub values: Vec<Option<i64>>,
    pub fallback: Option<TimeFallback>,
}

/// Parses `HH:MM:SS` into seconds since midnight. Components are not range
/// checked, so `25:00:00` yields 90000.
pub fn parse_time_of_day(value: &str) -> Result<i64, TimeParseError> {
    let trimmed = value.trim();
    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.len() != SEGMENT_WEIGHTS.len() {
        return Err(TimeParseError::SegmentCount {
            value: trimmed.to_string(),
            found: segments.len(),
        });
    }

    let mut total: i64 = 0;
    for (segment, weight) in segments.iter().zip(SEGMENT_WEIGHTS) {
        let segment = segment.trim();
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeParseError::NonNumeric {
                value: trimmed.to_string(),
                segment: segment.to_string(),
            });
        }
        let out_of_range = || TimeParseError::OutOfRange {
            value: trimmed.to_string(),
        };
        let parsed: i64 = segment.parse().map_err(|_| out_of_range())?;
        total = parsed
            .checked_mul(weight)
            .and_then(|seconds| total.checked_add(seconds))
            .ok_or_else(out_of_range)?;
    }
    Ok(total)
}

/// Parses a whole time column in one of two modes. Strict: every non-blank
/// value parses and blanks stay absent. Fallback: any value fails, every row
/// becomes 0 and the first failure is reported.
pub fn parse_time_column<'a, I>(values: I) -> TimeColumn
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values.into_iter().collect();
    match parse_strict(&values) {
        Ok(parsed) => TimeColumn {
            values: parsed,
            fallback: None,
        },
        Err(fallback) => TimeColumn {
            values: vec![Some(0); values.len()],
            fallback: Some(fallback),
        },
    }
}

fn parse_strict(values: &[&str]) -> Result<Vec<Option<i64>>, TimeFallback> {
    values
        .iter()
        .enumerate()
        .map(|(row, value)| {
            if value.trim().is_empty() {
                return Ok(None);
            }
            parse_time_of_day(value)
                .map(Some)
                .map_err(|error| TimeFallback { row, error })
        })
        .collect()
}
