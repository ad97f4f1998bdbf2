use serde::Serialize;

/// Result of an input operation on the scroller
///
/// Bad input is never an error: it is reported as `Ignored` and leaves the
/// scroller untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "reason")]
pub enum Outcome {
    /// The operation took effect immediately
    Applied,
    /// A scroll-to-index animation was started
    Started,
    /// Nothing happened
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// Text did not parse as an integer
    Unparsable,
    /// Index outside `[1, len]`
    OutOfRange,
    /// A scroll-to-index animation is running
    Busy,
    /// Wheel delta too small to count as input
    BelowThreshold,
    /// Edit requested without a selected item
    NoSelection,
    /// The addressed slot has no backing item
    EmptySlot,
}

/// Parse user text as a 1-based index into a collection of `len` items
pub fn parse_index(raw: &str, len: usize) -> Result<usize, IgnoreReason> {
    let index: i64 = raw.trim().parse().map_err(|_| IgnoreReason::Unparsable)?;
    if index <= 0 || index as u64 > len as u64 {
        return Err(IgnoreReason::OutOfRange);
    }
    Ok(index as usize)
}
