// Percentages of the parent's extent
//
// Geometry is stored as whole percentages. The text form ("50%") is what
// config files and debug output use, and parsing it back yields the exact
// same number.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A whole percentage of the parent's width or height
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Percent(u16);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    pub const fn new(value: u16) -> Self {
        Percent(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Apply to a cell count, rounding down and clamping to `extent`
    pub fn of(self, extent: u16) -> u16 {
        let cells = u32::from(extent) * u32::from(self.0) / 100;
        cells.min(u32::from(extent)) as u16
    }
}

impl From<u16> for Percent {
    fn from(value: u16) -> Self {
        Percent(value)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid percentage {input:?}")]
pub struct PercentParseError {
    input: String,
}

impl FromStr for Percent {
    type Err = PercentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        digits
            .parse::<u16>()
            .map(Percent)
            .map_err(|_| PercentParseError {
                input: s.to_string(),
            })
    }
}
