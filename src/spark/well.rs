//! Plate well labels

use core::fmt;
use core::str::FromStr;

/// A plate coordinate: row letter and 1-based column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Well {
    pub row: char,
    pub column: u16,
}

impl Well {
    /// Parse a well label such as `A1`, `A01`, `A:1` or `H 12`
    ///
    /// Whitespace and colons are ignored. The label must be one uppercase
    /// letter followed by one to three digits, with a column of at least 1.
    #[must_use]
    pub fn parse_label(label: &str) -> Option<Self> {
        let compact: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ':')
            .collect();

        let mut chars = compact.chars();
        let row = chars.next().filter(char::is_ascii_uppercase)?;
        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let column: u16 = digits.parse().ok()?;
        (column >= 1).then_some(Self { row, column })
    }
}

impl FromStr for Well {
    type Err = String;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s).ok_or_else(|| format!("Invalid well label: '{s}'"))
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}
