//! Source location tracking for error reporting

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in the source buffer (line and column are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Location of the first character of a buffer
    pub fn start() -> Self {
        Self::new(1, 1)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(SourceLocation::new(3, 14).to_string(), "3:14");
        assert_eq!(SourceLocation::default(), SourceLocation::new(1, 1));
    }
}
