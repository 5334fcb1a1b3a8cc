use std::fmt;
use std::str::FromStr;

use crate::filter::SizeFilter;

/// Numeric size threshold parsed from user input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeThreshold(pub f32);

impl SizeThreshold {
    pub fn value(self) -> f32 {
        self.0
    }

    pub fn into_filter(self) -> SizeFilter {
        SizeFilter::new(self.0)
    }
}

/// Raised when a threshold string is not a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThresholdError {
    pub input: String,
}

impl fmt::Display for ParseThresholdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid size threshold '{}': expected a number", self.input)
    }
}

impl std::error::Error for ParseThresholdError {}

impl FromStr for SizeThreshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f32>()
            .map(SizeThreshold)
            .map_err(|_| ParseThresholdError { input: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numbers() {
        assert_eq!("30".parse::<SizeThreshold>().unwrap().value(), 30.0);
        assert_eq!(" 12.5 ".parse::<SizeThreshold>().unwrap().value(), 12.5);
        assert_eq!("-4".parse::<SizeThreshold>().unwrap().value(), -4.0);
    }

    #[test]
    fn test_rejects_non_numeric() {
        let err = "thirty".parse::<SizeThreshold>().unwrap_err();
        assert_eq!(err.input, "thirty");
        assert!(err.to_string().contains("thirty"));
        assert!("".parse::<SizeThreshold>().is_err());
    }

    #[test]
    fn test_into_filter() {
        let filter = SizeThreshold(30.0).into_filter();
        assert_eq!(filter.min_size, 30.0);
    }
}
