//! Port specification parsing.
//!
//! A specification is a comma-separated list of decimal ports and inclusive
//! `start-end` ranges, e.g. `"8080,9000-9005"`. Parsing preserves input
//! order and does not deduplicate: overlapping segments yield repeated
//! ports, and the second reservation attempt on a port fails with a bind
//! error like any other occupied port.

use thiserror::Error;

/// Errors produced while parsing a port specification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A range segment did not split into exactly a start and an end.
    #[error("invalid port range: {0}")]
    InvalidRange(String),

    /// A port was not a decimal integer.
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// A range whose start is greater than its end.
    #[error("range start exceeds end: {0}")]
    RangeOrder(String),
}

/// Parse a port specification into the ordered list of ports it names.
///
/// Ports are kept as `u32`: values outside the valid TCP range pass through
/// here and surface as bind failures when reservation is attempted.
pub fn parse(spec: &str) -> Result<Vec<u32>, ParseError> {
    let mut list = Vec::new();

    for segment in spec.split(',') {
        if segment.contains('-') {
            let bounds: Vec<&str> = segment.split('-').collect();
            if bounds.len() != 2 {
                return Err(ParseError::InvalidRange(segment.to_string()));
            }
            let start: u32 = bounds[0]
                .parse()
                .map_err(|_| ParseError::InvalidPort(bounds[0].to_string()))?;
            let end: u32 = bounds[1]
                .parse()
                .map_err(|_| ParseError::InvalidPort(bounds[1].to_string()))?;
            if start > end {
                return Err(ParseError::RangeOrder(segment.to_string()));
            }
            list.extend(start..=end);
        } else {
            let port: u32 = segment
                .parse()
                .map_err(|_| ParseError::InvalidPort(segment.to_string()))?;
            list.push(port);
        }
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port() {
        assert_eq!(parse("8080").unwrap(), vec![8080]);
    }

    #[test]
    fn range_expands_inclusively() {
        assert_eq!(parse("8000-8002").unwrap(), vec![8000, 8001, 8002]);
    }

    #[test]
    fn mixed_segments_preserve_order() {
        assert_eq!(parse("80,90-92,100").unwrap(), vec![80, 90, 91, 92, 100]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(parse("8080,8080").unwrap(), vec![8080, 8080]);
        assert_eq!(parse("8000-8002,8001").unwrap(), vec![8000, 8001, 8002, 8001]);
    }

    #[test]
    fn out_of_range_values_pass_through() {
        assert_eq!(parse("70000").unwrap(), vec![70000]);
        assert_eq!(parse("0").unwrap(), vec![0]);
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            parse("9005-9000"),
            Err(ParseError::RangeOrder("9005-9000".to_string()))
        );
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        assert_eq!(parse("abc"), Err(ParseError::InvalidPort("abc".to_string())));
    }

    #[test]
    fn malformed_range_is_rejected() {
        assert_eq!(
            parse("1-2-3"),
            Err(ParseError::InvalidRange("1-2-3".to_string()))
        );
    }

    #[test]
    fn non_numeric_range_bound_is_rejected() {
        assert_eq!(parse("80-x"), Err(ParseError::InvalidPort("x".to_string())));
    }

    #[test]
    fn empty_segment_is_rejected() {
        assert_eq!(parse("80,,90"), Err(ParseError::InvalidPort(String::new())));
    }
}
