//! Lumber stock descriptors.
//!
//! Stock is written `WIDTHxTHICKNESS` in millimeters, for example `"90x19"`
//! for a 90 mm wide, 19 mm thick board. The separator may be `x`, `X` or `×`
//! and whitespace around either number is ignored.

use crate::error::{LumberError, LumberResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separators accepted between width and thickness.
const SEPARATORS: [char; 3] = ['x', 'X', '×'];

/// Face width and thickness of a board, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumberSpec {
    /// Face width (mm)
    pub width: f64,
    /// Thickness (mm)
    pub thickness: f64,
}

impl LumberSpec {
    /// Parse a stock descriptor such as `"90x19"`.
    pub fn parse(input: &str) -> LumberResult<Self> {
        let invalid = || LumberError::InvalidFormat {
            input: input.to_string(),
        };

        let mut parts = input.trim().split(&SEPARATORS[..]);
        let (Some(w), Some(t), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid());
        };

        let width: f64 = w.trim().parse().map_err(|_| invalid())?;
        let thickness: f64 = t.trim().parse().map_err(|_| invalid())?;

        if !(width.is_finite() && thickness.is_finite()) || width <= 0.0 || thickness <= 0.0 {
            return Err(LumberError::NonPositive {
                input: input.to_string(),
                width,
                thickness,
            });
        }

        Ok(Self { width, thickness })
    }

    /// Whether a panel of `face_width` has to be glued up from several boards.
    pub fn needs_glue_up(&self, face_width: f64) -> bool {
        face_width > self.width
    }

    /// Number of boards edge-glued to reach `face_width`.
    pub fn boards_for_width(&self, face_width: f64) -> u32 {
        (face_width / self.width).ceil().max(1.0) as u32
    }
}

impl FromStr for LumberSpec {
    type Err = LumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LumberSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.thickness)
    }
}

/// Format a millimeter value without a trailing `.0` for whole numbers.
pub fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let spec = LumberSpec::parse("90x19").unwrap();
        assert_eq!(spec.width, 90.0);
        assert_eq!(spec.thickness, 19.0);
    }

    #[test]
    fn test_parse_separators_and_whitespace() {
        assert_eq!(LumberSpec::parse(" 90 X 19 ").unwrap().thickness, 19.0);
        assert_eq!(LumberSpec::parse("42×19").unwrap().width, 42.0);
        assert_eq!(LumberSpec::parse("92.5x12.5").unwrap().width, 92.5);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["abc", "", "90", "90x", "x19", "90x19x5", "ninetyx19"] {
            let err = LumberSpec::parse(input).unwrap_err();
            assert!(
                matches!(err, LumberError::InvalidFormat { .. }),
                "{input} -> {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert!(matches!(
            LumberSpec::parse("0x19"),
            Err(LumberError::NonPositive { .. })
        ));
        assert!(matches!(
            LumberSpec::parse("90x-3"),
            Err(LumberError::NonPositive { .. })
        ));
        assert!(matches!(
            LumberSpec::parse("infx19"),
            Err(LumberError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_glue_up() {
        let spec = LumberSpec::parse("90x19").unwrap();
        assert!(!spec.needs_glue_up(90.0));
        assert!(spec.needs_glue_up(300.0));
        assert_eq!(spec.boards_for_width(300.0), 4);
        assert_eq!(spec.boards_for_width(10.0), 1);
    }

    #[test]
    fn test_format_mm() {
        assert_eq!(format_mm(19.0), "19");
        assert_eq!(format_mm(262.5), "262.5");
        assert_eq!(format_mm(-5.0), "-5");
    }
}
