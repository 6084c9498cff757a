//! Layout configuration.
//!
//! This module handles:
//! - The named layout values (tag size, margin, stroke width, page size)
//! - Unit conversion for dimensions (mm, cm, in, pt)
//! - Dimension parsing for command-line values

use crate::error::TagError;
use std::fmt;
use std::str::FromStr;

/// Points per millimeter (1 inch = 72 points = 25.4 mm)
pub const MM_TO_POINTS: f64 = 72.0 / 25.4;

pub const DEFAULT_TAG_WIDTH_MM: f64 = 25.0;
pub const DEFAULT_TAG_HEIGHT_MM: f64 = 25.0;
pub const DEFAULT_MARGIN_MM: f64 = 5.0;
pub const DEFAULT_LINE_WIDTH_MM: f64 = 0.2;
pub const DEFAULT_PAGE_WIDTH_PT: f64 = 504.0;
pub const DEFAULT_PAGE_HEIGHT_PT: f64 = 568.0;

/// Dimension value that can be specified as:
/// - A number (interpreted as points)
/// - A string with unit: e.g., "100 mm", "10 cm", "1 in" (inches)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension(pub f64);

impl Dimension {
    pub fn from_mm(mm: f64) -> Self {
        Dimension(mm * MM_TO_POINTS)
    }

    /// Convert to points (internal PDF unit)
    pub fn as_points(&self) -> f64 {
        self.0
    }

    pub fn as_mm(&self) -> f64 {
        self.0 / MM_TO_POINTS
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mm", self.as_mm())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (num_str, unit) = value.split_at(
            value
                .find(|c: char| c.is_whitespace() || c.is_ascii_alphabetic())
                .unwrap_or(value.len()),
        );
        let num_str = num_str.trim();
        let unit = unit.trim().to_lowercase();

        let num: f64 = num_str
            .parse()
            .map_err(|_| format!("invalid number in dimension: {}", num_str))?;

        let points = match unit.as_str() {
            "" | "pt" | "point" | "points" => num,
            "mm" => num * MM_TO_POINTS,
            "cm" => num * 10.0 * MM_TO_POINTS,
            "in" | "inch" | "inches" => num * 72.0,
            _ => {
                return Err(format!(
                    "unknown unit '{}'. Supported: mm, cm, in, pt",
                    unit
                ));
            }
        };

        Ok(Dimension(points))
    }
}

/// Geometry of the tag sheet
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub tag_width: Dimension,
    pub tag_height: Dimension,
    pub margin: Dimension,
    pub line_width: Dimension,
    pub page_width: Dimension,
    pub page_height: Dimension,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            tag_width: Dimension::from_mm(DEFAULT_TAG_WIDTH_MM),
            tag_height: Dimension::from_mm(DEFAULT_TAG_HEIGHT_MM),
            margin: Dimension::from_mm(DEFAULT_MARGIN_MM),
            line_width: Dimension::from_mm(DEFAULT_LINE_WIDTH_MM),
            page_width: Dimension(DEFAULT_PAGE_WIDTH_PT),
            page_height: Dimension(DEFAULT_PAGE_HEIGHT_PT),
        }
    }
}

impl Layout {
    /// Reject values that cannot describe a page of tags
    pub fn validate(&self) -> Result<(), TagError> {
        let positive = [
            ("tag width", self.tag_width),
            ("tag height", self.tag_height),
            ("page width", self.page_width),
            ("page height", self.page_height),
        ];
        for (name, dim) in positive {
            if !(dim.as_points() > 0.0) {
                return Err(TagError::InvalidLayout(format!(
                    "{} must be positive, got {}",
                    name, dim
                )));
            }
        }
        if self.margin.as_points() < 0.0 || self.line_width.as_points() < 0.0 {
            return Err(TagError::InvalidLayout(
                "margin and line width must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
