// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RectoolError>;

#[derive(Debug, Error, PartialEq)]
pub enum RectoolError {
    #[error("invalid aspect ratio {numerator}:{denominator}")]
    InvalidAspect { numerator: f64, denominator: f64 },

    #[error("invalid fixed size {width}x{height}")]
    InvalidFixedSize { width: f64, height: f64 },

    #[error("invalid display scale ({x}, {y})")]
    InvalidScale { x: f64, y: f64 },

    #[error("image must have a positive size, got {width}x{height}")]
    EmptyImage { width: i32, height: i32 },
}
