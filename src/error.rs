//! Error types for minivit operations.
//!
//! Every fallible operation in the crate reports one of the variants below.
//! Errors are raised at the point of violation and never retried internally.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for minivit operations.
///
/// # Examples
///
/// ```
/// use minivit::error::MinivitError;
///
/// let err = MinivitError::shape("matmul", (2, 3), (2, 3));
/// assert!(err.to_string().contains("shape mismatch"));
/// ```
#[derive(Debug, Error)]
pub enum MinivitError {
    /// Operand shapes are incompatible for the requested operation.
    #[error("shape mismatch in {op}: expected {expected}, got {actual}")]
    Shape {
        /// Operation that rejected the operands
        op: &'static str,
        /// Expected shape description
        expected: String,
        /// Actual shape description
        actual: String,
    },

    /// Element access outside the matrix bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    Index {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
    },

    /// Bad axis or parameter value.
    #[error("invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: &'static str,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: &'static str,
    },

    /// Division by zero or a similarly undefined arithmetic result.
    #[error("arithmetic error: {message}")]
    Arithmetic {
        /// Error description
        message: String,
    },

    /// Determinant/inverse requested beyond the closed-form bound.
    #[error("{op} is only supported up to {max}x{max}, got {size}x{size}")]
    UnsupportedSize {
        /// Operation name
        op: &'static str,
        /// Size of the square input
        size: usize,
        /// Largest supported size
        max: usize,
    },

    /// Matrix is singular (non-invertible).
    #[error("singular matrix detected: determinant = {det}, cannot invert")]
    SingularMatrix {
        /// Determinant value (close to zero)
        det: f64,
    },

    /// Layer input disagrees with the stored parameter shape.
    #[error("{layer} dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Layer name
        layer: &'static str,
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Layer used before `initialize` or `load_weights`.
    #[error("{layer} used before initialization")]
    NotInitialized {
        /// Layer name
        layer: &'static str,
    },

    /// Table file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Missing path
        path: PathBuf,
    },

    /// Malformed table content.
    #[error("parse error in {} at line {line}: {message}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// 1-based line number
        line: u64,
        /// Error description
        message: String,
    },

    /// Table contained no data rows.
    #[error("no data found in file: {}", path.display())]
    EmptyData {
        /// File that was empty
        path: PathBuf,
    },

    /// Weight loading failed for a layer.
    #[error("failed to load {layer} weights: {source}")]
    WeightLoad {
        /// Layer name
        layer: &'static str,
        /// Underlying cause
        #[source]
        source: Box<MinivitError>,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    Config {
        /// Error description
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MinivitError {
    /// Create a shape error from two `(rows, cols)` pairs.
    #[must_use]
    pub fn shape(op: &'static str, expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::Shape {
            op,
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(
        param: &'static str,
        value: impl ToString,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            param,
            value: value.to_string(),
            constraint,
        }
    }

    /// Create an arithmetic error.
    #[must_use]
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::Arithmetic {
            message: message.into(),
        }
    }

    /// Wrap an error as a weight-loading failure for `layer`.
    #[must_use]
    pub fn weight_load(layer: &'static str, source: MinivitError) -> Self {
        Self::WeightLoad {
            layer,
            source: Box::new(source),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, MinivitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_shape_display() {
        let err = MinivitError::shape("add", (2, 3), (3, 2));
        let msg = err.to_string();
        assert!(msg.contains("shape mismatch in add"));
        assert!(msg.contains("2x3"));
        assert!(msg.contains("3x2"));
    }

    #[test]
    fn test_index_display() {
        let err = MinivitError::Index {
            row: 5,
            col: 0,
            rows: 2,
            cols: 2,
        };
        assert_eq!(err.to_string(), "index (5, 0) out of bounds for 2x2 matrix");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = MinivitError::invalid_argument("axis", 2, "0 or 1");
        let msg = err.to_string();
        assert!(msg.contains("axis = 2"));
        assert!(msg.contains("0 or 1"));
    }

    #[test]
    fn test_unsupported_size_display() {
        let err = MinivitError::UnsupportedSize {
            op: "determinant",
            size: 4,
            max: 3,
        };
        assert_eq!(
            err.to_string(),
            "determinant is only supported up to 3x3, got 4x4"
        );
    }

    #[test]
    fn test_singular_matrix_display() {
        let err = MinivitError::SingularMatrix { det: 0.0 };
        assert!(err.to_string().contains("singular matrix"));
    }

    #[test]
    fn test_parse_display() {
        let err = MinivitError::Parse {
            path: PathBuf::from("w.csv"),
            line: 3,
            message: "invalid number 'abc'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("w.csv"));
        assert!(msg.contains("line 3"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_weight_load_exposes_source() {
        let inner = MinivitError::FileNotFound {
            path: PathBuf::from("missing.csv"),
        };
        let err = MinivitError::weight_load("LayerNorm", inner);
        let msg = err.to_string();
        assert!(msg.contains("LayerNorm"));
        assert!(msg.contains("missing.csv"));

        let source = err.source().expect("weight load errors carry a cause");
        assert!(source.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: MinivitError = io_err.into();
        assert!(matches!(err, MinivitError::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_arithmetic_has_no_source() {
        let err = MinivitError::arithmetic("division by zero");
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "arithmetic error: division by zero");
    }
}
