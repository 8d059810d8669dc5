//! Read and write parameters for STL.
//!
//! # Example
//!
//! ```
//! use meshful_io::{StlReadParams, StlWriteParams};
//!
//! // Reject NaN/infinite coordinates while decoding
//! let read = StlReadParams::strict();
//! assert!(read.reject_non_finite);
//!
//! // Custom exporter signature and keep raw attribute values
//! let write = StlWriteParams::default()
//!     .with_header("my-tool 1.2")
//!     .with_preserve_attributes(true);
//! assert_eq!(write.header, "my-tool 1.2");
//! ```

/// Exporter signature written into the 80-byte binary STL header.
pub const DEFAULT_HEADER: &str = "Exported by meshful";

/// Parameters for decoding STL input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StlReadParams {
    /// Fail with `MalformedRecord` when a normal or vertex component is NaN
    /// or infinite. Off by default: values are passed through untouched.
    pub reject_non_finite: bool,
}

impl StlReadParams {
    /// Parameters that validate every record.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            reject_non_finite: true,
        }
    }

    /// Set non-finite rejection.
    #[must_use]
    pub const fn with_reject_non_finite(mut self, reject: bool) -> Self {
        self.reject_non_finite = reject;
        self
    }
}

/// Parameters for encoding STL output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlWriteParams {
    /// Header text. Binary output zero-pads or truncates it to 80 bytes;
    /// ASCII output uses it as the solid name.
    pub header: String,

    /// Write `TriangleAttribute::Raw` values into the attribute field.
    /// When off (the default) every record carries zero there.
    pub preserve_attributes: bool,
}

impl Default for StlWriteParams {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            preserve_attributes: false,
        }
    }
}

impl StlWriteParams {
    /// Set the header text.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set attribute preservation.
    #[must_use]
    pub fn with_preserve_attributes(mut self, preserve: bool) -> Self {
        self.preserve_attributes = preserve;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        assert!(!StlReadParams::default().reject_non_finite);

        let write = StlWriteParams::default();
        assert_eq!(write.header, DEFAULT_HEADER);
        assert!(!write.preserve_attributes);
    }

    #[test]
    fn test_builders() {
        let read = StlReadParams::default().with_reject_non_finite(true);
        assert_eq!(read, StlReadParams::strict());

        let write = StlWriteParams::default().with_preserve_attributes(true);
        assert!(write.preserve_attributes);
        assert_eq!(write.header, DEFAULT_HEADER);
    }
}
