//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// Fewer than 84 bytes were available for the binary STL header.
    #[error("incomplete binary STL header: expected 84 bytes, got {got}")]
    IncompleteHeader {
        /// Number of header bytes available before end of input.
        got: usize,
    },

    /// End of input inside a fixed-length field.
    #[error("unexpected end of file at byte {offset}{}", in_triangle(.triangle))]
    UnexpectedEof {
        /// Byte offset where the truncated field starts.
        offset: u64,
        /// Index of the triangle record being read, if any.
        triangle: Option<u32>,
    },

    /// A record decoded but failed validation.
    #[error("malformed triangle {triangle} at byte {offset}: {reason}")]
    MalformedRecord {
        /// Index of the offending triangle record.
        triangle: u32,
        /// Byte offset where the record starts.
        offset: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// The mesh has more triangles than the binary STL count field can hold.
    #[error("too many triangles for binary STL: {count} exceeds u32::MAX")]
    TooManyTriangles {
        /// Number of triangles in the mesh.
        count: usize,
    },

    /// The input was recognised but no decoder for it is compiled in.
    #[error("{format} decoding is not implemented")]
    NotImplemented {
        /// Name of the detected format.
        format: &'static str,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid content in a text format.
    #[error("invalid content on line {line}: {message}")]
    InvalidContent {
        /// 1-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// Transport error from the underlying reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create an `InvalidContent` error for the given line.
    #[must_use]
    pub fn invalid_content(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidContent {
            line,
            message: message.into(),
        }
    }

    /// Map an open failure to `FileNotFound` when that is what happened.
    pub(crate) fn from_open(err: std::io::Error, path: &std::path::Path) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}

#[allow(clippy::ref_option)] // thiserror passes fields by reference
fn in_triangle(triangle: &Option<u32>) -> String {
    triangle.map_or_else(String::new, |i| format!(" while reading triangle {i}"))
}
