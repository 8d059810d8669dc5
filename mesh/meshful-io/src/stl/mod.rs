//! STL (Stereolithography) file format support.
//!
//! # Format Detection
//!
//! [`decode`] reads the first 6 bytes of the stream. If they are exactly
//! `"solid "` the stream is treated as ASCII; anything else is binary and
//! the 6 bytes become the start of the 80-byte binary header.
//!
//! The check is a heuristic: a binary file whose header happens to begin
//! with `"solid "` is classified as ASCII. This matches how most STL
//! tooling behaves and is kept for compatibility.

mod ascii;
mod binary;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use meshful_types::Mesh;
use tracing::info;

use crate::error::{IoError, IoResult};
use crate::params::{StlReadParams, StlWriteParams};

#[cfg(feature = "ascii")]
pub use ascii::{decode_ascii, decode_ascii_with};
pub use ascii::encode_ascii;
pub use binary::{
    decode_binary, decode_binary_with, encode_binary, encode_binary_with, HEADER_SIZE,
    PREAMBLE_SIZE, RECORD_SIZE,
};

/// Leading bytes that mark an ASCII STL.
pub const ASCII_MARKER: &[u8; 6] = b"solid ";

/// Which STL variant a stream appears to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StlKind {
    /// Text STL starting with `"solid "`.
    Ascii,
    /// Binary STL with an 80-byte header.
    Binary,
}

/// Consume the first 6 bytes of `reader` and classify the stream.
///
/// Returns the consumed bytes so the caller can hand them to the decoder.
///
/// # Errors
///
/// - [`IoError::UnexpectedEof`] if fewer than 6 bytes are available
/// - [`IoError::Io`] if the reader fails
///
/// # Example
///
/// ```
/// use meshful_io::{sniff, StlKind};
///
/// let mut text: &[u8] = b"solid cube\n";
/// let (prefix, kind) = sniff(&mut text).unwrap();
/// assert_eq!(kind, StlKind::Ascii);
/// assert_eq!(&prefix, b"solid ");
/// ```
pub fn sniff<R: Read + ?Sized>(reader: &mut R) -> IoResult<([u8; 6], StlKind)> {
    let mut prefix = [0u8; 6];
    let got = binary::read_full(reader, &mut prefix)?;
    if got < prefix.len() {
        return Err(IoError::UnexpectedEof {
            offset: 0,
            triangle: None,
        });
    }

    let kind = if &prefix == ASCII_MARKER {
        StlKind::Ascii
    } else {
        StlKind::Binary
    };
    Ok((prefix, kind))
}

/// Decode an STL stream of either variant.
///
/// # Errors
///
/// Any error of [`sniff`], [`decode_binary`] or, for ASCII input,
/// [`IoError::NotImplemented`] when the `ascii` feature is disabled.
pub fn decode<R: Read>(reader: R) -> IoResult<Mesh> {
    decode_with(reader, &StlReadParams::default())
}

/// [`decode`] with explicit parameters.
///
/// # Errors
///
/// As [`decode`].
pub fn decode_with<R: Read>(mut reader: R, params: &StlReadParams) -> IoResult<Mesh> {
    let (prefix, kind) = sniff(&mut reader)?;
    match kind {
        StlKind::Binary => decode_binary_with(&prefix, reader, params),
        StlKind::Ascii => decode_ascii_prefixed(&prefix, reader, params),
    }
}

#[cfg(feature = "ascii")]
fn decode_ascii_prefixed<R: Read>(
    prefix: &[u8],
    reader: R,
    params: &StlReadParams,
) -> IoResult<Mesh> {
    decode_ascii_with(BufReader::new(prefix.chain(reader)), params)
}

#[cfg(not(feature = "ascii"))]
fn decode_ascii_prefixed<R: Read>(
    _prefix: &[u8],
    _reader: R,
    _params: &StlReadParams,
) -> IoResult<Mesh> {
    Err(IoError::NotImplemented {
        format: "ASCII STL",
    })
}

/// Encode a mesh as binary STL.
///
/// Shorthand for [`encode_binary`].
///
/// # Errors
///
/// As [`encode_binary`].
pub fn encode<W: Write>(mesh: &Mesh, writer: W) -> IoResult<()> {
    encode_binary(mesh, writer)
}

/// [`encode`] with explicit parameters.
///
/// # Errors
///
/// As [`encode_binary`].
pub fn encode_with<W: Write>(mesh: &Mesh, writer: W, params: &StlWriteParams) -> IoResult<()> {
    encode_binary_with(mesh, writer, params)
}

/// Load a mesh from an STL file.
///
/// Automatically detects ASCII vs binary format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or read
/// - The file content is not valid STL
///
/// # Example
///
/// ```no_run
/// use meshful_io::load_stl;
///
/// let mesh = load_stl("model.stl").unwrap();
/// println!("Loaded {} triangles", mesh.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    load_stl_with(path, &StlReadParams::default())
}

/// [`load_stl`] with explicit parameters.
///
/// # Errors
///
/// As [`load_stl`].
pub fn load_stl_with<P: AsRef<Path>>(path: P, params: &StlReadParams) -> IoResult<Mesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(e, path))?;
    let mesh = decode_with(BufReader::new(file), params)?;
    info!(path = %path.display(), triangles = mesh.len(), "Loaded STL");
    Ok(mesh)
}

/// Save a mesh to an STL file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary STL; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written, or if a binary mesh has
/// more triangles than fit in the count field.
///
/// # Example
///
/// ```no_run
/// use meshful_io::{load_stl, save_stl};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", true).unwrap(); // Binary
/// save_stl(&mesh, "output_ascii.stl", false).unwrap(); // ASCII
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, binary: bool) -> IoResult<()> {
    save_stl_with(mesh, path, binary, &StlWriteParams::default())
}

/// [`save_stl`] with explicit parameters.
///
/// # Errors
///
/// As [`save_stl`].
pub fn save_stl_with<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    binary: bool,
    params: &StlWriteParams,
) -> IoResult<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);

    if binary {
        encode_binary_with(mesh, writer, params)?;
    } else {
        encode_ascii(mesh, writer, &params.header)?;
    }

    info!(path = %path.display(), triangles = mesh.len(), binary, "Saved STL");
    Ok(())
}
