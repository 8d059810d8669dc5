//! Binary STL codec.
//!
//! ```text
//! UINT8[80]    – Header (free-form; ignored on read)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count
//! end
//! ```
//!
//! All fields are little-endian.

use std::io::{self, Read, Write};

use meshful_types::{Mesh, Triangle, TriangleAttribute, Vec3};
use tracing::{debug, warn};

use crate::error::{IoError, IoResult};
use crate::params::{StlReadParams, StlWriteParams};

/// STL binary header size in bytes.
pub const HEADER_SIZE: usize = 80;

/// Header plus the 4-byte triangle count.
pub const PREAMBLE_SIZE: usize = HEADER_SIZE + 4;

/// Size of one triangle record (normal + 3 vertices + attribute).
pub const RECORD_SIZE: usize = 50;

/// Upper bound on up-front allocation; larger declared counts grow as read.
const MAX_PREALLOCATED: usize = 1 << 16;

/// Decode a binary STL whose first bytes were already consumed.
///
/// `prefix` holds bytes taken from the front of the stream (for example by
/// format sniffing); `reader` continues from where they stop. The prefix
/// may be empty.
///
/// # Errors
///
/// - [`IoError::IncompleteHeader`] if prefix and reader together hold fewer
///   than 84 bytes
/// - [`IoError::UnexpectedEof`] if a triangle record is cut short
/// - [`IoError::Io`] if the reader fails
///
/// # Example
///
/// ```
/// use meshful_io::decode_binary;
///
/// let bytes = vec![0u8; 84]; // header with a zero triangle count
/// let mesh = decode_binary(&[], bytes.as_slice()).unwrap();
/// assert!(mesh.is_empty());
/// ```
pub fn decode_binary<R: Read>(prefix: &[u8], reader: R) -> IoResult<Mesh> {
    decode_binary_with(prefix, reader, &StlReadParams::default())
}

/// [`decode_binary`] with explicit parameters.
///
/// # Errors
///
/// As [`decode_binary`], plus [`IoError::MalformedRecord`] when
/// `params.reject_non_finite` is set and a record holds NaN or infinity.
pub fn decode_binary_with<R: Read>(
    prefix: &[u8],
    reader: R,
    params: &StlReadParams,
) -> IoResult<Mesh> {
    let mut source = prefix.chain(reader);

    let mut preamble = [0u8; PREAMBLE_SIZE];
    let got = read_full(&mut source, &mut preamble)?;
    if got < PREAMBLE_SIZE {
        return Err(IoError::IncompleteHeader { got });
    }

    let count = u32::from_le_bytes([
        preamble[HEADER_SIZE],
        preamble[HEADER_SIZE + 1],
        preamble[HEADER_SIZE + 2],
        preamble[HEADER_SIZE + 3],
    ]);
    debug!(triangles = count, "Decoding binary STL");

    let mut triangles = Vec::with_capacity((count as usize).min(MAX_PREALLOCATED));
    let mut record = [0u8; RECORD_SIZE];
    for index in 0..count {
        let offset = record_offset(index);
        let got = read_full(&mut source, &mut record)?;
        if got < RECORD_SIZE {
            warn!(
                declared = count,
                read = index,
                "Binary STL ends before its declared triangle count"
            );
            return Err(IoError::UnexpectedEof {
                offset,
                triangle: Some(index),
            });
        }

        let triangle = decode_record(&record);
        if params.reject_non_finite {
            check_finite(&triangle, index, offset)?;
        }
        triangles.push(triangle);
    }

    Ok(Mesh::new(triangles))
}

/// Encode a mesh as binary STL with default parameters.
///
/// Writes the exporter signature header, the triangle count, and one
/// 50-byte record per triangle in mesh order with a zero attribute field.
///
/// # Errors
///
/// - [`IoError::TooManyTriangles`] if the count does not fit in `u32`
/// - [`IoError::Io`] if the writer fails
pub fn encode_binary<W: Write>(mesh: &Mesh, writer: W) -> IoResult<()> {
    encode_binary_with(mesh, writer, &StlWriteParams::default())
}

/// [`encode_binary`] with explicit parameters.
///
/// # Errors
///
/// As [`encode_binary`].
pub fn encode_binary_with<W: Write>(
    mesh: &Mesh,
    mut writer: W,
    params: &StlWriteParams,
) -> IoResult<()> {
    let count = triangle_count(mesh.len())?;

    writer.write_all(&header_bytes(&params.header))?;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; RECORD_SIZE];
    for triangle in mesh {
        encode_record(triangle, params.preserve_attributes, &mut record);
        writer.write_all(&record)?;
    }
    writer.flush()?;

    debug!(triangles = count, "Encoded binary STL");
    Ok(())
}

/// Read until `buf` is full or the reader is exhausted.
///
/// Short reads are accumulated; `Interrupted` is retried. Returns the
/// number of bytes collected, which is less than `buf.len()` only at end
/// of input.
pub(crate) fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Byte offset of triangle record `index`.
#[inline]
fn record_offset(index: u32) -> u64 {
    PREAMBLE_SIZE as u64 + u64::from(index) * RECORD_SIZE as u64
}

fn triangle_count(len: usize) -> IoResult<u32> {
    u32::try_from(len).map_err(|_| IoError::TooManyTriangles { count: len })
}

/// Header text truncated or zero-padded to 80 bytes.
fn header_bytes(text: &str) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    let len = text.len().min(HEADER_SIZE);
    header[..len].copy_from_slice(&text.as_bytes()[..len]);
    header
}

fn decode_record(record: &[u8; RECORD_SIZE]) -> Triangle {
    let normal = read_vec3(record, 0);
    let vertices = [
        read_vec3(record, 12),
        read_vec3(record, 24),
        read_vec3(record, 36),
    ];
    let attribute = u16::from_le_bytes([record[48], record[49]]);

    let triangle = Triangle::new(vertices, normal);
    if attribute == 0 {
        triangle
    } else {
        triangle.with_attribute(TriangleAttribute::Raw(attribute))
    }
}

fn encode_record(triangle: &Triangle, preserve_attributes: bool, record: &mut [u8; RECORD_SIZE]) {
    write_vec3(record, 0, triangle.normal);
    write_vec3(record, 12, triangle.vertices[0]);
    write_vec3(record, 24, triangle.vertices[1]);
    write_vec3(record, 36, triangle.vertices[2]);

    let attribute = if preserve_attributes {
        triangle.raw_attribute().unwrap_or(0)
    } else {
        0
    };
    record[48..50].copy_from_slice(&attribute.to_le_bytes());
}

/// Read three little-endian f32s starting at `offset`.
fn read_vec3(buf: &[u8], offset: usize) -> Vec3 {
    Vec3::new(
        read_f32(buf, offset),
        read_f32(buf, offset + 4),
        read_f32(buf, offset + 8),
    )
}

fn read_f32(buf: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ])
}

fn write_vec3(buf: &mut [u8], offset: usize, v: Vec3) {
    for (i, component) in v.to_array().into_iter().enumerate() {
        let start = offset + i * 4;
        buf[start..start + 4].copy_from_slice(&component.to_le_bytes());
    }
}

fn check_finite(triangle: &Triangle, index: u32, offset: u64) -> IoResult<()> {
    let fields = std::iter::once(("normal", triangle.normal)).chain(
        ["vertex 0", "vertex 1", "vertex 2"]
            .into_iter()
            .zip(triangle.vertices),
    );
    for (name, v) in fields {
        if !v.to_array().iter().all(|c| c.is_finite()) {
            return Err(IoError::MalformedRecord {
                triangle: index,
                offset,
                reason: format!("{name} has a non-finite component"),
            });
        }
    }
    Ok(())
}
