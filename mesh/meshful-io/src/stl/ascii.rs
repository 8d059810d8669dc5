//! ASCII STL reader and writer.
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Keywords are matched case-insensitively. The facet normal is kept as
//! stored, like in the binary format.

#[cfg(feature = "ascii")]
use std::io::BufRead;
use std::io::Write;

use meshful_types::{Mesh, Vec3};
#[cfg(feature = "ascii")]
use meshful_types::Triangle;

use crate::error::IoResult;
#[cfg(feature = "ascii")]
use crate::error::IoError;
#[cfg(feature = "ascii")]
use crate::params::StlReadParams;

/// Decode an ASCII STL document.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for unknown keywords, bad numbers,
/// facets without exactly three vertices, non-UTF-8 lines, or input that
/// does not start with `solid`. Reader failures surface as [`IoError::Io`].
///
/// # Example
///
/// ```
/// use meshful_io::decode_ascii;
///
/// let text = "solid t\n facet normal 0 0 1\n  outer loop\n   vertex 0 0 0\n   \
///             vertex 1 0 0\n   vertex 0 1 0\n  endloop\n endfacet\nendsolid t\n";
/// let mesh = decode_ascii(text.as_bytes()).unwrap();
/// assert_eq!(mesh.len(), 1);
/// ```
#[cfg(feature = "ascii")]
pub fn decode_ascii<R: BufRead>(reader: R) -> IoResult<Mesh> {
    decode_ascii_with(reader, &StlReadParams::default())
}

/// [`decode_ascii`] with explicit parameters.
///
/// # Errors
///
/// As [`decode_ascii`], plus [`IoError::MalformedRecord`] when
/// `params.reject_non_finite` is set and a facet holds NaN or infinity.
#[cfg(feature = "ascii")]
pub fn decode_ascii_with<R: BufRead>(
    reader: R,
    params: &StlReadParams,
) -> IoResult<Mesh> {
    let mut parser = Parser::default();
    let mut offset = 0u64;

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let number = index + 1;
        let line_start = offset;
        offset += line.len() as u64 + 1;

        let text = std::str::from_utf8(&line)
            .map_err(|_| IoError::invalid_content(number, "line is not valid UTF-8"))?;
        if parser.feed(text, number, line_start, params)? == Flow::Done {
            break;
        }
    }

    parser.finish()
}

/// Encode a mesh as ASCII STL.
///
/// `name` follows `solid`/`endsolid`, with line breaks replaced by spaces.
/// Components are written in the shortest form that reads back to the
/// same `f32`.
///
/// # Errors
///
/// Returns [`crate::IoError::Io`] if the writer fails.
pub fn encode_ascii<W: Write>(mesh: &Mesh, mut writer: W, name: &str) -> IoResult<()> {
    let name = name.replace(['\r', '\n'], " ");
    writeln!(writer, "solid {name}")?;

    for triangle in mesh {
        let n = triangle.normal;
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in triangle.vertices {
            write_vertex(&mut writer, v)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;
    writer.flush()?;

    tracing::debug!(triangles = mesh.len(), "Encoded ASCII STL");
    Ok(())
}

fn write_vertex<W: Write>(writer: &mut W, v: Vec3) -> IoResult<()> {
    writeln!(writer, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z)?;
    Ok(())
}

#[cfg(feature = "ascii")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Done,
}

#[cfg(feature = "ascii")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    /// Nothing read yet; expecting `solid`.
    #[default]
    Start,
    /// Between facets.
    Solid,
    /// After `facet normal`, before `outer loop`.
    Facet,
    /// Inside `outer loop`.
    Loop,
    /// After `endloop`, before `endfacet`.
    LoopClosed,
}

#[cfg(feature = "ascii")]
#[derive(Debug, Default)]
struct Parser {
    state: State,
    normal: Vec3,
    vertices: Vec<Vec3>,
    facet_offset: u64,
    triangles: Vec<Triangle>,
}

#[cfg(feature = "ascii")]
impl Parser {
    fn feed(
        &mut self,
        text: &str,
        line: usize,
        offset: u64,
        params: &StlReadParams,
    ) -> IoResult<Flow> {
        let mut tokens = text.split_whitespace();
        let Some(keyword) = tokens.next() else {
            return Ok(Flow::Continue);
        };
        let keyword = keyword.to_ascii_lowercase();

        match (self.state, keyword.as_str()) {
            (State::Start, "solid") => self.state = State::Solid,
            (State::Solid, "facet") => {
                match tokens.next() {
                    Some(word) if word.eq_ignore_ascii_case("normal") => {}
                    _ => return Err(IoError::invalid_content(line, "expected `facet normal`")),
                }
                self.normal = parse_vec3(&mut tokens, line)?;
                self.vertices.clear();
                self.facet_offset = offset;
                self.state = State::Facet;
            }
            (State::Facet, "outer") => {
                match tokens.next() {
                    Some(word) if word.eq_ignore_ascii_case("loop") => {}
                    _ => return Err(IoError::invalid_content(line, "expected `outer loop`")),
                }
                self.state = State::Loop;
            }
            (State::Loop, "vertex") => {
                if self.vertices.len() == 3 {
                    return Err(IoError::invalid_content(line, "facet has more than 3 vertices"));
                }
                self.vertices.push(parse_vec3(&mut tokens, line)?);
            }
            (State::Loop, "endloop") => self.state = State::LoopClosed,
            (State::LoopClosed, "endfacet") => {
                let [v0, v1, v2] = self.vertices[..] else {
                    return Err(IoError::invalid_content(
                        line,
                        format!("facet has {} vertices, expected 3", self.vertices.len()),
                    ));
                };
                let triangle = Triangle::new([v0, v1, v2], self.normal);
                if params.reject_non_finite {
                    self.check_finite(&triangle)?;
                }
                self.triangles.push(triangle);
                self.state = State::Solid;
            }
            (State::Solid, "endsolid") => return Ok(Flow::Done),
            (State::Start, _) => {
                return Err(IoError::invalid_content(line, "ASCII STL must start with `solid`"));
            }
            (state, other) => {
                return Err(IoError::invalid_content(
                    line,
                    format!("unexpected `{other}` in {state:?} state"),
                ));
            }
        }

        Ok(Flow::Continue)
    }

    fn finish(self) -> IoResult<Mesh> {
        match self.state {
            // A missing `endsolid` is accepted.
            State::Solid => {}
            State::Start => return Err(IoError::invalid_content(1, "empty ASCII STL")),
            _ => {
                return Err(IoError::UnexpectedEof {
                    offset: self.facet_offset,
                    triangle: u32::try_from(self.triangles.len()).ok(),
                });
            }
        }
        tracing::debug!(triangles = self.triangles.len(), "Decoded ASCII STL");
        Ok(Mesh::new(self.triangles))
    }

    fn check_finite(&self, triangle: &Triangle) -> IoResult<()> {
        let all_finite = std::iter::once(triangle.normal)
            .chain(triangle.vertices)
            .flat_map(Vec3::to_array)
            .all(f32::is_finite);
        if all_finite {
            return Ok(());
        }
        Err(IoError::MalformedRecord {
            triangle: u32::try_from(self.triangles.len()).unwrap_or(u32::MAX),
            offset: self.facet_offset,
            reason: "facet has a non-finite component".to_string(),
        })
    }
}

#[cfg(feature = "ascii")]
fn parse_vec3<'a>(tokens: &mut impl Iterator<Item = &'a str>, line: usize) -> IoResult<Vec3> {
    let mut component = || -> IoResult<f32> {
        let token = tokens
            .next()
            .ok_or_else(|| IoError::invalid_content(line, "expected 3 coordinates"))?;
        token
            .parse::<f32>()
            .map_err(|e| IoError::invalid_content(line, format!("bad number `{token}`: {e}")))
    };
    let x = component()?;
    let y = component()?;
    let z = component()?;
    Ok(Vec3::new(x, y, z))
}
