//! Wavefront OBJ reader and writer, with MTL diffuse colors.
//!
//! Only the subset needed for triangle soups is handled: `v` positions,
//! triangular `f` faces, `mtllib`/`usemtl` and `newmtl`/`Kd` in the
//! material library. Texture coordinates, vertex normals and groups are
//! skipped on read.
//!
//! On write, vertices are de-duplicated by exact bit pattern and faces are
//! grouped by color. Faces without a color land in a grey material, so
//! reading the pair back gives those faces `Color(0.3, 0.3, 0.3)`.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use hashbrown::HashMap;
use meshful_types::{Color, Mesh, Triangle, TriangleAttribute, Vec3};
use tracing::{debug, info, warn};

use crate::error::{IoError, IoResult};

/// Diffuse color given to faces that carry none.
pub const UNTINTED: Color = Color::new(0.3, 0.3, 0.3);

/// Material library: material name to diffuse color.
pub type Materials = HashMap<String, Color>;

/// Read OBJ geometry, ignoring materials.
///
/// Each face's normal is computed from its winding; degenerate faces get
/// a zero normal.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for malformed `v`/`f` lines,
/// non-triangular faces, or vertex indices that are zero or out of range.
///
/// # Example
///
/// ```
/// use meshful_io::read_obj;
///
/// let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
/// let mesh = read_obj(text.as_bytes()).unwrap();
/// assert_eq!(mesh.len(), 1);
/// ```
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<Mesh> {
    read_obj_with_materials(reader, &Materials::new())
}

/// Read OBJ geometry, coloring faces from `materials` via `usemtl`.
///
/// Faces under an unknown material are left uncolored.
///
/// # Errors
///
/// As [`read_obj`].
pub fn read_obj_with_materials<R: BufRead>(reader: R, materials: &Materials) -> IoResult<Mesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut triangles = Vec::new();
    let mut current: Option<Color> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("v") => positions.push(parse_position(tokens, number)?),
            Some("f") => {
                let vertices = parse_face(tokens, &positions, number)?;
                let mut triangle = Triangle::new(vertices, Vec3::zero());
                triangle.normal = triangle.computed_normal().unwrap_or_default();
                if let Some(color) = current {
                    triangle = triangle.with_attribute(TriangleAttribute::Color(color));
                }
                triangles.push(triangle);
            }
            Some("usemtl") => {
                current = tokens.next().and_then(|name| materials.get(name).copied());
            }
            _ => {}
        }
    }

    debug!(
        vertices = positions.len(),
        triangles = triangles.len(),
        "Decoded OBJ"
    );
    Ok(Mesh::new(triangles))
}

/// Read an MTL material library. Only `newmtl` and `Kd` are used.
///
/// # Errors
///
/// Returns [`IoError::InvalidContent`] for a `Kd` line that is malformed
/// or appears before any `newmtl`.
pub fn read_mtl<R: BufRead>(reader: R) -> IoResult<Materials> {
    let mut materials = Materials::new();
    let mut current: Option<String> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let mut tokens = line.split_whitespace();

        match tokens.next() {
            Some("newmtl") => {
                let name = tokens
                    .next()
                    .ok_or_else(|| IoError::invalid_content(number, "`newmtl` needs a name"))?;
                current = Some(name.to_string());
            }
            Some("Kd") => {
                let name = current
                    .clone()
                    .ok_or_else(|| IoError::invalid_content(number, "`Kd` before `newmtl`"))?;
                let [red, green, blue] = parse_floats(&mut tokens, number)?;
                materials.insert(name, Color::new(red, green, blue));
            }
            _ => {}
        }
    }

    Ok(materials)
}

/// Write a mesh as OBJ plus its MTL library.
///
/// `mtl_name`, when given, is written as the `mtllib` reference.
///
/// # Errors
///
/// Returns [`IoError::Io`] if either writer fails.
pub fn write_obj<W: Write, M: Write>(
    mesh: &Mesh,
    mut obj: W,
    mut mtl: M,
    mtl_name: Option<&str>,
) -> IoResult<()> {
    let layout = Layout::build(mesh);

    writeln!(obj, "# meshful OBJ export")?;
    writeln!(obj)?;
    if let Some(name) = mtl_name {
        writeln!(obj, "mtllib {name}")?;
    }
    for v in &layout.vertices {
        writeln!(obj, "v {} {} {}", v.x, v.y, v.z)?;
    }

    writeln!(mtl, "# meshful MTL export")?;
    writeln!(mtl)?;

    for (number, group) in layout.groups.iter().enumerate() {
        let material = format!("mtl{}", number + 1);
        let color = group.color.unwrap_or(UNTINTED);

        writeln!(mtl, "newmtl {material}")?;
        writeln!(mtl, "Kd {} {} {}", color.red, color.green, color.blue)?;
        writeln!(mtl)?;

        writeln!(obj, "usemtl {material}")?;
        for [a, b, c] in &group.faces {
            writeln!(obj, "f {a} {b} {c}")?;
        }
    }

    obj.flush()?;
    mtl.flush()?;

    debug!(
        vertices = layout.vertices.len(),
        materials = layout.groups.len(),
        triangles = mesh.len(),
        "Encoded OBJ"
    );
    Ok(())
}

/// Load a mesh from an OBJ file.
///
/// If the file names an `mtllib` that exists next to it, face colors are
/// taken from it; a missing library is logged and ignored.
///
/// # Errors
///
/// Returns an error if the OBJ file cannot be read or is malformed, or if
/// the material library exists but is malformed.
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::from_open(e, path))?;

    let materials = match mtllib(&text) {
        Some(name) => {
            let mtl_path = path.with_file_name(name);
            match std::fs::read(&mtl_path) {
                Ok(bytes) => read_mtl(bytes.as_slice())?,
                Err(e) => {
                    warn!(path = %mtl_path.display(), error = %e, "Material library not loaded");
                    Materials::new()
                }
            }
        }
        None => Materials::new(),
    };

    let mesh = read_obj_with_materials(text.as_bytes(), &materials)?;
    info!(path = %path.display(), triangles = mesh.len(), "Loaded OBJ");
    Ok(mesh)
}

/// Save a mesh as OBJ, writing the material library to `<stem>.mtl`
/// beside it.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let obj = BufWriter::new(File::create(path)?);
    let mtl = BufWriter::new(File::create(&mtl_path)?);
    write_obj(mesh, obj, mtl, mtl_name.as_deref())?;

    info!(path = %path.display(), triangles = mesh.len(), "Saved OBJ");
    Ok(())
}

/// Vertex table and color groups for one mesh, in first-appearance order.
struct Layout {
    vertices: Vec<Vec3>,
    groups: Vec<Group>,
}

struct Group {
    color: Option<Color>,
    /// 1-based vertex numbers.
    faces: Vec<[usize; 3]>,
}

impl Layout {
    fn build(mesh: &Mesh) -> Self {
        let mut vertices = Vec::new();
        let mut vertex_numbers: HashMap<[u32; 3], usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        let mut group_index: HashMap<Option<[u32; 3]>, usize> = HashMap::new();

        for triangle in mesh {
            let color = triangle.color();
            let slot = *group_index
                .entry(color.map(color_bits))
                .or_insert_with(|| {
                    groups.push(Group {
                        color,
                        faces: Vec::new(),
                    });
                    groups.len() - 1
                });

            let face = triangle.vertices.map(|v| {
                *vertex_numbers.entry(vec3_bits(v)).or_insert_with(|| {
                    vertices.push(v);
                    vertices.len()
                })
            });
            groups[slot].faces.push(face);
        }

        Self { vertices, groups }
    }
}

fn vec3_bits(v: Vec3) -> [u32; 3] {
    v.to_array().map(f32::to_bits)
}

fn color_bits(c: Color) -> [u32; 3] {
    [c.red, c.green, c.blue].map(f32::to_bits)
}

/// First `mtllib` name in an OBJ document.
fn mtllib(text: &str) -> Option<&str> {
    text.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        (tokens.next() == Some("mtllib"))
            .then(|| tokens.next())
            .flatten()
    })
}

fn parse_floats<'a>(tokens: &mut impl Iterator<Item = &'a str>, line: usize) -> IoResult<[f32; 3]> {
    let mut out = [0.0; 3];
    for slot in &mut out {
        let token = tokens
            .next()
            .ok_or_else(|| IoError::invalid_content(line, "expected 3 numbers"))?;
        *slot = token
            .parse()
            .map_err(|e| IoError::invalid_content(line, format!("bad number `{token}`: {e}")))?;
    }
    Ok(out)
}

fn parse_position<'a>(mut tokens: impl Iterator<Item = &'a str>, line: usize) -> IoResult<Vec3> {
    let [x, y, z] = parse_floats(&mut tokens, line)?;
    // Optional w is accepted and dropped.
    let _ = tokens.next();
    if tokens.next().is_some() {
        return Err(IoError::invalid_content(line, "too many values on `v` line"));
    }
    Ok(Vec3::new(x, y, z))
}

fn parse_face<'a>(
    tokens: impl Iterator<Item = &'a str>,
    positions: &[Vec3],
    line: usize,
) -> IoResult<[Vec3; 3]> {
    let refs: Vec<&str> = tokens.collect();
    let [a, b, c] = refs[..] else {
        return Err(IoError::invalid_content(
            line,
            format!("face has {} vertices, expected 3", refs.len()),
        ));
    };
    Ok([
        resolve(a, positions, line)?,
        resolve(b, positions, line)?,
        resolve(c, positions, line)?,
    ])
}

/// Resolve a face vertex reference (`7`, `7/1`, `7//2`, `-1`).
fn resolve(token: &str, positions: &[Vec3], line: usize) -> IoResult<Vec3> {
    let head = token.split('/').next().unwrap_or(token);
    let number: i64 = head
        .parse()
        .map_err(|e| IoError::invalid_content(line, format!("bad vertex index `{head}`: {e}")))?;

    let count = i64::try_from(positions.len()).unwrap_or(i64::MAX);
    let index = match number {
        n if n > 0 => n - 1,
        n if n < 0 => count + n,
        _ => return Err(IoError::invalid_content(line, "vertex index 0 is invalid")),
    };

    usize::try_from(index)
        .ok()
        .and_then(|i| positions.get(i))
        .copied()
        .ok_or_else(|| {
            IoError::invalid_content(
                line,
                format!("vertex index {number} out of range ({count} vertices)"),
            )
        })
}
