/// Wavefront OBJ loader producing interleaved triangle lists
///
/// Only the `v`, `vt`, `vn` and triangular `f` records are understood. The
/// parser never rejects input: missing or malformed numbers read as zero and
/// face indices outside the known range resolve to zero-filled attributes.
use std::fs;
use std::path::PathBuf;

use log::{debug, info, trace, warn};
use nom::{
    character::complete::{char, i64 as index},
    combinator::opt,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::AssetError;
use crate::geometry::{MeshVertex, VertexBuffer, VertexBufferBuilder};
use crate::vector::{cross, edge, Vec3};

/// Resolves asset names to `.obj` files under a base directory
#[derive(Debug, Clone)]
pub struct ObjLoader {
    base_path: PathBuf,
    extension: String,
}

impl ObjLoader {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            extension: "obj".to_string(),
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.{}", self.extension))
    }

    /// Reads and parses the named mesh. Fails only when the file cannot be read.
    pub fn load(&self, name: &str) -> Result<VertexBuffer, AssetError> {
        let path = self.path_for(name);
        let bytes = fs::read(&path).map_err(|e| AssetError::from_io(path.clone(), e))?;
        let buffer = parse_obj(&String::from_utf8_lossy(&bytes));
        info!(
            "Loaded mesh {} ({} triangles)",
            path.display(),
            buffer.triangle_count()
        );
        Ok(buffer)
    }

    /// Like [`ObjLoader::load`], but substitutes an empty mesh on failure
    pub fn load_or_empty(&self, name: &str) -> VertexBuffer {
        self.load(name).unwrap_or_else(|e| {
            warn!("{e}; using an empty mesh for {name:?}");
            VertexBuffer::empty()
        })
    }
}

impl Default for ObjLoader {
    fn default() -> Self {
        Self::new("res")
    }
}

/// Parses OBJ text into a triangle list, one triangle per `f` record in order
pub fn parse_obj(source: &str) -> VertexBuffer {
    let mut state = ParseState::default();
    for line in source.lines() {
        state.parse_line(line);
    }
    debug!(
        "OBJ parsed: {} positions, {} texcoords, {} normals, {} faces",
        state.positions.len(),
        state.texcoords.len(),
        state.normals.len(),
        state.builder.triangle_count()
    );
    state.builder.build()
}

/// Raw 1-based indices of one face corner, `pos[/tex[/norm]]`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct FaceVertex {
    position: Option<i64>,
    texcoord: Option<i64>,
    normal: Option<i64>,
}

fn face_vertex(input: &str) -> IResult<&str, FaceVertex> {
    let (input, position) = opt(index)(input)?;
    let (input, texcoord) = opt(preceded(char('/'), opt(index)))(input)?;
    let (input, normal) = opt(preceded(char('/'), opt(index)))(input)?;
    Ok((
        input,
        FaceVertex {
            position,
            texcoord: texcoord.flatten(),
            normal: normal.flatten(),
        },
    ))
}

/// Leading numeric prefix of a field, or zero
fn scalar(field: Option<&str>) -> f32 {
    field
        .and_then(|text| float::<_, nom::error::Error<&str>>(text).ok())
        .map_or(0.0, |(_, value)| value)
}

/// Looks up a 1-based index, falling back to the default for anything outside `1..=len`
fn resolve<T: Copy + Default>(items: &[T], index: Option<i64>) -> T {
    index
        .filter(|&i| i >= 1)
        .and_then(|i| usize::try_from(i - 1).ok())
        .and_then(|i| items.get(i).copied())
        .unwrap_or_default()
}

#[derive(Default)]
struct ParseState {
    positions: Vec<Vec3>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<Vec3>,
    builder: VertexBufferBuilder,
}

impl ParseState {
    fn parse_line(&mut self, line: &str) {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let mut fields = line.split_whitespace();
        let Some(keyword) = fields.next() else {
            return;
        };
        match keyword {
            "v" => self.positions.push(Self::vec3(&mut fields)),
            "vt" => {
                let u = scalar(fields.next());
                let v = scalar(fields.next());
                self.texcoords.push([u, v]);
            }
            "vn" => self.normals.push(Self::vec3(&mut fields)),
            "f" => {
                let corners = [fields.next(), fields.next(), fields.next()];
                if fields.next().is_some() {
                    trace!("face with more than three vertices, extra vertices ignored");
                }
                self.push_face(corners);
            }
            other => trace!("skipping unsupported OBJ record {other:?}"),
        }
    }

    fn vec3<'a>(fields: &mut impl Iterator<Item = &'a str>) -> Vec3 {
        let x = scalar(fields.next());
        let y = scalar(fields.next());
        let z = scalar(fields.next());
        Vec3::new(x, y, z)
    }

    fn resolve_vertex(&self, token: Option<&str>) -> MeshVertex {
        let corner = token
            .and_then(|t| face_vertex(t).ok())
            .map(|(_, corner)| corner)
            .unwrap_or_default();
        MeshVertex {
            position: resolve(&self.positions, corner.position),
            texcoord: resolve(&self.texcoords, corner.texcoord),
            normal: resolve(&self.normals, corner.normal),
        }
    }

    fn push_face(&mut self, corners: [Option<&str>; 3]) {
        let mut vertices = corners.map(|token| self.resolve_vertex(token));

        // No normal on the leading corner means the face gets a flat one
        if vertices[0].normal == Vec3::ZERO {
            let [a, b, c] = vertices.map(|v| v.position);
            let normal = cross(edge(a, b), edge(a, c)).normalize();
            for vertex in &mut vertices {
                vertex.normal = normal;
            }
        }
        self.builder.push_triangle(vertices);
    }
}
