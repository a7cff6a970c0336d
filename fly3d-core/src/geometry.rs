/// Interleaved vertex data handed to the rendering backend
use crate::vector::Vec3;

/// Floats per interleaved vertex: position(3) + texcoord(2) + normal(3)
pub const VERTEX_STRIDE: usize = 8;
/// Floats per triangle
pub const TRIANGLE_STRIDE: usize = VERTEX_STRIDE * 3;

/// One interleaved vertex record
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeshVertex {
    pub position: Vec3,
    pub texcoord: [f32; 2],
    pub normal: Vec3,
}

impl MeshVertex {
    pub fn new(position: Vec3, texcoord: [f32; 2], normal: Vec3) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }

    /// Reads one record from the front of `data`, which holds at least
    /// [`VERTEX_STRIDE`] floats
    fn from_slice(data: &[f32]) -> Self {
        Self {
            position: Vec3::new(data[0], data[1], data[2]),
            texcoord: [data[3], data[4]],
            normal: Vec3::new(data[5], data[6], data[7]),
        }
    }

    pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
        let Self {
            position: p,
            texcoord: t,
            normal: n,
        } = self;
        [p.x, p.y, p.z, t[0], t[1], n.x, n.y, n.z]
    }
}

/// Flat triangle list of interleaved vertices, 24 floats per triangle.
///
/// Built once by [`VertexBufferBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VertexBuffer {
    data: Vec<f32>,
}

impl VertexBuffer {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / VERTEX_STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.data.len() / TRIANGLE_STRIDE
    }

    pub fn vertex(&self, index: usize) -> Option<MeshVertex> {
        let start = index.checked_mul(VERTEX_STRIDE)?;
        self.data
            .get(start..start.checked_add(VERTEX_STRIDE)?)
            .map(MeshVertex::from_slice)
    }

    pub fn vertices(&self) -> impl Iterator<Item = MeshVertex> + '_ {
        self.data.chunks_exact(VERTEX_STRIDE).map(MeshVertex::from_slice)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [MeshVertex; 3]> + '_ {
        self.data.chunks_exact(TRIANGLE_STRIDE).map(|tri| {
            [
                MeshVertex::from_slice(&tri[0..VERTEX_STRIDE]),
                MeshVertex::from_slice(&tri[VERTEX_STRIDE..2 * VERTEX_STRIDE]),
                MeshVertex::from_slice(&tri[2 * VERTEX_STRIDE..]),
            ]
        })
    }

    /// Square grid in the XY plane facing +Z, used as a ground plane.
    ///
    /// The square spans `-half_extent..half_extent` on both axes, split into
    /// `divisions` cells per side. Texture coordinates run from 0 to
    /// `tex_repeat` across the whole square.
    pub fn ground_plane(half_extent: f32, divisions: u32, tex_repeat: f32) -> Self {
        let n = divisions.max(1);
        let step = 2.0 / n as f32;
        let corner = |i: u32, j: u32| {
            let (s, t) = (i as f32 * step - 1.0, j as f32 * step - 1.0);
            MeshVertex::new(
                Vec3::new(s * half_extent, t * half_extent, 0.0),
                [(s + 1.0) * 0.5 * tex_repeat, (t + 1.0) * 0.5 * tex_repeat],
                Vec3::Z,
            )
        };

        let mut builder = VertexBufferBuilder::with_capacity((n * n * 2) as usize);
        for j in 0..n {
            for i in 0..n {
                let (a, b, c, d) = (corner(i, j), corner(i + 1, j), corner(i, j + 1), corner(i + 1, j + 1));
                builder.push_triangle([a, b, c]);
                builder.push_triangle([c, b, d]);
            }
        }
        builder.build()
    }
}

/// Append-only accumulator producing a [`VertexBuffer`]
#[derive(Debug, Default)]
pub struct VertexBufferBuilder {
    data: Vec<f32>,
}

impl VertexBufferBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            data: Vec::with_capacity(triangles * TRIANGLE_STRIDE),
        }
    }

    pub fn push_triangle(&mut self, vertices: [MeshVertex; 3]) {
        for vertex in &vertices {
            self.data.extend_from_slice(&vertex.to_array());
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.data.len() / TRIANGLE_STRIDE
    }

    pub fn build(self) -> VertexBuffer {
        VertexBuffer { data: self.data }
    }
}
