/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use fly3d_core::{Mat4, Vec3, VertexBuffer};
use std::io::Write;

/// Glyph ramp from far (sparse) to near (dense)
const DEPTH_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// View distance at which geometry fades to the sparsest glyph
const FADE_DISTANCE: f32 = 40.0;

/// A vertex buffer with its model matrix and flat draw color
pub struct RenderObject {
    pub name: String,
    pub buffer: VertexBuffer,
    pub model: Mat4,
    pub color: Color,
}

impl RenderObject {
    pub fn new(name: impl Into<String>, buffer: VertexBuffer, model: Mat4, color: Color) -> Self {
        Self {
            name: name.into(),
            buffer,
            model,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

const BLANK: Cell = Cell {
    glyph: ' ',
    color: Color::Reset,
};

/// Depth-buffered character rasterizer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            cells: vec![BLANK; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.cells.fill(BLANK);
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    pub fn render_object(&mut self, object: &RenderObject, view: &Mat4, projection: &Mat4) {
        let model_view = *view * object.model;
        for triangle in object.buffer.triangles() {
            self.render_triangle(triangle.map(|v| v.position), &model_view, projection, object.color);
        }
    }

    fn render_triangle(
        &mut self,
        positions: [Vec3; 3],
        model_view: &Mat4,
        projection: &Mat4,
        color: Color,
    ) {
        let eye = positions.map(|p| model_view.transform_point(p));

        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, p) in screen_coords.iter_mut().zip(eye) {
            let Some(ndc) = projection.project_point(p) else {
                return; // Crosses the eye plane
            };
            if !(-1.0..=1.0).contains(&ndc.z) {
                return;
            }
            let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
            let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
            *slot = (x, y, ndc.z);
        }

        // Flat depth cue from the triangle's mean view distance
        let distance = eye.iter().map(|p| -p.z).sum::<f32>() / 3.0;
        let fade = (distance / FADE_DISTANCE).clamp(0.0, 1.0);
        let index = ((1.0 - fade) * (DEPTH_RAMP.len() - 1) as f32).round() as usize;
        let cell = Cell {
            glyph: DEPTH_RAMP[index.min(DEPTH_RAMP.len() - 1)],
            color,
        };

        self.rasterize_triangle(&screen_coords, cell);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], cell: Cell) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.cells[idx] = cell;
                        }
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for cell in &self.cells[y * self.width..(y + 1) * self.width] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(cell.color))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fly3d_core::{MeshVertex, VertexBufferBuilder};
    use std::f32::consts::FRAC_PI_2;

    fn wall(z: f32) -> VertexBuffer {
        let corner = |x, y| MeshVertex::new(Vec3::new(x, y, z), [0.0, 0.0], Vec3::Z);
        let mut builder = VertexBufferBuilder::new();
        builder.push_triangle([corner(-10.0, -10.0), corner(10.0, -10.0), corner(0.0, 10.0)]);
        builder.build()
    }

    #[test]
    fn test_nearer_object_wins() {
        let mut renderer = AsciiRenderer::new(20, 20);
        let projection = Mat4::perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let view = Mat4::identity();
        let near = RenderObject::new("near", wall(-2.0), Mat4::identity(), Color::Red);
        let far = RenderObject::new("far", wall(-5.0), Mat4::identity(), Color::Blue);

        renderer.render_object(&near, &view, &projection);
        renderer.render_object(&far, &view, &projection);
        assert_eq!(renderer.cell(10, 10).unwrap().color, Color::Red);

        renderer.clear();
        renderer.render_object(&far, &view, &projection);
        renderer.render_object(&near, &view, &projection);
        assert_eq!(renderer.cell(10, 10).unwrap().color, Color::Red);
    }

    #[test]
    fn test_geometry_behind_eye_is_skipped() {
        let mut renderer = AsciiRenderer::new(20, 20);
        let projection = Mat4::perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let behind = RenderObject::new("behind", wall(3.0), Mat4::identity(), Color::Red);
        renderer.render_object(&behind, &Mat4::identity(), &projection);
        assert_eq!(renderer.cell(10, 10), Some(BLANK));
    }

    #[test]
    fn test_view_matrix_moves_geometry() {
        let mut renderer = AsciiRenderer::new(20, 20);
        let projection = Mat4::perspective(FRAC_PI_2, 1.0, 0.1, 100.0);
        let object = RenderObject::new("wall", wall(-2.0), Mat4::identity(), Color::Green);
        // Camera stepped past the wall
        let view = Mat4::translation(Vec3::new(0.0, 0.0, 4.0));
        renderer.render_object(&object, &view, &projection);
        assert_eq!(renderer.cell(10, 10), Some(BLANK));
    }

    #[test]
    fn test_empty_buffer_draws_nothing() {
        let mut renderer = AsciiRenderer::new(4, 4);
        let object = RenderObject::new("empty", VertexBuffer::empty(), Mat4::identity(), Color::Red);
        renderer.render_object(&object, &Mat4::identity(), &Mat4::identity());
        assert!((0..4).all(|y| (0..4).all(|x| renderer.cell(x, y) == Some(BLANK))));
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }
}
