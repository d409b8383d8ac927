// Vertex structure for the canvas quad

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Vertex in clip space with texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }

    /// Two triangles covering clip space, with v growing downwards
    pub fn fullscreen_quad() -> ([Vertex; 4], [u16; 6]) {
        let vertices = [
            Vertex::new(Vec2::new(-1.0, -1.0), Vec2::new(0.0, 1.0)),
            Vertex::new(Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)),
            Vertex::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 0.0)),
            Vertex::new(Vec2::new(-1.0, 1.0), Vec2::new(0.0, 0.0)),
        ];
        (vertices, [0, 1, 2, 0, 2, 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 16);
        assert_eq!(Vertex::desc().array_stride, 16);
    }

    #[test]
    fn test_fullscreen_quad_maps_top_left_to_origin() {
        let (vertices, indices) = Vertex::fullscreen_quad();
        let top_left = vertices[3];
        assert_eq!(top_left.position, [-1.0, 1.0]);
        assert_eq!(top_left.tex_coords, [0.0, 0.0]);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
