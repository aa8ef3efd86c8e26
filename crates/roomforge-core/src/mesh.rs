//! Triangle meshes produced by primitive tessellation

use glam::{Vec2, Vec3};

/// A vertex with position, normal, and UV coordinates
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// A triangle mesh
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Push one triangle with a shared flat normal
    pub fn push_triangle(&mut self, positions: [Vec3; 3], normal: Vec3, uvs: [Vec2; 3]) {
        let base = self.vertices.len() as u32;
        for (p, uv) in positions.iter().zip(uvs) {
            self.vertices.push(Vertex::new(*p, normal, uv));
        }
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Axis-aligned bounds of all vertex positions (min, max)
    ///
    /// An empty mesh reports zero bounds.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        if self.vertices.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from_array(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_bounds() {
        let mut mesh = Mesh::new();
        mesh.push_triangle(
            [Vec3::ZERO, Vec3::X, Vec3::new(0.0, 1.0, 0.0)],
            Vec3::Z,
            [Vec2::ZERO, Vec2::X, Vec2::Y],
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        let (min, max) = mesh.bounds();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn empty_mesh_bounds_are_zero() {
        assert_eq!(Mesh::new().bounds(), (Vec3::ZERO, Vec3::ZERO));
    }
}
