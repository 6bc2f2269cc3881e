//! Triangle-mesh model loading.
//!
//! Parses the OBJ subset the heart models use (`v`, `vn`, and triangular
//! `f v//vn` faces) into renderer-ready buffers.

/// Wavefront OBJ subset parser.
pub mod obj;

pub use obj::ObjError;

use glam::Vec3;

/// A parsed triangle mesh: positions, per-vertex normals, face indices.
///
/// `vertices` and `normals_per_vertex` always have the same length. Slot *i*
/// of `normals_per_vertex` holds whichever declared normal was last
/// associated with vertex *i* by a face record. Every value in
/// `triangle_indices` is a valid index into both sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions in declaration order.
    pub vertices: Vec<Vec3>,
    /// Resolved normal for each vertex, same order as `vertices`.
    pub normals_per_vertex: Vec<Vec3>,
    /// Flat triangle list, three vertex indices per face.
    pub triangle_indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangular faces.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Flattens the mesh into the layout the vertex buffer consumes: for
    /// each vertex in order, position then normal (6 floats).
    ///
    /// Vertex order is preserved, so `triangle_indices` stays valid for the
    /// interleaved buffer.
    #[must_use]
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * 6);
        for (position, normal) in
            self.vertices.iter().zip(&self.normals_per_vertex)
        {
            out.extend_from_slice(&position.to_array());
            out.extend_from_slice(&normal.to_array());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mesh() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            normals_per_vertex: vec![Vec3::Z, Vec3::Y, Vec3::X],
            triangle_indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn interleaved_pairs_position_with_normal() {
        let mesh = sample_mesh();
        let flat = mesh.interleaved();
        assert_eq!(flat.len(), mesh.vertex_count() * 6);
        for i in 0..mesh.vertex_count() {
            let chunk = &flat[i * 6..i * 6 + 6];
            assert_eq!(chunk[..3], mesh.vertices[i].to_array());
            assert_eq!(chunk[3..], mesh.normals_per_vertex[i].to_array());
        }
    }

    #[test]
    fn interleaved_empty_mesh_is_empty() {
        assert!(TriangleMesh::default().interleaved().is_empty());
    }

    #[test]
    fn triangle_count_is_face_count() {
        assert_eq!(sample_mesh().triangle_count(), 1);
    }
}
