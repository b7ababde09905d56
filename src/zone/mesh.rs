use crate::math::{Point2, Point3, Vector3};
use crate::triangulation::Triangulation;

/// Height above the ground plane at which zone meshes are placed, so they do
/// not z-fight with the surface they cover.
pub const ZONE_ELEVATION: f64 = 0.03;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

/// A renderable zone surface lying on the horizontal ground plane.
///
/// Planar `(x, y)` coordinates map to world `(x, elevation, y)`: the world
/// Y axis points up.
#[derive(Debug, Clone, Default)]
pub struct ZoneMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals (all +Y).
    pub normals: Vec<Vector3>,
    /// Ground-plane coordinates of each vertex.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl ZoneMesh {
    /// Builds a mesh from a planar triangulation.
    ///
    /// Triangles are rewound so that `(v1 - v0) × (v2 - v0)` points up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_triangulation(triangulation: &Triangulation, elevation: f64) -> Self {
        let vertices: Vec<Point3> = triangulation
            .vertices()
            .iter()
            .map(|p| Point3::new(p.x, elevation, p.y))
            .collect();
        let normals = vec![Vector3::y(); vertices.len()];
        let uvs = triangulation.vertices().to_vec();
        let indices = triangulation
            .triangles()
            .iter()
            .map(|tri| {
                let [a, b, c] = tri.indices();
                [a as u32, c as u32, b as u32]
            })
            .collect();

        Self {
            vertices,
            normals,
            uvs,
            indices,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Index buffer with the triples laid end to end.
    #[must_use]
    pub fn flat_indices(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Mean of all vertex positions, or `None` for an empty mesh.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn centroid(&self) -> Option<Point3> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Axis-aligned bounds of the vertices, or `None` for an empty mesh.
    #[must_use]
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.vertices.first()?;
        let mut aabb = Aabb {
            min: *first,
            max: *first,
        };
        for v in &self.vertices[1..] {
            aabb.min = aabb.min.inf(v);
            aabb.max = aabb.max.sup(v);
        }
        Some(aabb)
    }

    /// Total surface area of the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        let mut total_area = 0.0;
        for tri in &self.indices {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];

            let edge1 = v1 - v0;
            let edge2 = v2 - v0;
            total_area += edge1.cross(&edge2).norm() * 0.5;
        }
        total_area
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;
    use crate::triangulation::{Perturbation, Triangulate, TriangulationConfig};

    fn square(size: f64) -> Triangulation {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ];
        Triangulate::new(&points)
            .with_config(TriangulationConfig::default().with_perturbation(Perturbation::None))
            .execute()
            .unwrap()
    }

    #[test]
    fn vertices_lie_on_the_ground_plane() {
        let mesh = ZoneMesh::from_triangulation(&square(2.0), 0.5);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.uvs.len(), 4);
        for (v, uv) in mesh.vertices.iter().zip(&mesh.uvs) {
            assert!((v.y - 0.5).abs() < TOLERANCE);
            assert!((v.x - uv.x).abs() < TOLERANCE);
            assert!((v.z - uv.y).abs() < TOLERANCE);
        }
    }

    #[test]
    fn faces_point_up() {
        let mesh = ZoneMesh::from_triangulation(&square(2.0), 0.0);
        assert_eq!(mesh.triangle_count(), 2);
        for tri in &mesh.indices {
            let v0 = mesh.vertices[tri[0] as usize];
            let v1 = mesh.vertices[tri[1] as usize];
            let v2 = mesh.vertices[tri[2] as usize];
            let n = (v1 - v0).cross(&(v2 - v0));
            assert!(n.y > 0.0, "face normal {n:?} does not point up");
        }
        for n in &mesh.normals {
            assert!((n.y - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn area_of_square_zone() {
        let mesh = ZoneMesh::from_triangulation(&square(3.0), ZONE_ELEVATION);
        assert!((mesh.area() - 9.0).abs() < 1e-9, "got {}", mesh.area());
    }

    #[test]
    fn centroid_and_bounds() {
        let mesh = ZoneMesh::from_triangulation(&square(2.0), 1.0);
        let c = mesh.centroid().unwrap();
        assert!((c.x - 1.0).abs() < TOLERANCE);
        assert!((c.y - 1.0).abs() < TOLERANCE);
        assert!((c.z - 1.0).abs() < TOLERANCE);

        let aabb = mesh.bounding_box().unwrap();
        assert!((aabb.min.x).abs() < TOLERANCE);
        assert!((aabb.min.z).abs() < TOLERANCE);
        assert!((aabb.max.x - 2.0).abs() < TOLERANCE);
        assert!((aabb.max.z - 2.0).abs() < TOLERANCE);
        assert!((aabb.min.y - 1.0).abs() < TOLERANCE);
        assert!((aabb.max.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn flat_indices_cover_every_triangle() {
        let mesh = ZoneMesh::from_triangulation(&square(1.0), 0.0);
        let flat = mesh.flat_indices();
        assert_eq!(flat.len(), 6);
        assert!(flat.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn empty_mesh_has_no_centroid() {
        let mesh = ZoneMesh::default();
        assert!(mesh.centroid().is_none());
        assert!(mesh.bounding_box().is_none());
        assert!(mesh.area().abs() < TOLERANCE);
    }
}
