//! Planar Delaunay triangulation of user-supplied points.
//!
//! [`Triangulate`] lifts the points onto a paraboloid, builds the lower
//! convex hull of the lifted set (see [`crate::hull`]) and maps its facets
//! back onto the caller's original coordinates.
//!
//! Vertices are merged only when their coordinates are exactly equal.
//! Points that differ in the last bit are kept apart and both appear in the
//! output. The plane distance tolerance only decides whether the input as a
//! whole is coincident or collinear.
//!
//! A random shift can bend a straight run of points on the hull boundary into
//! a shallow chain, which the hull closes with slivers. Boundary triangles
//! that are flat or inverted in the caller's coordinates are dropped, and the
//! rest is checked to cover the convex hull of the input with positive
//! triangles only.

mod config;
mod perturb;
mod triangle;

pub use config::{
    Perturbation, TriangulationConfig, DEFAULT_PERTURBATION_RADIUS,
    DEFAULT_PLANE_DISTANCE_TOLERANCE,
};
pub use perturb::perturb;
pub use triangle::{centroid, circumcenter, Triangle};

use std::collections::{HashMap, HashSet};

use crate::error::{DegenerateInputError, Result};
use crate::hull::{seed_triangle, LowerHull};
use crate::math::polygon_2d::{convex_hull_2d, perimeter_2d, signed_area_2d};
use crate::math::predicates::orient_2d;
use crate::math::Point2;

/// A planar triangulation: vertices plus index triples into them.
#[derive(Debug, Clone)]
pub struct Triangulation {
    vertices: Vec<Point2>,
    triangles: Vec<Triangle>,
}

impl Triangulation {
    /// Vertices in the order they are first used by [`triangles`](Self::triangles).
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Triangles, each wound counter-clockwise.
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Index triples of all triangles.
    #[must_use]
    pub fn index_triples(&self) -> Vec<[usize; 3]> {
        self.triangles.iter().map(Triangle::indices).collect()
    }

    /// Total area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle::signed_area).sum()
    }
}

/// Triangulates a set of planar points.
pub struct Triangulate<'a> {
    points: &'a [Point2],
    config: TriangulationConfig,
}

impl<'a> Triangulate<'a> {
    /// Creates a new `Triangulate` operation with the default configuration.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            config: TriangulationConfig::default(),
        }
    }

    /// Sets a custom configuration.
    #[must_use]
    pub fn with_config(mut self, config: TriangulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the triangulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`](crate::error::ConfigurationError) if the
    /// configuration is inconsistent, or [`DegenerateInputError`] if the
    /// points cannot be triangulated (too few, non-finite, coincident,
    /// collinear, or numerically inconsistent).
    pub fn execute(&self) -> Result<Triangulation> {
        self.config.validate()?;

        let count = self.points.len();
        if count < 3 {
            return Err(DegenerateInputError::TooFewPoints { count }.into());
        }
        if let Some(index) = self
            .points
            .iter()
            .position(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(DegenerateInputError::NonFinite { index }.into());
        }

        let unique = dedup_exact(self.points);
        if unique.len() < count {
            tracing::debug!(
                merged = count - unique.len(),
                "merged exactly duplicated points"
            );
        }
        if unique.len() < 3 {
            return Err(DegenerateInputError::Coincident.into());
        }

        let tolerance = self.config.plane_distance_tolerance;
        let seed = seed_triangle(&unique, tolerance)?;
        let shifted = perturb(&unique, self.config.point_perturbation);
        let hull = LowerHull::from_seed(&shifted, seed)?;

        let facets = drop_flat_boundary(&unique, hull.facets());
        if facets.len() < hull.facets().len() {
            tracing::debug!(
                dropped = hull.facets().len() - facets.len(),
                "dropped boundary slivers that are flat in input coordinates"
            );
        }
        check_coverage(&unique, &facets, tolerance)?;

        let triangulation = assemble(&unique, &facets);
        tracing::debug!(
            points = count,
            vertices = triangulation.vertices.len(),
            triangles = triangulation.triangles.len(),
            "triangulated"
        );
        Ok(triangulation)
    }
}

/// Exact-equality key for a point. `-0.0` and `0.0` compare equal, so they
/// share a key.
fn point_key(p: &Point2) -> (u64, u64) {
    let canonical = |v: f64| if v == 0.0 { 0 } else { v.to_bits() };
    (canonical(p.x), canonical(p.y))
}

/// Drops exact repeats, keeping the first occurrence of each point.
fn dedup_exact(points: &[Point2]) -> Vec<Point2> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| seen.insert(point_key(p)))
        .copied()
        .collect()
}

/// Directed edges of a counter-clockwise facet.
fn facet_edges([a, b, c]: [usize; 3]) -> [(usize, usize); 3] {
    [(a, b), (b, c), (c, a)]
}

/// Removes triangles on the outer boundary that are flat or inverted in
/// `points`, repeating as removals expose new boundary edges.
fn drop_flat_boundary(points: &[Point2], facets: &[[usize; 3]]) -> Vec<[usize; 3]> {
    let is_flat = |[a, b, c]: [usize; 3]| orient_2d(&points[a], &points[b], &points[c]) <= 0.0;
    let mut flat: Vec<usize> = (0..facets.len()).filter(|&i| is_flat(facets[i])).collect();
    if flat.is_empty() {
        return facets.to_vec();
    }

    let mut edges: HashSet<(usize, usize)> =
        facets.iter().flat_map(|&facet| facet_edges(facet)).collect();
    let mut kept = vec![true; facets.len()];
    loop {
        let before = flat.len();
        flat.retain(|&i| {
            let on_boundary = facet_edges(facets[i])
                .iter()
                .any(|&(u, v)| !edges.contains(&(v, u)));
            if on_boundary {
                kept[i] = false;
                for edge in facet_edges(facets[i]) {
                    edges.remove(&edge);
                }
            }
            !on_boundary
        });
        if flat.len() == before {
            break;
        }
    }

    facets
        .iter()
        .zip(kept)
        .filter_map(|(&facet, keep)| keep.then_some(facet))
        .collect()
}

/// Checks that `facets` triangulate the convex hull of `points`: every point
/// is used, every triangle is counter-clockwise, and together they cover the
/// hull area to within `tolerance` times its perimeter.
fn check_coverage(points: &[Point2], facets: &[[usize; 3]], tolerance: f64) -> Result<()> {
    let mut used = vec![false; points.len()];
    let mut area = 0.0;
    for &[a, b, c] in facets {
        let turn = orient_2d(&points[a], &points[b], &points[c]);
        if turn <= 0.0 {
            return Err(DegenerateInputError::InconsistentEnvelope(format!(
                "triangle ({a}, {b}, {c}) is flat or inverted in input coordinates"
            ))
            .into());
        }
        area += 0.5 * turn;
        for i in [a, b, c] {
            used[i] = true;
        }
    }

    let missing = used.iter().filter(|&&u| !u).count();
    if missing > 0 {
        return Err(DegenerateInputError::InconsistentEnvelope(format!(
            "{missing} of {} points are missing from the triangulation",
            points.len()
        ))
        .into());
    }

    let hull = convex_hull_2d(points);
    let expected = signed_area_2d(&hull);
    if (area - expected).abs() > tolerance * perimeter_2d(&hull) {
        return Err(DegenerateInputError::InconsistentEnvelope(format!(
            "triangles cover an area of {area} but the convex hull has {expected}"
        ))
        .into());
    }
    Ok(())
}

/// Maps hull facets over `sites` into a vertex list (first-use order) and
/// triangles indexing it.
fn assemble(sites: &[Point2], facets: &[[usize; 3]]) -> Triangulation {
    let mut vertices: Vec<Point2> = Vec::new();
    let mut vertex_map: HashMap<(u64, u64), usize> = HashMap::new();
    let mut triangles = Vec::with_capacity(facets.len());

    for facet in facets {
        let corners = facet.map(|site| sites[site]);
        let indices = corners.map(|p| {
            *vertex_map.entry(point_key(&p)).or_insert_with(|| {
                vertices.push(p);
                vertices.len() - 1
            })
        });
        triangles.push(Triangle::new(indices, corners));
    }

    Triangulation {
        vertices,
        triangles,
    }
}
