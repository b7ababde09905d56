use crate::error::{DegenerateInputError, Result};
use crate::math::predicates::{in_circle, orient_2d, projects_within_segment};
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a facet of the lifted hull.
    pub struct FacetId;
}

/// A corner of a hull facet: either a lifted site or the vertex at vertical
/// infinity that closes the hull from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Site(usize),
    Infinity,
}

/// A triangular facet of the lifted hull.
///
/// Lower facets have three sites, wound counter-clockwise in the plane; their
/// plane passes through the lifted corners. Vertical facets are
/// `[u, v, Infinity]`: they stand on the planar hull edge `v -> u` and face
/// away from the point set.
#[derive(Debug, Clone)]
pub struct Facet {
    nodes: [Node; 3],
}

impl Facet {
    /// Creates a lower facet over the sites `a`, `b`, `c` (counter-clockwise).
    #[must_use]
    pub fn lower(a: usize, b: usize, c: usize) -> Self {
        Self {
            nodes: [Node::Site(a), Node::Site(b), Node::Site(c)],
        }
    }

    /// Creates the vertical facet `[u, v, Infinity]`.
    #[must_use]
    pub fn vertical(u: usize, v: usize) -> Self {
        Self {
            nodes: [Node::Site(u), Node::Site(v), Node::Infinity],
        }
    }

    /// Builds the facet with corners `[x, y, site]`, rotating the infinite
    /// corner (if any) into last position.
    ///
    /// # Errors
    ///
    /// Returns an error if both edge corners are at infinity.
    pub fn from_edge(x: Node, y: Node, site: usize) -> Result<Self> {
        match (x, y) {
            (Node::Site(a), Node::Site(b)) => Ok(Self::lower(a, b, site)),
            (Node::Site(a), Node::Infinity) => Ok(Self::vertical(site, a)),
            (Node::Infinity, Node::Site(b)) => Ok(Self::vertical(b, site)),
            (Node::Infinity, Node::Infinity) => Err(DegenerateInputError::InconsistentEnvelope(
                "edge with two infinite corners".into(),
            )
            .into()),
        }
    }

    /// Returns the facet corners.
    #[must_use]
    pub fn nodes(&self) -> [Node; 3] {
        self.nodes
    }

    /// Returns the three directed edges of the facet in winding order.
    #[must_use]
    pub fn edges(&self) -> [(Node, Node); 3] {
        let [a, b, c] = self.nodes;
        [(a, b), (b, c), (c, a)]
    }

    /// Returns the site triple of a lower facet, or `None` for a vertical one.
    #[must_use]
    pub fn sites(&self) -> Option<[usize; 3]> {
        match self.nodes {
            [Node::Site(a), Node::Site(b), Node::Site(c)] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Returns `true` if the lift of `p` lies strictly beyond this facet.
    ///
    /// For a lower facet that means `p` is strictly inside its circumcircle.
    /// For a vertical facet it means `p` is strictly outside its hull edge, or
    /// on the edge's line and strictly between its endpoints, so that the
    /// edge gets split.
    #[must_use]
    pub fn is_visible_from(&self, sites: &[Point2], p: &Point2) -> bool {
        match self.nodes {
            [Node::Site(a), Node::Site(b), Node::Site(c)] => {
                in_circle(&sites[a], &sites[b], &sites[c], p) > 0.0
            }
            [Node::Site(u), Node::Site(v), Node::Infinity] => {
                let side = orient_2d(&sites[u], &sites[v], p);
                side > 0.0 || (side == 0.0 && projects_within_segment(&sites[u], &sites[v], p))
            }
            _ => false,
        }
    }
}
