use std::collections::{HashMap, HashSet};

use slotmap::SlotMap;

use crate::error::{DegenerateInputError, Result};
use crate::math::predicates::{line_distance, orient_2d};
use crate::math::Point2;

use super::facet::{Facet, FacetId, Node};

/// Lower convex hull of a planar point set lifted onto the paraboloid
/// `z = x² + y²`.
///
/// Its facets, projected back into the plane, form the Delaunay
/// triangulation of the sites.
#[derive(Debug, Clone)]
pub struct LowerHull {
    facets: Vec<[usize; 3]>,
}

impl LowerHull {
    /// Builds the lower hull of `sites`.
    ///
    /// Sites must be pairwise distinct. `tolerance` is the distance below
    /// which sites count as coincident or collinear; see [`seed_triangle`].
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateInputError`] if the sites are coincident or
    /// collinear within `tolerance`, or if the hull loses consistency while
    /// inserting a site.
    pub fn build(sites: &[Point2], tolerance: f64) -> Result<Self> {
        let seed = seed_triangle(sites, tolerance)?;
        Self::from_seed(sites, seed)
    }

    /// Builds the lower hull of `sites` starting from the triangle `seed`.
    ///
    /// The seed may be wound either way but must not be flat.
    ///
    /// # Errors
    ///
    /// Returns [`DegenerateInputError::InconsistentEnvelope`] if the seed is
    /// flat or the hull loses consistency while inserting a site.
    pub fn from_seed(sites: &[Point2], seed: [usize; 3]) -> Result<Self> {
        let mut builder = HullBuilder::new(sites);
        builder.start(seed)?;

        for index in 0..sites.len() {
            if !seed.contains(&index) {
                builder.insert(index)?;
            }
        }

        let facets = builder.finish()?;
        tracing::debug!(
            sites = sites.len(),
            facets = facets.len(),
            "lower hull complete"
        );
        Ok(Self { facets })
    }

    /// Returns the lower facets as counter-clockwise site index triples.
    #[must_use]
    pub fn facets(&self) -> &[[usize; 3]] {
        &self.facets
    }
}

/// Picks three well-separated sites to start a hull from: the first site,
/// the site farthest from it, and the site farthest from the line through
/// those two.
///
/// # Errors
///
/// Returns [`DegenerateInputError::Coincident`] if every site lies within
/// `tolerance` of the first one, and [`DegenerateInputError::Collinear`] if
/// every site lies within `tolerance` of one line.
pub fn seed_triangle(sites: &[Point2], tolerance: f64) -> Result<[usize; 3]> {
    if sites.len() < 3 {
        return Err(DegenerateInputError::Coincident.into());
    }

    let a = 0;
    let b = farthest(sites, |p| (p - sites[a]).norm());
    if (sites[b] - sites[a]).norm() <= tolerance {
        return Err(DegenerateInputError::Coincident.into());
    }

    let c = farthest(sites, |p| line_distance(&sites[a], &sites[b], p).abs());
    if line_distance(&sites[a], &sites[b], &sites[c]).abs() <= tolerance {
        return Err(DegenerateInputError::Collinear { tolerance }.into());
    }
    Ok([a, b, c])
}

/// Incremental beneath-beyond construction.
///
/// The hull is kept closed at all times: every planar hull edge carries a
/// vertical facet up to the vertex at infinity, so inserting a point outside
/// the current hull is the same operation as inserting one inside it.
struct HullBuilder<'a> {
    sites: &'a [Point2],
    facets: SlotMap<FacetId, Facet>,
    /// Directed edge -> the facet that owns it.
    edges: HashMap<(Node, Node), FacetId>,
}

impl<'a> HullBuilder<'a> {
    fn new(sites: &'a [Point2]) -> Self {
        Self {
            sites,
            facets: SlotMap::with_key(),
            edges: HashMap::new(),
        }
    }

    /// Closes the seed triangle with one vertical facet per edge.
    fn start(&mut self, [a, b, c]: [usize; 3]) -> Result<()> {
        let turn = orient_2d(&self.sites[a], &self.sites[b], &self.sites[c]);
        let [a, b, c] = if turn > 0.0 {
            [a, b, c]
        } else if turn < 0.0 {
            [a, c, b]
        } else {
            return Err(DegenerateInputError::InconsistentEnvelope(format!(
                "seed triangle ({a}, {b}, {c}) is flat"
            ))
            .into());
        };

        self.add_facet(Facet::lower(a, b, c))?;
        for (u, v) in [(a, b), (b, c), (c, a)] {
            self.add_facet(Facet::vertical(v, u))?;
        }
        Ok(())
    }

    fn insert(&mut self, site: usize) -> Result<()> {
        let p = self.sites[site];

        let seed = self.locate(&p)?;
        let cavity = self.cavity(seed, &p)?;
        let boundary = self.cavity_boundary(&cavity)?;

        // Every corner of a removed facet must survive on the horizon.
        let horizon: HashSet<Node> = boundary.iter().map(|&(x, _)| x).collect();
        for id in &cavity {
            if let Some(lost) = self.facets[*id]
                .nodes()
                .into_iter()
                .find(|node| !horizon.contains(node))
            {
                return Err(DegenerateInputError::InconsistentEnvelope(format!(
                    "inserting site {site} would drop {lost:?}"
                ))
                .into());
            }
        }

        tracing::trace!(
            site,
            removed = cavity.len(),
            added = boundary.len(),
            "inserting site"
        );

        let mut removed: Vec<FacetId> = cavity.into_iter().collect();
        removed.sort_unstable();
        for id in removed {
            if let Some(facet) = self.facets.remove(id) {
                for edge in facet.edges() {
                    self.edges.remove(&edge);
                }
            }
        }
        for (x, y) in boundary {
            let facet = Facet::from_edge(x, y, site)?;
            self.add_facet(facet)?;
        }
        Ok(())
    }

    /// Finds the first facet, in storage order, that `p` lies beyond.
    fn locate(&self, p: &Point2) -> Result<FacetId> {
        self.facets
            .iter()
            .find(|(_, facet)| facet.is_visible_from(self.sites, p))
            .map(|(id, _)| id)
            .ok_or_else(|| {
                DegenerateInputError::InconsistentEnvelope(format!(
                    "site at ({}, {}) is not beyond any facet",
                    p.x, p.y
                ))
                .into()
            })
    }

    /// Grows the set of facets `p` lies beyond, starting at `seed`.
    ///
    /// The horizon of the result is strictly visible from `p`: whenever a
    /// horizon edge is not, the facet behind it joins the cavity, since the
    /// facet joining that edge to `p` would be flat or inverted.
    fn cavity(&self, seed: FacetId, p: &Point2) -> Result<HashSet<FacetId>> {
        let mut cavity = HashSet::from([seed]);
        let mut stack = vec![seed];

        loop {
            while let Some(id) = stack.pop() {
                for (x, y) in self.facets[id].edges() {
                    let neighbour = self.neighbour(x, y)?;
                    if !cavity.contains(&neighbour)
                        && self.facets[neighbour].is_visible_from(self.sites, p)
                    {
                        cavity.insert(neighbour);
                        stack.push(neighbour);
                    }
                }
            }

            let mut blocked = Vec::new();
            for id in &cavity {
                for (x, y) in self.facets[*id].edges() {
                    let neighbour = self.neighbour(x, y)?;
                    if !cavity.contains(&neighbour) && !self.sees_edge(x, y, p) {
                        blocked.push(neighbour);
                    }
                }
            }
            if blocked.is_empty() {
                return Ok(cavity);
            }
            tracing::trace!(blocked = blocked.len(), "widening cavity past flat horizon edges");
            for id in blocked {
                if cavity.insert(id) {
                    stack.push(id);
                }
            }
        }
    }

    /// Returns the facet on the other side of the directed edge `x -> y`.
    fn neighbour(&self, x: Node, y: Node) -> Result<FacetId> {
        self.edges.get(&(y, x)).copied().ok_or_else(|| {
            DegenerateInputError::InconsistentEnvelope("hull has an open edge".into()).into()
        })
    }

    /// Returns `true` if the facet `[x, y, p]` would be properly wound.
    fn sees_edge(&self, x: Node, y: Node, p: &Point2) -> bool {
        match (x, y) {
            (Node::Site(a), Node::Site(b)) => orient_2d(&self.sites[a], &self.sites[b], p) > 0.0,
            _ => true,
        }
    }

    /// Returns the horizon of the cavity as directed edges, in cycle order.
    ///
    /// The horizon must be a single closed loop; anything else means the
    /// cavity is not a disc and re-triangulating it would corrupt the hull.
    fn cavity_boundary(&self, cavity: &HashSet<FacetId>) -> Result<Vec<(Node, Node)>> {
        let mut next: HashMap<Node, Node> = HashMap::new();
        for id in cavity {
            for (x, y) in self.facets[*id].edges() {
                let outside = self
                    .edges
                    .get(&(y, x))
                    .is_none_or(|neighbour| !cavity.contains(neighbour));
                if outside && next.insert(x, y).is_some() {
                    return Err(DegenerateInputError::InconsistentEnvelope(
                        "cavity horizon touches itself".into(),
                    )
                    .into());
                }
            }
        }

        let Some(&start) = next.keys().min_by_key(|node| match node {
            Node::Site(i) => *i,
            Node::Infinity => usize::MAX,
        }) else {
            return Err(
                DegenerateInputError::InconsistentEnvelope("empty cavity horizon".into()).into(),
            );
        };

        let mut boundary = Vec::with_capacity(next.len());
        let mut current = start;
        loop {
            let Some(&following) = next.get(&current) else {
                return Err(DegenerateInputError::InconsistentEnvelope(
                    "cavity horizon is not closed".into(),
                )
                .into());
            };
            boundary.push((current, following));
            current = following;
            if current == start || boundary.len() > next.len() {
                break;
            }
        }
        if current != start || boundary.len() != next.len() {
            return Err(DegenerateInputError::InconsistentEnvelope(
                "cavity horizon splits into several loops".into(),
            )
            .into());
        }
        Ok(boundary)
    }

    fn add_facet(&mut self, facet: Facet) -> Result<FacetId> {
        let edges = facet.edges();
        let id = self.facets.insert(facet);
        for edge in edges {
            if self.edges.insert(edge, id).is_some() {
                return Err(DegenerateInputError::InconsistentEnvelope(
                    "edge shared by two facets with the same orientation".into(),
                )
                .into());
            }
        }
        Ok(id)
    }

    /// Collects the lower facets, rejecting any that ended up flat or
    /// inverted.
    fn finish(self) -> Result<Vec<[usize; 3]>> {
        let mut facets = Vec::new();
        for facet in self.facets.values() {
            let Some([a, b, c]) = facet.sites() else {
                continue;
            };
            if orient_2d(&self.sites[a], &self.sites[b], &self.sites[c]) <= 0.0 {
                return Err(DegenerateInputError::InconsistentEnvelope(format!(
                    "facet ({a}, {b}, {c}) has no area"
                ))
                .into());
            }
            facets.push([a, b, c]);
        }
        Ok(facets)
    }
}

/// Index of the site maximising `key`; the first one wins ties.
fn farthest(sites: &[Point2], key: impl Fn(&Point2) -> f64) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, p) in sites.iter().enumerate() {
        let value = key(p);
        if value > best_value {
            best = i;
            best_value = value;
        }
    }
    best
}
