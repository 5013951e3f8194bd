//! Colored-graph inputs for the scheduler.
//!
//! The scheduler does not own a graph representation. All it needs from the
//! outside world is a vertex count and a per-vertex color, and
//! [`ColoredGraph`] is that seam: a bare slice of colors implements it, and
//! [`ColoredAdjacencyGraph`] bundles an adjacency list with its coloring
//! for callers that also want to sanity-check properness.
//!
//! Producing the coloring is the caller's problem. The scheduler assumes it
//! is proper and never re-validates adjacency.

/// A graph whose vertices carry a precomputed coloring.
///
/// Vertex identifiers are `0..vertex_count()`. The coloring must be proper
/// (no two adjacent vertices share a color); the scheduler relies on this
/// without checking it, since it never looks at edges.
pub trait ColoredGraph {
    /// Number of vertices in the graph.
    fn vertex_count(&self) -> usize;

    /// The color of `vertex`, a small non-negative integer.
    ///
    /// Colors need not be contiguous; gaps simply produce empty buckets in
    /// the partition.
    fn color(&self, vertex: usize) -> usize;
}

/// A color slice is the minimal colored graph: vertex `i` has color
/// `colors[i]` and the edges are left implicit.
impl ColoredGraph for [usize] {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn color(&self, vertex: usize) -> usize {
        self[vertex]
    }
}

impl ColoredGraph for Vec<usize> {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn color(&self, vertex: usize) -> usize {
        self[vertex]
    }
}

/// An adjacency-list graph with a per-vertex coloring.
///
/// The scheduler itself only consumes the [`ColoredGraph`] view; the
/// adjacency lists exist so callers (and tests) can check the coloring
/// against the edges via [`is_properly_colored`](Self::is_properly_colored).
#[derive(Debug, Clone)]
pub struct ColoredAdjacencyGraph {
    adjacency: Vec<Vec<usize>>,
    colors: Vec<usize>,
}

impl ColoredAdjacencyGraph {
    /// Creates a graph from adjacency lists and a coloring.
    ///
    /// # Panics
    /// Panics if `colors.len() != adjacency.len()` or any neighbor index is
    /// out of bounds.
    pub fn new(adjacency: Vec<Vec<usize>>, colors: Vec<usize>) -> Self {
        let n = adjacency.len();
        assert_eq!(
            colors.len(),
            n,
            "coloring covers {} vertices but the graph has {n}",
            colors.len()
        );
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                assert!(v < n, "edge {u}->{v} out of bounds for n={n}");
            }
        }
        Self { adjacency, colors }
    }

    /// Neighbors of `vertex`.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    /// The coloring, indexed by vertex id.
    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Checks that no edge joins two vertices of the same color.
    ///
    /// The scheduler never calls this; it is an opt-in check for callers
    /// that do not trust their coloring source. Self-loops are ignored.
    pub fn is_properly_colored(&self) -> bool {
        self.adjacency.iter().enumerate().all(|(u, nbrs)| {
            nbrs
                .iter()
                .all(|&v| u == v || self.colors[u] != self.colors[v])
        })
    }
}

impl ColoredGraph for ColoredAdjacencyGraph {
    fn vertex_count(&self) -> usize {
        self.colors.len()
    }

    fn color(&self, vertex: usize) -> usize {
        self.colors[vertex]
    }
}
