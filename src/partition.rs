//! The color partition: per-color vertex buckets the scheduler sweeps.

use crate::graph::ColoredGraph;

/// Immutable mapping from color index to the vertices of that color.
///
/// Built in a single pass over the vertices, so every bucket keeps
/// ascending vertex-id order. Every vertex appears in exactly one bucket,
/// at the color its graph reports; colors no vertex uses yield empty
/// buckets (the bucket list is sized to the largest color seen plus one).
///
/// The partition is read-only after construction and needs no
/// synchronization while workers poll.
#[derive(Debug, Clone, Default)]
pub struct ColorPartition {
    buckets: Vec<Vec<usize>>,
    vertex_count: usize,
}

impl ColorPartition {
    /// Builds the partition from a colored graph.
    pub fn from_graph<G: ColoredGraph + ?Sized>(graph: &G) -> Self {
        let n = graph.vertex_count();
        let mut buckets: Vec<Vec<usize>> = Vec::new();
        for v in 0..n {
            let color = graph.color(v);
            if color >= buckets.len() {
                buckets.resize_with(color + 1, Vec::new);
            }
            buckets[color].push(v);
        }
        Self {
            buckets,
            vertex_count: n,
        }
    }

    /// Builds the partition on the rayon thread pool.
    ///
    /// Produces exactly the same partition as [`from_graph`](Self::from_graph):
    /// the fold runs over contiguous vertex ranges and the reduce merges
    /// them in iterator order, so per-bucket vertex order is preserved.
    #[cfg(feature = "parallel")]
    pub fn from_graph_par<G: ColoredGraph + Sync + ?Sized>(graph: &G) -> Self {
        use rayon::prelude::*;

        let n = graph.vertex_count();
        let buckets = (0..n)
            .into_par_iter()
            .fold(Vec::<Vec<usize>>::new, |mut acc, v| {
                let color = graph.color(v);
                if color >= acc.len() {
                    acc.resize_with(color + 1, Vec::new);
                }
                acc[color].push(v);
                acc
            })
            .reduce(Vec::new, |mut left, right| {
                if right.len() > left.len() {
                    left.resize_with(right.len(), Vec::new);
                }
                for (color, mut vertices) in right.into_iter().enumerate() {
                    left[color].append(&mut vertices);
                }
                left
            });
        Self {
            buckets,
            vertex_count: n,
        }
    }

    /// Number of color buckets (the largest color seen plus one).
    pub fn color_count(&self) -> usize {
        self.buckets.len()
    }

    /// The vertices of `color`, in ascending vertex-id order.
    ///
    /// # Panics
    /// Panics if `color >= color_count()`.
    pub fn bucket(&self, color: usize) -> &[usize] {
        &self.buckets[color]
    }

    /// Total number of vertices across all buckets.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// True when the partition holds no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_lands_in_its_color_bucket() {
        let colors = vec![2usize, 0, 1, 0, 2, 2];
        let partition = ColorPartition::from_graph(&colors[..]);

        assert_eq!(partition.color_count(), 3);
        assert_eq!(partition.vertex_count(), 6);
        assert_eq!(partition.bucket(0), &[1, 3]);
        assert_eq!(partition.bucket(1), &[2]);
        assert_eq!(partition.bucket(2), &[0, 4, 5]);

        // Each vertex appears exactly once, at its reported color.
        for (v, &c) in colors.iter().enumerate() {
            let occurrences: usize = (0..partition.color_count())
                .map(|color| {
                    partition.bucket(color).iter().filter(|&&x| x == v).count()
                })
                .sum();
            assert_eq!(occurrences, 1, "vertex {v} appears {occurrences} times");
            assert!(partition.bucket(c).contains(&v));
        }
    }

    #[test]
    fn sparse_colors_produce_empty_buckets() {
        let colors = vec![0usize, 4];
        let partition = ColorPartition::from_graph(&colors[..]);

        assert_eq!(partition.color_count(), 5);
        assert_eq!(partition.bucket(0), &[0]);
        assert!(partition.bucket(1).is_empty());
        assert!(partition.bucket(2).is_empty());
        assert!(partition.bucket(3).is_empty());
        assert_eq!(partition.bucket(4), &[1]);
    }

    #[test]
    fn empty_graph_yields_no_buckets() {
        let colors: [usize; 0] = [];
        let partition = ColorPartition::from_graph(&colors[..]);
        assert_eq!(partition.color_count(), 0);
        assert!(partition.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_build_matches_sequential() {
        let colors: Vec<usize> = (0..10_000).map(|v| (v * 7 + v / 13) % 23).collect();
        let seq = ColorPartition::from_graph(&colors[..]);
        let par = ColorPartition::from_graph_par(&colors[..]);

        assert_eq!(seq.color_count(), par.color_count());
        for color in 0..seq.color_count() {
            assert_eq!(seq.bucket(color), par.bucket(color));
        }
    }
}
