//! Adjacency between images whose fingerprints are within the threshold.

use super::MatchResult;
use std::collections::BTreeMap;

/// For each image index, the neighbouring indices and their distances.
///
/// Edges are undirected: a match between `a` and `b` is recorded from both
/// sides. Neighbours iterate in ascending index order.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    neighbours: Vec<BTreeMap<usize, u32>>,
}

impl AdjacencyMap {
    /// Build the map for `len` images from a list of matching pairs
    pub fn from_pairs(len: usize, pairs: &[MatchResult]) -> Self {
        let mut neighbours = vec![BTreeMap::new(); len];
        for pair in pairs {
            neighbours[pair.a].insert(pair.b, pair.distance);
            neighbours[pair.b].insert(pair.a, pair.distance);
        }
        Self { neighbours }
    }

    /// Number of images covered, with or without edges
    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether the map covers no images at all
    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }

    /// Whether `index` matched at least one other image
    pub fn has_edges(&self, index: usize) -> bool {
        self.neighbours
            .get(index)
            .map(|n| !n.is_empty())
            .unwrap_or(false)
    }

    /// Neighbours of `index` with their distances, ascending by index
    pub fn neighbours(&self, index: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.neighbours
            .get(index)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&j, &d)| (j, d)))
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.neighbours.iter().map(|n| n.len()).sum::<usize>() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: usize, b: usize, distance: u32) -> MatchResult {
        MatchResult { a, b, distance }
    }

    #[test]
    fn edges_are_recorded_both_ways() {
        let map = AdjacencyMap::from_pairs(3, &[pair(0, 2, 5)]);

        assert_eq!(map.neighbours(0).collect::<Vec<_>>(), vec![(2, 5)]);
        assert_eq!(map.neighbours(2).collect::<Vec<_>>(), vec![(0, 5)]);
        assert!(!map.has_edges(1));
        assert_eq!(map.edge_count(), 1);
    }

    #[test]
    fn neighbours_are_ascending() {
        let map = AdjacencyMap::from_pairs(5, &[pair(2, 4, 1), pair(0, 2, 1), pair(2, 3, 1)]);
        let order: Vec<usize> = map.neighbours(2).map(|(j, _)| j).collect();
        assert_eq!(order, vec![0, 3, 4]);
    }

    #[test]
    fn out_of_range_index_has_no_edges() {
        let map = AdjacencyMap::from_pairs(2, &[pair(0, 1, 0)]);
        assert!(!map.has_edges(7));
        assert_eq!(map.neighbours(7).count(), 0);
    }

    #[test]
    fn empty_map() {
        let map = AdjacencyMap::from_pairs(0, &[]);
        assert!(map.is_empty());
        assert_eq!(map.edge_count(), 0);
    }
}
