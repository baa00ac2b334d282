//! Groups images into clusters using transitive relationships.
//!
//! If A matches B and B matches C, then {A, B, C} forms a single group
//! even if A doesn't directly match C.

use super::{AdjacencyMap, DuplicateGroup, MatchType, SourceRecord};
use std::collections::HashMap;

/// Groups images into duplicate clusters using transitive relationships
pub struct TransitiveGrouper;

impl TransitiveGrouper {
    /// Create a new transitive grouper
    pub fn new() -> Self {
        Self
    }

    /// Collapse the adjacency into disjoint clusters.
    ///
    /// Uses union-find over the recorded edges. Clusters come out ordered by
    /// their lowest index, members ascending; images without edges are never
    /// reported.
    pub fn group(
        &self,
        adjacency: AdjacencyMap,
        records: &[SourceRecord],
    ) -> Vec<DuplicateGroup> {
        let mut sets = DisjointSet::new(adjacency.len());
        for i in 0..adjacency.len() {
            for (j, _) in adjacency.neighbours(i).filter(|&(j, _)| j > i) {
                sets.union(i, j);
            }
        }

        let mut slot_by_root: HashMap<usize, usize> = HashMap::new();
        let mut members: Vec<Vec<usize>> = Vec::new();
        for i in (0..adjacency.len()).filter(|&i| adjacency.has_edges(i)) {
            let root = sets.find(i);
            let slot = *slot_by_root.entry(root).or_insert_with(|| {
                members.push(Vec::new());
                members.len() - 1
            });
            members[slot].push(i);
        }

        members
            .into_iter()
            .map(|indices| build_group(indices, &adjacency, records))
            .collect()
    }
}

impl Default for TransitiveGrouper {
    fn default() -> Self {
        Self::new()
    }
}

fn build_group(
    indices: Vec<usize>,
    adjacency: &AdjacencyMap,
    records: &[SourceRecord],
) -> DuplicateGroup {
    // Every edge of a member stays inside the group
    let mut distances: Vec<u32> = Vec::new();
    for &i in &indices {
        distances.extend(adjacency.neighbours(i).filter(|&(j, _)| j > i).map(|(_, d)| d));
    }

    let closest_distance = distances.iter().copied().min().unwrap_or(0);
    let average_distance = if distances.is_empty() {
        0.0
    } else {
        distances.iter().map(|&d| f64::from(d)).sum::<f64>() / distances.len() as f64
    };

    DuplicateGroup {
        photos: indices.iter().map(|&i| records[i].path.clone()).collect(),
        indices,
        match_type: MatchType::from_distance(closest_distance),
        closest_distance,
        average_distance,
    }
}

/// Union-find with path compression and union by rank
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::MatchResult;
    use crate::core::fingerprint::Fingerprint;
    use std::path::PathBuf;

    fn records(n: usize) -> Vec<SourceRecord> {
        (0..n)
            .map(|i| {
                SourceRecord::new(PathBuf::from(format!("/{}.jpg", i)), Fingerprint::default())
            })
            .collect()
    }

    fn group_pairs(n: usize, pairs: &[(usize, usize, u32)]) -> Vec<DuplicateGroup> {
        let pairs: Vec<MatchResult> = pairs
            .iter()
            .map(|&(a, b, distance)| MatchResult { a, b, distance })
            .collect();
        let adjacency = AdjacencyMap::from_pairs(n, &pairs);
        TransitiveGrouper::new().group(adjacency, &records(n))
    }

    #[test]
    fn no_edges_returns_empty() {
        assert!(group_pairs(4, &[]).is_empty());
    }

    #[test]
    fn single_pair_creates_single_group() {
        let groups = group_pairs(3, &[(0, 2, 4)]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].indices, vec![0, 2]);
        assert_eq!(
            groups[0].photos,
            vec![PathBuf::from("/0.jpg"), PathBuf::from("/2.jpg")]
        );
    }

    #[test]
    fn transitive_grouping() {
        let groups = group_pairs(4, &[(0, 1, 10), (1, 2, 12)]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].indices, vec![0, 1, 2]);
        assert_eq!(groups[0].closest_distance, 10);
        assert_eq!(groups[0].average_distance, 11.0);
    }

    #[test]
    fn disjoint_pairs_create_separate_groups_in_index_order() {
        let groups = group_pairs(6, &[(3, 5, 0), (0, 4, 0), (1, 2, 0)]);

        let indices: Vec<Vec<usize>> = groups.iter().map(|g| g.indices.clone()).collect();
        assert_eq!(indices, vec![vec![0, 4], vec![1, 2], vec![3, 5]]);
    }

    #[test]
    fn long_chain_collapses_to_one_group() {
        let chain: Vec<(usize, usize, u32)> = (0..9).rev().map(|i| (i, i + 1, 1)).collect();
        let groups = group_pairs(10, &chain);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn groups_are_disjoint_and_at_least_pairs() {
        let groups = group_pairs(8, &[(0, 7, 3), (2, 3, 1), (3, 6, 2), (6, 2, 2), (7, 1, 5)]);

        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            assert!(group.len() >= 2);
            for &i in &group.indices {
                assert!(seen.insert(i), "index {} reported twice", i);
            }
        }
        assert!(!seen.contains(&4));
        assert!(!seen.contains(&5));
    }

    #[test]
    fn match_type_follows_closest_edge() {
        let groups = group_pairs(3, &[(0, 1, 0), (1, 2, 20)]);
        assert_eq!(groups[0].match_type, MatchType::Exact);
    }

    #[test]
    fn disjoint_set_unions_transitively() {
        let mut sets = DisjointSet::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);

        let root = sets.find(0);
        assert_eq!(sets.find(3), root);
        assert_ne!(sets.find(2), root);
    }
}
