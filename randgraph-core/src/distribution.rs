//! Probability mass functions produced by graph analysis.
//!
//! Both summaries map a non-negative integer key to the fraction of nodes it
//! accounts for. Keys are kept ordered so rendering and comparison are
//! deterministic.

use std::collections::{BTreeMap, btree_map};

macro_rules! define_fraction_map {
    (
        $(#[$meta:meta])*
        $name:ident, key = $key:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default)]
        pub struct $name {
            fractions: BTreeMap<usize, f64>,
        }

        impl $name {
            /// Builds the distribution from per-key node counts; every count is
            /// divided by `node_count`. An empty graph yields an empty map.
            pub(crate) fn from_node_counts(counts: BTreeMap<usize, usize>, node_count: usize) -> Self {
                if node_count == 0 {
                    return Self::default();
                }
                let total = node_count as f64;
                let fractions = counts
                    .into_iter()
                    .map(|(key, count)| (key, count as f64 / total))
                    .collect();
                Self { fractions }
            }

            #[doc = concat!("Returns the fraction recorded for ", $key, " `key`, if observed.")]
            #[must_use]
            pub fn get(&self, key: usize) -> Option<f64> {
                self.fractions.get(&key).copied()
            }

            #[doc = concat!("Iterates `(", $key, ", fraction)` pairs in ascending order.")]
            pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
                self.fractions.iter().map(|(&key, &fraction)| (key, fraction))
            }

            /// Number of distinct keys observed.
            #[must_use]
            pub fn len(&self) -> usize {
                self.fractions.len()
            }

            /// Returns `true` when nothing was observed.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.fractions.is_empty()
            }

            /// Sum of all fractions, one up to rounding for non-empty graphs.
            #[must_use]
            pub fn total(&self) -> f64 {
                self.fractions.values().sum()
            }

            /// Fraction-weighted mean key.
            #[must_use]
            pub fn mean(&self) -> f64 {
                self.iter().map(|(key, fraction)| key as f64 * fraction).sum()
            }

            /// Returns the underlying ordered map.
            #[must_use]
            pub fn as_map(&self) -> &BTreeMap<usize, f64> {
                &self.fractions
            }

            /// Consumes the distribution, returning the underlying ordered map.
            #[must_use]
            pub fn into_map(self) -> BTreeMap<usize, f64> {
                self.fractions
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = (&'a usize, &'a f64);
            type IntoIter = btree_map::Iter<'a, usize, f64>;

            fn into_iter(self) -> Self::IntoIter {
                self.fractions.iter()
            }
        }
    };
}

define_fraction_map! {
    /// Fraction of nodes having each observed degree.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::{Graph, NodeId};
    ///
    /// let mut graph = Graph::new(4);
    /// graph.attach(NodeId::new(0), NodeId::new(1))?;
    /// let degrees = graph.degree_distribution();
    /// assert_eq!(degrees.get(0), Some(0.5));
    /// assert_eq!(degrees.get(1), Some(0.5));
    /// # Ok::<(), randgraph_core::GraphError>(())
    /// ```
    DegreeDistribution, key = "degree"
}

define_fraction_map! {
    /// Fraction of nodes belonging to a cluster of each observed size.
    ///
    /// The mass is size-weighted: a size `s` shared by `k` clusters records
    /// `k * s / node_count`.
    ///
    /// # Examples
    /// ```
    /// use randgraph_core::{Graph, NodeId};
    ///
    /// let mut graph = Graph::new(4);
    /// graph.attach(NodeId::new(0), NodeId::new(1))?;
    /// let clusters = graph.cluster_sizes();
    /// assert_eq!(clusters.get(2), Some(0.5));
    /// assert_eq!(clusters.get(1), Some(0.5));
    /// assert_eq!(clusters.largest(), Some(2));
    /// # Ok::<(), randgraph_core::GraphError>(())
    /// ```
    ClusterSizeDistribution, key = "cluster size"
}

impl ClusterSizeDistribution {
    /// Size of the largest observed cluster.
    #[must_use]
    pub fn largest(&self) -> Option<usize> {
        self.fractions.keys().next_back().copied()
    }
}
