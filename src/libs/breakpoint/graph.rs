use crate::libs::synteny::{Permutation, PermutationContainer};
use indexmap::IndexSet;
use petgraph::unionfind::UnionFind;
use std::collections::{BTreeMap, HashMap};

/// One side of a multigraph edge, stored at each endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub neighbor: i64,
    /// Index into `BreakpointGraph::references()`
    pub genome: usize,
}

/// Undirected multigraph on signed block extremities, one edge per reference
/// genome supporting an adjacency, plus the adjacencies observed in the target.
#[derive(Debug, Default, Clone)]
pub struct BreakpointGraph {
    adjacency: BTreeMap<i64, Vec<GraphEdge>>,
    edge_count: usize,
    references: Vec<String>,
    target: String,
    known_adjacencies: HashMap<i64, i64>,
}

impl BreakpointGraph {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Default::default()
        }
    }

    /// Build the graph from the filtered permutations of `container`.
    /// `circular` applies to reference chromosomes only.
    ///
    /// Every reference genome is registered, even one left without blocks.
    pub fn build_from(container: &PermutationContainer, circular: bool) -> Self {
        let mut graph = Self::new(container.target());
        for genome in container.reference_genomes() {
            graph.add_genome(&genome);
        }
        for perm in &container.ref_perms_filtered {
            graph.add_reference(perm, circular);
        }
        for perm in &container.target_perms_filtered {
            graph.add_target(perm);
        }

        log::debug!(
            "Breakpoint graph: {} nodes, {} edges, {} references, {} known adjacencies",
            graph.node_count(),
            graph.edge_count(),
            graph.references.len(),
            graph.known_adjacencies.len() / 2
        );
        graph
    }

    /// Register a reference genome and return its index into `references()`.
    pub fn add_genome(&mut self, name: &str) -> usize {
        match self.references.iter().position(|g| g == name) {
            Some(idx) => idx,
            None => {
                self.references.push(name.to_string());
                self.references.len() - 1
            }
        }
    }

    /// Link `-left` and `right` for every consecutive pair of the permutation.
    pub fn add_reference(&mut self, perm: &Permutation, circular: bool) {
        let genome = self.add_genome(&perm.genome_name);

        for (left, right) in perm.pairs(circular) {
            self.add_edge(-left.signed_id(), right.signed_id(), genome);
        }
    }

    /// Record the adjacencies of a target permutation. Adds no edges.
    pub fn add_target(&mut self, perm: &Permutation) {
        for (left, right) in perm.pairs(false) {
            self.known_adjacencies
                .insert(-left.signed_id(), right.signed_id());
            self.known_adjacencies
                .insert(right.signed_id(), -left.signed_id());
        }
    }

    fn add_edge(&mut self, u: i64, v: i64, genome: usize) {
        self.adjacency
            .entry(u)
            .or_default()
            .push(GraphEdge { neighbor: v, genome });
        if u != v {
            self.adjacency
                .entry(v)
                .or_default()
                .push(GraphEdge { neighbor: u, genome });
        }
        self.edge_count += 1;
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Nodes in ascending order
    pub fn nodes(&self) -> impl Iterator<Item = i64> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn contains_node(&self, node: i64) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Edges incident to `node`, parallel edges included
    pub fn edges(&self, node: i64) -> &[GraphEdge] {
        self.adjacency
            .get(&node)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Distinct neighbors of `node` in insertion order
    pub fn neighbors(&self, node: i64) -> Vec<i64> {
        self.edges(node)
            .iter()
            .map(|e| e.neighbor)
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn references(&self) -> &[String] {
        &self.references
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// The extremity next to `node` in the target genome, if any
    pub fn known_adjacency(&self, node: i64) -> Option<i64> {
        self.known_adjacencies.get(&node).copied()
    }

    /// Connected components, each sorted ascending, ordered by their smallest node.
    pub fn components(&self) -> Vec<Vec<i64>> {
        let nodes: Vec<i64> = self.nodes().collect();
        let index: HashMap<i64, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

        let mut uf = UnionFind::<usize>::new(nodes.len());
        for (node, edges) in &self.adjacency {
            for edge in edges {
                uf.union(index[node], index[&edge.neighbor]);
            }
        }
        let labels = uf.into_labeling();

        let mut groups: HashMap<usize, Vec<i64>> = HashMap::new();
        for (i, &node) in nodes.iter().enumerate() {
            groups.entry(labels[i]).or_default().push(node);
        }

        let mut components: Vec<Vec<i64>> = groups.into_values().collect();
        components.sort_by_key(|c| c[0]);
        components
    }

    /// Graphviz rendering of the subgraph induced by `nodes`, one line per multigraph edge.
    pub fn to_dot(&self, nodes: &[i64]) -> String {
        let mut dot = String::from("graph {\n");
        for &node in nodes {
            dot.push_str(&format!("    \"{:+}\";\n", node));
        }
        for &node in nodes {
            for edge in self.edges(node) {
                if node > edge.neighbor || !nodes.contains(&edge.neighbor) {
                    continue;
                }
                dot.push_str(&format!(
                    "    \"{:+}\" -- \"{:+}\" [label=\"{}\"];\n",
                    node, edge.neighbor, self.references[edge.genome]
                ));
            }
        }
        dot.push_str("}\n");
        dot
    }
}
