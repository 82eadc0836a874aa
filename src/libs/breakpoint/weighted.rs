use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Simple undirected graph over the extremities of one component; each edge
/// carries the summed oracle contributions of its two endpoints.
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    pub graph: UnGraph<i64, f64>,
    index: HashMap<i64, NodeIndex>,
}

impl WeightedGraph {
    /// Nodes are added in the given order
    pub fn new(nodes: &[i64]) -> Self {
        let mut graph = UnGraph::with_capacity(nodes.len(), nodes.len());
        let mut index = HashMap::with_capacity(nodes.len());
        for &node in nodes {
            index.insert(node, graph.add_node(node));
        }
        Self { graph, index }
    }

    /// Add `weight` to the edge `u -- v`, creating it at zero if needed.
    /// Unknown nodes are ignored.
    pub fn update_edge(&mut self, u: i64, v: i64, weight: f64) {
        let (Some(&a), Some(&b)) = (self.index.get(&u), self.index.get(&v)) else {
            return;
        };
        if let Some(edge_idx) = self.graph.find_edge(a, b) {
            self.graph[edge_idx] += weight;
        } else {
            self.graph.add_edge(a, b, weight);
        }
    }

    pub fn weight(&self, u: i64, v: i64) -> Option<f64> {
        let a = *self.index.get(&u)?;
        let b = *self.index.get(&v)?;
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> Vec<i64> {
        self.graph.node_weights().copied().collect()
    }

    /// `(u, v, weight)` with `u < v`, sorted by `(u, v)`
    pub fn edges(&self) -> Vec<(i64, i64, f64)> {
        let mut edges: Vec<(i64, i64, f64)> = self
            .graph
            .raw_edges()
            .iter()
            .map(|e| {
                let u = self.graph[e.source()];
                let v = self.graph[e.target()];
                (u.min(v), u.max(v), e.weight)
            })
            .collect();
        edges.sort_by_key(|&(u, v, _)| (u, v));
        edges
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::from("graph {\n");
        for node in self.nodes() {
            dot.push_str(&format!("    \"{:+}\";\n", node));
        }
        for (u, v, w) in self.edges() {
            dot.push_str(&format!(
                "    \"{:+}\" -- \"{:+}\" [label=\"{:7.4}\"];\n",
                u, v, w
            ));
        }
        dot.push_str("}\n");
        dot
    }
}
