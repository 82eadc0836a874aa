use super::matching::max_weight_matching;
use super::{
    Adjacencies, AdjacencyScorer, AdjacencyStates, BreakpointError, BreakpointGraph, DebugSink,
    WeightedGraph,
};
use rayon::prelude::*;
use std::collections::HashMap;

/// Costs are matched as fixed-point integers with this many steps per unit.
///
/// Costs closer than `0.5 / WEIGHT_SCALE` round to the same integer and tie.
/// Costs beyond `MAX_FIXED / WEIGHT_SCALE` (1e9) in magnitude saturate and
/// tie as well.
pub const WEIGHT_SCALE: f64 = 1e6;
const MAX_FIXED: f64 = 1e15;

/// Chooses the adjacencies of the target genome, one connected component of the
/// breakpoint graph at a time.
///
/// ```
/// use ragr::libs::breakpoint::{AdjacencyInferer, BreakpointGraph};
/// use ragr::libs::phylo::Phylogeny;
/// use ragr::libs::synteny::{Permutation, PermutationContainer, Recipe};
///
/// let perms = vec![
///     Permutation::from_signed("A", "chr1", &[1, 2, 3]),
///     Permutation::from_signed("B", "chr1", &[1, 2, 3]),
///     Permutation::from_signed("T", "ctg1", &[1, 2]),
///     Permutation::from_signed("T", "ctg2", &[3]),
/// ];
/// let container = PermutationContainer::new(perms, &Recipe::new("T")).unwrap();
/// let graph = BreakpointGraph::build_from(&container, false);
/// let phylogeny = Phylogeny::from_newick("((A:0.1,B:0.1):0.1,T:0.2);").unwrap();
///
/// let adjacencies = AdjacencyInferer::new(&graph, &phylogeny)
///     .infer_adjacencies()
///     .unwrap();
/// assert_eq!(adjacencies.partner(-2), Some(3));
/// ```
pub struct AdjacencyInferer<'a, S: AdjacencyScorer + ?Sized> {
    graph: &'a BreakpointGraph,
    scorer: &'a S,
    debug: Option<&'a DebugSink>,
    parallel: bool,
}

impl<'a, S: AdjacencyScorer + ?Sized> AdjacencyInferer<'a, S> {
    pub fn new(graph: &'a BreakpointGraph, scorer: &'a S) -> Self {
        Self {
            graph,
            scorer,
            debug: None,
            parallel: false,
        }
    }

    pub fn with_debug(mut self, sink: &'a DebugSink) -> Self {
        self.debug = Some(sink);
        self
    }

    /// Resolve components on the rayon pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Infer adjacencies for every component. Fails on the first oracle error.
    pub fn infer_adjacencies(&self) -> Result<Adjacencies, BreakpointError> {
        let components = self.graph.components();
        log::info!(
            "Inferring adjacencies over {} nodes in {} components",
            self.graph.node_count(),
            components.len()
        );

        let resolved: Vec<Adjacencies> = if self.parallel {
            components
                .par_iter()
                .enumerate()
                .map(|(comp_id, nodes)| self.resolve_component(comp_id, nodes))
                .collect::<Result<_, _>>()?
        } else {
            components
                .iter()
                .enumerate()
                .map(|(comp_id, nodes)| self.resolve_component(comp_id, nodes))
                .collect::<Result<_, _>>()?
        };

        // components are disjoint
        let mut adjacencies = Adjacencies::new();
        for adj in resolved {
            adjacencies.merge(adj);
        }

        let unresolved = self.graph.node_count() - adjacencies.len();
        log::info!(
            "Inferred {} adjacencies, {} extremities unresolved",
            adjacencies.len() / 2,
            unresolved
        );
        Ok(adjacencies)
    }

    fn resolve_component(&self, comp_id: usize, nodes: &[i64]) -> Result<Adjacencies, BreakpointError> {
        let mut adjacencies = Adjacencies::new();

        match nodes.len() {
            0 | 1 => {}
            2 => adjacencies.insert_pair(nodes[0], nodes[1]),
            _ => {
                let weighted = self.make_weighted(nodes)?;
                if let Some(sink) = self.debug {
                    sink.write_component(comp_id, &self.graph.to_dot(nodes), &weighted.to_dot());
                }

                for (u, v) in match_component(&weighted) {
                    adjacencies.insert_pair(u, v);
                }
                log::debug!(
                    "Component {}: {} nodes, {} edges, {} matched",
                    comp_id,
                    nodes.len(),
                    weighted.edge_count(),
                    adjacencies.len()
                );
            }
        }

        Ok(adjacencies)
    }

    // Each node scores the hypothesis "the target links me to this neighbor"
    // for every distinct neighbor; adjacencies seen in the target cost nothing.
    fn make_weighted(&self, nodes: &[i64]) -> Result<WeightedGraph, BreakpointError> {
        let mut weighted = WeightedGraph::new(nodes);
        let references = self.graph.references();
        let target = self.graph.target();

        for &node in nodes {
            let mut states: AdjacencyStates = references
                .iter()
                .map(|genome| (genome.clone(), None))
                .collect();
            for edge in self.graph.edges(node) {
                states.insert(references[edge.genome].clone(), Some(edge.neighbor));
            }

            for neighbor in self.graph.neighbors(node) {
                if neighbor == node {
                    continue;
                }
                if self.graph.known_adjacency(node) == Some(neighbor) {
                    weighted.update_edge(node, neighbor, 0.0);
                    continue;
                }

                states.insert(target.to_string(), Some(neighbor));
                let score = self
                    .scorer
                    .score(&states)
                    .map_err(|e| BreakpointError::Oracle {
                        node,
                        neighbor,
                        message: format!("{:#}", e),
                    })?;
                if !score.is_finite() {
                    return Err(BreakpointError::Oracle {
                        node,
                        neighbor,
                        message: format!("non-finite score {}", score),
                    });
                }
                weighted.update_edge(node, neighbor, score);
            }
        }

        Ok(weighted)
    }
}

/// Minimum-cost pairs among the matchings of maximum cardinality.
/// Ties go to whatever the matcher reaches first with nodes and edges in
/// ascending order.
fn match_component(weighted: &WeightedGraph) -> Vec<(i64, i64)> {
    let mut nodes = weighted.nodes();
    nodes.sort_unstable();
    let index: HashMap<i64, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let edges: Vec<(usize, usize, i64)> = weighted
        .edges()
        .into_iter()
        .map(|(u, v, cost)| (index[&u], index[&v], -to_fixed(cost)))
        .collect();

    max_weight_matching(nodes.len(), &edges, true)
        .into_iter()
        .enumerate()
        .filter_map(|(i, mate)| mate.filter(|&j| i < j).map(|j| (nodes[i], nodes[j])))
        .collect()
}

fn to_fixed(cost: f64) -> i64 {
    let scaled = (cost * WEIGHT_SCALE).round();
    if scaled.abs() > MAX_FIXED {
        log::debug!("Cost {} saturated at {}", cost, MAX_FIXED / WEIGHT_SCALE);
    }
    scaled.clamp(-MAX_FIXED, MAX_FIXED) as i64
}
