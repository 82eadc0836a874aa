use super::error::TreeError;
use super::tree::Tree;
use crate::libs::breakpoint::{AdjacencyScorer, AdjacencyStates};
use std::collections::{BTreeSet, HashSet};

/// Branches shorter than this are clamped
pub const MIN_BRANCH_LENGTH: f64 = 1e-6;
/// Used for branches without a length
pub const DEFAULT_BRANCH_LENGTH: f64 = 1.0;

/// A rooted phylogeny of the target and reference genomes, used to score
/// per-genome adjacency states with weighted parsimony.
#[derive(Debug, Clone)]
pub struct Phylogeny {
    tree: Tree,
    /// Cost scale; a state change along a branch of length `l` costs `mu / l`
    mu: f64,
}

impl Phylogeny {
    /// Wrap a tree. Every leaf must be named, and names must be unique.
    pub fn new(tree: Tree) -> Result<Self, TreeError> {
        if tree.get_root().is_none() {
            return Err(TreeError::LogicError("empty phylogeny".to_string()));
        }

        let mut seen = HashSet::new();
        for id in tree.get_leaves() {
            match tree.get_node(id).and_then(|n| n.name.as_deref()) {
                None => return Err(TreeError::LogicError("unnamed leaf".to_string())),
                Some(name) => {
                    if !seen.insert(name.to_string()) {
                        return Err(TreeError::LogicError(format!(
                            "duplicated leaf \"{}\"",
                            name
                        )));
                    }
                }
            }
        }

        let mu = median(
            tree.branch_lengths()
                .into_iter()
                .map(|l| l.max(MIN_BRANCH_LENGTH))
                .collect(),
        )
        .unwrap_or(DEFAULT_BRANCH_LENGTH);

        Ok(Self { tree, mu })
    }

    /// ```
    /// use ragr::libs::phylo::Phylogeny;
    ///
    /// let phylogeny = Phylogeny::from_newick("((ref1:0.1,ref2:0.1):0.1,tgt:0.2);").unwrap();
    /// assert_eq!(phylogeny.leaf_names(), vec!["ref1", "ref2", "tgt"]);
    /// assert!((phylogeny.mu() - 0.1).abs() < 1e-12);
    /// ```
    pub fn from_newick(newick: &str) -> Result<Self, TreeError> {
        Self::new(Tree::from_newick(newick)?)
    }

    pub fn from_file(infile: &str) -> anyhow::Result<Self> {
        let tree = Tree::from_file(infile)?;
        Ok(Self::new(tree)?)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn leaf_names(&self) -> Vec<String> {
        self.tree.leaf_names()
    }

    /// Check that the leaves are exactly `genomes`.
    pub fn check_genomes(&self, genomes: &[String]) -> Result<(), TreeError> {
        let leaves: BTreeSet<String> = self.leaf_names().into_iter().collect();
        for genome in genomes {
            if !leaves.contains(genome) {
                return Err(TreeError::UnknownGenome(genome.clone()));
            }
        }
        for leaf in &leaves {
            if !genomes.contains(leaf) {
                return Err(TreeError::UnusedLeaf(leaf.clone()));
            }
        }
        Ok(())
    }

    /// Minimum weighted-parsimony cost of the tree given the leaf states (Sankoff).
    ///
    /// Every leaf needs an entry in `states`; entries for other genomes are ignored.
    pub fn estimate(&self, states: &AdjacencyStates) -> Result<f64, TreeError> {
        let root = self
            .tree
            .get_root()
            .ok_or_else(|| TreeError::LogicError("empty phylogeny".to_string()))?;

        let alphabet: Vec<Option<i64>> = states
            .values()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut costs: Vec<Vec<f64>> = vec![Vec::new(); self.tree.len()];
        for id in self.tree.postorder(root) {
            let node = match self.tree.get_node(id) {
                Some(node) => node,
                None => continue,
            };

            if node.is_leaf() {
                let name = node.name.as_deref().unwrap_or_default();
                let observed = states
                    .get(name)
                    .ok_or_else(|| TreeError::MissingState(name.to_string()))?;
                costs[id] = alphabet
                    .iter()
                    .map(|s| if s == observed { 0.0 } else { f64::INFINITY })
                    .collect();
                continue;
            }

            let mut own = vec![0.0; alphabet.len()];
            for &child in &node.children {
                let length = self.tree.get_node(child).and_then(|c| c.length);
                let change = self.change_cost(length);
                for (i, cost) in own.iter_mut().enumerate() {
                    *cost += costs[child]
                        .iter()
                        .enumerate()
                        .map(|(j, c)| if i == j { *c } else { c + change })
                        .fold(f64::INFINITY, f64::min);
                }
            }
            costs[id] = own;
        }

        Ok(costs[root].iter().copied().fold(f64::INFINITY, f64::min))
    }

    fn change_cost(&self, length: Option<f64>) -> f64 {
        let length = length.unwrap_or(DEFAULT_BRANCH_LENGTH).max(MIN_BRANCH_LENGTH);
        self.mu / length
    }
}

impl AdjacencyScorer for Phylogeny {
    fn score(&self, states: &AdjacencyStates) -> anyhow::Result<f64> {
        Ok(self.estimate(states)?)
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}
