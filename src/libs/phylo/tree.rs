use super::error::TreeError;
use super::node::{Node, NodeId};

/// Arena-based rooted tree.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single Newick tree.
    ///
    /// ```
    /// use ragr::libs::phylo::Tree;
    ///
    /// let tree = Tree::from_newick("((A:0.1,B:0.2)AB:0.3,C:0.4);").unwrap();
    /// assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    /// assert_eq!(tree.to_newick(), "((A:0.1,B:0.2)AB:0.3,C:0.4);");
    /// ```
    pub fn from_newick(newick: &str) -> Result<Tree, TreeError> {
        super::parser::parse_newick(newick)
    }

    /// Read a Newick tree from a file (or "stdin").
    pub fn from_file(infile: &str) -> anyhow::Result<Tree> {
        let newick = crate::libs::io::read_to_string(infile)?;
        Ok(Tree::from_newick(newick.as_str())?)
    }

    /// Add a new node to the tree. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Attach `child_id` under `parent_id`.
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        if parent_id == child_id {
            return Err(TreeError::LogicError(format!(
                "Node {} can't be its own child",
                parent_id
            )));
        }
        if self.get_node(parent_id).is_none() {
            return Err(TreeError::LogicError(format!(
                "Parent node {} not found",
                parent_id
            )));
        }
        match self.get_node(child_id) {
            None => {
                return Err(TreeError::LogicError(format!(
                    "Child node {} not found",
                    child_id
                )))
            }
            Some(child) if child.parent.is_some() => {
                return Err(TreeError::LogicError(format!(
                    "Node {} already has a parent",
                    child_id
                )))
            }
            _ => {}
        }

        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Node IDs in postorder (children before parents), starting from `start_node`
    pub fn postorder(&self, start_node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![(start_node, false)];

        while let Some((id, expanded)) = stack.pop() {
            let Some(node) = self.get_node(id) else {
                continue;
            };
            if expanded {
                result.push(id);
            } else {
                stack.push((id, true));
                for &child in node.children.iter().rev() {
                    stack.push((child, false));
                }
            }
        }

        result
    }

    /// Leaves below the root, left to right
    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => self
                .postorder(root)
                .into_iter()
                .filter(|&id| self.nodes[id].is_leaf())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Names of the leaves; unnamed leaves are skipped
    pub fn leaf_names(&self) -> Vec<String> {
        self.get_leaves()
            .into_iter()
            .filter_map(|id| self.nodes[id].name.clone())
            .collect()
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|n| n.name.as_deref() == Some(name))
            .map(|n| n.id)
    }

    /// Branch lengths of every non-root node that carries one
    pub fn branch_lengths(&self) -> Vec<f64> {
        match self.root {
            Some(root) => self
                .postorder(root)
                .into_iter()
                .filter(|&id| id != root)
                .filter_map(|id| self.nodes[id].length)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Serialize tree to a single-line Newick string.
    pub fn to_newick(&self) -> String {
        match self.root {
            Some(root) => {
                let mut s = String::new();
                self.write_newick(root, &mut s);
                s.push(';');
                s
            }
            None => ";".to_string(),
        }
    }

    fn write_newick(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id];
        if !node.children.is_empty() {
            out.push('(');
            for (i, &child) in node.children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                self.write_newick(child, out);
            }
            out.push(')');
        }
        if let Some(name) = &node.name {
            if name.contains(|c: char| "():;,[] ".contains(c)) {
                out.push_str(&format!("'{}'", name.replace('\'', "''")));
            } else {
                out.push_str(name);
            }
        }
        if let Some(length) = node.length {
            out.push_str(&format!(":{}", length));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_basic_ops() {
        let mut tree = Tree::new();
        //    0
        //   / \
        //  1   2
        // / \
        //3   4
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();
        let n3 = tree.add_node();
        let n4 = tree.add_node();
        tree.set_root(n0);

        assert_eq!(tree.add_child(n0, n1), Ok(()));
        assert_eq!(tree.add_child(n0, n2), Ok(()));
        assert_eq!(tree.add_child(n1, n3), Ok(()));
        assert_eq!(tree.add_child(n1, n4), Ok(()));
        assert_eq!(
            tree.add_child(n2, n3),
            Err(TreeError::LogicError(format!(
                "Node {} already has a parent",
                n3
            )))
        );
        assert!(matches!(
            tree.add_child(n2, n2),
            Err(TreeError::LogicError(_))
        ));
        assert!(matches!(
            tree.add_child(n0, 99),
            Err(TreeError::LogicError(_))
        ));

        assert_eq!(tree.len(), 5);
        assert_eq!(tree.postorder(n0), vec![n3, n4, n1, n2, n0]);
        assert_eq!(tree.get_leaves(), vec![n3, n4, n2]);
        assert_eq!(tree.get_node(n3).unwrap().parent, Some(n1));
    }

    #[test]
    fn test_names_and_lengths() {
        let tree = Tree::from_newick("((A:0.1,B:0.2):0.05,'C d':0.3)root;").unwrap();
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C d"]);
        assert_eq!(tree.branch_lengths(), vec![0.1, 0.2, 0.05, 0.3]);

        let root = tree.get_root().unwrap();
        assert_eq!(tree.get_node_by_name("root"), Some(root));
        assert_eq!(tree.to_newick(), "((A:0.1,B:0.2):0.05,'C d':0.3)root;");
    }

    #[test]
    fn test_empty_tree() {
        let tree = Tree::new();
        assert!(tree.is_empty());
        assert!(tree.get_leaves().is_empty());
        assert_eq!(tree.to_newick(), ";");
    }
}
