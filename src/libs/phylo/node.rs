/// NodeId is an index into the Tree's node vector.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for the node (index in the arena)
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// List of child node IDs
    pub children: Vec<NodeId>,

    /// Node label; leaves carry genome names
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
