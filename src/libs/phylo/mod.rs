pub mod error;
pub mod node;
pub mod parser;
pub mod scorer;
pub mod tree;

pub use error::TreeError;
pub use node::{Node, NodeId};
pub use scorer::Phylogeny;
pub use tree::Tree;
