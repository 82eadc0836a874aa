pub mod block;
pub mod container;
pub mod error;
pub mod format;
pub mod permutation;

pub use block::Block;
pub use container::{filter_permutation, find_duplications, PermutationContainer, Recipe};
pub use error::PermError;
pub use permutation::Permutation;
