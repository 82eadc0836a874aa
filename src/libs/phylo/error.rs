use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Error during parsing (e.g., syntax error)
    ParseError {
        /// A human-readable message explaining the error
        message: String,
        /// The line number (1-based)
        line: usize,
        /// The column number (1-based)
        column: usize,
        /// The snippet of input where the error occurred
        snippet: String,
    },
    /// A leaf whose genome has no entry in an adjacency state table
    MissingState(String),
    /// A genome that is not a leaf of the tree
    UnknownGenome(String),
    /// A leaf naming none of the genomes in use
    UnusedLeaf(String),
    /// Logical error (e.g., unnamed leaf, empty tree)
    LogicError(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParseError {
                message,
                line,
                column,
                snippet,
            } => {
                write!(
                    f,
                    "Parse error at line {}, column {}:\n{}\nSnippet: \"{}\"",
                    line, column, message, snippet
                )
            }
            TreeError::MissingState(leaf) => {
                write!(f, "No adjacency state for leaf \"{}\"", leaf)
            }
            TreeError::UnknownGenome(genome) => {
                write!(f, "Genome \"{}\" is not a leaf of the phylogeny", genome)
            }
            TreeError::UnusedLeaf(leaf) => {
                write!(
                    f,
                    "Leaf \"{}\" of the phylogeny names none of the genomes in use",
                    leaf
                )
            }
            TreeError::LogicError(msg) => write!(f, "Tree logic error: {}", msg),
        }
    }
}

impl std::error::Error for TreeError {}
