use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermError {
    /// A line of a permutation file could not be understood
    ParseError {
        /// Name of the input (file name or "stdin")
        file: String,
        /// The line number (1-based)
        line: usize,
        /// A human-readable message explaining the error
        message: String,
    },
    /// A sequence id that does not follow the `genome.chromosome` convention
    NamingError {
        file: String,
        line: usize,
        name: String,
    },
    /// Block coordinates with `end < start`
    CoordinateError { block_id: u32, start: u64, end: u64 },
    /// No reference permutation kept a synteny block
    NoReferenceBlocks,
    /// The target genome kept no synteny block
    NoTargetBlocks { target: String },
}

impl fmt::Display for PermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermError::ParseError {
                file,
                line,
                message,
            } => write!(f, "Parse error in {} at line {}: {}", file, line, message),
            PermError::NamingError { file, line, name } => write!(
                f,
                "Permutation id \"{}\" in {} at line {} does not follow naming convention: 'genome.chromosome'",
                name, file, line
            ),
            PermError::CoordinateError {
                block_id,
                start,
                end,
            } => write!(
                f,
                "Block {} ends before it starts ({} > {})",
                block_id, start, end
            ),
            PermError::NoReferenceBlocks => {
                write!(f, "No synteny blocks found in reference sequences")
            }
            PermError::NoTargetBlocks { target } => {
                write!(f, "No synteny blocks found in target sequences of {}", target)
            }
        }
    }
}

impl std::error::Error for PermError {}
