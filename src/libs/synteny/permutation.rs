use super::block::Block;

/// One chromosome (or contig) of one genome, as an ordered list of signed blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Permutation {
    pub genome_name: String,
    pub chr_name: String,
    /// Running index of the chromosome in its input
    pub chr_id: usize,
    pub chr_len: Option<u64>,
    pub blocks: Vec<Block>,
}

impl Permutation {
    pub fn new(genome_name: impl Into<String>, chr_name: impl Into<String>, chr_id: usize) -> Self {
        Self {
            genome_name: genome_name.into(),
            chr_name: chr_name.into(),
            chr_id,
            chr_len: None,
            blocks: Vec::new(),
        }
    }

    /// Set the blocks (builder pattern)
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Build a permutation from signed block ids.
    ///
    /// ```
    /// use ragr::libs::synteny::Permutation;
    ///
    /// let perm = Permutation::from_signed("human", "chr1", &[1, -2, 3]);
    /// assert_eq!(perm.name(), "human.chr1");
    /// assert_eq!(perm.signed_ids(), vec![1, -2, 3]);
    /// ```
    pub fn from_signed(genome_name: &str, chr_name: &str, signed_ids: &[i64]) -> Self {
        Self::new(genome_name, chr_name, 0)
            .with_blocks(signed_ids.iter().map(|&id| Block::from_signed(id)).collect())
    }

    /// `genome.chromosome`
    pub fn name(&self) -> String {
        format!("{}.{}", self.genome_name, self.chr_name)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn signed_ids(&self) -> Vec<i64> {
        self.blocks.iter().map(|b| b.signed_id()).collect()
    }

    /// Consecutive block pairs. A circular chromosome also yields the (last, first) pair.
    /// Permutations with less than two blocks have no pairs.
    ///
    /// ```
    /// use ragr::libs::synteny::Permutation;
    ///
    /// let perm = Permutation::from_signed("g", "c", &[1, 2, 3]);
    /// let ids = |circular| {
    ///     perm.pairs(circular)
    ///         .map(|(l, r)| (l.signed_id(), r.signed_id()))
    ///         .collect::<Vec<_>>()
    /// };
    /// assert_eq!(ids(false), vec![(1, 2), (2, 3)]);
    /// assert_eq!(ids(true), vec![(1, 2), (2, 3), (3, 1)]);
    /// ```
    pub fn pairs(&self, circular: bool) -> impl Iterator<Item = (&Block, &Block)> {
        let n = self.blocks.len();
        let take = match n {
            0 | 1 => 0,
            _ if circular => n,
            _ => n - 1,
        };

        self.blocks
            .iter()
            .zip(self.blocks.iter().cycle().skip(1))
            .take(take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_permutations_have_no_pairs() {
        let empty = Permutation::new("g", "c", 0);
        assert_eq!(empty.pairs(true).count(), 0);

        let single = Permutation::from_signed("g", "c", &[5]);
        assert_eq!(single.pairs(false).count(), 0);
        assert_eq!(single.pairs(true).count(), 0);
    }

    #[test]
    fn test_circular_two_blocks() {
        let perm = Permutation::from_signed("g", "c", &[4, -9]);
        let pairs: Vec<(i64, i64)> = perm
            .pairs(true)
            .map(|(l, r)| (l.signed_id(), r.signed_id()))
            .collect();
        assert_eq!(pairs, vec![(4, -9), (-9, 4)]);
    }
}
