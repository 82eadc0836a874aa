use super::error::PermError;

/// A synteny block occurrence on a chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Positive identifier shared by every occurrence of the block
    pub block_id: u32,
    /// Orientation, `1` or `-1`
    pub sign: i8,
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl Block {
    pub fn new(block_id: u32, sign: i8) -> Self {
        Self {
            block_id,
            sign: if sign < 0 { -1 } else { 1 },
            start: None,
            end: None,
        }
    }

    /// Build a block from its signed id, e.g. `-3`.
    ///
    /// ```
    /// use ragr::libs::synteny::Block;
    ///
    /// let block = Block::from_signed(-3);
    /// assert_eq!(block.block_id, 3);
    /// assert_eq!(block.sign, -1);
    /// assert_eq!(block.signed_id(), -3);
    /// ```
    pub fn from_signed(signed_id: i64) -> Self {
        Self::new(signed_id.unsigned_abs() as u32, if signed_id < 0 { -1 } else { 1 })
    }

    /// A block with coordinates on its chromosome. `end` must not precede `start`.
    pub fn with_coords(block_id: u32, sign: i8, start: u64, end: u64) -> Result<Self, PermError> {
        if end < start {
            return Err(PermError::CoordinateError {
                block_id,
                start,
                end,
            });
        }
        let mut block = Self::new(block_id, sign);
        block.start = Some(start);
        block.end = Some(end);
        Ok(block)
    }

    pub fn signed_id(&self) -> i64 {
        self.block_id as i64 * self.sign as i64
    }

    /// Only defined when both coordinates are known
    pub fn length(&self) -> Option<u64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_id() {
        assert_eq!(Block::new(7, 1).signed_id(), 7);
        assert_eq!(Block::new(7, -1).signed_id(), -7);
        assert_eq!(Block::from_signed(12).sign, 1);
    }

    #[test]
    fn test_length() {
        assert_eq!(Block::new(1, 1).length(), None);

        let block = Block::with_coords(1, -1, 100, 250).unwrap();
        assert_eq!(block.length(), Some(150));

        let mut half = Block::new(2, 1);
        half.start = Some(10);
        assert_eq!(half.length(), None);
    }

    #[test]
    fn test_bad_coords() {
        let err = Block::with_coords(4, 1, 300, 200).unwrap_err();
        assert_eq!(
            err,
            PermError::CoordinateError {
                block_id: 4,
                start: 300,
                end: 200
            }
        );
    }
}
