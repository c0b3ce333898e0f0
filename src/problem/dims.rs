use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row partition of a canonical problem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemDims {
    /// number of equality rows
    pub eq: usize,
    /// number of inequality (`<=`) rows
    pub leq: usize,
    /// ordered sizes of the second-order cone blocks
    pub soc: Vec<usize>,
}

impl ProblemDims {
    pub fn new(eq: usize, leq: usize, soc: Vec<usize>) -> Self {
        Self { eq, leq, soc }
    }

    /// number of linear (equality and inequality) rows
    pub fn linear_rows(&self) -> usize {
        self.eq + self.leq
    }

    /// total number of rows described, including cone rows
    pub fn total_rows(&self) -> usize {
        self.linear_rows() + self.soc.iter().sum::<usize>()
    }

    /// Iterator over the cone blocks in declared order.
    pub fn cone_blocks(&self) -> ConeBlocks<'_> {
        ConeBlocks {
            sizes: &self.soc,
            index: 0,
            cursor: self.linear_rows(),
        }
    }
}

/// One second-order cone over a contiguous range of constraint rows.
///
/// A block of size 1 is a plain nonnegativity condition on its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConeBlock {
    /// position of the cone in the declared cone sequence
    pub index: usize,
    /// first row of the block
    pub start: usize,
    /// number of rows
    pub size: usize,
}

impl ConeBlock {
    pub fn rows(&self) -> Range<usize> {
        self.start..(self.start + self.size)
    }
}

/// Iterator returned by [`ProblemDims::cone_blocks`]
pub struct ConeBlocks<'a> {
    sizes: &'a [usize],
    index: usize,
    cursor: usize,
}

impl Iterator for ConeBlocks<'_> {
    type Item = ConeBlock;

    fn next(&mut self) -> Option<ConeBlock> {
        let &size = self.sizes.get(self.index)?;
        let block = ConeBlock {
            index: self.index,
            start: self.cursor,
            size,
        };
        self.index += 1;
        self.cursor += size;
        Some(block)
    }
}

#[test]
fn test_cone_blocks() {
    let dims = ProblemDims::new(2, 1, vec![3, 1, 2]);
    assert_eq!(dims.linear_rows(), 3);
    assert_eq!(dims.total_rows(), 9);

    let blocks: Vec<_> = dims.cone_blocks().collect();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].rows(), 3..6);
    assert_eq!(blocks[1].rows(), 6..7);
    assert_eq!(blocks[2], ConeBlock { index: 2, start: 7, size: 2 });
}
