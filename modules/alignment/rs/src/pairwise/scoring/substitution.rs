use derive_more::Constructor;

use crate::{Error, Result, Score};

/// Scores one aligned pair of alphabet indices.
pub trait Scorer {
    fn score(&self, a: i32, b: i32) -> Score;
}

/// Match/mismatch comparison with an optional wildcard symbol whose pairs
/// always score zero.
#[derive(Copy, Clone, PartialEq, Debug, Constructor)]
pub struct Comparison {
    pub match_score: Score,
    pub mismatch_score: Score,
    pub wildcard: Option<i32>,
}

impl Scorer for Comparison {
    #[inline(always)]
    fn score(&self, a: i32, b: i32) -> Score {
        if let Some(wildcard) = self.wildcard {
            if a == wildcard || b == wildcard {
                return 0.0;
            }
        }
        if a == b {
            self.match_score
        } else {
            self.mismatch_score
        }
    }
}

/// A square matrix of pair scores indexed by alphabet indices, with an
/// optional injective mapping from user symbols to matrix indices.
#[derive(Clone, PartialEq, Debug)]
pub struct SubstitutionMatrix {
    size: usize,
    scores: Vec<Score>,
    mapping: Option<Vec<Option<u32>>>,
}

impl SubstitutionMatrix {
    /// Build a `size` x `size` matrix from row-major values.
    pub fn new(size: usize, scores: Vec<Score>) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidParameter(
                "substitution matrix has zero size".into(),
            ));
        }
        if scores.len() != size * size {
            return Err(Error::InvalidParameter(format!(
                "substitution matrix should be square ({} values do not fill a {size} x {size} matrix)",
                scores.len(),
            )));
        }
        Ok(Self {
            size,
            scores,
            mapping: None,
        })
    }

    /// Attach a mapping from user symbols to matrix indices. Sequences are
    /// remapped through it before alignment; `None` entries mark symbols
    /// outside the alphabet.
    pub fn with_mapping(mut self, mapping: Vec<Option<u32>>) -> Result<Self> {
        if let Some(&index) = mapping.iter().flatten().find(|&&m| m as usize >= self.size) {
            return Err(Error::InvalidParameter(format!(
                "mapping entry {index} is out of bound (should be < {})",
                self.size
            )));
        }
        self.mapping = Some(mapping);
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mapping(&self) -> Option<&[Option<u32>]> {
        self.mapping.as_deref()
    }

    #[inline(always)]
    pub fn get(&self, a: usize, b: usize) -> Score {
        self.scores[a * self.size + b]
    }

    /// The smallest and largest entries; FOGSAA derives its bound parameters
    /// from them.
    pub fn extrema(&self) -> (Score, Score) {
        let mut min = self.scores[0];
        let mut max = self.scores[0];
        for &value in &self.scores {
            if value > max {
                max = value;
            } else if value < min {
                min = value;
            }
        }
        (min, max)
    }
}

impl Scorer for SubstitutionMatrix {
    #[inline(always)]
    fn score(&self, a: i32, b: i32) -> Score {
        self.get(a as usize, b as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison() {
        let plain = Comparison::new(1.0, -1.0, None);
        assert_eq!(plain.score(2, 2), 1.0);
        assert_eq!(plain.score(2, 3), -1.0);

        let wild = Comparison::new(1.0, -1.0, Some(4));
        assert_eq!(wild.score(4, 0), 0.0);
        assert_eq!(wild.score(0, 4), 0.0);
        assert_eq!(wild.score(4, 4), 0.0);
        assert_eq!(wild.score(1, 1), 1.0);
    }

    #[test]
    fn test_matrix_shape() {
        assert!(SubstitutionMatrix::new(0, vec![]).is_err());
        assert!(SubstitutionMatrix::new(2, vec![1.0; 3]).is_err());
        assert!(SubstitutionMatrix::new(2, vec![1.0; 4]).is_ok());
    }

    #[test]
    fn test_matrix_scoring() {
        let m = SubstitutionMatrix::new(2, vec![5.0, -3.0, -3.0, 2.0]).unwrap();
        assert_eq!(m.score(0, 0), 5.0);
        assert_eq!(m.score(0, 1), -3.0);
        assert_eq!(m.score(1, 1), 2.0);
        assert_eq!(m.extrema(), (-3.0, 5.0));
    }

    #[test]
    fn test_mapping_validation() {
        let m = SubstitutionMatrix::new(2, vec![1.0; 4]).unwrap();
        assert!(m.clone().with_mapping(vec![Some(0), Some(1), None]).is_ok());
        assert!(m.with_mapping(vec![Some(2)]).is_err());
    }
}
