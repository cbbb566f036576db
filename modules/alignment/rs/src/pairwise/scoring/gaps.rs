use itertools::Itertools;

use alnkit_core_rs::loc::Strand;

use crate::{Error, Result, Score};

/// Where a gap sits relative to the sequence it interrupts.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GapContext {
    /// The gap touches the start of the sequence.
    Left,
    /// The gap touches neither end.
    Internal,
    /// The gap touches the end of the sequence.
    Right,
}

impl GapContext {
    /// The context of a gap at position `pos` of a sequence of length `n`.
    pub fn at(pos: usize, n: usize) -> Self {
        if pos == 0 {
            GapContext::Left
        } else if pos == n {
            GapContext::Right
        } else {
            GapContext::Internal
        }
    }
}

/// The twelve affine gap penalties: open/extend x left/internal/right x
/// insertion/deletion. Insertions put a gap in the target and consume query
/// symbols; deletions put a gap in the query and consume target symbols.
/// A gap of length k costs `open + (k - 1) * extend`.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct GapPenalties {
    pub open_internal_insertion: Score,
    pub extend_internal_insertion: Score,
    pub open_left_insertion: Score,
    pub extend_left_insertion: Score,
    pub open_right_insertion: Score,
    pub extend_right_insertion: Score,
    pub open_internal_deletion: Score,
    pub extend_internal_deletion: Score,
    pub open_left_deletion: Score,
    pub extend_left_deletion: Score,
    pub open_right_deletion: Score,
    pub extend_right_deletion: Score,
}

impl GapPenalties {
    fn values(&self) -> [Score; 12] {
        [
            self.open_internal_insertion,
            self.extend_internal_insertion,
            self.open_left_insertion,
            self.extend_left_insertion,
            self.open_right_insertion,
            self.extend_right_insertion,
            self.open_internal_deletion,
            self.extend_internal_deletion,
            self.open_left_deletion,
            self.extend_left_deletion,
            self.open_right_deletion,
            self.extend_right_deletion,
        ]
    }

    /// True when every open penalty equals the matching extend penalty, i.e.
    /// gap costs are linear in the gap length.
    pub fn is_linear(&self) -> bool {
        self.open_internal_insertion == self.extend_internal_insertion
            && self.open_internal_deletion == self.extend_internal_deletion
            && self.open_left_insertion == self.extend_left_insertion
            && self.open_right_insertion == self.extend_right_insertion
            && self.open_left_deletion == self.extend_left_deletion
            && self.open_right_deletion == self.extend_right_deletion
    }

    /// The penalties as seen from the given strand: aligning against the
    /// reverse strand mirrors the query, so the left and right penalties
    /// trade places.
    pub fn oriented(&self, strand: Strand) -> Self {
        match strand {
            Strand::Forward => *self,
            Strand::Reverse => Self {
                open_left_insertion: self.open_right_insertion,
                extend_left_insertion: self.extend_right_insertion,
                open_right_insertion: self.open_left_insertion,
                extend_right_insertion: self.extend_left_insertion,
                open_left_deletion: self.open_right_deletion,
                extend_left_deletion: self.extend_right_deletion,
                open_right_deletion: self.open_left_deletion,
                extend_right_deletion: self.extend_left_deletion,
                ..*self
            },
        }
    }

    /// The (open, extend) pair for an insertion gap in the given context.
    pub fn insertion(&self, context: GapContext) -> (Score, Score) {
        match context {
            GapContext::Left => (self.open_left_insertion, self.extend_left_insertion),
            GapContext::Internal => (self.open_internal_insertion, self.extend_internal_insertion),
            GapContext::Right => (self.open_right_insertion, self.extend_right_insertion),
        }
    }

    /// The (open, extend) pair for a deletion gap in the given context.
    pub fn deletion(&self, context: GapContext) -> (Score, Score) {
        match context {
            GapContext::Left => (self.open_left_deletion, self.extend_left_deletion),
            GapContext::Internal => (self.open_internal_deletion, self.extend_internal_deletion),
            GapContext::Right => (self.open_right_deletion, self.extend_right_deletion),
        }
    }

    /// The affine cost of an insertion gap of length `len` at target position
    /// `pos` out of `n`.
    pub fn insertion_score(&self, pos: usize, len: usize, n: usize) -> Score {
        let (open, extend) = self.insertion(GapContext::at(pos, n));
        open + (len - 1) as Score * extend
    }

    /// The affine cost of a deletion gap of length `len` at query position
    /// `pos` out of `n`.
    pub fn deletion_score(&self, pos: usize, len: usize, n: usize) -> Score {
        let (open, extend) = self.deletion(GapContext::at(pos, n));
        open + (len - 1) as Score * extend
    }

    fn shared(values: impl IntoIterator<Item = Score>, what: &str) -> Result<Score> {
        values.into_iter().all_equal_value().map_err(|_| {
            Error::InvalidParameter(format!("{what} is not the same for all gaps"))
        })
    }

    // Grouped accessors. Each getter returns the shared value of its group or
    // an error when the group is heterogeneous; each setter fans one value
    // out over the whole group.

    pub fn all(&self) -> Result<Score> {
        Self::shared(self.values(), "gap score")
    }

    pub fn set_all(&mut self, value: Score) {
        *self = Self {
            open_internal_insertion: value,
            extend_internal_insertion: value,
            open_left_insertion: value,
            extend_left_insertion: value,
            open_right_insertion: value,
            extend_right_insertion: value,
            open_internal_deletion: value,
            extend_internal_deletion: value,
            open_left_deletion: value,
            extend_left_deletion: value,
            open_right_deletion: value,
            extend_right_deletion: value,
        };
    }

    pub fn open(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_internal_insertion,
                self.open_left_insertion,
                self.open_right_insertion,
                self.open_internal_deletion,
                self.open_left_deletion,
                self.open_right_deletion,
            ],
            "open gap score",
        )
    }

    pub fn set_open(&mut self, value: Score) {
        self.open_internal_insertion = value;
        self.open_left_insertion = value;
        self.open_right_insertion = value;
        self.open_internal_deletion = value;
        self.open_left_deletion = value;
        self.open_right_deletion = value;
    }

    pub fn extend(&self) -> Result<Score> {
        Self::shared(
            [
                self.extend_internal_insertion,
                self.extend_left_insertion,
                self.extend_right_insertion,
                self.extend_internal_deletion,
                self.extend_left_deletion,
                self.extend_right_deletion,
            ],
            "extend gap score",
        )
    }

    pub fn set_extend(&mut self, value: Score) {
        self.extend_internal_insertion = value;
        self.extend_left_insertion = value;
        self.extend_right_insertion = value;
        self.extend_internal_deletion = value;
        self.extend_left_deletion = value;
        self.extend_right_deletion = value;
    }

    pub fn internal(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_internal_insertion,
                self.extend_internal_insertion,
                self.open_internal_deletion,
                self.extend_internal_deletion,
            ],
            "internal gap score",
        )
    }

    pub fn set_internal(&mut self, value: Score) {
        self.open_internal_insertion = value;
        self.extend_internal_insertion = value;
        self.open_internal_deletion = value;
        self.extend_internal_deletion = value;
    }

    pub fn end(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_left_insertion,
                self.extend_left_insertion,
                self.open_right_insertion,
                self.extend_right_insertion,
                self.open_left_deletion,
                self.extend_left_deletion,
                self.open_right_deletion,
                self.extend_right_deletion,
            ],
            "end gap score",
        )
    }

    pub fn set_end(&mut self, value: Score) {
        self.open_left_insertion = value;
        self.extend_left_insertion = value;
        self.open_right_insertion = value;
        self.extend_right_insertion = value;
        self.open_left_deletion = value;
        self.extend_left_deletion = value;
        self.open_right_deletion = value;
        self.extend_right_deletion = value;
    }

    pub fn left(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_left_insertion,
                self.extend_left_insertion,
                self.open_left_deletion,
                self.extend_left_deletion,
            ],
            "left gap score",
        )
    }

    pub fn set_left(&mut self, value: Score) {
        self.open_left_insertion = value;
        self.extend_left_insertion = value;
        self.open_left_deletion = value;
        self.extend_left_deletion = value;
    }

    pub fn right(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_right_insertion,
                self.extend_right_insertion,
                self.open_right_deletion,
                self.extend_right_deletion,
            ],
            "right gap score",
        )
    }

    pub fn set_right(&mut self, value: Score) {
        self.open_right_insertion = value;
        self.extend_right_insertion = value;
        self.open_right_deletion = value;
        self.extend_right_deletion = value;
    }

    pub fn insertion_all(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_internal_insertion,
                self.extend_internal_insertion,
                self.open_left_insertion,
                self.extend_left_insertion,
                self.open_right_insertion,
                self.extend_right_insertion,
            ],
            "insertion score",
        )
    }

    pub fn set_insertion(&mut self, value: Score) {
        self.open_internal_insertion = value;
        self.extend_internal_insertion = value;
        self.open_left_insertion = value;
        self.extend_left_insertion = value;
        self.open_right_insertion = value;
        self.extend_right_insertion = value;
    }

    pub fn deletion_all(&self) -> Result<Score> {
        Self::shared(
            [
                self.open_internal_deletion,
                self.extend_internal_deletion,
                self.open_left_deletion,
                self.extend_left_deletion,
                self.open_right_deletion,
                self.extend_right_deletion,
            ],
            "deletion score",
        )
    }

    pub fn set_deletion(&mut self, value: Score) {
        self.open_internal_deletion = value;
        self.extend_internal_deletion = value;
        self.open_left_deletion = value;
        self.extend_left_deletion = value;
        self.open_right_deletion = value;
        self.extend_right_deletion = value;
    }

    /// The largest of the twelve penalties; the FOGSAA admissibility check
    /// compares it against the mismatch score.
    pub fn max_value(&self) -> Score {
        self.values().into_iter().fold(Score::NEG_INFINITY, Score::max)
    }
}
