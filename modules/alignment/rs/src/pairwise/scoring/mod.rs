use std::cell::Cell;
use std::fmt::{self, Display};

pub use gaps::{GapContext, GapPenalties};
pub use substitution::{Comparison, Scorer, SubstitutionMatrix};

pub mod gaps;
pub mod substitution;

use crate::{Error, Result, Score};

/// A user callback pricing a gap of length `len` after position `pos`.
pub type GapFunction = Box<dyn Fn(usize, usize) -> Score>;

/// How alignments start and end.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Mode {
    /// End-to-end alignment of both sequences.
    #[default]
    Global,
    /// Alignment of an arbitrary positively scoring stretch.
    Local,
    /// Global alignment through the FOGSAA branch-and-bound search.
    Fogsaa,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Global => "global",
            Mode::Local => "local",
            Mode::Fogsaa => "fogsaa",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&str> for Mode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "global" => Ok(Mode::Global),
            "local" => Ok(Mode::Local),
            "fogsaa" => Ok(Mode::Fogsaa),
            _ => Err(Error::InvalidParameter(format!(
                "invalid mode {value:?} (expected 'global', 'local', or 'fogsaa')"
            ))),
        }
    }
}

/// The cheapest algorithm able to honor a score model.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    /// Linear gap costs: one dynamic-programming layer.
    NeedlemanWunschSmithWaterman,
    /// Affine gap costs: three layers.
    Gotoh,
    /// Arbitrary gap costs through callbacks: quadratic gap scans.
    WatermanSmithBeyer,
    /// Branch-and-bound global alignment with affine gap costs.
    Fogsaa,
}

impl Algorithm {
    /// The conventional name of the algorithm in the given mode.
    pub fn name(&self, mode: Mode) -> &'static str {
        match (self, mode) {
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Local) => "Smith-Waterman",
            (Algorithm::NeedlemanWunschSmithWaterman, _) => "Needleman-Wunsch",
            (Algorithm::Gotoh, Mode::Local) => "Gotoh local alignment algorithm",
            (Algorithm::Gotoh, _) => "Gotoh global alignment algorithm",
            (Algorithm::WatermanSmithBeyer, Mode::Local) => {
                "Waterman-Smith-Beyer local alignment algorithm"
            }
            (Algorithm::WatermanSmithBeyer, _) => {
                "Waterman-Smith-Beyer global alignment algorithm"
            }
            (Algorithm::Fogsaa, _) => "Fast Optimal Global Sequence Alignment Algorithm",
        }
    }
}

/// Everything that prices an alignment: the pair scores, the twelve gap
/// penalties or two gap callbacks, the tie tolerance, and the mode.
///
/// The model also decides which algorithm is sufficient for it; the decision
/// is cached and every setter that can change it drops the cache.
pub struct ScoreModel {
    match_score: Score,
    mismatch_score: Score,
    substitution_matrix: Option<SubstitutionMatrix>,
    wildcard: Option<i32>,
    gaps: GapPenalties,
    insertion_function: Option<GapFunction>,
    deletion_function: Option<GapFunction>,
    epsilon: Score,
    mode: Mode,
    algorithm: Cell<Option<Algorithm>>,
}

impl Default for ScoreModel {
    fn default() -> Self {
        Self {
            match_score: 1.0,
            mismatch_score: 0.0,
            substitution_matrix: None,
            wildcard: None,
            gaps: GapPenalties::default(),
            insertion_function: None,
            deletion_function: None,
            epsilon: 1e-6,
            mode: Mode::Global,
            algorithm: Cell::new(None),
        }
    }
}

impl ScoreModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.algorithm.set(None);
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.invalidate();
    }

    /// The match score, or `None` while a substitution matrix is installed.
    pub fn match_score(&self) -> Option<Score> {
        match self.substitution_matrix {
            Some(_) => None,
            None => Some(self.match_score),
        }
    }

    /// Set the match score; drops any installed substitution matrix.
    pub fn set_match_score(&mut self, score: Score) {
        self.substitution_matrix = None;
        self.match_score = score;
        self.invalidate();
    }

    /// The mismatch score, or `None` while a substitution matrix is installed.
    pub fn mismatch_score(&self) -> Option<Score> {
        match self.substitution_matrix {
            Some(_) => None,
            None => Some(self.mismatch_score),
        }
    }

    /// Set the mismatch score; drops any installed substitution matrix.
    pub fn set_mismatch_score(&mut self, score: Score) {
        self.substitution_matrix = None;
        self.mismatch_score = score;
        self.invalidate();
    }

    pub fn substitution_matrix(&self) -> Option<&SubstitutionMatrix> {
        self.substitution_matrix.as_ref()
    }

    pub fn set_substitution_matrix(&mut self, matrix: Option<SubstitutionMatrix>) {
        self.substitution_matrix = matrix;
        self.invalidate();
    }

    pub fn wildcard(&self) -> Option<i32> {
        self.wildcard
    }

    /// Set the wildcard symbol. Only consulted in match/mismatch mode; the
    /// algorithm selection does not depend on it.
    pub fn set_wildcard(&mut self, wildcard: Option<i32>) {
        self.wildcard = wildcard;
    }

    pub fn epsilon(&self) -> Score {
        self.epsilon
    }

    pub fn set_epsilon(&mut self, epsilon: Score) {
        self.epsilon = epsilon;
        self.invalidate();
    }

    pub fn gaps(&self) -> &GapPenalties {
        &self.gaps
    }

    pub fn set_gap_penalties(&mut self, gaps: GapPenalties) {
        self.gaps = gaps;
        self.invalidate();
    }

    /// Set all twelve gap penalties at once.
    pub fn set_gap_score(&mut self, value: Score) {
        self.gaps.set_all(value);
        self.invalidate();
    }

    pub fn set_open_gap_score(&mut self, value: Score) {
        self.gaps.set_open(value);
        self.invalidate();
    }

    pub fn set_extend_gap_score(&mut self, value: Score) {
        self.gaps.set_extend(value);
        self.invalidate();
    }

    pub fn set_internal_gap_score(&mut self, value: Score) {
        self.gaps.set_internal(value);
        self.invalidate();
    }

    pub fn set_end_gap_score(&mut self, value: Score) {
        self.gaps.set_end(value);
        self.invalidate();
    }

    pub fn set_insertion_score(&mut self, value: Score) {
        self.gaps.set_insertion(value);
        self.invalidate();
    }

    pub fn set_deletion_score(&mut self, value: Score) {
        self.gaps.set_deletion(value);
        self.invalidate();
    }

    pub fn gap_score(&self) -> Result<Score> {
        self.gaps.all()
    }

    pub fn open_gap_score(&self) -> Result<Score> {
        self.gaps.open()
    }

    pub fn extend_gap_score(&self) -> Result<Score> {
        self.gaps.extend()
    }

    /// Install a callback pricing insertion gaps; forces Waterman-Smith-Beyer.
    pub fn set_insertion_score_function(&mut self, function: Option<GapFunction>) {
        self.insertion_function = function;
        self.invalidate();
    }

    /// Install a callback pricing deletion gaps; forces Waterman-Smith-Beyer.
    pub fn set_deletion_score_function(&mut self, function: Option<GapFunction>) {
        self.deletion_function = function;
        self.invalidate();
    }

    pub(crate) fn insertion_function(&self) -> Option<&GapFunction> {
        self.insertion_function.as_ref()
    }

    pub(crate) fn deletion_function(&self) -> Option<&GapFunction> {
        self.deletion_function.as_ref()
    }

    /// The match/mismatch comparison scorer for this model.
    pub(crate) fn comparison(&self) -> Comparison {
        Comparison::new(self.match_score, self.mismatch_score, self.wildcard)
    }

    /// The bound parameters FOGSAA assumes: the best and worst score a single
    /// aligned pair can take.
    pub(crate) fn pair_score_range(&self) -> (Score, Score) {
        match &self.substitution_matrix {
            Some(matrix) => matrix.extrema(),
            None => (self.mismatch_score, self.match_score),
        }
    }

    /// Select the cheapest sufficient algorithm. The decision is cached until
    /// a score field changes.
    pub fn algorithm(&self) -> Algorithm {
        if let Some(algorithm) = self.algorithm.get() {
            return algorithm;
        }
        let algorithm = if self.mode == Mode::Fogsaa {
            Algorithm::Fogsaa
        } else if self.insertion_function.is_some() || self.deletion_function.is_some() {
            Algorithm::WatermanSmithBeyer
        } else if self.gaps.is_linear() {
            Algorithm::NeedlemanWunschSmithWaterman
        } else {
            Algorithm::Gotoh
        };
        self.algorithm.set(Some(algorithm));
        algorithm
    }
}
