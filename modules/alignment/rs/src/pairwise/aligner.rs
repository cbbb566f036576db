use std::borrow::Cow;

use alnkit_core_rs::loc::Strand;

use crate::pairwise::dp::{fogsaa, gotoh, nwsw, wsb};
use crate::pairwise::paths::OptimalPaths;
use crate::pairwise::scoring::substitution::Scorer;
use crate::pairwise::scoring::{Algorithm, Mode, ScoreModel};
use crate::pairwise::trace::TraceMatrix;
use crate::{Error, Result, Score};

/// The public aligner: validates the input sequences, selects the cheapest
/// sufficient engine for its score model, and runs it.
///
/// Sequences are 1-D buffers of alphabet indices. With a substitution matrix
/// installed every index must fall inside the matrix; a matrix with a symbol
/// mapping first translates user symbols to matrix indices.
#[derive(Default)]
pub struct PairwiseAligner {
    model: ScoreModel,
}

impl PairwiseAligner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ScoreModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &ScoreModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut ScoreModel {
        &mut self.model
    }

    /// The optimal alignment score of `target` against `query`. On the
    /// reverse strand the query buffer is read back to front; the engines
    /// see the reflected sequence together with mirrored end-gap penalties.
    pub fn score(&self, target: &[i32], query: &[i32], strand: Strand) -> Result<Score> {
        let (sa, sb) = self.prepare(target, query)?;
        let sb = reflect(sb, strand);
        match self.model.substitution_matrix() {
            Some(matrix) => self.score_engine(&sa, &sb, strand, matrix),
            None => self.score_engine(&sa, &sb, strand, &self.model.comparison()),
        }
    }

    /// The optimal score together with the lazy enumeration of all optimal
    /// alignments. Reverse-strand query coordinates count down from the
    /// query length.
    pub fn align(
        &self,
        target: &[i32],
        query: &[i32],
        strand: Strand,
    ) -> Result<(Score, OptimalPaths)> {
        let (sa, sb) = self.prepare(target, query)?;
        let sb = reflect(sb, strand);
        let (score, trace) = match self.model.substitution_matrix() {
            Some(matrix) => self.align_engine(&sa, &sb, strand, matrix)?,
            None => self.align_engine(&sa, &sb, strand, &self.model.comparison())?,
        };
        let paths = OptimalPaths::new(trace, self.model.algorithm(), self.model.mode(), strand);
        Ok((score, paths))
    }

    fn score_engine<P: Scorer>(
        &self,
        sa: &[i32],
        sb: &[i32],
        strand: Strand,
        scorer: &P,
    ) -> Result<Score> {
        let model = &self.model;
        let epsilon = model.epsilon();
        let oriented = model.gaps().oriented(strand);
        match (model.algorithm(), model.mode()) {
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Global) => {
                Ok(nwsw::global_score(sa, sb, &oriented, scorer))
            }
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Local) => {
                Ok(nwsw::local_score(sa, sb, model.gaps(), scorer))
            }
            (Algorithm::Gotoh, Mode::Global) => Ok(gotoh::global_score(sa, sb, &oriented, scorer)),
            (Algorithm::Gotoh, Mode::Local) => Ok(gotoh::local_score(sa, sb, model.gaps(), scorer)),
            (Algorithm::WatermanSmithBeyer, mode) => {
                let costs = wsb::GapCosts::new(
                    model.insertion_function(),
                    model.deletion_function(),
                    model.gaps(),
                    sa.len(),
                    sb.len(),
                );
                match mode {
                    Mode::Global => wsb::global_score(sa, sb, &costs, scorer, strand),
                    Mode::Local => wsb::local_score(sa, sb, &costs, scorer, strand),
                    Mode::Fogsaa => Err(unexpected(Algorithm::WatermanSmithBeyer, mode)),
                }
            }
            (Algorithm::Fogsaa, Mode::Fogsaa) => {
                let (mismatch, matching) = model.pair_score_range();
                fogsaa::score(sa, sb, &oriented, scorer, epsilon, matching, mismatch)
            }
            (algorithm, mode) => Err(unexpected(algorithm, mode)),
        }
    }

    fn align_engine<P: Scorer>(
        &self,
        sa: &[i32],
        sb: &[i32],
        strand: Strand,
        scorer: &P,
    ) -> Result<(Score, TraceMatrix)> {
        let model = &self.model;
        let epsilon = model.epsilon();
        let oriented = model.gaps().oriented(strand);
        match (model.algorithm(), model.mode()) {
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Global) => {
                nwsw::global_align(sa, sb, &oriented, scorer, epsilon)
            }
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Local) => {
                nwsw::local_align(sa, sb, model.gaps(), scorer, epsilon)
            }
            (Algorithm::Gotoh, Mode::Global) => {
                gotoh::global_align(sa, sb, &oriented, scorer, epsilon)
            }
            (Algorithm::Gotoh, Mode::Local) => {
                gotoh::local_align(sa, sb, model.gaps(), scorer, epsilon)
            }
            (Algorithm::WatermanSmithBeyer, mode) => {
                let costs = wsb::GapCosts::new(
                    model.insertion_function(),
                    model.deletion_function(),
                    model.gaps(),
                    sa.len(),
                    sb.len(),
                );
                match mode {
                    Mode::Global => wsb::global_align(sa, sb, &costs, scorer, strand, epsilon),
                    Mode::Local => wsb::local_align(sa, sb, &costs, scorer, strand, epsilon),
                    Mode::Fogsaa => Err(unexpected(Algorithm::WatermanSmithBeyer, mode)),
                }
            }
            (Algorithm::Fogsaa, Mode::Fogsaa) => {
                let (mismatch, matching) = model.pair_score_range();
                fogsaa::align(sa, sb, &oriented, scorer, epsilon, matching, mismatch)
            }
            (algorithm, mode) => Err(unexpected(algorithm, mode)),
        }
    }

    /// Validate both sequences and, with a mapped substitution matrix,
    /// translate user symbols to matrix indices.
    fn prepare<'a>(
        &self,
        target: &'a [i32],
        query: &'a [i32],
    ) -> Result<(Cow<'a, [i32]>, Cow<'a, [i32]>)> {
        for (name, sequence) in [("target", target), ("query", query)] {
            if sequence.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "{name} sequence has zero length"
                )));
            }
            if sequence.len() > i32::MAX as usize {
                return Err(Error::InvalidInput(format!("{name} sequence is too long")));
            }
        }
        let Some(matrix) = self.model.substitution_matrix() else {
            return Ok((Cow::Borrowed(target), Cow::Borrowed(query)));
        };
        match matrix.mapping() {
            Some(mapping) => Ok((
                Cow::Owned(map_indices(target, mapping)?),
                Cow::Owned(map_indices(query, mapping)?),
            )),
            None => {
                check_indices(target, matrix.size())?;
                check_indices(query, matrix.size())?;
                Ok((Cow::Borrowed(target), Cow::Borrowed(query)))
            }
        }
    }
}

fn reflect(query: Cow<'_, [i32]>, strand: Strand) -> Cow<'_, [i32]> {
    match strand {
        Strand::Forward => query,
        Strand::Reverse => Cow::Owned(query.iter().rev().copied().collect()),
    }
}

fn unexpected(algorithm: Algorithm, mode: Mode) -> Error {
    Error::Internal(format!("mode {mode} has unexpected algorithm {algorithm:?}"))
}

fn check_indices(sequence: &[i32], size: usize) -> Result<()> {
    for (position, &index) in sequence.iter().enumerate() {
        if index < 0 {
            return Err(Error::InvalidInput(format!(
                "sequence item {position} is negative ({index})"
            )));
        }
        if index as usize >= size {
            return Err(Error::InvalidInput(format!(
                "sequence item {position} is out of bound ({index}, should be < {size})"
            )));
        }
    }
    Ok(())
}

fn map_indices(sequence: &[i32], mapping: &[Option<u32>]) -> Result<Vec<i32>> {
    let mut mapped = Vec::with_capacity(sequence.len());
    for (position, &index) in sequence.iter().enumerate() {
        if index < 0 {
            return Err(Error::InvalidInput(format!(
                "sequence item {position} is negative ({index})"
            )));
        }
        if index as usize >= mapping.len() {
            return Err(Error::InvalidInput(format!(
                "sequence item {position} is out of bound ({index}, should be < {})",
                mapping.len()
            )));
        }
        match mapping[index as usize] {
            Some(translated) => mapped.push(translated as i32),
            None => {
                return Err(Error::InvalidInput(
                    "sequence contains letters not in the alphabet".into(),
                ));
            }
        }
    }
    Ok(mapped)
}
