use alnkit_core_rs::loc::Strand;

use crate::pairwise::alignment::{Offset, Path};
use crate::pairwise::scoring::{Algorithm, Mode};
use crate::pairwise::trace::{TraceMatrix, DIAGONAL, DONE, HORIZONTAL, VERTICAL};
use crate::{Error, Result};

mod count;
mod gotoh;
mod nwsw;
mod wsb;

/// Lazy enumeration of all co-optimal alignments recorded in a trace matrix.
///
/// The enumerator owns the matrix. Each `next` rewrites the path plane in
/// place: it walks backwards along the current path until a cell still has an
/// unexplored trace bit, switches to it, and re-descends. `reset` rewinds to
/// the state before the first path without touching the trace plane.
pub struct OptimalPaths {
    trace: TraceMatrix,
    algorithm: Algorithm,
    mode: Mode,
    strand: Strand,
    // Start cell of the current local alignment; local modes scan endpoints
    // in row-major order from here.
    ia: usize,
    ib: usize,
    length: Option<count::Count>,
}

impl OptimalPaths {
    pub(crate) fn new(
        trace: TraceMatrix,
        algorithm: Algorithm,
        mode: Mode,
        strand: Strand,
    ) -> Self {
        Self {
            trace,
            algorithm,
            mode,
            strand,
            ia: 0,
            ib: 0,
            length: None,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// The exact number of optimal paths this enumerator yields, computed
    /// once by a forward DP over the trace bits and cached. Enumeration
    /// state does not affect it.
    pub fn count(&mut self) -> Result<usize> {
        let cached = match self.length {
            Some(count) => count,
            None => {
                let count = match (self.algorithm, self.mode) {
                    (Algorithm::NeedlemanWunschSmithWaterman, Mode::Global) => {
                        count::needlemanwunsch(&self.trace)
                    }
                    (Algorithm::NeedlemanWunschSmithWaterman, Mode::Local) => {
                        count::smithwaterman(&self.trace)
                    }
                    (Algorithm::Gotoh, Mode::Global) => count::gotoh_global(&self.trace),
                    (Algorithm::Gotoh, Mode::Local) => count::gotoh_local(&self.trace),
                    (Algorithm::WatermanSmithBeyer, Mode::Global) => {
                        count::waterman_smith_beyer_global(&self.trace)?
                    }
                    (Algorithm::WatermanSmithBeyer, Mode::Local) => {
                        count::waterman_smith_beyer_local(&self.trace)?
                    }
                    (Algorithm::Fogsaa, Mode::Fogsaa) => Some(1),
                    (algorithm, mode) => {
                        return Err(Error::Internal(format!(
                            "mode {mode} has unexpected algorithm {algorithm:?}"
                        )));
                    }
                };
                self.length = Some(count);
                count
            }
        };
        cached.ok_or(Error::PathCountOverflow)
    }

    /// Rewind to the state before the first path. The trace plane is
    /// untouched, so re-enumeration yields the same paths in the same order.
    pub fn reset(&mut self) {
        if self.mode == Mode::Fogsaa {
            let (na, nb) = (self.trace.na(), self.trace.nb());
            self.trace.set_path(na, nb, 0);
            return;
        }
        if self.mode == Mode::Local {
            self.ia = 0;
            self.ib = 0;
        }
        match self.algorithm {
            Algorithm::NeedlemanWunschSmithWaterman | Algorithm::Gotoh => {
                if self.trace.path(0, 0) != crate::pairwise::trace::NONE {
                    self.trace.set_path(0, 0, 0);
                }
            }
            Algorithm::WatermanSmithBeyer => {
                self.trace.set_path(0, 0, 0);
            }
            Algorithm::Fogsaa => {}
        }
    }

    /// Materialize the path currently written in the path plane, starting at
    /// `(i, j)`. Coordinates are emitted wherever the direction changes; on
    /// the reverse strand the query coordinate is mirrored at emission time.
    fn build_path(&self, mut i: usize, mut j: usize) -> Path {
        let nb = self.trace.nb();
        let mut vertices = Vec::new();
        let mut direction = 0u8;
        loop {
            let path = self.trace.path(i, j);
            if path != direction {
                let query = match self.strand {
                    Strand::Forward => j,
                    Strand::Reverse => nb - j,
                };
                vertices.push(Offset::new(i, query));
                direction = path;
            }
            match path {
                HORIZONTAL => j += 1,
                VERTICAL => i += 1,
                DIAGONAL => {
                    i += 1;
                    j += 1;
                }
                _ => break,
            }
        }
        Path::new(vertices)
    }

    /// FOGSAA records exactly one optimal path at fill time.
    fn next_fogsaa(&mut self) -> Option<(usize, usize)> {
        let (na, nb) = (self.trace.na(), self.trace.nb());
        if self.trace.path(na, nb) == DONE {
            return None;
        }
        self.trace.set_path(na, nb, DONE);
        Some((0, 0))
    }
}

impl Iterator for OptimalPaths {
    type Item = Path;

    fn next(&mut self) -> Option<Path> {
        let start = match (self.algorithm, self.mode) {
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Global) => {
                self.next_needlemanwunsch()
            }
            (Algorithm::NeedlemanWunschSmithWaterman, Mode::Local) => self.next_smithwaterman(),
            (Algorithm::Gotoh, Mode::Global) => self.next_gotoh_global(),
            (Algorithm::Gotoh, Mode::Local) => self.next_gotoh_local(),
            (Algorithm::WatermanSmithBeyer, Mode::Global) => {
                self.next_waterman_smith_beyer_global()
            }
            (Algorithm::WatermanSmithBeyer, Mode::Local) => {
                self.next_waterman_smith_beyer_local()
            }
            (Algorithm::Fogsaa, Mode::Fogsaa) => self.next_fogsaa(),
            (algorithm, mode) => {
                log::error!("mode {mode} has unexpected algorithm {algorithm:?}");
                None
            }
        }?;
        Some(self.build_path(start.0, start.1))
    }
}
