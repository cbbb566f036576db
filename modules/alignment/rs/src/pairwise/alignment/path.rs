use derive_getters::{Dissolve, Getters};
use derive_more::{Constructor, From, Into};

use super::offset::Offset;
use super::op::Op;
use super::step::Step;

/// One optimal alignment, reported as the sequence coordinates at which the
/// alignment changes direction. The first vertex is the start of the
/// alignment, the last one is its end, and every vertex in between marks the
/// boundary between two runs of distinct operations.
///
/// On the reverse strand, query coordinates count down from the query length.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve, Constructor, From, Into)]
pub struct Path {
    vertices: Vec<Offset<usize, usize>>,
}

impl Path {
    /// The coordinates of the direction changes, as one row per sequence.
    pub fn coordinates(&self) -> (Vec<usize>, Vec<usize>) {
        (
            self.vertices.iter().map(|v| v.target).collect(),
            self.vertices.iter().map(|v| v.query).collect(),
        )
    }

    /// The alignment start in sequence coordinates.
    pub fn start(&self) -> Option<Offset<usize, usize>> {
        self.vertices.first().copied()
    }

    /// The alignment end in sequence coordinates.
    pub fn end(&self) -> Option<Offset<usize, usize>> {
        self.vertices.last().copied()
    }

    /// The total number of alignment columns.
    pub fn columns(&self) -> usize {
        self.steps().iter().map(|s| *s.len()).sum()
    }

    /// The runs of the path as alignment steps. Aligned runs are reported as
    /// `Op::Equivalent`; use [`utils::classify`](super::utils::classify) to
    /// split them into matches and mismatches.
    pub fn steps(&self) -> Vec<Step<usize>> {
        let mut steps = Vec::with_capacity(self.vertices.len().saturating_sub(1));
        for pair in self.vertices.windows(2) {
            let dt = pair[1].target - pair[0].target;
            let dq = pair[1].query.abs_diff(pair[0].query);
            let (op, len) = match (dt, dq) {
                (0, _) => (Op::Insertion, dq),
                (_, 0) => (Op::Deletion, dt),
                _ => (Op::Equivalent, dt),
            };
            // Vertices always differ in at least one coordinate.
            if let Ok(step) = Step::new(op, len) {
                steps.push(step);
            }
        }
        steps
    }

    /// The run-length encoding of the path, e.g. `3~1v2~`.
    pub fn rle(&self) -> String {
        Step::rle_string(self.steps().iter())
    }
}
