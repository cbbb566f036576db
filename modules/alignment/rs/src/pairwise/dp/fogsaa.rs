use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::pairwise::scoring::gaps::GapPenalties;
use crate::pairwise::scoring::substitution::Scorer;
use crate::pairwise::trace::{checked_vec, TraceMatrix, DIAGONAL, HORIZONTAL, STARTPOINT, VERTICAL};
use crate::{Error, Result, Score};

/// One matrix cell of the best-first search.
#[derive(Copy, Clone, Default)]
struct Cell {
    present_score: Score,
    lower: Score,
    upper: Score,
    ty: u8,
    filled: bool,
    is_left_gap: bool,
}

/// A deferred sibling: the next child to expand at `(pa, pb)`, together with
/// the set of child types attempted once it is popped.
#[derive(Copy, Clone, Debug)]
struct QueueNode {
    pa: usize,
    pb: usize,
    type_upto_next: u8,
    next_type: u8,
    next_lower: Score,
    next_upper: Score,
}

impl PartialEq for QueueNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueNode {}

impl PartialOrd for QueueNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueNode {
    // A node ranks higher when its upper bound is higher, or on equal upper
    // bounds when its lower bound is higher.
    fn cmp(&self, other: &Self) -> Ordering {
        self.next_upper
            .total_cmp(&other.next_upper)
            .then(self.next_lower.total_cmp(&other.next_lower))
    }
}

/// Admissible bounds on the score of completing an alignment from a given
/// cell. The derivation assumes `match` is the best and `mismatch` the worst
/// per-position score, and that the remaining length difference is bridged
/// by one right-side gap (or by extending the gap already open).
struct Bounds {
    match_score: Score,
    mismatch_score: Score,
    gap_extend_a: Score,
    gap_extend_b: Score,
    right_gap_open_a: Score,
    right_gap_extend_a: Score,
    right_gap_open_b: Score,
    right_gap_extend_b: Score,
    na: usize,
    nb: usize,
}

impl Bounds {
    fn calculate(&self, score: Score, ty: u8, pa: usize, pb: usize) -> (Score, Score) {
        let rem_a = self.na - pa;
        let rem_b = self.nb - pb;
        if rem_a <= rem_b {
            if pa == self.na && ty == HORIZONTAL {
                // Already at the end of the target with a gap open: the rest
                // of the query extends it.
                let value = score + self.right_gap_extend_a * rem_b as Score;
                return (value, value);
            }
            let mut lower = score + rem_a as Score * self.mismatch_score;
            let mut upper = score + rem_a as Score * self.match_score;
            let excess = (rem_b - rem_a) as Score;
            let t = self.right_gap_open_a + self.right_gap_extend_a * (excess - 1.0);
            let t2 = self.gap_extend_a * excess;
            if ty == HORIZONTAL && t2 > t {
                // A gap is open already, so extending it and pairing later
                // beats opening a fresh one at the right edge.
                lower += t2;
                upper += t2;
            } else {
                lower += t;
                upper += t;
            }
            (lower, upper)
        } else {
            if pb == self.nb && ty == VERTICAL {
                let value = score + self.right_gap_extend_b * rem_a as Score;
                return (value, value);
            }
            let mut lower = score + rem_b as Score * self.mismatch_score;
            let mut upper = score + rem_b as Score * self.match_score;
            let excess = (rem_a - rem_b) as Score;
            let t = self.right_gap_open_b + self.right_gap_extend_b * (excess - 1.0);
            let t2 = self.gap_extend_b * excess;
            if ty == VERTICAL && t2 > t {
                lower += t2;
                upper += t2;
            } else {
                lower += t;
                upper += t;
            }
            (lower, upper)
        }
    }
}

struct Search {
    grid: Vec<Cell>,
    cols: usize,
    score: Score,
}

impl Search {
    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// Warn when the score model breaks the assumptions behind the admissible
/// bounds; the search still runs but may return a suboptimal alignment.
fn check_scores(match_score: Score, mismatch_score: Score, gaps: &GapPenalties) {
    if mismatch_score >= match_score {
        log::warn!(
            "match score is not greater than the mismatch score; \
             the alignment may be suboptimal"
        );
    }
    if gaps.max_value() > mismatch_score {
        log::warn!(
            "one or more gap scores are greater than the mismatch score; \
             the alignment may be suboptimal"
        );
    }
}

/// The best-first search over matrix cells. Children of the current cell are
/// expanded best-lower-bound first; the runner-up is parked on a max-heap
/// keyed by its bounds and revisited only while its upper bound still beats
/// the best fully expanded path.
#[allow(clippy::too_many_arguments)]
fn search<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
    match_score: Score,
    mismatch_score: Score,
) -> Result<Search> {
    let (na, nb) = (sa.len(), sb.len());
    let gap_open_a = gaps.open_internal_insertion;
    let gap_open_b = gaps.open_internal_deletion;
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;
    let left_gap_open_a = gaps.open_left_insertion;
    let left_gap_open_b = gaps.open_left_deletion;
    let left_gap_extend_a = gaps.extend_left_insertion;
    let left_gap_extend_b = gaps.extend_left_deletion;

    let bounds = Bounds {
        match_score,
        mismatch_score,
        gap_extend_a,
        gap_extend_b,
        right_gap_open_a: gaps.open_right_insertion,
        right_gap_extend_a: gaps.extend_right_insertion,
        right_gap_open_b: gaps.open_right_deletion,
        right_gap_extend_b: gaps.extend_right_deletion,
        na,
        nb,
    };

    let cols = nb + 1;
    let mut grid: Vec<Cell> = checked_vec((na + 1) * cols)?;
    grid[0].ty = STARTPOINT;
    grid[0].is_left_gap = true;
    let (l, u) = bounds.calculate(0.0, STARTPOINT, 0, 0);
    grid[0].lower = l;
    grid[0].upper = u;
    let root_lower = l;
    let mut lower_bound = l;

    // The cost of stepping out of `cell` with a gap move.
    let gap_step = |cell: &Cell, ty: u8| -> Score {
        let same = cell.ty == ty;
        if ty == HORIZONTAL {
            match (cell.is_left_gap, same) {
                (true, true) => left_gap_extend_a,
                (true, false) => left_gap_open_a,
                (false, true) => gap_extend_a,
                (false, false) => gap_open_a,
            }
        } else {
            match (cell.is_left_gap, same) {
                (true, true) => left_gap_extend_b,
                (true, false) => left_gap_open_b,
                (false, true) => gap_extend_b,
                (false, false) => gap_open_b,
            }
        }
    };

    // The destination and score of a child move from `(pa, pb)`.
    let expand = |cell: &Cell, ty: u8, pa: usize, pb: usize| -> (usize, usize, Score) {
        match ty {
            DIAGONAL => (
                pa + 1,
                pb + 1,
                cell.present_score + scorer.score(sa[pa], sb[pb]),
            ),
            HORIZONTAL => (pa, pb + 1, cell.present_score + gap_step(cell, HORIZONTAL)),
            _ => (pa + 1, pb, cell.present_score + gap_step(cell, VERTICAL)),
        }
    };

    let mut queue: BinaryHeap<QueueNode> = BinaryHeap::new();
    let (mut curpa, mut curpb) = (0usize, 0usize);
    let mut type_total: u8 = 1;
    let mut new_type: u8 = 0;
    let mut new_upper: Score = 0.0;
    let mut pathend;

    loop {
        pathend = true;
        while curpa < na || curpb < nb {
            let curr = grid[curpa * cols + curpb];
            let (npa, npb, new_score);
            if type_total == DIAGONAL || type_total == HORIZONTAL || type_total == VERTICAL {
                // First child of this cell.
                if curpa < na && curpb < nb {
                    let mut children = [
                        (0.0, 0.0, DIAGONAL),
                        (0.0, 0.0, HORIZONTAL),
                        (0.0, 0.0, VERTICAL),
                    ];
                    for child in children.iter_mut() {
                        let ty = child.2;
                        let (pa, pb, score) = expand(&curr, ty, curpa, curpb);
                        let (lower, upper) = bounds.calculate(score, ty, pa, pb);
                        child.0 = lower;
                        child.1 = upper;
                    }
                    children
                        .sort_by(|a, b| b.0.total_cmp(&a.0).then(b.1.total_cmp(&a.1)));
                    new_type = children[0].2;
                    let (pa, pb, score) = expand(&curr, new_type, curpa, curpb);
                    npa = pa;
                    npb = pb;
                    new_score = score;
                    if children[1].1 >= root_lower {
                        queue.push(QueueNode {
                            pa: curpa,
                            pb: curpb,
                            type_upto_next: new_type + children[1].2,
                            next_type: children[1].2,
                            next_lower: children[1].0,
                            next_upper: children[1].1,
                        });
                    }
                } else if curpa < na {
                    // The query is exhausted: a right-side gap in the query.
                    new_type = VERTICAL;
                    npa = curpa + 1;
                    npb = curpb;
                    new_score = curr.present_score
                        + if curr.ty == VERTICAL {
                            gaps.extend_right_deletion
                        } else {
                            gaps.open_right_deletion
                        };
                } else {
                    // The target is exhausted: a right-side gap in the target.
                    new_type = HORIZONTAL;
                    npa = curpa;
                    npb = curpb + 1;
                    new_score = curr.present_score
                        + if curr.ty == HORIZONTAL {
                            gaps.extend_right_insertion
                        } else {
                            gaps.open_right_insertion
                        };
                }
            } else if type_total == DIAGONAL + HORIZONTAL + VERTICAL {
                // Third child: nothing left to defer.
                let (pa, pb, score) = expand(&curr, new_type, curpa, curpb);
                npa = pa;
                npb = pb;
                new_score = score;
            } else {
                // Second child, resumed from the queue; park the third one.
                let (pa, pb, score) = expand(&curr, new_type, curpa, curpb);
                npa = pa;
                npb = pb;
                new_score = score;
                let third = DIAGONAL + HORIZONTAL + VERTICAL - type_total;
                let (tpa, tpb, tscore) = expand(&curr, third, curpa, curpb);
                let (next_lower, next_upper) = bounds.calculate(tscore, third, tpa, tpb);
                if next_upper >= root_lower {
                    queue.push(QueueNode {
                        pa: curpa,
                        pb: curpb,
                        type_upto_next: DIAGONAL + HORIZONTAL + VERTICAL,
                        next_type: third,
                        next_lower,
                        next_upper,
                    });
                }
            }

            // Skip if a better path already owns the destination cell.
            let target = grid[npa * cols + npb];
            if target.filled && target.ty <= DIAGONAL && target.present_score >= new_score {
                pathend = false;
                break;
            }
            let (new_lower, new_upper_cell) = bounds.calculate(new_score, new_type, npa, npb);
            grid[npa * cols + npb] = Cell {
                present_score: new_score,
                lower: new_lower,
                upper: new_upper_cell,
                ty: new_type,
                filled: true,
                is_left_gap: (new_type == HORIZONTAL || new_type == VERTICAL)
                    && curr.is_left_gap,
            };

            curpa = npa;
            curpb = npb;
            type_total = 1;

            if new_upper_cell < lower_bound && lower_bound - new_upper_cell > epsilon {
                pathend = false;
                break;
            }
        }

        let present = grid[curpa * cols + curpb].present_score;
        if present > lower_bound && present - lower_bound > epsilon && pathend {
            // The branch was fully expanded: its score is the new floor.
            lower_bound = present;
        }

        let Some(root) = queue.pop() else { break };
        curpa = root.pa;
        curpb = root.pb;
        type_total = root.type_upto_next;
        new_type = root.next_type;
        new_upper = root.next_upper;
        if !(lower_bound < new_upper && new_upper - lower_bound > epsilon) {
            break;
        }
    }

    if lower_bound < new_upper && new_upper - lower_bound > epsilon {
        return Err(Error::Internal(
            "FOGSAA ended with unexplored branches above the bound".into(),
        ));
    }
    let score = grid[na * cols + nb].present_score;
    Ok(Search { grid, cols, score })
}

/// FOGSAA, score only.
#[allow(clippy::too_many_arguments)]
pub fn score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
    match_score: Score,
    mismatch_score: Score,
) -> Result<Score> {
    check_scores(match_score, mismatch_score, gaps);
    let search = search(sa, sb, gaps, scorer, epsilon, match_score, mismatch_score)?;
    Ok(search.score)
}

/// FOGSAA with a trace of its single optimal path.
#[allow(clippy::too_many_arguments)]
pub fn align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
    match_score: Score,
    mismatch_score: Score,
) -> Result<(Score, TraceMatrix)> {
    check_scores(match_score, mismatch_score, gaps);
    let search = search(sa, sb, gaps, scorer, epsilon, match_score, mismatch_score)?;

    let (na, nb) = (sa.len(), sb.len());
    let mut tm = TraceMatrix::new(na, nb)?;
    let (mut i, mut j) = (na, nb);
    loop {
        match search.grid[search.at(i, j)].ty {
            0 | STARTPOINT => {
                tm.set_trace(i, j, 0);
                break;
            }
            DIAGONAL => {
                tm.set_trace(i, j, DIAGONAL);
                i -= 1;
                j -= 1;
                tm.set_path(i, j, DIAGONAL);
            }
            HORIZONTAL => {
                tm.set_trace(i, j, HORIZONTAL);
                j -= 1;
                tm.set_path(i, j, HORIZONTAL);
            }
            VERTICAL => {
                tm.set_trace(i, j, VERTICAL);
                i -= 1;
                tm.set_path(i, j, VERTICAL);
            }
            ty => {
                return Err(Error::Internal(format!(
                    "unexpected FOGSAA cell type {ty} at ({i}, {j})"
                )));
            }
        }
    }
    tm.set_path(na, nb, 0);
    Ok((search.score, tm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::scoring::substitution::Comparison;

    fn affine(open: Score, extend: Score) -> GapPenalties {
        let mut gaps = GapPenalties::default();
        gaps.set_open(open);
        gaps.set_extend(extend);
        gaps
    }

    fn fogsaa_score(sa: &[i32], sb: &[i32], gaps: &GapPenalties, m: Score, x: Score) -> Score {
        let scorer = Comparison::new(m, x, None);
        score(sa, sb, gaps, &scorer, 1e-6, m, x).unwrap()
    }

    #[test]
    fn test_matches_gotoh_global() {
        let gaps = affine(-2.0, -1.0);
        let scorer = Comparison::new(2.0, -1.0, None);
        for (sa, sb) in [
            (vec![0, 1, 2, 3], vec![0, 2, 2, 3]),
            (vec![0, 1, 2, 3, 0, 1], vec![0, 1, 3, 0, 1]),
            (vec![3, 2, 1, 0], vec![3, 2, 1, 0]),
        ] {
            let expected = super::super::gotoh::global_score(&sa, &sb, &gaps, &scorer);
            let got = fogsaa_score(&sa, &sb, &gaps, 2.0, -1.0);
            assert!(
                (got - expected).abs() < 1e-9,
                "fogsaa {got} != gotoh {expected}"
            );
        }
    }

    #[test]
    fn test_align_traces_single_path() {
        let gaps = affine(-2.0, -1.0);
        let scorer = Comparison::new(2.0, -1.0, None);
        let sa = [0, 1, 2, 3];
        let sb = [0, 2, 2, 3];
        let (score, tm) = align(&sa, &sb, &gaps, &scorer, 1e-6, 2.0, -1.0).unwrap();
        assert!((score - 5.0).abs() < 1e-9);
        // The path plane walks from the origin straight to the corner.
        let (mut i, mut j, mut steps) = (0, 0, 0);
        loop {
            match tm.path(i, j) {
                DIAGONAL => {
                    i += 1;
                    j += 1;
                }
                HORIZONTAL => j += 1,
                VERTICAL => i += 1,
                _ => break,
            }
            steps += 1;
        }
        assert_eq!((i, j), (4, 4));
        assert_eq!(steps, 4);
    }

    #[test]
    fn test_forced_edge_moves() {
        // One sequence much longer than the other still terminates.
        let gaps = affine(-1.0, -1.0);
        let got = fogsaa_score(&[0], &[0, 1, 2, 3, 0, 1], &gaps, 1.0, -1.0);
        let scorer = Comparison::new(1.0, -1.0, None);
        let expected =
            super::super::gotoh::global_score(&[0], &[0, 1, 2, 3, 0, 1], &gaps, &scorer);
        assert!((got - expected).abs() < 1e-9);
    }
}
