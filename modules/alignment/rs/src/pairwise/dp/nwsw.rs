use crate::pairwise::scoring::gaps::GapPenalties;
use crate::pairwise::scoring::substitution::Scorer;
use crate::pairwise::trace::{
    TraceMatrix, DIAGONAL, ENDPOINT, HORIZONTAL, NONE, STARTPOINT, VERTICAL,
};
use crate::{Result, Score};

use super::{clear_endpoints, select3};

fn create_trace(na: usize, nb: usize, local: bool) -> Result<TraceMatrix> {
    let mut tm = TraceMatrix::new(na, nb)?;
    if local {
        for i in 0..=na {
            tm.set_trace(i, 0, STARTPOINT);
        }
        for j in 1..=nb {
            tm.set_trace(0, j, STARTPOINT);
        }
    } else {
        for i in 1..=na {
            tm.set_trace(i, 0, VERTICAL);
        }
        for j in 1..=nb {
            tm.set_trace(0, j, HORIZONTAL);
        }
    }
    Ok(tm)
}

/// Needleman-Wunsch, score only. `gaps` must already be oriented for the
/// strand being aligned.
pub fn global_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
) -> Score {
    let (na, nb) = (sa.len(), sb.len());
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;
    let left_gap_extend_a = gaps.extend_left_insertion;
    let right_gap_extend_a = gaps.extend_right_insertion;
    let left_gap_extend_b = gaps.extend_left_deletion;
    let right_gap_extend_b = gaps.extend_right_deletion;

    let mut row = vec![0.0; nb + 1];
    for (j, value) in row.iter_mut().enumerate().skip(1) {
        *value = j as Score * left_gap_extend_a;
    }

    let mut score;
    let mut temp;
    for i in 1..na {
        let ka = sa[i - 1];
        temp = row[0];
        row[0] = i as Score * left_gap_extend_b;
        for j in 1..nb {
            score = select3(
                temp + scorer.score(ka, sb[j - 1]),
                row[j] + gap_extend_b,
                row[j - 1] + gap_extend_a,
            );
            temp = row[j];
            row[j] = score;
        }
        score = select3(
            temp + scorer.score(ka, sb[nb - 1]),
            row[nb] + right_gap_extend_b,
            row[nb - 1] + gap_extend_a,
        );
        row[nb] = score;
    }
    let ka = sa[na - 1];
    temp = row[0];
    row[0] = na as Score * right_gap_extend_b;
    for j in 1..nb {
        score = select3(
            temp + scorer.score(ka, sb[j - 1]),
            row[j] + gap_extend_b,
            row[j - 1] + right_gap_extend_a,
        );
        temp = row[j];
        row[j] = score;
    }
    select3(
        temp + scorer.score(ka, sb[nb - 1]),
        row[nb] + right_gap_extend_b,
        row[nb - 1] + right_gap_extend_a,
    )
}

/// Smith-Waterman, score only. Local alignments never run through end gaps,
/// so only the internal extend penalties apply and the last row and column
/// accept nothing but the diagonal.
pub fn local_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
) -> Score {
    let (na, nb) = (sa.len(), sb.len());
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;

    let mut row = vec![0.0; nb + 1];
    let mut maximum: Score = 0.0;
    let mut score;
    let mut temp;

    for i in 1..na {
        let ka = sa[i - 1];
        temp = 0.0;
        for j in 1..nb {
            score = select3(
                temp + scorer.score(ka, sb[j - 1]),
                row[j] + gap_extend_b,
                row[j - 1] + gap_extend_a,
            );
            if score < 0.0 {
                score = 0.0;
            } else if score > maximum {
                maximum = score;
            }
            temp = row[j];
            row[j] = score;
        }
        score = temp + scorer.score(ka, sb[nb - 1]);
        if score < 0.0 {
            score = 0.0;
        } else if score > maximum {
            maximum = score;
        }
        row[nb] = score;
    }
    let ka = sa[na - 1];
    temp = 0.0;
    for j in 1..nb {
        score = temp + scorer.score(ka, sb[j - 1]);
        if score < 0.0 {
            score = 0.0;
        } else if score > maximum {
            maximum = score;
        }
        temp = row[j];
        row[j] = score;
    }
    score = temp + scorer.score(ka, sb[nb - 1]);
    if score > maximum {
        maximum = score;
    }
    maximum
}

#[allow(clippy::too_many_arguments)]
#[inline(always)]
fn global_cell(
    tm: &mut TraceMatrix,
    row: &mut [Score],
    temp: &mut Score,
    i: usize,
    j: usize,
    pair: Score,
    hgap: Score,
    vgap: Score,
    epsilon: Score,
) -> Score {
    let mut score = *temp + pair;
    let mut trace = DIAGONAL;
    let t = row[j - 1] + hgap;
    if t > score + epsilon {
        score = t;
        trace = HORIZONTAL;
    } else if t > score - epsilon {
        trace |= HORIZONTAL;
    }
    let t = row[j] + vgap;
    if t > score + epsilon {
        score = t;
        trace = VERTICAL;
    } else if t > score - epsilon {
        trace |= VERTICAL;
    }
    *temp = row[j];
    row[j] = score;
    tm.set_trace(i, j, trace);
    score
}

/// Needleman-Wunsch with the full trace. `gaps` must already be oriented for
/// the strand being aligned.
pub fn global_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;
    let left_gap_extend_a = gaps.extend_left_insertion;
    let right_gap_extend_a = gaps.extend_right_insertion;
    let left_gap_extend_b = gaps.extend_left_deletion;
    let right_gap_extend_b = gaps.extend_right_deletion;

    let mut tm = create_trace(na, nb, false)?;
    let mut row = vec![0.0; nb + 1];
    for (j, value) in row.iter_mut().enumerate().skip(1) {
        *value = j as Score * left_gap_extend_a;
    }

    let mut temp;
    for i in 1..na {
        let ka = sa[i - 1];
        temp = row[0];
        row[0] = i as Score * left_gap_extend_b;
        for j in 1..nb {
            let pair = scorer.score(ka, sb[j - 1]);
            global_cell(
                &mut tm, &mut row, &mut temp, i, j, pair, gap_extend_a, gap_extend_b, epsilon,
            );
        }
        let pair = scorer.score(ka, sb[nb - 1]);
        global_cell(
            &mut tm,
            &mut row,
            &mut temp,
            i,
            nb,
            pair,
            gap_extend_a,
            right_gap_extend_b,
            epsilon,
        );
    }
    let ka = sa[na - 1];
    temp = row[0];
    row[0] = na as Score * left_gap_extend_b;
    for j in 1..nb {
        let pair = scorer.score(ka, sb[j - 1]);
        global_cell(
            &mut tm,
            &mut row,
            &mut temp,
            na,
            j,
            pair,
            right_gap_extend_a,
            gap_extend_b,
            epsilon,
        );
    }
    let pair = scorer.score(ka, sb[nb - 1]);
    let score = global_cell(
        &mut tm,
        &mut row,
        &mut temp,
        na,
        nb,
        pair,
        right_gap_extend_a,
        right_gap_extend_b,
        epsilon,
    );
    tm.set_path(na, nb, 0);
    Ok((score, tm))
}

struct LocalFill {
    maximum: Score,
    im: usize,
    jm: usize,
}

impl LocalFill {
    /// A cell fed by all three directions.
    #[allow(clippy::too_many_arguments)]
    fn cell_hvd(
        &mut self,
        tm: &mut TraceMatrix,
        row: &mut [Score],
        temp: &mut Score,
        i: usize,
        j: usize,
        pair: Score,
        gap_extend_a: Score,
        gap_extend_b: Score,
        epsilon: Score,
    ) {
        let mut trace = DIAGONAL;
        let mut score = *temp + pair;
        let t = row[j - 1] + gap_extend_a;
        if t > score + epsilon {
            score = t;
            trace = HORIZONTAL;
        } else if t > score - epsilon {
            trace |= HORIZONTAL;
        }
        let t = row[j] + gap_extend_b;
        if t > score + epsilon {
            score = t;
            trace = VERTICAL;
        } else if t > score - epsilon {
            trace |= VERTICAL;
        }
        if score < epsilon {
            score = 0.0;
            trace = STARTPOINT;
        } else if trace & DIAGONAL != 0 && score > self.maximum - epsilon {
            if score > self.maximum + epsilon {
                clear_endpoints(tm, &mut self.im, &mut self.jm, i, j);
            }
            trace |= ENDPOINT;
        }
        tm.set_trace(i, j, trace);
        if score > self.maximum {
            self.maximum = score;
        }
        *temp = row[j];
        row[j] = score;
    }

    /// A cell on the last row or column: only the diagonal counts.
    fn cell_d(
        &mut self,
        tm: &mut TraceMatrix,
        row: &mut [Score],
        temp: &mut Score,
        i: usize,
        j: usize,
        pair: Score,
        epsilon: Score,
    ) {
        let mut score = *temp + pair;
        let mut trace = DIAGONAL;
        if score < epsilon {
            score = 0.0;
        } else if score > self.maximum - epsilon {
            if score > self.maximum + epsilon {
                clear_endpoints(tm, &mut self.im, &mut self.jm, i, j);
            }
            trace |= ENDPOINT;
        }
        tm.set_trace(i, j, trace);
        if score > self.maximum {
            self.maximum = score;
        }
        *temp = row[j];
        row[j] = score;
    }
}

/// Smith-Waterman with the full trace. After the fill, a reachability sweep
/// removes traces that no longer lead anywhere: alignments may not extend
/// past an ENDPOINT, which orphans some cells.
pub fn local_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;

    let mut tm = create_trace(na, nb, true)?;
    let mut row = vec![0.0; nb + 1];
    let mut fill = LocalFill {
        maximum: 0.0,
        im: na,
        jm: nb,
    };

    let mut temp;
    for i in 1..na {
        let ka = sa[i - 1];
        temp = 0.0;
        for j in 1..nb {
            let pair = scorer.score(ka, sb[j - 1]);
            fill.cell_hvd(
                &mut tm,
                &mut row,
                &mut temp,
                i,
                j,
                pair,
                gap_extend_a,
                gap_extend_b,
                epsilon,
            );
        }
        let pair = scorer.score(ka, sb[nb - 1]);
        fill.cell_d(&mut tm, &mut row, &mut temp, i, nb, pair, epsilon);
    }
    let ka = sa[na - 1];
    temp = 0.0;
    for j in 1..nb {
        let pair = scorer.score(ka, sb[j - 1]);
        fill.cell_d(&mut tm, &mut row, &mut temp, na, j, pair, epsilon);
    }
    let pair = scorer.score(ka, sb[nb - 1]);
    fill.cell_d(&mut tm, &mut row, &mut temp, na, nb, pair, epsilon);

    // Reachability sweep. The path plane doubles as a scratch flag: 1 marks
    // cells that some STARTPOINT can still reach.
    for j in 0..=nb {
        tm.set_path(0, j, 1);
    }
    for i in 1..=na {
        tm.set_path(i, 0, 1);
        for j in 1..=nb {
            let mut trace = tm.trace(i, j);
            if tm.path(i - 1, j - 1) == 0 {
                trace &= !DIAGONAL;
            }
            if tm.path(i, j - 1) == 0 {
                trace &= !HORIZONTAL;
            }
            if tm.path(i - 1, j) == 0 {
                trace &= !VERTICAL;
            }
            if trace & (STARTPOINT | HORIZONTAL | VERTICAL | DIAGONAL) != 0 {
                // No extensions are allowed after an ENDPOINT.
                tm.set_path(i, j, if trace & ENDPOINT != 0 { 0 } else { 1 });
            } else {
                // Unreachable: not a startpoint, not an endpoint, and all
                // traces out of it die with it.
                tm.set_path(i, j, 0);
                trace = 0;
            }
            tm.set_trace(i, j, trace);
        }
    }
    tm.set_path(0, 0, if fill.maximum == 0.0 { NONE } else { 0 });
    Ok((fill.maximum, tm))
}
