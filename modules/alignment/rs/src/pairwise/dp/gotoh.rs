use crate::pairwise::scoring::gaps::GapPenalties;
use crate::pairwise::scoring::substitution::Scorer;
use crate::pairwise::trace::{
    TraceMatrix, DONE, ENDPOINT, IX_MATRIX, IY_MATRIX, M_MATRIX, STARTPOINT,
};
use crate::{Result, Score};

use super::{clear_endpoints, select3, select_layers};

const NEG: Score = Score::MIN;

fn create_trace(na: usize, nb: usize, local: bool) -> Result<TraceMatrix> {
    let mut tm = TraceMatrix::with_gotoh(na, nb)?;
    if local {
        for i in 0..=na {
            tm.set_trace(i, 0, STARTPOINT);
        }
        for j in 1..=nb {
            tm.set_trace(0, j, STARTPOINT);
        }
    } else {
        // Column 0 is one long deletion reaching back to the origin, row 0
        // one long insertion; the gap overlays chain them together.
        for i in 1..=na {
            tm.set_gotoh_ix(i, 0, IX_MATRIX);
        }
        tm.set_gotoh_ix(1, 0, M_MATRIX);
        for j in 1..=nb {
            tm.set_gotoh_iy(0, j, IY_MATRIX);
        }
        tm.set_gotoh_iy(0, 1, M_MATRIX);
    }
    Ok(tm)
}

/// Gotoh global alignment, score only. `gaps` must already be oriented for
/// the strand being aligned.
pub fn global_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
) -> Score {
    let (na, nb) = (sa.len(), sb.len());
    let gap_open_a = gaps.open_internal_insertion;
    let gap_open_b = gaps.open_internal_deletion;
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;
    let left_gap_open_a = gaps.open_left_insertion;
    let left_gap_open_b = gaps.open_left_deletion;
    let left_gap_extend_a = gaps.extend_left_insertion;
    let left_gap_extend_b = gaps.extend_left_deletion;
    let right_gap_open_a = gaps.open_right_insertion;
    let right_gap_open_b = gaps.open_right_deletion;
    let right_gap_extend_a = gaps.extend_right_insertion;
    let right_gap_extend_b = gaps.extend_right_deletion;

    let mut m_row = vec![NEG; nb + 1];
    let mut ix_row = vec![NEG; nb + 1];
    let mut iy_row = vec![NEG; nb + 1];
    m_row[0] = 0.0;
    for j in 1..=nb {
        iy_row[j] = left_gap_open_a + left_gap_extend_a * (j - 1) as Score;
    }

    let mut score;
    let (mut m_temp, mut ix_temp, mut iy_temp);
    for i in 1..na {
        let ka = sa[i - 1];
        m_temp = m_row[0];
        ix_temp = ix_row[0];
        iy_temp = iy_row[0];
        m_row[0] = NEG;
        ix_row[0] = left_gap_open_b + left_gap_extend_b * (i - 1) as Score;
        iy_row[0] = NEG;
        for j in 1..nb {
            let kb = sb[j - 1];
            score = select3(m_temp, ix_temp, iy_temp);
            m_temp = m_row[j];
            m_row[j] = score + scorer.score(ka, kb);
            score = select3(
                m_temp + gap_open_b,
                ix_row[j] + gap_extend_b,
                iy_row[j] + gap_open_b,
            );
            ix_temp = ix_row[j];
            ix_row[j] = score;
            score = select3(
                m_row[j - 1] + gap_open_a,
                ix_row[j - 1] + gap_open_a,
                iy_row[j - 1] + gap_extend_a,
            );
            iy_temp = iy_row[j];
            iy_row[j] = score;
        }
        let kb = sb[nb - 1];
        score = select3(m_temp, ix_temp, iy_temp);
        m_temp = m_row[nb];
        m_row[nb] = score + scorer.score(ka, kb);
        score = select3(
            m_temp + right_gap_open_b,
            ix_row[nb] + right_gap_extend_b,
            iy_row[nb] + right_gap_open_b,
        );
        ix_row[nb] = score;
        score = select3(
            m_row[nb - 1] + gap_open_a,
            iy_row[nb - 1] + gap_extend_a,
            ix_row[nb - 1] + gap_open_a,
        );
        iy_row[nb] = score;
    }

    let ka = sa[na - 1];
    m_temp = m_row[0];
    ix_temp = ix_row[0];
    iy_temp = iy_row[0];
    m_row[0] = NEG;
    ix_row[0] = left_gap_open_b + left_gap_extend_b * (na - 1) as Score;
    iy_row[0] = NEG;
    for j in 1..nb {
        let kb = sb[j - 1];
        score = select3(m_temp, ix_temp, iy_temp);
        m_temp = m_row[j];
        m_row[j] = score + scorer.score(ka, kb);
        score = select3(
            m_temp + gap_open_b,
            ix_row[j] + gap_extend_b,
            iy_row[j] + gap_open_b,
        );
        ix_temp = ix_row[j];
        ix_row[j] = score;
        score = select3(
            m_row[j - 1] + right_gap_open_a,
            iy_row[j - 1] + right_gap_extend_a,
            ix_row[j - 1] + right_gap_open_a,
        );
        iy_temp = iy_row[j];
        iy_row[j] = score;
    }

    let kb = sb[nb - 1];
    score = select3(m_temp, ix_temp, iy_temp);
    m_temp = m_row[nb];
    m_row[nb] = score + scorer.score(ka, kb);
    score = select3(
        m_temp + right_gap_open_b,
        ix_row[nb] + right_gap_extend_b,
        iy_row[nb] + right_gap_open_b,
    );
    ix_row[nb] = score;
    score = select3(
        m_row[nb - 1] + right_gap_open_a,
        ix_row[nb - 1] + right_gap_open_a,
        iy_row[nb - 1] + right_gap_extend_a,
    );
    iy_row[nb] = score;

    select3(m_row[nb], ix_row[nb], iy_row[nb])
}

/// Gotoh local alignment, score only. End gaps cannot occur, so only the
/// internal penalties apply.
pub fn local_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
) -> Score {
    let (na, nb) = (sa.len(), sb.len());
    let gap_open_a = gaps.open_internal_insertion;
    let gap_open_b = gaps.open_internal_deletion;
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;

    let mut m_row = vec![NEG; nb + 1];
    let mut ix_row = vec![NEG; nb + 1];
    let mut iy_row = vec![NEG; nb + 1];
    m_row[0] = 0.0;
    for j in 1..=nb {
        iy_row[j] = 0.0;
    }

    let mut maximum: Score = 0.0;
    let mut score;
    let (mut m_temp, mut ix_temp, mut iy_temp);

    let clamp = |score: &mut Score, maximum: &mut Score| {
        if *score < 0.0 {
            *score = 0.0;
        } else if *score > *maximum {
            *maximum = *score;
        }
    };

    for i in 1..na {
        let ka = sa[i - 1];
        m_temp = m_row[0];
        ix_temp = ix_row[0];
        iy_temp = iy_row[0];
        m_row[0] = NEG;
        ix_row[0] = 0.0;
        iy_row[0] = NEG;
        for j in 1..nb {
            let kb = sb[j - 1];
            score = select3(m_temp, ix_temp, iy_temp) + scorer.score(ka, kb);
            clamp(&mut score, &mut maximum);
            m_temp = m_row[j];
            m_row[j] = score;
            score = select3(
                m_temp + gap_open_b,
                ix_row[j] + gap_extend_b,
                iy_row[j] + gap_open_b,
            );
            clamp(&mut score, &mut maximum);
            ix_temp = ix_row[j];
            ix_row[j] = score;
            score = select3(
                m_row[j - 1] + gap_open_a,
                ix_row[j - 1] + gap_open_a,
                iy_row[j - 1] + gap_extend_a,
            );
            clamp(&mut score, &mut maximum);
            iy_temp = iy_row[j];
            iy_row[j] = score;
        }
        let kb = sb[nb - 1];
        ix_row[nb] = 0.0;
        iy_row[nb] = 0.0;
        score = select3(m_temp, ix_temp, iy_temp) + scorer.score(ka, kb);
        clamp(&mut score, &mut maximum);
        m_temp = m_row[nb];
        m_row[nb] = score;
        let _ = m_temp;
    }
    let ka = sa[na - 1];
    m_temp = m_row[0];
    ix_temp = ix_row[0];
    iy_temp = iy_row[0];
    m_row[0] = NEG;
    ix_row[0] = 0.0;
    iy_row[0] = NEG;
    for j in 1..nb {
        let kb = sb[j - 1];
        score = select3(m_temp, ix_temp, iy_temp) + scorer.score(ka, kb);
        clamp(&mut score, &mut maximum);
        m_temp = m_row[j];
        m_row[j] = score;
        ix_temp = ix_row[j];
        iy_temp = iy_row[j];
        ix_row[j] = 0.0;
        iy_row[j] = 0.0;
    }
    let kb = sb[nb - 1];
    score = select3(m_temp, ix_temp, iy_temp) + scorer.score(ka, kb);
    clamp(&mut score, &mut maximum);
    maximum
}

/// Gotoh global alignment with the full trace. `gaps` must already be
/// oriented for the strand being aligned.
pub fn global_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let gap_open_a = gaps.open_internal_insertion;
    let gap_open_b = gaps.open_internal_deletion;
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;
    let left_gap_open_a = gaps.open_left_insertion;
    let left_gap_open_b = gaps.open_left_deletion;
    let left_gap_extend_a = gaps.extend_left_insertion;
    let left_gap_extend_b = gaps.extend_left_deletion;
    let right_gap_open_a = gaps.open_right_insertion;
    let right_gap_open_b = gaps.open_right_deletion;
    let right_gap_extend_a = gaps.extend_right_insertion;
    let right_gap_extend_b = gaps.extend_right_deletion;

    let mut tm = create_trace(na, nb, false)?;
    let mut m_row = vec![NEG; nb + 1];
    let mut ix_row = vec![NEG; nb + 1];
    let mut iy_row = vec![NEG; nb + 1];
    m_row[0] = 0.0;
    for j in 1..=nb {
        iy_row[j] = left_gap_open_a + left_gap_extend_a * (j - 1) as Score;
    }

    let mut score;
    let mut trace;
    let (mut m_temp, mut ix_temp, mut iy_temp);
    for i in 1..na {
        let ka = sa[i - 1];
        m_temp = m_row[0];
        ix_temp = ix_row[0];
        iy_temp = iy_row[0];
        m_row[0] = NEG;
        ix_row[0] = left_gap_open_b + left_gap_extend_b * (i - 1) as Score;
        iy_row[0] = NEG;
        for j in 1..nb {
            let kb = sb[j - 1];
            (score, trace) = select_layers(m_temp, ix_temp, iy_temp, epsilon);
            tm.set_trace(i, j, trace);
            m_temp = m_row[j];
            m_row[j] = score + scorer.score(ka, kb);
            (score, trace) = select_layers(
                m_temp + gap_open_b,
                ix_row[j] + gap_extend_b,
                iy_row[j] + gap_open_b,
                epsilon,
            );
            tm.set_gotoh_ix(i, j, trace);
            ix_temp = ix_row[j];
            ix_row[j] = score;
            (score, trace) = select_layers(
                m_row[j - 1] + gap_open_a,
                ix_row[j - 1] + gap_open_a,
                iy_row[j - 1] + gap_extend_a,
                epsilon,
            );
            tm.set_gotoh_iy(i, j, trace);
            iy_temp = iy_row[j];
            iy_row[j] = score;
        }
        let kb = sb[nb - 1];
        (score, trace) = select_layers(m_temp, ix_temp, iy_temp, epsilon);
        tm.set_trace(i, nb, trace);
        m_temp = m_row[nb];
        m_row[nb] = score + scorer.score(ka, kb);
        (score, trace) = select_layers(
            m_temp + right_gap_open_b,
            ix_row[nb] + right_gap_extend_b,
            iy_row[nb] + right_gap_open_b,
            epsilon,
        );
        tm.set_gotoh_ix(i, nb, trace);
        ix_temp = ix_row[nb];
        ix_row[nb] = score;
        (score, trace) = select_layers(
            m_row[nb - 1] + gap_open_a,
            ix_row[nb - 1] + gap_open_a,
            iy_row[nb - 1] + gap_extend_a,
            epsilon,
        );
        tm.set_gotoh_iy(i, nb, trace);
        iy_temp = iy_row[nb];
        iy_row[nb] = score;
        let _ = (ix_temp, iy_temp);
    }
    let ka = sa[na - 1];
    m_temp = m_row[0];
    ix_temp = ix_row[0];
    iy_temp = iy_row[0];
    m_row[0] = NEG;
    ix_row[0] = left_gap_open_b + left_gap_extend_b * (na - 1) as Score;
    iy_row[0] = NEG;
    for j in 1..nb {
        let kb = sb[j - 1];
        (score, trace) = select_layers(m_temp, ix_temp, iy_temp, epsilon);
        tm.set_trace(na, j, trace);
        m_temp = m_row[j];
        m_row[j] = score + scorer.score(ka, kb);
        (score, trace) = select_layers(
            m_temp + gap_open_b,
            ix_row[j] + gap_extend_b,
            iy_row[j] + gap_open_b,
            epsilon,
        );
        tm.set_gotoh_ix(na, j, trace);
        ix_temp = ix_row[j];
        ix_row[j] = score;
        (score, trace) = select_layers(
            m_row[j - 1] + right_gap_open_a,
            ix_row[j - 1] + right_gap_open_a,
            iy_row[j - 1] + right_gap_extend_a,
            epsilon,
        );
        tm.set_gotoh_iy(na, j, trace);
        iy_temp = iy_row[j];
        iy_row[j] = score;
    }
    let kb = sb[nb - 1];
    (score, trace) = select_layers(m_temp, ix_temp, iy_temp, epsilon);
    tm.set_trace(na, nb, trace);
    m_temp = m_row[nb];
    m_row[nb] = score + scorer.score(ka, kb);
    (score, trace) = select_layers(
        m_temp + right_gap_open_b,
        ix_row[nb] + right_gap_extend_b,
        iy_row[nb] + right_gap_open_b,
        epsilon,
    );
    tm.set_gotoh_ix(na, nb, trace);
    ix_row[nb] = score;
    (score, trace) = select_layers(
        m_row[nb - 1] + right_gap_open_a,
        ix_row[nb - 1] + right_gap_open_a,
        iy_row[nb - 1] + right_gap_extend_a,
        epsilon,
    );
    tm.set_gotoh_iy(na, nb, trace);
    iy_row[nb] = score;
    tm.set_path(na, nb, 0);

    // Only the layers tying the corner maximum may start a traceback.
    let score = select3(m_row[nb], ix_row[nb], iy_row[nb]);
    if m_row[nb] < score - epsilon {
        tm.set_trace(na, nb, 0);
    }
    if ix_row[nb] < score - epsilon {
        tm.set_gotoh_ix(na, nb, 0);
    }
    if iy_row[nb] < score - epsilon {
        tm.set_gotoh_iy(na, nb, 0);
    }
    Ok((score, tm))
}

/// Like [`select_layers`], but for the local gap states: a value below
/// epsilon cannot take part in any local alignment and loses its trace.
#[inline(always)]
fn select_local_gap(m: Score, ix: Score, iy: Score, epsilon: Score) -> (Score, u8) {
    let (mut score, mut trace) = select_layers(m, ix, iy, epsilon);
    if score < epsilon {
        score = NEG;
        trace = 0;
    }
    (score, trace)
}

/// Gotoh local alignment with the full trace, including the reachability
/// sweep over all three layers.
pub fn local_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    gaps: &GapPenalties,
    scorer: &P,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let gap_open_a = gaps.open_internal_insertion;
    let gap_open_b = gaps.open_internal_deletion;
    let gap_extend_a = gaps.extend_internal_insertion;
    let gap_extend_b = gaps.extend_internal_deletion;

    let mut tm = create_trace(na, nb, true)?;
    let mut m_row = vec![NEG; nb + 1];
    let mut ix_row = vec![NEG; nb + 1];
    let mut iy_row = vec![NEG; nb + 1];
    m_row[0] = 0.0;
    for j in 1..=nb {
        m_row[j] = 0.0;
    }

    let mut maximum: Score = 0.0;
    let (mut im, mut jm) = (na, nb);
    let mut score;
    let mut trace;
    let (mut m_temp, mut ix_temp, mut iy_temp);

    macro_rules! local_m_cell {
        ($i:expr, $j:expr, $pair:expr) => {{
            (score, trace) = select_layers(m_temp, ix_temp, iy_temp, epsilon);
            score += $pair;
            if score < epsilon {
                score = 0.0;
                trace = STARTPOINT;
            } else if score > maximum - epsilon {
                if score > maximum + epsilon {
                    maximum = score;
                    clear_endpoints(&mut tm, &mut im, &mut jm, $i, $j);
                }
                trace |= ENDPOINT;
            }
            tm.set_trace($i, $j, trace);
        }};
    }

    for i in 1..na {
        let ka = sa[i - 1];
        m_temp = m_row[0];
        ix_temp = ix_row[0];
        iy_temp = iy_row[0];
        m_row[0] = 0.0;
        ix_row[0] = NEG;
        iy_row[0] = NEG;
        for j in 1..nb {
            let kb = sb[j - 1];
            local_m_cell!(i, j, scorer.score(ka, kb));
            m_temp = m_row[j];
            m_row[j] = score;
            (score, trace) = select_local_gap(
                m_temp + gap_open_b,
                ix_row[j] + gap_extend_b,
                iy_row[j] + gap_open_b,
                epsilon,
            );
            tm.set_gotoh_ix(i, j, trace);
            ix_temp = ix_row[j];
            ix_row[j] = score;
            (score, trace) = select_local_gap(
                m_row[j - 1] + gap_open_a,
                ix_row[j - 1] + gap_open_a,
                iy_row[j - 1] + gap_extend_a,
                epsilon,
            );
            tm.set_gotoh_iy(i, j, trace);
            iy_temp = iy_row[j];
            iy_row[j] = score;
        }
        let kb = sb[nb - 1];
        local_m_cell!(i, nb, scorer.score(ka, kb));
        m_temp = m_row[nb];
        m_row[nb] = score;
        ix_temp = ix_row[nb];
        ix_row[nb] = 0.0;
        tm.set_gotoh_ix(i, nb, 0);
        iy_temp = iy_row[nb];
        iy_row[nb] = 0.0;
        tm.set_gotoh_iy(i, nb, 0);
        let _ = (m_temp, ix_temp, iy_temp);
    }
    m_temp = m_row[0];
    m_row[0] = 0.0;
    tm.set_trace(na, 0, 0);
    ix_temp = ix_row[0];
    ix_row[0] = NEG;
    tm.set_gotoh_ix(na, 0, 0);
    tm.set_gotoh_iy(na, 0, 0);
    iy_temp = iy_row[0];
    iy_row[0] = NEG;
    let ka = sa[na - 1];
    for j in 1..nb {
        let kb = sb[j - 1];
        local_m_cell!(na, j, scorer.score(ka, kb));
        m_temp = m_row[j];
        m_row[j] = score;
        ix_temp = ix_row[j];
        ix_row[j] = 0.0;
        tm.set_gotoh_ix(na, j, 0);
        iy_temp = iy_row[j];
        iy_row[j] = 0.0;
        tm.set_gotoh_iy(na, j, 0);
    }
    let kb = sb[nb - 1];
    local_m_cell!(na, nb, scorer.score(ka, kb));
    tm.set_gotoh_ix(na, nb, 0);
    tm.set_gotoh_iy(na, nb, 0);

    // Reachability sweep over all three layers. The path plane holds, per
    // cell, one bit per layer that a STARTPOINT can still reach.
    for j in 0..=nb {
        tm.set_path(0, j, M_MATRIX);
    }
    for i in 1..=na {
        tm.set_path(i, 0, M_MATRIX);
        for j in 1..=nb {
            let mut trace = tm.trace(i, j);
            let diag = tm.path(i - 1, j - 1);
            if diag & M_MATRIX == 0 {
                trace &= !M_MATRIX;
            }
            if diag & IX_MATRIX == 0 {
                trace &= !IX_MATRIX;
            }
            if diag & IY_MATRIX == 0 {
                trace &= !IY_MATRIX;
            }
            if trace & (STARTPOINT | M_MATRIX | IX_MATRIX | IY_MATRIX) != 0 {
                if trace & ENDPOINT != 0 {
                    // No extensions after an ENDPOINT.
                    tm.set_path(i, j, 0);
                } else {
                    tm.set_path(i, j, tm.path(i, j) | M_MATRIX);
                }
            } else {
                tm.set_path(i, j, tm.path(i, j) & !M_MATRIX);
                trace = 0;
            }
            tm.set_trace(i, j, trace);

            let mut trace = tm.gotoh_ix(i, j);
            let up = tm.path(i - 1, j);
            if up & M_MATRIX == 0 {
                trace &= !M_MATRIX;
            }
            if up & IX_MATRIX == 0 {
                trace &= !IX_MATRIX;
            }
            if up & IY_MATRIX == 0 {
                trace &= !IY_MATRIX;
            }
            if trace & (M_MATRIX | IX_MATRIX | IY_MATRIX) != 0 {
                tm.set_path(i, j, tm.path(i, j) | IX_MATRIX);
            } else {
                tm.set_path(i, j, tm.path(i, j) & !IX_MATRIX);
                trace = 0;
            }
            tm.set_gotoh_ix(i, j, trace);

            let mut trace = tm.gotoh_iy(i, j);
            let left = tm.path(i, j - 1);
            if left & M_MATRIX == 0 {
                trace &= !M_MATRIX;
            }
            if left & IX_MATRIX == 0 {
                trace &= !IX_MATRIX;
            }
            if left & IY_MATRIX == 0 {
                trace &= !IY_MATRIX;
            }
            if trace & (M_MATRIX | IX_MATRIX | IY_MATRIX) != 0 {
                tm.set_path(i, j, tm.path(i, j) | IY_MATRIX);
            } else {
                tm.set_path(i, j, tm.path(i, j) & !IY_MATRIX);
                trace = 0;
            }
            tm.set_gotoh_iy(i, j, trace);
        }
    }
    tm.set_path(0, 0, if maximum == 0.0 { DONE } else { 0 });
    Ok((maximum, tm))
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

    #[test]
    fn test_global_score_gap_placement() {
        // AAA vs AAAA: three matches and one affine gap.
        let scorer = Comparison::new(1.0, -1.0, None);
        let gaps = affine(-2.0, -1.0);
        assert_eq!(
            global_score(&[0, 0, 0], &[0, 0, 0, 0], &gaps, &scorer),
            1.0
        );
    }

    #[test]
    fn test_global_score_prefers_one_long_gap() {
        // With affine costs, one length-2 gap beats two length-1 gaps.
        let scorer = Comparison::new(1.0, -10.0, None);
        let gaps = affine(-3.0, -1.0);
        // AACCGG vs AAGG: the CC must come out as a single deletion.
        let score = global_score(&[0, 0, 1, 1, 2, 2], &[0, 0, 2, 2], &gaps, &scorer);
        assert_eq!(score, 4.0 - 4.0);
    }

    #[test]
    fn test_global_align_matches_score() {
        let scorer = Comparison::new(2.0, -1.0, None);
        let gaps = affine(-2.0, -1.0);
        for (sa, sb) in [
            (vec![0, 1, 2, 3], vec![0, 2, 2, 3]),
            (vec![0, 0, 0], vec![0, 0, 0, 0]),
            (vec![1, 2], vec![1, 0, 0, 0, 2]),
        ] {
            let expected = global_score(&sa, &sb, &gaps, &scorer);
            let (score, _) = global_align(&sa, &sb, &gaps, &scorer, 1e-6).unwrap();
            assert!((score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_local_score_matches_align() {
        let scorer = Comparison::new(1.0, -2.0, None);
        let gaps = affine(-5.0, -1.0);
        for (sa, sb) in [
            (vec![0, 0, 2, 0, 0], vec![0, 2, 0]),
            (vec![0, 1, 2, 3], vec![2, 0, 1, 2, 3, 1]),
            (vec![3, 3], vec![0, 1]),
        ] {
            let expected = local_score(&sa, &sb, &gaps, &scorer);
            let (score, _) = local_align(&sa, &sb, &gaps, &scorer, 1e-6).unwrap();
            assert!((score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_local_no_alignment_sentinel() {
        let scorer = Comparison::new(1.0, -2.0, None);
        let (score, tm) = local_align(&[0, 1], &[2, 3], &affine(-5.0, -1.0), &scorer, 1e-6).unwrap();
        assert_eq!(score, 0.0);
        assert_eq!(tm.path(0, 0), DONE);
    }
}
