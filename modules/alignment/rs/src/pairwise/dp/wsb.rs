use alnkit_core_rs::loc::Strand;

use crate::pairwise::scoring::gaps::GapPenalties;
use crate::pairwise::scoring::substitution::Scorer;
use crate::pairwise::scoring::GapFunction;
use crate::pairwise::trace::{
    checked_vec, TraceMatrix, DONE, ENDPOINT, IX_MATRIX, IY_MATRIX, M_MATRIX, STARTPOINT,
};
use crate::{Result, Score};

use super::{clear_endpoints, select3};

const NEG: Score = Score::MIN;

/// Gap costs for the general-gap algorithm: either two user callbacks or the
/// affine fallback over the twelve penalties. Deletion gaps are priced by
/// their query position, insertion gaps by their target position; the caller
/// mirrors the query position for the reverse strand.
pub struct GapCosts<'a> {
    insertion_function: Option<&'a GapFunction>,
    deletion_function: Option<&'a GapFunction>,
    gaps: &'a GapPenalties,
    na: usize,
    nb: usize,
}

impl<'a> GapCosts<'a> {
    pub fn new(
        insertion_function: Option<&'a GapFunction>,
        deletion_function: Option<&'a GapFunction>,
        gaps: &'a GapPenalties,
        na: usize,
        nb: usize,
    ) -> Self {
        Self {
            insertion_function,
            deletion_function,
            gaps,
            na,
            nb,
        }
    }

    #[inline]
    fn insertion(&self, pos: usize, len: usize) -> Score {
        match self.insertion_function {
            Some(function) => function(pos, len),
            None => self.gaps.insertion_score(pos, len, self.na),
        }
    }

    #[inline]
    fn deletion(&self, pos: usize, len: usize) -> Score {
        match self.deletion_function {
            Some(function) => function(pos, len),
            None => self.gaps.deletion_score(pos, len, self.nb),
        }
    }
}

/// The query position that selects the gap context for a deletion ending at
/// column `j`; mirrored on the reverse strand.
#[inline]
fn query_gap_start(strand: Strand, j: usize, nb: usize) -> usize {
    match strand {
        Strand::Forward => j,
        Strand::Reverse => nb - j,
    }
}

struct Layers {
    cols: usize,
    m: Vec<Score>,
    ix: Vec<Score>,
    iy: Vec<Score>,
}

impl Layers {
    fn new(na: usize, nb: usize) -> Result<Self> {
        let cols = nb + 1;
        let len = (na + 1) * cols;
        let mut layers = Self {
            cols,
            m: checked_vec(len)?,
            ix: checked_vec(len)?,
            iy: checked_vec(len)?,
        };
        layers.m.fill(NEG);
        layers.ix.fill(NEG);
        layers.iy.fill(NEG);
        Ok(layers)
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// Waterman-Smith-Beyer global alignment, score only.
pub fn global_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    costs: &GapCosts,
    scorer: &P,
    strand: Strand,
) -> Result<Score> {
    let (na, nb) = (sa.len(), sb.len());
    let mut rows = Layers::new(na, nb)?;

    let idx0 = rows.at(0, 0);
    rows.m[idx0] = 0.0;
    for i in 1..=na {
        let at = rows.at(i, 0);
        rows.ix[at] = costs.deletion(query_gap_start(strand, 0, nb), i);
    }
    for j in 1..=nb {
        let at = rows.at(0, j);
        rows.iy[at] = costs.insertion(0, j);
    }

    for i in 1..=na {
        let ka = sa[i - 1];
        for j in 1..=nb {
            let kb = sb[j - 1];
            let diag = rows.at(i - 1, j - 1);
            let score = select3(rows.m[diag], rows.ix[diag], rows.iy[diag]);
            let at = rows.at(i, j);
            rows.m[at] = score + scorer.score(ka, kb);

            let qpos = query_gap_start(strand, j, nb);
            let mut score = NEG;
            for gap in 1..=i {
                let gapscore = costs.deletion(qpos, gap);
                let src = rows.at(i - gap, j);
                let t = rows.m[src] + gapscore;
                if t > score {
                    score = t;
                }
                let t = rows.iy[src] + gapscore;
                if t > score {
                    score = t;
                }
            }
            rows.ix[at] = score;

            let mut score = NEG;
            for gap in 1..=j {
                let gapscore = costs.insertion(i, gap);
                let src = rows.at(i, j - gap);
                let t = rows.m[src] + gapscore;
                if t > score {
                    score = t;
                }
                let t = rows.ix[src] + gapscore;
                if t > score {
                    score = t;
                }
            }
            rows.iy[at] = score;
        }
    }
    let corner = rows.at(na, nb);
    Ok(select3(rows.m[corner], rows.ix[corner], rows.iy[corner]))
}

/// Waterman-Smith-Beyer local alignment, score only.
pub fn local_score<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    costs: &GapCosts,
    scorer: &P,
    strand: Strand,
) -> Result<Score> {
    let (na, nb) = (sa.len(), sb.len());
    let mut rows = Layers::new(na, nb)?;

    let idx0 = rows.at(0, 0);
    rows.m[idx0] = 0.0;
    for i in 1..=na {
        let at = rows.at(i, 0);
        rows.ix[at] = 0.0;
    }
    for j in 1..=nb {
        let at = rows.at(0, j);
        rows.iy[at] = 0.0;
    }

    let mut maximum: Score = 0.0;
    for i in 1..=na {
        let ka = sa[i - 1];
        for j in 1..=nb {
            let kb = sb[j - 1];
            let diag = rows.at(i - 1, j - 1);
            let mut score =
                select3(rows.m[diag], rows.ix[diag], rows.iy[diag]) + scorer.score(ka, kb);
            if score < 0.0 {
                score = 0.0;
            } else if score > maximum {
                maximum = score;
            }
            let at = rows.at(i, j);
            rows.m[at] = score;
            if i == na || j == nb {
                rows.ix[at] = 0.0;
                rows.iy[at] = 0.0;
                continue;
            }

            let qpos = query_gap_start(strand, j, nb);
            let mut score: Score = 0.0;
            for gap in 1..=i {
                let gapscore = costs.deletion(qpos, gap);
                let src = rows.at(i - gap, j);
                let t = rows.m[src] + gapscore;
                if t > score {
                    score = t;
                }
                let t = rows.iy[src] + gapscore;
                if t > score {
                    score = t;
                }
            }
            if score > maximum {
                maximum = score;
            }
            rows.ix[at] = score;

            let mut score: Score = 0.0;
            for gap in 1..=j {
                let gapscore = costs.insertion(i, gap);
                let src = rows.at(i, j - gap);
                let t = rows.m[src] + gapscore;
                if t > score {
                    score = t;
                }
                let t = rows.ix[src] + gapscore;
                if t > score {
                    score = t;
                }
            }
            if score > maximum {
                maximum = score;
            }
            rows.iy[at] = score;
        }
    }
    let corner = rows.at(na, nb);
    let score = select3(rows.m[corner], rows.ix[corner], rows.iy[corner]);
    Ok(maximum.max(score))
}

fn create_trace(na: usize, nb: usize, local: bool) -> Result<TraceMatrix> {
    let mut tm = TraceMatrix::with_wsb(na, nb)?;
    if local {
        for i in 0..=na {
            tm.set_trace(i, 0, STARTPOINT);
        }
        for j in 1..=nb {
            tm.set_trace(0, j, STARTPOINT);
        }
    } else {
        // Column 0 is one deletion of length i, row 0 one insertion of
        // length j; the border cells record those single gap lengths.
        for i in 1..=na {
            tm.wsb_cell_mut(i, 0).m_ix.push(i);
        }
        for j in 1..=nb {
            tm.wsb_cell_mut(0, j).m_iy.push(j);
        }
    }
    Ok(tm)
}

/// Collect every gap length whose source ties the running best within
/// epsilon; a strictly better source restarts both lists.
struct GapLists {
    score: Score,
    from_m: Vec<usize>,
    from_gap: Vec<usize>,
}

impl GapLists {
    fn new(floor: Score) -> Self {
        Self {
            score: floor,
            from_m: Vec::new(),
            from_gap: Vec::new(),
        }
    }

    #[inline]
    fn feed(&mut self, gap: usize, m_source: Score, gap_source: Score, epsilon: Score) {
        if m_source > self.score - epsilon {
            if m_source > self.score + epsilon {
                self.score = m_source;
                self.from_m.clear();
                self.from_gap.clear();
            }
            self.from_m.push(gap);
        }
        if gap_source > self.score - epsilon {
            if gap_source > self.score + epsilon {
                self.score = gap_source;
                self.from_m.clear();
                self.from_gap.clear();
            }
            self.from_gap.push(gap);
        }
    }
}

/// Waterman-Smith-Beyer global alignment with the full trace.
pub fn global_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    costs: &GapCosts,
    scorer: &P,
    strand: Strand,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let mut tm = create_trace(na, nb, false)?;
    let mut rows = Layers::new(na, nb)?;

    let idx0 = rows.at(0, 0);
    rows.m[idx0] = 0.0;
    for i in 1..=na {
        let at = rows.at(i, 0);
        rows.ix[at] = costs.deletion(query_gap_start(strand, 0, nb), i);
    }
    for j in 1..=nb {
        let at = rows.at(0, j);
        rows.iy[at] = costs.insertion(0, j);
    }

    for i in 1..=na {
        let ka = sa[i - 1];
        for j in 1..=nb {
            let kb = sb[j - 1];
            let diag = rows.at(i - 1, j - 1);
            let (score, trace) = super::select_layers(
                rows.m[diag],
                rows.ix[diag],
                rows.iy[diag],
                epsilon,
            );
            tm.set_trace(i, j, trace);
            let at = rows.at(i, j);
            rows.m[at] = score + scorer.score(ka, kb);

            let qpos = query_gap_start(strand, j, nb);
            let mut lists = GapLists::new(NEG);
            for gap in 1..=i {
                let gapscore = costs.deletion(qpos, gap);
                let src = rows.at(i - gap, j);
                lists.feed(gap, rows.m[src] + gapscore, rows.iy[src] + gapscore, epsilon);
            }
            rows.ix[at] = lists.score;
            let cell = tm.wsb_cell_mut(i, j);
            cell.m_ix = lists.from_m;
            cell.iy_ix = lists.from_gap;

            let mut lists = GapLists::new(NEG);
            for gap in 1..=j {
                let gapscore = costs.insertion(i, gap);
                let src = rows.at(i, j - gap);
                lists.feed(gap, rows.m[src] + gapscore, rows.ix[src] + gapscore, epsilon);
            }
            rows.iy[at] = lists.score;
            let cell = tm.wsb_cell_mut(i, j);
            cell.m_iy = lists.from_m;
            cell.ix_iy = lists.from_gap;
        }
    }

    // Only the layers tying the corner maximum may start a traceback.
    let corner = rows.at(na, nb);
    let score = select3(rows.m[corner], rows.ix[corner], rows.iy[corner]);
    tm.set_path(na, nb, 0);
    if rows.m[corner] < score - epsilon {
        tm.set_trace(na, nb, 0);
    }
    if rows.ix[corner] < score - epsilon {
        let cell = tm.wsb_cell_mut(na, nb);
        cell.m_ix.clear();
        cell.iy_ix.clear();
    }
    if rows.iy[corner] < score - epsilon {
        let cell = tm.wsb_cell_mut(na, nb);
        cell.m_iy.clear();
        cell.ix_iy.clear();
    }
    Ok((score, tm))
}

/// Waterman-Smith-Beyer local alignment with the full trace, including the
/// reachability sweep that filters every gap list down to reachable sources.
pub fn local_align<P: Scorer>(
    sa: &[i32],
    sb: &[i32],
    costs: &GapCosts,
    scorer: &P,
    strand: Strand,
    epsilon: Score,
) -> Result<(Score, TraceMatrix)> {
    let (na, nb) = (sa.len(), sb.len());
    let mut tm = create_trace(na, nb, true)?;
    let mut rows = Layers::new(na, nb)?;

    let idx0 = rows.at(0, 0);
    rows.m[idx0] = 0.0;
    for i in 1..=na {
        let at = rows.at(i, 0);
        rows.m[at] = 0.0;
    }
    for j in 1..=nb {
        let at = rows.at(0, j);
        rows.m[at] = 0.0;
    }

    let mut maximum: Score = 0.0;
    let (mut im, mut jm) = (na, nb);
    for i in 1..=na {
        let ka = sa[i - 1];
        for j in 1..=nb {
            let kb = sb[j - 1];
            let diag = rows.at(i - 1, j - 1);
            let (mut score, mut trace) = super::select_layers(
                rows.m[diag],
                rows.ix[diag],
                rows.iy[diag],
                epsilon,
            );
            score += scorer.score(ka, kb);
            if score < epsilon {
                score = 0.0;
                trace = STARTPOINT;
            } else if score > maximum - epsilon {
                if score > maximum + epsilon {
                    maximum = score;
                    clear_endpoints(&mut tm, &mut im, &mut jm, i, j);
                }
                trace |= ENDPOINT;
            }
            tm.set_trace(i, j, trace);
            let at = rows.at(i, j);
            rows.m[at] = score;
            if i == na || j == nb {
                // Gap states on the last row and column cannot take part in
                // a local alignment; keep them neutral and without lists.
                rows.ix[at] = score;
                rows.iy[at] = score;
                continue;
            }

            let qpos = query_gap_start(strand, j, nb);
            let mut lists = GapLists::new(NEG);
            for gap in 1..=i {
                let gapscore = costs.deletion(qpos, gap);
                let src = rows.at(i - gap, j);
                lists.feed(gap, rows.m[src] + gapscore, rows.iy[src] + gapscore, epsilon);
            }
            let mut score = lists.score;
            if score < epsilon {
                score = NEG;
                lists.from_m.clear();
                lists.from_gap.clear();
            } else if score > maximum {
                maximum = score;
            }
            rows.ix[at] = score;
            let cell = tm.wsb_cell_mut(i, j);
            cell.m_ix = lists.from_m;
            cell.iy_ix = lists.from_gap;

            let mut lists = GapLists::new(NEG);
            for gap in 1..=j {
                let gapscore = costs.insertion(i, gap);
                let src = rows.at(i, j - gap);
                lists.feed(gap, rows.m[src] + gapscore, rows.ix[src] + gapscore, epsilon);
            }
            let mut score = lists.score;
            if score < epsilon {
                score = NEG;
                lists.from_m.clear();
                lists.from_gap.clear();
            } else if score > maximum {
                maximum = score;
            }
            rows.iy[at] = score;
            let cell = tm.wsb_cell_mut(i, j);
            cell.m_iy = lists.from_m;
            cell.ix_iy = lists.from_gap;
        }
    }
    drop(rows);

    // Reachability sweep over all three layers. The path plane holds, per
    // cell, one bit per layer that a STARTPOINT can still reach; gap lists
    // are filtered down to the gap lengths whose source stays reachable.
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
            if i == na || j == nb {
                continue;
            }

            let m_ix = std::mem::take(&mut tm.wsb_cell_mut(i, j).m_ix);
            let kept: Vec<usize> = m_ix
                .into_iter()
                .filter(|&gap| tm.path(i - gap, j) & M_MATRIX != 0)
                .collect();
            let nm = kept.len();
            tm.wsb_cell_mut(i, j).m_ix = kept;

            let iy_ix = std::mem::take(&mut tm.wsb_cell_mut(i, j).iy_ix);
            let kept: Vec<usize> = iy_ix
                .into_iter()
                .filter(|&gap| tm.path(i - gap, j) & IY_MATRIX != 0)
                .collect();
            let ng = kept.len();
            tm.wsb_cell_mut(i, j).iy_ix = kept;
            if nm == 0 && ng == 0 {
                tm.set_path(i, j, tm.path(i, j) & !IX_MATRIX);
            } else {
                tm.set_path(i, j, tm.path(i, j) | IX_MATRIX);
            }

            let m_iy = std::mem::take(&mut tm.wsb_cell_mut(i, j).m_iy);
            let kept: Vec<usize> = m_iy
                .into_iter()
                .filter(|&gap| tm.path(i, j - gap) & M_MATRIX != 0)
                .collect();
            let nm = kept.len();
            tm.wsb_cell_mut(i, j).m_iy = kept;

            let ix_iy = std::mem::take(&mut tm.wsb_cell_mut(i, j).ix_iy);
            let kept: Vec<usize> = ix_iy
                .into_iter()
                .filter(|&gap| tm.path(i, j - gap) & IX_MATRIX != 0)
                .collect();
            let ng = kept.len();
            tm.wsb_cell_mut(i, j).ix_iy = kept;
            if nm == 0 && ng == 0 {
                tm.set_path(i, j, tm.path(i, j) & !IY_MATRIX);
            } else {
                tm.set_path(i, j, tm.path(i, j) | IY_MATRIX);
            }
        }
    }
    tm.set_path(0, 0, if maximum == 0.0 { DONE } else { 0 });
    Ok((maximum, tm))
}
