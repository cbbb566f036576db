use crate::pairwise::trace::{
    checked_vec, TraceMatrix, DIAGONAL, ENDPOINT, HORIZONTAL, IX_MATRIX, IY_MATRIX, M_MATRIX,
    STARTPOINT, VERTICAL,
};
use crate::Result;

/// A path count; `None` once an addition left the signed-size range.
pub type Count = Option<usize>;

const ONE: Count = Some(1);
const ZERO: Count = Some(0);

#[inline]
fn safe_add(count: Count, term: Count) -> Count {
    count?
        .checked_add(term?)
        .filter(|&value| value <= isize::MAX as usize)
}

/// Forward DP over the trace bits: the count of a cell is the sum of the
/// counts of every predecessor whose direction bit survived the fill.
pub fn needlemanwunsch(tm: &TraceMatrix) -> Count {
    let (na, nb) = (tm.na(), tm.nb());
    let mut counts: Vec<Count> = vec![ZERO; nb + 1];
    counts[0] = ONE;
    for j in 1..=nb {
        counts[j] = if tm.trace(0, j) & HORIZONTAL != 0 {
            counts[j - 1]
        } else {
            ZERO
        };
    }
    let mut count = counts[nb];
    for i in 1..=na {
        count = if tm.trace(i, 0) & VERTICAL != 0 {
            counts[0]
        } else {
            ZERO
        };
        let mut temp = counts[0];
        counts[0] = count;
        for j in 1..=nb {
            let trace = tm.trace(i, j);
            count = ZERO;
            if trace & HORIZONTAL != 0 {
                count = safe_add(count, counts[j - 1]);
            }
            if trace & VERTICAL != 0 {
                count = safe_add(count, counts[j]);
            }
            if trace & DIAGONAL != 0 {
                count = safe_add(count, temp);
            }
            temp = counts[j];
            counts[j] = count;
        }
    }
    count
}

/// Like [`needlemanwunsch`], but paths sprout from STARTPOINT cells and only
/// counts arriving diagonally at an ENDPOINT contribute to the total.
pub fn smithwaterman(tm: &TraceMatrix) -> Count {
    let (na, nb) = (tm.na(), tm.nb());
    let mut counts: Vec<Count> = vec![ONE; nb + 1];
    let mut total = ZERO;
    for i in 1..=na {
        let mut temp = counts[0];
        counts[0] = ONE;
        for j in 1..=nb {
            let trace = tm.trace(i, j);
            let mut count = ZERO;
            if trace & DIAGONAL != 0 {
                count = safe_add(count, temp);
            }
            if trace & ENDPOINT != 0 {
                total = safe_add(total, count);
            }
            if trace & HORIZONTAL != 0 {
                count = safe_add(count, counts[j - 1]);
            }
            if trace & VERTICAL != 0 {
                count = safe_add(count, counts[j]);
            }
            temp = counts[j];
            if count == ZERO && trace & STARTPOINT != 0 {
                count = ONE;
            }
            counts[j] = count;
        }
    }
    total
}

/// Three parallel count rows, one per layer, combined at the corner.
pub fn gotoh_global(tm: &TraceMatrix) -> Count {
    let (na, nb) = (tm.na(), tm.nb());
    let mut m_counts: Vec<Count> = vec![ZERO; nb + 1];
    let mut ix_counts: Vec<Count> = vec![ZERO; nb + 1];
    let mut iy_counts: Vec<Count> = vec![ONE; nb + 1];
    m_counts[0] = ONE;
    iy_counts[0] = ZERO;
    for i in 1..=na {
        let mut m_temp = m_counts[0];
        m_counts[0] = ZERO;
        let mut ix_temp = ix_counts[0];
        ix_counts[0] = ONE;
        let mut iy_temp = iy_counts[0];
        iy_counts[0] = ZERO;
        for j in 1..=nb {
            let trace = tm.trace(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_temp);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_temp);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_temp);
            }
            m_temp = m_counts[j];
            m_counts[j] = count;

            let trace = tm.gotoh_ix(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_temp);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_counts[j]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_counts[j]);
            }
            ix_temp = ix_counts[j];
            ix_counts[j] = count;

            let trace = tm.gotoh_iy(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_counts[j - 1]);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_counts[j - 1]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_counts[j - 1]);
            }
            iy_temp = iy_counts[j];
            iy_counts[j] = count;
        }
    }
    let mut count = ZERO;
    if tm.trace(na, nb) != 0 {
        count = safe_add(count, m_counts[nb]);
    }
    if tm.gotoh_ix(na, nb) != 0 {
        count = safe_add(count, ix_counts[nb]);
    }
    if tm.gotoh_iy(na, nb) != 0 {
        count = safe_add(count, iy_counts[nb]);
    }
    count
}

pub fn gotoh_local(tm: &TraceMatrix) -> Count {
    let (na, nb) = (tm.na(), tm.nb());
    let mut m_counts: Vec<Count> = vec![ONE; nb + 1];
    let mut ix_counts: Vec<Count> = vec![ZERO; nb + 1];
    let mut iy_counts: Vec<Count> = vec![ZERO; nb + 1];
    let mut total = ZERO;
    for i in 1..=na {
        let mut m_temp = m_counts[0];
        m_counts[0] = ONE;
        let mut ix_temp = ix_counts[0];
        ix_counts[0] = ZERO;
        let mut iy_temp = iy_counts[0];
        iy_counts[0] = ZERO;
        for j in 1..=nb {
            let trace = tm.trace(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_temp);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_temp);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_temp);
            }
            if count == ZERO && trace & STARTPOINT != 0 {
                count = ONE;
            }
            m_temp = m_counts[j];
            m_counts[j] = count;
            if trace & ENDPOINT != 0 {
                total = safe_add(total, count);
            }

            let trace = tm.gotoh_ix(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_temp);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_counts[j]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_counts[j]);
            }
            ix_temp = ix_counts[j];
            ix_counts[j] = count;

            let trace = tm.gotoh_iy(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, m_counts[j - 1]);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, ix_counts[j - 1]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, iy_counts[j - 1]);
            }
            iy_temp = iy_counts[j];
            iy_counts[j] = count;
        }
    }
    total
}

struct LayerCounts {
    cols: usize,
    m: Vec<Count>,
    ix: Vec<Count>,
    iy: Vec<Count>,
}

impl LayerCounts {
    fn new(na: usize, nb: usize) -> Result<Self> {
        let cols = nb + 1;
        let len = (na + 1) * cols;
        Ok(Self {
            cols,
            m: checked_vec(len)?,
            ix: checked_vec(len)?,
            iy: checked_vec(len)?,
        })
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> usize {
        i * self.cols + j
    }
}

/// The gap-length lists make counts non-local in each row, so all three
/// layers keep full matrices of counts.
pub fn waterman_smith_beyer_global(tm: &TraceMatrix) -> Result<Count> {
    let (na, nb) = (tm.na(), tm.nb());
    let mut counts = LayerCounts::new(na, nb)?;
    for i in 0..=na {
        for j in 0..=nb {
            let trace = tm.trace(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, counts.m[counts.at(i - 1, j - 1)]);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, counts.ix[counts.at(i - 1, j - 1)]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, counts.iy[counts.at(i - 1, j - 1)]);
            }
            if count == ZERO {
                // Only the origin has no incoming trace and still counts.
                count = ONE;
            }
            let at = counts.at(i, j);
            counts.m[at] = count;

            let cell = tm.wsb_cell(i, j);
            let mut count = ZERO;
            for &gap in &cell.m_ix {
                count = safe_add(count, counts.m[counts.at(i - gap, j)]);
            }
            for &gap in &cell.iy_ix {
                count = safe_add(count, counts.iy[counts.at(i - gap, j)]);
            }
            counts.ix[at] = count;

            let mut count = ZERO;
            for &gap in &cell.m_iy {
                count = safe_add(count, counts.m[counts.at(i, j - gap)]);
            }
            for &gap in &cell.ix_iy {
                count = safe_add(count, counts.ix[counts.at(i, j - gap)]);
            }
            counts.iy[at] = count;
        }
    }
    let mut count = ZERO;
    let corner = counts.at(na, nb);
    let cell = tm.wsb_cell(na, nb);
    if tm.trace(na, nb) != 0 {
        count = safe_add(count, counts.m[corner]);
    }
    if !cell.m_ix.is_empty() || !cell.iy_ix.is_empty() {
        count = safe_add(count, counts.ix[corner]);
    }
    if !cell.m_iy.is_empty() || !cell.ix_iy.is_empty() {
        count = safe_add(count, counts.iy[corner]);
    }
    Ok(count)
}

pub fn waterman_smith_beyer_local(tm: &TraceMatrix) -> Result<Count> {
    let (na, nb) = (tm.na(), tm.nb());
    let mut counts = LayerCounts::new(na, nb)?;
    let mut total = ZERO;
    for i in 0..=na {
        for j in 0..=nb {
            let trace = tm.trace(i, j);
            let mut count = ZERO;
            if trace & M_MATRIX != 0 {
                count = safe_add(count, counts.m[counts.at(i - 1, j - 1)]);
            }
            if trace & IX_MATRIX != 0 {
                count = safe_add(count, counts.ix[counts.at(i - 1, j - 1)]);
            }
            if trace & IY_MATRIX != 0 {
                count = safe_add(count, counts.iy[counts.at(i - 1, j - 1)]);
            }
            if count == ZERO && trace & STARTPOINT != 0 {
                count = ONE;
            }
            let at = counts.at(i, j);
            counts.m[at] = count;
            if trace & ENDPOINT != 0 {
                total = safe_add(total, count);
            }

            let cell = tm.wsb_cell(i, j);
            let mut count = ZERO;
            for &gap in &cell.m_ix {
                count = safe_add(count, counts.m[counts.at(i - gap, j)]);
            }
            for &gap in &cell.iy_ix {
                count = safe_add(count, counts.iy[counts.at(i - gap, j)]);
            }
            counts.ix[at] = count;

            let mut count = ZERO;
            for &gap in &cell.m_iy {
                count = safe_add(count, counts.m[counts.at(i, j - gap)]);
            }
            for &gap in &cell.ix_iy {
                count = safe_add(count, counts.ix[counts.at(i, j - gap)]);
            }
            counts.iy[at] = count;
        }
    }
    Ok(total)
}
