use crate::pairwise::trace::{TraceMatrix, ENDPOINT, IX_MATRIX, IY_MATRIX, M_MATRIX};
use crate::Score;

pub mod fogsaa;
pub mod gotoh;
pub mod nwsw;
pub mod wsb;

/// The maximum of three candidate scores.
#[inline(always)]
pub fn select3(s1: Score, s2: Score, s3: Score) -> Score {
    let mut score = s1;
    if s2 > score {
        score = s2;
    }
    if s3 > score {
        score = s3;
    }
    score
}

/// Pick the best of the three layer values; bits mark every layer that ties
/// within epsilon.
#[inline(always)]
pub fn select_layers(m: Score, ix: Score, iy: Score, epsilon: Score) -> (Score, u8) {
    let mut score = m;
    let mut trace = M_MATRIX;
    if ix > score + epsilon {
        score = ix;
        trace = IX_MATRIX;
    } else if ix > score - epsilon {
        trace |= IX_MATRIX;
    }
    if iy > score + epsilon {
        score = iy;
        trace = IY_MATRIX;
    } else if iy > score - epsilon {
        trace |= IY_MATRIX;
    }
    (score, trace)
}

/// When the running local maximum strictly increases, every ENDPOINT awarded
/// so far is stale. Cells are visited in row-major order, so it suffices to
/// clear the stretch between the previous maximum cell `(im, jm)` and the
/// current cell `(i, j)`.
pub fn clear_endpoints(
    tm: &mut TraceMatrix,
    im: &mut usize,
    jm: &mut usize,
    i: usize,
    j: usize,
) {
    let nb = tm.nb();
    while *im < i {
        while *jm <= nb {
            let trace = tm.trace(*im, *jm) & !ENDPOINT;
            tm.set_trace(*im, *jm, trace);
            *jm += 1;
        }
        *im += 1;
        *jm = 0;
    }
    while *jm < j {
        let trace = tm.trace(*im, *jm) & !ENDPOINT;
        tm.set_trace(*im, *jm, trace);
        *jm += 1;
    }
    *im = i;
    *jm = j;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairwise::trace::DIAGONAL;

    #[test]
    fn test_select3() {
        assert_eq!(select3(1.0, 2.0, 3.0), 3.0);
        assert_eq!(select3(5.0, 2.0, 3.0), 5.0);
        assert_eq!(select3(1.0, 7.0, 3.0), 7.0);
        assert_eq!(select3(f64::NEG_INFINITY, f64::NEG_INFINITY, 0.0), 0.0);
    }

    #[test]
    fn test_clear_endpoints_sweeps_row_major() {
        let mut tm = TraceMatrix::new(2, 2).unwrap();
        for i in 0..=2 {
            for j in 0..=2 {
                tm.set_trace(i, j, DIAGONAL | ENDPOINT);
            }
        }
        let (mut im, mut jm) = (0, 0);
        clear_endpoints(&mut tm, &mut im, &mut jm, 1, 2);
        assert_eq!((im, jm), (1, 2));

        // Everything before (1, 2) in row-major order lost its endpoint.
        for (i, j) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)] {
            assert_eq!(tm.trace(i, j), DIAGONAL);
        }
        // The current cell and the cells after it are untouched.
        for (i, j) in [(1, 2), (2, 0), (2, 1), (2, 2)] {
            assert_eq!(tm.trace(i, j), DIAGONAL | ENDPOINT);
        }
    }
}
