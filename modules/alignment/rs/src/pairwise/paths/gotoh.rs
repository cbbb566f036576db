use crate::pairwise::trace::{
    DIAGONAL, DONE, ENDPOINT, HORIZONTAL, IX_MATRIX, IY_MATRIX, M_MATRIX, STARTPOINT, VERTICAL,
};

use super::OptimalPaths;

/// The layer a step lands in, given its direction.
#[inline]
fn layer_of(path: u8) -> u8 {
    match path {
        HORIZONTAL => IY_MATRIX,
        VERTICAL => IX_MATRIX,
        _ => M_MATRIX,
    }
}

impl OptimalPaths {
    /// Gotoh global enumeration. The walk tracks the current layer next to
    /// the cell: pruning tries to re-source each step from the next layer in
    /// M -> Ix -> Iy order before falling back to the cell-level switch.
    pub(super) fn next_gotoh_global(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut i, mut j) = (0usize, 0usize);
        let mut m = M_MATRIX;

        let mut path = tm.path(0, 0);
        if path == DONE {
            return None;
        }
        if path == 0 {
            i = na;
            j = nb;
        } else {
            loop {
                path = tm.path(i, j);
                if path == 0 {
                    // The walk consumed the whole path; move to the next
                    // corner layer, if any.
                    m = match m {
                        M_MATRIX => IX_MATRIX,
                        IX_MATRIX => IY_MATRIX,
                        _ => 0,
                    };
                    break;
                }
                let trace = match path {
                    HORIZONTAL => {
                        j += 1;
                        tm.gotoh_iy(i, j)
                    }
                    VERTICAL => {
                        i += 1;
                        tm.gotoh_ix(i, j)
                    }
                    _ => {
                        i += 1;
                        j += 1;
                        tm.trace(i, j)
                    }
                };
                let switched = if m == M_MATRIX && trace & IX_MATRIX != 0 {
                    m = IX_MATRIX;
                    true
                } else if m != IY_MATRIX && trace & IY_MATRIX != 0 {
                    m = IY_MATRIX;
                    true
                } else {
                    false
                };
                if !switched {
                    m = layer_of(path);
                    continue;
                }
                match path {
                    HORIZONTAL => j -= 1,
                    VERTICAL => i -= 1,
                    _ => {
                        i -= 1;
                        j -= 1;
                    }
                }
                tm.set_path(i, j, path);
                break;
            }
        }

        if path == 0 {
            // Pick the next corner layer whose trace survived the fill.
            m = if m == M_MATRIX && tm.trace(na, nb) != 0 {
                M_MATRIX
            } else if (m == M_MATRIX || m == IX_MATRIX) && tm.gotoh_ix(na, nb) != 0 {
                IX_MATRIX
            } else if (m == M_MATRIX || m == IX_MATRIX || m == IY_MATRIX)
                && tm.gotoh_iy(na, nb) != 0
            {
                IY_MATRIX
            } else {
                tm.set_path(0, 0, DONE);
                return None;
            };
            i = na;
            j = nb;
        }

        // Enter the chosen layer and descend, preferring M > Ix > Iy.
        let mut trace;
        match m {
            M_MATRIX => {
                trace = tm.trace(i, j);
                path = DIAGONAL;
                i -= 1;
                j -= 1;
            }
            IX_MATRIX => {
                trace = tm.gotoh_ix(i, j);
                path = VERTICAL;
                i -= 1;
            }
            _ => {
                trace = tm.gotoh_iy(i, j);
                path = HORIZONTAL;
                j -= 1;
            }
        }
        loop {
            if trace & M_MATRIX != 0 {
                let next = tm.trace(i, j);
                tm.set_path(i, j, path);
                trace = next;
                path = DIAGONAL;
                if trace == 0 {
                    break;
                }
                i -= 1;
                j -= 1;
            } else if trace & IX_MATRIX != 0 {
                tm.set_path(i, j, path);
                trace = tm.gotoh_ix(i, j);
                path = VERTICAL;
                i -= 1;
            } else if trace & IY_MATRIX != 0 {
                tm.set_path(i, j, path);
                trace = tm.gotoh_iy(i, j);
                path = HORIZONTAL;
                j -= 1;
            } else {
                break;
            }
        }
        Some((0, 0))
    }

    /// Gotoh local enumeration: endpoints are scanned in row-major order and
    /// every path runs back to a cell whose only trace is STARTPOINT.
    pub(super) fn next_gotoh_local(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut ia, mut ib) = (self.ia, self.ib);
        let mut m = M_MATRIX;

        if tm.path(0, 0) == DONE {
            return None;
        }

        let mut path = tm.path(ia, ib);
        let (mut i, mut j) = (ia, ib);
        if path != 0 {
            loop {
                path = tm.path(i, j);
                if path == 0 {
                    m = M_MATRIX;
                    ia = i;
                    ib = j;
                    break;
                }
                let trace = match path {
                    HORIZONTAL => {
                        j += 1;
                        tm.gotoh_iy(i, j)
                    }
                    VERTICAL => {
                        i += 1;
                        tm.gotoh_ix(i, j)
                    }
                    _ => {
                        i += 1;
                        j += 1;
                        tm.trace(i, j)
                    }
                };
                let switched = if m == M_MATRIX && trace & IX_MATRIX != 0 {
                    m = IX_MATRIX;
                    true
                } else if m != IY_MATRIX && trace & IY_MATRIX != 0 {
                    m = IY_MATRIX;
                    true
                } else {
                    false
                };
                if !switched {
                    m = layer_of(path);
                    continue;
                }
                match path {
                    HORIZONTAL => j -= 1,
                    VERTICAL => i -= 1,
                    _ => {
                        i -= 1;
                        j -= 1;
                    }
                }
                tm.set_path(i, j, path);
                break;
            }
        }

        if path == 0 {
            // Find the endpoint of a new path.
            loop {
                if ib < nb {
                    ib += 1;
                } else if ia < na {
                    ia += 1;
                    ib = 0;
                } else {
                    tm.set_path(0, 0, DONE);
                    return None;
                }
                if tm.trace(ia, ib) & ENDPOINT != 0 {
                    tm.set_path(ia, ib, 0);
                    break;
                }
            }
            m = M_MATRIX;
            i = ia;
            j = ib;
        }

        loop {
            let trace = match m {
                M_MATRIX => tm.trace(i, j),
                IX_MATRIX => tm.gotoh_ix(i, j),
                _ => tm.gotoh_iy(i, j),
            };
            if trace == STARTPOINT {
                self.ia = i;
                self.ib = j;
                return Some((i, j));
            }
            path = match m {
                M_MATRIX => {
                    i -= 1;
                    j -= 1;
                    DIAGONAL
                }
                IX_MATRIX => {
                    i -= 1;
                    VERTICAL
                }
                _ => {
                    j -= 1;
                    HORIZONTAL
                }
            };
            m = if trace & M_MATRIX != 0 {
                M_MATRIX
            } else if trace & IX_MATRIX != 0 {
                IX_MATRIX
            } else if trace & IY_MATRIX != 0 {
                IY_MATRIX
            } else {
                log::error!("inconsistent trace at ({i}, {j}) in Gotoh local enumeration");
                return None;
            };
            tm.set_path(i, j, path);
        }
    }
}
