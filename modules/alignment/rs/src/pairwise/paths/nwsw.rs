use crate::pairwise::trace::{
    DIAGONAL, DONE, ENDPOINT, HORIZONTAL, NONE, STARTPOINT, VERTICAL,
};

use super::OptimalPaths;

impl OptimalPaths {
    /// Needleman-Wunsch enumeration. The first path follows the trace from
    /// the corner with HORIZONTAL > VERTICAL > DIAGONAL priority; later calls
    /// walk forward along the current path looking for the first cell whose
    /// step can switch to a lower-priority alternative, switch there, and
    /// re-descend to the origin.
    pub(super) fn next_needlemanwunsch(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut i, mut j) = (0usize, 0usize);

        let mut path = tm.path(0, 0);
        if path == DONE {
            return None;
        }
        if path == 0 {
            // Generate the first path.
            i = na;
            j = nb;
        } else {
            // Prune the current path until an alternative branches off.
            loop {
                if path == HORIZONTAL {
                    j += 1;
                    let trace = tm.trace(i, j);
                    if trace & VERTICAL != 0 {
                        i -= 1;
                        tm.set_path(i, j, VERTICAL);
                        break;
                    }
                    if trace & DIAGONAL != 0 {
                        i -= 1;
                        j -= 1;
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                } else if path == VERTICAL {
                    i += 1;
                    let trace = tm.trace(i, j);
                    if trace & DIAGONAL != 0 {
                        i -= 1;
                        j -= 1;
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                } else {
                    i += 1;
                    j += 1;
                }
                path = tm.path(i, j);
                if path == 0 {
                    // The whole path was pruned without finding a branch.
                    tm.set_path(0, 0, DONE);
                    return None;
                }
            }
        }

        // Follow the traceback to the origin.
        loop {
            let trace = tm.trace(i, j);
            if trace & HORIZONTAL != 0 {
                j -= 1;
                tm.set_path(i, j, HORIZONTAL);
            } else if trace & VERTICAL != 0 {
                i -= 1;
                tm.set_path(i, j, VERTICAL);
            } else if trace & DIAGONAL != 0 {
                i -= 1;
                j -= 1;
                tm.set_path(i, j, DIAGONAL);
            } else {
                break;
            }
        }
        Some((0, 0))
    }

    /// Smith-Waterman enumeration: like the global walk, but paths run from
    /// a STARTPOINT to an ENDPOINT, and fresh endpoints are scanned for in
    /// row-major order once the current one is exhausted.
    pub(super) fn next_smithwaterman(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut i, mut j) = (self.ia, self.ib);

        let sentinel = tm.path(0, 0);
        if sentinel == DONE || sentinel == NONE {
            return None;
        }

        let mut path = tm.path(i, j);
        let mut trace = 0u8;
        if path != 0 {
            loop {
                if path == HORIZONTAL {
                    j += 1;
                    trace = tm.trace(i, j);
                    if trace & VERTICAL != 0 {
                        i -= 1;
                        tm.set_path(i, j, VERTICAL);
                        break;
                    } else if trace & DIAGONAL != 0 {
                        i -= 1;
                        j -= 1;
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                } else if path == VERTICAL {
                    i += 1;
                    trace = tm.trace(i, j);
                    if trace & DIAGONAL != 0 {
                        i -= 1;
                        j -= 1;
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                } else {
                    i += 1;
                    j += 1;
                }
                path = tm.path(i, j);
                if path == 0 {
                    break;
                }
            }
        }

        if path != 0 {
            trace = tm.trace(i, j);
        } else {
            // Find the next endpoint; paths may only end in an aligned pair,
            // so the diagonal is the single permitted final step.
            loop {
                if j < nb {
                    j += 1;
                } else if i < na {
                    i += 1;
                    j = 0;
                } else {
                    tm.set_path(0, 0, DONE);
                    return None;
                }
                trace = tm.trace(i, j);
                if trace & ENDPOINT != 0 {
                    trace &= DIAGONAL;
                    break;
                }
            }
            tm.set_path(i, j, 0);
        }

        // Follow the traceback until a startpoint.
        loop {
            if trace & HORIZONTAL != 0 {
                j -= 1;
                tm.set_path(i, j, HORIZONTAL);
            } else if trace & VERTICAL != 0 {
                i -= 1;
                tm.set_path(i, j, VERTICAL);
            } else if trace & DIAGONAL != 0 {
                i -= 1;
                j -= 1;
                tm.set_path(i, j, DIAGONAL);
            } else if trace & STARTPOINT != 0 {
                self.ia = i;
                self.ib = j;
                return Some((i, j));
            } else {
                log::error!("inconsistent trace at ({i}, {j}) in Smith-Waterman enumeration");
                return None;
            }
            trace = tm.trace(i, j);
        }
    }
}
