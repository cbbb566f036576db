use crate::pairwise::trace::{
    DIAGONAL, DONE, ENDPOINT, HORIZONTAL, IX_MATRIX, IY_MATRIX, M_MATRIX, STARTPOINT, VERTICAL,
};

use super::OptimalPaths;

/// The next co-optimal gap length for a run, or the run to keep walking.
enum RunSwitch {
    /// Re-source the run with this gap length from this layer.
    Gap { layer: u8, gap: usize },
    /// No alternative: continue pruning behind the run in this layer.
    Exhausted { layer: u8 },
    /// The gap length the walk arrived with is missing from its list.
    Broken,
}

/// Walk a gap-length list pair: after the current gap in the `from_m` list
/// come its later entries, then the whole `from_gap` list.
fn switch_run(from_m: &[usize], from_gap: &[usize], current: usize, m: u8, layers: (u8, u8, u8)) -> RunSwitch {
    let (m_layer, gap_layer, run_layer) = layers;
    if m == m_layer {
        let Some(position) = from_m.iter().position(|&gap| gap == current) else {
            return RunSwitch::Broken;
        };
        if let Some(&gap) = from_m.get(position + 1) {
            return RunSwitch::Gap { layer: m_layer, gap };
        }
        if let Some(&gap) = from_gap.first() {
            return RunSwitch::Gap { layer: gap_layer, gap };
        }
    } else if m == gap_layer {
        let Some(position) = from_gap.iter().position(|&gap| gap == current) else {
            return RunSwitch::Broken;
        };
        if let Some(&gap) = from_gap.get(position + 1) {
            return RunSwitch::Gap { layer: gap_layer, gap };
        }
    } else if let Some(&gap) = from_gap.first() {
        return RunSwitch::Gap { layer: gap_layer, gap };
    }
    RunSwitch::Exhausted { layer: run_layer }
}

impl OptimalPaths {
    /// Waterman-Smith-Beyer global enumeration. Runs are re-sourced through
    /// their gap-length lists: all co-optimal lengths from M first, then from
    /// the other gap layer, before the walk falls back to the cell switch.
    pub(super) fn next_waterman_smith_beyer_global(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut i, mut j) = (0usize, 0usize);
        let mut m = M_MATRIX;

        let mut path = tm.path(0, 0);
        if path == DONE {
            return None;
        }
        if path != 0 {
            loop {
                if path == 0 {
                    m <<= 1;
                    break;
                }
                let (ia, ib) = match path {
                    HORIZONTAL => {
                        let mut ib = j;
                        while tm.path(i, ib) == HORIZONTAL {
                            ib += 1;
                        }
                        (i, ib)
                    }
                    VERTICAL => {
                        let mut ia = i;
                        while tm.path(ia, j) == VERTICAL {
                            ia += 1;
                        }
                        (ia, j)
                    }
                    DIAGONAL => (i + 1, j + 1),
                    _ => {
                        log::error!(
                            "unexpected path {path} at ({i}, {j}) in Waterman-Smith-Beyer \
                             enumeration"
                        );
                        return None;
                    }
                };
                if i == ia {
                    // A horizontal run ending at (ia, ib).
                    let cell = tm.wsb_cell(ia, ib);
                    let (m_iy, ix_iy) = (cell.m_iy.clone(), cell.ix_iy.clone());
                    match switch_run(&m_iy, &ix_iy, ib - j, m, (M_MATRIX, IX_MATRIX, IY_MATRIX))
                    {
                        RunSwitch::Gap { layer, gap } => {
                            m = layer;
                            j = ib - gap;
                            let mut ib = ib;
                            while j < ib {
                                ib -= 1;
                                tm.set_path(i, ib, HORIZONTAL);
                            }
                            break;
                        }
                        RunSwitch::Exhausted { layer } => {
                            m = layer;
                            j = ib;
                        }
                        RunSwitch::Broken => {
                            log::error!(
                                "gap run at ({ia}, {ib}) lost its length in Waterman-Smith-Beyer \
                                 enumeration"
                            );
                            return None;
                        }
                    }
                } else if j == ib {
                    // A vertical run ending at (ia, ib).
                    let cell = tm.wsb_cell(ia, ib);
                    let (m_ix, iy_ix) = (cell.m_ix.clone(), cell.iy_ix.clone());
                    match switch_run(&m_ix, &iy_ix, ia - i, m, (M_MATRIX, IY_MATRIX, IX_MATRIX))
                    {
                        RunSwitch::Gap { layer, gap } => {
                            m = layer;
                            i = ia - gap;
                            let mut ia = ia;
                            while i < ia {
                                ia -= 1;
                                tm.set_path(ia, j, VERTICAL);
                            }
                            break;
                        }
                        RunSwitch::Exhausted { layer } => {
                            m = layer;
                            i = ia;
                        }
                        RunSwitch::Broken => {
                            log::error!(
                                "gap run at ({ia}, {ib}) lost its length in Waterman-Smith-Beyer \
                                 enumeration"
                            );
                            return None;
                        }
                    }
                } else {
                    // A diagonal step into (ia, ib).
                    i = ia - 1;
                    j = ib - 1;
                    let trace = tm.trace(ia, ib);
                    let switched = if m == M_MATRIX && trace & IX_MATRIX != 0 {
                        m = IX_MATRIX;
                        true
                    } else if m != IY_MATRIX && trace & IY_MATRIX != 0 {
                        m = IY_MATRIX;
                        true
                    } else {
                        false
                    };
                    if switched {
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                    m = M_MATRIX;
                    i = ia;
                    j = ib;
                    path = tm.path(i, j);
                    continue;
                }
                path = tm.path(i, j);
            }
        }

        if path == 0 {
            // Pick the next corner layer whose traces survived the fill.
            let corner = tm.wsb_cell(na, nb);
            let ix_live = !corner.m_ix.is_empty() || !corner.iy_ix.is_empty();
            let iy_live = !corner.m_iy.is_empty() || !corner.ix_iy.is_empty();
            m = if m == M_MATRIX && tm.trace(na, nb) != 0 {
                M_MATRIX
            } else if (m == M_MATRIX || m == IX_MATRIX) && ix_live {
                IX_MATRIX
            } else if (m == M_MATRIX || m == IX_MATRIX || m == IY_MATRIX) && iy_live {
                IY_MATRIX
            } else {
                tm.set_path(0, 0, DONE);
                return None;
            };
            i = na;
            j = nb;
        }

        // Follow the traceback until the origin.
        loop {
            match m {
                M_MATRIX => {
                    let trace = tm.trace(i, j);
                    m = if trace & M_MATRIX != 0 {
                        M_MATRIX
                    } else if trace & IX_MATRIX != 0 {
                        IX_MATRIX
                    } else if trace & IY_MATRIX != 0 {
                        IY_MATRIX
                    } else {
                        return Some((i, j));
                    };
                    i -= 1;
                    j -= 1;
                    tm.set_path(i, j, DIAGONAL);
                }
                IX_MATRIX => {
                    let cell = tm.wsb_cell(i, j);
                    let gap = match cell.m_ix.first() {
                        Some(&gap) => {
                            m = M_MATRIX;
                            gap
                        }
                        None => {
                            m = IY_MATRIX;
                            cell.iy_ix.first().copied().unwrap_or(0)
                        }
                    };
                    let ia = i - gap;
                    while i > ia {
                        i -= 1;
                        tm.set_path(i, j, VERTICAL);
                    }
                }
                _ => {
                    let cell = tm.wsb_cell(i, j);
                    let gap = match cell.m_iy.first() {
                        Some(&gap) => {
                            m = M_MATRIX;
                            gap
                        }
                        None => {
                            m = IX_MATRIX;
                            cell.ix_iy.first().copied().unwrap_or(0)
                        }
                    };
                    let ib = j - gap;
                    while j > ib {
                        j -= 1;
                        tm.set_path(i, j, HORIZONTAL);
                    }
                }
            }
        }
    }

    /// Waterman-Smith-Beyer local enumeration.
    pub(super) fn next_waterman_smith_beyer_local(&mut self) -> Option<(usize, usize)> {
        let tm = &mut self.trace;
        let (na, nb) = (tm.na(), tm.nb());
        let (mut ia, mut ib) = (self.ia, self.ib);
        let (mut i, mut j) = (ia, ib);

        if tm.path(0, 0) == DONE {
            return None;
        }
        let mut m = 0u8;
        let mut path = tm.path(ia, ib);
        if path != 0 {
            m = M_MATRIX;
            loop {
                path = tm.path(i, j);
                let run = match path {
                    HORIZONTAL => {
                        let mut ib = j;
                        while tm.path(i, ib) == HORIZONTAL {
                            ib += 1;
                        }
                        Some((i, ib))
                    }
                    VERTICAL => {
                        let mut ia = i;
                        while tm.path(ia, j) == VERTICAL {
                            ia += 1;
                        }
                        Some((ia, j))
                    }
                    DIAGONAL => Some((i + 1, j + 1)),
                    _ => None,
                };
                let Some((run_ia, run_ib)) = run else {
                    // The current path is exhausted; scan for a new endpoint.
                    m = 0;
                    ia = i;
                    ib = j;
                    break;
                };
                ia = run_ia;
                ib = run_ib;
                if i == ia {
                    let cell = tm.wsb_cell(ia, ib);
                    let (m_iy, ix_iy) = (cell.m_iy.clone(), cell.ix_iy.clone());
                    match switch_run(&m_iy, &ix_iy, ib - j, m, (M_MATRIX, IX_MATRIX, IY_MATRIX))
                    {
                        RunSwitch::Gap { layer, gap } => {
                            m = layer;
                            j = ib - gap;
                            let mut ib = ib;
                            while ib > j {
                                ib -= 1;
                                tm.set_path(i, ib, HORIZONTAL);
                            }
                            break;
                        }
                        RunSwitch::Exhausted { layer } => {
                            m = layer;
                            j = ib;
                        }
                        RunSwitch::Broken => {
                            log::error!(
                                "gap run at ({ia}, {ib}) lost its length in Waterman-Smith-Beyer \
                                 enumeration"
                            );
                            return None;
                        }
                    }
                } else if j == ib {
                    let cell = tm.wsb_cell(ia, ib);
                    let (m_ix, iy_ix) = (cell.m_ix.clone(), cell.iy_ix.clone());
                    match switch_run(&m_ix, &iy_ix, ia - i, m, (M_MATRIX, IY_MATRIX, IX_MATRIX))
                    {
                        RunSwitch::Gap { layer, gap } => {
                            m = layer;
                            i = ia - gap;
                            let mut ia = ia;
                            while ia > i {
                                ia -= 1;
                                tm.set_path(ia, j, VERTICAL);
                            }
                            break;
                        }
                        RunSwitch::Exhausted { layer } => {
                            m = layer;
                            i = ia;
                        }
                        RunSwitch::Broken => {
                            log::error!(
                                "gap run at ({ia}, {ib}) lost its length in Waterman-Smith-Beyer \
                                 enumeration"
                            );
                            return None;
                        }
                    }
                } else {
                    i = ia - 1;
                    j = ib - 1;
                    let trace = tm.trace(ia, ib);
                    let switched = if m == M_MATRIX && trace & IX_MATRIX != 0 {
                        m = IX_MATRIX;
                        true
                    } else if m != IY_MATRIX && trace & IY_MATRIX != 0 {
                        m = IY_MATRIX;
                        true
                    } else {
                        false
                    };
                    if switched {
                        tm.set_path(i, j, DIAGONAL);
                        break;
                    }
                    m = M_MATRIX;
                    i = ia;
                    j = ib;
                }
            }
        }

        if m == 0 {
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
                    break;
                }
            }
            tm.set_path(ia, ib, 0);
            m = M_MATRIX;
            i = ia;
            j = ib;
        }

        // Follow the traceback until a startpoint.
        loop {
            match m {
                IX_MATRIX => {
                    let cell = tm.wsb_cell(i, j);
                    let gap = match cell.m_ix.first() {
                        Some(&gap) => {
                            m = M_MATRIX;
                            gap
                        }
                        None => {
                            m = IY_MATRIX;
                            cell.iy_ix.first().copied().unwrap_or(0)
                        }
                    };
                    let bottom = i - gap;
                    while i > bottom {
                        i -= 1;
                        tm.set_path(i, j, VERTICAL);
                    }
                }
                IY_MATRIX => {
                    let cell = tm.wsb_cell(i, j);
                    let gap = match cell.m_iy.first() {
                        Some(&gap) => {
                            m = M_MATRIX;
                            gap
                        }
                        None => {
                            m = IX_MATRIX;
                            cell.ix_iy.first().copied().unwrap_or(0)
                        }
                    };
                    let left = j - gap;
                    while j > left {
                        j -= 1;
                        tm.set_path(i, j, HORIZONTAL);
                    }
                }
                _ => {
                    let trace = tm.trace(i, j);
                    if trace & M_MATRIX != 0 {
                        m = M_MATRIX;
                    } else if trace & IX_MATRIX != 0 {
                        m = IX_MATRIX;
                    } else if trace & IY_MATRIX != 0 {
                        m = IY_MATRIX;
                    } else if trace == STARTPOINT {
                        self.ia = i;
                        self.ib = j;
                        return Some((i, j));
                    } else {
                        log::error!(
                            "inconsistent trace at ({i}, {j}) in Waterman-Smith-Beyer local \
                             enumeration"
                        );
                        return None;
                    }
                    i -= 1;
                    j -= 1;
                    tm.set_path(i, j, DIAGONAL);
                }
            }
        }
    }
}
