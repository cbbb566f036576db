use alnkit_alignment_rs::pairwise::alignment::{Op, Path};
use alnkit_alignment_rs::pairwise::scoring::gaps::GapContext;
use alnkit_alignment_rs::pairwise::scoring::GapPenalties;
use alnkit_alignment_rs::Score;

/// Recompute the score of a forward-strand path from its runs: pair scores
/// for aligned columns, affine gap costs with the context taken from the gap
/// position. Local alignments never price end gaps, so everything there is
/// internal.
pub fn rescore(
    path: &Path,
    target: &[i32],
    query: &[i32],
    match_score: Score,
    mismatch_score: Score,
    gaps: &GapPenalties,
    local: bool,
) -> Score {
    let start = path.start().expect("path is empty");
    let (mut t, mut q) = (start.target, start.query);
    let mut total = 0.0;
    for step in path.steps() {
        let len = *step.len();
        match step.op() {
            Op::Insertion => {
                let context = if local {
                    GapContext::Internal
                } else {
                    GapContext::at(t, target.len())
                };
                let (open, extend) = gaps.insertion(context);
                total += open + (len - 1) as Score * extend;
                q += len;
            }
            Op::Deletion => {
                let context = if local {
                    GapContext::Internal
                } else {
                    GapContext::at(q, query.len())
                };
                let (open, extend) = gaps.deletion(context);
                total += open + (len - 1) as Score * extend;
                t += len;
            }
            _ => {
                for _ in 0..len {
                    total += if target[t] == query[q] {
                        match_score
                    } else {
                        mismatch_score
                    };
                    t += 1;
                    q += 1;
                }
            }
        }
    }
    total
}

/// Every step of a path must advance the target or the query (or both) by
/// exactly the run length; checked here pairwise over the vertices.
pub fn assert_monotone(path: &Path) {
    for pair in path.vertices().windows(2) {
        let dt = pair[1].target as i64 - pair[0].target as i64;
        let dq = pair[1].query as i64 - pair[0].query as i64;
        assert!(dt >= 0, "target coordinate went backwards: {path:?}");
        assert!(dq >= 0, "query coordinate went backwards: {path:?}");
        assert!(dt > 0 || dq > 0, "empty run in {path:?}");
        assert!(dt == 0 || dq == 0 || dt == dq, "skewed run in {path:?}");
    }
}
