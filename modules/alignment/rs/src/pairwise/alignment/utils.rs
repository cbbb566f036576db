use super::op::Op;
use super::path::Path;
use super::step::Step;

/// Split the `Op::Equivalent` runs of a forward-strand path into match and
/// mismatch runs by comparing the aligned symbols. Gap runs pass through
/// unchanged.
pub fn classify(path: &Path, target: &[i32], query: &[i32]) -> Vec<Step<usize>> {
    let mut result = Vec::new();
    let Some(start) = path.start() else {
        return result;
    };

    let mut t = start.target;
    let mut q = start.query;
    for step in path.steps() {
        match step.op() {
            Op::Insertion => {
                q += step.len();
                result.push(step);
            }
            Op::Deletion => {
                t += step.len();
                result.push(step);
            }
            Op::Equivalent | Op::Match | Op::Mismatch => {
                let mut curop = if target[t] == query[q] {
                    Op::Match
                } else {
                    Op::Mismatch
                };
                let mut len = 0;
                for _ in 0..*step.len() {
                    let op = if target[t] == query[q] {
                        Op::Match
                    } else {
                        Op::Mismatch
                    };
                    if op == curop {
                        len += 1;
                    } else {
                        if let Ok(s) = Step::new(curop, len) {
                            result.push(s);
                        }
                        curop = op;
                        len = 1;
                    }
                    t += 1;
                    q += 1;
                }
                if let Ok(s) = Step::new(curop, len) {
                    result.push(s);
                }
            }
        }
    }
    result
}

/// The run-length encoding of a classified forward-strand path, e.g. `3=1X2=`.
pub fn classified_rle(path: &Path, target: &[i32], query: &[i32]) -> String {
    Step::rle_string(classify(path, target, query).iter())
}
