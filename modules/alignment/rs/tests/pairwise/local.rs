use std::collections::HashSet;

use alnkit_core_rs::loc::Strand;

use alnkit_alignment_rs::pairwise::alignment::Op;
use alnkit_alignment_rs::pairwise::scoring::Mode;
use alnkit_alignment_rs::pairwise::PairwiseAligner;
use alnkit_alignment_rs::pairwise::OptimalPaths;
use alnkit_alignment_rs::Score;

use super::support::{assert_monotone, rescore};

const A: i32 = 0;
const C: i32 = 1;
const G: i32 = 2;
const T: i32 = 3;

fn aligner(match_score: Score, mismatch: Score, open: Score, extend: Score) -> PairwiseAligner {
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_mode(Mode::Local);
    aligner.model_mut().set_match_score(match_score);
    aligner.model_mut().set_mismatch_score(mismatch);
    aligner.model_mut().set_open_gap_score(open);
    aligner.model_mut().set_extend_gap_score(extend);
    aligner
}

#[test]
fn test_substring_hit() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    // ACGT inside GACGTC.
    let target = [A, C, G, T];
    let query = [G, A, C, G, T, C];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(score, 4.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 1);

    let path = paths.next().unwrap();
    assert_eq!(path.start().unwrap(), (0, 1).into());
    assert_eq!(path.end().unwrap(), (4, 5).into());
    assert!(paths.next().is_none());
}

#[test]
fn test_identity_hit() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let sequence = [A, C, G];
    let (score, mut paths) = aligner.align(&sequence, &sequence, Strand::Forward).unwrap();
    assert_eq!(score, 3.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 1);

    let path = paths.next().unwrap();
    assert_eq!(path.coordinates(), (vec![0, 3], vec![0, 3]));
    assert!(paths.next().is_none());
}

#[test]
fn test_no_positive_alignment() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let (score, mut paths) = aligner.align(&[A, A], &[C, C], Strand::Forward).unwrap();
    assert_eq!(score, 0.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 0);
    assert!(paths.next().is_none());

    // Resetting does not revive an empty enumeration.
    paths.reset();
    assert!(paths.next().is_none());
}

#[test]
fn test_paths_end_in_aligned_pairs() {
    // Several equally scoring hits; none of them may start or end with a gap.
    let aligner = aligner(1.0, -1.0, -2.0, -1.0);
    let target = [A, C, G, A, C, G];
    let query = [A, C, G, T, A, C, G];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert!(score > 0.0);

    let expected = OptimalPaths::count(&mut paths).unwrap();
    let collected: Vec<_> = paths.by_ref().collect();
    assert_eq!(collected.len(), expected);
    assert!(!collected.is_empty());
    for path in &collected {
        assert_monotone(path);
        let steps = path.steps();
        assert_eq!(*steps.first().unwrap().op(), Op::Equivalent);
        assert_eq!(*steps.last().unwrap().op(), Op::Equivalent);
        let rescored = rescore(
            path,
            &target,
            &query,
            1.0,
            -1.0,
            aligner.model().gaps(),
            true,
        );
        assert!((rescored - score).abs() < 1e-9, "path {path:?} rescored to {rescored}");
    }
}

#[test]
fn test_multiple_distinct_hits() {
    // Two separated perfect repeats of the same word score equally.
    let aligner = aligner(1.0, -2.0, -2.0, -1.0);
    let target = [A, C, G, T];
    let query = [A, C, G, T, C, C, C, A, C, G, T];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(score, 4.0);

    let expected = OptimalPaths::count(&mut paths).unwrap();
    let collected: Vec<_> = paths.by_ref().collect();
    assert_eq!(collected.len(), expected);
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].start().unwrap(), (0, 0).into());
    assert_eq!(collected[1].start().unwrap(), (0, 7).into());
}

#[test]
fn test_local_reset_is_idempotent() {
    let aligner = aligner(1.0, -2.0, -2.0, -1.0);
    let target = [A, C, G, T];
    let query = [A, C, G, T, C, C, C, A, C, G, T];
    let (_, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();

    let first: Vec<_> = paths.by_ref().collect();
    paths.reset();
    let second: Vec<_> = paths.by_ref().collect();
    assert_eq!(first, second);
}

#[test]
fn test_general_gap_local_matches_affine() {
    let affine = aligner(1.0, -1.0, -2.0, -1.0);
    let mut general = aligner(1.0, -1.0, -2.0, -1.0);
    let cost: fn(usize, usize) -> Score = |_, len| -2.0 - (len - 1) as Score;
    general
        .model_mut()
        .set_insertion_score_function(Some(Box::new(cost)));
    general
        .model_mut()
        .set_deletion_score_function(Some(Box::new(cost)));

    for (target, query) in [
        (vec![A, C, G, A, C, G], vec![A, C, G, T, A, C, G]),
        (vec![A, C, G, T], vec![A, C, G, T, C, C, C, A, C, G, T]),
        (vec![T, T], vec![A, C]),
    ] {
        let (reference_score, mut reference) =
            affine.align(&target, &query, Strand::Forward).unwrap();
        let (score, mut paths) = general.align(&target, &query, Strand::Forward).unwrap();
        assert!((score - reference_score).abs() < 1e-9);

        let expected = OptimalPaths::count(&mut paths).unwrap();
        assert_eq!(expected, OptimalPaths::count(&mut reference).unwrap());
        let collected: Vec<_> = paths.by_ref().collect();
        assert_eq!(collected.len(), expected);
        for path in &collected {
            assert_monotone(path);
        }
        let reference_paths: HashSet<_> = reference.by_ref().collect();
        let general_paths: HashSet<_> = collected.into_iter().collect();
        assert_eq!(general_paths, reference_paths);
    }
}

#[test]
fn test_local_reverse_strand() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let target = [A, C, G, T];
    let query = [G, A, C, G, T, C];
    let reversed: Vec<i32> = query.iter().rev().copied().collect();

    let forward = aligner.score(&target, &query, Strand::Forward).unwrap();
    let reverse = aligner.score(&target, &reversed, Strand::Reverse).unwrap();
    assert_eq!(forward, reverse);

    let (_, mut paths) = aligner.align(&target, &reversed, Strand::Reverse).unwrap();
    let path = paths.next().unwrap();
    // The hit covers query positions 1..5 of the buffer as passed in,
    // reported as mirrored, descending coordinates.
    assert_eq!(path.coordinates(), (vec![0, 4], vec![5, 1]));
}
