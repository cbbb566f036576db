use std::collections::HashSet;

use alnkit_core_rs::loc::Strand;

use alnkit_alignment_rs::pairwise::scoring::Algorithm;
use alnkit_alignment_rs::pairwise::PairwiseAligner;
use alnkit_alignment_rs::pairwise::OptimalPaths;
use alnkit_alignment_rs::Score;

use super::support::{assert_monotone, rescore};

// A, C, G, T as alphabet indices.
const A: i32 = 0;
const C: i32 = 1;
const G: i32 = 2;
const T: i32 = 3;

fn aligner(match_score: Score, mismatch: Score, open: Score, extend: Score) -> PairwiseAligner {
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_match_score(match_score);
    aligner.model_mut().set_mismatch_score(mismatch);
    aligner.model_mut().set_open_gap_score(open);
    aligner.model_mut().set_extend_gap_score(extend);
    aligner
}

#[test]
fn test_identity_single_path() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let target = [A, C, G, T, A];
    let query = [A, C, G, T, A];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(score, 5.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 1);

    let path = paths.next().unwrap();
    assert_eq!(path.coordinates(), (vec![0, 5], vec![0, 5]));
    assert!(paths.next().is_none());
}

#[test]
fn test_single_mismatch_single_run() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let target = [A, C, T];
    let query = [A, G, T];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(score, 1.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 1);

    let path = paths.next().unwrap();
    assert_eq!(path.coordinates(), (vec![0, 3], vec![0, 3]));
    assert!(paths.next().is_none());
}

#[test]
fn test_affine_gap_four_placements() {
    let aligner = aligner(1.0, -1.0, -2.0, -1.0);
    assert_eq!(aligner.model().algorithm(), Algorithm::Gotoh);

    let target = [A, A, A];
    let query = [A, A, A, A];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(score, 1.0);
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 4);

    let collected: Vec<_> = paths.by_ref().collect();
    assert_eq!(collected.len(), 4);
    for path in &collected {
        assert_monotone(path);
        let rescored = rescore(
            path,
            &target,
            &query,
            1.0,
            -1.0,
            aligner.model().gaps(),
            false,
        );
        assert!((rescored - score).abs() < 1e-9, "path {path:?} rescored to {rescored}");
    }
    // All four gap placements are distinct.
    for (left, right) in collected.iter().enumerate().flat_map(|(n, left)| {
        collected[n + 1..].iter().map(move |right| (left, right))
    }) {
        assert_ne!(left, right);
    }
}

#[test]
fn test_enumeration_matches_count_with_ties() {
    // AG vs GA has several co-optimal paths once gaps cost as much as a
    // mismatch.
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let target = [A, G];
    let query = [G, A];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    let expected = OptimalPaths::count(&mut paths).unwrap();
    let collected: Vec<_> = paths.by_ref().collect();
    assert_eq!(collected.len(), expected);
    for path in &collected {
        assert_monotone(path);
        let rescored = rescore(
            path,
            &target,
            &query,
            1.0,
            -1.0,
            aligner.model().gaps(),
            false,
        );
        assert!((rescored - score).abs() < 1e-9);
    }
}

#[test]
fn test_reset_is_idempotent() {
    let aligner = aligner(1.0, -1.0, -2.0, -1.0);
    let target = [A, A, A];
    let query = [A, A, A, A];
    let (_, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();

    let first: Vec<_> = paths.by_ref().collect();
    assert!(paths.next().is_none());

    paths.reset();
    let second: Vec<_> = paths.by_ref().collect();
    assert_eq!(first, second);

    // Resetting in the middle of the enumeration starts over as well.
    paths.reset();
    let _ = paths.next();
    paths.reset();
    let third: Vec<_> = paths.by_ref().collect();
    assert_eq!(first, third);
}

#[test]
fn test_strand_symmetry() {
    let mut aligner = aligner(1.0, -1.0, -2.0, -1.0);
    // Make the ends cheaper than the middle so the left/right swap matters.
    aligner.model_mut().set_end_gap_score(-0.5);

    let target = [A, C, G, T, T, C];
    let query = [A, C, T, T, G, C];
    let reversed: Vec<i32> = query.iter().rev().copied().collect();

    let forward = aligner.score(&target, &query, Strand::Forward).unwrap();
    let reverse = aligner.score(&target, &reversed, Strand::Reverse).unwrap();
    assert!((forward - reverse).abs() < 1e-9);
}

#[test]
fn test_reverse_strand_mirrors_coordinates() {
    let aligner = aligner(1.0, -1.0, -1.0, -1.0);
    let target = [A, C, G, T, A];
    let query = [A, C, G, T, A];
    let reversed: Vec<i32> = query.iter().rev().copied().collect();

    let (score, mut paths) = aligner.align(&target, &reversed, Strand::Reverse).unwrap();
    assert_eq!(score, 5.0);
    let path = paths.next().unwrap();
    // Query coordinates are mirrored at emission time.
    assert_eq!(path.coordinates(), (vec![0, 5], vec![5, 0]));
}

#[test]
fn test_linear_engines_agree() {
    let linear = aligner(1.0, -1.0, -1.0, -1.0);
    assert_eq!(
        linear.model().algorithm(),
        Algorithm::NeedlemanWunschSmithWaterman
    );

    // The same linear costs expressed as gap callbacks route through the
    // general-gap engine instead; both must score identically.
    let mut general = aligner(1.0, -1.0, -1.0, -1.0);
    general
        .model_mut()
        .set_insertion_score_function(Some(Box::new(|_, len| -(len as Score))));
    general
        .model_mut()
        .set_deletion_score_function(Some(Box::new(|_, len| -(len as Score))));
    assert_eq!(general.model().algorithm(), Algorithm::WatermanSmithBeyer);

    for (target, query) in [
        (vec![A, C, G, T], vec![A, C, G, T]),
        (vec![A, C, G, T], vec![A, G, T]),
        (vec![T, T, T], vec![T, T, T, T, T]),
        (vec![A, C], vec![G, T]),
    ] {
        let nw = linear.score(&target, &query, Strand::Forward).unwrap();
        let wsb = general.score(&target, &query, Strand::Forward).unwrap();
        assert!((nw - wsb).abs() < 1e-9, "{nw} != {wsb} for {target:?}/{query:?}");
    }
}

#[test]
fn test_general_gap_enumeration_matches_affine() {
    // Affine costs spelled out as gap callbacks run through the general-gap
    // engine; it must enumerate exactly the same optimal paths as the affine
    // engine does.
    let affine = aligner(1.0, -1.0, -2.0, -1.0);
    let mut general = aligner(1.0, -1.0, -2.0, -1.0);
    let cost: fn(usize, usize) -> Score = |_, len| -2.0 - (len - 1) as Score;
    general
        .model_mut()
        .set_insertion_score_function(Some(Box::new(cost)));
    general
        .model_mut()
        .set_deletion_score_function(Some(Box::new(cost)));
    assert_eq!(general.model().algorithm(), Algorithm::WatermanSmithBeyer);

    for (target, query) in [
        (vec![A, A, A], vec![A, A, A, A]),
        (vec![A, C, G, T], vec![A, G, T, T]),
        (vec![C, C, C, C], vec![C, C]),
    ] {
        let (reference_score, mut reference) =
            affine.align(&target, &query, Strand::Forward).unwrap();
        let (score, mut paths) = general.align(&target, &query, Strand::Forward).unwrap();
        assert!((score - reference_score).abs() < 1e-9);

        let expected = OptimalPaths::count(&mut paths).unwrap();
        let collected: Vec<_> = paths.by_ref().collect();
        assert_eq!(collected.len(), expected);
        for path in &collected {
            assert_monotone(path);
            let rescored = rescore(
                path,
                &target,
                &query,
                1.0,
                -1.0,
                affine.model().gaps(),
                false,
            );
            assert!((rescored - score).abs() < 1e-9);
        }

        let reference_set: HashSet<_> = reference.by_ref().collect();
        let general_set: HashSet<_> = collected.into_iter().collect();
        assert_eq!(
            reference_set, general_set,
            "path sets differ for {target:?}/{query:?}"
        );
    }
}
