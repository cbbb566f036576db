use alnkit_core_rs::loc::Strand;

use alnkit_alignment_rs::pairwise::scoring::{Algorithm, Mode, SubstitutionMatrix};
use alnkit_alignment_rs::pairwise::PairwiseAligner;
use alnkit_alignment_rs::pairwise::OptimalPaths;
use alnkit_alignment_rs::Score;

use super::support::{assert_monotone, rescore};

const A: i32 = 0;
const C: i32 = 1;
const G: i32 = 2;
const T: i32 = 3;

fn fogsaa(match_score: Score, mismatch: Score, open: Score, extend: Score) -> PairwiseAligner {
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_mode(Mode::Fogsaa);
    aligner.model_mut().set_match_score(match_score);
    aligner.model_mut().set_mismatch_score(mismatch);
    aligner.model_mut().set_open_gap_score(open);
    aligner.model_mut().set_extend_gap_score(extend);
    aligner
}

fn gotoh(match_score: Score, mismatch: Score, open: Score, extend: Score) -> PairwiseAligner {
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_match_score(match_score);
    aligner.model_mut().set_mismatch_score(mismatch);
    aligner.model_mut().set_open_gap_score(open);
    aligner.model_mut().set_extend_gap_score(extend);
    aligner
}

#[test]
fn test_matches_gotoh_score() {
    let fogsaa = fogsaa(2.0, -1.0, -2.0, -1.0);
    assert_eq!(fogsaa.model().algorithm(), Algorithm::Fogsaa);
    let gotoh = gotoh(2.0, -1.0, -2.0, -1.0);

    let target = [A, C, G, T];
    let query = [A, G, G, T];
    let expected = gotoh.score(&target, &query, Strand::Forward).unwrap();
    let score = fogsaa.score(&target, &query, Strand::Forward).unwrap();
    assert!((score - expected).abs() < 1e-9);
}

#[test]
fn test_single_path() {
    let aligner = fogsaa(2.0, -1.0, -2.0, -1.0);
    let target = [A, C, G, T];
    let query = [A, G, G, T];
    let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert_eq!(OptimalPaths::count(&mut paths).unwrap(), 1);

    let path = paths.next().unwrap();
    assert_monotone(&path);
    let rescored = rescore(
        &path,
        &target,
        &query,
        2.0,
        -1.0,
        aligner.model().gaps(),
        false,
    );
    assert!((rescored - score).abs() < 1e-9);
    assert!(paths.next().is_none());

    // The single path comes back after a reset.
    paths.reset();
    assert_eq!(paths.next().as_ref(), Some(&path));
    assert!(paths.next().is_none());
}

#[test]
fn test_gapped_alignment() {
    let fogsaa = fogsaa(2.0, -1.0, -2.0, -1.0);
    let gotoh = gotoh(2.0, -1.0, -2.0, -1.0);
    for (target, query) in [
        (vec![A, C, G, T, A, C], vec![A, C, T, A, C]),
        (vec![A, A, A], vec![A, A, A, A]),
        (vec![G, G, G, G, G], vec![G]),
        (vec![T], vec![T]),
    ] {
        let expected = gotoh.score(&target, &query, Strand::Forward).unwrap();
        let got = fogsaa.score(&target, &query, Strand::Forward).unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "{got} != {expected} for {target:?}/{query:?}"
        );
    }
}

#[test]
fn test_matrix_mode() {
    // The bound parameters come from the matrix extrema.
    let mut values = vec![-1.0; 16];
    for k in 0..4 {
        values[k * 4 + k] = 2.0;
    }
    let matrix = SubstitutionMatrix::new(4, values).unwrap();

    let mut aligner = fogsaa(0.0, 0.0, -2.0, -1.0);
    aligner.model_mut().set_substitution_matrix(Some(matrix.clone()));

    let mut reference = gotoh(0.0, 0.0, -2.0, -1.0);
    reference.model_mut().set_substitution_matrix(Some(matrix));

    let target = [A, C, G, T, T];
    let query = [A, G, G, T, T];
    let expected = reference.score(&target, &query, Strand::Forward).unwrap();
    let got = aligner.score(&target, &query, Strand::Forward).unwrap();
    assert!((got - expected).abs() < 1e-9);
}

#[test]
fn test_reverse_strand() {
    let aligner = fogsaa(2.0, -1.0, -2.0, -1.0);
    let target = [A, C, G, T];
    let query = [A, G, G, T];
    let reversed: Vec<i32> = query.iter().rev().copied().collect();

    let forward = aligner.score(&target, &query, Strand::Forward).unwrap();
    let reverse = aligner.score(&target, &reversed, Strand::Reverse).unwrap();
    assert!((forward - reverse).abs() < 1e-9);
}
