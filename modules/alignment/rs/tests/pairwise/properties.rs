use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use alnkit_core_rs::loc::Strand;

use alnkit_alignment_rs::pairwise::scoring::Mode;
use alnkit_alignment_rs::pairwise::PairwiseAligner;
use alnkit_alignment_rs::pairwise::OptimalPaths;
use alnkit_alignment_rs::Score;

use super::support::{assert_monotone, rescore};

fn random_sequence(rng: &mut StdRng, max_len: usize) -> Vec<i32> {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| rng.gen_range(0..4)).collect()
}

fn random_model(rng: &mut StdRng, mode: Mode) -> PairwiseAligner {
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_mode(mode);
    aligner.model_mut().set_match_score(rng.gen_range(1..=3) as Score);
    aligner
        .model_mut()
        .set_mismatch_score(-(rng.gen_range(1..=3) as Score));
    let extend = -(rng.gen_range(1..=2) as Score);
    let open = extend - rng.gen_range(0..=2) as Score;
    aligner.model_mut().set_open_gap_score(open);
    aligner.model_mut().set_extend_gap_score(extend);
    aligner
}

/// Every enumerated path rescoreas to the reported optimum, the enumeration
/// is exhaustive, and its cardinality matches the counting DP.
#[test]
fn test_global_enumeration_properties() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let aligner = random_model(&mut rng, Mode::Global);
        let target = random_sequence(&mut rng, 7);
        let query = random_sequence(&mut rng, 7);

        let expected = aligner.score(&target, &query, Strand::Forward).unwrap();
        let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
        assert!(
            (score - expected).abs() < 1e-9,
            "align and score disagree for {target:?}/{query:?}"
        );

        let count = OptimalPaths::count(&mut paths).unwrap();
        let collected: Vec<_> = paths.by_ref().collect();
        assert_eq!(
            collected.len(),
            count,
            "count mismatch for {target:?}/{query:?}"
        );
        assert!(paths.next().is_none());

        let (match_score, mismatch_score) = (
            aligner.model().match_score().unwrap(),
            aligner.model().mismatch_score().unwrap(),
        );
        for path in &collected {
            assert_monotone(path);
            let start = path.start().unwrap();
            let end = path.end().unwrap();
            assert_eq!(start, (0, 0).into());
            assert_eq!(end, (target.len(), query.len()).into());
            let rescored = rescore(
                path,
                &target,
                &query,
                match_score,
                mismatch_score,
                aligner.model().gaps(),
                false,
            );
            assert!(
                (rescored - score).abs() < 1e-6,
                "path {path:?} rescored to {rescored}, expected {score} \
                 for {target:?}/{query:?}"
            );
        }
        // All paths are distinct.
        for (n, left) in collected.iter().enumerate() {
            for right in &collected[n + 1..] {
                assert_ne!(left, right, "duplicate path for {target:?}/{query:?}");
            }
        }
    }
}

#[test]
fn test_local_enumeration_properties() {
    let mut rng = StdRng::seed_from_u64(0xa11c);
    for _ in 0..200 {
        let aligner = random_model(&mut rng, Mode::Local);
        let target = random_sequence(&mut rng, 7);
        let query = random_sequence(&mut rng, 7);

        let expected = aligner.score(&target, &query, Strand::Forward).unwrap();
        let (score, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
        assert!(
            (score - expected).abs() < 1e-9,
            "align and score disagree for {target:?}/{query:?}"
        );

        let count = OptimalPaths::count(&mut paths).unwrap();
        let collected: Vec<_> = paths.by_ref().collect();
        assert_eq!(
            collected.len(),
            count,
            "count mismatch for {target:?}/{query:?}"
        );

        let (match_score, mismatch_score) = (
            aligner.model().match_score().unwrap(),
            aligner.model().mismatch_score().unwrap(),
        );
        for path in &collected {
            assert_monotone(path);
            let rescored = rescore(
                path,
                &target,
                &query,
                match_score,
                mismatch_score,
                aligner.model().gaps(),
                true,
            );
            assert!(
                (rescored - score).abs() < 1e-6,
                "path {path:?} rescored to {rescored}, expected {score} \
                 for {target:?}/{query:?}"
            );
        }
    }
}

#[test]
fn test_strand_symmetry_random() {
    let mut rng = StdRng::seed_from_u64(0x57a4d);
    for _ in 0..200 {
        let aligner = random_model(&mut rng, Mode::Global);
        let target = random_sequence(&mut rng, 7);
        let query = random_sequence(&mut rng, 7);
        let reversed: Vec<i32> = query.iter().rev().copied().collect();

        let forward = aligner.score(&target, &query, Strand::Forward).unwrap();
        let reverse = aligner.score(&target, &reversed, Strand::Reverse).unwrap();
        assert!(
            (forward - reverse).abs() < 1e-9,
            "strand asymmetry for {target:?}/{query:?}"
        );
    }
}

#[test]
fn test_fogsaa_matches_gotoh_random() {
    let mut rng = StdRng::seed_from_u64(0xf065aa);
    for _ in 0..100 {
        let reference = random_model(&mut rng, Mode::Global);
        let mut aligner = PairwiseAligner::new();
        aligner.model_mut().set_mode(Mode::Fogsaa);
        aligner
            .model_mut()
            .set_match_score(reference.model().match_score().unwrap());
        aligner
            .model_mut()
            .set_mismatch_score(reference.model().mismatch_score().unwrap());
        aligner.model_mut().set_gap_penalties(*reference.model().gaps());

        let target = random_sequence(&mut rng, 6);
        let query = random_sequence(&mut rng, 6);
        let expected = reference.score(&target, &query, Strand::Forward).unwrap();
        let got = aligner.score(&target, &query, Strand::Forward).unwrap();
        assert!(
            (got - expected).abs() < 1e-9,
            "fogsaa {got} != {expected} for {target:?}/{query:?}"
        );
    }
}

/// Counting saturates at the platform signed maximum instead of wrapping.
#[test]
fn test_count_overflow_reports() {
    // Zero-cost everything makes every monotone lattice path optimal; the
    // number of such paths explodes combinatorially with sequence length.
    let mut aligner = PairwiseAligner::new();
    aligner.model_mut().set_match_score(0.0);
    aligner.model_mut().set_mismatch_score(0.0);
    aligner.model_mut().set_gap_score(0.0);

    let target = vec![0; 60];
    let query = vec![0; 60];
    let (_, mut paths) = aligner.align(&target, &query, Strand::Forward).unwrap();
    assert!(matches!(
        OptimalPaths::count(&mut paths),
        Err(alnkit_alignment_rs::Error::PathCountOverflow)
    ));
}
