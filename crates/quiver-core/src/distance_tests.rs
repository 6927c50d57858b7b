//! Tests for `distance` module

use super::distance::*;

#[test]
fn test_cosine_is_scale_invariant() {
    let a = vec![1.0, 2.0, 2.0, 0.0];
    let scaled = vec![0.5, 1.0, 1.0, 0.0];
    let score = DistanceMetric::Cosine.calculate(&a, &scaled);
    assert!((score - 1.0).abs() < 1e-6);

    let opposite = vec![-1.0, -2.0, -2.0, 0.0];
    let score = DistanceMetric::Cosine.calculate(&a, &opposite);
    assert!((score + 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_of_a_half_angle() {
    let a = vec![1.0, 1.0];
    let b = vec![1.0, 0.0];
    let score = DistanceMetric::Cosine.calculate(&a, &b);
    assert!((score - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
}

#[test]
fn test_cosine_zero_vector_scores_zero() {
    let zero = vec![0.0, 0.0];
    let b = vec![1.0, 0.0];
    assert!(DistanceMetric::Cosine.calculate(&zero, &b).abs() < 1e-6);
}

#[test]
fn test_euclid_measures_straight_line_distance() {
    let origin = vec![0.0, 0.0, 0.0];
    let b = vec![1.0, 2.0, 2.0];
    let distance = DistanceMetric::Euclid.calculate(&origin, &b);
    assert!((distance - 3.0).abs() < 1e-6);
}

#[test]
fn test_euclid_of_identical_vectors_is_zero() {
    let a = vec![0.25, -0.75, 1.5];
    assert!(DistanceMetric::Euclid.calculate(&a, &a).abs() < 1e-6);
}

#[test]
fn test_dot_accounts_for_sign() {
    let a = vec![0.5, -1.0, 2.0];
    let b = vec![2.0, 3.0, 0.25];
    let score = DistanceMetric::Dot.calculate(&a, &b);
    assert!((score + 1.5).abs() < 1e-6);
}

#[test]
fn test_score_rows_scores_every_row() {
    let matrix = [1.0, 0.0, 0.9, 0.1, 0.0, 1.0];
    let scores = DistanceMetric::Dot.score_rows(&[1.0, 0.0], &matrix, 2);
    assert_eq!(scores.len(), 3);
    assert!((scores[0] - 1.0).abs() < 1e-6);
    assert!((scores[1] - 0.9).abs() < 1e-6);
    assert!(scores[2].abs() < 1e-6);
}

#[test]
fn test_direction_mapping() {
    assert!(DistanceMetric::Cosine.higher_is_better());
    assert!(DistanceMetric::Dot.higher_is_better());
    assert!(!DistanceMetric::Euclid.higher_is_better());
}
