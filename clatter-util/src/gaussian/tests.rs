use super::GaussianSampler;

#[test]
fn mean_is_approximately_correct_over_many_draws() {
    let mut g = GaussianSampler::new(7);
    let n = 20_000;
    let sum: f64 = (0..n).map(|_| g.sample(5.0, 1.0)).sum();
    let mean = sum / f64::from(n);
    assert!((mean - 5.0).abs() < 0.1, "mean was {mean}");
}

#[test]
fn is_deterministic_given_a_seed() {
    let mut a = GaussianSampler::new(42);
    let mut b = GaussianSampler::new(42);
    for _ in 0..10 {
        assert_eq!(a.sample(0.0, 1.0), b.sample(0.0, 1.0));
    }
}

#[test]
fn sample_while_respects_a_floor() {
    let mut g = GaussianSampler::new(3);
    for _ in 0..1000 {
        let v = g.sample_while(0.0, 5.0, |v| v < 1.0);
        assert!(v >= 1.0);
    }
}
