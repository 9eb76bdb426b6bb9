use super::{add_padded, convolve, linspace, TooFewSteps};
use assert_approx_eq::assert_approx_eq;
use proptest::prelude::*;

#[test]
fn linspace_endpoints_and_spacing() {
    let mut out = Vec::new();
    linspace(1.0, 2.0, 5, &mut out).unwrap();
    assert_approx_eq!(out[0], 1.0);
    assert_approx_eq!(out[4], 2.0);
    let step = out[1] - out[0];
    for w in out[..5].windows(2) {
        assert_approx_eq!(w[1] - w[0], step, 1e-9);
    }
}

#[test]
fn linspace_rejects_too_few_steps() {
    let mut out = Vec::new();
    assert_eq!(linspace(0.0, 1.0, 1, &mut out), Err(TooFewSteps(1)));
    assert_eq!(linspace(0.0, 1.0, 0, &mut out), Err(TooFewSteps(0)));
}

#[test]
fn linspace_grows_undersized_buffer() {
    let mut out = vec![0.0; 2];
    linspace(0.0, 10.0, 50, &mut out).unwrap();
    assert!(out.len() >= 50);
    assert_approx_eq!(out[49], 10.0);
}

#[test]
fn convolve_matches_naive_full_convolution() {
    let signal = [1.0, 2.0, 3.0];
    let kernel = [1.0, 0.5];
    let natural_len = signal.len() + kernel.len() - 1;
    let mut out = Vec::new();
    convolve(&signal, &kernel, natural_len, &mut out);
    // Naive full convolution: [1, 2.5, 4, 1.5]
    assert_approx_eq!(out[0], 1.0);
    assert_approx_eq!(out[1], 2.5);
    assert_approx_eq!(out[2], 4.0);
    assert_approx_eq!(out[3], 1.5);
}

#[test]
fn convolve_can_request_a_length_shorter_than_natural() {
    let signal = [1.0, 2.0, 3.0, 4.0];
    let kernel = [1.0, 1.0];
    let mut out = Vec::new();
    convolve(&signal, &kernel, 2, &mut out);
    assert_approx_eq!(out[0], 1.0);
    assert_approx_eq!(out[1], 3.0);
}

#[test]
fn convolve_with_empty_kernel_is_silent() {
    let mut out = Vec::new();
    convolve(&[1.0, 2.0], &[], 4, &mut out);
    assert!(out[..4].iter().all(|&s| s == 0.0));
}

#[test]
fn add_padded_basics() {
    let a = [1.0, 2.0, 3.0];
    let b = [10.0, 20.0];
    let mut out = Vec::new();
    let len = add_padded(&a, a.len(), &b, b.len(), &mut out);
    assert_eq!(len, 3);
    assert_approx_eq!(out[0], 11.0);
    assert_approx_eq!(out[1], 22.0);
    assert_approx_eq!(out[2], 3.0);
}

proptest! {
    #[test]
    fn linspace_endpoints_hold_for_any_range(a in -1e6..1e6, b in -1e6..1e6, steps in 2usize..200) {
        let mut out = Vec::new();
        linspace(a, b, steps, &mut out).unwrap();
        prop_assert!((out[0] - a).abs() < 1e-6);
        prop_assert!((out[steps - 1] - b).abs() < 1e-6);
    }

    #[test]
    fn add_padded_len_is_max_of_inputs(a_len in 0usize..20, b_len in 0usize..20) {
        let a = vec![1.0; a_len];
        let b = vec![2.0; b_len];
        let mut out = Vec::new();
        let len = add_padded(&a, a_len, &b, b_len, &mut out);
        prop_assert_eq!(len, a_len.max(b_len));
    }
}
