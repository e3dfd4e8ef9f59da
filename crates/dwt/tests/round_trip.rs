//! Perfect-reconstruction tests across every strategy and built-in filter.

use approx::assert_abs_diff_eq;
use dyadic_dwt::{Dwt, DwtConfig, WaveletFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const STRATEGIES: [&str; 3] = ["periodic", "zero", "symmetric"];

fn random_signal(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(-10.0..10.0)).collect()
}

fn dwt(filter: WaveletFilter, strategy: &str) -> Dwt {
    Dwt::from_config(&DwtConfig::new(filter).with_strategy(strategy)).unwrap()
}

fn assert_close(expected: &[f64], actual: &[f64], context: &str) {
    assert_eq!(expected.len(), actual.len(), "length mismatch: {context}");
    for (i, (a, b)) in expected.iter().zip(actual).enumerate() {
        assert!(
            (a - b).abs() < 1e-8,
            "{context}: sample {i} differs, expected {a}, got {b}"
        );
    }
}

#[test]
fn decompose_reconstruct_all_combinations() {
    for strategy in STRATEGIES {
        for filter in WaveletFilter::ALL {
            let dwt = dwt(filter, strategy);
            for n in [2, 3, 7, 16, 33, 100] {
                let signal = random_signal(n, n as u64);
                let result = dwt.decompose(&signal).unwrap();
                let restored = dwt.reconstruct(&result).unwrap();
                assert_close(&signal, &restored, &format!("{strategy}/{filter:?}/n={n}"));
            }
        }
    }
}

#[test]
fn decompose_to_level_round_trip() {
    for strategy in STRATEGIES {
        for filter in WaveletFilter::ALL {
            let dwt = dwt(filter, strategy);
            for n in [5, 12, 31, 64] {
                let signal = random_signal(n, 7 + n as u64);
                for level in 1..=4 {
                    let result = dwt.decompose_to_level(&signal, level).unwrap();
                    assert!(result.level() <= level);
                    let restored = dwt.reconstruct(&result).unwrap();
                    assert_close(
                        &signal,
                        &restored,
                        &format!("{strategy}/{filter:?}/n={n}/level={level}"),
                    );
                }
            }
        }
    }
}

#[test]
fn partial_reconstruction_matches_shallower_decomposition() {
    for strategy in STRATEGIES {
        for filter in [WaveletFilter::Haar, WaveletFilter::D4, WaveletFilter::Sym4] {
            let dwt = dwt(filter, strategy);
            let signal = random_signal(50, 99);
            let full = dwt.decompose_to_level(&signal, 4).unwrap();

            for target in 1..full.level() {
                let partial = dwt.reconstruct_to_level(&full, target).unwrap();
                assert_eq!(Some(partial.len()), full.signal_len(target));

                let shallow = dwt.decompose_to_level(&signal, target).unwrap();
                assert_close(
                    shallow.approximation(),
                    &partial,
                    &format!("{strategy}/{filter:?}/target={target}"),
                );
            }
        }
    }
}

#[test]
fn haar_periodic_preserves_energy() {
    let dwt = dwt(WaveletFilter::Haar, "periodic");
    let signal = random_signal(64, 3);
    let result = dwt.decompose(&signal).unwrap();

    let input: f64 = signal.iter().map(|x| x * x).sum();
    let coeffs: f64 = result
        .details()
        .iter()
        .flatten()
        .chain(result.approximation())
        .map(|x| x * x)
        .sum();
    assert_abs_diff_eq!(input, coeffs, epsilon = 1e-8);
}

#[test]
fn constant_signal_has_zero_details() {
    let dwt = dwt(WaveletFilter::D4, "periodic");
    let result = dwt.decompose(&[2.5; 32]).unwrap();
    for detail in result.details() {
        for &d in detail {
            assert_abs_diff_eq!(d, 0.0, epsilon = 1e-10);
        }
    }
}
