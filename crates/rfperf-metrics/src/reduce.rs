//! # Array Reducers
//!
//! Scalar reductions over metric arrays. A NaN anywhere in the input
//! makes the result NaN, matching array-library semantics rather than
//! `f64::min`/`f64::max`, which silently skip NaN. Every reducer returns
//! `None` for an empty slice.

/// Smallest value, or NaN if any value is NaN.
pub fn min(values: &[f64]) -> Option<f64> {
    fold_propagating(values, f64::min)
}

/// Largest value, or NaN if any value is NaN.
pub fn max(values: &[f64]) -> Option<f64> {
    fold_propagating(values, f64::max)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// `max - min`.
pub fn peak_to_peak(values: &[f64]) -> Option<f64> {
    Some(max(values)? - min(values)?)
}

fn fold_propagating(values: &[f64], pick: fn(f64, f64) -> f64) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    let mut acc = *first;
    for &v in rest {
        if acc.is_nan() {
            break;
        }
        acc = if v.is_nan() { v } else { pick(acc, v) };
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_slices_reduce_to_none() {
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(peak_to_peak(&[]), None);
    }

    #[test]
    fn basic_reductions() {
        let v = [1.0, -2.0, 4.5];
        assert_eq!(min(&v), Some(-2.0));
        assert_eq!(max(&v), Some(4.5));
        assert_eq!(mean(&v), Some(3.5 / 3.0));
        assert_eq!(peak_to_peak(&v), Some(6.5));
    }

    #[test]
    fn nan_propagates_wherever_it_sits() {
        for v in [[f64::NAN, 1.0, 2.0], [1.0, f64::NAN, 2.0], [1.0, 2.0, f64::NAN]] {
            assert!(min(&v).unwrap().is_nan());
            assert!(max(&v).unwrap().is_nan());
            assert!(mean(&v).unwrap().is_nan());
            assert!(peak_to_peak(&v).unwrap().is_nan());
        }
    }

    #[test]
    fn infinities_are_ordinary_values() {
        let v = [f64::NEG_INFINITY, 0.0, 3.0];
        assert_eq!(min(&v), Some(f64::NEG_INFINITY));
        assert_eq!(max(&v), Some(3.0));
        assert_eq!(peak_to_peak(&v), Some(f64::INFINITY));
    }

    proptest! {
        #[test]
        fn min_le_mean_le_max(v in prop::collection::vec(-1e6f64..1e6, 1..64)) {
            let lo = min(&v).unwrap();
            let hi = max(&v).unwrap();
            let avg = mean(&v).unwrap();
            prop_assert!(lo <= hi);
            prop_assert!(avg >= lo - 1e-6 && avg <= hi + 1e-6);
            prop_assert!(peak_to_peak(&v).unwrap() >= 0.0);
        }
    }
}
