//! Simple Moving Average over a raw value sequence.
//!
//! Warmup: the first (n-1) values are `None`.

pub fn sma_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i >= period {
            sum -= values[i - period];
        }
        if i + 1 >= period {
            out.push(Some(sum / period as f64));
        } else {
            out.push(None);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_warmup_and_values() {
        let out = sma_values(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 2.0).abs() < 1e-12);
        assert!((out[3].unwrap() - 3.0).abs() < 1e-12);
        assert!((out[4].unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_period_one_is_identity() {
        let out = sma_values(&[7.0, 8.0], 1);
        assert_eq!(out, vec![Some(7.0), Some(8.0)]);
    }

    #[test]
    fn sma_zero_period() {
        assert_eq!(sma_values(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn sma_shorter_than_period() {
        assert_eq!(sma_values(&[1.0, 2.0], 5), vec![None, None]);
    }
}
