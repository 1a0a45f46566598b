/// Percent recovery of `measured` against `theoretical`.
///
/// Returns 0 when `theoretical` is 0.
#[must_use]
pub fn recovery(theoretical: f64, measured: f64) -> f64 {
    if theoretical == 0.0 {
        0.0
    } else {
        measured / theoretical * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recovery_is_percent_of_theoretical() {
        assert!((recovery(80.0, 79.2) - 99.0).abs() < 1e-9);
        assert!((recovery(100.0, 101.2) - 101.2).abs() < 1e-9);
    }

    #[test]
    fn zero_theoretical_returns_zero() {
        assert_eq!(recovery(0.0, 12.5), 0.0);
    }
}
