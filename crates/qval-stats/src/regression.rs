//! Ordinary least-squares straight-line fit.

use crate::error::{StatsError, ensure_finite};

/// Fitted line `y = slope * x + intercept` and its coefficient of determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl Regression {
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit a least-squares line through `(xs[i], ys[i])`.
///
/// `r_squared` is 0 when every `y` is identical (zero total sum of squares).
///
/// # Errors
///
/// Returns `StatsError::InvalidInput` when the sequences differ in length,
/// hold fewer than two points, contain a non-finite value, or every `x` is
/// identical (no unique slope).
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Result<Regression, StatsError> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(StatsError::invalid("Invalid data for regression"));
    }
    ensure_finite("concentrations", xs)?;
    ensure_finite("responses", ys)?;

    #[allow(clippy::cast_precision_loss)]
    let n = xs.len() as f64;
    let x_mean = xs.iter().sum::<f64>() / n;
    let y_mean = ys.iter().sum::<f64>() / n;

    let (sxx, sxy) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
            let dx = x - x_mean;
            (dx.mul_add(dx, sxx), dx.mul_add(y - y_mean, sxy))
        });
    if sxx == 0.0 {
        return Err(StatsError::invalid(
            "Invalid data for regression: concentrations are all equal",
        ));
    }

    let slope = sxy / sxx;
    let intercept = slope.mul_add(-x_mean, y_mean);
    let fit = Regression {
        slope,
        intercept,
        r_squared: 0.0,
    };

    let (ss_res, ss_tot) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(ss_res, ss_tot), (&x, &y)| {
            let residual = y - fit.predict(x);
            let deviation = y - y_mean;
            (
                residual.mul_add(residual, ss_res),
                deviation.mul_add(deviation, ss_tot),
            )
        });
    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(Regression { r_squared, ..fit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const TOL: f64 = 1e-9;

    #[test]
    fn perfect_line() {
        let fit = linear_regression(
            &[25.0, 50.0, 75.0, 100.0, 125.0],
            &[2500.0, 5000.0, 7500.0, 10000.0, 12500.0],
        )
        .unwrap();
        assert!((fit.slope - 100.0).abs() < TOL);
        assert!(fit.intercept.abs() < TOL);
        assert!((fit.r_squared - 1.0).abs() < TOL);
    }

    #[test]
    fn matches_closed_form_with_noise() {
        // x = 1..5, y = [2.1, 3.9, 6.2, 7.8, 10.1]
        // Sxx = 10, Sxy = 19.9 -> slope 1.99, intercept 6.02 - 1.99 * 3 = 0.05
        let fit = linear_regression(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.1, 3.9, 6.2, 7.8, 10.1]).unwrap();
        assert!((fit.slope - 1.99).abs() < TOL);
        assert!((fit.intercept - 0.05).abs() < TOL);
        // SSres = 0.107, SStot = 39.708
        assert!((fit.r_squared - (1.0 - 0.107 / 39.708)).abs() < 1e-9);
    }

    #[test]
    fn constant_responses_have_zero_r_squared() {
        let fit = linear_regression(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]).unwrap();
        assert_eq!(fit.r_squared, 0.0);
        assert!(fit.slope.abs() < TOL);
        assert!((fit.intercept - 7.0).abs() < TOL);
    }

    #[test]
    fn two_points_fit_exactly() {
        let fit = linear_regression(&[0.0, 2.0], &[1.0, 5.0]).unwrap();
        assert!((fit.slope - 2.0).abs() < TOL);
        assert!((fit.intercept - 1.0).abs() < TOL);
        assert!((fit.predict(1.0) - 3.0).abs() < TOL);
    }

    #[rstest]
    #[case(&[1.0, 2.0, 3.0], &[1.0, 2.0])]
    #[case(&[1.0], &[1.0])]
    #[case(&[], &[])]
    fn malformed_input_rejected(#[case] xs: &[f64], #[case] ys: &[f64]) {
        assert_eq!(
            linear_regression(xs, ys),
            Err(StatsError::InvalidInput("Invalid data for regression".into()))
        );
    }

    #[test]
    fn vertical_line_rejected() {
        assert!(linear_regression(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn infinite_response_rejected() {
        let err = linear_regression(&[1.0, 2.0], &[1.0, f64::INFINITY]).unwrap_err();
        assert!(err.to_string().contains("responses[1]"));
    }
}
