use crate::models::Listing;

/// Estimate a car's value from comparable listings
///
/// Without a mileage the estimate is the mean listing price. With a mileage,
/// price is regressed on mileage (ordinary least squares) and the fitted line
/// is evaluated at that mileage. The result is rounded up to the next multiple
/// of 100.
///
/// Returns `None` for an empty listing set.
pub fn estimate(listings: &[Listing], mileage: Option<i64>) -> Option<i64> {
    if listings.is_empty() {
        return None;
    }

    match mileage {
        Some(mileage) if listings.len() > 1 => {
            let line = fit_price_on_mileage(listings);
            Some(round_up_to_hundred(line.predict(mileage as f64)))
        }
        _ => Some(mean_rounded_up(listings)),
    }
}

/// Least squares line `price = intercept + slope * mileage`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    #[inline]
    pub fn predict(&self, mileage: f64) -> f64 {
        self.intercept + self.slope * mileage
    }
}

/// Fit price on mileage over a non-empty listing set
///
/// When every listing has the same mileage the slope is zero and the line
/// passes through the mean price.
pub fn fit_price_on_mileage(listings: &[Listing]) -> RegressionLine {
    let n = listings.len() as f64;
    let mean_x = listings.iter().map(|l| l.mileage as f64).sum::<f64>() / n;
    let mean_y = listings.iter().map(|l| l.price as f64).sum::<f64>() / n;

    let (sxx, sxy) = listings.iter().fold((0.0, 0.0), |(sxx, sxy), l| {
        let dx = l.mileage as f64 - mean_x;
        let dy = l.price as f64 - mean_y;
        (sxx + dx * dx, sxy + dx * dy)
    });

    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };

    RegressionLine {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}

/// Mean price rounded up to a multiple of 100, in exact integer arithmetic
fn mean_rounded_up(listings: &[Listing]) -> i64 {
    let sum: i128 = listings.iter().map(|l| l.price as i128).sum();
    let divisor = 100 * listings.len() as i128;
    let hundreds = sum / divisor + i128::from(sum % divisor > 0);
    (hundreds * 100) as i64
}

/// Round up to the next multiple of 100, never below zero
fn round_up_to_hundred(raw: f64) -> i64 {
    // A regression extrapolated past the data can go negative; a price cannot
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }

    // Absorb float noise so an exact 10000.0000000001 stays 10000
    let snapped = if (raw - raw.round()).abs() < 1e-6 { raw.round() } else { raw };
    ((snapped / 100.0).ceil() * 100.0) as i64
}
