use crate::domain::errors::ScoreError;
use crate::domain::types::{KRatioScore, TraderRecord};

/// K-ratio of a cumulative-return series: the slope of an OLS trend line
/// through `(i, v_i)` divided by the standard error of that slope.
///
/// Rewards a high, steady growth rate and punishes erratic series with the
/// same total return: residual variance inflates the standard error and
/// shrinks the ratio. The x-axis is the 1-based sample index, not a
/// timestamp.
///
/// Returns `None` for fewer than 3 samples (the regression needs at least
/// one residual degree of freedom). A perfectly linear series has zero
/// residuals and yields an infinite ratio; callers must treat non-finite
/// values as valid extreme scores.
pub fn k_ratio(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 3 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = (n_f + 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (i, v) in values.iter().enumerate() {
        let dx = (i + 1) as f64 - mean_x;
        sxx += dx * dx;
        sxy += dx * (v - mean_y);
    }

    // Sxx > 0 is guaranteed for n >= 3 distinct integer x's.
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut ssr = 0.0;
    for (i, v) in values.iter().enumerate() {
        let fitted = intercept + slope * (i + 1) as f64;
        let residual = v - fitted;
        ssr += residual * residual;
    }

    let se_slope = (ssr / (n_f - 2.0) / sxx).sqrt();
    Some(slope / se_slope)
}

/// Score one resolved trader record.
pub fn score(record: &TraderRecord) -> Result<KRatioScore, ScoreError> {
    let values: Vec<f64> = record.performance.iter().map(|p| p.value).collect();
    let k_ratio = k_ratio(&values).ok_or_else(|| ScoreError::InsufficientData {
        trader: record.id.clone(),
        n: values.len(),
    })?;

    Ok(KRatioScore {
        id: record.id.clone(),
        k_ratio,
    })
}
