//! Descriptive statistics and hypothesis tests over `f64` samples.
//!
//! Conventions follow common dataframe tooling: linear-interpolated quantiles,
//! sample standard deviation (`ddof = 1`), bias-adjusted skewness and excess
//! kurtosis that read `0` for constant samples.

/// Arithmetic mean; `None` for an empty sample.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Sample standard deviation (`ddof = 1`); needs two values.
pub fn sample_std(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m2 = central_moment_sum(data, 2)?;
    Some((m2 / (data.len() - 1) as f64).sqrt())
}

/// Population standard deviation (`ddof = 0`).
pub fn population_std(data: &[f64]) -> Option<f64> {
    let m2 = central_moment_sum(data, 2)?;
    Some((m2 / data.len() as f64).sqrt())
}

/// Quantile of an ascending sample with linear interpolation between ranks.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&p) {
        return None;
    }
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

pub fn median(sorted: &[f64]) -> Option<f64> {
    quantile(sorted, 0.5)
}

/// Ascending copy with NaNs dropped.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Adjusted Fisher-Pearson skewness `G1`; needs three values.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 {
        return None;
    }
    let (m2, m3) = (central_moment(data, 2)?, central_moment(data, 3)?);
    if is_degenerate(m2, data) {
        return Some(0.0);
    }
    let n = n as f64;
    let g1 = m3 / m2.powf(1.5);
    Some((n * (n - 1.0)).sqrt() / (n - 2.0) * g1)
}

/// Unbiased excess kurtosis `G2`; needs four values.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 4 {
        return None;
    }
    let (m2, m4) = (central_moment(data, 2)?, central_moment(data, 4)?);
    if is_degenerate(m2, data) {
        return Some(0.0);
    }
    let n = n as f64;
    let g2 = m4 / (m2 * m2) - 3.0;
    Some(((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0)))
}

/// D'Agostino-Pearson omnibus test; returns `(K², p)`.
///
/// Needs eight values and non-zero variance.
pub fn normal_test(data: &[f64]) -> Option<(f64, f64)> {
    let n = data.len();
    if n < 8 {
        return None;
    }
    let m2 = central_moment(data, 2)?;
    if is_degenerate(m2, data) {
        return None;
    }
    let b1 = central_moment(data, 3)? / m2.powf(1.5);
    let b2 = central_moment(data, 4)? / (m2 * m2);
    let z_skew = skew_z(b1, n as f64);
    let z_kurt = kurtosis_z(b2, n as f64)?;
    let k2 = z_skew * z_skew + z_kurt * z_kurt;
    if !k2.is_finite() {
        return None;
    }
    // chi-squared survival with two degrees of freedom
    Some((k2, (-k2 / 2.0).exp()))
}

fn skew_z(b1: f64, n: f64) -> f64 {
    let y = b1 * ((n + 1.0) * (n + 3.0) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let y = if y == 0.0 { 1.0 } else { y };
    let ratio = y / alpha;
    delta * (ratio + (ratio * ratio + 1.0).sqrt()).ln()
}

fn kurtosis_z(b2: f64, n: f64) -> Option<f64> {
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let variance = 24.0 * n * (n - 2.0) * (n - 3.0)
        / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / variance.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * (6.0 * (n + 3.0) * (n + 5.0) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return None;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    Some((term1 - term2) / (2.0 / (9.0 * a)).sqrt())
}

/// Largest `n1 n2` for which the two-sample KS p-value is computed exactly.
pub const KS_EXACT_MAX_CELLS: usize = 10_000;

/// Two-sample Kolmogorov-Smirnov test; returns `(D, p)`.
///
/// `p` is exact while `n1 n2 <= KS_EXACT_MAX_CELLS`. Larger samples use the
/// asymptotic Kolmogorov tail with the effective size `n1 n2 / (n1 + n2)`.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    let (a, b) = (sorted(a), sorted(b));
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0, 0);
    let mut statistic = 0.0_f64;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        statistic = statistic.max((i as f64 / n1 - j as f64 / n2).abs());
    }

    if a.len() * b.len() <= KS_EXACT_MAX_CELLS {
        return Some((statistic, ks_exact_p(a.len(), b.len(), statistic)));
    }
    let en = (n1 * n2 / (n1 + n2)).sqrt();
    let lambda = (en + 0.12 + 0.11 / en) * statistic;
    Some((statistic, kolmogorov_survival(lambda)))
}

/// Exact `P(D >= statistic)` under the null, by walking the `n1 x n2` lattice.
///
/// Every merge order of the two samples is a monotone path from `(0, 0)` to
/// `(n1, n2)`, all equally likely. The p-value is the probability mass of
/// paths that reach a point with `|i n2 - j n1| >= D n1 n2`.
fn ks_exact_p(n1: usize, n2: usize, statistic: f64) -> f64 {
    if statistic <= 0.0 {
        return 1.0;
    }
    let (m, n) = (n1 as i64, n2 as i64);
    // D n1 n2 is an integer up to rounding
    let threshold = (statistic * (m * n) as f64).round() as i64;
    let crosses = |i: usize, j: usize| (i as i64 * n - j as i64 * m).abs() >= threshold;

    let width = n2 + 1;
    let mut mass = vec![0.0_f64; (n1 + 1) * width];
    mass[0] = 1.0;
    let mut crossed = 0.0_f64;
    for i in 0..=n1 {
        for j in 0..=n2 {
            let here = mass[i * width + j];
            let remaining = (n1 - i) + (n2 - j);
            if here == 0.0 || remaining == 0 {
                continue;
            }
            let remaining = remaining as f64;
            if i < n1 {
                let step = here * (n1 - i) as f64 / remaining;
                if crosses(i + 1, j) {
                    crossed += step;
                } else {
                    mass[(i + 1) * width + j] += step;
                }
            }
            if j < n2 {
                let step = here * (n2 - j) as f64 / remaining;
                if crosses(i, j + 1) {
                    crossed += step;
                } else {
                    mass[i * width + j + 1] += step;
                }
            }
        }
    }
    crossed.clamp(0.0, 1.0)
}

/// `Q(λ) = 2 Σ (-1)^(j-1) exp(-2 j² λ²)`, clamped to `[0, 1]`.
fn kolmogorov_survival(lambda: f64) -> f64 {
    const EPS1: f64 = 1e-3;
    const EPS2: f64 = 1e-8;

    let a2 = -2.0 * lambda * lambda;
    let mut factor = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0_f64;
    for j in 1..=100 {
        let j = j as f64;
        let term = factor * (a2 * j * j).exp();
        sum += term;
        if term.abs() <= EPS1 * previous || term.abs() <= EPS2 * sum {
            return sum.clamp(0.0, 1.0);
        }
        factor = -factor;
        previous = term.abs();
    }
    // series fails to converge for tiny λ
    1.0
}

/// Equal-width histogram over `[min, max]`; the last bin is closed.
///
/// A constant sample spans `[v - 0.5, v + 0.5]`.
pub fn histogram(data: &[f64], bins: usize) -> Option<(Vec<f64>, Vec<usize>)> {
    let sorted = sorted(data);
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if bins == 0 || !first.is_finite() || !last.is_finite() {
        return None;
    }
    let (low, high) = if first == last {
        (first - 0.5, last + 0.5)
    } else {
        (first, last)
    };
    let width = (high - low) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|idx| low + width * idx as f64).collect();
    let mut counts = vec![0_usize; bins];
    for value in sorted {
        let idx = (((value - low) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((edges, counts))
}

fn central_moment_sum(data: &[f64], order: i32) -> Option<f64> {
    let mean = mean(data)?;
    Some(data.iter().map(|value| (value - mean).powi(order)).sum())
}

fn central_moment(data: &[f64], order: i32) -> Option<f64> {
    Some(central_moment_sum(data, order)? / data.len() as f64)
}

/// Variance indistinguishable from rounding noise around the mean.
fn is_degenerate(m2: f64, data: &[f64]) -> bool {
    let scale = mean(data).map(f64::abs).unwrap_or(0.0).max(1.0);
    m2 <= (f64::EPSILON * scale).powi(2) * 16.0
}
