//! Schmidt quasi-normalized associated Legendre functions
use crate::utils::constants::MAX_DEGREE;

/// Number of (n, m) pairs for n = 0..=MAX_DEGREE, m = 0..=n.
const NUM_TERMS: usize = (MAX_DEGREE + 1) * (MAX_DEGREE + 2) / 2;

/// Triangular table of Schmidt quasi-normalized associated Legendre
/// functions P(n, m) and their derivatives dP/dθ at a single colatitude.
///
/// The table is recomputed per colatitude and owned by the evaluation call.
/// The normalization is folded into the recurrence coefficients, so values
/// multiply the Gauss coefficients directly with no rescaling pass.
pub struct LegendreTable {
    p: [f64; NUM_TERMS],
    dp: [f64; NUM_TERMS],
}

/// Flat index of (n, m) with m <= n.
#[inline]
fn index(n: usize, m: usize) -> usize {
    debug_assert!(m <= n && n <= MAX_DEGREE);
    n * (n + 1) / 2 + m
}

impl LegendreTable {
    /// Computes P(n, m) and dP(n, m)/dθ for all n = 0..=13, m = 0..=n at
    /// colatitude `theta` (radians).
    ///
    /// The three-term recurrence never divides by sin θ, so the poles
    /// (θ = 0, π) produce exact finite values with no epsilon guard.
    /// Derivatives come from the companion recurrence, not from finite
    /// differences.
    pub fn compute(theta: f64) -> LegendreTable {
        let (sin_t, cos_t) = theta.sin_cos();
        let mut p = [0.0; NUM_TERMS];
        let mut dp = [0.0; NUM_TERMS];
        p[index(0, 0)] = 1.0;

        for n in 1..=MAX_DEGREE {
            // Diagonal term from P(n-1, n-1). The Schmidt factor is
            // sqrt(1 - 1/2n) for n > 1 and 1 for n = 1.
            let k = if n == 1 {
                1.0
            } else {
                (1.0 - 1.0 / (2.0 * n as f64)).sqrt()
            };
            let prev = index(n - 1, n - 1);
            p[index(n, n)] = k * sin_t * p[prev];
            dp[index(n, n)] = k * (sin_t * dp[prev] + cos_t * p[prev]);

            // Off-diagonal terms from P(n-1, m) and P(n-2, m). For
            // m = n-1 the second term vanishes (its coefficient is 0).
            for m in 0..n {
                let nf = n as f64;
                let mf = m as f64;
                let norm = (nf * nf - mf * mf).sqrt();
                let c1 = (2.0 * nf - 1.0) / norm;
                let c2 = ((nf - 1.0) * (nf - 1.0) - mf * mf).sqrt() / norm;
                let p1 = index(n - 1, m);
                let (p2, dp2) = if n >= m + 2 {
                    (p[index(n - 2, m)], dp[index(n - 2, m)])
                } else {
                    (0.0, 0.0)
                };
                p[index(n, m)] = c1 * cos_t * p[p1] - c2 * p2;
                dp[index(n, m)] = c1 * (cos_t * dp[p1] - sin_t * p[p1]) - c2 * dp2;
            }
        }
        LegendreTable { p, dp }
    }

    #[inline]
    pub fn p(&self, n: usize, m: usize) -> f64 {
        self.p[index(n, m)]
    }

    #[inline]
    pub fn dp(&self, n: usize, m: usize) -> f64 {
        self.dp[index(n, m)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;
    use std::f64::consts::PI;

    #[test]
    fn low_degree_closed_forms() {
        let theta: f64 = 1.0;
        let (s, c) = theta.sin_cos();
        let table = LegendreTable::compute(theta);

        assert!(is_close!(table.p(0, 0), 1.0));
        assert!(is_close!(table.p(1, 0), c));
        assert!(is_close!(table.p(1, 1), s));
        assert!(is_close!(table.p(2, 0), 1.5 * c * c - 0.5));
        assert!(is_close!(table.p(2, 1), 3.0f64.sqrt() * s * c));
        assert!(is_close!(table.p(2, 2), 3.0f64.sqrt() / 2.0 * s * s));
    }

    #[test]
    fn low_degree_derivatives() {
        let theta: f64 = 0.7;
        let (s, c) = theta.sin_cos();
        let table = LegendreTable::compute(theta);

        assert!(is_close!(table.dp(1, 0), -s));
        assert!(is_close!(table.dp(1, 1), c));
        assert!(is_close!(table.dp(2, 0), -3.0 * c * s));
        assert!(is_close!(table.dp(2, 1), 3.0f64.sqrt() * (c * c - s * s)));
        assert!(is_close!(table.dp(2, 2), 3.0f64.sqrt() * s * c));
    }

    #[test]
    fn finite_at_poles() {
        for theta in [0.0, PI] {
            let table = LegendreTable::compute(theta);
            for n in 0..=MAX_DEGREE {
                for m in 0..=n {
                    assert!(table.p(n, m).is_finite(), "P({n},{m}) at theta={theta}");
                    assert!(table.dp(n, m).is_finite(), "dP({n},{m}) at theta={theta}");
                }
            }
        }
    }

    #[test]
    fn sectoral_terms_vanish_at_north_pole() {
        let table = LegendreTable::compute(0.0);
        for n in 1..=MAX_DEGREE {
            assert!(is_close!(table.p(n, 0), 1.0));
            for m in 1..=n {
                assert!(is_close!(table.p(n, m), 0.0, abs_tol = 1e-300));
            }
        }
    }
}
