//! Time resolution of Gauss coefficients between and beyond epochs
use crate::error::IgrfError;
use crate::igrf::coefficients::{pair_index, CoefficientTable, NUM_PAIRS};
use crate::utils::constants::MAX_DEGREE;
use itertools::Itertools;

/// Per-query snapshot of time-adjusted coefficients g(n, m, t), h(n, m, t),
/// owned by the evaluation call.
pub struct ResolvedCoefficients {
    g: [f64; NUM_PAIRS],
    h: [f64; NUM_PAIRS],
}

impl ResolvedCoefficients {
    /// Time-adjusted (g, h) for a degree/order.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `0 <= m <= n <= 13` is violated.
    pub fn get(&self, n: usize, m: usize) -> Result<(f64, f64), IgrfError> {
        if n < 1 || n > MAX_DEGREE || m > n {
            Err(IgrfError::OutOfRange(format!(
                "Degree/order ({n},{m}) outside triangular bound 0 <= m <= n <= {MAX_DEGREE}"
            )))?;
        }
        Ok(self.at(n, m))
    }

    #[inline]
    pub(crate) fn at(&self, n: usize, m: usize) -> (f64, f64) {
        let idx = pair_index(n, m);
        (self.g[idx], self.h[idx])
    }
}

/// Resolves the coefficient table at decimal year `year`.
///
/// Between two tabulated epochs the coefficients are linearly interpolated;
/// at or beyond the last epoch they are linearly extrapolated with the
/// per-coefficient secular variation rate. Exactly at a tabulated epoch the
/// tabulated values pass through unchanged.
///
/// # Errors
/// Returns `IgrfError::OutOfRange` if `year` is not finite or precedes the
/// first tabulated epoch.
pub fn resolve(table: &CoefficientTable, year: f64) -> Result<ResolvedCoefficients, IgrfError> {
    let epochs = table.epochs();
    let first = epochs[0];
    let last = epochs[epochs.len() - 1];
    if !year.is_finite() {
        Err(IgrfError::OutOfRange(format!(
            "Year {year} is not a finite decimal year"
        )))?;
    }
    if year < first {
        Err(IgrfError::OutOfRange(format!(
            "Year {year} precedes first tabulated epoch {first}"
        )))?;
    }

    let mut resolved = ResolvedCoefficients {
        g: [0.0; NUM_PAIRS],
        h: [0.0; NUM_PAIRS],
    };

    if year >= last {
        // Predictive span: last tabulated values plus secular variation.
        let dt = year - last;
        let last_index = epochs.len() - 1;
        for n in 1..=MAX_DEGREE {
            for m in 0..=n {
                let idx = pair_index(n, m);
                let (g, h) = table.at(n, m, last_index);
                let (sv_g, sv_h) = table.sv_at(n, m);
                resolved.g[idx] = g + sv_g * dt;
                resolved.h[idx] = h + sv_h * dt;
            }
        }
        return Ok(resolved);
    }

    let (e0, e1) = epochs
        .iter()
        .enumerate()
        .tuple_windows()
        .find(|&((_, &t0), (_, &t1))| t0 <= year && year < t1)
        .map(|((i0, _), (i1, _))| (i0, i1))
        .expect("year is inside the tabulated span");
    let t0 = epochs[e0];
    let fraction = (year - t0) / (epochs[e1] - t0);
    for n in 1..=MAX_DEGREE {
        for m in 0..=n {
            let idx = pair_index(n, m);
            let (g0, h0) = table.at(n, m, e0);
            let (g1, h1) = table.at(n, m, e1);
            resolved.g[idx] = g0 + (g1 - g0) * fraction;
            resolved.h[idx] = h0 + (h1 - h0) * fraction;
        }
    }
    Ok(resolved)
}
