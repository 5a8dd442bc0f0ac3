//! Gauss coefficient table loading and validation
use crate::error::IgrfError;
use crate::utils::constants::MAX_DEGREE;
use rust_embed::RustEmbed;
use std::io::BufRead;

#[derive(RustEmbed)]
#[folder = "data/"]
struct CoefficientData;

/// Name of the coefficient set compiled into the binary.
const DEFAULT_COEFFICIENTS: &str = "igrf13coeffs.txt";

/// Number of (n, m) pairs for n = 1..=MAX_DEGREE, m = 0..=n.
pub(crate) const NUM_PAIRS: usize = (MAX_DEGREE + 1) * (MAX_DEGREE + 2) / 2 - 1;

/// Flat index of (n, m) for n >= 1, m <= n.
#[inline]
pub(crate) fn pair_index(n: usize, m: usize) -> usize {
    debug_assert!(n >= 1 && m <= n && n <= MAX_DEGREE);
    n * (n + 1) / 2 + m - 1
}

/// Immutable store of IGRF Gauss coefficients g(n, m), h(n, m) per tabulated
/// epoch, plus one secular variation rate per coefficient (nT/year, applied
/// beyond the last epoch).
///
/// Coefficients live in flat triangular arrays with precomputed per-degree
/// offsets, so the synthesis inner loop does lookups without hashing or
/// allocation. The table is read-only after construction and can be shared
/// across threads.
#[derive(Debug)]
pub struct CoefficientTable {
    epochs: Vec<f64>,
    g: Vec<f64>, // epochs.len() * NUM_PAIRS, epoch-major
    h: Vec<f64>,
    sv_g: Vec<f64>, // NUM_PAIRS
    sv_h: Vec<f64>,
}

impl CoefficientTable {
    /// Loads the coefficient set compiled into the binary.
    pub fn embedded() -> Result<CoefficientTable, IgrfError> {
        let file = CoefficientData::get(DEFAULT_COEFFICIENTS).ok_or_else(|| {
            IgrfError::MalformedInput("Embedded coefficient file missing".to_string())
        })?;
        Self::parse(file.data.as_ref())
    }

    /// Parses a coefficient source in the standard IAGA column format:
    /// comment lines starting with `#`, a `g/h n m <epochs...> <sv>` header
    /// naming the tabulated epochs, then one row per coefficient with one
    /// value per epoch and a trailing secular variation rate.
    ///
    /// # Errors
    /// Returns `IgrfError::MalformedInput` if the header is missing, any
    /// value is non-numeric, a degree/order falls outside `1..=13` /
    /// `0..=n`, an `h(n, 0)` row appears, a row or the header is
    /// duplicated, or any
    /// `(n, m)` pair expected for the declared epochs is absent. No partial
    /// table is ever produced.
    pub fn parse<R: BufRead>(reader: R) -> Result<CoefficientTable, IgrfError> {
        let mut epochs: Option<Vec<f64>> = None;
        let mut g = vec![];
        let mut h = vec![];
        let mut sv_g = vec![0.0; NUM_PAIRS];
        let mut sv_h = vec![0.0; NUM_PAIRS];
        let mut seen_g = vec![false; NUM_PAIRS];
        let mut seen_h = vec![false; NUM_PAIRS];

        for line in reader.lines() {
            let line = line.map_err(|_| {
                IgrfError::MalformedInput("Unable to read line from coefficient file".to_string())
            })?;
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens[0] == "c/s" {
                continue; // column label line preceding the epoch header
            }
            if tokens[0] == "g/h" {
                if epochs.is_some() {
                    Err(IgrfError::MalformedInput(
                        "Duplicate g/h epoch header".to_string(),
                    ))?;
                }
                let declared = parse_epoch_header(&tokens)?;
                g = vec![0.0; declared.len() * NUM_PAIRS];
                h = vec![0.0; declared.len() * NUM_PAIRS];
                epochs = Some(declared);
                continue;
            }

            let epochs = epochs.as_ref().ok_or_else(|| {
                IgrfError::MalformedInput(format!(
                    "Coefficient row before g/h epoch header: {line}"
                ))
            })?;
            let (is_g, n, m, values) = parse_coefficient_row(&tokens, epochs.len())?;
            let idx = pair_index(n, m);
            if is_g {
                if seen_g[idx] {
                    Err(IgrfError::MalformedInput(format!(
                        "Duplicate g({n},{m}) row"
                    )))?;
                }
                seen_g[idx] = true;
                for (e, &v) in values[..epochs.len()].iter().enumerate() {
                    g[e * NUM_PAIRS + idx] = v;
                }
                sv_g[idx] = values[epochs.len()];
            } else {
                // h(n, 0) is identically zero by convention and never
                // appears as a row.
                if m == 0 {
                    Err(IgrfError::MalformedInput(format!(
                        "Unexpected h({n},0) row, h is undefined for order 0"
                    )))?;
                }
                if seen_h[idx] {
                    Err(IgrfError::MalformedInput(format!(
                        "Duplicate h({n},{m}) row"
                    )))?;
                }
                seen_h[idx] = true;
                for (e, &v) in values[..epochs.len()].iter().enumerate() {
                    h[e * NUM_PAIRS + idx] = v;
                }
                sv_h[idx] = values[epochs.len()];
            }
        }

        let epochs = epochs.ok_or_else(|| {
            IgrfError::MalformedInput("Coefficient source has no g/h epoch header".to_string())
        })?;
        for n in 1..=MAX_DEGREE {
            for m in 0..=n {
                let idx = pair_index(n, m);
                if !seen_g[idx] {
                    Err(IgrfError::MalformedInput(format!(
                        "Missing g({n},{m}) coefficient row"
                    )))?;
                }
                if m > 0 && !seen_h[idx] {
                    Err(IgrfError::MalformedInput(format!(
                        "Missing h({n},{m}) coefficient row"
                    )))?;
                }
            }
        }

        Ok(CoefficientTable {
            epochs,
            g,
            h,
            sv_g,
            sv_h,
        })
    }

    /// The tabulated epochs, ascending decimal years.
    pub fn epochs(&self) -> &[f64] {
        &self.epochs
    }

    /// Tabulated (g, h) for a degree/order at one epoch index. `h` is 0 for
    /// m = 0.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `0 <= m <= n <= 13` is violated or
    /// the epoch index exceeds the table.
    pub fn get(&self, n: usize, m: usize, epoch_index: usize) -> Result<(f64, f64), IgrfError> {
        check_pair(n, m)?;
        if epoch_index >= self.epochs.len() {
            Err(IgrfError::OutOfRange(format!(
                "Epoch index {epoch_index} exceeds {} tabulated epochs",
                self.epochs.len()
            )))?;
        }
        let idx = epoch_index * NUM_PAIRS + pair_index(n, m);
        Ok((self.g[idx], self.h[idx]))
    }

    /// Secular variation rates (ġ, ḣ) in nT/year for a degree/order.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `0 <= m <= n <= 13` is violated.
    pub fn secular_variation(&self, n: usize, m: usize) -> Result<(f64, f64), IgrfError> {
        check_pair(n, m)?;
        let idx = pair_index(n, m);
        Ok((self.sv_g[idx], self.sv_h[idx]))
    }

    /// Infallible lookups for the synthesis loop, which iterates the
    /// triangular ranges directly.
    #[inline]
    pub(crate) fn at(&self, n: usize, m: usize, epoch_index: usize) -> (f64, f64) {
        let idx = epoch_index * NUM_PAIRS + pair_index(n, m);
        (self.g[idx], self.h[idx])
    }

    #[inline]
    pub(crate) fn sv_at(&self, n: usize, m: usize) -> (f64, f64) {
        let idx = pair_index(n, m);
        (self.sv_g[idx], self.sv_h[idx])
    }
}

fn check_pair(n: usize, m: usize) -> Result<(), IgrfError> {
    if n < 1 || n > MAX_DEGREE || m > n {
        Err(IgrfError::OutOfRange(format!(
            "Degree/order ({n},{m}) outside triangular bound 0 <= m <= n <= {MAX_DEGREE}"
        )))?;
    }
    Ok(())
}

fn parse_epoch_header(tokens: &[&str]) -> Result<Vec<f64>, IgrfError> {
    // "g/h n m <epoch years...> <sv span label>"
    if tokens.len() < 5 {
        Err(IgrfError::MalformedInput(
            "Epoch header names no epochs".to_string(),
        ))?;
    }
    let mut epochs = vec![];
    for token in &tokens[3..tokens.len() - 1] {
        let year: f64 = token.parse().map_err(|_| {
            IgrfError::MalformedInput(format!("Non-numeric epoch in header: {token}"))
        })?;
        if let Some(&prev) = epochs.last() {
            if year <= prev {
                Err(IgrfError::MalformedInput(format!(
                    "Epochs not ascending at {year}"
                )))?;
            }
        }
        epochs.push(year);
    }
    Ok(epochs)
}

fn parse_coefficient_row(
    tokens: &[&str],
    num_epochs: usize,
) -> Result<(bool, usize, usize, Vec<f64>), IgrfError> {
    let is_g = match tokens[0] {
        "g" => true,
        "h" => false,
        other => Err(IgrfError::MalformedInput(format!(
            "Expected g or h row, found {other}"
        )))?,
    };
    if tokens.len() != 3 + num_epochs + 1 {
        Err(IgrfError::MalformedInput(format!(
            "Row has {} fields, expected {}",
            tokens.len(),
            3 + num_epochs + 1
        )))?;
    }
    let n: usize = tokens[1]
        .parse()
        .map_err(|_| IgrfError::MalformedInput(format!("Non-numeric degree: {}", tokens[1])))?;
    let m: usize = tokens[2]
        .parse()
        .map_err(|_| IgrfError::MalformedInput(format!("Non-numeric order: {}", tokens[2])))?;
    if n < 1 || n > MAX_DEGREE || m > n {
        Err(IgrfError::MalformedInput(format!(
            "Degree/order ({n},{m}) outside triangular bound 0 <= m <= n <= {MAX_DEGREE}"
        )))?;
    }
    let mut values = vec![];
    for token in &tokens[3..] {
        values.push(token.parse::<f64>().map_err(|_| {
            IgrfError::MalformedInput(format!("Non-numeric coefficient for ({n},{m}): {token}"))
        })?);
    }
    Ok((is_g, n, m, values))
}
