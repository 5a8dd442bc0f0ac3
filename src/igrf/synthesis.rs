//! Spherical harmonic synthesis of the geomagnetic potential and field
use crate::igrf::epoch::ResolvedCoefficients;
use crate::igrf::legendre::LegendreTable;
use crate::utils::constants::{IGRF_REFERENCE_RADIUS_KM, MAX_DEGREE};

/// Geomagnetic field at a query point.
///
/// `x`, `y`, `z` are the north, east, and vertically-down components in nT
/// in the local geodetic frame. `h` and `f` are the horizontal and total
/// intensities in nT; `d` (declination) and `i` (inclination) are in
/// degrees.
#[derive(Debug, Clone, Copy)]
pub struct FieldComponents {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub h: f64,
    pub f: f64,
    pub d: f64,
    pub i: f64,
}

impl FieldComponents {
    /// Derives intensities and angles from north/east/down components.
    pub(crate) fn from_xyz(x: f64, y: f64, z: f64) -> FieldComponents {
        let h = x.hypot(y);
        let f = h.hypot(z);
        FieldComponents {
            x,
            y,
            z,
            h,
            f,
            d: y.atan2(x).to_degrees(),
            i: z.atan2(h).to_degrees(),
        }
    }
}

/// Scalar magnetic potential V(r, θ, φ) in nT·km at geocentric radius `r`
/// (km), colatitude `theta` and longitude `phi` (radians), for
/// time-resolved coefficients.
///
/// V = a Σ_n (a/r)^(n+1) Σ_m [g cos(mφ) + h sin(mφ)] P(n, m).
pub(crate) fn potential(r: f64, theta: f64, phi: f64, coeffs: &ResolvedCoefficients) -> f64 {
    let legendre = LegendreTable::compute(theta);
    let ratio = IGRF_REFERENCE_RADIUS_KM / r;
    let mut v = 0.0;
    let mut radial = ratio; // (a/r)^(n+1), starting at n=1
    for n in 1..=MAX_DEGREE {
        radial *= ratio;
        let mut inner = 0.0;
        for m in 0..=n {
            let (g, h) = coeffs.at(n, m);
            let (sin_m, cos_m) = (m as f64 * phi).sin_cos();
            inner += (g * cos_m + h * sin_m) * legendre.p(n, m);
        }
        v += radial * inner;
    }
    IGRF_REFERENCE_RADIUS_KM * v
}

/// Field components in the geocentric frame as the negative gradient of the
/// potential: north, east, and vertically-down in nT.
///
/// The east component carries the 1/(r sinθ) longitudinal term. Exactly at
/// the poles that term is replaced by its algebraic limit, where only the
/// m = 1 harmonics contribute through dP/dθ.
pub(crate) fn field_geocentric(
    r: f64,
    theta: f64,
    phi: f64,
    coeffs: &ResolvedCoefficients,
) -> (f64, f64, f64) {
    let legendre = LegendreTable::compute(theta);
    let sin_theta = theta.sin();
    let ratio = IGRF_REFERENCE_RADIUS_KM / r;

    let mut b_r = 0.0;
    let mut b_theta = 0.0;
    let mut b_phi = 0.0;
    let mut radial = ratio * ratio; // (a/r)^(n+2) after the multiply below
    for n in 1..=MAX_DEGREE {
        radial *= ratio;
        for m in 0..=n {
            let (g, h) = coeffs.at(n, m);
            let (sin_m, cos_m) = (m as f64 * phi).sin_cos();
            let harmonic = g * cos_m + h * sin_m;
            b_r += radial * (n + 1) as f64 * harmonic * legendre.p(n, m);
            b_theta -= radial * harmonic * legendre.dp(n, m);
            if sin_theta == 0.0 {
                // lim P(n,1)/sinθ = dP(n,1)/dθ at the poles; m > 1 terms
                // vanish faster than sinθ.
                if m == 1 {
                    b_phi += radial * (g * sin_m - h * cos_m) * legendre.dp(n, 1);
                }
            } else {
                b_phi += radial * m as f64 * (g * sin_m - h * cos_m) * legendre.p(n, m) / sin_theta;
            }
        }
    }

    // North, east, down from the spherical gradient
    (-b_theta, b_phi, -b_r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::igrf::coefficients::tests::dipole_source;
    use crate::igrf::coefficients::CoefficientTable;
    use crate::igrf::epoch::resolve;
    use is_close::is_close;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn dipole_coefficients() -> ResolvedCoefficients {
        let table = CoefficientTable::parse(dipole_source().as_bytes()).unwrap();
        resolve(&table, 2012.0).unwrap()
    }

    /// g(1,0) only, no equatorial dipole terms.
    fn axial_dipole_coefficients() -> ResolvedCoefficients {
        let source = dipole_source().replace("h 1 1 5000 5000 0.0", "h 1 1 0 0 0.0");
        let table = CoefficientTable::parse(source.as_bytes()).unwrap();
        resolve(&table, 2012.0).unwrap()
    }

    #[test]
    fn axial_dipole_at_equator() {
        // Pure g(1,0): at the geocentric equator the field is horizontal
        // with X = -g10, and the vertical component vanishes.
        let coeffs = axial_dipole_coefficients();
        let a = IGRF_REFERENCE_RADIUS_KM;
        let (x, y, z) = field_geocentric(a, FRAC_PI_2, 0.3, &coeffs);
        assert!(is_close!(x, 30000.0, rel_tol = 1e-12));
        assert!(is_close!(y, 0.0, abs_tol = 1e-9));
        assert!(is_close!(z, 0.0, abs_tol = 1e-9));
    }

    #[test]
    fn axial_dipole_at_north_pole() {
        let coeffs = axial_dipole_coefficients();
        let a = IGRF_REFERENCE_RADIUS_KM;
        // Z = -Br = -2 g10 (a/r)^3 cosθ, pointing down at the north pole
        // for a negative g10.
        let (x, y, z) = field_geocentric(a, 0.0, 0.0, &coeffs);
        assert!(is_close!(z, 60000.0, rel_tol = 1e-12));
        assert!(x.is_finite() && y.is_finite());
    }

    #[test]
    fn dipole_field_decays_with_radius_cubed() {
        let coeffs = dipole_coefficients();
        let a = IGRF_REFERENCE_RADIUS_KM;
        let (x1, y1, z1) = field_geocentric(a, 1.1, 0.7, &coeffs);
        let (x2, y2, z2) = field_geocentric(2.0 * a, 1.1, 0.7, &coeffs);
        assert!(is_close!(x1 / x2, 8.0, rel_tol = 1e-9));
        assert!(is_close!(y1 / y2, 8.0, rel_tol = 1e-9));
        assert!(is_close!(z1 / z2, 8.0, rel_tol = 1e-9));
    }

    #[test]
    fn potential_matches_dipole_closed_form() {
        let coeffs = axial_dipole_coefficients();
        let a = IGRF_REFERENCE_RADIUS_KM;
        let theta: f64 = 0.9;
        let r = 1.3 * a;
        let expected = a * (a / r).powi(2) * -30000.0 * theta.cos();
        assert!(is_close!(
            potential(r, theta, 0.5, &coeffs),
            expected,
            rel_tol = 1e-12
        ));
    }

    #[test]
    fn field_is_negative_radial_gradient_of_potential() {
        let coeffs = dipole_coefficients();
        let a = IGRF_REFERENCE_RADIUS_KM;
        let (r, theta, phi) = (1.05 * a, 1.2, -0.4);
        let dr = 1e-4;
        let numeric = -(potential(r + dr, theta, phi, &coeffs)
            - potential(r - dr, theta, phi, &coeffs))
            / (2.0 * dr);
        let (_, _, z) = field_geocentric(r, theta, phi, &coeffs);
        // Br = -dV/dr, Z = -Br
        assert!(is_close!(-z, numeric, rel_tol = 1e-6));
    }

    #[test]
    fn derived_intensities_are_consistent() {
        let field = FieldComponents::from_xyz(18000.0, 1200.0, 43000.0);
        assert!(is_close!(
            field.f,
            (field.x * field.x + field.y * field.y + field.z * field.z).sqrt(),
            rel_tol = 1e-12
        ));
        assert!(is_close!(field.h, field.x.hypot(field.y), rel_tol = 1e-12));
        assert!(is_close!(
            field.i.to_radians().tan(),
            field.z / field.h,
            rel_tol = 1e-12
        ));
    }

    #[test]
    fn south_pole_is_finite() {
        let coeffs = dipole_coefficients();
        let (x, y, z) = field_geocentric(IGRF_REFERENCE_RADIUS_KM, PI, 0.0, &coeffs);
        assert!(x.is_finite() && y.is_finite() && z.is_finite());
    }
}
