use crate::utils::constants::{WGS84_FLATTENING, WGS84_SEMI_MAJOR_AXIS_KM};

/// A query point in geodetic coordinates.
///
/// Latitude and longitude are in degrees, altitude is in km above the WGS84
/// ellipsoid. All angular results produced from a `GeodeticPoint`
/// (declination, inclination, MODIP) are returned in degrees; conversion to
/// radians happens internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
}

impl GeodeticPoint {
    pub fn new(latitude: f64, longitude: f64, altitude_km: f64) -> GeodeticPoint {
        GeodeticPoint {
            latitude,
            longitude,
            altitude_km,
        }
    }

    /// Same horizontal position at a different altitude.
    pub(crate) fn at_altitude(&self, altitude_km: f64) -> GeodeticPoint {
        GeodeticPoint {
            altitude_km,
            ..*self
        }
    }
}

/// Converts a geodetic point to geocentric spherical coordinates on the
/// WGS84 ellipsoid. Returns the geocentric radius in km and the geocentric
/// latitude in radians. Called gdlat/gclat conversion in invmag.c of RST.
pub(crate) fn geodetic_to_geocentric(point: &GeodeticPoint) -> (f64, f64) {
    let a = WGS84_SEMI_MAJOR_AXIS_KM;
    let b = a * (1.0 - WGS84_FLATTENING);
    let lat = point.latitude.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();

    // Prime vertical radius of curvature
    let n = a * a / (a * a * cos_lat * cos_lat + b * b * sin_lat * sin_lat).sqrt();

    let p = (n + point.altitude_km) * cos_lat;
    let z = (n * (b * b) / (a * a) + point.altitude_km) * sin_lat;

    let radius = p.hypot(z);
    let geocentric_lat = z.atan2(p);
    (radius, geocentric_lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn equator_on_ellipsoid() {
        let (r, gclat) = geodetic_to_geocentric(&GeodeticPoint::new(0.0, 0.0, 0.0));
        assert!(is_close!(r, 6378.137, rel_tol = 1e-9));
        assert!(is_close!(gclat, 0.0, abs_tol = 1e-12));
    }

    #[test]
    fn pole_on_ellipsoid() {
        let (r, gclat) = geodetic_to_geocentric(&GeodeticPoint::new(90.0, 0.0, 0.0));
        assert!(is_close!(r, 6356.752, abs_tol = 1e-2));
        assert!(is_close!(gclat.to_degrees(), 90.0, abs_tol = 1e-9));
    }

    #[test]
    fn geocentric_latitude_below_geodetic_at_midlatitude() {
        let (_, gclat) = geodetic_to_geocentric(&GeodeticPoint::new(45.0, 0.0, 0.0));
        let diff = 45.0 - gclat.to_degrees();
        // WGS84 maximum deviation is about 0.19 degrees near 45N
        assert!(diff > 0.15 && diff < 0.25);
    }

    #[test]
    fn altitude_adds_to_radius() {
        let surface = geodetic_to_geocentric(&GeodeticPoint::new(45.645, 13.777, 0.0));
        let ipp = geodetic_to_geocentric(&GeodeticPoint::new(45.645, 13.777, 350.0));
        assert!(is_close!(ipp.0 - surface.0, 350.0, abs_tol = 0.5));
    }
}
