/// IGRF reference radius in km, the `a` of the potential expansion.
pub const IGRF_REFERENCE_RADIUS_KM: f64 = 6371.2;

/// Maximum spherical harmonic degree of the IGRF main field models.
pub const MAX_DEGREE: usize = 13;

/// Ionospheric pierce point reference altitude in km, used for MODIP.
pub const IPP_ALTITUDE_KM: f64 = 350.0;

/// WGS84 semi-major axis in km.
pub(crate) const WGS84_SEMI_MAJOR_AXIS_KM: f64 = 6378.137;

/// WGS84 flattening.
pub(crate) const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;
