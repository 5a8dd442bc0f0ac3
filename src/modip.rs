//! Modified Dip angle, the ionospheric coordinate used for TEC calibration
use crate::error::IgrfError;
use crate::igrf::IgrfModel;
use crate::utils::constants::IPP_ALTITUDE_KM;
use crate::utils::coords::GeodeticPoint;

/// MODIP at a station location, with the magnetic inclinations it was
/// derived from. All angles in degrees.
#[derive(Debug, Clone, Copy)]
pub struct Modip {
    /// Inclination at the station's own altitude.
    pub station_inclination: f64,
    /// Inclination at the ionospheric pierce point reference altitude.
    pub ipp_inclination: f64,
    /// Modified Dip angle μ with tan μ = I / sqrt(cos φ), from the pierce
    /// point inclination and the geodetic latitude.
    pub modip: f64,
}

impl IgrfModel {
    /// MODIP at a geodetic point and decimal year.
    ///
    /// The inclination is evaluated at the station altitude and at the
    /// 350 km pierce point reference altitude over the same latitude and
    /// longitude; the pierce point value enters the MODIP formula.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `year` precedes the first
    /// tabulated epoch.
    pub fn modip_at(&self, point: &GeodeticPoint, year: f64) -> Result<Modip, IgrfError> {
        let station_inclination = self.field_at(point, year)?.i;
        let ipp_inclination = self
            .field_at(&point.at_altitude(IPP_ALTITUDE_KM), year)?
            .i;

        let inclination = ipp_inclination.to_radians();
        let latitude = point.latitude.to_radians();
        let modip = (inclination / latitude.cos().sqrt()).atan().to_degrees();

        Ok(Modip {
            station_inclination,
            ipp_inclination,
            modip,
        })
    }
}
