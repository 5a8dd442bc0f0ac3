//! IGRF spherical harmonic model evaluation
use crate::error::IgrfError;
use crate::igrf::coefficients::CoefficientTable;
use crate::igrf::epoch::ResolvedCoefficients;
use crate::igrf::synthesis::FieldComponents;
use crate::utils::coords::{geodetic_to_geocentric, GeodeticPoint};
use std::f64::consts::FRAC_PI_2;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub mod coefficients;
pub mod epoch;
pub mod legendre;
pub mod synthesis;

/// A loaded IGRF model: an immutable coefficient table plus the query
/// surface over it.
///
/// Loading happens once; every query is a pure function of the table, so a
/// model can be shared read-only across threads. Query failures
/// (`OutOfRange`) never invalidate the table.
#[derive(Debug)]
pub struct IgrfModel {
    table: CoefficientTable,
}

impl IgrfModel {
    /// Loads the coefficient set compiled into the binary.
    ///
    /// # Errors
    /// Returns `IgrfError::MalformedInput` if the embedded set fails
    /// validation.
    pub fn new() -> Result<IgrfModel, IgrfError> {
        Ok(IgrfModel {
            table: CoefficientTable::embedded()?,
        })
    }

    /// Loads a model from a coefficient file in the IAGA column format.
    ///
    /// # Errors
    /// Returns `IgrfError::MalformedInput` if the file cannot be read or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<IgrfModel, IgrfError> {
        let file = File::open(path.as_ref()).map_err(|e| {
            IgrfError::MalformedInput(format!(
                "Unable to open coefficient file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a model from any buffered coefficient source.
    ///
    /// # Errors
    /// Returns `IgrfError::MalformedInput` if the source fails validation.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<IgrfModel, IgrfError> {
        Ok(IgrfModel {
            table: CoefficientTable::parse(reader)?,
        })
    }

    /// Wraps an already-validated coefficient table.
    pub fn from_table(table: CoefficientTable) -> IgrfModel {
        IgrfModel { table }
    }

    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    /// Time-adjusted coefficients at a decimal year.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `year` precedes the first
    /// tabulated epoch.
    pub fn resolve(&self, year: f64) -> Result<ResolvedCoefficients, IgrfError> {
        epoch::resolve(&self.table, year)
    }

    /// Geomagnetic field at a geodetic point and decimal year.
    ///
    /// The point is converted to geocentric coordinates on the WGS84
    /// ellipsoid, the field is synthesized in the geocentric frame, and the
    /// north/down components are rotated back into the local geodetic
    /// frame.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `year` precedes the first
    /// tabulated epoch.
    pub fn field_at(
        &self,
        point: &GeodeticPoint,
        year: f64,
    ) -> Result<FieldComponents, IgrfError> {
        let coeffs = self.resolve(year)?;
        let (r, geocentric_lat) = geodetic_to_geocentric(point);
        let theta = FRAC_PI_2 - geocentric_lat;
        let phi = point.longitude.to_radians();
        let (x, y, z) = synthesis::field_geocentric(r, theta, phi, &coeffs);

        // Rotate X/Z through the angle between geodetic and geocentric
        // latitude.
        let psi = point.latitude.to_radians() - geocentric_lat;
        let (sin_psi, cos_psi) = psi.sin_cos();
        Ok(FieldComponents::from_xyz(
            x * cos_psi + z * sin_psi,
            y,
            z * cos_psi - x * sin_psi,
        ))
    }

    /// Scalar magnetic potential in nT·km at a geodetic point and decimal
    /// year.
    ///
    /// # Errors
    /// Returns `IgrfError::OutOfRange` if `year` precedes the first
    /// tabulated epoch.
    pub fn potential_at(&self, point: &GeodeticPoint, year: f64) -> Result<f64, IgrfError> {
        let coeffs = self.resolve(year)?;
        let (r, geocentric_lat) = geodetic_to_geocentric(point);
        let theta = FRAC_PI_2 - geocentric_lat;
        let phi = point.longitude.to_radians();
        Ok(synthesis::potential(r, theta, phi, &coeffs))
    }
}
