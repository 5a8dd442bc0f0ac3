//! Evaluation of the International Geomagnetic Reference Field (IGRF) and
//! the Modified Dip angle (MODIP) used to calibrate GNSS-derived total
//! electron content.
//!
//! A [`IgrfModel`] owns a validated table of Gauss coefficients (the set
//! shipped with the crate, or one loaded from a coefficient file in the
//! IAGA column format) and evaluates the geomagnetic potential, the field
//! components, and MODIP at geodetic points:
//!
//! ```
//! use modip::{GeodeticPoint, IgrfModel};
//!
//! let model = IgrfModel::new().unwrap();
//! let trieste = GeodeticPoint::new(45.645, 13.77694, 0.0);
//! let field = model.field_at(&trieste, 2017.0).unwrap();
//! let modip = model.modip_at(&trieste, 2017.0).unwrap();
//! assert!(field.i > 0.0 && modip.modip > 0.0);
//! ```

pub mod error;
pub mod igrf;
pub mod modip;
pub mod utils;

pub use crate::error::IgrfError;
pub use crate::igrf::synthesis::FieldComponents;
pub use crate::igrf::IgrfModel;
pub use crate::modip::Modip;
pub use crate::utils::coords::GeodeticPoint;
