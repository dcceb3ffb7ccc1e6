//! Small geometry and unit primitives for working with J2735 intersection geometry: GPS points,
//! planar centimeter offsets from a reference point, and the fixed-point encodings used on the
//! wire.

mod gps;
mod planar;
mod speed;

pub use crate::gps::{planar_to_geo_offset, to_degrees, LonLat};
pub use crate::planar::PlanarOffset;
pub use crate::speed::{speed_to_kmh, Speed};

/// Meters per degree of latitude, and per degree of longitude at the equator. The same constant
/// is used for both axes of the local projection.
pub const METERS_PER_DEGREE: f64 = 111_320.0;
