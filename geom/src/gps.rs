use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PlanarOffset, METERS_PER_DEGREE};

/// J2735 encodes latitude and longitude in units of 1/10 microdegree.
const FIXED_POINT_SCALE: f64 = 10_000_000.0;

/// Converts a fixed-point J2735 latitude or longitude into decimal degrees.
pub fn to_degrees(fixed_point: i64) -> f64 {
    fixed_point as f64 / FIXED_POINT_SCALE
}

/// Converts a planar offset in centimeters into a (latitude, longitude) delta in degrees, using an
/// equirectangular approximation around `at_lat`.
///
/// This is only accurate close to `at_lat`; nothing corrects for paths spanning a large range of
/// latitudes. Near the poles `cos(at_lat)` approaches 0 and the longitude delta blows up. That
/// isn't guarded here; don't pass polar reference points.
pub fn planar_to_geo_offset(dx_cm: i64, dy_cm: i64, at_lat: f64) -> (f64, f64) {
    let d_lat = (dy_cm as f64 / 100.0) / METERS_PER_DEGREE;
    let d_lng = (dx_cm as f64 / 100.0) / (METERS_PER_DEGREE * at_lat.to_radians().cos());
    (d_lat, d_lng)
}

// longitude is x, latitude is y
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// Builds a point from a J2735 `Position3D`-style pair of fixed-point values.
    pub fn from_fixed_point(lat: i64, long: i64) -> LonLat {
        LonLat::new(to_degrees(long), to_degrees(lat))
    }

    /// Treating this point as the origin of a local planar frame, returns the GPS position of
    /// `offset`.
    pub fn offset_by(&self, offset: PlanarOffset) -> LonLat {
        let (d_lat, d_lng) = planar_to_geo_offset(offset.x, offset.y, self.latitude);
        LonLat::new(self.longitude + d_lng, self.latitude + d_lat)
    }

    pub fn gps_dist_meters(&self, other: LonLat) -> f64 {
        // Haversine distance
        let earth_radius_m = 6_371_000.0;
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        earth_radius_m * c
    }

    /// The total length of a path in meters.
    pub fn path_length_meters(pts: &[LonLat]) -> f64 {
        pts.windows(2)
            .map(|pair| pair[0].gps_dist_meters(pair[1]))
            .sum()
    }

    pub fn to_geo_point(self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }

    pub fn to_geo_line_string(pts: &[LonLat]) -> geo::LineString<f64> {
        geo::LineString::from(
            pts.iter()
                .map(|pt| (pt.longitude, pt.latitude))
                .collect::<Vec<_>>(),
        )
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({0}, {1})", self.longitude, self.latitude)
    }
}
