use serde::{Deserialize, Serialize};

/// J2735 `Velocity` units are 0.02 m/s.
const METERS_PER_SECOND_PER_UNIT: f64 = 0.02;
/// J2735 reserves this `Velocity` value to mean "unavailable".
pub const SPEED_UNAVAILABLE: i32 = 8191;

/// In meters per second, decoded from a J2735 `Velocity` code.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Speed(f64);

impl Speed {
    /// Returns None for a missing code or the "unavailable" sentinel.
    pub fn from_j2735(code: Option<i32>) -> Option<Speed> {
        match code {
            None | Some(SPEED_UNAVAILABLE) => None,
            Some(code) => Some(Speed(code as f64 * METERS_PER_SECOND_PER_UNIT)),
        }
    }

    pub fn to_km_per_hour(self) -> f64 {
        self.0 * 3.6
    }

    /// Rounded to one decimal place, like "7.2 km/h".
    pub fn to_kmh_string(self) -> String {
        format!("{:.1} km/h", self.to_km_per_hour())
    }
}

/// Describes a J2735 speed limit code for display, or "N/A" if it's missing or unavailable.
pub fn speed_to_kmh(code: Option<i32>) -> String {
    match Speed::from_j2735(code) {
        Some(speed) => speed.to_kmh_string(),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_display() {
        assert_eq!(speed_to_kmh(Some(8191)), "N/A");
        assert_eq!(speed_to_kmh(None), "N/A");
        assert_eq!(speed_to_kmh(Some(100)), "7.2 km/h");
        assert_eq!(speed_to_kmh(Some(0)), "0.0 km/h");
        // 50 km/h is about 694 units
        assert_eq!(speed_to_kmh(Some(694)), "50.0 km/h");
    }

    #[test]
    fn unavailable_is_not_a_speed() {
        assert!(Speed::from_j2735(Some(SPEED_UNAVAILABLE)).is_none());
        // 250 units is 5 m/s
        let speed = Speed::from_j2735(Some(250)).unwrap();
        assert_eq!(speed.to_kmh_string(), "18.0 km/h");
    }
}
