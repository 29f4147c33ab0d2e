use thiserror::Error;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A single reading from the location service. Readings are never mutated, a newer reading
/// replaces the previous one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    accuracy: Option<f64>, // In meters
}

impl Position {
    pub fn new(latitude: f64, longitude: f64, accuracy: Option<f64>) -> Result<Self, InvalidPosition> {
        if !(latitude.is_finite() && (-90.0..=90.0).contains(&latitude)) {
            return Err(InvalidPosition::Latitude(latitude));
        }

        if !(longitude.is_finite() && (-180.0..=180.0).contains(&longitude)) {
            return Err(InvalidPosition::Longitude(longitude));
        }

        // A negative or non-finite accuracy is as good as none
        let accuracy = accuracy.filter(|a| a.is_finite() && *a >= 0.0).map(f64::abs); // Drops the sign of -0.0

        Ok(Position {
            latitude,
            longitude,
            accuracy,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// Great-circle distance in meters (haversine).
    pub fn distance_to(&self, other: &Position) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let cos_lat1 = self.latitude.to_radians().cos();
        let cos_lat2 = other.latitude.to_radians().cos();
        let a = (d_lat / 2.0).sin().powi(2) + cos_lat1 * cos_lat2 * (d_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidPosition {
    #[error("invalid latitude: {0}, must be between -90 and 90")]
    Latitude(f64),
    #[error("invalid longitude: {0}, must be between -180 and 180")]
    Longitude(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn new_keeps_the_reading() {
        let position = Position::new(40.4168, -3.7038, Some(5.0)).unwrap();

        assert_eq!(position.latitude(), 40.4168);
        assert_eq!(position.longitude(), -3.7038);
        assert_eq!(position.accuracy(), Some(5.0));
    }

    #[rstest]
    #[case(90.1, 0.0, InvalidPosition::Latitude(90.1))]
    #[case(-90.1, 0.0, InvalidPosition::Latitude(-90.1))]
    #[case(0.0, 180.5, InvalidPosition::Longitude(180.5))]
    #[case(0.0, -181.0, InvalidPosition::Longitude(-181.0))]
    fn new_rejects_out_of_range_coordinates(#[case] latitude: f64, #[case] longitude: f64, #[case] expected: InvalidPosition) {
        assert_eq!(Position::new(latitude, longitude, None), Err(expected));
    }

    #[test]
    fn new_rejects_nan() {
        assert!(Position::new(f64::NAN, 0.0, None).is_err());
        assert!(Position::new(0.0, f64::NAN, None).is_err());
    }

    #[rstest]
    #[case(Some(-1.0))]
    #[case(Some(f64::INFINITY))]
    #[case(None)]
    fn new_drops_unusable_accuracy(#[case] accuracy: Option<f64>) {
        let position = Position::new(0.0, 0.0, accuracy).unwrap();

        assert_eq!(position.accuracy(), None);
    }

    #[test]
    fn new_drops_the_sign_of_a_zero_accuracy() {
        let position = Position::new(0.0, 0.0, Some(-0.0)).unwrap();

        assert!(position.accuracy().is_some_and(f64::is_sign_positive));
    }

    #[test]
    fn distance_to_is_zero_for_the_same_position() {
        let position = Position::new(51.8615899, 4.3580323, None).unwrap();

        assert_eq!(position.distance_to(&position), 0.0);
    }

    #[test]
    fn distance_to_matches_a_known_distance() {
        // Madrid to Barcelona is roughly 505 km
        let madrid = Position::new(40.4168, -3.7038, None).unwrap();
        let barcelona = Position::new(41.3874, 2.1686, None).unwrap();

        let distance = madrid.distance_to(&barcelona);

        assert!((distance - 505_000.0).abs() < 5_000.0, "unexpected distance {}", distance);
    }
}
