use crate::models::BoundingBox;

/// Earth's radius in meters
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the Haversine distance between two points in meters
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in meters
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Calculate a bounding box around a center point
///
/// This is much cheaper than Haversine and is used to pre-filter shelter
/// rows in the store before the exact radius check.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
///
/// # Arguments
/// * `lat` - Center latitude in degrees
/// * `lon` - Center longitude in degrees
/// * `radius_m` - Radius in meters
pub fn calculate_bounding_box(lat: f64, lon: f64, radius_m: f64) -> BoundingBox {
    let radius_km = radius_m / 1000.0;

    // 1 degree latitude is approximately 111 km
    let lat_delta = radius_km / 111.0;

    // 1 degree longitude varies by latitude
    let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs());

    BoundingBox {
        min_lat: lat - lat_delta,
        max_lat: lat + lat_delta,
        min_lon: lon - lon_delta,
        max_lon: lon + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(lat: f64, lon: f64, bbox: &BoundingBox) -> bool {
    lat >= bbox.min_lat
        && lat <= bbox.max_lat
        && lon >= bbox.min_lon
        && lon <= bbox.max_lon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_distance() {
        // Torun to Bydgoszcz (approximately 45 km)
        let torun_lat = 53.0138;
        let torun_lon = 18.5984;
        let bydgoszcz_lat = 53.1235;
        let bydgoszcz_lon = 18.0084;

        let distance = haversine_distance(torun_lat, torun_lon, bydgoszcz_lat, bydgoszcz_lon);
        assert!(
            (distance - 41_000.0).abs() < 3_000.0,
            "Distance should be ~41km, got {}m",
            distance
        );
    }

    #[test]
    fn test_haversine_distance_zero() {
        let distance = haversine_distance(54.1234, 18.1234, 54.1234, 18.1234);
        assert!(distance < 0.01);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(54.3520, 18.6466, 10_000.0);

        assert!(bbox.min_lat < 54.3520);
        assert!(bbox.max_lat > 54.3520);
        assert!(bbox.min_lon < 18.6466);
        assert!(bbox.max_lon > 18.6466);

        // Check approximate size (20km / 111km per degree = ~0.18 degrees)
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let bbox = calculate_bounding_box(54.3520, 18.6466, 10_000.0);

        // Center point should be within
        assert!(is_within_bounding_box(54.3520, 18.6466, &bbox));

        // Close point should be within
        assert!(is_within_bounding_box(54.35, 18.65, &bbox));

        // Far point should not be within
        assert!(!is_within_bounding_box(50.0, 20.0, &bbox));
    }
}
