//! WGS-84 geodetic conversions
//!
//! Geodetic coordinates are converted to an Earth-Centered-Earth-Fixed frame,
//! then differenced and rotated into a local East-North-Up frame at the
//! observer. All angles in degrees at the API boundary, meters everywhere else.

use nalgebra::Vector3;

/// WGS-84 semi-major axis in meters
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// First eccentricity squared
fn e2() -> f64 {
    WGS84_F * (2.0 - WGS84_F)
}

/// Convert a geodetic position to ECEF coordinates.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Vector3<f64> {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    // Prime vertical radius of curvature
    let n = WGS84_A / (1.0 - e2() * sin_lat * sin_lat).sqrt();

    Vector3::new(
        (n + alt_m) * cos_lat * cos_lon,
        (n + alt_m) * cos_lat * sin_lon,
        (n * (1.0 - e2()) + alt_m) * sin_lat,
    )
}

/// Rotate an ECEF difference vector into the East-North-Up frame centered on
/// the given geodetic origin.
pub fn ecef_to_enu(delta: Vector3<f64>, lat_deg: f64, lon_deg: f64) -> Vector3<f64> {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    Vector3::new(
        -sin_lon * delta.x + cos_lon * delta.y,
        -sin_lat * cos_lon * delta.x - sin_lat * sin_lon * delta.y + cos_lat * delta.z,
        cos_lat * cos_lon * delta.x + cos_lat * sin_lon * delta.y + sin_lat * delta.z,
    )
}

/// ENU offset of a geodetic target relative to a geodetic origin.
pub fn geodetic_to_enu(
    target_lat: f64,
    target_lon: f64,
    target_alt: f64,
    origin_lat: f64,
    origin_lon: f64,
    origin_alt: f64,
) -> Vector3<f64> {
    let target = geodetic_to_ecef(target_lat, target_lon, target_alt);
    let origin = geodetic_to_ecef(origin_lat, origin_lon, origin_alt);
    ecef_to_enu(target - origin, origin_lat, origin_lon)
}
