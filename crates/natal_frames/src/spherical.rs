//! Cartesian ↔ spherical conversion for heliocentric and geocentric vectors.

use std::f64::consts::TAU;

/// Spherical coordinates: longitude, latitude, distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Longitude in degrees, range [0, 360), measured from +x toward +y.
    pub lon_deg: f64,
    /// Latitude in degrees, range [-90, 90].
    pub lat_deg: f64,
    /// Distance from origin in AU.
    pub distance_au: f64,
}

/// Convert Cartesian `[x, y, z]` (AU) to spherical coordinates.
///
/// The zero vector maps to all-zero coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance_au: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: y.atan2(x).rem_euclid(TAU).to_degrees(),
        lat_deg: (z / r).asin().to_degrees(),
        distance_au: r,
    }
}

/// Convert spherical coordinates back to Cartesian `[x, y, z]` (AU).
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let lon = s.lon_deg.to_radians();
    let lat = s.lat_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    [
        s.distance_au * cos_lat * lon.cos(),
        s.distance_au * cos_lat * lon.sin(),
        s.distance_au * sin_lat,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn along_axes() {
        let s = cartesian_to_spherical(&[1.0, 0.0, 0.0]);
        assert!(s.lon_deg.abs() < EPS && s.lat_deg.abs() < EPS);
        assert!((s.distance_au - 1.0).abs() < EPS);

        let s = cartesian_to_spherical(&[0.0, 2.0, 0.0]);
        assert!((s.lon_deg - 90.0).abs() < EPS);

        let s = cartesian_to_spherical(&[0.0, 0.0, 3.0]);
        assert!((s.lat_deg - 90.0).abs() < EPS);
        assert!((s.distance_au - 3.0).abs() < EPS);
    }

    #[test]
    fn longitude_always_positive() {
        let s = cartesian_to_spherical(&[1.0, -1.0, 0.0]);
        assert!((s.lon_deg - 315.0).abs() < 1e-10, "lon = {}", s.lon_deg);
    }

    #[test]
    fn zero_vector() {
        let s = cartesian_to_spherical(&[0.0, 0.0, 0.0]);
        assert_eq!(s.distance_au, 0.0);
    }

    #[test]
    fn roundtrip() {
        let v = [0.3, -1.2, 0.05];
        let back = spherical_to_cartesian(&cartesian_to_spherical(&v));
        for i in 0..3 {
            assert!((back[i] - v[i]).abs() < 1e-12, "axis {i}: {} vs {}", back[i], v[i]);
        }
    }
}
