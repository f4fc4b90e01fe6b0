//! Core units, constants, and shared primitives for the bluebottle drift workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Density of air at sea level (kg/m³).
    pub const RHO_AIR: f64 = 1.225;
    /// Density of sea water (kg/m³).
    pub const RHO_WATER: f64 = 1025.0;
    /// Empirical ratio of bluebottle sail height to sail chord.
    pub const SAIL_HEIGHT_TO_CHORD: f64 = 0.41;
    /// Mean Earth radius used for displacement-to-degree conversion (m).
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::SECONDS_PER_DAY;

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }
}

/// Planar vector helpers; x points east and y points north.
pub mod vector {
    /// Alias for a 2D vector in metres or m/s depending on context.
    pub type Vector2 = [f64; 2];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        v[0].hypot(v[1])
    }

    /// Direction of a vector measured counter-clockwise from east (radians).
    #[inline]
    pub fn angle(v: &Vector2) -> f64 {
        v[1].atan2(v[0])
    }
}

/// Spherical-earth conversions between metric displacements and geographic coordinates.
pub mod geo {
    use super::constants::EARTH_RADIUS_M;

    /// Offset a longitude/latitude pair (degrees) by an east/north displacement in metres.
    pub fn offset_lonlat(lon: f64, lat: f64, dx_m: f64, dy_m: f64) -> (f64, f64) {
        let dlat = (dy_m / EARTH_RADIUS_M).to_degrees();
        let dlon = (dx_m / (EARTH_RADIUS_M * lat.to_radians().cos())).to_degrees();
        (lon + dlon, lat + dlat)
    }

    /// Equirectangular east/north distance in metres from `(lon0, lat0)` to `(lon1, lat1)`.
    ///
    /// Accurate for the short displacements a drifting organism covers in a run.
    pub fn displacement_m(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> (f64, f64) {
        let mean_lat = (0.5 * (lat0 + lat1)).to_radians();
        let dx = (lon1 - lon0).to_radians() * EARTH_RADIUS_M * mean_lat.cos();
        let dy = (lat1 - lat0).to_radians() * EARTH_RADIUS_M;
        (dx, dy)
    }
}
