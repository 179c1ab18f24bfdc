/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two (latitude, longitude) pairs, in
/// kilometers, via the haversine formula.
#[inline]
pub fn haversine_km(origin: (f64, f64), target: (f64, f64)) -> f64 {
    let (lat1, lon1) = origin;
    let (lat2, lon2) = target;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rectangular pre-check around an origin, far cheaper than haversine.
///
/// 1 degree of latitude is ~111 km; a degree of longitude shrinks with
/// latitude. Points outside the box are definitely out of range, points
/// inside still go through the exact distance.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn around(origin: (f64, f64), radius_km: f64) -> Self {
        let (lat, lon) = origin;
        let lat_delta = radius_km / 111.0;
        let lon_delta = radius_km / (111.0 * lat.to_radians().cos().abs().max(f64::EPSILON));

        Self {
            min_lat: lat - lat_delta,
            max_lat: lat + lat_delta,
            min_lon: lon - lon_delta,
            max_lon: lon + lon_delta,
        }
    }

    #[inline]
    pub fn contains(&self, point: (f64, f64)) -> bool {
        let (lat, lon) = point;
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}
