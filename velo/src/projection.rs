//! Projected coordinates of the Swiss national grid (CH1903+ / LV95).
//!
//! The road network lives in this plane: `e` grows eastwards and `n`
//! northwards, both in metres. Only points inside [`SwissBounds`] can be
//! represented.

use crate::error::{Result, VeloError};

/// The rectangle covered by the network.
pub struct SwissBounds;

impl SwissBounds {
    pub const MIN_E: f64 = 2_485_000.0;
    pub const MAX_E: f64 = 2_834_000.0;
    pub const MIN_N: f64 = 1_075_000.0;
    pub const MAX_N: f64 = 1_296_000.0;
    pub const WIDTH: f64 = Self::MAX_E - Self::MIN_E;
    pub const HEIGHT: f64 = Self::MAX_N - Self::MIN_N;

    /// Whether `(e, n)` lies inside the bounds (edges included).
    pub fn contains_en(e: f64, n: f64) -> bool {
        (Self::MIN_E..=Self::MAX_E).contains(&e) && (Self::MIN_N..=Self::MAX_N).contains(&n)
    }
}

/// A point of the Swiss plane, guaranteed to be inside [`SwissBounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCh {
    e: f64,
    n: f64,
}

impl PointCh {
    /// Create a point, checking that it lies inside the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::OutOfBounds`] if `(e, n)` is outside [`SwissBounds`].
    ///
    /// # Examples
    ///
    /// ```
    /// use velo::projection::PointCh;
    ///
    /// let lausanne = PointCh::new(2_538_000.0, 1_152_000.0).unwrap();
    /// assert!(PointCh::new(0.0, 0.0).is_err());
    /// # let _ = lausanne;
    /// ```
    pub fn new(e: f64, n: f64) -> Result<Self> {
        if !SwissBounds::contains_en(e, n) {
            return Err(VeloError::OutOfBounds { e, n });
        }
        Ok(Self { e, n })
    }

    /// Build a point known to be inside the bounds: graph nodes, or
    /// interpolations between two valid points.
    pub(crate) fn new_unchecked(e: f64, n: f64) -> Self {
        debug_assert!(
            SwissBounds::contains_en(e, n),
            "({e}, {n}) outside the network bounds"
        );
        Self { e, n }
    }

    /// Create a point from longitude and latitude in radians (WGS84).
    ///
    /// # Errors
    ///
    /// Returns [`VeloError::OutOfBounds`] if the projected point is outside the bounds.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self> {
        Self::new(ch1903::e(lon, lat), ch1903::n(lon, lat))
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    /// Squared euclidean distance to `that`, in square metres.
    pub fn squared_distance_to(&self, that: &PointCh) -> f64 {
        let de = self.e - that.e;
        let dn = self.n - that.n;
        de * de + dn * dn
    }

    /// Euclidean distance to `that`, in metres.
    pub fn distance_to(&self, that: &PointCh) -> f64 {
        self.squared_distance_to(that).sqrt()
    }

    /// Longitude in radians (WGS84).
    pub fn lon(&self) -> f64 {
        ch1903::lon(self.e, self.n)
    }

    /// Latitude in radians (WGS84).
    pub fn lat(&self) -> f64 {
        ch1903::lat(self.e, self.n)
    }
}

/// Approximate conversions between WGS84 and the Swiss plane, accurate to
/// about a metre.
pub mod ch1903 {
    /// E coordinate of the point at longitude `lon` and latitude `lat` (radians).
    pub fn e(lon: f64, lat: f64) -> f64 {
        let (lon1, lat1) = auxiliary(lon, lat);
        2_600_072.37 + 211_455.93 * lon1
            - 10_938.51 * lon1 * lat1
            - 0.36 * lon1 * lat1 * lat1
            - 44.54 * lon1 * lon1 * lon1
    }

    /// N coordinate of the point at longitude `lon` and latitude `lat` (radians).
    pub fn n(lon: f64, lat: f64) -> f64 {
        let (lon1, lat1) = auxiliary(lon, lat);
        1_200_147.07 + 308_807.95 * lat1 + 3_745.25 * lon1 * lon1 + 76.63 * lat1 * lat1
            - 194.56 * lon1 * lon1 * lat1
            + 119.79 * lat1 * lat1 * lat1
    }

    /// Longitude in radians of the point `(e, n)`.
    pub fn lon(e: f64, n: f64) -> f64 {
        let x = 1e-6 * (e - 2_600_000.0);
        let y = 1e-6 * (n - 1_200_000.0);
        let lon0 = 2.6779094 + 4.728982 * x + 0.791484 * x * y + 0.1306 * x * y * y
            - 0.0436 * x * x * x;
        (lon0 * 100.0 / 36.0).to_radians()
    }

    /// Latitude in radians of the point `(e, n)`.
    pub fn lat(e: f64, n: f64) -> f64 {
        let x = 1e-6 * (e - 2_600_000.0);
        let y = 1e-6 * (n - 1_200_000.0);
        let lat0 = 16.9023892 + 3.238272 * y
            - 0.270978 * x * x
            - 0.002528 * y * y
            - 0.0447 * x * x * y
            - 0.0140 * y * y * y;
        (lat0 * 100.0 / 36.0).to_radians()
    }

    fn auxiliary(lon: f64, lat: f64) -> (f64, f64) {
        (
            1e-4 * (3600.0 * lon.to_degrees() - 26_782.5),
            1e-4 * (3600.0 * lat.to_degrees() - 169_028.66),
        )
    }
}
