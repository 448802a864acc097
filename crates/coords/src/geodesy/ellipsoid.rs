//! Reference ellipsoid parameters.

/// Earth ellipsoid, defined by its semi-major axis and flattening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (m)
    pub a: f64,
    /// Flattening
    pub f: f64,
}

impl Ellipsoid {
    /// WGS84 (EPSG:7030)
    pub const WGS84: Self = Self {
        a: 6_378_137.0,
        f: 1.0 / 298.257_223_563,
    };

    /// Semi-minor axis b = a(1-f)
    #[inline]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// First eccentricity squared e² = 2f - f²
    #[inline]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }

    /// Second eccentricity squared e'² = e² / (1 - e²)
    #[inline]
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }

    /// e1 = (1 - √(1-e²)) / (1 + √(1-e²)), drives the footpoint latitude series
    #[inline]
    pub fn e1(&self) -> f64 {
        let root = (1.0 - self.e2()).sqrt();
        (1.0 - root) / (1.0 + root)
    }

    /// Radius of curvature in the prime vertical, N(φ)
    #[inline]
    pub fn prime_vertical_radius(&self, sin_phi: f64) -> f64 {
        self.a / (1.0 - self.e2() * sin_phi * sin_phi).sqrt()
    }

    /// Meridional radius of curvature, M(φ)
    #[inline]
    pub fn meridional_radius(&self, sin_phi: f64) -> f64 {
        let e2 = self.e2();
        self.a * (1.0 - e2) / (1.0 - e2 * sin_phi * sin_phi).powf(1.5)
    }

    /// Meridional arc length from the equator to latitude `phi` (radians),
    /// truncated at e⁶.
    pub fn meridian_arc(&self, phi: f64) -> f64 {
        let e2 = self.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.a
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}
