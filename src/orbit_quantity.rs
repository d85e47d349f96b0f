//! # Semi-major axis from a Cartesian state
//!
//! GPS ephemeris records carry an Earth-centred position/velocity pair instead of
//! orbital elements. The semi-major axis is recovered with the **vis-viva** relation:
//!
//! ```text
//! r   = |position|
//! v²  = |velocity|²
//! a   = r · GM / (2 · GM − v² · r)
//! ```
//!
//! with `GM` = [`GM_EARTH_KM3_S2`].
//!
//! ## Degenerate states
//!
//! No bounds checking is done. When `2·GM − v²·r` is zero or negative (parabolic or
//! hyperbolic state) the result is infinite or negative. Callers decide what to do with
//! such values, see [`StateVector::is_bound`].

use nalgebra::Vector3;

use crate::constants::{Kilometer, KilometerPerSecond, GM_EARTH_KM3_S2};

/// Earth-centred Cartesian state: position in km, velocity in km/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<Kilometer>,
    pub velocity: Vector3<KilometerPerSecond>,
}

impl StateVector {
    pub fn new(position: Vector3<Kilometer>, velocity: Vector3<KilometerPerSecond>) -> Self {
        StateVector { position, velocity }
    }

    /// Build a state from the six scalars `(x, y, z, u, v, w)` in file order.
    pub fn from_components(components: [f64; 6]) -> Self {
        let [x, y, z, u, v, w] = components;
        StateVector {
            position: Vector3::new(x, y, z),
            velocity: Vector3::new(u, v, w),
        }
    }

    /// Semi-major axis (km) from the vis-viva relation.
    ///
    /// Return
    /// ----------
    /// * `a = r·GM / (2·GM − v²·r)`; infinite or negative for unbound states.
    pub fn semi_major_axis(&self) -> Kilometer {
        let r = self.position.norm();
        let v2 = self.velocity.norm_squared();
        r * GM_EARTH_KM3_S2 / (2.0 * GM_EARTH_KM3_S2 - v2 * r)
    }

    /// `true` when the specific orbital energy is negative (elliptic orbit).
    pub fn is_bound(&self) -> bool {
        let r = self.position.norm();
        2.0 * GM_EARTH_KM3_S2 - self.velocity.norm_squared() * r > 0.0
    }
}
