//! # Extrema series
//!
//! An [`ExtremaSeries`] is the per-file result of a reader: an ordered list of
//! `(elapsed hours, extremum value)` points, in scan order (which is time order for
//! well-formed files). Both coordinates are rounded to 6 decimals on insertion.
//!
//! ## Key uniqueness
//!
//! Elapsed times are unique within a series. Two records that round to the same
//! elapsed time collide; what happens then is chosen by [`CollisionPolicy`]:
//!
//! * [`CollisionPolicy::Overwrite`] – the point keeps its original position and takes the
//!   newer value (insertion-ordered map semantics). This is the default.
//! * [`CollisionPolicy::KeepFirst`] – the newer value is dropped.
//! * [`CollisionPolicy::Reject`] – the insertion fails with
//!   [`ApsisError::DuplicateElapsedTime`].
//!
//! Overwrites and drops are counted ([`ExtremaSeries::collisions`]) and logged at `warn`.

use std::collections::HashMap;
use std::str::FromStr;

use ahash::RandomState;
use tracing::warn;

use crate::{
    apsis_errors::ApsisError,
    constants::Hours,
    time::round_output,
};

/// What to do when two extrema share a rounded elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    #[default]
    Overwrite,
    KeepFirst,
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = ApsisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "keep-first" => Ok(CollisionPolicy::KeepFirst),
            "reject" => Ok(CollisionPolicy::Reject),
            other => Err(ApsisError::InvalidConfig(format!(
                "unknown collision policy `{other}` (expected overwrite, keep-first or reject)"
            ))),
        }
    }
}

/// One apogee/perigee sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumPoint {
    pub elapsed_hours: Hours,
    pub value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ExtremaSeries {
    points: Vec<ExtremumPoint>,
    index: HashMap<u64, usize, RandomState>,
    policy: CollisionPolicy,
    collisions: usize,
}

impl PartialEq for ExtremaSeries {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl ExtremaSeries {
    pub fn new(policy: CollisionPolicy) -> Self {
        ExtremaSeries {
            policy,
            ..Default::default()
        }
    }

    /// Build a series from already computed points (rounded on the way in).
    pub fn from_points(
        points: impl IntoIterator<Item = (Hours, f64)>,
        policy: CollisionPolicy,
    ) -> Result<Self, ApsisError> {
        let mut series = ExtremaSeries::new(policy);
        for (hours, value) in points {
            series.insert(hours, value)?;
        }
        Ok(series)
    }

    /// Insert a point, rounding both coordinates to 6 decimals.
    ///
    /// Return
    /// ----------
    /// * `Err(ApsisError::DuplicateElapsedTime)` only under [`CollisionPolicy::Reject`].
    pub fn insert(&mut self, elapsed_hours: Hours, value: f64) -> Result<(), ApsisError> {
        // `+ 0.0` so that -0.0 and 0.0 share a key
        let elapsed_hours = round_output(elapsed_hours) + 0.0;
        let value = round_output(value);

        let key = elapsed_hours.to_bits();
        match self.index.get(&key).copied() {
            None => {
                self.index.insert(key, self.points.len());
                self.points.push(ExtremumPoint {
                    elapsed_hours,
                    value,
                });
            }
            Some(pos) => {
                let previous = self.points[pos].value;
                match self.policy {
                    CollisionPolicy::Reject => {
                        return Err(ApsisError::DuplicateElapsedTime { elapsed_hours })
                    }
                    CollisionPolicy::Overwrite => {
                        warn!(elapsed_hours, previous, value, "elapsed time collision, overwriting");
                        self.points[pos].value = value;
                    }
                    CollisionPolicy::KeepFirst => {
                        warn!(elapsed_hours, previous, value, "elapsed time collision, keeping first");
                    }
                }
                self.collisions += 1;
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ExtremumPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtremumPoint> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&ExtremumPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&ExtremumPoint> {
        self.points.last()
    }

    pub fn elapsed_hours(&self) -> Vec<Hours> {
        self.points.iter().map(|p| p.elapsed_hours).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Value stored for an elapsed time, if any.
    pub fn get(&self, elapsed_hours: Hours) -> Option<f64> {
        let key = (round_output(elapsed_hours) + 0.0).to_bits();
        self.index.get(&key).map(|&pos| self.points[pos].value)
    }

    /// Number of insertions that hit an existing elapsed time.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }
}

#[cfg(test)]
mod series_test {
    use super::*;

    #[test]
    fn test_insert_rounds_both_coordinates() {
        let mut series = ExtremaSeries::new(CollisionPolicy::Overwrite);
        series.insert(1.234_567_89, 6_778.137_000_4).unwrap();
        assert_eq!(
            series.points(),
            &[ExtremumPoint {
                elapsed_hours: 1.234_568,
                value: 6_778.137
            }]
        );
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut series = ExtremaSeries::new(CollisionPolicy::Overwrite);
        series.insert(0.0, 1.0).unwrap();
        series.insert(1.0, 2.0).unwrap();
        series.insert(0.000_000_1, 3.0).unwrap();

        assert_eq!(series.elapsed_hours(), vec![0.0, 1.0]);
        assert_eq!(series.values(), vec![3.0, 2.0]);
        assert_eq!(series.collisions(), 1);
    }

    #[test]
    fn test_keep_first_drops_newer_value() {
        let mut series = ExtremaSeries::new(CollisionPolicy::KeepFirst);
        series.insert(5.0, 1.0).unwrap();
        series.insert(5.0, 9.0).unwrap();
        assert_eq!(series.values(), vec![1.0]);
        assert_eq!(series.collisions(), 1);
    }

    #[test]
    fn test_reject_fails_on_collision() {
        let mut series = ExtremaSeries::new(CollisionPolicy::Reject);
        series.insert(5.0, 1.0).unwrap();
        assert_eq!(
            series.insert(5.000_000_2, 2.0),
            Err(ApsisError::DuplicateElapsedTime { elapsed_hours: 5.0 })
        );
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_negative_zero_shares_key() {
        let mut series = ExtremaSeries::new(CollisionPolicy::Reject);
        series.insert(0.0, 1.0).unwrap();
        assert!(series.insert(-0.000_000_1, 2.0).is_err());
        assert_eq!(series.get(-0.0), Some(1.0));
    }

    #[test]
    fn test_collision_policy_from_str() {
        assert_eq!("keep-first".parse::<CollisionPolicy>(), Ok(CollisionPolicy::KeepFirst));
        assert!("average".parse::<CollisionPolicy>().is_err());
    }
}
