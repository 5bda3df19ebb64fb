//! Cost-based throttling.
//!
//! Every Admin GraphQL response reports the state of the shop's cost bucket
//! under `extensions.cost.throttleStatus`. When fewer than
//! [`THROTTLE_RESERVE`] points remain, the client waits long enough for the
//! bucket to refill to the reserve before handing the result back, so the
//! next query does not get rejected.

use std::time::Duration;

use serde::Deserialize;

/// Points kept in reserve before the client starts pausing.
pub const THROTTLE_RESERVE: f64 = 10.0;

/// Longest single throttle pause. Shopify buckets refill in well under a
/// minute, so anything longer comes from a bogus restore rate.
pub const MAX_THROTTLE_WAIT: Duration = Duration::from_secs(60);

/// The `throttleStatus` object of a response's cost extension.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStatus {
    /// Bucket size.
    #[serde(default)]
    pub maximum_available: Option<f64>,
    /// Points left in the bucket.
    pub currently_available: f64,
    /// Points restored per second.
    #[serde(default)]
    pub restore_rate: Option<f64>,
}

impl ThrottleStatus {
    /// Reads the throttle status from a full response body.
    ///
    /// Returns `None` when the extension is absent or malformed.
    #[must_use]
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let status = body.pointer("/extensions/cost/throttleStatus")?;
        serde_json::from_value(status.clone()).ok()
    }

    /// Returns how long to wait before the bucket is back at the reserve.
    ///
    /// `ceil((THROTTLE_RESERVE - currently_available) / restore_rate)` seconds,
    /// or `None` when the bucket is at or above the reserve. A missing or
    /// non-positive restore rate also yields `None`: there is no finite wait
    /// that would help. The result never exceeds [`MAX_THROTTLE_WAIT`].
    #[must_use]
    pub fn wait_time(&self) -> Option<Duration> {
        if self.currently_available >= THROTTLE_RESERVE {
            return None;
        }

        let Some(restore_rate) = self.restore_rate.filter(|r| r.is_finite() && *r > 0.0) else {
            tracing::warn!(
                currently_available = self.currently_available,
                restore_rate = ?self.restore_rate,
                "Throttle budget low but restore rate unusable; not waiting"
            );
            return None;
        };

        let seconds = ((THROTTLE_RESERVE - self.currently_available) / restore_rate).ceil();
        let wait = Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX);
        if wait > MAX_THROTTLE_WAIT {
            tracing::warn!(
                currently_available = self.currently_available,
                restore_rate,
                "Throttle wait of {seconds}s capped at {}s",
                MAX_THROTTLE_WAIT.as_secs()
            );
            return Some(MAX_THROTTLE_WAIT);
        }
        Some(wait)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(currently_available: f64, restore_rate: f64) -> ThrottleStatus {
        ThrottleStatus {
            maximum_available: Some(1000.0),
            currently_available,
            restore_rate: Some(restore_rate),
        }
    }

    #[test]
    fn test_parses_from_response_body() {
        let body = json!({
            "data": {},
            "extensions": {
                "cost": {
                    "requestedQueryCost": 12,
                    "actualQueryCost": 4,
                    "throttleStatus": {
                        "maximumAvailable": 2000.0,
                        "currentlyAvailable": 1996,
                        "restoreRate": 100.0
                    }
                }
            }
        });

        let status = ThrottleStatus::from_body(&body).unwrap();
        assert_eq!(status.maximum_available, Some(2000.0));
        assert!((status.currently_available - 1996.0).abs() < f64::EPSILON);
        assert_eq!(status.restore_rate, Some(100.0));
    }

    #[test]
    fn test_missing_extension_yields_none() {
        assert!(ThrottleStatus::from_body(&json!({ "data": {} })).is_none());
        assert!(ThrottleStatus::from_body(&json!({
            "extensions": { "cost": { "throttleStatus": { "restoreRate": 50 } } }
        }))
        .is_none());
    }

    #[test]
    fn test_no_wait_at_or_above_reserve() {
        assert_eq!(status(10.0, 50.0).wait_time(), None);
        assert_eq!(status(1000.0, 50.0).wait_time(), None);
    }

    #[test]
    fn test_wait_rounds_up_to_whole_seconds() {
        assert_eq!(status(4.0, 2.0).wait_time(), Some(Duration::from_millis(3000)));
        assert_eq!(status(9.0, 50.0).wait_time(), Some(Duration::from_millis(1000)));
        assert_eq!(status(0.0, 3.0).wait_time(), Some(Duration::from_millis(4000)));
    }

    #[test]
    fn test_unusable_restore_rate_skips_wait() {
        assert_eq!(status(4.0, 0.0).wait_time(), None);
        assert_eq!(status(4.0, -1.0).wait_time(), None);

        let no_rate = ThrottleStatus {
            maximum_available: None,
            currently_available: 4.0,
            restore_rate: None,
        };
        assert_eq!(no_rate.wait_time(), None);
    }

    #[test]
    fn test_extreme_throttle_values_are_capped() {
        let body = json!({
            "extensions": { "cost": { "throttleStatus": {
                "currentlyAvailable": 0,
                "restoreRate": 1e-300
            } } }
        });
        let tiny_rate = ThrottleStatus::from_body(&body).unwrap();
        assert_eq!(tiny_rate.wait_time(), Some(MAX_THROTTLE_WAIT));

        assert_eq!(status(-1e308, 1.0).wait_time(), Some(MAX_THROTTLE_WAIT));
        assert_eq!(status(-1000.0, 10.0).wait_time(), Some(MAX_THROTTLE_WAIT));
    }
}
