use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Accepted cruising speeds in km/h
pub const BOAT_SPEED_RANGE_KMH: RangeInclusive<f64> = 3.0..=20.0;
/// Accepted average lock transit times in minutes
pub const LOCK_TRANSIT_RANGE_MIN: RangeInclusive<f64> = 10.0..=60.0;

pub const DEFAULT_BOAT_SPEED_KMH: f64 = 8.0;
pub const DEFAULT_LOCK_TRANSIT_MIN: f64 = 30.0;

/// User-adjustable trip settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Cruising speed in km/h
    pub boat_speed_kmh: f64,
    /// Average time spent per lock in minutes
    pub lock_transit_min: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            boat_speed_kmh: DEFAULT_BOAT_SPEED_KMH,
            lock_transit_min: DEFAULT_LOCK_TRANSIT_MIN,
        }
    }
}

impl Settings {
    /// Returns these settings with every field present in `patch` replaced
    #[must_use]
    pub fn merged(self, patch: &SettingsPatch) -> Self {
        Self {
            boat_speed_kmh: patch.boat_speed_kmh.unwrap_or(self.boat_speed_kmh),
            lock_transit_min: patch.lock_transit_min.unwrap_or(self.lock_transit_min),
        }
    }
}

/// Partial settings update
///
/// The planner merges any patch as-is; callers at the input boundary
/// should run [`SettingsPatch::validate`] first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boat_speed_kmh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_transit_min: Option<f64>,
}

impl SettingsPatch {
    pub fn speed(boat_speed_kmh: f64) -> Self {
        Self {
            boat_speed_kmh: Some(boat_speed_kmh),
            lock_transit_min: None,
        }
    }

    pub fn lock_transit(lock_transit_min: f64) -> Self {
        Self {
            boat_speed_kmh: None,
            lock_transit_min: Some(lock_transit_min),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.boat_speed_kmh.is_none() && self.lock_transit_min.is_none()
    }

    /// Checks that every present field lies within its accepted range
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] naming the first offending field
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(speed) = self.boat_speed_kmh
            && !BOAT_SPEED_RANGE_KMH.contains(&speed)
        {
            return Err(Error::InvalidData(format!(
                "boat speed {speed} km/h is outside {}..={} km/h",
                BOAT_SPEED_RANGE_KMH.start(),
                BOAT_SPEED_RANGE_KMH.end()
            )));
        }
        if let Some(minutes) = self.lock_transit_min
            && !LOCK_TRANSIT_RANGE_MIN.contains(&minutes)
        {
            return Err(Error::InvalidData(format!(
                "lock transit time {minutes} min is outside {}..={} min",
                LOCK_TRANSIT_RANGE_MIN.start(),
                LOCK_TRANSIT_RANGE_MIN.end()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_missing_fields() {
        let merged = Settings::default().merged(&SettingsPatch::speed(12.0));
        assert_eq!(merged.boat_speed_kmh, 12.0);
        assert_eq!(merged.lock_transit_min, DEFAULT_LOCK_TRANSIT_MIN);
    }

    #[test]
    fn empty_patch_is_identity() {
        let settings = Settings {
            boat_speed_kmh: 5.0,
            lock_transit_min: 45.0,
        };
        assert!(SettingsPatch::default().is_empty());
        assert_eq!(settings.merged(&SettingsPatch::default()), settings);
    }

    #[test]
    fn validate_accepts_range_bounds() {
        assert!(SettingsPatch::speed(3.0).validate().is_ok());
        assert!(SettingsPatch::speed(20.0).validate().is_ok());
        assert!(SettingsPatch::lock_transit(10.0).validate().is_ok());
        assert!(SettingsPatch::lock_transit(60.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        assert!(matches!(
            SettingsPatch::speed(0.0).validate(),
            Err(Error::InvalidData(_))
        ));
        assert!(SettingsPatch::speed(f64::NAN).validate().is_err());
        assert!(SettingsPatch::lock_transit(61.0).validate().is_err());
    }

    #[test]
    fn partial_toml_like_input_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"boat_speed_kmh": 10.0}"#).unwrap();
        assert_eq!(settings.boat_speed_kmh, 10.0);
        assert_eq!(settings.lock_transit_min, DEFAULT_LOCK_TRANSIT_MIN);
    }
}
