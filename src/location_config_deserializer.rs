use crate::app_config::LocationConfig;
use crate::domain::Coordinate;
use crate::position::PositionOptions;
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

impl<'de> Deserialize<'de> for LocationConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Debug, Deserialize)]
        pub struct Inner {
            latitude: Option<f64>,
            longitude: Option<f64>,
            accuracy_m: Option<f64>,
            #[serde(with = "humantime_serde")]
            watch_interval: Duration,
            #[serde(default = "PositionOptions::watch")]
            watch: PositionOptions,
            #[serde(default = "PositionOptions::single_shot")]
            single_shot: PositionOptions,
        }

        let inner = Inner::deserialize(deserializer)?;
        let coordinate = match (inner.latitude, inner.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) {
                    return Err(Error::custom(format!("invalid location latitude: {}, must be between -90 and 90", latitude)));
                }

                if !(-180.0..=180.0).contains(&longitude) {
                    return Err(Error::custom(format!("invalid location longitude: {}, must be between -180 and 180", longitude)));
                }

                let coordinate = Coordinate::new(latitude, longitude);
                Some(match inner.accuracy_m {
                    Some(accuracy) => coordinate.with_accuracy(accuracy),
                    None => coordinate,
                })
            }
            (None, None) => None,
            _ => return Err(Error::custom("location latitude and longitude must be configured together")),
        };

        Ok(LocationConfig {
            coordinate,
            watch_interval: inner.watch_interval,
            watch: inner.watch,
            single_shot: inner.single_shot,
        })
    }
}
