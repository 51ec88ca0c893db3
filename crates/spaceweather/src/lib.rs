//! NOAA SWPC space-weather client.
//!
//! Fetches the planetary K index, real-time solar wind fields, and the
//! three-day Kp forecast from the Space Weather Prediction Center JSON
//! feeds, reshaping them into [`GeomagneticReading`] and
//! [`KpForecastEntry`] values.
//!
//! [`GeomagneticReading`]: lightstrail_core::aurora::GeomagneticReading

pub mod client;
pub mod feeds;

pub use client::{SpaceWeatherError, SwpcClient};
pub use feeds::KpForecastEntry;
