//! HTTP client for the SWPC JSON feeds.

use std::time::Duration;

use serde::de::DeserializeOwned;

use lightstrail_core::aurora::GeomagneticReading;

use crate::feeds::{
    reshape_forecast, KpForecastEntry, KpIndexEntry, RtswMagEntry, RtswWindEntry,
};

/// Production SWPC base URL.
const DEFAULT_BASE_URL: &str = "https://services.swpc.noaa.gov";

/// HTTP request timeout for a single feed fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 1-minute planetary K index feed.
const KP_INDEX_PATH: &str = "/json/planetary_k_index_1m.json";

/// Real-time solar wind magnetometer feed (Bz).
const RTSW_MAG_PATH: &str = "/json/rtsw/rtsw_mag_1m.json";

/// Real-time solar wind plasma feed (speed).
const RTSW_WIND_PATH: &str = "/json/rtsw/rtsw_wind_1m.json";

/// Three-day Kp forecast product.
const KP_FORECAST_PATH: &str = "/products/noaa-planetary-k-index-forecast.json";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SWPC feed failures.
///
/// Every variant means the same thing to callers: current space-weather
/// data is unavailable right now.
#[derive(Debug, thiserror::Error)]
pub enum SpaceWeatherError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream feed returned a non-2xx status code.
    #[error("Upstream feed returned HTTP {0}")]
    HttpStatus(u16),

    /// The feed body decoded but did not contain usable data.
    #[error("Malformed feed data: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// SwpcClient
// ---------------------------------------------------------------------------

/// Client for the NOAA Space Weather Prediction Center JSON feeds.
pub struct SwpcClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwpcClient {
    /// Create a client against a specific base URL (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a client from the environment.
    ///
    /// | Variable        | Required | Default                           |
    /// |-----------------|----------|-----------------------------------|
    /// | `SWPC_BASE_URL` | no       | `https://services.swpc.noaa.gov`  |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SWPC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Fetch the current planetary geomagnetic reading.
    ///
    /// The Kp index is required — without it there is no reading. Bz and
    /// solar wind speed are ancillary display fields fetched best-effort;
    /// their feeds failing degrades them to `None` rather than failing the
    /// reading.
    pub async fn current_reading(&self) -> Result<GeomagneticReading, SpaceWeatherError> {
        let entries: Vec<KpIndexEntry> = self.get_json(KP_INDEX_PATH).await?;
        let latest = entries
            .last()
            .ok_or_else(|| SpaceWeatherError::Malformed("empty planetary K index feed".into()))?;
        let observed_at = crate::feeds::parse_time_tag(&latest.time_tag)?;

        let bz = match self.latest_bz().await {
            Ok(bz) => bz,
            Err(e) => {
                tracing::debug!(error = %e, "Solar wind magnetometer feed unavailable");
                None
            }
        };
        let solar_wind_speed = match self.latest_wind_speed().await {
            Ok(speed) => speed,
            Err(e) => {
                tracing::debug!(error = %e, "Solar wind plasma feed unavailable");
                None
            }
        };

        Ok(GeomagneticReading {
            kp_index: latest.estimated_kp,
            bz,
            solar_wind_speed,
            observed_at,
            location: None,
        })
    }

    /// Fetch the three-day Kp forecast, reshaped to flat entries.
    pub async fn kp_forecast(&self) -> Result<Vec<KpForecastEntry>, SpaceWeatherError> {
        let rows: Vec<Vec<String>> = self.get_json(KP_FORECAST_PATH).await?;
        reshape_forecast(rows)
    }

    /// Latest Bz component from the magnetometer feed, if reported.
    async fn latest_bz(&self) -> Result<Option<f64>, SpaceWeatherError> {
        let entries: Vec<RtswMagEntry> = self.get_json(RTSW_MAG_PATH).await?;
        Ok(entries.last().and_then(|e| e.bz_gsm))
    }

    /// Latest solar wind bulk speed from the plasma feed, if reported.
    async fn latest_wind_speed(&self) -> Result<Option<f64>, SpaceWeatherError> {
        let entries: Vec<RtswWindEntry> = self.get_json(RTSW_WIND_PATH).await?;
        Ok(entries.last().and_then(|e| e.proton_speed))
    }

    /// Execute a GET against `base_url + path`, decoding the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SpaceWeatherError> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SpaceWeatherError::HttpStatus(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

impl Default for SwpcClient {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
