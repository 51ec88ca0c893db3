//! The geomagnetic data-source seam.

use async_trait::async_trait;

use lightstrail_core::aurora::{GeoPoint, GeomagneticReading};
use lightstrail_spaceweather::{SpaceWeatherError, SwpcClient};

/// Supplier of current geomagnetic conditions.
///
/// `location` is advisory: a planetary source (the production SWPC client)
/// ignores it and returns one global reading, while a per-location source
/// may use it to localise the answer. The scheduler resolves one reading
/// per pass either way.
#[async_trait]
pub trait KpDataSource: Send + Sync {
    async fn current_reading(
        &self,
        location: Option<GeoPoint>,
    ) -> Result<GeomagneticReading, SpaceWeatherError>;
}

#[async_trait]
impl KpDataSource for SwpcClient {
    async fn current_reading(
        &self,
        _location: Option<GeoPoint>,
    ) -> Result<GeomagneticReading, SpaceWeatherError> {
        SwpcClient::current_reading(self).await
    }
}
