use crate::{config::TourConfig, error::TourResult};

/// Fetches tour configurations over HTTP. No retries, no caching: a tour is
/// loaded once at startup.
pub struct TourService {
    client: reqwest::blocking::Client,
}

impl TourService {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// GETs the endpoint, decodes the JSON body as a [`TourConfig`], and
    /// validates it.
    #[tracing::instrument(skip(self))]
    pub fn fetch_config(&self, endpoint: &str) -> TourResult<TourConfig> {
        let config: TourConfig = self
            .client
            .get(endpoint)
            .send()?
            .error_for_status()?
            .json()?;
        config.validate()?;
        Ok(config)
    }

    /// Fail-soft variant: a fetch or validation failure is logged and
    /// yields an empty config, so the engine renders no steps instead of
    /// propagating the error.
    pub fn fetch_config_or_empty(&self, endpoint: &str) -> TourConfig {
        match self.fetch_config(endpoint) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, endpoint, "tour config fetch failed; rendering no steps");
                TourConfig::default()
            }
        }
    }
}

impl Default for TourService {
    fn default() -> Self {
        Self::new()
    }
}
