use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::model::VizParams;
use crate::recipe::CompositeRecipe;

use super::{
    CompositeHandle, HistogramRequest, HistogramResult, ImageryService, Result, ServiceError,
    TileUrl,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServiceConfig {
    pub endpoint: String,
    /// Sent as a bearer token when present.
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for HttpServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompositeBody<'a> {
    recipe: &'a CompositeRecipe,
}

#[derive(Debug, Serialize)]
struct MapBody<'a> {
    composite_id: &'a str,
    visualization: &'a VizParams,
}

#[derive(Debug, Deserialize)]
struct MapResponse {
    tile_url: String,
}

pub struct HttpImageryService {
    agent: ureq::Agent,
    endpoint: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for HttpImageryService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpImageryService")
            .field("endpoint", &self.endpoint)
            .field("authenticated", &self.api_token.is_some())
            .finish()
    }
}

impl HttpImageryService {
    pub fn new(config: &HttpServiceConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            agent,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}/{}", self.endpoint, path);
        let payload = serde_json::to_string(body)?;
        log::debug!("POST {url} ({} bytes)", payload.len());

        let mut request = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json");
        if let Some(token) = &self.api_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let raw = match request.send_string(&payload) {
            Ok(response) => response.into_string()?,
            Err(ureq::Error::Status(status, response)) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|error| format!("unreadable error body: {error}"));
                log::warn!("POST {url} rejected with HTTP {status}");
                return Err(ServiceError::Rejected { status, message });
            }
            Err(ureq::Error::Transport(transport)) => {
                log::warn!("POST {url} failed: {transport}");
                return Err(ServiceError::Unreachable(transport.to_string()));
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

impl ImageryService for HttpImageryService {
    fn composite(&self, recipe: &CompositeRecipe) -> Result<CompositeHandle> {
        self.post("v1/composites", &CompositeBody { recipe })
    }

    fn tile_url(&self, composite: &CompositeHandle, viz: &VizParams) -> Result<TileUrl> {
        let response: MapResponse = self.post(
            "v1/maps",
            &MapBody {
                composite_id: &composite.id,
                visualization: viz,
            },
        )?;
        TileUrl::new(response.tile_url)
    }

    fn histogram(&self, request: &HistogramRequest) -> Result<HistogramResult> {
        let result: HistogramResult = self.post("v1/histograms", request)?;
        result.validate(&request.bands)?;
        Ok(result)
    }
}
