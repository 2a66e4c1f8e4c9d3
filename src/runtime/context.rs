use crate::imagery::ImagerySource;
use crate::map::HeadlessMap;
use crate::service::HttpImageryService;

use super::{Result, Session, SessionConfig};

#[derive(Debug)]
pub struct AppContext {
    config: SessionConfig,
    service: HttpImageryService,
}

impl AppContext {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let service = HttpImageryService::new(&config.service);
        Ok(Self { config, service })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn service(&self) -> &HttpImageryService {
        &self.service
    }

    pub fn new_source(&self) -> Result<ImagerySource> {
        let params = self.config.imagery.params()?;
        Ok(ImagerySource::sentinel2_with_preset(
            params,
            &self.config.imagery.preset,
        )?)
    }

    pub fn start_session(&self) -> Result<Session<HeadlessMap, &HttpImageryService>> {
        let map = HeadlessMap::new(self.config.map.basemap);
        Session::start(map, &self.service, &self.config)
    }
}
