use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::layers::{LayerId, LayerManager};
use crate::map::MapView;
use crate::model::{ImageParams, TemporalOp};
use crate::service::{ImageryService, TileUrl};

use super::{ControlError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageryForm {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub max_cloudy_pixel_pct: u8,
    #[serde(default)]
    pub cloud_mask_enabled: bool,
    pub temporal_op: String,
}

impl ImageryForm {
    pub fn from_params(params: &ImageParams) -> Self {
        Self {
            start: params.start(),
            end: params.end(),
            max_cloudy_pixel_pct: params.max_cloudy_pixel_pct(),
            cloud_mask_enabled: params.cloud_mask_enabled(),
            temporal_op: params.temporal_op().to_string(),
        }
    }

    pub fn to_params(&self) -> Result<ImageParams> {
        let temporal_op = self.temporal_op.parse::<TemporalOp>()?;
        Ok(ImageParams::new(
            self.start,
            self.end,
            self.max_cloudy_pixel_pct,
            self.cloud_mask_enabled,
            temporal_op,
        )?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageryPaneController {
    target: Option<LayerId>,
    form: Option<ImageryForm>,
}

impl ImageryPaneController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<LayerId> {
        self.target
    }

    pub fn form(&self) -> Option<&ImageryForm> {
        self.form.as_ref()
    }

    pub fn bind(&mut self, layers: &LayerManager, id: LayerId) -> Result<()> {
        let params = layers.get(id)?.source().params();
        self.form = Some(ImageryForm::from_params(params));
        self.target = Some(id);
        Ok(())
    }

    pub fn unbind(&mut self) {
        self.target = None;
        self.form = None;
    }

    /// Validates the whole form, then rebuilds the bound layer. The layer's
    /// parameters and the form only change once a composite is built from
    /// them.
    pub fn submit(
        &mut self,
        form: ImageryForm,
        layers: &mut LayerManager,
        map: &mut dyn MapView,
        service: &dyn ImageryService,
    ) -> Result<TileUrl> {
        let id = self.target.ok_or(ControlError::Unbound)?;
        let params = match form.to_params() {
            Ok(params) => params,
            Err(error) => {
                log::warn!("rejected imagery parameters: {error}");
                return Err(error);
            }
        };
        let source = layers.get_mut(id)?.source_mut();
        let previous = source.params().clone();
        let revision = source.composite_revision();
        source.set_params(params);

        match layers.refresh(map, service, id) {
            Ok(url) => {
                self.form = Some(form);
                Ok(url)
            }
            Err(error) => {
                let source = layers.get_mut(id)?.source_mut();
                if source.composite_revision() == revision {
                    log::warn!("rebuild failed, keeping previous imagery parameters: {error}");
                    source.set_params(previous);
                } else {
                    self.form = Some(form);
                }
                Err(error.into())
            }
        }
    }
}
