use serde::{Deserialize, Serialize};

use crate::model::ImageParams;

use super::{CollectionPair, CompositeRecipe, JoinPolicy, JoinSpec, MissingProbability, RecipeStep};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveProfile {
    pub name: String,
    pub collections: CollectionPair,
    pub join_key: String,
    pub join_property: String,
    pub cloudy_pixel_property: String,
    pub edge_bands: Vec<String>,
    pub probability_band: String,
    pub max_cloud_probability: u8,
}

/// Assembles the composition recipe for `params` in the fixed order: join,
/// scene metadata filter, optional edge then cloud masking, date filter,
/// temporal reduction.
pub fn build_recipe(profile: &ArchiveProfile, params: &ImageParams) -> CompositeRecipe {
    let mut steps = vec![RecipeStep::FilterMetadata {
        property: profile.cloudy_pixel_property.clone(),
        max: f64::from(params.max_cloudy_pixel_pct()),
    }];

    if params.cloud_mask_enabled() {
        steps.push(RecipeStep::EdgeMask {
            required_bands: profile.edge_bands.clone(),
        });
        steps.push(RecipeStep::CloudMask {
            joined_property: profile.join_property.clone(),
            band: profile.probability_band.clone(),
            max_probability: profile.max_cloud_probability,
            on_missing: MissingProbability::KeepPixels,
        });
    }

    steps.push(RecipeStep::FilterDate {
        start: params.start(),
        end: params.end(),
    });

    CompositeRecipe {
        name: Some(profile.name.clone()),
        collections: profile.collections.clone(),
        join: JoinSpec {
            policy: JoinPolicy::SaveFirst,
            key: profile.join_key.clone(),
            property: profile.join_property.clone(),
        },
        steps,
        reducer: params.temporal_op(),
    }
}
