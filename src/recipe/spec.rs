use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::TemporalOp;

use super::{RecipeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionPair {
    pub primary: String,
    pub auxiliary: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum JoinPolicy {
    /// At most one auxiliary record per primary record, first match wins.
    /// Unmatched primary records are kept without the joined property.
    #[default]
    SaveFirst,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinSpec {
    pub policy: JoinPolicy,
    pub key: String,
    pub property: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissingProbability {
    #[default]
    KeepPixels,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum RecipeStep {
    FilterMetadata { property: String, max: f64 },
    EdgeMask { required_bands: Vec<String> },
    CloudMask {
        joined_property: String,
        band: String,
        max_probability: u8,
        #[serde(default)]
        on_missing: MissingProbability,
    },
    FilterDate { start: NaiveDate, end: NaiveDate },
}

impl RecipeStep {
    pub fn name(&self) -> &'static str {
        match self {
            RecipeStep::FilterMetadata { .. } => "filter_metadata",
            RecipeStep::EdgeMask { .. } => "edge_mask",
            RecipeStep::CloudMask { .. } => "cloud_mask",
            RecipeStep::FilterDate { .. } => "filter_date",
        }
    }

    fn stage(&self) -> u8 {
        match self {
            RecipeStep::FilterMetadata { .. } => 0,
            RecipeStep::EdgeMask { .. } => 1,
            RecipeStep::CloudMask { .. } => 2,
            RecipeStep::FilterDate { .. } => 3,
        }
    }
}

/// Declarative composition request evaluated by the remote service:
/// join, then `steps` in order, then `reducer`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompositeRecipe {
    pub name: Option<String>,
    pub collections: CollectionPair,
    pub join: JoinSpec,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    pub reducer: TemporalOp,
}

impl CompositeRecipe {
    pub fn validate(&self) -> Result<()> {
        if self.collections.primary.trim().is_empty() || self.collections.auxiliary.trim().is_empty()
        {
            return Err(RecipeError::Invalid(
                "both collection identifiers must be non-empty".to_string(),
            ));
        }
        if self.join.key.trim().is_empty() || self.join.property.trim().is_empty() {
            return Err(RecipeError::Invalid(
                "join key and property must be non-empty".to_string(),
            ));
        }

        for pair in self.steps.windows(2) {
            if pair[0].stage() >= pair[1].stage() {
                return Err(RecipeError::Invalid(format!(
                    "step `{}` cannot follow `{}`",
                    pair[1].name(),
                    pair[0].name()
                )));
            }
        }

        let has = |name: &str| self.steps.iter().any(|step| step.name() == name);
        for required in ["filter_metadata", "filter_date"] {
            if !has(required) {
                return Err(RecipeError::Invalid(format!(
                    "recipe must include a `{required}` step"
                )));
            }
        }
        if has("edge_mask") != has("cloud_mask") {
            return Err(RecipeError::Invalid(
                "edge_mask and cloud_mask must be applied together".to_string(),
            ));
        }

        for step in &self.steps {
            match step {
                RecipeStep::FilterMetadata { property, max } => {
                    if property.trim().is_empty() || !(0.0..=100.0).contains(max) {
                        return Err(RecipeError::Invalid(format!(
                            "metadata filter on `{property}` needs a threshold in 0..=100, got {max}"
                        )));
                    }
                }
                RecipeStep::EdgeMask { required_bands } => {
                    if required_bands.is_empty() {
                        return Err(RecipeError::Invalid(
                            "edge mask needs at least one quality band".to_string(),
                        ));
                    }
                }
                RecipeStep::CloudMask {
                    joined_property,
                    max_probability,
                    ..
                } => {
                    if joined_property != &self.join.property {
                        return Err(RecipeError::Invalid(format!(
                            "cloud mask reads `{joined_property}` but the join attaches `{}`",
                            self.join.property
                        )));
                    }
                    if *max_probability > 100 {
                        return Err(RecipeError::Invalid(format!(
                            "cloud probability threshold {max_probability} exceeds 100"
                        )));
                    }
                }
                RecipeStep::FilterDate { start, end } => {
                    if start > end {
                        return Err(RecipeError::Invalid(format!(
                            "date filter starts {start} after it ends {end}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn cloud_masked(&self) -> bool {
        self.steps
            .iter()
            .any(|step| matches!(step, RecipeStep::CloudMask { .. }))
    }
}
