use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    name: String,
    physical_min: f64,
    physical_max: f64,
    display_lo: f64,
    display_hi: f64,
}

impl Band {
    pub fn new(name: impl Into<String>, physical_min: f64, physical_max: f64) -> Result<Self> {
        let name = name.into();
        if !(physical_min <= physical_max) {
            return Err(ModelError::InvalidPhysicalRange {
                band: name,
                min: physical_min,
                max: physical_max,
            });
        }
        Ok(Self {
            name,
            physical_min,
            physical_max,
            display_lo: physical_min,
            display_hi: physical_max,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min(&self) -> f64 {
        self.physical_min
    }

    pub fn max(&self) -> f64 {
        self.physical_max
    }

    pub fn range(&self) -> (f64, f64) {
        (self.display_lo, self.display_hi)
    }

    pub fn validate_range(&self, lo: f64, hi: f64) -> Result<()> {
        // NaN fails every comparison, so it is rejected here as well.
        let valid = self.physical_min <= lo && lo <= hi && hi <= self.physical_max;
        if valid {
            Ok(())
        } else {
            Err(ModelError::InvalidRange {
                band: self.name.clone(),
                lo,
                hi,
                min: self.physical_min,
                max: self.physical_max,
            })
        }
    }

    pub fn set_range(&mut self, lo: f64, hi: f64) -> Result<()> {
        self.validate_range(lo, hi)?;
        self.display_lo = lo;
        self.display_hi = hi;
        Ok(())
    }
}

/// Lookups follow aliases such as `red` to canonical names. Every accepted
/// range change bumps the revision.
#[derive(Debug, Clone, Default)]
pub struct BandRegistry {
    bands: HashMap<String, Band>,
    aliases: HashMap<String, String>,
    revision: u64,
}

impl BandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, min: f64, max: f64) -> Result<()> {
        let name = name.into();
        if self.bands.contains_key(&name) || self.aliases.contains_key(&name) {
            return Err(ModelError::DuplicateBand(name));
        }
        let band = Band::new(name.clone(), min, max)?;
        self.bands.insert(name, band);
        Ok(())
    }

    pub fn alias(&mut self, alias: impl Into<String>, name: &str) -> Result<()> {
        let alias = alias.into();
        if self.bands.contains_key(&alias) || self.aliases.contains_key(&alias) {
            return Err(ModelError::DuplicateBand(alias));
        }
        if !self.bands.contains_key(name) {
            return Err(ModelError::UnknownBand(name.to_string()));
        }
        self.aliases.insert(alias, name.to_string());
        Ok(())
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> Result<&'a str> {
        let canonical = self
            .aliases
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        if self.bands.contains_key(canonical) {
            Ok(canonical)
        } else {
            Err(ModelError::UnknownBand(name.to_string()))
        }
    }

    pub fn get(&self, name: &str) -> Result<&Band> {
        let canonical = self.resolve(name)?;
        self.bands
            .get(canonical)
            .ok_or_else(|| ModelError::UnknownBand(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    pub fn set_range(&mut self, name: &str, lo: f64, hi: f64) -> Result<()> {
        let canonical = self.resolve(name)?.to_string();
        let band = self
            .bands
            .get_mut(&canonical)
            .ok_or_else(|| ModelError::UnknownBand(name.to_string()))?;
        band.set_range(lo, hi)?;
        self.revision += 1;
        Ok(())
    }

    pub fn set_ranges(&mut self, updates: &[(String, f64, f64)]) -> Result<()> {
        let mut seen: HashMap<&str, (f64, f64)> = HashMap::with_capacity(updates.len());
        for (name, lo, hi) in updates {
            let band = self.get(name)?;
            band.validate_range(*lo, *hi)?;
            let previous = seen.insert(band.name(), (*lo, *hi));
            if previous.is_some_and(|range| range != (*lo, *hi)) {
                return Err(ModelError::ConflictingRanges {
                    band: band.name().to_string(),
                });
            }
        }
        for (name, lo, hi) in updates {
            self.set_range(name, *lo, *hi)?;
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names = self.bands.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(alias, name)| (alias.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}
