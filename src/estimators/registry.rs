// registry.rs - Estimator registry for managing available sub-models

use super::traits::FrequencyEstimator;
use super::{LinkageFrequency, RecombFrequency};
use std::collections::BTreeMap;

/// Registry of named frequency estimators
pub struct EstimatorRegistry {
    estimators: BTreeMap<String, Box<dyn FrequencyEstimator>>,
}

impl EstimatorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            estimators: BTreeMap::new(),
        };

        // Register built-in estimators
        registry.register_estimator("recomb", Box::new(RecombFrequency));
        registry.register_estimator("linkage", Box::new(LinkageFrequency));

        registry
    }

    /// Register a new estimator, replacing any previous one with that name
    pub fn register_estimator(&mut self, name: &str, estimator: Box<dyn FrequencyEstimator>) {
        self.estimators.insert(name.to_string(), estimator);
    }

    /// Get an estimator by name
    pub fn get_estimator(&self, name: &str) -> Option<&dyn FrequencyEstimator> {
        self.estimators.get(name).map(|e| e.as_ref())
    }

    /// Check if an estimator exists
    pub fn has_estimator(&self, name: &str) -> bool {
        self.estimators.contains_key(name)
    }

    /// List all available estimators as `(registered name, description)`
    pub fn list_estimators(&self) -> Vec<(&str, &str)> {
        self.estimators
            .iter()
            .map(|(name, e)| (name.as_str(), e.description()))
            .collect()
    }

    /// Get all estimator names
    pub fn get_estimator_names(&self) -> Vec<&str> {
        self.estimators.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for EstimatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
