//! Immutable in-memory store for the provider and plan datasets.

use std::collections::BTreeSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{DataError, Dataset, DirectoryError};

use super::city::derive_cities;
use super::types::{Plan, Provider};

/// Both datasets, loaded once at startup and never modified.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    providers: Vec<Provider>,
    plans: Vec<Plan>,
}

/// Choices offered to the client for each filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterOptions {
    /// Distinct specialties, ascending.
    pub specialties: Vec<String>,
    /// All plans, in dataset order.
    pub plans: Vec<Plan>,
    /// Distinct derived cities, ascending.
    pub cities: Vec<String>,
}

impl DataStore {
    /// Load both datasets. Either failing aborts the whole load.
    pub fn load(providers_path: &Path, plans_path: &Path) -> Result<Self, DataError> {
        let providers: Vec<Provider> = read_dataset(Dataset::Providers, providers_path)?;
        let plans: Vec<Plan> = read_dataset(Dataset::Plans, plans_path)?;

        info!(
            providers = providers.len(),
            plans = plans.len(),
            "Datasets loaded"
        );

        Ok(Self::from_records(providers, plans))
    }

    /// Validate `config` and load the datasets it points at.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        config.validate().map_err(DirectoryError::InvalidConfig)?;
        Ok(Self::load(&config.providers_path, &config.plans_path)?)
    }

    /// Build a store from already-parsed records.
    pub fn from_records(providers: Vec<Provider>, plans: Vec<Plan>) -> Self {
        Self { providers, plans }
    }

    /// All providers, in dataset order.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// All plans, in dataset order.
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Distinct specialties, ascending.
    pub fn specialties(&self) -> Vec<&str> {
        self.providers
            .iter()
            .map(|p| p.specialty.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct derived cities, ascending. Recomputed on every call.
    pub fn cities(&self) -> Vec<&str> {
        derive_cities(&self.providers)
    }

    /// Everything the page and the filters endpoint present.
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            specialties: self.specialties().into_iter().map(str::to_string).collect(),
            plans: self.plans.clone(),
            cities: self.cities().into_iter().map(str::to_string).collect(),
        }
    }
}

fn read_dataset<T: DeserializeOwned>(dataset: Dataset, path: &Path) -> Result<Vec<T>, DataError> {
    let raw = std::fs::read_to_string(path).map_err(|source| DataError::Read {
        dataset,
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| DataError::Malformed {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}
