//! Provider directory: static datasets and the search over them.
//!
//! This module handles:
//! - Provider and plan record types
//! - Loading the immutable data store
//! - City derivation from addresses
//! - Filtering and network-status annotation

pub mod city;
pub mod search;
pub mod store;
pub mod types;

pub use city::{derive_cities, derive_city};
pub use search::{search, PlanIdInput, SearchCriteria, SearchRequest};
pub use store::{DataStore, FilterOptions};
pub use types::{AnnotatedProvider, NetworkStatus, Plan, PlanId, PlanSelection, Provider, ProviderId};
