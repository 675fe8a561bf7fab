//! Provider directory record types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Insurance plan identifier.
pub type PlanId = i64;

/// Provider identifier.
pub type ProviderId = i64;

/// Healthcare provider record as loaded from the provider dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Provider {
    /// Unique provider identifier.
    #[schema(value_type = i64)]
    pub id: ProviderId,
    /// Display name.
    pub name: String,
    /// Specialty category (e.g., "Cardiology").
    pub specialty: String,
    /// Free-text address, normally ending in ", <city>".
    pub address: String,
    /// Plans this provider accepts.
    #[schema(value_type = Vec<i64>)]
    pub accepted_plan_ids: Vec<PlanId>,
    /// Fields the directory does not interpret (coordinates, phone, ...).
    /// Carried through to search results untouched.
    #[serde(flatten)]
    #[schema(ignore)]
    pub extra: Map<String, Value>,
}

impl Provider {
    /// Whether the provider accepts the given plan.
    pub fn accepts(&self, plan_id: PlanId) -> bool {
        self.accepted_plan_ids.contains(&plan_id)
    }
}

/// Insurance plan record as loaded from the plan dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plan {
    /// Unique plan identifier.
    #[schema(value_type = i64)]
    pub id: PlanId,
    /// Display name.
    pub name: String,
}

/// Plan chosen in a search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSelection {
    /// An integer plan id.
    Id(PlanId),
    /// An integer too large in magnitude for a plan id. No provider accepts it.
    OutOfRange,
}

impl From<PlanId> for PlanSelection {
    fn from(id: PlanId) -> Self {
        PlanSelection::Id(id)
    }
}

/// Coverage of a provider relative to the plan selected in a search.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NetworkStatus {
    /// No plan was selected.
    Unknown,
    /// The selected plan is accepted.
    InNetwork,
    /// The selected plan is not accepted.
    OutOfNetwork,
}

impl NetworkStatus {
    /// Status of `provider` for an optional selected plan.
    pub fn for_plan(provider: &Provider, plan: Option<PlanSelection>) -> Self {
        match plan {
            None => NetworkStatus::Unknown,
            Some(PlanSelection::Id(id)) if provider.accepts(id) => NetworkStatus::InNetwork,
            Some(_) => NetworkStatus::OutOfNetwork,
        }
    }
}

/// Search result: an owned copy of a provider plus its network status.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AnnotatedProvider {
    /// Provider fields, flattened into the result object.
    #[serde(flatten)]
    pub provider: Provider,
    /// Coverage for the selected plan.
    pub network_status: NetworkStatus,
}

impl AnnotatedProvider {
    /// Annotate a provider copy with its network status.
    pub fn new(mut provider: Provider, network_status: NetworkStatus) -> Self {
        // A dataset field with the same name would otherwise serialize twice.
        provider.extra.remove("network_status");
        Self {
            provider,
            network_status,
        }
    }
}
