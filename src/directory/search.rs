//! Provider search: filtering and network-status annotation.

use std::num::IntErrorKind;

use serde::Deserialize;
use serde_json::{Number, Value};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::SearchError;

use super::store::DataStore;
use super::types::{AnnotatedProvider, NetworkStatus, PlanId, PlanSelection, Provider};

/// Search request body as sent by the client.
///
/// Every field is optional; a missing, `null` or empty value disables that filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Exact specialty to match.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Selected plan, as an integer or a numeric string.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "10")]
    pub plan_id: Option<PlanIdInput>,
    /// Text that must occur in the provider address.
    #[serde(default)]
    pub city: Option<String>,
}

/// Raw `plan_id` value before validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlanIdInput {
    /// JSON integer that fits a plan id.
    Integer(PlanId),
    /// JSON string, parsed after trimming.
    Text(String),
    /// Any other JSON value. Only integral numbers are accepted.
    Other(Value),
}

impl PlanIdInput {
    /// Convert to a plan selection. `Ok(None)` means no plan was selected.
    pub fn resolve(&self) -> Result<Option<PlanSelection>, SearchError> {
        match self {
            PlanIdInput::Integer(id) => Ok(Some(PlanSelection::Id(*id))),
            PlanIdInput::Text(text) if text.is_empty() => Ok(None),
            PlanIdInput::Text(text) => match text.trim().parse::<PlanId>() {
                Ok(id) => Ok(Some(PlanSelection::Id(id))),
                Err(e)
                    if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) =>
                {
                    Ok(Some(PlanSelection::OutOfRange))
                }
                Err(_) => Err(SearchError::InvalidPlanId {
                    value: format!("{text:?}"),
                }),
            },
            PlanIdInput::Other(Value::Number(number)) => resolve_number(number)
                .map(Some)
                .ok_or_else(|| SearchError::InvalidPlanId {
                    value: number.to_string(),
                }),
            PlanIdInput::Other(value) => Err(SearchError::InvalidPlanId {
                value: value.to_string(),
            }),
        }
    }
}

/// Integral JSON numbers, floats included. Anything past the `i64` range is
/// still an integer, just not one any provider accepts.
fn resolve_number(number: &Number) -> Option<PlanSelection> {
    if let Some(id) = number.as_i64() {
        return Some(PlanSelection::Id(id));
    }
    if number.is_u64() {
        return Some(PlanSelection::OutOfRange);
    }

    let value = number.as_f64()?;
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }

    // i64::MIN is -2^63, exactly representable; 2^63 is the first value past i64::MAX.
    let bound = -(i64::MIN as f64);
    if value >= -bound && value < bound {
        Some(PlanSelection::Id(value as PlanId))
    } else {
        Some(PlanSelection::OutOfRange)
    }
}

/// Validated filter criteria for one search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Exact, case-sensitive specialty.
    pub specialty: Option<String>,
    /// Selected plan.
    pub plan_id: Option<PlanSelection>,
    /// Substring of the raw address.
    pub city: Option<String>,
}

impl TryFrom<SearchRequest> for SearchCriteria {
    type Error = SearchError;

    fn try_from(request: SearchRequest) -> Result<Self, Self::Error> {
        let plan_id = match &request.plan_id {
            Some(input) => input.resolve()?,
            None => None,
        };

        Ok(Self {
            specialty: non_empty(request.specialty),
            plan_id,
            city: non_empty(request.city),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SearchCriteria {
    /// Whether a provider passes the specialty and city filters.
    pub fn matches(&self, provider: &Provider) -> bool {
        let specialty_ok = self
            .specialty
            .as_deref()
            .map_or(true, |s| provider.specialty == s);
        // Substring of the whole address, not equality with the derived city.
        let city_ok = self
            .city
            .as_deref()
            .map_or(true, |c| provider.address.contains(c));

        specialty_ok && city_ok
    }
}

/// Filter the store's providers and annotate each match, keeping dataset order.
pub fn search(store: &DataStore, criteria: &SearchCriteria) -> Vec<AnnotatedProvider> {
    let results: Vec<AnnotatedProvider> = store
        .providers()
        .iter()
        .filter(|p| criteria.matches(p))
        .map(|p| AnnotatedProvider::new(p.clone(), NetworkStatus::for_plan(p, criteria.plan_id)))
        .collect();

    debug!(
        specialty = ?criteria.specialty,
        plan_id = ?criteria.plan_id,
        city = ?criteria.city,
        matched = results.len(),
        "Search completed"
    );

    results
}
