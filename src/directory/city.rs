//! City derivation from free-text provider addresses.

use std::collections::BTreeSet;

use super::types::Provider;

/// City of an address: the text after its last comma, trimmed.
///
/// Returns `None` for addresses without a comma.
pub fn derive_city(address: &str) -> Option<&str> {
    address.rsplit_once(',').map(|(_, city)| city.trim())
}

/// Distinct cities across `providers`, sorted ascending.
///
/// Providers whose address has no comma are skipped.
pub fn derive_cities<'a, I>(providers: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a Provider>,
{
    providers
        .into_iter()
        .filter_map(|p| derive_city(&p.address))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
