//! Coded value resolution for catalog items.
//!
//! Every observation entry in a QMD carries a `(code, code system)` pair. Items sourced from the
//! generic-layer registry carry both halves and are embedded verbatim. Items from older catalogs
//! carry neither; they are coded with their own id under
//! [`LEGACY_ITEM_CODE_SYSTEM`](crate::poqm::constants::LEGACY_ITEM_CODE_SYSTEM).
//!
//! The legacy branch exists for catalogs that have not moved to the registry yet and should be
//! removed once they have.

use crate::poqm::constants::LEGACY_ITEM_CODE_SYSTEM;
use crate::public_structs::StudyDefinitionItemRef;

/// The code pair embedded for one item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedCode<'a> {
    pub code: &'a str,
    pub code_system: &'a str,
    /// True when the item id and the legacy code system were used.
    pub fallback: bool,
}

/// Resolves the code pair for `item`.
///
/// Uses the item's code and code system when both are present. Otherwise (either half missing)
/// the item id becomes the code within the legacy code system. Never fails.
pub fn resolve_code<'a>(item: &StudyDefinitionItemRef<'a>) -> ResolvedCode<'a> {
    match (item.code, item.code_system) {
        (Some(code), Some(code_system)) => ResolvedCode {
            code,
            code_system,
            fallback: false,
        },
        _ => ResolvedCode {
            code: item.id,
            code_system: LEGACY_ITEM_CODE_SYSTEM,
            fallback: true,
        },
    }
}
