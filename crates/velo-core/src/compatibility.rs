//! # Compatibility Resolver
//!
//! Filters candidate options down to those not excluded by the current
//! selection.
//!
//! ## Why Both Directions?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule stored as: Mountain wheels ──✗──► Diamond frame                   │
//! │                                                                         │
//! │  Customer A picks wheels first:                                        │
//! │    selected {wheels}  → frames offered: Diamond ✗, Step-through ✓      │
//! │                                                                         │
//! │  Customer B picks the frame first:                                     │
//! │    selected {diamond} → wheels offered: Mountain ✗, Road ✓             │
//! │                                                                         │
//! │  Checking only `selected ──► candidate` would let customer B reach     │
//! │  the forbidden combination. Every edge is checked both ways.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure; the engine fetches the edges.

use std::collections::{BTreeSet, HashSet};

use crate::types::{IncompatibilityEdge, OptionId, PartOption};

/// Returns the candidates that no selected option excludes.
///
/// Candidate order is preserved. With no selections the candidates are
/// returned unchanged.
///
/// ## Example
/// ```rust
/// use velo_core::compatibility::resolve_compatible;
/// use velo_core::types::{IncompatibilityEdge, PartOption};
///
/// let option = |id| PartOption {
///     id,
///     part_type_id: 1,
///     name: format!("option {id}"),
///     base_price_cents: 0,
///     is_active: true,
/// };
/// let edges = [IncompatibilityEdge { rule_id: 1, from_option_id: 10, to_option_id: 2 }];
///
/// let compatible = resolve_compatible(vec![option(1), option(2)], &[10], &edges);
/// assert_eq!(compatible.iter().map(|o| o.id).collect::<Vec<_>>(), vec![1]);
/// ```
pub fn resolve_compatible(
    candidates: Vec<PartOption>,
    selected: &[OptionId],
    edges: &[IncompatibilityEdge],
) -> Vec<PartOption> {
    if selected.is_empty() {
        return candidates;
    }

    let excluded = excluded_by(selected, edges);
    candidates
        .into_iter()
        .filter(|option| !excluded.contains(&option.id))
        .collect()
}

/// Every option id that sits on the far end of an edge from a selected option.
pub fn excluded_by(selected: &[OptionId], edges: &[IncompatibilityEdge]) -> HashSet<OptionId> {
    let selected: HashSet<OptionId> = selected.iter().copied().collect();

    edges
        .iter()
        .filter(|edge| !edge.is_self_loop())
        .flat_map(|edge| selected.iter().filter_map(move |&id| edge.other_end(id)))
        .collect()
}

/// Lists every unordered pair of selected options joined by an edge.
///
/// Pairs are normalised as `(smaller id, larger id)`, deduplicated and
/// sorted, so the result does not depend on selection or edge order.
pub fn conflicting_pairs(
    selected: &[OptionId],
    edges: &[IncompatibilityEdge],
) -> Vec<(OptionId, OptionId)> {
    let selected: HashSet<OptionId> = selected.iter().copied().collect();

    let pairs: BTreeSet<(OptionId, OptionId)> = edges
        .iter()
        .filter(|edge| !edge.is_self_loop())
        .filter(|edge| {
            selected.contains(&edge.from_option_id) && selected.contains(&edge.to_option_id)
        })
        .map(|edge| {
            let (a, b) = (edge.from_option_id, edge.to_option_id);
            (a.min(b), a.max(b))
        })
        .collect();

    pairs.into_iter().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
