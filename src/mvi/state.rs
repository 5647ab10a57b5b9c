//! Base trait for state snapshots in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states, cheaply when shared)
/// - Self-contained (all data a host needs to render)
/// - Comparable (PartialEq for detecting changes)
pub trait State: Clone + PartialEq + Send + Sync + 'static {}
