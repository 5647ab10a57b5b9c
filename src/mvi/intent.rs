//! Base trait for intents (host/system events) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User gestures already translated by the host (back, tab taps)
/// - Platform lifecycle signals (foreground/background)
/// - Programmatic navigation requests
///
/// Intents are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
