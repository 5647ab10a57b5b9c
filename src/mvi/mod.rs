//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides the base traits for unidirectional data flow
//! through the navigation core.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Commands) ──→ Subscribers
//!    ↑                                              │
//!    └──────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot, replaced wholesale on every step
//! - **Intent**: Navigation events coming from the host
//! - **Reducer**: Pure function producing the next state plus the commands
//!   describing what changed

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
