//! Deterministic navigation state machine for tab, stack and modal
//! view containers.

pub mod config;
pub mod logging;
pub mod mvi;
pub mod nav;
pub mod render;
pub mod scenario;
