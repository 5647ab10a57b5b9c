//! Navigation feature module.
//!
//! Models a tree of view containers (tab switchers, navigation stacks and
//! modal overlays) and reduces navigation events into a new tree plus the
//! command describing what changed on screen.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Container tree (persistent, validated on construction)
//! - `tree.rs` - Pure lookups and visibility resolution
//! - `intent.rs` - Navigation events
//! - `command.rs` - Commands derived from each event
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `orchestrator.rs` - Owner of the committed state, fans commands out
//! - `subscriber.rs` - Command subscribers, including the broadcaster

mod command;
mod intent;
mod orchestrator;
mod reducer;
mod state;
mod subscriber;
pub mod tree;

pub use command::NavigationCommand;
pub use intent::NavigationEvent;
pub use orchestrator::NavigationCore;
pub use reducer::NavigationReducer;
pub use state::{
    NavContainerState, NavigationState, ReactorViewState, TabContainerState, TreeError,
    ViewContainerState,
};
pub use subscriber::{BroadcastSubscriber, CommandSubscriber};
