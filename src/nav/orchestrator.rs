//! Navigation core: owns the committed state and fans commands out.

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tokio::sync::broadcast;
use tracing::debug;

use crate::mvi::Reducer;

use super::command::NavigationCommand;
use super::intent::NavigationEvent;
use super::reducer::NavigationReducer;
use super::state::{NavContainerState, NavigationState, ReactorViewState, ViewContainerState};
use super::subscriber::{BroadcastSubscriber, CommandSubscriber};
use super::tree;

/// Single owner of the navigation state.
///
/// `dispatch` runs the reducer, commits the new snapshot, then calls every
/// subscriber once per command in registration order. Dispatches from
/// different threads are serialized. A subscriber may dispatch again from
/// inside its callback; the nested dispatch completes before the outer one
/// moves on to the next subscriber.
pub struct NavigationCore {
    state: ReentrantMutex<RefCell<NavigationState>>,
    subscribers: Vec<Arc<dyn CommandSubscriber>>,
}

impl NavigationCore {
    pub fn new(initial: NavigationState) -> Self {
        Self {
            state: ReentrantMutex::new(RefCell::new(initial)),
            subscribers: Vec::new(),
        }
    }

    /// Create a core whose only subscriber rebroadcasts into a channel.
    pub fn with_broadcast(
        initial: NavigationState,
        capacity: usize,
    ) -> (Self, broadcast::Receiver<NavigationCommand>) {
        let (broadcaster, receiver) = BroadcastSubscriber::new(capacity);
        (Self::new(initial).with_subscriber(broadcaster), receiver)
    }

    pub fn with_subscriber(mut self, subscriber: impl CommandSubscriber + 'static) -> Self {
        self.subscribers.push(Arc::new(subscriber));
        self
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn CommandSubscriber>) {
        self.subscribers.push(subscriber);
    }

    /// Reduce `event` against the current state, commit, and notify.
    ///
    /// Always succeeds; events that no longer apply still deliver
    /// `HiddenUpdate`.
    pub fn dispatch(&self, event: NavigationEvent) {
        let guard = self.state.lock();
        let current = guard.borrow().clone();
        let (next, commands) = NavigationReducer::reduce(current, event);
        *guard.borrow_mut() = next;

        for command in &commands {
            debug!(
                command = command.kind(),
                subscribers = self.subscribers.len(),
                "Delivering navigation command"
            );
            for subscriber in &self.subscribers {
                subscriber.on_command(command);
            }
        }
    }

    /// Current committed snapshot.
    pub fn state(&self) -> NavigationState {
        self.state.lock().borrow().clone()
    }

    pub fn current_visible_view(&self) -> Option<ReactorViewState> {
        let state = self.state();
        tree::find_visible_view(state.root_view_container()).cloned()
    }

    pub fn current_visible_container(&self) -> Option<Arc<NavContainerState>> {
        let state = self.state();
        tree::find_visible_container(state.root_view_container()).cloned()
    }

    pub fn find_container(&self, tag: &str) -> Option<ViewContainerState> {
        let state = self.state();
        tree::find_substate_with_tag(state.root_view_container(), tag)
    }
}
