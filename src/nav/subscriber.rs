//! Command subscribers.

use tokio::sync::broadcast;
use tracing::trace;

use super::command::NavigationCommand;

/// Receives every command produced by the navigation core, in order.
///
/// Called synchronously on the dispatching thread after the new state is
/// committed. Implementations must not block.
pub trait CommandSubscriber: Send + Sync {
    fn on_command(&self, command: &NavigationCommand);
}

impl<F> CommandSubscriber for F
where
    F: Fn(&NavigationCommand) + Send + Sync,
{
    fn on_command(&self, command: &NavigationCommand) {
        self(command)
    }
}

/// Rebroadcasts commands to any number of external listeners
/// (transition animators, analytics, test probes).
#[derive(Clone)]
pub struct BroadcastSubscriber {
    sender: broadcast::Sender<NavigationCommand>,
}

impl BroadcastSubscriber {
    /// Create a broadcast channel holding up to `capacity` undelivered commands
    /// per listener.
    pub fn new(capacity: usize) -> (Self, broadcast::Receiver<NavigationCommand>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Attach another listener.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationCommand> {
        self.sender.subscribe()
    }
}

impl CommandSubscriber for BroadcastSubscriber {
    fn on_command(&self, command: &NavigationCommand) {
        // No listeners is fine: broadcasting is fire-and-forget.
        if self.sender.send(command.clone()).is_err() {
            trace!(command = command.kind(), "No broadcast listeners");
        }
    }
}
