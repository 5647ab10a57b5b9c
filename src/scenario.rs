//! Scripted navigation sessions: an initial tree plus a list of events.
//!
//! Used by the `reactor-nav` CLI to replay and inspect navigation flows.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::warn;

use crate::nav::{
    NavigationCommand, NavigationCore, NavigationEvent, NavigationState, ReactorViewState,
    ViewContainerState,
};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Failed to read scenario '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scenario '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub initial: ViewContainerState,
    #[serde(default)]
    pub app_in_foreground: bool,
    #[serde(default)]
    pub events: Vec<NavigationEvent>,
}

/// Outcome of one replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub event: NavigationEvent,
    pub command: NavigationCommand,
    pub visible_view: Option<ReactorViewState>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path).map_err(|e| ScenarioError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ScenarioError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn initial_state(&self) -> NavigationState {
        NavigationState::new(self.initial.clone()).with_app_in_foreground(self.app_in_foreground)
    }

    /// Dispatch every event through a broadcasting core and collect the
    /// commands its listener observed.
    pub fn replay(&self, capacity: usize) -> (NavigationCore, Vec<ReplayStep>) {
        let (core, mut receiver) = NavigationCore::with_broadcast(self.initial_state(), capacity);
        let mut steps = Vec::with_capacity(self.events.len());

        for event in &self.events {
            core.dispatch(event.clone());
            loop {
                match receiver.try_recv() {
                    Ok(command) => steps.push(ReplayStep {
                        event: event.clone(),
                        command,
                        visible_view: core.current_visible_view(),
                    }),
                    Err(TryRecvError::Lagged(skipped)) => {
                        warn!(skipped, "Replay listener lagged behind the broadcaster");
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }

        (core, steps)
    }
}
