//! Intents for the navigation tree.

use serde::{Deserialize, Serialize};

use crate::mvi::Intent;

use super::state::{NavContainerState, ReactorViewState, ViewContainerState};

/// Navigation events accepted by the reducer.
///
/// Every variant except `AppContextChanged` and `ReplaceRootContainer`
/// targets the container carrying `tag`. Events whose target is missing or
/// of the wrong variant are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// Select another tab of a tab container.
    ChangeContainerIndex { tag: String, index: usize },

    /// Present `container` over the target, replacing any current modal.
    PresentModally {
        tag: String,
        container: NavContainerState,
    },

    DismissModal { tag: String },

    PushNavView { tag: String, view: ReactorViewState },

    /// Pop the top leaf. A single-leaf stack is left alone.
    PopNavView { tag: String },

    /// Pop back to `view` (first match), or to the bottom leaf when absent.
    UnwindToView {
        tag: String,
        #[serde(default)]
        view: Option<ReactorViewState>,
    },

    ReplaceNavView { tag: String, view: ReactorViewState },

    ReplaceNavViewStack {
        tag: String,
        views: Vec<ReactorViewState>,
    },

    /// Platform foreground/background signal.
    AppContextChanged { in_foreground: bool },

    ReplaceRootContainer { container: ViewContainerState },
}

impl Intent for NavigationEvent {}

impl NavigationEvent {
    /// Tag of the container this event targets, if any.
    pub fn target_tag(&self) -> Option<&str> {
        match self {
            Self::ChangeContainerIndex { tag, .. }
            | Self::PresentModally { tag, .. }
            | Self::DismissModal { tag }
            | Self::PushNavView { tag, .. }
            | Self::PopNavView { tag }
            | Self::UnwindToView { tag, .. }
            | Self::ReplaceNavView { tag, .. }
            | Self::ReplaceNavViewStack { tag, .. } => Some(tag.as_str()),
            Self::AppContextChanged { .. } | Self::ReplaceRootContainer { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChangeContainerIndex { .. } => "change_container_index",
            Self::PresentModally { .. } => "present_modally",
            Self::DismissModal { .. } => "dismiss_modal",
            Self::PushNavView { .. } => "push_nav_view",
            Self::PopNavView { .. } => "pop_nav_view",
            Self::UnwindToView { .. } => "unwind_to_view",
            Self::ReplaceNavView { .. } => "replace_nav_view",
            Self::ReplaceNavViewStack { .. } => "replace_nav_view_stack",
            Self::AppContextChanged { .. } => "app_context_changed",
            Self::ReplaceRootContainer { .. } => "replace_root_container",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untargeted_events_have_no_tag() {
        let event = NavigationEvent::AppContextChanged {
            in_foreground: true,
        };
        assert_eq!(event.target_tag(), None);
        assert_eq!(event.kind(), "app_context_changed");
    }

    #[test]
    fn targeted_events_expose_tag() {
        let event = NavigationEvent::PopNavView {
            tag: "root".to_string(),
        };
        assert_eq!(event.target_tag(), Some("root"));
    }

    #[test]
    fn parses_unwind_without_view() {
        let event: NavigationEvent =
            serde_json::from_str(r#"{ "event": "unwind_to_view", "tag": "root" }"#).unwrap();
        assert_eq!(
            event,
            NavigationEvent::UnwindToView {
                tag: "root".to_string(),
                view: None
            }
        );
    }

    #[test]
    fn parses_present_modally_with_container() {
        let json = r#"{
            "event": "present_modally",
            "tag": "root",
            "container": { "tag": "sheet", "view_states": [{ "key": "compose" }] }
        }"#;
        let event: NavigationEvent = serde_json::from_str(json).unwrap();
        match event {
            NavigationEvent::PresentModally { tag, container } => {
                assert_eq!(tag, "root");
                assert_eq!(container.top().key(), "compose");
            }
            other => panic!("Expected PresentModally, got {other:?}"),
        }
    }
}
