//! Commands produced by the navigation reducer.

use std::sync::Arc;

use serde::Serialize;

use super::state::NavContainerState;

/// Derived notification describing the observable effect of one event.
///
/// Variants that changed what the user sees report `true` from
/// [`NavigationCommand::changes_visible_view`]. `HiddenUpdate` is the
/// default: the tree may have changed, but not on screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum NavigationCommand {
    TabIndexChanged {
        previous_visible_container: Arc<NavContainerState>,
    },
    ModalPresented {
        previous_visible_container: Arc<NavContainerState>,
    },
    ModalDismissed {
        previous_visible_container: Arc<NavContainerState>,
    },
    RootContainerChanged,
    NavViewPushed,
    NavViewPopped,
    NavViewReplaced,
    #[default]
    HiddenUpdate,
    /// Foreground/background signal; neither visible nor hidden.
    AppContextChanged { in_foreground: bool },
}

impl NavigationCommand {
    /// Whether this command changed the visible view.
    pub fn changes_visible_view(&self) -> bool {
        !matches!(self, Self::HiddenUpdate | Self::AppContextChanged { .. })
    }

    /// Container that was visible before a tab switch or modal transition.
    pub fn previous_visible_container(&self) -> Option<&Arc<NavContainerState>> {
        match self {
            Self::TabIndexChanged {
                previous_visible_container,
            }
            | Self::ModalPresented {
                previous_visible_container,
            }
            | Self::ModalDismissed {
                previous_visible_container,
            } => Some(previous_visible_container),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::TabIndexChanged { .. } => "tab_index_changed",
            Self::ModalPresented { .. } => "modal_presented",
            Self::ModalDismissed { .. } => "modal_dismissed",
            Self::RootContainerChanged => "root_container_changed",
            Self::NavViewPushed => "nav_view_pushed",
            Self::NavViewPopped => "nav_view_popped",
            Self::NavViewReplaced => "nav_view_replaced",
            Self::HiddenUpdate => "hidden_update",
            Self::AppContextChanged { .. } => "app_context_changed",
        }
    }
}
