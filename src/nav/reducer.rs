//! Reducer for the navigation tree.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::mvi::Reducer;

use super::command::NavigationCommand;
use super::intent::NavigationEvent;
use super::state::{
    ensure_unique_tags, NavContainerState, NavigationState, ReactorViewState, ViewContainerState,
};
use super::tree;

/// Reducer for navigation tree transitions.
///
/// Pure and total: every event yields exactly one command. Events that no
/// longer apply (missing target, wrong container variant, stack floor)
/// leave the state untouched and yield `HiddenUpdate`.
pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type State = NavigationState;
    type Intent = NavigationEvent;
    type Command = NavigationCommand;

    fn reduce(state: Self::State, intent: Self::Intent) -> (Self::State, Vec<Self::Command>) {
        let kind = intent.kind();
        let (state, command) = match intent {
            NavigationEvent::AppContextChanged { in_foreground } => (
                state.with_app_in_foreground(in_foreground),
                NavigationCommand::AppContextChanged { in_foreground },
            ),
            NavigationEvent::ReplaceRootContainer { container } => {
                (state.with_root(container), NavigationCommand::RootContainerChanged)
            }
            targeted => reduce_targeted(state, targeted),
        };
        debug!(event = kind, command = command.kind(), "Navigation event reduced");
        (state, vec![command])
    }
}

/// Snapshot taken before a targeted mutation.
struct Prologue {
    target: ViewContainerState,
    old_visible_container: Option<Arc<NavContainerState>>,
    old_visible_view: Option<ReactorViewState>,
    updating_current_container: bool,
}

impl Prologue {
    fn capture(state: &NavigationState, tag: &str) -> Option<Self> {
        let root = state.root_view_container();
        let target = tree::find_substate_with_tag(root, tag)?;
        let old_visible_container = tree::find_visible_container(root).cloned();
        let old_visible_view = tree::find_visible_view(root).cloned();
        let updating_current_container = match (&target, &old_visible_container) {
            (ViewContainerState::Nav(target), Some(visible)) => Arc::ptr_eq(target, visible),
            _ => false,
        };
        Some(Self {
            target,
            old_visible_container,
            old_visible_view,
            updating_current_container,
        })
    }

    fn target_nav(&self) -> Option<&Arc<NavContainerState>> {
        self.target.as_nav()
    }

    /// `make` applied to the previous container if the visible container
    /// changed between the captured state and `next`, else `HiddenUpdate`.
    fn visibility_command<F>(&self, next: &NavigationState, make: F) -> NavigationCommand
    where
        F: FnOnce(Arc<NavContainerState>) -> NavigationCommand,
    {
        let new_visible = tree::find_visible_container(next.root_view_container());
        let changed = match (&self.old_visible_container, new_visible) {
            (Some(old), Some(new)) => !(Arc::ptr_eq(old, new) || old == new),
            (None, None) => false,
            _ => true,
        };
        match (&self.old_visible_container, changed) {
            (Some(old), true) => make(Arc::clone(old)),
            _ => NavigationCommand::HiddenUpdate,
        }
    }

    fn when_current(&self, command: NavigationCommand) -> NavigationCommand {
        if self.updating_current_container {
            command
        } else {
            NavigationCommand::HiddenUpdate
        }
    }
}

fn ignored(
    state: NavigationState,
    tag: &str,
    reason: &str,
) -> (NavigationState, NavigationCommand) {
    trace!(tag, reason, "Navigation event ignored");
    (state, NavigationCommand::HiddenUpdate)
}

fn commit(state: NavigationState, root: Option<ViewContainerState>) -> NavigationState {
    match root {
        Some(root) => state.with_root(root),
        None => state,
    }
}

fn reduce_targeted(
    state: NavigationState,
    event: NavigationEvent,
) -> (NavigationState, NavigationCommand) {
    let Some(tag) = event.target_tag().map(str::to_owned) else {
        return (state, NavigationCommand::HiddenUpdate);
    };
    let Some(prologue) = Prologue::capture(&state, &tag) else {
        return ignored(state, &tag, "target container not found");
    };

    match event {
        NavigationEvent::ChangeContainerIndex { index, .. } => {
            let Some(tab) = prologue.target.as_tab() else {
                return ignored(state, &tag, "target is not a tab container");
            };
            if index >= tab.children().len() {
                return ignored(state, &tag, "tab index out of range");
            }
            let root = tree::update_tab(state.root_view_container(), &tag, |tab| {
                tab.set_selected_index(index);
            });
            let next = commit(state, root);
            let command = prologue.visibility_command(&next, |previous_visible_container| {
                NavigationCommand::TabIndexChanged {
                    previous_visible_container,
                }
            });
            (next, command)
        }

        NavigationEvent::PresentModally { mut container, .. } => {
            container.set_parent_tag(Some(tag.clone()));
            let root = tree::update_modal(
                state.root_view_container(),
                &tag,
                Some(Arc::new(container)),
            );
            if let Some(Err(err)) = root.as_ref().map(ensure_unique_tags) {
                trace!(error = %err, "Modal rejected");
                return ignored(state, &tag, "modal would duplicate a container tag");
            }
            let next = commit(state, root);
            let command = prologue.visibility_command(&next, |previous_visible_container| {
                NavigationCommand::ModalPresented {
                    previous_visible_container,
                }
            });
            (next, command)
        }

        NavigationEvent::DismissModal { .. } => {
            if prologue.target.modal().is_none() {
                return ignored(state, &tag, "no modal to dismiss");
            }
            let root = tree::update_modal(state.root_view_container(), &tag, None);
            let next = commit(state, root);
            let command = prologue.visibility_command(&next, |previous_visible_container| {
                NavigationCommand::ModalDismissed {
                    previous_visible_container,
                }
            });
            (next, command)
        }

        NavigationEvent::PushNavView { view, .. } => {
            if prologue.target_nav().is_none() {
                return ignored(state, &tag, "target is not a nav container");
            }
            let root = tree::update_nav(state.root_view_container(), &tag, |nav| {
                nav.push_view(view);
            });
            let command = prologue.when_current(NavigationCommand::NavViewPushed);
            (commit(state, root), command)
        }

        NavigationEvent::PopNavView { .. } => {
            let Some(nav) = prologue.target_nav() else {
                return ignored(state, &tag, "target is not a nav container");
            };
            if nav.depth() <= 1 {
                return ignored(state, &tag, "nav stack already at its last view");
            }
            let root = tree::update_nav(state.root_view_container(), &tag, |nav| {
                nav.pop_view();
            });
            let command = prologue.when_current(NavigationCommand::NavViewPopped);
            (commit(state, root), command)
        }

        NavigationEvent::UnwindToView { view, .. } => {
            let Some(nav) = prologue.target_nav() else {
                return ignored(state, &tag, "target is not a nav container");
            };
            let len = match &view {
                Some(view) => match nav.view_states().iter().position(|v| v == view) {
                    Some(position) => position + 1,
                    None => return ignored(state, &tag, "unwind target not on the stack"),
                },
                None => 1,
            };
            if len >= nav.depth() {
                return ignored(state, &tag, "nav stack already at the unwind point");
            }
            let root = tree::update_nav(state.root_view_container(), &tag, |nav| {
                nav.truncate_views(len);
            });
            let next = commit(state, root);
            let new_visible_view = tree::find_visible_view(next.root_view_container());
            let command = if prologue.old_visible_view.as_ref() != new_visible_view {
                prologue.when_current(NavigationCommand::NavViewPopped)
            } else {
                NavigationCommand::HiddenUpdate
            };
            (next, command)
        }

        NavigationEvent::ReplaceNavView { view, .. } => {
            if prologue.target_nav().is_none() {
                return ignored(state, &tag, "target is not a nav container");
            }
            let root = tree::update_nav(state.root_view_container(), &tag, |nav| {
                nav.replace_top(view);
            });
            let command = prologue.when_current(NavigationCommand::NavViewReplaced);
            (commit(state, root), command)
        }

        NavigationEvent::ReplaceNavViewStack { views, .. } => {
            if prologue.target_nav().is_none() {
                return ignored(state, &tag, "target is not a nav container");
            }
            if views.is_empty() {
                return ignored(state, &tag, "replacement stack is empty");
            }
            let root = tree::update_nav(state.root_view_container(), &tag, |nav| {
                nav.replace_views(views);
            });
            // Stack replacement reuses the pop command.
            let command = prologue.when_current(NavigationCommand::NavViewPopped);
            (commit(state, root), command)
        }

        NavigationEvent::AppContextChanged { .. }
        | NavigationEvent::ReplaceRootContainer { .. } => (state, NavigationCommand::HiddenUpdate),
    }
}
