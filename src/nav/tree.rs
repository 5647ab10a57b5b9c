//! Pure queries over the navigation tree and path-copy updates.
//!
//! Search order is: the node itself, then its modal subtree, then (for tab
//! containers) each child in order. Visibility resolves modal first, then
//! the selected tab, then the node itself.

use std::sync::Arc;

use super::state::{NavContainerState, ReactorViewState, TabContainerState, ViewContainerState};

/// One edge on the way down from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Modal,
    Child(usize),
}

/// Mutable access to the single node a reduction edits.
pub(crate) enum ContainerMut<'a> {
    Tab(&'a mut TabContainerState),
    Nav(&'a mut NavContainerState),
}

impl ContainerMut<'_> {
    fn set_modal(&mut self, modal: Option<Arc<NavContainerState>>) {
        match self {
            Self::Tab(tab) => tab.set_modal(modal),
            Self::Nav(nav) => nav.set_modal(modal),
        }
    }
}

/// Depth-first search for the container carrying `tag`.
pub fn find_substate_with_tag(root: &ViewContainerState, tag: &str) -> Option<ViewContainerState> {
    let path = path_to(root, tag)?;
    let Some((first, rest)) = path.split_first() else {
        return Some(root.clone());
    };
    let mut node = match (root, first) {
        (_, Step::Modal) => root.modal()?,
        (ViewContainerState::Tab(tab), Step::Child(index)) => tab.children().get(*index)?,
        (ViewContainerState::Nav(_), Step::Child(_)) => return None,
    };
    for step in rest {
        node = match step {
            Step::Modal => node.modal()?,
            Step::Child(_) => return None,
        };
    }
    Some(ViewContainerState::Nav(Arc::clone(node)))
}

/// The nav container currently on screen.
pub fn find_visible_container(root: &ViewContainerState) -> Option<&Arc<NavContainerState>> {
    match root {
        ViewContainerState::Nav(nav) => Some(visible_in_nav(nav)),
        ViewContainerState::Tab(tab) => match tab.modal() {
            Some(modal) => Some(visible_in_nav(modal)),
            None => tab.children().get(tab.selected_index()).map(visible_in_nav),
        },
    }
}

/// The top leaf of the visible container.
pub fn find_visible_view(root: &ViewContainerState) -> Option<&ReactorViewState> {
    find_visible_container(root).map(|container| container.top())
}

fn visible_in_nav(nav: &Arc<NavContainerState>) -> &Arc<NavContainerState> {
    match nav.modal() {
        Some(modal) => visible_in_nav(modal),
        None => nav,
    }
}

fn path_to(root: &ViewContainerState, tag: &str) -> Option<Vec<Step>> {
    let mut path = Vec::new();
    let found = match root {
        ViewContainerState::Nav(nav) => nav_path(nav, tag, &mut path),
        ViewContainerState::Tab(tab) => {
            tab.tag() == tag
                || descend(tab.modal(), Step::Modal, tag, &mut path)
                || tab
                    .children()
                    .iter()
                    .enumerate()
                    .any(|(index, child)| descend(Some(child), Step::Child(index), tag, &mut path))
        }
    };
    found.then_some(path)
}

fn nav_path(nav: &NavContainerState, tag: &str, path: &mut Vec<Step>) -> bool {
    nav.tag() == tag || descend(nav.modal(), Step::Modal, tag, path)
}

fn descend(
    node: Option<&Arc<NavContainerState>>,
    step: Step,
    tag: &str,
    path: &mut Vec<Step>,
) -> bool {
    let Some(node) = node else {
        return false;
    };
    path.push(step);
    if nav_path(node, tag, path) {
        return true;
    }
    path.pop();
    false
}

/// Copy the path from `root` to the container tagged `tag` and apply `edit`
/// to the copy. Siblings are shared with the input tree.
///
/// Returns `None` if no container carries `tag`.
fn update_container<F>(root: &ViewContainerState, tag: &str, edit: F) -> Option<ViewContainerState>
where
    F: FnOnce(ContainerMut<'_>),
{
    let path = path_to(root, tag)?;
    let updated = match root {
        ViewContainerState::Nav(nav) => ViewContainerState::Nav(rebuild_nav(nav, &path, edit)),
        ViewContainerState::Tab(tab) => {
            let mut tab = Arc::clone(tab);
            let inner = Arc::make_mut(&mut tab);
            match path.split_first() {
                None => edit(ContainerMut::Tab(inner)),
                Some((Step::Modal, rest)) => {
                    let modal = inner.modal().map(|modal| rebuild_nav(modal, rest, edit));
                    if modal.is_some() {
                        inner.set_modal(modal);
                    }
                }
                Some((Step::Child(index), rest)) => {
                    let index = *index;
                    let child = inner
                        .children()
                        .get(index)
                        .map(|child| rebuild_nav(child, rest, edit));
                    if let Some(child) = child {
                        inner.replace_child(index, child);
                    }
                }
            }
            ViewContainerState::Tab(tab)
        }
    };
    Some(updated)
}

fn rebuild_nav<F>(nav: &Arc<NavContainerState>, path: &[Step], edit: F) -> Arc<NavContainerState>
where
    F: FnOnce(ContainerMut<'_>),
{
    let mut nav = Arc::clone(nav);
    let inner = Arc::make_mut(&mut nav);
    match path.split_first() {
        None => edit(ContainerMut::Nav(inner)),
        Some((Step::Modal, rest)) => {
            let modal = inner.modal().map(|modal| rebuild_nav(modal, rest, edit));
            if modal.is_some() {
                inner.set_modal(modal);
            }
        }
        // Nav containers have no children; paths never take this edge.
        Some((Step::Child(_), _)) => {}
    }
    nav
}

/// Path-copy update of a nav container. Ignores tab containers.
pub(crate) fn update_nav<F>(
    root: &ViewContainerState,
    tag: &str,
    edit: F,
) -> Option<ViewContainerState>
where
    F: FnOnce(&mut NavContainerState),
{
    update_container(root, tag, |container| {
        if let ContainerMut::Nav(nav) = container {
            edit(nav);
        }
    })
}

/// Path-copy update of a tab container. Ignores nav containers.
pub(crate) fn update_tab<F>(
    root: &ViewContainerState,
    tag: &str,
    edit: F,
) -> Option<ViewContainerState>
where
    F: FnOnce(&mut TabContainerState),
{
    update_container(root, tag, |container| {
        if let ContainerMut::Tab(tab) = container {
            edit(tab);
        }
    })
}

/// Path-copy replacement of the modal hosted by any container variant.
pub(crate) fn update_modal(
    root: &ViewContainerState,
    tag: &str,
    modal: Option<Arc<NavContainerState>>,
) -> Option<ViewContainerState> {
    update_container(root, tag, |mut container| container.set_modal(modal))
}
