//! Shared tree builders and invariant checks.

#![allow(dead_code, unused_imports)]

use std::collections::HashSet;

use reactor_nav::nav::{
    NavContainerState, NavigationState, ReactorViewState, TabContainerState, ViewContainerState,
};

pub fn view(key: &str) -> ReactorViewState {
    ReactorViewState::new(key)
}

pub fn nav(tag: &str, keys: &[&str]) -> NavContainerState {
    NavContainerState::new(tag, keys.iter().map(|k| view(k)).collect())
        .expect("non-empty nav stack")
}

pub fn tabs(tag: &str, children: Vec<NavContainerState>, selected: usize) -> TabContainerState {
    TabContainerState::new(tag, children, selected).expect("valid tab container")
}

/// `TabContainer("tabs", [Nav("t0", [V0]), Nav("t1", [V1])], selected)`.
pub fn two_tabs(selected: usize) -> NavigationState {
    NavigationState::new(tabs(
        "tabs",
        vec![nav("t0", &["V0"]), nav("t1", &["V1"])],
        selected,
    ))
}

/// Panics if any structural invariant is violated.
pub fn assert_invariants(state: &NavigationState) {
    let root = state.root_view_container();
    let tags = root.tags();
    let unique: HashSet<_> = tags.iter().collect();
    assert_eq!(unique.len(), tags.len(), "duplicate tags in {tags:?}");

    match root {
        ViewContainerState::Tab(tab) => {
            assert!(!tab.children().is_empty());
            assert!(tab.selected_index() < tab.children().len());
            if let Some(modal) = tab.modal() {
                assert_nav_invariants(modal);
            }
            for child in tab.children() {
                assert_eq!(child.parent_tag(), Some(tab.tag()));
                assert_nav_invariants(child);
            }
        }
        ViewContainerState::Nav(nav) => assert_nav_invariants(nav),
    }
}

fn assert_nav_invariants(nav: &NavContainerState) {
    assert!(nav.depth() >= 1, "empty nav stack '{}'", nav.tag());
    if let Some(modal) = nav.modal() {
        assert_eq!(modal.parent_tag(), Some(nav.tag()));
        assert_nav_invariants(modal);
    }
}
