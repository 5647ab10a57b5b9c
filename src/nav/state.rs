//! State for the navigation tree.
//!
//! The tree is persistent: nested containers live behind `Arc`, so a
//! reduction step copies only the path from the root to the node it edits
//! and shares every sibling subtree with the previous snapshot.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::mvi::State;

/// Construction-time invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Nav container '{tag}' must hold at least one view")]
    EmptyNavStack { tag: String },

    #[error("Tab container '{tag}' must hold at least one child")]
    EmptyTabContainer { tag: String },

    #[error("Tab container '{tag}' selected index {index} is out of range (children: {len})")]
    SelectedIndexOutOfRange {
        tag: String,
        index: usize,
        len: usize,
    },

    #[error("Container tag '{tag}' appears more than once in the tree")]
    DuplicateTag { tag: String },
}

/// Opaque leaf record held on a navigation stack.
///
/// The core never inspects the payload; leaves are only compared by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactorViewState {
    key: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

impl ReactorViewState {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            payload: Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

/// A back-stack of leaves. The last element is the visible one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNavContainer")]
pub struct NavContainerState {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal: Option<Arc<NavContainerState>>,
    view_states: Vec<ReactorViewState>,
}

#[derive(Deserialize)]
struct RawNavContainer {
    tag: String,
    #[serde(default)]
    modal: Option<NavContainerState>,
    view_states: Vec<ReactorViewState>,
}

impl TryFrom<RawNavContainer> for NavContainerState {
    type Error = TreeError;

    fn try_from(raw: RawNavContainer) -> Result<Self, Self::Error> {
        let nav = NavContainerState::new(raw.tag, raw.view_states)?;
        match raw.modal {
            Some(modal) => nav.with_modal(modal),
            None => Ok(nav),
        }
    }
}

impl NavContainerState {
    /// Create a nav container. Fails if `view_states` is empty.
    pub fn new(
        tag: impl Into<String>,
        view_states: Vec<ReactorViewState>,
    ) -> Result<Self, TreeError> {
        let tag = tag.into();
        if view_states.is_empty() {
            return Err(TreeError::EmptyNavStack { tag });
        }
        Ok(Self {
            tag,
            parent_tag: None,
            modal: None,
            view_states,
        })
    }

    /// Attach a modal overlay, stamping its parent back-reference.
    pub fn with_modal(mut self, mut modal: NavContainerState) -> Result<Self, TreeError> {
        modal.parent_tag = Some(self.tag.clone());
        self.modal = Some(Arc::new(modal));
        collect_nav_tags(&self, &mut HashSet::new())?;
        Ok(self)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag.as_deref()
    }

    pub fn modal(&self) -> Option<&Arc<NavContainerState>> {
        self.modal.as_ref()
    }

    pub fn view_states(&self) -> &[ReactorViewState] {
        &self.view_states
    }

    /// The top (visible) leaf of the stack.
    pub fn top(&self) -> &ReactorViewState {
        // Non-empty: enforced by every constructor and mutator.
        &self.view_states[self.view_states.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.view_states.len()
    }

    pub(crate) fn set_parent_tag(&mut self, parent_tag: Option<String>) {
        self.parent_tag = parent_tag;
    }

    pub(crate) fn set_modal(&mut self, modal: Option<Arc<NavContainerState>>) {
        self.modal = modal;
    }

    pub(crate) fn push_view(&mut self, view: ReactorViewState) {
        self.view_states.push(view);
    }

    /// Drop the top leaf. Refuses to empty the stack.
    pub(crate) fn pop_view(&mut self) -> bool {
        if self.view_states.len() <= 1 {
            return false;
        }
        self.view_states.pop();
        true
    }

    pub(crate) fn truncate_views(&mut self, len: usize) {
        self.view_states.truncate(len.max(1));
    }

    pub(crate) fn replace_top(&mut self, view: ReactorViewState) {
        self.view_states.pop();
        self.view_states.push(view);
    }

    pub(crate) fn replace_views(&mut self, views: Vec<ReactorViewState>) {
        if !views.is_empty() {
            self.view_states = views;
        }
    }
}

/// A tab switcher: an ordered set of nav containers with one selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTabContainer")]
pub struct TabContainerState {
    tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modal: Option<Arc<NavContainerState>>,
    children: Vec<Arc<NavContainerState>>,
    selected_index: usize,
}

#[derive(Deserialize)]
struct RawTabContainer {
    tag: String,
    #[serde(default)]
    modal: Option<NavContainerState>,
    children: Vec<NavContainerState>,
    #[serde(default)]
    selected_index: usize,
}

impl TryFrom<RawTabContainer> for TabContainerState {
    type Error = TreeError;

    fn try_from(raw: RawTabContainer) -> Result<Self, Self::Error> {
        let tab = TabContainerState::new(raw.tag, raw.children, raw.selected_index)?;
        match raw.modal {
            Some(modal) => tab.with_modal(modal),
            None => Ok(tab),
        }
    }
}

impl TabContainerState {
    /// Create a tab container.
    ///
    /// Fails if there are no children, if `selected_index` is out of range,
    /// or if any tag repeats across the children's subtrees.
    pub fn new(
        tag: impl Into<String>,
        children: Vec<NavContainerState>,
        selected_index: usize,
    ) -> Result<Self, TreeError> {
        let tag = tag.into();
        if children.is_empty() {
            return Err(TreeError::EmptyTabContainer { tag });
        }
        if selected_index >= children.len() {
            return Err(TreeError::SelectedIndexOutOfRange {
                tag,
                index: selected_index,
                len: children.len(),
            });
        }
        let children = children
            .into_iter()
            .map(|mut child| {
                child.parent_tag = Some(tag.clone());
                Arc::new(child)
            })
            .collect();
        let tab = Self {
            tag,
            parent_tag: None,
            modal: None,
            children,
            selected_index,
        };
        collect_tab_tags(&tab, &mut HashSet::new())?;
        Ok(tab)
    }

    /// Attach a modal overlay, stamping its parent back-reference.
    pub fn with_modal(mut self, mut modal: NavContainerState) -> Result<Self, TreeError> {
        modal.parent_tag = Some(self.tag.clone());
        self.modal = Some(Arc::new(modal));
        collect_tab_tags(&self, &mut HashSet::new())?;
        Ok(self)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent_tag(&self) -> Option<&str> {
        self.parent_tag.as_deref()
    }

    pub fn modal(&self) -> Option<&Arc<NavContainerState>> {
        self.modal.as_ref()
    }

    pub fn children(&self) -> &[Arc<NavContainerState>] {
        &self.children
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_child(&self) -> &Arc<NavContainerState> {
        // In range: enforced by `new` and `set_selected_index`.
        &self.children[self.selected_index]
    }

    pub(crate) fn set_modal(&mut self, modal: Option<Arc<NavContainerState>>) {
        self.modal = modal;
    }

    pub(crate) fn set_selected_index(&mut self, index: usize) -> bool {
        if index >= self.children.len() {
            return false;
        }
        self.selected_index = index;
        true
    }

    pub(crate) fn replace_child(&mut self, index: usize, child: Arc<NavContainerState>) {
        if let Some(slot) = self.children.get_mut(index) {
            *slot = child;
        }
    }
}

/// A node of the navigation tree: either a tab switcher or a nav stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewContainerState {
    Tab(Arc<TabContainerState>),
    Nav(Arc<NavContainerState>),
}

impl ViewContainerState {
    pub fn tag(&self) -> &str {
        match self {
            Self::Tab(tab) => tab.tag(),
            Self::Nav(nav) => nav.tag(),
        }
    }

    pub fn parent_tag(&self) -> Option<&str> {
        match self {
            Self::Tab(tab) => tab.parent_tag(),
            Self::Nav(nav) => nav.parent_tag(),
        }
    }

    pub fn modal(&self) -> Option<&Arc<NavContainerState>> {
        match self {
            Self::Tab(tab) => tab.modal(),
            Self::Nav(nav) => nav.modal(),
        }
    }

    pub fn as_nav(&self) -> Option<&Arc<NavContainerState>> {
        match self {
            Self::Nav(nav) => Some(nav),
            Self::Tab(_) => None,
        }
    }

    pub fn as_tab(&self) -> Option<&Arc<TabContainerState>> {
        match self {
            Self::Tab(tab) => Some(tab),
            Self::Nav(_) => None,
        }
    }

    /// Every tag in this subtree, in search order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags = Vec::new();
        match self {
            Self::Tab(tab) => {
                tags.push(tab.tag());
                if let Some(modal) = tab.modal() {
                    push_nav_tags(modal, &mut tags);
                }
                for child in tab.children() {
                    push_nav_tags(child, &mut tags);
                }
            }
            Self::Nav(nav) => push_nav_tags(nav, &mut tags),
        }
        tags
    }
}

impl From<NavContainerState> for ViewContainerState {
    fn from(nav: NavContainerState) -> Self {
        Self::Nav(Arc::new(nav))
    }
}

impl From<TabContainerState> for ViewContainerState {
    fn from(tab: TabContainerState) -> Self {
        Self::Tab(Arc::new(tab))
    }
}

impl From<Arc<NavContainerState>> for ViewContainerState {
    fn from(nav: Arc<NavContainerState>) -> Self {
        Self::Nav(nav)
    }
}

/// Root aggregate owned by the navigation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    root_view_container: ViewContainerState,
    #[serde(default)]
    app_in_foreground: bool,
}

impl State for NavigationState {}

impl NavigationState {
    /// Create a state in the background; the host reports foreground
    /// through `AppContextChanged`.
    pub fn new(root: impl Into<ViewContainerState>) -> Self {
        Self {
            root_view_container: root.into(),
            app_in_foreground: false,
        }
    }

    pub fn with_app_in_foreground(mut self, in_foreground: bool) -> Self {
        self.app_in_foreground = in_foreground;
        self
    }

    pub fn with_root(mut self, root: ViewContainerState) -> Self {
        self.root_view_container = root;
        self
    }

    pub fn root_view_container(&self) -> &ViewContainerState {
        &self.root_view_container
    }

    pub fn app_in_foreground(&self) -> bool {
        self.app_in_foreground
    }
}

/// Fails with the first repeated tag in `root`.
pub(crate) fn ensure_unique_tags(root: &ViewContainerState) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    match root {
        ViewContainerState::Tab(tab) => collect_tab_tags(tab, &mut seen),
        ViewContainerState::Nav(nav) => collect_nav_tags(nav, &mut seen),
    }
}

fn push_nav_tags<'a>(nav: &'a NavContainerState, tags: &mut Vec<&'a str>) {
    tags.push(nav.tag());
    if let Some(modal) = nav.modal() {
        push_nav_tags(modal, tags);
    }
}

fn insert_tag<'a>(tag: &'a str, seen: &mut HashSet<&'a str>) -> Result<(), TreeError> {
    if seen.insert(tag) {
        Ok(())
    } else {
        Err(TreeError::DuplicateTag {
            tag: tag.to_string(),
        })
    }
}

fn collect_nav_tags<'a>(
    nav: &'a NavContainerState,
    seen: &mut HashSet<&'a str>,
) -> Result<(), TreeError> {
    insert_tag(nav.tag(), seen)?;
    match nav.modal() {
        Some(modal) => collect_nav_tags(modal, seen),
        None => Ok(()),
    }
}

fn collect_tab_tags<'a>(
    tab: &'a TabContainerState,
    seen: &mut HashSet<&'a str>,
) -> Result<(), TreeError> {
    insert_tag(tab.tag(), seen)?;
    if let Some(modal) = tab.modal() {
        collect_nav_tags(modal, seen)?;
    }
    for child in tab.children() {
        collect_nav_tags(child, seen)?;
    }
    Ok(())
}
