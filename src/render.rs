//! Rendering seam for leaf views.
//!
//! The navigation core never renders; hosts implement [`ViewRenderer`] for
//! their platform and feed it the leaves the core exposes.

use std::fmt::Write;

use crate::nav::{NavContainerState, ReactorViewState};

/// Turns a leaf record into something displayable for a platform context.
pub trait ViewRenderer {
    type Context;
    type Output;

    fn render(&self, view: &ReactorViewState, context: &Self::Context) -> Self::Output;
}

/// Context for [`TextRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TextContext {
    pub depth: usize,
    pub on_top: bool,
}

/// Plain-text renderer used by the CLI.
pub struct TextRenderer;

impl ViewRenderer for TextRenderer {
    type Context = TextContext;
    type Output = String;

    fn render(&self, view: &ReactorViewState, context: &Self::Context) -> String {
        let marker = if context.on_top { '*' } else { '-' };
        let mut line = format!("{}{} {}", "  ".repeat(context.depth), marker, view.key());
        if !view.payload().is_null() {
            let _ = write!(line, " {}", view.payload());
        }
        line
    }
}

impl TextRenderer {
    /// Render a whole stack, bottom first, marking the visible leaf.
    pub fn render_stack(&self, container: &NavContainerState) -> String {
        let mut out = format!("[{}]\n", container.tag());
        let last = container.depth() - 1;
        for (index, view) in container.view_states().iter().enumerate() {
            let context = TextContext {
                depth: 1,
                on_top: index == last,
            };
            out.push_str(&self.render(view, &context));
            out.push('\n');
        }
        out
    }
}
