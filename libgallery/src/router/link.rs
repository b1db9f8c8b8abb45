//! Link activations
//!
//! Views never navigate directly. They report the link the user activated
//! and the router decides whether it is an in-app navigation.

use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
}

/// One activation of a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClick {
    pub href: String,
    /// Target browsing context; any target opts out of in-app handling
    pub target: Option<String>,
    pub button: MouseButton,
}

impl LinkClick {
    /// Plain primary activation of `href`
    pub fn primary(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: None,
            button: MouseButton::Primary,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// Decide whether `click` is an in-app navigation and return its path
///
/// Relative hrefs resolve against `origin`. Only primary activations with no
/// target and the same origin qualify; the query and fragment are dropped.
pub fn intercept_link(origin: &Url, click: &LinkClick) -> Option<String> {
    if click.button != MouseButton::Primary {
        return None;
    }
    if click.target.as_deref().is_some_and(|target| !target.is_empty()) {
        return None;
    }

    let url = origin.join(&click.href).ok()?;
    if url.origin() != origin.origin() {
        return None;
    }
    Some(url.path().to_string())
}
