//! Sidebar shell state: persistence, keyboard shortcuts, and navigation entries.
//!
//! # Design
//! - The sidebar is a single boolean; every input is a [`ShellCommand`].
//! - Stored values are `"1"`/`"0"`; the older `"true"`/`"false"` spelling is read too.

use std::rc::Rc;

use triupact_core::guard::HOME_ROUTE;
use triupact_core::resources::Resource;
use yew::functional::Reducible;

/// Storage key for the sidebar open flag.
pub const SIDEBAR_KEY: &str = "sidebar:open";
/// Media query that counts as a desktop viewport.
pub const DESKTOP_QUERY: &str = "(min-width: 1024px)";
/// Confirmation text shown before signing out.
pub const SIGN_OUT_PROMPT: &str = "Sign out of TriupAct?";

/// Input that can change the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Close unconditionally (Escape, backdrop click).
    Close,
    /// Flip the current state (Ctrl/Cmd+B, menu button).
    Toggle,
    /// A route change; closes the drawer on narrow viewports only.
    Navigated {
        /// Whether the viewport matches [`DESKTOP_QUERY`].
        desktop: bool,
    },
}

impl ShellCommand {
    /// Map a key press to a command.
    #[must_use]
    pub fn from_key(key: &str, ctrl: bool, meta: bool) -> Option<Self> {
        if key == "Escape" {
            return Some(Self::Close);
        }
        if (ctrl || meta) && key.eq_ignore_ascii_case("b") {
            return Some(Self::Toggle);
        }
        None
    }

    /// `true` when the browser default for the key must be suppressed.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::Toggle)
    }
}

/// Sidebar open/closed state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    /// Whether the sidebar is expanded.
    pub open: bool,
}

impl SidebarState {
    /// Restore from storage, defaulting to open on desktop.
    #[must_use]
    pub fn restore(stored: Option<&str>, desktop: bool) -> Self {
        let open = match stored.map(str::trim) {
            Some("1" | "true") => true,
            Some("0" | "false") => false,
            _ => desktop,
        };
        Self { open }
    }

    /// Value written under [`SIDEBAR_KEY`].
    #[must_use]
    pub const fn stored_value(self) -> &'static str {
        if self.open { "1" } else { "0" }
    }

    /// State after `command`.
    #[must_use]
    pub const fn apply(self, command: ShellCommand) -> Self {
        let open = match command {
            ShellCommand::Close => false,
            ShellCommand::Toggle => !self.open,
            ShellCommand::Navigated { desktop } => self.open && desktop,
        };
        Self { open }
    }
}

impl Reducible for SidebarState {
    type Action = ShellCommand;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = self.apply(action);
        if next == *self { self } else { Rc::new(next) }
    }
}

/// What a navigation entry points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// Dashboard overview.
    Dashboard,
    /// One list resource.
    Resource(Resource),
}

/// One sidebar link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Link text.
    pub label: &'static str,
    /// Front-end path.
    pub path: String,
    /// Destination.
    pub target: NavTarget,
}

/// Sidebar links: the dashboard, then every resource in catalogue order.
#[must_use]
pub fn nav_entries() -> Vec<NavEntry> {
    let mut entries = vec![NavEntry {
        label: "Dashboard",
        path: HOME_ROUTE.to_string(),
        target: NavTarget::Dashboard,
    }];
    entries.extend(Resource::ALL.into_iter().map(|resource| NavEntry {
        label: resource.spec().title,
        path: resource.route(),
        target: NavTarget::Resource(resource),
    }));
    entries
}

/// Index of the entry that owns `path`, preferring the longest match.
#[must_use]
pub fn active_entry(entries: &[NavEntry], path: &str) -> Option<usize> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            path.strip_prefix(entry.path.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
        .max_by_key(|(_, entry)| entry.path.len())
        .map(|(index, _)| index)
}
