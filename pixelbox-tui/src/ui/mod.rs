//! Terminal presentation layer
//!
//! Pages render store snapshots and translate key presses into store calls.
//! Every handler returns a [`PageEvent`] so navigation and notifications
//! stay in one place (`App`).

pub mod app;
pub mod pages;
pub mod widgets;

pub use app::App;

use std::time::{Duration, Instant};

use crate::core::{AppContext, StoreError};

/// Navigable routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Store,
    SeriesDetail,
    Orders,
    OrderDetail,
    Inventory,
    Shows,
    Profile,
    Logs,
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Transient status-line notification
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

const NOTICE_TTL: Duration = Duration::from_secs(4);

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Error)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, NoticeKind::Info)
    }

    fn new(text: impl Into<String>, kind: NoticeKind) -> Self {
        Self {
            text: text.into(),
            kind,
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() > NOTICE_TTL
    }
}

/// Outcome of a page key handler or `on_enter`
pub enum PageEvent {
    None,
    Navigate(Route),
    Notice(Notice),
    NavigateNotice(Route, Notice),
    /// Session was invalidated; clear state and return to login
    ForceLogin(Notice),
    Quit,
}

/// Convert a store failure into the right page event: a 401 clears the
/// session and redirects to login, everything else becomes a notification
/// (server message verbatim when present, else the action fallback).
pub fn failure(ctx: &AppContext, err: StoreError, fallback: &str) -> PageEvent {
    if err.is_unauthorized() {
        ctx.session.force_logout();
        return PageEvent::ForceLogin(Notice::error("Session expired, please log in again"));
    }
    PageEvent::Notice(Notice::error(err.user_message(fallback)))
}
