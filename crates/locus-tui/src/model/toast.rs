//! Transient notifications shown in the corner of the screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use locus_core::{Notice, NoticeKey};

/// How long a toast stays on screen unless configured otherwise.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(3);

/// At most this many toasts are kept; older ones are dropped first.
const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub level: ToastLevel,
    pub created: Instant,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl ToastState {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push_level(title.into(), description.into(), ToastLevel::Info);
    }

    pub fn warn(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.push_level(title.into(), description.into(), ToastLevel::Warning);
    }

    fn push_level(&mut self, title: String, description: String, level: ToastLevel) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            title,
            description,
            level,
            created: Instant::now(),
        });
    }

    /// Render a dispatcher notice into text and queue it.
    pub fn notify(&mut self, notice: &Notice, subject_name: Option<&str>) {
        let (title, description) = notice_text(notice, subject_name);
        let level = match notice.key {
            NoticeKey::NothingSelected => ToastLevel::Warning,
            _ => ToastLevel::Info,
        };
        self.push_level(title, description, level);
    }

    /// Drop toasts older than the lifetime, measured from `now`.
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|t| now.saturating_duration_since(t.created) < lifetime);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "location" } else { "locations" }
}

/// Title and description for a notice.
pub fn notice_text(notice: &Notice, subject_name: Option<&str>) -> (String, String) {
    let n = notice.affected_count;
    let subject = subject_name.unwrap_or("Location");
    match notice.key {
        NoticeKey::FavoritesAdded => (
            "Added to favorites".into(),
            format!("{subject} has been added to your favorites."),
        ),
        NoticeKey::FavoritesRemoved => (
            "Removed from favorites".into(),
            format!("{subject} has been removed from your favorites."),
        ),
        NoticeKey::BulkFavorited => (
            "Starred".into(),
            format!("{n} new {} added to your favorites.", plural(n)),
        ),
        NoticeKey::Deleted => ("Deleted".into(), format!("{n} {} deleted.", plural(n))),
        NoticeKey::EditRequested => (
            "Edit".into(),
            format!("Editing {n} {} is not available yet.", plural(n)),
        ),
        NoticeKey::Copied => (
            "Copied".into(),
            format!("{n} {} copied to the clipboard.", plural(n)),
        ),
        NoticeKey::ReportRequested => (
            "Report requested".into(),
            "Your report is being generated and will be available soon.".into(),
        ),
        NoticeKey::ReportOpened => ("Report".into(), format!("Opening the report for {subject}.")),
        NoticeKey::NothingSelected => (
            "Nothing selected".into(),
            "Select one or more locations first.".into(),
        ),
    }
}
