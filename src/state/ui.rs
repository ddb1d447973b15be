//! Transient user feedback (toasts) shown above the routed views.
//!
//! DESIGN
//! ======
//! Workflows return `Notice` values instead of touching the UI; the view
//! that ran the workflow pushes them into `UiState`, which the notice bar
//! renders. This keeps the workflows testable without a DOM.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// Severity of a notice, mapped to a CSS modifier by the notice bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice--success",
            Self::Info => "notice--info",
            Self::Warning => "notice--warning",
            Self::Error => "notice--error",
        }
    }
}

/// One user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Oldest notices are dropped beyond this many.
pub const MAX_NOTICES: usize = 4;

/// Notices currently on screen, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UiState {
    pub notices: Vec<(u64, Notice)>,
    next_notice_id: u64,
}

impl UiState {
    /// Queue `notice` and return its id for later dismissal.
    pub fn notify(&mut self, notice: Notice) -> u64 {
        let id = self.next_notice_id;
        self.next_notice_id += 1;
        self.notices.push((id, notice));
        if self.notices.len() > MAX_NOTICES {
            let overflow = self.notices.len() - MAX_NOTICES;
            self.notices.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.notices.retain(|(notice_id, _)| *notice_id != id);
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.notices.last().map(|(_, notice)| notice)
    }
}
