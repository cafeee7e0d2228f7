//! UI state that is not part of the note data: open menus, dialogs, theme.

use crate::models::DEFAULT_SHARE_EXPIRY_HOURS;

/// Message shown for any failed share request.
pub const SHARE_FAILURE_MESSAGE: &str = "Failed to create share link. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Created {
        share_url: String,
        /// 0 means the link never expires.
        expiry_hours: i64,
    },
    Failed {
        message: String,
    },
}

impl ShareOutcome {
    pub fn failed() -> Self {
        ShareOutcome::Failed {
            message: SHARE_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Expiry line shown under a created link.
    pub fn expiry_text(&self) -> Option<String> {
        match self {
            ShareOutcome::Created { expiry_hours, .. } if *expiry_hours > 0 => {
                Some(format!("Expires in {} hours", expiry_hours))
            }
            ShareOutcome::Created { .. } => Some("Never expires".to_string()),
            ShareOutcome::Failed { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareModal {
    pub open: bool,
    pub expiry_hours: i64,
    pub result: Option<ShareOutcome>,
}

impl Default for ShareModal {
    fn default() -> Self {
        Self {
            open: false,
            expiry_hours: DEFAULT_SHARE_EXPIRY_HOURS,
            result: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub page_selector_open: bool,
    pub more_options_open: bool,
    pub about_open: bool,
    pub share: ShareModal,
    pub theme: Theme,
}

impl ViewState {
    pub fn toggle_page_selector(&mut self) {
        self.page_selector_open = !self.page_selector_open;
    }

    pub fn toggle_more_options(&mut self) {
        self.more_options_open = !self.more_options_open;
    }

    pub fn open_share(&mut self) {
        self.share = ShareModal {
            open: true,
            ..ShareModal::default()
        };
    }

    pub fn close_share(&mut self) {
        self.share.open = false;
    }

    pub fn open_about(&mut self) {
        self.about_open = true;
        self.more_options_open = false;
    }

    /// Escape closes every menu and dialog.
    pub fn escape(&mut self) {
        self.page_selector_open = false;
        self.more_options_open = false;
        self.share.open = false;
        self.about_open = false;
    }
}
