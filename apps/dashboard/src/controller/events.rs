//! UI/backend events and error modeling for the dashboard controller.

use client_core::{ClientError, DashboardSnapshot};

pub enum UiEvent {
    Info(String),
    ViewUpdated(DashboardSnapshot),
    /// Blocking message the user must acknowledge.
    Alert(String),
    Error(UiError),
}

impl UiEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Info(_) => "info",
            Self::ViewUpdated(_) => "view_updated",
            Self::Alert(_) => "alert",
            Self::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Refresh,
    Save,
    Delete,
}

impl UiErrorContext {
    pub fn label(self) -> &'static str {
        match self {
            Self::BackendStartup => "Startup",
            Self::Refresh => "Error fetching users",
            Self::Save => "Error saving user data",
            Self::Delete => "Error deleting user",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        let category = match err {
            err if err.is_transport() => UiErrorCategory::Transport,
            ClientError::InvalidBaseUrl { .. } => UiErrorCategory::Validation,
            ClientError::Http(_) => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Startup failures only reach the UI as text, so they are classified by wording.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("error sending request")
            || message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("dns")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("required")
            || message_lower.contains("invalid")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn banner_text(&self) -> String {
        let hint = match self.category {
            UiErrorCategory::Transport => " (is the users service running?)",
            _ => "",
        };
        format!("{}: {}{hint}", self.context.label(), self.message)
    }
}
