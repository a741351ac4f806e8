//! Transient status messages.

use std::time::Duration;
use std::time::Instant;

/// Default duration for toast notifications.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

/// How a toast is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// How long to show the toast.
    pub duration: Duration,
}

impl Toast {
    /// Create an info toast with neutral styling.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Info, message)
    }

    /// Create a success toast with green accent.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Success, message)
    }

    /// Create an error toast with red accent.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastLevel::Error, message)
    }

    fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Set a custom duration for this toast.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Default)]
pub struct ToastQueue {
    active: Vec<(Toast, Instant)>,
}

impl ToastQueue {
    pub fn push(&mut self, toast: Toast) {
        match toast.level {
            ToastLevel::Error => log::warn!("Toast: {}", toast.message),
            _ => log::debug!("Toast: {}", toast.message),
        }
        self.active.push((toast, Instant::now()));
    }

    /// Drops expired toasts. Returns `true` if any were removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let before = self.active.len();
        self.active
            .retain(|(toast, shown)| now.duration_since(*shown) < toast.duration);
        self.active.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|(toast, _)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
