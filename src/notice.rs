use std::fmt;
use std::time::Duration;

/// How long a notice stays on screen, mirroring the platform toast lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLength {
    Short,
    Long,
}

impl NoticeLength {
    pub fn duration(&self) -> Duration {
        match self {
            NoticeLength::Short => Duration::from_millis(2000),
            NoticeLength::Long => Duration::from_millis(3500),
        }
    }
}

/// A transient, fire-and-forget message for the user. Nothing tracks whether it was seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub length: NoticeLength,
}

impl Notice {
    pub fn short(message: impl Into<String>) -> Self {
        Notice{message: message.into(), length: NoticeLength::Short}
    }

    pub fn long(message: impl Into<String>) -> Self {
        Notice{message: message.into(), length: NoticeLength::Long}
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {write!(f, "{}", self.message)}
}
