// SPDX-License-Identifier: MPL-2.0
//! Processing status shown while long-running work happens.

/// Tag for the processing indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

impl ProcessingStatus {
    #[must_use]
    pub fn is_busy(self) -> bool {
        self == ProcessingStatus::Processing
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            ProcessingStatus::Idle => "idle",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Success => "success",
            ProcessingStatus::Error => "error",
        }
    }
}

/// User-facing status text, resolved to a localized string by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    ApplyingBackground { name: String },
    TryingOutfit { label: String },
    Done,
    AiFailed,
}

impl StatusMessage {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            StatusMessage::ApplyingBackground { .. } => "status-applying-background",
            StatusMessage::TryingOutfit { .. } => "status-trying-outfit",
            StatusMessage::Done => "status-done",
            StatusMessage::AiFailed => "status-ai-failed",
        }
    }

    /// Named arguments for the localized message.
    #[must_use]
    pub fn args(&self) -> Vec<(&'static str, &str)> {
        match self {
            StatusMessage::ApplyingBackground { name } => vec![("name", name.as_str())],
            StatusMessage::TryingOutfit { label } => vec![("label", label.as_str())],
            StatusMessage::Done | StatusMessage::AiFailed => Vec::new(),
        }
    }
}

/// Status tag plus the message that goes with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusLine {
    pub status: ProcessingStatus,
    pub message: Option<StatusMessage>,
}

impl StatusLine {
    #[must_use]
    pub fn new(status: ProcessingStatus, message: StatusMessage) -> Self {
        Self {
            status,
            message: Some(message),
        }
    }

    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_processing_is_busy() {
        assert!(ProcessingStatus::Processing.is_busy());
        assert!(!ProcessingStatus::Error.is_busy());
        assert!(!StatusLine::idle().status.is_busy());
    }

    #[test]
    fn messages_carry_their_arguments() {
        let msg = StatusMessage::TryingOutfit {
            label: "Navy Suit".into(),
        };
        assert_eq!(msg.i18n_key(), "status-trying-outfit");
        assert_eq!(msg.args(), vec![("label", "Navy Suit")]);
        assert!(StatusMessage::Done.args().is_empty());
    }
}
