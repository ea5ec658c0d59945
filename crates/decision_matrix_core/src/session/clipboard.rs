//! Clipboard collaborator.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The facility does not exist in this environment.
    Unavailable,
    /// The facility exists but refused the write.
    Rejected(String),
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard is unavailable"),
            Self::Rejected(reason) => write!(f, "clipboard write rejected: {reason}"),
        }
    }
}

impl Error for ClipboardError {}

/// System clipboard access.
///
/// `write_text` is the primary facility; `copy_via_selection` is the
/// select-and-copy fallback and is unavailable unless overridden.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn copy_via_selection(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}

/// Copies `text`, falling back to the selection mechanism when the primary
/// facility fails. Returns whether either path succeeded.
pub fn copy_text<C: Clipboard + ?Sized>(clipboard: &mut C, text: &str) -> bool {
    let primary_err = match clipboard.write_text(text) {
        Ok(()) => {
            info!(
                "event=clipboard_copy module=session status=ok path=primary chars={}",
                text.chars().count()
            );
            return true;
        }
        Err(err) => err,
    };

    match clipboard.copy_via_selection(text) {
        Ok(()) => {
            info!(
                "event=clipboard_copy module=session status=ok path=fallback primary_error={}",
                primary_err
            );
            true
        }
        Err(fallback_err) => {
            warn!(
                "event=clipboard_copy module=session status=error primary_error={} fallback_error={}",
                primary_err, fallback_err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{copy_text, Clipboard, ClipboardError};

    #[derive(Default)]
    struct SelectionOnly {
        copied: Option<String>,
    }

    impl Clipboard for SelectionOnly {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Rejected("permission denied".to_string()))
        }

        fn copy_via_selection(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.copied = Some(text.to_string());
            Ok(())
        }
    }

    struct Nothing;

    impl Clipboard for Nothing {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable)
        }
    }

    #[test]
    fn falls_back_to_selection_copy() {
        let mut clipboard = SelectionOnly::default();
        assert!(copy_text(&mut clipboard, "link"));
        assert_eq!(clipboard.copied.as_deref(), Some("link"));
    }

    #[test]
    fn reports_failure_when_both_paths_fail() {
        assert!(!copy_text(&mut Nothing, "link"));
    }
}
