// SPDX-License-Identifier: MPL-2.0
//! Wizard steps and the transitions allowed between them.
//!
//! ```text
//! upload ──ImageLoaded──▶ edit ──Next──▶ print
//!    ▲                     │  ▲            │
//!    └───────Back──────────┘  └────Back────┤
//!    ▲                                     │
//!    └──────────Reset (confirmed)──────────┘
//! ```

use std::fmt;

/// Current screen of the wizard. `Upload` is the only entry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    #[default]
    Upload,
    Edit,
    Print,
}

impl WizardStep {
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            WizardStep::Upload => "upload",
            WizardStep::Edit => "edit",
            WizardStep::Print => "print",
        }
    }
}

/// User action that may move the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// A valid image was accepted.
    ImageLoaded,
    Back,
    Next,
    /// Start over. Callers confirm before sending this.
    Reset,
}

/// A transition not present in the step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: WizardStep,
    pub action: WizardAction,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot apply {:?} on the {} step", self.action, self.from.id())
    }
}

impl std::error::Error for InvalidTransition {}

/// Resolves the next step, or rejects the action.
///
/// # Errors
///
/// Returns [`InvalidTransition`] for any pair outside the step table.
pub fn transition(from: WizardStep, action: WizardAction) -> Result<WizardStep, InvalidTransition> {
    match (from, action) {
        (WizardStep::Upload, WizardAction::ImageLoaded) => Ok(WizardStep::Edit),
        (WizardStep::Edit, WizardAction::Back) | (WizardStep::Print, WizardAction::Reset) => {
            Ok(WizardStep::Upload)
        }
        (WizardStep::Edit, WizardAction::Next) => Ok(WizardStep::Print),
        (WizardStep::Print, WizardAction::Back) => Ok(WizardStep::Edit),
        _ => Err(InvalidTransition { from, action }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_moves_forward() {
        let step = transition(WizardStep::Upload, WizardAction::ImageLoaded).unwrap();
        assert_eq!(step, WizardStep::Edit);
        let step = transition(step, WizardAction::Next).unwrap();
        assert_eq!(step, WizardStep::Print);
    }

    #[test]
    fn back_steps_one_screen() {
        assert_eq!(
            transition(WizardStep::Print, WizardAction::Back),
            Ok(WizardStep::Edit)
        );
        assert_eq!(
            transition(WizardStep::Edit, WizardAction::Back),
            Ok(WizardStep::Upload)
        );
    }

    #[test]
    fn reset_only_from_print() {
        assert_eq!(
            transition(WizardStep::Print, WizardAction::Reset),
            Ok(WizardStep::Upload)
        );
        assert!(transition(WizardStep::Edit, WizardAction::Reset).is_err());
    }

    #[test]
    fn upload_has_no_back_or_next() {
        for action in [WizardAction::Back, WizardAction::Next, WizardAction::Reset] {
            let err = transition(WizardStep::Upload, action).unwrap_err();
            assert_eq!(err.from, WizardStep::Upload);
        }
    }

    #[test]
    fn image_loaded_outside_upload_is_rejected() {
        assert!(transition(WizardStep::Edit, WizardAction::ImageLoaded).is_err());
        assert!(transition(WizardStep::Print, WizardAction::ImageLoaded).is_err());
    }
}
