use crate::core::schema::{validate_setup_submission, FieldViolation};
use crate::domain::model::{FieldErrors, FormFields, SetupSubmission, FORM_ERROR_KEY};
use crate::domain::ports::SubmissionStore;
use serde::ser::{Serialize, SerializeStruct, Serializer};

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Result of one submission attempt.
///
/// Serializes as `{"success": true, "data": ...}` or `{"success": false, "errors": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted(SetupSubmission),
    Rejected(FieldErrors),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted(_))
    }

    pub fn data(&self) -> Option<&SetupSubmission> {
        match self {
            SubmissionOutcome::Accepted(submission) => Some(submission),
            SubmissionOutcome::Rejected(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmissionOutcome::Accepted(_) => None,
            SubmissionOutcome::Rejected(errors) => Some(errors),
        }
    }

    /// True when the rejection came from an internal failure rather than the input.
    pub fn is_form_error(&self) -> bool {
        self.errors()
            .is_some_and(|errors| errors.contains_key(FORM_ERROR_KEY))
    }

    /// The generic `_form` rejection used for internal failures.
    pub fn unexpected() -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(FORM_ERROR_KEY.to_string(), vec![UNEXPECTED_ERROR.to_string()]);
        SubmissionOutcome::Rejected(errors)
    }
}

impl Serialize for SubmissionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SubmissionOutcome", 2)?;
        match self {
            SubmissionOutcome::Accepted(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            SubmissionOutcome::Rejected(errors) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("errors", errors)?;
            }
        }
        state.end()
    }
}

/// Groups violations by field, keeping per-field message order.
pub fn group_violations(violations: &[FieldViolation]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for violation in violations {
        errors
            .entry(violation.field.to_string())
            .or_default()
            .push(violation.message.to_string());
    }
    errors
}

/// Server-side submission entry point.
///
/// Never returns an error: store failures become a `_form` rejection.
pub async fn submit_setup<St>(form: &FormFields, store: &St) -> SubmissionOutcome
where
    St: SubmissionStore + ?Sized,
{
    let submission = match validate_setup_submission(form) {
        Ok(submission) => submission,
        Err(violations) => {
            tracing::debug!("Submission rejected with {} violation(s)", violations.len());
            return SubmissionOutcome::Rejected(group_violations(&violations));
        }
    };

    if let Err(e) = store.record(&submission).await {
        tracing::error!(
            "❌ Failed to record submission (category: {:?}): {}",
            e.category(),
            e
        );
        return SubmissionOutcome::unexpected();
    }

    SubmissionOutcome::Accepted(submission)
}
