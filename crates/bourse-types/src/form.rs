use crate::failure::{ApiFailure, FieldErrors};
use crate::validation::FormModel;

/// Local state of one modal form: the values being edited, the values the
/// form resets to, per-field errors and the submission flag.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<M> {
    initial: M,
    values: M,
    errors: FieldErrors,
    general: Option<String>,
    submitting: bool,
    open: bool,
}

impl<M: FormModel> FormState<M> {
    pub fn new(initial: M) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            general: None,
            submitting: false,
            open: false,
        }
    }

    pub fn values(&self) -> &M {
        &self.values
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn general_error(&self) -> Option<&str> {
        self.general.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Applies a keystroke to one field and drops that field's stale error.
    pub fn edit(&mut self, field: &str, apply: impl FnOnce(&mut M)) {
        apply(&mut self.values);
        self.errors.remove(field);
    }

    /// Runs validation. Returns the request body to send, or `None` when the
    /// form is invalid or a submission is already in flight; in both cases
    /// nothing must be sent.
    pub fn begin_submit(&mut self) -> Option<M::Submission> {
        if self.submitting {
            return None;
        }
        match self.values.validate() {
            Ok(submission) => {
                self.errors.clear();
                self.general = None;
                self.submitting = true;
                Some(submission)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// The call succeeded: close and return to the initial values.
    pub fn succeed(&mut self) {
        self.submitting = false;
        self.open = false;
        self.values = self.initial.clone();
        self.errors.clear();
        self.general = None;
    }

    /// The call failed: stay open, keep what the user typed, show why.
    pub fn fail(&mut self, failure: ApiFailure) {
        self.submitting = false;
        if failure.has_field_errors() {
            self.errors.extend(failure.field_errors);
        } else {
            self.general = Some(failure.message);
        }
    }

    /// Closing without submitting discards edits. Ignored while a call is in
    /// flight; returns whether the form actually closed.
    pub fn close(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.open = false;
        self.values = self.initial.clone();
        self.errors.clear();
        self.general = None;
        true
    }

    /// Moves the reset point, e.g. after the edited entity was reloaded.
    pub fn rebase(&mut self, initial: M) {
        if !self.open {
            self.values = initial.clone();
        }
        self.initial = initial;
    }
}
