//! Signup form state and the reducer that drives it.
//!
//! The form is a plain value: every user action is a [`SignupEvent`] and
//! [`reduce`] maps `(form, event)` to the next form plus, for submits, a
//! [`SubmitOutcome`]. Rendering layers own a [`SignupForm`] and feed events
//! into it; nothing here knows about the DOM.

use n0_error::stack_error;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// Validation failure raised when the password and its confirmation differ.
///
/// The display text is shown verbatim as the form message.
#[stack_error(derive)]
#[error("Passwords must match")]
pub struct PasswordMismatch;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Field {
    FullName,
    Username,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::FullName,
        Field::Username,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Prefix used when building per-mount element ids, e.g. `fullname-3f2a…`.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Field::FullName => "fullname",
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Field::Password | Field::ConfirmPassword)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SignupEvent {
    /// The user replaced the text of one field.
    Input { field: Field, value: String },
    /// The user submitted the form.
    Submit,
}

impl SignupEvent {
    pub fn input(field: Field, value: impl Into<String>) -> Self {
        SignupEvent::Input {
            field,
            value: value.into(),
        }
    }
}

/// Local state of the signup form for the lifetime of one mount.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SignupForm {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    message: String,
}

impl SignupForm {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FullName => &mut self.full_name,
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
        }
    }

    /// The current form message, or `None` while it is empty.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    /// Applies `event` in place. Returns the submit outcome for
    /// [`SignupEvent::Submit`] and `None` for field edits.
    pub fn apply(&mut self, event: SignupEvent) -> Option<SubmitOutcome> {
        match event {
            SignupEvent::Input { field, value } => {
                *self.field_mut(field) = value;
                None
            }
            SignupEvent::Submit => Some(self.submit()),
        }
    }

    fn submit(&mut self) -> SubmitOutcome {
        self.message.clear();
        if self.password != self.confirm_password {
            let err = PasswordMismatch;
            self.message = err.to_string();
            return SubmitOutcome::Rejected(err);
        }
        SubmitOutcome::Accepted(Submission {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            password: SecretString::new(self.password.clone().into_boxed_str()),
            confirm_password: SecretString::new(self.confirm_password.clone().into_boxed_str()),
        })
    }
}

/// Pure form of [`SignupForm::apply`].
pub fn reduce(mut form: SignupForm, event: SignupEvent) -> (SignupForm, Option<SubmitOutcome>) {
    let outcome = form.apply(event);
    (form, outcome)
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; the form message has been set and nothing is handed off.
    Rejected(PasswordMismatch),
    /// Validation passed; the submission must be handed off exactly once.
    Accepted(Submission),
}

/// The validated field values at the moment of submit.
#[derive(Debug)]
pub struct Submission {
    pub full_name: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Submission {
    /// The account-creation payload. The confirmation never leaves the client.
    pub fn registration(&self) -> Registration {
        Registration {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            password: SecretString::new(self.password.expose_secret().into()),
        }
    }
}

#[derive(Debug)]
pub struct Registration {
    pub full_name: String,
    pub username: String,
    pub password: SecretString,
}

impl Registration {
    pub(crate) fn body(&self) -> RegistrationBody<'_> {
        RegistrationBody {
            full_name: &self.full_name,
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct RegistrationBody<'a> {
    full_name: &'a str,
    username: &'a str,
    password: &'a str,
}
