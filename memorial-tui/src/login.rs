//! Sign-in form.

use memorial_lib::auth::Credentials;
use memorial_lib::error::AuthError;
use memorial_lib::error::Error;

use crate::input::TextEdit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Email and password fields plus the last sign-in error.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the form with a message, e.g. after the session expired.
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Password shown as bullets.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Applies an edit. Returns credentials when the form is submitted with
    /// both fields filled.
    pub fn edit(&mut self, edit: TextEdit) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        match edit {
            TextEdit::Insert(c) => self.focused_mut().push(c),
            TextEdit::Backspace => {
                self.focused_mut().pop();
            }
            TextEdit::Next => {
                self.focus = match self.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            TextEdit::Cancel => {
                self.focused_mut().clear();
                self.error = None;
            }
            TextEdit::Submit => return self.submit(),
        }
        None
    }

    fn submit(&mut self) -> Option<Credentials> {
        let email = self.email.trim();
        if email.is_empty() {
            self.error = Some("Email is required".into());
            self.focus = LoginField::Email;
            return None;
        }
        if self.password.is_empty() {
            self.error = Some("Password is required".into());
            self.focus = LoginField::Password;
            return None;
        }

        self.error = None;
        self.submitting = true;
        Some(Credentials::new(email, self.password.clone()))
    }

    /// Records a failed sign-in. The password is cleared.
    pub fn fail(&mut self, err: &Error) {
        self.submitting = false;
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = Some(match err {
            Error::Auth(AuthError::InvalidCredentials) => "Invalid email or password".to_string(),
            other => other.to_string(),
        });
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}
