//! Contact form state and `mailto:` link composition

use thiserror::Error;

/// Default recipient for contact messages
pub const DEFAULT_CONTACT_EMAIL: &str = "hello@skycast.dev";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    /// A required field was left blank
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
}

/// Input field of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactField {
    #[default]
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn label(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ContactField::Name => ContactField::Email,
            ContactField::Email => ContactField::Message,
            ContactField::Message => ContactField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            ContactField::Name => ContactField::Message,
            ContactField::Email => ContactField::Name,
            ContactField::Message => ContactField::Email,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    pub focus: ContactField,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.focused_mut().pop();
    }

    /// Appends a line break to the message field
    pub fn newline(&mut self) {
        if self.focus == ContactField::Message {
            self.message.push('\n');
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Builds the `mailto:` link addressed to `recipient`.
    ///
    /// All three fields are required.
    pub fn mailto_link(&self, recipient: &str) -> Result<String, ContactError> {
        for field in [ContactField::Name, ContactField::Email, ContactField::Message] {
            if self.field(field).trim().is_empty() {
                return Err(ContactError::MissingField(field.label()));
            }
        }

        let subject = format!("Weather App Inquiry from {}", self.name);
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        );

        Ok(format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        ))
    }
}
