//! Contact entry for the login form
//!
//! The form has two mutually exclusive tabs (email / phone) but either one
//! satisfies the contact requirement. Classification is informational only:
//! any non-blank value is accepted, mirroring the permissive web form.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$").expect("phone pattern is valid"));

/// Minimum number of digits for a value to be treated as a phone number
const MIN_PHONE_DIGITS: usize = 7;

/// Which contact input is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactTab {
    #[default]
    Email,
    Phone,
}

impl ContactTab {
    pub fn toggle(self) -> Self {
        match self {
            ContactTab::Email => ContactTab::Phone,
            ContactTab::Phone => ContactTab::Email,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactTab::Email => "Email",
            ContactTab::Phone => "Phone",
        }
    }
}

/// A non-blank contact value with its best-guess kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contact {
    Email(String),
    Phone(String),
    /// Non-blank but neither shape matched (still accepted)
    Other(String),
}

impl Contact {
    /// Resolve the contact the form will use: email if non-blank, else phone
    pub fn resolve(email: &str, phone: &str) -> Option<Self> {
        Self::classify(email).or_else(|| Self::classify(phone))
    }

    /// Classify a raw input, `None` when blank
    pub fn classify(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        let digits = value.chars().filter(char::is_ascii_digit).count();
        let contact = if EMAIL_PATTERN.is_match(value) {
            Contact::Email(value.to_string())
        } else if PHONE_PATTERN.is_match(value) && digits >= MIN_PHONE_DIGITS {
            Contact::Phone(value.to_string())
        } else {
            Contact::Other(value.to_string())
        };
        Some(contact)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Contact::Email(v) | Contact::Phone(v) | Contact::Other(v) => v,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Contact::Email(_) => "email",
            Contact::Phone(_) => "phone",
            Contact::Other(_) => "contact",
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_email_and_phone() {
        assert_eq!(
            Contact::classify("a@b.com"),
            Some(Contact::Email("a@b.com".to_string()))
        );
        assert_eq!(
            Contact::classify("+91 98765-43210"),
            Some(Contact::Phone("+91 98765-43210".to_string()))
        );
        assert_eq!(
            Contact::classify("12345"),
            Some(Contact::Other("12345".to_string()))
        );
        assert_eq!(Contact::classify("   "), None);
    }

    #[test]
    fn resolve_prefers_email() {
        let contact = Contact::resolve("a@b.com", "9876543210").unwrap();
        assert_eq!(contact.kind(), "email");

        let contact = Contact::resolve("", "9876543210").unwrap();
        assert_eq!(contact.kind(), "phone");

        assert!(Contact::resolve(" ", "").is_none());
    }

    #[test]
    fn tab_toggles() {
        assert_eq!(ContactTab::default().toggle(), ContactTab::Phone);
        assert_eq!(ContactTab::Phone.toggle(), ContactTab::Email);
    }
}
