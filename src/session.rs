// Session model - the authenticated identity held by the view router
//
// A Session is produced exactly once per successful login and is never
// mutated afterwards. Logout drops it and the router returns to mode
// selection. All invariants between user type and role are enforced by
// the single constructor, so holders can trust the value as-is.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain appended to a phone number when no email was entered
pub const PHONE_EMAIL_DOMAIN: &str = "phone.safeyatra.com";

// ─────────────────────────────────────────────────────────────────────────────
// Enumerations
// ─────────────────────────────────────────────────────────────────────────────

/// Which side of the platform the user is logging into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Mobile safety companion for pilgrims
    Pilgrim,
    /// Emergency response dashboard for officials
    Command,
}

impl UserType {
    pub const ALL: [UserType; 2] = [UserType::Pilgrim, UserType::Command];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Pilgrim => "pilgrim",
            UserType::Command => "command",
        }
    }

    /// Name shown on the mode selection cards
    pub fn label(&self) -> &'static str {
        match self {
            UserType::Pilgrim => "Pilgrim App",
            UserType::Command => "Command Center",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role tag carried by a session
///
/// Pilgrims always carry `Pilgrim`. Command users must pick one of the
/// four command roles before a code can be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pilgrim,
    Admin,
    Police,
    Medical,
    Coordinator,
}

impl Role {
    /// Roles selectable on the command center login form, in display order
    pub const COMMAND: [Role; 4] = [Role::Admin, Role::Police, Role::Medical, Role::Coordinator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Pilgrim => "pilgrim",
            Role::Admin => "admin",
            Role::Police => "police",
            Role::Medical => "medical",
            Role::Coordinator => "coordinator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Pilgrim => "Pilgrim",
            Role::Admin => "Administrator",
            Role::Police => "Police",
            Role::Medical => "Medical Team",
            Role::Coordinator => "Emergency Coordinator",
        }
    }

    pub fn is_command(&self) -> bool {
        !matches!(self, Role::Pilgrim)
    }

}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interface language chosen on the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Mr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
        }
    }

    /// Language name written in its own script
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "hi" | "hindi" => Some(Language::Hi),
            "mr" | "marathi" => Some(Language::Mr),
            _ => None,
        }
    }

    /// Next language in the selector (wraps around)
    pub fn next(self) -> Self {
        match self {
            Language::En => Language::Hi,
            Language::Hi => Language::Mr,
            Language::Mr => Language::En,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session identity
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque session identifier
///
/// Format: `<unix millis>-<4 hex chars>`, e.g. "1760870400123-a3f2"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix: u16 = rand::random();
        Self(format!("{}-{:04x}", millis, suffix))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reasons a session cannot be built from login input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// Neither email nor phone was provided
    MissingContact,
    /// Command user without a selected role
    MissingRole,
    /// The pilgrim role was supplied for a command user
    NotACommandRole,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContact => write!(f, "email or phone is required"),
            Self::MissingRole => write!(f, "command users must select a role"),
            Self::NotACommandRole => write!(f, "role is not a command center role"),
        }
    }
}

impl std::error::Error for SessionError {}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// An authenticated identity, valid for the lifetime of the process
///
/// Export only. There is no `Deserialize`: a session can only come from
/// `establish`, so a command session always carries a command role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    email: String,
    phone: String,
    language: Language,
    role: Role,
    user_type: UserType,
}

impl Session {
    /// Build a session from validated login input
    ///
    /// `email` wins when both contacts are present; a phone-only login gets a
    /// synthetic `<phone>@phone.safeyatra.com` address. The role is forced to
    /// `Pilgrim` for pilgrims and `command_role` is ignored for them.
    pub fn establish(
        user_type: UserType,
        command_role: Option<Role>,
        email: &str,
        phone: &str,
        language: Language,
    ) -> Result<Self, SessionError> {
        let email = email.trim();
        let phone = phone.trim();

        if email.is_empty() && phone.is_empty() {
            return Err(SessionError::MissingContact);
        }

        let role = match user_type {
            UserType::Pilgrim => Role::Pilgrim,
            UserType::Command => match command_role {
                None => return Err(SessionError::MissingRole),
                Some(role) if !role.is_command() => return Err(SessionError::NotACommandRole),
                Some(role) => role,
            },
        };

        let email = if email.is_empty() {
            format!("{}@{}", phone, PHONE_EMAIL_DOMAIN)
        } else {
            email.to_string()
        };

        Ok(Self {
            id: SessionId::generate(),
            email,
            phone: phone.to_string(),
            language,
            role,
            user_type,
        })
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    /// One-line description for logs and the title bar
    pub fn summary(&self) -> String {
        match self.user_type {
            UserType::Pilgrim => format!("pilgrim {} [{}]", self.email, self.language.code()),
            UserType::Command => format!(
                "command/{} {} [{}]",
                self.role,
                self.email,
                self.language.code()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pilgrim_role_is_forced() {
        let session = Session::establish(
            UserType::Pilgrim,
            Some(Role::Police),
            "a@b.com",
            "",
            Language::En,
        )
        .unwrap();

        assert_eq!(session.role(), Role::Pilgrim);
        assert_eq!(session.user_type(), UserType::Pilgrim);
        assert_eq!(session.email(), "a@b.com");
    }

    #[test]
    fn command_requires_command_role() {
        let missing = Session::establish(UserType::Command, None, "a@b.com", "", Language::En);
        assert_eq!(missing, Err(SessionError::MissingRole));

        let pilgrim = Session::establish(
            UserType::Command,
            Some(Role::Pilgrim),
            "a@b.com",
            "",
            Language::En,
        );
        assert_eq!(pilgrim, Err(SessionError::NotACommandRole));
    }

    #[test]
    fn contact_is_required() {
        let result = Session::establish(UserType::Pilgrim, None, "  ", "", Language::Hi);
        assert_eq!(result, Err(SessionError::MissingContact));
    }

    #[test]
    fn phone_only_login_synthesizes_email() {
        let session = Session::establish(
            UserType::Command,
            Some(Role::Police),
            "",
            "9876543210",
            Language::Mr,
        )
        .unwrap();

        assert_eq!(session.email(), "9876543210@phone.safeyatra.com");
        assert_eq!(session.phone(), "9876543210");
        assert_eq!(session.role(), Role::Police);
    }

    #[test]
    fn email_wins_over_phone() {
        let session = Session::establish(
            UserType::Pilgrim,
            None,
            "yatri@example.org",
            "9876543210",
            Language::En,
        )
        .unwrap();
        assert_eq!(session.email(), "yatri@example.org");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let session =
            Session::establish(UserType::Command, Some(Role::Admin), "x@y.in", "", Language::Hi)
                .unwrap();
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["userType"], "command");
        assert_eq!(json["role"], "admin");
        assert_eq!(json["language"], "hi");
        assert!(json["id"].as_str().is_some_and(|id| id.contains('-')));
    }

    #[test]
    fn command_roles_are_command() {
        assert!(Role::COMMAND.iter().all(Role::is_command));
        assert!(!Role::Pilgrim.is_command());
    }

    #[test]
    fn session_id_is_millis_and_hex_suffix() {
        let id = SessionId::generate().to_string();
        let (millis, suffix) = id.split_once('-').unwrap();

        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn session_ids_differ_within_the_same_millisecond() {
        // 16 random bits: 32 draws colliding on every pair is effectively impossible
        let ids: std::collections::HashSet<String> =
            (0..32).map(|_| SessionId::generate().to_string()).collect();
        assert!(ids.len() > 1);
    }

    #[test]
    fn session_json_cannot_be_read_back() {
        // Inherent consts shadow the trait fallback only when the bound holds
        #[allow(dead_code)]
        struct Check<T>(std::marker::PhantomData<T>);
        trait Fallback {
            const DESERIALIZABLE: bool = false;
        }
        impl<T> Fallback for Check<T> {}
        impl<T: serde::de::DeserializeOwned> Check<T> {
            #[allow(dead_code)]
            const DESERIALIZABLE: bool = true;
        }

        assert!(!Check::<Session>::DESERIALIZABLE);
        assert!(!Check::<SessionId>::DESERIALIZABLE);
        assert!(Check::<Role>::DESERIALIZABLE);
    }

    #[test]
    fn language_cycles_through_all() {
        let mut lang = Language::default();
        for _ in 0..3 {
            lang = lang.next();
        }
        assert_eq!(lang, Language::En);
        assert_eq!(Language::from_code("MR"), Some(Language::Mr));
    }
}
