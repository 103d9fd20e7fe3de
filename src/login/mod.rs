// Login flow - two-phase one-time-code verification
//
// Phases:
//   Idle ──request_code──▶ Requesting ──code_sent──▶ CodeSent
//     ▲                        │                        │
//     └──code_request_failed───┘                   verify_code
//                                                       ▼
//   (Session) ◀──────────complete(accepted)────── Verifying
//
// Every request bumps a generation counter. Async completions carry the
// generation they were issued with, so a completion that arrives after a
// reset (logout, unmount) is recognised as stale and dropped.

mod contact;
pub mod gateway;

pub use contact::{Contact, ContactTab};
pub use gateway::{OtpGateway, SimulatedGateway, CODE_LENGTH};

use crate::session::{Language, Role, Session, SessionError, UserType};
use std::fmt;

/// Where the flow currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    /// Collecting contact details
    #[default]
    Idle,
    /// Code dispatch in flight
    Requesting,
    /// Code dispatched, waiting for the user to type it
    CodeSent,
    /// Code check in flight
    Verifying,
}

impl LoginPhase {
    /// Whether an async operation is outstanding (spinner shown)
    pub fn is_pending(&self) -> bool {
        matches!(self, LoginPhase::Requesting | LoginPhase::Verifying)
    }
}

/// Why a login action was refused
///
/// Refusals never change state. The UI presents them as disabled actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRejection {
    /// Neither email nor phone entered
    MissingContact,
    /// Command user has not picked a role
    MissingRole,
    /// Role picker is only shown to command users
    RoleNotApplicable,
    /// A code was already requested and is pending or sent
    AlreadyPending,
    /// Verification attempted before a code was sent
    NoCodeRequested,
    /// Entered code does not have exactly six characters
    CodeLength { len: usize },
    /// A verification is already running
    VerificationInFlight,
    /// Async completion does not match the current request
    StaleCompletion,
    /// Gateway refused the code
    CodeRejected,
    /// Session could not be built from the form
    InvalidSession(SessionError),
}

impl fmt::Display for LoginRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContact => write!(f, "email or phone is required"),
            Self::MissingRole => write!(f, "select a role first"),
            Self::RoleNotApplicable => write!(f, "pilgrims do not select a role"),
            Self::AlreadyPending => write!(f, "a code request is already pending"),
            Self::NoCodeRequested => write!(f, "request a code first"),
            Self::CodeLength { len } => {
                write!(f, "code must be {} characters (got {})", CODE_LENGTH, len)
            }
            Self::VerificationInFlight => write!(f, "verification already in progress"),
            Self::StaleCompletion => write!(f, "completion for an outdated request"),
            Self::CodeRejected => write!(f, "code was not accepted"),
            Self::InvalidSession(e) => write!(f, "invalid session: {}", e),
        }
    }
}

impl std::error::Error for LoginRejection {}

impl From<SessionError> for LoginRejection {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::MissingContact => Self::MissingContact,
            SessionError::MissingRole => Self::MissingRole,
            other => Self::InvalidSession(other),
        }
    }
}

/// Ticket for an outstanding code dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRequest {
    pub generation: u64,
    pub contact: Contact,
}

/// Ticket for an outstanding code check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRequest {
    pub generation: u64,
    pub contact: Contact,
    pub code: String,
}

/// User-editable fields of the login form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub language: Language,
    pub role: Option<Role>,
    pub tab: ContactTab,
    pub email: String,
    pub phone: String,
    pub code: String,
}

/// Login state machine for one user type
#[derive(Debug, Clone)]
pub struct LoginFlow {
    user_type: UserType,
    form: LoginForm,
    phase: LoginPhase,
    generation: u64,
}

impl LoginFlow {
    pub fn new(user_type: UserType, language: Language) -> Self {
        Self {
            user_type,
            form: LoginForm {
                language,
                ..LoginForm::default()
            },
            phase: LoginPhase::Idle,
            generation: 0,
        }
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn phase(&self) -> LoginPhase {
        self.phase
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    /// Contact inputs lock once a code has been requested
    pub fn contact_editable(&self) -> bool {
        self.phase == LoginPhase::Idle
    }

    /// The code input is only shown after dispatch
    pub fn code_editable(&self) -> bool {
        self.phase == LoginPhase::CodeSent
    }

    // ─────────────────────────────────────────────────────────────────────
    // Form editing
    // ─────────────────────────────────────────────────────────────────────

    pub fn cycle_language(&mut self) {
        self.form.language = self.form.language.next();
    }

    pub fn select_role(&mut self, role: Role) -> Result<(), LoginRejection> {
        if self.user_type != UserType::Command || !role.is_command() {
            return Err(LoginRejection::RoleNotApplicable);
        }
        self.form.role = Some(role);
        Ok(())
    }

    /// Step through command roles (first press selects the first role)
    pub fn cycle_role(&mut self) -> Result<(), LoginRejection> {
        let next = match self.form.role {
            None => Role::COMMAND[0],
            Some(current) => {
                let idx = Role::COMMAND
                    .iter()
                    .position(|r| *r == current)
                    .unwrap_or(0);
                Role::COMMAND[(idx + 1) % Role::COMMAND.len()]
            }
        };
        self.select_role(next)
    }

    pub fn toggle_tab(&mut self) {
        if self.contact_editable() {
            self.form.tab = self.form.tab.toggle();
        }
    }

    /// Type a character into whichever field is active for the phase
    ///
    /// Returns false when no field accepts input right now.
    pub fn push_char(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if self.code_editable() {
            if self.form.code.chars().count() >= CODE_LENGTH {
                return false;
            }
            self.form.code.push(c);
            return true;
        }
        if self.contact_editable() {
            self.active_contact_mut().push(c);
            return true;
        }
        false
    }

    pub fn pop_char(&mut self) -> bool {
        if self.code_editable() {
            return self.form.code.pop().is_some();
        }
        if self.contact_editable() {
            return self.active_contact_mut().pop().is_some();
        }
        false
    }

    fn active_contact_mut(&mut self) -> &mut String {
        match self.form.tab {
            ContactTab::Email => &mut self.form.email,
            ContactTab::Phone => &mut self.form.phone,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Phase transitions
    // ─────────────────────────────────────────────────────────────────────

    /// Check the request-code preconditions without changing state
    pub fn check_request(&self) -> Result<Contact, LoginRejection> {
        if self.phase != LoginPhase::Idle {
            return Err(LoginRejection::AlreadyPending);
        }
        let contact = Contact::resolve(&self.form.email, &self.form.phone)
            .ok_or(LoginRejection::MissingContact)?;
        if self.user_type == UserType::Command && self.form.role.is_none() {
            return Err(LoginRejection::MissingRole);
        }
        Ok(contact)
    }

    /// Start a code dispatch; the caller runs the returned ticket on a gateway
    pub fn request_code(&mut self) -> Result<CodeRequest, LoginRejection> {
        let contact = self.check_request()?;

        self.generation += 1;
        self.phase = LoginPhase::Requesting;
        tracing::info!(
            "OTP requested for {} login via {}",
            self.user_type,
            contact.kind()
        );

        Ok(CodeRequest {
            generation: self.generation,
            contact,
        })
    }

    /// Gateway confirmed dispatch
    pub fn code_sent(&mut self, generation: u64) -> Result<(), LoginRejection> {
        self.expect_completion(generation, LoginPhase::Requesting)?;
        self.phase = LoginPhase::CodeSent;
        Ok(())
    }

    /// Gateway failed to dispatch; contact fields unlock again
    pub fn code_request_failed(&mut self, generation: u64) -> Result<(), LoginRejection> {
        self.expect_completion(generation, LoginPhase::Requesting)?;
        self.phase = LoginPhase::Idle;
        Ok(())
    }

    /// Check the verify preconditions without changing state
    pub fn check_verify(&self) -> Result<(), LoginRejection> {
        match self.phase {
            LoginPhase::Idle | LoginPhase::Requesting => Err(LoginRejection::NoCodeRequested),
            LoginPhase::Verifying => Err(LoginRejection::VerificationInFlight),
            LoginPhase::CodeSent => {
                let len = self.form.code.chars().count();
                if len != CODE_LENGTH {
                    return Err(LoginRejection::CodeLength { len });
                }
                Ok(())
            }
        }
    }

    /// Start a code check; the caller runs the returned ticket on a gateway
    pub fn verify_code(&mut self) -> Result<VerifyRequest, LoginRejection> {
        self.check_verify()?;
        let contact = Contact::resolve(&self.form.email, &self.form.phone)
            .ok_or(LoginRejection::MissingContact)?;

        self.phase = LoginPhase::Verifying;
        Ok(VerifyRequest {
            generation: self.generation,
            contact,
            code: self.form.code.clone(),
        })
    }

    /// Finish verification
    ///
    /// On acceptance the session is synthesised from the form and the flow
    /// resets, ready to be dropped by the router. On refusal the code field
    /// is cleared and the user can try again.
    pub fn complete(&mut self, generation: u64, accepted: bool) -> Result<Session, LoginRejection> {
        self.expect_completion(generation, LoginPhase::Verifying)?;

        if !accepted {
            self.form.code.clear();
            self.phase = LoginPhase::CodeSent;
            return Err(LoginRejection::CodeRejected);
        }

        let session = Session::establish(
            self.user_type,
            self.form.role,
            &self.form.email,
            &self.form.phone,
            self.form.language,
        )?;
        self.reset();
        Ok(session)
    }

    /// Gateway errored while verifying; allow another attempt
    pub fn verification_failed(&mut self, generation: u64) -> Result<(), LoginRejection> {
        self.expect_completion(generation, LoginPhase::Verifying)?;
        self.phase = LoginPhase::CodeSent;
        Ok(())
    }

    /// Back to a blank form; outstanding completions become stale
    pub fn reset(&mut self) {
        let language = self.form.language;
        self.form = LoginForm {
            language,
            ..LoginForm::default()
        };
        self.phase = LoginPhase::Idle;
        self.generation += 1;
    }

    fn expect_completion(&self, generation: u64, phase: LoginPhase) -> Result<(), LoginRejection> {
        if generation != self.generation || self.phase != phase {
            tracing::debug!(
                "Dropping stale login completion (gen {} vs {}, phase {:?})",
                generation,
                self.generation,
                self.phase
            );
            return Err(LoginRejection::StaleCompletion);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(flow: &mut LoginFlow, s: &str) {
        for c in s.chars() {
            flow.push_char(c);
        }
    }

    fn pilgrim_with_email(email: &str) -> LoginFlow {
        let mut flow = LoginFlow::new(UserType::Pilgrim, Language::En);
        type_str(&mut flow, email);
        flow
    }

    #[test]
    fn request_rejected_without_contact() {
        let mut flow = LoginFlow::new(UserType::Pilgrim, Language::En);
        assert_eq!(flow.request_code(), Err(LoginRejection::MissingContact));
        assert_eq!(flow.phase(), LoginPhase::Idle);
        assert_eq!(flow.generation, 0);
    }

    #[test]
    fn command_request_rejected_without_role() {
        let mut flow = LoginFlow::new(UserType::Command, Language::En);
        type_str(&mut flow, "officer@ujjain.gov.in");

        assert_eq!(flow.request_code(), Err(LoginRejection::MissingRole));
        assert_eq!(flow.phase(), LoginPhase::Idle);

        flow.select_role(Role::Medical).unwrap();
        assert!(flow.request_code().is_ok());
        assert_eq!(flow.phase(), LoginPhase::Requesting);
    }

    #[test]
    fn second_request_while_pending_has_no_effect() {
        let mut flow = pilgrim_with_email("a@b.com");
        let first = flow.request_code().unwrap();

        assert_eq!(flow.request_code(), Err(LoginRejection::AlreadyPending));
        assert_eq!(flow.generation, first.generation);

        flow.code_sent(first.generation).unwrap();
        assert_eq!(flow.request_code(), Err(LoginRejection::AlreadyPending));
        assert_eq!(flow.phase(), LoginPhase::CodeSent);
    }

    #[test]
    fn verify_requires_six_characters() {
        let mut flow = pilgrim_with_email("a@b.com");
        let req = flow.request_code().unwrap();
        flow.code_sent(req.generation).unwrap();

        type_str(&mut flow, "12345");
        assert_eq!(
            flow.verify_code(),
            Err(LoginRejection::CodeLength { len: 5 })
        );
        assert_eq!(flow.phase(), LoginPhase::CodeSent);

        // Seventh character is refused by the input itself
        type_str(&mut flow, "67");
        assert_eq!(flow.form().code, "123456");
        assert!(flow.verify_code().is_ok());
    }

    #[test]
    fn verify_before_request_is_rejected() {
        let mut flow = pilgrim_with_email("a@b.com");
        assert_eq!(flow.verify_code(), Err(LoginRejection::NoCodeRequested));
    }

    #[test]
    fn contact_locks_after_request() {
        let mut flow = pilgrim_with_email("a@b.com");
        flow.request_code().unwrap();

        assert!(!flow.push_char('x'));
        flow.toggle_tab();
        assert_eq!(flow.form().tab, ContactTab::Email);
        assert_eq!(flow.form().email, "a@b.com");
    }

    #[test]
    fn pilgrim_completion_builds_pilgrim_session() {
        let mut flow = pilgrim_with_email("a@b.com");
        let req = flow.request_code().unwrap();
        flow.code_sent(req.generation).unwrap();
        type_str(&mut flow, "123456");
        let verify = flow.verify_code().unwrap();

        let session = flow.complete(verify.generation, true).unwrap();
        assert_eq!(session.user_type(), UserType::Pilgrim);
        assert_eq!(session.role(), Role::Pilgrim);
        assert_eq!(session.email(), "a@b.com");
        assert_eq!(flow.phase(), LoginPhase::Idle);
    }

    #[test]
    fn command_phone_login_synthesizes_email() {
        let mut flow = LoginFlow::new(UserType::Command, Language::En);
        flow.select_role(Role::Police).unwrap();
        flow.toggle_tab();
        type_str(&mut flow, "9876543210");

        let req = flow.request_code().unwrap();
        assert_eq!(req.contact, Contact::Phone("9876543210".to_string()));
        flow.code_sent(req.generation).unwrap();
        type_str(&mut flow, "000000");
        let verify = flow.verify_code().unwrap();

        let session = flow.complete(verify.generation, true).unwrap();
        assert_eq!(session.email(), "9876543210@phone.safeyatra.com");
        assert_eq!(session.role(), Role::Police);
        assert_eq!(session.user_type(), UserType::Command);
    }

    #[test]
    fn completion_after_reset_is_stale() {
        let mut flow = pilgrim_with_email("a@b.com");
        let req = flow.request_code().unwrap();
        flow.reset();

        assert_eq!(
            flow.code_sent(req.generation),
            Err(LoginRejection::StaleCompletion)
        );
        assert_eq!(flow.phase(), LoginPhase::Idle);
        assert!(flow.form().email.is_empty());
    }

    #[test]
    fn rejected_code_returns_to_code_entry() {
        let mut flow = pilgrim_with_email("a@b.com");
        let req = flow.request_code().unwrap();
        flow.code_sent(req.generation).unwrap();
        type_str(&mut flow, "999999");
        let verify = flow.verify_code().unwrap();

        assert_eq!(
            flow.complete(verify.generation, false),
            Err(LoginRejection::CodeRejected)
        );
        assert_eq!(flow.phase(), LoginPhase::CodeSent);
        assert!(flow.form().code.is_empty());
    }

    #[test]
    fn roles_are_command_only() {
        let mut pilgrim = LoginFlow::new(UserType::Pilgrim, Language::En);
        assert_eq!(
            pilgrim.select_role(Role::Police),
            Err(LoginRejection::RoleNotApplicable)
        );

        let mut command = LoginFlow::new(UserType::Command, Language::En);
        command.cycle_role().unwrap();
        assert_eq!(command.form().role, Some(Role::Admin));
        command.cycle_role().unwrap();
        assert_eq!(command.form().role, Some(Role::Police));
        assert_eq!(
            command.select_role(Role::Pilgrim),
            Err(LoginRejection::RoleNotApplicable)
        );
    }

    #[test]
    fn failed_dispatch_unlocks_contact() {
        let mut flow = pilgrim_with_email("a@b.com");
        let req = flow.request_code().unwrap();
        flow.code_request_failed(req.generation).unwrap();

        assert_eq!(flow.phase(), LoginPhase::Idle);
        assert!(flow.push_char('m'));
        assert!(flow.request_code().is_ok());
    }
}
