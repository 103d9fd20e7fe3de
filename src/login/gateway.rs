//! One-time code delivery seam
//!
//! The login flow never talks to a transport directly. It hands a request
//! to an [`OtpGateway`] running on a spawned task, and the outcome comes
//! back to the event loop as an [`AppEvent`]. Swapping the simulated
//! gateway for a real SMS/email backend does not change the state machine.

use super::{CodeRequest, VerifyRequest};
use crate::events::AppEvent;
use crate::login::Contact;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Length of a one-time code
pub const CODE_LENGTH: usize = 6;

/// Backend that delivers and checks one-time codes
pub trait OtpGateway: Send + Sync + 'static {
    /// Dispatch a code to the given contact
    fn send_code(&self, contact: &Contact) -> impl Future<Output = Result<()>> + Send;

    /// Check a code previously sent to `contact`; `Ok(false)` means rejected
    fn verify(&self, contact: &Contact, code: &str) -> impl Future<Output = Result<bool>> + Send;
}

/// Gateway that only waits: nothing is delivered and any 6-character code passes
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    send_delay: Duration,
    verify_delay: Duration,
}

impl SimulatedGateway {
    pub fn new(send_delay: Duration, verify_delay: Duration) -> Self {
        Self {
            send_delay,
            verify_delay,
        }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), Duration::from_millis(1500))
    }
}

impl OtpGateway for SimulatedGateway {
    async fn send_code(&self, contact: &Contact) -> Result<()> {
        tokio::time::sleep(self.send_delay).await;
        tracing::info!("Simulated OTP dispatched to {}", contact);
        Ok(())
    }

    async fn verify(&self, contact: &Contact, code: &str) -> Result<bool> {
        tokio::time::sleep(self.verify_delay).await;
        // No comparison against a sent code: the mock has none to compare with
        let accepted = code.chars().count() == CODE_LENGTH;
        tracing::debug!("Simulated OTP check for {}: accepted={}", contact, accepted);
        Ok(accepted)
    }
}

/// Run a code request in the background and report back on `tx`
pub fn spawn_code_request<G: OtpGateway>(
    gateway: Arc<G>,
    request: CodeRequest,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match gateway.send_code(&request.contact).await {
            Ok(()) => AppEvent::CodeSent {
                generation: request.generation,
            },
            Err(e) => AppEvent::CodeRequestFailed {
                generation: request.generation,
                error: format!("{:#}", e),
            },
        };
        // Receiver gone means the UI has shut down
        let _ = tx.send(event).await;
    })
}

/// Run a verification in the background and report back on `tx`
pub fn spawn_verification<G: OtpGateway>(
    gateway: Arc<G>,
    request: VerifyRequest,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let event = match gateway.verify(&request.contact, &request.code).await {
            Ok(accepted) => AppEvent::Verified {
                generation: request.generation,
                accepted,
            },
            Err(e) => AppEvent::VerificationFailed {
                generation: request.generation,
                error: format!("{:#}", e),
            },
        };
        let _ = tx.send(event).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_send_waits_for_delay() {
        let gateway = SimulatedGateway::new(Duration::from_millis(2000), Duration::ZERO);
        let contact = Contact::Email("a@b.com".to_string());

        let start = tokio::time::Instant::now();
        gateway.send_code(&contact).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_verify_accepts_any_six_characters() {
        let gateway = SimulatedGateway::default();
        let contact = Contact::Phone("9876543210".to_string());

        assert!(gateway.verify(&contact, "000000").await.unwrap());
        assert!(gateway.verify(&contact, "abc123").await.unwrap());
        assert!(!gateway.verify(&contact, "12345").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_request_reports_generation() {
        let (tx, mut rx) = mpsc::channel(4);
        let request = CodeRequest {
            generation: 7,
            contact: Contact::Email("a@b.com".to_string()),
        };

        spawn_code_request(Arc::new(SimulatedGateway::default()), request, tx);

        match rx.recv().await {
            Some(AppEvent::CodeSent { generation }) => assert_eq!(generation, 7),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
