// Headless walkthrough: drives the real state machines without a terminal
//
// Runs both user types end to end (select mode, request code, verify,
// one role-screen action, logout) against the simulated gateway and logs
// every transition. Useful in CI and for checking the flows over ssh.
//
// Run with: SAFEYATRA_NO_TUI=1 cargo run --release

use crate::config::Config;
use crate::events::AppEvent;
use crate::login::gateway::{spawn_code_request, spawn_verification};
use crate::login::{LoginFlow, OtpGateway, SimulatedGateway};
use crate::router::{Router, Screen};
use crate::screens::pilgrim::spawn_sos_timer;
use crate::screens::{CommandScreen, PilgrimScreen};
use crate::session::{Language, Role, Session, UserType};
use crate::signals::DeviceSignals;
use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::mpsc;

const DEMO_PHONE: &str = "+91 98765 43210";
const DEMO_EMAIL: &str = "coordinator@safeyatra.gov.in";
const DEMO_CODE: &str = "482913";

/// Walk both apps using settings from `config`
pub async fn run_walkthrough(config: &Config) -> Result<Vec<Session>> {
    let gateway = Arc::new(SimulatedGateway::new(
        config.timing.send_code_delay(),
        config.timing.verify_delay(),
    ));
    let signals = DeviceSignals::from_config(&config.device);
    let walkthrough = Walkthrough {
        gateway,
        signals,
        language: config.language,
        sos_duration: config.timing.sos_duration(),
    };
    walkthrough.run().await
}

struct Walkthrough<G> {
    gateway: Arc<G>,
    signals: DeviceSignals,
    language: Language,
    sos_duration: std::time::Duration,
}

impl<G: OtpGateway> Walkthrough<G> {
    async fn run(&self) -> Result<Vec<Session>> {
        let (tx, mut rx) = mpsc::channel(16);
        let mut router = Router::new();
        let mut sessions = Vec::new();

        for (mount, user_type) in (1u64..).zip(UserType::ALL) {
            router.select_mode(user_type)?;
            let session = self.login(user_type, &tx, &mut rx).await?;
            tracing::info!(
                "Session: {}",
                serde_json::to_string(&session).context("Failed to serialize session")?
            );
            router.on_login(session)?;

            match router.screen() {
                Screen::Pilgrim(_) => self.pilgrim_tour(mount, &tx, &mut rx).await?,
                Screen::Command(_) => command_tour()?,
                other => bail!("unexpected screen after login: {:?}", other),
            }

            sessions.push(router.on_logout()?);
        }

        tracing::info!("Walkthrough complete");
        Ok(sessions)
    }

    async fn login(
        &self,
        user_type: UserType,
        tx: &mpsc::Sender<AppEvent>,
        rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<Session> {
        let mut flow = LoginFlow::new(user_type, self.language);
        match user_type {
            UserType::Pilgrim => {
                flow.toggle_tab();
                DEMO_PHONE.chars().for_each(|c| {
                    flow.push_char(c);
                });
            }
            UserType::Command => {
                flow.select_role(Role::Coordinator)?;
                DEMO_EMAIL.chars().for_each(|c| {
                    flow.push_char(c);
                });
            }
        }

        let request = flow.request_code()?;
        spawn_code_request(Arc::clone(&self.gateway), request, tx.clone());
        match next_event(rx).await? {
            AppEvent::CodeSent { generation } => flow.code_sent(generation)?,
            AppEvent::CodeRequestFailed { error, .. } => bail!("code request failed: {}", error),
            other => bail!("unexpected event while requesting code: {}", other.name()),
        }
        tracing::info!("Code sent; entering {}", DEMO_CODE);

        DEMO_CODE.chars().for_each(|c| {
            flow.push_char(c);
        });
        let request = flow.verify_code()?;
        spawn_verification(Arc::clone(&self.gateway), request, tx.clone());
        match next_event(rx).await? {
            AppEvent::Verified {
                generation,
                accepted,
            } => Ok(flow.complete(generation, accepted)?),
            AppEvent::VerificationFailed { error, .. } => bail!("verification failed: {}", error),
            other => bail!("unexpected event while verifying: {}", other.name()),
        }
    }

    async fn pilgrim_tour(
        &self,
        mount: u64,
        tx: &mpsc::Sender<AppEvent>,
        rx: &mut mpsc::Receiver<AppEvent>,
    ) -> Result<()> {
        let mut screen = PilgrimScreen::new(mount);
        self.signals.spawn_resolve(mount, tx.clone());
        // Location then connectivity
        for _ in 0..2 {
            let event = next_event(rx).await?;
            screen.apply(&event);
        }
        tracing::info!(
            "Pilgrim screen: online={} crowd={}",
            screen.online(),
            screen.crowd_level().label()
        );

        let notice = screen.trigger_sos()?;
        tracing::info!("{} {}", notice.title, notice.detail.unwrap_or_default());
        if screen.trigger_sos().is_ok() {
            bail!("second SOS should be refused while active");
        }

        spawn_sos_timer(mount, self.sos_duration, tx.clone());
        let expired = next_event(rx).await?;
        if !screen.apply(&expired) || screen.sos_active() {
            bail!("SOS did not clear");
        }
        tracing::info!("SOS cleared");
        Ok(())
    }
}

fn command_tour() -> Result<()> {
    let mut screen = CommandScreen::new(Utc::now());
    tracing::info!(
        "Command center: {} pilgrims, {} active alerts, {} drones active",
        screen.crowd().total_people,
        screen.active_alert_count(),
        screen.active_drone_count()
    );
    tracing::info!("{}", screen.resolve_alert(1)?.title);
    tracing::info!("{}", screen.dispatch_drone("ARX-003")?.title);
    if let Err(e) = screen.dispatch_drone("ARX-001") {
        tracing::info!("Dispatch refused: {}", e);
    }
    Ok(())
}

async fn next_event(rx: &mut mpsc::Receiver<AppEvent>) -> Result<AppEvent> {
    let event = rx.recv().await.ok_or_else(|| anyhow!("event channel closed"))?;
    tracing::debug!("Walkthrough event: {}", event.name());
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;

    #[tokio::test(start_paused = true)]
    async fn walkthrough_logs_in_both_user_types() {
        let config = Config::default();
        let start = tokio::time::Instant::now();

        let sessions = run_walkthrough(&config).await.unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].user_type(), UserType::Pilgrim);
        assert_eq!(sessions[0].role(), Role::Pilgrim);
        assert_eq!(sessions[0].email(), format!("{}@phone.safeyatra.com", DEMO_PHONE));
        assert_eq!(sessions[1].user_type(), UserType::Command);
        assert_eq!(sessions[1].role(), Role::Coordinator);
        assert_eq!(sessions[1].email(), DEMO_EMAIL);

        // Two logins at 2s + 1.5s each, plus one 10s SOS
        assert!(start.elapsed() >= std::time::Duration::from_secs(17));
    }

    #[tokio::test(start_paused = true)]
    async fn walkthrough_keeps_configured_language() {
        let config = Config {
            language: Language::Hi,
            device: DeviceConfig::default(),
            ..Config::default()
        };

        let sessions = run_walkthrough(&config).await.unwrap();
        assert!(sessions.iter().all(|s| s.language() == Language::Hi));
    }
}
