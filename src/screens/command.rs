//! Command center dashboard state
//!
//! Fixed mock data seeded on every mount. Resolving an alert is the only
//! mutation; drone dispatch just confirms (the unit list is static).

use super::{Notice, ScreenRejection};
use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Mean response time shown on the metrics strip
pub const RESPONSE_TIME: &str = "2.3m";

// ─────────────────────────────────────────────────────────────────────────────
// Alerts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    CrowdSurge,
    LostPerson,
}

impl AlertKind {
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::CrowdSurge => "CROWD SURGE",
            AlertKind::LostPerson => "LOST PERSON",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertStatus {
    Active,
    Investigating,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertStatus::Active => "active",
            AlertStatus::Investigating => "investigating",
            AlertStatus::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u32,
    pub kind: AlertKind,
    pub location: &'static str,
    pub severity: Severity,
    pub raised_at: DateTime<Utc>,
    pub status: AlertStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Drones, crowd, lost persons, team chatter
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DroneStatus {
    Active,
    Returning,
    Standby,
}

impl DroneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroneStatus::Active => "active",
            DroneStatus::Returning => "returning",
            DroneStatus::Standby => "standby",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroneUnit {
    pub id: &'static str,
    pub status: DroneStatus,
    pub location: &'static str,
    pub battery: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrowdData {
    pub total_people: u64,
    pub high_density_areas: u32,
    pub medium_density_areas: u32,
    pub low_density_areas: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    Found,
}

impl SearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Searching => "searching",
            SearchStatus::Found => "found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LostPerson {
    pub id: u32,
    pub name: &'static str,
    pub age: u8,
    pub last_seen: &'static str,
    /// Match confidence, percent
    pub confidence: u8,
    pub status: SearchStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMessage {
    pub unit: &'static str,
    pub text: &'static str,
    pub minutes_ago: u32,
}

// ─────────────────────────────────────────────────────────────────────────────
// Tabs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Overview,
    Alerts,
    Heatmap,
    Drones,
    LostFound,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::Overview,
        DashboardTab::Alerts,
        DashboardTab::Heatmap,
        DashboardTab::Drones,
        DashboardTab::LostFound,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Alerts => "Live Alerts",
            DashboardTab::Heatmap => "Crowd Heatmap",
            DashboardTab::Drones => "AeroRover-X",
            DashboardTab::LostFound => "Lost & Found",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Screen state
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct CommandScreen {
    pub tab: DashboardTab,
    alerts: Vec<Alert>,
    drones: Vec<DroneUnit>,
    crowd: CrowdData,
    lost_persons: Vec<LostPerson>,
    messages: Vec<TeamMessage>,
    /// Cursor within the Alerts / Drones tab
    selected: usize,
}

impl CommandScreen {
    /// Seed mock data relative to `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            tab: DashboardTab::Overview,
            alerts: vec![
                Alert {
                    id: 1,
                    kind: AlertKind::CrowdSurge,
                    location: "Ram Ghat",
                    severity: Severity::High,
                    raised_at: now - ChronoDuration::minutes(5),
                    status: AlertStatus::Active,
                },
                Alert {
                    id: 2,
                    kind: AlertKind::LostPerson,
                    location: "Mahakal Temple",
                    severity: Severity::Medium,
                    raised_at: now - ChronoDuration::minutes(10),
                    status: AlertStatus::Investigating,
                },
            ],
            drones: vec![
                DroneUnit {
                    id: "ARX-001",
                    status: DroneStatus::Active,
                    location: "Sector A",
                    battery: 85,
                },
                DroneUnit {
                    id: "ARX-002",
                    status: DroneStatus::Returning,
                    location: "Sector B",
                    battery: 32,
                },
                DroneUnit {
                    id: "ARX-003",
                    status: DroneStatus::Standby,
                    location: "Base Station",
                    battery: 100,
                },
            ],
            crowd: CrowdData {
                total_people: 45_678,
                high_density_areas: 3,
                medium_density_areas: 7,
                low_density_areas: 12,
            },
            lost_persons: vec![
                LostPerson {
                    id: 1,
                    name: "Rajesh Kumar",
                    age: 8,
                    last_seen: "Shipra Ghat",
                    confidence: 89,
                    status: SearchStatus::Searching,
                },
                LostPerson {
                    id: 2,
                    name: "Sita Devi",
                    age: 65,
                    last_seen: "Ram Ghat",
                    confidence: 76,
                    status: SearchStatus::Found,
                },
            ],
            messages: vec![
                TeamMessage {
                    unit: "POLICE",
                    text: "Unit 7 dispatched to Ram Ghat for crowd control",
                    minutes_ago: 2,
                },
                TeamMessage {
                    unit: "MEDICAL",
                    text: "Ambulance en route to Mahakal Temple",
                    minutes_ago: 5,
                },
                TeamMessage {
                    unit: "COORD",
                    text: "All units report status - situation under control",
                    minutes_ago: 8,
                },
            ],
            selected: 0,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn drones(&self) -> &[DroneUnit] {
        &self.drones
    }

    pub fn crowd(&self) -> CrowdData {
        self.crowd
    }

    pub fn lost_persons(&self) -> &[LostPerson] {
        &self.lost_persons
    }

    pub fn messages(&self) -> &[TeamMessage] {
        &self.messages
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn active_alert_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Active)
            .count()
    }

    pub fn active_drone_count(&self) -> usize {
        self.drones
            .iter()
            .filter(|d| d.status == DroneStatus::Active)
            .count()
    }

    pub fn resolve_alert(&mut self, id: u32) -> Result<Notice, ScreenRejection> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ScreenRejection::UnknownAlert(id))?;
        if alert.status != AlertStatus::Active {
            return Err(ScreenRejection::AlertNotActive(id));
        }
        alert.status = AlertStatus::Resolved;
        tracing::info!("Alert {} at {} resolved", id, alert.location);
        Ok(Notice::new("✅ Alert marked as resolved"))
    }

    pub fn dispatch_drone(&self, id: &str) -> Result<Notice, ScreenRejection> {
        let drone = self
            .drones
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| ScreenRejection::UnknownDrone(id.to_string()))?;
        if drone.status == DroneStatus::Active {
            return Err(ScreenRejection::DroneAlreadyActive(id.to_string()));
        }
        tracing::info!("Drone {} dispatched from {}", drone.id, drone.location);
        Ok(Notice::new(format!("🚁 Drone {} dispatched successfully!", drone.id))
            .with_detail("ETA: 3 minutes to target location"))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn prev_tab(&mut self) {
        self.set_tab(self.tab.prev());
    }

    /// Select tab by zero-based index; out-of-range is ignored
    pub fn select_tab(&mut self, index: usize) {
        if let Some(tab) = DashboardTab::ALL.get(index) {
            self.set_tab(*tab);
        }
    }

    fn set_tab(&mut self, tab: DashboardTab) {
        self.tab = tab;
        self.selected = 0;
    }

    fn selectable_len(&self) -> usize {
        match self.tab {
            DashboardTab::Alerts => self.alerts.len(),
            DashboardTab::Drones => self.drones.len(),
            DashboardTab::LostFound => self.lost_persons.len(),
            _ => 0,
        }
    }

    pub fn select_next(&mut self) {
        let len = self.selectable_len();
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Primary action on the selected row (resolve alert / dispatch drone)
    pub fn activate_selected(&mut self) -> Result<Notice, ScreenRejection> {
        match self.tab {
            DashboardTab::Alerts => {
                let id = self
                    .alerts
                    .get(self.selected)
                    .map(|a| a.id)
                    .ok_or(ScreenRejection::NothingSelected)?;
                self.resolve_alert(id)
            }
            DashboardTab::Drones => {
                let id = self
                    .drones
                    .get(self.selected)
                    .map(|d| d.id)
                    .ok_or(ScreenRejection::NothingSelected)?;
                self.dispatch_drone(id)
            }
            _ => Err(ScreenRejection::NothingSelected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> CommandScreen {
        CommandScreen::new(Utc::now())
    }

    #[test]
    fn metrics_reflect_mock_data() {
        let screen = screen();
        assert_eq!(screen.active_alert_count(), 1);
        assert_eq!(screen.active_drone_count(), 1);
        assert_eq!(screen.crowd().total_people, 45_678);
        assert_eq!(screen.lost_persons().len(), 2);
        assert_eq!(screen.messages().len(), 3);
    }

    #[test]
    fn alerts_are_timestamped_relative_to_mount() {
        let now = Utc::now();
        let screen = CommandScreen::new(now);
        assert_eq!(screen.alerts()[0].raised_at, now - ChronoDuration::minutes(5));
        assert_eq!(screen.alerts()[1].raised_at, now - ChronoDuration::minutes(10));
    }

    #[test]
    fn only_active_alerts_resolve() {
        let mut screen = screen();
        assert!(screen.resolve_alert(1).is_ok());
        assert_eq!(screen.alerts()[0].status, AlertStatus::Resolved);
        assert_eq!(screen.active_alert_count(), 0);

        assert_eq!(screen.resolve_alert(1), Err(ScreenRejection::AlertNotActive(1)));
        assert_eq!(screen.resolve_alert(2), Err(ScreenRejection::AlertNotActive(2)));
        assert_eq!(screen.resolve_alert(42), Err(ScreenRejection::UnknownAlert(42)));
    }

    #[test]
    fn active_drones_cannot_be_dispatched() {
        let screen = screen();
        assert_eq!(
            screen.dispatch_drone("ARX-001"),
            Err(ScreenRejection::DroneAlreadyActive("ARX-001".to_string()))
        );

        let notice = screen.dispatch_drone("ARX-003").unwrap();
        assert!(notice.title.contains("ARX-003"));
        // Dispatch does not change the unit list
        assert_eq!(screen.active_drone_count(), 1);
    }

    #[test]
    fn tabs_cycle_and_reset_cursor() {
        let mut screen = screen();
        screen.select_tab(1);
        screen.select_next();
        assert_eq!(screen.selected(), 1);

        screen.next_tab();
        assert_eq!(screen.tab, DashboardTab::Heatmap);
        assert_eq!(screen.selected(), 0);

        screen.select_tab(4);
        screen.next_tab();
        assert_eq!(screen.tab, DashboardTab::Overview);
        screen.prev_tab();
        assert_eq!(screen.tab, DashboardTab::LostFound);

        screen.select_tab(9);
        assert_eq!(screen.tab, DashboardTab::LostFound);
    }

    #[test]
    fn activate_selected_acts_on_current_tab() {
        let mut screen = screen();
        assert_eq!(screen.activate_selected(), Err(ScreenRejection::NothingSelected));

        screen.select_tab(1);
        assert!(screen.activate_selected().is_ok());
        assert_eq!(screen.active_alert_count(), 0);

        screen.select_tab(3);
        screen.select_next();
        screen.select_next();
        screen.select_next();
        assert_eq!(screen.selected(), 2);
        let notice = screen.activate_selected().unwrap();
        assert!(notice.title.contains("ARX-003"));
    }
}
