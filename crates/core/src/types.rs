// Service and request state vocabulary of the cluster management API
//
// Tags arrive verbatim from the remote API and are never rewritten. The enums
// below only give known tags a description; unknown tags pass through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known service state tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceState {
    Started,
    Installed,
    Starting,
    Stopping,
    Installing,
    InstallFailed,
    Maintenance,
    Unknown,
}

impl ServiceState {
    const TABLE: [(ServiceState, &'static str, &'static str); 8] = [
        (Self::Started, "STARTED", "Service is running and operational"),
        (Self::Installed, "INSTALLED", "Service is installed but not running"),
        (Self::Starting, "STARTING", "Service is in the process of starting"),
        (Self::Stopping, "STOPPING", "Service is in the process of stopping"),
        (Self::Installing, "INSTALLING", "Service is being installed"),
        (Self::InstallFailed, "INSTALL_FAILED", "Service installation failed"),
        (Self::Maintenance, "MAINTENANCE", "Service is in maintenance mode"),
        (Self::Unknown, "UNKNOWN", "Service state cannot be determined"),
    ];

    /// Look up a raw tag. Matching is exact; unrecognized tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, t, _)| *t == tag)
            .map(|(state, _, _)| *state)
    }

    pub fn as_tag(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(state, _, _)| state == self)
            .map(|(_, tag, _)| *tag)
            .unwrap_or("UNKNOWN")
    }

    /// Human-readable description of the state
    pub fn description(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(state, _, _)| state == self)
            .map(|(_, _, desc)| *desc)
            .unwrap_or("Service state cannot be determined")
    }

    /// Describe a raw tag, if it is one of the known states
    pub fn describe(tag: &str) -> Option<&'static str> {
        Self::from_tag(tag).map(|s| s.description())
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Coarse three-way grouping used for status glyphs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateClass {
    Running,
    Stopped,
    Other,
}

impl StateClass {
    pub fn of(tag: &str) -> Self {
        match tag {
            "STARTED" => Self::Running,
            "INSTALLED" | "STOPPED" => Self::Stopped,
            _ => Self::Other,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Running => "🟢",
            Self::Stopped => "🔴",
            Self::Other => "🟡",
        }
    }
}

/// Target state for a service lifecycle change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesiredState {
    /// Bring services up (`STARTED`)
    Started,
    /// Bring services down; the API calls a stopped service `INSTALLED`
    Installed,
}

impl DesiredState {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::Installed => "INSTALLED",
        }
    }

    /// The state services are in before this change applies
    pub fn opposite(&self) -> Self {
        match self {
            Self::Started => Self::Installed,
            Self::Installed => Self::Started,
        }
    }

    /// Verb used in request contexts and messages
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Started => "Start",
            Self::Installed => "Stop",
        }
    }
}

impl fmt::Display for DesiredState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Known status tags of long-running requests (operations)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Queued,
    InProgress,
    Started,
    Completed,
    Failed,
    Aborted,
    Timedout,
}

impl RequestStatus {
    const TABLE: [(RequestStatus, &'static str, &'static str); 8] = [
        (Self::Pending, "PENDING", "Request is pending execution"),
        (Self::Queued, "QUEUED", "Request is queued for execution"),
        (Self::InProgress, "IN_PROGRESS", "Request is currently running"),
        (Self::Started, "STARTED", "Request has started"),
        (Self::Completed, "COMPLETED", "Request completed successfully"),
        (Self::Failed, "FAILED", "Request failed"),
        (Self::Aborted, "ABORTED", "Request was aborted"),
        (Self::Timedout, "TIMEDOUT", "Request timed out"),
    ];

    /// Statuses that count as still running
    pub const ACTIVE: [RequestStatus; 4] =
        [Self::Pending, Self::Queued, Self::InProgress, Self::Started];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, t, _)| *t == tag)
            .map(|(status, _, _)| *status)
    }

    pub fn as_tag(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, tag, _)| *tag)
            .unwrap_or("PENDING")
    }

    pub fn description(&self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(status, _, _)| status == self)
            .map(|(_, _, desc)| *desc)
            .unwrap_or("Request is pending execution")
    }

    pub fn describe(tag: &str) -> Option<&'static str> {
        Self::from_tag(tag).map(|s| s.description())
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Whether a raw tag names an active status
    pub fn is_active_tag(tag: &str) -> bool {
        Self::from_tag(tag).is_some_and(|s| s.is_active())
    }

    /// Comma-separated active tags, as used in API predicates
    pub fn active_tags() -> String {
        Self::ACTIVE
            .iter()
            .map(|s| s.as_tag())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_state_lookup() {
        assert_eq!(ServiceState::from_tag("STARTED"), Some(ServiceState::Started));
        assert_eq!(
            ServiceState::from_tag("INSTALL_FAILED"),
            Some(ServiceState::InstallFailed)
        );
        assert_eq!(ServiceState::from_tag("started"), None);
        assert_eq!(ServiceState::from_tag("DECOMMISSIONED"), None);
    }

    #[test]
    fn test_service_state_descriptions() {
        assert_eq!(
            ServiceState::describe("STARTED"),
            Some("Service is running and operational")
        );
        assert_eq!(
            ServiceState::describe("INSTALLED"),
            Some("Service is installed but not running")
        );
        assert_eq!(ServiceState::describe("WEIRD"), None);
        assert_eq!(ServiceState::Maintenance.to_string(), "MAINTENANCE");
    }

    #[test]
    fn test_state_class() {
        assert_eq!(StateClass::of("STARTED"), StateClass::Running);
        assert_eq!(StateClass::of("INSTALLED"), StateClass::Stopped);
        assert_eq!(StateClass::of("STOPPED"), StateClass::Stopped);
        assert_eq!(StateClass::of("STARTING"), StateClass::Other);
        assert_eq!(StateClass::of("Unknown"), StateClass::Other);
        assert_eq!(StateClass::Running.glyph(), "🟢");
    }

    #[test]
    fn test_desired_state() {
        assert_eq!(DesiredState::Started.as_tag(), "STARTED");
        assert_eq!(DesiredState::Started.opposite(), DesiredState::Installed);
        assert_eq!(DesiredState::Installed.opposite().as_tag(), "STARTED");
        assert_eq!(DesiredState::Installed.verb(), "Stop");
    }

    #[test]
    fn test_request_status() {
        assert!(RequestStatus::is_active_tag("IN_PROGRESS"));
        assert!(RequestStatus::is_active_tag("QUEUED"));
        assert!(!RequestStatus::is_active_tag("COMPLETED"));
        assert!(!RequestStatus::is_active_tag("bogus"));
        assert_eq!(
            RequestStatus::describe("TIMEDOUT"),
            Some("Request timed out")
        );
        assert_eq!(
            RequestStatus::active_tags(),
            "PENDING,QUEUED,IN_PROGRESS,STARTED"
        );
    }
}
