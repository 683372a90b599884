//! Data-store connection state machine.
//!
//! # States
//! ```text
//! Disconnected → Connecting → Connected(db name)
//!                    └──────→ Failed(error)      (fatal, no retry)
//! Connected/Failed → Disconnected                (graceful close)
//! ```
//!
//! # Design Decisions
//! - Exactly one instance process-wide, written only by the manager
//! - Failed is terminal for the process; there is no reconnect loop
//! - Readers see the state through a lock-free snapshot

/// State of the single outbound data-store connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt has been made (or the connection was closed).
    Disconnected,
    /// A connect attempt is in flight.
    Connecting,
    /// Connected; carries the resolved database name.
    Connected { database: String },
    /// The connect attempt failed; carries the last error text.
    Failed { error: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    /// Status string exposed by the health report.
    pub fn health_label(&self) -> &'static str {
        if self.is_connected() {
            "connected"
        } else {
            "disconnected"
        }
    }

    /// Resolved database name, when connected.
    pub fn database_name(&self) -> Option<&str> {
        match self {
            ConnectionState::Connected { database } => Some(database),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_label_collapses_to_two_values() {
        assert_eq!(ConnectionState::Disconnected.health_label(), "disconnected");
        assert_eq!(ConnectionState::Connecting.health_label(), "disconnected");
        assert_eq!(
            ConnectionState::Failed { error: "timeout".into() }.health_label(),
            "disconnected"
        );
        assert_eq!(
            ConnectionState::Connected { database: "reservations".into() }.health_label(),
            "connected"
        );
    }

    #[test]
    fn database_name_only_when_connected() {
        let connected = ConnectionState::Connected { database: "reservations".into() };
        assert_eq!(connected.database_name(), Some("reservations"));
        assert_eq!(ConnectionState::Disconnected.database_name(), None);
    }
}
