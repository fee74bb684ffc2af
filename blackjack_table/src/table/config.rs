//! Table configuration.

use serde::{Deserialize, Serialize};

/// Channel sizing for the table actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Messages that can queue up for the actor before senders wait
    pub inbox_capacity: usize,

    /// Outbound events buffered per participant before snapshots are dropped
    pub participant_buffer: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: 256,
            participant_buffer: 64,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be greater than 0".to_string());
        }

        if self.participant_buffer == 0 {
            return Err("Participant buffer must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacities_rejected() {
        let config = TableConfig {
            inbox_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TableConfig {
            participant_buffer: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
