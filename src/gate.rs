use serde::{Deserialize, Serialize};

/// Flags deciding whether a reset needs confirmation and which hints still
/// make sense to show.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResetGate {
    /// Set by the first confirmed reset; never cleared during a session
    pub has_reset: bool,
    pub has_started: bool,
    pub has_stopped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetDecision {
    Proceed,
    Ask,
}

/// Answer to the "Do you want to reset the timer?" prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Reset,
    DoNothing,
}

impl ResetGate {
    pub fn confirm(&self) -> ResetDecision {
        confirm(self)
    }
}

pub fn confirm(gate: &ResetGate) -> ResetDecision {
    if gate.has_reset {
        ResetDecision::Proceed
    } else {
        ResetDecision::Ask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_gate_asks() {
        assert_eq!(confirm(&ResetGate::default()), ResetDecision::Ask);
    }

    #[test]
    fn gate_proceeds_after_first_reset() {
        let gate = ResetGate {
            has_reset: true,
            ..ResetGate::default()
        };
        assert_eq!(gate.confirm(), ResetDecision::Proceed);
    }

    #[test]
    fn hint_flags_do_not_affect_decision() {
        let gate = ResetGate {
            has_reset: false,
            has_started: true,
            has_stopped: true,
        };
        assert_eq!(gate.confirm(), ResetDecision::Ask);
    }

    #[test]
    fn missing_fields_deserialize_to_false() {
        let gate: ResetGate = serde_json::from_str(r#"{"has_reset":true}"#).unwrap();
        assert!(gate.has_reset);
        assert!(!gate.has_started);
        assert!(!gate.has_stopped);
    }
}
