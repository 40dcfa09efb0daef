use serde::{Deserialize, Serialize};

/// Focus timer phases alternate between reading and break periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Reading,
    Break,
}

impl TimerPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Reading => "reading",
            TimerPhase::Break => "break",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            TimerPhase::Reading => TimerPhase::Break,
            TimerPhase::Break => TimerPhase::Reading,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerRef {
    #[serde(rename = "timerId")]
    pub timer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    #[serde(rename = "timerId")]
    pub timer_id: String,
    #[serde(rename = "durationMs", default)]
    pub duration_ms: u64,
    pub phase: Option<TimerPhase>,
    pub status: Option<String>,
    #[serde(rename = "startedAt")]
    pub started_at: Option<String>,
    #[serde(rename = "remainingMs")]
    pub remaining_ms: Option<u64>,
}

impl FocusTimer {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }

    pub fn is_paused(&self) -> bool {
        self.status.as_deref() == Some("paused")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_wire_names() {
        assert_eq!(
            serde_json::to_string(&TimerPhase::Reading).expect("serialize phase"),
            "\"reading\""
        );
        let phase: TimerPhase = serde_json::from_str("\"break\"").expect("parse phase");
        assert_eq!(phase, TimerPhase::Break);
        assert_eq!(phase.other(), TimerPhase::Reading);
    }
}
