//! Advisory order status labels
//!
//! The label is a client-side cached hint keyed by order id; the
//! authoritative status lives in the remote system and is refetched on load.
//! Modeling it as a tagged enum with an explicit transition table catches
//! invalid transitions at the boundary instead of trusting free-text strings.

use serde::{Deserialize, Serialize};

/// Lifecycle label for a purchase order, as shown in the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatusLabel {
    /// Order created, not yet approved
    #[serde(rename = "Solicitado")]
    Requested,
    /// Approved, goods not yet received
    #[serde(rename = "Recepción pendiente")]
    ReceptionPending,
    /// Settled with outstanding debt
    #[serde(rename = "Con deuda")]
    Owing,
    /// Fully settled
    #[serde(rename = "Aprobado")]
    Approved,
    /// Rejected (also used as compensation after a failed approve)
    #[serde(rename = "Rechazado")]
    Rejected,
}

impl StatusLabel {
    /// Wire label, matching what the pages display and persist
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Requested => "Solicitado",
            Self::ReceptionPending => "Recepción pendiente",
            Self::Owing => "Con deuda",
            Self::Approved => "Aprobado",
            Self::Rejected => "Rechazado",
        }
    }

    /// Parse a persisted label. Unknown strings yield `None`: stale or
    /// foreign entries are tolerated, never trusted.
    pub fn parse_label(s: &str) -> Option<Self> {
        match s {
            "Solicitado" => Some(Self::Requested),
            "Recepción pendiente" => Some(Self::ReceptionPending),
            "Con deuda" => Some(Self::Owing),
            "Aprobado" => Some(Self::Approved),
            "Rechazado" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal advisory transition.
    ///
    /// Requested fans out to any outcome (an approve may settle the order in
    /// one step). Owing and Approved move between each other and back into
    /// ReceptionPending: a later payment can settle the debt, and a further
    /// receipt can re-open it. Refreshing the same label is always legal.
    pub fn can_transition(&self, next: StatusLabel) -> bool {
        if *self == next {
            return true;
        }
        match self {
            Self::Requested => matches!(
                next,
                Self::ReceptionPending | Self::Rejected | Self::Owing | Self::Approved
            ),
            Self::ReceptionPending => matches!(next, Self::Owing | Self::Approved),
            Self::Owing => matches!(next, Self::ReceptionPending | Self::Approved),
            Self::Approved => matches!(next, Self::ReceptionPending | Self::Owing),
            Self::Rejected => false,
        }
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for label in [
            StatusLabel::Requested,
            StatusLabel::ReceptionPending,
            StatusLabel::Owing,
            StatusLabel::Approved,
            StatusLabel::Rejected,
        ] {
            assert_eq!(StatusLabel::parse_label(label.as_label()), Some(label));
        }
        assert_eq!(StatusLabel::parse_label("garbage"), None);
    }

    #[test]
    fn test_transitions() {
        use StatusLabel::*;
        assert!(Requested.can_transition(ReceptionPending));
        assert!(Requested.can_transition(Rejected));
        assert!(Requested.can_transition(Owing));
        assert!(ReceptionPending.can_transition(Approved));
        assert!(Owing.can_transition(ReceptionPending));
        assert!(Owing.can_transition(Approved));
        assert!(Approved.can_transition(ReceptionPending));
        // A receipt on a settled order can re-open debt
        assert!(Approved.can_transition(Owing));

        assert!(!Rejected.can_transition(Approved));
        assert!(!Approved.can_transition(Requested));
        assert!(!ReceptionPending.can_transition(Requested));

        // Refresh is always legal
        assert!(Owing.can_transition(Owing));
    }

    #[test]
    fn test_serde_uses_wire_labels() {
        let json = serde_json::to_string(&StatusLabel::ReceptionPending).unwrap();
        assert_eq!(json, "\"Recepción pendiente\"");
        let back: StatusLabel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, StatusLabel::ReceptionPending);
    }
}
