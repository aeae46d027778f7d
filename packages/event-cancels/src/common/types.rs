// Common types used across the kernel and domain layers

use std::fmt;

/// Event identifier shared by a header and all of its dependents.
pub type EventId = i32;

/// Entity types the cascade can touch.
///
/// Each kind knows the SQL function name its records are written under and
/// the message reported when a write for that kind is not acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Header,
    Campaign,
    Game,
    PointTransaction,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Header,
        EntityKind::Campaign,
        EntityKind::Game,
        EntityKind::PointTransaction,
    ];

    /// Parse an accepter name. Unknown names yield `None`.
    pub fn from_accepter(name: &str) -> Option<Self> {
        match name {
            "Header" => Some(Self::Header),
            "Campaign" => Some(Self::Campaign),
            "Game" => Some(Self::Game),
            "PointTransaction" => Some(Self::PointTransaction),
            _ => None,
        }
    }

    pub fn accepter_name(self) -> &'static str {
        match self {
            Self::Header => "Header",
            Self::Campaign => "Campaign",
            Self::Game => "Game",
            Self::PointTransaction => "PointTransaction",
        }
    }

    /// Function name sent with every persistence command for this kind.
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Header => "EventHeader",
            Self::Campaign => "EventCampaign",
            Self::Game => "EventGame",
            Self::PointTransaction => "EventPointTransaction",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Header => "Header Data cannot cancel",
            Self::Campaign => "Event Campaign Data cannot cancel",
            Self::Game => "Event Game Data cannot cancel",
            Self::PointTransaction => "Event PointTransaction Data cannot cancel",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepter_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_accepter(kind.accepter_name()), Some(kind));
        }
    }

    #[test]
    fn unknown_accepters_are_ignored() {
        assert_eq!(EntityKind::from_accepter("Item"), None);
        assert_eq!(EntityKind::from_accepter("header"), None);
        assert_eq!(EntityKind::from_accepter(""), None);
    }

    #[test]
    fn failure_messages_name_the_entity() {
        assert_eq!(
            EntityKind::PointTransaction.failure_message(),
            "Event PointTransaction Data cannot cancel"
        );
        assert_eq!(EntityKind::Header.failure_message(), "Header Data cannot cancel");
    }
}
