pub mod campaign;
pub mod game;
pub mod header;
pub mod point_transaction;

pub use campaign::Campaign;
pub use game::Game;
pub use header::Header;
pub use point_transaction::PointTransaction;

use serde::Serialize;

use crate::common::{CancelFlag, EntityKind, EventId};

/// A record owned by an event header whose cancellation flag can be set
/// independently of its siblings.
pub trait DependentRecord: Clone + Serialize + Send + Sync {
    const KIND: EntityKind;

    fn set_event(&mut self, event: EventId);

    fn is_cancelled(&self) -> CancelFlag;

    fn set_cancelled(&mut self, flag: CancelFlag);
}

macro_rules! impl_dependent_record {
    ($record:ty, $kind:expr) => {
        impl DependentRecord for $record {
            const KIND: EntityKind = $kind;

            fn set_event(&mut self, event: EventId) {
                self.event = event;
            }

            fn is_cancelled(&self) -> CancelFlag {
                self.is_cancelled
            }

            fn set_cancelled(&mut self, flag: CancelFlag) {
                self.is_cancelled = flag;
            }
        }
    };
}

impl_dependent_record!(Campaign, EntityKind::Campaign);
impl_dependent_record!(Game, EntityKind::Game);
impl_dependent_record!(PointTransaction, EntityKind::PointTransaction);
