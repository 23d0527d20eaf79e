/// Structured notifications emitted by the booking components. The sink is
/// injected into each component so tests can assert on what happened without
/// scraping console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    TrainAdded { train_id: String },
    TrainUpdated { train_id: String },
    /// An update found no existing record and degraded to an insert.
    UpdateInsertedNew { train_id: String },
    UserSignedUp { user_id: String },
    DuplicateSignUp { user_id: String },
    UserMissing { name: String },
    SeatBooked { train_id: String, row: usize, col: usize },
    SeatTaken { train_id: String, row: usize, col: usize },
    TicketIssued { ticket_id: String, user_id: String },
    BookingCancelled { ticket_id: String },
    TicketMissing { ticket_id: String, user_id: String },
}

impl Event {
    /// Negative outcomes are still expected outcomes, but worth a warning.
    fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::UpdateInsertedNew { .. }
                | Event::DuplicateSignUp { .. }
                | Event::UserMissing { .. }
                | Event::SeatTaken { .. }
                | Event::TicketMissing { .. }
        )
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// Default sink: forwards every event to the `log` facade.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: Event) {
        if event.is_warning() {
            log::warn!("{:?}", event);
        } else {
            log::info!("{:?}", event);
        }
    }
}
