use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{train::Train, user::User, ExampleData};

/// A booked seat. Carries a snapshot of the train as it looked at booking
/// time; later catalog updates do not rewrite issued tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub ticket_id: Id<Ticket>,
    pub user_id: Id<User>,
    pub source: String,
    pub destination: String,
    pub date_of_travel: NaiveDate,
    pub train: Train,
}

impl HasId for Ticket {
    type IdType = String;
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ticket {}: {} -> {} on {} (train {})",
            self.ticket_id,
            self.source,
            self.destination,
            self.date_of_travel,
            self.train.train_no
        )
    }
}

impl ExampleData for Ticket {
    fn example_data() -> Self {
        Ticket {
            ticket_id: Id::new("tk1".to_owned()),
            user_id: Id::new("u1".to_owned()),
            source: "A".to_owned(),
            destination: "C".to_owned(),
            date_of_travel: NaiveDate::from_ymd_opt(2026, 9, 1)
                .unwrap_or_default(),
            train: Train::example_data(),
        }
    }
}
