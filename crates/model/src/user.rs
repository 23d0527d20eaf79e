use std::fmt;

use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{ExampleData, Ticket};

/// An account as it rests in the user store. Only the hash of the password is
/// ever persisted; the plaintext lives exclusively in the transient request
/// types below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: Id<User>,
    pub name: String,
    pub hashed_password: String,
    #[serde(default)]
    pub tickets_booked: Vec<Ticket>,
}

impl HasId for User {
    type IdType = String;
}

impl User {
    /// Position of the first booked ticket with the given id.
    pub fn ticket_index(&self, ticket_id: &str) -> Option<usize> {
        self.tickets_booked
            .iter()
            .position(|ticket| ticket.ticket_id.raw_ref::<str>() == ticket_id)
    }
}

// The hash stays out of anything rendered for display.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user {} ({}), {} tickets booked",
            self.name,
            self.user_id,
            self.tickets_booked.len()
        )
    }
}

impl ExampleData for User {
    fn example_data() -> Self {
        User {
            user_id: Id::new("u1".to_owned()),
            name: "alex".to_owned(),
            hashed_password: "$example$digest".to_owned(),
            tickets_booked: Vec::new(),
        }
    }
}

/// Login request. Deliberately not serializable: the plaintext password must
/// never reach a file or an externally visible rendering.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

/// Sign-up request. Same rule as [`Credentials`]: the plaintext only exists
/// here until the hashing collaborator has produced a digest.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
    pub password: String,
}
