pub mod ticket;
pub mod train;
pub mod user;

pub use ticket::Ticket;
pub use train::{SeatOutcome, Train};
pub use user::{Credentials, NewUser, User};

pub trait ExampleData {
    fn example_data() -> Self;
}
