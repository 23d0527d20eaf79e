use std::sync::Arc;

use chrono::NaiveDate;
use model::{SeatOutcome, Ticket, Train};
use utility::id::Id;
use uuid::Uuid;

use crate::catalog::{id_matches, TrainCatalog};
use crate::config::StorePaths;
use crate::directory::UserDirectory;
use crate::error::BookingError;
use crate::events::{Event, EventSink};
use crate::password::PasswordHasher;
use crate::Result;

/// Orchestrates the train catalog and the user directory: seat maps, seat
/// reservation, ticket issue and cancellation. Seat booking is the one
/// concurrency-sensitive operation here; its check-then-set runs entirely
/// under the catalog store's exclusive lock.
pub struct BookingEngine {
    catalog: TrainCatalog,
    directory: UserDirectory,
    events: Arc<dyn EventSink>,
}

impl BookingEngine {
    pub fn new(catalog: TrainCatalog, directory: UserDirectory, events: Arc<dyn EventSink>) -> Self {
        Self {
            catalog,
            directory,
            events,
        }
    }

    /// Opens both stores under the configured data directory.
    pub fn open(
        paths: &StorePaths,
        hasher: Arc<dyn PasswordHasher>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self> {
        let catalog = TrainCatalog::open(paths.trains_file(), events.clone())?;
        let directory = UserDirectory::open(paths.users_file(), hasher, events.clone())?;
        Ok(Self::new(catalog, directory, events))
    }

    pub fn catalog(&self) -> &TrainCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Snapshot of the train's seat grid. The view does not track later
    /// mutations; re-fetch after booking.
    pub fn list_seats(&self, train_id: &str) -> Result<Vec<Vec<u8>>> {
        let train = self.train_by_id("list_seats", train_id)?;
        Ok(train.seats)
    }

    /// Books the seat at (`row`, `col`) and persists the catalog. `Ok(false)`
    /// means the seat was already taken and nothing changed. Indices outside
    /// the grid are a caller bug regardless of grid contents.
    pub fn book_seat(&self, train_id: &str, row: usize, col: usize) -> Result<bool> {
        if train_id.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "book_seat",
                "train id must not be blank",
            ));
        }

        let mut outcome: Result<bool> = Err(BookingError::not_found("book_seat", train_id));
        self.catalog.store.mutate(|trains| {
            let train = trains.iter_mut().find(|train| id_matches(train, train_id))?;
            match train.try_book_seat(row, col) {
                SeatOutcome::OutOfBounds => {
                    outcome = Err(BookingError::invalid_argument(
                        "book_seat",
                        format!(
                            "seat ({row}, {col}) is outside the grid of train '{train_id}'"
                        ),
                    ));
                    None
                }
                SeatOutcome::Taken => {
                    outcome = Ok(false);
                    None
                }
                SeatOutcome::Booked => {
                    outcome = Ok(true);
                    Some(())
                }
            }
        })?;

        match outcome {
            Ok(true) => self.events.emit(Event::SeatBooked {
                train_id: train_id.to_owned(),
                row,
                col,
            }),
            Ok(false) => self.events.emit(Event::SeatTaken {
                train_id: train_id.to_owned(),
                row,
                col,
            }),
            Err(_) => {}
        }
        outcome
    }

    /// Removes the first ticket with the given id from the user's list and
    /// persists the directory. An absent ticket id is `Ok(false)` with no
    /// mutation; an unknown user is `NotFound`.
    pub fn cancel_booking(&self, user_id: &str, ticket_id: &str) -> Result<bool> {
        if user_id.trim().is_empty() || ticket_id.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "cancel_booking",
                "user id and ticket id must not be blank",
            ));
        }

        let mut user_found = false;
        let removed = self
            .directory
            .store
            .mutate(|users| {
                let user = users
                    .iter_mut()
                    .find(|user| user.user_id.raw_ref::<str>() == user_id)?;
                user_found = true;
                let index = user.ticket_index(ticket_id)?;
                // Physical removal; cancelled tickets leave no tombstone.
                user.tickets_booked.remove(index);
                Some(())
            })?
            .is_some();

        if !user_found {
            return Err(BookingError::not_found("cancel_booking", user_id));
        }
        if removed {
            self.events.emit(Event::BookingCancelled {
                ticket_id: ticket_id.to_owned(),
            });
        } else {
            self.events.emit(Event::TicketMissing {
                ticket_id: ticket_id.to_owned(),
                user_id: user_id.to_owned(),
            });
        }
        Ok(removed)
    }

    /// The full reservation flow: book the seat, issue a ticket carrying a
    /// snapshot of the train, append it to the user's list and persist the
    /// directory. `Ok(None)` means the seat was already taken. The two files
    /// are written independently; there is no cross-file transaction.
    pub fn reserve(
        &self,
        user_id: &str,
        train_id: &str,
        row: usize,
        col: usize,
        source: &str,
        destination: &str,
        date_of_travel: NaiveDate,
    ) -> Result<Option<Ticket>> {
        if user_id.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "reserve",
                "user id must not be blank",
            ));
        }
        if self.directory.find_by_id(user_id).is_none() {
            return Err(BookingError::not_found("reserve", user_id));
        }

        if !self.book_seat(train_id, row, col)? {
            return Ok(None);
        }

        // Snapshot taken after the booking so the ticket shows the seat as taken.
        let train = self.train_by_id("reserve", train_id)?;
        let ticket = Ticket {
            ticket_id: Id::new(Uuid::new_v4().to_string()),
            user_id: Id::new(user_id.to_owned()),
            source: source.to_owned(),
            destination: destination.to_owned(),
            date_of_travel,
            train,
        };

        let issued = ticket.clone();
        self.directory.store.mutate(move |users| {
            let user = users
                .iter_mut()
                .find(|user| user.user_id.raw_ref::<str>() == user_id)?;
            user.tickets_booked.push(issued);
            Some(())
        })?;

        self.events.emit(Event::TicketIssued {
            ticket_id: ticket.ticket_id.raw(),
            user_id: user_id.to_owned(),
        });
        Ok(Some(ticket))
    }

    fn train_by_id(&self, operation: &'static str, train_id: &str) -> Result<Train> {
        if train_id.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                operation,
                "train id must not be blank",
            ));
        }
        self.catalog
            .find_by_id(train_id)
            .ok_or_else(|| BookingError::not_found(operation, train_id))
    }
}
