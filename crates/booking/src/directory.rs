use std::path::PathBuf;
use std::sync::Arc;

use model::{Credentials, NewUser, Ticket, User};
use storage::RecordStore;
use utility::id::Id;

use crate::error::BookingError;
use crate::events::{Event, EventSink};
use crate::password::PasswordHasher;
use crate::Result;

/// All known accounts, backed by one JSON document. Only password digests
/// produced by the hashing collaborator ever reach the store.
pub struct UserDirectory {
    pub(crate) store: RecordStore<User>,
    hasher: Arc<dyn PasswordHasher>,
    events: Arc<dyn EventSink>,
}

impl UserDirectory {
    pub fn open(
        path: impl Into<PathBuf>,
        hasher: Arc<dyn PasswordHasher>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self> {
        Ok(Self {
            store: RecordStore::open(path)?,
            hasher,
            events,
        })
    }

    /// Creates the account unless the id is already taken. A duplicate id is
    /// a reportable outcome (`Ok(false)`), not an error, and leaves the
    /// directory untouched.
    pub fn sign_up(&self, new_user: NewUser) -> Result<bool> {
        let NewUser {
            user_id,
            name,
            password,
        } = new_user;
        if user_id.trim().is_empty() || name.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "sign_up",
                "user id and name must not be blank",
            ));
        }

        // Hash outside the store lock; the collaborator is deliberately slow.
        let user = User {
            user_id: Id::new(user_id.clone()),
            name,
            hashed_password: self.hasher.hash(&password),
            tickets_booked: Vec::new(),
        };

        let wanted_id = user_id.clone();
        let inserted = self
            .store
            .mutate(move |users| {
                if users
                    .iter()
                    .any(|existing| existing.user_id.raw_ref::<str>() == wanted_id)
                {
                    return None;
                }
                users.push(user);
                Some(())
            })?
            .is_some();

        if inserted {
            self.events.emit(Event::UserSignedUp { user_id });
        } else {
            self.events.emit(Event::DuplicateSignUp { user_id });
        }
        Ok(inserted)
    }

    /// True iff some record matches the name and the password verifies
    /// against its stored digest. A name match with a wrong password is
    /// plain `false`; nothing distinguishes it from an unknown name.
    pub fn login(&self, credentials: &Credentials) -> Result<bool> {
        if credentials.name.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "login",
                "name must not be blank",
            ));
        }
        Ok(self.lookup(credentials).is_some())
    }

    /// The ordered ticket list of the matching account, or `None` when the
    /// credentials match nothing (reported through the sink, never fatal).
    pub fn fetch_bookings(&self, credentials: &Credentials) -> Result<Option<Vec<Ticket>>> {
        if credentials.name.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "fetch_bookings",
                "name must not be blank",
            ));
        }
        match self.lookup(credentials) {
            Some(user) => Ok(Some(user.tickets_booked)),
            None => {
                self.events.emit(Event::UserMissing {
                    name: credentials.name.clone(),
                });
                Ok(None)
            }
        }
    }

    pub fn find_by_id(&self, user_id: &str) -> Option<User> {
        self.store.read(|users| {
            users
                .iter()
                .find(|user| user.user_id.raw_ref::<str>() == user_id)
                .cloned()
        })
    }

    fn lookup(&self, credentials: &Credentials) -> Option<User> {
        self.store.read(|users| {
            users
                .iter()
                .find(|user| {
                    user.name == credentials.name
                        && self
                            .hasher
                            .verify(&credentials.password, &user.hashed_password)
                })
                .cloned()
        })
    }
}
