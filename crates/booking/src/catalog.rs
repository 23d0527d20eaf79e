use std::path::PathBuf;
use std::sync::Arc;

use model::Train;
use storage::RecordStore;

use crate::error::BookingError;
use crate::events::{Event, EventSink};
use crate::Result;

/// All known trains, backed by one JSON document. Train ids compare
/// case-insensitively; both `add` and `update` are upserts that rewrite the
/// whole catalog under the store's exclusive lock.
pub struct TrainCatalog {
    pub(crate) store: RecordStore<Train>,
    events: Arc<dyn EventSink>,
}

impl TrainCatalog {
    pub fn open(path: impl Into<PathBuf>, events: Arc<dyn EventSink>) -> Result<Self> {
        Ok(Self {
            store: RecordStore::open(path)?,
            events,
        })
    }

    /// Trains that serve the route, i.e. contain both stations with the
    /// source strictly before the destination (matched case-insensitively).
    /// No match is `NotFound` rather than an empty list, so callers have to
    /// handle the "no route" case explicitly.
    pub fn search(&self, source: &str, destination: &str) -> Result<Vec<Train>> {
        if source.trim().is_empty() || destination.trim().is_empty() {
            return Err(BookingError::invalid_argument(
                "search",
                "source and destination must not be blank",
            ));
        }

        let matches = self.store.read(|trains| {
            trains
                .iter()
                .filter(|train| train.serves_route(source, destination))
                .cloned()
                .collect::<Vec<_>>()
        });

        if matches.is_empty() {
            return Err(BookingError::not_found(
                "search",
                format!("{source} -> {destination}"),
            ));
        }
        Ok(matches)
    }

    pub fn find_by_id(&self, train_id: &str) -> Option<Train> {
        self.store.read(|trains| {
            trains
                .iter()
                .find(|train| id_matches(train, train_id))
                .cloned()
        })
    }

    /// Appends the train, or replaces the existing record when the id is
    /// already present (duplicate adds are redirected to an update).
    pub fn add(&self, train: Train) -> Result<()> {
        let train_id = train.train_id.raw();
        if self.upsert("add", train)? {
            self.events.emit(Event::TrainUpdated { train_id });
        } else {
            self.events.emit(Event::TrainAdded { train_id });
        }
        Ok(())
    }

    /// Replaces the record with the same id. When no record matches, this
    /// degrades to an insert and says so through the event sink.
    pub fn update(&self, train: Train) -> Result<()> {
        let train_id = train.train_id.raw();
        if self.upsert("update", train)? {
            self.events.emit(Event::TrainUpdated { train_id });
        } else {
            self.events.emit(Event::UpdateInsertedNew { train_id });
        }
        Ok(())
    }

    /// Replace-or-append under a single lock. `true` when an existing record
    /// was replaced. Shared by `add` and `update` so neither ever re-enters
    /// the store lock through the other.
    fn upsert(&self, operation: &'static str, train: Train) -> Result<bool> {
        if train.train_id.raw_ref::<str>().trim().is_empty() {
            return Err(BookingError::invalid_argument(
                operation,
                "train id must not be blank",
            ));
        }

        let train_id = train.train_id.raw();
        let replaced = self.store.mutate(move |trains| {
            match trains.iter().position(|existing| id_matches(existing, &train_id)) {
                Some(index) => {
                    trains[index] = train;
                    Some(true)
                }
                None => {
                    trains.push(train);
                    Some(false)
                }
            }
        })?;
        Ok(replaced.unwrap_or(false))
    }
}

pub(crate) fn id_matches(train: &Train, train_id: &str) -> bool {
    train.train_id.raw_ref::<str>().eq_ignore_ascii_case(train_id)
}
