use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::ExampleData;

/// Outcome of a single seat reservation attempt. Only `Booked` changes the
/// grid; the other outcomes leave it exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatOutcome {
    Booked,
    Taken,
    OutOfBounds,
}

/// A train and its route. The order of `stations` encodes the direction of
/// travel; the seat grid has one row per coach and one column per seat slot,
/// with 0 marking a free seat and 1 a booked one. The grid dimensions are
/// fixed for the life of the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub train_id: Id<Train>,
    pub train_no: String,
    pub stations: Vec<String>,
    pub station_times: IndexMap<String, String>,
    pub seats: Vec<Vec<u8>>,
}

impl HasId for Train {
    type IdType = String;
}

impl Train {
    /// Index of the first station matching `name`, ignoring ASCII case.
    /// Routes with duplicate station names resolve to the first occurrence;
    /// anything beyond that is undefined upstream.
    pub fn station_index(&self, name: &str) -> Option<usize> {
        self.stations
            .iter()
            .position(|station| station.eq_ignore_ascii_case(name))
    }

    /// Whether this train serves the route, i.e. both stations occur and the
    /// source comes strictly before the destination.
    pub fn serves_route(&self, source: &str, destination: &str) -> bool {
        match (
            self.station_index(source),
            self.station_index(destination),
        ) {
            (Some(from), Some(to)) => from < to,
            _ => false,
        }
    }

    pub fn seat(&self, row: usize, col: usize) -> Option<u8> {
        self.seats.get(row).and_then(|coach| coach.get(col)).copied()
    }

    pub fn try_book_seat(&mut self, row: usize, col: usize) -> SeatOutcome {
        match self.seats.get_mut(row).and_then(|coach| coach.get_mut(col)) {
            None => SeatOutcome::OutOfBounds,
            Some(cell) if *cell != 0 => SeatOutcome::Taken,
            Some(cell) => {
                *cell = 1;
                SeatOutcome::Booked
            }
        }
    }
}

impl fmt::Display for Train {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train {} ({}): {}",
            self.train_no,
            self.train_id,
            self.stations.join(" -> ")
        )
    }
}

impl ExampleData for Train {
    fn example_data() -> Self {
        Train {
            train_id: Id::new("t1".to_owned()),
            train_no: "12345".to_owned(),
            stations: vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
            station_times: IndexMap::from([
                ("A".to_owned(), "08:00".to_owned()),
                ("B".to_owned(), "09:30".to_owned()),
                ("C".to_owned(), "11:00".to_owned()),
            ]),
            seats: vec![vec![0, 0], vec![0, 0]],
        }
    }
}
