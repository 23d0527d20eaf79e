use model::{ExampleData, Ticket, Train, User};
use serde_json::{json, Value};

#[test]
fn train_serializes_with_snake_case_keys() {
    let train = Train::example_data();
    let value = serde_json::to_value(&train).expect("train should serialize");

    assert_eq!(value["train_id"], json!("t1"));
    assert_eq!(value["train_no"], json!("12345"));
    assert_eq!(value["stations"], json!(["A", "B", "C"]));
    assert_eq!(value["station_times"]["B"], json!("09:30"));
    assert_eq!(value["seats"], json!([[0, 0], [0, 0]]));
}

#[test]
fn train_round_trip_is_lossless() {
    let train = Train::example_data();
    let json = serde_json::to_string(&train).expect("train should serialize");
    let back: Train = serde_json::from_str(&json).expect("train should parse");

    assert_eq!(back.train_id, train.train_id);
    assert_eq!(back.train_no, train.train_no);
    assert_eq!(back.stations, train.stations);
    assert_eq!(back.station_times, train.station_times);
    assert_eq!(back.seats, train.seats);
}

#[test]
fn station_times_preserve_route_order() {
    let train = Train::example_data();
    let json = serde_json::to_string(&train).expect("train should serialize");
    let back: Train = serde_json::from_str(&json).expect("train should parse");

    let keys: Vec<&String> = back.station_times.keys().collect();
    assert_eq!(keys, vec!["A", "B", "C"]);
}

#[test]
fn unknown_fields_are_ignored_on_input() {
    let mut value = serde_json::to_value(Train::example_data()).unwrap();
    value["introduced_later"] = json!({"schema": 2});

    let train: Train =
        serde_json::from_value(value).expect("unknown fields must not break reads");
    assert_eq!(train.train_no, "12345");
}

#[test]
fn user_round_trip_keeps_tickets_in_booking_order() {
    let mut user = User::example_data();
    let mut first = Ticket::example_data();
    first.ticket_id = utility::id::Id::new("tk-first".to_owned());
    let mut second = Ticket::example_data();
    second.ticket_id = utility::id::Id::new("tk-second".to_owned());
    user.tickets_booked = vec![first, second];

    let json = serde_json::to_string(&user).expect("user should serialize");
    let back: User = serde_json::from_str(&json).expect("user should parse");

    assert_eq!(back.user_id, user.user_id);
    assert_eq!(back.hashed_password, user.hashed_password);
    let ids: Vec<String> = back
        .tickets_booked
        .iter()
        .map(|ticket| ticket.ticket_id.raw())
        .collect();
    assert_eq!(ids, vec!["tk-first", "tk-second"]);
}

#[test]
fn user_without_tickets_field_reads_as_empty_list() {
    let record = json!({
        "user_id": "u9",
        "name": "robin",
        "hashed_password": "$example$digest",
    });

    let user: User = serde_json::from_value(record).expect("user should parse");
    assert!(user.tickets_booked.is_empty());
}

#[test]
fn ticket_round_trip_keeps_the_train_snapshot() {
    let ticket = Ticket::example_data();
    let json = serde_json::to_string(&ticket).expect("ticket should serialize");
    let back: Ticket = serde_json::from_str(&json).expect("ticket should parse");

    assert_eq!(back.ticket_id, ticket.ticket_id);
    assert_eq!(back.user_id, ticket.user_id);
    assert_eq!(back.source, ticket.source);
    assert_eq!(back.destination, ticket.destination);
    assert_eq!(back.date_of_travel, ticket.date_of_travel);
    assert_eq!(back.train.train_id, ticket.train.train_id);
    assert_eq!(back.train.seats, ticket.train.seats);
}

#[test]
fn date_of_travel_serializes_as_calendar_date() {
    let value = serde_json::to_value(Ticket::example_data()).unwrap();
    assert_eq!(value["date_of_travel"], Value::from("2026-09-01"));
}

#[test]
fn user_display_never_contains_the_password_hash() {
    let user = User::example_data();
    let rendered = user.to_string();
    assert!(rendered.contains("alex"));
    assert!(!rendered.contains(&user.hashed_password));
}
