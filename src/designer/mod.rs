//! Designer placeholder layer
//!
//! The producer side of the pipeline: domain records for badge/ticket
//! templates, the placeholder registry that renders them into values, and
//! helpers that snapshot the records into fossils for the serialization
//! engine.
//!
//! # Architecture
//!
//! - `models`: Domain records (Event, Registration, PersonInfo, FixedItem)
//! - `placeholders`: Closed placeholder set with a static name table

pub mod models;
pub mod placeholders;

pub use models::{format_full_name, Event, FixedItem, NameOptions, PersonInfo, Registration};
pub use placeholders::{
    placeholder, placeholders_for_group, DataSource, ImageRef, Placeholder, PlaceholderGroup,
    PlaceholderValue, RenderContext,
};

use crate::core::models::Fossil;

/// Snapshot an event into a fossil
pub fn event_fossil(event: &Event) -> Fossil {
    let speakers: Vec<Fossil> = event
        .speakers
        .iter()
        .map(|name| Fossil::new("EventPerson").with_field("fullName", name.clone()))
        .collect();

    let mut fossil = Fossil::new("Event")
        .with_variant("designerEvent")
        .with_field("title", event.title.clone())
        .with_field("description", event.description.clone())
        .with_field("startDate", event.start_dt)
        .with_field("endDate", event.end_dt)
        .with_field("venue", event.venue_name.clone())
        .with_field("room", event.room_name.clone())
        .with_field("organizers", event.organizer_info.clone())
        .with_field("speakers", speakers);
    if let Some(category_title) = &event.category_title {
        fossil.set_field("category", category_title.clone());
    }
    fossil
}

/// Snapshot a registration, with its event, into a fossil
pub fn registration_fossil(event: &Event, registration: &Registration) -> Fossil {
    Fossil::new("Registration")
        .with_variant("designerRegistrant")
        .with_id(registration.friendly_id)
        .with_field(
            "fullName",
            format_full_name(
                &registration.first_name,
                &registration.last_name,
                registration.personal_datum("title"),
                &NameOptions::default(),
            ),
        )
        .with_field("email", registration.email.clone())
        .with_field("price", registration.price)
        .with_field("currency", registration.currency.clone())
        .with_field("event", event_fossil(event))
}
