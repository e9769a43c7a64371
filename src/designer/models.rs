//! Domain records rendered by the designer placeholders
//!
//! Minimal snapshots of the event/registration entities a badge or ticket
//! template draws from. They arrive fully materialized; nothing here
//! fetches data.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An event as seen by the badge designer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub description: String,
    pub venue_name: String,
    pub room_name: String,
    pub organizer_info: String,
    /// Title of the event's category; `None` for unlisted events
    pub category_title: Option<String>,
    pub start_dt: NaiveDateTime,
    pub end_dt: NaiveDateTime,
    /// Speaker/chair display names
    pub speakers: Vec<String>,
    /// Reference to the stored logo image, if the event has one
    pub logo_id: Option<u64>,
}

impl Event {
    /// Human-readable span of the event dates.
    ///
    /// Single-day events show the start date and time; events within one
    /// month collapse to a day range; anything else shows both dates.
    pub fn date_interval(&self) -> String {
        let start = self.start_dt;
        let end = self.end_dt;
        if start.date() == end.date() {
            start.format("%-d %B %Y %H:%M").to_string()
        } else if start.date().with_day(1) == end.date().with_day(1) {
            format!(
                "{}\u{2013}{} {}",
                start.format("%-d"),
                end.format("%-d"),
                start.format("%B %Y")
            )
        } else {
            format!(
                "{} to {}",
                start.format("%-d %B %Y"),
                end.format("%-d %B %Y")
            )
        }
    }
}

/// A registration record for one registrant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub friendly_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub price: f64,
    pub currency: String,
    /// Opaque ticket identifier encoded into the ticket QR code
    pub ticket_uuid: String,
    /// Free-form personal data fields (title, affiliation, phone, ...)
    #[serde(default)]
    pub personal_data: HashMap<String, String>,
}

impl Registration {
    /// Look up a personal data field by name
    pub fn personal_datum(&self, field: &str) -> Option<&str> {
        self.personal_data.get(field).map(String::as_str)
    }
}

/// Render context for one person on a badge: either the registrant or an
/// accompanying person attached to the registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInfo {
    pub first_name: String,
    pub last_name: String,
    pub is_accompanying: bool,
    pub registration: Registration,
}

/// A fixed template item (static text or a stored image)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixedItem {
    pub text: Option<String>,
    pub image_id: Option<u64>,
}

/// Options controlling full-name formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameOptions {
    pub last_name_first: bool,
    pub last_name_upper: bool,
    pub abbrev_first_name: bool,
}

impl Default for NameOptions {
    fn default() -> Self {
        Self {
            last_name_first: true,
            last_name_upper: false,
            abbrev_first_name: false,
        }
    }
}

/// Format a person's full name.
///
/// With an empty first name only the last name is used. The title, when
/// given, is prepended to whichever form the options select.
pub fn format_full_name(
    first_name: &str,
    last_name: &str,
    title: Option<&str>,
    options: &NameOptions,
) -> String {
    let last_name = if options.last_name_upper {
        last_name.to_uppercase()
    } else {
        last_name.to_string()
    };

    let full_name = if first_name.is_empty() {
        last_name
    } else {
        let first_name = if options.abbrev_first_name {
            match first_name.chars().next() {
                Some(initial) => format!("{}.", initial.to_uppercase()),
                None => String::new(),
            }
        } else {
            first_name.to_string()
        };
        if options.last_name_first {
            format!("{last_name}, {first_name}")
        } else {
            format!("{first_name} {last_name}")
        }
    };

    match title {
        Some(title) if !title.is_empty() => format!("{title} {full_name}"),
        _ => full_name,
    }
}
