//! Designer placeholder registry
//!
//! Badge/ticket templates reference named placeholders; each one renders a
//! value (text or an image reference) from an already-materialized domain
//! record. The open class hierarchy of the original system is replaced by
//! a closed enum with one variant per placeholder kind, registered in a
//! static name table.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::designer::models::{
    format_full_name, Event, FixedItem, NameOptions, PersonInfo, Registration,
};

/// Placeholder grouping shown in the template editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderGroup {
    Registrant,
    Event,
    Fixed,
}

impl PlaceholderGroup {
    /// Display title of the group
    pub fn title(&self) -> &'static str {
        match self {
            PlaceholderGroup::Registrant => "Registrant Data",
            PlaceholderGroup::Event => "Event Data",
            PlaceholderGroup::Fixed => "Fixed Data",
        }
    }
}

/// Which domain record a placeholder renders from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Event,
    Registration,
    Person,
    Fixed,
}

/// Reference to a stored or derived image; rendering the actual pixels is
/// out of scope for this layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// The event's uploaded logo
    EventLogo(u64),
    /// An image uploaded to the template
    DesignerImage(u64),
    /// QR code payload for a ticket
    TicketQr(String),
}

/// Value produced by rendering a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderValue {
    Text(String),
    Image(ImageRef),
}

impl PlaceholderValue {
    fn text(value: impl Into<String>) -> Self {
        PlaceholderValue::Text(value.into())
    }

    /// Text content, if this value is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PlaceholderValue::Text(text) => Some(text),
            PlaceholderValue::Image(_) => None,
        }
    }
}

/// The domain records available to a render call. Absent records make the
/// placeholders that need them render as empty text, mirroring the
/// forgiving lookups of the original templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderContext<'a> {
    pub event: Option<&'a Event>,
    pub registration: Option<&'a Registration>,
    pub person: Option<&'a PersonInfo>,
    pub item: Option<&'a FixedItem>,
}

impl<'a> RenderContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(mut self, event: &'a Event) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_registration(mut self, registration: &'a Registration) -> Self {
        self.registration = Some(registration);
        self
    }

    pub fn with_person(mut self, person: &'a PersonInfo) -> Self {
        self.person = Some(person);
        self
    }

    pub fn with_item(mut self, item: &'a FixedItem) -> Self {
        self.item = Some(item);
        self
    }

    /// Registration record: explicit, or taken from the person context
    fn registration(&self) -> Option<&'a Registration> {
        self.registration.or(self.person.map(|p| &p.registration))
    }
}

/// The closed set of designer placeholders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    // Event data
    EventTitle,
    EventDescription,
    EventDates,
    EventSpeakers,
    EventVenue,
    EventRoom,
    EventOrganizers,
    CategoryTitle,
    EventLogo,
    // Registrant full-name forms
    FullName,
    FullNameNoTitle,
    FullNameB,
    FullNameBNoTitle,
    FullNameC,
    FullNameCNoTitle,
    FullNameD,
    FullNameDNoTitle,
    // Registrant data
    Title,
    FirstName,
    LastName,
    Email,
    Amount,
    Price,
    RegistrationFriendlyId,
    Affiliation,
    Position,
    Address,
    Country,
    Phone,
    TicketQr,
    // Fixed data
    FixedText,
    FixedImage,
}

impl Placeholder {
    /// Every placeholder, in registration order
    pub const ALL: [Placeholder; 32] = [
        Placeholder::EventTitle,
        Placeholder::EventDescription,
        Placeholder::EventDates,
        Placeholder::EventSpeakers,
        Placeholder::EventVenue,
        Placeholder::EventRoom,
        Placeholder::EventOrganizers,
        Placeholder::CategoryTitle,
        Placeholder::EventLogo,
        Placeholder::FullName,
        Placeholder::FullNameNoTitle,
        Placeholder::FullNameB,
        Placeholder::FullNameBNoTitle,
        Placeholder::FullNameC,
        Placeholder::FullNameCNoTitle,
        Placeholder::FullNameD,
        Placeholder::FullNameDNoTitle,
        Placeholder::Title,
        Placeholder::FirstName,
        Placeholder::LastName,
        Placeholder::Email,
        Placeholder::Amount,
        Placeholder::Price,
        Placeholder::RegistrationFriendlyId,
        Placeholder::Affiliation,
        Placeholder::Position,
        Placeholder::Address,
        Placeholder::Country,
        Placeholder::Phone,
        Placeholder::TicketQr,
        Placeholder::FixedText,
        Placeholder::FixedImage,
    ];

    /// Template name of the placeholder
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::EventTitle => "event_title",
            Placeholder::EventDescription => "event_description",
            Placeholder::EventDates => "event_dates",
            Placeholder::EventSpeakers => "event_speakers",
            Placeholder::EventVenue => "event_venue",
            Placeholder::EventRoom => "event_room",
            Placeholder::EventOrganizers => "event_organizers",
            Placeholder::CategoryTitle => "category_title",
            Placeholder::EventLogo => "event_logo",
            Placeholder::FullName => "full_name",
            Placeholder::FullNameNoTitle => "full_name_no_title",
            Placeholder::FullNameB => "full_name_b",
            Placeholder::FullNameBNoTitle => "full_name_b_no_title",
            Placeholder::FullNameC => "full_name_c",
            Placeholder::FullNameCNoTitle => "full_name_no_title_c",
            Placeholder::FullNameD => "full_name_d",
            Placeholder::FullNameDNoTitle => "full_name_no_title_d",
            Placeholder::Title => "title",
            Placeholder::FirstName => "first_name",
            Placeholder::LastName => "last_name",
            Placeholder::Email => "email",
            Placeholder::Amount => "amount",
            Placeholder::Price => "price",
            Placeholder::RegistrationFriendlyId => "registration_friendly_id",
            Placeholder::Affiliation => "affiliation",
            Placeholder::Position => "position",
            Placeholder::Address => "address",
            Placeholder::Country => "country",
            Placeholder::Phone => "phone",
            Placeholder::TicketQr => "ticket_qr_code",
            Placeholder::FixedText => "fixed",
            Placeholder::FixedImage => "fixed_image",
        }
    }

    /// Human-readable description shown in the editor
    pub fn description(&self) -> &'static str {
        match self {
            Placeholder::EventTitle => "Event Title",
            Placeholder::EventDescription => "Event Description",
            Placeholder::EventDates => "Event Dates",
            Placeholder::EventSpeakers => "Event Speakers/Chairs",
            Placeholder::EventVenue => "Event Venue",
            Placeholder::EventRoom => "Event Room",
            Placeholder::EventOrganizers => "Event Organizers",
            Placeholder::CategoryTitle => "Category Title",
            Placeholder::EventLogo => "Event Logo",
            Placeholder::FullName => "Full Name",
            Placeholder::FullNameNoTitle => "Full Name (no title)",
            Placeholder::FullNameB => "Full Name B",
            Placeholder::FullNameBNoTitle => "Full Name B (no title)",
            Placeholder::FullNameC => "Full Name C",
            Placeholder::FullNameCNoTitle => "Full Name C (no title)",
            Placeholder::FullNameD => "Full Name D (abbrev.)",
            Placeholder::FullNameDNoTitle => "Full Name D (abbrev., no title)",
            Placeholder::Title => "Title",
            Placeholder::FirstName => "First Name",
            Placeholder::LastName => "Last Name",
            Placeholder::Email => "E-mail",
            Placeholder::Amount => "Price (no currency)",
            Placeholder::Price => "Price (with currency)",
            Placeholder::RegistrationFriendlyId => "Registration ID",
            Placeholder::Affiliation => "Institution",
            Placeholder::Position => "Position",
            Placeholder::Address => "Address",
            Placeholder::Country => "Country",
            Placeholder::Phone => "Phone",
            Placeholder::TicketQr => "Ticket QR Code",
            Placeholder::FixedText => "Fixed Text",
            Placeholder::FixedImage => "Fixed Image",
        }
    }

    /// Group the placeholder belongs to
    pub fn group(&self) -> PlaceholderGroup {
        match self {
            Placeholder::EventTitle
            | Placeholder::EventDescription
            | Placeholder::EventDates
            | Placeholder::EventSpeakers
            | Placeholder::EventVenue
            | Placeholder::EventRoom
            | Placeholder::EventOrganizers
            | Placeholder::CategoryTitle
            | Placeholder::EventLogo => PlaceholderGroup::Event,
            Placeholder::FixedText | Placeholder::FixedImage => PlaceholderGroup::Fixed,
            _ => PlaceholderGroup::Registrant,
        }
    }

    /// Domain record the placeholder renders from
    pub fn data_source(&self) -> DataSource {
        match self {
            Placeholder::EventTitle
            | Placeholder::EventDescription
            | Placeholder::EventDates
            | Placeholder::EventSpeakers
            | Placeholder::EventVenue
            | Placeholder::EventRoom
            | Placeholder::EventOrganizers
            | Placeholder::CategoryTitle
            | Placeholder::EventLogo => DataSource::Event,
            Placeholder::FullName
            | Placeholder::FullNameNoTitle
            | Placeholder::FullNameB
            | Placeholder::FullNameBNoTitle
            | Placeholder::FullNameC
            | Placeholder::FullNameCNoTitle
            | Placeholder::FullNameD
            | Placeholder::FullNameDNoTitle
            | Placeholder::FirstName
            | Placeholder::LastName
            | Placeholder::TicketQr => DataSource::Person,
            Placeholder::FixedText | Placeholder::FixedImage => DataSource::Fixed,
            _ => DataSource::Registration,
        }
    }

    /// Whether the placeholder renders an image
    pub fn is_image(&self) -> bool {
        matches!(
            self,
            Placeholder::EventLogo | Placeholder::TicketQr | Placeholder::FixedImage
        )
    }

    /// Whether a template containing this placeholder is a ticket
    pub fn is_ticket(&self) -> bool {
        matches!(self, Placeholder::TicketQr)
    }

    /// Full-name formatting options for the name-form variants
    fn full_name_style(&self) -> Option<(bool, NameOptions)> {
        let default = NameOptions::default();
        match self {
            Placeholder::FullName => Some((true, default)),
            Placeholder::FullNameNoTitle => Some((false, default)),
            Placeholder::FullNameB => Some((
                true,
                NameOptions {
                    last_name_first: false,
                    ..default
                },
            )),
            Placeholder::FullNameBNoTitle => Some((
                false,
                NameOptions {
                    last_name_first: false,
                    ..default
                },
            )),
            Placeholder::FullNameC => Some((
                true,
                NameOptions {
                    last_name_first: false,
                    last_name_upper: true,
                    ..default
                },
            )),
            Placeholder::FullNameCNoTitle => Some((
                false,
                NameOptions {
                    last_name_upper: true,
                    ..default
                },
            )),
            Placeholder::FullNameD => Some((
                true,
                NameOptions {
                    last_name_first: false,
                    last_name_upper: true,
                    abbrev_first_name: true,
                },
            )),
            Placeholder::FullNameDNoTitle => Some((
                false,
                NameOptions {
                    last_name_upper: true,
                    abbrev_first_name: true,
                    ..default
                },
            )),
            _ => None,
        }
    }

    /// Render the placeholder against the given context
    pub fn render(&self, ctx: &RenderContext<'_>) -> PlaceholderValue {
        if let Some((with_title, options)) = self.full_name_style() {
            return render_full_name(ctx, with_title, &options);
        }

        match self {
            Placeholder::EventTitle => event_text(ctx, |e| e.title.clone()),
            Placeholder::EventDescription => event_text(ctx, |e| e.description.clone()),
            Placeholder::EventDates => event_text(ctx, |e| e.date_interval()),
            Placeholder::EventSpeakers => event_text(ctx, |e| e.speakers.join(", ")),
            Placeholder::EventVenue => event_text(ctx, |e| e.venue_name.clone()),
            Placeholder::EventRoom => event_text(ctx, |e| e.room_name.clone()),
            Placeholder::EventOrganizers => event_text(ctx, |e| e.organizer_info.clone()),
            Placeholder::CategoryTitle => {
                event_text(ctx, |e| e.category_title.clone().unwrap_or_default())
            }
            Placeholder::EventLogo => match ctx.event.and_then(|e| e.logo_id) {
                Some(logo_id) => PlaceholderValue::Image(ImageRef::EventLogo(logo_id)),
                None => PlaceholderValue::text(""),
            },
            Placeholder::Title => personal_datum(ctx, "title"),
            Placeholder::FirstName => {
                person_text(ctx, |p| p.first_name.clone())
            }
            Placeholder::LastName => person_text(ctx, |p| p.last_name.clone()),
            Placeholder::Email => registration_text(ctx, |r| r.email.clone()),
            Placeholder::Amount => registration_text(ctx, |r| format!("{:.2}", r.price)),
            Placeholder::Price => {
                registration_text(ctx, |r| format!("{} {:.2}", r.currency, r.price))
            }
            Placeholder::RegistrationFriendlyId => {
                registration_text(ctx, |r| r.friendly_id.to_string())
            }
            Placeholder::Affiliation => personal_datum(ctx, "affiliation"),
            Placeholder::Position => personal_datum(ctx, "position"),
            Placeholder::Address => personal_datum(ctx, "address"),
            Placeholder::Country => personal_datum(ctx, "country"),
            Placeholder::Phone => personal_datum(ctx, "phone"),
            Placeholder::TicketQr => match ctx.registration() {
                Some(registration) => {
                    PlaceholderValue::Image(ImageRef::TicketQr(registration.ticket_uuid.clone()))
                }
                None => PlaceholderValue::text(""),
            },
            Placeholder::FixedText => match ctx.item.and_then(|i| i.text.clone()) {
                Some(text) => PlaceholderValue::Text(text),
                None => PlaceholderValue::text(self.description()),
            },
            Placeholder::FixedImage => match ctx.item.and_then(|i| i.image_id) {
                Some(image_id) => PlaceholderValue::Image(ImageRef::DesignerImage(image_id)),
                None => PlaceholderValue::text(""),
            },
            // Name forms are handled above
            _ => PlaceholderValue::text(""),
        }
    }
}

fn event_text(ctx: &RenderContext<'_>, render: impl Fn(&Event) -> String) -> PlaceholderValue {
    match ctx.event {
        Some(event) => PlaceholderValue::Text(render(event)),
        None => PlaceholderValue::text(""),
    }
}

fn person_text(
    ctx: &RenderContext<'_>,
    render: impl Fn(&PersonInfo) -> String,
) -> PlaceholderValue {
    match ctx.person {
        Some(person) => PlaceholderValue::Text(render(person)),
        None => PlaceholderValue::text(""),
    }
}

fn registration_text(
    ctx: &RenderContext<'_>,
    render: impl Fn(&Registration) -> String,
) -> PlaceholderValue {
    match ctx.registration() {
        Some(registration) => PlaceholderValue::Text(render(registration)),
        None => PlaceholderValue::text(""),
    }
}

fn personal_datum(ctx: &RenderContext<'_>, field: &str) -> PlaceholderValue {
    match ctx.registration() {
        Some(registration) => {
            PlaceholderValue::text(registration.personal_datum(field).unwrap_or(""))
        }
        None => PlaceholderValue::text(""),
    }
}

fn render_full_name(
    ctx: &RenderContext<'_>,
    with_title: bool,
    options: &NameOptions,
) -> PlaceholderValue {
    let person = match ctx.person {
        Some(person) => person,
        None => return PlaceholderValue::text(""),
    };
    // Accompanying persons have no personal data of their own
    let title = if with_title && !person.is_accompanying {
        person.registration.personal_datum("title")
    } else {
        None
    };
    PlaceholderValue::Text(format_full_name(
        &person.first_name,
        &person.last_name,
        title,
        options,
    ))
}

lazy_static! {
    static ref PLACEHOLDERS_BY_NAME: HashMap<&'static str, Placeholder> = Placeholder::ALL
        .iter()
        .map(|placeholder| (placeholder.name(), *placeholder))
        .collect();
}

/// Look up a placeholder by template name
pub fn placeholder(name: &str) -> Option<Placeholder> {
    PLACEHOLDERS_BY_NAME.get(name).copied()
}

/// Placeholders belonging to one editor group, in registration order
pub fn placeholders_for_group(group: PlaceholderGroup) -> Vec<Placeholder> {
    Placeholder::ALL
        .iter()
        .filter(|placeholder| placeholder.group() == group)
        .copied()
        .collect()
}
