//! Domain types for class reservations.
//!
//! Every account owns one profile and an ordered list of bookings. The whole
//! record lives in [`AppState`], which only the reducer mutates.

use crate::error::BookingError;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sipk_macros::Action;
use std::collections::HashMap;

/// Login identifier chosen at registration (username or student number)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId` from its text form
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext account password
///
/// `Debug` is redacted so actions can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a password
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Exact comparison against a login attempt
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Length in characters, ignoring surrounding whitespace
    #[must_use]
    pub fn trimmed_len(&self) -> usize {
        self.0.trim().chars().count()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Personal data attached to an account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Full name
    pub name: String,
    /// Home address
    pub address: String,
    /// Phone number
    pub phone: String,
}

impl Profile {
    /// Creates a profile
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Returns a copy with every non-blank field of `update` applied (trimmed)
    #[must_use]
    pub fn merged(&self, update: &ProfileUpdate) -> Self {
        Self {
            name: override_or_keep(&self.name, &update.name),
            address: override_or_keep(&self.address, &update.address),
            phone: override_or_keep(&self.phone, &update.phone),
        }
    }
}

fn override_or_keep(current: &str, candidate: &str) -> String {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        current.to_string()
    } else {
        candidate.to_string()
    }
}

/// Requested profile changes; blank fields keep the current value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New name, or blank
    pub name: String,
    /// New address, or blank
    pub address: String,
    /// New phone number, or blank
    pub phone: String,
}

/// Bookable rooms, in menu order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    /// Kelas-101
    #[serde(rename = "Kelas-101")]
    Kelas101,
    /// Kelas-102
    #[serde(rename = "Kelas-102")]
    Kelas102,
    /// Kelas-103
    #[serde(rename = "Kelas-103")]
    Kelas103,
    /// Lab-201
    #[serde(rename = "Lab-201")]
    Lab201,
    /// Lab-202
    #[serde(rename = "Lab-202")]
    Lab202,
    /// Aula-301
    #[serde(rename = "Aula-301")]
    Aula301,
}

impl Room {
    /// All rooms in menu order
    pub const ALL: [Self; 6] = [
        Self::Kelas101,
        Self::Kelas102,
        Self::Kelas103,
        Self::Lab201,
        Self::Lab202,
        Self::Aula301,
    ];

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kelas101 => "Kelas-101",
            Self::Kelas102 => "Kelas-102",
            Self::Kelas103 => "Kelas-103",
            Self::Lab201 => "Lab-201",
            Self::Lab202 => "Lab-202",
            Self::Aula301 => "Aula-301",
        }
    }

    /// Room for a 1-based menu number
    #[must_use]
    pub fn from_menu_number(number: usize) -> Option<Self> {
        number.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Approval state of a booking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Submitted, awaiting a decision
    #[default]
    Pending,
    /// Approved
    Approved,
    /// Rejected
    Rejected,
}

impl BookingStatus {
    /// Indonesian label shown to users
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pengajuan",
            Self::Approved => "disetujui",
            Self::Rejected => "ditolak",
        }
    }
}

/// Start and end of a booking on one day; `end` is always after `start`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

/// Unchecked wire form; only reaches [`TimeRange`] through [`TimeRange::new`]
#[derive(Deserialize)]
struct RawTimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = BookingError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Builds a range
    ///
    /// # Errors
    ///
    /// [`BookingError::TimeOrder`] unless `end > start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, BookingError> {
        if end > start {
            Ok(Self { start, end })
        } else {
            Err(BookingError::TimeOrder { start, end })
        }
    }

    /// Parses `HH:MM` start and end strings
    ///
    /// # Errors
    ///
    /// [`BookingError::InvalidTime`] for a malformed string,
    /// [`BookingError::TimeOrder`] if the end is not after the start.
    pub fn parse(start: &str, end: &str) -> Result<Self, BookingError> {
        let start = crate::validation::parse_time(start)?;
        let end = crate::validation::parse_time(end)?;
        Self::new(start, end)
    }

    /// Start time
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// End time
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

/// What a user asks for when submitting a booking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookingRequest {
    /// Requested room
    pub room: Room,
    /// Day of use
    pub date: NaiveDate,
    /// Hours of use
    pub time: TimeRange,
    /// Free-text purpose
    pub purpose: String,
}

/// A stored booking
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Reserved room
    pub room: Room,
    /// Day of use
    pub date: NaiveDate,
    /// Hours of use
    pub time: TimeRange,
    /// Free-text purpose
    pub purpose: String,
    /// Approval state
    pub status: BookingStatus,
    /// When the booking was submitted
    pub submitted_at: DateTime<Utc>,
    /// When the booking last changed
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a pending booking from a request
    #[must_use]
    pub fn from_request(request: BookingRequest, now: DateTime<Utc>) -> Self {
        Self {
            room: request.room,
            date: request.date,
            time: request.time,
            purpose: request.purpose.trim().to_string(),
            status: BookingStatus::Pending,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Returns a copy with `changes` applied; untouched fields are kept
    #[must_use]
    pub fn with_changes(&self, changes: &BookingChanges, now: DateTime<Utc>) -> Self {
        let purpose = changes
            .purpose
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map_or_else(|| self.purpose.clone(), str::to_string);

        Self {
            room: changes.room.unwrap_or(self.room),
            date: changes.date.unwrap_or(self.date),
            time: changes.time.unwrap_or(self.time),
            purpose,
            status: changes.status.unwrap_or(self.status),
            submitted_at: self.submitted_at,
            updated_at: now,
        }
    }
}

/// Optional edits to an existing booking
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingChanges {
    /// Move to another room
    pub room: Option<Room>,
    /// Move to another day
    pub date: Option<NaiveDate>,
    /// New hours (start and end always change together)
    pub time: Option<TimeRange>,
    /// New purpose; blank is ignored
    pub purpose: Option<String>,
    /// New approval state
    pub status: Option<BookingStatus>,
}

/// The whole application record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppState {
    /// Credentials by user
    pub accounts: HashMap<UserId, Password>,
    /// Profiles by user
    pub profiles: HashMap<UserId, Profile>,
    /// Bookings by user, in submission order
    pub bookings: HashMap<UserId, Vec<Booking>>,
    /// Why the last command was rejected (cleared by the next success)
    pub last_error: Option<BookingError>,
}

impl AppState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an account with this id exists
    #[must_use]
    pub fn user_exists(&self, user_id: &UserId) -> bool {
        self.accounts.contains_key(user_id)
    }

    /// Checks login credentials
    #[must_use]
    pub fn authenticate(&self, user_id: &UserId, password: &str) -> bool {
        self.accounts
            .get(user_id)
            .is_some_and(|stored| stored.matches(password))
    }

    /// Profile name, falling back to the id
    #[must_use]
    pub fn display_name(&self, user_id: &UserId) -> String {
        self.profiles
            .get(user_id)
            .map_or_else(|| user_id.to_string(), |p| p.name.clone())
    }

    /// Profile for a user
    #[must_use]
    pub fn profile(&self, user_id: &UserId) -> Option<&Profile> {
        self.profiles.get(user_id)
    }

    /// A user's bookings; empty for unknown users
    #[must_use]
    pub fn bookings(&self, user_id: &UserId) -> &[Booking] {
        self.bookings.get(user_id).map_or(&[], Vec::as_slice)
    }

    /// Number of registered accounts
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

/// Commands and events for the reservation reducer
#[derive(Action, Clone, Debug, PartialEq)]
pub enum AppAction {
    // ========== Commands ==========
    /// Command: Create an account with its profile
    #[command]
    RegisterAccount {
        /// Requested id
        user_id: UserId,
        /// Chosen password
        password: Password,
        /// Initial profile
        profile: Profile,
    },

    /// Command: Merge non-blank fields into a profile
    #[command]
    UpdateProfile {
        /// Profile owner
        user_id: UserId,
        /// Fields to change
        changes: ProfileUpdate,
    },

    /// Command: Append a pending booking
    #[command]
    SubmitBooking {
        /// Booking owner
        user_id: UserId,
        /// What is being booked
        request: BookingRequest,
    },

    /// Command: Edit the booking at `index`
    #[command]
    UpdateBooking {
        /// Booking owner
        user_id: UserId,
        /// 0-based position in the owner's list
        index: usize,
        /// Edits to apply
        changes: BookingChanges,
    },

    /// Command: Remove the booking at `index`
    #[command]
    CancelBooking {
        /// Booking owner
        user_id: UserId,
        /// 0-based position in the owner's list
        index: usize,
    },

    // ========== Events ==========
    /// Event: Account was registered
    #[event]
    AccountRegistered {
        /// New id
        user_id: UserId,
        /// Stored password
        password: Password,
        /// Stored profile
        profile: Profile,
    },

    /// Event: Profile was replaced by its merged version
    #[event]
    ProfileUpdated {
        /// Profile owner
        user_id: UserId,
        /// Profile after the merge
        profile: Profile,
    },

    /// Event: Booking was appended
    #[event]
    BookingSubmitted {
        /// Booking owner
        user_id: UserId,
        /// Stored booking
        booking: Booking,
    },

    /// Event: Booking at `index` was replaced
    #[event]
    BookingUpdated {
        /// Booking owner
        user_id: UserId,
        /// 0-based position
        index: usize,
        /// Booking after the edit
        booking: Booking,
    },

    /// Event: Booking at `index` was removed
    #[event]
    BookingCancelled {
        /// Booking owner
        user_id: UserId,
        /// 0-based position
        index: usize,
    },

    /// Event: Command validation failed
    #[event]
    ValidationFailed {
        /// Why the command was rejected
        error: BookingError,
    },
}
