//! Why a reservation command was rejected.

use crate::types::UserId;
use chrono::NaiveTime;
use thiserror::Error;

/// Rejection reasons recorded in `AppState::last_error`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// The id is already registered
    #[error("ID '{0}' sudah terdaftar")]
    DuplicateAccount(UserId),

    /// No account with this id
    #[error("akun '{0}' tidak ditemukan")]
    UnknownAccount(UserId),

    /// Password is below the configured minimum length
    #[error("password terlalu pendek (min {min})")]
    PasswordTooShort {
        /// Minimum length in characters
        min: usize,
    },

    /// A required field was blank
    #[error("{field} tidak boleh kosong")]
    EmptyField {
        /// Field label
        field: &'static str,
    },

    /// Not a `YYYY-MM-DD` calendar date
    #[error("format tanggal tidak valid: '{0}'")]
    InvalidDate(String),

    /// Not an `HH:MM` clock time
    #[error("format jam tidak valid: '{0}'")]
    InvalidTime(String),

    /// End time not after start time
    #[error(
        "jam selesai ({}) harus lebih besar dari jam mulai ({})",
        .end.format("%H:%M"),
        .start.format("%H:%M")
    )]
    TimeOrder {
        /// Requested start
        start: NaiveTime,
        /// Requested end
        end: NaiveTime,
    },

    /// Booking position outside the user's list
    #[error("peminjaman indeks {index} tidak ada (jumlah: {len})")]
    IndexOutOfRange {
        /// 0-based position requested
        index: usize,
        /// Number of bookings the user has
        len: usize,
    },
}
