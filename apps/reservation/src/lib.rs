//! SIPK, the class reservation system.
//!
//! Users register, log in, edit their profile, and submit, list, edit or
//! cancel room bookings. All data lives in memory for one session.
//!
//! The crate is split the usual way for this architecture:
//!
//! - [`types`]: accounts, profiles, bookings and the `AppAction` enum
//! - [`reducer`]: command validation and event application (pure)
//! - [`validation`] and [`format`]: parsing and rendering (pure)
//! - [`shell`]: menus and prompts over a [`Console`](sipk_runtime::console::Console)
//!
//! # Quick Start
//!
//! ```
//! use sipk::{AppAction, AppEnvironment, AppReducer, AppState, Password, Profile, UserId};
//! use sipk_core::environment::SystemClock;
//! use sipk_runtime::Store;
//! use std::sync::Arc;
//!
//! let env = AppEnvironment::new(Arc::new(SystemClock));
//! let mut store = Store::new(AppState::new(), AppReducer::new(), env);
//!
//! store.send(AppAction::RegisterAccount {
//!     user_id: UserId::new("budi"),
//!     password: Password::new("rahasia"),
//!     profile: Profile::new("Budi", "Jl. Mawar 1", "0812"),
//! })?;
//!
//! assert!(store.state(|s| s.authenticate(&UserId::new("budi"), "rahasia")));
//! # Ok::<(), sipk_runtime::StoreError>(())
//! ```

pub mod error;
pub mod format;
pub mod reducer;
pub mod shell;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::BookingError;
pub use reducer::{AccountPolicy, AppEnvironment, AppReducer};
pub use shell::{run_session, AppStore, Shell, ShellError};
pub use types::{
    AppAction, AppState, Booking, BookingChanges, BookingRequest, BookingStatus, Password,
    Profile, ProfileUpdate, Room, TimeRange, UserId,
};
