//! Text rendering for the console. Pure: every function returns a `String`.

use crate::types::{Booking, Profile, UserId};

/// Main menu; only the first [`VISIBLE_MAIN_ENTRIES`] are offered
pub const MAIN_MENU: [&str; 5] = ["Register", "Login", "Keluar", "Bantuan", "Tentang"];

/// How many main menu entries are shown
pub const VISIBLE_MAIN_ENTRIES: usize = 3;

/// Menu after login
pub const USER_MENU: [&str; 4] = [
    "Lihat Profil",
    "Ubah Profil",
    "Peminjaman Kelas (CRUD)",
    "Logout",
];

/// Booking management menu
pub const CRUD_MENU: [&str; 5] = [
    "Ajukan Peminjaman (Create)",
    "Lihat Daftar Peminjaman (Read)",
    "Ubah Peminjaman (Update)",
    "Batalkan Peminjaman (Delete)",
    "Kembali",
];

/// Shown instead of an empty booking list
pub const EMPTY_BOOKINGS: &str = "(Belum ada peminjaman)";

const BANNER_WIDTH: usize = 64;

/// The entries of [`MAIN_MENU`] that are offered to the user
#[must_use]
pub fn visible_main_menu() -> &'static [&'static str] {
    &MAIN_MENU[..VISIBLE_MAIN_ENTRIES]
}

/// Renders a profile as aligned `label : value` lines
#[must_use]
pub fn format_profile(user_id: &UserId, profile: &Profile) -> String {
    format!(
        "ID     : {user_id}\nNama   : {}\nAlamat : {}\nHP     : {}",
        profile.name, profile.address, profile.phone
    )
}

/// Renders a numbered booking list, or [`EMPTY_BOOKINGS`]
#[must_use]
pub fn format_bookings(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return EMPTY_BOOKINGS.to_string();
    }

    bookings
        .iter()
        .enumerate()
        .map(|(i, booking)| {
            format!(
                "{}. [{:<10}] {} | {} {}\n   Keperluan: {}",
                i + 1,
                booking.status.label().to_uppercase(),
                booking.room,
                booking.date.format("%Y-%m-%d"),
                booking.time,
                booking.purpose
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The welcome banner printed once at startup
#[must_use]
pub fn banner() -> String {
    let heavy = "=".repeat(BANNER_WIDTH);
    let light = "-".repeat(BANNER_WIDTH);

    [
        heavy.clone(),
        "   SELAMAT DATANG DI SISTEM INFORMASI PEMINJAMAN KELAS (SIPK)".to_string(),
        "   *** FUNCTIONAL CORE, IMPERATIVE SHELL ***".to_string(),
        heavy,
        format!(
            "Menu utama berupa array konstan. Slice MAIN_MENU[..{VISIBLE_MAIN_ENTRIES}] =>"
        ),
        format!("-> {:?}", visible_main_menu()),
        light,
        "Daftar kelas (ROOMS) juga berupa array konstan (referensi ruang).".to_string(),
        "State hanya berubah lewat reducer; tampilan dan input ada di shell.".to_string(),
        String::new(),
    ]
    .join("\n")
}
