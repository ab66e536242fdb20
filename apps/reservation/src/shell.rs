//! Interactive menus.
//!
//! The shell owns the console and the store. It reads input, sends commands,
//! and renders whatever state the reducer leaves behind. It never edits
//! state itself.

use crate::error::BookingError;
use crate::format::{self, CRUD_MENU, EMPTY_BOOKINGS, USER_MENU};
use crate::reducer::{AppEnvironment, AppReducer};
use crate::types::{
    AppAction, AppState, BookingChanges, BookingRequest, BookingStatus, Password, Profile,
    ProfileUpdate, Room, TimeRange, UserId,
};
use crate::validation::{self, Selection};
use sipk_runtime::console::{
    prompt_choice, prompt_non_empty, prompt_optional, prompt_until, write_numbered, Console,
    ConsoleError,
};
use sipk_runtime::{Store, StoreError};
use std::io;
use thiserror::Error;

/// Store specialized to the reservation domain
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Failures that end a session abnormally
#[derive(Error, Debug)]
pub enum ShellError {
    /// Prompting failed
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The store refused an action
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<io::Error> for ShellError {
    fn from(err: io::Error) -> Self {
        Self::Console(ConsoleError::Io(err))
    }
}

/// Runs a whole session and returns the final state
///
/// End of input at any prompt ends the session normally.
///
/// # Errors
///
/// Console I/O failures and store feedback-limit errors.
pub fn run_session<C: Console>(console: C, store: AppStore) -> Result<AppState, ShellError> {
    let mut shell = Shell::new(console, store);
    shell.run()?;
    Ok(shell.into_state())
}

/// Menu-driven front end over an [`AppStore`]
pub struct Shell<C> {
    console: C,
    store: AppStore,
}

impl<C: Console> Shell<C> {
    /// Creates a shell
    pub const fn new(console: C, store: AppStore) -> Self {
        Self { console, store }
    }

    /// Consumes the shell and returns the final state
    pub fn into_state(self) -> AppState {
        self.store.into_state()
    }

    /// Prints the banner and runs the main menu until exit or end of input
    ///
    /// # Errors
    ///
    /// Console I/O failures and store feedback-limit errors.
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.console.write_line(&format::banner())?;

        match self.main_menu() {
            Err(ShellError::Console(ConsoleError::InputClosed)) => {
                tracing::info!("Input closed, ending session");
                Ok(())
            },
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<(), ShellError> {
        let entries = format::visible_main_menu();
        loop {
            self.say("=== Menu Utama ===")?;
            write_numbered(&mut self.console, entries)?;
            let choice = prompt_choice(
                &mut self.console,
                &format!("Pilih menu (1-{}): ", entries.len()),
                entries.len(),
            )?;

            match choice {
                1 => self.register()?,
                2 => {
                    if let Some(user_id) = self.login()? {
                        self.user_menu(&user_id)?;
                    }
                },
                _ => {
                    self.say("Terima kasih telah menggunakan SIPK. Sampai jumpa!")?;
                    return Ok(());
                },
            }
        }
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        self.console.write_line(line)
    }

    /// Sends a command and reports why it was rejected, if it was
    fn dispatch(&mut self, action: AppAction) -> Result<Option<BookingError>, ShellError> {
        self.store.send(action)?;
        Ok(self.store.state(|s| s.last_error.clone()))
    }

    // ========== Accounts ==========

    fn register(&mut self) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Registrasi Akun Baru ===")?;

        let user_id = {
            let store = &self.store;
            prompt_until(&mut self.console, "Buat ID (username/NIM): ", |line| {
                let id = line.trim();
                if id.is_empty() {
                    Err("Input tidak boleh kosong. Coba lagi.".to_string())
                } else if store.state(|s| s.user_exists(&UserId::new(id))) {
                    Err("ID sudah terdaftar. Gunakan ID lain.".to_string())
                } else {
                    Ok(UserId::new(id))
                }
            })?
        };

        let min = self.store.environment().policy.min_password_len;
        let password = prompt_until(
            &mut self.console,
            &format!("Buat Password (min {min} karakter): "),
            |line| {
                let password = line.trim();
                if password.is_empty() {
                    Err("Input tidak boleh kosong. Coba lagi.".to_string())
                } else if !validation::is_valid_password(password, min) {
                    Err(format!("Password terlalu pendek (min {min})."))
                } else {
                    Ok(Password::new(password))
                }
            },
        )?;

        let name = prompt_non_empty(&mut self.console, "Nama: ")?;
        let address = prompt_non_empty(&mut self.console, "Alamat: ")?;
        let phone = prompt_non_empty(&mut self.console, "No. HP: ")?;

        let rejected = self.dispatch(AppAction::RegisterAccount {
            user_id: user_id.clone(),
            password,
            profile: Profile::new(name, address, phone),
        })?;

        match rejected {
            None => {
                tracing::info!(user = %user_id, "Account registered");
                self.say(&format!("Akun '{user_id}' berhasil dibuat!"))?;
            },
            Some(error) => self.say(&format!("Registrasi gagal: {error}."))?,
        }
        self.say("")?;
        Ok(())
    }

    fn login(&mut self) -> Result<Option<UserId>, ShellError> {
        self.say("")?;
        self.say("=== Login ===")?;

        let user_id = UserId::new(prompt_non_empty(&mut self.console, "ID: ")?);
        let password = prompt_non_empty(&mut self.console, "Password: ")?;

        if self.store.state(|s| s.authenticate(&user_id, &password)) {
            let name = self.store.state(|s| s.display_name(&user_id));
            tracing::info!(user = %user_id, "Login succeeded");
            self.say(&format!("Login berhasil. Selamat datang, {name}!"))?;
            self.say("")?;
            Ok(Some(user_id))
        } else {
            tracing::info!(user = %user_id, "Login failed");
            self.say("ID atau Password salah.")?;
            self.say("")?;
            Ok(None)
        }
    }

    fn user_menu(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        loop {
            self.say("=== Menu Pengguna ===")?;
            write_numbered(&mut self.console, USER_MENU)?;
            let choice = prompt_choice(
                &mut self.console,
                &format!("Pilih menu (1-{}): ", USER_MENU.len()),
                USER_MENU.len(),
            )?;

            match choice {
                1 => self.show_profile(user_id)?,
                2 => self.update_profile(user_id)?,
                3 => self.booking_menu(user_id)?,
                _ => {
                    self.say("Logout berhasil.")?;
                    self.say("")?;
                    return Ok(());
                },
            }
        }
    }

    fn show_profile(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Profil Saya ===")?;
        let text = self.store.state(|s| {
            s.profile(user_id)
                .map(|p| format::format_profile(user_id, p))
        });
        match text {
            Some(text) => self.say(&text)?,
            None => self.say("Profil tidak ditemukan.")?,
        }
        self.say("")?;
        Ok(())
    }

    fn update_profile(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Ubah Profil ===")?;
        let changes = ProfileUpdate {
            name: prompt_optional(&mut self.console, "Nama (kosongkan jika tidak diubah): ")?,
            address: prompt_optional(&mut self.console, "Alamat (kosongkan jika tidak diubah): ")?,
            phone: prompt_optional(&mut self.console, "No. HP (kosongkan jika tidak diubah): ")?,
        };

        match self.dispatch(AppAction::UpdateProfile {
            user_id: user_id.clone(),
            changes,
        })? {
            None => self.say("Profil berhasil diperbarui.")?,
            Some(error) => self.say(&format!("Profil gagal diperbarui: {error}."))?,
        }
        self.say("")?;
        Ok(())
    }

    // ========== Bookings ==========

    fn booking_menu(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        loop {
            self.say("=== Menu Peminjaman Kelas ===")?;
            write_numbered(&mut self.console, CRUD_MENU)?;
            let choice = prompt_choice(
                &mut self.console,
                &format!("Pilih menu (1-{}): ", CRUD_MENU.len()),
                CRUD_MENU.len(),
            )?;

            match choice {
                1 => self.create_booking(user_id)?,
                2 => self.list_bookings(user_id)?,
                3 => self.update_booking(user_id)?,
                4 => self.cancel_booking(user_id)?,
                _ => {
                    self.say("Kembali ke menu pengguna.")?;
                    self.say("")?;
                    return Ok(());
                },
            }
        }
    }

    fn select_room(&mut self) -> Result<Room, ShellError> {
        self.say("Pilih Kelas:")?;
        write_numbered(&mut self.console, Room::ALL)?;
        let max = Room::ALL.len();
        Ok(prompt_until(&mut self.console, "Masukkan pilihan: ", |line| {
            validation::parse_choice(line, max)
                .and_then(Room::from_menu_number)
                .ok_or_else(|| format!("Masukkan angka 1..{max} sesuai menu."))
        })?)
    }

    fn prompt_date(&mut self) -> Result<chrono::NaiveDate, ShellError> {
        Ok(prompt_until(&mut self.console, "Tanggal (YYYY-MM-DD): ", |line| {
            if validation::is_non_empty(line) {
                validation::parse_date(line).map_err(|_| "Format tanggal tidak valid.".to_string())
            } else {
                Err("Input tidak boleh kosong. Coba lagi.".to_string())
            }
        })?)
    }

    fn prompt_time_range(&mut self) -> Result<TimeRange, ShellError> {
        loop {
            let start = prompt_non_empty(&mut self.console, "Jam Mulai (HH:MM): ")?;
            let end = prompt_non_empty(&mut self.console, "Jam Selesai (HH:MM): ")?;
            match TimeRange::parse(&start, &end) {
                Ok(range) => return Ok(range),
                Err(BookingError::TimeOrder { .. }) => {
                    self.say("Jam selesai harus lebih besar dari jam mulai.")?;
                },
                Err(_) => self.say("Format jam tidak valid.")?,
            }
        }
    }

    fn create_booking(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Ajukan Peminjaman Kelas ===")?;

        let room = self.select_room()?;
        let date = self.prompt_date()?;
        let time = self.prompt_time_range()?;
        let purpose = prompt_non_empty(&mut self.console, "Keperluan: ")?;

        match self.dispatch(AppAction::SubmitBooking {
            user_id: user_id.clone(),
            request: BookingRequest {
                room,
                date,
                time,
                purpose,
            },
        })? {
            None => {
                tracing::info!(user = %user_id, %room, %date, "Booking submitted");
                self.say("Pengajuan peminjaman disimpan.")?;
            },
            Some(error) => self.say(&format!("Pengajuan gagal: {error}."))?,
        }
        self.say("")?;
        Ok(())
    }

    fn write_bookings(&mut self, user_id: &UserId) -> Result<usize, ShellError> {
        let (count, text) = self
            .store
            .state(|s| {
                let bookings = s.bookings(user_id);
                (bookings.len(), format::format_bookings(bookings))
            });
        self.say(&text)?;
        Ok(count)
    }

    fn list_bookings(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Daftar Peminjaman Saya ===")?;
        self.write_bookings(user_id)?;
        self.say("")?;
        Ok(())
    }

    /// Shows the list and asks which entry to act on
    ///
    /// Returns `None` when the list is empty or the user cancels.
    fn pick_booking(&mut self, user_id: &UserId) -> Result<Option<usize>, ShellError> {
        let count = self.store.state(|s| s.bookings(user_id).len());
        if count == 0 {
            self.say(EMPTY_BOOKINGS)?;
            self.say("")?;
            return Ok(None);
        }

        self.write_bookings(user_id)?;
        let selection = prompt_until(
            &mut self.console,
            "Pilih nomor data (atau 'b' untuk batal): ",
            |line| {
                validation::parse_selection(line, count)
                    .ok_or_else(|| format!("Masukkan angka 1..{count} atau 'b' untuk batal."))
            },
        )?;

        match selection {
            Selection::Index(index) => Ok(Some(index)),
            Selection::Cancel => {
                self.say("Dibatalkan.")?;
                self.say("")?;
                Ok(None)
            },
        }
    }

    fn prompt_status(&mut self) -> Result<Option<BookingStatus>, ShellError> {
        self.say("Ubah status (opsional): 1) pengajuan  2) disetujui  3) ditolak  4) (lewati)")?;
        Ok(prompt_until(&mut self.console, "Pilihan: ", |line| {
            match line.trim() {
                "" | "4" => Ok(None),
                "1" => Ok(Some(BookingStatus::Pending)),
                "2" => Ok(Some(BookingStatus::Approved)),
                "3" => Ok(Some(BookingStatus::Rejected)),
                _ => Err("Masukan tidak valid.".to_string()),
            }
        })?)
    }

    fn prompt_changes(&mut self) -> Result<BookingChanges, ShellError> {
        self.say("Tekan Enter untuk mempertahankan nilai lama.")?;
        let mut changes = BookingChanges::default();

        let change_room = prompt_optional(&mut self.console, "Ganti kelas? (y/n): ")?;
        if validation::is_yes(&change_room) {
            changes.room = Some(self.select_room()?);
        }

        let date = prompt_optional(&mut self.console, "Tanggal baru (YYYY-MM-DD): ")?;
        if !date.is_empty() {
            match validation::parse_date(&date) {
                Ok(date) => changes.date = Some(date),
                Err(_) => self.say("Format tanggal salah. Dibiarkan lama.")?,
            }
        }

        let start = prompt_optional(&mut self.console, "Jam Mulai baru (HH:MM): ")?;
        let end = prompt_optional(&mut self.console, "Jam Selesai baru (HH:MM): ")?;
        if !start.is_empty() && !end.is_empty() {
            match TimeRange::parse(&start, &end) {
                Ok(range) => changes.time = Some(range),
                Err(_) => self.say("Jam tidak valid/berurutan. Dibiarkan nilai lama.")?,
            }
        }

        let purpose = prompt_optional(&mut self.console, "Keperluan baru: ")?;
        if !purpose.is_empty() {
            changes.purpose = Some(purpose);
        }

        changes.status = self.prompt_status()?;
        Ok(changes)
    }

    fn update_booking(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Ubah Peminjaman ===")?;

        let Some(index) = self.pick_booking(user_id)? else {
            return Ok(());
        };
        let changes = self.prompt_changes()?;

        match self.dispatch(AppAction::UpdateBooking {
            user_id: user_id.clone(),
            index,
            changes,
        })? {
            None => self.say("Peminjaman diperbarui.")?,
            Some(error) => self.say(&format!("Peminjaman gagal diperbarui: {error}."))?,
        }
        self.say("")?;
        Ok(())
    }

    fn cancel_booking(&mut self, user_id: &UserId) -> Result<(), ShellError> {
        self.say("")?;
        self.say("=== Batalkan (Hapus) Peminjaman ===")?;

        let Some(index) = self.pick_booking(user_id)? else {
            return Ok(());
        };
        let Some(target) = self.store.state(|s| s.bookings(user_id).get(index).cloned()) else {
            return Ok(());
        };

        match self.dispatch(AppAction::CancelBooking {
            user_id: user_id.clone(),
            index,
        })? {
            None => self.say(&format!(
                "Peminjaman {} pada {} dibatalkan.",
                target.room,
                target.date.format("%Y-%m-%d")
            ))?,
            Some(error) => self.say(&format!("Pembatalan gagal: {error}."))?,
        }
        self.say("")?;
        Ok(())
    }
}
