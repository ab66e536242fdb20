//! Full console sessions driven by a scripted console.

use sipk::{
    run_session, AppEnvironment, AppReducer, AppState, AppStore, BookingStatus, Room, UserId,
};
use sipk_core::environment::Clock;
use sipk_runtime::Store;
use sipk_testing::{test_clock, ScriptedConsole};
use std::sync::Arc;

fn new_store() -> AppStore {
    Store::new(
        AppState::new(),
        AppReducer::new(),
        AppEnvironment::new(Arc::new(test_clock())),
    )
}

fn run(script: &[&str]) -> (ScriptedConsole, AppState) {
    let mut console = ScriptedConsole::new(script.iter().copied());
    let state = run_session(&mut console, new_store()).unwrap();
    (console, state)
}

const REGISTER_BUDI: [&str; 6] = ["1", "budi", "rahasia", "Budi", "Jl. Mawar 1", "0812"];
const LOGIN_BUDI: [&str; 3] = ["2", "budi", "rahasia"];

/// Register, log in, open the booking menu, and submit one Lab-201 booking
fn with_one_booking(rest: &[&'static str]) -> Vec<&'static str> {
    let mut script: Vec<&str> = REGISTER_BUDI.iter().chain(&LOGIN_BUDI).copied().collect();
    script.extend(["3", "1", "4", "2025-03-10", "08:00", "10:00", "Praktikum"]);
    script.extend(rest);
    script
}

fn budi() -> UserId {
    UserId::new("budi")
}

#[test]
fn register_login_book_and_exit() {
    let script = with_one_booking(&["2", "5", "4", "3"]);
    let (console, state) = run(&script);
    let output = console.output();

    assert!(output.starts_with(&"=".repeat(64)));
    assert!(output.contains("Akun 'budi' berhasil dibuat!"));
    assert!(output.contains("Login berhasil. Selamat datang, Budi!"));
    assert!(output.contains("Pengajuan peminjaman disimpan."));
    assert!(output.contains("1. [PENGAJUAN ] Lab-201 | 2025-03-10 08:00-10:00"));
    assert!(output.contains("   Keperluan: Praktikum"));
    assert!(output.contains("Logout berhasil."));
    assert!(output.ends_with("Terima kasih telah menggunakan SIPK. Sampai jumpa!"));
    assert_eq!(console.remaining_input(), 0);

    let bookings = state.bookings(&budi());
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].room, Room::Lab201);
    assert_eq!(bookings[0].submitted_at, test_clock().now());
}

#[test]
fn registration_reprompts_taken_id_and_short_password() {
    let mut script = REGISTER_BUDI.to_vec();
    script.extend(["1", "budi", "ani", "abc", "abcd", "Ani", "Jl. Melati", "0813", "3"]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("ID sudah terdaftar. Gunakan ID lain."), 1);
    assert_eq!(console.count_line("Password terlalu pendek (min 4)."), 1);
    assert_eq!(state.account_count(), 2);
    assert!(state.authenticate(&UserId::new("ani"), "abcd"));
}

#[test]
fn wrong_password_returns_to_main_menu() {
    let mut script = REGISTER_BUDI.to_vec();
    script.extend(["2", "budi", "salah", "3"]);
    let (console, _) = run(&script);

    assert_eq!(console.count_line("ID atau Password salah."), 1);
    assert_eq!(console.count_line("=== Menu Utama ==="), 3);
    assert_eq!(console.count_line("=== Menu Pengguna ==="), 0);
}

#[test]
fn end_of_input_ends_session_cleanly() {
    let (console, state) = run(&["1", "budi"]);

    assert_eq!(state.account_count(), 0);
    assert!(console.output().contains("Buat Password (min 4 karakter): "));
}

#[test]
fn invalid_menu_choice_reprompts() {
    let (console, _) = run(&["0", "empat", "3"]);

    assert_eq!(console.count_line("Masukkan angka 1..3 sesuai menu."), 2);
    assert_eq!(
        console
            .prompts()
            .iter()
            .filter(|p| p.as_str() == "Pilih menu (1-3): ")
            .count(),
        3
    );
}

#[test]
fn booking_form_reprompts_until_valid() {
    let mut script: Vec<&str> = REGISTER_BUDI.iter().chain(&LOGIN_BUDI).copied().collect();
    script.extend([
        "3", "1", // booking menu, create
        "9", "1", // room
        "2025-02-30", "", "2025-03-11", // date
        "10:00", "09:00", // unordered
        "25:00", "09:00", // malformed
        "08:00", "09:00", // ok
        "Kuliah Umum",
    ]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("Masukkan angka 1..6 sesuai menu."), 1);
    assert_eq!(console.count_line("Format tanggal tidak valid."), 1);
    assert_eq!(console.count_line("Input tidak boleh kosong. Coba lagi."), 1);
    assert_eq!(
        console.count_line("Jam selesai harus lebih besar dari jam mulai."),
        1
    );
    assert_eq!(console.count_line("Format jam tidak valid."), 1);

    let bookings = state.bookings(&budi());
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].room, Room::Kelas101);
    assert_eq!(bookings[0].time.to_string(), "08:00-09:00");
    assert_eq!(bookings[0].purpose, "Kuliah Umum");
}

#[test]
fn update_keeps_old_values_for_bad_input() {
    let script = with_one_booking(&[
        "3", // update
        "x", "1", // selection
        "y", "6", // new room
        "2025-13-01", // bad date, kept
        "13:00", "12:00", // unordered, kept
        "", // purpose kept
        "7", "2", // status
    ]);
    let (console, state) = run(&script);

    assert_eq!(
        console.count_line("Masukkan angka 1..1 atau 'b' untuk batal."),
        1
    );
    assert_eq!(console.count_line("Format tanggal salah. Dibiarkan lama."), 1);
    assert_eq!(
        console.count_line("Jam tidak valid/berurutan. Dibiarkan nilai lama."),
        1
    );
    assert_eq!(console.count_line("Masukan tidak valid."), 1);
    assert_eq!(console.count_line("Peminjaman diperbarui."), 1);

    let booking = &state.bookings(&budi())[0];
    assert_eq!(booking.room, Room::Aula301);
    assert_eq!(booking.status, BookingStatus::Approved);
    assert_eq!(booking.date.to_string(), "2025-03-10");
    assert_eq!(booking.time.to_string(), "08:00-10:00");
    assert_eq!(booking.purpose, "Praktikum");
}

#[test]
fn update_with_all_blank_answers_changes_nothing_but_timestamp() {
    let script = with_one_booking(&["3", "1", "n", "", "", "", "", ""]);
    let (_, state) = run(&script);

    let booking = &state.bookings(&budi())[0];
    assert_eq!(booking.room, Room::Lab201);
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.purpose, "Praktikum");
}

#[test]
fn cancel_flow() {
    let script = with_one_booking(&["4", "b", "4", "1", "4", "3"]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("Dibatalkan."), 1);
    assert_eq!(
        console.count_line("Peminjaman Lab-201 pada 2025-03-10 dibatalkan."),
        1
    );
    // Both the delete and update screens report the empty list
    assert_eq!(console.count_line("(Belum ada peminjaman)"), 2);
    assert!(state.bookings(&budi()).is_empty());
}

#[test]
fn profile_update_keeps_blank_fields() {
    let mut script: Vec<&str> = REGISTER_BUDI.iter().chain(&LOGIN_BUDI).copied().collect();
    script.extend(["2", "", "Jl. Kenanga 5", "  ", "1"]);
    let (console, state) = run(&script);

    assert!(console.output().contains("Profil berhasil diperbarui."));
    assert!(console
        .output()
        .contains("ID     : budi\nNama   : Budi\nAlamat : Jl. Kenanga 5\nHP     : 0812"));
    assert_eq!(
        state.profile(&budi()).map(|p| p.address.as_str()),
        Some("Jl. Kenanga 5")
    );
}

#[test]
fn update_moves_date_and_hours() {
    let script = with_one_booking(&[
        "3", "1", // update first booking
        "n", // same room
        "2025-04-01",
        "13:00", "15:00",
        "", "",
    ]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("Peminjaman diperbarui."), 1);
    assert_eq!(console.count_line("Format tanggal salah. Dibiarkan lama."), 0);

    let booking = &state.bookings(&budi())[0];
    assert_eq!(booking.date.to_string(), "2025-04-01");
    assert_eq!(booking.time.to_string(), "13:00-15:00");
    assert_eq!(booking.room, Room::Lab201);
    assert_eq!(booking.purpose, "Praktikum");
}

#[test]
fn update_with_only_start_time_keeps_hours_silently() {
    let script = with_one_booking(&["3", "1", "n", "", "14:00", "", "", ""]);
    let (console, state) = run(&script);

    assert_eq!(
        console.count_line("Jam tidak valid/berurutan. Dibiarkan nilai lama."),
        0
    );
    assert_eq!(console.count_line("Peminjaman diperbarui."), 1);
    assert_eq!(state.bookings(&budi())[0].time.to_string(), "08:00-10:00");
}

#[test]
fn status_choice_must_be_exact_digit() {
    let script = with_one_booking(&["3", "1", "n", "", "", "", "", "02", "+2", " 3 "]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("Masukan tidak valid."), 2);
    assert_eq!(state.bookings(&budi())[0].status, BookingStatus::Rejected);
}

#[test]
fn room_choice_reprompts_until_in_range() {
    let script = with_one_booking(&["3", "1", "y", "0", "7", "dua", "2", "", "", "", "", ""]);
    let (console, state) = run(&script);

    assert_eq!(console.count_line("Masukkan angka 1..6 sesuai menu."), 3);
    assert_eq!(console.count_line("Masukkan pilihan: "), 5);
    assert_eq!(state.bookings(&budi())[0].room, Room::Kelas102);
}

#[test]
fn registration_asks_for_name() {
    let (console, _) = run(&REGISTER_BUDI);

    let prompts = console.prompts();
    let id_at = prompts.iter().position(|p| p == "Buat ID (username/NIM): ");
    let name_at = prompts.iter().position(|p| p == "Nama: ");
    assert!(
        matches!((id_at, name_at), (Some(id), Some(name)) if id < name),
        "{prompts:?}"
    );
    assert!(prompts.iter().any(|p| p == "Alamat: "));
}
