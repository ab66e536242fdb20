//! End-to-end report output and iterator properties.

use payroll_stream::report::{format_rupiah, group_thousands, EXHAUSTED};
use payroll_stream::{
    aggregate, dataset, run, Amount, Contributions, Employee, InvalidEmployeeNames, ReportError,
};
use proptest::prelude::*;

fn render() -> String {
    let mut out = Vec::new();
    run(&mut out, &dataset()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn report_contains_every_section() {
    let text = render();

    for heading in [
        "SOAL 1: FILTER KARYAWAN AKTIF (iterator adapter)",
        "SOAL 2: NAMA KARYAWAN DATA INVALID (iterator manual)",
        "SOAL 3: KONTRIBUSI KOMPENSASI KARYAWAN (iterator manual)",
        "FITUR 1: ANALISIS DATA DENGAN MAP & FILTER",
        "FITUR 2: AGREGASI DENGAN FOLD & REDUCE",
        "FITUR 3: PENGELOMPOKAN BERDASARKAN KATEGORI GAJI",
        "FITUR 4: PEMROSESAN REKURSIF",
        "RANGKUMAN HASIL PENGOLAHAN DATA",
    ] {
        assert!(text.contains(heading), "missing section {heading}");
    }

    // Four drained sequences, each ending the same way
    assert_eq!(text.matches(EXHAUSTED).count(), 4);
}

#[test]
fn report_lines_for_dataset() {
    let text = render();

    assert!(text.contains("Total data karyawan: 10"));
    assert!(text.contains("Hasil akhir: 8 karyawan aktif ditemukan"));
    assert!(text.contains(
        r#"Yield: {"nama":"Fitra","gaji":4500000,"bonus":null,"status_aktif":true}"#
    ));
    assert!(text.contains("Output: Radan"));
    assert!(text.contains(">>> Total kompensasi semua karyawan valid: 28,000,000"));
    assert!(text.contains(
        r#"Output: {"nama":"Hakim","kompensasi":6200000,"kontribusi":"22.14%"}"#
    ));
    assert!(text.contains("Total kompensasi: Rp 40,800,000"));
    assert!(text.contains("Top employee: Adit"));
    assert!(text.contains("Average: Rp 5,828,571"));
    assert!(text.contains(r#"Senior     | Count: 1 | Names: ["Radan"]"#));
    assert!(text.contains(r#"Junior     | Count: 2 | Names: ["Faizal", "Rama"]"#));
    assert!(text.contains("Match: true"));
    assert!(text.contains("Senior pertama: Adit"));
    assert!(text.contains(r#"2. Karyawan data invalid: 3 orang - ["Fitra", "Radan", "Rama"]"#));
}

#[test]
fn error_is_printed_then_returned() {
    let employees = vec![Employee::new(
        "Kosong",
        Amount::Text("rahasia".to_string()),
        Amount::Missing,
        true,
    )];
    let mut out = Vec::new();

    let err = run(&mut out, &employees).unwrap_err();

    assert!(matches!(err, ReportError::NoValidEmployees));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Error dalam eksekusi: tidak ada karyawan"));
}

fn amount() -> impl Strategy<Value = Amount> {
    prop_oneof![
        (0i64..10_000_000).prop_map(Amount::Value),
        Just(Amount::Missing),
        "[a-z ]{1,10}".prop_map(Amount::Text),
    ]
}

fn employee() -> impl Strategy<Value = Employee> {
    ("[A-Z][a-z]{2,8}", amount(), amount(), any::<bool>())
        .prop_map(|(name, salary, bonus, active)| Employee::new(name, salary, bonus, active))
}

proptest! {
    #[test]
    fn invalid_and_valid_partition_the_payroll(employees in prop::collection::vec(employee(), 0..20)) {
        let invalid = InvalidEmployeeNames::new(&employees).count();
        let valid = aggregate(&employees).count;
        prop_assert_eq!(invalid + valid, employees.len());
    }

    #[test]
    fn contributions_cover_the_total(employees in prop::collection::vec(employee(), 0..20)) {
        let contributions = Contributions::new(&employees);
        let total = contributions.total();
        let rows: Vec<_> = contributions.collect();

        prop_assert_eq!(rows.iter().map(|r| r.compensation).sum::<i64>(), total);
        for row in &rows {
            prop_assert!(row.share.ends_with('%'));
        }
    }

    #[test]
    fn grouping_round_trips_digits(value in any::<i64>()) {
        let grouped = group_thousands(value);
        prop_assert_eq!(grouped.replace(',', "").parse::<i64>().unwrap(), value);
        prop_assert!(format_rupiah(value).starts_with("Rp "));
    }
}
