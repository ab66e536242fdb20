//! The printed report.
//!
//! Each section drives one of the lazy sequences by hand with `next()` and
//! prints every item as it arrives. The functions return what they printed so
//! the final summary (and tests) can use it.

use crate::analytics::{
    aggregate, filter_recursive, find_recursive, flatten_groups, group_by_category,
    max_recursive, sum_recursive, summaries, Aggregate, CategoryGroup,
};
use crate::employee::{
    categorize, has_valid_data, total_compensation, Category, Employee,
};
use crate::generators::{active_employees, Contribution, Contributions, InvalidEmployeeNames};
use std::io::{self, Write};
use thiserror::Error;

/// Printed when a drained sequence reports `None`
pub const EXHAUSTED: &str = ">>> Iterator sudah selesai! Generator exhausted.";

/// Errors raised while producing the report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing the report failed
    #[error("gagal menulis laporan: {0}")]
    Io(#[from] io::Error),

    /// An item could not be rendered as JSON
    #[error("gagal serialisasi data: {0}")]
    Json(#[from] serde_json::Error),

    /// The summary needs at least one employee with valid figures
    #[error("tidak ada karyawan dengan data gaji dan bonus yang valid")]
    NoValidEmployees,
}

/// What the report computed, section by section
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportSummary {
    /// Active employees yielded in section 1
    pub active_count: usize,
    /// Names yielded in section 2
    pub invalid_names: Vec<String>,
    /// Rows yielded in section 3
    pub contributions: Vec<Contribution>,
    /// Map/filter summaries produced
    pub summary_count: usize,
    /// Fold total over valid employees
    pub total: i64,
    /// Best paid valid employee
    pub top_name: String,
    /// That employee's compensation
    pub top_compensation: i64,
    /// Integer mean over valid employees
    pub average: i64,
    /// Number of salary bands
    pub group_count: usize,
    /// Employees kept by the recursive filter
    pub recursive_count: usize,
    /// Recursive sum over them
    pub recursive_total: i64,
}

/// Formats an integer with `,` between groups of three digits
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Formats an amount as `Rp 1,234,567`
#[must_use]
pub fn format_rupiah(value: i64) -> String {
    format!("Rp {}", group_thousands(value))
}

/// Writes the report, then prints and returns any error
///
/// # Errors
///
/// Whatever [`write_report`] fails with, after the message
/// `Error dalam eksekusi: {err}` has been written to `out`.
pub fn run<W: Write>(out: &mut W, employees: &[Employee]) -> Result<ReportSummary, ReportError> {
    write_report(out, employees).inspect_err(|err| {
        tracing::error!(error = %err, "Report failed");
        // A failure to print the message is dropped; `err` is still returned
        let _ = writeln!(out, "Error dalam eksekusi: {err}");
    })
}

/// Writes every section of the report
///
/// # Errors
///
/// [`ReportError::Io`] or [`ReportError::Json`] on output failures, and
/// [`ReportError::NoValidEmployees`] when no employee has valid figures.
pub fn write_report<W: Write>(
    out: &mut W,
    employees: &[Employee],
) -> Result<ReportSummary, ReportError> {
    banner(out, '=', 80, "PENGOLAHAN DATA KARYAWAN: LAZY ITERATOR & FUNCTIONAL PIPELINE")?;
    writeln!(out, "Total data karyawan: {}", employees.len())?;

    banner(out, '=', 80, "PART 1: LAZY SEQUENCE")?;
    let active_count = active_section(out, employees)?;
    let invalid_names = invalid_section(out, employees)?;
    let contributions = contribution_section(out, employees)?;

    banner(out, '=', 80, "PART 2: PENGOLAHAN DATA SEQUENCE")?;
    let summary_count = summaries_section(out, employees)?;
    let totals = aggregate_section(out, employees)?;
    let groups = grouping_section(out, employees)?;
    let (recursive_count, recursive_total) = recursion_section(out, employees, totals.total)?;

    let top = totals.top.ok_or(ReportError::NoValidEmployees)?;
    let summary = ReportSummary {
        active_count,
        invalid_names,
        contributions,
        summary_count,
        total: totals.total,
        top_name: top.name.clone(),
        top_compensation: total_compensation(top),
        average: totals.average.unwrap_or_default(),
        group_count: groups.len(),
        recursive_count,
        recursive_total,
    };

    summary_section(out, &summary)?;
    Ok(summary)
}

fn rule<W: Write>(out: &mut W, ch: char, width: usize) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(width))
}

fn banner<W: Write>(out: &mut W, ch: char, width: usize, title: &str) -> io::Result<()> {
    writeln!(out)?;
    rule(out, ch, width)?;
    writeln!(out, "{title}")?;
    rule(out, ch, width)
}

fn subheading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    rule(out, '-', 50)
}

/// Pulls items one at a time until `None`, printing each with `label`
fn drain<W, I, F>(
    out: &mut W,
    mut iter: I,
    label: &str,
    mut render: F,
) -> Result<Vec<I::Item>, ReportError>
where
    W: Write,
    I: Iterator,
    F: FnMut(&I::Item) -> Result<String, ReportError>,
{
    writeln!(out, "Demonstrasi manual dengan loop + next():")?;
    rule(out, '-', 50)?;

    let mut items = Vec::new();
    loop {
        match iter.next() {
            Some(item) => {
                writeln!(out, "{label}: {}", render(&item)?)?;
                items.push(item);
            },
            None => {
                writeln!(out, "{EXHAUSTED}")?;
                return Ok(items);
            },
        }
    }
}

fn active_section<W: Write>(out: &mut W, employees: &[Employee]) -> Result<usize, ReportError> {
    banner(out, '=', 50, "SOAL 1: FILTER KARYAWAN AKTIF (iterator adapter)")?;
    writeln!(out, "Adapter filter() malas atas slice karyawan, status_aktif == true")?;

    let active = drain(out, active_employees(employees), "Yield", |employee| {
        Ok(serde_json::to_string(employee)?)
    })?;

    writeln!(out)?;
    writeln!(out, "Hasil akhir: {} karyawan aktif ditemukan", active.len())?;
    Ok(active.len())
}

fn invalid_section<W: Write>(
    out: &mut W,
    employees: &[Employee],
) -> Result<Vec<String>, ReportError> {
    banner(out, '=', 50, "SOAL 2: NAMA KARYAWAN DATA INVALID (iterator manual)")?;
    writeln!(out, "Struct iterator yang mencari gaji/bonus bukan angka satu per satu")?;

    let names = drain(out, InvalidEmployeeNames::new(employees), "Output", |name| {
        Ok((*name).to_string())
    })?;

    writeln!(out)?;
    writeln!(out, "Hasil akhir: {} karyawan dengan data invalid", names.len())?;
    Ok(names.into_iter().map(str::to_string).collect())
}

fn contribution_section<W: Write>(
    out: &mut W,
    employees: &[Employee],
) -> Result<Vec<Contribution>, ReportError> {
    banner(out, '=', 50, "SOAL 3: KONTRIBUSI KOMPENSASI KARYAWAN (iterator manual)")?;
    writeln!(out, "Total dihitung sekali, persentase dihitung saat diminta")?;

    let contributions = Contributions::new(employees);
    writeln!(
        out,
        ">>> Total kompensasi semua karyawan valid: {}",
        group_thousands(contributions.total())
    )?;

    let rows = drain(out, contributions, "Output", |row| Ok(serde_json::to_string(row)?))?;

    writeln!(out)?;
    writeln!(out, "Hasil akhir: {} karyawan dengan kontribusi dihitung", rows.len())?;
    Ok(rows)
}

fn summaries_section<W: Write>(out: &mut W, employees: &[Employee]) -> Result<usize, ReportError> {
    banner(out, '=', 80, "FITUR 1: ANALISIS DATA DENGAN MAP & FILTER")?;
    subheading(out, "1. Karyawan aktif dengan data valid (filter):")?;
    writeln!(out, "iter().filter(is_active).filter(has_valid_data)")?;
    subheading(out, "2. Transformasi ke ringkasan (map):")?;
    writeln!(out, "map(summarize)")?;
    writeln!(out)?;

    let rows = drain(out, summaries(employees), "Yield", |summary| {
        Ok(serde_json::to_string(summary)?)
    })?;

    writeln!(out)?;
    writeln!(out, "Total karyawan valid & aktif: {}", rows.len())?;
    Ok(rows.len())
}

fn aggregate_section<'a, W: Write>(
    out: &mut W,
    employees: &'a [Employee],
) -> Result<Aggregate<'a>, ReportError> {
    banner(out, '=', 80, "FITUR 2: AGREGASI DENGAN FOLD & REDUCE")?;
    let totals = aggregate(employees);

    subheading(out, "1. Total kompensasi semua karyawan (fold):")?;
    writeln!(out, "Total kompensasi: {}", format_rupiah(totals.total))?;

    subheading(out, "2. Karyawan dengan kompensasi tertinggi (reduce):")?;
    if let Some(top) = totals.top {
        writeln!(out, "Top employee: {}", top.name)?;
        writeln!(out, "Kompensasi: {}", format_rupiah(total_compensation(top)))?;
    }

    subheading(out, "3. Rata-rata kompensasi:")?;
    if let Some(average) = totals.average {
        writeln!(out, "Average: {}", format_rupiah(average))?;
    }

    Ok(totals)
}

fn grouping_section<'a, W: Write>(
    out: &mut W,
    employees: &'a [Employee],
) -> Result<Vec<CategoryGroup<'a>>, ReportError> {
    banner(out, '=', 80, "FITUR 3: PENGELOMPOKAN BERDASARKAN KATEGORI GAJI")?;
    let groups = group_by_category(employees);

    subheading(out, "1. Kategorisasi karyawan aktif:")?;
    for group in &groups {
        let range = match group.category {
            Category::Senior => "(>= 5.5M)",
            Category::MidLevel => "(4.5M-5.5M)",
            Category::Junior => "(< 4.5M)",
        };
        writeln!(out, "{} {range}: {:?}", group.category, group.names)?;
    }

    subheading(out, "2. Struktur bersarang [kategori, jumlah, nama]:")?;
    for group in &groups {
        writeln!(
            out,
            "{:10} | Count: {} | Names: {:?}",
            group.category,
            group.count(),
            group.names
        )?;
    }

    subheading(out, "3. Ringkasan datar:")?;
    writeln!(out, "Result: {:?}", flatten_groups(&groups))?;

    Ok(groups)
}

fn recursion_section<W: Write>(
    out: &mut W,
    employees: &[Employee],
    fold_total: i64,
) -> Result<(usize, i64), ReportError> {
    banner(out, '=', 80, "FITUR 4: PEMROSESAN REKURSIF")?;
    let all: Vec<&Employee> = employees.iter().collect();

    subheading(out, "1. Filter rekursif:")?;
    let valid = filter_recursive(&all, &has_valid_data);
    let names: Vec<&str> = valid.iter().map(|e| e.name.as_str()).collect();
    writeln!(out, "Valid employees: {names:?}")?;

    subheading(out, "2. Penjumlahan rekursif:")?;
    let total = sum_recursive(&valid);
    writeln!(out, "Total compensation: {}", format_rupiah(total))?;
    writeln!(out)?;
    writeln!(out, "Verifikasi dengan fold: {}", format_rupiah(fold_total))?;
    writeln!(out, "Match: {}", total == fold_total)?;

    subheading(out, "3. Pencarian & maksimum rekursif:")?;
    match find_recursive(&all, &|e: &Employee| categorize(e) == Category::Senior) {
        Some(found) => writeln!(out, "Senior pertama: {}", found.name)?,
        None => writeln!(out, "Senior pertama: -")?,
    }
    if let Some(best) = max_recursive(&valid) {
        writeln!(
            out,
            "Kompensasi tertinggi: {} ({})",
            best.name,
            format_rupiah(total_compensation(best))
        )?;
    }

    Ok((valid.len(), total))
}

fn summary_section<W: Write>(out: &mut W, summary: &ReportSummary) -> io::Result<()> {
    banner(out, '=', 80, "RANGKUMAN HASIL PENGOLAHAN DATA")?;

    writeln!(out)?;
    writeln!(out, "LAZY SEQUENCE:")?;
    writeln!(out, "  1. Karyawan aktif: {} orang", summary.active_count)?;
    writeln!(
        out,
        "  2. Karyawan data invalid: {} orang - {:?}",
        summary.invalid_names.len(),
        summary.invalid_names
    )?;
    writeln!(
        out,
        "  3. Karyawan kontribusi valid: {} orang",
        summary.contributions.len()
    )?;

    writeln!(out)?;
    writeln!(out, "PENGOLAHAN DATA SEQUENCE:")?;
    writeln!(out, "  4. Map & Filter: {} ringkasan karyawan", summary.summary_count)?;
    writeln!(out, "  5. Agregasi:")?;
    writeln!(out, "     - Total kompensasi: {}", format_rupiah(summary.total))?;
    writeln!(
        out,
        "     - Top employee: {} ({})",
        summary.top_name,
        format_rupiah(summary.top_compensation)
    )?;
    writeln!(out, "     - Average: {}", format_rupiah(summary.average))?;
    writeln!(out, "  6. Pengelompokan: {} kategori", summary.group_count)?;
    writeln!(
        out,
        "  7. Rekursif: {} karyawan, Total: {}",
        summary.recursive_count,
        format_rupiah(summary.recursive_total)
    )?;
    rule(out, '=', 80)
}
