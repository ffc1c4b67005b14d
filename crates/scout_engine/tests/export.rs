use std::fs;

use chrono::NaiveDate;
use scout_engine::{csv_export_filename, write_csv_export};
use tempfile::TempDir;

const CSV: &str = "LinkedIn URL,Employee Count,Status\n\
\"https://x.com/a\",\"500\",\"Success\"\n\
\"https://x.com/b\",\"NA\",\"blocked\"\n";

fn march_9() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[test]
fn filename_follows_dated_pattern() {
    assert_eq!(
        csv_export_filename(march_9()),
        "linkedin_employee_counts_2024-03-09.csv"
    );
}

#[test]
fn export_writes_document_verbatim_into_missing_dir() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("exports");

    let export = write_csv_export(&out_dir, march_9(), CSV, 2).unwrap();

    assert_eq!(
        export.path,
        out_dir.join("linkedin_employee_counts_2024-03-09.csv")
    );
    assert_eq!(export.row_count, 2);
    assert_eq!(fs::read_to_string(&export.path).unwrap(), CSV);
}

#[test]
fn row_count_is_not_derived_from_line_breaks() {
    let temp = TempDir::new().unwrap();
    let multiline = "LinkedIn URL,Employee Count,Status\n\
                     \"https://x.com/a\",\"NA\",\"line one\nline two\"\n";

    let export = write_csv_export(temp.path(), march_9(), multiline, 1).unwrap();

    assert_eq!(export.row_count, 1);
    assert_eq!(fs::read_to_string(&export.path).unwrap(), multiline);
}

#[test]
fn same_day_export_replaces_previous_file() {
    let temp = TempDir::new().unwrap();
    write_csv_export(temp.path(), march_9(), CSV, 2).unwrap();
    let second = write_csv_export(
        temp.path(),
        march_9(),
        "LinkedIn URL,Employee Count,Status\n",
        0,
    )
    .unwrap();

    assert_eq!(second.row_count, 0);
    assert_eq!(
        fs::read_to_string(&second.path).unwrap(),
        "LinkedIn URL,Employee Count,Status\n"
    );
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}
