use pretty_assertions::assert_eq;
use scout_core::{
    render_rows, to_clipboard_table, to_csv, BatchEntry, RowStatus, CSV_HEADER, TSV_HEADER,
};

fn mixed_results() -> Vec<BatchEntry> {
    vec![
        BatchEntry::new("https://www.linkedin.com/company/zeta", "1,001-5,000", None),
        BatchEntry::new("https://www.linkedin.com/company/alpha", "NA", None),
        BatchEntry::new(
            "https://www.linkedin.com/company/mid",
            "NA",
            Some("Page not found".to_string()),
        ),
        BatchEntry::new("https://www.linkedin.com/company/zeta", "11-50", None),
    ]
}

#[test]
fn render_of_empty_set_is_empty() {
    assert!(render_rows(&[]).is_empty());
}

#[test]
fn render_keeps_length_order_and_classifies() {
    let results = mixed_results();
    let rows = render_rows(&results);

    assert_eq!(rows.len(), results.len());
    let targets: Vec<_> = rows.iter().map(|r| r.target.as_str()).collect();
    let expected: Vec<_> = results.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, expected);

    let statuses: Vec<_> = rows.iter().map(|r| r.status.clone()).collect();
    assert_eq!(
        statuses,
        vec![
            RowStatus::Success,
            RowStatus::NoData,
            RowStatus::Error("Page not found".to_string()),
            RowStatus::Success,
        ]
    );
    assert_eq!(rows[1].status_label(), "Success");
}

#[test]
fn csv_has_header_and_one_quoted_row_per_entry() {
    let csv = to_csv(&mixed_results());
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        r#""https://www.linkedin.com/company/zeta","1,001-5,000","Success""#
    );
    assert_eq!(lines[2], r#""https://www.linkedin.com/company/alpha","NA","Success""#);
    assert_eq!(
        lines[3],
        r#""https://www.linkedin.com/company/mid","NA","Page not found""#
    );
    assert_eq!(lines[4], r#""https://www.linkedin.com/company/zeta","11-50","Success""#);
    assert!(csv.ends_with('\n'));
}

#[test]
fn csv_escapes_quotes_inside_fields() {
    let csv = to_csv(&[BatchEntry::new(
        "https://x.com/q",
        "NA",
        Some(r#"unexpected token "<""#.to_string()),
    )]);
    assert_eq!(
        csv.lines().nth(1),
        Some(r#""https://x.com/q","NA","unexpected token ""<""""#)
    );
}

#[test]
fn clipboard_table_is_tab_separated_without_quotes() {
    let tsv = to_clipboard_table(&mixed_results());
    let lines: Vec<_> = tsv.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], TSV_HEADER);
    assert_eq!(
        lines[1],
        "https://www.linkedin.com/company/zeta\t1,001-5,000\tSuccess"
    );
    assert_eq!(lines[3], "https://www.linkedin.com/company/mid\tNA\tPage not found");
    assert!(!tsv.contains('"'));
}

#[test]
fn exports_of_empty_set_contain_only_header() {
    assert_eq!(to_csv(&[]), format!("{CSV_HEADER}\n"));
    assert_eq!(to_clipboard_table(&[]), format!("{TSV_HEADER}\n"));
}
