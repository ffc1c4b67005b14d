use scout_core::{BatchViewModel, RowStatus, TableRow};
use scout_engine::{ExtractedText, PageInfo};

const HEADERS: [&str; 3] = ["LinkedIn URL", "Employee Count", "Status"];

/// Results table for the terminal, columns padded to the widest cell.
pub(crate) fn render_table(view: &BatchViewModel) -> String {
    if !view.results_visible {
        return String::new();
    }

    let cells: Vec<[&str; 3]> = view.rows.iter().map(row_cells).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(
        &mut out,
        &[rule[0].as_str(), rule[1].as_str(), rule[2].as_str()],
        &widths,
    );
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&summary_line(&view.rows));
    out.push('\n');
    out
}

/// Loading, error, and notice lines, in that order.
pub(crate) fn render_status(view: &BatchViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(loading) = view.loading_text() {
        lines.push(loading);
    }
    if let Some(error) = &view.error_message {
        lines.push(error.clone());
    }
    if let Some(notice) = &view.notice {
        lines.push(notice.clone());
    }
    lines
}

pub(crate) fn render_page_info(info: &PageInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("URL: {}\n", info.url));
    out.push_str(&format!(
        "Title: {}\n",
        info.title.as_deref().unwrap_or("No title found")
    ));
    if let Some(code) = info.status_code {
        out.push_str(&format!("Status: {code}\n"));
    }
    out.push_str("\nContent:\n");
    out.push_str(info.content.as_deref().unwrap_or("No content found"));
    out.push('\n');

    if !info.links.is_empty() {
        out.push_str(&format!("\nLinks ({}):\n", info.links.len()));
        for link in &info.links {
            out.push_str(&format!("  - {}\n", link.url));
            if !link.text.is_empty() {
                out.push_str(&format!("    {}\n", link.text));
            }
        }
    }
    if !info.images.is_empty() {
        out.push_str(&format!("\nImages ({}):\n", info.images.len()));
        for image in &info.images {
            out.push_str(&format!("  - {} ({})\n", image.url, image.alt));
        }
    }
    out
}

pub(crate) fn render_extracted_text(extracted: &ExtractedText) -> String {
    if extracted.text.trim().is_empty() {
        "No text found in image\n".to_string()
    } else {
        let mut out = extracted.text.clone();
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out
    }
}

fn row_cells(row: &TableRow) -> [&str; 3] {
    [row.target.as_str(), row.metric.as_str(), row.status_label()]
}

fn push_line(out: &mut String, cells: &[&str; 3], widths: &[usize; 3]) {
    let line = format!(
        "{:<w0$}  {:<w1$}  {}",
        cells[0],
        cells[1],
        cells[2],
        w0 = widths[0],
        w1 = widths[1]
    );
    out.push_str(line.trim_end());
    out.push('\n');
}

fn summary_line(rows: &[TableRow]) -> String {
    let mut found = 0;
    let mut no_data = 0;
    let mut failed = 0;
    for row in rows {
        match row.status {
            RowStatus::Success => found += 1,
            RowStatus::NoData => no_data += 1,
            RowStatus::Error(_) => failed += 1,
        }
    }
    format!(
        "{} rows: {} with counts, {} without data, {} failed",
        rows.len(),
        found,
        no_data,
        failed
    )
}
