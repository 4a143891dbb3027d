//! Text rendering of a pipeline result.

use crate::models::CatalogEntry;

pub const NO_BOOKS_FOUND: &str = "No books found.";

const BOOK_COLUMNS: [&str; 5] = [
    "Title",
    "Author",
    "First Publish Year",
    "Edition Count",
    "Open Library ID",
];

/// Keyword line, an image-analysis notice when the description degraded,
/// then the book table or the no-match notice.
pub fn render_summary(
    keyword: &str,
    description_failure: Option<&str>,
    books: &[CatalogEntry],
) -> String {
    let mut summary = format!("**Extracted Keywords**: {}\n\n", keyword);

    if let Some(failure) = description_failure {
        summary.push_str(&format!("**Image Analysis**: {}\n\n", failure));
    }

    if books.is_empty() {
        summary.push_str(NO_BOOKS_FOUND);
    } else {
        summary.push_str("**Top Books**:\n");
        summary.push_str(&render_table(books));
    }
    summary
}

/// Right-aligned plain-text table without an index column.
///
/// Error rows switch the table to a single `Error` column.
pub fn render_table(books: &[CatalogEntry]) -> String {
    let errors: Vec<&str> = books
        .iter()
        .filter_map(|entry| match entry {
            CatalogEntry::Error { error } => Some(error.as_str()),
            CatalogEntry::Book(_) => None,
        })
        .collect();

    if !errors.is_empty() {
        let rows: Vec<Vec<String>> = errors.iter().map(|e| vec![e.to_string()]).collect();
        return format_columns(&["Error"], &rows);
    }

    let rows: Vec<Vec<String>> = books
        .iter()
        .filter_map(CatalogEntry::as_book)
        .map(|book| {
            vec![
                book.title.clone(),
                book.author(),
                book.first_publish_year_display(),
                book.edition_count_display(),
                book.catalog_id.clone(),
            ]
        })
        .collect();

    format_columns(&BOOK_COLUMNS, &rows)
}

fn format_columns(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(headers.to_vec()));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}
