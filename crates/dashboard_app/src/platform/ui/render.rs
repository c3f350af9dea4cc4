use std::fmt::Display;

use chrono::{Local, TimeZone};
use dashboard_core::{CategoryTone, DashboardView, SortDirection, SortField};

const TITLE: &str = "Event Dashboard";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const COLUMNS: [(SortField, &str); 4] = [
    (SortField::EntityId, "Entity"),
    (SortField::Category, "Category"),
    (SortField::Timestamp, "Time"),
    (SortField::EntryId, "Entry ID"),
];

/// Renders the view with timestamps in the local time zone.
pub fn render(view: &DashboardView) -> Vec<String> {
    render_in(view, &Local)
}

pub fn render_in<Tz>(view: &DashboardView, zone: &Tz) -> Vec<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = vec![TITLE.to_string(), status_line(view)];

    if view.is_loading {
        lines.push("Loading data...".to_string());
    }
    if let Some(err) = &view.last_error {
        lines.push(format!("Error loading data: {err}"));
    }
    if view.is_empty() {
        lines.push("No records available".to_string());
        lines.push(hint_line(view));
        return lines;
    }
    if view.rows.is_empty() {
        lines.push(hint_line(view));
        return lines;
    }

    let headers: Vec<String> = COLUMNS
        .iter()
        .map(|(field, label)| header_label(view, *field, label))
        .collect();
    let cells: Vec<[String; 4]> = view
        .rows
        .iter()
        .map(|row| {
            [
                row.entity_id.clone(),
                badge(&row.category, row.tone),
                row.timestamp
                    .with_timezone(zone)
                    .format(TIME_FORMAT)
                    .to_string(),
                row.entry_id.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 4] = [0; 4];
    for (i, header) in headers.iter().enumerate() {
        widths[i] = header.chars().count();
    }
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    lines.push(join_padded(headers.iter().map(String::as_str), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &cells {
        lines.push(join_padded(row.iter().map(String::as_str), &widths));
    }
    lines.push(hint_line(view));
    lines
}

pub fn help_lines() -> Vec<String> {
    let fields = SortField::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join("|");
    vec![
        "Commands:".to_string(),
        "  r              refresh all data".to_string(),
        "  m              load more".to_string(),
        format!("  s <{fields}> [asc|desc]   sort (same column toggles)"),
        "  h              help".to_string(),
        "  q              quit".to_string(),
    ]
}

fn status_line(view: &DashboardView) -> String {
    let total = view
        .total_count
        .map_or_else(|| "-".to_string(), |count| count.to_string());
    let mut line = format!("Total entries: {total} (showing {})", view.rows.len());
    if view.duplicates_dropped > 0 {
        line.push_str(&format!(" | duplicates skipped: {}", view.duplicates_dropped));
    }
    line
}

fn hint_line(view: &DashboardView) -> String {
    if view.has_more {
        "More entries available: 'm' to load more, 'r' to refresh, 'h' for help".to_string()
    } else {
        "All entries loaded: 'r' to refresh, 'h' for help".to_string()
    }
}

fn header_label(view: &DashboardView, field: SortField, label: &str) -> String {
    if view.sort.field != field {
        return label.to_string();
    }
    match view.sort.direction {
        SortDirection::Ascending => format!("{label} ^"),
        SortDirection::Descending => format!("{label} v"),
    }
}

fn badge(category: &str, tone: CategoryTone) -> String {
    match tone {
        CategoryTone::Positive => format!("[+] {category}"),
        CategoryTone::Neutral => format!("[ ] {category}"),
    }
}

fn join_padded<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 4]) -> String {
    cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
