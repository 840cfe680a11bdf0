use cellar::commands::{CellarStatus, CmdMessage, MessageLevel, ZoneListing};
use cellar::model::NewWine;
use cellar::selector::DisplayWine;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const LOCATION_WIDTH: usize = 28;
const CONSUMED_MARKER: &str = "✗";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_wines(wines: &[DisplayWine]) {
    for dw in wines {
        let idx_str = match dw.index {
            Some(n) => format!("{:>3}. ", n),
            None => format!("  {}  ", CONSUMED_MARKER),
        };
        let location = pad_to_width(&truncate_to_width(&dw.location(), LOCATION_WIDTH), LOCATION_WIDTH);
        let time_ago = format_time_ago(dw.wine.added_at);

        let fixed = idx_str.width() + LOCATION_WIDTH + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = pad_to_width(&truncate_to_width(&dw.wine.name, available), available);

        if dw.wine.consumed {
            println!(
                "{}{} {} {}",
                idx_str.red(),
                name.dimmed(),
                location.dimmed(),
                time_ago.dimmed()
            );
        } else {
            println!(
                "{}{} {} {}",
                idx_str,
                name.bold(),
                location,
                time_ago.dimmed()
            );
        }
    }
}

/// One table per zone: `identifier | status | wine`.
pub(super) fn print_zones(zones: &[ZoneListing]) {
    for (i, zone) in zones.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {}",
            zone.zone.bold(),
            format!("({} of {} free)", zone.free(), zone.rows.len()).dimmed()
        );

        let id_width = zone
            .rows
            .iter()
            .map(|r| r.position.identifier.width())
            .chain(std::iter::once("Position".width()))
            .max()
            .unwrap_or(0);

        println!(
            "  {} | {} | Wine",
            pad_to_width("Position", id_width),
            pad_to_width("Status", 8)
        );
        for row in &zone.rows {
            let identifier = pad_to_width(&row.position.identifier, id_width);
            let status = if row.position.is_occupied {
                pad_to_width("Occupied", 8).yellow()
            } else {
                pad_to_width("Empty", 8).green()
            };
            let wine = row.wine_name.as_deref().unwrap_or("None");
            println!("  {} | {} | {}", identifier, status, wine);
        }
    }
}

pub(super) fn print_status(status: &CellarStatus) {
    let rows = [
        ("Storages", status.storages.to_string()),
        ("Positions", status.positions.to_string()),
        ("Free positions", status.free_positions.to_string()),
        ("Wines", status.active_wines.to_string()),
        ("Without position", status.unpositioned_wines.to_string()),
        ("Consumed", status.consumed_wines.to_string()),
        ("Catalog", status.location.display().to_string()),
    ];
    for (label, value) in rows {
        println!("{} {}", pad_to_width(&format!("{}:", label), 18).dimmed(), value);
    }
}

pub(super) fn print_draft(draft: &NewWine) {
    println!("{}", draft.name.bold());
    let description = draft.description.to_string();
    if !description.is_empty() {
        println!("{}", description);
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
