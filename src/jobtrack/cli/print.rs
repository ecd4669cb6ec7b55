use chrono::{NaiveDate, Utc};
use clap::CommandFactory;
use colored::Colorize;
use jobtrack::api::{CmdMessage, CmdResult, DashboardStats, DraftView, Listing, MessageLevel};
use jobtrack::config::TrackerConfig;
use jobtrack::index::DisplayRow;
use jobtrack::model::{Field, Status, DATE_FORMAT};
use jobtrack::validation::FieldErrors;
use jobtrack::view::SortKey;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::setup::SessionLine;

const MAX_COLUMN_WIDTH: usize = 24;
const COLUMN_GAP: &str = "  ";

/// Prints everything a result carries, data first and messages last.
pub(super) fn print_result(result: &CmdResult) {
    if let Some(listing) = &result.listing {
        print_listing(listing);
    }
    if let Some(stats) = &result.dashboard {
        print_dashboard(stats, Utc::now().date_naive());
    }
    if let Some(draft) = &result.draft {
        print_draft(draft);
    }
    if let Some(config) = &result.config {
        print_config(config);
    }
    if let Some(json) = &result.exported {
        println!("{}", json);
    }
    print_messages(&result.messages);
    print_field_errors(&result.field_errors);
}

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

pub(super) fn print_error(message: &str) {
    println!("{} {}", "Error:".red().bold(), message.red());
}

fn print_field_errors(errors: &FieldErrors) {
    for (_, message) in errors.iter() {
        println!("  {} {}", "•".red(), message.red());
    }
}

fn criteria_line(listing: &Listing) -> String {
    let mut parts = vec![format!("Page {} of {}", listing.page, listing.total_pages)];
    if !listing.search.is_empty() {
        parts.push(format!("search {:?}", listing.search));
    }
    parts.push(format!(
        "type {}",
        listing.job_type.map(|t| t.label()).unwrap_or("All")
    ));
    parts.push(format!(
        "status {}",
        listing.status.map(|s| s.label()).unwrap_or("All")
    ));
    parts.push(match listing.sort {
        Some(SortKey::Company) => "sorted by company".to_string(),
        Some(SortKey::AppliedDate) => "sorted by date".to_string(),
        None => "unsorted".to_string(),
    });
    parts.join(" · ")
}

fn options_line(listing: &Listing) -> Option<String> {
    if listing.job_type_options.is_empty() && listing.status_options.is_empty() {
        return None;
    }
    let types: Vec<_> = listing.job_type_options.iter().map(|t| t.label()).collect();
    let statuses: Vec<_> = listing.status_options.iter().map(|s| s.label()).collect();
    Some(format!(
        "Types: {} · Statuses: {}",
        types.join(", "),
        statuses.join(", ")
    ))
}

fn row_cells(row: &DisplayRow) -> [String; 7] {
    let fields = row.application.fields();
    [
        format!("{}.", row.number),
        fields.company_name.clone(),
        fields.job_title.clone(),
        fields.job_type.label().to_string(),
        fields.status.label().to_string(),
        fields.location.clone(),
        fields.applied_date.format(DATE_FORMAT).to_string(),
    ]
}

fn print_listing(listing: &Listing) {
    println!("{}", criteria_line(listing).bold());
    if let Some(options) = options_line(listing) {
        println!("{}", options.dimmed());
    }
    if listing.rows.is_empty() {
        return;
    }

    let header = ["#", "Company", "Title", "Type", "Status", "Location", "Applied"];
    let cells: Vec<[String; 7]> = listing
        .rows
        .iter()
        .map(|row| row_cells(row).map(|c| truncate_to_width(&c, MAX_COLUMN_WIDTH)))
        .collect();

    let mut widths = header.map(|h| h.width());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let header_line: Vec<String> = header
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad_to_width(h, *w))
        .collect();
    println!("{}", header_line.join(COLUMN_GAP).trim_end().underline());

    for (row, cell) in listing.rows.iter().zip(cells.iter()) {
        let status = row.application.fields().status;
        let rendered: Vec<String> = cell
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (text, w))| {
                let padded = pad_to_width(text, *w);
                match i {
                    0 => padded.yellow().to_string(),
                    4 => status_colored(status, &padded),
                    _ => padded,
                }
            })
            .collect();
        println!("{}", rendered.join(COLUMN_GAP).trim_end());
    }

    if let Some((from, to, total)) = listing.showing {
        println!(
            "{}",
            format!("Showing {} to {} of {} applications", from, to, total).dimmed()
        );
    }
}

fn status_colored(status: Status, text: &str) -> String {
    match status {
        Status::Applied => text.blue().to_string(),
        Status::InterviewScheduled => text.yellow().to_string(),
        Status::Rejected => text.red().to_string(),
        Status::Selected => text.green().to_string(),
    }
}

fn print_dashboard(stats: &DashboardStats, today: NaiveDate) {
    println!("{} {}", "Applications:".bold(), stats.total);
    let label_width = Status::ALL
        .iter()
        .map(|s| s.label().width())
        .max()
        .unwrap_or(0);
    for (status, count) in &stats.by_status {
        println!(
            "  {}  {}",
            status_colored(*status, &pad_to_width(status.label(), label_width)),
            count
        );
    }

    println!();
    println!("{}", "Recent".bold());
    if stats.recent.is_empty() {
        println!("  {}", "No applications yet.".dimmed());
        return;
    }
    for application in &stats.recent {
        let fields = application.fields();
        println!(
            "  {} · {} · {} · {} {}",
            fields.company_name,
            fields.job_title,
            status_colored(fields.status, fields.status.label()),
            fields.applied_date.format(DATE_FORMAT),
            format!("({})", applied_ago(fields.applied_date, today)).dimmed()
        );
    }
}

/// "today", "3 days ago", "2 weeks ago"; future dates read "upcoming".
fn applied_ago(date: NaiveDate, today: NaiveDate) -> String {
    let days = today.signed_duration_since(date).num_days();
    match days {
        d if d < 0 => "upcoming".to_string(),
        0 => "today".to_string(),
        d => {
            let seconds = (d as u64) * 24 * 60 * 60;
            Formatter::new().convert(std::time::Duration::from_secs(seconds))
        }
    }
}

fn print_draft(draft: &DraftView) {
    println!("{} {}", "Editing".bold(), draft.id.to_string().dimmed());
    let label_width = Field::ALL
        .iter()
        .map(|f| f.label().width())
        .max()
        .unwrap_or(0);
    for field in Field::ALL {
        let value = draft.form.field_value(field);
        let shown = if value.is_empty() {
            "-".dimmed().to_string()
        } else {
            value
        };
        println!(
            "  {}  {}",
            pad_to_width(field.label(), label_width).cyan(),
            shown
        );
    }
}

fn print_config(config: &TrackerConfig) {
    for key in TrackerConfig::keys() {
        println!("{} = {}", key, config.get(key).unwrap_or_default());
    }
}

pub(super) fn print_session_help() {
    let command = SessionLine::command();
    let subcommands: Vec<_> = command.get_subcommands().collect();
    let name_width = subcommands
        .iter()
        .map(|c| c.get_name().width())
        .max()
        .unwrap_or(0);

    println!("{}", "Commands:".bold());
    for sub in subcommands {
        let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
        println!(
            "  {}  {}",
            pad_to_width(sub.get_name(), name_width).yellow(),
            about
        );
    }
    println!(
        "{}",
        "Type `<command> --help` for the options of one command.".dimmed()
    );
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
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
