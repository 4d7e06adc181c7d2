use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use querydeck::api::{CmdMessage, MessageLevel};
use querydeck::reconcile::{DisplayQuery, QueryStatus};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 80;

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

fn status_marker(status: QueryStatus) -> ColoredString {
    match status {
        QueryStatus::Synced => "·".dimmed(),
        QueryStatus::ModifiedUnpushed => "●".yellow(),
        QueryStatus::UnsavedInEditor => "✎".cyan(),
        QueryStatus::Deleted => "✗".red(),
    }
}

pub(super) fn print_legend() {
    for status in QueryStatus::ALL {
        println!("  {} {:<9} {}", status_marker(status), status, status.description().dimmed());
    }
}

pub(super) fn print_queries(queries: &[DisplayQuery]) {
    if queries.is_empty() {
        println!("No queries yet. Use `new` to create one.");
        return;
    }

    for dq in queries {
        let cursor = if dq.selected { ">" } else { " " };
        let idx_str = format!("{}. ", dq.index);
        let preview: String = dq
            .query
            .content
            .chars()
            .take(60)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let line = if preview.is_empty() {
            dq.query.name.clone()
        } else {
            format!("{}  {}", dq.query.name, preview)
        };

        let fixed = cursor.width() + 3 + idx_str.width();
        let shown = truncate_to_width(&line, LINE_WIDTH.saturating_sub(fixed));
        let name_width = dq.query.name.width().min(shown.width());
        let (name_part, rest) = split_at_width(&shown, name_width);

        let name_colored = match dq.status {
            QueryStatus::Deleted => name_part.strikethrough().red(),
            _ if dq.selected => name_part.bold(),
            _ => name_part.normal(),
        };

        println!(
            "{} {} {}{}{}",
            cursor,
            status_marker(dq.status),
            idx_str,
            name_colored,
            rest.dimmed()
        );
    }
}

pub(super) fn print_buffer(name: &str, status: Option<QueryStatus>, content: &str) {
    let label = status.map(|s| format!(" [{}]", s)).unwrap_or_default();
    println!("{}{}", name.bold(), label.dimmed());
    println!("{}", "-".repeat(32).dimmed());
    if content.is_empty() {
        println!("{}", "(empty)".dimmed());
    } else {
        println!("{}", content);
    }
}

pub(super) fn print_status(
    unsaved: bool,
    unpushed: bool,
    marked: usize,
    last_synced: Option<DateTime<Utc>>,
) {
    let yes_no = |flag: bool| if flag { "yes".yellow() } else { "no".green() };
    println!("Unsaved changes:  {}", yes_no(unsaved));
    println!("Unpushed changes: {}", yes_no(unpushed));
    if marked > 0 {
        println!("Marked for deletion: {}", marked.to_string().red());
    }
    if let Some(at) = last_synced {
        println!("Last synced: {}", format_time_ago(at).dimmed());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    // One cell is kept for the ellipsis.
    let budget = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > budget {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}

fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut current = 0;
    for (i, c) in s.char_indices() {
        if current >= width {
            return s.split_at(i);
        }
        current += c.width().unwrap_or(0);
    }
    (s, "")
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
