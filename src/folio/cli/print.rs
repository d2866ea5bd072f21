use chrono::{DateTime, Utc};
use colored::Colorize;
use folio::commands::{CmdMessage, MessageLevel};
use folio::export::display_contact_type;
use folio::model::FeedbackEntry;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 22;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(crate) fn print_entries(entries: &[FeedbackEntry]) {
    if entries.is_empty() {
        println!("No feedback yet.");
        return;
    }

    for entry in entries {
        let id = format!("{:<width$}", entry.id.to_string(), width = ID_WIDTH);
        let kind = display_contact_type(&entry.contact_type);
        let who = format!("{} <{}>", entry.full_name, entry.email);
        let headline = format!("[{}] {}", kind, who);

        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH);
        let headline = truncate_to_width(&headline, available);
        let padding = available.saturating_sub(headline.width());

        println!(
            "{}{}{}{}",
            id.yellow(),
            headline.bold(),
            " ".repeat(padding),
            format_time_ago(entry.timestamp).dimmed()
        );

        let preview: String = entry
            .comment
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let mut detail = truncate_to_width(&preview, LINE_WIDTH.saturating_sub(ID_WIDTH));
        if let Some(phone) = entry.phone.as_option() {
            detail = format!("{}  ({})", detail, phone);
        }
        println!("{}{}", " ".repeat(ID_WIDTH), detail);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
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
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
