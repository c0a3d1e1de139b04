use chrono::{DateTime, Utc};
use colored::Colorize;
use snipitapp::model::{Collection, Snippet};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 11;
const TIME_WIDTH: usize = 16;
const STAR_MARKER: &str = "★";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_snippets(snippets: &[Snippet]) {
    if snippets.is_empty() {
        println!("No snippets found.");
        return;
    }
    for snippet in snippets {
        println!("{}", snippet_line(snippet));
    }
}

/// `  ★ 483920117  Debounce helper  JavaScript #timing        3 days ago`
fn snippet_line(snippet: &Snippet) -> String {
    let marker = if snippet.starred {
        format!("  {} ", STAR_MARKER)
    } else {
        "    ".to_string()
    };
    let id = format!("{:<width$}", snippet.id, width = ID_WIDTH);
    let time_ago = snippet
        .created_at()
        .map(format_time_ago)
        .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

    let mut details = String::new();
    if !snippet.language.is_empty() {
        details.push_str(&snippet.language);
    }
    if !snippet.is_unlabeled() {
        for tag in &snippet.tags {
            if !details.is_empty() {
                details.push(' ');
            }
            details.push('#');
            details.push_str(tag);
        }
    }

    let fixed = marker.width() + id.width() + TIME_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&snippet.title, available);
    let remaining = available.saturating_sub(title.width());
    let details = if details.is_empty() || remaining < 3 {
        String::new()
    } else {
        truncate_to_width(&format!("  {}", details), remaining)
    };
    let padding = remaining.saturating_sub(details.width());

    let marker = if snippet.starred {
        marker.yellow()
    } else {
        marker.normal()
    };
    format!(
        "{}{}{}{}{}{}",
        marker,
        id.yellow(),
        title.bold(),
        details.cyan(),
        " ".repeat(padding),
        time_ago.dimmed()
    )
}

pub(super) fn print_full_snippet(snippet: &Snippet) {
    let star = if snippet.starred {
        format!(" {}", STAR_MARKER).yellow()
    } else {
        "".normal()
    };
    println!("{} {}{}", snippet.id.yellow(), snippet.title.bold(), star);

    if let Some(description) = &snippet.description {
        println!("{}", description.italic());
    }
    let language = if snippet.language.is_empty() {
        "unknown"
    } else {
        snippet.language.as_str()
    };
    println!("{} {}", "language:".dimmed(), language.cyan());
    println!("{} {}", "tags:".dimmed(), snippet.tags.join(", "));
    println!("{} {}", "created:".dimmed(), snippet.date);
    if let Some(edited) = &snippet.last_edited {
        println!("{} {}", "edited:".dimmed(), edited);
    }
    println!("--------------------------------");
    println!("{}", snippet.code);
}

pub(super) fn print_collections(collections: &[Collection], selected: Option<&str>) {
    if collections.is_empty() {
        println!("No collections registered.");
        return;
    }
    for collection in collections {
        let is_selected = selected == Some(collection.id.as_str());
        let marker = if is_selected { "* " } else { "  " };
        let name = if is_selected {
            collection.name.green().bold()
        } else {
            collection.name.bold()
        };
        println!(
            "{}{}  {}  {}",
            marker,
            name,
            format!("({})", collection.id).dimmed(),
            collection.path.display()
        );
    }
}

pub(super) fn print_lines(lines: &[String], empty_message: &str) {
    if lines.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for line in lines {
        println!("{}", line);
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn snippet(title: &str) -> Snippet {
        Snippet::new(
            "123456789".into(),
            title.into(),
            "code".into(),
            "Rust".into(),
            vec!["cli".into()],
        )
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // each CJK character is two columns wide
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let formatted = format_time_ago(Utc::now() - Duration::days(3));
        assert_eq!(formatted.width(), TIME_WIDTH);
        assert!(formatted.trim_start().starts_with("3 days"));
    }

    #[test]
    fn future_dates_do_not_panic() {
        let formatted = format_time_ago(Utc::now() + Duration::days(1));
        assert_eq!(formatted.width(), TIME_WIDTH);
    }

    #[test]
    fn line_shows_id_title_language_and_tags() {
        colored::control::set_override(false);
        let line = snippet_line(&snippet("Parse args"));
        assert!(line.contains("123456789"));
        assert!(line.contains("Parse args"));
        assert!(line.contains("Rust #cli"));
        assert_eq!(line.width(), LINE_WIDTH);
    }

    #[test]
    fn placeholder_tag_is_hidden() {
        colored::control::set_override(false);
        let mut s = snippet("Untagged");
        s.tags = vec!["unlabeled".into()];
        assert!(!snippet_line(&s).contains("#unlabeled"));
    }

    #[test]
    fn long_titles_are_truncated() {
        colored::control::set_override(false);
        let line = snippet_line(&snippet(&"x".repeat(200)));
        assert!(line.contains('…'));
        assert_eq!(line.width(), LINE_WIDTH);
    }
}
