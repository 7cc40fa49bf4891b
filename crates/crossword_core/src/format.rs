//! Display formatting shared by the summary card and the terminal view.

use std::time::Duration;

use chrono::NaiveDate;

/// Joins names as "A", "A & B" or "A, B, & C".
pub fn format_list(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} & {}", first, second),
        [rest @ .., last] => format!("{}, & {}", rest.join(", "), last),
    }
}

/// "By A & B, edited by E", omitting the editor clause when there is none.
pub fn byline(constructors: &[String], editor: Option<&str>) -> String {
    let mut line = format!("By {}", format_list(constructors));
    if let Some(editor) = editor.filter(|e| !e.is_empty()) {
        line.push_str(", edited by ");
        line.push_str(editor);
    }
    line
}

/// Running clock, `m:ss`.
pub fn format_clock(duration: Duration) -> String {
    let seconds = duration.as_secs();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Finish time for the summary: "{n} seconds" under a minute, else `m:ss`.
pub fn format_finish_time(duration: Duration) -> String {
    let seconds = duration.as_secs();
    if seconds < 60 {
        format!("{} seconds", seconds)
    } else {
        format_clock(duration)
    }
}

/// Parses a `YYYY-MM-DD` publication date.
pub fn parse_publication_date(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
}

/// Long form date, e.g. "Sunday, January 1, 2023".
pub fn format_publication_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&names(&[])), "");
        assert_eq!(format_list(&names(&["Ada"])), "Ada");
        assert_eq!(format_list(&names(&["Ada", "Bob"])), "Ada & Bob");
        assert_eq!(format_list(&names(&["Ada", "Bob", "Cy"])), "Ada, Bob, & Cy");
    }

    #[test]
    fn test_byline() {
        assert_eq!(
            byline(&names(&["Ada", "Bob"]), Some("Eve")),
            "By Ada & Bob, edited by Eve"
        );
        assert_eq!(byline(&names(&["Ada"]), None), "By Ada");
    }

    #[test]
    fn test_finish_time() {
        assert_eq!(format_finish_time(Duration::from_secs(42)), "42 seconds");
        assert_eq!(format_finish_time(Duration::from_millis(59_999)), "59 seconds");
        assert_eq!(format_finish_time(Duration::from_secs(60)), "1:00");
        assert_eq!(format_finish_time(Duration::from_secs(754)), "12:34");
    }

    #[test]
    fn test_publication_date() {
        let date = parse_publication_date("2023-01-01").expect("Valid date");
        assert_eq!(format_publication_date(date), "Sunday, January 1, 2023");
        assert!(parse_publication_date("January 1st").is_err());
    }
}
