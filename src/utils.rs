use super::*;

pub(crate) fn format_age(seconds: i64) -> String {
  const MINUTE: i64 = 60;
  const HOUR: i64 = 60 * MINUTE;
  const DAY: i64 = 24 * HOUR;
  const MONTH: i64 = 30 * DAY;
  const YEAR: i64 = 365 * DAY;

  let (count, unit) = match seconds {
    ..MINUTE => return "just now".to_string(),
    ..HOUR => (seconds / MINUTE, "minute"),
    ..DAY => (seconds / HOUR, "hour"),
    ..MONTH => (seconds / DAY, "day"),
    ..YEAR => (seconds / MONTH, "month"),
    _ => (seconds / YEAR, "year"),
  };

  match count {
    1 => format!("1 {unit} ago"),
    _ => format!("{count} {unit}s ago"),
  }
}

pub(crate) fn format_comments(count: usize) -> String {
  match count {
    1 => "1 comment".to_string(),
    _ => format!("{count} comments"),
  }
}

pub(crate) fn format_points(score: u64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

pub(crate) fn now() -> i64 {
  Utc::now().timestamp()
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  if lines.is_empty() {
    vec![text.to_string()]
  } else {
    lines
  }
}
