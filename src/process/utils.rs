// src/process/utils.rs
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Trim whitespace and strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].trim().to_string()
    } else {
        trimmed.to_string()
    }
}

/// Removes the team's own name (and the match separator) from a match label,
/// leaving the opponent.
pub fn strip_self_reference(label: &str, team: &str) -> String {
    let mut out = label.replace(" -", " ");
    if !team.is_empty() {
        out = out.replace(team, " ");
    }
    let out = out.trim_matches(|c: char| c == '-' || c.is_whitespace());
    WHITESPACE.replace_all(out, " ").into_owned()
}

/// True when every character is a digit and there is at least one.
pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
