//! Small utility helpers used across modules.

/// English noun with a plain "s" unless the count is exactly one.
pub fn plural(count: i64, noun: &str) -> String {
  if count == 1 { noun.to_string() } else { format!("{}s", noun) }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with whole instruction blocks or WS payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
