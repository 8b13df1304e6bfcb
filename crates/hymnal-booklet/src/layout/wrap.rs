//! Greedy word wrapping

/// Split `text` into lines no wider than `max_width`.
///
/// Words are separated by single spaces and packed greedily: a word joins the
/// current line while `measure(line + " " + word) <= max_width`. A word that
/// is wider than `max_width` on its own is never split; it gets a line to
/// itself. Empty input yields one empty line.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character
    fn chars(text: &str) -> f32 {
        text.chars().count() as f32
    }

    #[test]
    fn test_fits_on_one_line() {
        assert_eq!(wrap_text("hello world", 20.0, chars), vec!["hello world"]);
    }

    #[test]
    fn test_breaks_at_width() {
        let lines = wrap_text("the quick brown fox jumps", 10.0, chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        assert!(lines.iter().all(|line| chars(line) <= 10.0));
    }

    #[test]
    fn test_exact_width_fits() {
        assert_eq!(wrap_text("abcd efgh", 9.0, chars), vec!["abcd efgh"]);
    }

    #[test]
    fn test_long_word_kept_whole() {
        let lines = wrap_text("a supercalifragilistic b", 8.0, chars);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_text("", 10.0, chars), vec![""]);
    }
}
