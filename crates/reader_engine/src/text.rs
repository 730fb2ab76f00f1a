/// Canonical form for every candidate text: whitespace runs inside a line
/// become one space, lines are trimmed, blank-line runs shrink to a single
/// blank line, and the whole is trimmed.
pub fn clean_text(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    let mut pending_blank = false;

    for line in raw.lines() {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            pending_blank = !cleaned.is_empty();
            continue;
        };
        if !cleaned.is_empty() {
            cleaned.push('\n');
            if pending_blank {
                cleaned.push('\n');
            }
        }
        pending_blank = false;
        cleaned.push_str(first);
        for word in words {
            cleaned.push(' ');
            cleaned.push_str(word);
        }
    }

    cleaned
}

/// Length in characters, the unit every threshold is expressed in.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_spaces_and_trims() {
        assert_eq!(clean_text("  Hello \t  world \u{a0} again  "), "Hello world again");
    }

    #[test]
    fn keeps_at_most_one_blank_line() {
        assert_eq!(clean_text("a\n\n\n\n b \n   \nc\nd"), "a\n\nb\n\nc\nd");
    }

    #[test]
    fn whitespace_only_becomes_empty() {
        assert_eq!(clean_text(" \n\t\n "), "");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(char_len("caf\u{e9}"), 4);
    }
}
