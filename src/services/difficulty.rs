use regex::Regex;

/// Extract the difficulty rating from the full detected text.
///
/// Primary heuristic: a bare integer sitting next to a `|` separator, the
/// way the results screen renders `difficulty | time | ...`. When several
/// candidates qualify, the last one scanned wins; this reproduces the
/// historical behavior and is deliberately not "fixed" (see the mixed-pipe
/// test below). Fallback: the last bare integer positioned before the first
/// time-of-day token. Never fails; absent difficulty is `None`.
pub fn extract_difficulty(detected_text: &str) -> Option<u32> {
    let text = detected_text.to_lowercase();

    let number_re = Regex::new(r"\b\d+\b").unwrap();
    let time_re = Regex::new(r"\d+:\d{2}:\d{2}").unwrap();

    let mut pipe_adjacent = None;
    for token in number_re.find_iter(&text) {
        let Ok(candidate) = token.as_str().parse::<u32>() else {
            continue;
        };

        let trailing = format!("{candidate} |");
        let leading = format!("| {candidate}");
        if text.contains(&trailing) || text.contains(&leading) {
            pipe_adjacent = Some(candidate);
        }
    }

    if pipe_adjacent.is_some() {
        return pipe_adjacent;
    }

    let time_start = time_re.find(&text)?.start();

    let mut before_time = None;
    for token in number_re.find_iter(&text) {
        if token.start() >= time_start {
            break;
        }
        if let Ok(candidate) = token.as_str().parse::<u32>() {
            before_time = Some(candidate);
        }
    }

    before_time
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_adjacent_number() {
        assert_eq!(extract_difficulty("7 | some text 00:12:34"), Some(7));
    }

    #[test]
    fn test_pipe_before_number() {
        assert_eq!(extract_difficulty("mission summary | 9 extraction"), Some(9));
    }

    #[test]
    fn test_no_numbers_is_absent() {
        assert_eq!(extract_difficulty("no digits anywhere"), None);
        assert_eq!(extract_difficulty(""), None);
    }

    #[test]
    fn test_numbers_without_pipe_or_time_are_absent() {
        assert_eq!(extract_difficulty("collected 42 samples and 7 medals"), None);
    }

    // Documents the historical override: "12" from the time token also
    // qualifies via the "| 12" adjacency and, scanning last, wins over the
    // earlier candidates. Intentional fidelity, not an endorsement.
    #[test]
    fn test_multiple_pipe_adjacent_last_scanned_wins() {
        assert_eq!(extract_difficulty("3 | 9 | 12:00:00"), Some(12));
    }

    #[test]
    fn test_fallback_last_number_before_time() {
        assert_eq!(
            extract_difficulty("difficulty 5 mission time 00:12:34"),
            Some(5)
        );
        assert_eq!(
            extract_difficulty("level 3 then 8 before 01:02:03 but 9 after"),
            Some(8)
        );
    }

    #[test]
    fn test_time_digits_do_not_count_as_candidates() {
        // The only numbers are inside the time token itself.
        assert_eq!(extract_difficulty("extraction at 00:12:34"), None);
    }

    #[test]
    fn test_ordinal_markers_are_not_bare_integers() {
        // "1st" has no word boundary between the digit and the suffix.
        assert_eq!(extract_difficulty("1st 2nd 3rd 00:10:00"), None);
    }

    #[test]
    fn test_case_is_normalized() {
        assert_eq!(extract_difficulty("DIFFICULTY 6 | EXTRACT 00:09:59"), Some(6));
    }
}
