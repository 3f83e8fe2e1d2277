use std::collections::BTreeSet;

use proptest::prelude::*;

use quicklog::{LogParser, ParseOptions, core::comments::CommentFilter};

fn parser() -> LogParser {
    LogParser::new(ParseOptions {
        auto_increment_exchange: true,
        reference_year: Some(2026),
    })
}

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("20m".to_string()),
        Just("40m".to_string()),
        Just("cw".to_string()),
        Just("ssb".to_string()),
        Just("ft8".to_string()),
        Just("delete".to_string()),
        Just("day++".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("mycall k1xyz".to_string()),
        Just("operators w1aw".to_string()),
        "[0-9]{1,4}",
        "[0-9]{2}\\.[0-9]{3}",
        "[0-9]{2,4}-[0-9]{1,2}-[0-9]{1,2}",
        "[A-Z][0-9][A-Z]{1,3}",
        "[@#,.][a-z0-9]{1,6}",
        "<[a-z ]{0,8}>",
        "[+-]?[0-9]{1,3}",
    ]
}

fn line_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(token_strategy(), 0..8).prop_map(|tokens| tokens.join(" "))
}

fn document_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(line_strategy(), 0..40)
}

proptest! {
    #[test]
    fn parsing_is_deterministic(lines in document_strategy()) {
        let a = parser().parse(&lines);
        let b = parser().parse(&lines);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn rows_always_carry_a_callsign(lines in document_strategy()) {
        let log = parser().parse(&lines);
        for row in &log {
            prop_assert!(row.call.len() >= 3);
            prop_assert!(row.call.chars().any(|c| c.is_ascii_alphabetic()));
            prop_assert!(row.call.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || c == '/'));
            prop_assert!(!row.sent_rst.is_empty());
            prop_assert!(!row.rcvd_rst.is_empty());
        }
        for diag in log.diagnostics() {
            prop_assert!(diag.line_num >= 1 && diag.line_num <= lines.len());
        }
    }

    #[test]
    fn parser_is_total_over_printable_text(lines in prop::collection::vec("[ -~]{0,60}", 0..30)) {
        let log = parser().parse(&lines);
        prop_assert!(log.len() <= lines.len());
    }

    #[test]
    fn stripping_is_idempotent(line in "[ -~]{0,60}") {
        let once = CommentFilter::new().strip_line(&line);
        let twice = CommentFilter::new().strip_line(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(!once.contains('{'), "stripped line still contains '{{'");
    }

    #[test]
    fn comment_free_lines_pass_through(line in "[^{}]{0,60}") {
        let mut filter = CommentFilter::new();
        prop_assert_eq!(filter.strip_line(&line), line);
        prop_assert!(!filter.in_comment());
    }

    #[test]
    fn operators_are_a_deduplicated_union(
        first in prop::collection::vec("[A-Z][0-9][A-Z]{1,3}", 1..6),
        second in prop::collection::vec("[A-Z][0-9][A-Z]{1,3}", 1..6),
    ) {
        let lines = [
            format!("operators {}", first.join(" ")),
            format!("operators {}", second.join(", ")),
        ];
        let log = parser().parse(&lines);
        let expected: BTreeSet<String> = first.into_iter().chain(second).collect();
        prop_assert_eq!(log.operators(), &expected);
    }
}
