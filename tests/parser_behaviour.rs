use chrono::{NaiveDate, NaiveDateTime};
use quicklog::{
    Field, LogFile, LogParser, ParseOptions, Value,
    parser::increment_exchange,
    types::{Band, Mode},
};

fn parser(auto_increment_exchange: bool) -> LogParser {
    LogParser::new(ParseOptions {
        auto_increment_exchange,
        reference_year: Some(2026),
    })
}

fn parse(lines: &[&str]) -> LogFile {
    parser(false).parse(lines)
}

fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(hh, mm, 0))
        .expect("valid timestamp")
}

fn calls(log: &LogFile) -> Vec<&str> {
    log.iter().map(|r| r.call.as_str()).collect()
}

#[test]
fn sticky_fields_carry_to_later_rows() {
    let log = parse(&["2023 06 15", "1200 14.250 20m FT8 W1AW 599 599", "1230 K1ABC"]);
    assert_eq!(calls(&log), vec!["W1AW", "K1ABC"]);

    let first = &log[0];
    assert_eq!(first.date_time, at(2023, 6, 15, 12, 0));
    assert_eq!(first.sent_rst, "599");
    assert_eq!(first.rcvd_rst, "599");

    let second = &log[1];
    assert_eq!(second.date_time.date(), NaiveDate::from_ymd_opt(2023, 6, 15).expect("date"));
    assert_eq!(second.band, Some(Band::B20m));
    assert_eq!(second.freq, Some(14.25));
    assert_eq!(second.mode, Some(Mode::Ft8));
}

#[test]
fn time_deltas_wrap_within_the_day() {
    let log = parse(&["2023-06-15", "1200 W1AW", "1230 K1ABC"]);
    assert_eq!(log[1].date_time, at(2023, 6, 15, 0, 30));
}

#[test]
fn time_accumulates_minutes() {
    let log = parse(&["2023-06-15 20m cw", "1200 w1aw 5 7 @bob", "5 k1abc", "45 n0call"]);
    assert_eq!(log[0].date_time, at(2023, 6, 15, 12, 0));
    assert_eq!(log[1].date_time, at(2023, 6, 15, 12, 5));
    assert_eq!(log[2].date_time, at(2023, 6, 15, 12, 50));
}

#[test]
fn rows_before_any_date_use_year_one() {
    let log = parse(&["W1AW"]);
    assert_eq!(log[0].date_time, at(1, 1, 1, 0, 0));
}

#[test]
fn new_date_keeps_time_of_day() {
    let log = parse(&["1200 W1AW", "2024-01-02 K1ABC"]);
    assert_eq!(log[1].date_time, at(2024, 1, 2, 12, 0));
}

#[test]
fn day_advance_moves_the_date() {
    let log = parse(&["2023-06-15", "1200 W1AW", "day+ K1ABC", "day++ N0CALL"]);
    assert_eq!(log[0].date_time, at(2023, 6, 15, 12, 0));
    assert_eq!(log[1].date_time, at(2023, 6, 16, 12, 0));
    assert_eq!(log[2].date_time, at(2023, 6, 18, 12, 0));
}

#[test]
fn two_digit_years_in_the_future_are_last_century() {
    let log = parse(&["26-01-02 W1AW", "27-01-02 K1ABC", "995/3/4 N0CALL", "023-3-4 K2XX"]);
    let years: Vec<String> = log
        .iter()
        .map(|r| r.date_time.format("%Y").to_string())
        .collect();
    assert_eq!(years, vec!["2026", "1927", "1995", "2023"]);
}

#[test]
fn impossible_date_is_a_diagnostic_not_an_abort() {
    let log = parse(&["2023-06-15", "2023-02-30 W1AW"]);
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].date_time.date(), NaiveDate::from_ymd_opt(2023, 6, 15).expect("date"));
    let diag = &log.diagnostics()[0];
    assert_eq!(diag.line_num, 2);
    assert_eq!(diag.line, "2023-02-30 W1AW");
    assert_eq!(diag.message, "2023-02-30 is not a calendar date");
}

#[test]
fn frequency_outside_band_is_cleared() {
    let log = parse(&["40m 14.250 K1ABC", "W1AW"]);
    assert_eq!(log[0].band, Some(Band::B40m));
    assert_eq!(log[0].freq, None);
    assert_eq!(log[1].freq, None);
}

#[test]
fn default_reports_depend_on_mode() {
    let log = parse(&["cw", "W1AW", "ssb", "K1ABC", "ft8", "N0CALL"]);
    assert_eq!((log[0].sent_rst.as_str(), log[0].rcvd_rst.as_str()), ("599", "599"));
    assert_eq!((log[1].sent_rst.as_str(), log[1].rcvd_rst.as_str()), ("59", "59"));
    assert_eq!((log[2].sent_rst.as_str(), log[2].rcvd_rst.as_str()), ("59", "59"));
}

#[test]
fn report_shorthand_expands() {
    let log = parse(&["cw", "W1AW 5", "K1ABC 7", "N0CALL +5", "K2XX 5 7"]);
    assert_eq!(log[0].rcvd_rst, "599");
    assert_eq!(log[0].sent_rst, "599");
    assert_eq!(log[1].rcvd_rst, "579");
    assert_eq!(log[2].rcvd_rst, "+5");
    assert_eq!(log[3].sent_rst, "599");
    assert_eq!(log[3].rcvd_rst, "579");
}

#[test]
fn correction_removes_previous_row() {
    let log = parse(&["20m cw", "1200 W1AW", "delete"]);
    assert!(log.is_empty());
    assert!(log.diagnostics().is_empty());

    let log = parse(&["W1AW", "K1ABC", "ERROR", "N0CALL {typo} ", "drop {oops}"]);
    assert_eq!(calls(&log), vec!["W1AW"]);
}

#[test]
fn correction_keeps_sticky_state() {
    let log = parse(&["20m", "W1AW", "delete", "K1ABC"]);
    assert_eq!(calls(&log), vec!["K1ABC"]);
    assert_eq!(log[0].band, Some(Band::B20m));
}

#[test]
fn correction_with_nothing_to_remove_is_reported() {
    let log = parse(&["drop", "W1AW"]);
    assert_eq!(calls(&log), vec!["W1AW"]);
    assert_eq!(log.diagnostics().len(), 1);
    assert_eq!(log.diagnostics()[0].line_num, 1);
    assert_eq!(
        log.diagnostics()[0].to_string(),
        "line 1: `drop` with no contact to remove"
    );
}

#[test]
fn struck_line_still_updates_sticky_state() {
    let log = parse(&["20m W1AW drop", "K1ABC"]);
    assert_eq!(calls(&log), vec!["K1ABC"]);
    assert_eq!(log[0].band, Some(Band::B20m));
}

#[test]
fn header_fields_keep_last_assignment() {
    let log = parse(&[
        "mycall k1abc",
        "mycall k2abc",
        "mygrid fn42",
        "qslmsg tnx 73",
        "mywwff kff-1234",
        "mysota w7w/lc-001",
        "mypota k-0001",
        "nickname the shack",
    ]);
    assert!(log.is_empty());
    assert_eq!(log.my_call(), "K2ABC");
    assert_eq!(log.my_grid(), "FN42");
    assert_eq!(log.qsl_msg(), "tnx 73");
    assert_eq!(log.my_wwff(), "KFF-1234");
    assert_eq!(log.my_sota(), "W7W/LC-001");
    assert_eq!(log.my_pota(), "K-0001");
    assert_eq!(log.qth_nickname(), "the shack");
}

#[test]
fn unset_header_fields_are_empty() {
    let log = parse(&["W1AW"]);
    assert_eq!(log.my_call(), "");
    assert_eq!(log.my_grid(), "");
    assert!(log.operators().is_empty());
}

#[test]
fn operators_accumulate_as_a_set() {
    let log = parse(&["operators k1abc w1aw", "ops W1AW, n0ne"]);
    let ops: Vec<&str> = log.operators().iter().map(String::as_str).collect();
    assert_eq!(ops, vec!["K1ABC", "N0NE", "W1AW"]);
}

#[test]
fn exchange_copies_without_auto_increment() {
    let log = parser(false).parse(["W1AW ,5", "K1ABC"]);
    assert_eq!(log[0].sent_exch.as_deref(), Some("5"));
    assert_eq!(log[1].sent_exch.as_deref(), Some("5"));
}

#[test]
fn exchange_increments_when_enabled() {
    let log = parser(true).parse(["W1AW ,5", "K1ABC", "N0CALL"]);
    let sent: Vec<_> = log.iter().map(|r| r.sent_exch.as_deref()).collect();
    assert_eq!(sent, vec![Some("5"), Some("6"), Some("7")]);

    let log = parser(true).parse(["W1AW ,009", "K1ABC"]);
    assert_eq!(log[1].sent_exch.as_deref(), Some("010"));
}

#[test]
fn non_numeric_exchange_is_copied_with_a_diagnostic() {
    let log = parser(true).parse(["W1AW ,ma", "K1ABC"]);
    assert_eq!(log[1].sent_exch.as_deref(), Some("MA"));
    assert_eq!(log.diagnostics().len(), 1);
    assert_eq!(log.diagnostics()[0].line_num, 2);
    assert_eq!(log.diagnostics()[0].message, "cannot increment exchange `MA`");
}

#[test]
fn first_row_has_no_inherited_exchange() {
    let log = parser(true).parse(["W1AW"]);
    assert_eq!(log[0].sent_exch, None);
}

#[test]
fn increment_keeps_width() {
    assert_eq!(increment_exchange("9").as_deref(), Some("10"));
    assert_eq!(increment_exchange("099").as_deref(), Some("100"));
    assert_eq!(increment_exchange("005").as_deref(), Some("006"));
    assert_eq!(increment_exchange("MA"), None);
    assert_eq!(increment_exchange(""), None);
}

#[test]
fn lines_without_a_callsign_make_no_row() {
    let log = parse(&["20m 14.250 cw 599 59 <just notes>", "ab", "cw sota"]);
    assert!(log.is_empty());
}

#[test]
fn comments_can_hide_whole_lines() {
    let log = parse(&["20m {start of", "a long comment W1AW", "end} K1ABC"]);
    assert_eq!(calls(&log), vec!["K1ABC"]);
    assert_eq!(log[0].band, Some(Band::B20m));
}

#[test]
fn blank_and_hash_lines_are_skipped() {
    let log = parse(&["", "   ", "# W1AW", "K1ABC"]);
    assert_eq!(calls(&log), vec!["K1ABC"]);
}

#[test]
fn braces_in_hash_lines_do_not_open_comments() {
    let log = parse(&["# new antenna {dipole", "20m cw", "W1AW", "K1ABC"]);
    assert_eq!(calls(&log), vec!["W1AW", "K1ABC"]);
    assert_eq!(log[0].band, Some(Band::B20m));
}

#[test]
fn skipped_lines_inside_a_comment_keep_it_open() {
    let log = parse(&[
        "20m {start",
        "",
        "# closing brace } here is ignored",
        "W1AW",
        "} K1ABC",
    ]);
    assert_eq!(calls(&log), vec!["K1ABC"]);
}

#[test]
fn sticky_only_lines_do_not_inherit_exchange() {
    let lines = ["W1AW ,ma", "20m", "cw", "K1ABC ,mb"];
    let log = parser(true).parse(lines);
    assert_eq!(calls(&log), vec!["W1AW", "K1ABC"]);
    assert!(log.diagnostics().is_empty());
    assert!(parser(true).parse_strict(lines).is_ok());

    let log = parser(true).parse(["W1AW ,ma", "20m", "K1ABC"]);
    assert_eq!(log.diagnostics().len(), 1);
    assert_eq!(log.diagnostics()[0].line_num, 3);
}

#[test]
fn voice_shorthand_reads_strength() {
    let log = parse(&["ssb", "W1AW 5", "K1ABC 4"]);
    assert_eq!(log[0].rcvd_rst, "55");
    assert_eq!(log[1].rcvd_rst, "49");
}

#[test]
fn time_can_follow_the_call() {
    let log = parse(&["2023-06-15", "W1AW 1200", "K1ABC 5"]);
    assert_eq!(log[0].date_time, at(2023, 6, 15, 12, 0));
    assert_eq!(log[1].date_time, at(2023, 6, 15, 12, 0));
    assert_eq!(log[1].rcvd_rst, "5");
}

#[test]
fn rows_expose_named_and_positional_fields() {
    let log = parse(&["2023-06-15 20m 14.250 cw", "1200 W1AW #fn42"]);
    let row = &log[0];

    assert_eq!(row.get("call"), Some(Value::Text("W1AW")));
    assert_eq!(row.at(Field::Call.index()), Some(Value::Text("W1AW")));
    assert_eq!(row.get("grid"), Some(Value::Text("FN42")));
    assert_eq!(row.get("band"), Some(Value::Band(Band::B20m)));
    assert!(row.get("notes").is_some_and(|v| v.is_null()));
    assert_eq!(row.get("bogus"), None);
    assert_eq!(row.at(Field::ALL.len()), None);

    let cells: Vec<String> = row.values().map(|(_, v)| v.to_string()).collect();
    assert_eq!(cells[0], "2023-06-15 12:00");
    assert_eq!(cells[1], "20m");
    assert_eq!(cells[2], "14.250");
    assert_eq!(cells[3], "CW");
    assert_eq!(cells.len(), 16);
}

#[test]
fn log_lookup_helpers() {
    let log = parse(&["W1AW", "K1ABC", "w1aw @joe"]);
    assert_eq!(log.len(), 3);
    assert_eq!(log.get(1).map(|r| r.call.as_str()), Some("K1ABC"));
    assert_eq!(log.get(3), None);
    assert_eq!(log.recent(2).len(), 2);
    assert_eq!(log.recent(10).len(), 3);

    let hits = log.by_call("w1aw");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[1].name.as_deref(), Some("Joe"));
    assert!(log.by_call("N0CALL").is_empty());

    let mut seen = 0;
    for row in &log {
        assert!(!row.call.is_empty());
        seen += 1;
    }
    assert_eq!(seen, 3);
}

#[test]
fn strict_parse_fails_on_first_diagnostic() {
    let err = parser(false)
        .parse_strict(["W1AW", "2023-02-30 K1ABC", "delete", "delete", "delete"])
        .expect_err("should fail");
    assert_eq!(err.line_num, 2);
    assert_eq!(err.line, "2023-02-30 K1ABC");

    let log = parser(false)
        .parse_strict(["W1AW", "K1ABC"])
        .expect("clean log");
    assert_eq!(log.len(), 2);
}

#[test]
fn from_text_splits_lines() {
    let log = LogFile::from_text("mycall k1xyz\n20m ssb\nw1aw\n");
    assert_eq!(log.my_call(), "K1XYZ");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].mode, Some(Mode::Ssb));
}
