mod common;

use common::TestFixture;

fn run_stdout(fixture: &TestFixture, args: &[&str]) -> String {
    let output = fixture
        .command()
        .args(args)
        .output()
        .expect("Failed to run datefield");
    assert!(output.status.success(), "datefield {:?} failed", args);
    String::from_utf8(output.stdout)
        .expect("stdout is UTF-8")
        .trim_end()
        .to_string()
}

#[test]
fn test_check_twelve_hour_pattern() {
    let fixture = TestFixture::new();
    let stdout = run_stdout(&fixture, &["--pattern", "EEE d MMM yyyy, hh:mm a", "check"]);

    insta::assert_snapshot!(stdout, @r"
    Pattern: EEE d MMM yyyy, hh:mm a
    Locale:  en-US
    Sample:  Fri 5 Jan 2024, 10:30 AM
    Parsed:  2024-01-05T10:30:00
    ");
}

#[test]
fn test_check_german_pattern_with_fraction() {
    let fixture = TestFixture::new();
    let stdout = run_stdout(
        &fixture,
        &[
            "--locale",
            "de-DE",
            "--pattern",
            "EEEE, d. MMMM yyyy HH:mm:ss.SSS",
            "check",
        ],
    );

    insta::assert_snapshot!(stdout, @r"
    Pattern: EEEE, d. MMMM yyyy HH:mm:ss.SSS
    Locale:  de-DE
    Sample:  Freitag, 5. Januar 2024 10:30:15.123
    Parsed:  2024-01-05T10:30:15.123
    ");
}

#[test]
fn test_check_time_only_pattern() {
    let fixture = TestFixture::new();
    let stdout = run_stdout(&fixture, &["--pattern", "HH:mm", "check"]);

    insta::assert_snapshot!(stdout, @r#"
    Pattern: HH:mm
    Locale:  en-US
    Sample:  10:30
    Warning: sample does not parse back: Parse error: cannot parse "10:30" at position 5: not enough fields for a date and time
    "#);
}
