use super::*;
use crate::text::measure::MonospaceMeasurer;

fn mono() -> MonospaceMeasurer {
    MonospaceMeasurer::fixed(10.0)
}

#[test]
fn greedy_wrap_with_exact_arithmetic() {
    // "one two" is exactly 70 px and fits; adding " three" would be 130 px.
    let lines = wrap("one two three", &mut mono(), 70.0, 0).unwrap();
    assert_eq!(lines, vec!["one two", "three"]);

    let lines = wrap("one two three", &mut mono(), 69.0, 0).unwrap();
    assert_eq!(lines, vec!["one", "two", "three"]);
}

#[test]
fn manual_breaks_survive_and_empty_segments_stay() {
    let lines = wrap("a\n\nb", &mut mono(), 1000.0, 0).unwrap();
    assert_eq!(lines, vec!["a", "", "b"]);

    let lines = wrap("a\r\nb\n", &mut mono(), 1000.0, 0).unwrap();
    assert_eq!(lines, vec!["a", "b", ""]);

    assert_eq!(wrap("", &mut mono(), 100.0, 0).unwrap(), vec![""]);
}

#[test]
fn long_word_stays_whole() {
    let lines = wrap("a supercalifragilistic b", &mut mono(), 50.0, 0).unwrap();
    assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
}

#[test]
fn whitespace_runs_collapse() {
    let lines = wrap("  one   two  ", &mut mono(), 1000.0, 0).unwrap();
    assert_eq!(lines, vec!["one two"]);
}

#[test]
fn wrap_is_deterministic() {
    let text = "The quick brown fox\njumps over the lazy dog again and again";
    let a = wrap(text, &mut mono(), 120.0, 3).unwrap();
    let b = wrap(text, &mut mono(), 120.0, 3).unwrap();
    assert_eq!(a, b);
}

#[test]
fn truncation_keeps_first_lines_and_fits_ellipsis() {
    let mut m = mono();
    let lines = wrap("hello wonderful world", &mut m, 100.0, 1).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0], "hello…");
    assert!(m.measure(&lines[0]).unwrap() <= 100.0);

    let lines = wrap("aaaa bbbb cccc dddd eeee", &mut m, 90.0, 2).unwrap();
    assert_eq!(lines, vec!["aaaa bbbb", "cccc ddd…"]);
    assert!(m.measure(&lines[1]).unwrap() <= 90.0);

    // Exactly max_lines lines that fit: nothing to truncate.
    let lines = wrap("aaaa bbbb cccc dddd", &mut m, 90.0, 2).unwrap();
    assert_eq!(lines, vec!["aaaa bbbb", "cccc dddd"]);
}

#[test]
fn single_overflowing_word_is_ellipsized_when_capped() {
    let mut m = mono();
    let lines = wrap("abcdefghijkl", &mut m, 50.0, 1).unwrap();
    assert_eq!(lines, vec!["abcd…"]);

    // Uncapped, the word is left alone.
    let lines = wrap("abcdefghijkl", &mut m, 50.0, 0).unwrap();
    assert_eq!(lines, vec!["abcdefghijkl"]);
}

#[test]
fn fit_with_ellipsis_trims_trailing_space_and_falls_back() {
    let mut m = mono();
    assert_eq!(fit_with_ellipsis("ab cd", &mut m, 40.0).unwrap(), "ab…");
    assert_eq!(fit_with_ellipsis("abc", &mut m, 5.0).unwrap(), "…");
    assert_eq!(fit_with_ellipsis("", &mut m, 5.0).unwrap(), "…");
}

#[test]
fn text_transforms() {
    assert_eq!(apply_text_transform("Hi there", TextTransform::Uppercase), "HI THERE");
    assert_eq!(apply_text_transform("Hi There", TextTransform::Lowercase), "hi there");
    assert_eq!(
        apply_text_transform("hello wORLD\nnew line", TextTransform::Capitalize),
        "Hello WORLD\nNew Line"
    );
    assert_eq!(apply_text_transform("as is", TextTransform::None), "as is");
}
