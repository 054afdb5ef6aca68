use super::*;
use crate::model::slide::FontWeight;

#[test]
fn monospace_fixed_counts_chars_not_bytes() {
    let mut m = MonospaceMeasurer::fixed(10.0);
    assert_eq!(m.measure("").unwrap(), 0.0);
    assert_eq!(m.measure("abc").unwrap(), 30.0);
    assert_eq!(m.measure("héé").unwrap(), 30.0);
}

#[test]
fn monospace_em_follows_bound_style() {
    let mut m = MonospaceMeasurer::em(0.5);
    m.configure(&TextRunStyle {
        font_size: 40.0,
        letter_spacing: 2.0,
        ..TextRunStyle::default()
    })
    .unwrap();
    assert_eq!(m.measure("ab").unwrap(), 44.0);

    assert!(
        m.configure(&TextRunStyle {
            font_size: 0.0,
            ..TextRunStyle::default()
        })
        .is_err()
    );
}

#[test]
fn run_style_scales_reference_sizes() {
    let style = TextStyle {
        font_size: 24.0,
        letter_spacing: 1.0,
        font_weight: FontWeight::BOLD,
        font_style: FontStyle::Italic,
        ..TextStyle::default()
    };
    let rs = TextRunStyle::from_style(&style, 2.0);
    assert_eq!(rs.font_size, 48.0);
    assert_eq!(rs.letter_spacing, 2.0);
    assert_eq!(rs.weight, 700.0);
    assert!(rs.italic);
}

#[test]
fn emoji_runs_split_clusters() {
    assert_eq!(emoji_runs("hi"), vec![TextRun::Text("hi")]);
    assert_eq!(
        emoji_runs("a\u{1F600}b"),
        vec![
            TextRun::Text("a"),
            TextRun::Emoji("\u{1F600}"),
            TextRun::Text("b")
        ]
    );
    // thumbs up + skin tone, then a ZWJ family sequence
    let s = "\u{1F44D}\u{1F3FD}\u{1F468}\u{200D}\u{1F469}";
    assert_eq!(
        emoji_runs(s),
        vec![
            TextRun::Emoji("\u{1F44D}\u{1F3FD}"),
            TextRun::Emoji("\u{1F468}\u{200D}\u{1F469}")
        ]
    );
    // a flag is two regional indicators
    assert_eq!(
        emoji_runs("\u{1F1EB}\u{1F1F7}\u{1F1E9}\u{1F1EA}"),
        vec![
            TextRun::Emoji("\u{1F1EB}\u{1F1F7}"),
            TextRun::Emoji("\u{1F1E9}\u{1F1EA}")
        ]
    );
    assert_eq!(
        emoji_runs("\u{2764}\u{FE0F}!"),
        vec![TextRun::Emoji("\u{2764}\u{FE0F}"), TextRun::Text("!")]
    );
}

#[test]
fn emoji_slots_are_font_size_squares() {
    let mut m = EmojiSlotMeasurer::new(MonospaceMeasurer::fixed(10.0));
    m.configure(&TextRunStyle {
        font_size: 30.0,
        ..TextRunStyle::default()
    })
    .unwrap();
    assert_eq!(m.slot_width(), 30.0);
    assert_eq!(m.measure("ok \u{1F600}").unwrap(), 30.0 + 30.0);
    assert_eq!(m.measure("\u{1F468}\u{200D}\u{1F469}").unwrap(), 30.0);
}

#[test]
fn boxed_and_borrowed_measurers_delegate() {
    let mut boxed: Box<dyn TextMeasurer> = Box::new(MonospaceMeasurer::fixed(5.0));
    assert_eq!(boxed.measure("abcd").unwrap(), 20.0);
    let mut inner = MonospaceMeasurer::fixed(3.0);
    let mut borrowed = &mut inner;
    assert_eq!(TextMeasurer::measure(&mut borrowed, "ab").unwrap(), 6.0);
}
