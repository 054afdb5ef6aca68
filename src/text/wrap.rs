use crate::{
    foundation::error::SlideResult, model::slide::TextTransform, text::measure::TextMeasurer,
};

/// Appended to a truncated last line.
pub const ELLIPSIS: &str = "…";

/// Apply a case transform. Runs before wrapping so measured and drawn strings are the same.
pub fn apply_text_transform(text: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => text.to_string(),
        TextTransform::Uppercase => text.to_uppercase(),
        TextTransform::Lowercase => text.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for c in text.chars() {
                if at_word_start && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                at_word_start = c.is_whitespace();
            }
            out
        }
    }
}

/// Wrap `text` into lines no wider than `max_width`, as judged by `measurer`.
///
/// Manual line breaks always survive; each segment between them wraps greedily on whitespace.
/// A single word wider than `max_width` stays whole on its own line. With `max_lines > 0` the
/// output is capped at that many lines and the last kept line is shortened with [`ELLIPSIS`]
/// whenever lines were dropped or it still overflows. `max_lines == 0` never truncates.
pub fn wrap<M: TextMeasurer + ?Sized>(
    text: &str,
    measurer: &mut M,
    max_width: f64,
    max_lines: usize,
) -> SlideResult<Vec<String>> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let segment = segment.strip_suffix('\r').unwrap_or(segment);
        wrap_segment(segment, measurer, max_width, &mut lines)?;
    }

    if max_lines > 0 {
        let dropped = lines.len() > max_lines;
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut()
            && (dropped || measurer.measure(last.as_str())? > max_width)
        {
            *last = fit_with_ellipsis(last.as_str(), measurer, max_width)?;
        }
    }

    Ok(lines)
}

fn wrap_segment<M: TextMeasurer + ?Sized>(
    segment: &str,
    measurer: &mut M,
    max_width: f64,
    out: &mut Vec<String>,
) -> SlideResult<()> {
    let mut current = String::new();
    for word in segment.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measurer.measure(&candidate)? > max_width {
            out.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    // An empty segment still occupies a line.
    out.push(current);
    Ok(())
}

/// Longest prefix of `line` (in chars, trailing whitespace trimmed) such that
/// `prefix + "…"` fits `max_width`. Falls back to a bare ellipsis.
pub fn fit_with_ellipsis<M: TextMeasurer + ?Sized>(
    line: &str,
    measurer: &mut M,
    max_width: f64,
) -> SlideResult<String> {
    let boundaries: Vec<usize> = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .collect();
    let candidate = |k: usize| format!("{}{ELLIPSIS}", line[..boundaries[k]].trim_end());

    // Invariant: prefix `lo` fits (0 is the fallback), the answer is in `lo..=hi`.
    let (mut lo, mut hi) = (0usize, boundaries.len() - 1);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        if measurer.measure(&candidate(mid))? <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    Ok(candidate(lo))
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
