//! Quote pairing across a whole paragraph.
//!
//! Generic and mis-directed quote glyphs are re-assigned purely by position:
//! the 0th, 2nd, 4th... mark of a kind opens, the 1st, 3rd, 5th... closes.
//! An odd trailing mark therefore opens and is never closed.

/// Left (opening) double quote.
pub const LEFT_DOUBLE_QUOTE: char = '\u{201C}';
/// Right (closing) double quote.
pub const RIGHT_DOUBLE_QUOTE: char = '\u{201D}';
/// Left (opening) single quote.
pub const LEFT_SINGLE_QUOTE: char = '\u{2018}';
/// Right (closing) single quote.
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}';

/// Glyphs treated as interchangeable double quote marks.
pub const DOUBLE_QUOTE_MARKS: [char; 7] = [
    '"',        // ASCII
    '\u{201C}', // “
    '\u{201D}', // ”
    '\u{201E}', // „
    '\u{201F}', // ‟
    '\u{300C}', // 「
    '\u{300D}', // 」
];

/// Glyphs treated as interchangeable single quote marks.
pub const SINGLE_QUOTE_MARKS: [char; 5] = [
    '\'',       // ASCII
    '\u{2018}', // ‘
    '\u{2019}', // ’
    '\u{201A}', // ‚
    '\u{201B}', // ‛
];

/// Re-pair all double and single quote marks in `text`.
///
/// Must run on a paragraph's full text: a quotation routinely opens in one run
/// and closes in another. The two glyph sets are disjoint, so the passes are
/// independent of each other.
pub fn pair_quotes(text: &str) -> String {
    let result = pair_marks(text, &DOUBLE_QUOTE_MARKS, LEFT_DOUBLE_QUOTE, RIGHT_DOUBLE_QUOTE);
    pair_marks(&result, &SINGLE_QUOTE_MARKS, LEFT_SINGLE_QUOTE, RIGHT_SINGLE_QUOTE)
}

fn pair_marks(text: &str, marks: &[char], left: char, right: char) -> String {
    let mut seen = 0usize;
    text.chars()
        .map(|c| {
            if !marks.contains(&c) {
                return c;
            }
            let glyph = if seen % 2 == 0 { left } else { right };
            seen += 1;
            glyph
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_double_quotes_paired() {
        assert_eq!(pair_quotes("他说\"好\"。"), "他说\u{201C}好\u{201D}。");
    }

    #[test]
    fn test_misdirected_quotes_repaired() {
        assert_eq!(
            pair_quotes("\u{201D}甲\u{201C}和\u{300C}乙\u{300D}"),
            "\u{201C}甲\u{201D}和\u{201C}乙\u{201D}"
        );
    }

    #[test]
    fn test_single_quotes_paired() {
        assert_eq!(
            pair_quotes("'甲'\u{201A}乙\u{201B}"),
            "\u{2018}甲\u{2019}\u{2018}乙\u{2019}"
        );
    }

    #[test]
    fn test_passes_independent() {
        assert_eq!(
            pair_quotes("\"'内'\""),
            "\u{201C}\u{2018}内\u{2019}\u{201D}"
        );
    }

    #[test]
    fn test_odd_count_trailing_mark_opens() {
        let result = pair_quotes("他说\"这个方案\"不错，但是\"还需要改进");
        assert_eq!(
            result,
            "他说\u{201C}这个方案\u{201D}不错，但是\u{201C}还需要改进"
        );
        assert!(result.contains("还需要改进"));
    }

    #[test]
    fn test_preserves_char_count() {
        let text = "「a」'b\"c";
        assert_eq!(pair_quotes(text).chars().count(), text.chars().count());
    }

    #[test]
    fn test_no_quotes_unchanged() {
        assert_eq!(pair_quotes("没有引号。"), "没有引号。");
        assert_eq!(pair_quotes(""), "");
    }
}
