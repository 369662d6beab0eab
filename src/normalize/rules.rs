//! Ordered punctuation substitution rules.
//!
//! The rules run in a fixed order and are idempotent: nothing a rule emits
//! triggers another rule on a second pass.
//!
//! 1. Runs of two or more `.` (or two or more `。`) become `……`.
//! 2. Runs of two or more `-`, and any isolated `—`, become `——`.
//! 3. If the text unit contains a CJK ideograph, `():;?!` become full-width.
//! 4. A `,` touching a CJK ideograph on either side becomes `，`.
//! 5. A `.` after a CJK ideograph and before whitespace or end of text
//!    becomes `。`.

use super::protect::protect;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Ellipsis emitted for collapsed period runs.
pub const ELLIPSIS: &str = "……";

/// The canonical Chinese dash: two em-dashes.
pub const EM_DASH_PAIR: &str = "——";

/// Direct half-width to full-width substitutions, applied only to text that
/// contains Chinese.
pub const FULLWIDTH_REPLACEMENTS: [(char, char); 6] = [
    ('(', '（'),
    (')', '）'),
    (':', '：'),
    (';', '；'),
    ('?', '？'),
    ('!', '！'),
];

/// Check if `c` is in the CJK Unified Ideographs block.
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Check if the text contains at least one CJK ideograph.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_ideograph)
}

/// Context a text piece is rewritten in.
///
/// When a run is split around protected spans, each plain piece is rewritten
/// separately but shares the Chinese gate of the whole run, and only the final
/// piece may treat its end as end of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    /// Whether the enclosing text unit contains a CJK ideograph
    pub has_cjk: bool,
    /// Whether this piece ends the enclosing text unit
    pub at_text_end: bool,
}

struct Rules {
    ascii_ellipsis: Regex,
    fullwidth_ellipsis: Regex,
    hyphen_run: Regex,
    em_dash_run: Regex,
    cjk_comma: Regex,
    comma_cjk: Regex,
    cjk_period: Regex,
    cjk_period_at_end: Regex,
}

static RULES: OnceLock<Rules> = OnceLock::new();

fn rules() -> &'static Rules {
    RULES.get_or_init(|| Rules {
        ascii_ellipsis: Regex::new(r"\.{2,}").expect("Failed to compile ellipsis regex"),
        fullwidth_ellipsis: Regex::new(r"。{2,}").expect("Failed to compile ellipsis regex"),
        hyphen_run: Regex::new(r"-{2,}").expect("Failed to compile dash regex"),
        em_dash_run: Regex::new(r"—+").expect("Failed to compile dash regex"),
        cjk_comma: Regex::new(r"([\x{4E00}-\x{9FFF}]),").expect("Failed to compile comma regex"),
        comma_cjk: Regex::new(r",([\x{4E00}-\x{9FFF}])").expect("Failed to compile comma regex"),
        cjk_period: Regex::new(r"([\x{4E00}-\x{9FFF}])\.(\s)")
            .expect("Failed to compile period regex"),
        cjk_period_at_end: Regex::new(r"([\x{4E00}-\x{9FFF}])\.(\s|$)")
            .expect("Failed to compile period regex"),
    })
}

/// Apply the punctuation rules to a whole text unit.
///
/// The text is expected to be free of protected patterns already; use
/// [`rewrite_protected`] for raw run text.
pub fn rewrite_simple(text: &str) -> String {
    rewrite_with(
        text,
        RuleContext {
            has_cjk: contains_cjk(text),
            at_text_end: true,
        },
    )
}

/// Apply the punctuation rules to one piece of a text unit.
pub fn rewrite_with(text: &str, ctx: RuleContext) -> String {
    let rules = rules();

    // Ellipsis first, so no single-period rule sees part of a run.
    let result = rules.ascii_ellipsis.replace_all(text, ELLIPSIS);
    let result = rules.fullwidth_ellipsis.replace_all(&result, ELLIPSIS);

    let result = rules.hyphen_run.replace_all(&result, EM_DASH_PAIR);
    let result = rules.em_dash_run.replace_all(&result, |caps: &Captures| {
        let run = &caps[0];
        if run.chars().count() == 1 {
            EM_DASH_PAIR.to_string()
        } else {
            run.to_string()
        }
    });

    let result = if ctx.has_cjk {
        to_fullwidth(&result)
    } else {
        result.into_owned()
    };

    let result = rules.cjk_comma.replace_all(&result, "${1}，");
    let result = rules.comma_cjk.replace_all(&result, "，${1}");

    let period = if ctx.at_text_end {
        &rules.cjk_period_at_end
    } else {
        &rules.cjk_period
    };
    period.replace_all(&result, "${1}。${2}").into_owned()
}

/// Protect patterns, apply the rules to the remaining text, and restore.
///
/// This is the per-run rewrite step: the Chinese gate covers the whole run,
/// not the paragraph.
pub fn rewrite_protected(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let protected = protect(text);
    let has_cjk = protected.plain_contains_cjk();
    protected
        .map_plain(|piece, last| {
            rewrite_with(
                piece,
                RuleContext {
                    has_cjk,
                    at_text_end: last,
                },
            )
        })
        .restore()
}

fn to_fullwidth(text: &str) -> String {
    text.chars()
        .map(|c| {
            FULLWIDTH_REPLACEMENTS
                .iter()
                .find(|(half, _)| *half == c)
                .map(|(_, full)| *full)
                .unwrap_or(c)
        })
        .collect()
}
