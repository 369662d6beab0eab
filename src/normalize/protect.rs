//! Protected-pattern detection.
//!
//! Some substrings must survive punctuation rewriting byte-for-byte: URLs,
//! email addresses, drive-letter paths, standard codes such as
//! `ISO 9001:2015`, and clock times. [`protect`] splits a text unit into plain
//! and protected segments; the rewriter only ever sees the plain ones.
//!
//! Protected spans are kept as tagged segments next to the text instead of
//! being swapped for sentinel characters, so no placeholder can collide with
//! real document content.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Class of a protected pattern, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// `http`, `https` or `ftp` URL
    Url,
    /// Email address
    Email,
    /// Windows drive-letter path prefix (`C:\`)
    WindowsPath,
    /// Standard code with revision, e.g. `ISO 9001:2015`, `GB-50016:2014`
    StandardCode,
    /// `H:MM` or `H:MM:SS` not adjacent to other digits
    ClockTime,
}

impl PatternKind {
    /// All pattern classes in precedence order.
    pub const ALL: [PatternKind; 5] = [
        PatternKind::Url,
        PatternKind::Email,
        PatternKind::WindowsPath,
        PatternKind::StandardCode,
        PatternKind::ClockTime,
    ];

    /// Short lowercase name of the class.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Url => "url",
            PatternKind::Email => "email",
            PatternKind::WindowsPath => "windows_path",
            PatternKind::StandardCode => "standard_code",
            PatternKind::ClockTime => "clock_time",
        }
    }

    /// Byte ranges of all non-overlapping matches of this class in `text`.
    fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let patterns = patterns();
        let regex = match self {
            PatternKind::Url => &patterns.url,
            PatternKind::Email => &patterns.email,
            PatternKind::WindowsPath => &patterns.windows_path,
            PatternKind::StandardCode => &patterns.standard_code,
            PatternKind::ClockTime => return clock_time_ranges(&patterns.clock_time, text),
        };
        regex.find_iter(text).map(|m| m.range()).collect()
    }
}

struct Patterns {
    url: Regex,
    email: Regex,
    windows_path: Regex,
    standard_code: Regex,
    clock_time: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        url: Regex::new(r"(?:https?|ftp)://\S+").expect("Failed to compile URL regex"),
        email: Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").expect("Failed to compile email regex"),
        windows_path: Regex::new(r"[A-Za-z]:\\").expect("Failed to compile path regex"),
        standard_code: Regex::new(r"[A-Za-z]+[\s-]?\d+:\d{2,}")
            .expect("Failed to compile standard code regex"),
        // The time itself is group 1; the surrounding non-digit (or text edge)
        // stands in for lookaround, which the regex crate does not support.
        clock_time: Regex::new(r"(?:^|\D)(\d{1,2}:\d{2}(?::\d{2})?)(?:\D|$)")
            .expect("Failed to compile clock time regex"),
    })
}

fn clock_time_ranges(regex: &Regex, text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut at = 0;
    while at <= text.len() {
        let Some(time) = regex.captures_at(text, at).and_then(|caps| caps.get(1)) else {
            break;
        };
        ranges.push(time.range());
        // Resume right after the time so its trailing boundary character can
        // serve as the leading boundary of the next one.
        at = time.end();
    }
    ranges
}

/// A substring shielded from rewriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    /// Which pattern class matched
    pub kind: PatternKind,
    /// Byte range in the source text
    pub range: Range<usize>,
    /// The original substring
    pub original: String,
}

/// One piece of a protected text unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Rewritable text; `start` is its byte offset in the source text.
    Plain { start: usize, text: String },
    /// Text that must be restored verbatim.
    Protected(ProtectedSpan),
}

/// A text unit split into plain and protected segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedText {
    segments: Vec<Segment>,
}

impl ProtectedText {
    /// All segments in text order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Protected spans in text order.
    pub fn spans(&self) -> impl Iterator<Item = &ProtectedSpan> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Protected(span) => Some(span),
            Segment::Plain { .. } => None,
        })
    }

    /// Check if any span was protected.
    pub fn has_protected(&self) -> bool {
        self.spans().next().is_some()
    }

    /// Check if any plain segment contains a CJK ideograph.
    ///
    /// Protected spans do not count, even when an email local part happens to
    /// contain Chinese characters.
    pub fn plain_contains_cjk(&self) -> bool {
        self.segments.iter().any(|s| match s {
            Segment::Plain { text, .. } => super::rules::contains_cjk(text),
            Segment::Protected(_) => false,
        })
    }

    /// Rewrite every plain segment with `f`, leaving protected spans intact.
    ///
    /// The second argument tells `f` whether the segment ends the text unit.
    pub fn map_plain<F>(mut self, mut f: F) -> Self
    where
        F: FnMut(&str, bool) -> String,
    {
        let last = self.segments.len().saturating_sub(1);
        for (i, segment) in self.segments.iter_mut().enumerate() {
            if let Segment::Plain { text, .. } = segment {
                let rewritten = f(text.as_str(), i == last);
                *text = rewritten;
            }
        }
        self
    }

    /// Reassemble the text, putting every protected span back.
    pub fn restore(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Plain { text, .. } => text.as_str(),
                Segment::Protected(span) => span.original.as_str(),
            })
            .collect()
    }
}

/// Split `text` into plain and protected segments.
///
/// Classes are detected in [`PatternKind::ALL`] order; each later class only
/// searches the plain text left over by earlier ones, so matches never
/// overlap.
pub fn protect(text: &str) -> ProtectedText {
    let mut segments = vec![Segment::Plain {
        start: 0,
        text: text.to_string(),
    }];

    for kind in PatternKind::ALL {
        segments = segments
            .into_iter()
            .flat_map(|segment| split_segment(segment, kind))
            .collect();
    }

    ProtectedText { segments }
}

/// Reassemble a protected text unit. Equivalent to [`ProtectedText::restore`].
pub fn restore(protected: &ProtectedText) -> String {
    protected.restore()
}

fn split_segment(segment: Segment, kind: PatternKind) -> Vec<Segment> {
    let (start, text) = match segment {
        Segment::Plain { start, text } => (start, text),
        protected => return vec![protected],
    };

    let ranges = kind.find_ranges(&text);
    if ranges.is_empty() {
        return vec![Segment::Plain { start, text }];
    }

    let mut out = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            out.push(Segment::Plain {
                start: start + cursor,
                text: text[cursor..range.start].to_string(),
            });
        }
        out.push(Segment::Protected(ProtectedSpan {
            kind,
            range: start + range.start..start + range.end,
            original: text[range.clone()].to_string(),
        }));
        cursor = range.end;
    }
    if cursor < text.len() {
        out.push(Segment::Plain {
            start: start + cursor,
            text: text[cursor..].to_string(),
        });
    }
    out
}
