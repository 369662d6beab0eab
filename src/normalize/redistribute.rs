//! Writing a rewritten paragraph string back onto its runs.
//!
//! Runs are never created, dropped or reordered, and their styles are never
//! touched: only run text is reassigned.

use crate::model::TextRun;

/// What to do when the new text has a different length than the runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunFallback {
    /// Keep the unchanged prefix and suffix in their original runs and put
    /// the edited middle into the run where the edit starts.
    #[default]
    Anchored,
    /// Put the whole text into the first run and clear the others.
    ///
    /// Loses every run boundary; kept for callers that relied on it.
    FirstRun,
}

/// Which path a redistribution took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redistribution {
    /// Lengths matched; each run got a same-length slice.
    SameLength,
    /// Lengths differed; the given fallback was applied.
    Fallback(RunFallback),
    /// There were no runs to write into.
    NoRuns,
}

/// Write `new_text` back into `runs` using the default fallback.
pub fn redistribute(runs: &mut [TextRun], new_text: &str) {
    redistribute_with(runs, new_text, RunFallback::default());
}

/// Write `new_text` back into `runs`.
///
/// Lengths are counted in characters. When `new_text` is as long as all runs
/// together, run `i` receives the next `len(run i)` characters, which keeps
/// every formatting boundary exactly where it was.
pub fn redistribute_with(
    runs: &mut [TextRun],
    new_text: &str,
    fallback: RunFallback,
) -> Redistribution {
    if runs.is_empty() {
        return Redistribution::NoRuns;
    }

    let lengths: Vec<usize> = runs.iter().map(TextRun::char_len).collect();
    let total: usize = lengths.iter().sum();
    let new_len = new_text.chars().count();

    if new_len == total {
        assign_by_lengths(runs, new_text, &lengths);
        return Redistribution::SameLength;
    }

    match fallback {
        RunFallback::Anchored => {
            let old_text: String = runs.iter().map(|r| r.text.as_str()).collect();
            let new_lengths = anchored_lengths(&old_text, new_text, &lengths);
            assign_by_lengths(runs, new_text, &new_lengths);
        }
        RunFallback::FirstRun => {
            runs[0].text = new_text.to_string();
            for run in runs.iter_mut().skip(1) {
                run.text.clear();
            }
        }
    }

    log::debug!(
        "Run lengths changed ({} -> {} chars), redistributed with {:?}",
        total,
        new_len,
        fallback
    );
    Redistribution::Fallback(fallback)
}

fn assign_by_lengths(runs: &mut [TextRun], text: &str, lengths: &[usize]) {
    let mut chars = text.chars();
    for (run, &len) in runs.iter_mut().zip(lengths) {
        run.text = chars.by_ref().take(len).collect();
    }
}

/// Compute per-run character lengths for `new_text`.
///
/// Run boundaries inside the common prefix stay put, boundaries inside the
/// common suffix shift by the length difference, and boundaries inside the
/// edited region collapse onto its end.
fn anchored_lengths(old_text: &str, new_text: &str, lengths: &[usize]) -> Vec<usize> {
    let old: Vec<char> = old_text.chars().collect();
    let new: Vec<char> = new_text.chars().collect();

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    let old_edit_end = old.len() - suffix;
    let new_edit_end = new.len() - suffix;

    let mut boundaries = Vec::with_capacity(lengths.len());
    let mut end = 0;
    for &len in lengths {
        end += len;
        let mapped = if end <= prefix {
            end
        } else if end >= old_edit_end {
            end - old_edit_end + new_edit_end
        } else {
            new_edit_end
        };
        boundaries.push(mapped);
    }
    if let Some(last) = boundaries.last_mut() {
        *last = new.len();
    }

    let mut start = 0;
    boundaries
        .into_iter()
        .map(|b| {
            let len = b - start;
            start = b;
            len
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextStyle;

    fn runs(texts: &[&str]) -> Vec<TextRun> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                TextRun::styled(
                    *t,
                    TextStyle {
                        font_size: Some(10.0 + i as f32),
                        ..Default::default()
                    },
                )
            })
            .collect()
    }

    fn texts(runs: &[TextRun]) -> Vec<&str> {
        runs.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn test_same_length_slices_in_order() {
        let mut rs = runs(&["他说\"", "好", "\"。"]);
        let styles: Vec<_> = rs.iter().map(|r| r.style.clone()).collect();

        let path = redistribute_with(&mut rs, "他说\u{201C}好\u{201D}。", RunFallback::Anchored);

        assert_eq!(path, Redistribution::SameLength);
        assert_eq!(texts(&rs), vec!["他说\u{201C}", "好", "\u{201D}。"]);
        assert_eq!(rs.iter().map(|r| r.style.clone()).collect::<Vec<_>>(), styles);
    }

    #[test]
    fn test_same_length_with_empty_runs() {
        let mut rs = runs(&["", "ab", "", "c"]);
        redistribute(&mut rs, "xyz");
        assert_eq!(texts(&rs), vec!["", "xy", "", "z"]);
    }

    #[test]
    fn test_first_run_fallback() {
        let mut rs = runs(&["他说", "......", "好"]);
        let path = redistribute_with(&mut rs, "他说……好", RunFallback::FirstRun);

        assert_eq!(path, Redistribution::Fallback(RunFallback::FirstRun));
        assert_eq!(texts(&rs), vec!["他说……好", "", ""]);
        assert_eq!(rs.len(), 3);
    }

    #[test]
    fn test_anchored_fallback_keeps_boundaries() {
        let mut rs = runs(&["他说", "......", "好"]);
        let path = redistribute_with(&mut rs, "他说……好", RunFallback::Anchored);

        assert_eq!(path, Redistribution::Fallback(RunFallback::Anchored));
        assert_eq!(texts(&rs), vec!["他说", "……", "好"]);
    }

    #[test]
    fn test_anchored_edit_spanning_boundary() {
        // The collapsed dots straddle runs 0 and 1; the result lands in run 0.
        let mut rs = runs(&["等等..", "..结束", "。"]);
        redistribute(&mut rs, "等等……结束。");
        assert_eq!(texts(&rs), vec!["等等……", "结束", "。"]);
    }

    #[test]
    fn test_anchored_insertion_at_end() {
        let mut rs = runs(&["甲", "乙"]);
        redistribute(&mut rs, "甲乙丙");
        assert_eq!(texts(&rs), vec!["甲", "乙丙"]);
    }

    #[test]
    fn test_anchored_insertion_at_start() {
        let mut rs = runs(&["甲", "乙"]);
        redistribute(&mut rs, "零甲乙");
        assert_eq!(texts(&rs), vec!["零甲", "乙"]);
    }

    #[test]
    fn test_anchored_full_replacement() {
        let mut rs = runs(&["ab", "cd"]);
        redistribute(&mut rs, "xyz");
        assert_eq!(texts(&rs), vec!["xyz", ""]);
    }

    #[test]
    fn test_no_runs() {
        let mut rs: Vec<TextRun> = Vec::new();
        assert_eq!(
            redistribute_with(&mut rs, "文本", RunFallback::Anchored),
            Redistribution::NoRuns
        );
    }

    #[test]
    fn test_concatenation_always_matches() {
        let cases = [
            (vec!["a", "bc", "d"], "abXcd"),
            (vec!["a", "bc", "d"], "ad"),
            (vec!["", "abc"], ""),
            (vec!["中文", "...", "结尾."], "中文……结尾。"),
        ];
        for (parts, new_text) in cases {
            for fallback in [RunFallback::Anchored, RunFallback::FirstRun] {
                let mut rs = runs(&parts);
                redistribute_with(&mut rs, new_text, fallback);
                assert_eq!(texts(&rs).concat(), new_text);
                assert_eq!(rs.len(), parts.len());
            }
        }
    }
}
