//! Application of automatic fixes to source text.

use crate::types::Replacement;

/// Errors raised while applying fixes.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    /// A replacement points outside the text or inside a UTF-8 sequence.
    #[error("replacement at {offset}+{length} is outside the source ({len} bytes)")]
    InvalidRange {
        /// Start offset of the replacement.
        offset: usize,
        /// Length of the replaced range.
        length: usize,
        /// Length of the source text.
        len: usize,
    },
}

/// Result of applying a batch of fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// Rewritten source text.
    pub content: String,
    /// Number of replacements applied.
    pub applied: usize,
    /// Number of replacements skipped because they overlapped an earlier one.
    pub skipped: usize,
}

/// Applies `replacements` to `content` in a single pass.
///
/// Replacements are applied back to front so earlier offsets stay valid.
/// When two replacements overlap, or two insertions share an offset, the one
/// that comes first in `replacements` wins and the other is skipped; a
/// re-run of analysis picks up whatever was skipped.
///
/// # Errors
///
/// Returns [`FixError::InvalidRange`] if any replacement falls outside
/// `content` or splits a UTF-8 character.
pub fn apply_fixes<'a, I>(content: &str, replacements: I) -> Result<FixOutcome, FixError>
where
    I: IntoIterator<Item = &'a Replacement>,
{
    let mut ordered: Vec<(usize, &Replacement)> = replacements.into_iter().enumerate().collect();

    for (_, r) in &ordered {
        let start = r.location.offset;
        let end = start + r.location.length;
        if end > content.len() || !content.is_char_boundary(start) || !content.is_char_boundary(end)
        {
            return Err(FixError::InvalidRange {
                offset: start,
                length: r.location.length,
                len: content.len(),
            });
        }
    }

    // Input order breaks ties so the first-listed edit is the one kept.
    ordered.sort_by_key(|(i, r)| (r.location.offset, *i));

    let mut accepted: Vec<&Replacement> = Vec::with_capacity(ordered.len());
    let mut skipped = 0;
    let mut cursor: Option<(usize, usize)> = None;
    for (_, r) in ordered {
        let start = r.location.offset;
        let end = start + r.location.length;
        let overlaps = cursor.is_some_and(|(prev_start, prev_end)| {
            start < prev_end || (start == prev_start && r.is_insertion())
        });
        if overlaps {
            skipped += 1;
            continue;
        }
        cursor = Some((start, end));
        accepted.push(r);
    }

    let mut output = content.to_string();
    for r in accepted.iter().rev() {
        let start = r.location.offset;
        output.replace_range(start..start + r.location.length, &r.new_text);
    }

    Ok(FixOutcome {
        content: output,
        applied: accepted.len(),
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Position;
    use crate::types::Location;
    use std::path::PathBuf;

    fn insert(offset: usize, text: &str) -> Replacement {
        Replacement::insert_before(PathBuf::from("a.js"), Position::new(1, offset, offset), text)
    }

    #[test]
    fn applies_insertions_back_to_front() {
        let src = "function a() {}\nfunction b() {}\n";
        let fixes = [insert(0, "/** */\n"), insert(16, "/** */\n")];
        let out = apply_fixes(src, &fixes).unwrap();
        assert_eq!(
            out.content,
            "/** */\nfunction a() {}\n/** */\nfunction b() {}\n"
        );
        assert_eq!(out.applied, 2);
        assert_eq!(out.skipped, 0);
    }

    #[test]
    fn duplicate_insertion_point_is_skipped() {
        let out = apply_fixes("x", &[insert(0, "a"), insert(0, "b")]).unwrap();
        assert_eq!(out.content, "ax");
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn overlapping_replacement_is_skipped() {
        let wide = Replacement::new(Location::new(PathBuf::from("a.js"), 1, 1).with_span(0, 3), "X");
        let out = apply_fixes("abcdef", &[wide, insert(1, "!")]).unwrap();
        assert_eq!(out.content, "Xdef");
        assert_eq!(out.skipped, 1);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let err = apply_fixes("ab", &[insert(5, "x")]).unwrap_err();
        assert!(matches!(err, FixError::InvalidRange { offset: 5, .. }));
    }
}
