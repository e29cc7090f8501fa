//! Whitespace collapsing and boundary spaces.

use std::borrow::Cow;

/// Collapse every run of whitespace to a single ASCII space.
///
/// Returns the input unchanged (borrowed) when there is nothing to do.
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    let needs_work = {
        let mut prev_space = false;
        text.chars().any(|c| {
            let hit = c.is_whitespace() && (c != ' ' || prev_space);
            prev_space = c.is_whitespace();
            hit
        })
    };
    if !needs_work {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    Cow::Owned(out)
}

/// Spaces trimmed off fragment boundaries that may still be owed to the
/// output.
///
/// Shared across the whole conversion: adjacent inline elements see each
/// other's boundary spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundarySpace {
    /// The current fragment started with whitespace.
    pub initial: bool,
    /// A previous fragment ended with whitespace; one space is due before
    /// the next content unless a separator comes first.
    pub trailing: bool,
}

/// A collapsed fragment with its boundary spaces removed.
#[derive(Debug, PartialEq, Eq)]
pub struct Trimmed<'a> {
    pub leading: bool,
    pub body: &'a str,
    pub trailing: bool,
}

/// Split one space off each end of an already collapsed fragment.
pub fn trim_boundaries(collapsed: &str) -> Trimmed<'_> {
    let (leading, rest) = match collapsed.strip_prefix(' ') {
        Some(rest) => (true, rest),
        None => (false, collapsed),
    };
    let (body, trailing) = match rest.strip_suffix(' ') {
        Some(body) => (body, true),
        None => (rest, false),
    };
    Trimmed {
        leading,
        body,
        trailing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapse_runs() {
        assert_eq!(collapse_whitespace("a    b"), "a b");
        assert_eq!(collapse_whitespace("a\n\n\nb"), "a b");
        assert_eq!(collapse_whitespace("a \t\n  b"), "a b");
        assert_eq!(collapse_whitespace("a\u{a0}b"), "a b");
        assert_eq!(collapse_whitespace("  x  "), " x ");
    }

    #[test]
    fn test_collapse_borrows_when_clean() {
        assert!(matches!(collapse_whitespace("a b c"), Cow::Borrowed(_)));
        assert!(matches!(collapse_whitespace(" a "), Cow::Borrowed(_)));
        assert!(matches!(collapse_whitespace("a  b"), Cow::Owned(_)));
        assert!(matches!(collapse_whitespace("a\tb"), Cow::Owned(_)));
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let once = collapse_whitespace(" a \t b\n\nc ").into_owned();
        assert_eq!(collapse_whitespace(&once), once.as_str());
    }

    #[test]
    fn test_trim_boundaries() {
        assert_eq!(
            trim_boundaries(" a b "),
            Trimmed {
                leading: true,
                body: "a b",
                trailing: true
            }
        );
        assert_eq!(
            trim_boundaries("a"),
            Trimmed {
                leading: false,
                body: "a",
                trailing: false
            }
        );
        assert_eq!(
            trim_boundaries(" "),
            Trimmed {
                leading: true,
                body: "",
                trailing: false
            }
        );
    }

    proptest! {
        #[test]
        fn prop_collapse_is_idempotent(s in "[a-c \t\n\u{a0}]{0,40}") {
            let once = collapse_whitespace(&s).into_owned();
            prop_assert_eq!(collapse_whitespace(&once), once.as_str());
        }

        #[test]
        fn prop_collapse_keeps_words(s in "[a-c \t\n]{0,40}") {
            let collapsed = collapse_whitespace(&s);
            prop_assert!(!collapsed.contains("  "));
            prop_assert_eq!(
                collapsed.split_whitespace().collect::<Vec<_>>(),
                s.split_whitespace().collect::<Vec<_>>()
            );
        }
    }
}
