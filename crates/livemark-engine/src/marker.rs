//! The closed set of formatting markers the engine can hide.

use std::fmt;

use livemark_syntax::SyntaxKind;
use serde::{Deserialize, Serialize};

/// A formatting-marker kind.
///
/// Serialized in kebab-case (`heading-mark`, `strong-emphasis-mark`, ...),
/// the names used in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// The `#` run of an ATX heading, opening or closing.
    HeadingMark,
    /// A single `*` or `_` delimiter.
    EmphasisMark,
    /// A `**` or `__` delimiter.
    StrongEmphasisMark,
    /// A `>` block quote prefix.
    QuoteMark,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 4] = [
        MarkerKind::HeadingMark,
        MarkerKind::EmphasisMark,
        MarkerKind::StrongEmphasisMark,
        MarkerKind::QuoteMark,
    ];

    /// The marker kind of a syntax node, if it is a marker node.
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::HEADING_MARK => Some(MarkerKind::HeadingMark),
            SyntaxKind::EMPHASIS_MARK => Some(MarkerKind::EmphasisMark),
            SyntaxKind::STRONG_EMPHASIS_MARK => Some(MarkerKind::StrongEmphasisMark),
            SyntaxKind::QUOTE_MARK => Some(MarkerKind::QuoteMark),
            _ => None,
        }
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            MarkerKind::HeadingMark => SyntaxKind::HEADING_MARK,
            MarkerKind::EmphasisMark => SyntaxKind::EMPHASIS_MARK,
            MarkerKind::StrongEmphasisMark => SyntaxKind::STRONG_EMPHASIS_MARK,
            MarkerKind::QuoteMark => SyntaxKind::QUOTE_MARK,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MarkerKind::HeadingMark => "heading-mark",
            MarkerKind::EmphasisMark => "emphasis-mark",
            MarkerKind::StrongEmphasisMark => "strong-emphasis-mark",
            MarkerKind::QuoteMark => "quote-mark",
        }
    }

    /// The single-kind set for this marker kind.
    pub const fn as_set(self) -> MarkerKinds {
        match self {
            MarkerKind::HeadingMark => MarkerKinds::HEADING_MARK,
            MarkerKind::EmphasisMark => MarkerKinds::EMPHASIS_MARK,
            MarkerKind::StrongEmphasisMark => MarkerKinds::STRONG_EMPHASIS_MARK,
            MarkerKind::QuoteMark => MarkerKinds::QUOTE_MARK,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// A set of marker kinds the engine is allowed to mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MarkerKinds: u8 {
        const HEADING_MARK = 1 << 0;
        const EMPHASIS_MARK = 1 << 1;
        const STRONG_EMPHASIS_MARK = 1 << 2;
        const QUOTE_MARK = 1 << 3;
    }
}

impl MarkerKinds {
    /// Whether markers of `kind` may be masked.
    pub const fn allows(self, kind: MarkerKind) -> bool {
        self.contains(kind.as_set())
    }

    /// The member kinds, in [`MarkerKind::ALL`] order.
    pub fn kinds(self) -> impl Iterator<Item = MarkerKind> {
        MarkerKind::ALL.into_iter().filter(move |k| self.allows(*k))
    }
}

impl Default for MarkerKinds {
    fn default() -> Self {
        Self::all()
    }
}

impl From<MarkerKind> for MarkerKinds {
    fn from(kind: MarkerKind) -> Self {
        kind.as_set()
    }
}

impl FromIterator<MarkerKind> for MarkerKinds {
    fn from_iter<I: IntoIterator<Item = MarkerKind>>(iter: I) -> Self {
        let mut set = MarkerKinds::empty();
        for kind in iter {
            set |= kind.as_set();
        }
        set
    }
}

impl<'a> FromIterator<&'a MarkerKind> for MarkerKinds {
    fn from_iter<I: IntoIterator<Item = &'a MarkerKind>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn syntax_kind_round_trip() {
        for kind in MarkerKind::ALL {
            assert_eq!(MarkerKind::from_syntax(kind.syntax_kind()), Some(kind));
            assert!(kind.syntax_kind().is_marker());
        }
        assert_eq!(MarkerKind::from_syntax(SyntaxKind::HEADING), None);
        assert_eq!(MarkerKind::from_syntax(SyntaxKind::STAR), None);
    }

    #[test]
    fn display_matches_serde_name() {
        assert_eq!(MarkerKind::StrongEmphasisMark.to_string(), "strong-emphasis-mark");
        for kind in MarkerKind::ALL {
            let value = serde::de::value::StrDeserializer::<serde::de::value::Error>::new(
                kind.name(),
            );
            assert_eq!(MarkerKind::deserialize(value), Ok(kind));
        }
    }

    #[test]
    fn kind_set_membership() {
        let kinds: MarkerKinds = [MarkerKind::QuoteMark, MarkerKind::HeadingMark]
            .iter()
            .collect();
        assert!(kinds.allows(MarkerKind::QuoteMark));
        assert!(!kinds.allows(MarkerKind::EmphasisMark));
        assert_eq!(
            kinds.kinds().collect::<Vec<_>>(),
            vec![MarkerKind::HeadingMark, MarkerKind::QuoteMark]
        );
        assert!(MarkerKinds::empty().is_empty());
        assert_eq!(MarkerKinds::default(), MarkerKinds::all());
    }

    #[test]
    fn each_kind_has_its_own_flag() {
        let union: MarkerKinds = MarkerKind::ALL.into_iter().collect();
        assert_eq!(union, MarkerKinds::all());
        for kind in MarkerKind::ALL {
            assert_eq!(MarkerKinds::from(kind).bits().count_ones(), 1);
        }
    }
}
