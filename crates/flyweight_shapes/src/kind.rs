use derive_more::Display;
use flyweight_shared::types::Error;
use std::str::FromStr;

/// The closed set of shapes the registry knows how to build. Used only as a cache key.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum ShapeKind {
    #[display("oval_filled")]
    OvalFilled,
    #[display("oval_unfilled")]
    OvalUnfilled,
    #[display("line")]
    Line,
}

impl ShapeKind {
    pub const COUNT: usize = 3;

    pub const ALL: [ShapeKind; Self::COUNT] = [
        ShapeKind::OvalFilled,
        ShapeKind::OvalUnfilled,
        ShapeKind::Line,
    ];

    /// Position of this kind in [`ShapeKind::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ShapeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");

        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.to_string() == normalized)
            .ok_or_else(|| Error::Parse(format!("unknown shape kind: {s}")))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_case::test_case;

    #[test_case("oval_filled", ShapeKind::OvalFilled)]
    #[test_case("OVAL-UNFILLED", ShapeKind::OvalUnfilled)]
    #[test_case(" line ", ShapeKind::Line)]
    fn parse(input: &str, expected: ShapeKind) {
        assert_eq!(ShapeKind::from_str(input).unwrap(), expected);
    }

    #[test]
    fn parse_unknown() {
        assert!(matches!(ShapeKind::from_str("square"), Err(Error::Parse(_))));
    }

    #[test]
    fn index_matches_all() {
        for (i, kind) in ShapeKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
