//! Sport-based admission of records.
//!
//! Matching is case-insensitive and substring-based: a record tagged
//! `field_cricket` is admitted by a `cricket` filter.

use std::collections::BTreeSet;

use crate::tags::{TagSet, normalise_tag};

/// Which records a run keeps.
///
/// # Examples
/// ```
/// use pitchside_core::{FilterMode, parse_tags};
///
/// let mode = FilterMode::any_of(["cricket", "bowls"]);
/// assert!(mode.admits(&parse_tags("Cricket;rugby_union")));
/// assert!(!mode.admits(&parse_tags("rugby_union")));
/// assert!(FilterMode::All.admits(&parse_tags("")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Admit every record, tagged or not.
    #[default]
    All,
    /// Admit records with a tag matching any candidate.
    AnyOf(BTreeSet<String>),
    /// Admit records with a tag matching this one.
    Exactly(String),
}

impl FilterMode {
    /// Build an [`FilterMode::AnyOf`] filter from normalised candidates.
    ///
    /// Blank candidates are dropped; an empty candidate set admits nothing.
    pub fn any_of<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::AnyOf(candidates.into_iter().filter_map(normalise_tag).collect())
    }

    /// Build an [`FilterMode::Exactly`] filter for one sport.
    pub fn exactly(tag: impl AsRef<str>) -> Self {
        Self::Exactly(normalise_tag(tag).unwrap_or_default())
    }

    /// Choose a mode from a list of sports: none admits all, one is
    /// [`FilterMode::Exactly`], several are [`FilterMode::AnyOf`].
    pub fn from_sports<I, S>(sports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut candidates: BTreeSet<String> =
            sports.into_iter().filter_map(normalise_tag).collect();
        match candidates.len() {
            0 => Self::All,
            1 => candidates.pop_first().map_or(Self::All, Self::Exactly),
            _ => Self::AnyOf(candidates),
        }
    }

    /// Decide whether a record with `tags` belongs in the working set.
    #[must_use]
    pub fn admits(&self, tags: &TagSet) -> bool {
        match self {
            Self::All => true,
            Self::AnyOf(candidates) => candidates
                .iter()
                .any(|candidate| has_matching_tag(tags, candidate)),
            Self::Exactly(candidate) => has_matching_tag(tags, candidate),
        }
    }
}

/// Decide whether a record with `tags` is admitted under `mode`.
#[must_use]
pub fn admit(tags: &TagSet, mode: &FilterMode) -> bool {
    mode.admits(tags)
}

fn has_matching_tag(tags: &TagSet, candidate: &str) -> bool {
    let Some(needle) = normalise_tag(candidate) else {
        return false;
    };
    tags.iter().any(|tag| tag.contains(needle.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parse_tags;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("cricket")]
    #[case("anything;else")]
    fn all_admits_unconditionally(#[case] raw: &str) {
        assert!(admit(&parse_tags(raw), &FilterMode::All));
    }

    #[rstest]
    #[case("cricket", true)]
    #[case("bowls;CRICKET", true)]
    #[case("rugby_union", false)]
    #[case("", false)]
    fn any_of_requires_intersection(#[case] raw: &str, #[case] expected: bool) {
        let mode = FilterMode::any_of(["Cricket"]);
        assert_eq!(admit(&parse_tags(raw), &mode), expected);
    }

    /// Substring matching is intentional: `field_cricket` counts as cricket.
    #[rstest]
    fn substring_match_is_preserved() {
        let mode = FilterMode::any_of(["cricket"]);
        assert!(admit(&parse_tags("field_cricket"), &mode));
        assert!(admit(
            &parse_tags("field_cricket"),
            &FilterMode::exactly("cricket")
        ));
    }

    #[rstest]
    fn exactly_matches_single_sport() {
        let mode = FilterMode::exactly(" Lucha_Canaria ");
        assert!(mode.admits(&parse_tags("netball;lucha_canaria")));
        assert!(!mode.admits(&parse_tags("netball")));
    }

    #[rstest]
    fn blank_candidates_admit_nothing() {
        assert!(!FilterMode::any_of(["", "  "]).admits(&parse_tags("cricket")));
        assert!(!FilterMode::exactly(" ").admits(&parse_tags("cricket")));
    }

    #[rstest]
    fn hand_built_modes_match_case_insensitively() {
        let mode = FilterMode::Exactly("BOWLS".to_owned());
        assert!(mode.admits(&parse_tags("bowls")));
    }

    #[rstest]
    #[case(Vec::new(), FilterMode::All)]
    #[case(vec![" "], FilterMode::All)]
    #[case(vec!["Cricket"], FilterMode::Exactly("cricket".to_owned()))]
    #[case(vec!["cricket", "cricket"], FilterMode::Exactly("cricket".to_owned()))]
    #[case(vec!["cricket", "bowls"], FilterMode::any_of(["bowls", "cricket"]))]
    fn from_sports_picks_mode(#[case] sports: Vec<&str>, #[case] expected: FilterMode) {
        assert_eq!(FilterMode::from_sports(sports), expected);
    }
}
