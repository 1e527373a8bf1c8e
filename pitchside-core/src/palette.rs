//! Tag-to-colour configuration.
//!
//! A [`Palette`] is an ordered list of `(tag, colour)` entries plus a fallback
//! colour. Entry order doubles as the priority order used to pick a record's
//! primary tag, so callers configure both in one place.

use std::str::FromStr;

use thiserror::Error;

use crate::tags::{PriorityOrder, normalise_tag};

/// Colour used when a record has no tag in the palette.
pub const DEFAULT_COLOUR: &str = "gray";

/// Ordered tag colours with a fallback.
///
/// # Examples
/// ```
/// use pitchside_core::Palette;
///
/// let palette = Palette::new("gray")
///     .with_colour("cricket", "green")
///     .with_colour("bowls", "purple");
/// assert_eq!(palette.colour_of(Some("bowls")), "purple");
/// assert_eq!(palette.colour_of(None), "gray");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, String)>,
    default_colour: String,
}

/// Errors returned when parsing a palette from `tag=colour` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// An entry did not contain `=`.
    #[error("palette entry '{entry}' must look like tag=colour")]
    MissingSeparator {
        /// The offending entry.
        entry: String,
    },
    /// An entry had an empty tag.
    #[error("palette entry '{entry}' has an empty tag")]
    EmptyTag {
        /// The offending entry.
        entry: String,
    },
    /// An entry had an empty colour.
    #[error("palette entry '{entry}' has an empty colour")]
    EmptyColour {
        /// The offending entry.
        entry: String,
    },
}

impl Palette {
    /// Create an empty palette with the given fallback colour.
    pub fn new(default_colour: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            default_colour: default_colour.into(),
        }
    }

    /// Add or replace a tag colour.
    ///
    /// Replacing keeps the tag's original priority. Blank tags are ignored.
    #[must_use]
    pub fn with_colour(mut self, tag: impl AsRef<str>, colour: impl Into<String>) -> Self {
        let Some(normalised) = normalise_tag(tag) else {
            return self;
        };
        let colour_name = colour.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == normalised)
        {
            Some(entry) => entry.1 = colour_name,
            None => self.entries.push((normalised, colour_name)),
        }
        self
    }

    /// Replace the fallback colour.
    #[must_use]
    pub fn with_default_colour(mut self, colour: impl Into<String>) -> Self {
        self.default_colour = colour.into();
        self
    }

    /// Priority order implied by the entry order.
    #[must_use]
    pub fn priority(&self) -> PriorityOrder {
        self.entries.iter().map(|(tag, _)| tag).collect()
    }

    /// Colour for a primary tag, falling back to the default colour.
    #[must_use]
    pub fn colour_of(&self, primary: Option<&str>) -> &str {
        primary
            .and_then(|tag| {
                self.entries
                    .iter()
                    .find(|(candidate, _)| candidate == tag)
                    .map(|(_, colour)| colour.as_str())
            })
            .unwrap_or(self.default_colour.as_str())
    }

    /// Fallback colour for records without a palette tag.
    #[must_use]
    pub fn default_colour(&self) -> &str {
        &self.default_colour
    }

    /// Iterate over `(tag, colour)` entries in priority order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(tag, colour)| (tag.as_str(), colour.as_str()))
    }

    /// Return `true` when no tag has a colour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    /// The multi-sport palette: field hockey, cricket, rugby union and bowls.
    fn default() -> Self {
        Self::new(DEFAULT_COLOUR)
            .with_colour("field_hockey", "red")
            .with_colour("cricket", "green")
            .with_colour("rugby_union", "blue")
            .with_colour("bowls", "purple")
    }
}

impl FromStr for Palette {
    type Err = PaletteError;

    /// Parse `tag=colour` pairs separated by commas.
    ///
    /// The fallback colour is [`DEFAULT_COLOUR`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut palette = Self::new(DEFAULT_COLOUR);
        for entry in s.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (tag, colour) =
                entry
                    .split_once('=')
                    .ok_or_else(|| PaletteError::MissingSeparator {
                        entry: entry.to_owned(),
                    })?;
            if tag.trim().is_empty() {
                return Err(PaletteError::EmptyTag {
                    entry: entry.to_owned(),
                });
            }
            let colour_name = colour.trim();
            if colour_name.is_empty() {
                return Err(PaletteError::EmptyColour {
                    entry: entry.to_owned(),
                });
            }
            palette = palette.with_colour(tag, colour_name);
        }
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_palette_priority_matches_entry_order() {
        let priority = Palette::default().priority();
        assert_eq!(
            priority.iter().collect::<Vec<_>>(),
            ["field_hockey", "cricket", "rugby_union", "bowls"]
        );
    }

    #[rstest]
    #[case(Some("cricket"), "green")]
    #[case(Some("tennis"), DEFAULT_COLOUR)]
    #[case(None, DEFAULT_COLOUR)]
    fn colour_falls_back_to_default(#[case] primary: Option<&str>, #[case] expected: &str) {
        assert_eq!(Palette::default().colour_of(primary), expected);
    }

    #[rstest]
    fn replacing_a_colour_keeps_priority() {
        let palette = Palette::default().with_colour("Field_Hockey", "orange");
        let entries: Vec<_> = palette.entries().collect();
        assert_eq!(entries.first(), Some(&("field_hockey", "orange")));
        assert_eq!(entries.len(), 4);
    }

    #[rstest]
    fn parses_pairs() {
        let palette: Palette = "lucha_canaria=blue, Bowls = purple".parse().expect("valid");
        assert_eq!(palette.colour_of(Some("lucha_canaria")), "blue");
        assert_eq!(palette.colour_of(Some("bowls")), "purple");
        assert_eq!(palette.default_colour(), DEFAULT_COLOUR);
    }

    #[rstest]
    #[case("cricket", PaletteError::MissingSeparator { entry: "cricket".into() })]
    #[case("=green", PaletteError::EmptyTag { entry: "=green".into() })]
    #[case("cricket=", PaletteError::EmptyColour { entry: "cricket=".into() })]
    fn rejects_malformed_pairs(#[case] raw: &str, #[case] expected: PaletteError) {
        assert_eq!(raw.parse::<Palette>(), Err(expected));
    }

    #[rstest]
    fn empty_string_yields_empty_palette() {
        let palette: Palette = "".parse().expect("empty palette");
        assert!(palette.is_empty());
    }
}
