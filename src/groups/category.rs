use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed set of category filters offered by the UI.
///
/// A category is only a hint for the backend; the `category` field of a
/// returned [`crate::groups::Group`] is free text and is never checked
/// against this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Technology,
    Education,
    #[serde(rename = "Health & Fitness")]
    HealthFitness,
    Games,
    Business,
    Entertainment,
    Cooking,
    Travel,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Education,
        Category::HealthFitness,
        Category::Games,
        Category::Business,
        Category::Entertainment,
        Category::Cooking,
        Category::Travel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Education => "Education",
            Category::HealthFitness => "Health & Fitness",
            Category::Games => "Games",
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::Cooking => "Cooking",
            Category::Travel => "Travel",
        }
    }

    /// Short lowercase name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Technology => "tech",
            Category::Education => "education",
            Category::HealthFitness => "health",
            Category::Games => "games",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Cooking => "cooking",
            Category::Travel => "travel",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_lowercase() == needle || c.slug() == needle)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_and_slugs_case_insensitively() {
        assert_eq!("games".parse::<Category>(), Ok(Category::Games));
        assert_eq!(
            " Health & Fitness ".parse::<Category>(),
            Ok(Category::HealthFitness)
        );
        assert_eq!("TECH".parse::<Category>(), Ok(Category::Technology));
        assert_eq!("health".parse::<Category>(), Ok(Category::HealthFitness));
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = "Astrology".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Astrology");
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, c) in Category::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn serializes_as_label() {
        let v = serde_json::to_value(Category::HealthFitness).unwrap();
        assert_eq!(v, "Health & Fitness");
    }
}
