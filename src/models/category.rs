use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed classification of what money was spent on.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    Food,
    Transport,
    Shopping,
    Bills,
    #[serde(rename = "Skincare & Necessities")]
    SkincareNecessities,
    Others,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Bills,
        Self::SkincareNecessities,
        Self::Others,
    ];

    pub fn all() -> &'static [Category] {
        &Self::ALL
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::SkincareNecessities => "Skincare & Necessities",
            Self::Others => "Others",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Food => "#FF6B6B",
            Self::Transport => "#4ECDC4",
            Self::Shopping => "#45B7D1",
            Self::Bills => "#FFA07A",
            Self::SkincareNecessities => "#C084FC",
            Self::Others => "#98D8C8",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Food => "\u{1f354}",
            Self::Transport => "\u{1f68c}",
            Self::Shopping => "\u{1f6cd}\u{fe0f}",
            Self::Bills => "\u{1f4c4}",
            Self::SkincareNecessities => "\u{1f9f4}",
            Self::Others => "\u{1f4e6}",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_names() {
        for category in Category::all() {
            assert_eq!(category.name().parse::<Category>(), Ok(*category));
        }
    }

    #[test]
    fn test_parse_ignores_case_and_whitespace() {
        assert_eq!(" food ".parse::<Category>(), Ok(Category::Food));
        assert_eq!(
            "skincare & necessities".parse::<Category>(),
            Ok(Category::SkincareNecessities)
        );
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::SkincareNecessities).unwrap();
        assert_eq!(json, "\"Skincare & Necessities\"");
    }
}
