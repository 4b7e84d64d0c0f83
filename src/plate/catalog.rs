//! The fixed plate catalog, heaviest first

use super::weight::Weight;
use std::fmt;
use std::str::FromStr;

/// A standard plate weight class
///
/// Variant order is the allocator's scan order and must stay strictly
/// descending by weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    Hundos,
    FortyFives,
    ThirtyFives,
    TwentyFives,
    Tens,
    Fives,
    TwoDotFives,
    OneDotTwoFives,
}

impl Denomination {
    pub const COUNT: usize = 8;

    /// Every denomination, heaviest first
    pub const ALL: [Denomination; Self::COUNT] = [
        Self::Hundos,
        Self::FortyFives,
        Self::ThirtyFives,
        Self::TwentyFives,
        Self::Tens,
        Self::Fives,
        Self::TwoDotFives,
        Self::OneDotTwoFives,
    ];

    /// Position in the catalog
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weight of a single plate
    pub fn unit_weight(self) -> Weight {
        match self {
            Self::Hundos => Weight::from_lbs(100),
            Self::FortyFives => Weight::from_lbs(45),
            Self::ThirtyFives => Weight::from_lbs(35),
            Self::TwentyFives => Weight::from_lbs(25),
            Self::Tens => Weight::from_lbs(10),
            Self::Fives => Weight::from_lbs(5),
            Self::TwoDotFives => Weight::from_quarters(10),
            Self::OneDotTwoFives => Weight::from_quarters(5),
        }
    }

    /// Weight added to the bar by one plate on each side
    pub fn pair_weight(self) -> Weight {
        self.unit_weight().times(2)
    }

    /// Field name in JSON payloads and config files
    pub fn field(self) -> &'static str {
        match self {
            Self::Hundos => "hundreds",
            Self::FortyFives => "fortyFives",
            Self::ThirtyFives => "thirtyFives",
            Self::TwentyFives => "twentyFives",
            Self::Tens => "tens",
            Self::Fives => "fives",
            Self::TwoDotFives => "twoDotFives",
            Self::OneDotTwoFives => "oneDotTwoFives",
        }
    }

    /// Short label used in cache keys
    pub fn label(self) -> &'static str {
        match self {
            Self::Hundos => "h",
            Self::FortyFives => "45",
            Self::ThirtyFives => "35",
            Self::TwentyFives => "25",
            Self::Tens => "10",
            Self::Fives => "5",
            Self::TwoDotFives => "2.5",
            Self::OneDotTwoFives => "1.25",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Hundos => "Hundos",
            Self::FortyFives => "FortyFives",
            Self::ThirtyFives => "ThirtyFives",
            Self::TwentyFives => "TwentyFives",
            Self::Tens => "Tens",
            Self::Fives => "Fives",
            Self::TwoDotFives => "TwoDotFives",
            Self::OneDotTwoFives => "OneDotTwoFives",
        };
        write!(f, "{}", name)
    }
}

/// Accepts the display name, the JSON field name, or the plate weight
/// (`FortyFives`, `fortyFives`, `45`), ignoring case and dashes.
impl FromStr for Denomination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        Self::ALL
            .into_iter()
            .find(|d| {
                d.to_string().to_lowercase() == wanted
                    || d.field().to_lowercase() == wanted
                    || d.unit_weight().to_string() == wanted
            })
            .ok_or_else(|| format!("Unknown plate: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_strictly_descending() {
        for pair in Denomination::ALL.windows(2) {
            assert!(pair[0].unit_weight() > pair[1].unit_weight());
        }
    }

    #[test]
    fn index_matches_catalog_position() {
        for (i, d) in Denomination::ALL.into_iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }

    #[test]
    fn pair_weights() {
        assert_eq!(Denomination::FortyFives.pair_weight(), Weight::from_lbs(90));
        assert_eq!(
            Denomination::OneDotTwoFives.pair_weight(),
            Weight::from_quarters(10)
        );
    }

    #[test]
    fn parses_names_fields_and_weights() {
        assert_eq!("FortyFives".parse(), Ok(Denomination::FortyFives));
        assert_eq!("forty-fives".parse(), Ok(Denomination::FortyFives));
        assert_eq!("hundreds".parse(), Ok(Denomination::Hundos));
        assert_eq!("100".parse(), Ok(Denomination::Hundos));
        assert_eq!("2.5".parse(), Ok(Denomination::TwoDotFives));
        assert_eq!("1.25".parse(), Ok(Denomination::OneDotTwoFives));
        assert!("55".parse::<Denomination>().is_err());
    }
}
