//! The enumerated set of regions a user can filter by.

/// A region as named by the country API's `region` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Africa,
    Americas,
    Antarctic,
    Asia,
    Europe,
    Oceania,
}

impl Region {
    /// All regions in picker order.
    pub const ALL: [Self; 6] = [
        Self::Africa,
        Self::Americas,
        Self::Antarctic,
        Self::Asia,
        Self::Europe,
        Self::Oceania,
    ];

    /// The exact string the API uses for this region.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Africa => "Africa",
            Self::Americas => "Americas",
            Self::Antarctic => "Antarctic",
            Self::Asia => "Asia",
            Self::Europe => "Europe",
            Self::Oceania => "Oceania",
        }
    }

    /// Parses an exact (case-sensitive) region name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|region| region.as_str() == name)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
