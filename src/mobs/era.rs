use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Era {
    #[serde(rename = "modern-era")]
    Modern,
    #[serde(rename = "nether-era")]
    Nether,
    #[serde(rename = "classic-era")]
    Classic,
    #[serde(rename = "debut-era")]
    Debut,
}

// Ordered prefix table; the first matching prefix wins.
const VERSION_PREFIXES: &[(&str, Era)] = &[
    ("1.16", Era::Nether),
    ("1.17", Era::Modern),
    ("1.19", Era::Modern),
    ("1.20", Era::Modern),
    ("1.8", Era::Classic),
    ("1.9", Era::Classic),
    ("1.10", Era::Classic),
    ("1.11", Era::Classic),
    ("1.12", Era::Classic),
    ("1.13", Era::Classic),
    ("1.14", Era::Classic),
    ("1.15", Era::Classic),
    ("1.0", Era::Debut),
    ("1.1", Era::Debut),
    ("1.2", Era::Debut),
    ("1.4", Era::Debut),
    ("1.6", Era::Debut),
];

impl Era {
    pub const RING_ORDER: [Era; 4] = [Era::Modern, Era::Nether, Era::Classic, Era::Debut];

    pub fn from_version(version: &str) -> Self {
        VERSION_PREFIXES
            .iter()
            .find(|(prefix, _)| version.starts_with(prefix))
            .map(|(_, era)| *era)
            .unwrap_or(Era::Modern)
    }

    pub fn rank(self) -> usize {
        match self {
            Self::Modern => 0,
            Self::Nether => 1,
            Self::Classic => 2,
            Self::Debut => 3,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Modern => "modern-era",
            Self::Nether => "nether-era",
            Self::Classic => "classic-era",
            Self::Debut => "debut-era",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Modern => "modern era",
            Self::Nether => "nether era",
            Self::Classic => "classic era",
            Self::Debut => "debut era",
        }
    }
}
