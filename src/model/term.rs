// File: ./src/model/term.rs
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Academic season. Declaration order is the recency rank within one year.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub fn rank(self) -> u8 {
        match self {
            Season::Spring => 0,
            Season::Summer => 1,
            Season::Fall => 2,
            Season::Winter => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Spring" => Ok(Season::Spring),
            "Summer" => Ok(Season::Summer),
            "Fall" => Ok(Season::Fall),
            "Winter" => Ok(Season::Winter),
            other => Err(format!("unknown season '{}'", other)),
        }
    }
}

/// A (season, year) pair. Later terms compare greater.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub season: Season,
    pub year: i32,
}

impl Term {
    pub fn new(season: Season, year: i32) -> Self {
        Self { season, year }
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then_with(|| self.season.rank().cmp(&other.season.rank()))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Parses labels such as `Fall 2022`, splitting on the first space.
impl FromStr for Term {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (season, year) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| format!("expected '<season> <year>', got '{}'", s.trim()))?;
        let season = season.parse::<Season>()?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|e| format!("bad year '{}': {}", year.trim(), e))?;
        Ok(Term { season, year })
    }
}
