// src/league.rs
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::process::Rejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// 1 for male, 0 for female.
    pub fn is_male(&self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 0,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else if s.eq_ignore_ascii_case("female") {
            Ok(Gender::Female)
        } else {
            Err(Rejection::UnknownGender(s.to_string()))
        }
    }
}

/// The two Polish professional leagues, each hosted on its own domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolishLeague {
    PlusLiga,
    TauronLiga,
}

impl PolishLeague {
    pub const ALL: [PolishLeague; 2] = [PolishLeague::PlusLiga, PolishLeague::TauronLiga];

    /// First season with published team statistics.
    pub const FIRST_YEAR: u16 = 2008;

    pub fn slug(&self) -> &'static str {
        match self {
            PolishLeague::PlusLiga => "plusliga",
            PolishLeague::TauronLiga => "tauronliga",
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            PolishLeague::PlusLiga => Gender::Male,
            PolishLeague::TauronLiga => Gender::Female,
        }
    }
}

/// OUA volleyball, one schedule per gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OuaLeague {
    Women,
    Men,
}

impl OuaLeague {
    pub const ALL: [OuaLeague; 2] = [OuaLeague::Women, OuaLeague::Men];

    pub const FIRST_YEAR: u16 = 2009;

    pub fn slug(&self) -> &'static str {
        match self {
            OuaLeague::Women => "wvball",
            OuaLeague::Men => "mvball",
        }
    }

    pub fn gender(&self) -> Gender {
        match self {
            OuaLeague::Women => Gender::Female,
            OuaLeague::Men => Gender::Male,
        }
    }
}

/// Academic season label used in OUA paths, e.g. 2023 -> "2023-24".
pub fn season_string(year: u16) -> String {
    format!("{}-{:02}", year, (year % 100 + 1) % 100)
}

/// Context attached to every scraped row before it enters a flat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextTag {
    pub season: u16,
    pub gender: Gender,
    pub team: String,
    pub opponent: String,
}

impl ContextTag {
    /// Prefixes `stats` with the context fields, in flat-table column order.
    pub fn prefix(&self, stats: Vec<String>) -> Vec<String> {
        let mut fields = Vec::with_capacity(stats.len() + 4);
        fields.push(self.season.to_string());
        fields.push(self.gender.to_string());
        fields.push(self.team.clone());
        fields.push(self.opponent.clone());
        fields.extend(stats);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parses_case_insensitively_and_rejects_unknown() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" Female ".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(
            "mixed".parse::<Gender>().unwrap_err(),
            Rejection::UnknownGender("mixed".into())
        );
        assert_eq!(Gender::Male.is_male(), 1);
        assert_eq!(Gender::Female.is_male(), 0);
    }

    #[test]
    fn season_strings_roll_the_short_year() {
        assert_eq!(season_string(2009), "2009-10");
        assert_eq!(season_string(2023), "2023-24");
        assert_eq!(season_string(2099), "2099-00");
    }

    #[test]
    fn context_prefix_keeps_column_order() {
        let ctx = ContextTag {
            season: 2021,
            gender: Gender::Female,
            team: "Brock".into(),
            opponent: "York".into(),
        };
        let fields = ctx.prefix(vec!["7".into()]);
        assert_eq!(fields, vec!["2021", "female", "Brock", "York", "7"]);
    }
}
