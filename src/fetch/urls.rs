// src/fetch/urls.rs
use anyhow::{Context, Result};
use url::Url;

use crate::league::{season_string, OuaLeague, PolishLeague};

/// Base that OUA box-score hrefs are relative to.
pub const OUA_BOX_SCORE_BASE: &str = "https://oua.ca/";

fn parse(raw: String) -> Result<Url> {
    Url::parse(&raw).with_context(|| format!("building URL {}", raw))
}

/// Season standings page listing every team of that season.
pub fn polish_standings(league: PolishLeague, year: u16) -> Result<Url> {
    parse(format!(
        "https://www.{}.pl/table/tour/{}.html",
        league.slug(),
        year
    ))
}

/// Per-team, per-season match statistics page.
pub fn polish_team_stats(league: PolishLeague, team_id: &str, year: u16) -> Result<Url> {
    parse(format!(
        "https://www.{}.pl/statsTeams/tournament_1/{}/id/{}/type/teams.html",
        league.slug(),
        year,
        team_id
    ))
}

pub fn oua_schedule(league: OuaLeague, year: u16) -> Result<Url> {
    parse(format!(
        "https://www.oua.ca/sports/{}/{}/schedule",
        league.slug(),
        season_string(year)
    ))
}

/// Resolves a box-score href (usually site-relative) against the OUA host.
pub fn oua_box_score(href: &str) -> Result<Url> {
    let base = Url::parse(OUA_BOX_SCORE_BASE)?;
    base.join(href)
        .with_context(|| format!("resolving box score link {}", href))
}
