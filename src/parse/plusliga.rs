// src/parse/plusliga.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

use super::{selector, stripped_text, trim_rows, Parsed};

static STANDINGS_TABLE: Lazy<Selector> = Lazy::new(|| selector("table.rs-standings-table"));
static TEAM_ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a.table-teamname"));
static STATS_TABLE: Lazy<Selector> =
    Lazy::new(|| selector("table.rs-standings-table.stats-table"));
static TEAM_HEADING: Lazy<Selector> =
    Lazy::new(|| selector("div.col-xs-12.col-sm-8.col-lg-9 h1.hidden-xs"));
static BODY_ROW: Lazy<Selector> = Lazy::new(|| selector("tbody tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("th, td"));

/// Trailing "total" and "match average" rows.
const SUMMARY_ROWS: usize = 2;

/// One team's match-by-match statistics for one season.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPage {
    pub team: String,
    /// One row per match; the first cell names the match (and so the opponent).
    pub rows: Vec<Vec<String>>,
}

/// Team identifiers linked from a season standings page.
pub fn parse_team_ids(html: &str) -> Parsed<BTreeSet<String>> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&STANDINGS_TABLE).next() else {
        return Parsed::NoData("standings table absent");
    };

    let ids: BTreeSet<String> = table
        .select(&TEAM_ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(team_id_from_href)
        .collect();

    if ids.is_empty() {
        Parsed::NoData("no team links in standings")
    } else {
        Parsed::Data(ids)
    }
}

/// Links look like `/teams/id/30288/tournament_1/2023.html`; the id is the
/// fourth `/`-separated segment of the path.
fn team_id_from_href(href: &str) -> Option<String> {
    let path = match Url::parse(href) {
        Ok(u) => u.path().to_string(),
        Err(_) => href.to_string(),
    };
    path.split('/')
        .nth(3)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

pub fn parse_team_page(html: &str) -> Parsed<TeamPage> {
    let doc = Html::parse_document(html);
    let Some(table) = doc.select(&STATS_TABLE).next() else {
        return Parsed::NoData("stats table absent");
    };

    let rows: Vec<Vec<String>> = table
        .select(&BODY_ROW)
        .map(|row| row.select(&CELL).map(|c| stripped_text(&c)).collect())
        .collect();
    let rows = trim_rows(rows, 0, SUMMARY_ROWS);
    if rows.is_empty() {
        return Parsed::NoData("no match rows");
    }

    let Some(heading) = doc.select(&TEAM_HEADING).next() else {
        return Parsed::NoData("team heading absent");
    };
    let team = heading.text().collect::<String>().trim().to_string();
    if team.is_empty() {
        return Parsed::NoData("team heading empty");
    }

    Parsed::Data(TeamPage { team, rows })
}
