// src/scrape/oua.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use url::Url;

use super::{fetch_and_parse, Unit};
use crate::{
    config::ScrapeOptions,
    fetch::{urls, Fetcher},
    league::{season_string, ContextTag, OuaLeague},
    parse::oua,
    process::{OuaRaw, RawTable},
    summary::UnitStats,
};

#[derive(Debug)]
pub struct OuaScrape {
    pub table: RawTable<OuaRaw>,
    pub discovery: UnitStats,
    pub pages: UnitStats,
}

/// Box-score links for every (league, season), in schedule order.
#[instrument(level = "info", skip_all)]
pub async fn discover_box_score_links<F: Fetcher>(
    fetcher: Arc<F>,
    opts: &ScrapeOptions,
    stats: &mut UnitStats,
) -> Result<Vec<(OuaLeague, u16, Url)>> {
    let mut units = Vec::new();
    for league in OuaLeague::ALL {
        for year in opts.years(OuaLeague::FIRST_YEAR) {
            units.push(Unit {
                url: urls::oua_schedule(league, year)?,
                context: (league, year),
            });
        }
    }

    let found = fetch_and_parse(fetcher, units, opts.concurrency, stats, |_, html| {
        oua::parse_box_score_links(html)
    })
    .await;

    let mut links = Vec::new();
    for ((league, year), season_links) in found {
        info!(
            league = league.slug(),
            season = %season_string(year),
            count = season_links.len(),
            "box score links"
        );
        links.extend(season_links.into_iter().map(|url| (league, year, url)));
    }
    Ok(links)
}

/// Scrapes every box score into one player-level flat table. Each document
/// contributes rows for both teams.
#[instrument(level = "info", skip_all)]
pub async fn scrape<F: Fetcher>(fetcher: Arc<F>, opts: &ScrapeOptions) -> Result<OuaScrape> {
    let mut discovery = UnitStats::default();
    let links = discover_box_score_links(Arc::clone(&fetcher), opts, &mut discovery).await?;

    let units: Vec<Unit<(OuaLeague, u16)>> = links
        .into_iter()
        .map(|(league, year, url)| Unit {
            url,
            context: (league, year),
        })
        .collect();
    info!(box_scores = units.len(), "queueing box scores");

    let mut pages = UnitStats::default();
    let found = fetch_and_parse(fetcher, units, opts.concurrency, &mut pages, |_, html| {
        oua::parse_box_score(html)
    })
    .await;

    let mut rows = Vec::new();
    for ((league, year), sheets) in found {
        rows.extend(assemble(league, year, sheets));
    }
    info!(rows = rows.len(), "assembled OUA rows");

    Ok(OuaScrape {
        table: RawTable::build(rows),
        discovery,
        pages,
    })
}

fn assemble(league: OuaLeague, year: u16, sheets: Vec<oua::TeamSheet>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for sheet in sheets {
        let ctx = ContextTag {
            season: year,
            gender: league.gender(),
            team: sheet.team,
            opponent: sheet.opponent,
        };
        rows.extend(sheet.rows.into_iter().map(|cells| ctx.prefix(cells)));
    }
    rows
}
