// src/scrape/polish.rs
use anyhow::Result;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};
use tracing::{info, instrument};

use super::{fetch_and_parse, Unit};
use crate::{
    config::ScrapeOptions,
    fetch::{urls, Fetcher},
    league::{ContextTag, PolishLeague},
    parse::plusliga,
    process::{PolishRaw, RawTable},
    summary::UnitStats,
};

/// Flat table plus the unit counters of both stages.
#[derive(Debug)]
pub struct PolishScrape {
    pub table: RawTable<PolishRaw>,
    pub discovery: UnitStats,
    pub pages: UnitStats,
}

/// Team identifiers per league, unioned over every season in range. A team
/// seen in any season is tracked for all of them.
#[instrument(level = "info", skip_all)]
pub async fn discover_team_ids<F: Fetcher>(
    fetcher: Arc<F>,
    opts: &ScrapeOptions,
    stats: &mut UnitStats,
) -> Result<BTreeMap<PolishLeague, BTreeSet<String>>> {
    let mut units = Vec::new();
    for league in PolishLeague::ALL {
        for year in opts.years(PolishLeague::FIRST_YEAR) {
            units.push(Unit {
                url: urls::polish_standings(league, year)?,
                context: (league, year),
            });
        }
    }

    let found = fetch_and_parse(fetcher, units, opts.concurrency, stats, |_, html| {
        plusliga::parse_team_ids(html)
    })
    .await;

    let mut ids: BTreeMap<PolishLeague, BTreeSet<String>> = BTreeMap::new();
    for ((league, year), season_ids) in found {
        info!(league = league.slug(), year, count = season_ids.len(), "team ids");
        ids.entry(league).or_default().extend(season_ids);
    }
    Ok(ids)
}

/// Scrapes every (league, team, season) page into one flat table.
#[instrument(level = "info", skip_all)]
pub async fn scrape<F: Fetcher>(fetcher: Arc<F>, opts: &ScrapeOptions) -> Result<PolishScrape> {
    let mut discovery = UnitStats::default();
    let ids = discover_team_ids(Arc::clone(&fetcher), opts, &mut discovery).await?;

    let mut units = Vec::new();
    for (league, team_ids) in &ids {
        info!(league = league.slug(), teams = team_ids.len(), "queueing team pages");
        for team_id in team_ids {
            for year in opts.years(PolishLeague::FIRST_YEAR) {
                units.push(Unit {
                    url: urls::polish_team_stats(*league, team_id, year)?,
                    context: (*league, year),
                });
            }
        }
    }

    let mut pages = UnitStats::default();
    let found = fetch_and_parse(fetcher, units, opts.concurrency, &mut pages, |_, html| {
        plusliga::parse_team_page(html)
    })
    .await;

    let mut rows = Vec::new();
    for ((league, year), page) in found {
        rows.extend(assemble(league, year, page));
    }
    info!(rows = rows.len(), "assembled Polish rows");

    Ok(PolishScrape {
        table: RawTable::build(rows),
        discovery,
        pages,
    })
}

/// Tags each match row with its season, gender and team. The match label in
/// the first cell becomes the (still unstripped) opponent.
fn assemble(league: PolishLeague, year: u16, page: plusliga::TeamPage) -> Vec<Vec<String>> {
    page.rows
        .into_iter()
        .filter_map(|mut cells| {
            if cells.is_empty() {
                return None;
            }
            let opponent = cells.remove(0);
            let ctx = ContextTag {
                season: year,
                gender: league.gender(),
                team: page.team.clone(),
                opponent,
            };
            Some(ctx.prefix(cells))
        })
        .collect()
}
