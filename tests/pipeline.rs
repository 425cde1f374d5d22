// tests/pipeline.rs
use anyhow::Result;
use chrono::NaiveDate;
use std::{fs, sync::Arc};
use tempfile::tempdir;

use volleyscraper::{
    config::{OuaConfig, ScrapeOptions},
    export,
    fetch::{urls, StaticFetcher},
    league::{OuaLeague, PolishLeague},
    pipeline,
    process::{OuaPlayerStats, PolishTeamStats},
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn opts() -> ScrapeOptions {
    ScrapeOptions {
        from: Some(2022),
        to: 2023,
        concurrency: 4,
    }
}

fn standings(ids: &[&str]) -> String {
    let rows: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<tr><td><a class="table-teamname" href="/teams/id/{id}/tournament_1/2023.html">T{id}</a></td></tr>"#
            )
        })
        .collect();
    format!(r#"<table class="rs-standings-table table"><tbody>{rows}</tbody></table>"#)
}

fn team_page(team: &str, labels: &[&str]) -> String {
    let stats = [
        "4", "60", "90", "5", "12", "1,25", "70", "6", "10", "30", "43", "100", "9", "7", "50",
        "50,0", "6", "1,50",
    ];
    let mut body = String::new();
    for label in labels {
        body.push_str(&format!("<tr><td>{label}</td>"));
        for s in stats {
            body.push_str(&format!("<td>{s}</td>"));
        }
        body.push_str("</tr>");
    }
    body.push_str("<tr><td>Suma</td></tr><tr><td>Średnia</td></tr>");
    format!(
        r#"<div class="col-xs-12 col-sm-8 col-lg-9"><h1 class="hidden-xs">{team}</h1></div>
<table class="rs-standings-table stats-table table"><tbody>{body}</tbody></table>"#
    )
}

fn schedule(hrefs: &[&str]) -> String {
    hrefs
        .iter()
        .map(|h| {
            format!(
                r#"<a class="link text-nowrap btn btn-outline-secondary btn-sm my-1" href="{h}">Box</a>"#
            )
        })
        .collect()
}

fn player_row(num: &str, name: &str, atk: &str, srv: &str, blk: &str, total: &str) -> String {
    let cells = [
        num, name, "3", atk, "2", "20", ".250", "", srv, "1", "0", "5", blk, "1", "0", "0", total,
    ];
    let tds: String = cells.iter().map(|c| format!("<td>{c}</td>")).collect();
    format!("<tr>{tds}</tr>")
}

fn sheet(team: &str, rows: &[String]) -> String {
    format!(
        r#"<table class="table"><tr><th><h4>{team}</h4></th></tr><tr><th>h</th></tr><tr><th>h</th></tr>{}<tr><td>Totals</td></tr><tr><td>Hitting</td></tr></table>"#,
        rows.concat()
    )
}

fn box_score(home: &str, away: &str, home_rows: &[String], away_rows: &[String]) -> String {
    format!(
        r#"<span class="score fs-1 fw-bold">3</span><span class="score fs-1 fw-bold">2</span>
<table class="table table-sm table-hover mb-0"><tr><th>Team</th></tr>
<tr><td>{home} (1-0)</td></tr><tr><td>{away} (0-1)</td></tr></table>
<table class="table"><tr><td>a</td></tr></table>
<table class="table"><tr><td>b</td></tr></table>
{}{}
<table class="table"><tr><td>c</td></tr></table>"#,
        sheet(home, home_rows),
        sheet(away, away_rows)
    )
}

/// Two Polish teams over two seasons (one page missing), and two OUA box
/// scores including an alias, an exhibition opponent and a totals row.
fn site() -> Result<StaticFetcher> {
    let a = "/sports/wvball/2023-24/boxscores/a.xml";
    let b = "/sports/wvball/2023-24/boxscores/b.xml";

    Ok(StaticFetcher::new()
        .with_page(
            &urls::polish_standings(PolishLeague::PlusLiga, 2022)?,
            standings(&["10"]),
        )
        .with_page(
            &urls::polish_standings(PolishLeague::PlusLiga, 2023)?,
            standings(&["10", "20"]),
        )
        .with_page(
            &urls::polish_team_stats(PolishLeague::PlusLiga, "10", 2022)?,
            team_page(
                "Asseco Resovia",
                &["Asseco Resovia - PGE Skra", "ZAKSA - Asseco Resovia"],
            ),
        )
        .with_page(
            &urls::polish_team_stats(PolishLeague::PlusLiga, "10", 2023)?,
            team_page("Asseco Resovia", &["Asseco Resovia - Projekt Warszawa"]),
        )
        .with_page(
            &urls::polish_team_stats(PolishLeague::PlusLiga, "20", 2023)?,
            team_page("PGE Skra", &["PGE Skra - Asseco Resovia"]),
        )
        .with_page(&urls::oua_schedule(OuaLeague::Women, 2023)?, schedule(&[a, b]))
        .with_page(
            &urls::oua_box_score(a)?,
            box_score(
                "Ryerson",
                "Brock",
                &[
                    player_row("7", "Jane Roe", "10", "2", "1", "12.5"),
                    player_row("TM", "TEAM", "10", "2", "1", "13"),
                ],
                &[player_row("4", "Ann Lee", "8", "0", "2", "10")],
            ),
        )
        .with_page(
            &urls::oua_box_score(b)?,
            box_score(
                "Brock",
                "Laurier Exhibition",
                &[player_row("4", "Ann Lee", "3", "1", "0", "4")],
                &[player_row("1", "Guest", "9", "9", "9", "27")],
            ),
        ))
}

#[tokio::test]
async fn polish_pipeline_writes_clean_snapshot() -> Result<()> {
    let dir = tempdir()?;
    let fetcher = Arc::new(site()?);
    let summary = pipeline::run_polish(fetcher, &opts(), dir.path(), date()).await;

    assert!(summary.fatal.is_empty(), "{:?}", summary.fatal);
    // 2 ids x 2 seasons; team 20 in 2022 is missing
    assert_eq!(summary.pages.attempted, 4);
    assert_eq!(summary.pages.fetch_failed, 1);
    assert_eq!(summary.rows_kept, 4);

    let path = summary.artifact.expect("snapshot path");
    assert!(path.ends_with("2024-05-01_POLdata.csv"));
    let rows: Vec<PolishTeamStats> = export::read_back(&path)?;
    assert_eq!(rows.len(), 4);
    for r in &rows {
        assert_ne!(r.opponent, r.team);
        assert_eq!(r.is_male, 1);
        assert_eq!(r.serve_pts_per_set, 1.25);
    }
    let mut opponents: Vec<&str> = rows.iter().map(|r| r.opponent.as_str()).collect();
    opponents.sort();
    assert_eq!(
        opponents,
        vec!["Asseco Resovia", "PGE Skra", "Projekt Warszawa", "ZAKSA"]
    );
    Ok(())
}

#[tokio::test]
async fn oua_pipeline_applies_roster_alias_and_totals() -> Result<()> {
    let dir = tempdir()?;
    let fetcher = Arc::new(site()?);
    let summary =
        pipeline::run_oua(fetcher, &opts(), &OuaConfig::default(), dir.path(), date()).await;

    assert!(summary.fatal.is_empty(), "{:?}", summary.fatal);
    assert_eq!(summary.pages.with_data, 2);
    assert_eq!(summary.rows_filtered.team_summary, 1);
    assert_eq!(summary.rows_filtered.unknown_team, 1);

    let rows: Vec<OuaPlayerStats> = export::read_back(&summary.artifact.unwrap())?;
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().any(|r| r.team == "Toronto Metropolitan"));
    assert!(rows.iter().all(|r| r.team != "Ryerson"));
    assert!(rows
        .iter()
        .any(|r| r.team == "Brock" && r.opponent == "Toronto Metropolitan"));
    for r in &rows {
        assert_ne!(r.opponent, r.team);
        assert_eq!(r.total_pts, r.atk_pts + r.blk_pts + r.serve_pts);
        assert_eq!(r.is_male, 0);
    }
    Ok(())
}

#[tokio::test]
async fn rerun_with_same_date_is_byte_identical() -> Result<()> {
    let first = tempdir()?;
    let second = tempdir()?;
    for dir in [&first, &second] {
        let fetcher = Arc::new(site()?);
        pipeline::run_polish(Arc::clone(&fetcher), &opts(), dir.path(), date()).await;
        pipeline::run_oua(fetcher, &opts(), &OuaConfig::default(), dir.path(), date()).await;
    }
    for name in ["2024-05-01_POLdata.csv", "2024-05-01_OUAdata.csv"] {
        let a = fs::read(first.path().join(name))?;
        let b = fs::read(second.path().join(name))?;
        assert!(!a.is_empty());
        assert_eq!(a, b, "{name} differs between runs");
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_site_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let summary = pipeline::run_oua(
        Arc::new(StaticFetcher::new()),
        &opts(),
        &OuaConfig::default(),
        dir.path(),
        date(),
    )
    .await;
    assert_eq!(summary.discovery.attempted, 4);
    assert!(!summary.fatal.is_empty());
    // an empty snapshot is still written
    assert_eq!(summary.rows_kept, 0);
    assert!(summary.artifact.is_some());
    Ok(())
}
