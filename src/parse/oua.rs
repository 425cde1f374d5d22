// src/parse/oua.rs
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use super::{first_line_text, selector, trim_rows, Parsed};
use crate::fetch::urls;

static BOX_SCORE_ANCHOR: Lazy<Selector> =
    Lazy::new(|| selector("a.link.text-nowrap.btn.btn-outline-secondary.btn-sm.my-1"));
static SET_SCORE: Lazy<Selector> = Lazy::new(|| selector("span.score.fs-1.fw-bold"));
static LINE_SCORE: Lazy<Selector> = Lazy::new(|| selector("table.table.table-sm.table-hover.mb-0"));
static ANY_TABLE: Lazy<Selector> = Lazy::new(|| selector("table.table"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static TD: Lazy<Selector> = Lazy::new(|| selector("td"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td, th"));
static HEADING: Lazy<Selector> = Lazy::new(|| selector("h4"));

/// Tables on a box score page before the per-team statistics.
const LEADING_TABLES: usize = 3;
/// Heading rows at the top of each team sheet.
const SHEET_HEAD_ROWS: usize = 3;
/// Team totals rows at the bottom of each team sheet.
const SHEET_TAIL_ROWS: usize = 2;

/// Per-player rows of one team in one match.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSheet {
    pub team: String,
    pub opponent: String,
    pub rows: Vec<Vec<String>>,
}

/// Box-score document links on a season schedule page, in page order,
/// without repeats.
pub fn parse_box_score_links(html: &str) -> Parsed<Vec<Url>> {
    let doc = Html::parse_document(html);
    let mut links: Vec<Url> = Vec::new();
    for href in doc
        .select(&BOX_SCORE_ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.ends_with(".xml"))
    {
        if let Ok(url) = urls::oua_box_score(href) {
            if !links.contains(&url) {
                links.push(url);
            }
        }
    }

    if links.is_empty() {
        Parsed::NoData("no box score links")
    } else {
        Parsed::Data(links)
    }
}

/// Both team sheets of one match. A page without the two set scores is a
/// match that was not played.
pub fn parse_box_score(html: &str) -> Parsed<Vec<TeamSheet>> {
    let doc = Html::parse_document(html);

    let sets = doc
        .select(&SET_SCORE)
        .filter(|s| s.text().collect::<String>().trim().parse::<u8>().is_ok())
        .count();
    if sets != 2 {
        return Parsed::NoData("set score absent");
    }

    let Some(line_score) = doc.select(&LINE_SCORE).next() else {
        return Parsed::NoData("line score absent");
    };
    let names: Vec<String> = line_score
        .select(&ROW)
        .skip(1)
        .filter_map(|row| row.select(&TD).next())
        .map(|td| {
            let text: String = td.text().collect();
            text.split('(').next().unwrap_or_default().trim().to_string()
        })
        .collect();
    let [home, away] = <[String; 2]>::try_from(names).unwrap_or_default();
    if home.is_empty() || away.is_empty() {
        return Parsed::NoData("line score team names absent");
    }

    let tables: Vec<_> = doc.select(&ANY_TABLE).collect();
    let stat_tables = trim_rows(tables, LEADING_TABLES, 1);

    let mut sheets = Vec::with_capacity(stat_tables.len());
    for table in stat_tables {
        let Some(team) = table
            .select(&ROW)
            .next()
            .and_then(|first| first.select(&HEADING).next())
            .map(|h| h.text().collect::<String>().trim().to_string())
        else {
            continue;
        };
        let opponent = if home == team {
            away.clone()
        } else {
            home.clone()
        };

        let rows: Vec<Vec<String>> = table
            .select(&ROW)
            .map(|row| row.select(&CELL).map(|c| first_line_text(&c)).collect())
            .collect();
        let rows = trim_rows(rows, SHEET_HEAD_ROWS, SHEET_TAIL_ROWS);

        sheets.push(TeamSheet {
            team,
            opponent,
            rows,
        });
    }

    Parsed::Data(sheets)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_keeps_only_xml_links_once() {
        let html = fixtures::schedule(&[
            "/sports/wvball/2023-24/boxscores/a.xml",
            "/sports/wvball/2023-24/boxscores/b.xml",
            "/sports/wvball/2023-24/boxscores/a.xml",
        ]);
        let links = parse_box_score_links(&html).data().unwrap();
        assert_eq!(
            links.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec![
                "https://oua.ca/sports/wvball/2023-24/boxscores/a.xml",
                "https://oua.ca/sports/wvball/2023-24/boxscores/b.xml",
            ]
        );
    }

    #[test]
    fn schedule_without_buttons_is_no_data() {
        assert_eq!(
            parse_box_score_links("<html><body></body></html>"),
            Parsed::NoData("no box score links")
        );
    }

    #[test]
    fn box_score_yields_both_teams_with_opponents() {
        let html = fixtures::box_score(
            "Brock",
            "York",
            &[fixtures::player("7", "Jane Roe", "10", "2", "1", "13")],
            &[
                fixtures::player("4", "Ann Lee", "8", "0", "2", "10"),
                fixtures::player("TM", "TEAM", "0", "0", "0", "0"),
            ],
        );
        let sheets = parse_box_score(&html).data().unwrap();
        assert_eq!(sheets.len(), 2);

        let brock = &sheets[0];
        assert_eq!(brock.team, "Brock");
        assert_eq!(brock.opponent, "York");
        assert_eq!(brock.rows.len(), 1);
        assert_eq!(brock.rows[0].len(), 17);
        // multi-line cell keeps only its first line
        assert_eq!(brock.rows[0][1], "Jane Roe");

        let york = &sheets[1];
        assert_eq!(york.team, "York");
        assert_eq!(york.opponent, "Brock");
        assert_eq!(york.rows.len(), 2);
    }

    #[test]
    fn box_score_without_set_scores_is_no_data() {
        let html = r#"<table class="table table-sm table-hover mb-0"></table>"#;
        assert_eq!(parse_box_score(html), Parsed::NoData("set score absent"));
    }
}
