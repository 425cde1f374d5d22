// src/process/clean.rs
//! Cleaning passes that turn a flat text table into typed records.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    convert::{count, rate},
    raw_table::{RawRecord, RawTable},
    schema::{OuaPlayerStats, OuaRaw, PolishRaw, PolishTeamStats},
    utils::{is_numeric, strip_self_reference},
    RejectedRow, Rejection,
};
use crate::{config::OuaConfig, league::Gender};

/// Player number OUA uses for the team-totals pseudo-player.
pub const TEAM_ROW_MARKER: &str = "TM";

/// Rows removed on purpose (not errors).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCounts {
    pub unknown_team: usize,
    pub team_summary: usize,
    pub non_numeric_player: usize,
}

impl FilterCounts {
    pub fn total(&self) -> usize {
        self.unknown_team + self.team_summary + self.non_numeric_player
    }
}

/// Output of a cleaning pass.
#[derive(Debug)]
pub struct Cleaned<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<RejectedRow>,
    pub filtered: FilterCounts,
}

fn context_field(name: &'static str, value: &str) -> Result<(), Rejection> {
    if value.trim().is_empty() {
        Err(Rejection::MissingContext(name))
    } else {
        Ok(())
    }
}

fn distinct_opponent(team: &str, opponent: String) -> Result<String, Rejection> {
    if opponent.is_empty() {
        return Err(Rejection::MissingContext("opponent"));
    }
    if opponent == team {
        return Err(Rejection::SelfOpponent(opponent));
    }
    Ok(opponent)
}

fn polish_row(raw: &PolishRaw) -> Result<PolishTeamStats, Rejection> {
    context_field("team", &raw.team)?;
    let gender: Gender = raw.gender.parse()?;
    let team = raw.team.trim().to_string();
    let opponent = distinct_opponent(&team, strip_self_reference(&raw.opponent, &team))?;

    Ok(PolishTeamStats {
        year: count("year", &raw.year)?,
        gender,
        team,
        opponent,
        sets_played: count("setsPlayed", &raw.sets_played)?,
        total_pts: count("totalPts", &raw.total_pts)?,
        serve_total: count("serveTotal", &raw.serve_total)?,
        serve_pts: count("servePts", &raw.serve_pts)?,
        serve_errors: count("serveErrors", &raw.serve_errors)?,
        serve_pts_per_set: rate("servePtsPerSet", &raw.serve_pts_per_set)?,
        rec_total: count("recTotal", &raw.rec_total)?,
        rec_errors: count("recErrors", &raw.rec_errors)?,
        rec_poor: count("recPoor", &raw.rec_poor)?,
        rec_perfect: count("recPerfect", &raw.rec_perfect)?,
        rec_perfect_per: rate("recPerfectPer", &raw.rec_perfect_per)?,
        atk_total: count("atkTotal", &raw.atk_total)?,
        atk_errors: count("atkErrors", &raw.atk_errors)?,
        atk_blocked: count("atkBlocked", &raw.atk_blocked)?,
        atk_pts: count("atkPts", &raw.atk_pts)?,
        atk_pts_per: rate("atkPtsPer", &raw.atk_pts_per)?,
        blk_pts: count("blkPts", &raw.blk_pts)?,
        blk_pts_per_set: rate("blkPtsPerSet", &raw.blk_pts_per_set)?,
        is_male: gender.is_male(),
    })
}

/// Polish team-level table: derive `isMale`, strip the team from the match
/// label to get the opponent, coerce every statistic.
pub fn clean_polish(table: RawTable<PolishRaw>) -> Cleaned<PolishTeamStats> {
    let RawTable { records, mut rejected } = table;
    let mut rows = Vec::with_capacity(records.len());

    for raw in records {
        match polish_row(&raw) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                warn!(%reason, team = %raw.team, year = %raw.year, "rejected row");
                rejected.push(RejectedRow {
                    reason,
                    fields: raw.into_fields(),
                });
            }
        }
    }

    info!(kept = rows.len(), rejected = rejected.len(), "cleaned Polish table");
    Cleaned {
        rows,
        rejected,
        filtered: FilterCounts::default(),
    }
}

fn oua_row(raw: &OuaRaw) -> Result<OuaPlayerStats, Rejection> {
    context_field("team", &raw.team)?;
    let gender: Gender = raw.gender.parse()?;
    let opponent = distinct_opponent(&raw.team, raw.opponent.trim().to_string())?;

    let atk_pts: i32 = count("atkPts", &raw.atk_pts)?;
    let serve_pts = count("servePts", &raw.serve_pts)?;
    let blk_pts = count("blkPts", &raw.blk_pts)?;
    // always atk + blk + serve, whatever the sheet printed
    let total_pts = atk_pts
        .checked_add(blk_pts)
        .and_then(|t| t.checked_add(serve_pts))
        .ok_or(Rejection::Overflow {
            column: "totalPts",
            kind: "i32",
        })?;

    Ok(OuaPlayerStats {
        year: count("year", &raw.year)?,
        gender,
        team: raw.team.clone(),
        opponent,
        player_num: count("playerNum", &raw.player_num)?,
        player_name: raw.player_name.trim().to_string(),
        sets_played: count("setsPlayed", &raw.sets_played)?,
        atk_pts,
        atk_errors: count("atkErrors", &raw.atk_errors)?,
        atk_total: count("atkTotal", &raw.atk_total)?,
        atk_pts_per: rate("atkPtsPer", &raw.atk_pts_per)?,
        assists: count("assists", &raw.assists)?,
        serve_pts,
        serve_errors: count("serveErrors", &raw.serve_errors)?,
        rec_errors: count("recErrors", &raw.rec_errors)?,
        digs: count("digs", &raw.digs)?,
        blk_pts,
        blk_ast: count("blkAst", &raw.blk_ast)?,
        blk_errors: count("blkErrors", &raw.blk_errors)?,
        bhe: count("BHE", &raw.bhe)?,
        total_pts,
        is_male: gender.is_male(),
    })
}

/// OUA player-level table. Order matters: aliases are resolved before the
/// roster filter so renamed teams survive it.
pub fn clean_oua(table: RawTable<OuaRaw>, cfg: &OuaConfig) -> Cleaned<OuaPlayerStats> {
    let RawTable { records, mut rejected } = table;
    let mut rows = Vec::with_capacity(records.len());
    let mut filtered = FilterCounts::default();

    for mut raw in records {
        raw.team = cfg.canonical(raw.team.trim()).to_string();
        raw.opponent = cfg.canonical(raw.opponent.trim()).to_string();

        if !cfg.roster.contains(&raw.team) {
            debug!(team = %raw.team, "team not in roster");
            filtered.unknown_team += 1;
            continue;
        }
        let num = raw.player_num.trim();
        if num == TEAM_ROW_MARKER {
            filtered.team_summary += 1;
            continue;
        }
        if !is_numeric(num) {
            filtered.non_numeric_player += 1;
            continue;
        }

        match oua_row(&raw) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                warn!(%reason, team = %raw.team, player = %raw.player_name, "rejected row");
                rejected.push(RejectedRow {
                    reason,
                    fields: raw.into_fields(),
                });
            }
        }
    }

    info!(
        kept = rows.len(),
        rejected = rejected.len(),
        filtered = filtered.total(),
        "cleaned OUA table"
    );
    Cleaned {
        rows,
        rejected,
        filtered,
    }
}
