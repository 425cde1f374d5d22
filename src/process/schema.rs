// src/process/schema.rs
//! Column schemas for both sources, in their text stage and typed stage.
//!
//! Typed records serialize with the same camelCase headers the raw stage
//! uses, followed by the derived `isMale` flag.

use serde::{Deserialize, Serialize};

use crate::league::Gender;

raw_record! {
    /// One team's statistics for one Polish league match.
    PolishRaw {
        year => "year",
        gender => "gender",
        team => "team",
        opponent => "opponent",
        sets_played => "setsPlayed",
        total_pts => "totalPts",
        serve_total => "serveTotal",
        serve_pts => "servePts",
        serve_errors => "serveErrors",
        serve_pts_per_set => "servePtsPerSet",
        rec_total => "recTotal",
        rec_errors => "recErrors",
        rec_poor => "recPoor",
        rec_perfect => "recPerfect",
        rec_perfect_per => "recPerfectPer",
        atk_total => "atkTotal",
        atk_errors => "atkErrors",
        atk_blocked => "atkBlocked",
        atk_pts => "atkPts",
        atk_pts_per => "atkPtsPer",
        blk_pts => "blkPts",
        blk_pts_per_set => "blkPtsPerSet",
    }
}

raw_record! {
    /// One player's statistics for one OUA match.
    OuaRaw {
        year => "year",
        gender => "gender",
        team => "team",
        opponent => "opponent",
        player_num => "playerNum",
        player_name => "playerName",
        sets_played => "setsPlayed",
        atk_pts => "atkPts",
        atk_errors => "atkErrors",
        atk_total => "atkTotal",
        atk_pts_per => "atkPtsPer",
        assists => "assists",
        serve_pts => "servePts",
        serve_errors => "serveErrors",
        rec_errors => "recErrors",
        digs => "digs",
        blk_pts => "blkPts",
        blk_ast => "blkAst",
        blk_errors => "blkErrors",
        bhe => "BHE",
        total_pts => "totalPts",
    }
}

/// A cleaned record that is written to a dated snapshot.
pub trait Snapshot: Serialize {
    /// File tag, e.g. `POL` for `2024-05-01_POLdata.csv`.
    const TAG: &'static str;
    /// CSV header, matching the serde field order.
    const HEADER: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolishTeamStats {
    pub year: i16,
    pub gender: Gender,
    pub team: String,
    pub opponent: String,
    pub sets_played: i16,
    pub total_pts: i32,
    pub serve_total: i32,
    pub serve_pts: i32,
    pub serve_errors: i32,
    pub serve_pts_per_set: f64,
    pub rec_total: i32,
    pub rec_errors: i32,
    pub rec_poor: i32,
    pub rec_perfect: i32,
    pub rec_perfect_per: f64,
    pub atk_total: i32,
    pub atk_errors: i32,
    pub atk_blocked: i32,
    pub atk_pts: i32,
    pub atk_pts_per: f64,
    pub blk_pts: i32,
    pub blk_pts_per_set: f64,
    pub is_male: u8,
}

impl Snapshot for PolishTeamStats {
    const TAG: &'static str = "POL";
    const HEADER: &'static [&'static str] = &[
        "year",
        "gender",
        "team",
        "opponent",
        "setsPlayed",
        "totalPts",
        "serveTotal",
        "servePts",
        "serveErrors",
        "servePtsPerSet",
        "recTotal",
        "recErrors",
        "recPoor",
        "recPerfect",
        "recPerfectPer",
        "atkTotal",
        "atkErrors",
        "atkBlocked",
        "atkPts",
        "atkPtsPer",
        "blkPts",
        "blkPtsPerSet",
        "isMale",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OuaPlayerStats {
    pub year: i16,
    pub gender: Gender,
    pub team: String,
    pub opponent: String,
    pub player_num: i16,
    pub player_name: String,
    pub sets_played: i16,
    pub atk_pts: i32,
    pub atk_errors: i32,
    pub atk_total: i32,
    pub atk_pts_per: f64,
    pub assists: i32,
    pub serve_pts: i32,
    pub serve_errors: i32,
    pub rec_errors: i32,
    pub digs: i32,
    pub blk_pts: i32,
    pub blk_ast: i32,
    pub blk_errors: i32,
    #[serde(rename = "BHE")]
    pub bhe: i32,
    pub total_pts: i32,
    pub is_male: u8,
}

impl Snapshot for OuaPlayerStats {
    const TAG: &'static str = "OUA";
    const HEADER: &'static [&'static str] = &[
        "year",
        "gender",
        "team",
        "opponent",
        "playerNum",
        "playerName",
        "setsPlayed",
        "atkPts",
        "atkErrors",
        "atkTotal",
        "atkPtsPer",
        "assists",
        "servePts",
        "serveErrors",
        "recErrors",
        "digs",
        "blkPts",
        "blkAst",
        "blkErrors",
        "BHE",
        "totalPts",
        "isMale",
    ];
}
