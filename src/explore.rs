// src/explore.rs
//! Ad hoc aggregation over a cleaned OUA snapshot.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::{league::Gender, process::OuaPlayerStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamLeaders {
    pub team: String,
    pub team_total: i64,
    /// (player, points), best first.
    pub players: Vec<(String, i64)>,
}

/// Top `top` point scorers of each team in one season, teams ordered by
/// their total points. Input order does not matter.
pub fn points_leaders(
    rows: &[OuaPlayerStats],
    year: i16,
    gender: Gender,
    top: usize,
) -> Vec<TeamLeaders> {
    let mut by_team: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();
    for r in rows.iter().filter(|r| r.year == year && r.gender == gender) {
        *by_team
            .entry(r.team.as_str())
            .or_default()
            .entry(r.player_name.as_str())
            .or_default() += i64::from(r.total_pts);
    }

    let mut teams: Vec<TeamLeaders> = by_team
        .into_iter()
        .map(|(team, players)| {
            let team_total = players.values().sum();
            let mut players: Vec<(String, i64)> = players
                .into_iter()
                .map(|(name, pts)| (name.to_string(), pts))
                .collect();
            players.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            players.truncate(top);
            TeamLeaders {
                team: team.to_string(),
                team_total,
                players,
            }
        })
        .collect();
    teams.sort_by(|a, b| {
        b.team_total
            .cmp(&a.team_total)
            .then_with(|| a.team.cmp(&b.team))
    });
    teams
}

/// Top `top` point scorers of one gender, summed over every season or only
/// over `year`. Players are keyed by name alone, so a player who changed
/// teams keeps one total.
pub fn top_scorers(
    rows: &[OuaPlayerStats],
    gender: Gender,
    year: Option<i16>,
    top: usize,
) -> Vec<(String, i64)> {
    let mut by_player: BTreeMap<&str, i64> = BTreeMap::new();
    for r in rows
        .iter()
        .filter(|r| r.gender == gender && year.map_or(true, |y| r.year == y))
    {
        *by_player.entry(r.player_name.as_str()).or_default() += i64::from(r.total_pts);
    }

    let mut players: Vec<(String, i64)> = by_player
        .into_iter()
        .map(|(name, pts)| (name.to_string(), pts))
        .collect();
    players.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    players.truncate(top);
    players
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, name: &str, pts: i32, year: i16, gender: Gender) -> OuaPlayerStats {
        OuaPlayerStats {
            year,
            gender,
            team: team.into(),
            opponent: "York".into(),
            player_num: 1,
            player_name: name.into(),
            sets_played: 3,
            atk_pts: pts,
            atk_errors: 0,
            atk_total: 0,
            atk_pts_per: 0.0,
            assists: 0,
            serve_pts: 0,
            serve_errors: 0,
            rec_errors: 0,
            digs: 0,
            blk_pts: 0,
            blk_ast: 0,
            blk_errors: 0,
            bhe: 0,
            total_pts: pts,
            is_male: gender.is_male(),
        }
    }

    #[test]
    fn ranks_teams_and_players() {
        let m = Gender::Male;
        let rows = vec![
            row("Brock", "A", 10, 2023, m),
            row("Brock", "B", 4, 2023, m),
            row("Brock", "A", 5, 2023, m),
            row("Waterloo", "C", 30, 2023, m),
            row("Waterloo", "D", 30, 2023, m),
            row("Waterloo", "E", 1, 2023, m),
            row("Brock", "Z", 99, 2022, m),
            row("Brock", "W", 99, 2023, Gender::Female),
        ];
        let out = points_leaders(&rows, 2023, m, 2);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].team, "Waterloo");
        assert_eq!(out[0].team_total, 61);
        assert_eq!(
            out[0].players,
            vec![("C".to_string(), 30), ("D".to_string(), 30)]
        );
        assert_eq!(out[1].team, "Brock");
        assert_eq!(out[1].players[0], ("A".to_string(), 15));
    }

    #[test]
    fn order_of_input_does_not_matter() {
        let m = Gender::Male;
        let mut rows = vec![
            row("Brock", "A", 3, 2023, m),
            row("York", "B", 7, 2023, m),
            row("Brock", "C", 5, 2023, m),
        ];
        let first = points_leaders(&rows, 2023, m, 5);
        rows.reverse();
        assert_eq!(points_leaders(&rows, 2023, m, 5), first);
    }

    #[test]
    fn top_scorers_span_seasons_unless_one_is_given() {
        let f = Gender::Female;
        let rows = vec![
            row("Brock", "A", 10, 2022, f),
            row("York", "A", 12, 2023, f),
            row("Brock", "B", 20, 2023, f),
            row("Brock", "C", 5, 2023, f),
            row("Brock", "M", 99, 2023, Gender::Male),
        ];

        assert_eq!(
            top_scorers(&rows, f, None, 2),
            vec![("A".to_string(), 22), ("B".to_string(), 20)]
        );
        assert_eq!(
            top_scorers(&rows, f, Some(2023), 5),
            vec![
                ("B".to_string(), 20),
                ("A".to_string(), 12),
                ("C".to_string(), 5)
            ]
        );
        assert!(top_scorers(&rows, f, Some(2019), 5).is_empty());
    }
}
