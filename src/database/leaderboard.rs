//! Leaderboard queries.

use super::models::LeaderboardEntry;
use crate::error::RpgResult;
use sqlx::{Postgres, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardType {
    Level,
    Power,
    Floor,
}

impl LeaderboardType {
    pub fn key(&self) -> &'static str {
        match self {
            LeaderboardType::Level => "level",
            LeaderboardType::Power => "power",
            LeaderboardType::Floor => "floor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "level" | "lvl" => Some(LeaderboardType::Level),
            "power" | "pow" => Some(LeaderboardType::Power),
            "floor" | "ascension" | "tower" => Some(LeaderboardType::Floor),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LeaderboardType::Level => "Highest Level",
            LeaderboardType::Power => "Greatest Power",
            LeaderboardType::Floor => "Highest Ascension Floor",
        }
    }
}

pub async fn top(
    tx: &mut Transaction<'_, Postgres>,
    board: LeaderboardType,
    limit: i64,
) -> RpgResult<Vec<LeaderboardEntry>> {
    let sql = match board {
        LeaderboardType::Level => {
            "SELECT discord_id, username, level::BIGINT AS score FROM players \
             ORDER BY level DESC, experience DESC LIMIT $1"
        }
        LeaderboardType::Power => {
            "SELECT discord_id, username, total_power AS score FROM players \
             ORDER BY total_power DESC LIMIT $1"
        }
        LeaderboardType::Floor => {
            "SELECT p.discord_id, p.username, a.highest_floor::BIGINT AS score \
             FROM ascension_progress a JOIN players p ON p.discord_id = a.player_id \
             WHERE a.highest_floor > 0 ORDER BY a.highest_floor DESC, a.updated_at LIMIT $1"
        }
    };
    Ok(sqlx::query_as::<_, LeaderboardEntry>(sql)
        .bind(limit)
        .fetch_all(&mut **tx)
        .await?)
}
