//! Fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use lumen_rpg::database::models::{Element, OwnedMaiden, Player};
use sqlx::types::Json;
use std::collections::BTreeMap;

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn player() -> Player {
    let t0 = at(2024, 3, 10, 12, 0);
    Player {
        discord_id: 42,
        username: "tester".into(),
        level: 1,
        experience: 0,
        rikis: 1_000,
        grace: 10,
        gems: 0,
        energy: 100,
        max_energy: 100,
        stamina: 50,
        max_stamina: 50,
        energy_updated: t0,
        stamina_updated: t0,
        total_power: 0,
        pity_counter: 0,
        total_summons: 0,
        fusion_shards: Json(BTreeMap::new()),
        daily_streak: 0,
        last_daily: None,
        created_at: t0,
    }
}

pub fn maiden(id: i64, tier: i32, quantity: i32, element: Element, base_atk: i64) -> OwnedMaiden {
    OwnedMaiden {
        id,
        player_id: 42,
        maiden_base_id: 1,
        tier,
        quantity,
        times_fused: 0,
        acquired_at: at(2024, 3, 10, 12, 0),
        name: format!("Maiden {id}"),
        element,
        base_atk,
        base_def: base_atk / 2,
    }
}
