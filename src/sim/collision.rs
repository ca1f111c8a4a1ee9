//! Collision resolution
//!
//! Brute-force circle checks: every shot against every enemy, then every enemy
//! against the player. Removals are collected during the scan and applied
//! afterwards so nothing is skipped or hit twice.

use super::geometry::circles_overlap;
use super::state::{GameEvent, GamePhase, SimulationState};

/// A projectile and the enemy it destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile_id: u32,
    pub enemy_id: u32,
}

/// Destroy every projectile/enemy pair in contact
///
/// Each projectile takes out at most one enemy: the first live one in spawn
/// order. An enemy already claimed by an earlier projectile is skipped.
pub fn resolve_projectile_enemy(state: &mut SimulationState) -> Vec<ProjectileHit> {
    let mut hits: Vec<ProjectileHit> = Vec::new();

    for shot in &state.projectiles {
        let target = state.enemies.iter().find(|enemy| {
            !hits.iter().any(|h| h.enemy_id == enemy.id)
                && circles_overlap(shot.pos, shot.radius, enemy.pos, enemy.radius)
        });
        if let Some(enemy) = target {
            hits.push(ProjectileHit {
                projectile_id: shot.id,
                enemy_id: enemy.id,
            });
        }
    }

    if hits.is_empty() {
        return hits;
    }

    state
        .projectiles
        .retain(|p| !hits.iter().any(|h| h.projectile_id == p.id));
    state
        .enemies
        .retain(|e| !hits.iter().any(|h| h.enemy_id == e.id));

    for hit in &hits {
        log::debug!(
            "Projectile {} destroyed enemy {}",
            hit.projectile_id,
            hit.enemy_id
        );
        state.push_event(GameEvent::EnemyDestroyed {
            enemy_id: hit.enemy_id,
            projectile_id: hit.projectile_id,
        });
    }

    hits
}

/// End the run if any enemy touches the player
///
/// Returns the id of the enemy that ended the run. Only the first contact
/// counts, and nothing happens once the run is already over.
pub fn resolve_enemy_player(state: &mut SimulationState) -> Option<u32> {
    if state.is_over() {
        return None;
    }

    let player = &state.player;
    let enemy_id = state
        .enemies
        .iter()
        .find(|e| circles_overlap(player.pos, player.radius, e.pos, e.radius))
        .map(|e| e.id)?;

    state.phase = GamePhase::Over;
    state.push_event(GameEvent::GameOver {
        enemy_id,
        tick: state.time_ticks,
    });
    log::info!(
        "Game over: enemy {} reached the player at tick {}",
        enemy_id,
        state.time_ticks
    );

    Some(enemy_id)
}
