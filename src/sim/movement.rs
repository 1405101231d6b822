//! Per-kind steering and post-move collision correction
//!
//! Who each mover is checked against:
//!
//! | Mover  | Checked against                          |
//! |--------|------------------------------------------|
//! | Player | obstacles                                |
//! | Egg    | player, other eggs, obstacles, enemies   |
//! | Larva  | player, obstacles, eggs, other larvae    |
//! | Enemy  | player, obstacles, other enemies         |
//!
//! Obstacles never move. Corrections are applied one anchor at a time, each
//! seeing the mover's position after the previous correction.

use std::collections::VecDeque;

use glam::DVec2;

use super::collision::{Circle, Collidable, check_collision, resolve_push};
use super::registry::EntityRegistry;
use super::state::{Egg, Enemy, Larva, Obstacle, PlacementFrame, Player};
use crate::config::GameConfig;

/// Push `mover` out of every anchor it overlaps
///
/// With a `frame`, each axis of a correction is only applied if the corrected
/// coordinate stays inside the frame. Returns the corrected circle and whether
/// any anchor was hit.
fn push_out<I>(mut mover: Circle, anchors: I, frame: Option<&PlacementFrame>) -> (Circle, bool)
where
    I: IntoIterator<Item = Circle>,
{
    let mut hit = false;
    for anchor in anchors {
        if !check_collision(&mover, &anchor, 0.0).collided {
            continue;
        }
        hit = true;

        let corrected = resolve_push(&mover, &anchor);
        match frame {
            Some(frame) => {
                if frame.contains_x(corrected.x) {
                    mover.pos.x = corrected.x;
                }
                if frame.contains_y(corrected.y) {
                    mover.pos.y = corrected.y;
                }
            }
            None => mover.pos = corrected,
        }
    }
    (mover, hit)
}

fn circles<'a, T: Collidable + 'a>(items: impl IntoIterator<Item = &'a T>) -> impl Iterator<Item = Circle> {
    items.into_iter().map(Collidable::circle)
}

/// Steer the player toward `target`, then slide it off any obstacle
pub fn move_player(player: &mut Player, target: DVec2, obstacles: &[Obstacle]) {
    player.steer_toward(target);
    let (corrected, _) = push_out(player.circle(), circles(obstacles), None);
    player.pos = corrected.pos;
}

/// Advance every active enemy, unless it is being shoved this step
///
/// An enemy overlapping the player, an obstacle or another enemy is pushed
/// clear instead of moving toward its target.
pub fn move_enemies(enemies: &mut [Enemy], player: &Player, obstacles: &[Obstacle]) {
    for i in 0..enemies.len() {
        if !enemies[i].is_active() {
            continue;
        }

        let (corrected, pushed) = {
            let all: &[Enemy] = enemies;
            let others = all
                .iter()
                .enumerate()
                .filter(|&(j, e)| j != i && e.is_active())
                .map(|(_, e)| e.circle());
            let anchors = std::iter::once(player.circle())
                .chain(circles(obstacles))
                .chain(others);
            push_out(all[i].circle(), anchors, None)
        };

        let enemy = &mut enemies[i];
        if pushed {
            enemy.pos = corrected.pos;
        } else {
            enemy.advance();
        }
    }
}

/// Nudge eggs that were bumped by anything, keeping them inside their frame
pub fn move_eggs(
    eggs: &mut VecDeque<Egg>,
    frame: &PlacementFrame,
    player: &Player,
    obstacles: &[Obstacle],
    enemies: &[Enemy],
) {
    for i in 0..eggs.len() {
        let (corrected, _) = {
            let all: &VecDeque<Egg> = eggs;
            let others = all
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, e)| e.circle());
            let anchors = std::iter::once(player.circle())
                .chain(others)
                .chain(circles(obstacles))
                .chain(enemies.iter().filter(|e| e.is_active()).map(Collidable::circle));
            push_out(all[i].circle(), anchors, Some(frame))
        };
        eggs[i].pos = corrected.pos;
    }
}

/// Drift every live larva upward, then correct it against its surroundings
pub fn move_larvae(
    larvae: &mut [Larva],
    drift_speed: f64,
    frame: &PlacementFrame,
    player: &Player,
    obstacles: &[Obstacle],
    eggs: &VecDeque<Egg>,
) {
    for i in 0..larvae.len() {
        if !larvae[i].is_alive() {
            continue;
        }
        larvae[i].drift(drift_speed);

        let (corrected, _) = {
            let all: &[Larva] = larvae;
            let others = all
                .iter()
                .enumerate()
                .filter(|&(j, l)| j != i && l.is_alive())
                .map(|(_, l)| l.circle());
            let anchors = std::iter::once(player.circle())
                .chain(circles(obstacles))
                .chain(circles(eggs))
                .chain(others);
            push_out(all[i].circle(), anchors, Some(frame))
        };
        larvae[i].pos = corrected.pos;
    }
}

/// Run the movement phase of a step for every kind
pub fn update(registry: &mut EntityRegistry, target: DVec2, config: &GameConfig) {
    let EntityRegistry {
        player,
        obstacles,
        eggs,
        larvae,
        enemies,
        ..
    } = registry;

    move_player(player, target, obstacles);
    move_enemies(enemies, player, obstacles);

    let egg_frame = PlacementFrame::lower(config, config.egg_radius);
    move_eggs(eggs, &egg_frame, player, obstacles, enemies);

    let larva_frame = PlacementFrame::larva(config);
    move_larvae(larvae, config.larva_drift_speed, &larva_frame, player, obstacles, eggs);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyState;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn enemy(id: u32, pos: DVec2, target: DVec2, speed: f64) -> Enemy {
        Enemy {
            id,
            pos,
            target,
            radius: 45.0,
            speed,
            state: EnemyState::Active,
            sprite: 0,
        }
    }

    #[test]
    fn test_player_full_speed_step() {
        let mut player = Player::new(&config());
        move_player(&mut player, DVec2::new(640.0, 260.0), &[]);
        assert_eq!(player.pos, DVec2::new(640.0, 355.0));
    }

    #[test]
    fn test_player_is_pushed_off_obstacle() {
        let mut player = Player::new(&config());
        player.pos = DVec2::new(600.0, 500.0);
        let obstacle = Obstacle::new(1, DVec2::new(660.0, 500.0), 40.0, (0, 0), 4);

        // Stepping right into the obstacle
        move_player(&mut player, DVec2::new(700.0, 500.0), std::slice::from_ref(&obstacle));
        let distance = (player.pos - obstacle.pos).length();
        assert!((distance - 71.0).abs() < 1e-9);
        assert!(player.pos.x < obstacle.pos.x);
    }

    #[test]
    fn test_enemy_advances_when_clear() {
        let player = Player::new(&config());
        let mut enemies = [enemy(1, DVec2::new(1000.0, 500.0), DVec2::new(-90.0, 500.0), 2.0)];
        move_enemies(&mut enemies, &player, &[]);
        assert_eq!(enemies[0].pos, DVec2::new(998.0, 500.0));
    }

    #[test]
    fn test_enemy_pushed_instead_of_advancing() {
        let mut player = Player::new(&config());
        player.pos = DVec2::new(950.0, 500.0);
        let mut enemies = [enemy(1, DVec2::new(1000.0, 500.0), DVec2::new(-90.0, 500.0), 2.0)];
        move_enemies(&mut enemies, &player, &[]);
        // Pushed to just outside the player, not one step further left
        assert!((enemies[0].pos - DVec2::new(1026.0, 500.0)).length() < 1e-9);
    }

    #[test]
    fn test_overlapping_enemies_separate() {
        let mut player = Player::new(&config());
        player.pos = DVec2::new(100.0, 100.0);
        let mut enemies = [
            enemy(1, DVec2::new(800.0, 500.0), DVec2::new(-90.0, 500.0), 2.0),
            enemy(2, DVec2::new(820.0, 500.0), DVec2::new(-90.0, 500.0), 2.0),
        ];
        move_enemies(&mut enemies, &player, &[]);
        // The first enemy yields to the second, which is then clear to advance
        assert!((enemies[0].pos - DVec2::new(729.0, 500.0)).length() < 1e-9);
        assert_eq!(enemies[1].pos, DVec2::new(818.0, 500.0));
    }

    #[test]
    fn test_exited_enemy_is_frozen() {
        let player = Player::new(&config());
        let mut enemies = [enemy(1, DVec2::new(-5.0, 500.0), DVec2::new(-90.0, 500.0), 2.0)];
        enemies[0].state = EnemyState::Exited;
        move_enemies(&mut enemies, &player, &[]);
        assert_eq!(enemies[0].pos, DVec2::new(-5.0, 500.0));
    }

    #[test]
    fn test_egg_pushed_by_player() {
        let cfg = config();
        let frame = PlacementFrame::lower(&cfg, cfg.egg_radius);
        let mut player = Player::new(&cfg);
        player.pos = DVec2::new(600.0, 500.0);
        let mut eggs = VecDeque::from([Egg {
            id: 1,
            pos: DVec2::new(650.0, 500.0),
            radius: 45.0,
        }]);
        move_eggs(&mut eggs, &frame, &player, &[], &[]);
        assert!((eggs[0].pos - DVec2::new(676.0, 500.0)).length() < 1e-9);
    }

    #[test]
    fn test_egg_correction_suppressed_outside_frame() {
        let cfg = config();
        let frame = PlacementFrame::lower(&cfg, cfg.egg_radius);
        let mut player = Player::new(&cfg);
        // Egg hugging the right wall; the push would shove it past the frame
        player.pos = DVec2::new(1200.0, 500.0);
        let mut eggs = VecDeque::from([Egg {
            id: 1,
            pos: DVec2::new(1230.0, 500.0),
            radius: 45.0,
        }]);
        move_eggs(&mut eggs, &frame, &player, &[], &[]);
        assert_eq!(eggs[0].pos, DVec2::new(1230.0, 500.0));
    }

    #[test]
    fn test_larva_drifts_up() {
        let cfg = config();
        let frame = PlacementFrame::larva(&cfg);
        let mut player = Player::new(&cfg);
        player.pos = DVec2::new(100.0, 100.0);
        let egg = Egg {
            id: 1,
            pos: DVec2::new(640.0, 600.0),
            radius: 45.0,
        };
        let mut larvae = [Larva::hatch(2, &egg, 40.0, 0)];
        move_larvae(&mut larvae, 0.5, &frame, &player, &[], &VecDeque::new());
        assert_eq!(larvae[0].pos, DVec2::new(640.0, 599.5));
    }

    #[test]
    fn test_larva_slides_around_obstacle() {
        let cfg = config();
        let frame = PlacementFrame::larva(&cfg);
        let mut player = Player::new(&cfg);
        player.pos = DVec2::new(100.0, 100.0);
        let egg = Egg {
            id: 1,
            pos: DVec2::new(650.0, 560.0),
            radius: 45.0,
        };
        let obstacle = Obstacle::new(3, DVec2::new(640.0, 500.0), 40.0, (0, 0), 4);
        let mut larvae = [Larva::hatch(2, &egg, 40.0, 0)];
        move_larvae(
            &mut larvae,
            0.5,
            &frame,
            &player,
            std::slice::from_ref(&obstacle),
            &VecDeque::new(),
        );
        let distance = (larvae[0].pos - obstacle.pos).length();
        assert!((distance - 81.0).abs() < 1e-9);
    }

    #[test]
    fn test_larva_not_pushed_past_score_boundary() {
        let cfg = config();
        let frame = PlacementFrame::larva(&cfg);
        assert_eq!(frame.y_min, cfg.larva_score_boundary);
        let mut player = Player::new(&cfg);
        // Player just below a larva close to the boundary, slightly to its left
        player.pos = DVec2::new(630.0, 280.0);
        let egg = Egg {
            id: 1,
            pos: DVec2::new(640.0, 240.5),
            radius: 45.0,
        };
        let mut larvae = [Larva::hatch(2, &egg, 40.0, 0)];
        move_larvae(&mut larvae, 0.5, &frame, &player, &[], &VecDeque::new());

        // The push would land above the boundary: y holds, x still slides
        let offset = DVec2::new(10.0, -40.0);
        let expected_x = 630.0 + 71.0 * offset.x / offset.length();
        assert_eq!(larvae[0].pos.y, 240.0);
        assert!((larvae[0].pos.x - expected_x).abs() < 1e-9);
        assert!(larvae[0].is_alive());
    }

    #[test]
    fn test_larva_not_pushed_past_right_edge() {
        let cfg = config();
        let frame = PlacementFrame::larva(&cfg);
        let mut player = Player::new(&cfg);
        player.pos = DVec2::new(1200.0, 500.0);
        let egg = Egg {
            id: 1,
            pos: DVec2::new(1230.0, 500.5),
            radius: 45.0,
        };
        let mut larvae = [Larva::hatch(2, &egg, 40.0, 0)];
        move_larvae(&mut larvae, 0.5, &frame, &player, &[], &VecDeque::new());

        // x = 1271 would leave the frame (x_max 1240), so the larva stays put
        assert!(1200.0 + 71.0 > frame.x_max);
        assert_eq!(larvae[0].pos, DVec2::new(1230.0, 500.0));
    }

    #[test]
    fn test_update_moves_every_kind() {
        let cfg = config();
        let mut registry = EntityRegistry::new(Player::new(&cfg));
        registry.add_enemy(DVec2::new(1000.0, 600.0), DVec2::new(-90.0, 600.0), 45.0, 2.0, 0);
        registry.add_egg(DVec2::new(200.0, 650.0), 45.0);
        let egg = registry.eggs()[0].clone();
        registry.add_larva(
            &Egg {
                pos: DVec2::new(400.0, 650.0),
                ..egg
            },
            40.0,
            0,
        );

        update(&mut registry, DVec2::new(640.0, 460.0), &cfg);

        assert_eq!(registry.player().pos, DVec2::new(640.0, 365.0));
        assert_eq!(registry.enemies()[0].pos, DVec2::new(998.0, 600.0));
        assert_eq!(registry.eggs()[0].pos, DVec2::new(200.0, 650.0));
        assert_eq!(registry.larvae()[0].pos, DVec2::new(400.0, 649.5));
    }
}
