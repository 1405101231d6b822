use egg_warden::GameConfig;
use egg_warden::sim::{
    Circle, EntityRegistry, GameState, Player, TickInput, check_collision, place_obstacles,
    resolve_push, tick,
};
use glam::DVec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

prop_compose! {
    fn arb_circle()(
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
        radius in 1.0f64..100.0
    ) -> Circle {
        Circle::new(DVec2::new(x, y), radius)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn collision_is_symmetric(a in arb_circle(), b in arb_circle(), buffer in 0.0f64..150.0) {
        let ab = check_collision(&a, &b, buffer);
        let ba = check_collision(&b, &a, buffer);
        prop_assert_eq!(ab.collided, ba.collided);
        prop_assert_eq!(ab.sum_of_radii, a.radius + b.radius);
        prop_assert!((ab.distance - ba.distance).abs() < 1e-9);
    }

    #[test]
    fn push_lands_just_outside_anchor(mover in arb_circle(), anchor in arb_circle()) {
        prop_assume!((mover.pos - anchor.pos).length() > 1e-6);

        let pos = resolve_push(&mover, &anchor);
        let expected = mover.radius + anchor.radius + 1.0;
        let distance = (pos - anchor.pos).length();
        prop_assert!((distance - expected).abs() < 1e-6, "distance {} expected {}", distance, expected);

        // Pushing again from the new spot changes nothing
        let again = resolve_push(&Circle::new(pos, mover.radius), &anchor);
        prop_assert!((again - pos).length() < 1e-6);
        prop_assert!(!check_collision(&Circle::new(pos, mover.radius), &anchor, 0.0).collided);
    }

    #[test]
    fn push_never_produces_nan(anchor in arb_circle(), radius in 1.0f64..100.0) {
        let mover = Circle::new(anchor.pos, radius);
        let pos = resolve_push(&mover, &anchor);
        prop_assert!(pos.is_finite());
    }

    #[test]
    fn obstacles_respect_spacing_and_types(
        seed in any::<u64>(),
        count in 1usize..15,
        spacing in 0.0f64..150.0
    ) {
        let config = GameConfig {
            obstacle_count: count,
            obstacle_spacing: spacing,
            ..GameConfig::default()
        };
        let mut registry = EntityRegistry::new(Player::new(&config));
        let mut rng = Pcg32::seed_from_u64(seed);
        let placed = place_obstacles(&mut registry, &config, &mut rng);

        let obstacles = registry.obstacles();
        prop_assert_eq!(placed, obstacles.len());
        prop_assert!(placed <= count);
        for (i, a) in obstacles.iter().enumerate() {
            for b in &obstacles[i + 1..] {
                prop_assert!((a.pos - b.pos).length() >= a.radius + b.radius + spacing);
                prop_assert_ne!(a.obstacle_type, b.obstacle_type);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn score_never_decreases(seed in any::<u64>(), tx in 0.0f64..1280.0, ty in 0.0f64..720.0) {
        let config = GameConfig {
            egg_incubation_ticks: 20,
            egg_spawn_interval: 10,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, seed).unwrap();
        let input = TickInput::new(tx, ty);
        let mut last = 0;
        for _ in 0..3_000 {
            tick(&mut state, &input);
            prop_assert!(state.score >= last);
            last = state.score;
            prop_assert!(state.registry.larvae().iter().all(|l| l.is_alive()));
            prop_assert!(state.registry.player().pos.is_finite());
        }
    }
}
