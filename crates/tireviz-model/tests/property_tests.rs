//! Property-Based Tests for the wear model
//!
//! These check the model invariants across a wide range of inputs.

use tireviz_model::prelude::*;

fn direction_from(index: u8) -> LoadDirection {
    match index % 5 {
        0 => LoadDirection::LateralPositive,
        1 => LoadDirection::LateralNegative,
        2 => LoadDirection::LongitudinalPositive,
        3 => LoadDirection::LongitudinalNegative,
        _ => LoadDirection::Unspecified,
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn zones_stay_in_unit_range(
            updates in prop::collection::vec((-5_000.0f32..5_000.0f32, any::<u8>()), 1..200)
        ) {
            let mut tire = TireState::default();
            for (load, dir) in updates {
                tire.update(load, direction_from(dir));
                for zone in Zone::ALL {
                    let value = tire.zone(zone);
                    prop_assert!((0.0..=1.0).contains(&value),
                        "{zone} escaped unit range: {value}");
                }
            }
        }

        #[test]
        fn zero_load_decay_never_increases(
            warmup in prop::collection::vec((0.0f32..10_000.0f32, any::<u8>()), 1..50),
            steps in 1usize..500,
        ) {
            let mut tire = TireState::default();
            for (load, dir) in warmup {
                tire.update(load, direction_from(dir));
            }

            for _ in 0..steps {
                let before = Zone::ALL.map(|zone| tire.zone(zone));
                tire.update(0.0, LoadDirection::Unspecified);
                for (zone, prev) in Zone::ALL.into_iter().zip(before) {
                    let now = tire.zone(zone);
                    prop_assert!(now >= 0.0);
                    if prev > 0.0 {
                        prop_assert!(now < prev, "{zone}: {now} !< {prev}");
                    } else {
                        prop_assert!(now <= 0.0);
                    }
                }
            }
        }

        #[test]
        fn clamp_to_circle_preserves_direction(
            lateral in -20.0f32..20.0f32,
            longitudinal in -20.0f32..20.0f32,
        ) {
            let display = GForceDisplay::default();
            let g = NormalizedGForce::new(lateral, longitudinal);
            let point = display.project(g);

            let raw_x = lateral / 3.0 * 90.0;
            let raw_y = -longitudinal / 3.0 * 90.0;
            let raw_distance = raw_x.hypot(raw_y);

            prop_assert!(point.distance() <= 90.0 + 1e-3);
            if raw_distance > 90.0 + 1e-3 {
                prop_assert!(point.clamped);
                prop_assert!((point.distance() - 90.0).abs() < 1e-3);
                // Same direction: zero cross product, positive dot product.
                let cross = point.x * raw_y - point.y * raw_x;
                let dot = point.x * raw_x + point.y * raw_y;
                prop_assert!(cross.abs() <= 1e-3 * raw_distance);
                prop_assert!(dot > 0.0);
            } else if raw_distance < 90.0 - 1e-3 {
                prop_assert!(!point.clamped);
                prop_assert!((point.x - raw_x).abs() < 1e-4);
                prop_assert!((point.y - raw_y).abs() < 1e-4);
            }
        }

        #[test]
        fn session_ticks_keep_every_tire_bounded(
            samples in prop::collection::vec(
                (-60.0f32..60.0f32, -60.0f32..60.0f32, -90.0f32..90.0f32, any::<bool>()),
                1..300,
            )
        ) {
            let mut session = Session::default();
            for (lat, long, vel_x, connected) in samples {
                let sample = TelemetrySample::from_accel(lat, long).with_velocity(vel_x, 0.0, 0.0);
                session.tick(connected, &sample);
            }
            for (_, tire) in session.tires().iter() {
                for zone in Zone::ALL {
                    prop_assert!((0.0..=1.0).contains(&tire.zone(zone)));
                }
            }
        }

        #[test]
        fn routing_never_exceeds_four_updates(
            lateral in -3.0f32..3.0f32,
            longitudinal in -3.0f32..3.0f32,
        ) {
            let distributor = LoadDistributor::default();
            let normalizer = GForceNormalizer::default();
            let g = NormalizedGForce::new(lateral, longitudinal);
            let plan = distributor.plan(g, normalizer.load_magnitudes(g, Velocity::default()));

            let expected = usize::from(lateral != 0.0) * 2 + usize::from(longitudinal != 0.0) * 2;
            prop_assert_eq!(plan.len(), expected);
        }

        #[test]
        fn indicator_color_is_symmetric(lateral in -4.0f32..4.0f32) {
            let scale = IndicatorScale::default();
            prop_assert_eq!(scale.color_for(lateral), scale.color_for(-lateral));
            prop_assert_eq!(scale.color_for(lateral).b, 0);
        }
    }
}
