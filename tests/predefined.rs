mod tests {
    use std::sync::Arc;

    use animated_strip::animation::predefined::{self, PARAM_INTER_MOVEMENT_DELAY};
    use animated_strip::color::{BLACK, Rgb};
    use animated_strip::{
        AnimationCatalog, ColorGradient, AnimationDefinition, AnimationInfo, AnimationParams, Direction, Duration,
        Engine, FadeTimings, StripConfig, StripError, ValidationError,
    };
    use parking_lot::Mutex;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const TIMEOUT: Duration = Duration::from_secs(10);

    fn config(num_leds: usize) -> StripConfig {
        StripConfig::new(num_leds)
            .with_thread_count(8)
            .with_fade(FadeTimings {
                amount_of_overlay: 25,
                step_delay: Duration::from_millis(1),
            })
    }

    fn wait_for_fades(engine: &Engine) {
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while engine.active_fades() > 0 && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        assert_eq!(engine.active_fades(), 0);
    }

    fn run(engine: &Engine, params: AnimationParams) {
        let handle = engine.start(params, &engine.whole_strip()).unwrap();
        assert_eq!(handle.join_timeout(TIMEOUT), Some(Ok(())));
    }

    #[test]
    fn test_bounce_windows() {
        type Calls = Arc<Mutex<Vec<(Vec<usize>, Direction)>>>;
        let calls: Calls = Arc::default();
        let recorded = Arc::clone(&calls);

        let mut catalog = AnimationCatalog::new();
        catalog.register(predefined::bounce());
        catalog.register(AnimationDefinition::new(
            AnimationInfo::new(predefined::ANIMATION_NAME_PIXEL_RUN, "PXR")
                .with_minimum_colors(1)
                .directional(),
            move |section, params, _ctx| {
                recorded
                    .lock()
                    .push((section.physical_indices().to_vec(), params.direction()));
                Ok(())
            },
        ));
        let engine = Engine::new(config(7), catalog).unwrap();

        run(
            &engine,
            AnimationParams::new("Bounce")
                .add_color(RED)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0)
                .run_count(1),
        );
        wait_for_fades(&engine);

        let calls = calls.lock();
        let windows: Vec<(usize, usize, Direction)> = calls
            .iter()
            .map(|(indices, direction)| (indices[0], indices[indices.len() - 1], *direction))
            .collect();
        assert_eq!(
            windows,
            vec![
                (0, 6, Direction::Forward),
                (0, 5, Direction::Backward),
                (1, 5, Direction::Forward),
                (1, 4, Direction::Backward),
                (2, 4, Direction::Forward),
                (2, 3, Direction::Backward),
            ]
        );
        assert!(calls.iter().flat_map(|(indices, _)| indices).all(|&pixel| pixel <= 6));
        assert_eq!(engine.strip().snapshot(), vec![BLACK; 7]);
    }

    #[test]
    fn test_bounce_requires_delay() {
        let engine = Engine::with_predefined(config(4)).unwrap();
        let error = engine
            .start(AnimationParams::new("BNC").add_color(RED), &engine.whole_strip())
            .unwrap_err();
        assert_eq!(
            error,
            StripError::Validation(ValidationError::MissingParameter {
                animation: "Bounce".into(),
                key: PARAM_INTER_MOVEMENT_DELAY.into(),
            })
        );
    }

    #[test]
    fn test_bounce_with_pixel_run() {
        let engine = Engine::with_predefined(config(5)).unwrap();
        engine.whole_strip().fill_prolonged(BLUE).unwrap();
        run(
            &engine,
            AnimationParams::new("Bounce")
                .add_color(RED)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0)
                .run_count(1),
        );
        wait_for_fades(&engine);
        assert_eq!(engine.strip().snapshot(), vec![BLUE; 5]);
    }

    #[test]
    fn test_color() {
        let engine = Engine::with_predefined(config(4)).unwrap();
        run(
            &engine,
            AnimationParams::new("Color").add_color(ColorGradient::new(vec![RED, BLUE])),
        );
        assert_eq!(engine.strip().snapshot(), vec![RED, RED, BLUE, BLUE]);
    }

    #[test]
    fn test_pixel_run_leaves_strip_untouched() {
        let engine = Engine::with_predefined(config(3)).unwrap();
        run(
            &engine,
            AnimationParams::new("Pixel Run")
                .add_color(RED)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0)
                .direction(Direction::Backward),
        );
        assert_eq!(engine.strip().snapshot(), vec![BLACK; 3]);
    }

    #[test]
    fn test_stack_fills_section() {
        let engine = Engine::with_predefined(config(4)).unwrap();
        run(
            &engine,
            AnimationParams::new("Stack")
                .add_color(RED)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0),
        );
        assert_eq!(engine.strip().prolonged_snapshot(), vec![RED; 4]);
        assert_eq!(engine.strip().snapshot(), vec![RED; 4]);
    }

    #[test]
    fn test_stack_overflow() {
        let engine = Engine::with_predefined(config(6)).unwrap();
        run(
            &engine,
            AnimationParams::new("Stack Overflow")
                .add_color(RED)
                .add_color(BLUE)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0)
                .run_count(1),
        );
        let colors = engine.strip().prolonged_snapshot();
        assert_eq!(colors.len(), 6);
        assert!(colors.iter().all(|&c| c == RED || c == BLUE));
    }

    #[test]
    fn test_wipe_covers_every_pixel() {
        let engine = Engine::with_predefined(config(5)).unwrap();
        run(
            &engine,
            AnimationParams::new("Wipe")
                .add_color(BLUE)
                .int_param(PARAM_INTER_MOVEMENT_DELAY, 0)
                .double_param(predefined::PARAM_MOVEMENT_PER_ITERATION, 1.0),
        );
        assert_eq!(engine.strip().snapshot(), vec![BLUE; 5]);
    }

    #[test]
    fn test_wipe_on_sub_section() {
        let engine = Engine::with_predefined(config(6)).unwrap();
        let section = engine.whole_strip().sub_section(4, 1).unwrap();
        let handle = engine
            .start(
                AnimationParams::new("WIP")
                    .add_color(ColorGradient::new(vec![RED, BLUE]))
                    .int_param(PARAM_INTER_MOVEMENT_DELAY, 0),
                &section,
            )
            .unwrap();
        assert_eq!(handle.join_timeout(TIMEOUT), Some(Ok(())));
        assert_eq!(
            engine.strip().snapshot(),
            vec![BLACK, BLUE, BLUE, RED, RED, BLACK]
        );
    }
}
