mod tests {
    use animated_strip::{
        AnimationCatalog, AnimationDefinition, AnimationInfo, AnimationParams, Duration, Engine,
        StripConfig, StripError,
    };

    const TIMEOUT: Duration = Duration::from_secs(10);

    fn engine() -> Engine {
        let mut catalog = AnimationCatalog::new();
        catalog.register(AnimationDefinition::new(
            AnimationInfo::new("Spin", "SPN").with_run_count_default(-1),
            |_section, _params, ctx| ctx.delay(Duration::from_millis(5)),
        ));
        Engine::new(StripConfig::new(2).with_thread_count(4), catalog).unwrap()
    }

    #[test]
    fn test_get_ids_entries() {
        let engine = engine();
        let b = engine
            .start(AnimationParams::new("Spin").id("b"), &engine.whole_strip())
            .unwrap();
        let a = engine
            .start(AnimationParams::new("Spin").id("a"), &engine.whole_strip())
            .unwrap();
        let registry = engine.registry();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids(), vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(registry.get("a"), Some(a.clone()));
        assert!(registry.get("c").is_none());

        let entries = registry.entries();
        assert_eq!(entries[0].0, "a");
        assert_eq!(entries[1].1, b);

        a.cancel();
        b.cancel();
        assert!(a.join_timeout(TIMEOUT).is_some());
        assert!(b.join_timeout(TIMEOUT).is_some());
    }

    #[test]
    fn test_register_and_remove() {
        let engine = engine();
        let handle = engine
            .start(AnimationParams::new("Spin").id("spin"), &engine.whole_strip())
            .unwrap();
        let registry = engine.registry();

        assert_eq!(
            registry.register("spin", handle.clone()),
            Err(StripError::DuplicateId("spin".into()))
        );
        registry.register("alias", handle.clone()).unwrap();
        assert!(registry.contains("alias"));
        assert_eq!(registry.remove("alias"), Some(handle.clone()));
        assert!(!registry.contains("alias"));

        handle.cancel();
        assert_eq!(handle.join_timeout(TIMEOUT), Some(Err(StripError::Cancelled)));
        // a finished instance no longer blocks its id
        registry.register("spin", handle.clone()).unwrap();
    }

    #[test]
    fn test_remove_all_cancels() {
        let engine = engine();
        let handles: Vec<_> = (0..3)
            .map(|i| {
                engine
                    .start(
                        AnimationParams::new("Spin").id(format!("spin-{i}")),
                        &engine.whole_strip(),
                    )
                    .unwrap()
            })
            .collect();

        let removed = engine.registry().remove_all();
        assert_eq!(removed.len(), 3);
        assert!(engine.registry().is_empty());
        for handle in &handles {
            assert_eq!(handle.join_timeout(TIMEOUT), Some(Err(StripError::Cancelled)));
            assert!(handle.is_terminal());
        }
    }
}
