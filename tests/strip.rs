mod tests {
    use std::sync::Arc;

    use animated_strip::color::{BLACK, ColorGradient, Rgb, rgb_from_u32};
    use animated_strip::{Section, Strip, StripError};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    #[test]
    fn test_new_strip_is_black() {
        let strip = Strip::new(4);
        assert_eq!(strip.len(), 4);
        assert_eq!(strip.snapshot(), vec![BLACK; 4]);
        assert_eq!(strip.prolonged_snapshot(), vec![BLACK; 4]);
    }

    #[test]
    fn test_actual_and_revert() {
        let strip = Strip::new(3);
        strip.set_prolonged(1, BLUE).unwrap();
        strip.set_actual(1, RED).unwrap();

        let state = strip.get(1).unwrap();
        assert_eq!(state.prolonged, BLUE);
        assert_eq!(state.actual, RED);

        strip.revert(1).unwrap();
        assert_eq!(strip.get(1).unwrap().actual, BLUE);
    }

    #[test]
    fn test_set_prolonged_is_displayed() {
        let strip = Strip::new(2);
        strip.set_actual(0, RED).unwrap();
        strip.set_prolonged(0, BLUE).unwrap();
        assert_eq!(strip.snapshot()[0], BLUE);
    }

    #[test]
    fn test_out_of_range() {
        let strip = Strip::new(3);
        assert_eq!(
            strip.set_actual(3, RED),
            Err(StripError::OutOfRange { pixel: 3, len: 3 })
        );
        assert!(strip.revert(10).is_err());
        assert_eq!(strip.actual_or_none(3), None);
        assert_eq!(strip.snapshot(), vec![BLACK; 3]);
    }

    #[test]
    fn test_pixel_hex() {
        let strip = Strip::new(1);
        strip.set_actual(0, rgb_from_u32(0xFF3B82)).unwrap();
        assert_eq!(strip.pixel_hex(0).unwrap(), "ff3b82");
    }

    #[test]
    fn test_pixel_lists() {
        let strip = Strip::new(4);
        strip.set_pixels_prolonged(&[0, 2], BLUE).unwrap();
        strip.set_pixels_actual(&[0, 1], RED).unwrap();
        assert_eq!(strip.snapshot(), vec![RED, RED, BLUE, BLACK]);

        strip.revert_pixels(&[0, 1]).unwrap();
        assert_eq!(strip.snapshot(), vec![BLUE, BLACK, BLUE, BLACK]);
    }

    #[test]
    fn test_strip_prolonged_with_offset() {
        let strip = Strip::new(4);
        let gradient = ColorGradient::new(vec![RED, BLUE]).expand(4);
        strip.set_strip_prolonged_with_offset(&gradient, 1);
        assert_eq!(strip.prolonged_snapshot(), vec![BLUE, RED, RED, BLUE]);
    }

    #[test]
    fn test_section_translates_indices() {
        let strip = Arc::new(Strip::new(6));
        let section = Section::from_indices(Arc::clone(&strip), vec![5, 1, 3]).unwrap();
        assert_eq!(section.len(), 3);

        section.set_prolonged(0, RED).unwrap();
        section.set_actual(2, BLUE).unwrap();
        assert_eq!(strip.get(5).unwrap().prolonged, RED);
        assert_eq!(strip.get(3).unwrap().actual, BLUE);
        assert_eq!(
            section.set_actual(3, RED),
            Err(StripError::Index { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_section_rejects_unknown_pixels() {
        let strip = Arc::new(Strip::new(2));
        assert_eq!(
            Section::from_indices(strip, vec![0, 2]).unwrap_err(),
            StripError::OutOfRange { pixel: 2, len: 2 }
        );
    }

    #[test]
    fn test_sub_sections() {
        let section = Section::whole(Arc::new(Strip::new(7)));

        let forward = section.sub_section(1, 4).unwrap();
        assert_eq!(forward.physical_indices(), &[1, 2, 3, 4]);

        let backward = section.sub_section(6, 5).unwrap();
        assert_eq!(backward.physical_indices(), &[6, 5]);

        let single = section.sub_section(3, 3).unwrap();
        assert_eq!(single.physical_indices(), &[3]);

        let nested = backward.sub_section(1, 0).unwrap();
        assert_eq!(nested.physical_indices(), &[5, 6]);

        assert!(section.sub_section(0, 7).is_err());
    }

    #[test]
    fn test_section_iteration_is_restartable() {
        let section = Section::whole(Arc::new(Strip::new(3)));
        let indices = section.iter();
        assert_eq!(indices.clone().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(indices.collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_section_gradient() {
        let strip = Arc::new(Strip::new(4));
        let section = Section::whole(Arc::clone(&strip)).sub_section(3, 0).unwrap();
        section
            .set_prolonged_colors(&ColorGradient::new(vec![RED, BLUE]).expand(4))
            .unwrap();
        assert_eq!(strip.snapshot(), vec![BLUE, BLUE, RED, RED]);
        assert_eq!(section.snapshot().unwrap(), vec![RED, RED, BLUE, BLUE]);
    }
}
