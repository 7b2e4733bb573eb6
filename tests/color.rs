mod tests {
    use animated_strip::color::{
        BLACK, Rgb, blend_colors, fade_step, rgb_from_u32, rgb_to_u32,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(RED, BLUE, 128),
            Rgb {
                r: 127,
                g: 0,
                b: 128
            }
        );

        assert_eq!(
            blend_colors(BLACK, WHITE, 128),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
        assert_eq!(blend_colors(WHITE, BLACK, 255), BLACK);
        assert_eq!(blend_colors(WHITE, BLACK, 0), WHITE);
    }

    #[test]
    fn test_hex_conversion() {
        assert_eq!(rgb_from_u32(0xFF3B82), Rgb::new(0xFF, 0x3B, 0x82));
        assert_eq!(rgb_to_u32(Rgb::new(0xFF, 0x3B, 0x82)), 0xFF3B82);
        assert_eq!(rgb_from_u32(0xFF00_0000), BLACK);
        assert_eq!(rgb_to_u32(BLACK), 0);
    }

    #[test]
    fn test_fade_step_converges() {
        let mut current = WHITE;
        let mut steps = 0;
        while current != BLACK {
            current = fade_step(current, BLACK, 25);
            steps += 1;
            assert!(steps < 255, "fade did not converge");
        }
    }

    #[test]
    fn test_fade_step_moves_at_least_one_unit() {
        let current = Rgb::new(10, 10, 10);
        let target = Rgb::new(11, 9, 10);
        assert_eq!(fade_step(current, target, 1), target);
    }
}
