mod tests {
    use animated_strip::color::{BLACK, ColorGradient, rgb_from_u32};

    const KEYS: [u32; 6] = [0x0000FF, 0x00FFFF, 0xFF00FF, 0x00FF00, 0xFF0000, 0xFFFFFF];

    fn hex(colors: &[u32]) -> Vec<animated_strip::Rgb> {
        colors.iter().copied().map(rgb_from_u32).collect()
    }

    #[test]
    fn test_expand_to_key_count_keeps_order() {
        let expanded = ColorGradient::from_hex(&KEYS).expand(6);
        assert_eq!(expanded.colors(), hex(&KEYS).as_slice());
    }

    #[test]
    fn test_rotate() {
        let expanded = ColorGradient::from_hex(&KEYS).expand(6);
        let rotated = expanded.rotate(4);
        assert_eq!(
            rotated.colors(),
            hex(&[0xFF00FF, 0x00FF00, 0xFF0000, 0xFFFFFF, 0x0000FF, 0x00FFFF]).as_slice()
        );
        assert_eq!(expanded.rotate(10), rotated);
        assert_eq!(expanded.rotate(-2), rotated);
        assert_eq!(rotated.rotate(-4), expanded);
    }

    #[test]
    fn test_expand_spreads_keys() {
        let gradient = ColorGradient::from_hex(&[0xFF0000, 0x0000FF]);
        let expanded = gradient.expand(5);
        assert_eq!(
            expanded.colors(),
            hex(&[0xFF0000, 0xFF0000, 0xFF0000, 0x0000FF, 0x0000FF]).as_slice()
        );

        let shrunk = ColorGradient::from_hex(&KEYS).expand(3);
        assert_eq!(shrunk.colors(), hex(&[0x0000FF, 0xFF00FF, 0xFF0000]).as_slice());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(ColorGradient::from_hex(&KEYS).expand(0).is_empty());
        assert!(ColorGradient::from_hex(&KEYS).expand(0).rotate(3).is_empty());

        let black = ColorGradient::default().expand(4);
        assert_eq!(black.colors(), [BLACK; 4].as_slice());
    }

    #[test]
    fn test_get_past_end_is_black() {
        let expanded = ColorGradient::from(0xFF3B82).expand(2);
        assert_eq!(expanded.get(1), rgb_from_u32(0xFF3B82));
        assert_eq!(expanded.get(2), BLACK);
        assert_eq!(expanded.color_at(2), None);
    }

    #[test]
    fn test_contains() {
        let expanded = ColorGradient::from_hex(&KEYS).expand(12);
        assert!(expanded.contains(rgb_from_u32(0xFF0000)));
        assert!(!expanded.contains(rgb_from_u32(0x123456)));
    }

    #[test]
    fn test_equality_uses_content_and_length() {
        let gradient = ColorGradient::from_hex(&[0xFF0000]);
        assert_ne!(gradient.expand(3), gradient.expand(4));
        assert_eq!(gradient.expand(3), ColorGradient::from_hex(&[0xFF0000; 2]).expand(3));
    }

    #[test]
    fn test_prepare_reexpands_original() {
        let gradient = ColorGradient::from_hex(&[0xFF0000, 0x0000FF]);
        let expanded = gradient.expand(2);
        assert_eq!(expanded.prepare(4), gradient.expand(4));
        assert_eq!(expanded.prepare(2), expanded);
        assert_eq!(expanded.prepare(4).original(), &gradient);
    }

    #[test]
    fn test_display() {
        let expanded = ColorGradient::from_hex(&[0xFF3B82, 0xFFFFFF, 0x0]).expand(3);
        assert_eq!(expanded.to_string(), "[ff3b82, ffffff, 0]");
    }
}
