use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
///
/// Indexed by keypad slot.
const KEYPAD: [Keycode; 16] = [
    Keycode::X,
    Keycode::Num1,
    Keycode::Num2,
    Keycode::Num3,
    Keycode::Q,
    Keycode::W,
    Keycode::E,
    Keycode::A,
    Keycode::S,
    Keycode::D,
    Keycode::Z,
    Keycode::C,
    Keycode::Num4,
    Keycode::R,
    Keycode::F,
    Keycode::V,
];

/// The keypad slot a physical key drives, if any.
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYPAD
        .iter()
        .position(|&mapped| mapped == key)
        .map(|slot| slot as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_layout() {
        assert_eq!(keymap(Keycode::X), Some(0x0));
        assert_eq!(keymap(Keycode::Num1), Some(0x1));
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::R), Some(0xD));
        assert_eq!(keymap(Keycode::V), Some(0xF));
    }

    #[test]
    fn test_keymap_every_slot() {
        let pairs = [
            (Keycode::X, 0x0),
            (Keycode::Num1, 0x1),
            (Keycode::Num2, 0x2),
            (Keycode::Num3, 0x3),
            (Keycode::Q, 0x4),
            (Keycode::W, 0x5),
            (Keycode::E, 0x6),
            (Keycode::A, 0x7),
            (Keycode::S, 0x8),
            (Keycode::D, 0x9),
            (Keycode::Z, 0xA),
            (Keycode::C, 0xB),
            (Keycode::Num4, 0xC),
            (Keycode::R, 0xD),
            (Keycode::F, 0xE),
            (Keycode::V, 0xF),
        ];
        for &(key, slot) in pairs.iter() {
            assert_eq!(keymap(key), Some(slot));
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(Keycode::Space), None);
        assert_eq!(keymap(Keycode::Num0), None);
    }
}
