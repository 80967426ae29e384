use std::collections::HashMap;

use crate::input::InputState;
use crate::key::Key;

/// A platform event reduced to what the engine cares about.
///
/// `code` is the backend's native key code, looked up in a [`KeyMap`].
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RawEvent {
    Quit,
    KeyDown { code: i32, repeat: bool },
    KeyUp { code: i32, repeat: bool },
}

/// Lookup table from native key codes to [`Key`]s.
///
/// Backends ship a default table; callers can extend it with extra codes
/// (other layouts, keypad aliases) before it is handed to the engine.
#[derive(Clone, Debug, Default)]
pub struct KeyMap {
    codes: HashMap<i32, Key>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_table(table: &[(i32, Key)]) -> Self {
        Self {
            codes: table.iter().copied().collect(),
        }
    }

    pub fn with(mut self, code: i32, key: Key) -> Self {
        self.insert(code, key);
        self
    }

    /// Maps `code` to `key`, returning the key it was mapped to before.
    pub fn insert(&mut self, code: i32, key: Key) -> Option<Key> {
        self.codes.insert(code, key)
    }

    #[inline]
    pub fn get(&self, code: i32) -> Option<Key> {
        self.codes.get(&code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns true when every [`Key`] is reachable from at least one code.
    pub fn covers_all_keys(&self) -> bool {
        let mut seen = [false; Key::COUNT];
        for key in self.codes.values() {
            seen[key.index()] = true;
        }
        seen.iter().all(|s| *s)
    }
}

/// What a single [`RawEvent`] did to the input state.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Translation {
    Quit,
    /// The flag for `key` flipped to `pressed`.
    Changed { key: Key, pressed: bool },
    /// A recognised key that was already in the requested state.
    Unchanged(Key),
    /// Auto-repeat or a code missing from the key map.
    Ignored,
}

/// Applies raw events to an [`InputState`] through a fixed [`KeyMap`].
#[derive(Clone, Debug)]
pub struct EventTranslator {
    key_map: KeyMap,
}

impl EventTranslator {
    pub fn new(key_map: KeyMap) -> Self {
        Self { key_map }
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn translate(&self, event: RawEvent, input: &mut InputState) -> Translation {
        let (code, pressed) = match event {
            RawEvent::Quit => return Translation::Quit,
            RawEvent::KeyDown { repeat: true, .. } | RawEvent::KeyUp { repeat: true, .. } => {
                return Translation::Ignored
            }
            RawEvent::KeyDown { code, .. } => (code, true),
            RawEvent::KeyUp { code, .. } => (code, false),
        };

        let Some(key) = self.key_map.get(code) else {
            log::trace!("ignoring unmapped key code {}", code);
            return Translation::Ignored;
        };

        if input.set(key, pressed) == pressed {
            Translation::Unchanged(key)
        } else {
            Translation::Changed { key, pressed }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i32 = 'w' as i32;
    const UNKNOWN: i32 = 0x4000_0100;

    fn translator() -> EventTranslator {
        EventTranslator::new(KeyMap::from_table(&[(W, Key::W), ('a' as i32, Key::A)]))
    }

    #[test]
    fn quit_leaves_input_alone() {
        let mut input = InputState::new();
        assert_eq!(translator().translate(RawEvent::Quit, &mut input), Translation::Quit);
        assert!(!input.any_pressed());
    }

    #[test]
    fn press_repeat_release() {
        let translator = translator();
        let mut input = InputState::new();

        let down = translator.translate(RawEvent::KeyDown { code: W, repeat: false }, &mut input);
        assert_eq!(down, Translation::Changed { key: Key::W, pressed: true });
        assert!(input.is_pressed(Key::W));

        let repeat = translator.translate(RawEvent::KeyDown { code: W, repeat: true }, &mut input);
        assert_eq!(repeat, Translation::Ignored);
        assert!(input.is_pressed(Key::W));

        let up = translator.translate(RawEvent::KeyUp { code: W, repeat: false }, &mut input);
        assert_eq!(up, Translation::Changed { key: Key::W, pressed: false });
        assert!(!input.is_pressed(Key::W));
    }

    #[test]
    fn repeated_release_is_ignored() {
        let translator = translator();
        let mut input = InputState::new();
        translator.translate(RawEvent::KeyDown { code: W, repeat: false }, &mut input);
        let up = translator.translate(RawEvent::KeyUp { code: W, repeat: true }, &mut input);
        assert_eq!(up, Translation::Ignored);
        assert!(input.is_pressed(Key::W));
    }

    #[test]
    fn second_press_without_release_is_unchanged() {
        let translator = translator();
        let mut input = InputState::new();
        translator.translate(RawEvent::KeyDown { code: W, repeat: false }, &mut input);
        let again = translator.translate(RawEvent::KeyDown { code: W, repeat: false }, &mut input);
        assert_eq!(again, Translation::Unchanged(Key::W));
        assert!(input.is_pressed(Key::W));
    }

    #[test]
    fn unknown_codes_are_ignored() {
        let mut input = InputState::new();
        let result =
            translator().translate(RawEvent::KeyDown { code: UNKNOWN, repeat: false }, &mut input);
        assert_eq!(result, Translation::Ignored);
        assert!(!input.any_pressed());
    }

    #[test]
    fn key_map_can_be_extended() {
        let map = KeyMap::from_table(&[(W, Key::W)]).with(UNKNOWN, Key::Up);
        assert_eq!(map.get(UNKNOWN), Some(Key::Up));
        assert_eq!(map.len(), 2);
        assert!(!map.covers_all_keys());

        let full = KeyMap::from_table(
            &Key::ALL
                .iter()
                .enumerate()
                .map(|(i, k)| (i as i32, *k))
                .collect::<Vec<_>>(),
        );
        assert!(full.covers_all_keys());
    }
}
