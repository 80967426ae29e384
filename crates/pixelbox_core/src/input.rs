use crate::key::Key;

/// Current pressed/released state of every [`Key`].
///
/// Client code reads it from the update and render callbacks. Only the
/// [`crate::EventTranslator`] writes to it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InputState {
    pressed: [bool; Key::COUNT],
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pressed: [false; Key::COUNT],
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Keys that are currently held, in [`Key::ALL`] order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.is_pressed(*k))
    }

    pub fn any_pressed(&self) -> bool {
        self.pressed.iter().any(|p| *p)
    }

    /// Stores the flag and returns the previous value.
    pub(crate) fn set(&mut self, key: Key, pressed: bool) -> bool {
        std::mem::replace(&mut self.pressed[key.index()], pressed)
    }
}
