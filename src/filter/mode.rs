use std::fmt;

use crate::keys::ExitKeys;

/// Per-frame transform selected from the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Raw (mirrored) camera feed.
    #[default]
    Preview,
    /// Box blur.
    Blur,
    /// Corner feature detector with circle overlays.
    Features,
    /// Canny edge map.
    Canny,
    /// Edge-preserving bilateral smoothing.
    Bilateral,
}

impl FilterMode {
    pub const ALL: [FilterMode; 5] = [
        FilterMode::Preview,
        FilterMode::Blur,
        FilterMode::Features,
        FilterMode::Canny,
        FilterMode::Bilateral,
    ];

    /// Mode bound to a key, case-insensitive.
    pub fn from_key(key: u8) -> Option<Self> {
        match key.to_ascii_lowercase() {
            b'p' => Some(FilterMode::Preview),
            b'b' => Some(FilterMode::Blur),
            b'f' => Some(FilterMode::Features),
            b'c' => Some(FilterMode::Canny),
            b'l' => Some(FilterMode::Bilateral),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterMode::Preview => "preview",
            FilterMode::Blur => "blur",
            FilterMode::Features => "features",
            FilterMode::Canny => "canny",
            FilterMode::Bilateral => "bilateral",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of feeding one key to the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Exit,
    Switched(FilterMode),
    Ignored,
}

/// Flat mode selector. Every mode key jumps straight to its mode; there are
/// no guards and no terminal state.
#[derive(Clone, Debug)]
pub struct ModeSelector {
    current: FilterMode,
    exit_keys: ExitKeys,
}

impl ModeSelector {
    pub fn new(exit_keys: ExitKeys) -> Self {
        Self {
            current: FilterMode::Preview,
            exit_keys,
        }
    }

    pub fn current(&self) -> FilterMode {
        self.current
    }

    /// Apply one key press. Exit keys win over mode keys.
    pub fn on_key(&mut self, key: u8) -> KeyAction {
        if self.exit_keys.is_exit(key) {
            return KeyAction::Exit;
        }
        match FilterMode::from_key(key) {
            Some(mode) => {
                self.current = mode;
                KeyAction::Switched(mode)
            }
            None => KeyAction::Ignored,
        }
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(ExitKeys::EscOrQ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KEY_ESC;

    #[test]
    fn starts_in_preview() {
        assert_eq!(ModeSelector::default().current(), FilterMode::Preview);
    }

    #[test]
    fn mode_keys_are_case_insensitive() {
        for (lower, mode) in [
            (b'p', FilterMode::Preview),
            (b'b', FilterMode::Blur),
            (b'f', FilterMode::Features),
            (b'c', FilterMode::Canny),
            (b'l', FilterMode::Bilateral),
        ] {
            let mut selector = ModeSelector::default();
            assert_eq!(selector.on_key(lower), KeyAction::Switched(mode));
            assert_eq!(selector.current(), mode);

            let mut selector = ModeSelector::default();
            assert_eq!(
                selector.on_key(lower.to_ascii_uppercase()),
                KeyAction::Switched(mode)
            );
            assert_eq!(selector.current(), mode);
        }
    }

    #[test]
    fn every_mode_reachable_from_every_mode() {
        for from in FilterMode::ALL {
            for to in FilterMode::ALL {
                let mut selector = ModeSelector::default();
                selector.current = from;
                let key = match to {
                    FilterMode::Preview => b'P',
                    FilterMode::Blur => b'B',
                    FilterMode::Features => b'F',
                    FilterMode::Canny => b'C',
                    FilterMode::Bilateral => b'L',
                };
                selector.on_key(key);
                assert_eq!(selector.current(), to, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut selector = ModeSelector::default();
        selector.on_key(b'c');
        selector.on_key(b'c');
        selector.on_key(b'C');
        assert_eq!(selector.current(), FilterMode::Canny);
    }

    #[test]
    fn other_keys_leave_mode_unchanged() {
        let mut selector = ModeSelector::default();
        selector.on_key(b'b');
        for key in (0u8..=255).filter(|k| FilterMode::from_key(*k).is_none()) {
            if ExitKeys::EscOrQ.is_exit(key) {
                continue;
            }
            assert_eq!(selector.on_key(key), KeyAction::Ignored);
            assert_eq!(selector.current(), FilterMode::Blur);
        }
    }

    #[test]
    fn exit_keys_do_not_touch_mode() {
        let mut selector = ModeSelector::default();
        selector.on_key(b'f');
        assert_eq!(selector.on_key(KEY_ESC), KeyAction::Exit);
        assert_eq!(selector.on_key(b'q'), KeyAction::Exit);
        assert_eq!(selector.on_key(b'Q'), KeyAction::Exit);
        assert_eq!(selector.current(), FilterMode::Features);
    }
}
