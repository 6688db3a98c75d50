//! Key codes returned by the window's key poll.

/// Escape.
pub const KEY_ESC: u8 = 27;

/// Key poll timeout per loop iteration, in milliseconds.
pub const KEY_POLL_MS: i32 = 1;

/// Normalise a raw poll result. Negative means no key; some platforms set
/// modifier bits above the low byte, which are discarded.
pub fn normalize_key(raw: i32) -> Option<u8> {
    if raw < 0 {
        None
    } else {
        Some((raw & 0xFF) as u8)
    }
}

/// Which keys end a program's loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKeys {
    EscOnly,
    EscOrQ,
}

impl ExitKeys {
    pub fn is_exit(self, key: u8) -> bool {
        match self {
            ExitKeys::EscOnly => key == KEY_ESC,
            ExitKeys::EscOrQ => key == KEY_ESC || key.eq_ignore_ascii_case(&b'q'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_key_is_none() {
        assert_eq!(normalize_key(-1), None);
    }

    #[test]
    fn modifier_bits_are_masked() {
        assert_eq!(normalize_key(0x10_0000 | 27), Some(KEY_ESC));
        assert_eq!(normalize_key(b'c' as i32), Some(b'c'));
    }

    #[test]
    fn exit_key_sets() {
        assert!(ExitKeys::EscOnly.is_exit(KEY_ESC));
        assert!(!ExitKeys::EscOnly.is_exit(b'q'));
        assert!(ExitKeys::EscOrQ.is_exit(b'q'));
        assert!(ExitKeys::EscOrQ.is_exit(b'Q'));
        assert!(ExitKeys::EscOrQ.is_exit(KEY_ESC));
        assert!(!ExitKeys::EscOrQ.is_exit(b'c'));
    }
}
