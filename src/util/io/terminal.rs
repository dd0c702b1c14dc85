// src/util/io/terminal.rs
use std::io::{self, Write};

use ratatui::crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
};

/// Terminal input modes switched on for the session: bracketed paste always,
/// keyboard enhancement when the terminal reports support for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputModes {
    pub keyboard_enhancement: bool,
}

impl InputModes {
    /// Shift+Enter is only distinguishable with the enhancement flags.
    pub fn enable<W: Write>(out: &mut W, keyboard_enhancement: bool) -> io::Result<Self> {
        if keyboard_enhancement {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }
        execute!(out, EnableBracketedPaste)?;
        Ok(Self { keyboard_enhancement })
    }

    pub fn disable<W: Write>(&self, out: &mut W) -> io::Result<()> {
        execute!(out, DisableBracketedPaste)?;
        if self.keyboard_enhancement {
            execute!(out, PopKeyboardEnhancementFlags)?;
        }
        Ok(())
    }
}

/// Runs `restore` before handing back an error, so a failed setup step never
/// leaves the terminal in raw mode.
pub fn restore_on_error<T, E>(result: Result<T, E>, restore: impl FnOnce()) -> Result<T, E> {
    if result.is_err() {
        restore();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_enable_and_disable_bracketed_paste() {
        let mut out = Vec::new();
        let modes = InputModes::enable(&mut out, false).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "\x1b[?2004h");

        out.clear();
        modes.disable(&mut out).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "\x1b[?2004l");
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result = restore_on_error(InputModes::enable(&mut BrokenPipe, false), || restored = true);
        assert!(result.is_err());
        assert!(restored);
    }

    #[test]
    fn test_successful_setup_leaves_terminal_alone() {
        let mut restored = false;
        let result = restore_on_error(InputModes::enable(&mut Vec::new(), false), || restored = true);
        assert!(result.is_ok());
        assert!(!restored);
    }
}
