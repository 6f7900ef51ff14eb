//! Terminal output for the chime

use std::io::Write;

use super::chime::{ChimeError, ChimePlayer, ChimeSpec};

/// Rings the terminal bell (BEL) once per chime
pub struct TerminalBell<W: Write> {
    out: Option<W>,
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out: Some(out) }
    }
}

impl<W: Write> ChimePlayer for TerminalBell<W> {
    fn play(&mut self, _spec: &ChimeSpec) -> Result<(), ChimeError> {
        let out = self
            .out
            .as_mut()
            .ok_or_else(|| ChimeError::Unavailable("terminal closed".into()))?;
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| ChimeError::Playback(e.to_string()))
    }

    fn close(&mut self) {
        self.out = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NOTIFICATION_CHIME;

    #[test]
    fn test_writes_bel_until_closed() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(&NOTIFICATION_CHIME).unwrap();
        bell.play(&NOTIFICATION_CHIME).unwrap();
        assert_eq!(bell.out.as_deref(), Some(&b"\x07\x07"[..]));

        bell.close();
        assert!(matches!(
            bell.play(&NOTIFICATION_CHIME),
            Err(ChimeError::Unavailable(_))
        ));
    }
}
