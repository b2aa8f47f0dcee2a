use anyhow::Result;
use minroob_field::MessageId;
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Joined {
    Yes,
    /// The join click timed out, so it may or may not have landed.
    Maybe,
}

/// The chat client, as far as the player needs one.
pub trait Host {
    /// Press the join button of a freshly posted game.
    fn join(&mut self, message: MessageId) -> Result<Joined>;
    /// Press button `button` of keyboard row `row`.
    fn click(&mut self, message: MessageId, row: usize, button: usize) -> Result<()>;
    fn reply(&mut self, message: MessageId, text: &str) -> Result<()>;
}

/// Stands in for the chat client when replaying a recording: actions are written out.
pub struct ReplayHost<W> {
    out: W,
    join_timeouts: Vec<MessageId>,
}

impl<W: Write> ReplayHost<W> {
    pub fn new(out: W) -> Self {
        Self { out, join_timeouts: Vec::new() }
    }

    /// Joining any of `messages` times out instead of succeeding.
    pub fn with_join_timeouts(self, messages: Vec<MessageId>) -> Self {
        Self { join_timeouts: messages, ..self }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Host for ReplayHost<W> {
    fn join(&mut self, message: MessageId) -> Result<Joined> {
        if self.join_timeouts.contains(&message) {
            writeln!(self.out, "{message}: join (timed out)")?;
            return Ok(Joined::Maybe);
        }
        writeln!(self.out, "{message}: join")?;
        Ok(Joined::Yes)
    }

    fn click(&mut self, message: MessageId, row: usize, button: usize) -> Result<()> {
        writeln!(self.out, "{message}: click row {row} button {button}")?;
        Ok(())
    }

    fn reply(&mut self, message: MessageId, text: &str) -> Result<()> {
        writeln!(self.out, "{message}: reply {text:?}")?;
        Ok(())
    }
}
