use anyhow::Result;
use itertools::Itertools;
use log::{debug, info, warn};
use minroob_field::{FieldError, MessageId, Outcome, Player, Position, Sessions, Strategy};
use rand::Rng;
use std::thread;
use std::time::Duration;

use crate::host::{Host, Joined};
use crate::replay::{Event, Update};

pub const BUTTONS_INVALID: &str = "Buttons row invalid.";
pub const GAME_ENDED: &str = "Game is ended!";
pub const JOINED: &str = "I'm here!";
pub const MAYBE_JOINED: &str = "I may be here or not.";

pub struct Config {
    pub first_name: String,
    pub bot: String,
    pub strategy: Strategy,
    /// Wait before every click so the moves look human.
    pub delay: Duration,
    /// Upper bound of a random extra wait on top of `delay`.
    pub jitter: Duration,
    pub max_sessions: usize,
}

pub struct Orchestrator {
    config: Config,
    sessions: Sessions,
}

impl Orchestrator {
    pub fn new(config: Config) -> Self {
        let sessions = Sessions::new(config.max_sessions);
        Self { config, sessions }
    }

    pub fn sessions(&self) -> &Sessions {
        &self.sessions
    }

    /// React to one message update. Only host failures are errors; a bad render is reported
    /// and the session carries on with the next update.
    pub fn handle(&mut self, update: &Update, host: &mut impl Host) -> Result<()> {
        if update.via_bot.as_deref() != Some(self.config.bot.as_str()) {
            debug!("ignoring message {} not sent via {}", update.message, self.config.bot);
            return Ok(());
        }
        match update.event {
            Event::Posted => self.join(update.message, host),
            Event::Edited => self.play(update, host),
            Event::Forced => {
                info!("game {}: asked to move", update.message);
                self.play(update, host)
            },
        }
    }

    fn join(&mut self, message: MessageId, host: &mut impl Host) -> Result<()> {
        let text = match host.join(message)? {
            Joined::Yes => JOINED,
            Joined::Maybe => MAYBE_JOINED,
        };
        host.reply(message, text)
    }

    fn play(&mut self, update: &Update, host: &mut impl Host) -> Result<()> {
        let message = update.message;
        if update.keyboard.is_empty() {
            debug!("message {message} has no keyboard");
            return Ok(());
        }
        let outcome = self.sessions.observe(
            message,
            &self.config.first_name,
            update.play_area(),
            update.indicators(),
            self.config.strategy,
        );

        if let (Ok(_), Some(game)) = (&outcome, self.sessions.get(message)) {
            let board = game.board();
            debug!(
                "game {message}, blue {} red {}:\n{board}",
                board.marker_count(Player::Blue),
                board.marker_count(Player::Red),
            );
        }

        match outcome {
            Ok(Outcome::Click(position)) => self.click(message, position, host)?,
            Ok(Outcome::Waiting) => debug!("game {message}: not our turn"),
            Ok(Outcome::Ended) => host.reply(message, GAME_ENDED)?,
            Err(e @ (FieldError::MalformedGrid(_) | FieldError::RaggedRow { .. })) => {
                warn!("game {message}: {e}");
                host.reply(message, BUTTONS_INVALID)?;
            },
            Err(e @ FieldError::NoEligibleCell) => info!("game {message}: {e}"),
            Err(e @ FieldError::UnknownLabel(_)) => warn!("game {message}: {e}"),
        }
        Ok(())
    }

    fn click(&self, message: MessageId, position: Position, host: &mut impl Host) -> Result<()> {
        self.pause();
        if let Some(cell) = self.sessions.get(message).and_then(|game| game.board().get(position)) {
            info!(
                "game {message}: clicking on {position} with estimates {}",
                cell.estimates().iter().join(", "),
            );
        }
        host.click(message, position.x, position.y)
    }

    fn pause(&self) {
        let jitter = match self.config.jitter.as_millis() as u64 {
            0 => Duration::ZERO,
            max => Duration::from_millis(rand::rng().random_range(0..=max)),
        };
        let wait = self.config.delay + jitter;
        if !wait.is_zero() {
            thread::sleep(wait);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ReplayHost;
    use crate::replay::{join_timeouts, parse};

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(Config {
            first_name: "Alice".to_owned(),
            bot: "minroobot".to_owned(),
            strategy: Strategy::Densest,
            delay: Duration::ZERO,
            jitter: Duration::ZERO,
            max_sessions: 8,
        })
    }

    fn keyboard(rows: &[&str]) -> String {
        rows.join("\n")
    }

    const HIDDEN: &str = "⬜️|⬜️|⬜️|⬜️|⬜️|⬜️|⬜️";

    fn run(recording: &str) -> (Orchestrator, String) {
        let mut orchestrator = orchestrator();
        let updates = parse(recording).unwrap();
        let mut host = ReplayHost::new(Vec::new()).with_join_timeouts(join_timeouts(&updates));
        for update in &updates {
            orchestrator.handle(update, &mut host).unwrap();
        }
        (orchestrator, String::from_utf8(host.into_inner()).unwrap())
    }

    fn game(play_area: &[&str], indicators: &str) -> String {
        let mut rows = play_area.to_vec();
        rows.push(indicators);
        rows.push("Leave");
        format!("edited 5 via minroobot\n{}\n", keyboard(&rows))
    }

    #[test]
    fn joins_new_games() {
        let (_, out) = run("posted 5 via minroobot\nJoin\n");
        assert_eq!(out, "5: join\n5: reply \"I'm here!\"\n");
    }

    #[test]
    fn join_may_have_failed() {
        let (_, out) = run("posted 5 via minroobot timeout\nJoin\n");
        assert_eq!(out, "5: join (timed out)\n5: reply \"I may be here or not.\"\n");
    }

    #[test]
    fn ignores_other_bots() {
        let (orchestrator, out) = run("posted 5 via otherbot\nJoin\n\nedited 5\nJoin\n");
        assert!(out.is_empty());
        assert!(orchestrator.sessions().is_empty());
    }

    #[test]
    fn clicks_on_our_turn() {
        let mut area = [HIDDEN; 8];
        area[3] = "⬜️|⬜️|⬜️|2|⬜️|⬜️|⬜️";
        let (orchestrator, out) = run(&game(&area, "🎮B Alice|🎮R Bob"));
        assert_eq!(out, "5: click row 2 button 2\n");
        assert_eq!(orchestrator.sessions().get(5).unwrap().tracker().my_marker(), Some('B'));
    }

    #[test]
    fn waits_for_the_other_player() {
        let (orchestrator, out) = run(&game(&[HIDDEN; 8], "🎮R Bob"));
        assert!(out.is_empty());
        assert!(orchestrator.sessions().contains(5));
    }

    #[test]
    fn too_few_rows() {
        let (orchestrator, out) = run(&game(&[HIDDEN; 6], "🎮B Alice"));
        assert_eq!(out, "5: reply \"Buttons row invalid.\"\n");
        assert!(!orchestrator.sessions().contains(5));
    }

    #[test]
    fn no_keyboard() {
        let (orchestrator, out) = run("edited 5 via minroobot\n");
        assert!(out.is_empty());
        assert!(orchestrator.sessions().is_empty());
    }

    #[test]
    fn ragged_rows() {
        let mut area = [HIDDEN; 8];
        area[4] = "⬜️|⬜️";
        let (_, out) = run(&game(&area, "🎮B Alice"));
        assert_eq!(out, "5: reply \"Buttons row invalid.\"\n");
    }

    #[test]
    fn game_over() {
        let mut area = [HIDDEN; 8];
        area[7] = "⬜️|⬜️|💣|⬜️|⬜️|⬜️|⬜️";
        let recording = format!("{}\n{}", game(&[HIDDEN; 8], "🎮R Bob"), game(&area, "🎮B Alice"));
        let (orchestrator, out) = run(&recording);
        assert_eq!(out, "5: reply \"Game is ended!\"\n");
        assert!(orchestrator.sessions().is_empty());
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let mut area = [HIDDEN; 8];
        area[0] = "⬜️|?|⬜️|⬜️|⬜️|⬜️|⬜️";
        let recording = format!("{}\n{}", game(&area, "🎮B Alice"), game(&[HIDDEN; 8], "🎮B Alice"));
        let (_, out) = run(&recording);
        // the second update still plays, the corner of the inner ring first
        assert_eq!(out, "5: click row 1 button 1\n");
    }

    #[test]
    fn forced_play_uses_the_last_board() {
        let mut area = [HIDDEN; 8];
        area[3] = "⬜️|⬜️|⬜️|2|⬜️|⬜️|⬜️";
        let recording = format!("{}\nplay 5\n", game(&area, "🎮R Bob"));
        let (_, out) = run(&recording);
        assert!(out.is_empty());

        let recording = format!("{}\nplay 5\n", game(&area, "🎮B Alice"));
        let (_, out) = run(&recording);
        assert_eq!(out, "5: click row 2 button 2\n5: click row 2 button 2\n");
    }
}
