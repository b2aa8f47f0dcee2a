use anyhow::{anyhow, bail, Context, Result};
use minroob_field::MessageId;

/// How a game message reached us.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A game was just posted and can be joined.
    Posted,
    /// The game message was edited, usually because somebody moved.
    Edited,
    /// We were asked to move on a game message we already saw, as it was last rendered.
    Forced,
}

/// One recorded message update: the message it belongs to and its whole inline keyboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub event: Event,
    pub message: MessageId,
    pub via_bot: Option<String>,
    pub keyboard: Vec<Vec<String>>,
    /// Clicking the join button of this posted game timed out.
    pub join_timed_out: bool,
}

impl Update {
    /// The board part of the keyboard. The last two rows are the indicator row and controls.
    pub fn play_area(&self) -> &[Vec<String>] {
        &self.keyboard[..self.keyboard.len().saturating_sub(2)]
    }

    pub fn indicators(&self) -> &[String] {
        match self.keyboard.len() {
            0 | 1 => &[],
            n => &self.keyboard[n - 2],
        }
    }
}

/// Posted games whose join timed out.
pub fn join_timeouts(updates: &[Update]) -> Vec<MessageId> {
    updates.iter().filter(|u| u.join_timed_out).map(|u| u.message).collect()
}

fn parse_header(line: &str) -> Result<Option<Update>> {
    let mut words = line.split_whitespace();
    let event = match words.next() {
        Some("posted") => Event::Posted,
        Some("edited") => Event::Edited,
        Some("play") => Event::Forced,
        _ => return Ok(None),
    };
    let message = words.next().ok_or_else(|| anyhow!("missing message id"))?;
    let message: MessageId = message.parse().with_context(|| format!("bad message id {message:?}"))?;
    let rest: Vec<&str> = words.collect();
    let (via_bot, join_timed_out) = match (event, rest.as_slice()) {
        (Event::Forced, []) => (None, false),
        (Event::Forced, _) => bail!("trailing text after `play <id>`"),
        (_, []) => (None, false),
        (_, ["via", bot]) => (Some(bot.to_string()), false),
        (Event::Posted, ["timeout"]) => (None, true),
        (Event::Posted, ["via", bot, "timeout"]) => (Some(bot.to_string()), true),
        _ => bail!("expected `via <bot>` after the message id"),
    };
    Ok(Some(Update { event, message, via_bot, keyboard: Vec::new(), join_timed_out }))
}

/// Read a recording: header lines start an update and are followed by its keyboard rows, with
/// the buttons of a row separated by `|`. Labels are kept exactly as written.
///
/// `play <id>` takes no rows: it repeats the last keyboard recorded for that message.
pub fn parse(text: &str) -> Result<Vec<Update>> {
    let mut updates: Vec<Update> = Vec::new();
    let mut open = false;

    for (i, line) in text.lines().enumerate() {
        let lineno = i + 1;
        if line.starts_with('#') {
            continue;
        }
        if line.trim().is_empty() {
            open = false;
            continue;
        }
        if let Some(mut update) = parse_header(line).with_context(|| format!("line {lineno}"))? {
            open = update.event != Event::Forced;
            if !open {
                let last = updates.iter().rev()
                    .find(|u| u.message == update.message && !u.keyboard.is_empty())
                    .ok_or_else(|| anyhow!("line {lineno}: no keyboard recorded for message {}", update.message))?;
                update.via_bot = last.via_bot.clone();
                update.keyboard = last.keyboard.clone();
            }
            updates.push(update);
            continue;
        }
        match updates.last_mut() {
            Some(update) if open => update.keyboard.push(line.split('|').map(str::to_owned).collect()),
            _ => bail!("line {lineno}: button row outside of an update"),
        }
    }

    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDING: &str = "\
# a game being joined, then played
posted 42 via minroobot
Join

edited 42 via minroobot
⬜️|⬜️| |1|🔴|⬜️|⬜️
🎮B Alice|🎮R Bob
Leave
";

    #[test]
    fn reads_updates() {
        let updates = parse(RECORDING).unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].event, Event::Posted);
        assert_eq!(updates[0].message, 42);
        assert_eq!(updates[0].via_bot.as_deref(), Some("minroobot"));
        assert_eq!(updates[1].event, Event::Edited);
        assert_eq!(updates[1].keyboard.len(), 3);
    }

    #[test]
    fn blank_labels_survive() {
        let updates = parse(RECORDING).unwrap();
        assert_eq!(updates[1].keyboard[0][2], " ");
        assert_eq!(updates[1].keyboard[0][3], "1");
    }

    #[test]
    fn keyboard_layout() {
        let updates = parse(RECORDING).unwrap();
        assert_eq!(updates[1].play_area().len(), 1);
        assert_eq!(updates[1].indicators(), ["🎮B Alice", "🎮R Bob"]);
        assert!(updates[0].play_area().is_empty());
        assert!(updates[0].indicators().is_empty());
    }

    #[test]
    fn no_bot() {
        let updates = parse("edited 7\nx\n").unwrap();
        assert_eq!(updates[0].via_bot, None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("edited seven\n").is_err());
        assert!(parse("edited 7 by minroobot\n").is_err());
        assert!(parse("edited 7 via minroobot now\n").is_err());
        assert!(parse("⬜️|⬜️\n").is_err());
        assert!(parse("edited 7\nx\n\ny\n").is_err());
        assert!(parse("edited 7 timeout\n").is_err());
        assert!(parse("play 7 via minroobot\n").is_err());
    }

    #[test]
    fn join_timeout() {
        let updates = parse("posted 3 via minroobot timeout\nJoin\n\nposted 4 via minroobot\nJoin\n").unwrap();
        assert!(updates[0].join_timed_out);
        assert_eq!(updates[0].via_bot.as_deref(), Some("minroobot"));
        assert!(!updates[1].join_timed_out);
        assert_eq!(join_timeouts(&updates), [3]);
    }

    #[test]
    fn forced_play_repeats_the_last_keyboard() {
        let text = format!("{RECORDING}\nedited 43 via minroobot\nx\n\nplay 42\n");
        let updates = parse(&text).unwrap();
        let forced = &updates[3];
        assert_eq!(forced.event, Event::Forced);
        assert_eq!(forced.via_bot.as_deref(), Some("minroobot"));
        assert_eq!(forced.keyboard, updates[1].keyboard);
    }

    #[test]
    fn forced_play_needs_a_keyboard() {
        assert!(parse("play 42\n").is_err());
        assert!(parse("posted 42\n\nplay 42\n").is_err());
        assert!(parse("edited 42\nx\n\nplay 42\ny\n").is_err());
    }
}
