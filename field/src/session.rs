use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::board::{Board, Position, COLUMNS};
use crate::error::{FieldError, Result};
use crate::judges::Strategy;
use crate::turn::TurnTracker;

/// Identity of the chat message a game is rendered in.
pub type MessageId = i64;

/// Everything known about one hosted game.
#[derive(Clone, Debug)]
pub struct GameSession {
    first_name: String,
    board: Board,
    tracker: TurnTracker,
}

impl GameSession {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self { first_name: first_name.into(), board: Board::new(), tracker: TurnTracker::new() }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tracker(&self) -> &TurnTracker {
        &self.tracker
    }

    /// Rebuild the board from `play_area`, then decide from `indicators` whether to move.
    /// Gives the cell to click if it is our turn.
    ///
    /// A label the classifier does not know leaves the previous board in place.
    pub fn observe<R, S, T>(&mut self, play_area: &[R], indicators: &[T], strategy: Strategy) -> Result<Option<Position>>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut board = Board::reconstruct(play_area)?;
        board.propagate();
        self.board = board;

        self.tracker.decide(&self.first_name, indicators);
        if !self.tracker.is_my_turn() {
            return Ok(None);
        }
        self.board.choose(strategy).map(|cell| Some(cell.position()))
    }
}

/// What a single observed update amounts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Somebody hit the explosion. The session has been dropped.
    Ended,
    /// Not our turn.
    Waiting,
    Click(Position),
}

/// Live games by message, oldest-observed evicted first once `capacity` is reached.
#[derive(Debug)]
pub struct Sessions {
    games: FxHashMap<MessageId, (GameSession, u64)>,
    capacity: usize,
    clock: u64,
}

impl Sessions {
    pub fn new(capacity: usize) -> Self {
        Self { games: FxHashMap::default(), capacity: capacity.max(1), clock: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.games.contains_key(&id)
    }

    pub fn get(&self, id: MessageId) -> Option<&GameSession> {
        self.games.get(&id).map(|(game, _)| game)
    }

    pub fn get_or_create(&mut self, id: MessageId, first_name: &str) -> &mut GameSession {
        self.clock += 1;
        if !self.games.contains_key(&id) && self.games.len() >= self.capacity {
            let oldest = self.games.iter().min_by_key(|(_, (_, seen))| *seen).map(|(&k, _)| k);
            if let Some(oldest) = oldest {
                info!("evicting game {oldest}");
                self.games.remove(&oldest);
            }
        }
        let clock = self.clock;
        let (game, seen) = self.games.entry(id).or_insert_with(|| {
            info!("tracking game {id}");
            (GameSession::new(first_name), clock)
        });
        *seen = clock;
        game
    }

    pub fn end(&mut self, id: MessageId) -> Option<GameSession> {
        self.games.remove(&id).map(|(game, _)| {
            info!("game {id} is over");
            game
        })
    }

    /// Run one update of game `id`: `play_area` is the keyboard minus its trailing rows and
    /// `indicators` is the turn indicator row.
    pub fn observe<R, S, T>(&mut self, id: MessageId, first_name: &str, play_area: &[R], indicators: &[T], strategy: Strategy) -> Result<Outcome>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        if play_area.len() < COLUMNS {
            return Err(FieldError::MalformedGrid(play_area.len()));
        }

        if Board::has_end_game_marker(play_area) {
            self.end(id);
            return Ok(Outcome::Ended);
        }

        let outcome = match self.get_or_create(id, first_name).observe(play_area, indicators, strategy)? {
            Some(position) => Outcome::Click(position),
            None => Outcome::Waiting,
        };
        debug!("game {id}: {outcome:?}");
        Ok(outcome)
    }
}
