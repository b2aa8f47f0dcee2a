use log::debug;

use crate::labels::indicator_code;

/// Works out from the indicator row whether it is our move.
///
/// The color code is learned the first time our name shows up in an indicator and is trusted
/// from then on, whatever names the row shows later.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnTracker {
    my_marker: Option<char>,
    turn_decided: bool,
    my_turn: bool,
}

impl TurnTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn my_marker(&self) -> Option<char> {
        self.my_marker
    }

    pub fn turn_decided(&self) -> bool {
        self.turn_decided
    }

    pub fn is_my_turn(&self) -> bool {
        self.my_turn
    }

    /// Scan the whole row. Before our color is known, an indicator ending in `first_name` makes it
    /// our turn and teaches us its color; with several such indicators the last one wins. Once the
    /// color is known, it is our turn if any indicator carries it.
    pub fn decide<S: AsRef<str>>(&mut self, first_name: &str, row: &[S]) {
        let known = self.my_marker;
        let mut my_turn = false;

        for label in row {
            let label = label.as_ref();
            let Some(code) = indicator_code(label) else { continue };
            match known {
                None => if label.ends_with(first_name) {
                    my_turn = true;
                    self.my_marker = Some(code);
                },
                Some(mine) => if code == mine {
                    my_turn = true;
                },
            }
        }

        if known.is_none() {
            if let Some(code) = self.my_marker {
                debug!("{first_name} plays as {code}");
            }
        }
        self.my_turn = my_turn;
        self.turn_decided = true;
    }
}
