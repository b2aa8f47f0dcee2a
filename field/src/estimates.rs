use log::warn;

/// Every estimate a cell has collected: its positional prior first, then one ratio per numeric
/// neighbour that could see it. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimates {
    values: Vec<f32>,
}

impl Estimates {
    pub(crate) fn new(prior: f32) -> Self {
        Self { values: vec![prior] }
    }

    pub(crate) fn add(&mut self, ratio: f32) {
        // upstream misreads can push this outside [0, 1]. keep it anyway
        if !(0.0..=1.0).contains(&ratio) {
            warn!("estimate {ratio} is outside [0, 1]");
        }
        self.values.push(ratio);
    }

    pub fn prior(&self) -> f32 {
        self.values[0]
    }

    /// The largest estimate. This is the cell's score, not an average.
    pub fn best(&self) -> f32 {
        self.values[1..].iter().fold(self.values[0], |best, &x| best.max(x))
    }

    pub fn is_unselectable(&self) -> bool {
        self.values.contains(&0.0)
    }

    pub fn is_certain(&self) -> bool {
        self.values.contains(&1.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false: the prior is never removed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=f32> + '_ {
        self.values.iter().copied()
    }
}
