use rand::Rng;

/// The decorative "Recruiters Scouting Live" badge value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveCounter {
    seed: i64,
    value: i64,
}

impl LiveCounter {
    pub fn new(seed: i64) -> Self {
        LiveCounter { seed, value: seed }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Moves the value one step up or down with equal odds and returns it.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> i64 {
        self.value += if rng.gen_bool(0.5) { 1 } else { -1 };
        self.value
    }
}
