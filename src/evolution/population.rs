use crate::evolution::queens::Queens;
use rand::Rng;

/// An ordered, fixed capacity collection of boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Population {
    members: Vec<Queens>,
    capacity: usize,
}

impl Population {
    /// An empty population that will hold at most `capacity` boards.
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Fills a population of `size` independently drawn random boards.
    pub fn random(size: usize, rng: &mut impl Rng) -> Self {
        Self {
            members: (0..size).map(|_| Queens::random(rng)).collect(),
            capacity: size,
        }
    }

    /// Starts the next generation with `elite` as its only member.
    pub fn with_elite(elite: Queens, capacity: usize) -> Self {
        let mut members = Vec::with_capacity(capacity);
        members.push(elite);
        Self { members, capacity }
    }

    /// Appends `queens` unless the population is already full.
    ///
    /// # Returns
    /// * `bool` - whether the board was admitted
    pub fn admit(&mut self, queens: Queens) -> bool {
        if self.is_full() {
            return false;
        }
        self.members.push(queens);
        true
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn members(&self) -> &[Queens] {
        &self.members
    }

    /// The board with the fewest attacks; ties go to the earliest member.
    pub fn best(&self) -> Option<&Queens> {
        self.members.iter().min_by_key(|queens| queens.fitness())
    }

    pub fn fitnesses(&self) -> Vec<u32> {
        self.members.iter().map(Queens::fitness).collect()
    }

    /// Copy of the members ordered from fewest to most attacks, ties kept in encounter order.
    pub fn sorted_by_fitness(&self) -> Vec<Queens> {
        let mut sorted = self.members.clone();
        sorted.sort_by_key(Queens::fitness);
        sorted
    }
}
