use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Width and height of the board, also the number of queens.
pub const BOARD_SIZE: usize = 8;
/// Bits needed to store one row index.
pub const ROW_BITS: u8 = 3;
/// Largest valid row index.
pub const MAX_ROW: u8 = (1 << ROW_BITS) - 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueensError {
    #[error("Row {row} in column {column} is outside of 0..={max}", max = MAX_ROW)]
    RowOutOfRange { column: usize, row: u8 },
}

/// One candidate board: `rows[column]` is the row of the queen standing in that column.
///
/// Queens never share a column by construction, so only rows and diagonals can clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; BOARD_SIZE]", into = "[u8; BOARD_SIZE]")]
pub struct Queens {
    rows: [u8; BOARD_SIZE],
}

/// The two children of a crossover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offspring {
    pub first: Queens,
    pub second: Queens,
}

/// Where a mutation landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationSite {
    pub column: usize,
    pub bit: u8,
}

impl Queens {
    /// Builds a board from explicit rows.
    ///
    /// # Errors
    /// `QueensError::RowOutOfRange` for the first row above `MAX_ROW`.
    pub fn from_rows(rows: [u8; BOARD_SIZE]) -> Result<Self, QueensError> {
        if let Some((column, &row)) = rows.iter().enumerate().find(|&(_, &row)| row > MAX_ROW) {
            return Err(QueensError::RowOutOfRange { column, row });
        }
        Ok(Self { rows })
    }

    /// Draws every column's row independently and uniformly.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut rows = [0u8; BOARD_SIZE];
        for row in rows.iter_mut() {
            *row = rng.random_range(0..=MAX_ROW);
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[u8; BOARD_SIZE] {
        &self.rows
    }

    /// Number of queen pairs attacking each other along a row or a diagonal.
    ///
    /// Lower is better, 0 is a solution.
    pub fn fitness(&self) -> u32 {
        let mut attacks = 0;
        for i in 0..BOARD_SIZE {
            for j in (i + 1)..BOARD_SIZE {
                let row_distance = self.rows[i].abs_diff(self.rows[j]) as usize;
                if row_distance == 0 || row_distance == j - i {
                    attacks += 1;
                }
            }
        }
        attacks
    }

    pub fn is_solution(&self) -> bool {
        self.fitness() == 0
    }

    /// Single point crossover at a uniformly drawn column in `0..BOARD_SIZE`.
    ///
    /// A point of 0 swaps the parents outright.
    pub fn crossover(&self, other: &Queens, rng: &mut impl Rng) -> Offspring {
        let point = rng.random_range(0..BOARD_SIZE);
        self.crossover_at(other, point)
    }

    /// Splices the two boards at `point`: the first child keeps `self` before the point and
    /// takes `other` from the point onward, the second child is the complement.
    ///
    /// Points past the last column are clamped, yielding plain copies.
    pub fn crossover_at(&self, other: &Queens, point: usize) -> Offspring {
        let point = point.min(BOARD_SIZE);
        let mut first = *self;
        let mut second = *other;
        first.rows[point..].copy_from_slice(&other.rows[point..]);
        second.rows[point..].copy_from_slice(&self.rows[point..]);
        Offspring { first, second }
    }

    /// Flips one random bit of one random column, moving that queen to another row.
    ///
    /// The move is not a uniform re-roll: which rows are reachable depends on the bit drawn.
    pub fn mutate(&mut self, rng: &mut impl Rng) -> MutationSite {
        let column = rng.random_range(0..BOARD_SIZE);
        let bit = rng.random_range(0..ROW_BITS);
        self.flip_bit(column, bit);
        MutationSite { column, bit }
    }

    /// Flips `bit` of the row stored in `column`. Callers keep `column < BOARD_SIZE` and
    /// `bit < ROW_BITS`.
    fn flip_bit(&mut self, column: usize, bit: u8) {
        debug_assert!(bit < ROW_BITS);
        self.rows[column] ^= 1 << bit;
    }

    /// The 3-bit encoding of each column, separated by spaces.
    pub fn bits(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("{:03b}", row))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<[u8; BOARD_SIZE]> for Queens {
    type Error = QueensError;

    fn try_from(rows: [u8; BOARD_SIZE]) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Queens> for [u8; BOARD_SIZE] {
    fn from(queens: Queens) -> Self {
        queens.rows
    }
}

/// Draws the board row by row, `Q` where a queen stands and `.` elsewhere.
impl fmt::Display for Queens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            let line = self
                .rows
                .iter()
                .map(|&queen_row| if queen_row == row { "Q" } else { "." })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solution() -> Queens {
        Queens::from_rows([0, 4, 7, 5, 2, 6, 1, 3]).unwrap()
    }

    #[test]
    fn test_known_solution_has_zero_fitness() {
        assert_eq!(solution().fitness(), 0);
        assert!(solution().is_solution());
    }

    #[test]
    fn test_all_queens_on_one_row() {
        let queens = Queens::from_rows([3; BOARD_SIZE]).unwrap();
        // every one of the 28 pairs shares the row
        assert_eq!(queens.fitness(), 28);
    }

    #[test]
    fn test_main_diagonal() {
        let queens = Queens::from_rows([0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(queens.fitness(), 28);
    }

    #[test]
    fn test_single_diagonal_clash() {
        // only columns 0 and 1 clash, on a diagonal
        let queens = Queens::from_rows([0, 1, 3, 5, 7, 2, 4, 6]).unwrap();
        assert_eq!(queens.fitness(), 1);

        // swapping two columns of the solution
        let queens = Queens::from_rows([0, 4, 7, 2, 5, 6, 1, 3]).unwrap();
        assert_eq!(queens.fitness(), 3);
    }

    #[test]
    fn test_moving_one_queen_onto_a_taken_row() {
        let queens = Queens::from_rows([1, 4, 7, 5, 2, 6, 1, 3]).unwrap();
        assert_eq!(queens.fitness(), 2);
    }

    #[test]
    fn test_repeated_row_is_never_a_solution() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let queens = Queens::random(&mut rng);
            let rows = queens.rows();
            let has_repeat = (0..BOARD_SIZE)
                .any(|i| ((i + 1)..BOARD_SIZE).any(|j| rows[i] == rows[j]));
            if has_repeat {
                assert!(queens.fitness() >= 1);
            }
        }
    }

    #[test]
    fn test_zero_fitness_iff_no_shared_row_or_diagonal() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..2000 {
            let queens = Queens::random(&mut rng);
            let rows = queens.rows();
            let clash = (0..BOARD_SIZE).any(|i| {
                ((i + 1)..BOARD_SIZE).any(|j| {
                    rows[i] == rows[j] || (rows[i] as i32 - rows[j] as i32).abs() == (j - i) as i32
                })
            });
            assert_eq!(queens.fitness() == 0, !clash);
        }
    }

    #[test]
    fn test_from_rows_rejects_out_of_range() {
        let result = Queens::from_rows([0, 1, 2, 8, 4, 5, 6, 7]);
        assert_eq!(
            result,
            Err(QueensError::RowOutOfRange { column: 3, row: 8 })
        );
    }

    #[test]
    fn test_random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let queens = Queens::random(&mut rng);
            assert!(queens.rows().iter().all(|&row| row <= MAX_ROW));
        }
    }

    #[test]
    fn test_crossover_at_zero_swaps_parents() {
        let parent1 = solution();
        let parent2 = Queens::from_rows([7, 6, 5, 4, 3, 2, 1, 0]).unwrap();

        let Offspring { first, second } = parent1.crossover_at(&parent2, 0);
        assert_eq!(first, parent2);
        assert_eq!(second, parent1);
    }

    #[test]
    fn test_crossover_at_end_copies_parents() {
        let parent1 = solution();
        let parent2 = Queens::from_rows([7, 6, 5, 4, 3, 2, 1, 0]).unwrap();

        let Offspring { first, second } = parent1.crossover_at(&parent2, BOARD_SIZE);
        assert_eq!(first, parent1);
        assert_eq!(second, parent2);

        // clamped beyond the board
        let clamped = parent1.crossover_at(&parent2, 42);
        assert_eq!(clamped.first, parent1);
    }

    #[test]
    fn test_crossover_splices_at_point() {
        let parent1 = Queens::from_rows([1; BOARD_SIZE]).unwrap();
        let parent2 = Queens::from_rows([2; BOARD_SIZE]).unwrap();

        let Offspring { first, second } = parent1.crossover_at(&parent2, 3);
        assert_eq!(first.rows(), &[1, 1, 1, 2, 2, 2, 2, 2]);
        assert_eq!(second.rows(), &[2, 2, 2, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_random_crossover_keeps_parent_material() {
        let mut rng = StdRng::seed_from_u64(9);
        let parent1 = Queens::from_rows([1; BOARD_SIZE]).unwrap();
        let parent2 = Queens::from_rows([2; BOARD_SIZE]).unwrap();

        for _ in 0..100 {
            let Offspring { first, second } = parent1.crossover(&parent2, &mut rng);
            // one contiguous prefix of parent1 followed by parent2
            let point = first.rows().iter().take_while(|&&row| row == 1).count();
            assert!(point < BOARD_SIZE);
            assert!(first.rows()[point..].iter().all(|&row| row == 2));
            assert!(second.rows()[..point].iter().all(|&row| row == 2));
            assert!(second.rows()[point..].iter().all(|&row| row == 1));
        }
    }

    #[test]
    fn test_mutation_changes_one_column_by_bit_weight() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..300 {
            let original = Queens::random(&mut rng);
            let mut mutated = original;
            let MutationSite { column, bit } = mutated.mutate(&mut rng);

            let changed: Vec<usize> = (0..BOARD_SIZE)
                .filter(|&i| original.rows()[i] != mutated.rows()[i])
                .collect();
            assert_eq!(changed, vec![column]);
            assert_eq!(
                original.rows()[column].abs_diff(mutated.rows()[column]),
                1 << bit
            );
            assert!(mutated.rows()[column] <= MAX_ROW);
        }
    }

    #[test]
    fn test_mutation_sites_stay_on_board() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut queens = solution();
        for _ in 0..1_000 {
            let MutationSite { column, bit } = queens.mutate(&mut rng);
            assert!(column < BOARD_SIZE);
            assert!(bit < ROW_BITS);
            assert!(queens.rows().iter().all(|&row| row <= MAX_ROW));
        }
    }

    #[test]
    fn test_flip_bit_twice_restores() {
        let mut queens = solution();
        queens.flip_bit(2, 1);
        assert_eq!(queens.rows()[2], 5);
        queens.flip_bit(2, 1);
        assert_eq!(queens, solution());
    }

    #[test]
    fn test_bits_rendering() {
        assert_eq!(
            solution().bits(),
            "000 100 111 101 010 110 001 011"
        );
    }

    #[test]
    fn test_board_rendering() {
        let rendered = solution().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), BOARD_SIZE);
        assert_eq!(lines[0], "Q . . . . . . .");
        assert_eq!(lines[7], ". . Q . . . . .");
        assert_eq!(rendered.matches('Q').count(), BOARD_SIZE);
    }

    #[test]
    fn test_serde_validates_rows() {
        let json = serde_json::to_string(&solution()).unwrap();
        assert_eq!(json, "[0,4,7,5,2,6,1,3]");
        let back: Queens = serde_json::from_str(&json).unwrap();
        assert_eq!(back, solution());

        let bad: Result<Queens, _> = serde_json::from_str("[0,4,7,5,2,6,1,9]");
        assert!(bad.is_err());
    }
}
