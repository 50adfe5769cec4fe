//! Opponent targeting: picks the next cell to attack against a fog-of-war view
//! of the opponent board and updates its search state from each result.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use log::{debug, trace};
use rand::Rng;

use crate::{
    board::TargetView,
    common::{AttackResult, Coord},
};

/// Targeting policy selected for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Uniform random search.
    Easy,
    /// Breadth-first hunt around every hit.
    Medium,
    /// Directional persistence along a hit stack.
    Hard,
    /// Most-recently-exposed neighbours first.
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

/// Current search mode of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchMode {
    /// No active lead; attack at random.
    Search,
    /// Expanding outwards from confirmed hits.
    Hunt,
    /// Following a compass direction from the most recent hit.
    DirectionalFollow,
}

/// Cyclic direction order used by directional follow-up: east, south, west, north.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Orthogonal neighbour order used when queueing hunt candidates: up, down, left, right.
const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn offset(size: usize, (row, col): Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
    let r = row.checked_add_signed(dr)?;
    let c = col.checked_add_signed(dc)?;
    if r < size && c < size {
        Some((r, c))
    } else {
        None
    }
}

/// Unattacked orthogonal neighbours of `coord` in [`NEIGHBOURS`] order.
fn open_neighbours<V: TargetView + ?Sized>(
    view: &V,
    coord: Coord,
) -> impl Iterator<Item = Coord> + '_ {
    NEIGHBOURS
        .iter()
        .filter_map(move |&d| offset(view.size(), coord, d))
        .filter(move |&(r, c)| view.is_open(r, c))
}

/// Pick an unattacked cell uniformly at random. Returns `None` once every cell
/// has been attacked.
pub fn random_open_cell<V: TargetView + ?Sized, R: Rng + ?Sized>(
    view: &V,
    rng: &mut R,
) -> Option<Coord> {
    let size = view.size();
    let open: Vec<Coord> = (0..size)
        .flat_map(|r| (0..size).map(move |c| (r, c)))
        .filter(|&(r, c)| view.is_open(r, c))
        .collect();
    if open.is_empty() {
        None
    } else {
        Some(open[rng.random_range(0..open.len())])
    }
}

/// Stateful opponent AI.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    difficulty: Difficulty,
    mode: SearchMode,
    /// Hunt queue (Medium, popped from the front) or priority list (Expert,
    /// fed and popped at the front).
    candidates: VecDeque<Coord>,
    /// Hits of the ship currently pursued by directional follow-up.
    hits: Vec<Coord>,
    /// Index into [`DIRECTIONS`].
    direction: usize,
    /// Directions already exhausted for the hit on top of `hits`.
    failed_directions: usize,
}

impl TargetingEngine {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            mode: SearchMode::Search,
            candidates: VecDeque::new(),
            hits: Vec::new(),
            direction: 0,
            failed_directions: 0,
        }
    }

    /// Back to `Search` with no candidates or hits.
    pub fn reset(&mut self) {
        self.mode = SearchMode::Search;
        self.candidates.clear();
        self.hits.clear();
        self.direction = 0;
        self.failed_directions = 0;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Pending candidates, next first.
    pub fn candidates(&self) -> impl Iterator<Item = Coord> + '_ {
        self.candidates.iter().copied()
    }

    /// Hits being followed by directional follow-up, most recent last.
    pub fn hit_stack(&self) -> &[Coord] {
        &self.hits
    }

    fn set_mode(&mut self, mode: SearchMode) {
        if self.mode != mode {
            debug!("{:?} targeting: {:?} -> {:?}", self.difficulty, self.mode, mode);
            self.mode = mode;
        }
    }

    /// Choose the next cell to attack. Never returns an attacked cell; returns
    /// `None` only when the whole grid has been attacked.
    pub fn next_target<V: TargetView + ?Sized, R: Rng + ?Sized>(
        &mut self,
        view: &V,
        rng: &mut R,
    ) -> Option<Coord> {
        let target = match self.difficulty {
            Difficulty::Easy => None,
            Difficulty::Medium | Difficulty::Expert => self.pop_candidate(view),
            Difficulty::Hard => self.follow_direction(view),
        };
        match target {
            Some(coord) => Some(coord),
            None => {
                self.set_mode(SearchMode::Search);
                random_open_cell(view, rng)
            }
        }
    }

    /// Pop the first still-open candidate, discarding stale ones.
    fn pop_candidate<V: TargetView + ?Sized>(&mut self, view: &V) -> Option<Coord> {
        while let Some((r, c)) = self.candidates.pop_front() {
            if view.is_open(r, c) {
                return Some((r, c));
            }
            trace!("discarding resolved candidate ({}, {})", r, c);
        }
        None
    }

    /// Walk the hit stack looking for an open cell in the current direction.
    /// Each step either returns or rotates the direction, so the loop is bounded
    /// by four attempts per stacked hit.
    fn follow_direction<V: TargetView + ?Sized>(&mut self, view: &V) -> Option<Coord> {
        let budget = DIRECTIONS.len() * self.hits.len();
        for _ in 0..budget {
            let &last = self.hits.last()?;
            if let Some((r, c)) = offset(view.size(), last, DIRECTIONS[self.direction]) {
                if view.is_open(r, c) {
                    return Some((r, c));
                }
            }
            self.rotate_direction();
        }
        None
    }

    /// Give up on the current direction. After all four fail for the top hit,
    /// drop it and restart directions on the previous one.
    fn rotate_direction(&mut self) {
        self.direction = (self.direction + 1) % DIRECTIONS.len();
        self.failed_directions += 1;
        if self.failed_directions >= DIRECTIONS.len() {
            if let Some((r, c)) = self.hits.pop() {
                trace!("directions exhausted around ({}, {})", r, c);
            }
            self.direction = 0;
            self.failed_directions = 0;
            if self.hits.is_empty() {
                self.set_mode(SearchMode::Search);
            }
        }
    }

    /// Update search state from the result of attacking `coord`. `sunk` reports
    /// that the hit completed a ship.
    pub fn record<V: TargetView + ?Sized>(
        &mut self,
        view: &V,
        coord: Coord,
        result: AttackResult,
        sunk: bool,
    ) {
        if result == AttackResult::AlreadyAttacked {
            return;
        }
        if sunk {
            debug!("ship sunk at {:?}, resuming search", coord);
            self.reset();
            return;
        }
        let hit = result == AttackResult::Hit;
        match self.difficulty {
            Difficulty::Easy => {}
            Difficulty::Medium => {
                if hit {
                    for n in open_neighbours(view, coord) {
                        if !self.candidates.contains(&n) {
                            self.candidates.push_back(n);
                        }
                    }
                    self.set_mode(SearchMode::Hunt);
                } else if self.candidates.iter().all(|&(r, c)| !view.is_open(r, c)) {
                    self.candidates.clear();
                    self.set_mode(SearchMode::Search);
                }
            }
            Difficulty::Hard => {
                if hit {
                    self.hits.push(coord);
                    self.failed_directions = 0;
                    self.set_mode(SearchMode::DirectionalFollow);
                } else if self.mode == SearchMode::DirectionalFollow {
                    self.rotate_direction();
                }
            }
            Difficulty::Expert => {
                if hit {
                    if self.mode == SearchMode::Search {
                        self.candidates.clear();
                        self.candidates.extend(open_neighbours(view, coord));
                    } else {
                        let fresh: Vec<Coord> = open_neighbours(view, coord)
                            .filter(|n| !self.candidates.contains(n))
                            .collect();
                        for n in fresh.into_iter().rev() {
                            self.candidates.push_front(n);
                        }
                    }
                    self.set_mode(SearchMode::Hunt);
                } else if self.candidates.iter().all(|&(r, c)| !view.is_open(r, c)) {
                    self.candidates.clear();
                    self.set_mode(SearchMode::Search);
                }
            }
        }
    }
}
