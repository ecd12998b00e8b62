//! Dijkstra over (position, facing) configurations.

use super::{Maze, Tile};
use crate::utils::direction::Direction;
use crate::utils::grid::Grid;
use crate::utils::point::Point;
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};

pub type Cost = u64;

pub const STEP_COST: Cost = 1;
pub const TURN_COST: Cost = 1000;

/// The reindeer always starts facing east.
pub const START_FACING: Direction = Direction::RIGHT;

/// A node of the search graph. Two configurations on the same cell differ
/// when their facing differs, since turning is not free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Configuration {
    pub position: Point,
    pub facing: Direction,
}

impl Configuration {
    pub const fn new(position: Point, facing: Direction) -> Self {
        Self { position, facing }
    }

    pub fn turned_clockwise(self) -> Self {
        Self::new(self.position, self.facing.rotate_clockwise())
    }

    pub fn turned_counter_clockwise(self) -> Self {
        Self::new(self.position, self.facing.rotate_counter_clockwise())
    }

    /// One step forward, keeping the facing.
    pub fn stepped(self, steps: isize) -> Self {
        Self::new(self.facing.move_point(self.position, steps), self.facing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Stop once any configuration on the end tile is settled.
    UntilEnd,
    /// Settle every reachable configuration.
    Exhaustive,
}

/// Settled cost of every configuration the search finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceMap {
    settled: HashMap<Configuration, Cost>,
}

impl DistanceMap {
    pub fn get(&self, config: &Configuration) -> Option<Cost> {
        self.settled.get(config).copied()
    }

    pub fn len(&self) -> usize {
        self.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Configuration, &Cost)> + '_ {
        self.settled.iter()
    }

    /// Cheapest settled cost over all four facings at `position`.
    pub fn lowest_cost_at(&self, position: Point) -> Option<Cost> {
        Direction::CARDINALS
            .into_iter()
            .filter_map(|facing| self.get(&Configuration::new(position, facing)))
            .min()
    }
}

pub(super) fn is_open(grid: &Grid<Tile>, position: Point) -> bool {
    grid.get_point(position).is_some_and(|tile| *tile != Tile::Wall)
}

/// Outgoing edges: forward onto an open tile, or a quarter turn either way.
fn successors(
    grid: &Grid<Tile>,
    config: Configuration,
) -> impl Iterator<Item = (Configuration, Cost)> {
    let forward = config.stepped(1);
    let forward = is_open(grid, forward.position).then_some((forward, STEP_COST));

    [
        forward,
        Some((config.turned_clockwise(), TURN_COST)),
        Some((config.turned_counter_clockwise(), TURN_COST)),
    ]
    .into_iter()
    .flatten()
}

/// Minimum cost from the start configuration to every configuration settled
/// before the search stops.
///
/// Uses lazy deletion instead of decrease-key: a configuration may sit in
/// the heap several times, and only its first pop counts.
pub fn shortest_distances(maze: &Maze, mode: SearchMode) -> DistanceMap {
    let start = Configuration::new(maze.start(), START_FACING);
    let end = maze.end();

    let mut tentative: HashMap<Configuration, Cost> = HashMap::from([(start, 0)]);
    let mut settled: HashMap<Configuration, Cost> = HashMap::new();
    let mut heap = BinaryHeap::from([Reverse((0, start))]);

    while let Some(Reverse((cost, config))) = heap.pop() {
        if settled.contains_key(&config) {
            continue;
        }
        settled.insert(config, cost);

        if mode == SearchMode::UntilEnd && config.position == end {
            break;
        }

        for (next, edge_cost) in successors(maze.grid(), config) {
            if settled.contains_key(&next) {
                continue;
            }
            let next_cost = cost + edge_cost;
            match tentative.entry(next) {
                Entry::Occupied(mut best) if next_cost < *best.get() => {
                    best.insert(next_cost);
                }
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    slot.insert(next_cost);
                }
            }
            heap.push(Reverse((next_cost, next)));
        }
    }

    log::debug!(
        "settled {} configurations ({} pushed, {:?})",
        settled.len(),
        tentative.len(),
        mode
    );

    DistanceMap { settled }
}
