//! Recover every tile lying on some cheapest path.

use super::Tile;
use super::search::{Configuration, Cost, DistanceMap, STEP_COST, TURN_COST, is_open};
use crate::utils::direction::Direction;
use crate::utils::grid::Grid;
use crate::utils::point::Point;
use std::collections::HashSet;

/// Walks backwards from every end configuration costing `cost`, following
/// only edges that are tight in `distances`, and marks each tile it visits
/// as [`Tile::Seat`]. Returns the number of seats on the grid afterwards.
///
/// `distances` must come from an exhaustive search; configurations missing
/// from it are treated as unreachable.
pub fn mark_seats(
    seating: &mut Grid<Tile>,
    distances: &DistanceMap,
    end: Point,
    cost: Cost,
) -> usize {
    let mut frontier: Vec<Configuration> = Direction::CARDINALS
        .into_iter()
        .map(|facing| Configuration::new(end, facing))
        .filter(|config| distances.get(config) == Some(cost))
        .collect();
    let mut visited = HashSet::new();

    while let Some(config) = frontier.pop() {
        if !visited.insert(config) {
            continue;
        }
        let Some(dist) = distances.get(&config) else {
            continue;
        };

        if let Some(tile) = seating.get_point_mut(config.position) {
            *tile = Tile::Seat;
        }

        // Arrived here by turning: the previous facing is one quarter turn away.
        if let Some(before_turn) = dist.checked_sub(TURN_COST) {
            for prev in [config.turned_clockwise(), config.turned_counter_clockwise()] {
                if distances.get(&prev) == Some(before_turn) {
                    frontier.push(prev);
                }
            }
        }

        // Arrived here by stepping forward from the tile behind.
        let prev = config.stepped(-1);
        if let Some(before_step) = dist.checked_sub(STEP_COST)
            && is_open(seating, prev.position)
            && distances.get(&prev) == Some(before_step)
        {
            frontier.push(prev);
        }
    }

    seating.count(&Tile::Seat)
}
