#![no_main]

use arbitrary::Arbitrary;
use gridreign::game::{collect_resources, faction_production, grow_population};
use gridreign::{Coord, Faction, Grid, ResourceType, Resources};
use libfuzzer_sys::fuzz_target;

/// One owned cell in the fuzzed economy.
#[derive(Arbitrary, Debug)]
struct CellSetup {
    x: u8,
    y: u8,
    owner: u8,
    kind: u8,
    upgrades: u8,
}

/// Structured input for economy fuzzing.
#[derive(Arbitrary, Debug)]
struct EconomyInput {
    /// Grid side length.
    size: u8,
    /// Cells to assign and upgrade.
    cells: Vec<CellSetup>,
    /// Starting pools.
    pools: [(u32, u32, u32); 2],
    /// Upkeep rounds to run.
    rounds: u8,
}

fuzz_target!(|input: EconomyInput| {
    let size = u16::from(input.size % 16).max(1);
    let Some(mut grid) = Grid::new(size) else {
        return;
    };

    for setup in input.cells.iter().take(64) {
        let coord = Coord::new(u16::from(setup.x) % size, u16::from(setup.y) % size);
        if let Some(cell) = grid.get_mut(coord) {
            cell.assign_to(setup.owner % 2);
            let kind = ResourceType::ALL[usize::from(setup.kind) % ResourceType::ALL.len()];
            for _ in 0..setup.upgrades % 8 {
                cell.upgrade_resource(kind);
            }
        }
    }

    let mut factions: Vec<Faction> = input
        .pools
        .iter()
        .zip(0u8..)
        .map(|(&(food, materials, gold), id)| {
            Faction::new(id, format!("F{id}")).with_resources(Resources::new(food, materials, gold))
        })
        .collect();

    for _ in 0..input.rounds % 16 {
        let before: Vec<Resources> = factions.iter().map(|f| f.resources).collect();
        let expected: Vec<Resources> = factions
            .iter()
            .map(|f| faction_production(&grid, f))
            .collect();
        let collected = collect_resources(&grid, &mut factions);
        assert_eq!(collected, expected);

        for ((faction, before), income) in factions.iter().zip(&before).zip(&collected) {
            assert_eq!(faction.resources, before.saturating_add(income));
        }

        grow_population(&mut grid);
        for cell in grid.cells() {
            assert!(cell.population() <= cell.population_capacity());
            assert!(cell.resource_level() >= 1);
        }
    }
});
