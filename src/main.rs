//! Example headless run demonstrating the foraging loop

use colony::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimConfig::default()
        .with_world_size(96.0, 96.0)
        .with_wander_radius(12.0)
        .with_seed(7);

    let mut scenario = Scenario::new("meadow", Vec2::new(48.0, 48.0));
    scenario.ants = 12;
    scenario.add_food(Vec2::new(12.0, 70.0), 25);
    scenario.add_food(Vec2::new(80.0, 16.0), 15);
    scenario.add_food(Vec2::new(70.0, 78.0), 10);
    // A wall between the nest and the north-west food pile
    for y in 40..70 {
        scenario.add_wall(30, y);
    }

    let target_total = scenario.total_food();
    let mut sim = Simulation::from_scenario(config, &scenario)?;

    const MAX_TICKS: u64 = 20_000;
    for tick in 1..=MAX_TICKS {
        sim.tick();

        for event in sim.events().iter() {
            if let SimEvent::FoodDelivered { ant, amount, total } = event {
                log::info!("tick {tick}: ant {ant} delivered {amount} (nest total {total})");
            }
        }

        if sim.nest_total() == target_total {
            log::info!("all {target_total} food units delivered after {tick} ticks");
            break;
        }
    }

    let stats = sim.stats();
    log::info!(
        "done: {} ticks, {} delivered, {} paths planned ({} failed), {} wander paths",
        stats.ticks(),
        stats.food_delivered(),
        stats.paths_planned(),
        stats.paths_failed(),
        stats.wander_paths()
    );

    Ok(())
}
