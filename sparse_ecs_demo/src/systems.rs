//! Systems of the demo scene.
//!
//! Every system is a plain function over pools, wrapped into [`System`]
//! which borrows those pools from the manager.

use sparse_ecs::{
    ComponentPool, EntityComponentManager, EntityRemover, Schedule, System, SystemResult,
};

use crate::components::{BoundedCollision, Lifetime, Position, TextRender, Velocity};

/// Bounds of the text grid, inclusive.
pub const GRID_MIN: i32 = -10;
pub const GRID_MAX: i32 = 10;

/// Moves every entity which has both position and velocity.
pub fn movement(
    positions: &mut ComponentPool<Position>,
    velocities: &ComponentPool<Velocity>,
    delta_time: f32,
) {
    for (entity, velocity) in velocities.iter() {
        if !positions.has(entity) {
            continue;
        }
        let position = positions.get_mut(entity);
        position.x += velocity.x * delta_time;
        position.y += velocity.y * delta_time;
    }
}

/// Counts lifetime down and marks expired entities for deletion.
pub fn lifetime(lifetimes: &mut ComponentPool<Lifetime>, remover: &EntityRemover, delta_time: f32) {
    let (entities, lifetimes) = lifetimes.dense_mut();
    for (&entity, lifetime) in entities.iter().zip(lifetimes) {
        lifetime.seconds_left -= delta_time;
        if lifetime.seconds_left <= 0.0 {
            remover.add(entity);
        }
    }
}

/// Keeps entities inside of their bounds, reflecting velocity on each hit axis.
pub fn bounded_collision(
    bounds: &ComponentPool<BoundedCollision>,
    positions: &mut ComponentPool<Position>,
    velocities: &mut ComponentPool<Velocity>,
) {
    for (entity, bounds) in bounds.iter() {
        if !positions.has(entity) {
            continue;
        }
        let position = positions.get_mut(entity);
        let (x, x_hit) = clamp(position.x, bounds.x_min, bounds.x_max);
        let (y, y_hit) = clamp(position.y, bounds.y_min, bounds.y_max);
        position.x = x;
        position.y = y;

        if let Some(velocity) = velocities.try_get_mut(entity) {
            if x_hit {
                velocity.x = -velocity.x;
            }
            if y_hit {
                velocity.y = -velocity.y;
            }
        }
    }
}

fn clamp(value: f32, min: f32, max: f32) -> (f32, bool) {
    if value < min {
        (min, true)
    } else if value > max {
        (max, true)
    } else {
        (value, false)
    }
}

/// Renders symbols of positioned entities into the square text grid.
///
/// Row `0` is the top of the grid (`y == GRID_MAX`).
/// When two entities share a cell, the later one in the pool wins.
///
pub fn text_grid(
    renders: &ComponentPool<TextRender>,
    positions: &ComponentPool<Position>,
) -> String {
    let size = (GRID_MAX - GRID_MIN + 1) as usize;
    let mut grid = vec![vec![' '; size]; size];

    for (entity, render) in renders.iter() {
        let position = match positions.try_get(entity) {
            Some(position) => position,
            None => continue,
        };
        let (x, y) = (position.x as i32, position.y as i32);
        let range = GRID_MIN..=GRID_MAX;
        if range.contains(&x) && range.contains(&y) {
            let column = (x - GRID_MIN) as usize;
            let row = (GRID_MAX - y) as usize;
            grid[row][column] = render.symbol;
        }
    }

    let border = "-".repeat(size * 2 + 2);
    let mut output = String::with_capacity((size * 2 + 3) * (size + 2));
    output.push_str(&border);
    output.push('\n');
    for row in grid {
        output.push('|');
        for symbol in row {
            output.push(symbol);
            output.push(' ');
        }
        output.push_str("|\n");
    }
    output.push_str(&border);
    output.push('\n');
    output
}

pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(&mut self, ecm: &EntityComponentManager, delta_time: f32) -> SystemResult {
        let mut positions = ecm.borrow_mut::<Position>()?;
        let velocities = ecm.borrow::<Velocity>()?;
        movement(&mut positions, &velocities, delta_time);
        Ok(())
    }
}

pub struct LifetimeSystem;

impl System for LifetimeSystem {
    fn name(&self) -> &str {
        "lifetime"
    }

    fn run(&mut self, ecm: &EntityComponentManager, delta_time: f32) -> SystemResult {
        let mut lifetimes = ecm.borrow_mut::<Lifetime>()?;
        lifetime(&mut lifetimes, ecm.remover(), delta_time);
        Ok(())
    }
}

pub struct BoundedCollisionSystem;

impl System for BoundedCollisionSystem {
    fn name(&self) -> &str {
        "bounded collision"
    }

    fn run(&mut self, ecm: &EntityComponentManager, _delta_time: f32) -> SystemResult {
        let bounds = ecm.borrow::<BoundedCollision>()?;
        let mut positions = ecm.borrow_mut::<Position>()?;
        let mut velocities = ecm.borrow_mut::<Velocity>()?;
        bounded_collision(&bounds, &mut positions, &mut velocities);
        Ok(())
    }
}

/// Prints the text grid to the standard output, if enabled.
pub struct TextGridRenderSystem {
    print: bool,
}

impl TextGridRenderSystem {
    pub fn new(print: bool) -> Self {
        Self { print }
    }
}

impl System for TextGridRenderSystem {
    fn name(&self) -> &str {
        "text grid render"
    }

    fn run(&mut self, ecm: &EntityComponentManager, _delta_time: f32) -> SystemResult {
        let renders = ecm.borrow::<TextRender>()?;
        let positions = ecm.borrow::<Position>()?;
        let grid = text_grid(&renders, &positions);
        if self.print {
            print!("{}", grid);
        }
        Ok(())
    }
}

/// Registers pools of all demo components and builds the frame schedule.
pub fn schedule(ecm: &mut EntityComponentManager, print: bool) -> Schedule {
    ecm.register::<Position>();
    ecm.register::<Velocity>();
    ecm.register::<Lifetime>();
    ecm.register::<BoundedCollision>();
    ecm.register::<TextRender>();

    let mut schedule = Schedule::new();
    schedule
        .add_system(LifetimeSystem)
        .add_system(MovementSystem)
        .add_system(BoundedCollisionSystem)
        .add_system(TextGridRenderSystem::new(print));
    schedule
}

#[cfg(test)]
mod tests {
    use sparse_ecs::Entity;

    use super::*;

    #[test]
    fn test_movement_then_deferred_deletion() {
        let mut ecm = EntityComponentManager::new();
        let entity = ecm.create_entity();
        ecm.add_component(entity, Position::new(0.0, 0.0));
        ecm.add_component(entity, Velocity::new(1.0, 0.0));

        {
            let mut positions = ecm.borrow_mut::<Position>().unwrap();
            let velocities = ecm.borrow::<Velocity>().unwrap();
            movement(&mut positions, &velocities, 1.0);
        }
        assert_eq!(ecm.get_pool::<Position>()[entity], Position::new(1.0, 0.0));

        ecm.remover().add(entity);
        assert!(ecm.get_pool::<Position>().has(entity));

        ecm.delete_entities();
        assert!(!ecm.get_pool::<Position>().has(entity));
        assert!(!ecm.get_pool::<Velocity>().has(entity));
        assert!(!ecm.entities().contains(&entity));
    }

    #[test]
    fn test_movement_skips_without_position() {
        let mut positions = ComponentPool::new();
        let mut velocities = ComponentPool::new();
        let moving = Entity::from_raw(0);
        let ghost = Entity::from_raw(1);
        positions.add(moving, Position::new(1.0, 1.0));
        velocities.add(moving, Velocity::new(2.0, -4.0));
        velocities.add(ghost, Velocity::new(1.0, 1.0));

        movement(&mut positions, &velocities, 0.5);
        assert_eq!(positions[moving], Position::new(2.0, -1.0));
        assert!(!positions.has(ghost));
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut ecm = EntityComponentManager::new();
        let short = ecm.create_entity();
        let long = ecm.create_entity();
        ecm.add_component(short, Lifetime::new(1.0));
        ecm.add_component(long, Lifetime::new(3.0));

        let mut schedule = Schedule::new();
        schedule.add_system(LifetimeSystem);

        schedule.run_frame(&mut ecm, 1.0).unwrap();
        assert_eq!(ecm.entities(), [long]);
        assert_eq!(ecm.get_pool::<Lifetime>()[long], Lifetime::new(2.0));

        schedule.run_frame(&mut ecm, 2.5).unwrap();
        assert!(ecm.entities().is_empty());
        assert!(ecm.get_pool::<Lifetime>().is_empty());
    }

    #[test]
    fn test_bounded_collision() {
        let entity = Entity::from_raw(0);
        let mut bounds = ComponentPool::new();
        let mut positions = ComponentPool::new();
        let mut velocities = ComponentPool::new();
        bounds.add(entity, BoundedCollision::new(-5.0, 5.0, -5.0, 5.0));
        positions.add(entity, Position::new(7.0, 0.0));
        velocities.add(entity, Velocity::new(2.0, 1.0));

        bounded_collision(&bounds, &mut positions, &mut velocities);
        assert_eq!(positions[entity], Position::new(5.0, 0.0));
        assert_eq!(velocities[entity], Velocity::new(-2.0, 1.0));

        positions.set(entity, Position::new(0.0, -9.0));
        bounded_collision(&bounds, &mut positions, &mut velocities);
        assert_eq!(positions[entity], Position::new(0.0, -5.0));
        assert_eq!(velocities[entity], Velocity::new(-2.0, -1.0));
    }

    #[test]
    fn test_text_grid() {
        let mut renders = ComponentPool::new();
        let mut positions = ComponentPool::new();
        let corner = Entity::from_raw(0);
        let center = Entity::from_raw(1);
        let hidden = Entity::from_raw(2);
        let outside = Entity::from_raw(3);
        renders.add(corner, TextRender::new('a'));
        renders.add(center, TextRender::new('b'));
        renders.add(hidden, TextRender::new('c'));
        renders.add(outside, TextRender::new('d'));
        positions.add(corner, Position::new(-10.0, 10.0));
        positions.add(center, Position::new(0.4, 0.9));
        positions.add(outside, Position::new(11.0, 0.0));

        let grid = text_grid(&renders, &positions);
        let lines: Vec<_> = grid.lines().collect();
        assert_eq!(lines.len(), 23);
        assert_eq!(lines[0], "-".repeat(44));
        assert_eq!(lines[22], "-".repeat(44));
        assert!(lines[1].starts_with("|a "));
        assert_eq!(lines[11].chars().nth(1 + 2 * 10), Some('b'));
        assert!(lines.iter().all(|line| line.chars().count() == 44));
        assert!(!grid.contains('c'));
        assert!(!grid.contains('d'));
    }

    #[test]
    fn test_schedule_registers_pools() {
        let mut ecm = EntityComponentManager::new();
        let mut schedule = schedule(&mut ecm, false);
        assert_eq!(ecm.pool_count(), 5);
        assert_eq!(schedule.len(), 4);

        let entity = ecm.create_entity();
        ecm.add_component(entity, Position::new(4.5, 0.0));
        ecm.add_component(entity, Velocity::new(1.0, 0.0));
        ecm.add_component(entity, BoundedCollision::new(-5.0, 5.0, -5.0, 5.0));

        schedule.run_frame(&mut ecm, 1.0).unwrap();
        assert_eq!(ecm.get_pool::<Position>()[entity], Position::new(5.0, 0.0));
        assert_eq!(ecm.get_pool::<Velocity>()[entity], Velocity::new(-1.0, 0.0));
    }
}
