//! Initial entities of the demo.

use sparse_ecs::{Entity, EntityComponentManager};

use crate::components::{BoundedCollision, Lifetime, Position, TextRender, Velocity};

/// Spawns the demo scene and returns created entities.
pub fn spawn(ecm: &mut EntityComponentManager) -> Vec<Entity> {
    let entities = vec![
        // moving dot which disappears after a while
        ecm.spawn()
            .with(Position::new(0.0, 0.0))
            .with(Velocity::new(1.0, 0.0))
            .with(TextRender::new('o'))
            .with(Lifetime::new(4.0))
            .id(),
        ecm.spawn()
            .with(Position::new(5.0, 5.0))
            .with(TextRender::new('s'))
            .id(),
        // invisible mover
        ecm.spawn()
            .with(Position::new(2.3, 3.2))
            .with(Velocity::new(1.0, 1.0))
            .id(),
        // renderable symbol with no position
        ecm.spawn()
            .with(TextRender::new('r'))
            .with(Lifetime::new(2.0))
            .id(),
        ecm.spawn()
            .with(Position::new(-8.0, 6.0))
            .with(Velocity::new(-1.6, -0.3))
            .with(BoundedCollision::new(-10.0, 10.0, -10.0, 10.0))
            .with(TextRender::new('b'))
            .id(),
    ];

    log::info!("spawned {} entities", entities.len());
    entities
}
