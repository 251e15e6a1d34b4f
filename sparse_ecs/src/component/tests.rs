#![cfg(test)]

use super::{super::Entity, *};

fn entities(count: u32) -> Vec<Entity> {
    (0..count).map(Entity::from_raw).collect()
}

#[test]
fn test_insertion() {
    let mut pool = ComponentPool::new();
    let entity = Entity::from_raw(0);

    assert!(pool.add(entity, "foo"));
    assert!(pool.has(entity));
    assert_eq!(*pool.get(entity), "foo");
    assert_eq!(pool[entity], "foo");
    assert_eq!(pool.len(), 1);

    assert_eq!(pool.remove(entity), Some("foo"));
    assert!(!pool.has(entity));
    assert_eq!(pool.try_get(entity), None);
    assert!(pool.is_empty());
}

#[test]
fn test_add_keeps_existing() {
    let mut pool = ComponentPool::with_capacity(2);
    let entity = Entity::from_raw(5);

    assert!(pool.add(entity, 1));
    assert!(!pool.add(entity, 2));
    assert_eq!(pool[entity], 1);
    assert_eq!(pool.len(), 1);
}

#[test]
fn test_set() {
    let mut pool = ComponentPool::new();
    let entity = Entity::from_raw(1);

    assert_eq!(pool.set(entity, 123), None);
    assert_eq!(pool.set(entity, 456), Some(123));
    assert_eq!(pool.len(), 1);
    assert_eq!(pool.remove(entity), Some(456));
    assert_eq!(pool.remove(entity), None);
}

#[test]
fn test_remove_absent() {
    let mut pool = ComponentPool::new();
    let present = Entity::from_raw(0);
    pool.add(present, 'a');

    assert_eq!(pool.remove(Entity::from_raw(9)), None);
    assert_eq!(pool.len(), 1);
    assert!(pool.check_invariants());
}

#[test]
fn test_swap_remove_preserves_survivors() {
    let all = entities(6);
    let mut pool = ComponentPool::new();
    for (value, &entity) in all.iter().enumerate() {
        pool.add(entity, value * 10);
    }

    let removed = all[1];
    assert_eq!(pool.remove(removed), Some(10));
    assert_eq!(pool.len(), 5);
    // the last element took place of the removed one
    assert_eq!(pool.entities()[1], all[5]);
    assert_eq!(pool.data()[1], 50);

    for (value, &entity) in all.iter().enumerate() {
        if entity == removed {
            assert!(!pool.has(entity));
        } else {
            assert_eq!(pool[entity], value * 10);
        }
    }
    assert!(pool.check_invariants());
}

#[test]
fn test_remove_last() {
    let all = entities(3);
    let mut pool = ComponentPool::new();
    for &entity in &all {
        pool.add(entity, entity.id());
    }

    assert_eq!(pool.remove(all[2]), Some(2));
    assert_eq!(pool.entities(), &all[..2]);
    assert!(pool.check_invariants());

    pool.remove(all[0]);
    pool.remove(all[1]);
    assert!(pool.is_empty());
    assert!(pool.check_invariants());
}

#[test]
fn test_invariants_under_churn() {
    let all = entities(32);
    let mut pool = ComponentPool::new();
    for round in 0..4u32 {
        for &entity in &all {
            if (entity.id() + round) % 3 == 0 {
                pool.remove(entity);
            } else {
                pool.add(entity, entity.id() * 2);
            }
            assert!(pool.check_invariants());
        }
    }
    for (entity, &value) in pool.iter() {
        assert_eq!(value, entity.id() * 2);
    }
}

#[test]
#[should_panic(expected = "there is no component")]
fn test_get_absent() {
    let mut pool = ComponentPool::new();
    pool.add(Entity::from_raw(0), 0.5f32);
    let _component = pool.get(Entity::from_raw(1));
}

#[test]
#[should_panic]
fn test_index_absent() {
    let mut pool = ComponentPool::new();
    let entity = Entity::from_raw(0);
    pool.add(entity, 0);
    pool[entity] = 10;
    assert_eq!(pool[entity], 10);

    let _component = pool[Entity::from_raw(1)];
}

#[test]
fn test_iterator() {
    let all = entities(100);
    let mut pool = ComponentPool::new();
    for (&entity, value) in all.iter().zip(0..) {
        pool.add(entity, value);
    }

    for (_, component) in pool.iter_mut() {
        *component += 10;
    }
    for ((_, component), value) in pool.iter().zip(10..110) {
        assert_eq!(*component, value);
    }

    let (dense_entities, data) = pool.dense_mut();
    for (entity, component) in dense_entities.iter().zip(data.iter_mut()) {
        *component -= entity.id() as i32;
    }
    assert!(pool.data().iter().all(|&component| component == 10));

    let iterator: IntoIter<i32> = pool.into_iter();
    let owned: Vec<_> = iterator.map(|(entity, _)| entity).collect();
    assert_eq!(owned, all);
}

#[test]
fn test_clear() {
    let mut pool = ComponentPool::new();
    for entity in entities(4) {
        pool.add(entity, ());
    }
    pool.clear();
    assert!(pool.is_empty());
    assert!(!pool.has(Entity::from_raw(0)));
    assert!(pool.check_invariants());
}

#[test]
fn test_erased_pool() {
    let mut pool = ComponentPool::new();
    let entity = Entity::from_raw(3);
    pool.add(entity, 1u8);

    let erased: &mut dyn ErasedPool = &mut pool;
    assert_eq!(erased.component_id(), ComponentId::of::<u8>());
    assert_ne!(erased.component_id(), ComponentId::of::<u16>());
    assert!(erased.has_entity(entity));
    assert!(erased.remove_entity(entity));
    assert!(!erased.remove_entity(entity));
    assert!(erased.is_empty());
}
