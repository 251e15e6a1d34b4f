//! Ordered execution of *systems* within a frame.

use crate::error::{Error, Result};
use crate::EntityComponentManager;

use super::System;

/// Ordered list of systems which are run once per frame.
#[derive(Default)]
pub struct Schedule {
    systems: Vec<Box<dyn System>>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends system to the end of the schedule.
    pub fn add_system<S>(&mut self, system: S) -> &mut Self
    where
        S: System + 'static,
    {
        self.systems.push(Box::new(system));
        self
    }

    /// Count of systems in the schedule.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Returns `true` if the schedule has no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Names of systems in order of execution.
    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|system| system.name())
    }

    /// Runs one frame: every system in order, then [`EntityComponentManager::flush`].
    ///
    /// # Errors
    ///
    /// Frame is aborted on the first failed system.
    /// Changes queued before the failure are still flushed.
    ///
    pub fn run_frame(&mut self, ecm: &mut EntityComponentManager, delta_time: f32) -> Result<()> {
        let mut failure = None;
        for system in &mut self.systems {
            if let Err(source) = system.run(ecm, delta_time) {
                let name = system.name().to_string();
                log::error!("system `{}` failed: {}", name, source);
                failure = Some(Error::System { name, source });
                break;
            }
        }
        ecm.flush();
        failure.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::system::system_fn;
    use crate::Entity;

    use super::*;

    struct Counter(u32);

    #[test]
    fn test_order_and_flush() {
        let mut ecm = EntityComponentManager::new();
        ecm.register::<Counter>();
        let entity = ecm.create_entity();
        ecm.add_component(entity, Counter(0));

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = Schedule::new();
        let first = Rc::clone(&log);
        schedule.add_system(system_fn("increment", move |ecm, _| {
            first.borrow_mut().push("increment");
            for counter in ecm.borrow_mut::<Counter>()?.data_mut() {
                counter.0 += 1;
            }
            Ok(())
        }));
        let second = Rc::clone(&log);
        schedule.add_system(system_fn("reap", move |ecm, _| {
            second.borrow_mut().push("reap");
            let counters = ecm.borrow::<Counter>()?;
            for (entity, counter) in counters.iter() {
                if counter.0 >= 2 {
                    ecm.remover().add(entity);
                }
            }
            assert!(ecm.is_alive(Entity::from_raw(0)));
            Ok(())
        }));
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.system_names().collect::<Vec<_>>(), ["increment", "reap"]);

        schedule.run_frame(&mut ecm, 1.0).unwrap();
        assert_eq!(ecm.entity_count(), 1);
        schedule.run_frame(&mut ecm, 1.0).unwrap();
        assert_eq!(ecm.entity_count(), 0);
        assert_eq!(*log.borrow(), ["increment", "reap", "increment", "reap"]);
    }

    #[test]
    fn test_failure_still_flushes() {
        let mut ecm = EntityComponentManager::new();
        let entity = ecm.create_entity();

        let mut schedule = Schedule::new();
        schedule
            .add_system(system_fn("mark", move |ecm, _| {
                ecm.remover().add(entity);
                Ok(())
            }))
            .add_system(system_fn("missing", |ecm, _| {
                ecm.borrow::<Counter>()?;
                Ok(())
            }));

        match schedule.run_frame(&mut ecm, 0.5) {
            Err(Error::System { name, source }) => {
                assert_eq!(name, "missing");
                assert!(source.to_string().contains("Counter"));
            }
            _ => panic!("frame must fail"),
        }
        assert!(!ecm.is_alive(entity));
    }
}
