use std::sync::{Arc, Mutex};

use sonyflake::Sonyflake;

/// Process-wide generator for time-ordered 64-bit ids.
///
/// Every row id in the system (users, problems, answers) comes from here so
/// that ids stay unique across instances without coordinating through the
/// database.
#[derive(Clone)]
pub struct IdGen {
    inner: Arc<Mutex<Sonyflake>>,
}

impl IdGen {
    /// Derive the machine id from the host's private IP.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(Sonyflake::new()?)),
        })
    }

    /// Pin the machine id by hand. Used by tests and single-node setups
    /// where no private IP is available.
    pub fn with_machine_id(machine_id: u16) -> anyhow::Result<Self> {
        let flake = Sonyflake::builder()
            .machine_id(&move || Ok(machine_id))
            .finalize()?;
        Ok(Self {
            inner: Arc::new(Mutex::new(flake)),
        })
    }

    pub fn next_id(&self) -> anyhow::Result<i64> {
        let mut flake = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("id generator lock poisoned"))?;
        let id = flake.next_id()?;
        Ok(id as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_positive() {
        let gen = IdGen::with_machine_id(1).expect("id generator should construct");
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let id = gen.next_id().expect("next_id should succeed");
            assert!(id > 0);
            assert!(seen.insert(id), "duplicate id generated");
        }
    }

    #[test]
    fn clones_share_the_sequence() {
        let gen = IdGen::with_machine_id(2).expect("id generator should construct");
        let clone = gen.clone();
        let a = gen.next_id().expect("next_id should succeed");
        let b = clone.next_id().expect("next_id should succeed");
        assert_ne!(a, b);
    }
}
