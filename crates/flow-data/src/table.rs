//! Named containers of a single resource tag.

use std::collections::{BTreeMap, HashMap};

use flow_core::container::{Container, State};
use flow_core::reservoir::{Reservoir, transfer};
use flow_core::units::{ResourceTag, UnitsOf};
use tracing::debug;

/// Errors raised when addressing containers by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("unknown container '{0}'")]
    UnknownContainer(String),
    #[error("container '{0}' cannot transfer to itself")]
    SameContainer(String),
}

/// Containers keyed by name, kept in insertion order.
#[derive(Debug, Clone)]
pub struct ContainerTable<T: ResourceTag> {
    entries: Vec<(String, Container<T>)>,
    index: HashMap<String, usize>,
}

impl<T: ResourceTag> Default for ContainerTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ResourceTag> ContainerTable<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Container<T>)> {
        self.entries.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn get(&self, name: &str) -> Option<&Container<T>> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Container<T>> {
        self.index.get(name).map(|&i| &mut self.entries[i].1)
    }

    /// Add a container. Replacing an existing name keeps its position and
    /// returns the old container.
    pub fn insert(&mut self, name: impl Into<String>, container: Container<T>) -> Option<Container<T>> {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return Some(std::mem::replace(&mut self.entries[i].1, container));
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, container));
        None
    }

    /// Borrow two distinct containers mutably at once.
    pub fn pair_mut(
        &mut self,
        giver: &str,
        receiver: &str,
    ) -> Result<(&mut Container<T>, &mut Container<T>), TableError> {
        let i = self.position(giver)?;
        let j = self.position(receiver)?;
        if i == j {
            return Err(TableError::SameContainer(giver.to_string()));
        }
        if i < j {
            let (left, right) = self.entries.split_at_mut(j);
            Ok((&mut left[i].1, &mut right[0].1))
        } else {
            let (left, right) = self.entries.split_at_mut(i);
            Ok((&mut right[0].1, &mut left[j].1))
        }
    }

    /// Transfer between two named containers, optionally capping what the
    /// giver provides. Returns the amount moved.
    pub fn transfer(
        &mut self,
        giver: &str,
        receiver: &str,
        cap: Option<UnitsOf<T>>,
    ) -> Result<UnitsOf<T>, TableError> {
        let (from, to) = self.pair_mut(giver, receiver)?;
        let moved = match cap {
            Some(cap) => transfer(&mut from.limit_provide(cap), to),
            None => transfer(from, to),
        };
        Ok(moved)
    }

    /// Snapshot every container by name.
    pub fn save_states(&self) -> BTreeMap<String, State<T>> {
        self.entries
            .iter()
            .map(|(name, c)| (name.clone(), c.save_state()))
            .collect()
    }

    /// Load snapshots by name without validation. Names not in the table are
    /// skipped; returns how many were skipped.
    pub fn load_states(&mut self, states: &BTreeMap<String, State<T>>) -> usize {
        let mut skipped = 0;
        for (name, state) in states {
            match self.get_mut(name) {
                Some(container) => container.load_state(state),
                None => {
                    debug!(resource = T::NAME, name = %name, "skipping state for unknown container");
                    skipped += 1;
                }
            }
        }
        skipped
    }

    fn position(&self, name: &str) -> Result<usize, TableError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TableError::UnknownContainer(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::container::Properties;
    use flow_core::test_utils::*;

    fn table() -> ContainerTable<Charge> {
        let mut table = ContainerTable::new();
        table.insert("source", container_at::<Charge>(100, 100));
        table.insert("buffer", container_at::<Charge>(40, 0));
        table.insert("sink", container_at::<Charge>(100, 0));
        table
    }

    #[test]
    fn insert_keeps_order_and_replaces() {
        let mut t = table();
        assert_eq!(t.names().collect::<Vec<_>>(), ["source", "buffer", "sink"]);

        let old = t.insert("buffer", Container::new(Properties::new(5)));
        assert_eq!(old.map(|c| c.capacity()), Some(40));
        assert_eq!(t.len(), 3);
        assert_eq!(t.get("buffer").map(|c| c.capacity()), Some(5));
    }

    #[test]
    fn lookup_and_iteration_follow_insertion() {
        let mut t = table();
        assert!(t.contains("buffer"));
        assert!(!t.contains("ghost"));

        t.transfer("source", "sink", Some(30)).unwrap();
        let levels: Vec<_> = t.iter().map(|(name, c)| (name, c.fill_level())).collect();
        assert_eq!(levels, [("source", 70), ("buffer", 0), ("sink", 30)]);
    }

    #[test]
    fn transfer_by_name() {
        let mut t = table();
        assert_eq!(t.transfer("source", "buffer", None), Ok(40));
        assert_eq!(t.transfer("buffer", "sink", Some(15)), Ok(15));
        assert_eq!(t.get("source").unwrap().fill_level(), 60);
        assert_eq!(t.get("buffer").unwrap().fill_level(), 25);
        assert_eq!(t.get("sink").unwrap().fill_level(), 15);
    }

    #[test]
    fn transfer_in_reverse_table_order() {
        let mut t = table();
        t.transfer("source", "sink", None).unwrap();
        assert_eq!(t.transfer("sink", "buffer", None), Ok(40));
        assert_eq!(t.get("sink").unwrap().fill_level(), 60);
    }

    #[test]
    fn unknown_and_same_names_are_errors() {
        let mut t = table();
        assert_eq!(
            t.transfer("source", "nowhere", None),
            Err(TableError::UnknownContainer("nowhere".into()))
        );
        assert_eq!(
            t.transfer("sink", "sink", None),
            Err(TableError::SameContainer("sink".into()))
        );
    }

    #[test]
    fn states_round_trip_by_name() {
        let mut t = table();
        let saved = t.save_states();
        t.transfer("source", "sink", None).unwrap();

        let mut with_extra = saved.clone();
        with_extra.insert("ghost".into(), State::new(1));
        assert_eq!(t.load_states(&with_extra), 1);

        assert_eq!(t.save_states(), saved);
    }
}
