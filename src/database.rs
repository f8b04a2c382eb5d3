//! Arena holding every NEO and close approach, linked by index handles.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, info, warn};

use crate::error::{NeoError, Result};
use crate::model::{CloseApproach, NearEarthObject};

/// Index of a [`NearEarthObject`] inside a [`NeoDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeoId(usize);

/// Index of a [`CloseApproach`] inside a [`NeoDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApproachId(usize);

/// Owns both entity collections and resolves the links between them.
#[derive(Debug, Default)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: HashMap<String, NeoId>,
    by_name: HashMap<String, NeoId>,
}

impl NeoDatabase {
    /// Indexes the objects and links every approach whose designation matches
    /// one of them. When a designation appears twice, the first object wins.
    /// Objects and approaches without a designation are never linked.
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut by_designation = HashMap::with_capacity(neos.len());
        let mut by_name = HashMap::new();

        for (index, neo) in neos.iter().enumerate() {
            let id = NeoId(index);
            if !neo.designation().is_empty() {
                match by_designation.entry(neo.designation().to_string()) {
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                    Entry::Occupied(_) => {
                        warn!(
                            designation = neo.designation(),
                            "duplicate designation; keeping the first object"
                        );
                        continue;
                    }
                }
            }
            if let Some(name) = &neo.name {
                by_name.entry(name.clone()).or_insert(id);
            }
        }

        // An empty key never joins; both sides default to it when the source
        // omits the designation.
        let mut unmatched = 0usize;
        for (index, approach) in approaches.iter_mut().enumerate() {
            let neo_id = match approach.designation() {
                "" => None,
                key => by_designation.get(key).copied(),
            };
            match neo_id {
                Some(neo_id) => {
                    approach.neo = Some(neo_id);
                    neos[neo_id.0].approaches.push(ApproachId(index));
                }
                None => unmatched += 1,
            }
        }

        if unmatched > 0 {
            debug!(unmatched, "close approaches without a matching object");
        }
        info!(
            neo_count = neos.len(),
            approach_count = approaches.len(),
            "linked close approaches to near-Earth objects"
        );

        Self {
            neos,
            approaches,
            by_designation,
            by_name,
        }
    }

    /// All objects, in catalog order.
    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    /// All close approaches, in table order, linked or not.
    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Resolves an object handle.
    pub fn neo(&self, id: NeoId) -> &NearEarthObject {
        &self.neos[id.0]
    }

    /// Resolves an approach handle.
    pub fn approach(&self, id: ApproachId) -> &CloseApproach {
        &self.approaches[id.0]
    }

    /// Finds an object by its primary designation.
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|&id| self.neo(id))
    }

    /// Finds an object by its IAU name. Empty names never match.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.by_name.get(name).map(|&id| self.neo(id))
    }

    /// Iterates over the close approaches linked to `neo`.
    pub fn approaches_of<'a>(
        &'a self,
        neo: &'a NearEarthObject,
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        neo.approaches().iter().map(|&id| self.approach(id))
    }

    /// Pairs an approach with its object. Fails when the approach was never
    /// linked.
    pub fn link<'a>(&'a self, approach: &'a CloseApproach) -> Result<LinkedApproach<'a>> {
        let id = approach.neo().ok_or_else(|| NeoError::Unlinked {
            designation: approach.designation().to_string(),
        })?;
        Ok(LinkedApproach {
            approach,
            neo: self.neo(id),
        })
    }

    /// Every linked approach, in input order.
    pub fn linked_approaches(&self) -> impl Iterator<Item = LinkedApproach<'_>> {
        self.approaches
            .iter()
            .filter_map(|approach| self.link(approach).ok())
    }
}

/// A close approach together with the object it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    /// The approach itself.
    pub approach: &'a CloseApproach,
    /// The object the approach was linked to.
    pub neo: &'a NearEarthObject,
}

impl LinkedApproach<'_> {
    /// Full name of the approaching object.
    pub fn fullname(&self) -> String {
        self.neo.fullname()
    }

    /// One-line human-readable summary. Fails when the approach has no time.
    pub fn describe(&self) -> Result<String> {
        Ok(format!(
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str()?,
            self.fullname(),
            self.approach.distance,
            self.approach.velocity
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawRecord;

    fn neo(designation: &str, name: &str) -> NearEarthObject {
        NearEarthObject::from_record(
            &RawRecord::new()
                .with("designation", designation)
                .with("name", name),
        )
        .expect("NEO built")
    }

    fn approach(designation: &str, time: &str) -> CloseApproach {
        CloseApproach::from_record(
            &RawRecord::new()
                .with("designation", designation)
                .with("time", time)
                .with("distance", "0.25")
                .with("velocity", "12.5"),
        )
        .expect("approach built")
    }

    #[test]
    fn links_approaches_to_their_objects() {
        let db = NeoDatabase::new(
            vec![neo("433", "Eros"), neo("2020 AB", "")],
            vec![
                approach("433", "1900-Jan-01 12:00"),
                approach("2020 AB", "2020-Feb-02 02:02"),
                approach("433", "1950-Mar-03 03:03"),
            ],
        );

        let eros = db.get_neo_by_designation("433").expect("Eros indexed");
        let times: Vec<_> = db
            .approaches_of(eros)
            .map(|approach| approach.time_str().expect("time present"))
            .collect();
        assert_eq!(times, vec!["1900-01-01 12:00", "1950-03-03 03:03"]);

        for approach in db.approaches() {
            let linked = db.link(approach).expect("approach linked");
            assert_eq!(linked.neo.designation(), approach.designation());
        }
    }

    #[test]
    fn looks_up_by_name() {
        let db = NeoDatabase::new(vec![neo("433", "Eros"), neo("2020 AB", "")], Vec::new());
        assert_eq!(
            db.get_neo_by_name("Eros").map(NearEarthObject::designation),
            Some("433")
        );
        assert!(db.get_neo_by_name("").is_none());
        assert!(db.get_neo_by_designation("99942").is_none());
    }

    #[test]
    fn unmatched_approaches_stay_unlinked() {
        let db = NeoDatabase::new(
            vec![neo("433", "Eros")],
            vec![approach("99942", "2029-Apr-13 21:46")],
        );
        let orphan = &db.approaches()[0];
        assert_eq!(orphan.neo(), None);
        assert!(matches!(db.link(orphan), Err(NeoError::Unlinked { .. })));
        assert_eq!(db.linked_approaches().count(), 0);
    }

    #[test]
    fn missing_designations_never_link() {
        let ghost = NearEarthObject::from_record(&RawRecord::new().with("name", "Ghost"))
            .expect("NEO built");
        let keyless = CloseApproach::from_record(
            &RawRecord::new().with("time", "1900-Jan-01 12:00"),
        )
        .expect("approach built");

        let db = NeoDatabase::new(vec![ghost], vec![keyless]);
        assert_eq!(db.linked_approaches().count(), 0);
        assert_eq!(db.approaches()[0].neo(), None);
        assert!(db.neos()[0].approaches().is_empty());
        assert!(db.get_neo_by_designation("").is_none());
        assert_eq!(
            db.get_neo_by_name("Ghost").map(NearEarthObject::designation),
            Some("")
        );
    }

    #[test]
    fn duplicate_designations_keep_the_first_object() {
        let db = NeoDatabase::new(
            vec![neo("433", "Eros"), neo("433", "Impostor")],
            vec![approach("433", "1900-Jan-01 12:00")],
        );
        let linked = db.link(&db.approaches()[0]).expect("approach linked");
        assert_eq!(linked.fullname(), "433 Eros");
        assert!(db.get_neo_by_name("Impostor").is_none());
    }

    #[test]
    fn describe_reads_through_the_object() {
        let db = NeoDatabase::new(
            vec![neo("433", "Eros")],
            vec![approach("433", "1900-Jan-01 12:00")],
        );
        let linked = db.linked_approaches().next().expect("one linked approach");
        assert_eq!(
            linked.describe().expect("description"),
            "At 1900-01-01 12:00, '433 Eros' approaches Earth at a distance of 0.25 au and a velocity of 12.50 km/s."
        );
    }
}
