// Copyright 2016 Matthew Collins
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log::debug;

use crate::resource::{BlockRecord, JavaBlockDef, PropValue};
use crate::types::hash::{FnvHashMap, FnvHashSet};
use crate::Error;

/// Version tag stamped on every canonical key derived from a Java
/// descriptor. Bedrock palettes carry the same tag on their own records.
pub const BLOCK_STATE_VERSION: i32 = 17_760_256;

/// Marks the waterlogged variant of a runtime id in the reverse-lookup key
/// space. No palette comes near 2^31 entries, so a flagged key can never
/// collide with a real runtime id.
const WATERLOGGED_FLAG: u32 = 1 << 31;

const WATER_DESCRIPTOR: &str = "minecraft:water[level=0]";

/// The normalized (name, sorted properties, version) tuple both dialects'
/// records reduce to. All block matching goes through structural equality
/// of these keys, never through palette positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalKey {
    name: String,
    properties: Vec<(String, PropValue)>,
    version: i32,
}

impl CanonicalKey {
    pub fn new(name: &str, properties: &[(String, PropValue)], version: i32) -> CanonicalKey {
        let mut properties = properties.to_vec();
        properties.sort_by(|a, b| a.0.cmp(&b.0));
        CanonicalKey {
            name: name.to_owned(),
            properties,
            version,
        }
    }
}

impl BlockRecord {
    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::new(&self.name, &self.states, self.version)
    }
}

/// Bidirectional correspondence between the Java block state space and the
/// Bedrock runtime id space, built once at startup and immutable after.
pub struct BlockStateMap {
    java_to_bedrock: Vec<Option<u32>>,
    bedrock_to_java: FnvHashMap<u32, u32>,
    waterlogged: FnvHashSet<u32>,
    palette: Vec<BlockRecord>,
    water_id: u32,
}

impl BlockStateMap {
    /// Builds the mapping from the Bedrock palette document and the Java
    /// block descriptor document. Runtime ids are assigned densely in the
    /// order Java descriptors first claim a palette record; Bedrock records
    /// no Java state claims keep palette slots after the claimed ones so a
    /// client can resolve every id the palette advertises.
    pub fn build(
        palette: Vec<BlockRecord>,
        java_blocks: &[(String, JavaBlockDef)],
    ) -> Result<BlockStateMap, Error> {
        let mut remaining: FnvHashMap<CanonicalKey, (usize, BlockRecord)> = FnvHashMap::default();
        for (doc_pos, record) in palette.into_iter().enumerate() {
            let key = record.canonical_key();
            if let Some((_, dup)) = remaining.insert(key, (doc_pos, record)) {
                return Err(Error::DuplicateBlockState(dup.name));
            }
        }

        let mut map = BlockStateMap {
            java_to_bedrock: vec![None; java_blocks.len()],
            bedrock_to_java: FnvHashMap::default(),
            waterlogged: FnvHashSet::default(),
            palette: Vec::with_capacity(remaining.len()),
            water_id: 0,
        };
        let mut assigned: FnvHashMap<CanonicalKey, u32> = FnvHashMap::default();
        let mut water_id = None;

        for (java_state, (descriptor, def)) in java_blocks.iter().enumerate() {
            let java_state = java_state as u32;
            let key = CanonicalKey::new(
                &def.bedrock_identifier,
                &def.bedrock_states,
                BLOCK_STATE_VERSION,
            );
            let waterlogged = is_waterlogged_descriptor(descriptor);
            if waterlogged {
                map.waterlogged.insert(java_state);
            }

            let runtime_id = if let Some((_, record)) = remaining.remove(&key) {
                let id = map.palette.len() as u32;
                map.palette.push(record);
                assigned.insert(key, id);
                Some(id)
            } else if let Some(&id) = assigned.get(&key) {
                // Distinct Java states can collapse onto one Bedrock state;
                // they share the runtime id of the first claimant.
                Some(id)
            } else {
                debug!("{} has no matching Bedrock state", descriptor);
                None
            };

            if let Some(id) = runtime_id {
                map.java_to_bedrock[java_state as usize] = Some(id);
                let reverse_key = if waterlogged {
                    id | WATERLOGGED_FLAG
                } else {
                    id
                };
                map.bedrock_to_java.entry(reverse_key).or_insert(java_state);
            }
            if descriptor.as_str() == WATER_DESCRIPTOR {
                water_id = runtime_id;
            }
        }

        map.water_id = water_id.ok_or(Error::MissingWaterState)?;

        // Palette positions are wire identifiers and clients cache them, so
        // the unclaimed remainder is appended in its original document order.
        let mut leftovers: Vec<(usize, BlockRecord)> = remaining.into_values().collect();
        leftovers.sort_by_key(|&(doc_pos, _)| doc_pos);
        map.palette.extend(leftovers.into_iter().map(|(_, record)| record));

        Ok(map)
    }

    /// The Bedrock runtime id for a Java block state, if one was mapped.
    pub fn bedrock_id_for(&self, java_state: u32) -> Option<u32> {
        self.java_to_bedrock
            .get(java_state as usize)
            .and_then(|v| *v)
    }

    /// The Java block state a Bedrock runtime id translates back to.
    pub fn java_state_for(&self, runtime_id: u32) -> Option<u32> {
        self.bedrock_to_java.get(&runtime_id).copied()
    }

    /// The waterlogged Java variant stored at a runtime id's flagged slot.
    pub fn waterlogged_java_state_for(&self, runtime_id: u32) -> Option<u32> {
        self.bedrock_to_java
            .get(&(runtime_id | WATERLOGGED_FLAG))
            .copied()
    }

    pub fn is_waterlogged(&self, java_state: u32) -> bool {
        self.waterlogged.contains(&java_state)
    }

    /// The client-visible palette. A record's position is its runtime id.
    pub fn palette(&self) -> &[BlockRecord] {
        &self.palette
    }

    /// Runtime id of the plain full water block, used to fill the liquid
    /// layer under waterlogged states.
    pub fn water_id(&self) -> u32 {
        self.water_id
    }
}

/// Whether a Java descriptor denotes a state that holds water. Bedrock has
/// no waterlogged property; bubble columns, kelp and the seagrass variants
/// imply it from the block itself.
fn is_waterlogged_descriptor(descriptor: &str) -> bool {
    descriptor.contains("waterlogged=true")
        || descriptor.contains("minecraft:bubble_column")
        || descriptor.contains("minecraft:kelp")
        || descriptor.contains("seagrass")
}

#[cfg(test)]
fn record(name: &str, states: &[(&str, PropValue)]) -> BlockRecord {
    BlockRecord {
        name: name.to_owned(),
        states: states
            .iter()
            .map(|&(k, ref v)| (k.to_owned(), v.clone()))
            .collect(),
        version: BLOCK_STATE_VERSION,
    }
}

#[cfg(test)]
fn java(descriptor: &str, identifier: &str, states: &[(&str, PropValue)]) -> (String, JavaBlockDef) {
    (
        descriptor.to_owned(),
        JavaBlockDef {
            bedrock_identifier: identifier.to_owned(),
            bedrock_states: states
                .iter()
                .map(|&(k, ref v)| (k.to_owned(), v.clone()))
                .collect(),
        },
    )
}

#[cfg(test)]
fn water_docs() -> (Vec<BlockRecord>, Vec<(String, JavaBlockDef)>) {
    (
        vec![record(
            "minecraft:water",
            &[("liquid_depth", PropValue::Int(0))],
        )],
        vec![java(
            "minecraft:water[level=0]",
            "minecraft:water",
            &[("liquid_depth", PropValue::Int(0))],
        )],
    )
}

#[test]
fn test_round_trip_preserves_canonical_key() {
    let (mut palette, mut blocks) = water_docs();
    palette.push(record("minecraft:stone", &[]));
    palette.push(record("minecraft:dirt", &[]));
    blocks.push(java("minecraft:stone", "minecraft:stone", &[]));
    blocks.push(java("minecraft:dirt", "minecraft:dirt", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    for (java_state, (_, def)) in blocks.iter().enumerate() {
        let runtime_id = map.bedrock_id_for(java_state as u32).unwrap();
        let back = map.java_state_for(runtime_id).unwrap();
        let key = |state: u32| {
            let def = &blocks[state as usize].1;
            CanonicalKey::new(&def.bedrock_identifier, &def.bedrock_states, BLOCK_STATE_VERSION)
        };
        assert_eq!(
            key(back),
            CanonicalKey::new(&def.bedrock_identifier, &def.bedrock_states, BLOCK_STATE_VERSION)
        );
    }
}

#[test]
fn test_runtime_ids_follow_claim_order_not_palette_order() {
    let (mut palette, mut blocks) = water_docs();
    // Palette lists stone before water's claimant order sees it.
    palette.insert(0, record("minecraft:stone", &[]));
    blocks.push(java("minecraft:stone", "minecraft:stone", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    // water[level=0] is the first Java descriptor, so it claims id 0 even
    // though stone led the palette document.
    assert_eq!(map.bedrock_id_for(0), Some(0));
    assert_eq!(map.water_id(), 0);
    assert_eq!(map.bedrock_id_for(1), Some(1));
    assert_eq!(map.palette()[0].name, "minecraft:water");
    assert_eq!(map.palette()[1].name, "minecraft:stone");
}

#[test]
fn test_alias_shares_runtime_id() {
    let (mut palette, mut blocks) = water_docs();
    palette.push(record("minecraft:grass", &[]));
    blocks.push(java("minecraft:grass_block[snowy=false]", "minecraft:grass", &[]));
    blocks.push(java("minecraft:grass_block[snowy=true]", "minecraft:grass", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    let first = map.bedrock_id_for(1).unwrap();
    assert_eq!(map.bedrock_id_for(2), Some(first));
    // The alias consumed no palette slot and the reverse entry keeps the
    // first claimant.
    assert_eq!(map.palette().len(), 2);
    assert_eq!(map.java_state_for(first), Some(1));
}

#[test]
fn test_unmatched_java_state_stays_unmapped() {
    let (palette, mut blocks) = water_docs();
    blocks.push(java("minecraft:missingno", "minecraft:missingno", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    assert_eq!(map.bedrock_id_for(1), None);
}

#[test]
fn test_duplicate_palette_entry_is_fatal() {
    let (mut palette, blocks) = water_docs();
    palette.push(record(
        "minecraft:piston",
        &[("facing", PropValue::String("up".to_owned())), ("extended", PropValue::Bool(false))],
    ));
    // Same canonical state, property order shuffled.
    palette.push(record(
        "minecraft:piston",
        &[("extended", PropValue::Bool(false)), ("facing", PropValue::String("up".to_owned()))],
    ));

    match BlockStateMap::build(palette, &blocks) {
        Err(Error::DuplicateBlockState(name)) => assert_eq!(name, "minecraft:piston"),
        _ => panic!("duplicate palette entry must fail the build"),
    }
}

#[test]
fn test_missing_water_state_is_fatal() {
    let palette = vec![record("minecraft:stone", &[])];
    let blocks = vec![java("minecraft:stone", "minecraft:stone", &[])];

    match BlockStateMap::build(palette, &blocks) {
        Err(Error::MissingWaterState) => (),
        _ => panic!("build must fail without a water anchor"),
    }
}

#[test]
fn test_waterlogged_detection_and_flagged_slot() {
    let (mut palette, mut blocks) = water_docs();
    palette.push(record("minecraft:oak_stairs", &[]));
    palette.push(record("minecraft:kelp", &[]));
    palette.push(record("minecraft:seagrass", &[]));
    palette.push(record("minecraft:bubble_column", &[]));
    blocks.push(java(
        "minecraft:oak_stairs[waterlogged=true]",
        "minecraft:oak_stairs",
        &[],
    ));
    blocks.push(java("minecraft:kelp[age=0]", "minecraft:kelp", &[]));
    blocks.push(java("minecraft:tall_seagrass", "minecraft:seagrass", &[]));
    blocks.push(java("minecraft:bubble_column[drag=true]", "minecraft:bubble_column", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    for java_state in 1..5 {
        assert!(map.is_waterlogged(java_state), "state {}", java_state);
        let runtime_id = map.bedrock_id_for(java_state).unwrap();
        // Stored only at the flagged slot, which no palette position uses.
        assert_eq!(map.waterlogged_java_state_for(runtime_id), Some(java_state));
        assert_eq!(map.java_state_for(runtime_id), None);
        assert!((runtime_id | WATERLOGGED_FLAG) as usize >= map.palette().len());
    }
    assert!(!map.is_waterlogged(0));
}

#[test]
fn test_unclaimed_records_append_in_document_order() {
    let (mut palette, blocks) = water_docs();
    palette.push(record("minecraft:element_2", &[]));
    palette.push(record("minecraft:element_1", &[]));
    palette.push(record("minecraft:element_3", &[]));

    let map = BlockStateMap::build(palette, &blocks).unwrap();
    let names: Vec<&str> = map.palette().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "minecraft:water",
            "minecraft:element_2",
            "minecraft:element_1",
            "minecraft:element_3",
        ]
    );
}
