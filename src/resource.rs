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

//! The boundary to the mapping documents. Everything here turns an
//! already-parsed JSON tree into the typed documents the translation tables
//! are built from; any structural defect is fatal, the bridge must not
//! start on half-read data.

use std::io::Read;

use serde_json::Value;

use crate::Error;

/// Value of one Bedrock block property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropValue {
    Bool(bool),
    Int(i32),
    String(String),
}

/// One entry of the Bedrock block palette document, properties in authored
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockRecord {
    pub name: String,
    pub states: Vec<(String, PropValue)>,
    pub version: i32,
}

/// The Bedrock-side target of one Java block descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct JavaBlockDef {
    pub bedrock_identifier: String,
    pub bedrock_states: Vec<(String, PropValue)>,
}

/// One row of the sound mapping document.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEntry {
    pub bedrock_mapping: Option<String>,
    pub legacy_mapping: Option<String>,
    pub extra_data: Option<i32>,
}

pub type BlockPaletteDoc = Vec<BlockRecord>;
pub type JavaBlocksDoc = Vec<(String, JavaBlockDef)>;
pub type SoundsDoc = Vec<(String, SoundEntry)>;

fn prop_value(key: &str, value: &Value) -> Result<PropValue, Error> {
    match *value {
        Value::Bool(v) => Ok(PropValue::Bool(v)),
        Value::String(ref v) => Ok(PropValue::String(v.clone())),
        Value::Number(ref v) => v
            .as_i64()
            .map(|v| PropValue::Int(v as i32))
            .ok_or_else(|| Error::Err(format!("non-integer value for block state {}", key))),
        _ => Err(Error::Err(format!(
            "unsupported value type for block state {}",
            key
        ))),
    }
}

fn prop_map(value: &Value) -> Result<Vec<(String, PropValue)>, Error> {
    let map = value
        .as_object()
        .ok_or_else(|| Error::Err("block states must be an object".to_owned()))?;
    map.iter()
        .map(|(k, v)| Ok((k.clone(), prop_value(k, v)?)))
        .collect()
}

/// Parses the Bedrock block palette document: an ordered array of
/// `{name, states, version}` records.
pub fn parse_block_palette(doc: &Value) -> Result<BlockPaletteDoc, Error> {
    let entries = doc
        .as_array()
        .ok_or_else(|| Error::Err("block palette must be an array".to_owned()))?;
    let mut palette = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Err("palette entry missing name".to_owned()))?;
        let version = entry
            .get("version")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::Err(format!("palette entry {} missing version", name)))?;
        let states = match entry.get("states") {
            Some(states) => prop_map(states)?,
            None => Vec::new(),
        };
        palette.push(BlockRecord {
            name: name.to_owned(),
            states,
            version: version as i32,
        });
    }
    Ok(palette)
}

/// Parses the Java block mapping document: an object from canonical
/// descriptor (`minecraft:<name>[<prop>=<value>,...]`) to its Bedrock
/// target. Key order is the Java block state id order.
pub fn parse_java_blocks(doc: &Value) -> Result<JavaBlocksDoc, Error> {
    let entries = doc
        .as_object()
        .ok_or_else(|| Error::Err("java block mapping must be an object".to_owned()))?;
    let mut blocks = Vec::with_capacity(entries.len());
    for (descriptor, def) in entries {
        let identifier = def
            .get("bedrock_identifier")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Err(format!("{} missing bedrock_identifier", descriptor)))?;
        let states = match def.get("bedrock_states") {
            Some(states) => prop_map(states)?,
            None => Vec::new(),
        };
        blocks.push((
            descriptor.clone(),
            JavaBlockDef {
                bedrock_identifier: identifier.to_owned(),
                bedrock_states: states,
            },
        ));
    }
    Ok(blocks)
}

/// Parses the sound mapping document: an object from Java sound id to its
/// optional Bedrock and legacy names. A non-string mapping counts as
/// absent, matching documents that carry explicit nulls.
pub fn parse_sounds(doc: &Value) -> Result<SoundsDoc, Error> {
    let entries = doc
        .as_object()
        .ok_or_else(|| Error::Err("sound mapping must be an object".to_owned()))?;
    let mut sounds = Vec::with_capacity(entries.len());
    for (java, def) in entries {
        sounds.push((
            java.clone(),
            SoundEntry {
                bedrock_mapping: def
                    .get("bedrock_mapping")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                legacy_mapping: def
                    .get("legacy_mapping")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                extra_data: def.get("extra_data").and_then(Value::as_i64).map(|v| v as i32),
            },
        ));
    }
    Ok(sounds)
}

pub fn load_block_palette<R: Read>(r: R) -> Result<BlockPaletteDoc, Error> {
    parse_block_palette(&serde_json::from_reader(r)?)
}

pub fn load_java_blocks<R: Read>(r: R) -> Result<JavaBlocksDoc, Error> {
    parse_java_blocks(&serde_json::from_reader(r)?)
}

pub fn load_sounds<R: Read>(r: R) -> Result<SoundsDoc, Error> {
    parse_sounds(&serde_json::from_reader(r)?)
}

#[test]
fn test_parse_block_palette() {
    let palette = load_block_palette(
        r#"[
            {"name": "minecraft:air", "states": {}, "version": 17760256},
            {"name": "minecraft:piston", "states": {"facing_direction": 1, "extended_bit": false}, "version": 17760256}
        ]"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(palette.len(), 2);
    assert_eq!(palette[1].name, "minecraft:piston");
    assert_eq!(
        palette[1].states,
        [
            ("facing_direction".to_owned(), PropValue::Int(1)),
            ("extended_bit".to_owned(), PropValue::Bool(false)),
        ]
    );
}

#[test]
fn test_java_blocks_keep_document_order() {
    let blocks = load_java_blocks(
        r#"{
            "minecraft:stone": {"bedrock_identifier": "minecraft:stone", "bedrock_states": {"stone_type": "stone"}},
            "minecraft:air": {"bedrock_identifier": "minecraft:air"}
        }"#
        .as_bytes(),
    )
    .unwrap();
    // Declaration order is the id order; it must survive parsing even when
    // it is not alphabetical.
    assert_eq!(blocks[0].0, "minecraft:stone");
    assert_eq!(blocks[1].0, "minecraft:air");
    assert!(blocks[1].1.bedrock_states.is_empty());
}

#[test]
fn test_parse_sounds_normalizes_missing_fields() {
    let sounds = load_sounds(
        r#"{
            "block.note_block.harp": {"bedrock_mapping": "note", "extra_data": 0},
            "entity.generic.splash": {"bedrock_mapping": null}
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(sounds[0].1.bedrock_mapping.as_deref(), Some("note"));
    assert_eq!(sounds[0].1.extra_data, Some(0));
    assert_eq!(sounds[1].1.bedrock_mapping, None);
    assert_eq!(sounds[1].1.legacy_mapping, None);
}

#[test]
fn test_malformed_documents_are_fatal() {
    assert!(load_block_palette(r#"{"not": "an array"}"#.as_bytes()).is_err());
    assert!(load_block_palette(r#"[{"states": {}, "version": 1}]"#.as_bytes()).is_err());
    assert!(load_java_blocks(r#"{"minecraft:stone": {}}"#.as_bytes()).is_err());
    assert!(load_sounds("not json at all".as_bytes()).is_err());
}
