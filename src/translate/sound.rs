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

use std::sync::{Arc, RwLock};

use crate::protocol::SoundEvent;
use crate::resource::SoundEntry;

/// Bedrock note block extra data runs over two octaves, 0 to 24.
const NOTE_MAX: i32 = 24;

/// One row of the sound identifier table, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundMapping {
    pub java: String,
    pub bedrock: Option<String>,
    pub legacy: Option<String>,
    pub extra_data: i32,
}

/// The sound identifier table. Reads take a snapshot of the current list;
/// `reload` republishes a wholly new list without touching the old one, so
/// a lookup in progress never observes a half-rebuilt table.
pub struct SoundTable {
    mappings: RwLock<Arc<Vec<SoundMapping>>>,
}

impl SoundTable {
    pub fn build(doc: &[(String, SoundEntry)]) -> SoundTable {
        SoundTable {
            mappings: RwLock::new(Arc::new(Self::make(doc))),
        }
    }

    fn make(doc: &[(String, SoundEntry)]) -> Vec<SoundMapping> {
        doc.iter()
            .map(|(java, entry)| SoundMapping {
                java: java.clone(),
                bedrock: normalize(&entry.bedrock_mapping),
                legacy: normalize(&entry.legacy_mapping),
                extra_data: entry.extra_data.unwrap_or(-1),
            })
            .collect()
    }

    fn snapshot(&self) -> Arc<Vec<SoundMapping>> {
        self.mappings.read().unwrap().clone()
    }

    /// The mapping row for a Java sound identifier. First match wins; the
    /// table is small and this is nowhere near a hot loop.
    pub fn from_java(&self, java: &str) -> Option<SoundMapping> {
        self.snapshot().iter().find(|m| m.java == java).cloned()
    }

    /// The mapping row carrying a Bedrock sound identifier.
    pub fn from_bedrock(&self, bedrock: &str) -> Option<SoundMapping> {
        self.snapshot()
            .iter()
            .find(|m| m.bedrock.as_deref() == Some(bedrock))
            .cloned()
    }

    /// Resolves a textual identifier against the Bedrock sound event
    /// enumeration, normalizing case and separators first.
    pub fn resolve_event(name: &str) -> Option<SoundEvent> {
        SoundEvent::from_name(&name.to_uppercase().replace('.', "_"))
    }

    /// Resolution chain for an outbound Java sound: the mapped Bedrock
    /// name, then the legacy name, then the raw Java identifier itself.
    /// `None` means the sound cannot be played and must be dropped.
    pub fn resolve_for_outbound(&self, java: &str) -> Option<SoundEvent> {
        if let Some(mapping) = self.from_java(java) {
            if let Some(event) = mapping.bedrock.as_deref().and_then(Self::resolve_event) {
                return Some(event);
            }
            if let Some(event) = mapping.legacy.as_deref().and_then(Self::resolve_event) {
                return Some(event);
            }
        }
        Self::resolve_event(java)
    }

    /// Re-encodes a Java note pitch (a continuous float) into the Bedrock
    /// note scale offset. Out-of-range results are a translation error; the
    /// caller drops the sound rather than play a wrong note.
    pub fn note_extra_data(base: i32, pitch: f32) -> Option<i32> {
        let value = base + (12.0 * f64::from(pitch).log2()).round() as i32 + 12;
        if (0..=NOTE_MAX).contains(&value) {
            Some(value)
        } else {
            None
        }
    }

    /// Atomically republishes the table from a re-parsed document. Readers
    /// holding the previous snapshot finish against it unchanged.
    pub fn reload(&self, doc: &[(String, SoundEntry)]) {
        let rebuilt = Arc::new(Self::make(doc));
        *self.mappings.write().unwrap() = rebuilt;
    }
}

fn normalize(field: &Option<String>) -> Option<String> {
    match *field {
        Some(ref v) if !v.is_empty() => Some(v.clone()),
        _ => None,
    }
}

#[cfg(test)]
fn entry(
    java: &str,
    bedrock: Option<&str>,
    legacy: Option<&str>,
) -> (String, SoundEntry) {
    (
        java.to_owned(),
        SoundEntry {
            bedrock_mapping: bedrock.map(str::to_owned),
            legacy_mapping: legacy.map(str::to_owned),
            extra_data: None,
        },
    )
}

#[test]
fn test_from_java_is_first_match() {
    let table = SoundTable::build(&[
        entry("entity.cow.ambient", Some("mob.cow.say"), None),
        entry("entity.cow.ambient", Some("mob.cow.other"), None),
    ]);
    let mapping = table.from_java("entity.cow.ambient").unwrap();
    assert_eq!(mapping.bedrock.as_deref(), Some("mob.cow.say"));
    assert!(table.from_java("entity.ghast.scream").is_none());
}

#[test]
fn test_from_bedrock_matches_bedrock_field() {
    let table = SoundTable::build(&[
        entry("entity.cow.ambient", Some("mob.cow.say"), None),
        entry("entity.pig.ambient", None, Some("mob.pig.say")),
    ]);
    let mapping = table.from_bedrock("mob.cow.say").unwrap();
    assert_eq!(mapping.java, "entity.cow.ambient");
    assert!(table.from_bedrock("mob.pig.say").is_none());
}

#[test]
fn test_blank_fields_normalize_to_absent() {
    let table = SoundTable::build(&[entry("entity.cow.ambient", Some(""), None)]);
    let mapping = table.from_java("entity.cow.ambient").unwrap();
    assert_eq!(mapping.bedrock, None);
    assert_eq!(mapping.legacy, None);
    assert_eq!(mapping.extra_data, -1);
}

#[test]
fn test_resolve_event_normalizes() {
    assert_eq!(SoundTable::resolve_event("note"), Some(SoundEvent::Note));
    assert_eq!(
        SoundTable::resolve_event("record.13"),
        Some(SoundEvent::Record13)
    );
    assert_eq!(SoundTable::resolve_event("mob.cow.say"), None);
}

#[test]
fn test_outbound_falls_back_to_legacy() {
    let table = SoundTable::build(&[entry("block.note_block.harp", None, Some("note"))]);
    assert_eq!(
        table.resolve_for_outbound("block.note_block.harp"),
        Some(SoundEvent::Note)
    );
}

#[test]
fn test_outbound_falls_back_to_raw_identifier() {
    // No mapping row at all: the raw Java identifier is still tried.
    let table = SoundTable::build(&[]);
    assert_eq!(table.resolve_for_outbound("portal"), Some(SoundEvent::Portal));
    assert_eq!(table.resolve_for_outbound("entity.unheard.of"), None);
}

#[test]
fn test_outbound_prefers_bedrock_over_legacy() {
    let table = SoundTable::build(&[entry("some.glass.sound", Some("glass"), Some("note"))]);
    assert_eq!(
        table.resolve_for_outbound("some.glass.sound"),
        Some(SoundEvent::Glass)
    );
}

#[test]
fn test_note_extra_data() {
    assert_eq!(SoundTable::note_extra_data(0, 1.0), Some(12));
    assert_eq!(SoundTable::note_extra_data(0, 2.0), Some(24));
    assert_eq!(SoundTable::note_extra_data(0, 0.5), Some(0));
    // Out of the two-octave domain: dropped, never clamped.
    assert_eq!(SoundTable::note_extra_data(0, 4.0), None);
    assert_eq!(SoundTable::note_extra_data(0, 0.25), None);
    assert_eq!(SoundTable::note_extra_data(6, 1.0), Some(18));
}

#[test]
fn test_reload_swaps_snapshot_atomically() {
    let table = SoundTable::build(&[entry("entity.cow.ambient", Some("mob.cow.say"), None)]);
    let held = table.snapshot();

    table.reload(&[entry("entity.cow.ambient", Some("mob.cow.renamed"), None)]);

    // A reader that grabbed its snapshot before the reload still sees the
    // old list, unchanged; new lookups see the new one.
    assert_eq!(held[0].bedrock.as_deref(), Some("mob.cow.say"));
    let mapping = table.from_java("entity.cow.ambient").unwrap();
    assert_eq!(mapping.bedrock.as_deref(), Some("mob.cow.renamed"));
}
