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

//! The built-in translators for Java-dialect packets.

use std::sync::Arc;

use log::debug;

use crate::protocol::packet::bedrock::{LevelSoundEvent, PlaySound, UpdateBlock};
use crate::protocol::packet::{
    BedrockPacket, JavaPacket, SoundId, UPDATE_FLAG_NEIGHBORS, UPDATE_FLAG_NETWORK,
};
use crate::protocol::SoundEvent;

use super::block::BlockStateMap;
use super::sound::SoundTable;
use super::{PacketTranslator, Session};

/// Translates Java block updates into Bedrock runtime-id updates.
pub struct BlockChangeTranslator {
    blocks: Arc<BlockStateMap>,
}

impl BlockChangeTranslator {
    pub fn new(blocks: Arc<BlockStateMap>) -> BlockChangeTranslator {
        BlockChangeTranslator { blocks }
    }
}

impl PacketTranslator for BlockChangeTranslator {
    fn translate(&self, packet: &JavaPacket, session: &Session) {
        let change = match packet {
            JavaPacket::BlockChange(change) => change,
            _ => return,
        };
        let runtime_id = match self.blocks.bedrock_id_for(change.state) {
            Some(id) => id,
            None => {
                debug!(
                    "no runtime id for java state {} at {}, dropping block update",
                    change.state, change.position
                );
                return;
            }
        };
        session.send(BedrockPacket::UpdateBlock(UpdateBlock {
            position: change.position,
            runtime_id,
            layer: 0,
            flags: UPDATE_FLAG_NEIGHBORS | UPDATE_FLAG_NETWORK,
        }));
        // Waterlogged states carry their water on the liquid layer.
        if self.blocks.is_waterlogged(change.state) {
            session.send(BedrockPacket::UpdateBlock(UpdateBlock {
                position: change.position,
                runtime_id: self.blocks.water_id(),
                layer: 1,
                flags: UPDATE_FLAG_NEIGHBORS | UPDATE_FLAG_NETWORK,
            }));
        }
    }
}

/// Translates the enumerated Java sound effects into Bedrock level sound
/// events, re-encoding note pitches into the Bedrock note scale.
pub struct BuiltinSoundTranslator {
    sounds: Arc<SoundTable>,
}

impl BuiltinSoundTranslator {
    pub fn new(sounds: Arc<SoundTable>) -> BuiltinSoundTranslator {
        BuiltinSoundTranslator { sounds }
    }
}

impl PacketTranslator for BuiltinSoundTranslator {
    fn translate(&self, packet: &JavaPacket, session: &Session) {
        let play = match packet {
            JavaPacket::BuiltinSound(play) => play,
            _ => return,
        };
        let event = match self.sounds.resolve_for_outbound(&play.sound) {
            Some(event) => event,
            None => {
                debug!("{} is not a playable level sound, dropping", play.sound);
                return;
            }
        };
        let base = self
            .sounds
            .from_java(&play.sound)
            .map_or(-1, |m| m.extra_data);
        let extra_data = if event == SoundEvent::Note {
            match SoundTable::note_extra_data(base, play.pitch) {
                Some(value) => value,
                None => {
                    debug!(
                        "note pitch {} falls outside the Bedrock note scale, dropping",
                        play.pitch
                    );
                    return;
                }
            }
        } else {
            base
        };
        session.send(BedrockPacket::LevelSoundEvent(LevelSoundEvent {
            sound: event,
            position: play.position,
            extra_data,
            identifier: ":".to_owned(),
            baby_sound: false,
            relative_volume_disabled: false,
        }));
    }
}

/// Translates named Java sounds. Builtin identifiers resolve through the
/// mapping table; custom resource pack sounds pass through by name.
pub struct NamedSoundTranslator {
    sounds: Arc<SoundTable>,
}

impl NamedSoundTranslator {
    pub fn new(sounds: Arc<SoundTable>) -> NamedSoundTranslator {
        NamedSoundTranslator { sounds }
    }
}

impl PacketTranslator for NamedSoundTranslator {
    fn translate(&self, packet: &JavaPacket, session: &Session) {
        let play = match packet {
            JavaPacket::NamedSound(play) => play,
            _ => return,
        };
        match play.sound {
            SoundId::Custom(ref name) => {
                session.send(BedrockPacket::PlaySound(PlaySound {
                    name: name.clone(),
                    position: play.position,
                    volume: play.volume,
                    pitch: play.pitch,
                }));
            }
            SoundId::Builtin(ref name) => {
                let event = match self.sounds.resolve_for_outbound(name) {
                    Some(event) => event,
                    None => {
                        debug!("{} is not a playable level sound, dropping", name);
                        return;
                    }
                };
                session.send(BedrockPacket::LevelSoundEvent(LevelSoundEvent {
                    sound: event,
                    position: play.position,
                    extra_data: -1,
                    identifier: ":".to_owned(),
                    baby_sound: false,
                    relative_volume_disabled: false,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::sync::Arc;

    use crate::protocol::packet::{java, BedrockPacket, JavaPacket, SoundId};
    use crate::protocol::SoundEvent;
    use crate::resource::{BlockRecord, JavaBlockDef, PropValue, SoundEntry};
    use crate::translate::block::{BlockStateMap, BLOCK_STATE_VERSION};
    use crate::translate::sound::SoundTable;
    use crate::translate::{Session, TranslatorRegistry};
    use crate::types::Position;

    fn test_blocks() -> Arc<BlockStateMap> {
        let record = |name: &str| BlockRecord {
            name: name.to_owned(),
            states: vec![],
            version: BLOCK_STATE_VERSION,
        };
        let java = |descriptor: &str, identifier: &str| {
            (
                descriptor.to_owned(),
                JavaBlockDef {
                    bedrock_identifier: identifier.to_owned(),
                    bedrock_states: vec![],
                },
            )
        };
        let palette = vec![
            record("minecraft:water"),
            record("minecraft:stone"),
            record("minecraft:oak_stairs"),
        ];
        let blocks = vec![
            java("minecraft:water[level=0]", "minecraft:water"),
            java("minecraft:stone", "minecraft:stone"),
            java("minecraft:oak_stairs[waterlogged=true]", "minecraft:oak_stairs"),
            java("minecraft:missingno", "minecraft:missingno"),
        ];
        Arc::new(BlockStateMap::build(palette, &blocks).unwrap())
    }

    fn test_sounds() -> Arc<SoundTable> {
        let entry = |java: &str, bedrock: Option<&str>, extra_data: Option<i32>| {
            (
                java.to_owned(),
                SoundEntry {
                    bedrock_mapping: bedrock.map(str::to_owned),
                    legacy_mapping: None,
                    extra_data,
                },
            )
        };
        Arc::new(SoundTable::build(&[
            entry("block.note_block.harp", Some("note"), Some(0)),
            entry("block.glass.break", Some("glass"), None),
            entry("entity.unmappable.scream", Some("mob.nothing.known"), None),
        ]))
    }

    fn test_session() -> (Session, mpsc::Receiver<BedrockPacket>) {
        let (tx, rx) = mpsc::channel();
        (Session::new(tx), rx)
    }

    fn registry() -> TranslatorRegistry {
        TranslatorRegistry::with_defaults(test_blocks(), test_sounds())
    }

    #[test]
    fn test_block_change_translates_runtime_id() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BlockChange(java::BlockChange {
                position: Position::new(1, 64, -3),
                state: 1,
            }),
            &session,
        );
        match rx.try_recv().unwrap() {
            BedrockPacket::UpdateBlock(update) => {
                assert_eq!(update.runtime_id, 1);
                assert_eq!(update.layer, 0);
                assert_eq!(update.position, Position::new(1, 64, -3));
            }
            other => panic!("unexpected packet {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_waterlogged_block_change_fills_liquid_layer() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BlockChange(java::BlockChange {
                position: Position::new(0, 70, 0),
                state: 2,
            }),
            &session,
        );
        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        match (first, second) {
            (BedrockPacket::UpdateBlock(block), BedrockPacket::UpdateBlock(liquid)) => {
                assert_eq!(block.layer, 0);
                assert_eq!(liquid.layer, 1);
                assert_eq!(liquid.runtime_id, 0); // water claimed id 0
            }
            other => panic!("unexpected packets {:?}", other),
        }
    }

    #[test]
    fn test_unmapped_block_change_is_dropped() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BlockChange(java::BlockChange {
                position: Position::new(0, 0, 0),
                state: 3,
            }),
            &session,
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_builtin_sound_translates_to_level_sound() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BuiltinSound(java::BuiltinSound {
                sound: "block.glass.break".to_owned(),
                position: (8.0, 65.0, 8.0),
                volume: 1.0,
                pitch: 1.0,
            }),
            &session,
        );
        match rx.try_recv().unwrap() {
            BedrockPacket::LevelSoundEvent(sound) => {
                assert_eq!(sound.sound, SoundEvent::Glass);
                assert_eq!(sound.extra_data, -1);
                assert_eq!(sound.identifier, ":");
            }
            other => panic!("unexpected packet {:?}", other),
        }
    }

    #[test]
    fn test_note_pitch_is_reencoded() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BuiltinSound(java::BuiltinSound {
                sound: "block.note_block.harp".to_owned(),
                position: (0.0, 0.0, 0.0),
                volume: 1.0,
                pitch: 2.0,
            }),
            &session,
        );
        match rx.try_recv().unwrap() {
            BedrockPacket::LevelSoundEvent(sound) => {
                assert_eq!(sound.sound, SoundEvent::Note);
                assert_eq!(sound.extra_data, 24);
            }
            other => panic!("unexpected packet {:?}", other),
        }
    }

    #[test]
    fn test_out_of_scale_note_is_dropped() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BuiltinSound(java::BuiltinSound {
                sound: "block.note_block.harp".to_owned(),
                position: (0.0, 0.0, 0.0),
                volume: 1.0,
                pitch: 8.0,
            }),
            &session,
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_unresolvable_sound_is_dropped() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::BuiltinSound(java::BuiltinSound {
                sound: "entity.unmappable.scream".to_owned(),
                position: (0.0, 0.0, 0.0),
                volume: 1.0,
                pitch: 1.0,
            }),
            &session,
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_custom_sound_passes_through() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::NamedSound(java::NamedSound {
                sound: SoundId::Custom("mypack:alarm".to_owned()),
                position: (1.0, 2.0, 3.0),
                volume: 0.5,
                pitch: 1.25,
            }),
            &session,
        );
        match rx.try_recv().unwrap() {
            BedrockPacket::PlaySound(sound) => {
                assert_eq!(sound.name, "mypack:alarm");
                assert_eq!(sound.volume, 0.5);
                assert_eq!(sound.pitch, 1.25);
            }
            other => panic!("unexpected packet {:?}", other),
        }
    }

    #[test]
    fn test_named_builtin_sound_resolves() {
        let (session, rx) = test_session();
        registry().dispatch(
            &JavaPacket::NamedSound(java::NamedSound {
                sound: SoundId::Builtin("block.glass.break".to_owned()),
                position: (0.0, 0.0, 0.0),
                volume: 1.0,
                pitch: 1.0,
            }),
            &session,
        );
        match rx.try_recv().unwrap() {
            BedrockPacket::LevelSoundEvent(sound) => {
                assert_eq!(sound.sound, SoundEvent::Glass);
                assert_eq!(sound.extra_data, -1);
            }
            other => panic!("unexpected packet {:?}", other),
        }
    }
}
