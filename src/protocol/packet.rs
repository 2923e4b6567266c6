use crate::packets;
use crate::protocol::SoundEvent;
use crate::types::Position;

/// Block update flags understood by Bedrock clients.
pub const UPDATE_FLAG_NEIGHBORS: u32 = 1 << 0;
pub const UPDATE_FLAG_NETWORK: u32 = 1 << 1;

/// A Java-dialect sound reference: either one of the enumerated builtin
/// sounds or a custom sound supplied by a resource pack.
#[derive(Debug, Clone, PartialEq)]
pub enum SoundId {
    Builtin(String),
    Custom(String),
}

packets!(
    java JavaPacket {
        // A single block changed in the world. The state is the Java
        // dialect's block state id.
        BlockChange {
            position: Position,
            state: u32,
        }
        // One of the enumerated Java sound effects, referenced by its
        // namespaced identifier.
        BuiltinSound {
            sound: String,
            position: (f32, f32, f32),
            volume: f32,
            pitch: f32,
        }
        // A sound referenced by name, which may be a builtin identifier or
        // a custom resource pack sound.
        NamedSound {
            sound: SoundId,
            position: (f32, f32, f32),
            volume: f32,
            pitch: f32,
        }
        // Connection liveness probe. Answered by the session layer, not
        // translated.
        KeepAlive {
            id: i64,
        }
    }
    bedrock BedrockPacket {
        // Replaces the block at a position with the palette entry named by
        // runtime_id. Layer 1 holds the liquid occupying the same space.
        UpdateBlock {
            position: Position,
            runtime_id: u32,
            layer: u32,
            flags: u32,
        }
        // Plays one of the enumerated level sound events.
        LevelSoundEvent {
            sound: SoundEvent,
            position: (f32, f32, f32),
            extra_data: i32,
            identifier: String,
            baby_sound: bool,
            relative_volume_disabled: bool,
        }
        // Plays a sound by name, used for custom sounds the enumeration
        // cannot express.
        PlaySound {
            name: String,
            position: (f32, f32, f32),
            volume: f32,
            pitch: f32,
        }
    }
);

#[test]
fn test_packet_ids_are_distinct() {
    let packets = [
        JavaPacket::BlockChange(java::BlockChange {
            position: Position::new(0, 0, 0),
            state: 0,
        }),
        JavaPacket::BuiltinSound(java::BuiltinSound {
            sound: "block.note_block.harp".to_owned(),
            position: (0.0, 0.0, 0.0),
            volume: 1.0,
            pitch: 1.0,
        }),
        JavaPacket::NamedSound(java::NamedSound {
            sound: SoundId::Builtin("ambient.cave".to_owned()),
            position: (0.0, 0.0, 0.0),
            volume: 1.0,
            pitch: 1.0,
        }),
        JavaPacket::KeepAlive(java::KeepAlive { id: 0 }),
    ];
    for (i, a) in packets.iter().enumerate() {
        for b in &packets[i + 1..] {
            assert!(a.id() != b.id(), "{} and {} share an id", a.name(), b.name());
        }
    }
    assert_eq!(packets[0].name(), "BlockChange");
}
