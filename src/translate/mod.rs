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

pub mod block;
pub mod java;
pub mod sound;

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::mpsc;
use std::sync::Arc;

use log::debug;

use crate::protocol::packet::{BedrockPacket, JavaPacket};
use crate::types::hash::FNVHash;

use self::block::BlockStateMap;
use self::sound::SoundTable;

/// The translator-facing handle to one connected client: the outbound half
/// of the session's packet channel. Sessions are independent of each other;
/// a translator never sees more than the one it was handed.
pub struct Session {
    outbound: mpsc::Sender<BedrockPacket>,
}

impl Session {
    pub fn new(outbound: mpsc::Sender<BedrockPacket>) -> Session {
        Session { outbound }
    }

    /// Queues a translated packet for the client. A closed channel means
    /// the session is tearing down, so the packet is silently dropped.
    pub fn send(&self, packet: BedrockPacket) {
        if self.outbound.send(packet).is_err() {
            debug!("session channel closed, dropping outbound packet");
        }
    }
}

/// A translator for one incoming packet kind. Implementations must not
/// block, and on any table lookup miss they drop the affected output
/// instead of emitting a partially filled packet.
pub trait PacketTranslator: Send + Sync {
    fn translate(&self, packet: &JavaPacket, session: &Session);
}

/// Dispatch table from an incoming packet kind to its translator. Built
/// once at startup; per-session dispatch is a single map lookup.
pub struct TranslatorRegistry {
    translators: HashMap<i32, Box<dyn PacketTranslator>, BuildHasherDefault<FNVHash>>,
}

impl TranslatorRegistry {
    pub fn new() -> TranslatorRegistry {
        TranslatorRegistry {
            translators: HashMap::with_hasher(BuildHasherDefault::default()),
        }
    }

    /// A registry with every built-in translator wired to the given tables.
    pub fn with_defaults(blocks: Arc<BlockStateMap>, sounds: Arc<SoundTable>) -> TranslatorRegistry {
        use crate::protocol::packet::java::internal_ids;

        let mut registry = TranslatorRegistry::new();
        registry.register(
            internal_ids::BlockChange,
            Box::new(java::BlockChangeTranslator::new(blocks)),
        );
        registry.register(
            internal_ids::BuiltinSound,
            Box::new(java::BuiltinSoundTranslator::new(sounds.clone())),
        );
        registry.register(
            internal_ids::NamedSound,
            Box::new(java::NamedSoundTranslator::new(sounds)),
        );
        registry
    }

    pub fn register(&mut self, id: i32, translator: Box<dyn PacketTranslator>) {
        self.translators.insert(id, translator);
    }

    /// Routes a packet to its translator. A kind without a registered
    /// translator is dropped; it never fails the session.
    pub fn dispatch(&self, packet: &JavaPacket, session: &Session) {
        match self.translators.get(&packet.id()) {
            Some(translator) => translator.translate(packet, session),
            None => debug!("no translator for {}, dropping", packet.name()),
        }
    }
}

impl Default for TranslatorRegistry {
    fn default() -> TranslatorRegistry {
        TranslatorRegistry::new()
    }
}

#[test]
fn test_dispatch_without_translator_is_a_noop() {
    use crate::protocol::packet::java;

    let registry = TranslatorRegistry::new();
    let (tx, rx) = mpsc::channel();
    let session = Session::new(tx);

    registry.dispatch(
        &JavaPacket::KeepAlive(java::KeepAlive { id: 7 }),
        &session,
    );
    assert!(rx.try_recv().is_err());
}

#[test]
fn test_send_to_closed_session_does_not_panic() {
    use crate::protocol::packet::bedrock;
    use crate::types::Position;

    let (tx, rx) = mpsc::channel();
    drop(rx);
    let session = Session::new(tx);
    session.send(BedrockPacket::UpdateBlock(bedrock::UpdateBlock {
        position: Position::new(0, 64, 0),
        runtime_id: 0,
        layer: 0,
        flags: 0,
    }));
}
