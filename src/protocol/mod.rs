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

pub mod packet;

use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use lazy_static::lazy_static;

use crate::types::hash::FNVHash;

#[doc(hidden)]
#[macro_export]
macro_rules! create_ids {
    ($t:ty, ) => ();
    ($t:ty, prev($prev:ident), $name:ident) => (
        #[allow(non_upper_case_globals)]
        pub const $name: $t = $prev + 1;
    );
    ($t:ty, prev($prev:ident), $name:ident, $($n:ident),+) => (
        #[allow(non_upper_case_globals)]
        pub const $name: $t = $prev + 1;
        $crate::create_ids!($t, prev($name), $($n),+);
    );
    ($t:ty, $name:ident, $($n:ident),+) => (
        #[allow(non_upper_case_globals)]
        pub const $name: $t = 0;
        $crate::create_ids!($t, prev($name), $($n),+);
    );
    ($t:ty, $name:ident) => (
        #[allow(non_upper_case_globals)]
        pub const $name: $t = 0;
    );
}

/// Helper macro for defining one dialect's packet set. Each packet gets a
/// plain struct, a variant in the dialect enum and a stable discriminant in
/// the dialect's `internal_ids` module.
#[macro_export]
macro_rules! packets {
    ($($dialect:ident $enum_name:ident {
        $(
            $name:ident {
                $($field:ident: $field_type:ty),+ $(,)?
            }
        )*
    })+) => {
        $(
        pub mod $dialect {
            #![allow(unused_imports)]
            use super::*;

            pub mod internal_ids {
                $crate::create_ids!(i32, $($name),*);
            }

            $(
                #[derive(Debug, Clone, PartialEq)]
                pub struct $name {
                    $(pub $field: $field_type,)+
                }
            )*
        }

        #[derive(Debug, Clone, PartialEq)]
        pub enum $enum_name {
            $(
                $name($dialect::$name),
            )*
        }

        impl $enum_name {
            /// Discriminant used for translator registration and dispatch.
            pub fn id(&self) -> i32 {
                match *self {
                    $(
                        $enum_name::$name(_) => $dialect::internal_ids::$name,
                    )*
                }
            }

            /// Packet kind name, for diagnostics only.
            pub fn name(&self) -> &'static str {
                match *self {
                    $(
                        $enum_name::$name(_) => stringify!($name),
                    )*
                }
            }
        }
        )+
    };
}

macro_rules! sound_events {
    ($($name:ident = $ename:expr,)+) => (
        /// The Bedrock dialect's enumerated level sound events. Sound
        /// identifiers that do not reduce to one of these cannot be played
        /// through a level sound packet.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SoundEvent {
            $(
                $name,
            )+
        }

        impl SoundEvent {
            /// Looks up an event by its SCREAMING_SNAKE_CASE name. Absence
            /// is a normal outcome, not an error.
            pub fn from_name(name: &str) -> Option<SoundEvent> {
                SOUND_EVENTS_BY_NAME.get(name).copied()
            }

            pub fn name(&self) -> &'static str {
                match *self {
                    $(
                        SoundEvent::$name => $ename,
                    )+
                }
            }
        }

        lazy_static! {
            static ref SOUND_EVENTS_BY_NAME: HashMap<&'static str, SoundEvent, BuildHasherDefault<FNVHash>> = {
                let mut map = HashMap::with_hasher(BuildHasherDefault::default());
                $(
                    map.insert($ename, SoundEvent::$name);
                )+
                map
            };
        }
    )
}

sound_events! {
    ItemUseOn = "ITEM_USE_ON",
    Hit = "HIT",
    Step = "STEP",
    Fly = "FLY",
    Jump = "JUMP",
    Break = "BREAK",
    Place = "PLACE",
    HeavyStep = "HEAVY_STEP",
    Gallop = "GALLOP",
    Fall = "FALL",
    Ambient = "AMBIENT",
    AmbientBaby = "AMBIENT_BABY",
    AmbientInWater = "AMBIENT_IN_WATER",
    Breathe = "BREATHE",
    Death = "DEATH",
    DeathInWater = "DEATH_IN_WATER",
    DeathToZombie = "DEATH_TO_ZOMBIE",
    Hurt = "HURT",
    HurtInWater = "HURT_IN_WATER",
    Mad = "MAD",
    Boost = "BOOST",
    Bow = "BOW",
    SquishBig = "SQUISH_BIG",
    SquishSmall = "SQUISH_SMALL",
    FallBig = "FALL_BIG",
    FallSmall = "FALL_SMALL",
    Splash = "SPLASH",
    Fizz = "FIZZ",
    Flap = "FLAP",
    Swim = "SWIM",
    Drink = "DRINK",
    Eat = "EAT",
    Takeoff = "TAKEOFF",
    Shake = "SHAKE",
    Plop = "PLOP",
    Land = "LAND",
    Saddle = "SADDLE",
    Armor = "ARMOR",
    AddChest = "ADD_CHEST",
    Throw = "THROW",
    Attack = "ATTACK",
    AttackNoDamage = "ATTACK_NODAMAGE",
    AttackStrong = "ATTACK_STRONG",
    Warn = "WARN",
    Shear = "SHEAR",
    Milk = "MILK",
    Thunder = "THUNDER",
    Explode = "EXPLODE",
    Fire = "FIRE",
    Ignite = "IGNITE",
    Fuse = "FUSE",
    Stare = "STARE",
    Spawn = "SPAWN",
    Shoot = "SHOOT",
    BreakBlock = "BREAK_BLOCK",
    Launch = "LAUNCH",
    Blast = "BLAST",
    LargeBlast = "LARGE_BLAST",
    Twinkle = "TWINKLE",
    Remedy = "REMEDY",
    Unfect = "UNFECT",
    LevelUp = "LEVELUP",
    BowHit = "BOW_HIT",
    BulletHit = "BULLET_HIT",
    ExtinguishFire = "EXTINGUISH_FIRE",
    ItemFizz = "ITEM_FIZZ",
    ChestOpen = "CHEST_OPEN",
    ChestClosed = "CHEST_CLOSED",
    ShulkerBoxOpen = "SHULKERBOX_OPEN",
    ShulkerBoxClosed = "SHULKERBOX_CLOSED",
    EnderChestOpen = "ENDERCHEST_OPEN",
    EnderChestClosed = "ENDERCHEST_CLOSED",
    PowerOn = "POWER_ON",
    PowerOff = "POWER_OFF",
    Attach = "ATTACH",
    Detach = "DETACH",
    Deny = "DENY",
    Tripod = "TRIPOD",
    Pop = "POP",
    DropSlot = "DROP_SLOT",
    Note = "NOTE",
    Thorns = "THORNS",
    PistonIn = "PISTON_IN",
    PistonOut = "PISTON_OUT",
    Portal = "PORTAL",
    Water = "WATER",
    LavaPop = "LAVA_POP",
    Lava = "LAVA",
    Burp = "BURP",
    BucketFillWater = "BUCKET_FILL_WATER",
    BucketFillLava = "BUCKET_FILL_LAVA",
    BucketEmptyWater = "BUCKET_EMPTY_WATER",
    BucketEmptyLava = "BUCKET_EMPTY_LAVA",
    ArmorEquipChain = "ARMOR_EQUIP_CHAIN",
    ArmorEquipDiamond = "ARMOR_EQUIP_DIAMOND",
    ArmorEquipGeneric = "ARMOR_EQUIP_GENERIC",
    ArmorEquipGold = "ARMOR_EQUIP_GOLD",
    ArmorEquipIron = "ARMOR_EQUIP_IRON",
    ArmorEquipLeather = "ARMOR_EQUIP_LEATHER",
    ArmorEquipElytra = "ARMOR_EQUIP_ELYTRA",
    Record13 = "RECORD_13",
    RecordCat = "RECORD_CAT",
    RecordBlocks = "RECORD_BLOCKS",
    RecordChirp = "RECORD_CHIRP",
    RecordFar = "RECORD_FAR",
    RecordMall = "RECORD_MALL",
    RecordMellohi = "RECORD_MELLOHI",
    RecordStal = "RECORD_STAL",
    RecordStrad = "RECORD_STRAD",
    RecordWard = "RECORD_WARD",
    Record11 = "RECORD_11",
    RecordWait = "RECORD_WAIT",
    Flop = "FLOP",
    GuardianCurse = "GUARDIAN_CURSE",
    MobWarning = "MOB_WARNING",
    Teleport = "TELEPORT",
    ShulkerOpen = "SHULKER_OPEN",
    ShulkerClose = "SHULKER_CLOSE",
    Haggle = "HAGGLE",
    HaggleYes = "HAGGLE_YES",
    HaggleNo = "HAGGLE_NO",
    HaggleIdle = "HAGGLE_IDLE",
    ChorusGrow = "CHORUS_GROW",
    ChorusDeath = "CHORUS_DEATH",
    Glass = "GLASS",
    PotionBrewed = "POTION_BREWED",
    CastSpell = "CAST_SPELL",
    PrepareAttack = "PREPARE_ATTACK",
    PrepareSummon = "PREPARE_SUMMON",
    PrepareWooloo = "PREPARE_WOOLOO",
    Fang = "FANG",
    Charge = "CHARGE",
    CameraTakePicture = "CAMERA_TAKE_PICTURE",
    LeashKnotPlace = "LEASHKNOT_PLACE",
    LeashKnotBreak = "LEASHKNOT_BREAK",
    Growl = "GROWL",
    Whine = "WHINE",
    Pant = "PANT",
    Purr = "PURR",
    Purreow = "PURREOW",
    Totem = "TOTEM",
}

#[test]
fn test_sound_event_names() {
    assert_eq!(SoundEvent::from_name("NOTE"), Some(SoundEvent::Note));
    assert_eq!(SoundEvent::from_name("RECORD_13"), Some(SoundEvent::Record13));
    assert_eq!(SoundEvent::from_name("note"), None);
    assert_eq!(SoundEvent::from_name("NO_SUCH_EVENT"), None);
    assert_eq!(SoundEvent::Note.name(), "NOTE");
    assert_eq!(SoundEvent::ItemUseOn.name(), "ITEM_USE_ON");
}
