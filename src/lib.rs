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

pub mod protocol;
pub mod resource;
pub mod translate;
pub mod types;

use std::convert;
use std::fmt;
use std::io;

/// Return for any error raised while reading the mapping documents or
/// building the translation tables. All of these abort initialization;
/// per-id misses during a build are logged instead.
#[derive(Debug)]
pub enum Error {
    Err(String),
    IOError(io::Error),
    Json(serde_json::Error),
    DuplicateBlockState(String),
    MissingWaterState,
}

impl convert::From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::IOError(e)
    }
}

impl convert::From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Json(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Err(ref val) => write!(f, "translation error: {}", val),
            Error::IOError(ref e) => e.fmt(f),
            Error::Json(ref e) => e.fmt(f),
            Error::DuplicateBlockState(ref name) => {
                write!(f, "duplicate canonical state in Bedrock palette: {}", name)
            }
            Error::MissingWaterState => {
                write!(f, "no runtime id assigned to minecraft:water[level=0]")
            }
        }
    }
}

impl std::error::Error for Error {}
