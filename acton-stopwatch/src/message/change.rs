/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// A value sent by a hub alongside a key.
///
/// Untagged, so hubs speaking JSON or TOML map their scalars straight onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Text.
    Text(String),
}

impl From<bool> for ChangeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ChangeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ChangeValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u64> for ChangeValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Text(value.to_string()), Self::Int)
    }
}

impl From<f64> for ChangeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ChangeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ChangeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// One hub change, already sorted into the shapes a stopwatch understands.
///
/// [`Change::from_pair`] is total: any key or value outside the recognized shapes
/// becomes [`Change::Ignored`], which leaves the stopwatch untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// `running = true|false`.
    Running(bool),
    /// `ticks = 0`. No other tick value is accepted.
    ResetTicks,
    /// `resolution = R` with `R > 0` milliseconds.
    Resolution(NonZeroU64),
    /// Anything else.
    Ignored {
        /// The key as sent.
        key: String,
        /// The value as sent.
        value: ChangeValue,
    },
}

impl Change {
    /// Sorts a raw `(key, value)` pair into a [`Change`].
    pub fn from_pair(key: impl Into<String>, value: impl Into<ChangeValue>) -> Self {
        let key = key.into();
        let value = value.into();
        let recognized = match (key.as_str(), &value) {
            ("running", ChangeValue::Bool(running)) => Some(Self::Running(*running)),
            ("ticks", ChangeValue::Int(0)) => Some(Self::ResetTicks),
            ("resolution", ChangeValue::Int(ms)) => u64::try_from(*ms)
                .ok()
                .and_then(NonZeroU64::new)
                .map(Self::Resolution),
            _ => None,
        };
        recognized.unwrap_or_else(|| Self::Ignored { key, value })
    }

    /// True unless this change is [`Change::Ignored`].
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Ignored { .. })
    }
}

impl<K: Into<String>, V: Into<ChangeValue>> From<(K, V)> for Change {
    fn from((key, value): (K, V)) -> Self {
        Self::from_pair(key, value)
    }
}
