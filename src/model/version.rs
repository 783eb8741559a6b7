//! Version tokens and the process-wide version generator
//!
//! Every record carries a [`Version`]: a wall-clock derived stamp rendered as
//! `"seconds:nanoseconds"`. The [`VersionGenerator`] guarantees that each
//! token it hands out is strictly greater than every token before it, even
//! when calls arrive faster than the clock resolves.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Version stamp for a registry record
///
/// Ordered by `(seconds, nanos)`; the textual form is `"seconds:nanos"`,
/// e.g. `"1441812152:154331951"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    seconds: u64,
    nanos: u32,
}

impl Version {
    /// Create a version stamp, carrying overflowing nanoseconds into seconds
    pub const fn new(seconds: u64, nanos: u32) -> Self {
        Self {
            seconds: seconds + (nanos / NANOS_PER_SEC) as u64,
            nanos: nanos % NANOS_PER_SEC,
        }
    }

    /// Seconds component
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Nanoseconds component (always < 1e9)
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    /// The smallest version strictly greater than this one
    pub(crate) const fn bump(self) -> Self {
        if self.nanos + 1 == NANOS_PER_SEC {
            Self {
                seconds: self.seconds + 1,
                nanos: 0,
            }
        } else {
            Self {
                seconds: self.seconds,
                nanos: self.nanos + 1,
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.seconds, self.nanos)
    }
}

/// Error returned when parsing a malformed version token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVersionError;

impl fmt::Display for ParseVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version must be '<seconds>:<nanoseconds>' with nanoseconds below 1e9"
        )
    }
}

impl std::error::Error for ParseVersionError {}

impl FromStr for Version {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (secs, nanos) = s.split_once(':').ok_or(ParseVersionError)?;
        let seconds: u64 = secs.parse().map_err(|_| ParseVersionError)?;
        let nanos: u32 = nanos.parse().map_err(|_| ParseVersionError)?;
        if nanos >= NANOS_PER_SEC {
            return Err(ParseVersionError);
        }
        Ok(Self { seconds, nanos })
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Process-wide source of strictly increasing version stamps
///
/// Reads the wall clock, and when the clock has not advanced past the last
/// issued token (repeated sub-resolution calls, or a clock step backwards)
/// bumps the previous token instead, so the sequence never stalls or repeats.
#[derive(Debug)]
pub struct VersionGenerator {
    last: Mutex<Version>,
}

impl VersionGenerator {
    /// Create a generator whose first token is at least the current wall time
    pub fn new() -> Self {
        Self {
            last: Mutex::new(Version::default()),
        }
    }

    /// Issue the next version stamp, strictly greater than all previous ones
    pub fn next(&self) -> Version {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let candidate = Version::new(now.as_secs(), now.subsec_nanos());

        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let next = if candidate > *last {
            candidate
        } else {
            last.bump()
        };
        *last = next;
        next
    }
}

impl Default for VersionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Return `candidate` when it is a well-formed version token, otherwise a
/// fresh token from `generator`
pub fn generate_version(candidate: Option<&str>, generator: &VersionGenerator) -> Version {
    candidate
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| generator.next())
}
