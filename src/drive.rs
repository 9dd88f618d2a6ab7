//! Virtual drive letters.
//!
//! Position `i` in the mount table is exposed to the sandbox as drive `'C' + i`.
//! `A:` and `B:` are never assigned, so the usable range is `C:` through `Z:`.

use std::fmt;

use crate::error::{MountsError, Result};

/// First letter handed out to a mount.
const FIRST_LETTER: u8 = b'C';

/// Last letter handed out to a mount.
const LAST_LETTER: u8 = b'Z';

/// A drive letter in the range `C`..=`Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DriveLetter(u8);

impl DriveLetter {
    /// Number of assignable drive letters.
    pub const COUNT: usize = (LAST_LETTER - FIRST_LETTER + 1) as usize;

    /// Drive letter for a mount table position.
    pub fn from_index(index: usize) -> Result<Self> {
        if index < Self::COUNT {
            Ok(DriveLetter(FIRST_LETTER + index as u8))
        } else {
            Err(MountsError::invariant(format!(
                "drive index {} is outside C:..Z: (0..{})",
                index,
                Self::COUNT
            )))
        }
    }

    /// Parse an uppercase drive letter.
    pub fn from_char(letter: char) -> Result<Self> {
        if letter.is_ascii() && (FIRST_LETTER..=LAST_LETTER).contains(&(letter as u8)) {
            Ok(DriveLetter(letter as u8))
        } else {
            Err(MountsError::invariant(format!(
                "'{}' is not a drive letter in C..Z",
                letter
            )))
        }
    }

    /// Parse a drive marker segment such as `C:`; only the first character is significant.
    pub fn from_marker(marker: &str) -> Result<Self> {
        match marker.chars().next() {
            Some(letter) => Self::from_char(letter),
            None => Err(MountsError::invariant("empty drive marker")),
        }
    }

    /// Zero-based mount table position.
    pub fn index(self) -> usize {
        (self.0 - FIRST_LETTER) as usize
    }

    /// The bare letter, e.g. `'C'`.
    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// Iterate over every assignable letter in order.
    pub fn all() -> impl Iterator<Item = DriveLetter> {
        (FIRST_LETTER..=LAST_LETTER).map(DriveLetter)
    }
}

impl fmt::Display for DriveLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.as_char())
    }
}

/// Map a mount table position to its drive name: `0 -> "C:"`, `1 -> "D:"`, ...
pub fn drive_index_to_letter(index: usize) -> Result<String> {
    DriveLetter::from_index(index).map(|letter| letter.to_string())
}
