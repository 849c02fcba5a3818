//! BIOS image inspection
//!
//! Reads the ROMDIR table of a PS2 BIOS image and decodes the ROMVER entry
//! into a short description such as `USA v01.60 (2001-07-04) Console`.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Size of one ROMDIR entry
const ROMDIR_ENTRY_SIZE: usize = 16;
/// Length of the entry name field
const ROMDIR_NAME_LEN: usize = 10;
/// How far into the image the ROMDIR table is searched for
const ROMDIR_SEARCH_LIMIT: usize = 0x10000;
/// `MMmmRTYYYYMMDD`
const ROMVER_LEN: usize = 14;

pub const NO_BIOS: &str = "No BIOS selected";
pub const INVALID_BIOS: &str = "Invalid BIOS";

#[derive(Error, Debug)]
pub enum BiosError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image too small: {0} bytes")]
    TooSmall(usize),
    #[error("No ROMDIR table found")]
    MissingRomdir,
    #[error("No ROMVER entry in ROMDIR")]
    MissingRomver,
    #[error("ROMVER entry lies outside the image")]
    RomverOutOfBounds,
    #[error("Malformed version string: {0:?}")]
    MalformedVersion(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Japan,
    Usa,
    Europe,
    Asia,
    China,
    Unknown,
}

impl Region {
    fn from_code(code: u8) -> Self {
        match code {
            b'J' => Region::Japan,
            b'A' => Region::Usa,
            b'E' => Region::Europe,
            b'H' => Region::Asia,
            b'C' => Region::China,
            _ => Region::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Japan => "Japan",
            Region::Usa => "USA",
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::China => "China",
            Region::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleKind {
    Console,
    Devkit,
    Unknown,
}

impl ConsoleKind {
    fn from_code(code: u8) -> Self {
        match code {
            b'C' => ConsoleKind::Console,
            b'D' => ConsoleKind::Devkit,
            _ => ConsoleKind::Unknown,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConsoleKind::Console => "Console",
            ConsoleKind::Devkit => "Devkit",
            ConsoleKind::Unknown => "Unknown",
        }
    }
}

/// Version information decoded from ROMVER
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiosInfo {
    pub major: u8,
    pub minor: u8,
    pub region: Region,
    pub kind: ConsoleKind,
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl BiosInfo {
    /// Read and decode the BIOS image at `path`
    pub fn read(path: &Path) -> Result<Self, BiosError> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Decode an in-memory BIOS image
    pub fn parse(data: &[u8]) -> Result<Self, BiosError> {
        if data.len() < ROMDIR_ENTRY_SIZE * 2 {
            return Err(BiosError::TooSmall(data.len()));
        }

        let table = find_romdir(data).ok_or(BiosError::MissingRomdir)?;
        let (offset, size) = find_entry(data, table, b"ROMVER").ok_or(BiosError::MissingRomver)?;

        let end = offset.checked_add(size).ok_or(BiosError::RomverOutOfBounds)?;
        if size < ROMVER_LEN || end > data.len() {
            return Err(BiosError::RomverOutOfBounds);
        }

        parse_romver(&data[offset..offset + ROMVER_LEN])
    }
}

impl fmt::Display for BiosInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{:02}.{:02} ({:04}-{:02}-{:02}) {}",
            self.region.name(),
            self.major,
            self.minor,
            self.year,
            self.month,
            self.day,
            self.kind.name()
        )
    }
}

/// Human-readable summary for the BIOS at `path`
///
/// Never fails: unreadable or unrecognized images yield a placeholder.
pub fn describe(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return NO_BIOS.to_string();
    };

    match BiosInfo::read(path) {
        Ok(info) => info.to_string(),
        Err(e) => {
            log::warn!("Could not read BIOS {}: {}", path.display(), e);
            INVALID_BIOS.to_string()
        }
    }
}

/// Offset of the ROMDIR table, found by its leading `RESET` entry
fn find_romdir(data: &[u8]) -> Option<usize> {
    let limit = data.len().min(ROMDIR_SEARCH_LIMIT);
    (0..limit)
        .step_by(ROMDIR_ENTRY_SIZE)
        .find(|&offset| data[offset..].starts_with(b"RESET\0"))
}

/// Walk the table, returning the image offset and size of `name`
fn find_entry(data: &[u8], table: usize, name: &[u8]) -> Option<(usize, usize)> {
    let mut file_offset = 0usize;

    for entry in data[table..].chunks_exact(ROMDIR_ENTRY_SIZE) {
        let entry_name = &entry[..ROMDIR_NAME_LEN];
        if entry_name[0] == 0 {
            return None;
        }

        let file_size = u32::from_le_bytes([entry[12], entry[13], entry[14], entry[15]]) as usize;

        let trimmed = entry_name.split(|&b| b == 0).next().unwrap_or(entry_name);
        if trimmed == name {
            return Some((file_offset, file_size));
        }

        // Files are packed back to back on 16 byte boundaries
        file_offset = file_offset.checked_add(align16(file_size))?;
    }

    None
}

fn align16(size: usize) -> usize {
    (size + 15) & !15
}

fn parse_romver(raw: &[u8]) -> Result<BiosInfo, BiosError> {
    let malformed = || BiosError::MalformedVersion(String::from_utf8_lossy(raw).into_owned());

    let digits = |range: std::ops::Range<usize>| -> Result<u32, BiosError> {
        let field = &raw[range];
        if !field.iter().all(u8::is_ascii_digit) {
            return Err(malformed());
        }
        // All ASCII digits, so both conversions succeed
        std::str::from_utf8(field)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(malformed)
    };

    let major = digits(0..2)? as u8;
    let minor = digits(2..4)? as u8;
    let year = digits(6..10)? as u16;
    let month = digits(10..12)? as u8;
    let day = digits(12..14)? as u8;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(malformed());
    }

    Ok(BiosInfo {
        major,
        minor,
        region: Region::from_code(raw[4]),
        kind: ConsoleKind::from_code(raw[5]),
        year,
        month,
        day,
    })
}
