//! 4-byte OpenType tags for scripts, language systems, and features.

use std::fmt;

/// Generate a 4-byte tag from a byte string
///
/// Example:
///
/// ```text
/// assert_eq!(tag!(b"liga"), 0x6C696761);
/// ```
macro_rules! tag {
    ($w:expr) => {
        tag(*$w)
    };
}

#[derive(PartialEq, Eq, Clone, Copy)]
pub struct DisplayTag(pub u32);

const fn tag(chars: [u8; 4]) -> u32 {
    ((chars[3] as u32) << 0)
        | ((chars[2] as u32) << 8)
        | ((chars[1] as u32) << 16)
        | ((chars[0] as u32) << 24)
}

/// Build a tag from a string, padding with spaces to 4 characters.
pub fn from_string(s: &str) -> Option<u32> {
    if s.len() > 4 {
        return None;
    }

    let mut tag: u32 = 0;
    let mut count = 0;

    for c in s.chars() {
        if !c.is_ascii() || c.is_ascii_control() {
            return None;
        }

        tag = (tag << 8) | (c as u32);
        count += 1;
    }

    while count < 4 {
        tag = (tag << 8) | (' ' as u32);
        count += 1;
    }

    Some(tag)
}

impl fmt::Display for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.0;
        let mut s = String::with_capacity(4);
        s.push(char::from((tag >> 24) as u8));
        s.push(char::from(((tag >> 16) & 255) as u8));
        s.push(char::from(((tag >> 8) & 255) as u8));
        s.push(char::from((tag & 255) as u8));
        if s.chars().any(|c| !c.is_ascii() || c.is_ascii_control()) {
            write!(f, "0x{:08x}", tag)
        } else {
            s.trim_end_matches(' ').fmt(f)
        }
    }
}

impl fmt::Debug for DisplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_string().fmt(f)
    }
}

// Script tags
pub const ARAB: u32 = tag!(b"arab");
pub const CYRL: u32 = tag!(b"cyrl");
pub const DEVA: u32 = tag!(b"deva");
pub const DFLT: u32 = tag!(b"DFLT");
pub const GREK: u32 = tag!(b"grek");
pub const HEBR: u32 = tag!(b"hebr");
pub const KANA: u32 = tag!(b"kana");
pub const LATN: u32 = tag!(b"latn");
pub const THAI: u32 = tag!(b"thai");

// Language system tags
pub const ARA: u32 = tag!(b"ARA ");
pub const TRK: u32 = tag!(b"TRK ");
pub const URD: u32 = tag!(b"URD ");

// Feature tags
pub const AALT: u32 = tag!(b"aalt");
pub const C2SC: u32 = tag!(b"c2sc");
pub const CALT: u32 = tag!(b"calt");
pub const CASE: u32 = tag!(b"case");
pub const CCMP: u32 = tag!(b"ccmp");
pub const CLIG: u32 = tag!(b"clig");
pub const DLIG: u32 = tag!(b"dlig");
pub const FINA: u32 = tag!(b"fina");
pub const FRAC: u32 = tag!(b"frac");
pub const FWID: u32 = tag!(b"fwid");
pub const HLIG: u32 = tag!(b"hlig");
pub const HWID: u32 = tag!(b"hwid");
pub const INIT: u32 = tag!(b"init");
pub const ISOL: u32 = tag!(b"isol");
pub const LIGA: u32 = tag!(b"liga");
pub const LNUM: u32 = tag!(b"lnum");
pub const LOCL: u32 = tag!(b"locl");
pub const MEDI: u32 = tag!(b"medi");
pub const ONUM: u32 = tag!(b"onum");
pub const PNUM: u32 = tag!(b"pnum");
pub const PWID: u32 = tag!(b"pwid");
pub const RLIG: u32 = tag!(b"rlig");
pub const RTLM: u32 = tag!(b"rtlm");
pub const SALT: u32 = tag!(b"salt");
pub const SINF: u32 = tag!(b"sinf");
pub const SMCP: u32 = tag!(b"smcp");
pub const SS01: u32 = tag!(b"ss01");
pub const SS02: u32 = tag!(b"ss02");
pub const SS03: u32 = tag!(b"ss03");
pub const SUBS: u32 = tag!(b"subs");
pub const SUPS: u32 = tag!(b"sups");
pub const TNUM: u32 = tag!(b"tnum");
pub const VERT: u32 = tag!(b"vert");
pub const VRT2: u32 = tag!(b"vrt2");
pub const ZERO: u32 = tag!(b"zero");
