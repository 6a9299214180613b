//! Output encodings of an assembled image. All of them are pure and keep the
//! word order of the image.

use md5::{Digest, Md5};

use crate::image::Image;

/// A file to be written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub data: Vec<u8>,
}

impl Artifact {
    fn text(name: &str, lines: Vec<String>) -> Self {
        let mut text = lines.join("\n");
        text.push('\n');
        Artifact {
            name: name.to_string(),
            data: text.into_bytes(),
        }
    }
}

/// One 32-character binary line per word.
pub fn bin32(words: &[u32]) -> Vec<String> {
    words.iter().map(|word| format!("{:032b}", word)).collect()
}

/// One 8-digit hex line per word.
pub fn hex32(words: &[u32]) -> Vec<String> {
    words.iter().map(|word| format!("{:08x}", word)).collect()
}

/// Word pairs as 16 hex digits, second word first. A trailing odd word is
/// followed by zeros.
pub fn hex64(words: &[u32]) -> Vec<String> {
    words
        .chunks(2)
        .map(|pair| match pair {
            [lo, hi] => format!("{:08x}{:08x}", hi, lo),
            [last] => format!("{:08x}{:08x}", last, 0),
            _ => unreachable!(),
        })
        .collect()
}

/// One byte per line, least significant byte of each word first.
pub fn byte_hex(words: &[u32]) -> Vec<String> {
    words
        .iter()
        .flat_map(|word| word.to_le_bytes())
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// Word pairs as 64 binary digits, second word first. A trailing odd word is
/// emitted alone.
pub fn bin64(words: &[u32]) -> Vec<String> {
    words
        .chunks(2)
        .map(|pair| match pair {
            [lo, hi] => format!("{:032b}{:032b}", hi, lo),
            [last] => format!("{:032b}", last),
            _ => unreachable!(),
        })
        .collect()
}

/// Every word as 4 little-endian bytes.
pub fn raw(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}

/// Lowercase hex MD5 of the raw image.
pub fn fingerprint(raw: &[u8]) -> String {
    Md5::digest(raw)
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// Every output file of an image, in the order they are written.
pub fn artifacts(image: &Image) -> Vec<Artifact> {
    let words = image.words();
    let raw = raw(words);
    let marker = format!("{}.txt", fingerprint(&raw));
    vec![
        Artifact::text("agc32.txt", bin32(words)),
        Artifact::text("agc.32_hex", hex32(words)),
        Artifact::text("agc.hex", hex64(words)),
        Artifact::text("agc.byte_hex", byte_hex(words)),
        Artifact::text("agc.txt", bin64(words)),
        Artifact {
            name: "agcram.bin".to_string(),
            data: raw,
        },
        Artifact {
            name: marker,
            data: vec![],
        },
    ]
}
