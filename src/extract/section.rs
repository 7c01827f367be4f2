// Wed Feb 11 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;

// One dump line: indented address column (digits), the hex-byte groups, then
// a run of two or more spaces that starts the ASCII rendition. Restricted to
// spaces/tabs so a match can never bleed across lines.
static SECTION_DATA_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]+\d+[ \t]+((?:[0-9a-f]{2,8}[ \t])*[0-9a-f]{2,8})[ \t]{2,}").unwrap()
});

/// Decode the textual output of `objdump -s` over the initialized-data
/// section back into the uint32 sequence the compiler wrote there. Hex byte
/// pairs are concatenated across lines in order and folded little-endian,
/// four bytes per value; a trailing remainder shorter than four bytes is
/// dropped (the probe array's element type is fixed-width, so in practice
/// there is none).
pub fn decode_section_dump(output: &str) -> Vec<u32> {
    let mut hex = String::new();
    for captures in SECTION_DATA_PATTERN.captures_iter(output) {
        hex.extend(captures[1].chars().filter(|c| !c.is_whitespace()));
    }

    let digits = hex.as_bytes();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let high = (pair[0] as char).to_digit(16);
        let low = (pair[1] as char).to_digit(16);
        if let (Some(high), Some(low)) = (high, low) {
            bytes.push((high * 16 + low) as u8);
        }
    }

    bytes
        .chunks_exact(4)
        .map(|word| u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .collect()
}
