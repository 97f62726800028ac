//! Colombian NIT check-digit validation (DIAN weighted modulus 11).
//!
//! A NIT is a base number of up to 15 digits plus one verification digit,
//! written `900373115-3` or run together as `9003731153`. The check digit is
//! computed by weighting the base digits from the right with a fixed prime
//! table, taking the sum modulo 11; residues 0 and 1 map to themselves,
//! anything else to `11 - residue`.

/// DIAN weight factors, applied to base digits right to left.
const FACTORS: [u32; 15] = [3, 7, 13, 17, 19, 23, 29, 37, 41, 43, 47, 53, 59, 67, 71];

/// Compute the verification digit for a NIT base number.
///
/// Returns `None` unless `base` is 1 to 15 ASCII digits.
pub fn check_digit(base: &str) -> Option<u32> {
    let base = base.trim();
    if base.is_empty() || base.len() > 15 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = base
        .bytes()
        .rev()
        .zip(FACTORS.iter())
        .map(|(digit, factor)| u32::from(digit - b'0') * factor)
        .sum();
    let residue = sum % 11;
    Some(match residue {
        0 | 1 => residue,
        r => 11 - r,
    })
}

/// Verify a full NIT, either `base-dv` or the digits run together with the
/// verification digit last.
pub fn is_valid(nit: &str) -> bool {
    let nit = nit.trim();
    if !nit.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return false;
    }
    let (base, dv) = match nit.split_once('-') {
        Some((base, dv)) => (base, dv),
        None if nit.len() >= 2 => nit.split_at(nit.len() - 1),
        None => return false,
    };
    if dv.len() != 1 || !dv.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    match check_digit(base) {
        Some(expected) => dv.parse::<u32>().ok() == Some(expected),
        None => false,
    }
}
