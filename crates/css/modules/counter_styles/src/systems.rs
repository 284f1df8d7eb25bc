//! Counter style algorithms (CSS Counter Styles 3 §3.1.1).
//!
//! Each algorithm returns `None` when the value is outside the range it can
//! represent; the caller substitutes the decimal rendering.

pub const LATIN_LOWER: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

pub const LATIN_UPPER: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

pub const GREEK_LOWER: [&str; 24] = [
    "α", "β", "γ", "δ", "ε", "ζ", "η", "θ", "ι", "κ", "λ", "μ", "ν", "ξ", "ο", "π", "ρ", "σ", "τ",
    "υ", "φ", "χ", "ψ", "ω",
];

const ROMAN_WEIGHTS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Longest symbolic representation produced before falling back to decimal.
const MAX_SYMBOLIC_REPEAT: u32 = 60;

/// Additive upper-case roman numerals, range 1..=3999.
pub fn roman(value: i32) -> Option<String> {
    if !(1..=3999).contains(&value) {
        return None;
    }
    let mut remaining = value.unsigned_abs();
    let mut out = String::new();
    for (weight, numeral) in ROMAN_WEIGHTS {
        while remaining >= weight {
            out.push_str(numeral);
            remaining -= weight;
        }
    }
    Some(out)
}

/// Two-digit zero padded decimal; negative values keep the sign in front.
pub fn decimal_leading_zero(value: i32) -> String {
    let magnitude = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{magnitude:02}")
}

/// Bijective base-N numbering: a, b, ..., z, aa, ab, ...
pub fn alphabetic(value: i32, symbols: &[&str]) -> Option<String> {
    let base = symbols.len() as u64;
    if value < 1 || base < 2 {
        return None;
    }
    let mut remaining = u64::from(value.unsigned_abs());
    let mut digits: Vec<&str> = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        digits.push(symbols.get((remaining % base) as usize).copied()?);
        remaining /= base;
    }
    Some(digits.into_iter().rev().collect())
}

/// Positional base-N numbering with the first symbol as zero.
pub fn numeric(value: i32, symbols: &[&str]) -> Option<String> {
    let base = symbols.len() as u64;
    if base < 2 {
        return None;
    }
    let mut remaining = u64::from(value.unsigned_abs());
    let mut digits: Vec<&str> = Vec::new();
    loop {
        digits.push(symbols.get((remaining % base) as usize).copied()?);
        remaining /= base;
        if remaining == 0 {
            break;
        }
    }
    let mut out = String::new();
    if value < 0 {
        out.push('-');
    }
    out.extend(digits.into_iter().rev());
    Some(out)
}

/// Symbols repeat forever; value 1 maps to the first symbol.
pub fn cyclic(value: i32, symbols: &[&str]) -> Option<String> {
    let count = i64::try_from(symbols.len()).ok().filter(|len| *len > 0)?;
    let index = (i64::from(value) - 1).rem_euclid(count);
    symbols
        .get(usize::try_from(index).ok()?)
        .map(|symbol| (*symbol).to_owned())
}

/// Cycle through the symbols, doubling them on each pass: *, †, **, ††, ...
pub fn symbolic(value: i32, symbols: &[&str]) -> Option<String> {
    let count = symbols.len() as u32;
    if value < 1 || count == 0 {
        return None;
    }
    let ordinal = value.unsigned_abs();
    let repeat = ordinal.div_ceil(count);
    if repeat > MAX_SYMBOLIC_REPEAT {
        return None;
    }
    let symbol = symbols.get(((ordinal - 1) % count) as usize)?;
    Some(symbol.repeat(repeat as usize))
}
