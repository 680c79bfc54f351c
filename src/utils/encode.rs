//! Name encoding for auto-allocated route IDs.

/// Alphabet for generated names: lowercase base-36, short and URL-safe.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encodes an allocated ID as a short route name.
pub fn encode_id(mut id: u64) -> String {
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    loop {
        out.push(ALPHABET[(id % base) as usize]);
        id /= base;
        if id == 0 {
            break;
        }
    }
    out.reverse();
    // ALPHABET is ASCII.
    String::from_utf8(out).expect("base-36 output is ASCII")
}
