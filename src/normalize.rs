//! Line-ending normalization: CR and CRLF become LF, everything else is copied.

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Convert every CR, CRLF and LF in `input` to a single LF.
pub fn normalize(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    normalize_into(input, &mut out);
    out
}

/// Same as [`normalize`], appending to `out` instead of allocating.
///
/// Appends at most `input.len()` bytes, so reserving that much up front
/// avoids any reallocation.
pub fn normalize_into(input: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < input.len() {
        let b = input[i];
        if b == CR {
            out.push(LF);
            // A CR at the very end has no lookahead byte.
            i += if input.get(i + 1) == Some(&LF) { 2 } else { 1 };
        } else {
            out.push(b);
            i += 1;
        }
    }
}

/// True when `input` holds no CR, i.e. `normalize` would return it unchanged.
pub fn is_normalized(input: &[u8]) -> bool {
    !input.contains(&CR)
}
