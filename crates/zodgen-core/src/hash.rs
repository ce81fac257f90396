use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx]);
        value /= 62;
    }
    while result.len() < 11 {
        result.push(b'0');
    }
    result.reverse();
    result.into_iter().map(char::from).collect()
}

/// Hash of a source file's text, used to skip regeneration when a watched
/// input is touched without changing.
pub fn content_hash(source: &str) -> String {
    base62_encode(xxh64(source.as_bytes(), 0))
}

/// Hash of an input together with the options that affect its output.
///
/// `options` is any stable rendering of the generation options; a change in
/// either part produces a different fingerprint.
pub fn generation_fingerprint(source: &str, options: &str) -> String {
    let mut input = String::with_capacity(source.len() + options.len() + 1);
    input.push_str(source);
    input.push('\0');
    input.push_str(options);
    base62_encode(xxh64(input.as_bytes(), 0))
}
