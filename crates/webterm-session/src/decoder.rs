//! Streaming UTF-8 decoding for session output.
//!
//! Output arrives in arbitrary chunks, so a multi-byte sequence can be cut
//! anywhere. The decoder keeps the unfinished tail of one chunk and prepends
//! it to the next. Invalid bytes become U+FFFD, one replacement per maximal
//! invalid subsequence.

/// Longest possible incomplete UTF-8 prefix.
const MAX_PENDING: usize = 3;

/// Decode context that lives for the whole session.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self {
            pending: Vec::with_capacity(MAX_PENDING),
        }
    }

    /// Decode one chunk, holding back a trailing partial character.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if self.pending.is_empty() {
            return self.decode_bytes(chunk);
        }

        let mut joined = std::mem::take(&mut self.pending);
        joined.extend_from_slice(chunk);
        self.decode_bytes(&joined)
    }

    /// Number of bytes held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Emit a replacement for any held-back partial character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    fn decode_bytes(&mut self, mut input: &[u8]) -> String {
        let mut out = String::with_capacity(input.len());

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    out.push_str(text);
                    break;
                }
                Err(e) => {
                    let (valid, rest) = input.split_at(e.valid_up_to());
                    out.push_str(std::str::from_utf8(valid).unwrap_or_default());

                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        None => {
                            self.pending.extend_from_slice(rest);
                            break;
                        }
                    }
                }
            }
        }

        out
    }
}
