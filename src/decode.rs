use std::fmt;

use crate::error::VmError;

/// Decoded instruction, fields exactly as they appeared in the stream.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RawInstruction {
    pub domain: u8,
    pub opcode: u8,
    pub operands: Vec<u8>,
}

impl RawInstruction {
    /// Fields including the length prefix, as produced by the linker.
    pub fn fields(&self) -> Vec<u32> {
        let mut fields = Vec::with_capacity(self.operands.len() + 3);
        fields.push(2 + self.operands.len() as u32);
        fields.push(self.domain as u32);
        fields.push(self.opcode as u32);
        fields.extend(self.operands.iter().map(|&op| op as u32));
        fields
    }
}

impl fmt::Display for RawInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.fields())
    }
}

/// Decode a `0`/`1` character stream. Any other character is discarded as formatting noise.
pub fn parse_bits(input: &str) -> Result<Vec<RawInstruction>, VmError> {
    let bits: Vec<u8> = input
        .bytes()
        .filter_map(|c| match c {
            b'0' => Some(0),
            b'1' => Some(1),
            _ => None,
        })
        .collect();

    let chunks = bits.chunks_exact(8);
    if !chunks.remainder().is_empty() {
        // Partial trailing byte
        return Err(VmError::TruncatedStream {
            offset: bits.len() / 8,
            expected: 1,
            remaining: 0,
        });
    }
    let bytes: Vec<u8> = chunks
        .map(|chunk| chunk.iter().fold(0u8, |acc, bit| (acc << 1) | bit))
        .collect();
    parse_bytes(&bytes)
}

/// Split a byte stream into length-prefixed instructions.
pub fn parse_bytes(bytes: &[u8]) -> Result<Vec<RawInstruction>, VmError> {
    let mut instrs = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let length = bytes[offset] as usize;
        let remaining = bytes.len() - offset - 1;
        if length > remaining {
            return Err(VmError::TruncatedStream {
                offset,
                expected: length,
                remaining,
            });
        }
        if length < 2 {
            return Err(VmError::MalformedInstruction {
                index: instrs.len(),
                reason: format!("length prefix {length} leaves no room for domain and opcode"),
            });
        }
        let fields = &bytes[offset + 1..offset + 1 + length];
        instrs.push(RawInstruction {
            domain: fields[0],
            opcode: fields[1],
            operands: fields[2..].to_vec(),
        });
        offset += 1 + length;
    }
    Ok(instrs)
}
