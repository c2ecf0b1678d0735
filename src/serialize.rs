use std::fmt::Write;

use crate::error::EncodeError;
use crate::link::{LinkedEntry, LinkedInstruction, LinkedProgram};

fn checked_bytes(instr: &LinkedInstruction) -> Result<Vec<u8>, EncodeError> {
    instr
        .fields()
        .iter()
        .map(|&value| {
            u8::try_from(value).map_err(|_| EncodeError::FieldOverflow {
                address: instr.address(),
                value,
            })
        })
        .collect()
}

/// Every field of every instruction as one byte, in program order.
pub fn to_bytes(program: &LinkedProgram) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::new();
    for instr in program.instructions() {
        bytes.extend(checked_bytes(instr)?);
    }
    Ok(bytes)
}

/// Render the program as a stream of `0`/`1` characters, 8 per field, most significant bit first.
pub fn encode_bits(program: &LinkedProgram) -> Result<String, EncodeError> {
    let bytes = to_bytes(program)?;
    let mut bits = String::with_capacity(bytes.len() * 8);
    for byte in bytes {
        // Writing to a `String` cannot fail
        let _ = write!(bits, "{byte:08b}");
    }
    Ok(bits)
}

/// Human readable listing, one line per instruction.
///
/// With `show_notes`, annotations and marker placements are interleaved as `LLL` lines.
pub fn annotate(program: &LinkedProgram, show_notes: bool) -> String {
    let mut out = String::new();
    for entry in program.entries() {
        match entry {
            LinkedEntry::Instruction(instr) => {
                let _ = writeln!(
                    out,
                    "{:03}: {:?}    # {}",
                    instr.address(),
                    instr.fields(),
                    instr.comment()
                );
            }
            LinkedEntry::Note(note) if show_notes => match note {
                Some(text) => {
                    let _ = writeln!(out, "LLL # {text}");
                }
                None => out.push_str("LLL \n"),
            },
            LinkedEntry::Note(_) => (),
        }
    }
    out
}
