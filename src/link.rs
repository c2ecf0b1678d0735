use crate::emitter::{Entry, Instruction, Operand};
use crate::error::LinkError;
use crate::symbol::{Marker, MarkerTable};

/// Instruction with every operand resolved to a plain integer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LinkedInstruction {
    address: u32,
    /// `[length, domain, opcode, operands...]`
    fields: Vec<u32>,
    comment: String,
}

impl LinkedInstruction {
    pub fn address(&self) -> u32 {
        self.address
    }

    /// Length prefix followed by domain, opcode and operands.
    pub fn fields(&self) -> &[u32] {
        &self.fields
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum LinkedEntry {
    Instruction(LinkedInstruction),
    /// Annotation or placed marker, carried for the annotated listing only
    Note(Option<String>),
}

/// Output of the linker, ready for serialization.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LinkedProgram {
    entries: Vec<LinkedEntry>,
}

impl LinkedProgram {
    pub fn entries(&self) -> &[LinkedEntry] {
        &self.entries
    }

    pub fn instructions(&self) -> impl Iterator<Item = &LinkedInstruction> {
        self.entries.iter().filter_map(|entry| match entry {
            LinkedEntry::Instruction(instr) => Some(instr),
            LinkedEntry::Note(_) => None,
        })
    }

    /// Number of real instructions.
    pub fn len(&self) -> usize {
        self.instructions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign addresses to the stream and resolve every symbolic operand.
///
/// Addresses start at 0 and advance only for instructions; a marker resolves to the address of
/// the instruction following its placement.
pub(crate) fn link(
    stream: impl IntoIterator<Item = Entry>,
    markers: u32,
) -> Result<LinkedProgram, LinkError> {
    let stream: Vec<Entry> = stream.into_iter().collect();

    // Pass 1: addresses
    let mut table = MarkerTable::with_capacity(markers);
    let mut address = 0;
    for entry in &stream {
        match entry {
            Entry::Instruction(_) => address += 1,
            Entry::Marker(marker) => {
                if !table.place(*marker, address) {
                    return Err(LinkError::DuplicateMarker {
                        marker: marker.id(),
                    });
                }
            }
            Entry::Note(_) => (),
        }
    }

    // Pass 2: operands
    let mut entries = Vec::with_capacity(stream.len());
    let mut address = 0;
    for entry in stream {
        let linked = match entry {
            Entry::Instruction(instr) => {
                let linked = resolve(&table, &instr, address)?;
                address += 1;
                LinkedEntry::Instruction(linked)
            }
            Entry::Marker(marker) => LinkedEntry::Note(Some(marker.to_string())),
            Entry::Note(note) => LinkedEntry::Note(note),
        };
        entries.push(linked);
    }
    Ok(LinkedProgram { entries })
}

fn resolve(
    table: &MarkerTable,
    instr: &Instruction,
    address: u32,
) -> Result<LinkedInstruction, LinkError> {
    let lookup = |marker: Marker| {
        table.get(marker).ok_or(LinkError::UnresolvedMarker {
            marker: marker.id(),
            address,
        })
    };

    let op = instr.op();
    let mut fields = Vec::with_capacity(instr.operands().len() + 3);
    fields.push(2 + instr.operands().len() as u32);
    fields.push(op.domain() as u32);
    fields.push(op.code() as u32);
    for operand in instr.operands() {
        let value = match *operand {
            Operand::Lit(value) => value,
            Operand::Reg(reg) => reg.slot() as u32,
            Operand::Marker(marker) => lookup(marker)?,
            Operand::Function(func) => lookup(func.entry())?,
        };
        fields.push(value);
    }

    Ok(LinkedInstruction {
        address,
        fields,
        comment: instr.comment().to_string(),
    })
}
