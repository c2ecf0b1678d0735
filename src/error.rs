use miette::Diagnostic;
use thiserror::Error;

use crate::isa::Opcode;
use crate::register::RegisterKind;

// Assembly errors

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum AsmError {
    #[error("No free {kind} register left")]
    #[diagnostic(
        code(asm::exhausted),
        help("release temporaries once an operation no longer needs them")
    )]
    ExhaustedCategory { kind: RegisterKind },

    #[error("Attempted to overwrite constant register {slot}")]
    #[diagnostic(
        code(asm::illegal_mutation),
        help("static registers are fixed at creation and can only be read")
    )]
    IllegalMutation { slot: u8 },

    #[error("Register slot {slot} is already in use")]
    #[diagnostic(
        code(asm::slot_in_use),
        help("static registers must be placed on a free slot")
    )]
    SlotInUse { slot: u8 },

    #[error("Register slot {slot} is outside of memory")]
    #[diagnostic(
        code(asm::slot_out_of_range),
        help("memory has 255 slots, numbered 0 to 254")
    )]
    SlotOutOfRange { slot: u8 },
}

// Linker errors

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum LinkError {
    #[error("Instruction {address} references jump marker {marker}, which was never placed")]
    #[diagnostic(
        code(link::unresolved),
        help("every marker must be placed in the program before linking")
    )]
    UnresolvedMarker { marker: u32, address: u32 },

    #[error("Jump marker {marker} was placed more than once")]
    #[diagnostic(code(link::duplicate_marker))]
    DuplicateMarker { marker: u32 },
}

// Serializer errors

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Field value {value} of instruction {address} does not fit in a byte")]
    #[diagnostic(
        code(encode::overflow),
        help("every field of the binary format ranges from 0 to 255")
    )]
    FieldOverflow { address: u32, value: u32 },
}

// Virtual machine errors

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum VmError {
    #[error("Stream ended at byte {offset}: expected {expected} more fields, found {remaining}")]
    #[diagnostic(
        code(vm::truncated),
        help("the length prefix of the last instruction exceeds the remaining input")
    )]
    TruncatedStream {
        offset: usize,
        expected: usize,
        remaining: usize,
    },

    #[error("Malformed instruction at {index}: {reason}")]
    #[diagnostic(code(vm::malformed))]
    MalformedInstruction { index: usize, reason: String },

    #[error("Unknown opcode {opcode:#04x} in domain {domain:#04x} at {pc}")]
    #[diagnostic(code(vm::unknown_opcode))]
    UnknownOpcode { pc: usize, domain: u8, opcode: u8 },

    #[error("Unknown comparison kind {kind:#04x} at {pc}")]
    #[diagnostic(code(vm::unknown_comparison))]
    UnknownComparison { pc: usize, kind: u8 },

    #[error("`{op}` at {pc} addressed slot {address}, outside of memory")]
    #[diagnostic(
        code(vm::out_of_range),
        help("memory slots range from 0 to 254")
    )]
    AddressOutOfRange { pc: usize, op: Opcode, address: i64 },

    #[error("Execution did not halt within {limit} steps")]
    #[diagnostic(
        code(vm::step_limit),
        help("raise the limit with `--max-steps` if the program is expected to run longer")
    )]
    StepLimitExceeded { limit: u64 },
}
