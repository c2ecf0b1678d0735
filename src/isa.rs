use std::fmt;

/// Slot permanently holding the constant `1`.
pub const ONE_SLOT: u8 = 251;
/// Slot permanently holding the constant `0`.
pub const ZERO_SLOT: u8 = 252;
/// Number of addressable cells in the unified register/memory array.
pub const MEMORY_SLOTS: usize = 255;
/// Initial value of the return-address stack pointer.
pub const RETURN_STACK_BASE: u32 = 150;

/// Top-level instruction category.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Domain {
    Move = 0x01,
    Control = 0x02,
    Math = 0x03,
    Memory = 0x04,
}

/// Every operation the machine understands, keyed by `(domain, opcode)`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    /// Drive motors with four literal operands
    MoveImm,
    /// Drive motors with four register operands
    MoveReg,
    /// `[kind, var1, var2, result]`
    Compare,
    /// Jump to the address held in a register
    Jump,
    /// Jump to a literal address
    JumpImm,
    /// `[condition, address]`, jump when condition is zero
    JumpIfNotTrue,
    Add,
    AddImm,
    Sub,
    SubImm,
    /// `[address_reg, dest]`
    Load,
    /// `[address_reg, value]`
    Store,
}

impl Opcode {
    pub const ALL: [Opcode; 12] = [
        Opcode::MoveImm,
        Opcode::MoveReg,
        Opcode::Compare,
        Opcode::Jump,
        Opcode::JumpImm,
        Opcode::JumpIfNotTrue,
        Opcode::Add,
        Opcode::AddImm,
        Opcode::Sub,
        Opcode::SubImm,
        Opcode::Load,
        Opcode::Store,
    ];

    pub fn domain(self) -> Domain {
        use Opcode::*;
        match self {
            MoveImm | MoveReg => Domain::Move,
            Compare | Jump | JumpImm | JumpIfNotTrue => Domain::Control,
            Add | AddImm | Sub | SubImm => Domain::Math,
            Load | Store => Domain::Memory,
        }
    }

    /// Opcode value within its domain.
    pub fn code(self) -> u8 {
        use Opcode::*;
        match self {
            MoveImm => 0x00,
            MoveReg => 0x01,
            Compare => 0x00,
            Jump => 0x03,
            JumpImm => 0x05,
            JumpIfNotTrue => 0x06,
            Add => 0x00,
            AddImm => 0x01,
            Sub => 0x02,
            SubImm => 0x03,
            Load => 0x00,
            Store => 0x01,
        }
    }

    /// Number of operands following the domain and opcode bytes.
    pub fn arity(self) -> usize {
        use Opcode::*;
        match self {
            MoveImm | MoveReg | Compare => 4,
            Add | AddImm | Sub | SubImm => 3,
            JumpIfNotTrue | Load | Store => 2,
            Jump | JumpImm => 1,
        }
    }

    /// Whether the operation sets the program counter itself.
    pub fn transfers_control(self) -> bool {
        matches!(
            self,
            Opcode::Jump | Opcode::JumpImm | Opcode::JumpIfNotTrue
        )
    }

    pub fn decode(domain: u8, code: u8) -> Option<Opcode> {
        Self::ALL
            .into_iter()
            .find(|op| op.domain() as u8 == domain && op.code() == code)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::MoveImm => "movei",
            Opcode::MoveReg => "move",
            Opcode::Compare => "cmp",
            Opcode::Jump => "jump",
            Opcode::JumpImm => "jumpi",
            Opcode::JumpIfNotTrue => "jnt",
            Opcode::Add => "add",
            Opcode::AddImm => "addi",
            Opcode::Sub => "sub",
            Opcode::SubImm => "subi",
            Opcode::Load => "load",
            Opcode::Store => "store",
        };
        f.write_str(name)
    }
}

/// Comparison performed by a compare instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CompareKind {
    Equal = 0x00,
}

impl CompareKind {
    pub fn from_code(code: u8) -> Option<CompareKind> {
        match code {
            0x00 => Some(CompareKind::Equal),
            _ => None,
        }
    }

    pub fn eval(self, lhs: i32, rhs: i32) -> bool {
        match self {
            CompareKind::Equal => lhs == rhs,
        }
    }
}

impl fmt::Display for CompareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareKind::Equal => f.write_str("equal"),
        }
    }
}
