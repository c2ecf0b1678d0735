use std::fmt;
use std::ops::Range;

use crate::error::AsmError;
use crate::isa::MEMORY_SLOTS;

/// Usage category of a register. Each category owns a reserved range of the shared slot table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RegisterKind {
    /// Scratch values owned by user code
    Variable,
    /// Values shared between the program and its functions
    Global,
    /// Temporaries taken by the emitter itself
    System,
    /// Constants, never written after creation
    Static,
    StackPointer,
}

impl RegisterKind {
    /// First slot scanned when allocating.
    pub const fn start(self) -> u8 {
        match self {
            RegisterKind::Variable => 50,
            RegisterKind::Global => 100,
            RegisterKind::System => 125,
            RegisterKind::Static => 240,
            RegisterKind::StackPointer => 250,
        }
    }

    /// Slots this category may allocate from. Bounded by the start of the next category.
    pub fn range(self) -> Range<usize> {
        let end = match self {
            RegisterKind::Variable => RegisterKind::Global.start() as usize,
            RegisterKind::Global => RegisterKind::System.start() as usize,
            RegisterKind::System => RegisterKind::Static.start() as usize,
            RegisterKind::Static => RegisterKind::StackPointer.start() as usize,
            RegisterKind::StackPointer => MEMORY_SLOTS,
        };
        self.start() as usize..end
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegisterKind::Variable => "variable",
            RegisterKind::Global => "global",
            RegisterKind::System => "system",
            RegisterKind::Static => "static",
            RegisterKind::StackPointer => "stack pointer",
        };
        f.write_str(name)
    }
}

/// Handle to an allocated slot. Copying the handle does not copy ownership of the slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Register {
    slot: u8,
    kind: RegisterKind,
}

impl Register {
    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn kind(&self) -> RegisterKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.kind == RegisterKind::Static
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register {}", self.slot)
    }
}

/// Single table of slot ownership shared by every register category.
///
/// Nothing is reclaimed automatically: every register handed out by [`Allocator::allocate`]
/// stays taken until passed back to [`Allocator::release`].
///
/// While a function body is open, every slot it takes is recorded. Closing the body keeps
/// those slots taken for good, even ones the body released, since the body's instructions
/// write them on every call.
#[derive(Debug)]
pub struct Allocator {
    used: [bool; MEMORY_SLOTS],
    /// Slots touched by each open function body, innermost last
    scopes: Vec<[bool; MEMORY_SLOTS]>,
}

impl Allocator {
    pub fn new() -> Self {
        Allocator {
            used: [false; MEMORY_SLOTS],
            scopes: Vec::new(),
        }
    }

    fn take(&mut self, slot: usize) {
        self.used[slot] = true;
        if let Some(scope) = self.scopes.last_mut() {
            scope[slot] = true;
        }
    }

    /// Start recording the slots taken by a function body.
    pub(crate) fn open_scope(&mut self) {
        self.scopes.push([false; MEMORY_SLOTS]);
    }

    /// Stop recording and pin every slot the body took. Returns how many slots were pinned.
    pub(crate) fn close_scope(&mut self) -> usize {
        let Some(scope) = self.scopes.pop() else {
            return 0;
        };
        let mut pinned = 0;
        for (slot, touched) in scope.iter().enumerate() {
            if *touched {
                self.used[slot] = true;
                pinned += 1;
            }
        }
        pinned
    }

    /// Take the first free slot inside the category's range.
    pub fn allocate(&mut self, kind: RegisterKind) -> Result<Register, AsmError> {
        let slot = kind
            .range()
            .find(|&slot| !self.used[slot])
            .ok_or(AsmError::ExhaustedCategory { kind })?;
        self.take(slot);
        Ok(Register {
            slot: slot as u8,
            kind,
        })
    }

    /// Claim a fixed slot as a constant register, bypassing the category scan.
    pub fn reserve(&mut self, slot: u8) -> Result<Register, AsmError> {
        let used = self
            .used
            .get(slot as usize)
            .ok_or(AsmError::SlotOutOfRange { slot })?;
        if *used {
            return Err(AsmError::SlotInUse { slot });
        }
        self.take(slot as usize);
        Ok(Register {
            slot,
            kind: RegisterKind::Static,
        })
    }

    /// Mark the register's slot free for any category.
    pub fn release(&mut self, register: Register) {
        debug_assert!(
            self.used[register.slot as usize],
            "released register {} twice",
            register.slot
        );
        self.used[register.slot as usize] = false;
    }

    pub fn is_allocated(&self, slot: u8) -> bool {
        self.used.get(slot as usize).copied().unwrap_or(false)
    }

    pub fn allocated_count(&self) -> usize {
        self.used.iter().filter(|used| **used).count()
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_from_category_start() {
        let mut alloc = Allocator::new();
        assert_eq!(alloc.allocate(RegisterKind::Variable).unwrap().slot(), 50);
        assert_eq!(alloc.allocate(RegisterKind::Variable).unwrap().slot(), 51);
        assert_eq!(alloc.allocate(RegisterKind::Global).unwrap().slot(), 100);
        assert_eq!(alloc.allocate(RegisterKind::System).unwrap().slot(), 125);
        assert_eq!(
            alloc.allocate(RegisterKind::StackPointer).unwrap().slot(),
            250
        );
    }

    #[test]
    fn released_slot_is_reused() {
        let mut alloc = Allocator::new();
        let regs: Vec<_> = (0..5)
            .map(|_| alloc.allocate(RegisterKind::System).unwrap())
            .collect();
        alloc.release(regs[0]);
        let again = alloc.allocate(RegisterKind::System).unwrap();
        assert_eq!(again.slot(), regs[0].slot());
        // Next allocation continues past the still-held slots
        assert_eq!(alloc.allocate(RegisterKind::System).unwrap().slot(), 130);
    }

    #[test]
    fn never_hands_out_taken_slot() {
        let mut alloc = Allocator::new();
        let mut seen = Vec::new();
        for _ in 0..50 {
            let reg = alloc.allocate(RegisterKind::Variable).unwrap();
            assert!(!seen.contains(&reg.slot()));
            seen.push(reg.slot());
        }
    }

    #[test]
    fn category_does_not_grow_into_next() {
        let mut alloc = Allocator::new();
        for _ in 0..25 {
            alloc.allocate(RegisterKind::Global).unwrap();
        }
        assert_eq!(
            alloc.allocate(RegisterKind::Global),
            Err(AsmError::ExhaustedCategory {
                kind: RegisterKind::Global
            })
        );
        // System range untouched
        assert_eq!(alloc.allocate(RegisterKind::System).unwrap().slot(), 125);
    }

    #[test]
    fn stack_pointers_skip_reserved_constants() {
        let mut alloc = Allocator::new();
        alloc.reserve(251).unwrap();
        alloc.reserve(252).unwrap();
        let slots: Vec<_> = (0..3)
            .map(|_| alloc.allocate(RegisterKind::StackPointer).unwrap().slot())
            .collect();
        assert_eq!(slots, vec![250, 253, 254]);
        assert!(alloc.allocate(RegisterKind::StackPointer).is_err());
    }

    #[test]
    fn reserve_rejects_taken_slot() {
        let mut alloc = Allocator::new();
        let reg = alloc.reserve(252).unwrap();
        assert!(reg.is_static());
        assert_eq!(alloc.reserve(252), Err(AsmError::SlotInUse { slot: 252 }));
        assert_eq!(
            alloc.reserve(255),
            Err(AsmError::SlotOutOfRange { slot: 255 })
        );
    }

    #[test]
    fn closed_scope_pins_released_slots() {
        let mut alloc = Allocator::new();
        let outside = alloc.allocate(RegisterKind::Variable).unwrap();
        alloc.open_scope();
        let temp = alloc.allocate(RegisterKind::System).unwrap();
        let var = alloc.allocate(RegisterKind::Variable).unwrap();
        alloc.release(temp);
        alloc.release(var);
        // Reuse inside the body is fine
        assert_eq!(alloc.allocate(RegisterKind::System).unwrap(), temp);
        alloc.release(temp);
        assert_eq!(alloc.close_scope(), 2);

        assert!(alloc.is_allocated(temp.slot()));
        assert!(alloc.is_allocated(var.slot()));
        assert_eq!(alloc.allocate(RegisterKind::System).unwrap().slot(), 126);
        assert_eq!(alloc.allocate(RegisterKind::Variable).unwrap().slot(), 52);
        // Slots taken before the body stay under caller control
        alloc.release(outside);
        assert!(!alloc.is_allocated(outside.slot()));
    }

    #[test]
    fn nested_scopes_pin_independently() {
        let mut alloc = Allocator::new();
        alloc.open_scope();
        let outer = alloc.allocate(RegisterKind::System).unwrap();
        alloc.open_scope();
        let inner = alloc.allocate(RegisterKind::System).unwrap();
        alloc.release(inner);
        assert_eq!(alloc.close_scope(), 1);
        alloc.release(outer);
        assert_eq!(alloc.close_scope(), 1);
        assert!(alloc.is_allocated(outer.slot()));
        assert!(alloc.is_allocated(inner.slot()));
        assert_eq!(alloc.close_scope(), 0);
    }

    #[test]
    fn release_frees_for_other_categories() {
        let mut alloc = Allocator::new();
        let reg = alloc.reserve(60).unwrap();
        for _ in 0..10 {
            alloc.allocate(RegisterKind::Variable).unwrap();
        }
        assert_eq!(alloc.allocate(RegisterKind::Variable).unwrap().slot(), 61);
        alloc.release(reg);
        assert!(!alloc.is_allocated(60));
        assert_eq!(alloc.allocate(RegisterKind::Variable).unwrap().slot(), 60);
        assert_eq!(alloc.allocated_count(), 12);
    }
}
