use std::fmt;

/// Symbolic jump target, resolved to an absolute instruction address during linking.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Marker(u32);

impl Marker {
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JumpMarker {}", self.0)
    }
}

/// Handle to a subroutine registered in the function table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Function {
    id: u32,
    entry: Marker,
}

impl Function {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Marker placed at the first instruction of the body.
    pub fn entry(&self) -> Marker {
        self.entry
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function {}", self.id)
    }
}

/// Hands out marker and function numbers for a single program.
///
/// Numbering starts at 1 and is owned per program, so independently assembled programs are
/// numbered identically.
#[derive(Debug, Default)]
pub struct Symbols {
    markers: u32,
    functions: u32,
}

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&mut self) -> Marker {
        self.markers += 1;
        Marker(self.markers)
    }

    pub fn function(&mut self) -> Function {
        self.functions += 1;
        let entry = self.marker();
        Function {
            id: self.functions,
            entry,
        }
    }

    /// Amount of markers created so far.
    pub fn marker_count(&self) -> u32 {
        self.markers
    }
}

/// Forward-reference table of marker id -> resolved address.
#[derive(Debug, Default)]
pub struct MarkerTable(Vec<Option<u32>>);

impl MarkerTable {
    pub fn with_capacity(markers: u32) -> Self {
        MarkerTable(vec![None; markers as usize + 1])
    }

    /// Record the address of a marker. Returns `false` if it was already placed.
    pub fn place(&mut self, marker: Marker, address: u32) -> bool {
        let idx = marker.0 as usize;
        if idx >= self.0.len() {
            self.0.resize(idx + 1, None);
        }
        if self.0[idx].is_some() {
            return false;
        }
        self.0[idx] = Some(address);
        true
    }

    pub fn get(&self, marker: Marker) -> Option<u32> {
        self.0.get(marker.0 as usize).copied().flatten()
    }
}
