/// Number of distinct auto-allocatable pattern symbols: the lowercase
/// letters and the run of Latin-1 characters above them.
pub const SYMBOL_SPACE: usize = 120;

/// Hands out unique one-character symbols for fields that carry no explicit
/// `bitname`. One allocator per instruction; explicit user symbols bypass it
/// entirely, so a user may deliberately share a symbol across fields.
#[derive(Debug)]
pub struct SymbolAllocator {
    occupied: [bool; SYMBOL_SPACE],
}

impl SymbolAllocator {
    pub fn new() -> Self {
        Self {
            occupied: [false; SYMBOL_SPACE],
        }
    }

    /// Next unused symbol, starting at 'a', or `None` once all 120 are taken.
    pub fn allocate(&mut self) -> Option<char> {
        for (i, used) in self.occupied.iter_mut().enumerate() {
            if !*used {
                *used = true;
                return Some((b'a' + i as u8) as char);
            }
        }
        None
    }

    /// Clears occupancy; equivalent to starting a new instruction.
    pub fn reset(&mut self) {
        self.occupied = [false; SYMBOL_SPACE];
    }
}

impl Default for SymbolAllocator {
    fn default() -> Self {
        Self::new()
    }
}
