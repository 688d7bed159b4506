//! Fixed-bank register allocator
//!
//! The target machine exposes 32 general-purpose registers and nothing
//! else: no spilling, no liveness analysis, no graph coloring. Expressions
//! whose temporaries outgrow the bank are rejected, not rescued.

use crate::error::{Error, Result};

use super::instruction::Reg;

/// Number of registers in the bank
pub const REGISTER_COUNT: u8 = 32;

/// Allocator over the fixed 32-register bank
///
/// `acquire` always hands out the lowest free index, so the registers in
/// an emitted stream are deterministic for a given input. Registers with
/// lifetime-long occupants (the frame base, variables bound to registers)
/// are reserved up front and never enter the pool.
#[derive(Debug, Clone)]
pub struct RegisterAllocator {
    /// Bit i set when r:i is free for acquisition
    free: u32,
    /// Bit i set when r:i is permanently withheld from the pool
    reserved: u32,
}

impl RegisterAllocator {
    /// Create an allocator with the whole bank free
    pub fn new() -> Self {
        Self {
            free: u32::MAX,
            reserved: 0,
        }
    }

    /// Create an allocator with the given registers withheld from the pool
    pub fn with_reserved(registers: &[Reg]) -> Self {
        let mut allocator = Self::new();
        for reg in registers {
            allocator.reserve(*reg);
        }
        allocator
    }

    /// Permanently withhold a register from the pool
    ///
    /// Reserve before acquiring anything; reserving a register that is
    /// currently handed out leaves its eventual release unanswerable.
    pub fn reserve(&mut self, reg: Reg) {
        if reg.0 >= REGISTER_COUNT {
            return;
        }
        let bit = 1u32 << reg.0;
        self.reserved |= bit;
        self.free &= !bit;
    }

    /// Acquire the lowest-indexed free register
    pub fn acquire(&mut self) -> Result<Reg> {
        if self.free == 0 {
            return Err(Error::RegisterExhaustion);
        }
        let index = self.free.trailing_zeros() as u8;
        self.free &= !(1u32 << index);
        Ok(Reg(index))
    }

    /// Return an acquired register to the pool
    ///
    /// Releasing a register that is free, reserved, or out of range is an
    /// invariant violation and reported as `DoubleRelease`.
    pub fn release(&mut self, reg: Reg) -> Result<()> {
        if reg.0 >= REGISTER_COUNT {
            return Err(Error::DoubleRelease { reg });
        }
        let bit = 1u32 << reg.0;
        if self.reserved & bit != 0 || self.free & bit != 0 {
            return Err(Error::DoubleRelease { reg });
        }
        self.free |= bit;
        Ok(())
    }

    /// Number of registers currently acquirable
    pub fn free_count(&self) -> usize {
        self.free.count_ones() as usize
    }

    /// True when the register is in the pool and not handed out
    pub fn is_free(&self, reg: Reg) -> bool {
        reg.0 < REGISTER_COUNT && self.free & (1u32 << reg.0) != 0
    }

    /// True when the register is withheld from the pool
    pub fn is_reserved(&self, reg: Reg) -> bool {
        reg.0 < REGISTER_COUNT && self.reserved & (1u32 << reg.0) != 0
    }
}

impl Default for RegisterAllocator {
    fn default() -> Self {
        Self::new()
    }
}
