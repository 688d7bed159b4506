//! Location descriptors for resolved lvalues

use super::instruction::Reg;

/// Where a resolved lvalue lives
///
/// Exactly one of the two shapes applies to any lvalue; consumers branch
/// on the variant to choose between register moves and memory traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// The value occupies this register for its whole lifetime
    InRegister(Reg),
    /// The value lives in memory at base + offset
    AtAddress {
        /// Register holding the base address
        base: Reg,
        /// Byte displacement from the base
        offset: u32,
    },
}

impl Location {
    /// Location of a register-resident value
    pub fn in_register(reg: Reg) -> Self {
        Location::InRegister(reg)
    }

    /// Location of a memory-resident value
    pub fn at_address(base: Reg, offset: u32) -> Self {
        Location::AtAddress { base, offset }
    }

    /// True when reads and writes are plain register operations
    pub fn is_register(&self) -> bool {
        matches!(self, Location::InRegister(_))
    }

    /// True when reads and writes go through memory
    pub fn is_memory(&self) -> bool {
        matches!(self, Location::AtAddress { .. })
    }
}

/// Evaluated operand: the register holding the value, plus whether that
/// register was acquired from the pool for this value
///
/// Consumers release owned operands as soon as they are used; registers
/// carrying long-lived variables are passed through untouched. Mixing the
/// two up would release a variable's home and surface as `DoubleRelease`.
#[derive(Debug, Clone, Copy)]
pub struct Value {
    /// Register holding the value
    pub(crate) reg: Reg,
    /// True when the consumer must release `reg`
    pub(crate) owned: bool,
}

impl Value {
    /// Value in a pool-acquired temporary
    pub(crate) fn owned(reg: Reg) -> Self {
        Value { reg, owned: true }
    }

    /// Value in a register the pool does not manage
    pub(crate) fn bound(reg: Reg) -> Self {
        Value { reg, owned: false }
    }

    /// Register holding the value
    pub fn reg(&self) -> Reg {
        self.reg
    }

    /// True when the register came from the pool and must be released
    pub fn is_temporary(&self) -> bool {
        self.owned
    }
}

/// Resolved lvalue: the location plus ownership of its base register
#[derive(Debug, Clone, Copy)]
pub struct Place {
    /// Resolved location of the lvalue
    pub(crate) location: Location,
    /// True when the location's base register must be released after use
    pub(crate) owned_base: bool,
}

impl Place {
    /// Lvalue living in a register outside the pool
    pub(crate) fn register(reg: Reg) -> Self {
        Place {
            location: Location::in_register(reg),
            owned_base: false,
        }
    }

    /// Lvalue in memory behind a base register
    pub(crate) fn memory(base: Reg, offset: u32, owned_base: bool) -> Self {
        Place {
            location: Location::at_address(base, offset),
            owned_base,
        }
    }

    /// Resolved location of the lvalue
    pub fn location(&self) -> Location {
        self.location
    }

    /// True when the base register came from the pool and must be released
    pub fn base_is_temporary(&self) -> bool {
        self.owned_base
    }
}
