//! Symbols and the symbol table
//!
//! Declarations are resolved by the front-end before lowering starts: by
//! the time an expression arrives here, every name it mentions must map to
//! a record describing what the name is and where its storage lives. The
//! table itself is immutable during lowering.

use std::collections::HashMap;

use crate::lower::Reg;

/// Machine word size in bytes
pub const WORD_SIZE: u32 = 4;

/// What kind of object a symbol names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Scalar variable
    Variable,
    /// Contiguous block of equal-width elements
    Array,
    /// Scalar whose value is interpreted as an address
    Pointer,
}

/// Where a symbol's storage lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Stack slot: byte offset from the frame base register
    Stack {
        /// Displacement from the frame base in bytes
        offset: u32,
    },
    /// Absolute address in the flat 32-bit address space
    Global {
        /// Link-time resolved address
        address: u32,
    },
    /// Bound to one register for the symbol's whole lifetime
    Register(Reg),
    /// Memory-mapped device register, resolved through the peripheral map
    Device {
        /// Peripheral name in the board's address map
        peripheral: String,
        /// Byte offset of the register within the peripheral's block
        offset: u32,
    },
}

/// Declaration record produced by the front-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Source-level name
    pub name: String,
    /// Kind of object the name denotes
    pub kind: SymbolKind,
    /// Width in bytes of the value, or of one element for arrays
    pub elem_width: u32,
    /// Storage assigned by the front-end
    pub storage: Storage,
}

impl Symbol {
    /// Scalar variable with word-sized storage
    pub fn variable(name: impl Into<String>, storage: Storage) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Variable,
            elem_width: WORD_SIZE,
            storage,
        }
    }

    /// Array of word-sized elements
    pub fn array(name: impl Into<String>, storage: Storage) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Array,
            elem_width: WORD_SIZE,
            storage,
        }
    }

    /// Pointer-holding scalar
    pub fn pointer(name: impl Into<String>, storage: Storage) -> Self {
        Symbol {
            name: name.into(),
            kind: SymbolKind::Pointer,
            elem_width: WORD_SIZE,
            storage,
        }
    }

    /// Same symbol with a different element width in bytes
    pub fn with_width(mut self, width: u32) -> Self {
        self.elem_width = width;
        self
    }

    /// Register the symbol is bound to, when its storage is a register
    pub fn register_home(&self) -> Option<Reg> {
        match &self.storage {
            Storage::Register(reg) => Some(*reg),
            _ => None,
        }
    }
}

/// Immutable view of the front-end's declarations
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    /// Register a declaration, replacing any previous record of the name
    pub fn insert(&mut self, symbol: Symbol) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    /// Look up a declaration by source name
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Number of declarations in the table
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True when nothing has been declared
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all declarations in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Registers occupied by register-bound symbols
    pub fn register_homes(&self) -> Vec<Reg> {
        self.symbols
            .values()
            .filter_map(|symbol| symbol.register_home())
            .collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
