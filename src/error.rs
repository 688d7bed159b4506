//! Error types for the lowering backend

use thiserror::Error;

use crate::lower::Reg;

/// Lowering errors
///
/// Every failure is fatal for the current lowering request: the backend
/// reports the offending construct and stops. No repair or spilling is
/// attempted.
#[derive(Error, Debug, Clone)]
pub enum Error {
    // Symbol errors
    /// Reference to a name the symbol table does not know
    ///
    /// **Triggered by:** Lowering an identifier the front-end never declared
    /// **Example:** `x = missing + 1` when `missing` has no symbol entry
    /// **Prevention:** The front-end must register every declaration before lowering
    #[error("Unresolved symbol: {name}")]
    UnresolvedSymbol {
        /// Name as it appeared in the expression
        name: String,
    },

    /// Indexing a symbol that is not an in-memory array
    ///
    /// **Triggered by:** `base[i]` where `base` is a scalar, a pointer symbol,
    /// or an array bound to a register
    /// **Example:** `x[2]` when `x` was declared `uint32 x`
    #[error("Invalid array base: {name} does not name an in-memory array")]
    InvalidArrayBase {
        /// Symbol used as the array base
        name: String,
    },

    // Address errors
    /// Address taken of a value that has no memory address
    ///
    /// **Triggered by:** `&v` where `v` is bound to a register for its lifetime
    /// **Example:** `p = &counter` when `counter` lives in `r:12`
    /// **Prevention:** Give address-taken variables stack or global storage
    #[error("Cannot take address of register-bound variable {name} (lives in {reg})")]
    AddressOfRegisterBound {
        /// Variable whose address was requested
        name: String,
        /// Register the variable is bound to
        reg: Reg,
    },

    /// Assignment target does not denote a storage location
    #[error("Cannot assign to {found}: not an lvalue")]
    NotAnLvalue {
        /// Short description of the offending expression
        found: String,
    },

    // Allocator errors
    /// No free register remains in the pool
    ///
    /// **Triggered by:** An expression whose live temporaries exceed the bank
    /// **Recovery:** None; the backend never spills. Split the expression in
    /// the front-end instead.
    #[error("Register pool exhausted: every allocatable register is live")]
    RegisterExhaustion,

    /// Release of a register that is not currently held
    ///
    /// **Triggered by:** Releasing a free or reserved register
    /// **Recovery:** None; this is an invariant violation in the lowering
    /// logic itself, not a fault in the source program.
    #[error("Double release: register {reg} is not currently acquired")]
    DoubleRelease {
        /// Register the caller tried to release
        reg: Reg,
    },

    // Configuration errors
    /// Device-resident symbol names a peripheral missing from the address map
    #[error("Unknown peripheral: {name}")]
    UnknownPeripheral {
        /// Peripheral name from the symbol's storage class
        name: String,
    },

    /// Peripheral address map could not be parsed
    #[error("Invalid peripheral map: {0}")]
    InvalidPeripheralMap(String),
}

/// Broad classification of lowering failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The source program is invalid; the front-end or its user must change it
    SourceProgram,
    /// The request exceeds the machine's resources
    Capacity,
    /// An internal invariant was violated; indicates a bug, not a bad program
    Internal,
}

impl Error {
    /// Create an unresolved-symbol error
    pub fn unresolved(name: impl Into<String>) -> Self {
        Error::UnresolvedSymbol { name: name.into() }
    }

    /// Create a not-an-lvalue error from a node description
    pub fn not_lvalue(found: impl Into<String>) -> Self {
        Error::NotAnLvalue {
            found: found.into(),
        }
    }

    /// Classify the failure
    pub fn classify(&self) -> ErrorClass {
        match self {
            Error::UnresolvedSymbol { .. } => ErrorClass::SourceProgram,
            Error::InvalidArrayBase { .. } => ErrorClass::SourceProgram,
            Error::AddressOfRegisterBound { .. } => ErrorClass::SourceProgram,
            Error::NotAnLvalue { .. } => ErrorClass::SourceProgram,
            Error::UnknownPeripheral { .. } => ErrorClass::SourceProgram,
            Error::InvalidPeripheralMap(_) => ErrorClass::SourceProgram,

            Error::RegisterExhaustion => ErrorClass::Capacity,

            Error::DoubleRelease { .. } => ErrorClass::Internal,
        }
    }
}

/// Result type for lowering operations
pub type Result<T> = std::result::Result<T, Error>;
