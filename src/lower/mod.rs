//! # Expression Lowering
//!
//! This module turns front-end expression and statement trees into
//! register-machine operations for the 32-register target. Lowering is a
//! single forward pass: lvalues resolve to locations, values evaluate left
//! to right through a pool of temporary registers, and every operation is
//! appended to an ordered instruction stream.
//!
//! ## Module Structure
//!
//! ```text
//! lower/
//! ├── mod.rs          # This file - module definition and re-exports
//! ├── instruction.rs  # Reg, BinOp, AddressOperand, Instruction
//! ├── stream.rs       # InstructionStream (append-only output)
//! ├── regalloc.rs     # RegisterAllocator over the fixed bank
//! ├── location.rs     # Location, Value, Place descriptors
//! └── lowerer.rs      # Lowerer - address resolution and value lowering
//! ```
//!
//! ## Key Types
//!
//! - [`Reg`] - Physical register in the 32-register bank
//! - [`Instruction`] - Abstract machine operation (loads, stores, ALU)
//! - [`InstructionStream`] - Append-only emission order of a request
//! - [`RegisterAllocator`] - Lowest-free-first temporary pool, no spilling
//! - [`Location`] - Where a resolved lvalue lives (register or memory)
//! - [`Lowerer`] - The pass itself, one instance per lowering request

mod instruction;
mod location;
mod lowerer;
mod regalloc;
mod stream;

// Re-export all public types
pub use instruction::{abi, AddressOperand, BinOp, Instruction, Reg};
pub use location::{Location, Place, Value};
pub use lowerer::{LowerOptions, Lowerer};
pub use regalloc::{RegisterAllocator, REGISTER_COUNT};
pub use stream::InstructionStream;
