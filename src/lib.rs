//! # Emberc - Expression Lowering for Embedded Targets
//!
//! [![Crates.io](https://img.shields.io/crates/v/emberc.svg)](https://crates.io/crates/emberc)
//! [![Documentation](https://docs.rs/emberc/badge.svg)](https://docs.rs/emberc)
//! [![License: MIT](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)
//!
//! The **lowering backend** of the Ember toolchain: it compiles array
//! accesses, address-of, and pointer dereference expressions from a small
//! C dialect into abstract operations for a 32-register core whose
//! peripherals live in the flat address space (memory-mapped I/O).
//!
//! ## Features
//!
//! - ✅ **Complete memory expressions** - `arr[i]`, `&v`, `*p`, and every
//!   nesting of them, with byte-exact effective addresses
//! - ⚡ **Single pass** - one left-to-right descent, no IR rewriting, no
//!   backtracking, deterministic output
//! - 🔒 **Strict register discipline** - a checked acquire/release pool
//!   over the fixed bank; exhaustion and double release are reported, not
//!   papered over
//! - 🔌 **Retargetable I/O** - peripheral base addresses are injected
//!   data, loadable from JSON, never baked into the lowering logic
//!
//! ## Quick Start
//!
//! Add Emberc to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! emberc = "0.4"
//! ```
//!
//! ### Basic Usage
//!
//! Lower `x = arr[0]` against a front-end-built symbol table:
//!
//! ```rust
//! use emberc::{Expression, Lowerer, PeripheralMap, Statement, Storage, Symbol, SymbolTable};
//!
//! # fn main() -> emberc::Result<()> {
//! // Declarations arrive pre-resolved from the front-end
//! let mut symbols = SymbolTable::new();
//! symbols.insert(Symbol::array("arr", Storage::Stack { offset: 16 }));
//! symbols.insert(Symbol::variable("x", Storage::Stack { offset: 0 }));
//! let peripherals = PeripheralMap::default_layout();
//!
//! // One lowerer per request
//! let mut lowerer = Lowerer::new(&symbols, &peripherals);
//! lowerer.lower_statement(&Statement::assign(
//!     Expression::variable("x"),
//!     Expression::index("arr", Expression::literal(0)),
//! ))?;
//!
//! let stream = lowerer.finish();
//! assert_eq!(stream.len(), 7); // scale-and-add address, load, store
//! println!("{}", stream);      // reference-dialect assembly listing
//! # Ok(())
//! # }
//! ```
//!
//! ### Driving Memory-Mapped I/O
//!
//! Device registers are symbols like any other; only their storage class
//! differs:
//!
//! ```rust
//! use emberc::{Expression, Lowerer, PeripheralMap, Statement, Storage, Symbol, SymbolTable};
//!
//! # fn main() -> emberc::Result<()> {
//! let mut symbols = SymbolTable::new();
//! symbols.insert(Symbol::variable(
//!     "uart_data",
//!     Storage::Device { peripheral: "uart".to_string(), offset: 0 },
//! ));
//!
//! let peripherals = PeripheralMap::default_layout();
//! let mut lowerer = Lowerer::new(&symbols, &peripherals);
//!
//! // uart_data = 72  (write a byte to the transmitter)
//! lowerer.lower_statement(&Statement::assign(
//!     Expression::variable("uart_data"),
//!     Expression::literal(72),
//! ))?;
//! assert_eq!(lowerer.instructions().len(), 3); // lea, mov, store
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Emberc sits between a front-end (parsing, typing, storage assignment)
//! and an assembler/encoder; both are separate tools:
//!
//! ```text
//! AST + SymbolTable + PeripheralMap → Lowerer → InstructionStream → assembler
//! ```
//!
//! ### Main Components
//!
//! - [`SymbolTable`] - Resolved declarations, immutable during lowering
//! - [`PeripheralMap`] - Board peripheral base addresses, injected data
//! - [`Lowerer`] - The pass: lvalue resolution plus value lowering
//! - [`RegisterAllocator`] - Lowest-free-first pool over the 32-register bank
//! - [`InstructionStream`] - Append-only emission order of a request
//! - [`Instruction`] - The abstract operation set (loads, stores, ALU)
//!
//! ## Error Handling
//!
//! Every failure names the offending construct and aborts the request:
//!
//! ```rust
//! use emberc::{Error, Expression, Lowerer, PeripheralMap, SymbolTable};
//!
//! let symbols = SymbolTable::new();
//! let peripherals = PeripheralMap::new();
//! let mut lowerer = Lowerer::new(&symbols, &peripherals);
//!
//! match lowerer.lower_expression(&Expression::variable("missing")) {
//!     Err(Error::UnresolvedSymbol { name }) => assert_eq!(name, "missing"),
//!     other => panic!("expected an unresolved symbol, got {:?}", other),
//! }
//! ```
//!
//! There is no spilling and no repair: an expression that needs more than
//! the bank's 32 registers is reported as exhaustion, and releasing a
//! register twice is surfaced as the internal bug it is.
//!
//! ## License
//!
//! Licensed under the [MIT License](https://opensource.org/licenses/MIT).

/// Version of the lowering backend
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod ast;
pub mod error;
pub mod hardware;
pub mod lower;
pub mod symbols;

// Re-export main types
pub use ast::{Expression, Statement};
pub use error::{Error, ErrorClass, Result};
pub use hardware::PeripheralMap;
pub use lower::{
    AddressOperand, BinOp, Instruction, InstructionStream, Location, LowerOptions, Lowerer, Place,
    Reg, RegisterAllocator, Value, REGISTER_COUNT,
};
pub use symbols::{Storage, Symbol, SymbolKind, SymbolTable, WORD_SIZE};
