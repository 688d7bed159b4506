//! Expression lowering - transforms front-end trees to machine operations
//!
//! One `Lowerer` drives a single lowering request. It resolves lvalues to
//! locations, evaluates expressions strictly left to right into pool
//! temporaries, and appends instructions to an ever-growing stream. The
//! pass is one recursive descent over the tree; nothing is reordered,
//! folded, or revisited.
//!
//! Register discipline: every operand knows whether its register came from
//! the pool (`Value::owned` / `Place::owned_base`). The consumer of an
//! operand releases exactly the registers the operand owns, immediately
//! after its last use. Registers carrying long-lived variables are
//! reserved at construction and flow through untouched. After a
//! successful `lower_statement` the pool is back to its pre-statement
//! state; on error the request is abandoned wholesale, so no cleanup is
//! attempted.

use crate::ast::{Expression, Statement};
use crate::error::{Error, Result};
use crate::hardware::PeripheralMap;
use crate::symbols::{Storage, Symbol, SymbolKind, SymbolTable};

use super::instruction::{abi, AddressOperand, BinOp, Instruction, Reg};
use super::location::{Location, Place, Value};
use super::regalloc::RegisterAllocator;
use super::stream::InstructionStream;

/// Configuration for a lowering pass
#[derive(Debug, Clone)]
pub struct LowerOptions {
    /// Register stack slots are addressed against
    pub frame_base: Reg,
    /// Additional registers withheld from the temporary pool
    pub reserved: Vec<Reg>,
}

impl Default for LowerOptions {
    /// Reference board conventions: frame base in r:30, r:31 withheld for
    /// the instruction pointer
    fn default() -> Self {
        LowerOptions {
            frame_base: abi::FRAME_BASE,
            reserved: vec![abi::INSTRUCTION_POINTER],
        }
    }
}

/// Lowering pass over front-end statements
///
/// Borrows the symbol table and peripheral map read-only, so one set of
/// declarations can back any number of concurrent lowering requests.
pub struct Lowerer<'a> {
    /// Declarations resolved by the front-end
    symbols: &'a SymbolTable,
    /// Board peripheral addresses for device-resident symbols
    peripherals: &'a PeripheralMap,
    /// Register stack slots are addressed against
    frame_base: Reg,
    /// Temporary register pool
    allocator: RegisterAllocator,
    /// Emitted instructions
    stream: InstructionStream,
}

impl<'a> Lowerer<'a> {
    /// Create a lowerer with the reference board conventions
    pub fn new(symbols: &'a SymbolTable, peripherals: &'a PeripheralMap) -> Self {
        Self::with_options(symbols, peripherals, LowerOptions::default())
    }

    /// Create a lowerer with explicit register conventions
    ///
    /// The frame base, every option-listed register, and the home of every
    /// register-bound symbol are reserved before anything is lowered.
    pub fn with_options(
        symbols: &'a SymbolTable,
        peripherals: &'a PeripheralMap,
        options: LowerOptions,
    ) -> Self {
        let mut allocator = RegisterAllocator::new();
        allocator.reserve(options.frame_base);
        for reg in &options.reserved {
            allocator.reserve(*reg);
        }
        for reg in symbols.register_homes() {
            allocator.reserve(reg);
        }

        Lowerer {
            symbols,
            peripherals,
            frame_base: options.frame_base,
            allocator,
            stream: InstructionStream::new(),
        }
    }

    // =============================================================
    // STATEMENTS
    // =============================================================

    /// Lower a sequence of statements in order
    pub fn lower_program(&mut self, statements: &[Statement]) -> Result<()> {
        for statement in statements {
            self.lower_statement(statement)?;
        }
        tracing::debug!(
            "Lowered {} statements into {} instructions",
            statements.len(),
            self.stream.len()
        );
        Ok(())
    }

    /// Lower one statement
    ///
    /// All temporaries acquired for the statement are released by the time
    /// this returns successfully.
    pub fn lower_statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Assign { target, value } => self.lower_assign(target, value),
            Statement::Expression(expr) => {
                let value = self.lower_expression(expr)?;
                self.release_value(value)
            }
        }
    }

    /// Lower target = value
    ///
    /// The target's address is computed first, then the value; the store
    /// or copy comes last. Register-resident targets take a plain copy,
    /// everything else a store through the resolved address.
    fn lower_assign(&mut self, target: &Expression, value: &Expression) -> Result<()> {
        let place = self.resolve_place(target)?;
        let val = self.lower_expression(value)?;

        match place.location {
            Location::InRegister(dst) => {
                self.stream.emit(Instruction::Copy(dst, val.reg));
            }
            Location::AtAddress { base, offset } => {
                self.stream.emit(Instruction::StoreMemory(base, offset, val.reg));
            }
        }

        self.release_value(val)?;
        self.release_place(place)
    }

    // =============================================================
    // ADDRESS RESOLUTION
    // =============================================================

    /// Resolve an lvalue expression to the place it denotes
    ///
    /// Resolution may emit address-materializing instructions (global and
    /// device bases, array arithmetic) but never touches the value stored
    /// at the place. Non-lvalues are rejected.
    pub fn resolve_place(&mut self, expr: &Expression) -> Result<Place> {
        match expr {
            Expression::Variable(name) => {
                let symbol = self.lookup(name)?;
                self.storage_place(symbol)
            }

            Expression::Index { array, index } => self.lower_array_element(array, index),

            // The pointer's value is the address; which of load or store
            // happens through it is the consumer's choice.
            Expression::Deref(operand) => {
                let address = self.lower_expression(operand)?;
                Ok(Place::memory(address.reg, 0, address.owned))
            }

            Expression::Literal(_) | Expression::AddressOf(_) | Expression::Binary { .. } => {
                Err(Error::not_lvalue(expr.kind_name()))
            }
        }
    }

    /// Place of a symbol's own storage
    fn storage_place(&mut self, symbol: &Symbol) -> Result<Place> {
        match &symbol.storage {
            Storage::Register(reg) => Ok(Place::register(*reg)),

            // Frame-relative slots need no instructions; the base register
            // already holds the frame address.
            Storage::Stack { offset } => Ok(Place::memory(self.frame_base, *offset, false)),

            Storage::Global { address } => {
                let base = self.allocator.acquire()?;
                self.stream
                    .emit(Instruction::LoadAddress(base, AddressOperand::Absolute(*address)));
                Ok(Place::memory(base, 0, true))
            }

            Storage::Device { peripheral, offset } => {
                let base_address = self.peripheral_base(peripheral)?;
                let base = self.allocator.acquire()?;
                self.stream.emit(Instruction::LoadAddress(
                    base,
                    AddressOperand::Absolute(base_address),
                ));
                Ok(Place::memory(base, *offset, true))
            }
        }
    }

    /// Emit the scale-and-add address computation for array[index]
    ///
    /// Sequence: index value, element width, width * index, array base,
    /// base + scaled offset. The effective address lands in a temporary
    /// register with zero displacement.
    fn lower_array_element(&mut self, array: &str, index: &Expression) -> Result<Place> {
        let symbol = self.lookup(array)?;
        if symbol.kind != SymbolKind::Array {
            return Err(Error::InvalidArrayBase {
                name: array.to_string(),
            });
        }
        let base_operand = self.array_base_operand(symbol)?;
        let elem_width = symbol.elem_width;

        let index_value = self.lower_expression(index)?;

        let width = self.allocator.acquire()?;
        self.stream.emit(Instruction::LoadImmediate(width, elem_width));

        let scaled = self.allocator.acquire()?;
        self.stream
            .emit(Instruction::BinaryOp(scaled, BinOp::Mul, index_value.reg, width));
        self.release_value(index_value)?;
        self.allocator.release(width)?;

        let base = self.allocator.acquire()?;
        self.stream.emit(Instruction::LoadAddress(base, base_operand));

        let address = self.allocator.acquire()?;
        self.stream
            .emit(Instruction::BinaryOp(address, BinOp::Add, base, scaled));
        self.allocator.release(base)?;
        self.allocator.release(scaled)?;

        Ok(Place::memory(address, 0, true))
    }

    /// Address operand for an array's first element
    fn array_base_operand(&self, symbol: &Symbol) -> Result<AddressOperand> {
        match &symbol.storage {
            Storage::Stack { offset } => Ok(AddressOperand::BaseOffset(self.frame_base, *offset)),
            Storage::Global { address } => Ok(AddressOperand::Absolute(*address)),
            Storage::Device { peripheral, offset } => {
                let base = self.peripheral_base(peripheral)?;
                Ok(AddressOperand::Absolute(base + offset))
            }
            // An array squeezed into a register has no element addresses.
            Storage::Register(_) => Err(Error::InvalidArrayBase {
                name: symbol.name.clone(),
            }),
        }
    }

    // =============================================================
    // EXPRESSION VALUES
    // =============================================================

    /// Lower an expression to the register holding its value
    ///
    /// The returned value stays acquired (when pool-owned) until the
    /// caller hands it to `release_value`.
    pub fn lower_expression(&mut self, expr: &Expression) -> Result<Value> {
        match expr {
            Expression::Literal(value) => {
                let dst = self.allocator.acquire()?;
                self.stream.emit(Instruction::LoadImmediate(dst, *value));
                Ok(Value::owned(dst))
            }

            Expression::Variable(_) | Expression::Index { .. } | Expression::Deref(_) => {
                let place = self.resolve_place(expr)?;
                self.load_place(place)
            }

            Expression::AddressOf(operand) => self.lower_address_of(operand),

            Expression::Binary { op, left, right } => {
                let lhs = self.lower_expression(left)?;
                let rhs = self.lower_expression(right)?;
                let dst = self.allocator.acquire()?;
                self.stream
                    .emit(Instruction::BinaryOp(dst, *op, lhs.reg, rhs.reg));
                self.release_value(lhs)?;
                self.release_value(rhs)?;
                Ok(Value::owned(dst))
            }
        }
    }

    /// Load the value out of a resolved place
    ///
    /// Register-resident places yield their register directly with no
    /// instruction; memory places load into a fresh temporary.
    fn load_place(&mut self, place: Place) -> Result<Value> {
        match place.location {
            Location::InRegister(reg) => Ok(Value::bound(reg)),
            Location::AtAddress { base, offset } => {
                let dst = self.allocator.acquire()?;
                self.stream.emit(Instruction::LoadMemory(dst, base, offset));
                self.release_place(place)?;
                Ok(Value::owned(dst))
            }
        }
    }

    /// Materialize the address of an lvalue as a value
    fn lower_address_of(&mut self, operand: &Expression) -> Result<Value> {
        let place = self.resolve_place(operand)?;
        match place.location {
            Location::InRegister(reg) => {
                let name = match operand {
                    Expression::Variable(name) => name.clone(),
                    _ => operand.kind_name().to_string(),
                };
                Err(Error::AddressOfRegisterBound { name, reg })
            }
            Location::AtAddress { base, offset } => {
                let dst = self.allocator.acquire()?;
                self.stream.emit(Instruction::LoadAddress(
                    dst,
                    AddressOperand::BaseOffset(base, offset),
                ));
                self.release_place(place)?;
                Ok(Value::owned(dst))
            }
        }
    }

    // =============================================================
    // OPERAND LIFETIMES AND ACCESSORS
    // =============================================================

    /// Release a value's register when the value owns it
    pub fn release_value(&mut self, value: Value) -> Result<()> {
        if value.owned {
            self.allocator.release(value.reg)?;
        }
        Ok(())
    }

    /// Release a place's base register when the place owns it
    pub fn release_place(&mut self, place: Place) -> Result<()> {
        if place.owned_base {
            if let Location::AtAddress { base, .. } = place.location {
                self.allocator.release(base)?;
            }
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Result<&'a Symbol> {
        self.symbols.lookup(name).ok_or_else(|| Error::unresolved(name))
    }

    fn peripheral_base(&self, name: &str) -> Result<u32> {
        self.peripherals
            .base_address(name)
            .ok_or_else(|| Error::UnknownPeripheral {
                name: name.to_string(),
            })
    }

    /// Instructions emitted so far
    pub fn instructions(&self) -> &InstructionStream {
        &self.stream
    }

    /// Consume the lowerer, yielding the emitted stream
    pub fn finish(self) -> InstructionStream {
        self.stream
    }

    /// Read-only view of the register pool
    pub fn allocator(&self) -> &RegisterAllocator {
        &self.allocator
    }

    /// Number of pool registers currently free
    pub fn free_registers(&self) -> usize {
        self.allocator.free_count()
    }
}
