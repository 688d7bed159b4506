//! Register-machine instruction definitions
//!
//! The lowering pass emits these abstract operations into an append-only
//! stream. Encoding them for a particular board (instruction formats,
//! relocation, linking) belongs to later toolchain stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physical register in the 32-register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg(pub u8);

impl Reg {
    /// Creates a register reference with the given bank index
    pub fn new(index: u8) -> Self {
        Self(index)
    }

    /// Bank index of this register
    pub fn index(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r:{}", self.0)
    }
}

/// Register conventions of the reference board
///
/// The lowering core itself has no fixed register roles; these are the
/// assignments the stock runtime expects, applied through `LowerOptions`.
pub mod abi {
    use super::Reg;

    /// Stack slots are addressed relative to this register
    pub const FRAME_BASE: Reg = Reg(30);
    /// Instruction pointer, maintained by the core itself
    pub const INSTRUCTION_POINTER: Reg = Reg(31);
}

/// Binary ALU operation (dst = lhs op rhs; comparisons yield 0 or 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    /// Addition
    Add,
    /// Subtraction
    Sub,
    /// Multiplication
    Mul,
    /// Unsigned division
    Div,
    /// Unsigned remainder
    Rem,
    /// Bitwise AND
    And,
    /// Bitwise OR
    Or,
    /// Bitwise XOR
    Xor,
    /// Logical shift left
    Shl,
    /// Logical shift right
    Shr,
    /// Equality
    Eq,
    /// Inequality
    Ne,
    /// Unsigned less-than
    Lt,
    /// Unsigned less-or-equal
    Le,
    /// Unsigned greater-than
    Gt,
    /// Unsigned greater-or-equal
    Ge,
}

impl BinOp {
    /// Assembly mnemonic in the reference dialect
    pub fn mnemonic(&self) -> &'static str {
        match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
            BinOp::Rem => "rem",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
            BinOp::Shl => "shl",
            BinOp::Shr => "shr",
            BinOp::Eq => "eq",
            BinOp::Ne => "ne",
            BinOp::Lt => "lt",
            BinOp::Le => "le",
            BinOp::Gt => "gt",
            BinOp::Ge => "ge",
        }
    }

    /// Maps a source-language operator token to its ALU operation
    pub fn from_operator(op: &str) -> Option<Self> {
        match op {
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "%" => Some(BinOp::Rem),
            "&" => Some(BinOp::And),
            "|" => Some(BinOp::Or),
            "^" => Some(BinOp::Xor),
            "<<" => Some(BinOp::Shl),
            ">>" => Some(BinOp::Shr),
            "==" => Some(BinOp::Eq),
            "!=" => Some(BinOp::Ne),
            "<" => Some(BinOp::Lt),
            "<=" => Some(BinOp::Le),
            ">" => Some(BinOp::Gt),
            ">=" => Some(BinOp::Ge),
            _ => None,
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Address source for `LoadAddress`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressOperand {
    /// Link-time constant: a resolved global or peripheral base
    Absolute(u32),
    /// Runtime computation: base register plus byte offset
    BaseOffset(Reg, u32),
}

/// Abstract machine instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    // Constants and addresses
    /// Load immediate: dst = value
    LoadImmediate(Reg, u32),
    /// Materialize an address: dst = addr
    LoadAddress(Reg, AddressOperand),

    // Memory
    /// Load word from memory: dst = mem[base + offset]
    LoadMemory(Reg, Reg, u32),
    /// Store word to memory: mem[base + offset] = src
    StoreMemory(Reg, u32, Reg),

    // ALU
    /// Binary operation: dst = lhs op rhs
    BinaryOp(Reg, BinOp, Reg, Reg),

    // Register operations
    /// Register copy: dst = src
    Copy(Reg, Reg),
}

fn mem_operand(base: Reg, offset: u32) -> String {
    if offset == 0 {
        format!("[{}]", base)
    } else {
        format!("[{}+{}]", base, offset)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::LoadImmediate(dst, value) => write!(f, "mov {}, {}", dst, value),
            Instruction::LoadAddress(dst, AddressOperand::Absolute(addr)) => {
                write!(f, "lea {}, {:#010x}", dst, addr)
            }
            Instruction::LoadAddress(dst, AddressOperand::BaseOffset(base, offset)) => {
                write!(f, "lea {}, {}", dst, mem_operand(*base, *offset))
            }
            Instruction::LoadMemory(dst, base, offset) => {
                write!(f, "lds {}, {}", dst, mem_operand(*base, *offset))
            }
            Instruction::StoreMemory(base, offset, src) => {
                write!(f, "lds {}, {}", mem_operand(*base, *offset), src)
            }
            Instruction::BinaryOp(dst, op, lhs, rhs) => {
                write!(f, "{} {}, {}, {}", op.mnemonic(), dst, lhs, rhs)
            }
            Instruction::Copy(dst, src) => write!(f, "mov {}, {}", dst, src),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_display_uses_reference_dialect() {
        assert_eq!(Reg(0).to_string(), "r:0");
        assert_eq!(Reg(31).to_string(), "r:31");
    }

    #[test]
    fn test_operator_mapping_round_trips_mnemonics() {
        assert_eq!(BinOp::from_operator("+"), Some(BinOp::Add));
        assert_eq!(BinOp::from_operator("<<"), Some(BinOp::Shl));
        assert_eq!(BinOp::from_operator("&&"), None);
        assert_eq!(BinOp::Mul.mnemonic(), "mul");
    }

    #[test]
    fn test_instruction_display_matches_reference_dialect() {
        assert_eq!(
            Instruction::LoadImmediate(Reg(1), 42).to_string(),
            "mov r:1, 42"
        );
        assert_eq!(
            Instruction::LoadAddress(Reg(2), AddressOperand::Absolute(0x1000_0000)).to_string(),
            "lea r:2, 0x10000000"
        );
        assert_eq!(
            Instruction::LoadAddress(Reg(2), AddressOperand::BaseOffset(Reg(30), 8)).to_string(),
            "lea r:2, [r:30+8]"
        );
        assert_eq!(
            Instruction::LoadMemory(Reg(3), Reg(2), 0).to_string(),
            "lds r:3, [r:2]"
        );
        assert_eq!(
            Instruction::StoreMemory(Reg(2), 4, Reg(3)).to_string(),
            "lds [r:2+4], r:3"
        );
        assert_eq!(
            Instruction::BinaryOp(Reg(4), BinOp::Add, Reg(1), Reg(2)).to_string(),
            "add r:4, r:1, r:2"
        );
        assert_eq!(Instruction::Copy(Reg(5), Reg(1)).to_string(), "mov r:5, r:1");
    }
}
