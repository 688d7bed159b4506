//! Append-only instruction stream

use std::fmt;

use super::instruction::Instruction;

/// Ordered sequence of emitted instructions
///
/// The stream only grows: instructions are appended in emission order and
/// never reordered or removed, so downstream stages may treat indices as
/// stable. The vector stays private to keep that guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionStream {
    instructions: Vec<Instruction>,
}

impl InstructionStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Append one instruction, returning its index in the stream
    pub fn emit(&mut self, instruction: Instruction) -> usize {
        self.instructions.push(instruction);
        self.instructions.len() - 1
    }

    /// Number of instructions emitted so far
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instruction at the given index, if emitted
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// All instructions in emission order
    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Consume the stream, yielding the instruction vector
    pub fn into_vec(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

impl fmt::Display for InstructionStream {
    /// Renders the stream as reference-dialect assembly, one line each
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "    {}", instruction)?;
        }
        Ok(())
    }
}
