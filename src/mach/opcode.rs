use crate::error;
use crate::lang::Error;
use std::ops::RangeInclusive;

/// ## Instruction set
///
/// Operands are whitespace separated. Quoted strings and JSON literals are a
/// single operand even when they contain spaces.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // *** Registers
    /// `mov dst src`
    Mov,
    /// `newreg name`
    NewReg,
    /// `delreg name`
    DelReg,

    // *** Arithmetic and comparison, `op a b dst`
    Cmp,
    Add,
    Sub,
    Mult,
    Div,
    Pow,
    Mod,
    /// `inc reg` or `incr reg`
    Inc,
    /// `dec reg` or `decr reg`
    Dec,
    /// `rev reg`
    Rev,

    // *** Output
    Print,
    Println,
    PrintReg,
    PrintRegVal,
    PrintStack,
    PrintStackTrace,

    // *** Control flow
    Lb,
    Jmp,
    /// `jmpcond label reg`
    JmpCond,
    Function,
    EndFunction,
    Call,
    Async,
    Sleep,
    /// `exit [value]` or `quit [value]`
    Exit,
}

impl Opcode {
    pub fn from_command(command: &str) -> Option<Opcode> {
        use Opcode::*;
        Some(match command {
            "mov" => Mov,
            "newreg" => NewReg,
            "delreg" => DelReg,
            "cmp" => Cmp,
            "add" => Add,
            "sub" => Sub,
            "mult" => Mult,
            "div" => Div,
            "pow" => Pow,
            "mod" => Mod,
            "inc" | "incr" => Inc,
            "dec" | "decr" => Dec,
            "rev" => Rev,
            "print" => Print,
            "println" => Println,
            "printreg" => PrintReg,
            "printregval" => PrintRegVal,
            "printstack" => PrintStack,
            "printstacktrace" => PrintStackTrace,
            "lb" => Lb,
            "jmp" => Jmp,
            "jmpcond" => JmpCond,
            "function" => Function,
            "endfunction" => EndFunction,
            "call" => Call,
            "async" => Async,
            "sleep" => Sleep,
            "exit" | "quit" => Exit,
            _ => return None,
        })
    }

    pub fn arity(self) -> RangeInclusive<usize> {
        use Opcode::*;
        match self {
            PrintReg | PrintStack | PrintStackTrace | EndFunction => 0..=0,
            Exit => 0..=1,
            NewReg | DelReg | Inc | Dec | Rev | PrintRegVal | Lb | Jmp | Function | Sleep => 1..=1,
            Print | Println | Call | Async => 1..=usize::MAX,
            Mov | JmpCond => 2..=2,
            Cmp | Add | Sub | Mult | Div | Pow | Mod => 3..=3,
        }
    }

    pub fn check_arity(self, count: usize) -> Result<(), Error> {
        let arity = self.arity();
        if arity.contains(&count) {
            return Ok(());
        }
        let (min, max) = (*arity.start(), *arity.end());
        Err(if max == usize::MAX {
            error!(ArgumentCount; "Expected at least {} arguments, got {}", min, count)
        } else if min == max {
            error!(ArgumentCount; "Expected {} arguments, got {}", min, count)
        } else {
            error!(ArgumentCount; "Expected {} to {} arguments, got {}", min, max, count)
        })
    }
}
