use super::{Address, Listing, Opcode};
use crate::error;
use crate::lang::{Error, Line};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, Error>;

/// A function region: the `function` line, its body, and the `endfunction` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: Rc<str>,
    declaration: Address,
    end: Address,
}

impl Function {
    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    /// Address of the `function` line.
    pub fn declaration(&self) -> Address {
        self.declaration
    }

    /// Address of the `endfunction` line. Reaching it returns from a call.
    pub fn end(&self) -> Address {
        self.end
    }

    pub fn body<'a>(&self, program: &'a Program) -> &'a [Line] {
        &program.lines[self.declaration..self.end - 1]
    }
}

/// ## Program store
///
/// Built once by the preprocessing pass and never modified afterwards.
/// Lines are addressed by 1-based continuation index.
#[derive(Debug, Default)]
pub struct Program {
    lines: Vec<Line>,
    labels: HashMap<Rc<str>, Address>,
    functions: Vec<Function>,
    function_names: HashMap<Rc<str>, usize>,
    owners: Vec<Option<usize>>,
}

impl Program {
    /// Preprocessing pass: register every label and function before
    /// anything executes.
    pub fn compile(listing: Listing) -> Result<Program> {
        let mut program = Program {
            owners: vec![None; listing.len()],
            lines: listing.into_lines(),
            ..Program::default()
        };
        let mut open: Option<(Rc<str>, Address)> = None;
        for (index, line) in program.lines.iter().enumerate() {
            let addr = index + 1;
            let in_line = |e: Error| e.in_line_number(Some(line.number()));
            match Opcode::from_command(line.command()) {
                Some(Opcode::Function) => {
                    if let Some((name, _)) = &open {
                        return Err(in_line(error!(NestedFunction;
                            "Functions can't be nested. End function {} first", name
                        )));
                    }
                    Opcode::Function
                        .check_arity(line.operands().len())
                        .map_err(in_line)?;
                    open = Some((line.operands()[0].as_str().into(), addr));
                }
                Some(Opcode::EndFunction) => {
                    if let Some((name, declaration)) = open.take() {
                        let index = program.functions.len();
                        for owner in &mut program.owners[declaration - 1..addr] {
                            *owner = Some(index);
                        }
                        if program.function_names.insert(name.clone(), index).is_some() {
                            warn!(function = %name, line = line.number(), "function redefined");
                        }
                        debug!(function = %name, declaration, end = addr, "function registered");
                        program.functions.push(Function {
                            name,
                            declaration,
                            end: addr,
                        });
                    }
                }
                Some(Opcode::Lb) => {
                    Opcode::Lb
                        .check_arity(line.operands().len())
                        .map_err(in_line)?;
                    let name: Rc<str> = line.operands()[0].as_str().into();
                    debug!(label = %name, addr, "label registered");
                    if program.labels.insert(name.clone(), addr).is_some() {
                        warn!(label = %name, line = line.number(), "label redefined");
                    }
                }
                _ => {}
            }
        }
        if let Some((name, declaration)) = open {
            let number = program.lines[declaration - 1].number();
            return Err(error!(UnclosedFunction, Some(number);
                "Function {} is never closed with endfunction", name
            ));
        }
        Ok(program)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, addr: Address) -> Option<&Line> {
        if addr == 0 {
            return None;
        }
        self.lines.get(addr - 1)
    }

    pub fn label(&self, name: &str) -> Option<Address> {
        self.labels.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.function_names
            .get(name)
            .map(|&index| &self.functions[index])
    }

    /// The function whose region holds `addr`, if any.
    pub fn owner(&self, addr: Address) -> Option<&Function> {
        match self.owners.get(addr.checked_sub(1)?) {
            Some(Some(index)) => Some(&self.functions[*index]),
            _ => None,
        }
    }
}
