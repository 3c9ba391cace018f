use super::{resolve, Address, Dump, Function, Listing, Opcode, Operation, Program, Registers, Stack, Val};
use crate::error;
use crate::lang::{Error, Line};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

const MAX_CALL_DEPTH: usize = 10_000;

/// ## Events
///
/// The runtime never performs I/O itself. Everything that must leave the
/// interpreter is handed back to the caller of [`Runtime::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The program ran off its end or the entry function returned.
    Stopped,
    /// The cycle budget ran out; call `execute` again.
    Running,
    Print(String),
    Inspect(Dump),
    /// Recovered problem. Execution continues.
    Warning(Error),
    /// Fatal problem. The program is stopped.
    Error(Error),
    /// Run `function` in a separate interpreter process.
    Async {
        function: Rc<str>,
        line_number: usize,
    },
    Sleep(Duration),
    /// `exit`/`quit` with the requested process status.
    Exit(i32),
}

/// One active `call`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    name: Rc<str>,
    calling_line: usize,
    parameters: Vec<String>,
    end: Address,
    return_to: Option<Address>,
}

impl Frame {
    pub fn new(name: Rc<str>, calling_line: usize, parameters: Vec<String>) -> Frame {
        Frame {
            name,
            calling_line,
            parameters,
            end: 0,
            return_to: None,
        }
    }

    pub fn name(&self) -> &Rc<str> {
        &self.name
    }

    pub fn calling_line(&self) -> usize {
        self.calling_line
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

/// ## Execution engine
///
/// Walks the program by continuation index. Top level flow skips function
/// regions; a `call` pushes a frame and moves into the function body, and
/// reaching the function's `endfunction` pops it again.
#[derive(Debug)]
pub struct Runtime {
    program: Rc<Program>,
    registers: Registers,
    stack: Stack<Frame>,
    pc: Address,
    detour: Option<Address>,
    line_number: usize,
    running: bool,
    interrupted: bool,
    pending: VecDeque<Event>,
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            program: Rc::new(program),
            registers: Registers::default(),
            stack: Stack::new("Call stack overflow", MAX_CALL_DEPTH),
            pc: 1,
            detour: None,
            line_number: 0,
            running: true,
            interrupted: false,
            pending: VecDeque::new(),
        }
    }

    /// Run the whole program from its first line.
    pub fn load(source: &str) -> Result<Runtime> {
        Ok(Runtime::new(Program::compile(Listing::from_source(source))?))
    }

    /// Run only `function`, as if the program were a single `call`.
    /// The runtime stops when the function returns.
    pub fn with_entry(program: Program, function: &str) -> Result<Runtime> {
        let mut runtime = Runtime::new(program);
        let program = Rc::clone(&runtime.program);
        let function = match program.function(function) {
            Some(f) => f,
            None => {
                return Err(error!(UndefinedFunction; "Function {} not defined", function));
            }
        };
        runtime.enter(function, 0, vec![], None)?;
        Ok(runtime)
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.stack.iter()
    }

    /// Stop at the next instruction with an `Interrupted` error.
    pub fn interrupt(&mut self) {
        self.interrupted = true;
    }

    /// Execute up to `cycles` instructions, returning the first event.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if let Some(event) = self.pending.pop_front() {
            return event;
        }
        if !self.running {
            return Event::Stopped;
        }
        if self.interrupted {
            self.interrupted = false;
            self.running = false;
            return Event::Error(error!(Interrupted; "Interrupted").in_line_number(self.last_line()));
        }
        for _ in 0..cycles {
            match self.step() {
                Ok(Some(event)) => self.pending.push_back(event),
                Ok(None) => {}
                Err(error) => {
                    self.running = false;
                    let error = error.in_line_number(self.last_line());
                    self.pending.push_back(Event::Error(error));
                }
            }
            if let Some(event) = self.pending.pop_front() {
                return event;
            }
        }
        Event::Running
    }

    fn last_line(&self) -> Option<usize> {
        match self.line_number {
            0 => None,
            n => Some(n),
        }
    }

    fn stop(&mut self) -> Option<Event> {
        self.running = false;
        Some(Event::Stopped)
    }

    fn step(&mut self) -> Result<Option<Event>> {
        let program = Rc::clone(&self.program);
        if let Some(end) = self.stack.last().map(|frame| frame.end) {
            if self.pc >= end {
                return Ok(self.leave());
            }
        } else if let Some(function) = program.owner(self.pc) {
            self.pc = function.end() + 1;
            return Ok(None);
        }
        let line = match program.line(self.pc) {
            Some(line) => line,
            None => return Ok(self.stop()),
        };
        self.pc += 1;
        self.line_number = line.number();
        self.instruction(line)
    }

    fn enter(
        &mut self,
        function: &Function,
        calling_line: usize,
        parameters: Vec<String>,
        return_to: Option<Address>,
    ) -> Result<()> {
        trace!(function = %function.name(), calling_line, "call");
        let mut frame = Frame::new(function.name().clone(), calling_line, parameters);
        frame.end = function.end();
        frame.return_to = return_to;
        self.stack.push(frame)?;
        self.pc = function.declaration() + 1;
        Ok(())
    }

    fn leave(&mut self) -> Option<Event> {
        match self.stack.pop() {
            Some(frame) => {
                trace!(function = %frame.name, "return");
                let detour = if self.stack.is_empty() {
                    self.detour.take()
                } else {
                    None
                };
                match (frame.return_to, detour) {
                    (Some(_), Some(target)) => {
                        self.pc = target;
                        None
                    }
                    (Some(addr), None) => {
                        self.pc = addr;
                        None
                    }
                    (None, _) => self.stop(),
                }
            }
            None => self.stop(),
        }
    }

    fn resolve(&mut self, src: &str) -> Result<Val> {
        let mut warnings = vec![];
        let val = resolve(src, &self.registers, &mut warnings);
        for warning in warnings {
            let warning = warning.in_line_number(self.last_line());
            self.pending.push_back(Event::Warning(warning));
        }
        val
    }

    fn jump_target(&self, label: &str) -> Result<Address> {
        let target = match self.program.label(label) {
            Some(addr) => addr,
            None => {
                return Err(error!(UndefinedLabel;
                    "There is no label named {}. Add the label first.", label
                ))
            }
        };
        trace!(label, target, "jump");
        Ok(target)
    }

    /// A target outside the running function is taken once the outermost
    /// call returns to top level. The rest of the body still runs.
    fn jump(&mut self, target: Address) {
        let local = match (self.stack.last(), self.program.owner(target)) {
            (None, _) => true,
            (Some(frame), Some(function)) => function.end() == frame.end,
            (Some(_), None) => false,
        };
        if local {
            self.pc = target;
        } else {
            trace!(target, "jump deferred until return");
            self.detour = Some(target);
        }
    }

    fn arithmetic(&mut self, opcode: Opcode, args: &[String]) -> Result<()> {
        let lhs = self.resolve(&args[0])?;
        let rhs = self.resolve(&args[1])?;
        self.registers.get(&args[2])?;
        let val = match opcode {
            Opcode::Add => Operation::sum(lhs, rhs)?,
            Opcode::Sub => Operation::subtract(lhs, rhs)?,
            Opcode::Mult => Operation::multiply(lhs, rhs)?,
            Opcode::Div => Operation::divide(lhs, rhs)?,
            Opcode::Pow => Operation::power(lhs, rhs)?,
            Opcode::Mod => Operation::modulo(lhs, rhs)?,
            Opcode::Cmp => Val::Boolean(lhs == rhs),
            other => {
                return Err(error!(UnknownInstruction;
                    "{:?} is not an arithmetic instruction", other
                ))
            }
        };
        self.registers.set(&args[2], val)
    }

    fn instruction(&mut self, line: &Line) -> Result<Option<Event>> {
        let opcode = match Opcode::from_command(line.command()) {
            Some(opcode) => opcode,
            None => {
                return Err(error!(UnknownInstruction;
                    "Unknown instruction/command {}", line.command()
                ))
            }
        };
        let args = line.operands();
        opcode.check_arity(args.len())?;
        match opcode {
            Opcode::Mov => {
                self.registers.get(&args[0])?;
                let val = self.resolve(&args[1])?;
                self.registers.set(&args[0], val)?;
            }
            Opcode::NewReg => self.registers.create(&args[0])?,
            Opcode::DelReg => {
                self.registers.delete(&args[0]);
            }
            Opcode::Cmp
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mult
            | Opcode::Div
            | Opcode::Pow
            | Opcode::Mod => self.arithmetic(opcode, args)?,
            Opcode::Inc | Opcode::Dec => {
                let current = self.registers.get(&args[0])?;
                let val = if opcode == Opcode::Inc {
                    Operation::increment(&args[0], current)?
                } else {
                    Operation::decrement(&args[0], current)?
                };
                self.registers.set(&args[0], val)?;
            }
            Opcode::Rev => {
                let val = Operation::reverse(self.registers.get(&args[0])?.clone());
                self.registers.set(&args[0], val)?;
            }
            Opcode::Print | Opcode::Println => {
                let val = self.resolve(line.remainder())?;
                let mut s = val.to_string();
                if opcode == Opcode::Println {
                    s.push('\n');
                }
                return Ok(Some(Event::Print(s)));
            }
            Opcode::PrintReg => {
                let registers = self
                    .registers
                    .iter()
                    .map(|(name, val)| (name.clone(), val.clone()))
                    .collect();
                return Ok(Some(Event::Inspect(Dump::Registers(registers))));
            }
            Opcode::PrintRegVal => {
                let val = self.resolve(&args[0])?;
                return Ok(Some(Event::Inspect(Dump::Value(val))));
            }
            Opcode::PrintStack => {
                let frames = self.stack.iter().cloned().collect();
                return Ok(Some(Event::Inspect(Dump::Stack(frames))));
            }
            Opcode::PrintStackTrace => {
                let mut s = String::from("Stack Trace\n");
                for frame in self.stack.iter().rev() {
                    s.push_str(&format!("  {}:{}\n", frame.name, frame.calling_line));
                }
                return Ok(Some(Event::Print(s)));
            }
            Opcode::Lb | Opcode::Function | Opcode::EndFunction => {}
            Opcode::Jmp => {
                let target = self.jump_target(&args[0])?;
                self.jump(target);
            }
            Opcode::JmpCond => {
                let target = self.jump_target(&args[0])?;
                if self.registers.get(&args[1])?.is_truthy() {
                    self.jump(target);
                }
            }
            Opcode::Call => {
                let program = Rc::clone(&self.program);
                let function = match program.function(&args[0]) {
                    Some(function) => function,
                    None => {
                        return Err(error!(UndefinedFunction; "Function {} not defined", args[0]))
                    }
                };
                let return_to = Some(self.pc);
                self.enter(function, line.number(), args[1..].to_vec(), return_to)?;
            }
            Opcode::Async => {
                let function = match self.program.function(&args[0]) {
                    Some(function) => function.name().clone(),
                    None => {
                        return Err(error!(UndefinedFunction; "Function {} not defined", args[0]))
                    }
                };
                debug!(function = %function, line = line.number(), "async call");
                return Ok(Some(Event::Async {
                    function,
                    line_number: line.number(),
                }));
            }
            Opcode::Sleep => {
                let val = self.resolve(&args[0])?;
                let ms = match val.to_number() {
                    Some(ms) => ms.max(0.0),
                    None => {
                        return Err(error!(TypeMismatch;
                            "Can't sleep for non-numeric duration {}", val
                        ))
                    }
                };
                return Ok(Some(Event::Sleep(Duration::from_millis(ms as u64))));
            }
            Opcode::Exit => {
                self.running = false;
                if args.is_empty() {
                    return Ok(Some(Event::Exit(0)));
                }
                match self.resolve(&args[0])? {
                    Val::Number(n) if (0.0..=255.0).contains(&n) => {
                        return Ok(Some(Event::Exit(n.trunc() as i32)));
                    }
                    val => {
                        self.pending
                            .push_back(Event::Print("Program exited. Result:\n".to_string()));
                        self.pending.push_back(Event::Inspect(Dump::Value(val)));
                        return Ok(Some(Event::Exit(0)));
                    }
                }
            }
        }
        Ok(None)
    }
}
