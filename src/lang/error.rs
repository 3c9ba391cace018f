use super::LineNumber;

/// ## Interpreter diagnostics
///
/// Every error carries the code it was raised with and, once the runtime
/// knows which source line was executing, that line number.
#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: LineNumber,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident; $($arg:tt)+) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message(format!($($arg)+))
    };
    ($err:ident, $line:expr; $($arg:tt)+) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message(format!($($arg)+))
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> LineNumber {
        self.line_number
    }

    /// Attach a source line. An error that already knows its line keeps it.
    pub fn in_line_number(self, line: LineNumber) -> Error {
        if self.line_number.is_some() {
            return self;
        }
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn message(self, message: String) -> Error {
        debug_assert!(self.message.is_empty());
        Error { message, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ArgumentCount,
    UnknownInstruction,
    UndefinedRegister,
    UndefinedSubitem,
    UndefinedLabel,
    UndefinedFunction,
    NullSource,
    InvalidRegisterName,
    TypeMismatch,
    DivisionByZero,
    MalformedJson,
    NestedFunction,
    UnclosedFunction,
    StackOverflow,
    Interrupted,
    Io,
}

impl ErrorCode {
    fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            ArgumentCount => "Wrong number of arguments",
            UnknownInstruction => "Unknown instruction",
            UndefinedRegister => "Undefined register",
            UndefinedSubitem => "Undefined subitem",
            UndefinedLabel => "Undefined label",
            UndefinedFunction => "Undefined function",
            NullSource => "Register used as source is null",
            InvalidRegisterName => "Invalid register name",
            TypeMismatch => "Type mismatch",
            DivisionByZero => "Division by zero",
            MalformedJson => "Malformed JSON",
            NestedFunction => "Nested function",
            UnclosedFunction => "Function without endfunction",
            StackOverflow => "Call stack overflow",
            Interrupted => "Interrupted",
            Io => "I/O error",
        }
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {:?}: {} }}", self.code, self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let message = if self.message.is_empty() {
            self.code.description()
        } else {
            self.message.as_str()
        };
        match self.line_number {
            Some(line_number) => write!(f, "Line {}: {}", line_number, message),
            None => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let e = error!(DivisionByZero; "Can't divide by {}", 0).in_line_number(Some(7));
        assert_eq!(e.to_string(), "Line 7: Can't divide by 0");
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
    }

    #[test]
    fn test_first_line_number_sticks() {
        let e = error!(UndefinedLabel, Some(3); "There is no label named x");
        let e = e.in_line_number(Some(9));
        assert_eq!(e.line_number(), Some(3));
    }

    #[test]
    fn test_display_without_message() {
        assert_eq!(error!(StackOverflow).to_string(), "Call stack overflow");
        assert_eq!(
            error!(Interrupted, Some(2)).to_string(),
            "Line 2: Interrupted"
        );
    }
}
