/*!
# Instruction Reference

Operands in `<angle brackets>` name a register. Operands in
`[square brackets]` are optional.

## Registers
| Instruction | Effect |
|---|---|
| `mov <dst> src` | Store the value of `src` in `dst`. |
| `newreg <name>` | Create a register, or reset an existing one to null. |
| `delreg <name>` | Remove a register. |

## Arithmetic
| Instruction | Effect |
|---|---|
| `add a b <dst>` | `a + b` |
| `sub a b <dst>` | `a - b` |
| `mult a b <dst>` | `a * b` |
| `div a b <dst>` | `a / b`, dividing by zero stops the program |
| `pow a b <dst>` | `a` raised to `b` |
| `mod a b <dst>` | remainder with the sign of `a` |
| `cmp a b <dst>` | `true` when `a` and `b` have the same kind and value |
| `inc <reg>`, `incr <reg>` | add one |
| `dec <reg>`, `decr <reg>` | subtract one |
| `rev <reg>` | 0 becomes 1 and any other number 0, strings are reversed, booleans negated, anything else becomes null |

## Control flow
| Instruction | Effect |
|---|---|
| `lb name` | Mark a jump target. |
| `jmp name` | Continue at the label. |
| `jmpcond name <reg>` | Continue at the label when the register is truthy. |
| `function name` ... `endfunction` | Define a function. |
| `call name [args...]` | Run a function and come back. |
| `async name [args...]` | Run a function in a separate process. |
| `sleep ms` | Pause. |
| `exit [value]`, `quit [value]` | Stop the program. |

## Output
| Instruction | Effect |
|---|---|
| `print value` | Print without a newline. |
| `println value` | Print followed by a newline. |
| `printregval src` | Print a value in inspect layout. |
| `printreg` | Print every register. |
| `printstack` | Print the call stack. |
| `printstacktrace` | Print one line per active call, innermost first. |

Labels are collected before the program starts, so a `jmp` may name a
label further down the file. Giving an instruction the wrong number of
operands stops the program with a message such as
`Line 4: Expected 3 arguments, got 2`.

*/
