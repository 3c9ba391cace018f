/*!
# Values and Operands

A register holds one of five kinds of value.

| Kind      | Literal                  |
|-----------|--------------------------|
| null      | none, every register starts as null |
| number    | `42`, `-1.5`, `2e10`     |
| boolean   | `true`, `false`          |
| string    | `"hello world"`          |
| structure | `{"a": [1, 2, {"b": 3}]}` |

An operand is read in that order: a quoted string, then a number, then a
boolean, then a JSON structure. Anything else names a register. A quoted
string may contain spaces and a JSON structure may be spread over several
words as long as its braces balance on the same line.

```text
mov rg0 "5"
mov rg1 5
cmp rg0 rg1 rg2
println rg2
```

prints `false`, since a string never equals a number. Arithmetic is more
forgiving and accepts strings that read as numbers.

```text
add "2" "3" rg0
println rg0
```

prints `5`.

Fields of a structure are reached with a dot. Array elements use their
index.

```text
mov rg0 {"user": {"name": "ada", "langs": ["rust", "c"]}}
println rg0.user.name
println rg0.user.langs.1
```

A register used as a source must not be `null`. Reading a missing field or
a register that does not exist stops the program.

A JSON structure that does not parse is not fatal. The operand becomes
`null` and a warning goes to standard error.

## Printing

`print` and `println` treat everything after the command as a single
operand. Numbers print without a trailing `.0`, structures print as
compact JSON. `printregval` prints a value in a friendlier layout, with
strings in quotes:

```text
mov rg0 {"a": 1, "b": "two"}
printregval rg0
```

<pre><code>&nbsp;{ a: 1, b: 'two' }
</code></pre>

*/
