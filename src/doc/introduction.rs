/*!
# Introductory Tutorial

A program is a plain text file with one instruction per line. Save the
following as `hello.asm` and run it with `asm hello.asm`.

```text
; print a greeting
mov rg0 "Hello World"
println rg0
```

<pre><code>&nbsp;$ asm hello.asm
&nbsp;Hello World
</code></pre>

Every line starts with a command followed by its operands, separated by
spaces. Lines that begin with `;` or `#` are comments, and a `;` anywhere
else ends the line. Blank lines are ignored.

The machine starts with ten registers named `rg0` through `rg9`, all of
them `null`. `mov` copies a value into a register. The second operand of
`mov` can be a literal or another register.

```text
mov rg0 41
inc rg0
println rg0
```

prints `42`. Math instructions name two sources and a destination.

```text
mov rg1 6
mult rg1 7 rg2
println rg2
```

Make your own registers with `newreg` and throw them away with `delreg`.
Register names are letters and digits only and must not be a plain number.

```text
newreg count
mov count 3
lb again
println count
dec count
jmpcond again count
```

This counts down from 3. `lb` marks a place in the program and `jmpcond`
goes there while `count` holds a truthy value. Zero, `false`, `null`, the
empty string and empty JSON structures are not truthy.

The program ends when it runs off the last line or reaches `exit`. The
number given to `exit` becomes the process exit status.

```text
println "bye"
exit 3
```

Stop a running program with CTRL-C.

*/
