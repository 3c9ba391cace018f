/*!
# Functions and Async Calls

A function is the block of lines between `function` and `endfunction`.
Normal flow steps over a function. It only runs when called.

```text
mov rg0 1
call double
call double
println rg0

function double
mult rg0 2 rg0
endfunction
```

prints `4`. There are no local registers; a function works on the same
registers as the rest of the program. Arguments after the function name
are recorded in the call stack, which `printstack` shows:

```text
call show 1 rg0

function show
printstack
endfunction
```

<pre><code>&nbsp;[ { name: 'show', callingLine: 1, parameters: [ '1', 'rg0' ] } ]
</code></pre>

Functions can call other functions and themselves. More than 10000 active
calls stops the program with `Call stack overflow`. Functions can't be
nested.

A `jmp` inside a function to a label outside it does not cut the function
short. The rest of the body runs, and once the call returns to the top
level the program continues at the label instead of after the `call`.

## Async calls

`async name` starts a second copy of the interpreter that runs only the
named function, then continues immediately. The copy has its own
registers. Its output shows up alongside the parent's.

```text
async worker
println "parent"

function worker
sleep 100
println "worker"
endfunction
```

When the parent finishes normally it waits for all of its async calls. If
any of them fails, the parent exits at once with the child's exit status.

The same effect is available from the command line: `asm prog.asm worker`
runs just `worker`.

## Logging

Set `ASM_LOG` to a filter such as `debug` or `asm=trace` to see what the
interpreter is doing. Log output goes to standard error.

*/
