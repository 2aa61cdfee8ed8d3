/*!
# Introductory Tutorial for EZC

Start the interpreter with no arguments for an interactive session, or
pass one or more source files to run them in order. Type CTRL-D to leave
the interactive session. Stop a running program with CTRL-C.

<pre><code>&nbsp;  $ ezc
&nbsp;  ezc> █
</code></pre>

EZC is a postfix language. Everything you type either pushes a value onto
the stack or calls a function that works on the values already there.
Numbers push themselves. A word ending in `!` calls the function of that
name.

<pre><code>&nbsp;> 2 3 add! print!
&nbsp;  5
</code></pre>

The common functions have shorthand operators, so the same line can be
written `2 3 + print!`. Mixing integers and reals gives a real, and reals
always print with six decimals.

<pre><code>&nbsp;> 2.5 3 + print!
&nbsp;  5.500000
&nbsp;> 7 2 / print!
&nbsp;  3
&nbsp;> 2 10 ^ print!
&nbsp;  1024
</code></pre>

A word without `!` is just a string. Strings in double quotes may hold
spaces and the escapes `\n`, `\t`, `\"` and `\\`.

<pre><code>&nbsp;> hello print!
&nbsp;  hello
&nbsp;> "hello, world" print!
&nbsp;  hello, world
</code></pre>

## Blocks

Code inside braces is not run. It is pushed as a single block value that
can be run later with `!` (or `exec!`), handed to a control function, or
bound to a name with `funcdef!`. The name goes first and the block last.

<pre><code>&nbsp;> square {: *} funcdef!
&nbsp;> 9 square! print!
&nbsp;  81
</code></pre>

`ifel!` takes a condition, a block to run when it is true and a block to
run when it is false. Booleans and nonzero integers are true.

<pre><code>&nbsp;> 1 2 == {"same" print!} {"different" print!} ifel!
&nbsp;  different
</code></pre>

## Walls and loops

A wall `|` marks the start of a run of values. `foreach!` runs its block
once for each value above the nearest wall, oldest first, and removes the
wall when it is done.

<pre><code>&nbsp;> | 1 2 3 {print!} foreach!
&nbsp;  1
&nbsp;  2
&nbsp;  3
</code></pre>

`forrange!` counts from a lower bound up to, but not including, an upper
bound and pushes each index before running the block.

<pre><code>&nbsp;> 0 3 {print!} forrange!
&nbsp;  0
&nbsp;  1
&nbsp;  2
</code></pre>

## Errors

An error stops the line that caused it and reports where it happened.
Everything pushed before the error stays on the stack. Use `dump!` to see
what is there.

<pre><code>&nbsp;> 1 "a" +
&nbsp;  TYPE MISMATCH IN &lt;stdin&gt;:1 (6..7); `add` CANNOT OPERATE ON int AND str
</code></pre>

*/
