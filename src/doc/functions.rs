/*!
# Built-in Functions

Stack effects are written bottom to top, with the value nearest the call
on the right. Shorthand operators are listed beside their functions.

## Stack

| Function | Shorthand | Effect |
|----------|-----------|--------|
| `none!`  |           | push `none` |
| `wall!`  | `\|`      | push a wall |
| `del!`   | `` ` ``   | `a` → |
| `copy!`  | `:`       | `a` → `a a` |
| `under!` | `_`       | `a b` → `a b a` |
| `swap!`  | `<>`      | `a b` → `b a` |
| `get!`   | `$`       | `… x i` → `… v`, where `v` is a copy of the value at index `i` |

`get!` counts from the bottom when `i` is zero or more and from the top
when it is negative, so `-1` is the value just under the index. The value
under the index is replaced.

## Arithmetic

| Function | Shorthand |
|----------|-----------|
| `add!`   | `+` |
| `sub!`   | `-` |
| `mul!`   | `*` |
| `div!`   | `/` |
| `mod!`   | `%` |
| `pow!`   | `^` |
| `eq!`    | `==` |

Integers wrap on overflow and divide toward zero. An integer raised to a
negative power is `0`. `add!` also joins two strings. `eq!` requires both
operands to have the same type.

## Control

| Function     | Effect |
|--------------|--------|
| `exec!` / `!`| run a block, or call the function named by a string |
| `funcdef!`   | `name {body}` → binds `name` |
| `ifel!`      | `cond then else` → runs `then` or `else` |
| `foreach!`   | `\| a b c {body}` → runs `body` with each of `a b c` |
| `forrange!`  | `lo hi {body}` → runs `body` with each of `lo..hi` |
| `X!`         | `n` → `0 1 … n-1` |
| `exit!`      | `[code]` → ends the program |

## Output

| Function    | Effect |
|-------------|--------|
| `repr!`     | `a` → the text of `a` |
| `print!`    | `a` → prints `a` |
| `printall!` | prints every value on one line |
| `dump!`     | prints every value with its index and type |
| `open!`     | `name` → a file opened for writing |
| `write!`    | `file text` → `file`, appending a line |

*/
