use super::{Function, Operation, Runtime, Val};
use crate::error;
use crate::lang::{Error, ErrorCode};
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// Installs the standard library into a fresh runtime.
pub fn register(runtime: &mut Runtime) {
    let natives: [(&str, super::Native); 27] = [
        ("none", none),
        ("wall", wall),
        ("del", del),
        ("copy", copy),
        ("under", under),
        ("swap", swap),
        ("funcdef", funcdef),
        ("get", get),
        ("exec", exec),
        ("exit", exit),
        ("repr", repr),
        ("print", print),
        ("printall", printall),
        ("dump", dump),
        ("add", add),
        ("sub", sub),
        ("mul", mul),
        ("div", div),
        ("mod", modulus),
        ("pow", pow),
        ("eq", eq),
        ("ifel", ifel),
        ("foreach", foreach),
        ("forrange", forrange),
        ("open", open),
        ("write", write),
        ("X", expand),
    ];
    for (name, native) in natives.iter() {
        runtime.define_native(name, *native);
    }
}

fn type_error(r: &Runtime, function: &str, val: &Val) -> Error {
    error!(TypeMismatch; format!(
        "`{}` DOES NOT ACCEPT {}",
        function,
        r.type_name(val)
    ))
}

fn none(r: &mut Runtime) -> Result<()> {
    r.stack_mut().push(Val::None)
}

fn wall(r: &mut Runtime) -> Result<()> {
    r.stack_mut().push(Val::Wall)
}

fn del(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "del")?;
    r.stack_mut().pop()?;
    Ok(())
}

fn copy(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "copy")?;
    let val = r.stack().peek(0)?.clone();
    r.stack_mut().push(val)
}

fn under(r: &mut Runtime) -> Result<()> {
    r.stack().require(2, "under")?;
    let val = r.stack().peek(1)?.clone();
    r.stack_mut().push(val)
}

fn swap(r: &mut Runtime) -> Result<()> {
    r.stack().require(2, "swap")?;
    let len = r.stack().len();
    r.stack_mut().swap(len - 1, len - 2)
}

fn funcdef(r: &mut Runtime) -> Result<()> {
    r.stack().require(2, "funcdef")?;
    match (r.stack().peek(0)?, r.stack().peek(1)?) {
        (Val::Block(_), Val::Str(_)) => {}
        (Val::Block(_), name) => return Err(type_error(r, "funcdef", name)),
        (body, _) => return Err(type_error(r, "funcdef", body)),
    }
    if let (Val::Str(name), Val::Block(body)) = r.stack_mut().pop_2()? {
        r.define(&name, Function::Interpreted(body));
    }
    Ok(())
}

/// Replaces the top with a duplicate of the addressed value. The index
/// counts from the bottom when positive and from the top when negative.
fn get(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "get")?;
    let index = match r.stack().peek(0)? {
        Val::Int(index) => *index,
        other => return Err(type_error(r, "get", other)),
    };
    let len = r.stack().len() - 1;
    let position = if index >= 0 {
        index as usize
    } else {
        len.wrapping_sub(index.unsigned_abs() as usize)
    };
    if position >= len {
        return Err(error!(StackUnderflow; format!(
            "`get` INDEX {} OUT OF RANGE FOR {} ITEMS",
            index, len
        )));
    }
    r.stack_mut().pop()?;
    let val = match r.stack().get(position) {
        Some(val) => val.clone(),
        None => return Err(error!(InternalError; "`get` LOST ITS TARGET")),
    };
    r.stack_mut().replace_top(val)?;
    Ok(())
}

fn exec(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "exec")?;
    let val = r.stack_mut().pop()?;
    r.dispatch(val, "exec")
}

fn exit(r: &mut Runtime) -> Result<()> {
    if r.stack().is_empty() {
        return Err(Error::exit(0));
    }
    match r.stack_mut().pop()? {
        Val::Int(code) => match i32::try_from(code) {
            Ok(code) => Err(Error::exit(code)),
            Err(_) => {
                let clamped = code.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
                tracing::warn!(code, clamped, "exit code out of range");
                Err(Error::exit(clamped))
            }
        },
        other => {
            tracing::warn!(
                type_name = r.type_name(&other),
                "exit code is not an int, exiting with 0"
            );
            Err(Error::exit(0))
        }
    }
}

fn repr(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "repr")?;
    let rendered = r.stack().peek(0)?.render();
    r.stack_mut().replace_top(Val::Str(rendered))?;
    Ok(())
}

fn print(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "print")?;
    let val = r.stack_mut().pop()?;
    writeln!(r.output(), "{}", val.render())?;
    Ok(())
}

fn printall(r: &mut Runtime) -> Result<()> {
    let mut line = String::new();
    for val in r.stack().iter() {
        line.push_str(&val.render());
        line.push(' ');
    }
    writeln!(r.output(), "{}", line)?;
    Ok(())
}

fn dump(r: &mut Runtime) -> Result<()> {
    let mut text = String::new();
    for (i, val) in r.stack().iter().enumerate().rev() {
        text.push_str(&format!(
            "{:>2}<{}>: {}\n",
            i,
            r.type_name(val),
            val.render()
        ));
    }
    text.push_str(&format!("-----\nstack[{}]\n", r.stack().len()));
    write!(r.output(), "{}", text)?;
    Ok(())
}

/// Pops two operands and pushes the result. Mismatched types are reported
/// by name after both operands have been released.
fn binary(r: &mut Runtime, function: &str, op: fn(Val, Val) -> Result<Val>) -> Result<()> {
    r.stack().require(2, function)?;
    let (lhs, rhs) = r.stack_mut().pop_2()?;
    let (lhs_type, rhs_type) = (lhs.type_id(), rhs.type_id());
    match op(lhs, rhs) {
        Ok(val) => r.stack_mut().push(val),
        Err(e) if e.code() == ErrorCode::TypeMismatch => {
            let types = r.types();
            Err(error!(TypeMismatch; format!(
                "`{}` CANNOT OPERATE ON {} AND {}",
                function,
                types.name(lhs_type).unwrap_or("?"),
                types.name(rhs_type).unwrap_or("?")
            )))
        }
        Err(e) => Err(e),
    }
}

fn add(r: &mut Runtime) -> Result<()> {
    binary(r, "add", Operation::sum)
}

fn sub(r: &mut Runtime) -> Result<()> {
    binary(r, "sub", Operation::subtract)
}

fn mul(r: &mut Runtime) -> Result<()> {
    binary(r, "mul", Operation::multiply)
}

fn div(r: &mut Runtime) -> Result<()> {
    binary(r, "div", Operation::divide)
}

fn modulus(r: &mut Runtime) -> Result<()> {
    binary(r, "mod", Operation::remainder)
}

fn pow(r: &mut Runtime) -> Result<()> {
    binary(r, "pow", Operation::power)
}

fn eq(r: &mut Runtime) -> Result<()> {
    binary(r, "eq", Operation::equal)
}

fn ifel(r: &mut Runtime) -> Result<()> {
    r.stack().require(3, "ifel")?;
    let otherwise = r.stack_mut().pop()?;
    let then = r.stack_mut().pop()?;
    let condition = r.stack_mut().pop()?;
    let chosen = if condition.truthy() { then } else { otherwise };
    r.dispatch(chosen, "ifel")
}

/// Runs the block once for each value above the nearest wall.
fn foreach(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "foreach")?;
    let body = match r.stack_mut().pop()? {
        Val::Block(body) => body,
        other => {
            let error = type_error(r, "foreach", &other);
            r.stack_mut().push(other)?;
            return Err(error);
        }
    };
    let count = r
        .stack()
        .iter()
        .rev()
        .take_while(|val| !matches!(val, Val::Wall))
        .count();
    if count == 0 {
        return Ok(());
    }
    let values = r.stack_mut().drain_top(count)?;
    if let Some(Val::Wall) = r.stack().last() {
        r.stack_mut().pop()?;
    }
    for val in values {
        r.stack_mut().push(val)?;
        r.execute_block(&body)?;
    }
    Ok(())
}

/// Runs the block for each index in `lower..upper`.
fn forrange(r: &mut Runtime) -> Result<()> {
    r.stack().require(3, "forrange")?;
    match (r.stack().peek(2)?, r.stack().peek(1)?, r.stack().peek(0)?) {
        (Val::Int(_), Val::Int(_), Val::Block(_)) => {}
        (Val::Int(_), Val::Int(_), body) => return Err(type_error(r, "forrange", body)),
        (Val::Int(_), upper, _) => return Err(type_error(r, "forrange", upper)),
        (lower, _, _) => return Err(type_error(r, "forrange", lower)),
    }
    let body = r.stack_mut().pop()?;
    let (lower, upper) = r.stack_mut().pop_2()?;
    if let (Val::Int(lower), Val::Int(upper), Val::Block(body)) = (lower, upper, body) {
        for i in lower..upper {
            r.stack_mut().push(Val::Int(i))?;
            r.execute_block(&body)?;
        }
    }
    Ok(())
}

fn open(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "open")?;
    match r.stack_mut().pop()? {
        Val::Str(name) => match super::FileHandle::create(&name) {
            Ok(file) => r.stack_mut().push(Val::File(file)),
            Err(e) => Err(error!(IOFailure; format!(
                "`open` FAILED FOR {}: {}",
                name,
                e.to_string().to_uppercase()
            ))),
        },
        other => Err(type_error(r, "open", &other)),
    }
}

/// Writes a string and a newline to the file beneath it.
fn write(r: &mut Runtime) -> Result<()> {
    r.stack().require(2, "write")?;
    let val = r.stack_mut().pop()?;
    let file = match r.stack().peek(0)? {
        Val::File(file) => file,
        other => return Err(type_error(r, "write", other)),
    };
    if !file.is_open() {
        return Err(error!(IOFailure; format!("`write` TO CLOSED FILE {}", file.name())));
    }
    let text = match &val {
        Val::Str(text) => text,
        other => return Err(type_error(r, "write", other)),
    };
    file.write_line(text)?;
    Ok(())
}

/// Pushes `0..n`.
fn expand(r: &mut Runtime) -> Result<()> {
    r.stack().require(1, "X")?;
    let n = match r.stack_mut().pop()? {
        Val::Int(n) => n,
        other => return Err(type_error(r, "X", &other)),
    };
    if n > 0 {
        r.stack_mut().reserve(n as usize)?;
    }
    for i in 0..n {
        r.stack_mut().push(Val::Int(i))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::Block;

    fn runtime(vals: Vec<Val>) -> Runtime {
        let mut r = Runtime::new();
        for val in vals {
            r.stack_mut().push(val).unwrap();
        }
        r
    }

    fn stack(r: &Runtime) -> Vec<Val> {
        r.stack().iter().cloned().collect()
    }

    #[test]
    fn test_get_from_bottom() {
        let mut r = runtime(vec![Val::Int(10), Val::Int(20), Val::Int(30), Val::Int(0)]);
        r.invoke("get").unwrap();
        assert_eq!(stack(&r), vec![Val::Int(10), Val::Int(20), Val::Int(10)]);
    }

    #[test]
    fn test_get_from_top() {
        let mut r = runtime(vec![Val::Int(10), Val::Int(20), Val::Int(30), Val::Int(-1)]);
        r.invoke("get").unwrap();
        assert_eq!(stack(&r), vec![Val::Int(10), Val::Int(20), Val::Int(30)]);
        r.stack_mut().push(Val::Int(-3)).unwrap();
        r.invoke("get").unwrap();
        assert_eq!(stack(&r), vec![Val::Int(10), Val::Int(20), Val::Int(10)]);
    }

    #[test]
    fn test_get_out_of_range_leaves_stack() {
        for index in &[3, -4] {
            let mut r = runtime(vec![Val::Int(10), Val::Int(20), Val::Int(30), Val::Int(*index)]);
            let e = r.invoke("get").unwrap_err();
            assert_eq!(e.code(), ErrorCode::StackUnderflow);
            assert_eq!(r.stack().len(), 4);
        }
        let mut r = runtime(vec![Val::Int(10), Val::Str("0".into())]);
        assert_eq!(r.invoke("get").unwrap_err().code(), ErrorCode::TypeMismatch);
        assert_eq!(r.stack().len(), 2);
    }

    #[test]
    fn test_funcdef_rejects_wrong_kinds() {
        let mut r = runtime(vec![Val::Int(1), Val::Block(Block::empty())]);
        assert_eq!(
            r.invoke("funcdef").unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
        assert_eq!(r.stack().len(), 2);
        let mut r = runtime(vec![Val::Block(Block::empty()), Val::Str("f".into())]);
        assert!(r.invoke("funcdef").is_err());
        assert_eq!(r.stack().len(), 2);
    }

    #[test]
    fn test_funcdef_binds() {
        let mut r = runtime(vec![Val::Str("nothing".into()), Val::Block(Block::empty())]);
        r.invoke("funcdef").unwrap();
        assert!(r.stack().is_empty());
        r.invoke("nothing").unwrap();
        assert!(r.stack().is_empty());
    }

    #[test]
    fn test_arithmetic_mismatch_consumes_both() {
        let mut r = runtime(vec![Val::Int(9), Val::Str("a".into()), Val::Int(1)]);
        let e = r.invoke("pow").unwrap_err();
        assert_eq!(e.to_string(), "TYPE MISMATCH; `pow` CANNOT OPERATE ON str AND int");
        assert_eq!(stack(&r), vec![Val::Int(9)]);
    }

    #[test]
    fn test_division_by_zero_consumes_both() {
        let mut r = runtime(vec![Val::Int(1), Val::Int(0)]);
        assert_eq!(
            r.invoke("div").unwrap_err().code(),
            ErrorCode::DivisionByZero
        );
        assert!(r.stack().is_empty());
    }

    #[test]
    fn test_underflow_before_pop() {
        let mut r = runtime(vec![Val::Int(1)]);
        assert_eq!(
            r.invoke("add").unwrap_err().code(),
            ErrorCode::StackUnderflow
        );
        assert_eq!(stack(&r), vec![Val::Int(1)]);
    }

    #[test]
    fn test_foreach_non_block_pushed_back() {
        let mut r = runtime(vec![Val::Wall, Val::Int(1), Val::Int(2)]);
        assert_eq!(
            r.invoke("foreach").unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
        assert_eq!(stack(&r), vec![Val::Wall, Val::Int(1), Val::Int(2)]);
    }

    #[test]
    fn test_foreach_nothing_keeps_wall() {
        let mut r = runtime(vec![Val::Wall, Val::Block(Block::empty())]);
        r.invoke("foreach").unwrap();
        assert_eq!(stack(&r), vec![Val::Wall]);
    }

    #[test]
    fn test_forrange_type_checked_first() {
        let mut r = runtime(vec![Val::Int(0), Val::Real(3.0), Val::Block(Block::empty())]);
        assert_eq!(
            r.invoke("forrange").unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
        assert_eq!(r.stack().len(), 3);
    }

    #[test]
    fn test_exit_codes() {
        let mut r = runtime(vec![]);
        assert_eq!(r.invoke("exit").unwrap_err().exit_code(), Some(0));
        let mut r = runtime(vec![Val::Int(3)]);
        assert_eq!(r.invoke("exit").unwrap_err().exit_code(), Some(3));
        assert!(r.stack().is_empty());
        let mut r = runtime(vec![Val::Str("3".into())]);
        assert_eq!(r.invoke("exit").unwrap_err().exit_code(), Some(0));
        assert!(r.stack().is_empty());
    }

    #[test]
    fn test_exit_code_clamped() {
        let mut r = runtime(vec![Val::Int(4_294_967_296)]);
        assert_eq!(r.invoke("exit").unwrap_err().exit_code(), Some(i32::MAX));
        let mut r = runtime(vec![Val::Int(-4_294_967_296)]);
        assert_eq!(r.invoke("exit").unwrap_err().exit_code(), Some(i32::MIN));
    }

    #[test]
    fn test_expand() {
        let mut r = runtime(vec![Val::Int(3)]);
        r.invoke("X").unwrap();
        assert_eq!(stack(&r), vec![Val::Int(0), Val::Int(1), Val::Int(2)]);
        let mut r = runtime(vec![Val::Int(-2)]);
        r.invoke("X").unwrap();
        assert!(r.stack().is_empty());
    }

    #[test]
    fn test_write_needs_open_file() {
        let mut r = runtime(vec![
            Val::File(crate::mach::FileHandle::closed("x")),
            Val::Str("text".into()),
        ]);
        assert_eq!(r.invoke("write").unwrap_err().code(), ErrorCode::IOFailure);
        assert_eq!(r.stack().len(), 1);
        let mut r = runtime(vec![Val::Int(1), Val::Str("text".into())]);
        assert_eq!(
            r.invoke("write").unwrap_err().code(),
            ErrorCode::TypeMismatch
        );
        assert_eq!(stack(&r), vec![Val::Int(1)]);
    }
}
