extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::lang::{compile, Error};
use crate::mach::{Config, Runtime};
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::sync::atomic::Ordering;

/// Runs the files named on the command line, or an interactive session
/// when there are none. Exits the process with the program's status.
pub fn main() {
    let files: Vec<String> = std::env::args().skip(1).collect();
    let mut runtime = Runtime::with_config(Config::from_env());
    let interrupted = runtime.interrupt_handle();
    if let Err(error) = ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    }) {
        tracing::warn!(%error, "Ctrl-C will not interrupt running programs");
    }
    let code = if files.is_empty() {
        match repl(&mut runtime) {
            Ok(code) => code,
            Err(error) => {
                eprintln!("{}", error);
                1
            }
        }
    } else {
        run_files(&mut runtime, &files)
    };
    if let Err(error) = runtime.output().flush() {
        eprintln!("{}", error);
    }
    std::process::exit(code);
}

fn run_files(runtime: &mut Runtime, files: &[String]) -> i32 {
    for filename in files {
        let result = match std::fs::read_to_string(filename) {
            Ok(source) => run(runtime, filename, &source),
            Err(error) => Err(Error::from(error)),
        };
        if let Err(error) = result {
            if let Some(code) = error.exit_code() {
                return code;
            }
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            return error.status();
        }
    }
    0
}

fn run(runtime: &mut Runtime, name: &str, source: &str) -> Result<(), Error> {
    let program = compile(name, source)?;
    runtime.execute(&program)
}

fn repl(runtime: &mut Runtime) -> std::io::Result<i32> {
    let interface = Interface::new("EZC")?;
    interface.set_prompt("ezc> ")?;
    loop {
        let input = match interface.read_line()? {
            ReadResult::Input(input) => input,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if input.trim().is_empty() {
            continue;
        }
        interface.add_history_unique(input.clone());
        runtime.interrupt_handle().store(false, Ordering::SeqCst);
        let result = run(runtime, "<stdin>", &input);
        runtime.output().flush()?;
        if let Err(error) = result {
            if let Some(code) = error.exit_code() {
                return Ok(code);
            }
            interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?;
        }
    }
    Ok(0)
}
