#![allow(dead_code)]
use ezc::lang::compile;
use ezc::mach::Runtime;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Output sink shared with the runtime under test.
#[derive(Clone, Default)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Compiles and runs `source`, returning everything printed followed by
/// the error, if any.
pub fn exec(runtime: &mut Runtime, source: &str) -> String {
    let capture = Capture::default();
    runtime.set_output(Box::new(capture.clone()));
    let result = compile("test", source).and_then(|program| runtime.execute(&program));
    let mut s = capture.text();
    if let Err(error) = result {
        s.push_str(&format!("{}\n", error));
    }
    s
}

/// Renderings of the stack, bottom to top.
pub fn stack(runtime: &Runtime) -> Vec<String> {
    runtime.stack().iter().map(|val| val.render()).collect()
}
