use std::io::Write;
use std::path::PathBuf;

use crate::{EnvironmentBinding, Error, Result};

/// A test as handed to the test-execution facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub command: Vec<String>,
    pub working_dir: PathBuf,
    pub environment: EnvironmentBinding,
    pub labels: Vec<String>,
}

/// Facility that owns running registered tests.
pub trait TestExecutor {
    fn register(&mut self, registration: Registration) -> Result<()>;
}

/// Collects registrations in memory.
impl TestExecutor for Vec<Registration> {
    fn register(&mut self, registration: Registration) -> Result<()> {
        self.push(registration);
        Ok(())
    }
}

impl<T: TestExecutor + ?Sized> TestExecutor for &mut T {
    fn register(&mut self, registration: Registration) -> Result<()> {
        (**self).register(registration)
    }
}

/// Writes registrations as a CTest test file (`CTestTestfile.cmake` syntax).
///
/// The first write error is kept; once one happened the manifest is incomplete, every later
/// registration is refused and [`finish`][Self::finish] reports the error.
#[derive(Debug)]
pub struct CTestManifest<W> {
    writer: W,
    error: Option<std::io::Error>,
}

impl<W: Write> CTestManifest<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Flushes the writer, failing if any registration could not be written.
    pub fn finish(mut self) -> Result<W> {
        if let Some(e) = self.error.take() {
            return Err(Error::Io(e));
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_registration(&mut self, r: &Registration) -> std::io::Result<()> {
        let name = quote(&r.name, false);
        write!(self.writer, "add_test({name}")?;
        for arg in &r.command {
            write!(self.writer, " {}", quote(arg, false))?;
        }
        writeln!(self.writer, ")")?;

        let environment = r
            .environment
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        writeln!(
            self.writer,
            "set_tests_properties({name} PROPERTIES WORKING_DIRECTORY {} ENVIRONMENT {} LABELS {})",
            quote(&r.working_dir.to_string_lossy(), false),
            quote_list(&environment),
            quote_list(&r.labels),
        )
    }
}

impl<W: Write> TestExecutor for CTestManifest<W> {
    fn register(&mut self, registration: Registration) -> Result<()> {
        if let Some(e) = &self.error {
            return Err(Error::Io(std::io::Error::new(
                e.kind(),
                "test manifest is incomplete after an earlier write error",
            )));
        }
        self.write_registration(&registration).map_err(|e| {
            let kind = e.kind();
            self.error = Some(e);
            Error::Io(std::io::Error::new(kind, "failed writing test manifest"))
        })
    }
}

fn quote(s: &str, in_list: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' | '"' | '$' => {
                out.push('\\');
                out.push(c);
            }
            ';' if in_list => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn quote_list(items: &[String]) -> String {
    let joined = items
        .iter()
        .map(|item| {
            let quoted = quote(item, true);
            quoted[1..quoted.len() - 1].to_owned()
        })
        .collect::<Vec<_>>()
        .join(";");
    format!("\"{joined}\"")
}
