use std::io::BufRead;

use crate::diag::{Diagnostics, Issue};
use crate::error::Error;
use crate::ident::Idents;
use crate::image::Image;
use crate::parser::Stmt;
use crate::state::State;

/// Word count of the AGC ram on the target receiver.
pub const DEFAULT_RAM: usize = 512;

/// Receives the states of a compiled image in address order.
pub trait Visitor {
    fn begin(&mut self) {}
    fn visit(&mut self, addr: usize, words: usize, name: &str);
    fn end(&mut self) {}
}

/// One compile: parse every line, resolve targets, check, then assemble.
///
/// A `Compiler` owns its symbol table and word counter; nothing is shared
/// between runs.
#[derive(Debug)]
pub struct Compiler {
    ram: usize,
    states: Vec<State>,
    idents: Idents,
    words: usize,
    diags: Diagnostics,
}

impl Compiler {
    pub fn new(ram: usize) -> Self {
        Compiler {
            ram,
            states: vec![],
            idents: Idents::new(),
            words: 0,
            diags: Diagnostics::new(),
        }
    }

    /// Words used by states so far.
    pub fn words(&self) -> usize {
        self.words
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn idents(&self) -> &Idents {
        &self.idents
    }

    /// Feeds one line. `line` is 1-based.
    pub fn parse_line(&mut self, raw: &str, line: usize) -> Result<(), Error> {
        let Some(stmt) = Stmt::parse(raw, line)? else {
            return Ok(());
        };
        let kind = stmt.kind();
        match stmt {
            Stmt::Case(name) => {
                self.new_state(name, line);
                return Ok(());
            }
            Stmt::Info(info) => self.current(line)?.set_info(info, line)?,
            Stmt::Cmd(cmd) => self.current(line)?.set_cmd(cmd, line)?,
            Stmt::Trans(trans) => self.current(line)?.push_trans(trans, line),
        }
        log::trace!("{} record at 0x{:03X} (line {})", kind, self.words, line);
        self.words += 1;
        Ok(())
    }

    fn new_state(&mut self, name: String, line: usize) {
        log::debug!("state `{}` at 0x{:03X} (line {})", name, self.words, line);
        if let Some((prev, _)) = self.idents.insert(name.clone(), line, self.words) {
            log::warn!("state `{}` redefined at line {}", name, line);
            self.diags.push(Issue::Redefined(name.clone(), line, prev));
        }
        self.states.push(State::new(name, line, self.words));
    }

    /// The most recently started state.
    fn current(&mut self, line: usize) -> Result<&mut State, Error> {
        self.states.last_mut().ok_or(Error::Orphan(line))
    }

    pub fn parse_str(&mut self, src: &str) -> Result<(), Error> {
        for (idx, raw) in src.lines().enumerate() {
            self.parse_line(raw, idx + 1)?;
        }
        Ok(())
    }

    pub fn parse_reader<R: BufRead>(&mut self, reader: R) -> Result<(), Error> {
        for (idx, raw) in reader.lines().enumerate() {
            let raw = raw.map_err(Error::FileRead)?;
            self.parse_line(&raw, idx + 1)?;
        }
        Ok(())
    }

    /// Second pass: every target label becomes a word address. Unknown names
    /// are recorded and leave the field at zero.
    pub fn resolve(&mut self) {
        log::info!("resolve {} states", self.states.len());
        for state in &mut self.states {
            state.resolve(&self.idents, &mut self.diags);
        }
    }

    /// The image plus its signature word must fit in the ram.
    pub fn check_size(&self) -> Result<(), Error> {
        if self.ram == 0 || self.words > self.ram - 1 {
            return Err(Error::RamOverflow {
                used: self.words,
                capacity: self.ram,
            });
        }
        Ok(())
    }

    pub fn check(&mut self) {
        log::info!("check {} states", self.states.len());
        for state in &self.states {
            state.check(&mut self.diags);
        }
    }

    /// Runs the remaining phases on a fully parsed source.
    pub fn finish(mut self) -> Result<Image, Error> {
        self.resolve();
        self.check_size()?;
        self.check();
        let diags = std::mem::take(&mut self.diags);
        diags.into_result()?;
        let image = Image::assemble(self.states, self.ram);
        log::info!(
            "assembled {} of {} words, signature 0x{:08x}",
            image.used(),
            image.capacity(),
            image.signature()
        );
        Ok(image)
    }

    pub fn for_each_state<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visit_states(&self.states, visitor);
    }
}

pub(crate) fn visit_states<V: Visitor + ?Sized>(states: &[State], visitor: &mut V) {
    visitor.begin();
    for state in states {
        visitor.visit(state.addr, state.len(), &state.name);
    }
    visitor.end();
}

/// Compiles a whole source text.
pub fn compile(src: &str, ram: usize) -> Result<Image, Error> {
    let mut compiler = Compiler::new(ram);
    compiler.parse_str(src)?;
    compiler.finish()
}
