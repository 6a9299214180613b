use crate::compiler::Visitor;

/// Address -> owner table, one line per word.
#[derive(Debug, Default)]
pub struct La(String);

impl La {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Visitor for La {
    fn visit(&mut self, addr: usize, words: usize, name: &str) {
        for addr in addr..addr + words {
            self.0.push_str(&format!("{:>8} {:>32}\n", addr, name));
        }
    }
}

/// State name -> first address alias table.
#[derive(Debug, Default)]
pub struct Alias(String);

impl Alias {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Visitor for Alias {
    fn begin(&mut self) {
        self.0.push_str("alias    alias_table_agc_state\n");
    }

    fn visit(&mut self, addr: usize, _words: usize, name: &str) {
        self.0.push_str(&format!("{:>32} {:>8}\n", name, addr));
    }

    fn end(&mut self) {
        self.0.push_str("endalias\n");
    }
}
