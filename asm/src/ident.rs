use indexmap::IndexMap;

/// State name -> (defining line, start word address).
#[derive(Debug, Default)]
pub struct Idents(IndexMap<String, (usize, usize)>);

impl Idents {
    pub fn new() -> Self {
        Idents(IndexMap::new())
    }

    /// Returns the previous entry if the name was already defined.
    pub fn insert(&mut self, name: String, line: usize, addr: usize) -> Option<(usize, usize)> {
        self.0.insert(name, (line, addr))
    }

    pub fn get(&self, name: &str) -> Option<&(usize, usize)> {
        self.0.get(name)
    }

    pub fn get_addr(&self, name: &str) -> Option<usize> {
        self.0.get(name).map(|(_, addr)| *addr)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
