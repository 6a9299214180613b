/// Register value before the first word.
pub const SEED: u32 = 1;

/// 32-bit signature register.
///
/// Bit `i` below counts from the most significant bit, matching the order in
/// which image words are written out. Each word shifts the register left,
/// XORs in the word, and feeds taps 0, 4, 5 and 31 back into bit 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr(u32);

impl Default for Lfsr {
    fn default() -> Self {
        Lfsr(SEED)
    }
}

impl Lfsr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, word: u32) {
        let reg = self.0;
        let feedback = ((reg >> 31) ^ (reg >> 27) ^ (reg >> 26) ^ reg) & 1;
        self.0 = (reg << 1) ^ word ^ feedback;
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

pub fn signature<'a, I>(words: I) -> u32
where
    I: IntoIterator<Item = &'a u32>,
{
    let mut lfsr = Lfsr::new();
    for word in words {
        lfsr.feed(*word);
    }
    lfsr.value()
}
