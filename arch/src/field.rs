use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("`{value}` does not fit in {width} bits")]
pub struct Overflow {
    pub width: u8,
    pub value: i64,
}

/// Width-checked unsigned bit field.
///
/// The value always satisfies `bit_length(value) <= width`. Signed input is
/// stored as its two's complement in `width` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bits {
    width: u8,
    value: u32,
}

impl Bits {
    pub const fn new(width: u8) -> Self {
        Bits { width, value: 0 }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_set(&self) -> bool {
        self.value != 0
    }

    fn mask(&self) -> u32 {
        if self.width >= 32 {
            u32::MAX
        } else {
            (1 << self.width) - 1
        }
    }

    pub fn set(&mut self, value: u64) -> Result<(), Overflow> {
        if bit_length(value) > self.width as u32 {
            return Err(Overflow {
                width: self.width,
                value: value.min(i64::MAX as u64) as i64,
            });
        }
        self.value = value as u32;
        Ok(())
    }

    /// Negative values are accepted when their magnitude fits, and are kept as
    /// two's complement.
    pub fn set_signed(&mut self, value: i64) -> Result<(), Overflow> {
        if bit_length(value.unsigned_abs()) > self.width as u32 {
            return Err(Overflow {
                width: self.width,
                value,
            });
        }
        self.value = (value as u32) & self.mask();
        Ok(())
    }

    /// Decimal text, optionally with a leading `-`.
    pub fn set_str(&mut self, text: &str) -> Result<(), Overflow> {
        let overflow = Overflow {
            width: self.width,
            value: i64::MAX,
        };
        match text.strip_prefix('-') {
            Some(digits) => {
                let magnitude: u64 = digits.parse().map_err(|_| overflow)?;
                let value = i64::try_from(magnitude).map_err(|_| overflow)?;
                self.set_signed(-value)
            }
            None => self.set(text.parse().map_err(|_| overflow)?),
        }
    }

    /// Bit characters, most significant first. The bit length is the number
    /// of characters given, leading zeros included.
    pub fn set_bits<I>(&mut self, bits: I) -> Result<(), Overflow>
    where
        I: IntoIterator<Item = bool>,
    {
        let mut len = 0u32;
        let mut value = 0u64;
        for bit in bits {
            len += 1;
            if len > self.width as u32 {
                return Err(Overflow {
                    width: self.width,
                    value: len as i64,
                });
            }
            value = (value << 1) | bit as u64;
        }
        self.value = value as u32;
        Ok(())
    }

    pub fn render(&self) -> String {
        format!("{:0>width$b}", self.value, width = self.width as usize)
    }
}

pub fn bit_length(value: u64) -> u32 {
    u64::BITS - value.leading_zeros()
}

/// Packs fields most significant first into one word.
pub fn pack(fields: &[&Bits]) -> u32 {
    fields
        .iter()
        .fold(0u64, |word, field| (word << field.width) | field.value as u64) as u32
}
