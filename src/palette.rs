use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_PALETTE_SIZE: usize = 50;

// F is deliberately absent; colors never reach full channel intensity.
const HEX_DIGITS: &[u8; 15] = b"0123456789ABCDE";

/// Pool of series colors generated once per page load and handed out in
/// allocation order. Once the pool runs out the last color is reused.
#[derive(Debug, Clone)]
pub struct ColorPool {
    colors: Vec<String>,
    index: usize,
}

impl ColorPool {
    pub fn generate<R: Rng>(size: usize, rng: &mut R) -> Self {
        let colors = (0..size.max(1)).map(|_| random_color(&mut *rng)).collect();
        Self { colors, index: 0 }
    }

    pub fn from_entropy(size: usize) -> Self {
        Self::generate(size, &mut StdRng::from_entropy())
    }

    pub fn next_color(&mut self) -> &str {
        let current = self.index;
        if self.index + 1 < self.colors.len() {
            self.index += 1;
        }
        &self.colors[current]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn capacity(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }
}

pub fn random_color<R: Rng>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char);
    }
    color
}
