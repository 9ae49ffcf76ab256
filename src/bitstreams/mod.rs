/// Writes integers of arbitrary bit width into a byte buffer, most
/// significant bit first. The last byte is zero-padded on `build`.
pub struct BitWriter {
    os: Vec<u8>,
    pub written_bits: usize,
    current: u64,
    free: usize,
}

impl Default for BitWriter {
    fn default() -> Self {
        BitWriter {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the lowest `len` bits of `x`, starting from the most
    /// significant of them.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) {
        assert!(len <= 64, "Cannot write {} bits of an integer", len);

        let mut remaining = len;
        while remaining > 0 {
            let amount = remaining.min(self.free as u64);
            let chunk = (x >> (remaining - amount)) & ((1 << amount) - 1);

            self.free -= amount as usize;
            self.current |= chunk << self.free;

            if self.free == 0 {
                self.os.push(self.current as u8);
                self.current = 0;
                self.free = 8;
            }

            self.written_bits += amount as usize;
            remaining -= amount;
        }
    }

    /// Flushes the partially filled byte, if any, and returns the buffer.
    pub fn build(mut self) -> Box<[u8]> {
        if self.free < 8 {
            self.os.push(self.current as u8);
        }

        self.os.into_boxed_slice()
    }
}

/// Reads back integers written MSB-first by [`BitWriter`].
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BitReader {
    is: Box<[u8]>,
    position: usize,
    pub read_bits: usize,
    current: u64,
    fill: usize,
}

impl BitReader {
    pub fn new(input_stream: Box<[u8]>) -> Self {
        BitReader {
            is: input_stream,
            position: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    /// Returns the next bit, or `None` once the stream is exhausted.
    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<u64> {
        if self.fill == 0 {
            self.current = *self.is.get(self.position)? as u64;
            self.position += 1;
            self.fill = 8;
        }

        self.fill -= 1;
        self.read_bits += 1;

        Some((self.current >> self.fill) & 1)
    }

    /// Reads the next `len` bits as an MSB-first integer. `None` if fewer
    /// than `len` bits remain.
    #[inline(always)]
    pub fn read_int(&mut self, len: u64) -> Option<u64> {
        assert!(len <= 64, "Cannot read {} bits of an integer", len);

        let mut x = 0;
        for _ in 0..len {
            x = (x << 1) | self.read_bit()?;
        }

        Some(x)
    }

    /// Number of bits the underlying buffer holds in total.
    pub fn len_bits(&self) -> usize {
        self.is.len() << 3
    }
}
