//! Pull bits out of a byte stream, most significant bit first

use bit_vec::BitVec;
use std::io::{Read,ErrorKind};

pub struct BitReader {
    bits: BitVec,
    ptr: usize,
    count: u64
}

impl BitReader {
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
            ptr: 0,
            count: 0
        }
    }
    /// Get the next bit reading from the stream as needed.
    /// Returns `None` once the stream is exhausted, unlike LZ type decoders
    /// we do not pretend there are more zeros.
    /// `reader` should not be advanced outside this function until decoding is done.
    pub fn get_bit<R: Read>(&mut self,reader: &mut R) -> Result<Option<bool>,std::io::Error> {
        match self.bits.get(self.ptr) {
            Some(bit) => {
                self.ptr += 1;
                self.count += 1;
                Ok(Some(bit))
            },
            None => {
                let mut by: [u8;1] = [0];
                match reader.read_exact(&mut by) {
                    Ok(()) => {
                        // everything behind us has been used
                        self.bits = BitVec::from_bytes(&by);
                        self.ptr = 0;
                        self.get_bit(reader)
                    },
                    Err(e) if e.kind()==ErrorKind::UnexpectedEof => Ok(None),
                    Err(e) => Err(e)
                }
            }
        }
    }
    /// number of bits handed out so far
    pub fn bits_read(&self) -> u64 {
        self.count
    }
}

#[test]
fn msb_first() {
    let mut src = std::io::Cursor::new(vec![0xa0,0x01]);
    let mut rdr = BitReader::new();
    let mut bits = Vec::new();
    while let Some(bit) = rdr.get_bit(&mut src).expect("read failed") {
        bits.push(bit as u8);
    }
    assert_eq!(bits,vec![1,0,1,0,0,0,0,0,0,0,0,0,0,0,0,1]);
    assert_eq!(rdr.bits_read(),16);
}
