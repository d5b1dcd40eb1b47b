//! Bit level encoding and decoding
//!
//! The encoder concatenates codes from a `CodeTable`, always closing with the
//! code for `EOF_SYMBOL`.  The decoder walks the `Tree` one bit at a time and
//! stops when it reaches the `EOF_SYMBOL` leaf.  There is no length field, so
//! any padding after the EOF code is never read.

use bit_vec::BitVec;
use std::io::{BufRead,Read,Write};
use crate::codes::CodeTable;
use crate::tree::Tree;
use crate::tools::bit_reader::BitReader;
use crate::{DYNERR,Error,Symbol,EOF_SYMBOL,MAX_SYMBOL};

/// Accumulates the bits for a stream of symbols
pub struct Encoder<'a> {
    table: &'a CodeTable,
    bits: BitVec
}

impl<'a> Encoder<'a> {
    pub fn new(table: &'a CodeTable) -> Self {
        Self {
            table,
            bits: BitVec::new()
        }
    }
    pub fn put_symbol(&mut self,sym: Symbol) -> Result<(),Error> {
        let code = self.table.get(sym).ok_or(Error::UnknownSymbol(sym))?;
        self.bits.extend(code.iter());
        Ok(())
    }
    pub fn put_slice(&mut self,dat: &[u8]) -> Result<(),Error> {
        for by in dat {
            self.put_symbol(*by as Symbol)?;
        }
        Ok(())
    }
    /// Encode a line-oriented source.  Lines are split the same way as
    /// `FrequencyTable::count_lines`, the terminator is coded only if it was read.
    pub fn put_lines<R: BufRead>(&mut self,reader: &mut R) -> Result<(),DYNERR> {
        let mut line: Vec<u8> = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n',&mut line)? == 0 {
                return Ok(());
            }
            self.put_slice(&line)?;
        }
    }
    /// bits accumulated so far
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }
    /// Append the code for `EOF_SYMBOL` and return the bits
    pub fn finish(mut self) -> Result<BitVec,Error> {
        self.put_symbol(EOF_SYMBOL)?;
        log::debug!("encoded {} bits",self.bits.len());
        Ok(self.bits)
    }
}

/// Number of bits that encoding `dat` would produce, including the EOF code
pub fn bit_count(dat: &[u8],table: &CodeTable) -> Result<u64,Error> {
    let mut ans = 0;
    for sym in dat.iter().map(|by| *by as Symbol).chain([EOF_SYMBOL]) {
        ans += table.get(sym).ok_or(Error::UnknownSymbol(sym))?.len() as u64;
    }
    Ok(ans)
}

/// Convenience function, encode a slice including the EOF code
pub fn encode_slice(dat: &[u8],table: &CodeTable) -> Result<BitVec,Error> {
    let mut encoder = Encoder::new(table);
    encoder.put_slice(dat)?;
    encoder.finish()
}

/// Outcome of feeding one bit to the decoder
#[derive(Debug,PartialEq,Eq)]
pub enum Step {
    /// the cursor moved to an internal node
    Continue,
    /// a leaf was reached, cursor is back at the root
    Emit(u8),
    /// the EOF leaf was reached, nothing more should be read
    Done
}

/// Walks the tree one bit at a time
pub struct Decoder<'a> {
    tree: &'a Tree,
    curs: usize
}

impl<'a> Decoder<'a> {
    pub fn new(tree: &'a Tree) -> Self {
        Self {
            tree,
            curs: tree.root()
        }
    }
    pub fn step(&mut self,bit: bool) -> Result<Step,Error> {
        let node = self.tree.node(self.curs);
        let branch = match bit {
            false => node.zero,
            true => node.one
        };
        let next = branch.ok_or(Error::InvalidCode)?;
        let child = self.tree.node(next);
        if !child.is_leaf() {
            self.curs = next;
            return Ok(Step::Continue);
        }
        self.curs = self.tree.root();
        match child.symbol {
            EOF_SYMBOL => Ok(Step::Done),
            sym if sym <= MAX_SYMBOL => Ok(Step::Emit(sym as u8)),
            _ => Err(Error::InvalidCode)
        }
    }
}

/// Decode an in-memory bit vector, stopping at the EOF code
pub fn decode_bits(bits: &BitVec,tree: &Tree) -> Result<Vec<u8>,Error> {
    let mut ans = Vec::new();
    let mut decoder = Decoder::new(tree);
    for bit in bits.iter() {
        match decoder.step(bit)? {
            Step::Continue => {},
            Step::Emit(by) => ans.push(by),
            Step::Done => return Ok(ans)
        }
    }
    Err(Error::TruncatedStream)
}

/// Decode bits pulled from `reader` into `writer`, stopping at the EOF code.
/// Returns the number of bytes written.
pub fn decode<R: Read,W: Write>(reader: &mut R,writer: &mut W,tree: &Tree) -> Result<u64,DYNERR> {
    let mut bits = BitReader::new();
    let mut decoder = Decoder::new(tree);
    let mut count = 0;
    loop {
        let bit = match bits.get_bit(reader)? {
            Some(bit) => bit,
            None => {
                log::error!("stream ended after {} bits",bits.bits_read());
                return Err(Box::new(Error::TruncatedStream));
            }
        };
        match decoder.step(bit)? {
            Step::Continue => {},
            Step::Emit(by) => {
                writer.write_all(&[by])?;
                count += 1;
            },
            Step::Done => {
                log::debug!("reached EOF code after {} bits",bits.bits_read());
                return Ok(count);
            }
        }
    }
}

#[cfg(test)]
fn setup(txt: &str) -> (Tree,CodeTable) {
    let tree = Tree::build(&crate::freq::FrequencyTable::from(txt)).expect("build failed");
    let table = CodeTable::from_tree(&tree);
    (tree,table)
}

#[test]
fn encode_works() {
    let (_,table) = setup("ab\n");
    let bits = encode_slice("ab\n".as_bytes(),&table).expect("encode failed");
    assert_eq!(crate::codes::bits_to_string(&bits),"01100011");
    assert_eq!(bits.to_bytes(),vec![0x63]);
    assert_eq!(bit_count("ab\n".as_bytes(),&table).unwrap(),8);
}

#[test]
fn repeated_symbol() {
    let (tree,table) = setup("aaaa");
    let bits = encode_slice("aaaa".as_bytes(),&table).expect("encode failed");
    assert_eq!(crate::codes::bits_to_string(&bits),"11110");
    // padding is never read
    let padded = BitVec::from_bytes(&bits.to_bytes());
    assert_eq!(decode_bits(&padded,&tree).expect("decode failed"),"aaaa".as_bytes().to_vec());
}

#[test]
fn lines_agree_with_slice() {
    let test_data = "one\ntwo\n\nthree";
    let (_,table) = setup(test_data);
    let mut encoder = Encoder::new(&table);
    encoder.put_lines(&mut std::io::Cursor::new(test_data.as_bytes())).expect("encode failed");
    assert_eq!(encoder.bit_count() as u64 + table.get(EOF_SYMBOL).unwrap().len() as u64,
        bit_count(test_data.as_bytes(),&table).unwrap());
    assert_eq!(encoder.finish().unwrap(),encode_slice(test_data.as_bytes(),&table).unwrap());
}

#[test]
fn unknown_symbol() {
    let (_,table) = setup("abc");
    assert!(matches!(encode_slice("abd".as_bytes(),&table),Err(Error::UnknownSymbol(100))));
    assert!(matches!(bit_count("z".as_bytes(),&table),Err(Error::UnknownSymbol(122))));
}

#[test]
fn decode_stops_at_eof() {
    let (tree,_) = setup("ab\n");
    // 01 10 00 11, then a code for 'a' that must not be emitted
    let bits = BitVec::from_bytes(&[0x63,0x40]);
    assert_eq!(decode_bits(&bits,&tree).expect("decode failed"),"ab\n".as_bytes().to_vec());
    let mut out = Vec::new();
    let count = decode(&mut std::io::Cursor::new(vec![0x63,0x40]),&mut out,&tree).expect("decode failed");
    assert_eq!(count,3);
    assert_eq!(out,"ab\n".as_bytes().to_vec());
}

#[test]
fn truncated() {
    let (tree,_) = setup("ab\n");
    // 01 10 00 01 never reaches EOF
    let bits = BitVec::from_bytes(&[0x61]);
    assert!(matches!(decode_bits(&bits,&tree),Err(Error::TruncatedStream)));
    let mut out = Vec::new();
    let err = decode(&mut std::io::Cursor::new(vec![0x61]),&mut out,&tree).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::TruncatedStream)));
}

#[test]
fn invalid_code() {
    let (tree,_) = setup("");
    let mut decoder = Decoder::new(&tree);
    assert!(matches!(decoder.step(true),Err(Error::InvalidCode)));
    assert_eq!(decoder.step(false).unwrap(),Step::Done);
}
