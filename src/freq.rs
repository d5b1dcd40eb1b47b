//! Frequency counting
//!
//! Produces the table of symbol counts that drives tree construction.
//! Every table carries exactly one `EOF_SYMBOL` with count 1, so even empty
//! input produces a usable table.

use std::collections::BTreeMap;
use std::io::BufRead;
use crate::{Symbol,EOF_SYMBOL};

/// Map from symbol to number of occurrences, iteration is in symbol order
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<Symbol,u64>
}

impl FrequencyTable {
    pub(crate) fn new() -> Self {
        Self {
            counts: BTreeMap::new()
        }
    }
    fn add(&mut self,sym: Symbol) {
        *self.counts.entry(sym).or_insert(0) += 1;
    }
    fn add_eof(&mut self) {
        self.counts.insert(EOF_SYMBOL,1);
    }
    /// Insert a raw entry, used when a table is parsed from a header.
    /// Returns false if the symbol was already present.
    pub(crate) fn insert(&mut self,sym: Symbol,count: u64) -> bool {
        self.counts.insert(sym,count).is_none()
    }
    /// Count every byte of an in-memory buffer
    pub fn count_slice(dat: &[u8]) -> Self {
        let mut ans = Self::new();
        for by in dat {
            ans.add(*by as Symbol);
        }
        ans.add_eof();
        ans
    }
    /// Count a line-oriented source.  The line terminator is counted once for
    /// each line that actually ended with one, so a final unterminated line
    /// adds no terminator.  `Encoder::put_lines` splits lines the same way.
    pub fn count_lines<R: BufRead>(reader: &mut R) -> Result<Self,std::io::Error> {
        let mut ans = Self::new();
        let mut line: Vec<u8> = Vec::new();
        let mut lines = 0;
        loop {
            line.clear();
            if reader.read_until(b'\n',&mut line)? == 0 {
                break;
            }
            for by in &line {
                ans.add(*by as Symbol);
            }
            lines += 1;
        }
        log::debug!("counted {} lines, {} distinct symbols",lines,ans.counts.len());
        ans.add_eof();
        Ok(ans)
    }
    /// count for `sym`, if present
    pub fn get(&self,sym: Symbol) -> Option<u64> {
        self.counts.get(&sym).copied()
    }
    /// number of entries, including `EOF_SYMBOL`
    pub fn len(&self) -> usize {
        self.counts.len()
    }
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
    /// iterate over (symbol,count) in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol,u64)> + '_ {
        self.counts.iter().map(|(s,c)| (*s,*c))
    }
    /// Sum of the counts of all symbols other than `EOF_SYMBOL`,
    /// which is the number of bytes that were counted.
    pub fn real_total(&self) -> u64 {
        self.iter().filter(|(s,_)| *s != EOF_SYMBOL).map(|(_,c)| c).sum()
    }
}

impl From<&str> for FrequencyTable {
    fn from(txt: &str) -> Self {
        Self::count_slice(txt.as_bytes())
    }
}

#[test]
fn counts_with_eof() {
    let freq = FrequencyTable::from("ab\n");
    let expected: Vec<(Symbol,u64)> = vec![(10,1),(97,1),(98,1),(EOF_SYMBOL,1)];
    assert_eq!(freq.iter().collect::<Vec<_>>(),expected);
}

#[test]
fn empty_input_has_only_eof() {
    let freq = FrequencyTable::count_slice(&[]);
    assert_eq!(freq.len(),1);
    assert_eq!(freq.get(EOF_SYMBOL),Some(1));
    assert_eq!(freq.real_total(),0);
}

#[test]
fn conservation() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n";
    let freq = FrequencyTable::from(test_data);
    assert_eq!(freq.real_total(),test_data.len() as u64);
    assert_eq!(freq.get(b'S' as Symbol),Some(3));
    assert_eq!(freq.get(b' ' as Symbol),Some(13));
}

#[test]
fn lines_agree_with_slice() {
    let test_data = "line one\nline two\n\nunterminated";
    let mut reader = std::io::Cursor::new(test_data.as_bytes());
    let by_lines = FrequencyTable::count_lines(&mut reader).expect("read failed");
    assert_eq!(by_lines,FrequencyTable::from(test_data));
    assert_eq!(by_lines.get(b'\n' as Symbol),Some(3));
}
