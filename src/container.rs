//! Container header
//!
//! The compressed stream begins with the frequency table, the bit body follows
//! immediately with no length field.  All integers are little endian.
//!
//! offset | size | contents
//! -------|------|---------
//! 0      | 3    | signature `HUF`
//! 3      | 2    | number of entries
//! 5      | 10*n | entries, each a 2 byte symbol followed by an 8 byte count
//!
//! Entries are written in ascending symbol order, but any order is accepted.

use std::io::{Read,Write,ErrorKind};
use crate::freq::FrequencyTable;
use crate::{DYNERR,Error,EOF_SYMBOL,MAX_SYMBOL};

pub const SIGNATURE: [u8;3] = *b"HUF";
/// byte values plus EOF
const MAX_ENTRIES: usize = MAX_SYMBOL as usize + 2;

/// length of the header that `write_header` produces for this table
pub fn header_len(freq: &FrequencyTable) -> u64 {
    5 + 10 * freq.len() as u64
}

/// Write the frequency table, returns the number of bytes written
pub fn write_header<W: Write>(writer: &mut W,freq: &FrequencyTable) -> Result<u64,std::io::Error> {
    writer.write_all(&SIGNATURE)?;
    writer.write_all(&u16::to_le_bytes(freq.len() as u16))?;
    for (sym,count) in freq.iter() {
        writer.write_all(&u16::to_le_bytes(sym))?;
        writer.write_all(&u64::to_le_bytes(count))?;
    }
    Ok(header_len(freq))
}

/// read a fixed length field, running out of data means the header is bad
fn read_field<R: Read,const N: usize>(reader: &mut R) -> Result<[u8;N],DYNERR> {
    let mut ans = [0;N];
    match reader.read_exact(&mut ans) {
        Ok(()) => Ok(ans),
        Err(e) if e.kind()==ErrorKind::UnexpectedEof => {
            log::error!("header is truncated");
            Err(Box::new(Error::MalformedHeader))
        },
        Err(e) => Err(Box::new(e))
    }
}

fn reject(msg: &str) -> DYNERR {
    log::error!("{}",msg);
    Box::new(Error::MalformedHeader)
}

/// Read and validate the frequency table, leaving `reader` at the start of the bit body
pub fn read_header<R: Read>(reader: &mut R) -> Result<FrequencyTable,DYNERR> {
    let sig: [u8;3] = read_field(reader)?;
    if sig != SIGNATURE {
        return Err(reject("signature mismatch"));
    }
    let entries = u16::from_le_bytes(read_field(reader)?) as usize;
    if entries == 0 || entries > MAX_ENTRIES {
        return Err(reject(&format!("bad entry count {}",entries)));
    }
    let mut ans = FrequencyTable::new();
    // every internal node count is bounded by the total
    let mut total: u64 = 0;
    for _i in 0..entries {
        let sym = u16::from_le_bytes(read_field(reader)?);
        let count = u64::from_le_bytes(read_field(reader)?);
        if sym > EOF_SYMBOL {
            return Err(reject(&format!("symbol {} out of range",sym)));
        }
        if count == 0 {
            return Err(reject(&format!("symbol {} has zero count",sym)));
        }
        total = match total.checked_add(count) {
            Some(t) => t,
            None => return Err(reject("total count overflows"))
        };
        if !ans.insert(sym,count) {
            return Err(reject(&format!("symbol {} is repeated",sym)));
        }
    }
    if ans.get(EOF_SYMBOL) != Some(1) {
        return Err(reject("end of stream entry is missing or has wrong count"));
    }
    log::debug!("header has {} entries",entries);
    Ok(ans)
}

#[cfg(test)]
const AB_HEADER: &str = "485546 0400 0A00 0100000000000000 6100 0100000000000000 6200 0100000000000000 0001 0100000000000000";

#[cfg(test)]
fn parse(hex_str: &str) -> Result<FrequencyTable,DYNERR> {
    let dat = hex::decode(hex_str.replace(" ","")).unwrap();
    read_header(&mut std::io::Cursor::new(dat))
}

#[cfg(test)]
fn is_malformed(res: Result<FrequencyTable,DYNERR>) -> bool {
    match res {
        Err(e) => matches!(e.downcast_ref::<Error>(),Some(Error::MalformedHeader)),
        Ok(_) => false
    }
}

#[test]
fn header_works() {
    let freq = FrequencyTable::from("ab\n");
    let mut dat = Vec::new();
    let len = write_header(&mut dat,&freq).expect("write failed");
    assert_eq!(len,45);
    assert_eq!(dat,hex::decode(AB_HEADER.replace(" ","")).unwrap());
    assert_eq!(parse(AB_HEADER).expect("read failed"),freq);
}

#[test]
fn bad_signature() {
    assert!(is_malformed(parse(&AB_HEADER.replacen("485546","485547",1))));
}

#[test]
fn truncated_header() {
    assert!(is_malformed(parse(&AB_HEADER[0..AB_HEADER.len()-4])));
    assert!(is_malformed(parse("")));
}

#[test]
fn bad_entries() {
    // zero entries
    assert!(is_malformed(parse("485546 0000")));
    // missing EOF
    assert!(is_malformed(parse("485546 0100 6100 0100000000000000")));
    // EOF count is not 1
    assert!(is_malformed(parse("485546 0100 0001 0200000000000000")));
    // internal node marker as symbol
    assert!(is_malformed(parse("485546 0200 0101 0100000000000000 0001 0100000000000000")));
    // zero count
    assert!(is_malformed(parse("485546 0200 6100 0000000000000000 0001 0100000000000000")));
    // counts that cannot be summed
    assert!(is_malformed(parse("485546 0200 6100 FFFFFFFFFFFFFFFF 0001 0100000000000000")));
    // repeated symbol
    assert!(is_malformed(parse("485546 0300 6100 0100000000000000 6100 0100000000000000 0001 0100000000000000")));
}
