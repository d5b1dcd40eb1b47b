//! Static Huffman compression of whole streams
//!
//! Compression makes two passes over the input, one to count symbols and one
//! to encode them, so the input must be seekable.  The output is the frequency
//! table header (see `container`) followed by the encoded bits, padded with
//! zeros to a whole byte.
//!
//! Decompression reads the header, rebuilds the tree, and decodes until the
//! EOF code turns up.

use std::io::{Cursor,Read,Write,Seek,SeekFrom,BufReader,BufWriter,ErrorKind};
use crate::freq::FrequencyTable;
use crate::tree::Tree;
use crate::codes::{CodeTable,bits_to_string};
use crate::codec::{self,Encoder};
use crate::container;
use crate::{DYNERR,Options};

/// Results of compressing a stream
#[derive(Debug,Clone)]
pub struct Summary {
    /// bytes read, not counting the offset
    pub in_size: u64,
    /// bytes written (header and body), not counting the offset
    pub out_size: u64,
    /// length of the body in bits, before padding
    pub bit_count: u64,
    /// the body as a string of '0' and '1', useful for diagnostics,
    /// this takes a byte of memory for every encoded bit
    pub bits: String
}

/// Main compression function.
/// `expanded_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `compressed_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
pub fn compress<R,W>(expanded_in: &mut R, compressed_out: &mut W, opt: &Options) -> Result<Summary,DYNERR>
where R: Read + Seek, W: Write + Seek {
    let mut reader = BufReader::new(expanded_in);
    let mut writer = BufWriter::new(compressed_out);
    let expanded_length = reader.seek(SeekFrom::End(0))?;
    if opt.in_offset > expanded_length {
        return Err(Box::new(std::io::Error::new(ErrorKind::InvalidInput,"offset is beyond end of input")));
    }

    log::debug!("counting symbols");
    reader.seek(SeekFrom::Start(opt.in_offset))?;
    let freq = FrequencyTable::count_lines(&mut reader)?;
    let tree = Tree::build(&freq)?;
    let table = CodeTable::from_tree(&tree);

    log::debug!("encoding {} symbols",freq.real_total());
    reader.seek(SeekFrom::Start(opt.in_offset))?;
    let mut encoder = Encoder::new(&table);
    encoder.put_lines(&mut reader)?;
    let bits = encoder.finish()?;

    writer.seek(SeekFrom::Start(opt.out_offset))?;
    let header_size = container::write_header(&mut writer,&freq)?;
    let body = bits.to_bytes();
    writer.write_all(&body)?;
    writer.flush()?;
    log::debug!("header {} bytes, body {} bytes",header_size,body.len());
    Ok(Summary {
        in_size: expanded_length - opt.in_offset,
        out_size: header_size + body.len() as u64,
        bit_count: bits.len() as u64,
        bits: bits_to_string(&bits)
    })
}

/// Main decompression function.
/// `compressed_in` is an object with `Read` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<&[u8]>`.
/// `expanded_out` is an object with `Write` and `Seek` traits, usually `std::fs::File`, or `std::io::Cursor<Vec<u8>>`.
/// Returns (in_size,out_size) or error.
pub fn decompress<R,W>(compressed_in: &mut R, expanded_out: &mut W, opt: &Options) -> Result<(u64,u64),DYNERR>
where R: Read + Seek, W: Write + Seek {
    let mut reader = BufReader::new(compressed_in);
    let mut writer = BufWriter::new(expanded_out);
    // an offset beyond the end leaves nothing to read, `read_header` reports that
    let compressed_size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(opt.in_offset))?;
    writer.seek(SeekFrom::Start(opt.out_offset))?;

    let freq = container::read_header(&mut reader)?;
    let tree = Tree::build(&freq)?;
    log::debug!("decoding {} symbols",freq.real_total());
    let out_size = codec::decode(&mut reader,&mut writer,&tree)?;
    writer.flush()?;
    Ok((compressed_size.saturating_sub(opt.in_offset),out_size))
}

/// Convenience function, calls `compress` with a slice returning a Vec and the bit string
pub fn compress_slice(slice: &[u8],opt: &Options) -> Result<(Vec<u8>,String),DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    let summary = compress(&mut src,&mut ans,opt)?;
    Ok((ans.into_inner(),summary.bits))
}

/// Convenience function, calls `decompress` with a slice returning a Vec
pub fn decompress_slice(slice: &[u8],opt: &Options) -> Result<Vec<u8>,DYNERR> {
    let mut src = Cursor::new(slice);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    decompress(&mut src,&mut ans,opt)?;
    Ok(ans.into_inner())
}

// *************** TESTS *****************

#[cfg(test)]
use crate::{Error,STD_OPTIONS};

#[test]
fn compression_works() {
    let test_data = "ab\n".as_bytes();
    let huf_str = "485546 0400 0A00 0100000000000000 6100 0100000000000000 6200 0100000000000000 0001 0100000000000000 63";
    let (compressed,bits) = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode(huf_str.replace(" ","")).unwrap());
    assert_eq!(bits,"01100011");
}

#[test]
fn compression_works_degenerate() {
    let huf_str = "485546 0200 6100 0400000000000000 0001 0100000000000000 F0";
    let (compressed,bits) = compress_slice("aaaa".as_bytes(),&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode(huf_str.replace(" ","")).unwrap());
    assert_eq!(bits,"11110");

    let huf_str = "485546 0100 0001 0100000000000000 00";
    let (compressed,bits) = compress_slice(&[],&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed,hex::decode(huf_str.replace(" ","")).unwrap());
    assert_eq!(bits,"0");
}

#[test]
fn summary() {
    let test_data = "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes();
    let mut src = Cursor::new(test_data);
    let mut ans: Cursor<Vec<u8>> = Cursor::new(Vec::new());
    let summary = compress(&mut src,&mut ans,&STD_OPTIONS).expect("compression failed");
    let tree = Tree::build(&FrequencyTable::count_slice(test_data)).unwrap();
    assert_eq!(summary.in_size,test_data.len() as u64);
    assert_eq!(summary.out_size,ans.into_inner().len() as u64);
    assert_eq!(summary.bit_count,tree.weighted_depth());
    assert_eq!(summary.bits.len() as u64,summary.bit_count);
}

#[test]
fn invertibility() {
    let all_bytes: Vec<u8> = (0..=255).collect();
    let samples: Vec<&[u8]> = vec![
        "I am Sam. Sam I am. I do not like this Sam I am.\n".as_bytes(),
        "no trailing newline\nhere".as_bytes(),
        "ab\n".as_bytes(),
        "aaaa".as_bytes(),
        "\n\n\n".as_bytes(),
        "".as_bytes(),
        &all_bytes
    ];
    for test_data in samples {
        let (compressed,_) = compress_slice(test_data,&STD_OPTIONS).expect("compression failed");
        let expanded = decompress_slice(&compressed,&STD_OPTIONS).expect("expansion failed");
        assert_eq!(test_data.to_vec(),expanded);
    }
}

#[test]
fn invertibility_with_offsets() {
    let test_data = "HEADab\n".as_bytes();
    let opt = Options {
        in_offset: 4,
        out_offset: 4
    };
    let (compressed,_) = compress_slice(test_data,&opt).expect("compression failed");
    let (reference,_) = compress_slice("ab\n".as_bytes(),&STD_OPTIONS).expect("compression failed");
    assert_eq!(compressed[4..].to_vec(),reference);
    let opt = Options {
        in_offset: 4,
        out_offset: 0
    };
    let expanded = decompress_slice(&compressed,&opt).expect("expansion failed");
    assert_eq!(expanded,"ab\n".as_bytes().to_vec());
}

#[test]
fn truncated_body() {
    let (compressed,_) = compress_slice("I am Sam.".as_bytes(),&STD_OPTIONS).expect("compression failed");
    let err = decompress_slice(&compressed[0..compressed.len()-1],&STD_OPTIONS).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::TruncatedStream)));
}

#[test]
fn oversized_counts() {
    let huf_str = "485546 0200 6100 FFFFFFFFFFFFFFFF 0001 0100000000000000 F0";
    let err = decompress_slice(&hex::decode(huf_str.replace(" ","")).unwrap(),&STD_OPTIONS).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::MalformedHeader)));
}

#[test]
fn offset_beyond_end() {
    let opt = Options {
        in_offset: 100,
        out_offset: 0
    };
    let (compressed,_) = compress_slice("ab\n".as_bytes(),&STD_OPTIONS).expect("compression failed");
    let err = decompress_slice(&compressed,&opt).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::MalformedHeader)));
    let err = compress_slice("ab\n".as_bytes(),&opt).unwrap_err();
    let kind = err.downcast_ref::<std::io::Error>().map(|e| e.kind());
    assert_eq!(kind,Some(ErrorKind::InvalidInput));
}

#[test]
fn not_a_container() {
    let err = decompress_slice("plain text".as_bytes(),&STD_OPTIONS).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(),Some(Error::MalformedHeader)));
}
