//! Internal helpers for bit level I/O
//!
//! This module is used by `codec`.

pub mod bit_reader;
