//! Embedded word lists
//!
//! Word lists compiled into the binary at build time, one constant per length.

include!(concat!(env!("OUT_DIR"), "/words.rs"));
