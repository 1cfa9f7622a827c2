//! Binary I/O for the container wire format
//!
//! `DataInput` and `DataOutput` read and write big-endian primitives over
//! byte slices, vectors and any `std::io` reader or writer.

pub mod data_input;
pub mod data_output;

pub use data_input::{DataInput, ReaderDataInput, SliceDataInput};
pub use data_output::{DataOutput, VecDataOutput, WriterDataOutput};

// Convenience functions
pub use data_input::{from_reader, from_slice};
pub use data_output::{to_vec, to_writer};
