pub mod byte_reader;
pub mod byte_writer;
pub mod error;
pub mod value;
