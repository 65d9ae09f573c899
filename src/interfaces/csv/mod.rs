pub mod readers;
pub mod register_writer;
