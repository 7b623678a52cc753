pub mod year_writer;
