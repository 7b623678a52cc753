pub mod movie_parser;
