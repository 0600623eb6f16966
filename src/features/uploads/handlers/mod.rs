mod multipart_parser;
mod upload_handler;

pub use multipart_parser::collect_files;
pub use upload_handler::*;
