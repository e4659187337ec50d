mod error;
mod list;
mod model;
mod reader;

pub use error::ParseError;
pub use list::parse_list;
pub use model::{RequestBatch, RequestDescriptor, RequestFormat};
pub use reader::{parse_request_contents, parse_request_file};
