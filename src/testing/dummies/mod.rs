mod headers;

pub use headers::{header_abc, header_binary};
