mod shorthand;

pub use shorthand::parse_attrs;
