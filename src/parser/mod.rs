mod api;
#[allow(non_fmt_panics)]
#[cfg(test)]
mod unit_tests;

pub use api::{parse_identifier, parse_qualified_name, QualifiedNameParser};
