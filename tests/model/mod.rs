mod tests_parser_flow;
#[cfg(feature = "serde")]
mod tests_serialize;
