//! Property-based tests for pure formatting and protocol helpers

mod elapsed_format;
mod protocol_values;
