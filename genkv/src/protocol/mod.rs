//! Newline delimited text protocol.
//!
//! Requests are `<COMMAND>[ <arg>]*\n`, keywords are case sensitive and
//! arguments cannot contain spaces or newlines.
pub mod command;
pub mod line_codec;
pub mod reply;
