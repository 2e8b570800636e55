//! Command-line front end for Wren: highlights Java and Kotlin files into
//! an ANSI terminal.

pub mod cli;
pub mod commands;
pub mod terminal;
