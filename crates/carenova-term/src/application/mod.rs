//! Application layer: command line parsing and the session loop that wires the
//! conversation to the terminal and the network.

pub mod cli;
pub mod ui;
