//! Core domain logic for the terminal client.
//!
//! This module contains the conversation state machine and the data models that
//! drive it, independent of the terminal and of the network transports.

pub mod models;
pub mod services;
