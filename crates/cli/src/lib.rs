//! Configuration pieces shared by the Podvol command-line front end.

pub mod config;
