pub mod bootstrap;
pub mod checkout;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod state;
