//! Bookstore CLI - a console walkthrough of MongoDB queries.
//!
//! This crate provides the `bookstore` binary: it seeds a books collection
//! and runs the demonstration catalogue of finds, updates, aggregations,
//! index management and explain plans against it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
