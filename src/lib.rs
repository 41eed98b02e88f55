#![allow(unknown_lints)]

//! Wire-format codec and tunnel-message processing core for an I2P
//! router: the common structure codec, the I2NP message codec, the
//! tunnel message engine, the SU3 reseed container parser, and the NetDB
//! storage/resolution contracts.
//!
//! This crate is the router's core, not the router: the CLI entry point,
//! logging backend, concrete transport sockets (NTCP2/SSU), HTTPS reseed
//! fetching, and the control loop that drives everything below are all
//! external collaborators this crate never constructs, only describes by
//! contract (see [`netdb`]'s `Bootstrap`/`Reseed`/`Resolver` traits and
//! [`transport`]'s `Transport`/`Session` traits).

pub mod common;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod i2np;
pub mod netdb;
pub mod su3;
pub mod transport;
pub mod tunnel;
