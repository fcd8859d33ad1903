#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![forbid(unsafe_code)]

pub mod backend;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod entities;
pub mod framework;
pub mod processors;
