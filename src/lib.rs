//! Billogram Gateway - Invoice payment for a web shop checkout
//!
//! Creates Billogram customers and invoices when a buyer pays by invoice,
//! and applies Billogram's payment callbacks to the shop's orders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
