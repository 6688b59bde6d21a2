//! HL7 v3 Quality Measure Document (`POQM_MT000001UV`) support.
//!
//! This module holds the QMD tree ([`document`]), the protocol-fixed literals it is built from
//! ([`constants`]), and the two translations between the tree and study definitions
//! ([`builder`] and [`reader`]).

pub mod builder;
pub mod constants;
pub mod document;
pub mod reader;
