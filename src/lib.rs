//! Venture Forge - Strategy-Driven Document Forge
//!
//! This crate implements the document-generation core of a conversational
//! business mentor: archetype classification, specialized prompt composition,
//! a two-mode generation gateway, conversational document refinement, and
//! transcript-to-progress distillation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
