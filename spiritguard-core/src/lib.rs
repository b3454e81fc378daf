// spiritguard-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts the application needs from the outside world (sales source...)
pub mod ports;

// 2. Domain (business core)
// Normalizer, aggregation, outlier detection, compliance scorers, simulators.
// Depends on NOTHING else (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Files, encodings, CSV parsing, YAML configuration, discovery.
pub mod infrastructure;

// 4. Application (Use Cases)
// Wires ports + domain together for the CLI.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::SpiritGuardError;
