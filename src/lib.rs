//! Symptom Intake - Patient symptom dialogue engine
//!
//! Detects the symptom a patient describes, asks the follow-up questions that
//! topic needs, and resolves to a graduated advisory (self-care, see a doctor,
//! seek emergency care). Any message mentioning emergency symptoms is flagged.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
