//! Request and Response models for the service API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CheckRequest, SetRequest};
pub use responses::{
    CheckResponse, GetResponse, HealthResponse, KeyResponse, LimitStatusResponse,
    ProfileResponse, RemovedResponse, StatsResponse,
};
