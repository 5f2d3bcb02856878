//! Data models module
//!
//! Defines the request and response data structures of the generation API

pub mod api;

pub use api::{
    AggregateData, Category, Difficulty, GenerateAllResponse, GenerateRequest, GenerateResponse,
    GenerationParams, OdaiData, ProviderErrors, ProviderId,
};
