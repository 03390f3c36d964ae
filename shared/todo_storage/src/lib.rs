//! Todo storage services for the serverless todo backend
//!
//! This crate provides the DynamoDB-backed todo repository together with the
//! table bootstrap routine used for local development.

pub mod bootstrap;
pub mod todo;
