//! Core traits for the TinyLink client
//!
//! This module defines the seams between the client core and the outside world.
//!
//! - [`LinkGateway`]: Request/response boundary to the remote link store
//! - [`Navigator`]: Hand-off of a URL to whatever performs navigation

pub mod link_gateway;
pub mod navigator;

pub use link_gateway::LinkGateway;
pub use navigator::Navigator;
