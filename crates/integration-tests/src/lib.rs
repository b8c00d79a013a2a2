//! Integration tests for the Ride storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ride-integration-tests
//! ```
//!
//! # Approach
//!
//! The tests build the real storefront router against a stub Shopify
//! GraphQL backend bound to a local port. The stub captures every request
//! body, so tests can assert both the rendered responses and the exact
//! variables sent over the wire.

#![cfg_attr(not(test), forbid(unsafe_code))]
