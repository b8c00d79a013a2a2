//! Conversions from `graphql_client` generated types to domain types.

mod products;

pub use products::convert_product;
