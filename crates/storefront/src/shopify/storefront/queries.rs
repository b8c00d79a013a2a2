//! GraphQL query definitions for the Shopify Storefront API.

use graphql_client::GraphQLQuery;

// Scalar types for the Shopify GraphQL schema
// Must be defined in the same module where the GraphQLQuery derive is used
// Note: These MUST match the GraphQL schema scalar names exactly (uppercase)
#[allow(clippy::upper_case_acronyms)]
type Decimal = String;
#[allow(clippy::upper_case_acronyms)]
type URL = String;

/// Product detail page query: product by handle plus the variant resolved
/// from the visitor's selected options (aliased as `selectedVariant`).
#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/storefront/schema.graphql",
    query_path = "graphql/storefront/queries/product.graphql",
    response_derives = "Debug, Clone",
    variables_derives = "Debug, Clone"
)]
pub struct GetProduct;
