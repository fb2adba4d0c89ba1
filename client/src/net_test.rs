use super::*;

#[test]
fn endpoint_is_a_relative_path() {
    // Build-time substitution may change the path, never the shape.
    assert!(graphql_endpoint().starts_with('/'));
}
