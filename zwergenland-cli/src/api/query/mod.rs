//! OData `$filter` expressions for Graph queries

/// Quote a string literal, doubling embedded single quotes
pub fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `field eq 'value'`
pub fn equals(field: &str, value: &str) -> String {
    format!("{} eq {}", field, literal(value))
}

/// `startswith(field, 'value')`
pub fn starts_with(field: &str, value: &str) -> String {
    format!("startswith({}, {})", field, literal(value))
}
