//! XML predefined entities

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("lt", "<");
    m.insert("gt", ">");
    m.insert("amp", "&");
    m.insert("quot", "\"");
    m.insert("apos", "'");
    m
});
