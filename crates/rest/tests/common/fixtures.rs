//! Test fixtures for REST API testing.

use serde_json::{Value, json};

/// Object id of the single customer.
pub const CUSTOMER_OID: &str = "507f1f77bcf86cd799439011";

/// Seed data for the in-memory store.
///
/// `shop/orders` holds five documents, `shop/customers` one document keyed by
/// an object id, and `shop/broken` one document without any identifier.
/// `public/keys` uses identifiers other than string `_id` values, and
/// `public/drafts` is empty.
pub fn seed() -> Value {
    json!({
        "shop": {
            "orders": [
                {"_id": "a", "total": 10, "items": [{"sku": "x", "qty": 2}]},
                {"_id": "b", "total": 20, "note": null},
                {"_id": "c", "total": 30, "ratio": 0.25},
                {"_id": "d", "total": 40},
                {"_id": "e", "total": 50}
            ],
            "customers": [
                {"_id": {"$oid": CUSTOMER_OID}, "name": "Ada"}
            ],
            "broken": [
                {"text": "no identifier"}
            ]
        },
        "public": {
            "docs": [
                {"_id": "readme", "title": "Welcome"}
            ],
            "keys": [
                {"id": "k", "note": "plain id"},
                {"_id": 1.5},
                {"_id": true}
            ],
            "drafts": []
        }
    })
}

/// Security configuration used by secured harnesses.
///
/// | User | Password | Roles |
/// |------|----------|-------|
/// | admin | secret | admins |
/// | reader | reader | readers |
///
/// Admins may do anything, readers may read `/shop`, anonymous callers may
/// read `/public`.
pub fn security() -> Value {
    json!({
        "users": [
            {"name": "admin", "password": "secret", "roles": ["admins"]},
            {"name": "reader", "password": "reader", "roles": ["readers"]}
        ],
        "permissions": [
            {"role": "admins", "path": "/"},
            {"role": "readers", "methods": ["GET"], "path": "/shop"},
            {"role": "$unauthenticated", "methods": ["GET"], "path": "/public"}
        ]
    })
}
