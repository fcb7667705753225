//! REST API tests.
//!
//! Exercises the HAL representations served for databases, collections and
//! documents, pagination, and error responses.

mod common;

use common::assertions::{assert_error_body, assert_hal_json, assert_status, embedded, href};
use common::fixtures::CUSTOMER_OID;
use common::harness::RestTestHarness;
use resthal_rest::ServerConfig;
use serde_json::{Value, json};

const BASE: &str = "http://localhost:8080";

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let harness = RestTestHarness::new();
        let response = harness.get("/health").await;

        assert_status(&response, 200);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["backend"], "memory");
        assert!(body["timestamp"].is_string());
    }
}

mod database {
    use super::*;

    #[tokio::test]
    async fn test_lists_collections() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop").await;

        assert_status(&response, 200);
        assert_hal_json(&response);

        let body: Value = response.json();
        assert_eq!(body["_id"], "shop");
        assert_eq!(body["_size"], 3);
        assert_eq!(href(&body, "self"), Some("http://localhost:8080/shop"));

        let items = embedded(&body);
        let names: Vec<&str> = items.iter().filter_map(|i| i["_id"].as_str()).collect();
        assert_eq!(names, vec!["orders", "customers", "broken"]);
        assert_eq!(
            href(&items[0], "self"),
            Some("http://localhost:8080/shop/orders")
        );
    }

    #[tokio::test]
    async fn test_missing_database() {
        let harness = RestTestHarness::new();
        let response = harness.get("/nowhere").await;

        assert_status(&response, 404);
        assert_error_body(&response.json(), 404);
    }
}

mod collection {
    use super::*;

    #[tokio::test]
    async fn test_first_page() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop/orders").await;

        assert_status(&response, 200);
        assert_hal_json(&response);

        let body: Value = response.json();
        assert_eq!(body["_id"], "orders");
        assert_eq!(body["_size"], 5);
        assert_eq!(body["_returned"], 5);

        assert_eq!(href(&body, "self"), Some("http://localhost:8080/shop/orders"));
        assert_eq!(href(&body, "rh:db"), Some("http://localhost:8080/shop"));
        assert_eq!(
            href(&body, "first"),
            Some("http://localhost:8080/shop/orders?page=1&pagesize=10")
        );
        assert!(href(&body, "next").is_none());
        assert!(href(&body, "previous").is_none());

        let items = embedded(&body);
        assert_eq!(items.len(), 5);
        assert_eq!(
            href(&items[2], "self"),
            Some("http://localhost:8080/shop/orders/c")
        );
    }

    #[tokio::test]
    async fn test_reserved_keys_come_last() {
        let harness = RestTestHarness::new();
        let body: Value = harness.get("/shop/orders").await.json();

        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["_id", "_size", "_returned", "_links", "_embedded"]);

        let item_keys: Vec<&String> = embedded(&body)[0].as_object().unwrap().keys().collect();
        assert_eq!(item_keys, vec!["_id", "total", "items", "_links"]);
    }

    #[tokio::test]
    async fn test_embedded_values_keep_shape() {
        let harness = RestTestHarness::new();
        let body: Value = harness.get("/shop/orders").await.json();
        let items = embedded(&body);

        assert_eq!(items[0]["items"], json!([{"sku": "x", "qty": 2}]));
        assert_eq!(items[1]["note"], Value::Null);
        assert_eq!(items[2]["ratio"], 0.25);
    }

    #[tokio::test]
    async fn test_middle_page() {
        let harness = RestTestHarness::new();
        let response = harness
            .server
            .get("/shop/orders")
            .add_query_param("page", 2)
            .add_query_param("pagesize", 2)
            .await;

        assert_status(&response, 200);
        let body: Value = response.json();
        assert_eq!(body["_size"], 5);
        assert_eq!(body["_returned"], 2);

        let ids: Vec<&str> = embedded(&body)
            .iter()
            .filter_map(|i| i["_id"].as_str())
            .collect();
        assert_eq!(ids, vec!["c", "d"]);

        assert_eq!(
            href(&body, "previous"),
            Some("http://localhost:8080/shop/orders?page=1&pagesize=2")
        );
        assert_eq!(
            href(&body, "next"),
            Some("http://localhost:8080/shop/orders?page=3&pagesize=2")
        );
    }

    #[tokio::test]
    async fn test_last_page() {
        let harness = RestTestHarness::new();
        let response = harness
            .server
            .get("/shop/orders")
            .add_query_param("page", 3)
            .add_query_param("pagesize", 2)
            .await;

        let body: Value = response.json();
        assert_eq!(body["_returned"], 1);
        assert!(href(&body, "next").is_none());
        assert!(href(&body, "previous").is_some());
    }

    #[tokio::test]
    async fn test_page_past_end_has_no_embedded() {
        let harness = RestTestHarness::new();
        let response = harness
            .server
            .get("/shop/orders")
            .add_query_param("page", 9)
            .await;

        assert_status(&response, 200);
        let body: Value = response.json();
        assert_eq!(body["_returned"], 0);
        assert!(body.get("_embedded").is_none());
    }

    #[tokio::test]
    async fn test_pagesize_is_capped() {
        let harness = RestTestHarness::new();
        let response = harness
            .server
            .get("/shop/orders")
            .add_query_param("pagesize", 5000)
            .await;

        let body: Value = response.json();
        assert_eq!(
            href(&body, "first"),
            Some("http://localhost:8080/shop/orders?page=1&pagesize=100")
        );
    }

    #[tokio::test]
    async fn test_invalid_pagination() {
        let harness = RestTestHarness::new();

        let zero = harness
            .server
            .get("/shop/orders")
            .add_query_param("page", 0)
            .await;
        assert_status(&zero, 400);
        assert_error_body(&zero.json(), 400);

        let garbage = harness
            .server
            .get("/shop/orders")
            .add_query_param("pagesize", "many")
            .await;
        assert_status(&garbage, 400);
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let harness = RestTestHarness::new();
        let response = harness.get("/public/drafts").await;

        assert_status(&response, 200);
        let body: Value = response.json();
        assert_eq!(body["_size"], 0);
        assert_eq!(body["_returned"], 0);
        assert!(body.get("_embedded").is_none());
        assert_eq!(
            href(&body, "self"),
            Some("http://localhost:8080/public/drafts")
        );
    }

    #[tokio::test]
    async fn test_embedded_self_links_resolve() {
        let harness = RestTestHarness::new();
        let body: Value = harness.get("/public/keys").await.json();

        let links: Vec<String> = embedded(&body)
            .iter()
            .filter_map(|item| href(item, "self").map(String::from))
            .collect();
        assert_eq!(
            links,
            vec![
                "http://localhost:8080/public/keys/k",
                "http://localhost:8080/public/keys/1.5",
                "http://localhost:8080/public/keys/true",
            ]
        );

        for link in &links {
            let path = link.strip_prefix(BASE).unwrap();
            let response = harness.get(path).await;
            assert_status(&response, 200);

            let document: Value = response.json();
            assert_eq!(href(&document, "self"), Some(link.as_str()));
        }
    }

    #[tokio::test]
    async fn test_single_item_collection() {
        let harness = RestTestHarness::new();
        let body: Value = harness.get("/public/docs").await.json();
        assert_eq!(body["_size"], 1);
        assert_eq!(
            href(&embedded(&body)[0], "self"),
            Some("http://localhost:8080/public/docs/readme")
        );
    }

    #[tokio::test]
    async fn test_item_without_identifier_fails_whole_page() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop/broken").await;

        assert_status(&response, 500);
        assert_error_body(&response.json(), 500);
    }

    #[tokio::test]
    async fn test_missing_collection() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop/nothing").await;
        assert_status(&response, 404);
    }
}

mod document {
    use super::*;

    #[tokio::test]
    async fn test_reads_document() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop/orders/a").await;

        assert_status(&response, 200);
        assert_hal_json(&response);

        let body: Value = response.json();
        assert_eq!(
            body,
            json!({
                "_id": "a",
                "total": 10,
                "items": [{"sku": "x", "qty": 2}],
                "_links": {
                    "self": {"href": "http://localhost:8080/shop/orders/a"},
                    "rh:coll": {"href": "http://localhost:8080/shop/orders"}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_object_id_document() {
        let harness = RestTestHarness::new();
        let path = format!("/shop/customers/{}", CUSTOMER_OID);
        let response = harness.get(&path).await;

        assert_status(&response, 200);
        let body: Value = response.json();
        assert_eq!(body["_id"], CUSTOMER_OID);
        assert_eq!(body["name"], "Ada");
        assert_eq!(href(&body, "self"), Some(format!("{}{}", BASE, path).as_str()));
    }

    #[tokio::test]
    async fn test_missing_document() {
        let harness = RestTestHarness::new();
        let response = harness.get("/shop/orders/zzz").await;

        assert_status(&response, 404);
        let body: Value = response.json();
        assert_error_body(&body, 404);
        assert_eq!(body["http status description"], "Not Found");
    }

    #[tokio::test]
    async fn test_nesting_bound() {
        let harness = RestTestHarness::with_config(ServerConfig {
            max_nesting_depth: 1,
            ..ServerConfig::for_testing()
        });

        assert_status(&harness.get("/shop/orders/a").await, 500);
        assert_status(&harness.get("/shop/orders/b").await, 200);
    }

    #[tokio::test]
    async fn test_base_url_is_normalized() {
        let harness = RestTestHarness::with_config(ServerConfig {
            base_url: "https://data.example.com/api///".to_string(),
            ..ServerConfig::for_testing()
        });

        let body: Value = harness.get("/shop/orders/b").await.json();
        assert_eq!(
            href(&body, "self"),
            Some("https://data.example.com/api/shop/orders/b")
        );
    }
}
