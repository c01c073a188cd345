//! Regression checks with per-endpoint status expectations. A lookup of
//! something that may already be gone accepts 404 as well as 200.

use tracing::debug;

use crate::error::{Error, Result};
use crate::http::client::ApiClient;
use crate::http::method::HttpMethod;
use crate::http::request::RequestInput;
use crate::models::{Category, Order, Pet, Tag, User};
use crate::testing::TestCase;

use super::{decode_object, field_text, to_json};

const PET_ID: u64 = 12345;
const USERNAME: &str = "testuser";
const SHIP_DATE: &str = "2023-12-20T10:00:00.000Z";
const STATUSES: [&str; 3] = ["available", "pending", "sold"];

pub fn cases(client: &ApiClient) -> Vec<TestCase<'_>> {
    vec![
        TestCase::new("Add new pet to store", move || add_pet(client)),
        TestCase::new("Update existing pet", move || update_pet(client)),
        TestCase::new("Find pet by ID", move || {
            expect(client, RequestInput::new(HttpMethod::Get, format!("/pet/{PET_ID}")), &[200, 404])
        }),
        TestCase::new("Find pets by status", move || find_by_statuses(client)),
        TestCase::new("Delete pet", move || {
            expect(client, RequestInput::new(HttpMethod::Delete, format!("/pet/{PET_ID}")), &[200])
        }),
        TestCase::new("Place order for pet", move || place_order(client)),
        TestCase::new("Find order by ID", move || {
            expect(client, RequestInput::new(HttpMethod::Get, "/store/order/1"), &[200, 404])
        }),
        TestCase::new("Get store inventory", move || {
            expect(client, RequestInput::new(HttpMethod::Get, "/store/inventory"), &[200])
        }),
        TestCase::new("Delete order", move || {
            expect(client, RequestInput::new(HttpMethod::Delete, "/store/order/1"), &[200])
        }),
        TestCase::new("Create user", move || create_user(client)),
        TestCase::new("Get user by username", move || {
            expect(client, RequestInput::new(HttpMethod::Get, format!("/user/{USERNAME}")), &[200, 404])
        }),
        TestCase::new("Update user", move || update_user(client)),
        TestCase::new("Delete user", move || {
            expect(client, RequestInput::new(HttpMethod::Delete, format!("/user/{USERNAME}")), &[200])
        }),
        TestCase::new("User login", move || {
            let endpoint = format!("/user/login?username={USERNAME}&password=password123");
            expect(client, RequestInput::new(HttpMethod::Get, endpoint), &[200, 400])
        }),
        TestCase::new("User logout", move || {
            expect(client, RequestInput::new(HttpMethod::Get, "/user/logout"), &[200])
        }),
    ]
}

fn expect(client: &ApiClient, request: RequestInput, accepted: &[u16]) -> Result<String> {
    let response = client.send_expecting(request, accepted)?;
    debug!(status = response.status, duration_ms = response.duration_ms as u64, "accepted");
    Ok(format!("Status: {}", response.status))
}

pub fn buddy() -> Pet {
    Pet {
        id: PET_ID,
        category: Some(Category {
            id: 1,
            name: "Dogs".to_string(),
        }),
        name: "Buddy".to_string(),
        photo_urls: vec!["http://example.com/photo.jpg".to_string()],
        tags: vec![Tag {
            id: 1,
            name: "friendly".to_string(),
        }],
        status: "available".to_string(),
    }
}

fn add_pet(client: &ApiClient) -> Result<String> {
    let request = RequestInput::new(HttpMethod::Post, "/pet").with_body(to_json(&buddy())?);
    let response = client.send_expecting(request, &[200])?;

    let pet = decode_object(&response.body)?;
    let name = field_text(&pet, "name")?;
    if name != "Buddy" {
        return Err(Error::Assertion {
            field: "name".to_string(),
            expected: "Buddy".to_string(),
            actual: name,
        });
    }
    Ok(format!("Status: {} - Name: {name}", response.status))
}

fn update_pet(client: &ApiClient) -> Result<String> {
    let pet = Pet {
        id: PET_ID,
        category: None,
        name: "Buddy Updated".to_string(),
        photo_urls: Vec::new(),
        tags: Vec::new(),
        status: "sold".to_string(),
    };
    let request = RequestInput::new(HttpMethod::Put, "/pet").with_body(to_json(&pet)?);
    expect(client, request, &[200])
}

fn find_by_statuses(client: &ApiClient) -> Result<String> {
    for status in STATUSES {
        let endpoint = format!("/pet/findByStatus?status={status}");
        client.send_expecting(RequestInput::new(HttpMethod::Get, endpoint), &[200])?;
    }
    Ok(format!("Statuses checked: {}", STATUSES.join(", ")))
}

fn place_order(client: &ApiClient) -> Result<String> {
    let order = Order {
        id: 1,
        pet_id: PET_ID,
        quantity: 1,
        ship_date: SHIP_DATE.to_string(),
        status: "placed".to_string(),
        complete: true,
    };
    let request = RequestInput::new(HttpMethod::Post, "/store/order").with_body(to_json(&order)?);
    expect(client, request, &[200])
}

pub fn test_user(first_name: &str, email: &str, password: &str) -> User {
    User {
        id: Some(1),
        username: USERNAME.to_string(),
        first_name: first_name.to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password: password.to_string(),
        phone: "1234567890".to_string(),
        user_status: 1,
    }
}

fn create_user(client: &ApiClient) -> Result<String> {
    let user = test_user("Test", "test@example.com", "password123");
    let request = RequestInput::new(HttpMethod::Post, "/user").with_body(to_json(&user)?);
    expect(client, request, &[200])
}

fn update_user(client: &ApiClient) -> Result<String> {
    let user = test_user("Updated", "updated@example.com", "newpassword");
    let request =
        RequestInput::new(HttpMethod::Put, format!("/user/{USERNAME}")).with_body(to_json(&user)?);
    expect(client, request, &[200])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::history::History;
    use crate::http::client::DEFAULT_TIMEOUT_MS;
    use crate::http::test_server::{CannedResponse, TestServer};
    use crate::testing::TestRunner;

    #[test]
    fn buddy_payload_carries_tag() {
        assert_eq!(
            serde_json::to_value(buddy()).unwrap(),
            json!({
                "id": 12345,
                "category": {"id": 1, "name": "Dogs"},
                "name": "Buddy",
                "photoUrls": ["http://example.com/photo.jpg"],
                "tags": [{"id": 1, "name": "friendly"}],
                "status": "available",
            })
        );
    }

    #[test]
    fn add_pet_checks_echoed_name() {
        let server = TestServer::spawn(vec![
            CannedResponse::ok(r#"{"id":12345,"name":"Buddy"}"#),
            CannedResponse::ok(r#"{"id":12345,"name":"Rex"}"#),
        ]);
        let client = ApiClient::new(&server.base_url, DEFAULT_TIMEOUT_MS).unwrap();

        assert_eq!(add_pet(&client).unwrap(), "Status: 200 - Name: Buddy");
        let err = add_pet(&client).unwrap_err();
        assert_eq!(err.to_string(), "field `name` is Rex, expected Buddy");
    }

    #[test]
    fn lookups_accept_not_found() {
        let mut responses = vec![
            CannedResponse::ok(r#"{"id":12345,"name":"Buddy"}"#),
            CannedResponse::ok("{}"),
            CannedResponse::new(404, r#"{"message":"Pet not found"}"#),
        ];
        responses.extend((0..3).map(|_| CannedResponse::ok("[]")));
        responses.extend([
            CannedResponse::ok("{}"),
            CannedResponse::ok("{}"),
            CannedResponse::new(404, r#"{"message":"Order not found"}"#),
            CannedResponse::ok("{}"),
            // delete order: 404 is not acceptable here
            CannedResponse::new(404, r#"{"message":"Order Not Found"}"#),
            CannedResponse::ok("{}"),
            CannedResponse::new(404, r#"{"message":"User not found"}"#),
            CannedResponse::ok("{}"),
            CannedResponse::ok("{}"),
            CannedResponse::new(400, "{}"),
            CannedResponse::ok("{}"),
        ]);
        let server = TestServer::spawn(responses);
        let client = ApiClient::new(&server.base_url, DEFAULT_TIMEOUT_MS).unwrap();

        let mut runner = TestRunner::new(Vec::new());
        runner.run_suite(cases(&client)).unwrap();
        let (out, report) = runner.finish("regression", History::new());
        let text = String::from_utf8(out).unwrap();

        assert_eq!((report.total, report.passed, report.failed), (15, 14, 1));
        assert!(text.contains("\nTEST: Find pet by ID\n   Status: 404\n✅ PASSED\n"));
        assert!(text.contains(
            "\nTEST: Delete order\n❌ FAILED: unexpected HTTP 404 (expected one of [200]): "
        ));
        assert!(text.contains("\nTEST: User login\n   Status: 400\n✅ PASSED\n"));

        let requests = server.finish();
        assert_eq!(requests.len(), 17);
        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].path, "/pet");
        let updated: Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(updated, json!({"id": 12345, "name": "Buddy Updated", "status": "sold"}));
        assert_eq!(requests[5].path, "/pet/findByStatus?status=sold");
        let order: Value = serde_json::from_str(&requests[7].body).unwrap();
        assert_eq!(order["shipDate"], "2023-12-20T10:00:00.000Z");
        let user: Value = serde_json::from_str(&requests[13].body).unwrap();
        assert_eq!(requests[13].path, "/user/testuser");
        assert_eq!(user["password"], "newpassword");
    }
}
