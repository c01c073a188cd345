//! The sixteen-step smoke run. Every request must come back with exactly
//! HTTP 200.

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::http::client::ApiClient;
use crate::models::{Category, Order, Pet, User};
use crate::testing::TestCase;

use super::{decode_array, decode_object, field_int_or, field_text, to_json};

pub const PET_ID: &str = "12345";
pub const ORDER_ID: &str = "1";
pub const USERNAME: &str = "testuser123";
pub const PASSWORD: &str = "password123";
pub const SHIP_DATE: &str = "2023-12-15T10:00:00.000Z";

pub fn cases<'a>(client: &'a ApiClient, clock: &'a dyn Clock) -> Vec<TestCase<'a>> {
    vec![
        TestCase::new("Get store inventory", move || get_inventory(client)),
        TestCase::new("Create new pet", move || create_pet(client, clock)),
        // Expected to be absent unless something else created it.
        TestCase::new("Get pet by ID", move || get_pet(client, PET_ID)),
        TestCase::new("Find available pets", move || find_by_status(client, "available")),
        TestCase::new("Find pending pets", move || find_by_status(client, "pending")),
        TestCase::new("Find sold pets", move || find_by_status(client, "sold")),
        TestCase::new("Create order", move || create_order(client, PET_ID)),
        TestCase::new("Get order by ID", move || get_order(client, ORDER_ID)),
        TestCase::new("Delete order", move || delete_order(client, ORDER_ID)),
        TestCase::new("Create user", move || create_user(client, clock)),
        // The literal username below is not the one "Create user" generated.
        TestCase::new("Get user", move || get_user(client, USERNAME)),
        TestCase::new("Update user", move || update_user(client, USERNAME)),
        TestCase::new("Login user", move || login_user(client, USERNAME)),
        TestCase::new("Logout user", move || logout_user(client)),
        TestCase::new("Delete user", move || delete_user(client, USERNAME)),
        TestCase::new("Delete pet", move || delete_pet(client, PET_ID)),
    ]
}

// Store

pub fn get_inventory(client: &ApiClient) -> Result<String> {
    let inventory = decode_object(&client.send_get("/store/inventory")?)?;
    Ok(format!(
        "Inventory received - Available: {}",
        field_int_or(&inventory, "available", 0)
    ))
}

pub fn order_payload(pet_id: &str) -> Result<Order> {
    let pet_id = pet_id
        .parse()
        .map_err(|_| Error::InvalidId(pet_id.to_string()))?;
    Ok(Order {
        id: 1,
        pet_id,
        quantity: 1,
        ship_date: SHIP_DATE.to_string(),
        status: "placed".to_string(),
        complete: true,
    })
}

pub fn create_order(client: &ApiClient, pet_id: &str) -> Result<String> {
    let body = to_json(&order_payload(pet_id)?)?;
    let order = decode_object(&client.send_post("/store/order", &body)?)?;
    Ok(format!("Order created - ID: {}", field_text(&order, "id")?))
}

pub fn get_order(client: &ApiClient, order_id: &str) -> Result<String> {
    let order = decode_object(&client.send_get(&format!("/store/order/{order_id}"))?)?;
    Ok(format!("Order received - ID: {}", field_text(&order, "id")?))
}

pub fn delete_order(client: &ApiClient, order_id: &str) -> Result<String> {
    let result = decode_object(&client.send_delete(&format!("/store/order/{order_id}"))?)?;
    Ok(format!("Order deleted - Code: {}", field_text(&result, "code")?))
}

// Pet

pub fn pet_payload(id: u64) -> Pet {
    Pet {
        id,
        category: Some(Category {
            id: 1,
            name: "Dogs".to_string(),
        }),
        name: "test-doggie".to_string(),
        photo_urls: vec!["http://test.com/photo1.jpg".to_string()],
        tags: Vec::new(),
        status: "available".to_string(),
    }
}

pub fn create_pet(client: &ApiClient, clock: &dyn Clock) -> Result<String> {
    let body = to_json(&pet_payload(clock.now_millis()))?;
    let pet = decode_object(&client.send_post("/pet", &body)?)?;
    Ok(format!("Pet created - ID: {}", field_text(&pet, "id")?))
}

pub fn get_pet(client: &ApiClient, pet_id: &str) -> Result<String> {
    let pet = decode_object(&client.send_get(&format!("/pet/{pet_id}"))?)?;
    Ok(format!("Pet received - ID: {}", field_text(&pet, "id")?))
}

pub fn find_by_status(client: &ApiClient, status: &str) -> Result<String> {
    let pets = decode_array(&client.send_get(&format!("/pet/findByStatus?status={status}"))?)?;
    Ok(format!("Found {} pets with status: {status}", pets.len()))
}

pub fn delete_pet(client: &ApiClient, pet_id: &str) -> Result<String> {
    let result = decode_object(&client.send_delete(&format!("/pet/{pet_id}"))?)?;
    Ok(format!("Pet deleted - Code: {}", field_text(&result, "code")?))
}

// User

pub fn new_user_payload(username: String) -> User {
    User {
        id: None,
        username,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        email: "test@example.com".to_string(),
        password: PASSWORD.to_string(),
        phone: "1234567890".to_string(),
        user_status: 1,
    }
}

pub fn updated_user_payload(username: &str) -> User {
    User {
        id: None,
        username: username.to_string(),
        first_name: "Updated".to_string(),
        last_name: "User".to_string(),
        email: "updated@example.com".to_string(),
        password: "newpassword123".to_string(),
        phone: "0987654321".to_string(),
        user_status: 1,
    }
}

pub fn create_user(client: &ApiClient, clock: &dyn Clock) -> Result<String> {
    let username = format!("testuser{}", clock.now_millis());
    let body = to_json(&new_user_payload(username.clone()))?;
    decode_object(&client.send_post("/user", &body)?)?;
    Ok(format!("User created - Username: {username}"))
}

pub fn get_user(client: &ApiClient, username: &str) -> Result<String> {
    let user = decode_object(&client.send_get(&format!("/user/{username}"))?)?;
    Ok(format!("User received - Username: {}", field_text(&user, "username")?))
}

pub fn update_user(client: &ApiClient, username: &str) -> Result<String> {
    let body = to_json(&updated_user_payload(username))?;
    decode_object(&client.send_put(&format!("/user/{username}"), &body)?)?;
    Ok(format!("User updated - Username: {username}"))
}

pub fn login_user(client: &ApiClient, username: &str) -> Result<String> {
    let endpoint = format!("/user/login?username={username}&password={PASSWORD}");
    let result = decode_object(&client.send_get(&endpoint)?)?;
    Ok(format!("Login successful - Message: {}", field_text(&result, "message")?))
}

pub fn logout_user(client: &ApiClient) -> Result<String> {
    let result = decode_object(&client.send_get("/user/logout")?)?;
    Ok(format!("Logout successful - Message: {}", field_text(&result, "message")?))
}

pub fn delete_user(client: &ApiClient, username: &str) -> Result<String> {
    let result = decode_object(&client.send_delete(&format!("/user/{username}"))?)?;
    Ok(format!("User deleted - Code: {}", field_text(&result, "code")?))
}
