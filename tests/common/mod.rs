#![allow(dead_code)]

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Knobs that make the local stand-in misbehave in specific ways.
#[derive(Debug, Clone, Default)]
pub struct FixtureBehavior {
    pub unsorted_years: bool,
    pub foreign_avatar: bool,
    pub delay: Option<Duration>,
    pub stale_timestamp: bool,
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<u32>,
}

const FIRST_NAMES: [&str; 6] = ["michael", "lindsay", "tobias", "byron", "george", "rachel"];
const LAST_NAMES: [&str; 6] = ["lawson", "ferguson", "funke", "fields", "edwards", "howell"];

async fn pause(behavior: &FixtureBehavior) {
    if let Some(delay) = behavior.delay {
        actix_web::rt::time::sleep(delay).await;
    }
}

async fn list_users(
    behavior: web::Data<FixtureBehavior>,
    query: web::Query<PageQuery>,
) -> HttpResponse {
    pause(&behavior).await;
    let page = query.page.unwrap_or(1);
    let data: Vec<Value> = (0..6u32)
        .map(|i| {
            let id = page.saturating_sub(1) * 6 + i + 1;
            let avatar_id = if behavior.foreign_avatar && i == 3 { 999 } else { id };
            json!({
                "id": id,
                "email": format!("{}.{}@reqres.in", FIRST_NAMES[i as usize], LAST_NAMES[i as usize]),
                "first_name": FIRST_NAMES[i as usize],
                "last_name": LAST_NAMES[i as usize],
                "avatar": format!("https://reqres.in/img/faces/{}-image.jpg", avatar_id),
            })
        })
        .collect();
    HttpResponse::Ok().json(json!({
        "page": page,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": data,
    }))
}

async fn list_colors(behavior: web::Data<FixtureBehavior>) -> HttpResponse {
    pause(&behavior).await;
    let mut years: Vec<i32> = (2000..2006).collect();
    if behavior.unsorted_years {
        years.swap(1, 4);
    }
    let data: Vec<Value> = years
        .iter()
        .enumerate()
        .map(|(i, year)| {
            json!({
                "id": i + 1,
                "name": format!("color {}", i + 1),
                "year": year,
                "color": format!("#{:06X}", 0x98B2D1 + i * 0x1111),
                "pantone_value": format!("15-{}", 4020 + i),
            })
        })
        .collect();
    HttpResponse::Ok().json(json!({
        "page": 1,
        "per_page": 6,
        "total": 12,
        "total_pages": 2,
        "data": data,
    }))
}

async fn register(behavior: web::Data<FixtureBehavior>, body: web::Json<Value>) -> HttpResponse {
    pause(&behavior).await;
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body.get("password").and_then(Value::as_str).unwrap_or_default();
    if email.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "Missing email or username"}));
    }
    if password.is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "Missing password"}));
    }
    if email != "eve.holt@reqres.in" {
        return HttpResponse::BadRequest()
            .json(json!({"error": "Note: Only defined users succeed registration"}));
    }
    HttpResponse::Ok().json(json!({"id": 4, "token": "QpwL5tke4Pnpja7X4"}))
}

async fn update_user(behavior: web::Data<FixtureBehavior>, body: web::Json<Value>) -> HttpResponse {
    pause(&behavior).await;
    let mut updated_at = Utc::now();
    if behavior.stale_timestamp {
        updated_at -= chrono::TimeDelta::minutes(5);
    }
    let mut response = body.into_inner();
    if let Value::Object(map) = &mut response {
        map.insert(
            "updatedAt".to_string(),
            Value::String(updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
    }
    HttpResponse::Ok().json(response)
}

async fn delete_user(behavior: web::Data<FixtureBehavior>) -> HttpResponse {
    pause(&behavior).await;
    HttpResponse::NoContent().finish()
}

async fn echo_headers(req: HttpRequest) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    HttpResponse::Ok().json(json!({
        "request_id": header("x-request-id"),
        "api_key": header("x-api-key"),
        "content_type": header("content-type"),
    }))
}

/// Starts a local stand-in for the reqres endpoints and returns its base URL.
pub async fn spawn_fixture(behavior: FixtureBehavior) -> String {
    let state = web::Data::new(behavior);
    let server = HttpServer::new(move || {
        App::new().app_data(state.clone()).service(
            web::scope("/api")
                .route("/users", web::get().to(list_users))
                .route("/users/{id}", web::put().to(update_user))
                .route("/unknown", web::get().to(list_colors))
                .route("/register", web::post().to(register))
                .route("/delete/{id}", web::delete().to(delete_user))
                .route("/headers", web::get().to(echo_headers)),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fixture server");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/", addr)
}
