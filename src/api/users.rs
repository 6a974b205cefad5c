use actix_web::{web, HttpResponse, ResponseError};
use serde_json::Value;

use crate::{
    api::metrics,
    database::MongoDB,
    services::{forecast_service::ForecastClient, user_service},
};

/// POST /add - Stores one user record
///
/// The body is any JSON object; it is persisted verbatim and the store
/// assigns the id.
#[utoipa::path(
    post,
    path = "/add",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 201, description = "User record stored", body = user_service::UserAddedResponse),
        (status = 400, description = "Body is not a JSON object"),
        (status = 500, description = "Store write failed")
    )
)]
pub async fn add_user(db: web::Data<MongoDB>, payload: web::Json<Value>) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("📝 POST /add");

    match user_service::insert_user(&db, payload.into_inner()).await {
        Ok(()) => {
            metrics::increment_users_added_count();
            log::info!("✅ User added");
            HttpResponse::Created().json(user_service::UserAddedResponse {
                message: "User added successfully".to_string(),
            })
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to add user: {}", e);
            e.error_response()
        }
    }
}

/// GET /users - Lists every user record plus the current forecast
///
/// Loads the whole collection in store scan order, then calls the forecast
/// service. If the forecast call fails, the whole request fails; there is
/// no partial response.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user records and the current forecast", body = user_service::UsersResponse),
        (status = 500, description = "Store read failed"),
        (status = 502, description = "Forecast service unavailable")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>, forecast: web::Data<ForecastClient>) -> HttpResponse {
    metrics::increment_request_count();
    log::info!("📋 GET /users");

    let users = match user_service::list_users(&db).await {
        Ok(users) => users,
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Failed to list users: {}", e);
            return e.error_response();
        }
    };

    match forecast.fetch_forecast().await {
        Ok(forecast) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(user_service::UsersResponse { users, forecast })
        }
        Err(e) => {
            metrics::increment_error_count();
            log::error!("❌ Forecast fetch failed: {}", e);
            e.error_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::USERS_COLLECTION;
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::Document;
    use serde_json::json;

    async fn test_db() -> MongoDB {
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/user_service_test".to_string());
        let db = MongoDB::new(&uri).await.expect("MongoDB must be running");

        db.collection::<Document>(USERS_COLLECTION)
            .drop()
            .await
            .ok();

        db
    }

    /// Serves {"temp": 72} at /weatherforecast on an ephemeral port.
    async fn spawn_forecast_stub() -> String {
        let server = actix_web::HttpServer::new(|| {
            App::new().route(
                "/weatherforecast",
                web::get().to(|| async { HttpResponse::Ok().json(json!({"temp": 72})) }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("failed to bind forecast stub");

        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        format!("http://{}", addr)
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_add_user_returns_created() {
        let db = test_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .route("/add", web::post().to(add_user)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/add")
            .set_json(json!({"name": "alice"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "User added successfully");
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_add_user_rejects_non_object_body() {
        let db = test_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .route("/add", web::post().to(add_user)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/add")
            .set_json(json!([1, 2, 3]))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_get_users_round_trip() {
        let db = test_db().await;
        let stub_url = spawn_forecast_stub().await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(ForecastClient::new(&stub_url)))
                .route("/add", web::post().to(add_user))
                .route("/users", web::get().to(get_users)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/add")
            .set_json(json!({"name": "bob"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["forecast"], json!({"temp": 72}));

        let users = body["users"].as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["name"], "bob");
        assert!(users[0]["_id"].is_string());
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_get_users_fails_when_forecast_unreachable() {
        let db = test_db().await;

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .app_data(web::Data::new(ForecastClient::new("http://127.0.0.1:9")))
                .route("/users", web::get().to(get_users)),
        )
        .await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
    }
}
