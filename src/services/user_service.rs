// ==================== USER RECORDS ====================
// Schema-less user records stored verbatim in the `users` collection.
// The store assigns the ObjectId; nothing else is validated or defaulted.

use crate::{
    database::MongoDB,
    models::{document_to_json, USERS_COLLECTION},
    utils::AppError,
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ==================== RESPONSE MODELS ====================

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserAddedResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UsersResponse {
    /// Every stored record, `_id` rewritten to its hex string.
    #[schema(value_type = Vec<Object>)]
    pub users: Vec<Value>,
    /// Opaque payload from the forecast service, passed through as-is.
    #[schema(value_type = Object)]
    pub forecast: Value,
}

// ==================== SERVICE FUNCTIONS ====================

/// Inserts one user record into the `users` collection.
pub async fn insert_user(db: &MongoDB, payload: Value) -> Result<(), AppError> {
    let document = payload_to_document(payload)?;

    let collection = db.collection::<Document>(USERS_COLLECTION);
    collection
        .insert_one(document)
        .await
        .map_err(|e| AppError::Database(format!("failed to insert user: {}", e)))?;

    Ok(())
}

/// Loads every record from the `users` collection in store scan order.
///
/// The whole collection is read into memory per call; there is no
/// pagination on this endpoint.
pub async fn list_users(db: &MongoDB) -> Result<Vec<Value>, AppError> {
    let collection = db.collection::<Document>(USERS_COLLECTION);

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::Database(format!("failed to query users: {}", e)))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        let document =
            result.map_err(|e| AppError::Database(format!("failed to read user: {}", e)))?;
        users.push(document_to_json(document));
    }

    Ok(users)
}

fn payload_to_document(payload: Value) -> Result<Document, AppError> {
    if !payload.is_object() {
        return Err(AppError::InvalidRequest(
            "request body must be a JSON object".to_string(),
        ));
    }

    mongodb::bson::to_document(&payload)
        .map_err(|e| AppError::InvalidRequest(format!("unsupported JSON payload: {}", e)))
}
