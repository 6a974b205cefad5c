use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// Collection holding the user records.
pub const USERS_COLLECTION: &str = "users";

/// Converts a stored user document into its JSON wire form.
///
/// Records are schema-less: whatever object was submitted on insert comes
/// back field-for-field. The only rewrite is `_id` - the ObjectId assigned
/// by the store is not JSON-native, so it is replaced with its hex string.
pub fn document_to_json(mut document: Document) -> Value {
    let id = document.remove("_id");

    let mut value = Bson::Document(document).into_relaxed_extjson();

    if let Value::Object(ref mut fields) = value {
        match id {
            Some(Bson::ObjectId(oid)) => {
                fields.insert("_id".to_string(), Value::String(oid.to_hex()));
            }
            Some(other) => {
                // A document written outside this service may carry a
                // non-ObjectId _id; pass it through unchanged.
                fields.insert("_id".to_string(), other.into_relaxed_extjson());
            }
            None => {}
        }
    }

    value
}
