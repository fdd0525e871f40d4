//! Pull `(screen_name, location)` pairs out of a friends-list body.

use serde_json::Value;

use crate::domain::FriendLocation;
use crate::error::AppError;

/// Extract friends with a non-empty location, in input order.
///
/// A body without a `users` array is a lookup error. When the API answered with
/// an `errors` payload instead, the first error message is carried along.
pub fn extract_friends(body: &Value) -> Result<Vec<FriendLocation>, AppError> {
    let users = match body.get("users") {
        Some(users) => users,
        None => return Err(AppError::lookup(missing_users_message(body))),
    };
    let users = users
        .as_array()
        .ok_or_else(|| AppError::lookup("Field 'users' is not an array."))?;

    let mut out = Vec::with_capacity(users.len());
    for (i, user) in users.iter().enumerate() {
        let location = string_field(user, "location", i)?;
        if location.is_empty() {
            continue;
        }
        let screen_name = string_field(user, "screen_name", i)?;
        out.push(FriendLocation::new(screen_name, location));
    }

    tracing::info!(users = users.len(), with_location = out.len(), "extracted friend locations");
    Ok(out)
}

fn string_field<'a>(user: &'a Value, field: &str, index: usize) -> Result<&'a str, AppError> {
    user.get(field)
        .ok_or_else(|| AppError::lookup(format!("User #{index} has no '{field}' field.")))?
        .as_str()
        .ok_or_else(|| AppError::lookup(format!("User #{index} field '{field}' is not a string.")))
}

fn missing_users_message(body: &Value) -> String {
    let api_message = body
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .and_then(|err| err.get("message"))
        .and_then(Value::as_str);

    match api_message {
        Some(msg) => format!("Response has no 'users' field (API error: {msg})."),
        None => "Response has no 'users' field.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn extracts_single_friend() {
        let body = json!({
            "users": [{
                "id": 22119703,
                "id_str": "22119703",
                "name": "Niki Jennings",
                "screen_name": "nufipo",
                "location": "Kyiv"
            }]
        });
        let friends = extract_friends(&body).unwrap();
        assert_eq!(friends, vec![FriendLocation::new("nufipo", "Kyiv")]);
    }

    #[test]
    fn drops_empty_locations_and_keeps_order() {
        let body = json!({
            "users": [
                {"screen_name": "c", "location": "Lviv"},
                {"screen_name": "a", "location": ""},
                {"screen_name": "b", "location": "Odesa, Ukraine"},
                {"screen_name": "d", "location": ""}
            ]
        });
        let friends = extract_friends(&body).unwrap();
        let names: Vec<_> = friends.iter().map(|f| f.screen_name.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert!(friends.iter().all(|f| !f.location.is_empty()));
    }

    #[test]
    fn empty_users_yields_empty_list() {
        let friends = extract_friends(&json!({"users": []})).unwrap();
        assert!(friends.is_empty());
    }

    #[test]
    fn missing_users_is_a_lookup_error() {
        let body = json!({"errors": [{"code": 89, "message": "Invalid or expired token."}]});
        let err = extract_friends(&body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert!(err.to_string().contains("Invalid or expired token."));

        let err = extract_friends(&json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn malformed_records_are_lookup_errors() {
        let err = extract_friends(&json!({"users": [{"screen_name": "x"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = extract_friends(&json!({"users": [{"location": "Kyiv"}]})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);

        let err = extract_friends(&json!({"users": "nope"})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
