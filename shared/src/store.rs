use crate::types::{NewStylist, Stylist, StylistStatus};
use aws_sdk_dynamodb::{
    types::{AttributeValue, ReturnValue},
    Client as DynamoClient,
};
use std::collections::HashMap;

/// Typed store failures so handlers can match on the condition instead of
/// digging vendor codes out of SDK errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email already exists")]
    Conflict,
    #[error("Stylist not found")]
    NotFound,
    #[error("{0}")]
    Store(String),
}

/// Persist a new stylist with `status = active`.
///
/// Email uniqueness is enforced with an EMAIL#{email} marker row written
/// first under an `attribute_not_exists` condition; a conditional-check
/// failure on that write surfaces as `StoreError::Conflict`.
pub async fn insert_stylist(
    client: &DynamoClient,
    table_name: &str,
    new: NewStylist,
) -> Result<Stylist, StoreError> {
    let stylist_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();
    let pk = format!("STYLIST#{}", stylist_id);
    let email_pk = format!("EMAIL#{}", new.email);

    client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(email_pk.clone()))
        .item("SK", AttributeValue::S(email_pk.clone()))
        .item("stylist_id", AttributeValue::S(stylist_id.clone()))
        .condition_expression("attribute_not_exists(PK)")
        .send()
        .await
        .map_err(|e| {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                StoreError::Conflict
            } else {
                StoreError::Store(format!("Failed to reserve email: {:?}", service_err))
            }
        })?;

    let put_result = client
        .put_item()
        .table_name(table_name)
        .item("PK", AttributeValue::S(pk.clone()))
        .item("SK", AttributeValue::S(pk))
        .item("name", AttributeValue::S(new.name.clone()))
        .item("phone", AttributeValue::S(new.phone.clone()))
        .item("email", AttributeValue::S(new.email.clone()))
        .item("role", AttributeValue::S(new.role.clone()))
        .item("photo_url", AttributeValue::S(new.photo_url.clone()))
        .item(
            "status",
            AttributeValue::S(StylistStatus::Active.as_str().to_string()),
        )
        .item("created_at", AttributeValue::S(now.clone()))
        .send()
        .await;

    if let Err(e) = put_result {
        // Release the marker row so the email is not locked by a record
        // that never materialized.
        let _ = client
            .delete_item()
            .table_name(table_name)
            .key("PK", AttributeValue::S(email_pk.clone()))
            .key("SK", AttributeValue::S(email_pk))
            .send()
            .await;
        return Err(StoreError::Store(format!(
            "Failed to store stylist: {:?}",
            e
        )));
    }

    Ok(Stylist {
        id: stylist_id,
        name: new.name,
        phone: new.phone,
        email: new.email,
        role: new.role,
        photo_url: new.photo_url,
        status: StylistStatus::Active,
        created_at: now,
    })
}

/// List every stylist in the table, in scan order.
pub async fn list_stylists(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Vec<Stylist>, StoreError> {
    let mut stylists = Vec::new();
    let mut start_key: Option<HashMap<String, AttributeValue>> = None;

    loop {
        let mut req = client
            .scan()
            .table_name(table_name)
            .filter_expression("begins_with(PK, :prefix)")
            .expression_attribute_values(":prefix", AttributeValue::S("STYLIST#".to_string()));
        if let Some(key) = start_key.take() {
            req = req.set_exclusive_start_key(Some(key));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| StoreError::Store(format!("Failed to scan stylists: {:?}", e)))?;

        for item in resp.items() {
            stylists.push(item_to_stylist(item));
        }

        match resp.last_evaluated_key() {
            Some(key) if !key.is_empty() => start_key = Some(key.clone()),
            _ => break,
        }
    }

    Ok(stylists)
}

/// Flip the status flag on an existing stylist and return the updated
/// record. The transition is unconditional on the current value, so
/// repeating it is a no-op that still succeeds.
pub async fn update_status(
    client: &DynamoClient,
    table_name: &str,
    stylist_id: &str,
    status: StylistStatus,
) -> Result<Stylist, StoreError> {
    let pk = format!("STYLIST#{}", stylist_id);

    let result = client
        .update_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(pk.clone()))
        .key("SK", AttributeValue::S(pk))
        .update_expression("SET #status = :status")
        .expression_attribute_names("#status", "status")
        .expression_attribute_values(":status", AttributeValue::S(status.as_str().to_string()))
        .condition_expression("attribute_exists(PK)")
        .return_values(ReturnValue::AllNew)
        .send()
        .await;

    match result {
        Ok(output) => {
            let item = output
                .attributes()
                .ok_or_else(|| StoreError::Store("Update returned no attributes".to_string()))?;
            Ok(item_to_stylist(item))
        }
        Err(e) => {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                Err(StoreError::NotFound)
            } else {
                Err(StoreError::Store(format!(
                    "Failed to update stylist status: {:?}",
                    service_err
                )))
            }
        }
    }
}

/// Delete a stylist and release its email marker row.
pub async fn delete_stylist(
    client: &DynamoClient,
    table_name: &str,
    stylist_id: &str,
) -> Result<(), StoreError> {
    let pk = format!("STYLIST#{}", stylist_id);

    let result = client
        .delete_item()
        .table_name(table_name)
        .key("PK", AttributeValue::S(pk.clone()))
        .key("SK", AttributeValue::S(pk))
        .condition_expression("attribute_exists(PK)")
        .return_values(ReturnValue::AllOld)
        .send()
        .await;

    match result {
        Ok(output) => {
            let email = output
                .attributes()
                .and_then(|item| item.get("email"))
                .and_then(|v| v.as_s().ok())
                .map(|s| s.to_string());

            if let Some(email) = email {
                let email_pk = format!("EMAIL#{}", email);
                let _ = client
                    .delete_item()
                    .table_name(table_name)
                    .key("PK", AttributeValue::S(email_pk.clone()))
                    .key("SK", AttributeValue::S(email_pk))
                    .send()
                    .await;
            }

            Ok(())
        }
        Err(e) => {
            let service_err = e.into_service_error();
            if service_err.is_conditional_check_failed_exception() {
                Err(StoreError::NotFound)
            } else {
                Err(StoreError::Store(format!(
                    "Failed to delete stylist: {:?}",
                    service_err
                )))
            }
        }
    }
}

fn item_to_stylist(item: &HashMap<String, AttributeValue>) -> Stylist {
    let id = item
        .get("PK")
        .and_then(|v| v.as_s().ok())
        .and_then(|pk| pk.strip_prefix("STYLIST#"))
        .map(|s| s.to_string())
        .unwrap_or_default();

    Stylist {
        id,
        name: string_attr(item, "name"),
        phone: string_attr(item, "phone"),
        email: string_attr(item, "email"),
        role: string_attr(item, "role"),
        photo_url: string_attr(item, "photo_url"),
        status: StylistStatus::parse(&string_attr(item, "status")),
        created_at: string_attr(item, "created_at"),
    }
}

fn string_attr(item: &HashMap<String, AttributeValue>, name: &str) -> String {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    #[test]
    fn test_item_to_stylist() {
        let mut item = HashMap::new();
        item.insert("PK".to_string(), attr("STYLIST#abc-123"));
        item.insert("SK".to_string(), attr("STYLIST#abc-123"));
        item.insert("name".to_string(), attr("Ada Lane"));
        item.insert("phone".to_string(), attr("555-0100"));
        item.insert("email".to_string(), attr("ada@salon.com"));
        item.insert("role".to_string(), attr("Colorist"));
        item.insert("photo_url".to_string(), attr(""));
        item.insert("status".to_string(), attr("inactive"));
        item.insert("created_at".to_string(), attr("2025-01-01T00:00:00Z"));

        let stylist = item_to_stylist(&item);
        assert_eq!(stylist.id, "abc-123");
        assert_eq!(stylist.name, "Ada Lane");
        assert_eq!(stylist.email, "ada@salon.com");
        assert_eq!(stylist.photo_url, "");
        assert_eq!(stylist.status, StylistStatus::Inactive);
    }

    #[test]
    fn test_item_to_stylist_missing_attributes() {
        let mut item = HashMap::new();
        item.insert("PK".to_string(), attr("STYLIST#abc-123"));

        let stylist = item_to_stylist(&item);
        assert_eq!(stylist.id, "abc-123");
        assert_eq!(stylist.name, "");
        // Unrecognized/absent status reads as the creation default.
        assert_eq!(stylist.status, StylistStatus::Active);
    }
}
