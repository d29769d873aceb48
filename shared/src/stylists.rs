use crate::email::{self, DeliveryOutcome};
use crate::media;
use crate::store::{self, StoreError};
use crate::types::{CreateStylistRequest, NewStylist, StylistStatus, WelcomeEmailStatus};
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use lambda_http::{http::StatusCode, Body, Error, Response};

/// Create a new stylist: validate, upload the optional photo, persist,
/// then attempt the welcome email without letting it fail the request.
pub async fn create_stylist(
    dynamo_client: &DynamoClient,
    s3_client: &S3Client,
    ses_client: &SesClient,
    table_name: &str,
    body: &[u8],
) -> Result<Response<Body>, Error> {
    let req: CreateStylistRequest = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!("[CREATE] Parse error: {}", e);
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({"message": format!("Invalid request body: {}", e)}),
            );
        }
    };

    let mut new = match normalize_request(&req) {
        Ok(v) => v,
        Err(message) => {
            return json_response(StatusCode::BAD_REQUEST, serde_json::json!({"message": message}));
        }
    };

    if let Some(photo) = &req.photo {
        match media::upload_stylist_photo(s3_client, photo).await {
            Ok(stored) => {
                new.photo_url = stored.resolve_url().unwrap_or_default().to_string();
            }
            Err(e) => {
                tracing::error!("[CREATE] Photo upload failed: {}", e);
                return json_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"message": e}),
                );
            }
        }
    }

    let stylist = match store::insert_stylist(dynamo_client, table_name, new).await {
        Ok(stylist) => stylist,
        Err(StoreError::Conflict) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                serde_json::json!({"message": "Email already exists"}),
            );
        }
        Err(e) => {
            tracing::error!("[CREATE] Store error: {}", e);
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"message": e.to_string()}),
            );
        }
    };

    let email_result =
        email::send_welcome_email(ses_client, &stylist.email, &stylist.name, &stylist.role).await;
    let welcome_email_status = classify_email_outcome(email_result);

    json_response(
        StatusCode::CREATED,
        serde_json::json!({
            "message": "Stylist created successfully",
            "stylist": stylist,
            "welcomeEmailStatus": welcome_email_status,
        }),
    )
}

/// List all stylists, in store order.
pub async fn list_stylists(
    dynamo_client: &DynamoClient,
    table_name: &str,
) -> Result<Response<Body>, Error> {
    match store::list_stylists(dynamo_client, table_name).await {
        Ok(stylists) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&stylists)?.into())
            .map_err(Box::new)?),
        Err(e) => {
            tracing::error!("[LIST] Store error: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"message": e.to_string()}),
            )
        }
    }
}

/// Mark a stylist active or inactive and return the updated record.
pub async fn set_stylist_status(
    dynamo_client: &DynamoClient,
    table_name: &str,
    stylist_id: &str,
    status: StylistStatus,
) -> Result<Response<Body>, Error> {
    match store::update_status(dynamo_client, table_name, stylist_id, status).await {
        Ok(stylist) => json_response(
            StatusCode::OK,
            serde_json::json!({
                "message": format!("Stylist marked {}", status.as_str()),
                "stylist": stylist,
            }),
        ),
        Err(StoreError::NotFound) => json_response(
            StatusCode::NOT_FOUND,
            serde_json::json!({"message": "Stylist not found"}),
        ),
        Err(e) => {
            tracing::error!("[STATUS] Store error: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"message": e.to_string()}),
            )
        }
    }
}

/// Delete a stylist.
pub async fn delete_stylist(
    dynamo_client: &DynamoClient,
    table_name: &str,
    stylist_id: &str,
) -> Result<Response<Body>, Error> {
    match store::delete_stylist(dynamo_client, table_name, stylist_id).await {
        Ok(()) => json_response(
            StatusCode::OK,
            serde_json::json!({"message": "Stylist deleted successfully"}),
        ),
        Err(StoreError::NotFound) => json_response(
            StatusCode::NOT_FOUND,
            serde_json::json!({"message": "Stylist not found"}),
        ),
        Err(e) => {
            tracing::error!("[DELETE] Store error: {}", e);
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({"message": e.to_string()}),
            )
        }
    }
}

/// Trim name and phone, lower-case the email, leave role verbatim.
/// Rejects when any required field is missing or empty.
fn normalize_request(req: &CreateStylistRequest) -> Result<NewStylist, String> {
    let name = req.name.trim();
    let phone = req.phone.trim();
    let email = req.email.trim().to_lowercase();
    let role = req.role.as_str();

    let mut missing = Vec::new();
    if name.is_empty() {
        missing.push("name");
    }
    if phone.is_empty() {
        missing.push("phone");
    }
    if email.is_empty() {
        missing.push("email");
    }
    if role.is_empty() {
        missing.push("role");
    }
    if !missing.is_empty() {
        return Err(format!("Missing required fields: {}", missing.join(", ")));
    }

    Ok(NewStylist {
        name: name.to_string(),
        phone: phone.to_string(),
        email,
        role: role.to_string(),
        photo_url: String::new(),
    })
}

fn classify_email_outcome(result: Result<DeliveryOutcome, String>) -> WelcomeEmailStatus {
    match result {
        Ok(outcome) if outcome.ok && !outcome.fallback => WelcomeEmailStatus::Sent,
        Ok(outcome) if outcome.ok => WelcomeEmailStatus::Fallback,
        Ok(_) => WelcomeEmailStatus::Failed,
        Err(e) => {
            tracing::error!("Failed to send welcome email: {}", e);
            WelcomeEmailStatus::Error
        }
    }
}

fn json_response(
    status: StatusCode,
    body: serde_json::Value,
) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(body.to_string().into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, phone: &str, email: &str, role: &str) -> CreateStylistRequest {
        CreateStylistRequest {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            photo: None,
        }
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        let new = normalize_request(&request(
            " Ada Lane ",
            " 555-0100 ",
            " Ada@Salon.com ",
            "Colorist",
        ))
        .unwrap();
        assert_eq!(new.name, "Ada Lane");
        assert_eq!(new.phone, "555-0100");
        assert_eq!(new.email, "ada@salon.com");
        assert_eq!(new.role, "Colorist");
        assert_eq!(new.photo_url, "");
    }

    #[test]
    fn test_normalize_rejects_missing_fields() {
        let err = normalize_request(&request("", "555-0100", "", "Colorist")).unwrap_err();
        assert_eq!(err, "Missing required fields: name, email");

        // Whitespace-only counts as missing for the trimmed fields.
        assert!(normalize_request(&request("   ", "555-0100", "a@b.c", "Colorist")).is_err());
    }

    #[test]
    fn test_normalize_keeps_role_verbatim() {
        // Role is never trimmed; whitespace-padded roles pass as-is.
        let new = normalize_request(&request("Ada", "555-0100", "a@b.c", " Colorist ")).unwrap();
        assert_eq!(new.role, " Colorist ");

        assert!(normalize_request(&request("Ada", "555-0100", "a@b.c", "")).is_err());
    }

    #[test]
    fn test_classify_email_outcome() {
        assert_eq!(
            classify_email_outcome(Ok(DeliveryOutcome {
                ok: true,
                fallback: false
            })),
            WelcomeEmailStatus::Sent
        );
        assert_eq!(
            classify_email_outcome(Ok(DeliveryOutcome {
                ok: true,
                fallback: true
            })),
            WelcomeEmailStatus::Fallback
        );
        assert_eq!(
            classify_email_outcome(Ok(DeliveryOutcome {
                ok: false,
                fallback: true
            })),
            WelcomeEmailStatus::Failed
        );
        assert_eq!(
            classify_email_outcome(Err("ses exploded".to_string())),
            WelcomeEmailStatus::Error
        );
    }
}
