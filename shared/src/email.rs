use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;

const FROM_ADDRESS: &str = "noreply@salonmanager.app";
const FALLBACK_FROM_ADDRESS: &str = "hello@salonmanager.app";

/// What happened to a delivery attempt. `fallback` marks that the
/// secondary sender path was used (whether or not it succeeded).
#[derive(Debug, Clone, Copy)]
pub struct DeliveryOutcome {
    pub ok: bool,
    pub fallback: bool,
}

/// Send the welcome email to a newly created stylist via AWS SES.
///
/// The primary sender is tried first; if SES rejects it, one attempt is
/// made from the fallback sender. Both rejected is reported as a
/// non-success outcome, not an error.
pub async fn send_welcome_email(
    ses_client: &SesClient,
    to_email: &str,
    name: &str,
    role: &str,
) -> Result<DeliveryOutcome, String> {
    if to_email.trim().is_empty() {
        return Err("Missing recipient address".to_string());
    }

    let (html_body, text_body) = welcome_bodies(name, role);

    let destination = Destination::builder().to_addresses(to_email).build();

    let subject = Content::builder()
        .data("Welcome to the team")
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("Failed to build subject: {:?}", e))?;

    let html_content = Content::builder()
        .data(html_body)
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("Failed to build HTML content: {:?}", e))?;

    let text_content = Content::builder()
        .data(text_body)
        .charset("UTF-8")
        .build()
        .map_err(|e| format!("Failed to build text content: {:?}", e))?;

    let body = Body::builder().html(html_content).text(text_content).build();

    let message = Message::builder().subject(subject).body(body).build();

    let email_content = EmailContent::builder().simple(message).build();

    let primary = ses_client
        .send_email()
        .from_email_address(FROM_ADDRESS)
        .destination(destination.clone())
        .content(email_content.clone())
        .send()
        .await;

    match primary {
        Ok(_) => Ok(DeliveryOutcome {
            ok: true,
            fallback: false,
        }),
        Err(primary_err) => {
            tracing::warn!(
                "Primary sender rejected welcome email to {}: {:?}",
                to_email,
                primary_err
            );

            let fallback = ses_client
                .send_email()
                .from_email_address(FALLBACK_FROM_ADDRESS)
                .destination(destination)
                .content(email_content)
                .send()
                .await;

            match fallback {
                Ok(_) => Ok(DeliveryOutcome {
                    ok: true,
                    fallback: true,
                }),
                Err(fallback_err) => {
                    tracing::error!(
                        "Fallback sender rejected welcome email to {}: {:?}",
                        to_email,
                        fallback_err
                    );
                    Ok(DeliveryOutcome {
                        ok: false,
                        fallback: true,
                    })
                }
            }
        }
    }
}

fn welcome_bodies(name: &str, role: &str) -> (String, String) {
    let html_body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        body {{
            font-family: 'HelveticaNeue', Helvetica, Arial, sans-serif;
            line-height: 1.6;
            color: #333333;
            background: #ffffff;
            margin: 0;
            padding: 0;
        }}
        .wrapper {{
            max-width: 600px;
            margin: 0 auto;
            padding: 60px 20px;
        }}
        .container {{
            background: #ffffff;
            border: 1px solid #e5e5e5;
            padding: 60px 50px;
        }}
        .logo {{
            font-size: 24px;
            font-weight: 300;
            color: #000000;
            margin: 0 0 40px 0;
            text-align: center;
            letter-spacing: -0.5px;
        }}
        .title {{
            font-size: 20px;
            font-weight: 300;
            color: #000000;
            margin: 0 0 24px 0;
        }}
        .text {{
            font-size: 15px;
            font-weight: 400;
            color: #333333;
            margin: 0 0 24px 0;
            line-height: 1.6;
        }}
        .footer {{
            margin-top: 48px;
            padding-top: 24px;
            border-top: 1px solid #e5e5e5;
            font-size: 13px;
            font-weight: 300;
            color: #666666;
            text-align: center;
        }}
    </style>
</head>
<body>
    <div class="wrapper">
        <div class="container">
            <h1 class="logo">Salon Manager</h1>

            <h2 class="title">Welcome aboard, {}</h2>

            <p class="text">
                Your profile has been added to the salon as <strong>{}</strong>.
                The front desk can now book appointments against your schedule,
                and your photo and details appear in the stylist directory.
            </p>

            <p class="text">
                If anything looks wrong, ask a manager to update your profile.
            </p>

            <div class="footer">
                <p>© 2025 Salon Manager</p>
            </div>
        </div>
    </div>
</body>
</html>"#,
        name, role
    );

    let text_body = format!(
        r#"Salon Manager

Welcome aboard, {}

Your profile has been added to the salon as {}. The front desk can now book
appointments against your schedule, and your photo and details appear in the
stylist directory.

If anything looks wrong, ask a manager to update your profile.

© 2025 Salon Manager"#,
        name, role
    );

    (html_body, text_body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_bodies_include_name_and_role() {
        let (html, text) = welcome_bodies("Ada Lane", "Colorist");
        assert!(html.contains("Ada Lane"));
        assert!(html.contains("Colorist"));
        assert!(text.contains("Ada Lane"));
        assert!(text.contains("Colorist"));
    }

    #[tokio::test]
    async fn test_missing_recipient_is_an_error() {
        let config = aws_config::SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new("us-east-1"))
            .build();
        let client = SesClient::new(&config);

        let result = send_welcome_email(&client, "   ", "Ada Lane", "Colorist").await;
        assert!(result.is_err());
    }
}
