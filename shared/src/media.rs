use crate::types::PhotoPayload;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::env;

const BUCKET_NAME: &str = "salon-manager-media";
const PHOTO_FOLDER: &str = "stylists";
const ALLOWED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// A stored photo, addressable through up to three equivalent URLs:
/// the CDN URL (when a CDN domain is configured), the virtual-hosted S3
/// URL, and the path-style S3 URL.
#[derive(Debug, Default, Clone)]
pub struct StoredPhoto {
    pub cdn_url: Option<String>,
    pub public_url: Option<String>,
    pub path_url: Option<String>,
}

impl StoredPhoto {
    /// First non-empty URL in fixed preference order: CDN, then
    /// virtual-hosted, then path-style. None means "no photo".
    pub fn resolve_url(&self) -> Option<&str> {
        [&self.cdn_url, &self.public_url, &self.path_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .find(|url| !url.is_empty())
    }
}

/// Upload a stylist photo to S3 under the stylists/ namespace.
///
/// Only the fixed image-format set is accepted, and the decoded bytes must
/// sniff as an actual image.
pub async fn upload_stylist_photo(
    s3_client: &S3Client,
    photo: &PhotoPayload,
) -> Result<StoredPhoto, String> {
    let extension = validate_extension(&photo.file_name)?;
    let file_bytes = decode_photo_bytes(photo)?;

    let key = format!(
        "{}/{}.{}",
        PHOTO_FOLDER,
        uuid::Uuid::new_v4(),
        extension
    );

    s3_client
        .put_object()
        .bucket(BUCKET_NAME)
        .key(&key)
        .body(ByteStream::from(file_bytes))
        .content_type(&photo.content_type)
        .send()
        .await
        .map_err(|e| format!("Failed to upload to S3: {}", e))?;

    let cdn_url = env::var("CDN_DOMAIN")
        .ok()
        .filter(|domain| !domain.is_empty())
        .map(|domain| format!("https://{}/{}", domain, key));

    Ok(StoredPhoto {
        cdn_url,
        public_url: Some(format!("https://{}.s3.amazonaws.com/{}", BUCKET_NAME, key)),
        path_url: Some(format!("https://s3.amazonaws.com/{}/{}", BUCKET_NAME, key)),
    })
}

fn validate_extension(file_name: &str) -> Result<String, String> {
    let extension = file_name
        .split('.')
        .last()
        .unwrap_or("")
        .to_ascii_lowercase();

    if ALLOWED_FORMATS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(format!("Unsupported photo format: {}", file_name))
    }
}

fn decode_photo_bytes(photo: &PhotoPayload) -> Result<Vec<u8>, String> {
    use base64::Engine;
    let file_bytes = base64::engine::general_purpose::STANDARD
        .decode(&photo.file_data)
        .map_err(|e| format!("Failed to decode base64: {}", e))?;

    image::guess_format(&file_bytes)
        .map_err(|_| "Photo data is not a recognized image".to_string())?;

    Ok(file_bytes)
}
