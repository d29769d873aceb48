pub mod types;
pub mod store;
pub mod media;
pub mod email;
pub mod stylists;

use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sesv2::Client as SesClient;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub dynamo_client: DynamoClient,
    pub s3_client: S3Client,
    pub ses_client: SesClient,
}

impl AppState {
    pub fn new(
        dynamo_client: DynamoClient,
        s3_client: S3Client,
        ses_client: SesClient,
    ) -> Arc<Self> {
        Arc::new(Self {
            dynamo_client,
            s3_client,
            ses_client,
        })
    }
}
