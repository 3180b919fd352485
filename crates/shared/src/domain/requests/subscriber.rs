use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fields are checked in a fixed order by the newsletter service, so no derive validation here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}
