use crate::model::SubscribedUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SubscriberResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<SubscribedUser> for SubscriberResponse {
    fn from(value: SubscribedUser) -> Self {
        Self {
            id: value.subscriber_id,
            name: value.name,
            email: value.email,
        }
    }
}
