use skiff_core::UserId;
use uuid::Uuid;

/// Identity of the signed-in session, threaded explicitly into every service
/// that needs to know who "the current user" is.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user_id: UserId,
    client_id: Uuid,
}

impl SessionContext {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            client_id: Uuid::new_v4(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Random id for this client instance, used only for log correlation.
    pub fn client_id(&self) -> Uuid {
        self.client_id
    }
}
