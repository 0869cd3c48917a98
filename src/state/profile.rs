// Profile state management.
// Holds the signed-in student's profile, shown in the top bar and the profile tab.

use crate::api::{AuthClient, UserInfo};
use crate::cache::{CacheStore, USER_ME, ttl};
use crate::revalidate::FlowHandle;

use super::resource::SharedResource;

/// Complete state for the profile tab.
#[derive(Debug, Default)]
pub struct ProfileTabState {
    pub user: SharedResource<UserInfo>,
    flow: Option<FlowHandle>,
}

impl ProfileTabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revalidate the profile.
    pub fn load(&mut self, store: &CacheStore, client: &AuthClient) {
        self.discard();
        let client = client.clone();
        self.flow = Some(FlowHandle::spawn(
            store.clone(),
            USER_ME,
            ttl::USER_INFO,
            self.user.clone(),
            async move { client.get_me().await },
        ));
    }

    /// Drop the result of any in-flight load.
    pub fn discard(&mut self) {
        if let Some(flow) = self.flow.take() {
            flow.discard();
        }
    }
}
