use crate::bidding::model::User;
use crate::error::{MarketError, StoreError};
use crate::store::{LocalStore, LOGGED_IN_USER_KEY};

/// 로그인 세션 상태
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Option<User>,
}

impl SessionState {
    pub fn load(store: &LocalStore) -> Self {
        Self {
            current: store.get_data(LOGGED_IN_USER_KEY, None),
        }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// 로그인한 사용자. 세션이 없으면 `NotAuthenticated`.
    pub fn require(&self) -> Result<&User, MarketError> {
        self.current.as_ref().ok_or(MarketError::NotAuthenticated)
    }

    /// 세션 교체 후 저장소에 반영
    pub fn set(&mut self, store: &LocalStore, user: Option<User>) -> Result<(), StoreError> {
        store.set_data(LOGGED_IN_USER_KEY, &user)?;
        self.current = user;
        Ok(())
    }
}
