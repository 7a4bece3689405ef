//! Identity provider abstraction.
//!
//! The runtime never authenticates anyone itself; it only asks who is signed
//! in right now. Persistence is skipped while the answer is `None`.

use std::sync::RwLock;

use crate::types::UserId;

/// Source of the currently authenticated user.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}

/// Mutable identity slot owned by the client.
#[derive(Debug, Default)]
pub struct SessionIdentity {
    user: RwLock<Option<UserId>>,
}

impl SessionIdentity {
    pub fn signed_in(user: impl Into<UserId>) -> Self {
        Self {
            user: RwLock::new(Some(user.into())),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: impl Into<UserId>) {
        if let Ok(mut slot) = self.user.write() {
            *slot = Some(user.into());
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.user.write() {
            *slot = None;
        }
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<UserId> {
        self.user.read().ok().and_then(|slot| slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_and_out() {
        let identity = SessionIdentity::anonymous();
        assert_eq!(identity.current_user(), None);
        identity.sign_in("miner-1");
        assert_eq!(identity.current_user().as_deref(), Some("miner-1"));
        identity.sign_out();
        assert_eq!(identity.current_user(), None);
    }
}
