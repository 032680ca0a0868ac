//! User accounts: login/PIN credentials and per-user request quotas.

use conch_types::error::{ConchError, Result};

/// Maximum login length in characters.
pub const MAX_LOGIN_LEN: usize = 6;
/// Largest accepted PIN value.
pub const MAX_PIN: u32 = 100_000;
/// Account table capacity.
pub const MAX_USERS: usize = 100;

/// A registered account.
#[derive(Debug, Clone)]
pub struct User {
    login: String,
    pin: u32,
    /// Request quota; 0 means unlimited.
    request_limit: u32,
    /// Requests spent against the quota. Stays 0 for unlimited users.
    used_requests: u32,
}

impl User {
    /// The account's login name.
    pub fn login(&self) -> &str {
        &self.login
    }
}

fn is_valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= MAX_LOGIN_LEN
        && login.chars().all(|c| c.is_ascii_alphanumeric())
}

/// In-memory account table with a fixed capacity.
pub struct UserManager {
    users: Vec<User>,
}

impl UserManager {
    /// Create an empty account table.
    pub fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Number of registered accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Register a new account.
    ///
    /// The login must be 1 to 6 ASCII alphanumeric characters and the PIN
    /// at most 100000. Duplicates and a full table are rejected. New
    /// accounts start with no request limit.
    pub fn register(&mut self, login: &str, pin: u32) -> Result<()> {
        if !is_valid_login(login) {
            return Err(ConchError::InvalidArgs(format!(
                "login must be 1-{MAX_LOGIN_LEN} alphanumeric characters"
            )));
        }
        if pin > MAX_PIN {
            return Err(ConchError::InvalidArgs(format!(
                "PIN must be at most {MAX_PIN}"
            )));
        }
        if self.users.len() >= MAX_USERS {
            return Err(ConchError::InvalidArgs(
                "account table is full".to_string(),
            ));
        }
        if self.users.iter().any(|u| u.login == login) {
            return Err(ConchError::InvalidArgs(format!(
                "login already taken: {login}"
            )));
        }
        self.users.push(User {
            login: login.to_string(),
            pin,
            request_limit: 0,
            used_requests: 0,
        });
        log::debug!("registered account {login:?}");
        Ok(())
    }

    /// Authenticate by exact login/PIN match, returning the account index.
    pub fn auth(&self, login: &str, pin: u32) -> Option<usize> {
        self.users
            .iter()
            .position(|u| u.login == login && u.pin == pin)
    }

    /// The account at `index`, if it exists.
    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    /// Set an account's request quota and reset its spent counter.
    pub fn set_limit(&mut self, login: &str, limit: u32) -> Result<()> {
        match self.users.iter_mut().find(|u| u.login == login) {
            Some(user) => {
                user.request_limit = limit;
                user.used_requests = 0;
                log::debug!("set request limit {limit} for {login:?}");
                Ok(())
            },
            None => Err(ConchError::InvalidArgs(format!("no such user: {login}"))),
        }
    }

    /// Whether the account at `index` may spend another request.
    pub fn can_request(&self, index: usize) -> bool {
        match self.users.get(index) {
            Some(u) => u.request_limit == 0 || u.used_requests < u.request_limit,
            None => false,
        }
    }

    /// Spend one request for the account at `index`. No-op for unlimited
    /// accounts.
    pub fn record_request(&mut self, index: usize) {
        if let Some(u) = self.users.get_mut(index)
            && u.request_limit != 0
        {
            u.used_requests += 1;
        }
    }
}

impl Default for UserManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use conch_types::error::ErrorKind;

    use super::*;

    #[test]
    fn register_and_auth() {
        let mut mgr = UserManager::new();
        mgr.register("alice", 1234).unwrap();
        assert_eq!(mgr.len(), 1);
        let idx = mgr.auth("alice", 1234).unwrap();
        assert_eq!(mgr.get(idx).unwrap().login(), "alice");
    }

    #[test]
    fn auth_rejects_wrong_pin_and_unknown_login() {
        let mut mgr = UserManager::new();
        mgr.register("alice", 1234).unwrap();
        assert!(mgr.auth("alice", 4321).is_none());
        assert!(mgr.auth("bob", 1234).is_none());
    }

    #[test]
    fn login_validation() {
        let mut mgr = UserManager::new();
        assert!(mgr.register("", 1).is_err());
        assert!(mgr.register("toolong", 1).is_err());
        assert!(mgr.register("a b", 1).is_err());
        assert!(mgr.register("a-c", 1).is_err());
        assert!(mgr.register("abc123", 1).is_ok());
        assert!(mgr.register("AB9", 1).is_ok());
    }

    #[test]
    fn pin_upper_bound() {
        let mut mgr = UserManager::new();
        assert!(mgr.register("a", MAX_PIN).is_ok());
        let err = mgr.register("b", MAX_PIN + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgs);
    }

    #[test]
    fn duplicate_login_rejected() {
        let mut mgr = UserManager::new();
        mgr.register("alice", 1).unwrap();
        assert!(mgr.register("alice", 2).is_err());
        assert_eq!(mgr.len(), 1);
    }

    #[test]
    fn table_capacity_enforced() {
        let mut mgr = UserManager::new();
        for i in 0..MAX_USERS {
            mgr.register(&format!("u{i}"), 0).unwrap();
        }
        assert!(mgr.register("extra", 0).is_err());
        assert_eq!(mgr.len(), MAX_USERS);
    }

    #[test]
    fn unlimited_users_never_exhaust() {
        let mut mgr = UserManager::new();
        mgr.register("alice", 1).unwrap();
        let idx = mgr.auth("alice", 1).unwrap();
        for _ in 0..10 {
            assert!(mgr.can_request(idx));
            mgr.record_request(idx);
        }
        // The counter is never bumped for unlimited accounts.
        assert_eq!(mgr.get(idx).unwrap().used_requests, 0);
    }

    #[test]
    fn quota_gates_after_limit() {
        let mut mgr = UserManager::new();
        mgr.register("bob", 1).unwrap();
        mgr.set_limit("bob", 2).unwrap();
        let idx = mgr.auth("bob", 1).unwrap();
        assert!(mgr.can_request(idx));
        mgr.record_request(idx);
        assert!(mgr.can_request(idx));
        mgr.record_request(idx);
        assert!(!mgr.can_request(idx));
    }

    #[test]
    fn set_limit_resets_spent_counter() {
        let mut mgr = UserManager::new();
        mgr.register("bob", 1).unwrap();
        mgr.set_limit("bob", 1).unwrap();
        let idx = mgr.auth("bob", 1).unwrap();
        mgr.record_request(idx);
        assert!(!mgr.can_request(idx));
        mgr.set_limit("bob", 1).unwrap();
        assert!(mgr.can_request(idx));
        assert_eq!(mgr.get(idx).unwrap().used_requests, 0);
    }

    #[test]
    fn set_limit_unknown_user() {
        let mut mgr = UserManager::new();
        let err = mgr.set_limit("ghost", 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgs);
    }

    #[test]
    fn out_of_range_index_is_harmless() {
        let mut mgr = UserManager::new();
        assert!(!mgr.can_request(0));
        mgr.record_request(0);
        assert!(mgr.get(0).is_none());
    }
}
