//! `user_name` and `user_email` from the resolved environment.

use serde_json::Value;
use sprout_core::domain::{Extension, TemplateFn, UserInfo};

use super::function;

#[derive(Debug, Clone, Default)]
pub struct UserFunctions {
    user: UserInfo,
}

impl UserFunctions {
    pub fn new(user: UserInfo) -> Self {
        Self { user }
    }
}

impl Extension for UserFunctions {
    fn namespace(&self) -> &'static str {
        "user"
    }

    fn functions(&self) -> Vec<(&'static str, TemplateFn)> {
        let name = Value::String(self.user.name.clone());
        let email = Value::String(self.user.email.clone());
        vec![
            ("name", function(move |_| Ok(name.clone()))),
            ("email", function(move |_| Ok(email.clone()))),
        ]
    }
}
