use serde::{Deserialize, Serialize};

use crate::utils::is_valid_email;

const NAME_MAX: usize = 100;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 5000;

/// 缺失字段按空字符串处理，交给校验给出具体提示
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
}

impl ContactRequest {
    /// 返回全部校验失败信息，空表示通过
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len == 0 {
            errors.push("Name is required".to_string());
        } else if name_len > NAME_MAX {
            errors.push(format!("Name must be at most {} characters", NAME_MAX));
        }

        if !is_valid_email(&self.email) {
            errors.push("Invalid email address".to_string());
        }

        let message_len = self.message.chars().count();
        if message_len < MESSAGE_MIN {
            errors.push(format!("Message must be at least {} characters", MESSAGE_MIN));
        } else if message_len > MESSAGE_MAX {
            errors.push(format!("Message must be at most {} characters", MESSAGE_MAX));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid_submission() {
        assert!(request("Ada", "ada@example.com", "hello there").validation_errors().is_empty());
    }

    #[test]
    fn missing_name() {
        assert_eq!(
            request("", "a@b.com", "hello there").validation_errors(),
            ["Name is required"]
        );
    }

    #[test]
    fn collects_every_failure() {
        let errors = request(&"x".repeat(101), "nope", "short").validation_errors();
        assert_eq!(
            errors,
            [
                "Name must be at most 100 characters",
                "Invalid email address",
                "Message must be at least 10 characters",
            ]
        );
    }

    #[test]
    fn message_upper_bound_counts_characters() {
        let at_limit = "é".repeat(MESSAGE_MAX);
        assert!(request("Ada", "a@b.com", &at_limit).validation_errors().is_empty());
        let over = "é".repeat(MESSAGE_MAX + 1);
        assert_eq!(
            request("Ada", "a@b.com", &over).validation_errors(),
            ["Message must be at most 5000 characters"]
        );
    }
}
