//! 请求参数提取与校验

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use catalog_common::is_valid_id_length;
use catalog_errors::{AppError, AppResult};

/// 取出查询参数中的 ID 并校验长度
pub fn required_id<'a>(params: &'a HashMap<String, String>, key: &str) -> AppResult<&'a str> {
    match params.get(key) {
        Some(id) => checked_id(id),
        None => Err(AppError::validation("Wrong ID format")),
    }
}

/// 校验请求体中携带的 ID 长度
pub fn checked_id(id: &str) -> AppResult<&str> {
    if is_valid_id_length(id) {
        Ok(id)
    } else {
        Err(AppError::validation("Wrong ID format"))
    }
}

/// 将 JSON 解码失败映射为 Malformed
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::malformed(format!("JSON Error: {}", rejection.body_text())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_id() {
        let mut params = HashMap::new();
        assert!(required_id(&params, "id").is_err());

        params.insert("id".to_string(), "P-123".to_string());
        assert!(required_id(&params, "id").is_err());

        params.insert("id".to_string(), "P-1718000000000042QZK".to_string());
        assert_eq!(required_id(&params, "id").unwrap(), "P-1718000000000042QZK");
        assert!(required_id(&params, "material_id").is_err());
    }

    #[test]
    fn test_checked_id() {
        assert!(checked_id("").is_err());
        assert!(checked_id("M-1").is_err());
        assert_eq!(checked_id("M-1718000000000042QZK").unwrap(), "M-1718000000000042QZK");
    }
}
