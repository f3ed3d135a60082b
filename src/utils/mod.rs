pub mod time_parser;
pub mod url_validator;

pub use time_parser::TimeParser;

/// 保留给路由使用的首段路径，不能作为 slug
pub const RESERVED_SLUGS: &[&str] = &["admin", "health", "presave", "assets"];

pub const MAX_SLUG_LEN: usize = 64;

/// 校验 slug：1-64 位 [A-Za-z0-9_-]，且不是保留字
pub fn validate_slug(slug: &str) -> Result<(), String> {
    if slug.is_empty() {
        return Err("slug cannot be empty".to_string());
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(format!("slug is longer than {} characters", MAX_SLUG_LEN));
    }
    if let Some(c) = slug
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!("slug contains illegal character '{}'", c));
    }
    if RESERVED_SLUGS.contains(&slug.to_ascii_lowercase().as_str()) {
        return Err(format!("slug '{}' is reserved", slug));
    }
    Ok(())
}

/// 新记录和草稿的 id
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("my-band_2024").is_ok());
        assert!(validate_slug(&"a".repeat(64)).is_ok());
        assert!(validate_slug(&"a".repeat(65)).is_err());
        assert!(validate_slug("").is_err());
        assert!(validate_slug("has space").is_err());
        assert!(validate_slug("über").is_err());
        assert!(validate_slug("admin").is_err());
        assert!(validate_slug("Presave").is_err());
    }

    #[test]
    fn test_generate_id_is_uuid() {
        let id = generate_id();
        assert_eq!(id.len(), 36);
        assert_ne!(id, generate_id());
    }
}
