use super::ValidationError;

/// 必須の文字列項目を取り出す
///
/// 未指定、または空白のみの値は欠落とみなす。前後の空白は取り除く。
pub fn required_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}
