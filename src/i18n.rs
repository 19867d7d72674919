// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持俄文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: &[&str] = &["ru", "en"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"ru" 或 "en"）；不支持的语言记录警告并保持不变
pub fn set_locale(locale: &str) {
    if !SUPPORTED_LOCALES.contains(&locale) {
        tracing::warn!("不支持的语言: {}，保持 {}", locale, current_locale());
        return;
    }
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use object_constructor::i18n::t;
/// let msg = t("matching.no_match");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use object_constructor::i18n::t_with_args;
/// let msg = t_with_args("creation.completed", &[("id", "OBJ-42")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
