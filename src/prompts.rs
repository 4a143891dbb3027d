pub const DESCRIBE_USER: &str = include_str!("../data/prompts/describe_user.txt");
pub const KEYWORD_SYSTEM: &str = include_str!("../data/prompts/keyword_system.txt");
pub const KEYWORD_USER: &str = include_str!("../data/prompts/keyword_user.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
