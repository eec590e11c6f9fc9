//! Custom Tera filters available to every path and content template.

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Result, Tera, Value};

type StringTransform = fn(&str) -> String;

/// Filter name and the string transform it applies.
const STRING_FILTERS: &[(&str, StringTransform)] = &[
    ("snake_case", |s: &str| s.to_snake_case()),
    ("pascal_case", |s: &str| s.to_pascal_case()),
    ("camel_case", |s: &str| s.to_lower_camel_case()),
    ("kebab_case", |s: &str| s.to_kebab_case()),
    ("module_base", module_base),
    ("go_package", go_package),
];

/// Register every filter on a Tera instance.
pub(crate) fn register(tera: &mut Tera) {
    for &(name, transform) in STRING_FILTERS {
        tera.register_filter(
            name,
            move |value: &Value, _args: &HashMap<String, Value>| -> Result<Value> {
                let s = value
                    .as_str()
                    .ok_or_else(|| tera::Error::msg(format!("{name} filter expects a string")))?;
                Ok(Value::String(transform(s)))
            },
        );
    }
}

/// Last segment of a module path: `github.com/acme/payments` becomes `payments`.
fn module_base(module: &str) -> String {
    module
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// A valid Go package name: lowercase ASCII letters and digits only.
fn go_package(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
