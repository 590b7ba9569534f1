use serde_json::Value;
use wesichain_core::MetadataFilter;

use crate::error::AzureSearchError;

/// A `$filter` expression attached to every query.
///
/// `Raw` is passed to the service verbatim and must already be valid OData.
#[derive(Clone, Debug, PartialEq)]
pub enum AzureSearchFilter {
    Typed(MetadataFilter),
    Raw(String),
}

impl From<MetadataFilter> for AzureSearchFilter {
    fn from(value: MetadataFilter) -> Self {
        AzureSearchFilter::Typed(value)
    }
}

pub fn to_odata_filter(filter: &AzureSearchFilter) -> Result<String, AzureSearchError> {
    match filter {
        AzureSearchFilter::Raw(expression) => Ok(expression.clone()),
        AzureSearchFilter::Typed(filter) => metadata_filter_to_odata(filter),
    }
}

fn metadata_filter_to_odata(filter: &MetadataFilter) -> Result<String, AzureSearchError> {
    match filter {
        MetadataFilter::Eq(key, value) => {
            let key = field_path(key)?;
            Ok(format!("{key} eq {}", odata_literal(key, value)?))
        }
        MetadataFilter::In(key, values) => in_to_odata(field_path(key)?, values),
        MetadataFilter::Range { key, min, max } => {
            let key = field_path(key)?;
            let mut clauses = Vec::with_capacity(2);
            if let Some(min) = min {
                clauses.push(format!("{key} ge {}", odata_literal(key, min)?));
            }
            if let Some(max) = max {
                clauses.push(format!("{key} le {}", odata_literal(key, max)?));
            }
            if clauses.is_empty() {
                return Err(AzureSearchError::UnsupportedFilter(format!(
                    "range on '{key}' needs a min or max bound"
                )));
            }
            Ok(clauses.join(" and "))
        }
        MetadataFilter::All(filters) => group_to_odata(filters, "and"),
        MetadataFilter::Any(filters) => group_to_odata(filters, "or"),
    }
}

fn in_to_odata(key: &str, values: &[Value]) -> Result<String, AzureSearchError> {
    if values.is_empty() {
        return Err(AzureSearchError::UnsupportedFilter(format!(
            "'in' on '{key}' needs at least one value"
        )));
    }

    let strings: Option<Vec<&str>> = values.iter().map(Value::as_str).collect();
    if let Some(strings) = strings {
        if strings.iter().all(|value| !value.contains(',')) {
            let joined = escape_string(&strings.join(","));
            return Ok(format!("search.in({key}, '{joined}', ',')"));
        }
    }

    let clauses = values
        .iter()
        .map(|value| odata_literal(key, value).map(|literal| format!("{key} eq {literal}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({})", clauses.join(" or ")))
}

fn group_to_odata(filters: &[MetadataFilter], operator: &str) -> Result<String, AzureSearchError> {
    if filters.is_empty() {
        return Err(AzureSearchError::UnsupportedFilter(format!(
            "'{operator}' group needs at least one filter"
        )));
    }

    let clauses = filters
        .iter()
        .map(|filter| metadata_filter_to_odata(filter).map(|clause| format!("({clause})")))
        .collect::<Result<Vec<_>, _>>()?;
    let separator = format!(" {operator} ");
    Ok(clauses.join(separator.as_str()))
}

/// Field paths are OData identifiers, with `/` separating complex sub-fields.
fn field_path(key: &str) -> Result<&str, AzureSearchError> {
    let mut chars = key.chars();
    let valid_start = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/');
    if valid_start && valid_rest {
        Ok(key)
    } else {
        Err(AzureSearchError::UnsupportedFilter(format!(
            "'{key}' is not a valid field name"
        )))
    }
}

fn odata_literal(key: &str, value: &Value) -> Result<String, AzureSearchError> {
    match value {
        Value::String(text) => Ok(format!("'{}'", escape_string(text))),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Array(_) | Value::Object(_) => Err(AzureSearchError::UnsupportedFilter(format!(
            "value for '{key}' must be a scalar"
        ))),
    }
}

fn escape_string(text: &str) -> String {
    text.replace('\'', "''")
}
